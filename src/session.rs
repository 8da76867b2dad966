use chrono::Utc;
use tracing::{debug, warn};

use crate::binding::{Bindings, BoundParameter, bind};
use crate::capability::{Capability, CapabilityCache};
use crate::driver::Driver;
use crate::error::DatabaseError;
use crate::flavor::Flavor;
use crate::options::Options;
use crate::results::ResultSet;
use crate::template::SqlTemplate;
use crate::when::When;

/// Default clock-skew warning threshold in milliseconds.
pub const DEFAULT_SKEW_WARN_MS: i64 = 10_000;
/// Default clock-skew error threshold in milliseconds.
pub const DEFAULT_SKEW_ERROR_MS: i64 = 30_000;

/// One logical database session: a driver, its flavor, and the policy
/// options that gate unsafe operations.
///
/// A session is one logical unit of work bound to one underlying
/// connection, used by one caller at a time; the surrounding transaction
/// manager owns commit/rollback boundaries unless manual control is
/// explicitly enabled in [`Options`].
pub struct Database<D: Driver> {
    driver: D,
    flavor: Flavor,
    options: Options,
    capabilities: CapabilityCache,
}

impl<D: Driver> Database<D> {
    #[must_use]
    pub fn new(driver: D, flavor: Flavor, options: Options) -> Self {
        Self {
            driver,
            flavor,
            options,
            capabilities: CapabilityCache::new(),
        }
    }

    /// The active dialect.
    #[must_use]
    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// The session's policy options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Start a flavor-dispatch chain seeded with one alternative:
    /// ```rust
    /// use sql_flavor::prelude::*;
    /// # use sql_flavor::test_utils::StubDriver;
    /// # let db = Database::new(StubDriver::new(), Flavor::Oracle, Options::default());
    /// let sql = "select 1".to_string() + &db.when(Flavor::Oracle, " from dual").otherwise("");
    /// ```
    #[must_use]
    pub fn when(&self, flavor: Flavor, sql: impl Into<String>) -> When {
        When::for_flavor(self.flavor).when(flavor, sql)
    }

    /// Whether the active driver supports `capability`.
    ///
    /// Dialect protocol support is checked first, then the concrete driver
    /// is probed structurally; the outcome is cached per (driver class,
    /// capability) for the life of the session. Never fails: absence is a
    /// normal answer.
    pub fn supports(&mut self, capability: Capability) -> bool {
        if !self.flavor.protocol_supports(capability) {
            return false;
        }
        let class = self.driver.driver_class();
        let driver = &mut self.driver;
        self.capabilities
            .supports_with(class, capability, || match capability {
                Capability::SchemaIntrospection => driver.as_schema_introspection().is_some(),
                // No structural interface beyond the dialect's claim.
                Capability::Sequences | Capability::ServerClock => true,
            })
    }

    /// Compile `sql`, resolve `bindings`, and run it as a statement that
    /// returns rows.
    ///
    /// # Errors
    ///
    /// Propagates template, binding, and driver errors unmodified.
    pub fn query(&mut self, sql: &str, bindings: &Bindings) -> Result<ResultSet, DatabaseError> {
        let template = SqlTemplate::compile(sql)?;
        self.query_template(&template, bindings)
    }

    /// Compile `sql`, resolve `bindings`, and run it as DML/DDL, returning
    /// the affected-row count.
    ///
    /// # Errors
    ///
    /// Propagates template, binding, and driver errors unmodified.
    pub fn execute(&mut self, sql: &str, bindings: &Bindings) -> Result<u64, DatabaseError> {
        let template = SqlTemplate::compile(sql)?;
        self.execute_template(&template, bindings)
    }

    /// Run a precompiled template as a row-returning statement. Templates
    /// are stateless, so one compiled template may be executed any number
    /// of times with fresh bindings.
    ///
    /// # Errors
    ///
    /// Propagates binding and driver errors unmodified.
    pub fn query_template(
        &mut self,
        template: &SqlTemplate,
        bindings: &Bindings,
    ) -> Result<ResultSet, DatabaseError> {
        let params = bind(template, bindings)?;
        self.log_parameters(template, &params);
        self.driver
            .query(template.driver_sql(), &params)
            .map_err(|e| self.annotate(e, template))
    }

    /// Run a precompiled template as DML/DDL.
    ///
    /// # Errors
    ///
    /// Propagates binding and driver errors unmodified.
    pub fn execute_template(
        &mut self,
        template: &SqlTemplate,
        bindings: &Bindings,
    ) -> Result<u64, DatabaseError> {
        let params = bind(template, bindings)?;
        self.log_parameters(template, &params);
        self.driver
            .execute(template.driver_sql(), &params)
            .map_err(|e| self.annotate(e, template))
    }

    /// Canonicalize a table identifier for the active flavor.
    ///
    /// A double-quoted name is unwrapped verbatim, case preserved — the
    /// escape hatch for case-sensitive identifiers. Anything else is
    /// folded to the case the flavor's catalog stores.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Template`] for an unterminated quoted name.
    pub fn normalize_table_name(&self, table_name: &str) -> Result<String, DatabaseError> {
        if let Some(rest) = table_name.strip_prefix('"') {
            return match rest.strip_suffix('"') {
                Some(inner) => Ok(inner.to_string()),
                None => Err(DatabaseError::Template(format!(
                    "quoted table name {table_name} is missing its closing quote"
                ))),
            };
        }
        if self.flavor.stores_upper_case_identifiers() {
            Ok(table_name.to_uppercase())
        } else {
            Ok(table_name.to_lowercase())
        }
    }

    /// Whether the table exists, using the connection's default schema.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Capability`] when the driver cannot report
    /// its current schema; see [`Database::table_exists_in`].
    pub fn table_exists(&mut self, table_name: &str) -> Result<bool, DatabaseError> {
        self.table_exists_in(table_name, None)
    }

    /// Whether the table exists in `schema` (or the connection's default
    /// schema when `None`).
    ///
    /// With schema introspection available this asks the catalog directly.
    /// Without it, an explicit schema still works through a less-precise
    /// probe query; no schema at all fails loudly rather than guessing,
    /// since assuming the wrong catalog is worse than failing.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Capability`] when neither introspection nor
    /// an explicit schema is available, or propagates driver errors.
    pub fn table_exists_in(
        &mut self,
        table_name: &str,
        schema: Option<&str>,
    ) -> Result<bool, DatabaseError> {
        let table = self.normalize_table_name(table_name)?;
        let schema = match schema {
            Some(s) => Some(self.normalize_table_name(s)?),
            None => None,
        };

        if self.supports(Capability::SchemaIntrospection) {
            if let Some(introspection) = self.driver.as_schema_introspection() {
                let schema = match schema {
                    Some(s) => s,
                    None => introspection.current_schema()?,
                };
                return introspection.table_in_catalog(&schema, &table);
            }
        }

        match schema {
            // Degraded path: probe the table directly. Coarser than the
            // catalog (any reachable object answers), but does not require
            // introspection support.
            Some(schema) => {
                let probe = format!("select 1 from {schema}.{table} where 1 = 0");
                match self.driver.query(&probe, &[]) {
                    Ok(_) => Ok(true),
                    Err(DatabaseError::ObjectMissing(_)) => Ok(false),
                    Err(other) => Err(other),
                }
            }
            None => Err(DatabaseError::Capability(format!(
                "driver {} does not support schema introspection, so the schema for table \
                 {table} cannot be determined; supply a schema name explicitly via \
                 table_exists_in(), or upgrade to a driver version that supports schema \
                 introspection",
                self.driver.driver_class()
            ))),
        }
    }

    /// Best-effort `drop table`: the "table does not exist" error class is
    /// swallowed, everything else (permissions, connectivity) propagates.
    ///
    /// # Errors
    ///
    /// Propagates any driver error other than [`DatabaseError::ObjectMissing`].
    pub fn drop_table_quietly(&mut self, table_name: &str) -> Result<(), DatabaseError> {
        let table = self.normalize_table_name(table_name)?;
        let sql = self.flavor.drop_table_sql(&table);
        self.quiet_drop(&sql)
    }

    /// Best-effort `drop sequence`, flavor syntax included (Derby needs
    /// `restrict`). Only "sequence does not exist" is swallowed.
    ///
    /// # Errors
    ///
    /// Propagates any driver error other than [`DatabaseError::ObjectMissing`].
    pub fn drop_sequence_quietly(&mut self, sequence_name: &str) -> Result<(), DatabaseError> {
        let sql = self.flavor.drop_sequence_sql(sequence_name);
        self.quiet_drop(&sql)
    }

    fn quiet_drop(&mut self, sql: &str) -> Result<(), DatabaseError> {
        match self.driver.execute(sql, &[]) {
            Ok(_) => Ok(()),
            Err(DatabaseError::ObjectMissing(msg)) => {
                debug!(sql, "quiet drop skipped: {msg}");
                Ok(())
            }
            Err(other) => Err(other),
        }
    }

    /// Read the next value from a sequence, smoothing over dialect syntax.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Capability`] when the dialect has no
    /// sequence support, or [`DatabaseError::Execution`] when the sequence
    /// query yields no usable value.
    pub fn next_sequence_value(&mut self, sequence_name: &str) -> Result<i64, DatabaseError> {
        if !self.supports(Capability::Sequences) {
            return Err(DatabaseError::Capability(format!(
                "flavor {:?} has no sequence support; generate keys in the application or \
                 configure a specific flavor that provides sequences",
                self.flavor
            )));
        }
        let sql = self.flavor.sequence_next_value_sql(sequence_name);
        let result = self.driver.query(&sql, &[])?;
        result
            .scalar()
            .and_then(|v| v.as_int().copied())
            .ok_or_else(|| {
                DatabaseError::Execution(format!(
                    "sequence {sequence_name} returned no integer value"
                ))
            })
    }

    /// Assert the database and application clocks agree within the default
    /// thresholds (warn at 10 s, error at 30 s).
    ///
    /// # Errors
    ///
    /// See [`Database::assert_time_synchronized_with`].
    pub fn assert_time_synchronized(&mut self) -> Result<(), DatabaseError> {
        self.assert_time_synchronized_with(DEFAULT_SKEW_WARN_MS, DEFAULT_SKEW_ERROR_MS)
    }

    /// Compare the database server's clock to the local process clock with
    /// one round-trip query. Only the magnitude of the skew matters; a
    /// database clock running behind is as wrong as one running ahead.
    /// Skew above `warn_threshold_ms` is reported through the warning
    /// channel and execution continues; above `error_threshold_ms` the
    /// call fails.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::ClockSkew`] past the error threshold, or
    /// [`DatabaseError::Execution`] when the time query yields no
    /// timestamp.
    pub fn assert_time_synchronized_with(
        &mut self,
        warn_threshold_ms: i64,
        error_threshold_ms: i64,
    ) -> Result<(), DatabaseError> {
        let sql = self.flavor.current_time_sql();
        let result = self.driver.query(sql, &[])?;
        let database = result
            .scalar()
            .and_then(crate::types::SqlValue::as_timestamp)
            .ok_or_else(|| {
                DatabaseError::Execution(format!(
                    "time query {sql} did not return a timestamp"
                ))
            })?;
        let application = Utc::now().naive_utc();
        let skew_ms = (application - database).num_milliseconds().abs();

        if skew_ms > error_threshold_ms {
            return Err(DatabaseError::ClockSkew {
                database,
                application,
                skew_ms,
            });
        }
        if skew_ms > warn_threshold_ms {
            warn!(
                skew_ms,
                %database,
                %application,
                "database and application clocks diverge; check time zone configuration"
            );
        }
        Ok(())
    }

    /// Commit the underlying transaction immediately. Must be enabled via
    /// [`Options::allow_manual_transaction_control`].
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Policy`] when manual transaction control is
    /// not enabled, or [`DatabaseError::Connection`] if the commit fails.
    pub fn commit_now(&mut self) -> Result<(), DatabaseError> {
        self.require_manual_transaction_control("commit_now")?;
        self.driver.commit()
    }

    /// Roll back the underlying transaction immediately. Must be enabled
    /// via [`Options::allow_manual_transaction_control`].
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Policy`] when manual transaction control is
    /// not enabled, or [`DatabaseError::Connection`] if the rollback fails.
    pub fn rollback_now(&mut self) -> Result<(), DatabaseError> {
        self.require_manual_transaction_control("rollback_now")?;
        self.driver.rollback()
    }

    /// Direct access to the underlying driver. An escape hatch for code
    /// migrating to this library; must be enabled via
    /// [`Options::allow_connection_access`].
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Policy`] when connection access is not
    /// enabled.
    pub fn underlying_driver(&mut self) -> Result<&mut D, DatabaseError> {
        if !self.options.allow_connection_access {
            return Err(DatabaseError::Policy(
                "underlying_driver() is disabled; enable Options::allow_connection_access \
                 for this session to permit raw driver access"
                    .to_string(),
            ));
        }
        Ok(&mut self.driver)
    }

    fn require_manual_transaction_control(&self, operation: &str) -> Result<(), DatabaseError> {
        if self.options.allow_manual_transaction_control {
            Ok(())
        } else {
            Err(DatabaseError::Policy(format!(
                "{operation}() is disabled; enable Options::allow_manual_transaction_control \
                 for this session to permit manual commit/rollback"
            )))
        }
    }

    fn log_parameters(&self, template: &SqlTemplate, params: &[BoundParameter]) {
        if self.options.sql_parameter_logging {
            debug!(sql = template.driver_sql(), params = ?params, "executing statement");
        }
    }

    fn annotate(&self, error: DatabaseError, template: &SqlTemplate) -> DatabaseError {
        match error {
            DatabaseError::Execution(msg) if self.options.sql_in_exception_messages => {
                DatabaseError::Execution(format!("{msg} (sql: {})", template.driver_sql()))
            }
            other => other,
        }
    }
}
