use crate::binding::BoundParameter;
use crate::error::DatabaseError;
use crate::results::ResultSet;

/// The execution boundary: one underlying connection able to run
/// parameterized SQL.
///
/// Everything here is synchronous and runs on the caller's thread; one
/// database round trip per call, bounded only by the driver's own timeout
/// policy. Parameters arrive flattened in marker order against SQL text in
/// which every marker has already been rewritten to a single `?`.
///
/// Drivers must raise [`DatabaseError::ObjectMissing`] for the "does not
/// exist" error class (dropped tables, unknown sequences) and reserve
/// [`DatabaseError::Execution`]/[`DatabaseError::Connection`] for
/// everything else, so best-effort cleanup can tell the two apart.
pub trait Driver {
    /// Stable name of the concrete driver implementation, used as the
    /// capability-cache key. Two versions of a driver with different
    /// capability surfaces should report different class names.
    fn driver_class(&self) -> &'static str;

    /// Run a statement that returns rows.
    ///
    /// # Errors
    ///
    /// Returns a driver-classified [`DatabaseError`] on failure.
    fn query(&mut self, sql: &str, params: &[BoundParameter])
    -> Result<ResultSet, DatabaseError>;

    /// Run a DML/DDL statement, returning the affected-row count.
    ///
    /// # Errors
    ///
    /// Returns a driver-classified [`DatabaseError`] on failure.
    fn execute(&mut self, sql: &str, params: &[BoundParameter]) -> Result<u64, DatabaseError>;

    /// Commit the connection's open transaction.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Connection`] if the commit fails.
    fn commit(&mut self) -> Result<(), DatabaseError>;

    /// Roll back the connection's open transaction.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Connection`] if the rollback fails.
    fn rollback(&mut self) -> Result<(), DatabaseError>;

    /// Structural capability check: a driver that can answer catalog
    /// metadata questions returns itself here. The default is `None`,
    /// which the probe records as "capability absent" — an expected
    /// outcome, not a failure.
    fn as_schema_introspection(&mut self) -> Option<&mut dyn SchemaIntrospection> {
        None
    }
}

/// Catalog metadata access, optionally implemented by a driver adapter.
pub trait SchemaIntrospection {
    /// The schema unqualified names resolve against on this connection.
    ///
    /// # Errors
    ///
    /// Returns a driver-classified [`DatabaseError`] if the catalog query fails.
    fn current_schema(&mut self) -> Result<String, DatabaseError>;

    /// Whether `table` exists in `schema`, per catalog metadata. Both
    /// names arrive already normalized to the flavor's casing convention.
    ///
    /// # Errors
    ///
    /// Returns a driver-classified [`DatabaseError`] if the catalog query fails.
    fn table_in_catalog(&mut self, schema: &str, table: &str) -> Result<bool, DatabaseError>;
}
