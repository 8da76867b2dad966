//! Scriptable in-memory driver for exercising session behavior without a
//! real database. Enabled via the `test-utils` feature.

use std::collections::{HashSet, VecDeque};

use crate::binding::BoundParameter;
use crate::driver::{Driver, SchemaIntrospection};
use crate::error::DatabaseError;
use crate::results::ResultSet;

/// In-memory catalog backing [`StubDriver`]'s optional schema
/// introspection.
#[derive(Debug, Clone, Default)]
pub struct StubCatalog {
    /// Schema that unqualified names resolve against.
    pub current_schema: String,
    /// `(schema, table)` pairs that exist. Store them pre-normalized to
    /// the flavor convention under test.
    pub tables: HashSet<(String, String)>,
}

impl SchemaIntrospection for StubCatalog {
    fn current_schema(&mut self) -> Result<String, DatabaseError> {
        Ok(self.current_schema.clone())
    }

    fn table_in_catalog(&mut self, schema: &str, table: &str) -> Result<bool, DatabaseError> {
        Ok(self
            .tables
            .contains(&(schema.to_string(), table.to_string())))
    }
}

/// A driver whose responses are scripted ahead of time.
///
/// Each `query`/`execute` call pops the next canned outcome from its
/// queue; an empty queue answers with an empty result (or zero rows
/// affected). Every statement and its bound parameters are recorded for
/// assertion.
#[derive(Default)]
pub struct StubDriver {
    class: Option<&'static str>,
    query_results: VecDeque<Result<ResultSet, DatabaseError>>,
    execute_results: VecDeque<Result<u64, DatabaseError>>,
    catalog: Option<StubCatalog>,
    /// SQL text and parameters of every query/execute call, in order.
    pub calls: Vec<(String, Vec<BoundParameter>)>,
    /// Number of commit calls observed.
    pub commits: usize,
    /// Number of rollback calls observed.
    pub rollbacks: usize,
}

impl StubDriver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the reported driver class (the capability-cache key).
    #[must_use]
    pub fn with_class(mut self, class: &'static str) -> Self {
        self.class = Some(class);
        self
    }

    /// Attach a catalog, turning on the schema-introspection capability.
    #[must_use]
    pub fn with_catalog(mut self, current_schema: &str, tables: &[(&str, &str)]) -> Self {
        self.catalog = Some(StubCatalog {
            current_schema: current_schema.to_string(),
            tables: tables
                .iter()
                .map(|(s, t)| ((*s).to_string(), (*t).to_string()))
                .collect(),
        });
        self
    }

    pub fn push_query_result(&mut self, result: ResultSet) {
        self.query_results.push_back(Ok(result));
    }

    pub fn push_query_error(&mut self, error: DatabaseError) {
        self.query_results.push_back(Err(error));
    }

    pub fn push_execute_result(&mut self, rows_affected: u64) {
        self.execute_results.push_back(Ok(rows_affected));
    }

    pub fn push_execute_error(&mut self, error: DatabaseError) {
        self.execute_results.push_back(Err(error));
    }

    /// SQL text of the most recent call, if any.
    #[must_use]
    pub fn last_sql(&self) -> Option<&str> {
        self.calls.last().map(|(sql, _)| sql.as_str())
    }
}

impl Driver for StubDriver {
    fn driver_class(&self) -> &'static str {
        self.class.unwrap_or("StubDriver")
    }

    fn query(
        &mut self,
        sql: &str,
        params: &[BoundParameter],
    ) -> Result<ResultSet, DatabaseError> {
        self.calls.push((sql.to_string(), params.to_vec()));
        self.query_results
            .pop_front()
            .unwrap_or_else(|| Ok(ResultSet::default()))
    }

    fn execute(&mut self, sql: &str, params: &[BoundParameter]) -> Result<u64, DatabaseError> {
        self.calls.push((sql.to_string(), params.to_vec()));
        self.execute_results.pop_front().unwrap_or(Ok(0))
    }

    fn commit(&mut self) -> Result<(), DatabaseError> {
        self.commits += 1;
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), DatabaseError> {
        self.rollbacks += 1;
        Ok(())
    }

    fn as_schema_introspection(&mut self) -> Option<&mut dyn SchemaIntrospection> {
        self.catalog
            .as_mut()
            .map(|catalog| catalog as &mut dyn SchemaIntrospection)
    }
}
