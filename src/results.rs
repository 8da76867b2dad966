use std::collections::HashMap;
use std::sync::Arc;

use crate::types::SqlValue;

/// A single row from a query result.
///
/// Column names are shared across all rows of a result set, with a lookup
/// cache so repeated `get` calls avoid string scans.
#[derive(Debug, Clone)]
pub struct Row {
    columns: Arc<Vec<String>>,
    values: Vec<SqlValue>,
    column_index: Arc<HashMap<String, usize>>,
}

impl Row {
    #[must_use]
    pub fn new(columns: Arc<Vec<String>>, values: Vec<SqlValue>) -> Self {
        let column_index = Arc::new(
            columns
                .iter()
                .enumerate()
                .map(|(i, name)| (name.clone(), i))
                .collect::<HashMap<_, _>>(),
        );
        Self {
            columns,
            values,
            column_index,
        }
    }

    /// Column names, in select-list order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Value by column name, or `None` if the column is absent.
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&SqlValue> {
        self.column_index
            .get(column_name)
            .and_then(|&i| self.values.get(i))
    }

    /// Value by column position.
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&SqlValue> {
        self.values.get(index)
    }
}

/// Rows returned by a query, plus the affected-row count for DML.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// The rows returned by the query
    pub rows: Vec<Row>,
    /// The number of rows affected (for DML statements)
    pub rows_affected: u64,
}

impl ResultSet {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
            rows_affected: 0,
        }
    }

    /// Convenience constructor for a one-row, one-column result.
    #[must_use]
    pub fn single(column: &str, value: SqlValue) -> Self {
        let columns = Arc::new(vec![column.to_string()]);
        Self {
            rows: vec![Row::new(columns, vec![value])],
            rows_affected: 1,
        }
    }

    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
        self.rows_affected += 1;
    }

    /// First row's first value, if any. Most catalog and sequence queries
    /// return exactly one.
    #[must_use]
    pub fn scalar(&self) -> Option<&SqlValue> {
        self.rows.first().and_then(|row| row.get_by_index(0))
    }
}
