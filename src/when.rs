use crate::flavor::Flavor;

/// Fluent dispatcher selecting a SQL fragment by the active flavor.
///
/// Built per call and consumed immediately by a terminal method:
/// ```rust
/// use sql_flavor::prelude::*;
///
/// let sql = "select 1".to_string()
///     + &When::for_flavor(Flavor::Oracle)
///         .when(Flavor::Oracle, " from dual")
///         .otherwise("");
/// assert_eq!(sql, "select 1 from dual");
/// ```
///
/// The first matching entry wins; registering the same flavor twice is
/// allowed and the later entry is shadowed (last-registered does NOT win).
/// Terminals always return an owned string, never null: the result is
/// meant to be concatenated into SQL text.
#[derive(Debug, Clone)]
pub struct When {
    active: Flavor,
    entries: Vec<(Flavor, String)>,
}

impl When {
    /// Start an empty chain dispatching on `active`.
    #[must_use]
    pub fn for_flavor(active: Flavor) -> Self {
        Self {
            active,
            entries: Vec::new(),
        }
    }

    /// Append an alternative: `sql` is the result if `flavor` is active
    /// and no earlier entry matched.
    #[must_use]
    pub fn when(mut self, flavor: Flavor, sql: impl Into<String>) -> Self {
        self.entries.push((flavor, sql.into()));
        self
    }

    /// Terminate the chain with a default for non-matching flavors.
    #[must_use]
    pub fn otherwise(self, sql: impl Into<String>) -> String {
        let fallback = sql.into();
        self.resolve().unwrap_or(fallback)
    }

    /// Terminate the chain with an empty-string default.
    #[must_use]
    pub fn end(self) -> String {
        self.resolve().unwrap_or_default()
    }

    fn resolve(self) -> Option<String> {
        let active = self.active;
        self.entries
            .into_iter()
            .find(|(flavor, _)| *flavor == active)
            .map(|(_, sql)| sql)
    }
}
