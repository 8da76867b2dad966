use crate::error::DatabaseError;

/// Kind of parameter marker found in SQL template text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// Indexed marker written as `?`.
    Positional,
    /// Named marker written as `:name`.
    Named,
}

/// One parameter marker discovered by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    kind: MarkerKind,
    name: Option<String>,
    offset: usize,
}

impl Marker {
    #[must_use]
    pub fn kind(&self) -> MarkerKind {
        self.kind
    }

    /// Marker name; present only for named markers.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Byte offset of the marker in the source template text.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// Immutable SQL text plus its parsed marker list.
///
/// To include a literal `?` or `:` in the SQL, escape it by doubling
/// (`??` or `::`); the driver sees a single character and no marker is
/// produced. A bare `:` not followed by an identifier character passes
/// through as a literal colon, so cast syntax in dialects that use colons
/// keeps working.
///
/// Markers inside string or comment literals are NOT exempted. Never pass
/// untrusted text in as SQL; it will be executed in the database.
///
/// Templates are stateless and reusable: compile once, bind many times,
/// share freely across threads.
/// ```rust
/// use sql_flavor::prelude::*;
///
/// let t = SqlTemplate::compile("select * from t where id = ? and name = :name")?;
/// assert_eq!(t.marker_count(), 2);
/// assert_eq!(t.driver_sql(), "select * from t where id = ? and name = ?");
/// # Ok::<(), sql_flavor::DatabaseError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlTemplate {
    source: String,
    driver_sql: String,
    markers: Vec<Marker>,
}

impl SqlTemplate {
    /// Tokenize SQL template text into a reusable template.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Template`] for malformed marker syntax.
    /// The current marker grammar is total (escapes and bare colons are
    /// treated permissively rather than rejected), so compilation of any
    /// UTF-8 text presently succeeds; callers should still handle the
    /// error path, which is part of the contract.
    pub fn compile(sql: &str) -> Result<Self, DatabaseError> {
        let mut markers = Vec::new();
        let mut driver_sql = String::with_capacity(sql.len());
        let mut it = sql.char_indices().peekable();

        while let Some((offset, c)) = it.next() {
            match c {
                '?' => {
                    if matches!(it.peek(), Some((_, '?'))) {
                        // ?? collapses to a literal ?
                        it.next();
                        driver_sql.push('?');
                    } else {
                        markers.push(Marker {
                            kind: MarkerKind::Positional,
                            name: None,
                            offset,
                        });
                        driver_sql.push('?');
                    }
                }
                ':' => {
                    if matches!(it.peek(), Some((_, ':'))) {
                        // :: collapses to a literal :
                        it.next();
                        driver_sql.push(':');
                    } else {
                        let name = take_identifier(&mut it);
                        if name.is_empty() {
                            // Bare colon (e.g. a cast); passed through, not an error.
                            driver_sql.push(':');
                        } else {
                            markers.push(Marker {
                                kind: MarkerKind::Named,
                                name: Some(name),
                                offset,
                            });
                            driver_sql.push('?');
                        }
                    }
                }
                other => driver_sql.push(other),
            }
        }

        Ok(Self {
            source: sql.to_string(),
            driver_sql,
            markers,
        })
    }

    /// The template text as supplied by the caller.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The text handed to the driver: escapes collapsed, every marker
    /// rewritten to a single `?`.
    #[must_use]
    pub fn driver_sql(&self) -> &str {
        &self.driver_sql
    }

    /// Markers in left-to-right source order.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Whether any positional (`?`) marker appears in the template.
    #[must_use]
    pub fn has_positional_markers(&self) -> bool {
        self.markers
            .iter()
            .any(|m| m.kind() == MarkerKind::Positional)
    }
}

fn take_identifier(it: &mut std::iter::Peekable<std::str::CharIndices<'_>>) -> String {
    let mut name = String::new();
    while let Some(&(_, c)) = it.peek() {
        if c.is_ascii_alphanumeric() || c == '_' {
            name.push(c);
            it.next();
        } else {
            break;
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_and_named_markers_in_source_order() {
        let t = SqlTemplate::compile("insert into t (a, b, c) values (?, :b, ?)").unwrap();
        assert_eq!(t.marker_count(), 3);
        assert_eq!(t.markers()[0].kind(), MarkerKind::Positional);
        assert_eq!(t.markers()[1].name(), Some("b"));
        assert_eq!(t.markers()[2].kind(), MarkerKind::Positional);
        assert!(t.markers()[0].offset() < t.markers()[1].offset());
        assert_eq!(t.driver_sql(), "insert into t (a, b, c) values (?, ?, ?)");
    }

    #[test]
    fn doubled_question_mark_is_literal() {
        let t = SqlTemplate::compile("select 'a??b' from t").unwrap();
        assert_eq!(t.marker_count(), 0);
        assert_eq!(t.driver_sql(), "select 'a?b' from t");
    }

    #[test]
    fn doubled_colon_is_literal() {
        let t = SqlTemplate::compile("select x::text from t where y = :y").unwrap();
        assert_eq!(t.marker_count(), 1);
        assert_eq!(t.markers()[0].name(), Some("y"));
        assert_eq!(t.driver_sql(), "select x:text from t where y = ?");
    }

    #[test]
    fn bare_colon_passes_through() {
        let t = SqlTemplate::compile("select a : b from t").unwrap();
        assert_eq!(t.marker_count(), 0);
        assert_eq!(t.driver_sql(), "select a : b from t");
    }

    #[test]
    fn named_marker_takes_maximal_identifier_run() {
        let t = SqlTemplate::compile("where a = :a_1x and b=:b2,").unwrap();
        let names: Vec<_> = t.markers().iter().filter_map(Marker::name).collect();
        assert_eq!(names, vec!["a_1x", "b2"]);
    }

    #[test]
    fn trailing_marker_characters() {
        let t = SqlTemplate::compile("select ?").unwrap();
        assert_eq!(t.marker_count(), 1);
        let t = SqlTemplate::compile("select x:").unwrap();
        assert_eq!(t.marker_count(), 0);
        assert_eq!(t.driver_sql(), "select x:");
    }

    #[test]
    fn escape_scenario_from_contract() {
        let t = SqlTemplate::compile("select * from t where id = ?? and name = :name").unwrap();
        assert_eq!(t.marker_count(), 1);
        assert_eq!(t.markers()[0].name(), Some("name"));
        assert_eq!(t.driver_sql(), "select * from t where id = ? and name = ?");
    }

    #[test]
    fn non_ascii_text_survives_rewrite() {
        let t = SqlTemplate::compile("select 'héllo – ?' from t where x = ?").unwrap();
        assert_eq!(t.marker_count(), 2);
        assert_eq!(t.driver_sql(), "select 'héllo – ?' from t where x = ?");
    }
}
