use std::collections::HashMap;

use crate::error::DatabaseError;
use crate::template::{Marker, MarkerKind, SqlTemplate};
use crate::types::{SqlType, SqlValue};

/// Caller-supplied values for a template's markers.
///
/// Positional bindings are consumed strictly in marker appearance order;
/// positional and named markers share one cursor. Named bindings apply to
/// named markers only — a template with any positional marker rejects a
/// named binding set rather than guessing an order.
#[derive(Debug, Clone, PartialEq)]
pub enum Bindings {
    /// Ordered values, one per marker.
    Positional(Vec<SqlValue>),
    /// Values keyed by marker name. One entry may fill several markers
    /// with the same name; unused keys are ignored.
    Named(HashMap<String, SqlValue>),
}

impl Bindings {
    /// Empty positional bindings, for templates without markers.
    #[must_use]
    pub fn none() -> Self {
        Bindings::Positional(Vec::new())
    }

    /// Named bindings from `(name, value)` pairs.
    #[must_use]
    pub fn named<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, SqlValue)>,
        K: Into<String>,
    {
        Bindings::Named(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// A marker paired with the value that will stand in for it.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundParameter {
    marker: Marker,
    value: SqlValue,
    type_hint: SqlType,
}

impl BoundParameter {
    #[must_use]
    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    #[must_use]
    pub fn value(&self) -> &SqlValue {
        &self.value
    }

    /// Declared SQL type hint, derived from the bound value.
    #[must_use]
    pub fn type_hint(&self) -> SqlType {
        self.type_hint
    }
}

/// Resolve bindings against a template, producing one [`BoundParameter`]
/// per marker in source order.
///
/// Pure transformation: re-binding the same template with new values is a
/// fresh call, which is what makes compiled templates cacheable upstream.
///
/// # Errors
///
/// Returns [`DatabaseError::Binding`] when a positional value count does
/// not match the marker count, when a named set omits a marker name the
/// template uses, or when a named set is supplied for a template that
/// contains positional markers.
pub fn bind(
    template: &SqlTemplate,
    bindings: &Bindings,
) -> Result<Vec<BoundParameter>, DatabaseError> {
    match bindings {
        Bindings::Positional(values) => bind_positional(template, values),
        Bindings::Named(values) => bind_named(template, values),
    }
}

fn bind_positional(
    template: &SqlTemplate,
    values: &[SqlValue],
) -> Result<Vec<BoundParameter>, DatabaseError> {
    if values.len() != template.marker_count() {
        return Err(DatabaseError::Binding(format!(
            "template has {} parameter marker(s) but {} value(s) were supplied",
            template.marker_count(),
            values.len()
        )));
    }
    Ok(template
        .markers()
        .iter()
        .zip(values.iter())
        .map(|(marker, value)| BoundParameter {
            marker: marker.clone(),
            value: value.clone(),
            type_hint: value.type_hint(),
        })
        .collect())
}

fn bind_named(
    template: &SqlTemplate,
    values: &HashMap<String, SqlValue>,
) -> Result<Vec<BoundParameter>, DatabaseError> {
    if template.has_positional_markers() {
        return Err(DatabaseError::Binding(
            "named bindings were supplied but the template contains positional (?) markers; \
             the binding order would be ambiguous, so bind positionally instead"
                .to_string(),
        ));
    }
    template
        .markers()
        .iter()
        .map(|marker| {
            debug_assert_eq!(marker.kind(), MarkerKind::Named);
            let name = marker.name().unwrap_or_default();
            let value = values.get(name).ok_or_else(|| {
                DatabaseError::Binding(format!(
                    "no value supplied for named marker :{name}"
                ))
            })?;
            Ok(BoundParameter {
                marker: marker.clone(),
                value: value.clone(),
                type_hint: value.type_hint(),
            })
        })
        .collect()
}
