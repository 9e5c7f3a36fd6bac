//! Query templater.
//!
//! Resolves named placeholders in a query template from values found in the
//! incoming data object. The template is parsed into a JSON tree and
//! placeholders are replaced structurally by field name, not by textual
//! substring replacement.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::config::{IndexConfig, SourceReference, TargetReference};
use crate::errors::EnrichError;

/// Literal rendered for expression tokens absent from the resolution map.
///
/// Carried over from the original behavior and documented rather than
/// silently fixed; see DESIGN.md for the open question.
const UNRESOLVED_TOKEN: &str = "null";

/// Find the first value for a field name anywhere in a JSON tree.
///
/// Performs a preorder depth-first search: direct keys of an object win
/// over matches nested inside its values.
pub fn find_value<'a>(node: &'a Value, field: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => {
            if let Some(found) = map.get(field) {
                return Some(found);
            }
            map.values().find_map(|child| find_value(child, field))
        }
        Value::Array(items) => items.iter().find_map(|child| find_value(child, field)),
        _ => None,
    }
}

/// Replace the value of every field named `field` anywhere in a JSON tree.
pub fn replace_field_value(node: &mut Value, field: &str, new_value: &str) {
    match node {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                if key == field {
                    *child = Value::String(new_value.to_owned());
                } else {
                    replace_field_value(child, field, new_value);
                }
            }
        }
        Value::Array(items) => {
            for child in items.iter_mut() {
                replace_field_value(child, field, new_value);
            }
        }
        _ => {}
    }
}

/// Produce the fully substituted query for an index configuration.
///
/// Parses the query template, builds the resolution map from the source
/// references, composes each target reference's value, and replaces the
/// placeholder fields in the template tree.
pub fn substitute(config: &IndexConfig, data_object: &Value) -> Result<Value, EnrichError> {
    let mut query: Value =
        serde_json::from_str(&config.query).map_err(|e| EnrichError::query_parse(e.to_string()))?;

    let resolution_map = build_resolution_map(&config.source_references, data_object)?;

    for reference in &config.target_references {
        let resolved = compose_value(reference, &resolution_map);
        debug!(
            argument = %reference.argument,
            value = %resolved,
            "Substituting query placeholder"
        );
        replace_field_value(&mut query, &reference.argument, &resolved);
    }

    Ok(query)
}

/// Build the resolution map from the source references.
///
/// For each reference, the extracted field value and the expression are
/// split by the reference's separator and zipped positionally. Later
/// references overwrite earlier entries sharing an expression token
/// (last-write-wins, in source-reference list order).
fn build_resolution_map(
    references: &[SourceReference],
    data_object: &Value,
) -> Result<HashMap<String, String>, EnrichError> {
    let mut map = HashMap::new();

    for reference in references {
        let raw = find_value(data_object, &reference.field_name)
            .ok_or_else(|| EnrichError::missing_field(&reference.field_name))?;
        let text = scalar_text(raw)
            .ok_or_else(|| EnrichError::NonScalarField(reference.field_name.clone()))?;

        let values: Vec<&str> = text.split(&reference.separator).collect();
        let expressions: Vec<&str> = reference.expression.split(&reference.separator).collect();

        if values.len() != expressions.len() {
            return Err(EnrichError::TokenCountMismatch {
                field: reference.field_name.clone(),
                expected: expressions.len(),
                actual: values.len(),
            });
        }

        for (expression, value) in expressions.into_iter().zip(values) {
            map.insert(expression.to_owned(), value.to_owned());
        }
    }

    Ok(map)
}

/// Compose a target reference's value from the resolution map.
///
/// Expression tokens missing from the map render as the literal "null".
fn compose_value(reference: &TargetReference, resolution_map: &HashMap<String, String>) -> String {
    reference
        .expression
        .split(&reference.separator)
        .map(|token| {
            resolution_map
                .get(token)
                .map(String::as_str)
                .unwrap_or(UNRESOLVED_TOKEN)
        })
        .collect::<Vec<_>>()
        .join(&reference.separator)
}

/// Render a scalar JSON value as text.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(UNRESOLVED_TOKEN.to_owned()),
        Value::Object(_) | Value::Array(_) => None,
    }
}
