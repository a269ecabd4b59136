//! OData query string fragments.

use crate::api::query::Filter;
use crate::api::query::FilterEntry;
use crate::api::query::FilterValue;
use crate::api::query::Operator;
use crate::api::query::OrderBy;
use crate::date::format_universal;

/// Converts a `FilterValue` to an OData literal.
///
/// Returns `None` for null values; callers drop the clause.
pub fn value_to_odata(value: &FilterValue) -> Option<String> {
    match value {
        FilterValue::Null => None,
        FilterValue::Bool(b) => Some(b.to_string()),
        FilterValue::Int(n) => Some(n.to_string()),
        FilterValue::Float(n) if n.is_nan() => Some("NaN".to_string()),
        FilterValue::Float(n) if n.is_infinite() => {
            Some(if n.is_sign_positive() { "INF" } else { "-INF" }.to_string())
        }
        FilterValue::Float(n) => Some(n.to_string()),
        FilterValue::String(s) => Some(escape_string(s)),
        FilterValue::Date(d) => Some(format_universal(*d)),
    }
}

/// Renders a single clause for `field`.
pub fn clause_to_odata(field: &str, operator: Operator, literal: &str) -> String {
    match operator {
        Operator::Contains => format!("contains({}, {})", field, literal),
        Operator::Eq
        | Operator::Ne
        | Operator::Gt
        | Operator::Ge
        | Operator::Lt
        | Operator::Le => format!("({} {} {})", field, operator.token(), literal),
    }
}

/// Renders every clause of one filter entry, skipping null values.
pub fn entry_to_clauses(field: &str, entry: &FilterEntry) -> Vec<String> {
    match entry {
        FilterEntry::Value(value) => value_to_odata(value)
            .map(|literal| clause_to_odata(field, Operator::Eq, &literal))
            .into_iter()
            .collect(),
        FilterEntry::Conditions(pairs) => pairs
            .iter()
            .filter_map(|(operator, value)| {
                value_to_odata(value).map(|literal| clause_to_odata(field, *operator, &literal))
            })
            .collect(),
    }
}

/// Converts a `Filter` to an OData `$filter` expression.
///
/// Returns `None` when no clause survives null elimination.
pub fn filter_to_odata(filter: &Filter) -> Option<String> {
    let clauses: Vec<_> = filter
        .entries()
        .iter()
        .flat_map(|(field, entry)| entry_to_clauses(field, entry))
        .collect();

    if clauses.is_empty() {
        None
    } else {
        Some(clauses.join(" and "))
    }
}

/// Converts an `OrderBy` to an OData `$orderby` expression.
///
/// Returns `None` for an empty ordering.
pub fn order_to_odata(order: &OrderBy) -> Option<String> {
    if order.is_empty() {
        return None;
    }

    let parts: Vec<_> = order
        .fields()
        .iter()
        .map(|(path, direction)| format!("{} {}", path, direction.token()))
        .collect();
    Some(parts.join(","))
}

/// Escapes a string for use in OData queries.
///
/// OData strings are enclosed in single quotes, with internal single quotes doubled.
pub fn escape_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}
