//! Filter types for OData queries.

use std::fmt;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::TimeZone;
use serde::Deserialize;
use serde::Deserializer;
use serde::de;
use serde::de::MapAccess;
use serde::de::Visitor;

use crate::date::DateRange;

/// Comparison operators supported in filter conditions.
///
/// The set is closed: every operator maps to exactly one OData rendering, so
/// an unknown token can never slip into a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Equality: `(field eq value)`
    Eq,
    /// Not equal: `(field ne value)`
    Ne,
    /// Greater than: `(field gt value)`
    Gt,
    /// Greater than or equal: `(field ge value)`
    Ge,
    /// Less than: `(field lt value)`
    Lt,
    /// Less than or equal: `(field le value)`
    Le,
    /// Contains substring: `contains(field, value)`
    Contains,
}

impl Operator {
    /// Returns the OData token for this operator.
    pub fn token(self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Gt => "gt",
            Operator::Ge => "ge",
            Operator::Lt => "lt",
            Operator::Le => "le",
            Operator::Contains => "contains",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A scalar value compared against a field in a filter.
///
/// `Null` stands for an absent value. Null values never reach the query
/// string: the clause (or the whole key, for scalar entries) is dropped.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use timesheet_lib::api::query::FilterValue;
///
/// let name = FilterValue::from("John Doe");
/// let age = FilterValue::from(30);
/// let date = FilterValue::from(NaiveDate::from_ymd_opt(2023, 4, 21).unwrap());
/// let unset = FilterValue::from(None::<i64>);
///
/// assert!(unset.is_null());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Absent value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value, rendered single-quoted.
    String(String),
    /// Calendar date, rendered as `YYYY-MM-DD`.
    Date(NaiveDate),
}

impl FilterValue {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, FilterValue::Null)
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        FilterValue::Bool(v)
    }
}

impl From<i32> for FilterValue {
    fn from(v: i32) -> Self {
        FilterValue::Int(v.into())
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        FilterValue::Int(v)
    }
}

impl From<u32> for FilterValue {
    fn from(v: u32) -> Self {
        FilterValue::Int(v.into())
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        FilterValue::Float(v)
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::String(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::String(v.to_string())
    }
}

impl From<NaiveDate> for FilterValue {
    fn from(v: NaiveDate) -> Self {
        FilterValue::Date(v)
    }
}

impl From<NaiveDateTime> for FilterValue {
    fn from(v: NaiveDateTime) -> Self {
        FilterValue::Date(v.date())
    }
}

/// Takes the calendar date in the value's own timezone. No conversion to UTC
/// happens, so a local date near midnight keeps its day.
impl<Tz: TimeZone> From<DateTime<Tz>> for FilterValue {
    fn from(v: DateTime<Tz>) -> Self {
        FilterValue::Date(v.date_naive())
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(FilterValue::Null, Into::into)
    }
}

impl<'de> Deserialize<'de> for FilterValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(FilterValueVisitor)
    }
}

struct FilterValueVisitor;

impl<'de> Visitor<'de> for FilterValueVisitor {
    type Value = FilterValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("null, a boolean, a number or a string")
    }

    fn visit_unit<E>(self) -> Result<FilterValue, E>
    where
        E: de::Error,
    {
        Ok(FilterValue::Null)
    }

    fn visit_none<E>(self) -> Result<FilterValue, E>
    where
        E: de::Error,
    {
        Ok(FilterValue::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<FilterValue, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(FilterValueVisitor)
    }

    fn visit_bool<E>(self, v: bool) -> Result<FilterValue, E>
    where
        E: de::Error,
    {
        Ok(FilterValue::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<FilterValue, E>
    where
        E: de::Error,
    {
        Ok(FilterValue::Int(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<FilterValue, E>
    where
        E: de::Error,
    {
        // Values beyond i64 keep their magnitude as a float.
        Ok(i64::try_from(v).map_or(FilterValue::Float(v as f64), FilterValue::Int))
    }

    fn visit_f64<E>(self, v: f64) -> Result<FilterValue, E>
    where
        E: de::Error,
    {
        Ok(FilterValue::Float(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<FilterValue, E>
    where
        E: de::Error,
    {
        Ok(FilterValue::String(v.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<FilterValue, E>
    where
        E: de::Error,
    {
        Ok(FilterValue::String(v))
    }
}

/// The value side of a filter key.
///
/// A scalar entry compares the field for equality. A conditions entry holds
/// `(operator, value)` pairs that all have to hold.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FilterEntry {
    /// Ordered `(operator, value)` pairs.
    Conditions(Vec<(Operator, FilterValue)>),
    /// A single value compared with `eq`.
    Value(FilterValue),
}

impl From<FilterValue> for FilterEntry {
    fn from(v: FilterValue) -> Self {
        FilterEntry::Value(v)
    }
}

impl From<Vec<(Operator, FilterValue)>> for FilterEntry {
    fn from(pairs: Vec<(Operator, FilterValue)>) -> Self {
        FilterEntry::Conditions(pairs)
    }
}

/// A mapping from field names to filter entries.
///
/// Keys keep their insertion order, which is also the order their clauses
/// appear in `$filter`. Setting a key that already exists replaces its entry
/// in place.
///
/// # Example
///
/// ```
/// use timesheet_lib::api::query::Filter;
/// use timesheet_lib::api::query::Operator;
///
/// // name eq 'John Doe' and age between 20 and 30
/// let filter = Filter::new()
///     .value("name", "John Doe")
///     .condition("age", Operator::Ge, 20)
///     .condition("age", Operator::Le, 30);
///
/// assert_eq!(filter.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    entries: Vec<(String, FilterEntry)>,
}

impl Filter {
    /// Creates an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a scalar equality entry for `key`.
    pub fn value(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.insert(key, FilterEntry::Value(value.into()));
        self
    }

    /// Appends an `(operator, value)` pair to the conditions of `key`.
    ///
    /// A scalar entry already stored under `key` is replaced by a fresh
    /// conditions entry.
    pub fn condition(
        mut self,
        key: impl Into<String>,
        operator: Operator,
        value: impl Into<FilterValue>,
    ) -> Self {
        let key = key.into();
        let pair = (operator, value.into());
        match self.get_mut(&key) {
            Some(FilterEntry::Conditions(pairs)) => pairs.push(pair),
            _ => {
                self.insert(key, FilterEntry::Conditions(vec![pair]));
            }
        }
        self
    }

    /// Sets all conditions of `key` at once.
    pub fn conditions<V>(
        mut self,
        key: impl Into<String>,
        pairs: impl IntoIterator<Item = (Operator, V)>,
    ) -> Self
    where
        V: Into<FilterValue>,
    {
        let pairs = pairs.into_iter().map(|(op, v)| (op, v.into())).collect();
        self.insert(key, FilterEntry::Conditions(pairs));
        self
    }

    /// Shorthand for a single `contains` condition on `key`.
    pub fn contains(self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.condition(key, Operator::Contains, value)
    }

    /// Restricts `key` to the dates of `range`, bounds included.
    pub fn date_range(self, key: impl Into<String>, range: DateRange) -> Self {
        self.conditions(key, [(Operator::Ge, range.start), (Operator::Le, range.end)])
    }

    /// Inserts an entry, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, entry: FilterEntry) -> Option<FilterEntry> {
        let key = key.into();
        match self.get_mut(&key) {
            Some(existing) => Some(std::mem::replace(existing, entry)),
            None => {
                self.entries.push((key, entry));
                None
            }
        }
    }

    /// Merges another filter into this one, key by key.
    pub fn merge(mut self, other: Filter) -> Self {
        for (key, entry) in other.entries {
            self.insert(key, entry);
        }
        self
    }

    /// Returns the entry for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&FilterEntry> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, e)| e)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut FilterEntry> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, e)| e)
    }

    /// Returns the entries in insertion order.
    pub fn entries(&self) -> &[(String, FilterEntry)] {
        &self.entries
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no key is set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, E> FromIterator<(K, E)> for Filter
where
    K: Into<String>,
    E: Into<FilterEntry>,
{
    fn from_iter<I: IntoIterator<Item = (K, E)>>(iter: I) -> Self {
        let mut filter = Filter::new();
        for (key, entry) in iter {
            filter.insert(key, entry.into());
        }
        filter
    }
}

// Visits the map directly so document order survives. Parsed
// `serde_json::Value`s keep their order through the `preserve_order` feature.
impl<'de> Deserialize<'de> for Filter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(FilterVisitor)
    }
}

struct FilterVisitor;

impl<'de> Visitor<'de> for FilterVisitor {
    type Value = Filter;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of field names to filter values")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Filter, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut filter = Filter::new();
        while let Some(key) = map.next_key::<String>()? {
            let entry: FilterEntry = map.next_value()?;
            filter.insert(key, entry);
        }
        Ok(filter)
    }
}
