//! Ordering types for OData queries.

use std::fmt;

use serde::Deserialize;

/// Sort direction for ordering results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the OData token for this direction.
    pub fn token(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// A property path, possibly navigating through relations.
///
/// Segments are joined with `/`, so `["user", "name"]` renders as
/// `user/name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Creates a path from its segments.
    pub fn new(segments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the path segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl From<&str> for FieldPath {
    fn from(field: &str) -> Self {
        Self::new([field])
    }
}

impl From<String> for FieldPath {
    fn from(field: String) -> Self {
        Self::new([field])
    }
}

impl From<Vec<String>> for FieldPath {
    fn from(segments: Vec<String>) -> Self {
        Self { segments }
    }
}

impl<const N: usize> From<[&str; N]> for FieldPath {
    fn from(segments: [&str; N]) -> Self {
        Self::new(segments)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Field(String),
            Segments(Vec<String>),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Field(field) => FieldPath::from(field),
            Repr::Segments(segments) => FieldPath::from(segments),
        })
    }
}

/// Specifies the ordering of query results.
///
/// Multiple fields can be chained together for secondary, tertiary, etc. sorting.
///
/// # Example
///
/// ```
/// use timesheet_lib::api::query::OrderBy;
///
/// // Single field ordering
/// let order = OrderBy::desc("date");
///
/// // Multiple field ordering, through a relation
/// let order = OrderBy::desc("date")
///     .then_asc(["user", "name"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderBy {
    pub(crate) fields: Vec<(FieldPath, Direction)>,
}

impl OrderBy {
    /// Creates an ascending order on a field.
    pub fn asc(field: impl Into<FieldPath>) -> Self {
        Self {
            fields: vec![(field.into(), Direction::Asc)],
        }
    }

    /// Creates a descending order on a field.
    pub fn desc(field: impl Into<FieldPath>) -> Self {
        Self {
            fields: vec![(field.into(), Direction::Desc)],
        }
    }

    /// Adds a secondary ascending order on a field.
    pub fn then_asc(mut self, field: impl Into<FieldPath>) -> Self {
        self.fields.push((field.into(), Direction::Asc));
        self
    }

    /// Adds a secondary descending order on a field.
    pub fn then_desc(mut self, field: impl Into<FieldPath>) -> Self {
        self.fields.push((field.into(), Direction::Desc));
        self
    }

    /// Returns the ordered fields with their directions.
    pub fn fields(&self) -> &[(FieldPath, Direction)] {
        &self.fields
    }

    /// Returns `true` if no field is ordered on.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<P: Into<FieldPath>> From<(P, Direction)> for OrderBy {
    fn from((field, direction): (P, Direction)) -> Self {
        Self {
            fields: vec![(field.into(), direction)],
        }
    }
}

impl<P: Into<FieldPath>> FromIterator<(P, Direction)> for OrderBy {
    fn from_iter<I: IntoIterator<Item = (P, Direction)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(p, d)| (p.into(), d)).collect(),
        }
    }
}

/// Accepts either one `[path, direction]` pair or a list of them.
///
/// A pair whose path is itself a list (`[["user", "name"], "asc"]`) is a
/// single navigation path, not two entries.
impl<'de> Deserialize<'de> for OrderBy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Single((FieldPath, Direction)),
            Many(Vec<(FieldPath, Direction)>),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Single(pair) => OrderBy { fields: vec![pair] },
            Repr::Many(fields) => OrderBy { fields },
        })
    }
}
