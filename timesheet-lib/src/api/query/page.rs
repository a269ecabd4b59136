//! Decoding of paginated OData responses.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::ParseError;

/// A page of query results with the total number of matching records.
///
/// # Example
///
/// ```
/// use serde::Deserialize;
/// use timesheet_lib::api::query::PaginatedResult;
///
/// #[derive(Deserialize)]
/// struct User {
///     id: u32,
/// }
///
/// let body = r#"{"@odata.count": 42, "value": [{"id": 1}, {"id": 2}]}"#;
/// let page: PaginatedResult<User> = PaginatedResult::from_json(body)?;
///
/// assert_eq!(page.len(), 2);
/// assert_eq!(page.total_count(), 42);
/// assert_eq!(page.total_pages(10), 5);
/// # Ok::<(), timesheet_lib::error::ParseError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedResult<T> {
    items: Vec<T>,
    /// Total record count across all pages.
    total_count: usize,
    /// OData `@odata.nextLink`, if the server paged the response itself.
    next_link: Option<String>,
}

impl<T> PaginatedResult<T> {
    /// Creates a page whose total count is its own length.
    pub fn new(items: Vec<T>) -> Self {
        let total_count = items.len();
        Self {
            items,
            total_count,
            next_link: None,
        }
    }

    /// Sets the total record count.
    pub fn with_total_count(mut self, count: usize) -> Self {
        self.total_count = count;
        self
    }

    /// Sets the OData next link.
    pub fn with_next_link(mut self, next_link: impl Into<String>) -> Self {
        self.next_link = Some(next_link.into());
        self
    }

    /// Returns a reference to the items in this page.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the page and returns the items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns the total number of matching records.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Returns the OData next link, if available.
    pub fn next_link(&self) -> Option<&str> {
        self.next_link.as_deref()
    }

    /// Returns the number of pages of `items_per_page` needed for all records.
    ///
    /// Returns 0 for a page size of 0.
    pub fn total_pages(&self, items_per_page: u64) -> u64 {
        if items_per_page == 0 {
            return 0;
        }
        (self.total_count as u64).div_ceil(items_per_page)
    }

    /// Returns `true` if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T: DeserializeOwned> PaginatedResult<T> {
    /// Decodes an OData collection response body.
    pub fn from_json(body: &str) -> Result<Self, ParseError> {
        let response: ODataResponse<T> = serde_json::from_str(body)
            .map_err(|e| ParseError::response_with_body(e.to_string(), body))?;
        Ok(Self::from_response(response))
    }

    /// Decodes an already parsed OData collection response.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ParseError> {
        let response: ODataResponse<T> =
            serde_json::from_value(value).map_err(|e| ParseError::response(e.to_string()))?;
        Ok(Self::from_response(response))
    }

    fn from_response(response: ODataResponse<T>) -> Self {
        let mut page = Self::new(response.value);
        if let Some(count) = response.count {
            page = page.with_total_count(count);
        }
        if let Some(next_link) = response.next_link {
            page = page.with_next_link(next_link);
        }
        log::debug!(
            "Decoded page of {} items (total {})",
            page.len(),
            page.total_count
        );
        page
    }
}

/// OData response structure for collection queries.
#[derive(Debug, Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
struct ODataResponse<T> {
    /// The records in this page.
    value: Vec<T>,
    /// Total count (when $count=true).
    #[serde(rename = "@odata.count")]
    count: Option<usize>,
    /// Link to the next page.
    #[serde(rename = "@odata.nextLink")]
    next_link: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Item {
        id: u32,
    }

    #[test]
    fn test_count_falls_back_to_len() {
        let page: PaginatedResult<Item> =
            PaginatedResult::from_value(json!({"value": [{"id": 1}, {"id": 2}, {"id": 3}]})).unwrap();
        assert_eq!(page.total_count(), 3);
        assert_eq!(page.next_link(), None);
    }

    #[test]
    fn test_next_link() {
        let page: PaginatedResult<Item> = PaginatedResult::from_value(json!({
            "@odata.count": 30,
            "@odata.nextLink": "https://api.example.com/users?$skip=10",
            "value": [{"id": 1}]
        }))
        .unwrap();
        assert_eq!(page.next_link(), Some("https://api.example.com/users?$skip=10"));
        assert_eq!(page.items(), &[Item { id: 1 }]);
    }

    #[test]
    fn test_total_pages() {
        let page = PaginatedResult::new(vec![1, 2]).with_total_count(21);
        assert_eq!(page.total_pages(10), 3);
        assert_eq!(page.total_pages(0), 0);
        assert_eq!(PaginatedResult::<u8>::new(vec![]).total_pages(10), 0);
    }

    #[test]
    fn test_malformed_body_keeps_body() {
        let err = PaginatedResult::<Item>::from_json("{\"items\": []}").unwrap_err();
        match err {
            ParseError::Response { body, .. } => assert_eq!(body.as_deref(), Some("{\"items\": []}")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
