//! OData URL builder.

use crate::api::query::QueryOptions;

use super::url::filter_to_odata;
use super::url::order_to_odata;

/// Path segment appended to the base URL when the suffix is requested.
pub const ODATA_SUFFIX: &str = "/odata";

/// Builds OData query URLs for one resource.
///
/// The base URL (and whether [`ODATA_SUFFIX`] is appended to it) is fixed
/// at construction. Building never fails: unset or null parts of the options
/// are left out of the query string.
///
/// # Example
///
/// ```
/// use timesheet_lib::api::query::Filter;
/// use timesheet_lib::api::query::QueryOptions;
/// use timesheet_lib::api::query::odata::ODataBuilder;
///
/// let builder = ODataBuilder::new("https://api.example.com/users", true);
/// let options = QueryOptions::new()
///     .filter(Filter::new().contains("name", "an"))
///     .top(10);
///
/// assert_eq!(
///     builder.build_url(Some(&options)),
///     "https://api.example.com/users/odata?$filter=contains(name, 'an')&$top=10"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ODataBuilder {
    base_url: String,
}

impl ODataBuilder {
    /// Creates a builder for `base_url`, optionally appending `/odata`.
    pub fn new(base_url: impl Into<String>, with_suffix: bool) -> Self {
        let mut base_url = base_url.into();
        if with_suffix {
            base_url.push_str(ODATA_SUFFIX);
        }
        Self { base_url }
    }

    /// Returns the base URL, including the suffix if one was appended.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the full URL for the given options.
    ///
    /// Without options the base URL is returned as is. When the options
    /// produce no segment the `?` is left out as well.
    pub fn build_url(&self, options: Option<&QueryOptions>) -> String {
        let url = match options {
            Some(options) => join_url(&self.base_url, &self.build_query_string(options)),
            None => self.base_url.clone(),
        };
        log::trace!("Built OData URL: {}", url);
        url
    }

    /// Like [`build_url`](Self::build_url), with every segment value
    /// percent-encoded.
    pub fn build_encoded_url(&self, options: Option<&QueryOptions>) -> String {
        let url = match options {
            Some(options) => {
                let query = segments(options)
                    .into_iter()
                    .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
                    .collect::<Vec<_>>()
                    .join("&");
                join_url(&self.base_url, &query)
            }
            None => self.base_url.clone(),
        };
        log::trace!("Built encoded OData URL: {}", url);
        url
    }

    /// Builds the query string alone, without the leading `?`.
    pub fn build_query_string(&self, options: &QueryOptions) -> String {
        segments(options)
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn join_url(base_url: &str, query: &str) -> String {
    if query.is_empty() {
        base_url.to_string()
    } else {
        format!("{}?{}", base_url, query)
    }
}

/// Collects the query segments in their fixed order:
/// select, expand, filter, top, skip, orderby, count.
fn segments(options: &QueryOptions) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();

    // $select
    if let Some(select) = options.select.as_ref().filter(|s| !s.is_empty()) {
        params.push(("$select", select.join(",")));
    }

    // $expand
    if let Some(expand) = options.expand.as_ref().filter(|e| !e.is_empty()) {
        params.push(("$expand", expand.join(",")));
    }

    // $filter
    if let Some(filter) = options.filter.as_ref().and_then(filter_to_odata) {
        params.push(("$filter", filter));
    }

    // $top
    if let Some(top) = options.top {
        params.push(("$top", top.to_string()));
    }

    // $skip
    if let Some(skip) = options.skip {
        params.push(("$skip", skip.to_string()));
    }

    // $orderby
    if let Some(order) = options.order_by.as_ref().and_then(order_to_odata) {
        params.push(("$orderby", order));
    }

    // $count
    if options.count == Some(true) {
        params.push(("$count", "true".to_string()));
    }

    params
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;
    use chrono::NaiveDate;
    use chrono::TimeZone;

    use super::*;
    use crate::api::query::Direction;
    use crate::api::query::Filter;
    use crate::api::query::Operator;
    use crate::api::query::OrderBy;

    const BASE: &str = "https://api.example.com/timesheets";

    fn builder() -> ODataBuilder {
        ODataBuilder::new(BASE, false)
    }

    fn query(options: &QueryOptions) -> String {
        builder().build_query_string(options)
    }

    #[test]
    fn test_suffix() {
        assert_eq!(ODataBuilder::new(BASE, true).base_url(), format!("{}/odata", BASE));
        assert_eq!(ODataBuilder::new(BASE, false).base_url(), BASE);
    }

    #[test]
    fn test_no_options_returns_base_url() {
        assert_eq!(builder().build_url(None), BASE);
        assert_eq!(ODataBuilder::new(BASE, true).build_url(None), format!("{}/odata", BASE));
    }

    #[test]
    fn test_empty_options_omit_question_mark() {
        assert_eq!(builder().build_url(Some(&QueryOptions::new())), BASE);

        let all_null = QueryOptions::new()
            .filter(Filter::new().value("name", None::<&str>))
            .order_by(OrderBy::default());
        assert_eq!(builder().build_url(Some(&all_null)), BASE);
    }

    #[test]
    fn test_contains() {
        let options = QueryOptions::new().filter(Filter::new().contains("name", "an"));
        assert_eq!(query(&options), "$filter=contains(name, 'an')");
    }

    #[test]
    fn test_range_conditions() {
        let options = QueryOptions::new().filter(
            Filter::new().conditions("age", [(Operator::Ge, 20), (Operator::Le, 30)]),
        );
        assert_eq!(query(&options), "$filter=(age ge 20) and (age le 30)");
    }

    #[test]
    fn test_scalar_equality() {
        let options = QueryOptions::new().filter(Filter::new().value("name", "John Doe"));
        assert_eq!(query(&options), "$filter=(name eq 'John Doe')");
    }

    #[test]
    fn test_order_by() {
        let options = QueryOptions::new().order_by(("id", Direction::Asc));
        assert_eq!(query(&options), "$orderby=id asc");

        let options = QueryOptions::new().order_by(OrderBy::asc("a").then_desc("b"));
        assert_eq!(query(&options), "$orderby=a asc,b desc");
    }

    #[test]
    fn test_top_and_skip() {
        let options = QueryOptions::new().top(10).skip(5);
        assert_eq!(query(&options), "$top=10&$skip=5");
    }

    #[test]
    fn test_zero_top_and_skip_are_emitted() {
        let options = QueryOptions::new().skip(0).top(0);
        assert_eq!(query(&options), "$top=0&$skip=0");
    }

    #[test]
    fn test_segment_order() {
        let options = QueryOptions::new()
            .include_count()
            .order_by(OrderBy::desc("date"))
            .skip(20)
            .top(10)
            .filter(Filter::new().value("userId", 3))
            .expand(&["user", "tasks"])
            .select(&["id", "date"]);

        assert_eq!(
            builder().build_url(Some(&options)),
            format!(
                "{}?$select=id,date&$expand=user,tasks&$filter=(userId eq 3)&$top=10&$skip=20&$orderby=date desc&$count=true",
                BASE
            )
        );
    }

    #[test]
    fn test_empty_select_and_expand_are_omitted() {
        let options = QueryOptions::new().select(&[]).expand(&[]).top(1);
        assert_eq!(query(&options), "$top=1");
    }

    #[test]
    fn test_count_false_is_omitted() {
        let options = QueryOptions {
            count: Some(false),
            ..QueryOptions::new()
        };
        assert_eq!(query(&options), "");
    }

    #[test]
    fn test_date_ignores_offset() {
        // 23:30 at UTC-05:00 is already the next day in UTC.
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let late = offset.with_ymd_and_hms(2023, 4, 21, 23, 30, 0).unwrap();
        let options = QueryOptions::new().filter(Filter::new().value("date", late));
        assert_eq!(query(&options), "$filter=(date eq 2023-04-21)");

        let date = NaiveDate::from_ymd_opt(2023, 4, 21).unwrap();
        let options = QueryOptions::new().filter(Filter::new().value("date", date));
        assert_eq!(query(&options), "$filter=(date eq 2023-04-21)");
    }

    #[test]
    fn test_idempotent() {
        let options = QueryOptions::new()
            .filter(Filter::new().value("name", "x").contains("title", "y"))
            .top(3);
        let b = builder();
        assert_eq!(b.build_url(Some(&options)), b.build_url(Some(&options)));
    }

    #[test]
    fn test_encoded_url() {
        let options = QueryOptions::new().filter(Filter::new().value("name", "John Doe"));
        assert_eq!(
            builder().build_encoded_url(Some(&options)),
            format!("{}?$filter=%28name%20eq%20%27John%20Doe%27%29", BASE)
        );
        assert_eq!(builder().build_encoded_url(Some(&QueryOptions::new())), BASE);
    }
}
