//! End-to-end tests for query URLs, with options written in the JSON shape
//! the front end sends.

use chrono::NaiveDate;
use serde_json::json;
use timesheet_lib::ApiConfig;
use timesheet_lib::api::ApiEndpoint;
use timesheet_lib::api::query::Filter;
use timesheet_lib::api::query::OrderBy;
use timesheet_lib::api::query::PaginatedResult;
use timesheet_lib::api::query::PaginationOptions;
use timesheet_lib::api::query::QueryOptions;
use timesheet_lib::api::query::odata::ODataBuilder;
use timesheet_lib::date::DateRange;

const BASE: &str = "https://api.example.com/users";

fn options(value: serde_json::Value) -> QueryOptions {
    serde_json::from_value(value).unwrap()
}

fn url(value: serde_json::Value) -> String {
    ODataBuilder::new(BASE, false).build_url(Some(&options(value)))
}

// =============================================================================
// Builder contract
// =============================================================================

#[test]
fn no_options_yield_base_url() {
    assert_eq!(ODataBuilder::new(BASE, false).build_url(None), BASE);
}

#[test]
fn options_without_segments_yield_base_url() {
    assert_eq!(url(json!({})), BASE);
    assert_eq!(url(json!({"filter": {"name": null}, "count": false})), BASE);
}

#[test]
fn contains_filter() {
    assert_eq!(
        url(json!({"filter": {"name": [["contains", "an"]]}})),
        format!("{}?$filter=contains(name, 'an')", BASE)
    );
}

#[test]
fn range_filter() {
    assert_eq!(
        url(json!({"filter": {"age": [["ge", 20], ["le", 30]]}})),
        format!("{}?$filter=(age ge 20) and (age le 30)", BASE)
    );
}

#[test]
fn scalar_filter() {
    assert_eq!(
        url(json!({"filter": {"name": "John Doe"}})),
        format!("{}?$filter=(name eq 'John Doe')", BASE)
    );
}

#[test]
fn mixed_filter_keeps_key_order() {
    assert_eq!(
        url(json!({"filter": {
            "name": "John Doe",
            "nickname": null,
            "age": [["ge", 20], ["le", null]],
            "active": true
        }})),
        format!(
            "{}?$filter=(name eq 'John Doe') and (age ge 20) and (active eq true)",
            BASE
        )
    );
}

#[test]
fn order_by_forms() {
    assert_eq!(
        url(json!({"orderBy": ["id", "asc"]})),
        format!("{}?$orderby=id asc", BASE)
    );
    assert_eq!(
        url(json!({"orderBy": [["a", "asc"], ["b", "desc"]]})),
        format!("{}?$orderby=a asc,b desc", BASE)
    );
    assert_eq!(
        url(json!({"orderBy": [[["role", "name"], "desc"]]})),
        format!("{}?$orderby=role/name desc", BASE)
    );
}

#[test]
fn top_and_skip_only() {
    assert_eq!(url(json!({"top": 10, "skip": 5})), format!("{}?$top=10&$skip=5", BASE));
}

#[test]
fn segment_order_ignores_input_order() {
    let built = url(json!({
        "count": true,
        "orderBy": ["name", "desc"],
        "skip": 0,
        "top": 10,
        "filter": {"roleId": 2},
        "expand": ["role"],
        "select": ["id", "name"]
    }));
    assert_eq!(
        built,
        format!(
            "{}?$select=id,name&$expand=role&$filter=(roleId eq 2)&$top=10&$skip=0&$orderby=name desc&$count=true",
            BASE
        )
    );
}

#[test]
fn repeated_builds_are_identical() {
    let options = options(json!({"filter": {"name": [["contains", "a"]]}, "top": 3}));
    let builder = ODataBuilder::new(BASE, true);
    assert_eq!(builder.build_url(Some(&options)), builder.build_url(Some(&options)));
}

// =============================================================================
// Application flows
// =============================================================================

#[test]
fn user_list_page() {
    let config = ApiConfig::new("https://api.example.com").unwrap();
    let base = QueryOptions::new()
        .filter(Filter::new().contains("name", "an"))
        .order_by(OrderBy::asc("name"));
    let pagination = PaginationOptions::from_page(2, 20, base);

    assert_eq!(
        config.paginated_query_url(ApiEndpoint::Users, &pagination),
        "https://api.example.com/users/odata?$filter=contains(name, 'an')&$top=20&$skip=20&$orderby=name asc&$count=true"
    );
}

#[test]
fn user_list_without_search_term() {
    let config = ApiConfig::new("https://api.example.com").unwrap().with_items_per_page(5).unwrap();
    let base = QueryOptions::new().filter(Filter::new().contains("name", None::<&str>));

    assert_eq!(
        config.paginated_query_url(ApiEndpoint::Users, &config.first_page(base)),
        "https://api.example.com/users/odata?$top=5&$skip=0&$count=true"
    );
}

#[test]
fn timesheets_in_week() {
    let config = ApiConfig::new("https://api.example.com").unwrap();
    let week = DateRange::new(
        NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(),
        NaiveDate::from_ymd_opt(2023, 5, 7).unwrap(),
    );
    let options = QueryOptions::new().filter(Filter::new().date_range("date", week));

    assert_eq!(
        config.query_url(ApiEndpoint::TimesheetMetrics, &options),
        "https://api.example.com/timesheets/metrics/odata?$filter=(date ge 2023-05-01) and (date le 2023-05-07)"
    );
}

#[test]
fn timesheet_by_date() {
    let config = ApiConfig::new("https://api.example.com").unwrap();
    let date = NaiveDate::from_ymd_opt(2023, 4, 21).unwrap();
    let options = QueryOptions::new().filter(Filter::new().value("date", date));

    assert_eq!(
        config.query_url(ApiEndpoint::Timesheets, &options),
        "https://api.example.com/timesheets/odata?$filter=(date eq 2023-04-21)"
    );
}

#[test]
fn decode_user_page() {
    #[derive(Debug, serde::Deserialize)]
    struct User {
        id: u32,
        name: String,
    }

    let body = json!({
        "@odata.count": 21,
        "value": [{"id": 1, "name": "Ana"}, {"id": 2, "name": "Dan"}]
    })
    .to_string();
    let page: PaginatedResult<User> = PaginatedResult::from_json(&body).unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.items()[1].name, "Dan");
    assert_eq!(page.items()[0].id, 1);
    assert_eq!(page.total_pages(10), 3);
}
