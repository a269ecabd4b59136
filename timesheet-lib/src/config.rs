//! API configuration

use url::Url;

use crate::api::ApiEndpoint;
use crate::api::query::DEFAULT_ITEMS_PER_PAGE;
use crate::api::query::PaginationOptions;
use crate::api::query::QueryOptions;
use crate::api::query::odata::ODataBuilder;
use crate::error::ConfigError;

/// Environment variable holding the API base URL.
pub const ENV_API_URL: &str = "TIMESHEET_API_URL";
/// Environment variable toggling the `/odata` suffix.
pub const ENV_ODATA_SUFFIX: &str = "TIMESHEET_API_ODATA_SUFFIX";
/// Environment variable holding the default page size.
pub const ENV_PAGE_SIZE: &str = "TIMESHEET_API_PAGE_SIZE";

/// Where the backend lives and how its query URLs are shaped.
///
/// # Example
///
/// ```
/// use timesheet_lib::api::ApiEndpoint;
/// use timesheet_lib::config::ApiConfig;
///
/// let config = ApiConfig::new("https://api.example.com/")?
///     .with_odata_suffix(false)
///     .with_items_per_page(25)?;
///
/// assert_eq!(
///     config.endpoint_url(ApiEndpoint::Users),
///     "https://api.example.com/users"
/// );
/// # Ok::<(), timesheet_lib::error::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without a trailing slash.
    base_url: String,

    /// Whether `/odata` is appended to endpoint URLs for queries.
    ///
    /// Default: true
    odata_suffix: bool,

    /// Page size for list views when the caller does not pick one.
    ///
    /// Default: 10
    items_per_page: u64,
}

impl ApiConfig {
    /// Creates a config for `base_url` with default settings.
    ///
    /// The URL must be absolute and use http or https.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(base_url).map_err(|e| ConfigError::invalid_url(base_url, e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme {
                scheme: url.scheme().to_string(),
            });
        }

        Ok(Self {
            base_url: url.as_str().trim_end_matches('/').to_string(),
            odata_suffix: true,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        })
    }

    /// Reads the config from the process environment.
    ///
    /// `TIMESHEET_API_URL` is required. `TIMESHEET_API_ODATA_SUFFIX`
    /// (`true`/`false`/`1`/`0`) and `TIMESHEET_API_PAGE_SIZE` are optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the config through `lookup`, which maps variable names to values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_API_URL).ok_or(ConfigError::MissingVar { name: ENV_API_URL })?;
        let mut config = Self::new(&base_url)?;

        if let Some(value) = lookup(ENV_ODATA_SUFFIX) {
            config.odata_suffix = match value.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => true,
                "false" | "0" => false,
                _ => return Err(ConfigError::invalid_var(ENV_ODATA_SUFFIX, value)),
            };
        }

        if let Some(value) = lookup(ENV_PAGE_SIZE) {
            config = value
                .trim()
                .parse::<u64>()
                .ok()
                .and_then(|n| config.clone().with_items_per_page(n).ok())
                .ok_or_else(|| ConfigError::invalid_var(ENV_PAGE_SIZE, value))?;
        }

        log::debug!(
            "Loaded API config: {} (odata suffix: {}, page size: {})",
            config.base_url,
            config.odata_suffix,
            config.items_per_page
        );
        Ok(config)
    }

    /// Sets whether `/odata` is appended to query URLs.
    pub fn with_odata_suffix(mut self, enabled: bool) -> Self {
        self.odata_suffix = enabled;
        self
    }

    /// Sets the default page size. Zero is rejected.
    pub fn with_items_per_page(mut self, items_per_page: u64) -> Result<Self, ConfigError> {
        if items_per_page == 0 {
            return Err(ConfigError::InvalidPageSize);
        }
        self.items_per_page = items_per_page;
        Ok(self)
    }

    /// Returns the base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns whether `/odata` is appended to query URLs.
    pub fn odata_suffix(&self) -> bool {
        self.odata_suffix
    }

    /// Returns the default page size.
    pub fn items_per_page(&self) -> u64 {
        self.items_per_page
    }

    /// Returns the plain URL of an endpoint, used for CRUD requests.
    pub fn endpoint_url(&self, endpoint: ApiEndpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// Returns an OData builder for an endpoint.
    pub fn odata_builder(&self, endpoint: ApiEndpoint) -> ODataBuilder {
        ODataBuilder::new(self.endpoint_url(endpoint), self.odata_suffix)
    }

    /// Builds the query URL for an endpoint.
    pub fn query_url(&self, endpoint: ApiEndpoint, options: &QueryOptions) -> String {
        self.odata_builder(endpoint).build_url(Some(options))
    }

    /// Builds the query URL for one page of an endpoint.
    pub fn paginated_query_url(&self, endpoint: ApiEndpoint, pagination: &PaginationOptions) -> String {
        self.query_url(endpoint, &pagination.to_query_options())
    }

    /// Returns pagination options for the first page at the configured size.
    pub fn first_page(&self, base: QueryOptions) -> PaginationOptions {
        PaginationOptions::from_page(1, self.items_per_page, base)
    }
}
