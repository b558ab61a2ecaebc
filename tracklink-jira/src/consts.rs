//! Constants for the tracklink-jira connector.

/// Number of issues requested per search page.
pub const PAGE_SIZE: usize = 10;

/// Path of the Jira REST API relative to the instance base URL.
pub const API_PATH: &str = "rest/api/2/";

/// Schema `custom` identifier of multiselect custom fields.
pub const MULTISELECT_CUSTOM_TYPE: &str = "com.atlassian.jira.plugin.system.customfieldtypes:multiselect";

/// Schema `type` tag of multi-value fields.
pub const ARRAY_TYPE: &str = "array";

/// User-Agent header value for the Jira connector
pub const USER_AGENT: &str = concat!("tracklink/", env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
