//! Fixed endpoint paths and application defaults.
//!
//! Portal paths encode today's CZDS site layout; a site redesign means updating
//! these and the selectors in the `reporter` parse functions, nothing else.

/// Default portal root; overridable via the `portal_url` config key.
pub const DEFAULT_PORTAL_URL: &str = "https://czds.icann.org";

/// API listing endpoint, relative to `base_url`.
pub const ZONE_LIST_ENDPOINT: &str = "/user-zone-data-urls.json";

/// Dashboard page with the requests table; takes a `page` query parameter.
pub const DASHBOARD_PATH: &str = "/en/dashboard";

/// Request detail page prefix; the numeric request id is appended.
pub const REQUEST_PATH: &str = "/en/request/";

/// "Add request" form page listing per-TLD checkboxes.
pub const REQUEST_ADD_PATH: &str = "/en/request/add";

/// Logout endpoint; visiting it ends the portal session.
pub const LOGOUT_PATH: &str = "/en/user/logout";

/// Default config file path when `-c/--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Default root for per-day zone file directories.
pub const DEFAULT_DOWNLOAD_DIR: &str = "./zonedata-download";

/// TLD labels excluded from reporter output by default (sandbox zones).
pub const DEFAULT_IGNORE_TLDS: &[&str] = &["TEST", "test2"];

/// The portal serves a reduced page to unknown agents, so we present a browser.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0";
