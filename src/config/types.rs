use crate::ConfigError;
use serde::Deserialize;
use url::Url;

/// Default catalogue root; listing and detail links resolve beneath it
pub const DEFAULT_ROOT_URL: &str = "http://books.toscrape.com/catalogue/";

/// Main configuration structure for the catalogue crawler
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalogue: CatalogueConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where the catalogue lives and where traversal starts
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogueConfig {
    /// Root URL that listing and detail links are resolved against
    #[serde(rename = "root-url", default = "default_root_url")]
    pub root_url: String,

    /// Relative link of the first listing page
    #[serde(rename = "first-page", default = "default_first_page")]
    pub first_page: String,
}

impl CatalogueConfig {
    /// Parses the root URL, appending a trailing `/` when missing so that
    /// relative links resolve beneath it rather than beside it
    pub fn root(&self) -> Result<Url, ConfigError> {
        let mut root = Url::parse(self.root_url.trim())
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid root-url: {}", e)))?;

        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }

        Ok(root)
    }

    /// Absolute URL of the first listing page
    pub fn first_page_url(&self) -> Result<Url, ConfigError> {
        self.root()?.join(self.first_page.trim()).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid first-page '{}': {}", self.first_page, e))
        })
    }
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            root_url: default_root_url(),
            first_page: default_first_page(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User agent sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(
        rename = "connect-timeout-secs",
        default = "default_connect_timeout_secs"
    )]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Default path for exported tables
    #[serde(rename = "export-path", default = "default_export_path")]
    pub export_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            export_path: default_export_path(),
        }
    }
}

fn default_root_url() -> String {
    DEFAULT_ROOT_URL.to_string()
}

fn default_first_page() -> String {
    "page-1.html".to_string()
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_export_path() -> String {
    "books.csv".to_string()
}
