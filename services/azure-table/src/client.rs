use std::sync::Arc;

use http::Uri;
use tablesign_core::{uri, Result};

use crate::{CloudTable, Config, Credential};

/// Client side view of a table service endpoint.
///
/// The client only carries addressing and credentials; it never talks to
/// the network.
#[derive(Clone, Debug, PartialEq)]
pub struct TableServiceClient {
    base_uri: Uri,
    credential: Credential,
    use_path_style_uris: bool,
}

impl TableServiceClient {
    /// Create a client for the service at `base_uri`.
    ///
    /// Path-style addressing is inferred from the host: IP literals imply
    /// the account is carried in the path.
    pub fn new(base_uri: Uri, credential: Credential) -> Self {
        Self {
            use_path_style_uris: uri::is_path_style(&base_uri),
            base_uri,
            credential,
        }
    }

    /// Override whether resource uris carry the account in their path.
    pub fn with_path_style_uris(mut self, use_path_style_uris: bool) -> Self {
        self.use_path_style_uris = use_path_style_uris;
        self
    }

    /// Create a client from a loaded [`Config`].
    pub fn from_config(config: &Config) -> Result<Self> {
        let base_uri: Uri = config.endpoint()?.parse()?;
        uri::ensure_absolute(&base_uri)?;
        Ok(Self::new(base_uri, config.credential()?))
    }

    /// Create a client from an Azure storage connection string.
    pub fn from_connection_string(conn_str: &str) -> Result<Self> {
        Self::from_config(&Config::try_from_connection_string(conn_str)?)
    }

    /// Base address every table of this service lives under.
    pub fn base_uri(&self) -> &Uri {
        &self.base_uri
    }

    /// Credentials used for the tables of this service.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Whether resource uris carry the account in their path.
    pub fn use_path_style_uris(&self) -> bool {
        self.use_path_style_uris
    }

    /// Reference the table `name` of this service.
    pub fn table(self: &Arc<Self>, name: &str) -> Result<CloudTable> {
        CloudTable::new(name, Arc::clone(self))
    }
}
