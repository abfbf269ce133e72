use std::fmt::{Debug, Formatter};

use tablesign_core::utils::Redact;
use tablesign_core::{Env, Error, Result};

use crate::connection_string;
use crate::constants::*;
use crate::Credential;

/// Config carries all the configuration for the table service.
#[derive(Clone, Default)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Config {
    /// `account_name` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_STORAGE_ACCOUNT_NAME`]
    /// - connection string: `AccountName`
    pub account_name: Option<String>,
    /// `account_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_STORAGE_ACCOUNT_KEY`]
    /// - connection string: `AccountKey`
    pub account_key: Option<String>,
    /// `account_key_name` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_STORAGE_ACCOUNT_KEY_NAME`]
    pub account_key_name: Option<String>,
    /// `sas_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_STORAGE_SAS_TOKEN`]
    /// - connection string: `SharedAccessSignature`
    pub sas_token: Option<String>,
    /// `endpoint` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_STORAGE_TABLE_ENDPOINT`]
    /// - connection string: `TableEndpoint`, or built from `AccountName` and `EndpointSuffix`
    pub endpoint: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("account_name", &self.account_name)
            .field("account_key", &Redact::from(&self.account_key))
            .field("account_key_name", &self.account_key_name)
            .field("sas_token", &Redact::from(&self.sas_token))
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl Config {
    /// Load config from env.
    ///
    /// Variables that are not set leave the matching field untouched.
    pub fn from_env(mut self, env: &impl Env) -> Self {
        if let Some(v) = env.var(AZURE_STORAGE_ACCOUNT_NAME) {
            self.account_name = Some(v);
        }
        if let Some(v) = env.var(AZURE_STORAGE_ACCOUNT_KEY) {
            self.account_key = Some(v);
        }
        if let Some(v) = env.var(AZURE_STORAGE_ACCOUNT_KEY_NAME) {
            self.account_key_name = Some(v);
        }
        if let Some(v) = env.var(AZURE_STORAGE_SAS_TOKEN) {
            self.sas_token = Some(v);
        }
        if let Some(v) = env.var(AZURE_STORAGE_TABLE_ENDPOINT) {
            self.endpoint = Some(v);
        }

        self
    }

    /// Parses an [Azure connection string][1] into a configuration object.
    ///
    /// The connection string doesn't have to specify all required parameters
    /// because the user is still allowed to set them later directly on the object.
    ///
    /// An example of a connection string looks like:
    ///
    /// ```txt
    /// AccountName=mystorageaccount;
    /// AccountKey=Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==;
    /// TableEndpoint=https://mystorageaccount.table.core.windows.net
    /// ```
    ///
    /// [1]: https://learn.microsoft.com/en-us/azure/storage/common/storage-configure-connection-string
    pub fn try_from_connection_string(conn_str: &str) -> Result<Self> {
        connection_string::parse(conn_str)
    }

    /// Table service endpoint.
    ///
    /// Falls back to the public cloud endpoint of `account_name`.
    pub fn endpoint(&self) -> Result<String> {
        if let Some(endpoint) = &self.endpoint {
            return Ok(endpoint.clone());
        }

        match &self.account_name {
            Some(account_name) => Ok(format!(
                "https://{account_name}.table.{DEFAULT_ENDPOINT_SUFFIX}"
            )),
            None => Err(Error::config_invalid(
                "either endpoint or account_name must be configured",
            )),
        }
    }

    /// The credential described by this config.
    ///
    /// A SAS token wins over an account key.
    pub fn credential(&self) -> Result<Credential> {
        if let Some(token) = &self.sas_token {
            return Ok(Credential::with_sas_token(token));
        }

        match (&self.account_name, &self.account_key) {
            (Some(account_name), Some(account_key)) => Ok(Credential::SharedKey {
                account_name: account_name.clone(),
                account_key: account_key.clone(),
                key_name: self.account_key_name.clone(),
            }),
            _ => Err(Error::argument_absent(
                "config carries neither a sas token nor an account name and key",
            )),
        }
    }
}
