use std::sync::Arc;

use http::Uri;
use log::debug;
use tablesign_core::{uri, Error, Result};

use crate::sas::{canonical_name, SharedAccessTablePolicy, TableKeyRange, TableSharedAccessSignature};
use crate::{Credential, TableServiceClient};

/// A single table of a table service.
///
/// The identity is fixed once constructed: `uri` is always the service base
/// address with `name` appended as a path segment.
#[derive(Clone, Debug)]
pub struct CloudTable {
    name: String,
    uri: Uri,
    client: Arc<TableServiceClient>,
}

impl CloudTable {
    /// Reference the table `name` of `client`.
    pub fn new(name: &str, client: Arc<TableServiceClient>) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::argument_absent("table name is required"));
        }

        let uri = uri::append_path_segment(client.base_uri(), name)?;
        Ok(Self {
            name: name.to_string(),
            uri,
            client,
        })
    }

    /// Resolve a table from its absolute uri.
    ///
    /// The uri must carry a shared access signature in its query, since
    /// there's no other place to take credentials from.
    pub fn from_uri(table_uri: &Uri) -> Result<Self> {
        Self::resolve(table_uri, None)
    }

    /// Resolve a table from its absolute uri and explicit credentials.
    ///
    /// Fails with [`ErrorKind::ArgumentConflict`](tablesign_core::ErrorKind::ArgumentConflict)
    /// if the uri also embeds a signature that differs from `credential`.
    pub fn from_uri_with_credential(table_uri: &Uri, credential: Credential) -> Result<Self> {
        Self::resolve(table_uri, Some(credential))
    }

    fn resolve(table_uri: &Uri, credential: Option<Credential>) -> Result<Self> {
        uri::ensure_absolute(table_uri)?;

        let credential = match (credential, Credential::from_uri_query(table_uri)) {
            (Some(explicit), Some(embedded)) if explicit != embedded => {
                return Err(Error::argument_conflict(
                    "multiple different credentials supplied: the uri embeds a signature that doesn't match the explicit credential",
                ));
            }
            (Some(explicit), _) => explicit,
            (None, Some(embedded)) => embedded,
            (None, None) => {
                return Err(Error::argument_absent(format!(
                    "no credential supplied and uri '{}' carries no shared access signature",
                    uri::strip_query(table_uri)?
                )))
            }
        };

        let path_style = uri::is_path_style(table_uri);
        let segments = uri::path_segments(table_uri);
        let name = segments
            .get(usize::from(path_style))
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                Error::argument_invalid(format!(
                    "uri '{}' doesn't carry a table name",
                    uri::strip_query(table_uri).unwrap_or_else(|_| table_uri.clone())
                ))
            })?
            .clone();

        let base_uri = uri::service_base_address(table_uri, path_style)?;
        let client = TableServiceClient::new(base_uri, credential).with_path_style_uris(path_style);
        let table = Self::new(&name, Arc::new(client))?;
        debug!("resolved table {} at {}", table.name, table.uri);

        Ok(table)
    }

    /// Name of the table, as supplied.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Address of the table, without any query.
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// The service this table belongs to.
    pub fn service_client(&self) -> &Arc<TableServiceClient> {
        &self.client
    }

    /// Credentials of the owning service.
    pub fn credential(&self) -> &Credential {
        self.client.credential()
    }

    /// Canonical resource name used as the signing target:
    /// `/<account>/<lowercased table>`.
    ///
    /// Only shared key credentials know the account name.
    pub fn canonical_name(&self) -> Result<String> {
        let account_name = self.credential().account_name().ok_or_else(|| {
            Error::invalid_operation("canonical name requires a shared key credential")
        })?;
        Ok(canonical_name(account_name, &self.name))
    }

    /// Build a shared access signature for this table.
    ///
    /// `policy` carries permissions and the validity window, while
    /// `policy_identifier` refers to a stored access policy on the table.
    /// Bounds left out of `range` are left out of the signature.
    ///
    /// Returns a query string starting with `?` that can be appended to
    /// [`CloudTable::uri`].
    pub fn shared_access_signature(
        &self,
        policy: Option<&SharedAccessTablePolicy>,
        policy_identifier: Option<&str>,
        range: &TableKeyRange,
    ) -> Result<String> {
        let Credential::SharedKey {
            account_name,
            account_key,
            key_name,
        } = self.credential()
        else {
            return Err(Error::invalid_operation(
                "cannot create a shared access signature unless the account key is used to sign",
            ));
        };

        let mut sas = TableSharedAccessSignature::new(account_name, account_key, &self.name)
            .with_key_range(range.clone());
        if let Some(policy) = policy {
            sas = sas.with_policy(policy.clone());
        }
        if let Some(identifier) = policy_identifier {
            sas = sas.with_identifier(identifier);
        }
        if let Some(key_name) = key_name {
            sas = sas.with_key_name(key_name);
        }

        sas.query_string()
    }
}
