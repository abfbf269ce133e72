use std::fmt::{Debug, Formatter};

use log::debug;
use percent_encoding::percent_encode;
use tablesign_core::hash::{base64_decode, base64_hmac_sha256};
use tablesign_core::time::format_iso8601;
use tablesign_core::utils::Redact;
use tablesign_core::Result;

use super::{canonical_name, SharedAccessTablePolicy, TableKeyRange};
use crate::constants::*;

/// Service SAS scoped to a single table.
///
/// - [Create a service SAS](https://learn.microsoft.com/en-us/rest/api/storageservices/create-service-sas)
#[derive(Clone)]
pub struct TableSharedAccessSignature {
    account: String,
    key: String,
    key_name: Option<String>,
    table_name: String,
    version: String,
    policy: SharedAccessTablePolicy,
    identifier: Option<String>,
    range: TableKeyRange,
}

impl Debug for TableSharedAccessSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableSharedAccessSignature")
            .field("account", &self.account)
            .field("key", &Redact::from(&self.key))
            .field("key_name", &self.key_name)
            .field("table_name", &self.table_name)
            .field("version", &self.version)
            .field("policy", &self.policy)
            .field("identifier", &self.identifier)
            .field("range", &self.range)
            .finish()
    }
}

impl TableSharedAccessSignature {
    /// Create a SAS token signer for `table_name`, signed by the base64
    /// encoded account `key`.
    pub fn new(account: &str, key: &str, table_name: &str) -> Self {
        Self {
            account: account.to_string(),
            key: key.to_string(),
            key_name: None,
            table_name: table_name.to_string(),
            version: TABLE_SAS_VERSION.to_string(),
            policy: SharedAccessTablePolicy::default(),
            identifier: None,
            range: TableKeyRange::default(),
        }
    }

    /// Set permissions and validity window.
    pub fn with_policy(mut self, policy: SharedAccessTablePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Refer to a stored access policy of the table.
    pub fn with_identifier(mut self, identifier: &str) -> Self {
        self.identifier = Some(identifier.to_string()).filter(|v| !v.is_empty());
        self
    }

    /// Name the account key, so the service knows which key to verify with.
    pub fn with_key_name(mut self, key_name: &str) -> Self {
        self.key_name = Some(key_name.to_string()).filter(|v| !v.is_empty());
        self
    }

    /// Scope the signature to a key range.
    pub fn with_key_range(mut self, range: TableKeyRange) -> Self {
        self.range = range;
        self
    }

    fn permissions(&self) -> Option<String> {
        self.policy
            .permissions
            .map(|v| v.to_string())
            .filter(|v| !v.is_empty())
    }

    /// Construct string to sign
    ///
    /// ## Format
    ///
    /// ```text
    /// signedpermissions + "\n" +
    /// signedstart + "\n" +
    /// signedexpiry + "\n" +
    /// canonicalizedresource + "\n" +
    /// signedidentifier + "\n" +
    /// startingpartitionkey + "\n" +
    /// startingrowkey + "\n" +
    /// endingpartitionkey + "\n" +
    /// endingrowkey
    /// ```
    fn string_to_sign(&self) -> String {
        let s = [
            self.permissions().unwrap_or_default(),
            self.policy.start.map(format_iso8601).unwrap_or_default(),
            self.policy.expiry.map(format_iso8601).unwrap_or_default(),
            canonical_name(&self.account, &self.table_name),
            self.identifier.clone().unwrap_or_default(),
            self.range.start_partition_key.clone().unwrap_or_default(),
            self.range.start_row_key.clone().unwrap_or_default(),
            self.range.end_partition_key.clone().unwrap_or_default(),
            self.range.end_row_key.clone().unwrap_or_default(),
        ]
        .join("\n");

        debug!("string to sign: {}", &s);
        s
    }

    fn signature(&self) -> Result<String> {
        let key = base64_decode(&self.key)?;
        Ok(base64_hmac_sha256(&key, self.string_to_sign().as_bytes()))
    }

    /// Query pairs of the signature, values not yet encoded.
    ///
    /// Optional parameters are left out entirely when absent.
    pub fn token(&self) -> Result<Vec<(String, String)>> {
        let mut elements = vec![
            (SAS_SIGNED_VERSION, Some(self.version.clone())),
            (SAS_TABLE_NAME, Some(self.table_name.clone())),
            (SAS_START_PARTITION_KEY, self.range.start_partition_key.clone()),
            (SAS_START_ROW_KEY, self.range.start_row_key.clone()),
            (SAS_END_PARTITION_KEY, self.range.end_partition_key.clone()),
            (SAS_END_ROW_KEY, self.range.end_row_key.clone()),
            (SAS_SIGNED_START, self.policy.start.map(format_iso8601)),
            (SAS_SIGNED_EXPIRY, self.policy.expiry.map(format_iso8601)),
            (SAS_SIGNED_PERMISSIONS, self.permissions()),
            (SAS_SIGNED_IDENTIFIER, self.identifier.clone()),
            (SAS_SIGNED_KEY, self.key_name.clone()),
        ];
        elements.push((SAS_SIGNATURE, Some(self.signature()?)));

        Ok(elements
            .into_iter()
            .filter_map(|(k, v)| v.filter(|v| !v.is_empty()).map(|v| (k.to_string(), v)))
            .collect())
    }

    /// Encoded query string of the signature, starting with `?`.
    pub fn query_string(&self) -> Result<String> {
        let query = self
            .token()?
            .iter()
            .map(|(k, v)| format!("{}={}", k, percent_encode(v.as_bytes(), &AZURE_QUERY_ENCODE_SET)))
            .collect::<Vec<_>>()
            .join("&");

        Ok(format!("?{query}"))
    }
}
