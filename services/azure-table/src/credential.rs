// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt::{Debug, Formatter};

use http::Uri;
use log::debug;
use tablesign_core::uri;
use tablesign_core::utils::Redact;
use tablesign_core::Result;

use crate::constants::{SAS_QUERY_PARAMETERS, SAS_SIGNATURE};

/// Credential enum for the ways a table can be accessed.
///
/// Equality is strict: two credentials are equal only when every field
/// matches, so the same key name with a different key value is a different
/// credential.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Shared Key authentication with account name and key
    SharedKey {
        /// Azure storage account name.
        account_name: String,
        /// Azure storage account key, base64 encoded.
        account_key: String,
        /// Name of the account key, emitted with signatures so the
        /// service can tell rotated keys apart.
        key_name: Option<String>,
    },
    /// SAS (Shared Access Signature) token authentication
    SasToken {
        /// SAS token, without the leading `?`.
        token: String,
    },
    /// Anonymous access to public resources
    Anonymous,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::SharedKey {
                account_name,
                account_key,
                key_name,
            } => f
                .debug_struct("Credential::SharedKey")
                .field("account_name", account_name)
                .field("account_key", &Redact::from(account_key))
                .field("key_name", key_name)
                .finish(),
            Credential::SasToken { token } => f
                .debug_struct("Credential::SasToken")
                .field("token", &Redact::from(token))
                .finish(),
            Credential::Anonymous => f.write_str("Credential::Anonymous"),
        }
    }
}

impl Credential {
    /// Create a new credential with shared key authentication.
    pub fn with_shared_key(account_name: &str, account_key: &str) -> Self {
        Self::SharedKey {
            account_name: account_name.to_string(),
            account_key: account_key.to_string(),
            key_name: None,
        }
    }

    /// Create a new credential with shared key authentication whose key
    /// carries a name.
    pub fn with_named_shared_key(account_name: &str, account_key: &str, key_name: &str) -> Self {
        Self::SharedKey {
            account_name: account_name.to_string(),
            account_key: account_key.to_string(),
            key_name: Some(key_name.to_string()),
        }
    }

    /// Create a new credential with SAS token authentication.
    ///
    /// A leading `?` is stripped.
    pub fn with_sas_token(sas_token: &str) -> Self {
        Self::SasToken {
            token: sas_token.trim_start_matches('?').to_string(),
        }
    }

    /// Check whether this credential holds a symmetric key that can compute
    /// signatures locally.
    pub fn is_shared_key(&self) -> bool {
        matches!(self, Credential::SharedKey { .. })
    }

    /// Account name, known only for shared key credentials.
    pub fn account_name(&self) -> Option<&str> {
        match self {
            Credential::SharedKey { account_name, .. } => Some(account_name),
            _ => None,
        }
    }

    /// Pick a SAS token out of the query of `uri`.
    ///
    /// Returns `None` unless the query carries a signature (`sig`). The
    /// token keeps the recognised SAS pairs in their original order and
    /// encoding, while unrelated query parameters are left out.
    pub fn from_uri_query(uri: &Uri) -> Option<Self> {
        let pairs: Vec<(String, &str)> = uri::raw_query_pairs(uri)
            .into_iter()
            .filter(|(k, _)| SAS_QUERY_PARAMETERS.contains(&k.to_ascii_lowercase().as_str()))
            .collect();

        if !pairs
            .iter()
            .any(|(k, _)| k.eq_ignore_ascii_case(SAS_SIGNATURE))
        {
            return None;
        }

        let token = pairs
            .iter()
            .map(|(_, raw)| *raw)
            .collect::<Vec<_>>()
            .join("&");
        debug!("found shared access signature in uri query");

        Some(Credential::SasToken { token })
    }

    /// Transform `uri` so that a request against it is authorized by this
    /// credential.
    ///
    /// SAS tokens are appended to the query. Shared keys sign each request
    /// through headers instead and anonymous access needs nothing, so the uri
    /// comes back unchanged for them.
    pub fn transform_uri(&self, target: &Uri) -> Result<Uri> {
        match self {
            Credential::SasToken { token } => uri::append_query(target, token),
            Credential::SharedKey { .. } | Credential::Anonymous => Ok(target.clone()),
        }
    }
}
