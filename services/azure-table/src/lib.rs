//! Azure Table Storage resource identities and shared access signatures.
//!
//! This crate resolves the identity of a single table, either from a table
//! name and a [`TableServiceClient`] or from a table uri that may carry its
//! own signature, and builds service SAS tokens scoped to a range of rows.
//! Nothing here performs network I/O.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use tablesign_azure_table::{
//!     Credential, SharedAccessTablePolicy, TableKeyRange, TablePermissions, TableServiceClient,
//! };
//! use tablesign_core::time::parse_rfc3339;
//!
//! # fn main() -> tablesign_core::Result<()> {
//! let client = Arc::new(TableServiceClient::new(
//!     "https://myaccount.table.core.windows.net".parse()?,
//!     Credential::with_shared_key("myaccount", "a2V5"),
//! ));
//! let table = client.table("People")?;
//!
//! let policy = SharedAccessTablePolicy::new(
//!     TablePermissions::read_only(),
//!     parse_rfc3339("2030-01-01T00:00:00Z")?,
//! );
//! let range = TableKeyRange::new().with_start_partition_key("Smith");
//! let sas = table.shared_access_signature(Some(&policy), None, &range)?;
//!
//! assert!(sas.starts_with("?sv=2012-02-12&tn=People&spk=Smith"));
//! # Ok(())
//! # }
//! ```

mod constants;

mod config;
pub use config::Config;

mod connection_string;

mod credential;
pub use credential::Credential;

mod client;
pub use client::TableServiceClient;

mod table;
pub use table::CloudTable;

pub mod sas;
pub use sas::{
    canonical_name, SharedAccessTablePolicy, TableKeyRange, TablePermissions,
    TableSharedAccessSignature,
};
