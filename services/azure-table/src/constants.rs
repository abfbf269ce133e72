use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

// Query parameters of a table shared access signature.
pub const SAS_SIGNED_VERSION: &str = "sv";
pub const SAS_TABLE_NAME: &str = "tn";
pub const SAS_START_PARTITION_KEY: &str = "spk";
pub const SAS_START_ROW_KEY: &str = "srk";
pub const SAS_END_PARTITION_KEY: &str = "epk";
pub const SAS_END_ROW_KEY: &str = "erk";
pub const SAS_SIGNED_START: &str = "st";
pub const SAS_SIGNED_EXPIRY: &str = "se";
pub const SAS_SIGNED_PERMISSIONS: &str = "sp";
pub const SAS_SIGNED_IDENTIFIER: &str = "si";
pub const SAS_SIGNED_KEY: &str = "sk";
pub const SAS_SIGNATURE: &str = "sig";

/// Every query parameter that belongs to a shared access signature, across
/// all storage services. Used to pick a signature out of a resource uri.
pub const SAS_QUERY_PARAMETERS: &[&str] = &[
    "sv", "ss", "srt", "sp", "st", "se", "sip", "spr", "si", "sr", "tn", "spk", "srk", "epk",
    "erk", "sk", "sig", "rscc", "rscd", "rsce", "rscl", "rsct",
];

/// Signed version marker for table service SAS.
pub const TABLE_SAS_VERSION: &str = "2012-02-12";

// Env values used to configure the table service.
pub const AZURE_STORAGE_ACCOUNT_NAME: &str = "AZURE_STORAGE_ACCOUNT_NAME";
pub const AZURE_STORAGE_ACCOUNT_KEY: &str = "AZURE_STORAGE_ACCOUNT_KEY";
pub const AZURE_STORAGE_ACCOUNT_KEY_NAME: &str = "AZURE_STORAGE_ACCOUNT_KEY_NAME";
pub const AZURE_STORAGE_SAS_TOKEN: &str = "AZURE_STORAGE_SAS_TOKEN";
pub const AZURE_STORAGE_TABLE_ENDPOINT: &str = "AZURE_STORAGE_TABLE_ENDPOINT";

/// DNS suffix of the public cloud.
pub const DEFAULT_ENDPOINT_SUFFIX: &str = "core.windows.net";

/// AsciiSet for [Azure UriEncode](https://docs.microsoft.com/en-us/rest/api/storageservices/naming-and-referencing-shares--directories--files--and-metadata)
///
/// - URI encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
pub static AZURE_QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'/')
    .remove(b'~');
