//! Shared access signatures for tables.

use std::fmt;
use std::str::FromStr;

use tablesign_core::time::DateTime;
use tablesign_core::Error;

mod table_sas;
pub use table_sas::TableSharedAccessSignature;

/// Canonical resource name of a table: `/<account>/<lowercased table>`.
///
/// The account name is used as supplied. The table name is lowercased one
/// character at a time with Unicode's simple, locale independent mapping:
/// the fold never looks at neighbouring characters and never changes the
/// character count.
pub fn canonical_name(account_name: &str, table_name: &str) -> String {
    // The first char of a full mapping is the simple mapping: U+0130 -> 'i'.
    let table: String = table_name
        .chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect();
    format!("/{account_name}/{table}")
}

/// Operations a table SAS grants ([Azure documentation](https://learn.microsoft.com/en-us/rest/api/storageservices/create-service-sas#permissions-for-a-table)).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TablePermissions {
    /// Query entities, `r`.
    pub query: bool,
    /// Add entities, `a`.
    pub add: bool,
    /// Update entities, `u`.
    pub update: bool,
    /// Delete entities, `d`.
    pub delete: bool,
}

impl TablePermissions {
    /// Grant every table operation.
    pub fn all() -> Self {
        Self {
            query: true,
            add: true,
            update: true,
            delete: true,
        }
    }

    /// Grant only queries.
    pub fn read_only() -> Self {
        Self {
            query: true,
            ..Default::default()
        }
    }

    /// Whether no operation is granted.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Permissions are always rendered in the order `raud`.
impl fmt::Display for TablePermissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (granted, c) in [
            (self.query, 'r'),
            (self.add, 'a'),
            (self.update, 'u'),
            (self.delete, 'd'),
        ] {
            if granted {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for TablePermissions {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut permissions = Self::default();
        for c in s.chars() {
            match c {
                'r' => permissions.query = true,
                'a' => permissions.add = true,
                'u' => permissions.update = true,
                'd' => permissions.delete = true,
                _ => {
                    return Err(Error::argument_invalid(format!(
                        "invalid table permission '{c}' in '{s}'"
                    )))
                }
            }
        }
        Ok(permissions)
    }
}

/// Permissions and validity window of a shared access signature.
///
/// Any field may be left out when a stored access policy supplies it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedAccessTablePolicy {
    /// Operations the signature grants.
    pub permissions: Option<TablePermissions>,
    /// Time the signature becomes valid.
    pub start: Option<DateTime>,
    /// Time the signature expires.
    pub expiry: Option<DateTime>,
}

impl SharedAccessTablePolicy {
    /// Create a policy granting `permissions` until `expiry`.
    pub fn new(permissions: TablePermissions, expiry: DateTime) -> Self {
        Self {
            permissions: Some(permissions),
            start: None,
            expiry: Some(expiry),
        }
    }

    /// Set the time the signature becomes valid.
    pub fn with_start(mut self, start: DateTime) -> Self {
        self.start = Some(start);
        self
    }
}

/// Range of entities a signature is scoped to.
///
/// Each bound is independent. A partition key without a row key covers the
/// whole partition, and how open ends are interpreted is up to the service.
/// Empty strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableKeyRange {
    /// Lowest partition key accessible.
    pub start_partition_key: Option<String>,
    /// Lowest row key accessible within the start partition.
    pub start_row_key: Option<String>,
    /// Highest partition key accessible.
    pub end_partition_key: Option<String>,
    /// Highest row key accessible within the end partition.
    pub end_row_key: Option<String>,
}

impl TableKeyRange {
    /// A range without any bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the start partition key.
    pub fn with_start_partition_key(mut self, v: impl Into<String>) -> Self {
        self.start_partition_key = non_empty(v.into());
        self
    }

    /// Set the start row key.
    pub fn with_start_row_key(mut self, v: impl Into<String>) -> Self {
        self.start_row_key = non_empty(v.into());
        self
    }

    /// Set the end partition key.
    pub fn with_end_partition_key(mut self, v: impl Into<String>) -> Self {
        self.end_partition_key = non_empty(v.into());
        self
    }

    /// Set the end row key.
    pub fn with_end_row_key(mut self, v: impl Into<String>) -> Self {
        self.end_row_key = non_empty(v.into());
        self
    }
}

fn non_empty(v: String) -> Option<String> {
    (!v.is_empty()).then_some(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("account", "MyTable" => "/account/mytable"; "mixed case table")]
    #[test_case("MyAccount", "people" => "/MyAccount/people"; "account kept as is")]
    #[test_case("account", "TITLE" => "/account/title"; "ascii capital i")]
    #[test_case("a", "ΑΣ" => "/a/ασ"; "final sigma is not contextual")]
    #[test_case("a", "ΣΑΣ" => "/a/σασ"; "every sigma folds the same")]
    #[test_case("a", "Ärger" => "/a/ärger"; "latin umlaut")]
    fn test_canonical_name(account: &str, table: &str) -> String {
        canonical_name(account, table)
    }

    #[test]
    fn test_canonical_name_keeps_char_count() {
        let name = canonical_name("a", "İ");
        assert_eq!(name, "/a/i");
        assert_eq!(name.chars().count(), "/a/İ".chars().count());
    }

    #[test_case(TablePermissions::all() => "raud"; "all")]
    #[test_case(TablePermissions::read_only() => "r"; "read only")]
    #[test_case(TablePermissions { delete: true, add: true, ..Default::default() } => "ad"; "fixed order")]
    #[test_case(TablePermissions::default() => ""; "none")]
    fn test_permissions_display(p: TablePermissions) -> String {
        p.to_string()
    }

    #[test]
    fn test_permissions_from_str() {
        assert_eq!(
            "dura".parse::<TablePermissions>().unwrap(),
            TablePermissions::all()
        );
        assert!("".parse::<TablePermissions>().unwrap().is_empty());
        assert!("rw".parse::<TablePermissions>().is_err());
    }

    #[test]
    fn test_key_range_treats_empty_as_absent() {
        let range = TableKeyRange::new()
            .with_start_partition_key("")
            .with_end_partition_key("p2");
        assert_eq!(range.start_partition_key, None);
        assert_eq!(range.end_partition_key.as_deref(), Some("p2"));
    }
}
