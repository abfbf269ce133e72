use tablesign_azure_table::{SharedAccessTablePolicy, TablePermissions};
use tablesign_core::time::parse_rfc3339;

mod invalid_credential;
mod shared_key;

pub fn policy() -> SharedAccessTablePolicy {
    SharedAccessTablePolicy::new(
        TablePermissions::all(),
        parse_rfc3339("2022-03-02T08:12:34Z").unwrap(),
    )
    .with_start(parse_rfc3339("2022-03-01T08:12:34Z").unwrap())
}
