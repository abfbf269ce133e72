use std::sync::Arc;

use pretty_assertions::assert_eq;
use tablesign_azure_table::{Credential, TableKeyRange, TableServiceClient};
use tablesign_core::ErrorKind;
use test_case::test_case;

use super::policy;

#[test_case(Credential::with_sas_token("sv=2012-02-12&sig=abc"); "sas token")]
#[test_case(Credential::Anonymous; "anonymous")]
fn test_requires_shared_key(credential: Credential) {
    let client = Arc::new(TableServiceClient::new(
        "https://account.table.core.windows.net".parse().unwrap(),
        credential,
    ));
    let err = client
        .table("people")
        .unwrap()
        .shared_access_signature(Some(&policy()), None, &TableKeyRange::new())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidOperation);
}
