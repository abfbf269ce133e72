use http::Uri;
use pretty_assertions::assert_eq;
use tablesign_azure_table::{CloudTable, Credential, TableServiceClient};
use tablesign_core::uri::append_path_segment;
use tablesign_core::ErrorKind;
use test_case::test_case;

use crate::{init_logger, shared_key_client, ACCOUNT_KEY};

const SAS_URI: &str = "https://account.table.core.windows.net/people?sv=2012-02-12&tn=people&se=2030-01-01T00%3A00%3A00Z&sp=r&sig=abc%2Bdef%3D";
const SAS_TOKEN: &str = "sv=2012-02-12&tn=people&se=2030-01-01T00%3A00%3A00Z&sp=r&sig=abc%2Bdef%3D";

#[test_case("https://account.table.core.windows.net", "people"; "host style")]
#[test_case("https://account.table.core.windows.net/", "People"; "trailing slash")]
#[test_case("http://127.0.0.1:10002/devstoreaccount1", "people"; "path style")]
#[test_case("https://account.table.core.windows.net", "$MetricsTransactionsTable"; "metrics table")]
fn test_uri_is_base_plus_name(base: &str, name: &str) {
    init_logger();

    let client = shared_key_client(base);
    let table = CloudTable::new(name, client.clone()).unwrap();

    assert_eq!(table.name(), name);
    assert_eq!(
        table.uri(),
        &append_path_segment(client.base_uri(), name).unwrap()
    );
    assert!(std::sync::Arc::ptr_eq(table.service_client(), &client));
}

#[test]
fn test_client_table_matches_constructor() {
    let client = shared_key_client("https://account.table.core.windows.net");
    let a = client.table("people").unwrap();
    let b = CloudTable::new("people", client).unwrap();
    assert_eq!(a.uri(), b.uri());
    assert_eq!(a.name(), b.name());
}

#[test]
fn test_empty_name_is_absent() {
    let err = CloudTable::new("", shared_key_client("https://account.table.core.windows.net"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArgumentAbsent);
}

#[test]
fn test_from_uri_extracts_embedded_signature() {
    init_logger();

    let uri: Uri = SAS_URI.parse().unwrap();
    let table = CloudTable::from_uri(&uri).unwrap();

    assert_eq!(table.name(), "people");
    assert_eq!(
        table.uri().to_string(),
        "https://account.table.core.windows.net/people"
    );
    assert_eq!(table.credential(), &Credential::with_sas_token(SAS_TOKEN));
}

#[test]
fn test_from_uri_without_signature_fails() {
    let uri: Uri = "https://account.table.core.windows.net/people?timeout=30"
        .parse()
        .unwrap();
    let err = CloudTable::from_uri(&uri).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArgumentAbsent);
}

#[test]
fn test_from_uri_requires_absolute_uri() {
    let uri: Uri = "/people?sig=abc".parse().unwrap();
    let err = CloudTable::from_uri(&uri).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArgumentInvalid);
}

#[test]
fn test_explicit_credential_matching_embedded_one() {
    let uri: Uri = SAS_URI.parse().unwrap();
    let table =
        CloudTable::from_uri_with_credential(&uri, Credential::with_sas_token(SAS_TOKEN)).unwrap();
    assert_eq!(table.credential(), &Credential::with_sas_token(SAS_TOKEN));
}

#[test_case(Credential::with_shared_key("account", ACCOUNT_KEY); "shared key")]
#[test_case(Credential::with_sas_token("sv=2012-02-12&sig=other"); "other sas")]
#[test_case(Credential::Anonymous; "anonymous")]
fn test_explicit_credential_conflicting_with_embedded_one(credential: Credential) {
    let uri: Uri = SAS_URI.parse().unwrap();
    let err = CloudTable::from_uri_with_credential(&uri, credential).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
}

#[test]
fn test_explicit_credential_without_embedded_one() {
    let uri: Uri = "http://127.0.0.1:10002/devstoreaccount1/people"
        .parse()
        .unwrap();
    let cred = Credential::with_shared_key("devstoreaccount1", ACCOUNT_KEY);
    let table = CloudTable::from_uri_with_credential(&uri, cred.clone()).unwrap();

    let client = table.service_client();
    assert_eq!(
        client.as_ref(),
        &TableServiceClient::new(
            "http://127.0.0.1:10002/devstoreaccount1".parse().unwrap(),
            cred
        )
    );
    assert_eq!(table.canonical_name().unwrap(), "/devstoreaccount1/people");
}

#[test]
fn test_connection_string_client() {
    let client = std::sync::Arc::new(
        TableServiceClient::from_connection_string(&format!(
            "DefaultEndpointsProtocol=https;AccountName=account;AccountKey={ACCOUNT_KEY};EndpointSuffix=core.windows.net"
        ))
        .unwrap(),
    );
    let table = client.table("people").unwrap();
    assert_eq!(
        table.uri().to_string(),
        "https://account.table.core.windows.net/people"
    );
    assert!(table.credential().is_shared_key());
}
