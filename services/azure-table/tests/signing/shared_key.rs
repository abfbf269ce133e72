use std::sync::Arc;

use http::Uri;
use pretty_assertions::assert_eq;
use tablesign_azure_table::{CloudTable, Credential, TableKeyRange, TableServiceClient};
use tablesign_core::uri;

use super::policy;
use crate::{init_logger, shared_key_client, ACCOUNT_KEY};

fn named_key_table() -> CloudTable {
    let client = Arc::new(TableServiceClient::new(
        "https://account.table.core.windows.net".parse().unwrap(),
        Credential::with_named_shared_key("account", ACCOUNT_KEY, "key1"),
    ));
    client.table("People").unwrap()
}

#[test]
fn test_known_answer_with_key_range() {
    init_logger();

    let range = TableKeyRange::new()
        .with_start_partition_key("Smith")
        .with_end_partition_key("Smith")
        .with_end_row_key("Z z");
    let sas = named_key_table()
        .shared_access_signature(Some(&policy()), None, &range)
        .unwrap();

    assert_eq!(
        sas,
        "?sv=2012-02-12&tn=People&spk=Smith&epk=Smith&erk=Z%20z\
         &st=2022-03-01T08%3A12%3A34Z&se=2022-03-02T08%3A12%3A34Z&sp=raud&sk=key1\
         &sig=/aIyC9gClqv5MbWyhCZ0Xe%2BYbkEIoEs7/ATV1vPp1Bk%3D"
    );
}

#[test]
fn test_known_answer_with_stored_policy() {
    let table = shared_key_client("https://account.table.core.windows.net")
        .table("people")
        .unwrap();
    let sas = table
        .shared_access_signature(None, Some("policy1"), &TableKeyRange::new())
        .unwrap();

    assert_eq!(
        sas,
        "?sv=2012-02-12&tn=people&si=policy1&sig=3/pDSMvFL3K5pgonk0VIy9%2BpUfRvxnvD6l44fG85EOI%3D"
    );
}

#[test]
fn test_is_deterministic() {
    let table = named_key_table();
    let range = TableKeyRange::new().with_start_row_key("0001");

    let a = table
        .shared_access_signature(Some(&policy()), Some("policy1"), &range)
        .unwrap();
    let b = table
        .clone()
        .shared_access_signature(Some(&policy()), Some("policy1"), &range)
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_absent_bounds_are_omitted() {
    let sas = named_key_table()
        .shared_access_signature(Some(&policy()), None, &TableKeyRange::new())
        .unwrap();

    let keys: Vec<String> = uri::parse_query(&format!("https://x{sas}").parse::<Uri>().unwrap())
        .into_iter()
        .map(|(k, _)| k)
        .collect();
    assert_eq!(keys, vec!["sv", "tn", "st", "se", "sp", "sk", "sig"]);
    for range_key in ["spk", "srk", "epk", "erk"] {
        assert!(!sas.contains(&format!("{range_key}=")));
    }
}

#[test]
fn test_each_bound_is_independent() {
    let table = named_key_table();
    for (range, key) in [
        (TableKeyRange::new().with_start_partition_key("a"), "spk"),
        (TableKeyRange::new().with_start_row_key("a"), "srk"),
        (TableKeyRange::new().with_end_partition_key("a"), "epk"),
        (TableKeyRange::new().with_end_row_key("a"), "erk"),
    ] {
        let sas = table
            .shared_access_signature(Some(&policy()), None, &range)
            .unwrap();
        let present: Vec<&str> = ["spk", "srk", "epk", "erk"]
            .into_iter()
            .filter(|k| sas.contains(&format!("&{k}=")))
            .collect();
        assert_eq!(present, vec![key]);
    }
}

#[test]
fn test_table_name_case_does_not_change_signing_target() {
    let client = shared_key_client("https://account.table.core.windows.net");
    let upper = client.table("PEOPLE").unwrap();
    let lower = client.table("people").unwrap();
    assert_eq!(upper.canonical_name().unwrap(), "/account/people");
    assert_eq!(
        upper.canonical_name().unwrap(),
        lower.canonical_name().unwrap()
    );

    let sig = |t: &CloudTable| {
        let sas = t
            .shared_access_signature(Some(&policy()), None, &TableKeyRange::new())
            .unwrap();
        sas.rsplit_once("sig=").unwrap().1.to_string()
    };
    assert_eq!(sig(&upper), sig(&lower));
}

#[test]
fn test_signed_uri_resolves_back() {
    let table = named_key_table();
    let sas = table
        .shared_access_signature(
            Some(&policy()),
            None,
            &TableKeyRange::new().with_start_partition_key("Smith"),
        )
        .unwrap();

    let signed = uri::append_query(table.uri(), &sas).unwrap();
    let shared = CloudTable::from_uri(&signed).unwrap();
    assert_eq!(shared.name(), "People");
    assert_eq!(shared.uri(), table.uri());
    assert_eq!(
        shared.credential(),
        &Credential::with_sas_token(&sas)
    );
    assert_eq!(
        shared.credential().transform_uri(shared.uri()).unwrap(),
        signed
    );
}
