use std::sync::Arc;

use chrono::TimeDelta;
use log::info;
use tablesign_azure_table::{
    CloudTable, Config, Credential, SharedAccessTablePolicy, TableKeyRange, TablePermissions,
    TableServiceClient,
};
use tablesign_core::time::now;
use tablesign_core::{uri, OsEnv, Result};

fn main() -> Result<()> {
    env_logger::init();

    // Falls back to Azurite when nothing is configured.
    let config = Config::try_from_connection_string("UseDevelopmentStorage=true")?.from_env(&OsEnv);
    let client = Arc::new(TableServiceClient::from_config(&config)?);
    let table = client.table("People")?;
    info!("table uri: {}", table.uri());

    let policy = SharedAccessTablePolicy::new(
        TablePermissions::read_only(),
        now() + TimeDelta::try_hours(1).expect("in bounds"),
    );
    let range = TableKeyRange::new()
        .with_start_partition_key("Smith")
        .with_end_partition_key("Smith");
    let sas = table.shared_access_signature(Some(&policy), None, &range)?;

    // Hand the signed uri to someone without the account key.
    let signed = uri::append_query(table.uri(), &sas)?;
    println!("{signed}");

    // They can resolve the table again from that uri alone.
    let shared = CloudTable::from_uri(&signed)?;
    assert_eq!(shared.name(), table.name());
    assert!(matches!(shared.credential(), Credential::SasToken { .. }));

    Ok(())
}
