use std::collections::HashMap;

use tablesign_core::{Error, Result};

use crate::Config;

// Azurite defaults.
const AZURITE_DEFAULT_STORAGE_ACCOUNT_NAME: &str = "devstoreaccount1";
const AZURITE_DEFAULT_STORAGE_ACCOUNT_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";
const AZURITE_DEFAULT_TABLE_URI: &str = "http://127.0.0.1:10002";

/// Parses an [Azure connection string][1] for the table service.
///
/// [1]: https://learn.microsoft.com/en-us/azure/storage/common/storage-configure-connection-string
pub(crate) fn parse(conn_str: &str) -> Result<Config> {
    let key_values = parse_into_key_values(conn_str)?;

    if key_values.get("UseDevelopmentStorage").map(String::as_str) == Some("true") {
        return Ok(development_config(&key_values));
    }

    let mut config = Config {
        account_name: key_values.get("AccountName").cloned(),
        endpoint: collect_endpoint(&key_values)?,
        ..Default::default()
    };

    if let Some(token) = key_values.get("SharedAccessSignature") {
        config.sas_token = Some(token.clone());
    } else if config.account_name.is_some() {
        config.account_key = key_values.get("AccountKey").cloned();
    }

    Ok(config)
}

fn parse_into_key_values(conn_str: &str) -> Result<HashMap<String, String>> {
    conn_str
        .trim()
        .replace('\n', "")
        .split(';')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(|field| {
            let (key, value) = field.split_once('=').ok_or_else(|| {
                Error::config_invalid(format!(
                    "invalid connection string, expected '=' in field: {field}"
                ))
            })?;
            Ok((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Azurite development storage, which serves tables path-style.
fn development_config(key_values: &HashMap<String, String>) -> Config {
    let account_name = key_values
        .get("AccountName")
        .map_or(AZURITE_DEFAULT_STORAGE_ACCOUNT_NAME, String::as_str);
    let account_key = key_values
        .get("AccountKey")
        .map_or(AZURITE_DEFAULT_STORAGE_ACCOUNT_KEY, String::as_str);
    let proxy_uri = key_values
        .get("DevelopmentStorageProxyUri")
        .map_or(AZURITE_DEFAULT_TABLE_URI, String::as_str);

    Config {
        endpoint: Some(format!(
            "{}/{account_name}",
            proxy_uri.trim_end_matches('/')
        )),
        account_name: Some(account_name.to_string()),
        account_key: Some(account_key.to_string()),
        ..Default::default()
    }
}

/// Parses an endpoint from the key-value pairs if possible.
///
/// Users are still able to later supplement configuration with an endpoint,
/// so endpoint-related fields aren't enforced.
fn collect_endpoint(key_values: &HashMap<String, String>) -> Result<Option<String>> {
    if let Some(endpoint) = key_values.get("TableEndpoint") {
        return Ok(Some(endpoint.clone()));
    }

    let (Some(account_name), Some(endpoint_suffix)) = (
        key_values.get("AccountName"),
        key_values.get("EndpointSuffix"),
    ) else {
        return Ok(None);
    };

    let protocol = key_values
        .get("DefaultEndpointsProtocol")
        .map_or("https", String::as_str);
    if protocol != "http" && protocol != "https" {
        return Err(Error::config_invalid(format!(
            "invalid DefaultEndpointsProtocol: {protocol}"
        )));
    }

    Ok(Some(format!(
        "{protocol}://{account_name}.table.{endpoint_suffix}"
    )))
}
