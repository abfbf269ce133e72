//! URI related utils.
//!
//! Storage resources are addressed either host-style
//! (`https://account.table.core.windows.net/mytable`) or path-style
//! (`http://127.0.0.1:10002/account/mytable`). The helpers here derive one
//! form from the other without touching the network.

use std::net::IpAddr;
use std::str::FromStr;

use http::uri::PathAndQuery;
use http::Uri;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use crate::{Error, Result};

/// Characters escaped when a value is placed into a single path segment.
pub static PATH_SEGMENT_ENCODE_SET: AsciiSet = CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Return an error unless the uri carries both a scheme and an authority.
pub fn ensure_absolute(uri: &Uri) -> Result<()> {
    if uri.scheme().is_none() || uri.authority().is_none() {
        return Err(Error::argument_invalid(format!(
            "uri '{uri}' must be absolute"
        )));
    }
    Ok(())
}

/// Rebuild `uri` keeping scheme and authority but replacing the path and
/// query with `paq`.
fn with_path_and_query(uri: &Uri, paq: &str) -> Result<Uri> {
    ensure_absolute(uri)?;

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::from_str(paq)?);
    Ok(Uri::from_parts(parts)?)
}

/// Drop the query string of `uri`.
pub fn strip_query(uri: &Uri) -> Result<Uri> {
    with_path_and_query(uri, uri.path())
}

/// Append `segment` to the path of `base` as a single, escaped path segment.
///
/// Exactly one `/` separates the existing path from the new segment, and any
/// query on `base` is dropped.
pub fn append_path_segment(base: &Uri, segment: &str) -> Result<Uri> {
    let path = base.path().trim_end_matches('/');
    let encoded = utf8_percent_encode(segment, &PATH_SEGMENT_ENCODE_SET);
    with_path_and_query(base, &format!("{path}/{encoded}"))
}

/// Append a raw, already encoded query to `uri`, keeping any query it has.
///
/// A leading `?` on `query` is ignored.
pub fn append_query(uri: &Uri, query: &str) -> Result<Uri> {
    let query = query.trim_start_matches('?');
    if query.is_empty() {
        return Ok(uri.clone());
    }

    let paq = match uri.query() {
        Some(existing) if !existing.is_empty() => {
            format!("{}?{existing}&{query}", uri.path())
        }
        _ => format!("{}?{query}", uri.path()),
    };
    with_path_and_query(uri, &paq)
}

/// Percent decoded, non-empty path segments of `uri`.
pub fn path_segments(uri: &Uri) -> Vec<String> {
    uri.path()
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
        .collect()
}

/// Decoded query pairs of `uri` in their original order.
pub fn parse_query(uri: &Uri) -> Vec<(String, String)> {
    uri.query()
        .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

/// Query pairs of `uri` as `(decoded key, raw pair)`.
///
/// The raw pair is the untouched `key=value` text, so a selection of pairs can
/// be joined back together without re-encoding values.
pub fn raw_query_pairs(uri: &Uri) -> Vec<(String, &str)> {
    uri.query()
        .map(|q| {
            q.split('&')
                .filter(|pair| !pair.is_empty())
                .map(|pair| {
                    let key = pair.split_once('=').map_or(pair, |(k, _)| k);
                    (percent_decode_str(key).decode_utf8_lossy().into_owned(), pair)
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Whether `uri` uses path-style addressing.
///
/// Hosts given as IP literals can't carry the account name in a subdomain,
/// so the account becomes the first path segment instead.
pub fn is_path_style(uri: &Uri) -> bool {
    uri.host()
        .map(|host| host.trim_start_matches('[').trim_end_matches(']'))
        .is_some_and(|host| IpAddr::from_str(host).is_ok())
}

/// Derive the service base address from a resource uri.
///
/// - host-style: `scheme://authority/`
/// - path-style: `scheme://authority/<account>`
pub fn service_base_address(uri: &Uri, path_style: bool) -> Result<Uri> {
    if !path_style {
        return with_path_and_query(uri, "/");
    }

    let account = uri
        .path()
        .split('/')
        .find(|s| !s.is_empty())
        .ok_or_else(|| {
            Error::argument_invalid(format!(
                "path-style uri '{uri}' doesn't carry an account name"
            ))
        })?;
    with_path_and_query(uri, &format!("/{account}"))
}
