//! Core components shared by the tablesign service crates.
//!
//! This crate holds the pieces every storage service needs when it resolves
//! resource identities and builds shared access signatures locally.
//!
//! ## Overview
//!
//! - [`Error`] and [`ErrorKind`]: the error type returned by every fallible operation
//! - [`hash`]: base64 and HMAC helpers used to compute signatures
//! - [`time`]: UTC timestamps and the wire formats they are rendered in
//! - [`uri`]: path, query and base address manipulation over [`http::Uri`]
//! - [`Env`]: environment variable access, with [`OsEnv`] and [`StaticEnv`]
//! - [`utils`]: general utilities including data redaction
//!
//! ## Example
//!
//! ```
//! use tablesign_core::hash::{base64_encode, base64_hmac_sha256};
//! use tablesign_core::uri::append_path_segment;
//!
//! # fn main() -> tablesign_core::Result<()> {
//! let base: http::Uri = "https://account.table.core.windows.net".parse()?;
//! let table = append_path_segment(&base, "mytable")?;
//! assert_eq!(table.to_string(), "https://account.table.core.windows.net/mytable");
//!
//! let key = base64_encode(b"key");
//! assert!(!base64_hmac_sha256(key.as_bytes(), b"content").is_empty());
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod uri;
pub mod utils;

mod env;
pub use env::{Env, OsEnv, StaticEnv};
mod error;
pub use error::{Error, ErrorKind, Result};
