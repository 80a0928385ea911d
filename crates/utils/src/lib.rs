//! Transport and configuration plumbing shared by the Cube storage crates.
//!
//! Nothing in here knows about buckets or object keys: [`http_client`] is a thin layer over
//! `reqwest` that fixes the base URL, timeout and default headers once, and the remaining
//! modules help turn strings from files or the environment into typed settings.

pub mod env_utils;
pub mod http_client;
pub mod parsers;
pub mod serde;
