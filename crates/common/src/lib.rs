//! Shared plumbing for the Kubera crates: client configuration, per-user
//! paths and logging setup.

mod config;
mod logging;
pub mod paths;

pub use config::{
    parse_timeout_secs, ClientConfig, ParseTimeoutError, BASE_URL_VAR, DEFAULT_BASE_URL,
    DEFAULT_TIMEOUT, TIMEOUT_VAR,
};
pub use logging::{init_logging, init_logging_with_default};
