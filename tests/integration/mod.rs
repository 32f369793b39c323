//! Integration tests for site and connection configuration resolution

mod connection_lifecycle;
mod test_utils;

pub use test_utils::{with_env_vars, with_xdg_env};
