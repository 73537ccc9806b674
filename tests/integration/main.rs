//! Integration tests

mod common;
mod config_test;
mod fallback_test;
mod monitor_test;
