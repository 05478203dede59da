//! Integration tests module.
//!
//! Common utilities and test infrastructure for cross-module workflow tests.

pub mod end_to_end_test;
pub mod request_chaining_test;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test environment (run once)
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}
