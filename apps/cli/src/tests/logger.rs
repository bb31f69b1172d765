// Unit tests for logger initialization
// The global logger can only be installed once per test binary, so these run serially

use crate::error::CliError;
use crate::logger::{LOG_LEVEL_ENV_KEY, initialize, initialize_internal, level_from_env};

use std::path::PathBuf;

use log::LevelFilter;
use serial_test::serial;
use tempfile::TempDir;

/// **VALUE**: Verifies that calling initialize() twice is harmless.
///
/// **WHY THIS MATTERS**: Tests and the binary may both reach initialization. A second
/// global logger install makes fern return an error.
///
/// **BUG THIS CATCHES**: Would catch if the Once or AtomicBool guards are removed.
#[test]
#[serial]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    // GIVEN: A writable directory
    let dir = TempDir::new().expect("temp dir");

    // WHEN: Calling initialize twice
    let first = initialize(dir.path(), LevelFilter::Debug);
    let second = initialize(dir.path(), LevelFilter::Debug);

    // THEN: Both succeed and the log file exists
    assert!(first.is_ok(), "First initialization should succeed: {first:?}");
    assert!(second.is_ok(), "Second initialization should be a no-op");
    assert!(dir.path().join("billing.log").exists());
}

/// **VALUE**: Verifies the level override is read from the environment.
///
/// **WHY THIS MATTERS**: Debugging a refresh loop in the field needs trace output without
/// rebuilding.
///
/// **BUG THIS CATCHES**: Would catch a bad value aborting startup instead of falling back.
#[test]
#[serial]
fn given_level_env_when_reading_level_then_override_or_default() {
    // SAFETY: #[serial]
    unsafe { std::env::set_var(LOG_LEVEL_ENV_KEY, "trace") };
    assert_eq!(level_from_env(), LevelFilter::Trace);

    // SAFETY: #[serial]
    unsafe { std::env::set_var(LOG_LEVEL_ENV_KEY, " Warn ") };
    assert_eq!(level_from_env(), LevelFilter::Warn);

    // SAFETY: #[serial]
    unsafe { std::env::set_var(LOG_LEVEL_ENV_KEY, "chatty") };
    let fallback = level_from_env();

    // SAFETY: #[serial]
    unsafe { std::env::remove_var(LOG_LEVEL_ENV_KEY) };
    assert_eq!(fallback, level_from_env());
}

/// **VALUE**: Verifies an unwritable log directory is reported as an error, not a panic.
///
/// **WHY THIS MATTERS**: A read-only or missing config directory must produce a clear
/// startup message.
///
/// **BUG THIS CATCHES**: Would catch `fern::log_file()` being unwrapped.
#[test]
fn given_unwritable_log_dir_when_initializing_then_cli_error() {
    // GIVEN: A path below a character device
    let invalid_dir = PathBuf::from("/dev/null/billing-logs");

    // WHEN: Building the dispatch (fails before any global logger is installed)
    let result = initialize_internal(&invalid_dir, LevelFilter::Info);

    // THEN
    assert!(matches!(result, Err(CliError::Cli { .. })));
}
