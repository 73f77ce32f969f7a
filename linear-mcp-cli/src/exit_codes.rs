//! Exit code constants for CLI commands
//!
//! - 0: Success
//! - 1: Runtime failure
//! - 2: Configuration or usage error

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// The server or a command failed while running
pub const EXIT_FAILURE: i32 = 1;

/// Bad configuration or command-line usage
pub const EXIT_USAGE: i32 = 2;
