//! linear-mcp CLI library
//!
//! Command-line definitions, logging setup and exit codes for the
//! `linear-mcp` binary, exposed for tests.

/// Command-line interface definitions and argument parsing
pub mod cli;
/// Exit codes used by the CLI application
pub mod exit_codes;
/// Logging setup
pub mod logging;
