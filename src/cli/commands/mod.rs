//! CLI command implementations
//!
//! Every command returns the process exit code:
//! 0 success, 2 configuration error, 3 success with skipped work,
//! 4 source or destination unreachable, 5 fatal.

pub mod init;
pub mod status;
pub mod sync;
pub mod validate;

/// Successful run
pub const EXIT_OK: i32 = 0;
/// Configuration could not be loaded or is invalid
pub const EXIT_CONFIG: i32 = 2;
/// Run completed but some pages, orders or items were skipped
pub const EXIT_PARTIAL: i32 = 3;
/// Provider or destination unreachable
pub const EXIT_UNREACHABLE: i32 = 4;
/// Persistence failure or any other fatal error
pub const EXIT_FATAL: i32 = 5;
/// Run interrupted by a shutdown signal
pub const EXIT_INTERRUPTED: i32 = 130;
