//! Process exit statuses.
//!
//! | status | meaning |
//! |---|---|
//! | 0 | dependency ready |
//! | 1 | fatal probe error |
//! | 2 | configuration error (also clap's usage error status) |
//! | 130 | cancelled by SIGINT/SIGTERM |

use crate::waiter::WaitError;

pub const EXIT_READY: u8 = 0;
pub const EXIT_FATAL: u8 = 1;
pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_CANCELLED: u8 = 130;

/// Map the outcome of a wait to the process exit status.
pub fn exit_status(result: &Result<(), WaitError>) -> u8 {
    match result {
        Ok(()) => EXIT_READY,
        Err(WaitError::Probe(_)) => EXIT_FATAL,
        Err(WaitError::Cancelled { .. }) => EXIT_CANCELLED,
    }
}
