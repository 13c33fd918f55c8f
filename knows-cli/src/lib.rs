//! Support library for the knows CLI binary.
//!
//! Exposes argument parsing, the generate-and-export pipeline and logging
//! set-up so integration tests can drive the command without spawning a
//! subprocess.

pub mod cli;
pub mod logging;
