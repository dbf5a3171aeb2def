//! Library components of the `pkspec` command-line tool.

pub mod logging;
pub mod workflow;
