//! Library side of the `stigctl` binary.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod types;
