//! Library side of the `dq-pack` command line: logging setup and run orchestration.

pub mod logging;
pub mod pipeline;
