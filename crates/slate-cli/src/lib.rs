//! Library side of the `slate` command-line tool.

pub mod assign;
pub mod logging;
pub mod source;
