//! Serial operator console: byte stream to lines, lines to commands.

pub mod line;
pub mod parser;

pub use line::{LINE_CAPACITY, LineAssembler};
pub use parser::parse_command;
