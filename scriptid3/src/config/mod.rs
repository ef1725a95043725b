//! Various configuration options to control scriptid3

mod global_options;
mod parse_options;
mod write_options;

pub use global_options::{GlobalOptions, apply_global_options};
pub use parse_options::ParseOptions;
pub use write_options::WriteOptions;

pub(crate) use global_options::global_options;
