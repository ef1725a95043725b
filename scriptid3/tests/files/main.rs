#![allow(missing_docs)]

mod rewrite;
mod save;
pub(crate) mod util;
