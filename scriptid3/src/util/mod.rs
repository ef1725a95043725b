//! Low level helpers shared by the tag reader and writer

pub(crate) mod alloc;
pub mod synchsafe;
pub mod text;
pub mod upgrade;
