//! Reading and writing locale files.

pub mod layout;
pub mod translation;
