//! Optional structural pre-pass.
//!
//! Checks a whole document against a declarative description of the scene grammar and reports
//! every violation at once, before any semantic decoding or file I/O happens.

pub(crate) mod grammar;
pub(crate) mod validate;
