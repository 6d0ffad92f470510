//! External resources referenced by scenes: decoded images and loaded models.

pub(crate) mod cache;
pub(crate) mod decode;
pub(crate) mod obj;
