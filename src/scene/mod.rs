//! Typed, immutable scene graph produced by the decoder.

pub(crate) mod model;
