//! Recursive-descent decoder from untyped JSON values to the typed scene graph.
//!
//! Each variant family (geometry, material, texture, shader, post-processor) dispatches on its
//! `type` discriminator. Decoding is fail-fast: the first error in a depth-first, left-to-right
//! walk is returned and no partial scene is ever produced.

pub(crate) mod access;
pub(crate) mod camera;
pub(crate) mod geometry;
pub(crate) mod material;
pub(crate) mod render;
pub(crate) mod scene;
pub(crate) mod texture;
pub(crate) mod vector;
