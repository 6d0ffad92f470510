//! Decoder from JSON scene descriptions to a typed, immutable ray-tracing scene graph.
//!
//! The input is a complete JSON document with four sections: `world` (a geometry tree),
//! `camera`, `background` and `renderConfig`. The output is a [`Scene`] ready to hand to a
//! renderer, or a single [`SceneError`] naming the grammar rule and field that rejected the input.
//!
//! ```no_run
//! use solstrale_scene::{ImageCache, SceneDecoder};
//!
//! let images = ImageCache::new();
//! let scene = SceneDecoder::new(&images).decode_path("scene.json")?;
//! println!("{} geometry nodes", scene.stats().geometry_nodes());
//! # Ok::<(), solstrale_scene::SceneError>(())
//! ```
//!
//! # Error modes
//!
//! Semantic decoding is fail-fast. Setting [`DecodeOpts::validate_schema`] adds a structural
//! pre-pass that reports every violation at once as [`SceneError::Schema`].
//!
//! # Images
//!
//! Image textures are resolved through an explicitly passed [`ImageCache`]. Each file is read and
//! decoded at most once per cache, even when several scenes are decoded concurrently.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod decode;
mod foundation;
mod scene;
mod schema;

pub use crate::assets::cache::ImageCache;
pub use crate::assets::decode::{DecodedImage, decode_image};
pub use crate::assets::obj::{ModelLoader, ObjModelLoader};
pub use crate::decode::scene::{DecodeOpts, SceneDecoder, UnknownGeometryPolicy};
pub use crate::foundation::core::{ValueKind, Vec3};
pub use crate::foundation::error::{ResourceErrorKind, SceneError, SceneResult};
pub use crate::scene::model::{
    Camera, Geometry, Material, PostProcessor, RenderConfig, Scene, SceneStats, Shader, Texture,
};
pub use crate::schema::validate::{SchemaError, SchemaErrors, Violation, validate_document};
