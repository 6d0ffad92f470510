use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::assets::cache::ImageCache;
use crate::assets::obj::{ModelLoader, ObjModelLoader};
use crate::decode::access::Fields;
use crate::decode::camera::decode_camera;
use crate::decode::render::decode_render_config;
use crate::foundation::error::{SceneError, SceneResult};
use crate::scene::model::Scene;
use crate::schema::validate::validate_document;

static DEFAULT_MODEL_LOADER: ObjModelLoader = ObjModelLoader;

/// What to do with a geometry node whose `type` names no known variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownGeometryPolicy {
    /// Fail with [`SceneError::UnknownVariant`].
    #[default]
    Reject,
    /// Decode the node as a `translation`, as early versions of the format did.
    FallbackToTranslation,
}

/// Decoder options.
#[derive(Clone, Debug, Default)]
pub struct DecodeOpts {
    /// Run the aggregating schema pass before semantic decoding.
    ///
    /// When enabled, structural problems are reported together as [`SceneError::Schema`]. When
    /// disabled (the default) decoding stops at the first problem found.
    pub validate_schema: bool,
    /// Handling of unknown geometry discriminators.
    pub unknown_geometry: UnknownGeometryPolicy,
    /// Directory that relative image and model paths are resolved against.
    pub asset_root: Option<PathBuf>,
}

/// Decodes scene documents into [`Scene`] values.
///
/// The decoder borrows an [`ImageCache`], so images referenced by several textures, or by
/// several scenes decoded with the same cache, are read and decoded only once.
#[derive(Clone, Copy)]
pub struct SceneDecoder<'a> {
    images: &'a ImageCache,
    models: &'a dyn ModelLoader,
    opts: &'a DecodeOpts,
}

impl std::fmt::Debug for SceneDecoder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneDecoder")
            .field("cached_images", &self.images.len())
            .field("opts", &self.opts)
            .finish()
    }
}

static DEFAULT_OPTS: DecodeOpts = DecodeOpts {
    validate_schema: false,
    unknown_geometry: UnknownGeometryPolicy::Reject,
    asset_root: None,
};

impl<'a> SceneDecoder<'a> {
    /// Decoder with default options and the built-in OBJ model loader.
    pub fn new(images: &'a ImageCache) -> Self {
        Self {
            images,
            models: &DEFAULT_MODEL_LOADER,
            opts: &DEFAULT_OPTS,
        }
    }

    /// Replace the decoder options.
    pub fn with_opts(self, opts: &'a DecodeOpts) -> Self {
        Self { opts, ..self }
    }

    /// Replace the collaborator used for `objModel` nodes.
    pub fn with_model_loader(self, models: &'a dyn ModelLoader) -> Self {
        Self { models, ..self }
    }

    /// Parse and decode a JSON document.
    pub fn decode_slice(&self, bytes: &[u8]) -> SceneResult<Scene> {
        let root: Value = serde_json::from_slice(bytes)?;
        self.decode_value(&root)
    }

    /// Parse and decode a JSON document.
    pub fn decode_str(&self, json: &str) -> SceneResult<Scene> {
        self.decode_slice(json.as_bytes())
    }

    /// Read, parse and decode a JSON document from disk.
    pub fn decode_path(&self, path: impl AsRef<Path>) -> SceneResult<Scene> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.decode_slice(&bytes)
    }

    /// Decode an already parsed document.
    ///
    /// Returns a complete scene or the first error met in a depth-first, left-to-right walk
    /// (`world`, `camera`, `background`, `renderConfig`).
    #[tracing::instrument(skip_all, fields(schema = self.opts.validate_schema))]
    pub fn decode_value(&self, root: &Value) -> SceneResult<Scene> {
        if self.opts.validate_schema {
            validate_document(root, self.opts.unknown_geometry)?;
        }

        let f = Fields::of("scene", "<root>", root)?;
        let world = self.geometry_field(f, "world")?;
        let camera = decode_camera(f.object("camera")?)?;
        let background = f.color("background")?;
        let render_config = decode_render_config(f.object("renderConfig")?)?;

        tracing::debug!(world = world.kind(), "scene decoded");
        Ok(Scene {
            world,
            camera,
            background,
            render_config,
        })
    }

    pub(crate) fn images(&self) -> &'a ImageCache {
        self.images
    }

    pub(crate) fn models(&self) -> &'a dyn ModelLoader {
        self.models
    }

    pub(crate) fn opts(&self) -> &'a DecodeOpts {
        self.opts
    }

    /// Resolve a document path against the configured asset root.
    pub(crate) fn asset_path(&self, path: &str) -> PathBuf {
        match &self.opts.asset_root {
            Some(root) => root.join(path),
            None => PathBuf::from(path),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decode/scene.rs"]
mod tests;
