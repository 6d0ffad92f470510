use std::path::PathBuf;

use crate::foundation::core::ValueKind;
use crate::schema::validate::SchemaErrors;

/// Result type used throughout the decoder.
pub type SceneResult<T> = Result<T, SceneError>;

/// Failure classes of the image resource loader.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceErrorKind {
    /// The file does not exist.
    NotFound,
    /// The file exists but the codec could not recognize or decode it.
    UnsupportedFormat,
    /// Any other I/O failure while reading the file.
    IoFailure,
}

impl ResourceErrorKind {
    fn describe(self) -> &'static str {
        match self {
            Self::NotFound => "not found",
            Self::UnsupportedFormat => "unsupported or corrupt format",
            Self::IoFailure => "i/o failure",
        }
    }
}

impl std::fmt::Display for ResourceErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// Every way decoding a scene document can fail.
///
/// `context` is the grammar rule that rejected the input: a variant discriminator such as
/// `"sphere"` or `"checker"`, a section name such as `"camera"`, or `"vec"` / `"color"` for
/// vectors.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// A required field is absent.
    #[error("{context}: missing required field \"{key}\"")]
    MissingField {
        /// Enclosing grammar context.
        context: &'static str,
        /// Absent field name.
        key: &'static str,
    },

    /// A field is present but holds the wrong kind of value.
    #[error("{context}: field \"{key}\" must be {expected}")]
    TypeMismatch {
        /// Enclosing grammar context.
        context: &'static str,
        /// Offending field name.
        key: &'static str,
        /// Kind the grammar requires.
        expected: ValueKind,
    },

    /// A `type` discriminator names no known variant.
    #[error("{context}: unknown type \"{value}\"")]
    UnknownVariant {
        /// Variant family (`"geometry"`, `"texture"`, ...).
        context: &'static str,
        /// The discriminator value found in the document.
        value: String,
    },

    /// A container geometry holds no children.
    #[error("{context}: list must contain at least one element")]
    EmptyList {
        /// Container variant (`"bvh"` or `"hittableList"`).
        context: &'static str,
    },

    /// An image referenced by a texture could not be loaded.
    #[error("image \"{path}\": {kind}")]
    Resource {
        /// Failure class.
        kind: ResourceErrorKind,
        /// Path as written in the document.
        path: String,
        /// Underlying I/O or codec error.
        #[source]
        source: anyhow::Error,
    },

    /// An external collaborator (model loader) failed.
    #[error("{context}: {source:#}")]
    Collaborator {
        /// Grammar context that invoked the collaborator.
        context: &'static str,
        /// Collaborator error, passed through untouched.
        source: anyhow::Error,
    },

    /// The input is not well-formed JSON.
    #[error("parse scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The schema pre-pass found one or more structural violations.
    #[error("{0}")]
    Schema(#[from] SchemaErrors),

    /// A scene file could not be read.
    #[error("read scene '{}': {source}", path.display())]
    Io {
        /// Scene file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl SceneError {
    /// A required field is absent.
    pub fn missing_field(context: &'static str, key: &'static str) -> Self {
        Self::MissingField { context, key }
    }

    /// A field holds the wrong kind of value.
    pub fn type_mismatch(context: &'static str, key: &'static str, expected: ValueKind) -> Self {
        Self::TypeMismatch {
            context,
            key,
            expected,
        }
    }

    /// A discriminator names no known variant.
    pub fn unknown_variant(context: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownVariant {
            context,
            value: value.into(),
        }
    }

    /// A container geometry holds no children.
    pub fn empty_list(context: &'static str) -> Self {
        Self::EmptyList { context }
    }

    /// An image resource failed to load.
    pub fn resource(
        kind: ResourceErrorKind,
        path: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::Resource {
            kind,
            path: path.into(),
            source: source.into(),
        }
    }

    /// An external collaborator failed inside `context`.
    pub fn collaborator(context: &'static str, source: impl Into<anyhow::Error>) -> Self {
        Self::Collaborator {
            context,
            source: source.into(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
