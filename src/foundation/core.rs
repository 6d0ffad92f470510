use std::fmt;

/// Three-component vector used for points, directions and RGB colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Vec3 {
    /// X (or red) component.
    pub x: f64,
    /// Y (or green) component.
    pub y: f64,
    /// Z (or blue) component.
    pub z: f64,
}

impl Vec3 {
    /// Construct a vector from its components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Vector with all three components set to `v`.
    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v, z: v }
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

/// Kind of JSON value a field is expected to hold.
///
/// Used in type-mismatch diagnostics, both by the semantic decoder and by the schema pre-pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// JSON object.
    Object,
    /// JSON array.
    Array,
    /// JSON string.
    String,
    /// Any JSON number.
    Number,
    /// JSON integer that fits in a `u32`.
    UnsignedInteger,
    /// JSON boolean.
    Bool,
    /// JSON `null`.
    Null,
}

impl ValueKind {
    /// Classify an untyped JSON value.
    pub fn of(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(_) => Self::Bool,
            serde_json::Value::Number(_) => Self::Number,
            serde_json::Value::String(_) => Self::String,
            serde_json::Value::Array(_) => Self::Array,
            serde_json::Value::Object(_) => Self::Object,
        }
    }

    /// Human-readable name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Number => "number",
            Self::UnsignedInteger => "unsigned integer",
            Self::Bool => "boolean",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
