use serde_json::{Map, Value};

use crate::foundation::core::ValueKind;
use crate::foundation::error::{SceneError, SceneResult};

/// Discriminator field shared by every variant family.
pub(crate) const TYPE_KEY: &str = "type";

/// Typed view over one JSON object, tagged with the grammar rule that is reading it.
///
/// Every lookup failure carries `context`, so an error can always be traced to the exact rule
/// (and key) that rejected the document.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Fields<'a> {
    context: &'static str,
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(context: &'static str, map: &'a Map<String, Value>) -> Self {
        Self { context, map }
    }

    /// View `value` as an object. `key` names the field it was read from, for diagnostics.
    pub(crate) fn of(
        context: &'static str,
        key: &'static str,
        value: &'a Value,
    ) -> SceneResult<Self> {
        value
            .as_object()
            .map(|map| Self::new(context, map))
            .ok_or_else(|| SceneError::type_mismatch(context, key, ValueKind::Object))
    }

    /// Same object, read under a more specific grammar rule.
    pub(crate) fn within(self, context: &'static str) -> Self {
        Self { context, ..self }
    }

    pub(crate) fn context(&self) -> &'static str {
        self.context
    }

    pub(crate) fn has(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub(crate) fn get(&self, key: &'static str) -> SceneResult<&'a Value> {
        self.map
            .get(key)
            .ok_or_else(|| SceneError::missing_field(self.context, key))
    }

    pub(crate) fn number(&self, key: &'static str) -> SceneResult<f64> {
        self.get(key)?
            .as_f64()
            .ok_or_else(|| self.mismatch(key, ValueKind::Number))
    }

    /// Non-negative JSON integer that fits in a `u32`.
    pub(crate) fn uint(&self, key: &'static str) -> SceneResult<u32> {
        self.get(key)?
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| self.mismatch(key, ValueKind::UnsignedInteger))
    }

    pub(crate) fn string(&self, key: &'static str) -> SceneResult<&'a str> {
        self.get(key)?
            .as_str()
            .ok_or_else(|| self.mismatch(key, ValueKind::String))
    }

    pub(crate) fn bool(&self, key: &'static str) -> SceneResult<bool> {
        self.get(key)?
            .as_bool()
            .ok_or_else(|| self.mismatch(key, ValueKind::Bool))
    }

    pub(crate) fn object(&self, key: &'static str) -> SceneResult<Fields<'a>> {
        Fields::of(self.context, key, self.get(key)?)
    }

    pub(crate) fn array(&self, key: &'static str) -> SceneResult<&'a [Value]> {
        self.get(key)?
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| self.mismatch(key, ValueKind::Array))
    }

    /// Like [`Fields::object`], but an absent or `null` field yields `None`.
    pub(crate) fn optional_object(&self, key: &'static str) -> SceneResult<Option<Fields<'a>>> {
        match self.map.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => Fields::of(self.context, key, v).map(Some),
        }
    }

    /// The `type` discriminator of a tagged-union node.
    pub(crate) fn discriminator(&self) -> SceneResult<&'a str> {
        self.string(TYPE_KEY)
    }

    /// Error for a discriminator that names no variant of this family.
    pub(crate) fn unknown_variant(&self, value: &str) -> SceneError {
        SceneError::unknown_variant(self.context, value)
    }

    fn mismatch(&self, key: &'static str, expected: ValueKind) -> SceneError {
        SceneError::type_mismatch(self.context, key, expected)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decode/access.rs"]
mod tests;
