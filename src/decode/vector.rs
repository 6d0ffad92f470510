use crate::decode::access::Fields;
use crate::foundation::core::Vec3;
use crate::foundation::error::SceneResult;

pub(crate) const VEC_CONTEXT: &str = "vec";
pub(crate) const COLOR_CONTEXT: &str = "color";

/// Decode `{x, y, z}`; fields are read in that order and the first failure wins.
pub(crate) fn decode_vec3(node: Fields<'_>) -> SceneResult<Vec3> {
    let f = node.within(VEC_CONTEXT);
    Ok(Vec3::new(f.number("x")?, f.number("y")?, f.number("z")?))
}

/// Decode a color written either as `{r, g, b}` or as a plain `{x, y, z}` vector.
///
/// An object with an `r` key is read as RGB, anything else as XYZ.
pub(crate) fn decode_color(node: Fields<'_>) -> SceneResult<Vec3> {
    if node.has("r") {
        let f = node.within(COLOR_CONTEXT);
        return Ok(Vec3::new(f.number("r")?, f.number("g")?, f.number("b")?));
    }
    decode_vec3(node)
}

impl Fields<'_> {
    pub(crate) fn vec3(&self, key: &'static str) -> SceneResult<Vec3> {
        decode_vec3(self.object(key)?)
    }

    pub(crate) fn color(&self, key: &'static str) -> SceneResult<Vec3> {
        decode_color(self.object(key)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decode/vector.rs"]
mod tests;
