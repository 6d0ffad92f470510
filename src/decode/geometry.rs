use crate::decode::access::Fields;
use crate::decode::scene::{SceneDecoder, UnknownGeometryPolicy};
use crate::foundation::error::{SceneError, SceneResult};
use crate::scene::model::Geometry;

impl SceneDecoder<'_> {
    /// Decode one node of the geometry family.
    ///
    /// Nodes that wrap another geometry decode the wrapped node first, then their own fields.
    pub(crate) fn decode_geometry(&self, node: Fields<'_>) -> SceneResult<Geometry> {
        let node = node.within("geometry");
        let kind = node.discriminator()?;
        match kind {
            "bvh" => Ok(Geometry::Bvh(self.decode_children(node.within("bvh"))?)),
            "hittableList" => Ok(Geometry::HittableList(
                self.decode_children(node.within("hittableList"))?,
            )),
            "constantMedium" => {
                let f = node.within("constantMedium");
                let boundary = self.geometry_field(f, "boundary")?;
                let density = f.number("density")?;
                let texture = self.texture_field(f, "texture")?;
                Ok(Geometry::ConstantMedium {
                    boundary: Box::new(boundary),
                    density,
                    texture,
                })
            }
            "motionBlur" => {
                let f = node.within("motionBlur");
                let object = self.geometry_field(f, "object")?;
                Ok(Geometry::MotionBlur {
                    object: Box::new(object),
                    blur_direction: f.vec3("blurDirection")?,
                })
            }
            "quad" => {
                let f = node.within("quad");
                Ok(Geometry::Quad {
                    corner: f.vec3("corner")?,
                    dir_u: f.vec3("dirU")?,
                    dir_v: f.vec3("dirV")?,
                    mat: self.material_field(f, "mat")?,
                })
            }
            "box" => {
                let f = node.within("box");
                Ok(Geometry::Box {
                    corner: f.vec3("corner")?,
                    diagonal_corner: f.vec3("diagonalCorner")?,
                    mat: self.material_field(f, "mat")?,
                })
            }
            "rotationY" => {
                let f = node.within("rotationY");
                let object = self.geometry_field(f, "object")?;
                Ok(Geometry::RotationY {
                    object: Box::new(object),
                    angle: f.number("angle")?,
                })
            }
            "sphere" => {
                let f = node.within("sphere");
                Ok(Geometry::Sphere {
                    center: f.vec3("center")?,
                    radius: f.number("radius")?,
                    mat: self.material_field(f, "mat")?,
                })
            }
            "triangle" => {
                let f = node.within("triangle");
                Ok(Geometry::Triangle {
                    v0: f.vec3("v0")?,
                    v1: f.vec3("v1")?,
                    v2: f.vec3("v2")?,
                    mat: self.material_field(f, "mat")?,
                })
            }
            "translation" => self.decode_translation(node.within("translation")),
            "objModel" => self.decode_obj_model(node.within("objModel")),
            other => match self.opts().unknown_geometry {
                UnknownGeometryPolicy::Reject => Err(node.unknown_variant(other)),
                UnknownGeometryPolicy::FallbackToTranslation => {
                    tracing::warn!(kind = other, "unknown geometry type, decoding as translation");
                    self.decode_translation(node.within("translation"))
                }
            },
        }
    }

    pub(crate) fn geometry_field(
        &self,
        parent: Fields<'_>,
        key: &'static str,
    ) -> SceneResult<Geometry> {
        self.decode_geometry(parent.object(key)?)
    }

    /// Decode `list` in order. Emptiness is only checked once every element decoded.
    fn decode_children(&self, f: Fields<'_>) -> SceneResult<Vec<Geometry>> {
        let list = f.array("list")?;
        let mut children = Vec::with_capacity(list.len());
        for item in list {
            let child = Fields::of(f.context(), "list", item)?;
            children.push(self.decode_geometry(child)?);
        }
        if children.is_empty() {
            return Err(SceneError::empty_list(f.context()));
        }
        Ok(children)
    }

    fn decode_translation(&self, f: Fields<'_>) -> SceneResult<Geometry> {
        let object = self.geometry_field(f, "object")?;
        Ok(Geometry::Translation {
            object: Box::new(object),
            offset: f.vec3("offset")?,
        })
    }

    fn decode_obj_model(&self, f: Fields<'_>) -> SceneResult<Geometry> {
        let path = f.string("path")?;
        let default_mat = match f.optional_object("mat")? {
            Some(mat) => Some(self.decode_material(mat)?),
            None => None,
        };

        let full = self.asset_path(path);
        tracing::debug!(
            path = %full.display(),
            override_mat = default_mat.is_some(),
            "loading model"
        );
        self.models()
            .load_model(&full, default_mat)
            .map_err(|e| SceneError::collaborator(f.context(), e))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decode/geometry.rs"]
mod tests;
