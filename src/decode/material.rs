use crate::decode::access::Fields;
use crate::decode::scene::SceneDecoder;
use crate::foundation::error::SceneResult;
use crate::scene::model::Material;

impl SceneDecoder<'_> {
    /// Decode one node of the material family. The embedded texture is decoded before any
    /// scalar field.
    pub(crate) fn decode_material(&self, node: Fields<'_>) -> SceneResult<Material> {
        let node = node.within("material");
        match node.discriminator()? {
            "lambertian" => {
                let f = node.within("lambertian");
                Ok(Material::Lambertian {
                    texture: self.texture_field(f, "texture")?,
                })
            }
            "metal" => {
                let f = node.within("metal");
                let texture = self.texture_field(f, "texture")?;
                Ok(Material::Metal {
                    texture,
                    fuzz: f.number("fuzz")?,
                })
            }
            "dielectric" => {
                let f = node.within("dielectric");
                let texture = self.texture_field(f, "texture")?;
                Ok(Material::Dielectric {
                    texture,
                    index_of_refraction: f.number("indexOfRefraction")?,
                })
            }
            "diffuseLight" => {
                let f = node.within("diffuseLight");
                Ok(Material::DiffuseLight {
                    texture: self.texture_field(f, "texture")?,
                })
            }
            "isotropic" => {
                let f = node.within("isotropic");
                Ok(Material::Isotropic {
                    texture: self.texture_field(f, "texture")?,
                })
            }
            other => Err(node.unknown_variant(other)),
        }
    }

    pub(crate) fn material_field(
        &self,
        parent: Fields<'_>,
        key: &'static str,
    ) -> SceneResult<Material> {
        self.decode_material(parent.object(key)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decode/material.rs"]
mod tests;
