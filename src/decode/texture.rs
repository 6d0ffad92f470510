use crate::decode::access::Fields;
use crate::decode::scene::SceneDecoder;
use crate::foundation::error::SceneResult;
use crate::scene::model::Texture;

impl SceneDecoder<'_> {
    /// Decode one node of the texture family.
    pub(crate) fn decode_texture(&self, node: Fields<'_>) -> SceneResult<Texture> {
        let node = node.within("texture");
        match node.discriminator()? {
            "solidColor" => {
                let f = node.within("solidColor");
                Ok(Texture::SolidColor {
                    color: f.color("color")?,
                })
            }
            "checker" => {
                let f = node.within("checker");
                let scale = f.number("scale")?;
                let even = self.decode_texture(f.object("even")?)?;
                let odd = self.decode_texture(f.object("odd")?)?;
                Ok(Texture::Checker {
                    scale,
                    even: Box::new(even),
                    odd: Box::new(odd),
                })
            }
            "image" => {
                let f = node.within("image");
                let path = f.string("path")?;
                let mirror = f.bool("mirror")?;
                let image = self.images().resolve_as(path, self.asset_path(path))?;
                Ok(Texture::Image {
                    path: path.to_owned(),
                    mirror,
                    image,
                })
            }
            "noise" => {
                let f = node.within("noise");
                Ok(Texture::Noise {
                    color: f.color("color")?,
                    scale: f.number("scale")?,
                })
            }
            other => Err(node.unknown_variant(other)),
        }
    }

    /// Decode the texture stored under `key` of `parent`.
    pub(crate) fn texture_field(
        &self,
        parent: Fields<'_>,
        key: &'static str,
    ) -> SceneResult<Texture> {
        self.decode_texture(parent.object(key)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decode/texture.rs"]
mod tests;
