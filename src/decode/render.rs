use crate::decode::access::Fields;
use crate::foundation::error::SceneResult;
use crate::scene::model::{PostProcessor, RenderConfig, Shader};

/// Decode the `renderConfig` section: sizes and sample count, then the shader, then the
/// optional post-processor.
pub(crate) fn decode_render_config(node: Fields<'_>) -> SceneResult<RenderConfig> {
    let f = node.within("renderConfig");
    let image_width = f.uint("imageWidth")?;
    let image_height = f.uint("imageHeight")?;
    let samples_per_pixel = f.uint("samplesPerPixel")?;
    let shader = decode_shader(f.object("shader")?)?;
    let post_processor = f
        .optional_object("postProcessor")?
        .map(decode_post_processor)
        .transpose()?;

    Ok(RenderConfig {
        image_width,
        image_height,
        samples_per_pixel,
        shader,
        post_processor,
    })
}

pub(crate) fn decode_shader(node: Fields<'_>) -> SceneResult<Shader> {
    let node = node.within("shader");
    match node.discriminator()? {
        "pathTracing" => Ok(Shader::PathTracing {
            max_depth: node.within("pathTracing").uint("maxDepth")?,
        }),
        "albedo" => Ok(Shader::Albedo),
        "normal" => Ok(Shader::Normal),
        "simple" => Ok(Shader::Simple),
        other => Err(node.unknown_variant(other)),
    }
}

pub(crate) fn decode_post_processor(node: Fields<'_>) -> SceneResult<PostProcessor> {
    let node = node.within("postProcessor");
    match node.discriminator()? {
        "oidn" => Ok(PostProcessor::Oidn {
            executable_path: node
                .within("oidn")
                .string("oidnDenoiseExecutablePath")?
                .to_owned(),
        }),
        other => Err(node.unknown_variant(other)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decode/render.rs"]
mod tests;
