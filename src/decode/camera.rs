use crate::decode::access::Fields;
use crate::foundation::error::SceneResult;
use crate::scene::model::Camera;

/// Decode the `camera` section. Fields are read in declaration order; the first failure wins.
pub(crate) fn decode_camera(node: Fields<'_>) -> SceneResult<Camera> {
    let f = node.within("camera");
    Ok(Camera {
        image_width: f.uint("imageWidth")?,
        image_height: f.uint("imageHeight")?,
        vertical_fov_degrees: f.number("verticalFovDegrees")?,
        aperture_size: f.number("apertureSize")?,
        focus_distance: f.number("focusDistance")?,
        look_from: f.vec3("lookFrom")?,
        look_at: f.vec3("lookAt")?,
        vup: f.vec3("vup")?,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/decode/camera.rs"]
mod tests;
