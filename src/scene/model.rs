use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::assets::decode::DecodedImage;
use crate::foundation::core::Vec3;

/// A fully decoded render job.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Root of the hit-testable world.
    pub world: Geometry,
    /// View parameters.
    pub camera: Camera,
    /// Color returned for rays that escape the world.
    pub background: Vec3,
    /// Render job parameters.
    pub render_config: RenderConfig,
}

/// A node in the hit-testable world tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// Bounding volume hierarchy over its children.
    Bvh(Vec<Geometry>),
    /// Flat list of children, tested in order.
    HittableList(Vec<Geometry>),
    /// Participating medium of uniform density inside `boundary`.
    ConstantMedium {
        /// Volume boundary.
        boundary: Box<Geometry>,
        /// Medium density.
        density: f64,
        /// Phase function albedo.
        texture: Texture,
    },
    /// `object` moving along `blur_direction` during the exposure.
    MotionBlur {
        /// Moving geometry.
        object: Box<Geometry>,
        /// Displacement over the shutter interval.
        blur_direction: Vec3,
    },
    /// Parallelogram spanned by `dir_u` and `dir_v` from `corner`.
    Quad {
        /// Origin corner.
        corner: Vec3,
        /// First edge.
        dir_u: Vec3,
        /// Second edge.
        dir_v: Vec3,
        /// Surface material.
        mat: Material,
    },
    /// Axis-aligned box between two opposite corners.
    Box {
        /// First corner.
        corner: Vec3,
        /// Opposite corner.
        diagonal_corner: Vec3,
        /// Surface material.
        mat: Material,
    },
    /// `object` rotated around the Y axis.
    RotationY {
        /// Rotated geometry.
        object: Box<Geometry>,
        /// Rotation in degrees.
        angle: f64,
    },
    /// Sphere.
    Sphere {
        /// Center point.
        center: Vec3,
        /// Radius (not validated).
        radius: f64,
        /// Surface material.
        mat: Material,
    },
    /// Single triangle.
    Triangle {
        /// First vertex.
        v0: Vec3,
        /// Second vertex.
        v1: Vec3,
        /// Third vertex.
        v2: Vec3,
        /// Surface material.
        mat: Material,
    },
    /// `object` displaced by `offset`.
    Translation {
        /// Translated geometry.
        object: Box<Geometry>,
        /// Displacement.
        offset: Vec3,
    },
}

impl Geometry {
    /// Grammar name of this variant, as written in the `type` discriminator.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bvh(_) => "bvh",
            Self::HittableList(_) => "hittableList",
            Self::ConstantMedium { .. } => "constantMedium",
            Self::MotionBlur { .. } => "motionBlur",
            Self::Quad { .. } => "quad",
            Self::Box { .. } => "box",
            Self::RotationY { .. } => "rotationY",
            Self::Sphere { .. } => "sphere",
            Self::Triangle { .. } => "triangle",
            Self::Translation { .. } => "translation",
        }
    }
}

/// A color or pattern source.
#[derive(Clone, Debug, PartialEq)]
pub enum Texture {
    /// Constant color.
    SolidColor {
        /// RGB color.
        color: Vec3,
    },
    /// 3-D checker pattern alternating between two textures.
    Checker {
        /// Cell size.
        scale: f64,
        /// Texture of even cells.
        even: Box<Texture>,
        /// Texture of odd cells.
        odd: Box<Texture>,
    },
    /// Texture sampled from a decoded image shared through the image cache.
    Image {
        /// Path as written in the document.
        path: String,
        /// Mirror the image horizontally.
        mirror: bool,
        /// Decoded pixels.
        image: Arc<DecodedImage>,
    },
    /// Perlin-style noise tinted with `color`.
    Noise {
        /// Tint color.
        color: Vec3,
        /// Noise frequency.
        scale: f64,
    },
}

impl Texture {
    /// Grammar name of this variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SolidColor { .. } => "solidColor",
            Self::Checker { .. } => "checker",
            Self::Image { .. } => "image",
            Self::Noise { .. } => "noise",
        }
    }
}

/// Surface shading behavior.
#[derive(Clone, Debug, PartialEq)]
pub enum Material {
    /// Ideal diffuse reflector.
    Lambertian {
        /// Albedo.
        texture: Texture,
    },
    /// Reflective metal.
    Metal {
        /// Albedo.
        texture: Texture,
        /// Reflection perturbation.
        fuzz: f64,
    },
    /// Refractive glass-like material.
    Dielectric {
        /// Tint.
        texture: Texture,
        /// Index of refraction.
        index_of_refraction: f64,
    },
    /// Light emitter.
    DiffuseLight {
        /// Emitted color.
        texture: Texture,
    },
    /// Isotropic scattering, used inside participating media.
    Isotropic {
        /// Albedo.
        texture: Texture,
    },
}

impl Material {
    /// Grammar name of this variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Lambertian { .. } => "lambertian",
            Self::Metal { .. } => "metal",
            Self::Dielectric { .. } => "dielectric",
            Self::DiffuseLight { .. } => "diffuseLight",
            Self::Isotropic { .. } => "isotropic",
        }
    }

    /// The texture every material variant embeds.
    pub fn texture(&self) -> &Texture {
        match self {
            Self::Lambertian { texture }
            | Self::Metal { texture, .. }
            | Self::Dielectric { texture, .. }
            | Self::DiffuseLight { texture }
            | Self::Isotropic { texture } => texture,
        }
    }
}

/// View parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// Output width in pixels.
    pub image_width: u32,
    /// Output height in pixels.
    pub image_height: u32,
    /// Vertical field of view, degrees.
    pub vertical_fov_degrees: f64,
    /// Lens aperture; `0` disables depth of field.
    pub aperture_size: f64,
    /// Distance to the plane of perfect focus.
    pub focus_distance: f64,
    /// Eye position.
    pub look_from: Vec3,
    /// Point the camera looks at.
    pub look_at: Vec3,
    /// Camera-relative up direction.
    pub vup: Vec3,
}

/// Render job parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Output width in pixels.
    pub image_width: u32,
    /// Output height in pixels.
    pub image_height: u32,
    /// Samples taken per pixel.
    pub samples_per_pixel: u32,
    /// Pixel color estimator.
    pub shader: Shader,
    /// Optional denoise stage.
    pub post_processor: Option<PostProcessor>,
}

/// Pixel color estimator selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shader {
    /// Full path tracing up to `max_depth` bounces.
    PathTracing {
        /// Maximum ray bounce depth.
        max_depth: u32,
    },
    /// Surface albedo only.
    Albedo,
    /// Surface normals only.
    Normal,
    /// Direct shading without bounces.
    Simple,
}

/// Optional post-processing stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PostProcessor {
    /// Intel Open Image Denoise invoked as an external executable.
    Oidn {
        /// Path of the `oidnDenoise` executable.
        executable_path: String,
    },
}

/// Summary counts over a decoded scene.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct SceneStats {
    /// Geometry nodes per variant name.
    pub geometry: BTreeMap<&'static str, usize>,
    /// Material nodes per variant name.
    pub materials: BTreeMap<&'static str, usize>,
    /// Texture nodes per variant name.
    pub textures: BTreeMap<&'static str, usize>,
    /// Distinct image paths referenced by textures.
    pub images: BTreeSet<String>,
}

impl Scene {
    /// Count the nodes of every variant family in this scene.
    pub fn stats(&self) -> SceneStats {
        let mut stats = SceneStats::default();
        stats.visit_geometry(&self.world);
        stats
    }
}

impl SceneStats {
    /// Total geometry node count.
    pub fn geometry_nodes(&self) -> usize {
        self.geometry.values().sum()
    }

    fn visit_geometry(&mut self, g: &Geometry) {
        *self.geometry.entry(g.kind()).or_default() += 1;
        match g {
            Geometry::Bvh(list) | Geometry::HittableList(list) => {
                for child in list {
                    self.visit_geometry(child);
                }
            }
            Geometry::ConstantMedium {
                boundary, texture, ..
            } => {
                self.visit_geometry(boundary);
                self.visit_texture(texture);
            }
            Geometry::MotionBlur { object, .. }
            | Geometry::RotationY { object, .. }
            | Geometry::Translation { object, .. } => self.visit_geometry(object),
            Geometry::Quad { mat, .. }
            | Geometry::Box { mat, .. }
            | Geometry::Sphere { mat, .. }
            | Geometry::Triangle { mat, .. } => self.visit_material(mat),
        }
    }

    fn visit_material(&mut self, m: &Material) {
        *self.materials.entry(m.kind()).or_default() += 1;
        self.visit_texture(m.texture());
    }

    fn visit_texture(&mut self, t: &Texture) {
        *self.textures.entry(t.kind()).or_default() += 1;
        match t {
            Texture::Checker { even, odd, .. } => {
                self.visit_texture(even);
                self.visit_texture(odd);
            }
            Texture::Image { path, .. } => {
                self.images.insert(path.clone());
            }
            Texture::SolidColor { .. } | Texture::Noise { .. } => {}
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
