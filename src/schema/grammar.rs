//! Declarative description of the scene grammar: every section and variant, its fields, their
//! expected kinds, and whether they are required. Field order matches the order in which the
//! semantic decoder reads them.

/// Expected shape of a field value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FieldKind {
    Number,
    UnsignedInteger,
    String,
    Bool,
    Vec3,
    Color,
    Geometry,
    GeometryList,
    Texture,
    Material,
    Shader,
    PostProcessor,
    Camera,
    RenderConfig,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct FieldRule {
    pub(crate) key: &'static str,
    pub(crate) kind: FieldKind,
    pub(crate) required: bool,
}

const fn req(key: &'static str, kind: FieldKind) -> FieldRule {
    FieldRule {
        key,
        kind,
        required: true,
    }
}

const fn opt(key: &'static str, kind: FieldKind) -> FieldRule {
    FieldRule {
        key,
        kind,
        required: false,
    }
}

/// A tagged union: the `type` discriminator selects one of `variants`.
#[derive(Debug)]
pub(crate) struct Family {
    pub(crate) name: &'static str,
    pub(crate) variants: &'static [(&'static str, &'static [FieldRule])],
}

impl Family {
    pub(crate) fn variant(&self, name: &str) -> Option<&'static [FieldRule]> {
        self.variants
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, rules)| *rules)
    }
}

use FieldKind as K;

pub(crate) const SCENE: &[FieldRule] = &[
    req("world", K::Geometry),
    req("camera", K::Camera),
    req("background", K::Color),
    req("renderConfig", K::RenderConfig),
];

pub(crate) const CAMERA: &[FieldRule] = &[
    req("imageWidth", K::UnsignedInteger),
    req("imageHeight", K::UnsignedInteger),
    req("verticalFovDegrees", K::Number),
    req("apertureSize", K::Number),
    req("focusDistance", K::Number),
    req("lookFrom", K::Vec3),
    req("lookAt", K::Vec3),
    req("vup", K::Vec3),
];

pub(crate) const RENDER_CONFIG: &[FieldRule] = &[
    req("imageWidth", K::UnsignedInteger),
    req("imageHeight", K::UnsignedInteger),
    req("samplesPerPixel", K::UnsignedInteger),
    req("shader", K::Shader),
    opt("postProcessor", K::PostProcessor),
];

pub(crate) const VEC3: &[FieldRule] = &[
    req("x", K::Number),
    req("y", K::Number),
    req("z", K::Number),
];

pub(crate) const RGB: &[FieldRule] = &[
    req("r", K::Number),
    req("g", K::Number),
    req("b", K::Number),
];

pub(crate) static GEOMETRY: Family = Family {
    name: "geometry",
    variants: &[
        ("bvh", &[req("list", K::GeometryList)]),
        ("hittableList", &[req("list", K::GeometryList)]),
        (
            "constantMedium",
            &[
                req("boundary", K::Geometry),
                req("density", K::Number),
                req("texture", K::Texture),
            ],
        ),
        (
            "motionBlur",
            &[req("object", K::Geometry), req("blurDirection", K::Vec3)],
        ),
        (
            "quad",
            &[
                req("corner", K::Vec3),
                req("dirU", K::Vec3),
                req("dirV", K::Vec3),
                req("mat", K::Material),
            ],
        ),
        (
            "box",
            &[
                req("corner", K::Vec3),
                req("diagonalCorner", K::Vec3),
                req("mat", K::Material),
            ],
        ),
        (
            "rotationY",
            &[req("object", K::Geometry), req("angle", K::Number)],
        ),
        (
            "sphere",
            &[
                req("center", K::Vec3),
                req("radius", K::Number),
                req("mat", K::Material),
            ],
        ),
        (
            "triangle",
            &[
                req("v0", K::Vec3),
                req("v1", K::Vec3),
                req("v2", K::Vec3),
                req("mat", K::Material),
            ],
        ),
        (
            "translation",
            &[req("object", K::Geometry), req("offset", K::Vec3)],
        ),
        (
            "objModel",
            &[req("path", K::String), opt("mat", K::Material)],
        ),
    ],
};

pub(crate) static TEXTURE: Family = Family {
    name: "texture",
    variants: &[
        ("solidColor", &[req("color", K::Color)]),
        (
            "checker",
            &[
                req("scale", K::Number),
                req("even", K::Texture),
                req("odd", K::Texture),
            ],
        ),
        ("image", &[req("path", K::String), req("mirror", K::Bool)]),
        ("noise", &[req("color", K::Color), req("scale", K::Number)]),
    ],
};

pub(crate) static MATERIAL: Family = Family {
    name: "material",
    variants: &[
        ("lambertian", &[req("texture", K::Texture)]),
        (
            "metal",
            &[req("texture", K::Texture), req("fuzz", K::Number)],
        ),
        (
            "dielectric",
            &[
                req("texture", K::Texture),
                req("indexOfRefraction", K::Number),
            ],
        ),
        ("diffuseLight", &[req("texture", K::Texture)]),
        ("isotropic", &[req("texture", K::Texture)]),
    ],
};

pub(crate) static SHADER: Family = Family {
    name: "shader",
    variants: &[
        ("pathTracing", &[req("maxDepth", K::UnsignedInteger)]),
        ("albedo", &[]),
        ("normal", &[]),
        ("simple", &[]),
    ],
};

pub(crate) static POST_PROCESSOR: Family = Family {
    name: "postProcessor",
    variants: &[("oidn", &[req("oidnDenoiseExecutablePath", K::String)])],
};

#[cfg(test)]
#[path = "../../tests/unit/schema/grammar.rs"]
mod tests;
