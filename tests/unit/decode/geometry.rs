use std::cell::RefCell;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};

use super::*;
use crate::assets::cache::ImageCache;
use crate::assets::obj::ModelLoader;
use crate::decode::scene::DecodeOpts;
use crate::foundation::core::Vec3;
use crate::scene::model::Material;

fn decode_with(opts: &DecodeOpts, v: &Value) -> SceneResult<Geometry> {
    let images = ImageCache::new();
    SceneDecoder::new(&images)
        .with_opts(opts)
        .decode_geometry(Fields::of("test", "world", v)?)
}

fn decode(v: &Value) -> SceneResult<Geometry> {
    decode_with(&DecodeOpts::default(), v)
}

fn v3(x: f64, y: f64, z: f64) -> Value {
    json!({"x": x, "y": y, "z": z})
}

fn lambertian() -> Value {
    json!({"type": "lambertian", "texture": {"type": "solidColor", "color": {"r": 1, "g": 1, "b": 1}}})
}

fn sphere() -> Value {
    json!({"type": "sphere", "center": v3(0.0, 0.0, -1.0), "radius": 0.5, "mat": lambertian()})
}

#[test]
fn leaf_variants_decode() {
    let Geometry::Sphere { center, radius, .. } = decode(&sphere()).unwrap() else {
        panic!("expected sphere");
    };
    assert_eq!(center, Vec3::new(0.0, 0.0, -1.0));
    assert_eq!(radius, 0.5);

    let quad = json!({"type": "quad", "corner": v3(0.0, 0.0, 0.0), "dirU": v3(1.0, 0.0, 0.0), "dirV": v3(0.0, 1.0, 0.0), "mat": lambertian()});
    assert_eq!(decode(&quad).unwrap().kind(), "quad");

    let bx = json!({"type": "box", "corner": v3(0.0, 0.0, 0.0), "diagonalCorner": v3(1.0, 1.0, 1.0), "mat": lambertian()});
    assert_eq!(decode(&bx).unwrap().kind(), "box");

    let tri = json!({"type": "triangle", "v0": v3(0.0, 0.0, 0.0), "v1": v3(1.0, 0.0, 0.0), "v2": v3(0.0, 1.0, 0.0), "mat": lambertian()});
    assert_eq!(decode(&tri).unwrap().kind(), "triangle");
}

#[test]
fn wrapper_variants_decode_inner_geometry() {
    let cases = [
        json!({"type": "translation", "object": sphere(), "offset": v3(1.0, 2.0, 3.0)}),
        json!({"type": "rotationY", "object": sphere(), "angle": 45}),
        json!({"type": "motionBlur", "object": sphere(), "blurDirection": v3(0.0, 1.0, 0.0)}),
        json!({"type": "constantMedium", "boundary": sphere(), "density": 0.01,
               "texture": {"type": "solidColor", "color": {"r": 1, "g": 1, "b": 1}}}),
    ];
    for case in &cases {
        let g = decode(case).unwrap();
        let inner = match &g {
            Geometry::Translation { object, .. }
            | Geometry::RotationY { object, .. }
            | Geometry::MotionBlur { object, .. } => object,
            Geometry::ConstantMedium { boundary, .. } => boundary,
            other => panic!("unexpected {}", other.kind()),
        };
        assert_eq!(inner.kind(), "sphere");
    }
}

#[test]
fn wrapped_geometry_is_decoded_before_own_fields() {
    let v = json!({"type": "rotationY", "object": {"type": "sphere"}});
    assert!(matches!(
        decode(&v).unwrap_err(),
        SceneError::MissingField {
            context: "sphere",
            key: "center"
        }
    ));
}

#[test]
fn containers_keep_order_and_reject_empty_lists() {
    let v = json!({"type": "hittableList", "list": [
        sphere(),
        {"type": "translation", "object": sphere(), "offset": v3(0.0, 0.0, 0.0)}
    ]});
    let Geometry::HittableList(list) = decode(&v).unwrap() else {
        panic!("expected hittable list");
    };
    assert_eq!(
        list.iter().map(Geometry::kind).collect::<Vec<_>>(),
        ["sphere", "translation"]
    );

    let one = json!({"type": "bvh", "list": [sphere()]});
    assert!(matches!(decode(&one).unwrap(), Geometry::Bvh(l) if l.len() == 1));

    for kind in ["bvh", "hittableList"] {
        let err = decode(&json!({"type": kind, "list": []})).unwrap_err();
        assert!(matches!(err, SceneError::EmptyList { context } if context == kind));
    }
}

#[test]
fn malformed_child_fails_with_child_error() {
    let v = json!({"type": "bvh", "list": [sphere(), {"type": "sphere", "center": v3(0.0, 0.0, 0.0)}]});
    assert!(matches!(
        decode(&v).unwrap_err(),
        SceneError::MissingField {
            context: "sphere",
            key: "radius"
        }
    ));

    let v = json!({"type": "bvh", "list": [42]});
    assert!(matches!(
        decode(&v).unwrap_err(),
        SceneError::TypeMismatch {
            context: "bvh",
            key: "list",
            ..
        }
    ));
}

#[test]
fn unknown_geometry_rejected_by_default() {
    let v = json!({"type": "cylinder", "object": sphere(), "offset": v3(0.0, 0.0, 0.0)});
    let err = decode(&v).unwrap_err();
    assert_eq!(err.to_string(), "geometry: unknown type \"cylinder\"");
}

#[test]
fn unknown_geometry_can_fall_back_to_translation() {
    let opts = DecodeOpts {
        unknown_geometry: UnknownGeometryPolicy::FallbackToTranslation,
        ..DecodeOpts::default()
    };
    let v = json!({"type": "cylinder", "object": sphere(), "offset": v3(1.0, 0.0, 0.0)});
    let Geometry::Translation { offset, .. } = decode_with(&opts, &v).unwrap() else {
        panic!("expected translation");
    };
    assert_eq!(offset, Vec3::new(1.0, 0.0, 0.0));

    let err = decode_with(&opts, &json!({"type": "cylinder"})).unwrap_err();
    assert!(matches!(
        err,
        SceneError::MissingField {
            context: "translation",
            key: "object"
        }
    ));
}

#[derive(Default)]
struct RecordingLoader {
    calls: RefCell<Vec<(PathBuf, Option<Material>)>>,
    fail: bool,
}

impl ModelLoader for RecordingLoader {
    fn load_model(
        &self,
        path: &Path,
        default_material: Option<Material>,
    ) -> anyhow::Result<Geometry> {
        self.calls
            .borrow_mut()
            .push((path.to_path_buf(), default_material.clone()));
        if self.fail {
            anyhow::bail!("cannot open {}", path.display());
        }
        Ok(Geometry::Sphere {
            center: Vec3::default(),
            radius: 1.0,
            mat: default_material.unwrap_or(Material::Isotropic {
                texture: crate::scene::model::Texture::SolidColor {
                    color: Vec3::splat(1.0),
                },
            }),
        })
    }
}

#[test]
fn obj_model_delegates_to_loader_with_optional_material() {
    let images = ImageCache::new();
    let opts = DecodeOpts {
        asset_root: Some(PathBuf::from("assets")),
        ..DecodeOpts::default()
    };
    let loader = RecordingLoader::default();
    let decoder = SceneDecoder::new(&images)
        .with_opts(&opts)
        .with_model_loader(&loader);

    let with_mat = json!({"type": "objModel", "path": "teapot.obj", "mat": lambertian()});
    let without = json!({"type": "objModel", "path": "teapot.obj"});
    decoder
        .decode_geometry(Fields::of("test", "world", &with_mat).unwrap())
        .unwrap();
    decoder
        .decode_geometry(Fields::of("test", "world", &without).unwrap())
        .unwrap();

    let calls = loader.calls.borrow();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, Path::new("assets").join("teapot.obj"));
    assert_eq!(calls[0].1.as_ref().map(Material::kind), Some("lambertian"));
    assert!(calls[1].1.is_none());
}

#[test]
fn obj_model_loader_failure_is_tagged() {
    let images = ImageCache::new();
    let loader = RecordingLoader {
        fail: true,
        ..RecordingLoader::default()
    };
    let decoder = SceneDecoder::new(&images).with_model_loader(&loader);
    let v = json!({"type": "objModel", "path": "missing.obj"});
    let err = decoder
        .decode_geometry(Fields::of("test", "world", &v).unwrap())
        .unwrap_err();
    assert!(matches!(err, SceneError::Collaborator { context: "objModel", .. }));
    assert_eq!(err.to_string(), "objModel: cannot open missing.obj");
}

#[test]
fn obj_model_bad_material_fails_before_loading() {
    let images = ImageCache::new();
    let loader = RecordingLoader::default();
    let decoder = SceneDecoder::new(&images).with_model_loader(&loader);
    let v = json!({"type": "objModel", "path": "x.obj", "mat": {"type": "chrome"}});
    assert!(
        decoder
            .decode_geometry(Fields::of("test", "world", &v).unwrap())
            .is_err()
    );
    assert!(loader.calls.borrow().is_empty());
}
