use serde_json::{Map, Value, json};

use super::*;
use crate::assets::cache::ImageCache;
use crate::decode::access::Fields;
use crate::decode::camera::decode_camera;
use crate::decode::render::{decode_post_processor, decode_render_config, decode_shader};
use crate::decode::scene::SceneDecoder;
use crate::foundation::error::{SceneError, SceneResult};

fn sample(kind: FieldKind) -> Value {
    match kind {
        FieldKind::Number => json!(1.5),
        FieldKind::UnsignedInteger => json!(4),
        FieldKind::String => json!("x"),
        FieldKind::Bool => json!(true),
        FieldKind::Vec3 => json!({"x": 0, "y": 1, "z": 0}),
        FieldKind::Color => json!({"r": 0.5, "g": 0.5, "b": 0.5}),
        FieldKind::Geometry => sample_variant(&GEOMETRY, "sphere"),
        FieldKind::GeometryList => json!([sample_variant(&GEOMETRY, "sphere")]),
        FieldKind::Texture => sample_variant(&TEXTURE, "solidColor"),
        FieldKind::Material => sample_variant(&MATERIAL, "lambertian"),
        FieldKind::Shader => sample_variant(&SHADER, "albedo"),
        FieldKind::PostProcessor => sample_variant(&POST_PROCESSOR, "oidn"),
        FieldKind::Camera => Value::Object(sample_object(CAMERA)),
        FieldKind::RenderConfig => Value::Object(sample_object(RENDER_CONFIG)),
    }
}

fn sample_object(rules: &[FieldRule]) -> Map<String, Value> {
    rules
        .iter()
        .map(|r| (r.key.to_owned(), sample(r.kind)))
        .collect()
}

fn sample_variant(family: &Family, name: &str) -> Value {
    let rules = family.variant(name).unwrap();
    let mut map = sample_object(rules);
    map.insert("type".to_owned(), json!(name));
    Value::Object(map)
}

fn decode_as(family: &Family, value: &Value) -> SceneResult<()> {
    let images = ImageCache::new();
    let decoder = SceneDecoder::new(&images);
    let node = Fields::of("test", "node", value)?;
    match family.name {
        "geometry" => decoder.decode_geometry(node).map(drop),
        "texture" => decoder.decode_texture(node).map(drop),
        "material" => decoder.decode_material(node).map(drop),
        "shader" => decode_shader(node).map(drop),
        "postProcessor" => decode_post_processor(node).map(drop),
        other => panic!("no decoder for family {other}"),
    }
}

fn families() -> [&'static Family; 5] {
    [&GEOMETRY, &TEXTURE, &MATERIAL, &SHADER, &POST_PROCESSOR]
}

#[test]
fn every_variant_in_the_grammar_is_decodable() {
    for family in families() {
        for (name, _) in family.variants {
            // These two reach the filesystem.
            if matches!(*name, "image" | "objModel") {
                continue;
            }
            let value = sample_variant(family, name);
            if let Err(e) = decode_as(family, &value) {
                panic!("{}/{name}: {e}", family.name);
            }
        }
    }
}

#[test]
fn every_required_field_is_required_by_the_decoder() {
    for family in families() {
        for (name, rules) in family.variants {
            for rule in rules.iter().filter(|r| r.required) {
                let mut value = sample_variant(family, name);
                value.as_object_mut().unwrap().remove(rule.key);
                match decode_as(family, &value) {
                    Err(SceneError::MissingField { context, key }) => {
                        assert_eq!((context, key), (*name, rule.key), "{}/{name}", family.name);
                    }
                    other => panic!("{}/{name} without {}: {other:?}", family.name, rule.key),
                }
            }
        }
    }
}

#[test]
fn optional_fields_may_be_absent() {
    for family in families() {
        for (name, rules) in family.variants {
            if matches!(*name, "image" | "objModel") {
                continue;
            }
            let mut value = sample_variant(family, name);
            for rule in rules.iter().filter(|r| !r.required) {
                value.as_object_mut().unwrap().remove(rule.key);
            }
            assert!(decode_as(family, &value).is_ok(), "{}/{name}", family.name);
        }
    }

    let mut rc = sample_object(RENDER_CONFIG);
    rc.remove("postProcessor");
    let rc = Value::Object(rc);
    assert!(decode_render_config(Fields::of("test", "renderConfig", &rc).unwrap()).is_ok());
}

#[test]
fn section_rules_match_decoders() {
    for rule in CAMERA {
        let mut cam = sample_object(CAMERA);
        cam.remove(rule.key);
        let cam = Value::Object(cam);
        let err = decode_camera(Fields::of("test", "camera", &cam).unwrap()).unwrap_err();
        assert!(
            matches!(err, SceneError::MissingField { context: "camera", key } if key == rule.key),
            "{err}"
        );
    }

    for rule in RENDER_CONFIG.iter().filter(|r| r.required) {
        let mut rc = sample_object(RENDER_CONFIG);
        rc.remove(rule.key);
        let rc = Value::Object(rc);
        let err =
            decode_render_config(Fields::of("test", "renderConfig", &rc).unwrap()).unwrap_err();
        assert!(
            matches!(
                err,
                SceneError::MissingField { context: "renderConfig", key } if key == rule.key
            ),
            "{err}"
        );
    }
}

#[test]
fn variant_lookup() {
    assert!(GEOMETRY.variant("sphere").is_some());
    assert!(GEOMETRY.variant("Sphere").is_none());
    assert_eq!(SHADER.variant("albedo").map(<[FieldRule]>::len), Some(0));
    assert!(SCENE.iter().all(|r| r.required));
}
