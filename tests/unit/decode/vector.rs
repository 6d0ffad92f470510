use serde_json::json;

use super::*;
use crate::foundation::core::ValueKind;
use crate::foundation::error::SceneError;

fn node(v: &serde_json::Value) -> Fields<'_> {
    Fields::of("test", "node", v).unwrap()
}

#[test]
fn vec3_reads_xyz() {
    let v = json!({"x": 1, "y": -2.5, "z": 1e3});
    assert_eq!(decode_vec3(node(&v)).unwrap(), Vec3::new(1.0, -2.5, 1000.0));
}

#[test]
fn vec3_first_missing_component_wins() {
    let v = json!({"z": 1});
    let err = decode_vec3(node(&v)).unwrap_err();
    assert!(matches!(
        err,
        SceneError::MissingField {
            context: "vec",
            key: "x"
        }
    ));

    let v = json!({"x": 0, "y": "up", "z": 1});
    let err = decode_vec3(node(&v)).unwrap_err();
    assert!(matches!(
        err,
        SceneError::TypeMismatch {
            context: "vec",
            key: "y",
            expected: ValueKind::Number
        }
    ));
}

#[test]
fn color_accepts_rgb_and_xyz() {
    let rgb = json!({"r": 0.1, "g": 0.2, "b": 0.3});
    assert_eq!(decode_color(node(&rgb)).unwrap(), Vec3::new(0.1, 0.2, 0.3));

    let xyz = json!({"x": 0.4, "y": 0.5, "z": 0.6});
    assert_eq!(decode_color(node(&xyz)).unwrap(), Vec3::new(0.4, 0.5, 0.6));
}

#[test]
fn color_errors_use_color_context() {
    let v = json!({"r": 1, "g": 1});
    assert!(matches!(
        decode_color(node(&v)).unwrap_err(),
        SceneError::MissingField {
            context: "color",
            key: "b"
        }
    ));
}

#[test]
fn field_helpers_keep_parent_context_for_the_field_itself() {
    let v = json!({"center": 5});
    assert!(matches!(
        node(&v).vec3("center").unwrap_err(),
        SceneError::TypeMismatch {
            context: "test",
            key: "center",
            expected: ValueKind::Object
        }
    ));
    assert!(matches!(
        node(&v).color("background").unwrap_err(),
        SceneError::MissingField {
            context: "test",
            key: "background"
        }
    ));
}
