use std::fmt;

use serde_json::{Map, Value};

use crate::decode::scene::UnknownGeometryPolicy;
use crate::foundation::core::ValueKind;
use crate::schema::grammar::{self, Family, FieldKind, FieldRule};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SchemaPathElem {
    Field(&'static str),
    Index(usize),
}

/// What is wrong at a given path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A required field is absent.
    Required,
    /// The value has the wrong kind.
    WrongKind(ValueKind),
    /// A `type` discriminator names no known variant.
    UnknownVariant(String),
    /// A geometry list is empty.
    Empty,
}

/// One structural violation.
#[derive(Debug, Clone)]
pub struct SchemaError {
    path: Vec<SchemaPathElem>,
    violation: Violation,
}

impl SchemaError {
    fn at(path: &[SchemaPathElem], violation: Violation) -> Self {
        Self {
            path: path.to_vec(),
            violation,
        }
    }

    /// JSON path of the offending value, e.g. `$.world.list[0].mat`.
    pub fn path(&self) -> String {
        format_path(&self.path)
    }

    /// Violation found at [`SchemaError::path`].
    pub fn violation(&self) -> &Violation {
        &self.violation
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = format_path(&self.path);
        match &self.violation {
            Violation::Required => write!(f, "{path} is required"),
            Violation::WrongKind(kind) => write!(f, "{path} must be {kind}"),
            Violation::UnknownVariant(v) => write!(f, "{path} has unknown value \"{v}\""),
            Violation::Empty => write!(f, "{path} must not be empty"),
        }
    }
}

fn format_path(path: &[SchemaPathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match *p {
            SchemaPathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            SchemaPathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

/// Every structural violation found in a document, in document order.
#[derive(Debug, Clone)]
pub struct SchemaErrors {
    errors: Vec<SchemaError>,
}

impl SchemaErrors {
    /// The individual violations.
    pub fn errors(&self) -> &[SchemaError] {
        &self.errors
    }
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

/// Check a whole document against the scene grammar without decoding it.
///
/// Unlike the semantic decoder this does not stop at the first problem: every violation is
/// collected. No files are touched. With [`UnknownGeometryPolicy::FallbackToTranslation`],
/// unknown geometry types are checked against the `translation` rule.
pub fn validate_document(
    root: &Value,
    unknown_geometry: UnknownGeometryPolicy,
) -> Result<(), SchemaErrors> {
    let mut v = Validator {
        unknown_geometry,
        path: Vec::new(),
        errors: Vec::new(),
    };
    match root.as_object() {
        Some(map) => v.check_fields(map, grammar::SCENE),
        None => v.push(Violation::WrongKind(ValueKind::Object)),
    }

    if v.errors.is_empty() {
        Ok(())
    } else {
        Err(SchemaErrors { errors: v.errors })
    }
}

struct Validator {
    unknown_geometry: UnknownGeometryPolicy,
    path: Vec<SchemaPathElem>,
    errors: Vec<SchemaError>,
}

impl Validator {
    fn push(&mut self, violation: Violation) {
        self.errors.push(SchemaError::at(&self.path, violation));
    }

    fn check_fields(&mut self, map: &Map<String, Value>, rules: &[FieldRule]) {
        for rule in rules {
            self.path.push(SchemaPathElem::Field(rule.key));
            match map.get(rule.key) {
                None if rule.required => self.push(Violation::Required),
                None | Some(Value::Null) if !rule.required => {}
                Some(value) => self.check_value(value, rule.kind),
                None => {}
            }
            self.path.pop();
        }
    }

    fn check_value(&mut self, value: &Value, kind: FieldKind) {
        match kind {
            FieldKind::Number => {
                if !value.is_number() {
                    self.push(Violation::WrongKind(ValueKind::Number));
                }
            }
            FieldKind::UnsignedInteger => {
                let ok = value.as_u64().is_some_and(|v| u32::try_from(v).is_ok());
                if !ok {
                    self.push(Violation::WrongKind(ValueKind::UnsignedInteger));
                }
            }
            FieldKind::String => {
                if !value.is_string() {
                    self.push(Violation::WrongKind(ValueKind::String));
                }
            }
            FieldKind::Bool => {
                if !value.is_boolean() {
                    self.push(Violation::WrongKind(ValueKind::Bool));
                }
            }
            FieldKind::Vec3 => self.check_object(value, grammar::VEC3),
            FieldKind::Color => match value.as_object() {
                Some(map) if map.contains_key("r") => self.check_fields(map, grammar::RGB),
                Some(map) => self.check_fields(map, grammar::VEC3),
                None => self.push(Violation::WrongKind(ValueKind::Object)),
            },
            FieldKind::Camera => self.check_object(value, grammar::CAMERA),
            FieldKind::RenderConfig => self.check_object(value, grammar::RENDER_CONFIG),
            FieldKind::Geometry => self.check_union(value, &grammar::GEOMETRY),
            FieldKind::Texture => self.check_union(value, &grammar::TEXTURE),
            FieldKind::Material => self.check_union(value, &grammar::MATERIAL),
            FieldKind::Shader => self.check_union(value, &grammar::SHADER),
            FieldKind::PostProcessor => self.check_union(value, &grammar::POST_PROCESSOR),
            FieldKind::GeometryList => match value.as_array() {
                Some(items) if items.is_empty() => self.push(Violation::Empty),
                Some(items) => {
                    for (i, item) in items.iter().enumerate() {
                        self.path.push(SchemaPathElem::Index(i));
                        self.check_union(item, &grammar::GEOMETRY);
                        self.path.pop();
                    }
                }
                None => self.push(Violation::WrongKind(ValueKind::Array)),
            },
        }
    }

    fn check_object(&mut self, value: &Value, rules: &[FieldRule]) {
        match value.as_object() {
            Some(map) => self.check_fields(map, rules),
            None => self.push(Violation::WrongKind(ValueKind::Object)),
        }
    }

    fn check_union(&mut self, value: &Value, family: &Family) {
        let Some(map) = value.as_object() else {
            self.push(Violation::WrongKind(ValueKind::Object));
            return;
        };

        self.path.push(SchemaPathElem::Field("type"));
        let rules = match map.get("type") {
            None => {
                self.push(Violation::Required);
                None
            }
            Some(Value::String(name)) => match family.variant(name) {
                Some(rules) => Some(rules),
                None if family.name == grammar::GEOMETRY.name
                    && self.unknown_geometry == UnknownGeometryPolicy::FallbackToTranslation =>
                {
                    grammar::GEOMETRY.variant("translation")
                }
                None => {
                    self.push(Violation::UnknownVariant(name.clone()));
                    None
                }
            },
            Some(_) => {
                self.push(Violation::WrongKind(ValueKind::String));
                None
            }
        };
        self.path.pop();

        if let Some(rules) = rules {
            self.check_fields(map, rules);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/validate.rs"]
mod tests;
