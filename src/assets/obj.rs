use std::{collections::HashMap, path::Path};

use anyhow::{Context, bail};

use crate::foundation::core::Vec3;
use crate::scene::model::{Geometry, Material, Texture};

/// Collaborator that turns a model file into a ready-made geometry node.
pub trait ModelLoader {
    /// Load the model at `path`.
    ///
    /// When `default_material` is given it overrides every face; otherwise the loader supplies
    /// its own per-face materials.
    fn load_model(
        &self,
        path: &Path,
        default_material: Option<Material>,
    ) -> anyhow::Result<Geometry>;
}

/// Wavefront OBJ loader.
///
/// Reads `v` and `f` records (polygons are fan-triangulated) and diffuse `Kd` colors from
/// `mtllib` files. Faces become triangles collected in a `bvh`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ObjModelLoader;

const FALLBACK_ALBEDO: f64 = 0.8;

impl ModelLoader for ObjModelLoader {
    fn load_model(
        &self,
        path: &Path,
        default_material: Option<Material>,
    ) -> anyhow::Result<Geometry> {
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("read obj file '{}'", path.display()))?;
        let dir = path.parent().unwrap_or_else(|| Path::new(""));

        let mut vertices = Vec::<Vec3>::new();
        let mut library = HashMap::<String, Material>::new();
        let mut current = fallback_material();
        let mut triangles = Vec::new();

        for (idx, raw) in src.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.split('#').next().unwrap_or("").trim();
            let mut parts = line.split_whitespace();
            let Some(tag) = parts.next() else {
                continue;
            };

            match tag {
                "v" => {
                    let v = parse_vec3(&mut parts)
                        .with_context(|| format!("{}:{line_no}: bad vertex", path.display()))?;
                    vertices.push(v);
                }
                "f" => {
                    let corners = parts
                        .map(|tok| resolve_index(tok, vertices.len()))
                        .collect::<anyhow::Result<Vec<_>>>()
                        .with_context(|| format!("{}:{line_no}: bad face", path.display()))?;
                    if corners.len() < 3 {
                        bail!("{}:{line_no}: face needs at least 3 vertices", path.display());
                    }
                    let mat = default_material.as_ref().unwrap_or(&current);
                    for i in 1..corners.len() - 1 {
                        triangles.push(Geometry::Triangle {
                            v0: vertices[corners[0]],
                            v1: vertices[corners[i]],
                            v2: vertices[corners[i + 1]],
                            mat: mat.clone(),
                        });
                    }
                }
                "mtllib" => {
                    for name in parts {
                        let mtl_path = dir.join(name);
                        let mtl = std::fs::read_to_string(&mtl_path).with_context(|| {
                            format!("read mtl file '{}'", mtl_path.display())
                        })?;
                        library.extend(parse_mtl(&mtl).with_context(|| {
                            format!("parse mtl file '{}'", mtl_path.display())
                        })?);
                    }
                }
                "usemtl" => {
                    let name = parts.next().unwrap_or("");
                    current = match library.get(name) {
                        Some(m) => m.clone(),
                        None => {
                            tracing::warn!(
                                material = name,
                                path = %path.display(),
                                "unknown obj material, using fallback"
                            );
                            fallback_material()
                        }
                    };
                }
                _ => {}
            }
        }

        if triangles.is_empty() {
            bail!("obj file '{}' contains no faces", path.display());
        }
        tracing::debug!(path = %path.display(), triangles = triangles.len(), "obj model loaded");
        Ok(Geometry::Bvh(triangles))
    }
}

fn fallback_material() -> Material {
    lambertian(Vec3::splat(FALLBACK_ALBEDO))
}

fn lambertian(color: Vec3) -> Material {
    Material::Lambertian {
        texture: Texture::SolidColor { color },
    }
}

fn parse_vec3<'s>(parts: &mut impl Iterator<Item = &'s str>) -> anyhow::Result<Vec3> {
    let mut c = [0.0f64; 3];
    for slot in &mut c {
        let tok = parts.next().context("expected 3 components")?;
        *slot = tok
            .parse()
            .with_context(|| format!("invalid number '{tok}'"))?;
    }
    Ok(Vec3::from(c))
}

/// Map an OBJ face token (`i`, `i/t`, `i//n`, `i/t/n`, negative = relative) to a 0-based index.
fn resolve_index(token: &str, count: usize) -> anyhow::Result<usize> {
    let head = token.split('/').next().unwrap_or("");
    let raw: i64 = head
        .parse()
        .with_context(|| format!("invalid vertex index '{token}'"))?;
    let resolved = match raw {
        0 => None,
        r if r > 0 => usize::try_from(r - 1).ok(),
        r => usize::try_from(count as i64 + r).ok(),
    };
    match resolved {
        Some(i) if i < count => Ok(i),
        _ => bail!("vertex index {raw} out of range ({count} vertices)"),
    }
}

fn parse_mtl(src: &str) -> anyhow::Result<HashMap<String, Material>> {
    let mut out = HashMap::new();
    let mut name: Option<String> = None;
    for (idx, raw) in src.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("newmtl") => {
                let n = parts.next().unwrap_or("").to_owned();
                out.insert(n.clone(), fallback_material());
                name = Some(n);
            }
            Some("Kd") => {
                let color = parse_vec3(&mut parts)
                    .with_context(|| format!("line {}: bad Kd", idx + 1))?;
                if let Some(n) = &name {
                    out.insert(n.clone(), lambertian(color));
                }
            }
            _ => {}
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/obj.rs"]
mod tests;
