//! OBJ file loader for 3D models
//!
//! Loads positions, texture coordinates, and normals into an indexed
//! [`Mesh`], deduplicating by the full position/texcoord/normal index
//! triple so shared corners are emitted once. Runs at scene-load time only.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::render::mesh::{Mesh, Vertex};

/// OBJ loading errors
#[derive(Error, Debug)]
pub enum ObjError {
    /// Underlying IO failure while reading the file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A numeric field failed to parse
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Structurally invalid data, e.g. an out-of-range index
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Index triple referencing position/texcoord/normal, used for vertex
/// deduplication
type FaceKey = (usize, Option<usize>, Option<usize>);

/// Static OBJ loading entry points
pub struct ObjLoader;

impl ObjLoader {
    /// Load an OBJ file and return a mesh.
    ///
    /// A missing file is tolerated: the loader logs a warning and returns an
    /// empty mesh, letting the scene come up without the asset. Malformed
    /// content inside an existing file is an error.
    pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh, ObjError> {
        let path = path.as_ref();
        if !path.exists() {
            log::warn!("model {} not found, using empty mesh", path.display());
            return Ok(Mesh::default());
        }

        let file = File::open(path)?;
        Self::parse(BufReader::new(file))
    }

    /// Parse OBJ content from any buffered reader
    pub fn parse<R: BufRead>(reader: R) -> Result<Mesh, ObjError> {
        let mut positions: Vec<[f32; 3]> = Vec::new();
        let mut normals: Vec<[f32; 3]> = Vec::new();
        let mut tex_coords: Vec<[f32; 2]> = Vec::new();

        let mut vertices: Vec<Vertex> = Vec::new();
        let mut indices: Vec<u32> = Vec::new();
        let mut unique: HashMap<FaceKey, u32> = HashMap::new();

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts[0] {
                "v" if parts.len() >= 4 => {
                    positions.push(Self::parse_vec3(&parts[1..4], "vertex")?);
                }
                "vn" if parts.len() >= 4 => {
                    normals.push(Self::parse_vec3(&parts[1..4], "normal")?);
                }
                "vt" if parts.len() >= 3 => {
                    let u = Self::parse_float(parts[1], "tex coord u")?;
                    let v = Self::parse_float(parts[2], "tex coord v")?;
                    tex_coords.push([u, v]);
                }
                "f" if parts.len() >= 4 => {
                    let mut face: Vec<u32> = Vec::with_capacity(parts.len() - 1);
                    for corner in &parts[1..] {
                        let key = Self::parse_face_corner(corner)?;
                        let index = match unique.get(&key) {
                            Some(&existing) => existing,
                            None => {
                                let (pos_idx, tex_idx, normal_idx) = key;
                                let position =
                                    *positions.get(pos_idx).ok_or_else(|| {
                                        ObjError::InvalidFormat(
                                            "position index out of bounds".to_string(),
                                        )
                                    })?;
                                let tex_coord = tex_idx
                                    .and_then(|i| tex_coords.get(i).copied())
                                    .unwrap_or([0.0, 0.0]);
                                let normal = normal_idx
                                    .and_then(|i| normals.get(i).copied())
                                    .unwrap_or([0.0, 0.0, 1.0]);

                                let index = vertices.len() as u32;
                                vertices.push(Vertex::new(position, normal, tex_coord));
                                unique.insert(key, index);
                                index
                            }
                        };
                        face.push(index);
                    }

                    // Fan-triangulate polygons with more than three corners
                    for i in 1..face.len() - 1 {
                        indices.extend_from_slice(&[face[0], face[i], face[i + 1]]);
                    }
                }
                _ => {}
            }
        }

        log::debug!(
            "parsed OBJ: {} vertices, {} triangles",
            vertices.len(),
            indices.len() / 3
        );
        Ok(Mesh::new(vertices, indices))
    }

    fn parse_float(text: &str, what: &str) -> Result<f32, ObjError> {
        text.parse()
            .map_err(|_| ObjError::ParseError(format!("invalid {what}: {text}")))
    }

    fn parse_vec3(parts: &[&str], what: &str) -> Result<[f32; 3], ObjError> {
        Ok([
            Self::parse_float(parts[0], what)?,
            Self::parse_float(parts[1], what)?,
            Self::parse_float(parts[2], what)?,
        ])
    }

    /// Parse one `pos[/tex[/normal]]` face corner into 0-based indices
    fn parse_face_corner(corner: &str) -> Result<FaceKey, ObjError> {
        let mut fields = corner.split('/');

        let pos = fields
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ObjError::ParseError(format!("empty face corner: {corner}")))?;
        let pos_idx: usize = pos
            .parse::<usize>()
            .map_err(|_| ObjError::ParseError(format!("invalid position index: {pos}")))?
            .checked_sub(1)
            .ok_or_else(|| ObjError::InvalidFormat("face index must be 1-based".to_string()))?;

        let tex_idx = Self::parse_optional_index(fields.next(), "texcoord")?;
        let normal_idx = Self::parse_optional_index(fields.next(), "normal")?;

        Ok((pos_idx, tex_idx, normal_idx))
    }

    fn parse_optional_index(field: Option<&str>, what: &str) -> Result<Option<usize>, ObjError> {
        field
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<usize>()
                    .map_err(|_| ObjError::ParseError(format!("invalid {what} index: {s}")))?
                    .checked_sub(1)
                    .ok_or_else(|| {
                        ObjError::InvalidFormat("face index must be 1-based".to_string())
                    })
            })
            .transpose()
    }
}
