//! Wavefront OBJ export for generated models.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::mesh::Model;

/// Errors that can occur during OBJ export.
#[derive(Error, Debug)]
pub enum ObjExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Model has no geometries")]
    EmptyModel,
}

/// Exports a model as a Wavefront OBJ file.
///
/// Each geometry becomes its own `o` object. Normals are always written;
/// texture coordinates only when the geometry carries them. OBJ indices are
/// one-based and global across the file, so each geometry's faces are offset
/// by the vertices written before it.
pub fn export_model_obj(model: &Model, path: &Path, name: &str) -> Result<(), ObjExportError> {
    if model.geometries.is_empty() {
        return Err(ObjExportError::EmptyModel);
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let mut vertex_base = 1usize;
    for (slot, geometry) in model.geometries.iter().enumerate() {
        writeln!(writer, "o {name}_{slot}")?;

        let has_uvs = geometry.vertices.iter().all(|v| v.uv.is_some());
        for vertex in &geometry.vertices {
            let p = vertex.position;
            writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
        }
        for vertex in &geometry.vertices {
            let n = vertex.normal;
            writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
        }
        if has_uvs {
            for vertex in &geometry.vertices {
                if let Some(uv) = vertex.uv {
                    writeln!(writer, "vt {} {}", uv.x, uv.y)?;
                }
            }
        }

        for triangle in geometry.indices.chunks_exact(3) {
            let a = vertex_base + triangle[0] as usize;
            let b = vertex_base + triangle[1] as usize;
            let c = vertex_base + triangle[2] as usize;
            if has_uvs {
                writeln!(writer, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
            } else {
                writeln!(writer, "f {a}//{a} {b}//{b} {c}//{c}")?;
            }
        }

        vertex_base += geometry.vertices.len();
    }

    writer.flush()?;
    Ok(())
}
