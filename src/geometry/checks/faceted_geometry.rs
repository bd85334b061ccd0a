//! Fully faceted object detection.
//!
//! Every face corner gets a shading normal: the face normal for flat faces,
//! the averaged vertex normal for smooth ones. A vertex is hard when its
//! corner normals disagree. An object is fully faceted when all of its
//! vertices are hard, which usually means smoothing was never applied.

use std::collections::HashMap;

use serde_json::json;

use crate::engine::{
    downcast_data, Check, CheckData, CheckDescriptor, Details, Outcome, Parameters, Severity,
};
use crate::geometry::scene::{add, dot, newell, normalized, MeshObject, Scene, Vec3};

/// Allowed deviation of `dot(n, m)` from 1 for normals to count as equal.
const NORMAL_TOLERANCE: f64 = 1e-4;

/// Reports objects whose every vertex is hard.
pub struct FacetedGeometryCheck;

impl FacetedGeometryCheck {
    pub const NAME: &'static str = "facetedGeometry";

    pub fn descriptor() -> CheckDescriptor {
        CheckDescriptor::new(Self::NAME, Self)
            .with_title("Check faceted objects")
            .with_description("Check if objects are fully faceted")
            .with_message("Fully faceted objects")
            .with_item_message("Object \"{item}\" is fully faceted")
            .with_version("0.2.1")
            .with_severity(Severity::Warning)
    }
}

fn is_fully_faceted(mesh: &MeshObject) -> anyhow::Result<bool> {
    // A vertex-less object has nothing to shade. It is never reported, even
    // though "all of its zero vertices are hard" would hold vacuously.
    if mesh.vertices.is_empty() {
        return Ok(false);
    }

    let face_normals = mesh
        .faces
        .iter()
        .map(|face| Ok(normalized(newell(&mesh.corners(face)?))))
        .collect::<anyhow::Result<Vec<Vec3>>>()?;

    let mut vertex_normals = vec![[0.0; 3]; mesh.vertices.len()];
    for (face, normal) in mesh.faces.iter().zip(&face_normals) {
        for &v in &face.vertices {
            vertex_normals[v] = add(vertex_normals[v], *normal);
        }
    }

    let mut corner_normals: HashMap<usize, Vec<Vec3>> = HashMap::new();
    for (face, normal) in mesh.faces.iter().zip(&face_normals) {
        for &v in &face.vertices {
            let shading = if face.smooth {
                normalized(vertex_normals[v])
            } else {
                *normal
            };
            corner_normals.entry(v).or_default().push(shading);
        }
    }

    let hard_vertices = corner_normals
        .values()
        .filter(|normals| {
            normals
                .iter()
                .any(|n| (dot(*n, normals[0]) - 1.0).abs() > NORMAL_TOLERANCE)
        })
        .count();

    Ok(hard_vertices == mesh.vertices.len())
}

impl Check for FacetedGeometryCheck {
    fn evaluate(&self, data: &CheckData, _params: &Parameters) -> anyhow::Result<Outcome> {
        let scene = downcast_data::<Scene>(data)?;

        let mut details = Details::new();
        for mesh in &scene.objects {
            if is_fully_faceted(mesh)? {
                details.insert(mesh.name.clone(), json!("fully faceted"));
            }
        }
        Ok(Outcome::from_details(details))
    }
}
