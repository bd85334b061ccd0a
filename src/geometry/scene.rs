//! Scene model consumed by the geometry checks.
//!
//! A scene is a flat list of mesh objects. Each object owns its vertex
//! positions and polygon faces; faces index into the object's vertices.
//! Scenes are read from YAML or JSON:
//!
//! ```yaml
//! unit_scale: 1.0
//! objects:
//!   - name: Plane
//!     vertices: [[0, 0, 0], [1, 0, 0], [1, 1, 0], [0, 1, 0]]
//!     faces:
//!       - [0, 1, 2, 3]
//!       - { vertices: [0, 2, 3], smooth: true }
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::bail;
use serde::{Deserialize, Serialize};

use crate::error::{AssetCheckError, Result};

/// A point or direction in object space.
pub type Vec3 = [f64; 3];

/// A loaded scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Length of one scene unit in meters.
    #[serde(default = "default_unit_scale")]
    pub unit_scale: f64,

    #[serde(default)]
    pub objects: Vec<MeshObject>,
}

fn default_unit_scale() -> f64 {
    1.0
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            unit_scale: default_unit_scale(),
            objects: Vec::new(),
        }
    }
}

impl Scene {
    pub fn new(objects: Vec<MeshObject>) -> Self {
        Self {
            objects,
            ..Default::default()
        }
    }

    pub fn with_unit_scale(mut self, unit_scale: f64) -> Self {
        self.unit_scale = unit_scale;
        self
    }

    /// Unit scale, rejecting values that would break threshold scaling.
    pub fn checked_unit_scale(&self) -> anyhow::Result<f64> {
        if !(self.unit_scale.is_finite() && self.unit_scale > 0.0) {
            bail!("invalid unit scale {}", self.unit_scale);
        }
        Ok(self.unit_scale)
    }
}

/// A polygon mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshObject {
    pub name: String,

    #[serde(default)]
    pub vertices: Vec<Vec3>,

    #[serde(default)]
    pub faces: Vec<Face>,

    /// Edges not used by any face.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub loose_edges: Vec<[usize; 2]>,
}

impl MeshObject {
    pub fn new(name: impl Into<String>, vertices: Vec<Vec3>, faces: Vec<Face>) -> Self {
        Self {
            name: name.into(),
            vertices,
            faces,
            loose_edges: Vec::new(),
        }
    }

    /// Position of a vertex, failing on an out-of-range index.
    pub fn position(&self, index: usize) -> anyhow::Result<Vec3> {
        match self.vertices.get(index) {
            Some(position) => Ok(*position),
            None => bail!(
                "object '{}' references vertex {} but has only {} vertices",
                self.name,
                index,
                self.vertices.len()
            ),
        }
    }

    /// Corner positions of a face, in winding order.
    pub fn corners(&self, face: &Face) -> anyhow::Result<Vec<Vec3>> {
        face.vertices.iter().map(|&i| self.position(i)).collect()
    }

    /// Unique edges of the mesh as sorted index pairs.
    pub fn edges(&self) -> BTreeSet<(usize, usize)> {
        let mut edges = BTreeSet::new();
        for face in &self.faces {
            let n = face.vertices.len();
            for i in 0..n {
                let (a, b) = (face.vertices[i], face.vertices[(i + 1) % n]);
                edges.insert((a.min(b), a.max(b)));
            }
        }
        for &[a, b] in &self.loose_edges {
            edges.insert((a.min(b), a.max(b)));
        }
        edges
    }

    /// Triangles produced by fan-triangulating every face.
    pub fn triangle_count(&self) -> usize {
        self.faces
            .iter()
            .map(|f| f.vertices.len().saturating_sub(2))
            .sum()
    }
}

/// A polygon referencing vertices of its object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "FaceRepr")]
pub struct Face {
    pub vertices: Vec<usize>,
    /// Smooth-shaded faces share vertex normals with their neighbours.
    #[serde(default)]
    pub smooth: bool,
}

/// Faces may be written as a bare index list (flat shaded) or as a map.
#[derive(Deserialize)]
#[serde(untagged)]
enum FaceRepr {
    Indices(Vec<usize>),
    Full {
        vertices: Vec<usize>,
        #[serde(default)]
        smooth: bool,
    },
}

impl From<FaceRepr> for Face {
    fn from(repr: FaceRepr) -> Self {
        match repr {
            FaceRepr::Indices(vertices) => Face::flat(vertices),
            FaceRepr::Full { vertices, smooth } => Face { vertices, smooth },
        }
    }
}

impl Face {
    pub fn flat(vertices: impl Into<Vec<usize>>) -> Self {
        Self {
            vertices: vertices.into(),
            smooth: false,
        }
    }

    pub fn smooth(vertices: impl Into<Vec<usize>>) -> Self {
        Self {
            vertices: vertices.into(),
            smooth: true,
        }
    }
}

/// Load a scene from a YAML or JSON file.
///
/// Files ending in `.json` are parsed as JSON, everything else as YAML.
pub fn load_scene(path: &Path) -> Result<Scene> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let parsed = if is_json {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(&content).map_err(|e| e.to_string())
    };

    let scene: Scene = parsed.map_err(|message| AssetCheckError::SceneParseError {
        path: path.to_path_buf(),
        message,
    })?;
    tracing::debug!(
        "Loaded scene from {} with {} object(s)",
        path.display(),
        scene.objects.len()
    );
    Ok(scene)
}

pub(crate) fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub(crate) fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

pub(crate) fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub(crate) fn length(a: Vec3) -> f64 {
    dot(a, a).sqrt()
}

/// Unit vector along `a`; the zero vector stays zero.
pub(crate) fn normalized(a: Vec3) -> Vec3 {
    let len = length(a);
    if len == 0.0 {
        [0.0; 3]
    } else {
        [a[0] / len, a[1] / len, a[2] / len]
    }
}

/// Newell's vector of a polygon: its direction is the polygon normal and its
/// length is twice the polygon area.
pub(crate) fn newell(corners: &[Vec3]) -> Vec3 {
    let mut n = [0.0; 3];
    for (i, a) in corners.iter().enumerate() {
        let b = corners[(i + 1) % corners.len()];
        n[0] += (a[1] - b[1]) * (a[2] + b[2]);
        n[1] += (a[2] - b[2]) * (a[0] + b[0]);
        n[2] += (a[0] - b[0]) * (a[1] + b[1]);
    }
    n
}

pub(crate) fn polygon_area(corners: &[Vec3]) -> f64 {
    length(newell(corners)) / 2.0
}
