//! Built-in geometry checks.
//!
//! Every check reads the shared [`Scene`] binding and reports offending
//! objects by name.

pub mod faceted_geometry;
pub mod no_ngons;
pub mod triangle_max_count;
pub mod zero_angle_corners;
pub mod zero_area_faces;
pub mod zero_length_edges;

pub use faceted_geometry::FacetedGeometryCheck;
pub use no_ngons::NoNgonsCheck;
pub use triangle_max_count::TriangleMaxCountCheck;
pub use zero_angle_corners::ZeroAngleCornersCheck;
pub use zero_area_faces::ZeroAreaFacesCheck;
pub use zero_length_edges::ZeroLengthEdgesCheck;

use anyhow::Context;

use super::scene::{MeshObject, Scene};
use crate::engine::{Details, Outcome};

/// Fail with `object -> count` for every object where `count` is non-zero.
fn count_per_object<F>(scene: &Scene, mut count: F) -> anyhow::Result<Outcome>
where
    F: FnMut(&MeshObject) -> anyhow::Result<usize>,
{
    let mut details = Details::new();
    for mesh in &scene.objects {
        let found = count(mesh).with_context(|| format!("while inspecting '{}'", mesh.name))?;
        if found > 0 {
            details.insert(mesh.name.clone(), found.into());
        }
    }
    Ok(Outcome::from_details(details))
}
