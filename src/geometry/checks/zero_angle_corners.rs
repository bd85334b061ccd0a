//! Zero-angle corner detection.

use crate::engine::{downcast_data, Check, CheckData, CheckDescriptor, Outcome, Parameters, Severity};
use crate::geometry::scene::{dot, normalized, sub, Scene, Vec3};

/// Counts faces with at least one corner whose angle is effectively zero.
///
/// A corner is degenerate when `|1 - cos(angle)|` is below `threshold`.
pub struct ZeroAngleCornersCheck;

impl ZeroAngleCornersCheck {
    pub const NAME: &'static str = "zeroAngleCorners";

    pub fn descriptor() -> CheckDescriptor {
        CheckDescriptor::new(Self::NAME, Self)
            .with_title("Check zero-angle corners")
            .with_description("Check if objects have faces with zero-angle corners")
            .with_message("Objects containing faces with zero-angle corners")
            .with_item_message("Object \"{item}\" has {found} faces with zero-angle corners")
            .with_version("0.1.1")
            .with_severity(Severity::Warning)
            .with_parameter("threshold", 1e-6)
    }
}

fn has_zero_angle_corner(corners: &[Vec3], threshold: f64) -> bool {
    let n = corners.len();
    (0..n).any(|i| {
        let a = corners[i];
        let prev = normalized(sub(corners[(i + n - 1) % n], a));
        let next = normalized(sub(corners[(i + 1) % n], a));
        (1.0 - dot(prev, next)).abs() < threshold
    })
}

impl Check for ZeroAngleCornersCheck {
    fn evaluate(&self, data: &CheckData, params: &Parameters) -> anyhow::Result<Outcome> {
        let scene = downcast_data::<Scene>(data)?;
        let threshold = params.get_f64("threshold")?;

        super::count_per_object(scene, |mesh| {
            let mut found = 0;
            for face in &mesh.faces {
                if has_zero_angle_corner(&mesh.corners(face)?, threshold) {
                    found += 1;
                }
            }
            Ok(found)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::checks::fixtures::cube;
    use crate::geometry::{Face, MeshObject};
    use serde_json::json;

    fn defaults() -> Parameters {
        ZeroAngleCornersCheck::descriptor().default_parameters
    }

    #[test]
    fn passes_regular_geometry() {
        let scene = Scene::new(vec![cube("Cube")]);
        assert!(ZeroAngleCornersCheck.evaluate(&scene, &defaults()).unwrap().ok);
    }

    #[test]
    fn detects_spike_corner() {
        // Both edges leaving vertex 0 point the same way.
        let mesh = MeshObject::new(
            "Spike",
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 1e-9, 0.0]],
            vec![Face::flat([0, 1, 2])],
        );
        let scene = Scene::new(vec![mesh]);

        let outcome = ZeroAngleCornersCheck.evaluate(&scene, &defaults()).unwrap();
        assert_eq!(outcome.details.unwrap()["Spike"], json!(1));
    }

    #[test]
    fn coincident_vertices_are_not_zero_angle() {
        let corners = [[0.0; 3], [0.0; 3], [1.0, 0.0, 0.0]];
        assert!(!has_zero_angle_corner(&corners, 1e-6));
    }

    #[test]
    fn counts_each_face_once() {
        let mesh = MeshObject::new(
            "Line",
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]],
            vec![Face::flat([0, 1, 2])],
        );
        let scene = Scene::new(vec![mesh]);

        let outcome = ZeroAngleCornersCheck.evaluate(&scene, &defaults()).unwrap();
        assert_eq!(outcome.details.unwrap()["Line"], json!(1));
    }
}
