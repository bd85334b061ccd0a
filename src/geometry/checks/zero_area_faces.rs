//! Zero-area face detection.

use crate::engine::{downcast_data, Check, CheckData, CheckDescriptor, Outcome, Parameters, Severity};
use crate::geometry::scene::{polygon_area, Scene};

/// Counts faces whose area is below `threshold` (square meters).
pub struct ZeroAreaFacesCheck;

impl ZeroAreaFacesCheck {
    pub const NAME: &'static str = "zeroAreaFaces";

    pub fn descriptor() -> CheckDescriptor {
        CheckDescriptor::new(Self::NAME, Self)
            .with_title("Check zero-area faces")
            .with_description("Check if objects have zero-area faces")
            .with_message("Objects containing zero-area faces")
            .with_item_message("Object \"{item}\" has {found} faces with zero area")
            .with_version("0.1.2")
            .with_severity(Severity::Error)
            .with_parameter("threshold", 1e-10)
    }
}

impl Check for ZeroAreaFacesCheck {
    fn evaluate(&self, data: &CheckData, params: &Parameters) -> anyhow::Result<Outcome> {
        let scene = downcast_data::<Scene>(data)?;
        // Area scales with the square of the unit length.
        let threshold = params.get_f64("threshold")? / scene.checked_unit_scale()?.powi(2);

        super::count_per_object(scene, |mesh| {
            let mut found = 0;
            for face in &mesh.faces {
                if polygon_area(&mesh.corners(face)?) < threshold {
                    found += 1;
                }
            }
            Ok(found)
        })
    }
}
