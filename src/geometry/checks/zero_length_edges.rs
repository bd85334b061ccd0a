//! Zero-length edge detection.

use crate::engine::{downcast_data, Check, CheckData, CheckDescriptor, Outcome, Parameters, Severity};
use crate::geometry::scene::{length, sub, Scene};

/// Counts edges shorter than `threshold` (meters).
pub struct ZeroLengthEdgesCheck;

impl ZeroLengthEdgesCheck {
    pub const NAME: &'static str = "zeroLengthEdges";

    pub fn descriptor() -> CheckDescriptor {
        CheckDescriptor::new(Self::NAME, Self)
            .with_title("Check zero-length edges")
            .with_description("Check if objects have zero-length edges")
            .with_message("Objects containing zero-length edges")
            .with_item_message("Object \"{item}\" has {found} zero-length edges")
            .with_version("0.1.2")
            .with_severity(Severity::Error)
            .with_parameter("threshold", 1e-10)
    }
}

impl Check for ZeroLengthEdgesCheck {
    fn evaluate(&self, data: &CheckData, params: &Parameters) -> anyhow::Result<Outcome> {
        let scene = downcast_data::<Scene>(data)?;
        let threshold = params.get_f64("threshold")? / scene.checked_unit_scale()?;

        super::count_per_object(scene, |mesh| {
            let mut found = 0;
            for (a, b) in mesh.edges() {
                if length(sub(mesh.position(a)?, mesh.position(b)?)) < threshold {
                    found += 1;
                }
            }
            Ok(found)
        })
    }
}
