//! Scene triangle budget.

use serde_json::json;

use crate::engine::{
    downcast_data, Check, CheckData, CheckDescriptor, Details, Outcome, Parameters, Severity,
};
use crate::geometry::scene::Scene;

/// Fails when the scene's total triangle count exceeds `triMaxCount`.
pub struct TriangleMaxCountCheck;

impl TriangleMaxCountCheck {
    pub const NAME: &'static str = "triangleMaxCount";

    pub fn descriptor() -> CheckDescriptor {
        CheckDescriptor::new(Self::NAME, Self)
            .with_title("Check triangle count")
            .with_description("Check if the number of triangles exceeds the maximum allowed value")
            .with_message("Scene triangle count exceeded")
            .with_item_message(
                "Scene triangle count of {found} exceeds the maximum allowed: {triMaxCount}",
            )
            .with_version("0.1.1")
            .with_severity(Severity::Error)
            .enabled_by_default(false)
            .with_parameter("triMaxCount", 90000)
    }
}

impl Check for TriangleMaxCountCheck {
    fn evaluate(&self, data: &CheckData, params: &Parameters) -> anyhow::Result<Outcome> {
        let scene = downcast_data::<Scene>(data)?;
        let limit = params.get_u64("triMaxCount")?;

        let count: usize = scene.objects.iter().map(|m| m.triangle_count()).sum();
        tracing::debug!("Scene has {} triangle(s), limit {}", count, limit);

        if count as u64 > limit {
            Ok(Outcome::fail(Details::from([(
                "scene".to_string(),
                json!(count),
            )])))
        } else {
            Ok(Outcome::pass())
        }
    }
}
