//! N-gon detection.

use crate::engine::{downcast_data, Check, CheckData, CheckDescriptor, Outcome, Parameters, Severity};
use crate::geometry::scene::Scene;

/// Counts faces with more than four vertices.
pub struct NoNgonsCheck;

impl NoNgonsCheck {
    pub const NAME: &'static str = "noNgons";

    pub fn descriptor() -> CheckDescriptor {
        CheckDescriptor::new(Self::NAME, Self)
            .with_title("Check N-gons")
            .with_description("Check if objects contain N-gons")
            .with_message("Objects containing N-gons")
            .with_item_message("Object \"{item}\" contains {found} N-gons")
            .with_version("0.1.1")
            .with_severity(Severity::Warning)
            .enabled_by_default(false)
    }
}

impl Check for NoNgonsCheck {
    fn evaluate(&self, data: &CheckData, _params: &Parameters) -> anyhow::Result<Outcome> {
        let scene = downcast_data::<Scene>(data)?;
        super::count_per_object(scene, |mesh| {
            Ok(mesh.faces.iter().filter(|f| f.vertices.len() > 4).count())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::checks::fixtures::cube;
    use crate::geometry::Face;
    use serde_json::json;

    #[test]
    fn quads_and_triangles_pass() {
        let scene = Scene::new(vec![cube("Cube")]);
        assert!(NoNgonsCheck.evaluate(&scene, &Parameters::new()).unwrap().ok);
    }

    #[test]
    fn counts_ngons_per_object() {
        let mut mesh = cube("Cube");
        mesh.faces.push(Face::flat([0, 1, 2, 3, 4]));
        mesh.faces.push(Face::flat([0, 1, 2, 3, 4, 5]));
        let scene = Scene::new(vec![mesh, cube("Clean")]);

        let details = NoNgonsCheck
            .evaluate(&scene, &Parameters::new())
            .unwrap()
            .details
            .unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details["Cube"], json!(2));
    }
}
