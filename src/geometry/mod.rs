//! Built-in geometry check provider.
//!
//! Checks in this module inspect a [`Scene`] bound under the shared key
//! (see [`DataBindings::shared`](crate::engine::DataBindings::shared)).
//! Register them with [`register_geometry_checks`].

pub mod checks;
pub mod scene;

pub use checks::{
    FacetedGeometryCheck, NoNgonsCheck, TriangleMaxCountCheck, ZeroAngleCornersCheck,
    ZeroAreaFacesCheck, ZeroLengthEdgesCheck,
};
pub use scene::{load_scene, Face, MeshObject, Scene, Vec3};

use crate::engine::CheckRegistry;
use crate::error::Result;

/// Register every geometry check, in report order.
///
/// # Errors
///
/// Returns `DuplicateCheck` if any of the names is already registered.
pub fn register_geometry_checks(registry: &mut CheckRegistry) -> Result<()> {
    registry.register(ZeroAreaFacesCheck::descriptor())?;
    registry.register(ZeroLengthEdgesCheck::descriptor())?;
    registry.register(ZeroAngleCornersCheck::descriptor())?;
    registry.register(FacetedGeometryCheck::descriptor())?;
    registry.register(NoNgonsCheck::descriptor())?;
    registry.register(TriangleMaxCountCheck::descriptor())?;
    Ok(())
}
