//=========================================================================
// Goal Placement
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

/// Uniformly distributed point on the sphere of `radius` around the origin.
///
/// Samples `z` uniformly in `[-1, 1]` and the azimuth in `[0, 2π)`; by
/// Archimedes' hat-box theorem this is uniform over the surface.
pub fn random_on_sphere<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let z: f32 = rng.gen_range(-1.0..=1.0);
    let azimuth: f32 = rng.gen_range(0.0..TAU);
    let ring = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(ring * azimuth.cos(), ring * azimuth.sin(), z) * radius
}
