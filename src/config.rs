//! Compiled-in tunables for the garden scene.

/// Largest frame delta (seconds) handed to flower updates.
pub const MAX_DT: f64 = 0.06;

/// Scene-wide settings. There is no external source for these; the browser
/// entry point only picks the seed.
#[derive(Debug, Clone, PartialEq)]
pub struct GardenConfig {
    /// Number of flowers seeded at bootstrap
    pub flower_count: usize,
    /// Horizontal margin kept free on both sides of the viewport
    pub edge_margin: f64,
    /// Distance from the bottom of the viewport to the ground anchor
    pub ground_margin: f64,
    /// Upper bound on the per-tick delta, in seconds
    pub max_dt: f64,
    /// Seed for every random parameter in the scene
    pub seed: u64,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            flower_count: 12,
            edge_margin: 80.0,
            ground_margin: 18.0,
            max_dt: MAX_DT,
            seed: 0,
        }
    }
}

impl GardenConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}
