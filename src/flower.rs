//! A single flower: grows a stem, blooms, then holds its final pose.

use crate::color::{Palette, FLOWER_CENTER, LEAF, PETAL_OUTLINE, PETAL_PALETTES, STEM};
use crate::easing::ease_out_cubic;
use crate::surface::{Gradient, Surface};
use glam::DVec2;
use rand::Rng;
use std::f64::consts::TAU;

/// Time from the stem reaching its target to a fully open bloom.
pub const BLOOM_DURATION_MS: f64 = 800.0;

/// Smallest radius of the disc drawn at the bloom centre.
pub const MIN_CENTER_RADIUS: f64 = 6.0;

/// Horizontal distance of a leaf centre from the stem base.
const LEAF_OFFSET: f64 = 12.0;

/// Uniform sample between `lo` and `hi`. Unlike `gen_range` this accepts
/// `lo > hi` (and `lo == hi`), which tiny viewports produce.
pub(crate) fn span(rng: &mut impl Rng, lo: f64, hi: f64) -> f64 {
    lo + rng.gen::<f64>() * (hi - lo)
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GrowthState {
    Growing,
    Blooming,
    Done,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Leaf {
    /// Fraction of the stem length, measured from the ground
    pub position: f64,
    pub width: f64,
    pub height: f64,
    /// -1 for left of the stem, 1 for right
    pub flip: f64,
}

impl Leaf {
    fn sample(rng: &mut impl Rng) -> Self {
        Self {
            position: span(rng, 0.3, 0.7),
            width: span(rng, 22.0, 32.0),
            height: span(rng, 12.0, 18.0),
            flip: if rng.gen_bool(0.5) { -1.0 } else { 1.0 },
        }
    }
}

/// Everything about a flower that is decided once, at creation.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowerParams {
    pub target_stem: f64,
    /// Pixels per second
    pub stem_speed: f64,
    pub palette: Palette,
    pub petal_count: u32,
    pub petal_radius: f64,
    /// Frequency multiplier for the base sway
    pub sway: f64,
    /// Phase offset shared by all of this flower's oscillations
    pub phase: f64,
    pub leaves: Vec<Leaf>,
}

impl FlowerParams {
    /// Samples a new parameter set. The stem target scales with the viewport
    /// height at the time of the call.
    pub fn sample(rng: &mut impl Rng, viewport_height: f64) -> Self {
        let target_stem = span(rng, 120.0, viewport_height * 0.35);
        let stem_speed = span(rng, 90.0, 160.0);
        let palette = PETAL_PALETTES[rng.gen_range(0..PETAL_PALETTES.len())];
        let petal_count = rng.gen_range(5..7);
        let petal_radius = span(rng, 80.0, 140.0);
        let sway = span(rng, 0.6, 1.5);
        let phase = span(rng, 0.0, 10_000.0);

        let leaf_count = rng.gen_range(2..=3);
        let leaves = (0..leaf_count).map(|_| Leaf::sample(rng)).collect();

        Self {
            target_stem: target_stem.max(0.0),
            stem_speed,
            palette,
            petal_count,
            petal_radius,
            sway,
            phase,
            leaves,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Flower {
    x: f64,
    ground_y: f64,
    params: FlowerParams,
    state: GrowthState,
    stem_length: f64,
    bloom_progress: f64,
    bloom_start: f64,
}

impl Flower {
    pub fn new(x: f64, ground_y: f64, params: FlowerParams) -> Self {
        Self {
            x,
            ground_y,
            params,
            state: GrowthState::Growing,
            stem_length: 0.0,
            bloom_progress: 0.0,
            bloom_start: 0.0,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn ground_y(&self) -> f64 {
        self.ground_y
    }

    pub fn params(&self) -> &FlowerParams {
        &self.params
    }

    pub fn leaves(&self) -> &[Leaf] {
        &self.params.leaves
    }

    pub fn state(&self) -> GrowthState {
        self.state
    }

    pub fn stem_length(&self) -> f64 {
        self.stem_length
    }

    pub fn target_stem(&self) -> f64 {
        self.params.target_stem
    }

    pub fn bloom_progress(&self) -> f64 {
        self.bloom_progress
    }

    /// Timestamp (ms) at which the flower started blooming
    pub fn bloom_start(&self) -> Option<f64> {
        match self.state {
            GrowthState::Growing => None,
            _ => Some(self.bloom_start),
        }
    }

    /// Advances the flower by `dt` seconds. `now` is the frame timestamp in
    /// milliseconds. A non-positive `dt` leaves the flower untouched.
    pub fn update(&mut self, dt: f64, now: f64) {
        if !(dt > 0.0) {
            return;
        }

        match self.state {
            GrowthState::Growing => {
                let target = self.params.target_stem;
                self.stem_length = (self.stem_length + self.params.stem_speed * dt).max(0.0);
                if self.stem_length >= target {
                    self.stem_length = target;
                    self.state = GrowthState::Blooming;
                    self.bloom_start = now;
                    log::debug!("flower at x={:.1} blooming (stem {:.1})", self.x, target);
                }
            }
            GrowthState::Blooming => {
                let elapsed = (now - self.bloom_start) / BLOOM_DURATION_MS;
                // never regress, even if the host clock does
                self.bloom_progress = self.bloom_progress.max(ease_out_cubic(elapsed));
                if self.bloom_progress >= 1.0 {
                    self.bloom_progress = 1.0;
                    self.state = GrowthState::Done;
                    log::debug!("flower at x={:.1} done", self.x);
                }
            }
            GrowthState::Done => {}
        }
    }

    /// Renders the flower as it looks at `now` (ms). Sway depends only on
    /// `now`, so this never mutates the flower.
    pub fn draw(&self, surface: &mut impl Surface, now: f64) {
        let params = &self.params;
        let stem = self.stem_length.clamp(0.0, params.target_stem.max(0.0));
        let open = if self.bloom_progress.is_nan() {
            0.0
        } else {
            self.bloom_progress.clamp(0.0, 1.0)
        };
        let phase = params.phase;

        let base = DVec2::new(
            self.x + ((now * 0.0006 + phase) * params.sway).sin() * 6.0,
            self.ground_y,
        );
        let top_y = base.y - stem;

        surface.save();

        // stem
        surface.begin_path();
        surface.move_to(base);
        let control = DVec2::new(base.x + (now * 0.001 + phase).sin() * 20.0, base.y - stem * 0.5);
        let stem_tip = DVec2::new(base.x + ((now * 0.0015 + phase) * 1.2).sin() * 4.0, top_y);
        surface.quadratic_curve_to(control, stem_tip);
        surface.stroke(&STEM.into(), (stem * 0.02).max(2.0));

        // leaves ride along with the stem, no motion of their own
        let leaf_paint = LEAF.into();
        for leaf in &params.leaves {
            let center = DVec2::new(base.x + leaf.flip * LEAF_OFFSET, base.y - stem * leaf.position);
            surface.begin_path();
            surface.ellipse(center, DVec2::new(leaf.width.max(0.0), leaf.height.max(0.0)));
            surface.fill(&leaf_paint);
        }

        // bloom
        let bloom_size = params.petal_radius.max(0.0) * (0.2 + 0.8 * open);
        let center = DVec2::new(base.x, top_y);
        let outline = PETAL_OUTLINE.into();
        let [inner, mid, outer] = params.palette;

        for i in 0..params.petal_count {
            let dir = DVec2::from_angle(f64::from(i) / f64::from(params.petal_count) * TAU);
            let tip = center + dir * bloom_size * (1.0 + 0.4 * open);
            let bend = center + dir * bloom_size * 0.5 - DVec2::new(0.0, 6.0 * (1.0 - open));

            surface.begin_path();
            surface.move_to(center);
            surface.quadratic_curve_to(bend, tip);
            surface.line_to(center);

            let gradient = Gradient::radial(tip, 2.0, bloom_size * 0.9)
                .stop(0.0, inner)
                .stop(0.6, mid)
                .stop(1.0, outer);
            surface.fill(&gradient.into());
            surface.stroke(&outline, 0.6);
        }

        surface.begin_path();
        surface.arc(center, (bloom_size * 0.28).max(MIN_CENTER_RADIUS));
        surface.fill(&FLOWER_CENTER.into());

        surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, GradientShape, Paint, RecordingSurface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn params(target_stem: f64, stem_speed: f64) -> FlowerParams {
        FlowerParams {
            target_stem,
            stem_speed,
            palette: PETAL_PALETTES[0],
            petal_count: 5,
            petal_radius: 100.0,
            sway: 1.0,
            phase: 42.0,
            leaves: vec![
                Leaf {
                    position: 0.4,
                    width: 25.0,
                    height: 14.0,
                    flip: -1.0,
                },
                Leaf {
                    position: 0.6,
                    width: 30.0,
                    height: 16.0,
                    flip: 1.0,
                },
            ],
        }
    }

    fn bloomed(target: f64) -> Flower {
        let mut flower = Flower::new(200.0, 582.0, params(target, target));
        flower.update(1.0, 0.0);
        flower.update(0.016, BLOOM_DURATION_MS);
        assert_eq!(flower.state(), GrowthState::Done);
        flower
    }

    #[test]
    fn grows_blooms_then_done() {
        let mut flower = Flower::new(200.0, 582.0, params(100.0, 100.0));
        assert_eq!(flower.state(), GrowthState::Growing);
        assert_eq!(flower.bloom_start(), None);

        flower.update(1.0, 1000.0);
        assert_eq!(flower.stem_length(), 100.0);
        assert_eq!(flower.state(), GrowthState::Blooming);
        assert_eq!(flower.bloom_start(), Some(1000.0));
        assert_eq!(flower.bloom_progress(), 0.0);

        flower.update(0.016, 1000.0 + BLOOM_DURATION_MS);
        assert_eq!(flower.state(), GrowthState::Done);
        assert_eq!(flower.bloom_progress(), 1.0);
    }

    #[test]
    fn stem_clamps_to_target_exactly() {
        let mut flower = Flower::new(0.0, 0.0, params(100.0, 100.0));
        flower.update(0.9999, 0.0);
        assert_eq!(flower.state(), GrowthState::Growing);
        assert!(flower.stem_length() < 100.0);

        flower.update(0.5, 10.0);
        assert_eq!(flower.stem_length(), 100.0);
        assert_eq!(flower.state(), GrowthState::Blooming);
    }

    #[test]
    fn zero_dt_is_noop_in_every_state() {
        let mut flower = Flower::new(0.0, 0.0, params(100.0, 100.0));
        let before = flower.clone();
        flower.update(0.0, 5000.0);
        assert_eq!(flower, before);

        flower.update(1.0, 0.0);
        let before = flower.clone();
        flower.update(0.0, 400.0);
        assert_eq!(flower, before);

        let mut done = bloomed(100.0);
        let before = done.clone();
        done.update(0.0, 1e9);
        done.update(0.05, 1e9);
        assert_eq!(done, before);
    }

    #[test]
    fn negative_dt_is_ignored() {
        let mut flower = Flower::new(0.0, 0.0, params(100.0, 100.0));
        flower.update(-1.0, 0.0);
        flower.update(f64::NAN, 0.0);
        assert_eq!(flower.stem_length(), 0.0);
    }

    #[test]
    fn bloom_follows_ease_curve() {
        let mut flower = Flower::new(0.0, 0.0, params(100.0, 1000.0));
        flower.update(1.0, 0.0);
        flower.update(0.016, BLOOM_DURATION_MS / 2.0);
        assert!((flower.bloom_progress() - 0.875).abs() < 1e-12);
        assert_eq!(flower.state(), GrowthState::Blooming);
    }

    #[test]
    fn bloom_never_regresses_on_clock_rewind() {
        let mut flower = Flower::new(0.0, 0.0, params(100.0, 1000.0));
        flower.update(1.0, 1000.0);
        flower.update(0.016, 1400.0);
        let progress = flower.bloom_progress();
        flower.update(0.016, 1100.0);
        assert_eq!(flower.bloom_progress(), progress);
    }

    #[test]
    fn invariants_hold_over_random_walk() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut flower = Flower::new(300.0, 700.0, FlowerParams::sample(&mut rng, 720.0));
        let mut now = 0.0;
        let mut last_state = flower.state();

        for _ in 0..2000 {
            let dt = rng.gen_range(0.0..0.06);
            now += dt * 1000.0;
            flower.update(dt, now);

            assert!(flower.stem_length() >= 0.0);
            assert!(flower.stem_length() <= flower.target_stem());
            assert!((0.0..=1.0).contains(&flower.bloom_progress()));
            match (last_state, flower.state()) {
                (GrowthState::Blooming, GrowthState::Growing)
                | (GrowthState::Done, GrowthState::Growing)
                | (GrowthState::Done, GrowthState::Blooming) => {
                    panic!("went from {:?} to {:?}", last_state, flower.state())
                }
                _ => {}
            }
            if flower.state() == GrowthState::Growing {
                assert_eq!(flower.bloom_progress(), 0.0);
            }
            last_state = flower.state();
        }
        assert_eq!(flower.state(), GrowthState::Done);
    }

    #[test]
    fn sampled_params_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let p = FlowerParams::sample(&mut rng, 1000.0);
            assert!((120.0..=350.0).contains(&p.target_stem));
            assert!((90.0..=160.0).contains(&p.stem_speed));
            assert!((5..=6).contains(&p.petal_count));
            assert!((80.0..=140.0).contains(&p.petal_radius));
            assert!((0.6..=1.5).contains(&p.sway));
            assert!((0.0..10_000.0).contains(&p.phase));
            assert!((2..=3).contains(&p.leaves.len()));
            assert!(PETAL_PALETTES.contains(&p.palette));
            for leaf in &p.leaves {
                assert!((0.3..=0.7).contains(&leaf.position));
                assert!(leaf.flip == 1.0 || leaf.flip == -1.0);
            }
        }
    }

    #[test]
    fn short_viewport_does_not_panic() {
        let mut rng = StdRng::seed_from_u64(3);
        let p = FlowerParams::sample(&mut rng, 100.0);
        // 0.35 * 100 < 120, so the target lands between the two bounds
        assert!((35.0..=120.0).contains(&p.target_stem));
    }

    #[test]
    fn draw_emits_stem_leaves_petals_and_center() {
        let flower = bloomed(100.0);
        let mut surface = RecordingSurface::new();
        flower.draw(&mut surface, 1234.0);
        let commands = surface.commands();

        assert_eq!(commands.first(), Some(&DrawCommand::Save));
        assert_eq!(commands.last(), Some(&DrawCommand::Restore));
        assert!(commands.iter().all(DrawCommand::is_finite));

        let ellipses = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Ellipse { .. }))
            .count();
        assert_eq!(ellipses, flower.leaves().len());

        let petal_fills: Vec<_> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Fill(Paint::Gradient(g)) => Some(g),
                _ => None,
            })
            .collect();
        assert_eq!(petal_fills.len(), 5);
        for g in petal_fills {
            assert_eq!(g.stops.len(), 3);
            match g.shape {
                GradientShape::Radial { outer_radius, .. } => {
                    // fully open: bloom size equals the petal radius
                    assert!((outer_radius - 90.0).abs() < 1e-9);
                }
                GradientShape::Linear { .. } => panic!("petal gradient must be radial"),
            }
        }

        let arcs: Vec<_> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Arc { radius, .. } => Some(*radius),
                _ => None,
            })
            .collect();
        assert_eq!(arcs.len(), 1);
        assert!((arcs[0] - 28.0).abs() < 1e-9);
    }

    #[test]
    fn unopened_bloom_is_a_fifth_size_with_min_center() {
        let mut p = params(100.0, 100.0);
        p.petal_radius = 10.0;
        let flower = Flower::new(50.0, 100.0, p);
        let mut surface = RecordingSurface::new();
        flower.draw(&mut surface, 0.0);

        let radius = surface.commands().iter().find_map(|c| match c {
            DrawCommand::Arc { radius, .. } => Some(*radius),
            _ => None,
        });
        assert_eq!(radius, Some(MIN_CENTER_RADIUS));

        let outer = surface.commands().iter().find_map(|c| match c {
            DrawCommand::Fill(Paint::Gradient(g)) => match g.shape {
                GradientShape::Radial { outer_radius, .. } => Some(outer_radius),
                _ => None,
            },
            _ => None,
        });
        assert!((outer.unwrap_or_default() - 10.0 * 0.2 * 0.9).abs() < 1e-9);
    }

    #[test]
    fn stem_line_width_has_floor() {
        let flower = Flower::new(0.0, 0.0, params(100.0, 100.0));
        let mut surface = RecordingSurface::new();
        flower.draw(&mut surface, 0.0);
        let width = surface.commands().iter().find_map(|c| match c {
            DrawCommand::Stroke { line_width, .. } => Some(*line_width),
            _ => None,
        });
        assert_eq!(width, Some(2.0));
    }

    #[test]
    fn draw_does_not_mutate() {
        let mut flower = Flower::new(10.0, 500.0, params(200.0, 150.0));
        flower.update(0.5, 500.0);
        let before = flower.clone();
        let mut surface = RecordingSurface::new();
        for t in 0..50 {
            flower.draw(&mut surface, f64::from(t) * 16.7);
        }
        assert_eq!(flower, before);
    }
}
