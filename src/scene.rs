//! The fixed set of flowers and the backdrop they are drawn over.

use crate::color::{GROUND, SKY_BOTTOM, SKY_MID, SKY_TOP};
use crate::config::GardenConfig;
use crate::flower::{span, Flower, FlowerParams};
use crate::surface::{Gradient, Rect, Surface};
use crate::viewport::Viewport;
use glam::DVec2;
use rand::Rng;

/// Gap between the ground anchor and the top of the ground band.
const GROUND_BAND_OFFSET: f64 = 8.0;

#[derive(Clone, Debug)]
pub struct Scene {
    flowers: Vec<Flower>,
    ground_y: f64,
}

impl Scene {
    /// Seeds `config.flower_count` flowers across the viewport. The ground
    /// anchor is fixed here and not revisited on later resizes.
    pub fn bootstrap(config: &GardenConfig, viewport: Viewport, rng: &mut impl Rng) -> Self {
        let ground_y = viewport.height_f() - config.ground_margin;
        let left = config.edge_margin;
        let right = viewport.width_f() - config.edge_margin;

        let flowers = (0..config.flower_count)
            .map(|_| {
                let x = span(rng, left, right);
                Flower::new(x, ground_y, FlowerParams::sample(rng, viewport.height_f()))
            })
            .collect::<Vec<_>>();

        log::info!(
            "seeded {} flowers on a {}x{} viewport",
            flowers.len(),
            viewport.width,
            viewport.height
        );

        Self { flowers, ground_y }
    }

    pub fn flowers(&self) -> &[Flower] {
        &self.flowers
    }

    pub fn flowers_mut(&mut self) -> &mut [Flower] {
        &mut self.flowers
    }

    pub fn ground_y(&self) -> f64 {
        self.ground_y
    }

    /// Clears the surface, then paints the sky gradient and the ground band.
    pub fn draw_background(&self, surface: &mut impl Surface, viewport: Viewport) {
        let (w, h) = (viewport.width_f(), viewport.height_f());
        surface.clear_rect(Rect::new(0.0, 0.0, w, h));

        let sky = Gradient::linear(DVec2::ZERO, DVec2::new(0.0, h))
            .stop(0.0, SKY_TOP)
            .stop(0.5, SKY_MID)
            .stop(1.0, SKY_BOTTOM);
        surface.fill_rect(Rect::new(0.0, 0.0, w, h), &sky.into());

        surface.fill_rect(
            Rect::new(0.0, self.ground_y + GROUND_BAND_OFFSET, w, h - self.ground_y),
            &GROUND.into(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, Paint, RecordingSurface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn bootstrap_places_flowers_within_margins() {
        let config = GardenConfig::default();
        let viewport = Viewport::new(1280, 720);
        let scene = Scene::bootstrap(&config, viewport, &mut StdRng::seed_from_u64(5));

        assert_eq!(scene.flowers().len(), 12);
        assert_eq!(scene.ground_y(), 702.0);
        for flower in scene.flowers() {
            assert!((80.0..=1200.0).contains(&flower.x()));
            assert_eq!(flower.ground_y(), 702.0);
            assert_eq!(flower.stem_length(), 0.0);
        }
    }

    #[test]
    fn same_seed_same_scene() {
        let config = GardenConfig::default();
        let viewport = Viewport::new(800, 600);
        let a = Scene::bootstrap(&config, viewport, &mut StdRng::seed_from_u64(77));
        let b = Scene::bootstrap(&config, viewport, &mut StdRng::seed_from_u64(77));
        let c = Scene::bootstrap(&config, viewport, &mut StdRng::seed_from_u64(78));

        assert_eq!(a.flowers(), b.flowers());
        assert_ne!(a.flowers(), c.flowers());
    }

    #[test]
    fn narrow_viewport_does_not_panic() {
        let config = GardenConfig {
            flower_count: 4,
            ..GardenConfig::default()
        };
        let scene = Scene::bootstrap(&config, Viewport::new(100, 50), &mut StdRng::seed_from_u64(0));
        assert_eq!(scene.flowers().len(), 4);
        for flower in scene.flowers() {
            assert!((20.0..=80.0).contains(&flower.x()));
        }
    }

    #[test]
    fn background_is_sky_then_ground() {
        let viewport = Viewport::new(400, 300);
        let scene = Scene::bootstrap(
            &GardenConfig::default(),
            viewport,
            &mut StdRng::seed_from_u64(1),
        );
        let mut surface = RecordingSurface::new();
        scene.draw_background(&mut surface, viewport);

        let commands = surface.commands();
        assert_eq!(commands.len(), 3);
        assert_eq!(commands[0], DrawCommand::ClearRect(Rect::new(0.0, 0.0, 400.0, 300.0)));
        match &commands[1] {
            DrawCommand::FillRect(_, Paint::Gradient(g)) => assert_eq!(g.stops.len(), 3),
            other => panic!("expected sky gradient, got {:?}", other),
        }
        assert_eq!(
            commands[2],
            DrawCommand::FillRect(Rect::new(0.0, 290.0, 400.0, 18.0), Paint::Solid(GROUND))
        );
    }
}
