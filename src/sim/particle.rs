//! Short-lived visual particles
//!
//! Purely cosmetic: particles never take part in collision or scoring.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::renderer::{Color, Surface, colors};

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, decreases by `decay` every frame
    pub life: f32,
    pub decay: f32,
    pub color: Color,
}

impl Particle {
    /// Spawn a particle with a random velocity and decay rate
    pub fn spawn<R: Rng>(pos: Vec2, color: Color, rng: &mut R) -> Self {
        Self {
            pos,
            vel: Vec2::new(
                rng.random_range(-PARTICLE_SPEED..=PARTICLE_SPEED),
                rng.random_range(-PARTICLE_SPEED..=PARTICLE_SPEED),
            ),
            life: 1.0,
            decay: rng.random_range(PARTICLE_MIN_DECAY..=PARTICLE_MAX_DECAY),
            color,
        }
    }

    /// Integrate one frame. Returns whether the particle is still alive.
    pub fn advance(&mut self) -> bool {
        debug_assert!(self.life <= 1.0, "particle life above 1: {}", self.life);
        self.pos += self.vel;
        self.vel.y += PARTICLE_GRAVITY;
        self.life -= self.decay;
        self.is_alive()
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Radius in whole pixels; shrinks with remaining life
    pub fn radius(&self) -> f32 {
        (self.life * PARTICLE_MAX_RADIUS).floor()
    }

    /// Opacity quantised to 8 bits; fades with remaining life
    pub fn alpha(&self) -> f32 {
        (self.life * 255.0).floor().max(0.0) / 255.0
    }

    pub fn render(&self, surface: &mut impl Surface) {
        let radius = self.radius();
        let alpha = self.alpha();
        if radius <= 0.0 || alpha <= 0.0 {
            return;
        }
        surface.fill_circle(self.pos, radius, colors::with_alpha(self.color, alpha));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::MeshSurface;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn still_particle(decay: f32) -> Particle {
        Particle {
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::ZERO,
            life: 1.0,
            decay,
            color: colors::RED,
        }
    }

    #[test]
    fn test_spawn_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            let p = Particle::spawn(Vec2::ZERO, colors::YELLOW, &mut rng);
            assert_eq!(p.life, 1.0);
            assert!(p.vel.x.abs() <= PARTICLE_SPEED && p.vel.y.abs() <= PARTICLE_SPEED);
            assert!((PARTICLE_MIN_DECAY..=PARTICLE_MAX_DECAY).contains(&p.decay));
        }
    }

    #[test]
    fn test_advance_applies_gravity() {
        let mut p = still_particle(0.05);
        p.vel = Vec2::new(1.0, -2.0);
        assert!(p.advance());
        assert_eq!(p.pos, Vec2::new(101.0, 98.0));
        assert!((p.vel.y - (-2.0 + PARTICLE_GRAVITY)).abs() < 1e-6);
    }

    #[test]
    fn test_dies_when_life_exhausted() {
        let mut p = still_particle(0.5);
        assert!(p.advance());
        assert!(!p.advance());
        assert!(!p.is_alive());
    }

    #[test]
    fn test_render_skips_faded_particle() {
        let mut mesh = MeshSurface::new();
        let mut p = still_particle(0.0);
        p.life = 0.1; // radius floors to zero
        p.render(&mut mesh);
        assert!(mesh.vertices.is_empty());

        p.life = 0.8;
        p.render(&mut mesh);
        assert!(!mesh.vertices.is_empty());
        assert!((mesh.vertices[0].color[3] - p.alpha()).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_life_strictly_decreases_until_pruned(decay in 0.02f32..0.05) {
            let mut p = still_particle(decay);
            let mut frames = 0;
            loop {
                let before = p.life;
                let alive = p.advance();
                frames += 1;
                prop_assert!((before - p.life - decay).abs() < 1e-5);
                prop_assert_eq!(alive, p.life > 0.0);
                if !alive {
                    break;
                }
                prop_assert!(frames < 100);
            }
            prop_assert!(p.life <= 0.0);
        }
    }
}
