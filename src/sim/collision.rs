//! Collision queries between the bird, pipes and power-ups

use rand::Rng;

use super::bird::Bird;
use super::pipe::Pipe;
use super::rect::Rect;

/// Check whether the bird hit any pipe this frame.
///
/// An active shield short-circuits every test. On the first hit the bird
/// emits an explosion burst; positions and velocities are left untouched.
pub fn check<R: Rng>(bird: &mut Bird, pipes: &[Pipe], rng: &mut R) -> bool {
    if bird.shield {
        return false;
    }

    let bird_rect = bird.rect();
    let hit = pipes
        .iter()
        .any(|pipe| pipe.rects().iter().any(|r| bird_rect.intersects(r)));

    if hit {
        bird.spawn_explosion(rng);
    }
    hit
}

/// Overlap query used for power-up pickup
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.intersects(b)
}
