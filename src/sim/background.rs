//! Ambient background: day/night cycle, drifting clouds, twinkling stars
//!
//! Cosmetic only. Nothing here is read by collision or scoring.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;
use crate::lerp_rgb;
use crate::renderer::{Surface, colors};

const DAY_SKY: [f32; 3] = [135.0, 206.0, 235.0];
const NIGHT_SKY: [f32; 3] = [0.0, 0.0, 25.0];
/// Stars show while time of day is inside this window
const NIGHT_START: f32 = 0.5;
const NIGHT_END: f32 = 1.5;
const CLOUD_ALPHA: f32 = 200.0 / 255.0;
const CLOUD_BASE_RADIUS: f32 = 30.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
    /// Drift in px/frame; doubles as the size scale
    pub speed: f32,
}

impl Cloud {
    fn spawn<R: Rng>(x: f32, rng: &mut R) -> Self {
        Self {
            pos: Vec2::new(x, random_cloud_y(rng)),
            speed: rng.random_range(0.5..=1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub brightness: f32,
}

fn random_cloud_y<R: Rng>(rng: &mut R) -> f32 {
    rng.random_range(20.0..=FIELD_HEIGHT / 3.0)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Background {
    /// Cyclic in [0, 2): 0-1 day to night, 1-2 night to day
    pub time_of_day: f32,
    pub clouds: Vec<Cloud>,
    pub stars: Vec<Star>,
    /// Frames elapsed, drives the star twinkle
    pub frame: u64,
    /// Twinkle stars (off under reduced motion)
    pub twinkle: bool,
}

impl Background {
    pub fn new<R: Rng>(cloud_count: usize, star_count: usize, twinkle: bool, rng: &mut R) -> Self {
        let clouds = (0..cloud_count)
            .map(|_| {
                let x = rng.random_range(0.0..=FIELD_WIDTH);
                Cloud::spawn(x, rng)
            })
            .collect();
        let stars = (0..star_count)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random_range(0.0..=FIELD_WIDTH),
                    rng.random_range(0.0..=FIELD_HEIGHT / 2.0),
                ),
                brightness: rng.random_range(0.5..=1.5),
            })
            .collect();

        Self {
            time_of_day: 0.0,
            clouds,
            stars,
            frame: 0,
            twinkle,
        }
    }

    pub fn advance<R: Rng>(&mut self, rng: &mut R) {
        self.time_of_day = (self.time_of_day + TIME_OF_DAY_STEP) % 2.0;
        self.frame += 1;

        for cloud in self.clouds.iter_mut() {
            cloud.pos.x -= cloud.speed;
            if cloud.pos.x < CLOUD_RECYCLE_X {
                cloud.pos.x = FIELD_WIDTH + CLOUD_RESPAWN_OFFSET;
                cloud.pos.y = random_cloud_y(rng);
            }
        }
    }

    /// Sky color (0-255 channels) for the current time of day
    pub fn sky_rgb(&self) -> [f32; 3] {
        if self.time_of_day < 1.0 {
            lerp_rgb(DAY_SKY, NIGHT_SKY, self.time_of_day)
        } else {
            lerp_rgb(NIGHT_SKY, DAY_SKY, self.time_of_day - 1.0)
        }
    }

    pub fn is_night(&self) -> bool {
        self.time_of_day > NIGHT_START && self.time_of_day < NIGHT_END
    }

    /// Star visibility: 0 at the edges of the night window, 1 at midnight
    pub fn star_fade(&self) -> f32 {
        if !self.is_night() {
            return 0.0;
        }
        (1.0 - (1.0 - self.time_of_day).abs() * 2.0).clamp(0.0, 1.0)
    }

    fn twinkle_at(&self, star: &Star) -> f32 {
        if !self.twinkle {
            return 1.0;
        }
        let seconds = self.frame as f32 / TARGET_FPS as f32;
        (seconds + star.pos.x).sin() * 0.5 + 0.5
    }

    pub fn render(&self, surface: &mut impl Surface) {
        let [r, g, b] = self.sky_rgb();
        surface.fill_rect(
            Rect::new(0.0, 0.0, FIELD_WIDTH, FIELD_HEIGHT),
            [r / 255.0, g / 255.0, b / 255.0, 1.0],
        );

        let fade = self.star_fade();
        if fade > 0.0 {
            for star in &self.stars {
                let alpha = (fade * star.brightness * self.twinkle_at(star)).min(1.0);
                if alpha > 0.0 {
                    surface.fill_circle(
                        star.pos + Vec2::splat(2.0),
                        2.0,
                        colors::with_alpha(colors::WHITE, alpha),
                    );
                }
            }
        }

        let cloud_color = colors::with_alpha(colors::WHITE, CLOUD_ALPHA);
        for cloud in &self.clouds {
            let size = (CLOUD_BASE_RADIUS * cloud.speed).floor();
            for i in 0..3 {
                let offset_x = (i as f32 * size / 2.0).floor();
                let puff = Vec2::new(cloud.pos.x.floor() + offset_x, cloud.pos.y.floor());
                surface.fill_circle(puff, size, cloud_color);
                surface.fill_circle(
                    puff + Vec2::new(-(size / 3.0).floor(), (size / 3.0).floor()),
                    size,
                    cloud_color,
                );
            }
        }

        surface.fill_rect(
            Rect::new(0.0, FIELD_HEIGHT - GROUND_HEIGHT, FIELD_WIDTH, GROUND_HEIGHT),
            colors::GROUND,
        );
        surface.fill_rect(
            Rect::new(0.0, FIELD_HEIGHT - GROUND_HEIGHT, FIELD_WIDTH, 5.0),
            colors::GROUND_TOP,
        );
    }
}
