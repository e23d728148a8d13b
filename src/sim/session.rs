//! Game session: entity ownership, spawning, scoring and the phase machine
//!
//! One call to [`GameSession::tick`] advances exactly one frame. Every timer
//! is frame-counted and all randomness comes from the seeded session RNG, so
//! a seed plus an input sequence fully determines a run.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::background::Background;
use super::bird::Bird;
use super::collision;
use super::pipe::{Pipe, spawn_interval};
use super::powerup::{PowerUp, PowerUpKind};
use super::rect::Rect;
use crate::consts::*;
use crate::renderer::{Surface, TextAlign, colors};
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended; frozen until restart
    GameOver,
}

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    Floor,
    Pipe,
}

/// Notable things that happened during a frame (for audio, logging, UI)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    PipeSpawned,
    PowerUpSpawned(PowerUpKind),
    PipePassed { score: u32 },
    PowerUpCollected(PowerUpKind),
    ShieldExpired,
    Crashed(CrashCause),
    Restarted,
}

/// Input commands for a single frame (edge-triggered)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameInput {
    /// Flap (honored only while playing)
    pub jump: bool,
    /// Start a new run (honored only after game over)
    pub restart: bool,
}

impl FrameInput {
    pub const NONE: FrameInput = FrameInput {
        jump: false,
        restart: false,
    };

    pub fn is_empty(&self) -> bool {
        !self.jump && !self.restart
    }
}

/// Difficulty level for a score: one level per five points, capped
pub fn difficulty_for_score(score: u32) -> u32 {
    (score / SCORE_PER_DIFFICULTY).min(MAX_DIFFICULTY)
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameSession {
    pub settings: Settings,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    pub bird: Bird,
    pub pipes: Vec<Pipe>,
    pub power_ups: Vec<PowerUp>,
    pub background: Background,
    pub score: u32,
    /// Best score across every attempt in this process
    pub high_score: u32,
    pub difficulty: u32,
    /// Frames simulated in the current attempt
    pub frame: u64,
    pub last_pipe_frame: u64,
    /// Frames since the last power-up spawn
    pub power_up_timer: u32,
    /// Frames of slowed scrolling left
    pub slow_frames: u32,
    /// Attempts started, including the current one
    pub attempt: u32,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameSession {
    pub fn new(settings: Settings) -> Self {
        let seed = settings.seed.unwrap_or(DEFAULT_SEED);
        let mut rng = Pcg32::seed_from_u64(seed);
        let background = Self::fresh_background(&settings, &mut rng);

        log::info!(
            "New session (seed {:#x}, quality {})",
            seed,
            settings.quality.as_str()
        );

        Self {
            bird: Bird::new(settings.max_particles(), settings.animate_ambient()),
            settings,
            seed,
            rng,
            phase: GamePhase::Playing,
            pipes: Vec::new(),
            power_ups: Vec::new(),
            background,
            score: 0,
            high_score: 0,
            difficulty: 0,
            frame: 0,
            last_pipe_frame: 0,
            power_up_timer: 0,
            slow_frames: 0,
            attempt: 1,
            events: Vec::new(),
        }
    }

    fn fresh_background(settings: &Settings, rng: &mut Pcg32) -> Background {
        Background::new(
            settings.quality.cloud_count(),
            settings.quality.star_count(),
            settings.animate_ambient(),
            rng,
        )
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Current scroll speed, halved while a Slow power-up is active
    pub fn scroll_speed(&self) -> f32 {
        if self.slow_frames > 0 {
            SCROLL_SPEED * SLOW_FACTOR
        } else {
            SCROLL_SPEED
        }
    }

    /// Advance the session by one frame
    pub fn tick(&mut self, input: &FrameInput) {
        self.events.clear();

        match self.phase {
            GamePhase::Playing => {
                if input.jump {
                    self.bird.jump(&mut self.rng);
                    self.events.push(GameEvent::Jumped);
                }
                self.step();
            }
            GamePhase::GameOver => {
                // Frozen; only restart is honored
                if input.restart {
                    self.restart();
                }
            }
        }
    }

    /// Begin a new attempt, keeping the high score and the RNG stream
    pub fn restart(&mut self) {
        self.high_score = self.high_score.max(self.score);
        self.bird = Bird::new(
            self.settings.max_particles(),
            self.settings.animate_ambient(),
        );
        self.pipes.clear();
        self.power_ups.clear();
        self.background = Self::fresh_background(&self.settings, &mut self.rng);
        self.score = 0;
        self.difficulty = 0;
        self.frame = 0;
        self.last_pipe_frame = 0;
        self.power_up_timer = 0;
        self.slow_frames = 0;
        self.attempt += 1;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Restarted);
        log::info!("Restarted (attempt {}, high score {})", self.attempt, self.high_score);
    }

    fn step(&mut self) {
        self.frame += 1;
        self.background.advance(&mut self.rng);

        let shielded = self.bird.shield;
        if self.bird.advance(&mut self.rng) {
            self.end_run(CrashCause::Floor);
            return;
        }
        if shielded && !self.bird.shield {
            self.events.push(GameEvent::ShieldExpired);
        }

        self.difficulty = difficulty_for_score(self.score);
        self.spawn_entities();

        let speed = self.scroll_speed();
        self.slow_frames = self.slow_frames.saturating_sub(1);

        self.update_pipes(speed);
        self.update_power_ups(speed);

        if collision::check(&mut self.bird, &self.pipes, &mut self.rng) {
            self.end_run(CrashCause::Pipe);
        }
    }

    fn spawn_entities(&mut self) {
        if self.frame - self.last_pipe_frame > spawn_interval(self.difficulty) {
            self.pipes.push(Pipe::new(self.difficulty, &mut self.rng));
            self.last_pipe_frame = self.frame;
            self.events.push(GameEvent::PipeSpawned);
            log::debug!("Pipe spawned at frame {} (difficulty {})", self.frame, self.difficulty);
        }

        self.power_up_timer += 1;
        if self.power_up_timer > POWER_UP_COOLDOWN_FRAMES && self.rng.random_bool(POWER_UP_CHANCE)
        {
            let power_up = PowerUp::spawn(&mut self.rng);
            log::debug!("Power-up {} spawned at y={:.0}", power_up.kind.as_str(), power_up.pos.y);
            self.events.push(GameEvent::PowerUpSpawned(power_up.kind));
            self.power_ups.push(power_up);
            self.power_up_timer = 0;
        }
    }

    fn update_pipes(&mut self, speed: f32) {
        let bird_x = self.bird.pos.x;
        let mut passed = 0;
        for pipe in self.pipes.iter_mut() {
            pipe.advance(speed);
            if pipe.mark_passed(bird_x) {
                passed += 1;
            }
        }
        for _ in 0..passed {
            self.add_score(1);
            self.events.push(GameEvent::PipePassed { score: self.score });
        }
        self.pipes.retain(|p| !p.is_off_field());
    }

    fn update_power_ups(&mut self, speed: f32) {
        let bird_rect = self.bird.rect();
        let mut collected = Vec::new();
        self.power_ups.retain_mut(|power_up| {
            if power_up.advance(speed) {
                return false;
            }
            if collision::overlaps(&bird_rect, &power_up.rect()) {
                collected.push(power_up.kind);
                return false;
            }
            true
        });

        for kind in collected {
            self.apply_power_up(kind);
        }
    }

    /// Apply a collected power-up's effect
    pub fn apply_power_up(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Shield => self.bird.activate_shield(SHIELD_FRAMES),
            PowerUpKind::Slow => self.slow_frames = SLOW_FRAMES,
            PowerUpKind::Points => self.add_score(POINTS_BONUS),
        }
        self.events.push(GameEvent::PowerUpCollected(kind));
        log::debug!("Collected {} (score {})", kind.as_str(), self.score);
    }

    fn add_score(&mut self, points: u32) {
        self.score += points;
        self.high_score = self.high_score.max(self.score);
    }

    fn end_run(&mut self, cause: CrashCause) {
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::Crashed(cause));
        log::info!(
            "Game over ({:?}) after {} frames: score {}, high score {}",
            cause,
            self.frame,
            self.score,
            self.high_score
        );
    }

    /// Draw every layer back to front
    pub fn render(&self, surface: &mut impl Surface) {
        self.background.render(surface);
        for pipe in &self.pipes {
            pipe.render(surface);
        }
        for power_up in &self.power_ups {
            power_up.render(surface);
        }
        self.bird.render(surface);

        if self.settings.show_hud {
            self.render_hud(surface);
        }
        if self.is_game_over() {
            self.render_game_over(surface);
        }
    }

    fn render_hud(&self, surface: &mut impl Surface) {
        surface.text(
            &format!("Score: {}", self.score),
            Vec2::new(10.0, 10.0),
            30.0,
            colors::WHITE,
            TextAlign::Left,
        );
        surface.text(
            &format!("High: {}", self.high_score),
            Vec2::new(FIELD_WIDTH - 10.0, 10.0),
            30.0,
            colors::YELLOW,
            TextAlign::Right,
        );

        let mut y = 50.0;
        if self.bird.shield {
            let seconds = self.bird.shield_frames as f32 / TARGET_FPS as f32;
            surface.text(
                &format!("Shield: {seconds:.1}s"),
                Vec2::new(FIELD_WIDTH / 2.0, y),
                30.0,
                colors::BLUE,
                TextAlign::Center,
            );
            y += 30.0;
        }
        if self.slow_frames > 0 {
            let seconds = self.slow_frames as f32 / TARGET_FPS as f32;
            surface.text(
                &format!("Slow: {seconds:.1}s"),
                Vec2::new(FIELD_WIDTH / 2.0, y),
                30.0,
                colors::YELLOW,
                TextAlign::Center,
            );
        }
    }

    fn render_game_over(&self, surface: &mut impl Surface) {
        surface.fill_rect(Rect::new(0.0, 0.0, FIELD_WIDTH, FIELD_HEIGHT), colors::OVERLAY);

        let cx = FIELD_WIDTH / 2.0;
        let mid = FIELD_HEIGHT / 2.0;
        surface.text(
            "Game Over",
            Vec2::new(cx, FIELD_HEIGHT / 3.0),
            50.0,
            colors::RED,
            TextAlign::Center,
        );
        surface.text(
            &format!("Score: {}", self.score),
            Vec2::new(cx, mid),
            30.0,
            colors::WHITE,
            TextAlign::Center,
        );
        surface.text(
            &format!("High Score: {}", self.high_score),
            Vec2::new(cx, mid + 40.0),
            30.0,
            colors::YELLOW,
            TextAlign::Center,
        );
        surface.text(
            "Press R to restart",
            Vec2::new(cx, mid + 80.0),
            30.0,
            colors::WHITE,
            TextAlign::Center,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::MeshSurface;
    use crate::settings::Pacing;

    fn session() -> GameSession {
        GameSession::new(Settings {
            seed: Some(12345),
            pacing: Pacing::Unthrottled,
            ..Settings::default()
        })
    }

    /// Pipe straddling the bird's column with the gap around it
    fn gap_pipe(s: &GameSession, x: f32) -> Pipe {
        Pipe::with_geometry(x, 150.0, s.bird.pos.y - 100.0, colors::PIPE_LIP)
    }

    const JUMP: FrameInput = FrameInput {
        jump: true,
        restart: false,
    };
    const RESTART: FrameInput = FrameInput {
        jump: false,
        restart: true,
    };

    #[test]
    fn test_new_session_defaults() {
        let s = session();
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.score, 0);
        assert_eq!(s.high_score, 0);
        assert!(s.pipes.is_empty());
        assert!(s.power_ups.is_empty());
        assert_eq!(s.background.clouds.len(), 5);
        assert_eq!(s.background.stars.len(), 20);
    }

    #[test]
    fn test_difficulty_curve() {
        assert_eq!(difficulty_for_score(0), 0);
        assert_eq!(difficulty_for_score(4), 0);
        assert_eq!(difficulty_for_score(5), 1);
        assert_eq!(difficulty_for_score(49), 9);
        assert_eq!(difficulty_for_score(500), MAX_DIFFICULTY);
    }

    #[test]
    fn test_floor_contact_ends_game() {
        let mut s = session();
        s.bird.pos.y = FIELD_HEIGHT - BIRD_SIZE;
        s.tick(&FrameInput::NONE);
        assert_eq!(s.phase, GamePhase::GameOver);
        assert!(s.events.contains(&GameEvent::Crashed(CrashCause::Floor)));
    }

    #[test]
    fn test_free_fall_reaches_floor() {
        let mut s = session();
        let mut frames = 0;
        while s.phase == GamePhase::Playing {
            s.tick(&FrameInput::NONE);
            frames += 1;
            assert!(frames < 200);
        }
        assert_eq!(s.bird.pos.y, FIELD_HEIGHT - BIRD_SIZE);
    }

    #[test]
    fn test_jump_velocity_then_gravity() {
        let mut s = session();
        s.tick(&JUMP);
        assert_eq!(s.bird.velocity, JUMP_IMPULSE + GRAVITY);
        for n in 2..=10u32 {
            s.tick(&FrameInput::NONE);
            assert_eq!(s.bird.velocity, JUMP_IMPULSE + n as f32 * GRAVITY);
        }
    }

    #[test]
    fn test_passing_five_pipes_raises_difficulty() {
        let mut s = session();
        let x = s.bird.pos.x + 1.0;
        for _ in 0..5 {
            let pipe = gap_pipe(&s, x);
            s.pipes.push(pipe);
        }
        s.tick(&FrameInput::NONE);
        assert_eq!(s.score, 5);
        assert_eq!(s.high_score, 5);
        assert_eq!(
            s.events.iter().filter(|e| matches!(e, GameEvent::PipePassed { .. })).count(),
            5
        );

        s.tick(&FrameInput::NONE);
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.score, 5);
        assert_eq!(s.difficulty, 1);
    }

    #[test]
    fn test_pipe_scores_only_once() {
        let mut s = session();
        let x = s.bird.pos.x + 1.0;
        let pipe = gap_pipe(&s, x);
        s.pipes.push(pipe);
        for _ in 0..5 {
            s.tick(&FrameInput::NONE);
        }
        assert_eq!(s.score, 1);
    }

    #[test]
    fn test_points_power_up_bonus() {
        let mut s = session();
        s.score = 5;
        let pos = s.bird.pos + Vec2::new(SCROLL_SPEED, 0.0);
        s.power_ups.push(PowerUp::new(pos, PowerUpKind::Points));
        s.tick(&FrameInput::NONE);
        assert_eq!(s.score, 10);
        assert_eq!(s.high_score, 10);
        assert!(s.power_ups.is_empty());
        assert!(s.events.contains(&GameEvent::PowerUpCollected(PowerUpKind::Points)));
    }

    #[test]
    fn test_shield_power_up_protects() {
        let mut s = session();
        s.apply_power_up(PowerUpKind::Shield);
        assert!(s.bird.shield);
        let x = s.bird.pos.x;
        s.pipes.push(Pipe::with_geometry(x, 100.0, FIELD_HEIGHT - 150.0, colors::PIPE_LIP));
        s.tick(&FrameInput::NONE);
        assert_eq!(s.phase, GamePhase::Playing);
    }

    #[test]
    fn test_slow_power_up_halves_scroll() {
        let mut s = session();
        s.apply_power_up(PowerUpKind::Slow);
        assert_eq!(s.scroll_speed(), SCROLL_SPEED * SLOW_FACTOR);
        s.pipes.push(Pipe::with_geometry(300.0, 150.0, 200.0, colors::PIPE_LIP));
        s.tick(&JUMP);
        assert_eq!(s.pipes[0].x, 300.0 - SCROLL_SPEED * SLOW_FACTOR);

        s.slow_frames = 1;
        s.tick(&FrameInput::NONE);
        assert_eq!(s.slow_frames, 0);
        assert_eq!(s.scroll_speed(), SCROLL_SPEED);
    }

    #[test]
    fn test_pipe_collision_ends_game() {
        let mut s = session();
        let x = s.bird.pos.x;
        s.pipes.push(Pipe::with_geometry(
            x + SCROLL_SPEED,
            100.0,
            FIELD_HEIGHT - 150.0,
            colors::PIPE_LIP,
        ));
        s.tick(&FrameInput::NONE);
        assert_eq!(s.phase, GamePhase::GameOver);
        assert!(s.events.contains(&GameEvent::Crashed(CrashCause::Pipe)));
        assert!(s.bird.particles.len() >= EXPLOSION_BURST);
    }

    #[test]
    fn test_game_over_is_frozen() {
        let mut s = session();
        s.bird.pos.y = FIELD_HEIGHT;
        s.tick(&FrameInput::NONE);
        assert!(s.is_game_over());

        let frame = s.frame;
        let bird_y = s.bird.pos.y;
        let time = s.background.time_of_day;
        s.tick(&JUMP);
        s.tick(&FrameInput::NONE);
        assert_eq!(s.frame, frame);
        assert_eq!(s.bird.pos.y, bird_y);
        assert_eq!(s.background.time_of_day, time);
        assert!(s.events.is_empty());
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut s = session();
        s.score = 3;
        s.tick(&RESTART);
        assert_eq!(s.score, 3);
        assert_eq!(s.attempt, 1);
    }

    #[test]
    fn test_restart_resets_and_keeps_high_score() {
        let mut s = session();
        s.high_score = 4;
        s.score = 7;
        let pipe = gap_pipe(&s, 300.0);
        s.pipes.push(pipe);
        s.power_ups.push(PowerUp::new(Vec2::new(300.0, 100.0), PowerUpKind::Slow));
        s.bird.spawn_explosion(&mut Pcg32::seed_from_u64(0));
        s.slow_frames = 10;
        s.phase = GamePhase::GameOver;

        s.tick(&RESTART);
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.score, 0);
        assert_eq!(s.high_score, 7);
        assert!(s.pipes.is_empty());
        assert!(s.power_ups.is_empty());
        assert!(s.bird.particles.is_empty());
        assert_eq!(s.slow_frames, 0);
        assert_eq!(s.frame, 0);
        assert_eq!(s.attempt, 2);
        assert!(s.events.contains(&GameEvent::Restarted));
    }

    #[test]
    fn test_pipes_spawn_on_interval() {
        let mut s = session();
        // Flap periodically so the run outlives the first spawn
        let mut spawned = Vec::new();
        for i in 0..200u64 {
            let input = if i % 20 == 0 { JUMP } else { FrameInput::NONE };
            s.tick(&input);
            if s.events.contains(&GameEvent::PipeSpawned) {
                spawned.push(s.frame);
            }
            if s.is_game_over() {
                break;
            }
        }
        assert_eq!(spawned.first(), Some(&(PIPE_SPAWN_FRAMES + 1)));
    }

    #[test]
    fn test_power_up_respects_cooldown() {
        let mut s = session();
        s.bird.activate_shield(u32::MAX);
        for _ in 0..POWER_UP_COOLDOWN_FRAMES {
            s.bird.pos.y = 200.0;
            s.bird.velocity = 0.0;
            s.tick(&FrameInput::NONE);
            assert!(s.power_ups.is_empty());
        }
    }

    #[test]
    fn test_offscreen_entities_pruned() {
        let mut s = session();
        s.pipes.push(Pipe::with_geometry(-PIPE_WIDTH, 150.0, 200.0, colors::PIPE_LIP));
        s.power_ups.push(PowerUp::new(Vec2::new(-POWER_UP_SIZE, 50.0), PowerUpKind::Shield));
        s.tick(&FrameInput::NONE);
        assert!(s.power_ups.is_empty());
        assert!(s.pipes.is_empty());
    }

    #[test]
    fn test_render_layers_and_overlay() {
        let mut s = session();
        let mut mesh = MeshSurface::new();
        s.render(&mut mesh);
        assert_eq!(mesh.labels[0].text, "Score: 0");
        assert!(!mesh.labels.iter().any(|l| l.text == "Game Over"));

        s.bird.pos.y = FIELD_HEIGHT;
        s.tick(&FrameInput::NONE);
        mesh.clear();
        s.render(&mut mesh);
        assert!(mesh.labels.iter().any(|l| l.text == "Game Over"));
        let last = mesh.vertices.last().unwrap();
        assert_eq!(last.color, colors::OVERLAY);
    }

    #[test]
    fn test_hud_hidden_when_disabled() {
        let s = GameSession::new(Settings {
            show_hud: false,
            ..Settings::default()
        });
        let mut mesh = MeshSurface::new();
        s.render(&mut mesh);
        assert!(mesh.labels.is_empty());
    }
}
