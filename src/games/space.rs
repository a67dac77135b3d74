//! Space Survivor (real-time dodge)
//!
//! Continuous field: the ship slides along the bottom row while
//! asteroids fall at per-entity speeds. Asteroids that clear the bottom
//! edge are recycled to a random spot above the top edge, never
//! dropped, and each recycle pays out score. Score thresholds raise the
//! fall-speed band and grow the population up to a hard cap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::GameFlow;
use crate::consts::*;
use crate::input::{Direction, InputEvent};
use crate::results::ResultSink;
use crate::rng::ArcadeRng;
use crate::settings::ArcadeConfig;

/// Result-file key.
pub const RESULT_KEY: &str = "space_survivor";

/// One falling rock.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    /// Fall speed in cells per tick
    pub speed: f32,
    pub radius: f32,
}

/// Full game state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceSurvivor {
    /// Ship column, clamped to `[0, field.x - 1]`
    pub player_x: f32,
    pub asteroids: Vec<Asteroid>,
    pub score: u32,
    pub alive: bool,
    pub ticks: u64,
    /// Current difficulty level (`score / DIFFICULTY_STEP`)
    pub level: u32,
    field: Vec2,
    max_asteroids: usize,
    player: String,
    #[serde(skip, default = "default_rng")]
    rng: ArcadeRng,
}

fn default_rng() -> ArcadeRng {
    ArcadeRng::new(0)
}

impl SpaceSurvivor {
    pub fn new(config: &ArcadeConfig, mut rng: ArcadeRng) -> Self {
        let field = Vec2::new(config.field_width, config.field_height);
        let mut asteroids = Vec::with_capacity(config.max_asteroids);
        for _ in 0..config.initial_asteroids {
            asteroids.push(Self::spawn(&mut rng, field, 0, true));
        }
        Self {
            player_x: (field.x / 2.0).floor(),
            asteroids,
            score: 0,
            alive: true,
            ticks: 0,
            level: 0,
            field,
            max_asteroids: config.max_asteroids,
            player: config.player_name.clone(),
            rng,
        }
    }

    /// Field dimensions (columns x rows), for the renderer.
    pub fn field(&self) -> Vec2 {
        self.field
    }

    /// Row the ship occupies.
    pub fn player_row(&self) -> f32 {
        self.field.y - 1.0
    }

    /// Advance one tick: move the ship, drop every asteroid, resolve
    /// collision, recycle the ones past the bottom edge.
    pub fn update(&mut self, events: &[InputEvent], sink: &mut dyn ResultSink) -> GameFlow {
        if !self.alive {
            // Frozen: the final frame stays renderable until dismissed
            if events
                .iter()
                .any(|e| matches!(e, InputEvent::Confirm | InputEvent::Press))
            {
                return GameFlow::ReturnToMenu;
            }
            return GameFlow::Continue;
        }

        self.ticks += 1;

        for &event in events {
            match event {
                InputEvent::Move(Direction::Left) => self.player_x -= 1.0,
                InputEvent::Move(Direction::Right) => self.player_x += 1.0,
                _ => {}
            }
        }
        self.player_x = self.player_x.clamp(0.0, self.field.x - 1.0);

        let ship = Vec2::new(self.player_x, self.player_row());
        let mut hit = false;
        for asteroid in &mut self.asteroids {
            asteroid.pos.y += asteroid.speed;

            if asteroid.pos.y >= ship.y {
                let reach = asteroid.radius + SHIP_RADIUS + COLLISION_MARGIN;
                if asteroid.pos.distance(ship) < reach {
                    hit = true;
                }
            }
        }

        if hit {
            self.alive = false;
            log::info!("Space Survivor: crash at score {}", self.score);
            sink.append(
                RESULT_KEY,
                &format!("{} scored {}", self.player, self.score),
            );
            return GameFlow::Continue;
        }

        // Recycle off-field asteroids and pay out
        let bottom = self.field.y;
        let field = self.field;
        let level = self.level;
        let mut recycled = 0u32;
        for asteroid in &mut self.asteroids {
            if asteroid.pos.y >= bottom {
                *asteroid = Self::spawn(&mut self.rng, field, level, false);
                recycled += 1;
            }
        }
        self.score += recycled * ASTEROID_REWARD;

        // Difficulty: each step adds one asteroid (up to the cap) and
        // shifts the speed band of future spawns
        let level_now = self.score / DIFFICULTY_STEP;
        if level_now > self.level {
            self.level = level_now;
            if self.asteroids.len() < self.max_asteroids {
                let rock = Self::spawn(&mut self.rng, self.field, self.level, false);
                self.asteroids.push(rock);
            }
            log::debug!(
                "Space Survivor: level {} ({} asteroids)",
                self.level,
                self.asteroids.len()
            );
        }

        GameFlow::Continue
    }

    /// Fresh asteroid. Initial placement scatters over the whole field;
    /// recycles always start above the top edge.
    fn spawn(rng: &mut ArcadeRng, field: Vec2, level: u32, scatter: bool) -> Asteroid {
        let shift = (level as f32 * SPEED_PER_LEVEL).min(FALL_SPEED_CAP - FALL_SPEED_MAX);
        let speed = rng.range_f32(FALL_SPEED_MIN + shift, FALL_SPEED_MAX + shift);
        let y = if scatter {
            rng.range_f32(ASTEROID_SPAWN_Y, field.y - 2.0)
        } else {
            rng.range_f32(ASTEROID_SPAWN_Y, 0.0)
        };
        Asteroid {
            pos: Vec2::new(rng.range_f32(0.0, field.x), y),
            speed: speed.min(FALL_SPEED_CAP),
            radius: rng.range_f32(ASTEROID_MIN_RADIUS, ASTEROID_MAX_RADIUS),
        }
    }
}
