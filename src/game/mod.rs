use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use crate::combat::{Enemy, Player};
use crate::config::{AppConfig, ConfigError, SessionConfig};
use crate::dungeon::{DungeonGenerator, DungeonGrid, DungeonRng, GenerationReport, RandomSource, WorldPoint};

pub mod spawn;

pub use spawn::*;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("generated {width}x{height} dungeon has no floor tile to spawn on")]
    NoFloorTile { width: i32, height: i32 },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// One run of the game without any engine attached: a dungeon, the player,
/// the enemies hunting them and the score. Time is driven by the caller.
pub struct GameSession<R = DungeonRng> {
    config: SessionConfig,
    dungeon: DungeonGrid,
    report: GenerationReport,
    player: Player,
    enemies: Vec<Enemy>,
    score: u32,
    kills: u32,
    state: SessionState,
    next_wave_ms: u64,
    rng: R,
}

impl<R: RandomSource> GameSession<R> {
    /// Generates a dungeon and places the player and the first enemies.
    pub fn start(config: &AppConfig, rng: R) -> Result<Self, SessionError> {
        config.validate()?;

        let mut generator = DungeonGenerator::from_config(config.generator.clone(), rng);
        let dungeon = generator.generate();
        let report = generator.report().clone();
        let rng = generator.into_rng();

        let spawn_point = player_spawn(&dungeon).ok_or(SessionError::NoFloorTile {
            width: dungeon.width(),
            height: dungeon.height(),
        })?;

        let mut session = Self {
            config: config.session.clone(),
            dungeon,
            report,
            player: Player::new(spawn_point, config.session.weapon),
            enemies: Vec::new(),
            score: 0,
            kills: 0,
            state: SessionState::Playing,
            next_wave_ms: config.session.wave_interval_ms,
            rng,
        };

        let spawned = session.spawn_enemies(session.config.initial_enemies);
        info!(
            rooms = session.report.accepted_rooms(),
            enemies = spawned,
            weapon = %session.player.weapon,
            "session started"
        );
        Ok(session)
    }

    pub fn dungeon(&self) -> &DungeonGrid {
        &self.dungeon
    }

    pub fn report(&self) -> &GenerationReport {
        &self.report
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    /// Places up to `count` enemies on floor tiles away from the player.
    pub fn spawn_enemies(&mut self, count: usize) -> usize {
        let candidates = spawn_candidates(
            &self.dungeon,
            self.player.position,
            self.config.spawn_exclusion_radius,
        );
        let points = pick_spawn_points(candidates, count, &mut self.rng);
        let spawned = points.len();
        self.enemies.extend(points.into_iter().map(Enemy::new));
        if spawned < count {
            debug!(requested = count, spawned, "not enough floor for every enemy");
        }
        spawned
    }

    /// Shifts the player by `(dx, dy)` pixels unless that lands outside the
    /// floor.
    pub fn move_player(&mut self, dx: f32, dy: f32) -> bool {
        if self.is_over() {
            return false;
        }
        let target = WorldPoint::new(self.player.position.x + dx, self.player.position.y + dy);
        if !self.dungeon.is_floor(target.to_tile()) {
            return false;
        }
        self.player.position = target;
        true
    }

    pub fn player_attack(&mut self, now_ms: u64) -> Option<usize> {
        if self.is_over() {
            return None;
        }
        self.player.attack(now_ms, &mut self.enemies)
    }

    /// Advances the world to `now_ms`, `dt_ms` after the previous tick.
    pub fn tick(&mut self, now_ms: u64, dt_ms: u64) -> SessionState {
        if self.is_over() {
            return self.state;
        }

        for enemy in &mut self.enemies {
            enemy.update(&mut self.player, now_ms, dt_ms);
        }

        let before = self.enemies.len();
        self.enemies.retain(|enemy| !enemy.is_dead());
        let killed = (before - self.enemies.len()) as u32;
        if killed > 0 {
            self.kills += killed;
            self.score += killed * self.config.score_per_kill;
            debug!(killed, score = self.score, "enemies defeated");
        }

        while now_ms >= self.next_wave_ms {
            self.spawn_enemies(self.config.wave_size);
            self.next_wave_ms += self.config.wave_interval_ms;
        }

        if self.player.is_dead() {
            self.state = SessionState::GameOver;
            info!(score = self.score, kills = self.kills, "game over");
        }
        self.state
    }
}
