use serde::{Deserialize, Serialize};
use crate::dungeon::WorldPoint;
use super::{AttackKind, Cooldown, Health, WeaponProfile, WeaponType};

pub const PLAYER_MAX_HEALTH: u32 = 100;
pub const ENEMY_MAX_HEALTH: u32 = 30;
pub const ENEMY_SPEED: f32 = 80.0;
pub const ENEMY_ATTACK_DAMAGE: u32 = 10;
pub const ENEMY_ATTACK_COOLDOWN_MS: u64 = 1000;
/// Enemies stop closing in once they are this near the player.
pub const ENEMY_CONTACT_DISTANCE: f32 = 5.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub position: WorldPoint,
    pub health: Health,
    pub weapon: WeaponType,
    attack_cooldown: Cooldown,
}

impl Player {
    pub fn new(position: WorldPoint, weapon: WeaponType) -> Self {
        Self {
            position,
            health: Health::new(PLAYER_MAX_HEALTH),
            weapon,
            attack_cooldown: Cooldown::new(weapon.profile().cooldown_ms),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health.is_dead()
    }

    /// Attacks with the equipped weapon. `None` while the weapon is cooling
    /// down, otherwise the number of enemies hit.
    pub fn attack(&mut self, now_ms: u64, enemies: &mut [Enemy]) -> Option<usize> {
        if self.is_dead() || !self.attack_cooldown.try_fire(now_ms) {
            return None;
        }

        let profile = self.weapon_profile();
        let origin = self.position;

        let hits = match profile.kind {
            AttackKind::Melee | AttackKind::Area => {
                let mut hits = 0;
                let targets = enemies
                    .iter_mut()
                    .filter(|enemy| enemy.within(&origin, profile.range));
                for enemy in targets {
                    enemy.health.take_damage(profile.damage);
                    hits += 1;
                }
                hits
            }
            AttackKind::Ranged => {
                let target = enemies
                    .iter_mut()
                    .filter(|enemy| enemy.within(&origin, profile.range))
                    .min_by(|a, b| {
                        a.position
                            .distance(&origin)
                            .total_cmp(&b.position.distance(&origin))
                    });
                match target {
                    Some(enemy) => {
                        enemy.health.take_damage(profile.damage);
                        1
                    }
                    None => 0,
                }
            }
        };

        tracing::trace!(weapon = %self.weapon, hits, "player attacked");
        Some(hits)
    }

    pub fn weapon_profile(&self) -> WeaponProfile {
        self.weapon.profile()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub position: WorldPoint,
    pub health: Health,
    attack_cooldown: Cooldown,
}

impl Enemy {
    pub fn new(position: WorldPoint) -> Self {
        Self {
            position,
            health: Health::new(ENEMY_MAX_HEALTH),
            attack_cooldown: Cooldown::new(ENEMY_ATTACK_COOLDOWN_MS),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health.is_dead()
    }

    /// Alive and no farther than `range` from `origin`.
    pub fn within(&self, origin: &WorldPoint, range: f32) -> bool {
        !self.is_dead() && self.position.distance(origin) <= range
    }

    /// Chases the player, or strikes once close enough and off cooldown.
    /// Returns whether the player was hit.
    pub fn update(&mut self, player: &mut Player, now_ms: u64, dt_ms: u64) -> bool {
        if self.is_dead() {
            return false;
        }

        let distance = self.position.distance(&player.position);
        if distance > ENEMY_CONTACT_DISTANCE {
            let step = (ENEMY_SPEED * dt_ms as f32 / 1000.0).min(distance);
            self.position.x += (player.position.x - self.position.x) / distance * step;
            self.position.y += (player.position.y - self.position.y) / distance * step;
            return false;
        }

        if self.attack_cooldown.try_fire(now_ms) {
            player.health.take_damage(ENEMY_ATTACK_DAMAGE);
            return true;
        }
        false
    }
}
