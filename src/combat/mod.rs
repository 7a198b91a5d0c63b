use serde::{Deserialize, Serialize};

pub mod entity;
pub mod weapon;

pub use entity::*;
pub use weapon::*;

/// Hit points clamped to `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    current: u32,
    max: u32,
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }

    pub fn is_dead(&self) -> bool {
        self.current == 0
    }
}

/// Minimum spacing between two actions, in milliseconds of game time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooldown {
    pub duration_ms: u64,
    last_fired_ms: Option<u64>,
}

impl Cooldown {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            last_fired_ms: None,
        }
    }

    pub fn is_ready(&self, now_ms: u64) -> bool {
        match self.last_fired_ms {
            Some(last) => now_ms.saturating_sub(last) >= self.duration_ms,
            None => true,
        }
    }

    /// Fires and restarts the timer if ready.
    pub fn try_fire(&mut self, now_ms: u64) -> bool {
        if !self.is_ready(now_ms) {
            return false;
        }
        self.last_fired_ms = Some(now_ms);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_clamps_both_ends() {
        let mut health = Health::new(100);
        health.take_damage(30);
        assert_eq!(health.current(), 70);
        health.heal(500);
        assert_eq!(health.current(), 100);
        health.take_damage(1000);
        assert_eq!(health.current(), 0);
        assert!(health.is_dead());
    }

    #[test]
    fn test_cooldown_spacing() {
        let mut cooldown = Cooldown::new(500);
        assert!(cooldown.try_fire(0));
        assert!(!cooldown.try_fire(499));
        assert!(cooldown.is_ready(500));
        assert!(cooldown.try_fire(500));
        assert!(!cooldown.is_ready(600));
    }
}
