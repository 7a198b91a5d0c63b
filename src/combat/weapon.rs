use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponType {
    Sword,
    Bow,
    Magic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackKind {
    /// Hits every enemy in reach.
    Melee,
    /// Hits the closest enemy in reach.
    Ranged,
    /// Hits every enemy inside the blast radius.
    Area,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponProfile {
    pub kind: AttackKind,
    pub damage: u32,
    /// Reach in world pixels.
    pub range: f32,
    pub cooldown_ms: u64,
}

impl WeaponType {
    pub fn all() -> [WeaponType; 3] {
        [WeaponType::Sword, WeaponType::Bow, WeaponType::Magic]
    }

    pub fn profile(self) -> WeaponProfile {
        match self {
            // A sword swing kills anything it reaches.
            WeaponType::Sword => WeaponProfile {
                kind: AttackKind::Melee,
                damage: 1000,
                range: 60.0,
                cooldown_ms: 500,
            },
            WeaponType::Bow => WeaponProfile {
                kind: AttackKind::Ranged,
                damage: 30,
                range: 300.0,
                cooldown_ms: 700,
            },
            WeaponType::Magic => WeaponProfile {
                kind: AttackKind::Area,
                damage: 40,
                range: 120.0,
                cooldown_ms: 1200,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WeaponType::Sword => "sword",
            WeaponType::Bow => "bow",
            WeaponType::Magic => "magic",
        }
    }
}

impl fmt::Display for WeaponType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WeaponType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeaponType::all()
            .into_iter()
            .find(|weapon| weapon.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown weapon '{}', expected sword, bow or magic", s))
    }
}
