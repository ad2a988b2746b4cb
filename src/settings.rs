//! Cosmetic upgrades
//!
//! Upgrades only change how things are drawn. Nothing in `sim` reads them
//! when computing motion or collisions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A name from the page that matches no known setting
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {name:?}")]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
}

/// Named upgrade toggles exposed to the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Upgrade {
    /// Cyan trail and flame instead of orange
    IonEngine,
    /// Reserved; toggles but has no visual effect yet
    Wormhole,
}

impl Upgrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Upgrade::IonEngine => "ionEngine",
            Upgrade::Wormhole => "wormhole",
        }
    }
}

impl FromStr for Upgrade {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ionengine" | "ion_engine" | "ion" => Ok(Upgrade::IonEngine),
            "wormhole" => Ok(Upgrade::Wormhole),
            _ => Err(UnknownName {
                kind: "upgrade",
                name: s.to_string(),
            }),
        }
    }
}

/// Active upgrade flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upgrades {
    pub ion_engine: bool,
    pub wormhole: bool,
}

impl Upgrades {
    pub fn is_active(&self, upgrade: Upgrade) -> bool {
        match upgrade {
            Upgrade::IonEngine => self.ion_engine,
            Upgrade::Wormhole => self.wormhole,
        }
    }

    /// Flip an upgrade, returning its new state
    pub fn toggle(&mut self, upgrade: Upgrade) -> bool {
        let flag = match upgrade {
            Upgrade::IonEngine => &mut self.ion_engine,
            Upgrade::Wormhole => &mut self.wormhole,
        };
        *flag = !*flag;
        *flag
    }

    /// Trail/flame base color as (r, g, b)
    pub fn exhaust_rgb(&self) -> (u8, u8, u8) {
        if self.is_active(Upgrade::IonEngine) {
            (0, 255, 255)
        } else {
            (255, 165, 0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_independent() {
        let mut upgrades = Upgrades::default();
        assert!(upgrades.toggle(Upgrade::IonEngine));
        assert!(upgrades.is_active(Upgrade::IonEngine));
        assert!(!upgrades.is_active(Upgrade::Wormhole));
        assert!(!upgrades.toggle(Upgrade::IonEngine));
        assert!(upgrades.toggle(Upgrade::Wormhole));
        assert!(!upgrades.ion_engine);
    }

    #[test]
    fn test_names_round_trip() {
        for upgrade in [Upgrade::IonEngine, Upgrade::Wormhole] {
            assert_eq!(upgrade.as_str().parse::<Upgrade>(), Ok(upgrade));
        }
        assert_eq!("ion".parse::<Upgrade>(), Ok(Upgrade::IonEngine));
        let err = "warp".parse::<Upgrade>().unwrap_err();
        assert_eq!(err.kind, "upgrade");
        assert_eq!(err.to_string(), "unknown upgrade: \"warp\"");
    }

    #[test]
    fn test_exhaust_color() {
        let mut upgrades = Upgrades::default();
        assert_eq!(upgrades.exhaust_rgb(), (255, 165, 0));
        upgrades.toggle(Upgrade::IonEngine);
        assert_eq!(upgrades.exhaust_rgb(), (0, 255, 255));
    }
}
