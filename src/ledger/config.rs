//! # Game Configuration
//!
//! Defaults for a fresh game and the house rules the state machine enforces.
//! Every field has a default, so an empty JSON object is a valid config.
//!
//! ```rust
//! use poker_night::core::Money;
//! use poker_night::ledger::GameConfig;
//!
//! # #[cfg(feature = "serde")]
//! # {
//! let config = GameConfig::from_json(r#"{"min_players": 3, "chip_tolerance": 1.0}"#).unwrap();
//! assert_eq!(config.min_players, 3);
//! assert_eq!(config.default_buy_in, Money::from_units(100));
//! # }
//! ```
//!
//! Money fields are written in cents: `{"buy_in_unit": 2500}` rounds committed
//! buy-ins to multiples of 25.00.

#[cfg(feature = "serde")]
use std::path::Path;

use crate::core::{Currency, Money};

use super::errors::ConfigError;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Buy-in of a fresh game.
    pub default_buy_in: Money,
    /// Chips per buy-in of a fresh game.
    pub default_chips_per_buy_in: u32,
    /// Currency of a fresh game.
    pub default_currency: Currency,
    /// Committed buy-ins are rounded to a multiple of this.
    pub buy_in_unit: Money,
    /// Players needed to start.
    pub min_players: usize,
    /// How far, in chips, the chips counted out may be from the chips bought
    /// in before the final cash-out is refused.
    pub chip_tolerance: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            default_buy_in: Money::from_units(100),
            default_chips_per_buy_in: 200,
            default_currency: Currency::Shekel,
            buy_in_unit: Money::from_units(50),
            min_players: 2,
            chip_tolerance: 0.5,
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_buy_in.is_positive() {
            return Err(ConfigError::Invalid(format!(
                "default_buy_in must be positive, got {}",
                self.default_buy_in
            )));
        }

        if self.default_chips_per_buy_in == 0 {
            return Err(ConfigError::Invalid(
                "default_chips_per_buy_in must be positive".to_string(),
            ));
        }

        if !self.buy_in_unit.is_positive() {
            return Err(ConfigError::Invalid(format!(
                "buy_in_unit must be positive, got {}",
                self.buy_in_unit
            )));
        }

        if self.min_players < 2 {
            return Err(ConfigError::Invalid(format!(
                "min_players must be at least 2, got {}",
                self.min_players
            )));
        }

        if !self.chip_tolerance.is_finite() || self.chip_tolerance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "chip_tolerance must be a non-negative number, got {}",
                self.chip_tolerance
            )));
        }

        Ok(())
    }

    /// Turn whatever the user typed into a legal buy-in: the nearest multiple
    /// of `buy_in_unit`, and never less than one unit.
    ///
    /// ```
    /// use poker_night::core::Money;
    /// use poker_night::ledger::GameConfig;
    ///
    /// let config = GameConfig::default();
    /// assert_eq!(config.commit_buy_in(Money::from_units(130)), Money::from_units(150));
    /// assert_eq!(config.commit_buy_in(Money::from_units(10)), Money::from_units(50));
    /// ```
    pub fn commit_buy_in(&self, raw: Money) -> Money {
        raw.round_to_unit(self.buy_in_unit).max(self.buy_in_unit)
    }

    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "serde")]
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_buy_in, Money::from_units(100));
        assert_eq!(config.default_chips_per_buy_in, 200);
        assert_eq!(config.buy_in_unit, Money::from_units(50));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = GameConfig {
            min_players: 1,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            chip_tolerance: -0.1,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            chip_tolerance: f64::NAN,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            buy_in_unit: Money::ZERO,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            default_chips_per_buy_in: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_commit_buy_in() {
        let config = GameConfig::default();
        assert_eq!(config.commit_buy_in(Money::from_units(100)), Money::from_units(100));
        assert_eq!(config.commit_buy_in(Money::from_units(124)), Money::from_units(100));
        assert_eq!(config.commit_buy_in(Money::from_units(125)), Money::from_units(150));
        assert_eq!(config.commit_buy_in(Money::ZERO), Money::from_units(50));
        assert_eq!(config.commit_buy_in(Money::from_units(-300)), Money::from_units(50));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json_partial() {
        let config = GameConfig::from_json(r#"{"buy_in_unit": 2500}"#).unwrap();
        assert_eq!(config.buy_in_unit, Money::from_units(25));
        assert_eq!(config.min_players, 2);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(matches!(
            GameConfig::from_json(r#"{"min_players": 0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GameConfig::from_json("not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_file_missing() {
        let result = GameConfig::from_file("/definitely/not/a/real/config.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
