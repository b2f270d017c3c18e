use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::chips::Chips;

/// Блайнды кеш-стола. Эскалации уровней нет – это не турнир.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Blinds {
    pub small_blind: Chips,
    pub big_blind: Chips,
}

impl Blinds {
    pub fn new(small_blind: Chips, big_blind: Chips) -> Self {
        Self {
            small_blind,
            big_blind,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.small_blind.is_zero() {
            return Err(ConfigError::ZeroSmallBlind);
        }
        if self.big_blind <= self.small_blind {
            return Err(ConfigError::BigBlindTooSmall {
                small: self.small_blind,
                big: self.big_blind,
            });
        }
        Ok(())
    }
}

/// Ошибки конфигурации стола.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("малый блайнд не может быть нулевым")]
    ZeroSmallBlind,

    #[error("большой блайнд ({big}) должен быть больше малого ({small})")]
    BigBlindTooSmall { small: Chips, big: Chips },
}
