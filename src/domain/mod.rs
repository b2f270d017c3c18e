//! Доменная модель «безфишечного» покера: фишки, игроки, банки, блайнды, фазы.
//!
//! Карты здесь не живут – они физические, на столе у людей.
//! Движок считает только стеки, ставки и банки.

pub mod blinds;
pub mod chips;
pub mod hand;
pub mod player;
pub mod pot;

/// Идентификатор игрока. Стабилен на всю сессию, выдаётся генератором.
pub type PlayerId = u64;

/// Индекс места за столом (0..n-1, порядок посадки).
pub type SeatIndex = usize;

/// Ограничения и значения стола по умолчанию.
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 9;
pub const DEFAULT_INITIAL_STACK: u64 = 200;
pub const DEFAULT_SMALL_BLIND: u64 = 1;
pub const DEFAULT_BIG_BLIND: u64 = 2;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Player и т.п.
pub use blinds::*;
pub use chips::*;
pub use hand::*;
pub use player::*;
pub use pot::*;
