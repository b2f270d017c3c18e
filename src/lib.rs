//! Движок раздачи для «безфишечного» покера.
//!
//! Люди раздают физические карты и сами вскрываются; софт ведёт только
//! стеки, ставки, блайнды и банки одного кеш-стола NLHE. Здесь –
//! детерминированное ядро правил:
//!   - машина фаз (блайнды → улицы → шоудаун);
//!   - торговля: проверка и применение действий, конец раунда;
//!   - сайд-поты при неравных all-in и точная раздача банков;
//!   - undo на неизменяемых снэпшотах состояния.
//!
//! Рендер, диалоги, хранение – внешние коллабораторы; они ходят только
//! через операции `session::GameSession`.

pub mod domain;
pub mod engine;
pub mod infra;
pub mod session;

pub use domain::{Blinds, Chips, ConfigError, Phase, Player, PlayerId, Position, Pot, SeatIndex};
pub use engine::{
    ActionError, ActionRecord, AvailableActions, HandRecord, HandState, PlayerAction,
};
pub use infra::{IdGenerator, InMemorySessionStorage, RandomSource, SessionSnapshot, SessionStorage};
pub use session::{GameSession, RosterChange, SessionError};
