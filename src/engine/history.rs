use serde::{Deserialize, Serialize};

use crate::domain::{Chips, PlayerId};
use crate::engine::actions::PlayerAction;
use crate::engine::game_loop::HandState;

/// Запись в журнале действий раздачи (append-only).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionRecord {
    pub player_id: PlayerId,
    pub action: PlayerAction,
    /// Сколько фишек реально ушло в банк этим действием (None для fold/check).
    pub amount: Option<Chips>,
    /// Миллисекунды UNIX-времени. Только для отображения, логика от часов не зависит.
    pub timestamp_ms: u64,
}

/// Завершённая раздача в архиве сессии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HandRecord {
    pub hand_number: u64,
    pub actions: Vec<ActionRecord>,
    /// Состояние на момент завершения – для реплеера/истории.
    pub final_state: HandState,
}
