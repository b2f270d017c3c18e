use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::PlayerId;

/// Банк (основной или сайд): сумма и те, кто может её выиграть.
///
/// Несколько банков сосуществуют только при неравных all-in.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    pub amount: Chips,
    /// Игроки, чей вклад дотянулся до уровня этого банка.
    pub eligible_player_ids: Vec<PlayerId>,
}

impl Pot {
    pub fn empty(eligible_player_ids: Vec<PlayerId>) -> Self {
        Self {
            amount: Chips::ZERO,
            eligible_player_ids,
        }
    }

    /// Тот же список претендентов (порядок не важен)?
    pub fn same_eligibility(&self, other: &Pot) -> bool {
        self.eligible_player_ids.len() == other.eligible_player_ids.len()
            && self
                .eligible_player_ids
                .iter()
                .all(|id| other.eligible_player_ids.contains(id))
    }
}
