use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::{PlayerId, SeatIndex};

/// Позиция за столом. Пересчитывается каждую раздачу от кнопки.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Position {
    Dealer,
    SmallBlind,
    BigBlind,
}

/// Один игрок (место) за столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Фиксированный порядок посадки.
    pub seat_index: SeatIndex,
    /// Фишки, ещё не поставленные в этой раздаче.
    pub stack: Chips,
    /// Ставка в текущем раунде торговли (сбрасывается каждую улицу).
    pub current_bet: Chips,
    /// Сколько всего поставлено за раздачу – из этого считаются сайд-поты.
    pub total_bet_this_hand: Chips,
    pub folded: bool,
    pub all_in: bool,
    pub has_acted_this_round: bool,
    /// None – без позиции (между раздачами или «лишние» места).
    pub position: Option<Position>,
    /// Сколько фишек игрок завёл за всё время (для подсчёта профита).
    pub buy_in: Chips,
    /// Игрок сидит за столом, но раздачи пропускает.
    pub is_sitting_out: bool,
    /// Отложенный переключатель sit out – применяется только на границе раздач.
    pub sit_out_next_hand: bool,
    /// Отложенное удаление – применяется только на границе раздач.
    pub delete_next_hand: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: String, seat_index: SeatIndex, buy_in: Chips) -> Self {
        Self {
            id,
            name,
            seat_index,
            stack: buy_in,
            current_bet: Chips::ZERO,
            total_bet_this_hand: Chips::ZERO,
            folded: false,
            all_in: false,
            has_acted_this_round: false,
            position: None,
            buy_in,
            is_sitting_out: false,
            sit_out_next_hand: false,
            delete_next_hand: false,
        }
    }

    /// Участвует ли игрок в текущей раздаче.
    pub fn is_in_hand(&self) -> bool {
        !self.folded
    }

    /// Может ли игрок ещё принимать решения в этом раунде.
    pub fn can_act(&self) -> bool {
        !self.folded && !self.all_in
    }

    /// Допущен ли игрок к новой раздаче: есть фишки и не сидит в стороне.
    pub fn is_eligible(&self) -> bool {
        !self.is_sitting_out && !self.stack.is_zero()
    }

    /// Профит относительно всех закупок (может быть отрицательным).
    pub fn net_result(&self) -> i64 {
        self.stack.0 as i64 - self.buy_in.0 as i64
    }
}
