use serde::{Deserialize, Serialize};

use crate::domain::Chips;

/// Действие игрока. Закрытый набор – матчится исчерпывающе.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerAction {
    Fold,
    Check,
    Call,
    /// Bet на новой улице (когда текущей ставки ещё нет).
    /// Сумма – итоговая ставка игрока.
    Bet(Chips),
    /// Raise существующей ставки. Сумма – итоговая ставка («рейз до»).
    Raise(Chips),
    /// Поставить весь оставшийся стек.
    AllIn,
}
