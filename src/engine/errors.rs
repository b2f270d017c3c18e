use thiserror::Error;

use crate::domain::Chips;

/// Ошибки валидации действий.
///
/// Всегда возвращаются значениями – движок не паникует и не меняет
/// состояние при отказе. Как именно показать ошибку, решает UI.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("чек невозможен – нужно уравнять ставку или сфолдить")]
    IllegalCheck,

    #[error("нечего уравнивать – текущей ставки нет")]
    NoCallAmount,

    #[error("бет сейчас невозможен – ставка уже сделана")]
    BetNotAllowed,

    #[error("минимальный бет – {min}")]
    BelowMinimumBet { min: Chips },

    #[error("рейз сейчас невозможен")]
    RaiseNotAllowed,

    #[error("минимальный рейз – до {min}")]
    BelowMinimumRaise { min: Chips },

    #[error("не хватает фишек")]
    InsufficientStack,

    #[error("нет фишек для all-in")]
    NoStackToAllIn,

    #[error("сейчас ничей ход")]
    NoCurrentPlayer,

    #[error("торговля сейчас не идёт")]
    HandNotInProgress,
}
