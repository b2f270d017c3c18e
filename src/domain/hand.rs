use serde::{Deserialize, Serialize};

/// Фаза раздачи.
///
/// `Paused` – служебное состояние: за столом меньше двух допущенных игроков,
/// раздача не может начаться, пока состав не поправят.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    Paused,
}

impl Phase {
    /// Следующая улица в обычном порядке. Showdown – терминал раздачи.
    pub fn next_street(self) -> Phase {
        match self {
            Phase::Setup | Phase::Paused => Phase::Preflop,
            Phase::Preflop => Phase::Flop,
            Phase::Flop => Phase::Turn,
            Phase::Turn => Phase::River,
            Phase::River | Phase::Showdown => Phase::Showdown,
        }
    }

    /// Идёт ли на этой фазе торговля.
    pub fn is_betting(self) -> bool {
        matches!(
            self,
            Phase::Preflop | Phase::Flop | Phase::Turn | Phase::River
        )
    }

    /// Сколько общих карт должно лежать на столе.
    /// Карты физические – движок их только пересчитывает для подсказки дилеру.
    pub fn community_cards(self) -> u8 {
        match self {
            Phase::Setup | Phase::Preflop | Phase::Paused => 0,
            Phase::Flop => 3,
            Phase::Turn => 4,
            Phase::River | Phase::Showdown => 5,
        }
    }
}
