use serde::{Deserialize, Serialize};

use crate::domain::PlayerId;

/// Монотонная выдача идентификаторов игроков.
///
/// Сессия – единственный владелец (всё строго однопоточно), поэтому
/// обычный счётчик; в снэпшот сессии он уходит как есть, чтобы после
/// восстановления ID не начали повторяться.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdGenerator {
    next_player: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next_player: 1 }
    }

    pub fn next_player_id(&mut self) -> PlayerId {
        let id = self.next_player;
        self.next_player += 1;
        id
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
