use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Phase, PlayerId};
use crate::engine::game_loop::HandState;
use crate::engine::history::HandRecord;
use crate::infra::ids::IdGenerator;
use crate::session::{GameSession, RosterChange};

/// Снэпшот всей сессии – «замороженный» стол.
///
/// Это контракт для коллаборатора-хранилища: сессия целиком
/// сериализуется в плоскую структуру и восстанавливается бит-в-бит
/// (перезагрузка страницы не теряет раздачу). Сам движок никакого
/// ввода-вывода не делает.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    pub state: HandState,
    pub undo_stack: Vec<HandState>,
    pub selected_winners: HashMap<usize, Vec<PlayerId>>,
    pub pending_phase: Option<Phase>,
    pub pending_roster: Vec<RosterChange>,
    pub show_phase_notifications: bool,
    pub hand_archive: Vec<HandRecord>,
    pub ids: IdGenerator,
}

impl SessionSnapshot {
    /// Упаковать живую сессию в снэпшот.
    pub fn from_session(session: &GameSession) -> Self {
        Self {
            state: session.state.clone(),
            undo_stack: session.undo_stack.clone(),
            selected_winners: session.selected_winners.clone(),
            pending_phase: session.pending_phase,
            pending_roster: session.pending_roster.clone(),
            show_phase_notifications: session.show_phase_notifications,
            hand_archive: session.hand_archive.clone(),
            ids: session.ids.clone(),
        }
    }

    /// Развернуть снэпшот обратно в сессию.
    pub fn into_session(self) -> GameSession {
        GameSession {
            state: self.state,
            undo_stack: self.undo_stack,
            selected_winners: self.selected_winners,
            pending_phase: self.pending_phase,
            pending_roster: self.pending_roster,
            show_phase_notifications: self.show_phase_notifications,
            hand_archive: self.hand_archive,
            ids: self.ids,
        }
    }
}

/// Абстракция хранилища сессии.
///
/// Реальный коллаборатор пишет в localStorage/БД, для тестов и
/// локального запуска есть in-memory реализация.
pub trait SessionStorage {
    fn save(&mut self, snapshot: &SessionSnapshot);
    fn load(&self) -> Option<SessionSnapshot>;
    fn clear(&mut self);
}

/// Простое in-memory хранилище.
#[derive(Debug, Default)]
pub struct InMemorySessionStorage {
    saved: Option<SessionSnapshot>,
}

impl InMemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for InMemorySessionStorage {
    fn save(&mut self, snapshot: &SessionSnapshot) {
        self.saved = Some(snapshot.clone());
    }

    fn load(&self) -> Option<SessionSnapshot> {
        self.saved.clone()
    }

    fn clear(&mut self) {
        self.saved = None;
    }
}
