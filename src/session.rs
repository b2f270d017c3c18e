//! Сессия стола – единственный владелец изменяемого состояния.
//!
//! Всё остальное в крейте – чистые функции; здесь живут:
//! - текущий `HandState` и стек снэпшотов для undo;
//! - очередь отложенных правок состава (применяется на границе раздач);
//! - двухфазный переход улицы (пауза под анимацию коллаборатора);
//! - выбор победителей и архив сыгранных раздач.
//!
//! Конкурентных вызовов нет: каждая операция завершается до приёма
//! следующей, блокировки не нужны.

use std::collections::HashMap;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Blinds, Chips, ConfigError, Phase, Player, PlayerId, MAX_PLAYERS, MIN_PLAYERS};
use crate::engine::betting::{
    available_actions, is_betting_round_complete, next_player_index, process_action,
    AvailableActions,
};
use crate::engine::errors::ActionError;
use crate::engine::game_loop::{
    advance_phase, create_initial_state, next_hand, start_hand, HandState,
};
use crate::engine::history::{ActionRecord, HandRecord};
use crate::engine::side_pots::{distribute_pots, total_pot};
use crate::engine::validation::validate_action;
use crate::engine::PlayerAction;
use crate::infra::ids::IdGenerator;
use crate::infra::rng::RandomSource;

/// Ошибки уровня сессии (над ошибками валидации действий).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("нужно от {MIN_PLAYERS} до {MAX_PLAYERS} игроков")]
    BadPlayerCount,

    #[error("игрок {0} не найден")]
    UnknownPlayer(PlayerId),

    #[error("банка с индексом {0} нет")]
    UnknownPot(usize),

    #[error("игрок {0} не претендует на этот банк")]
    IneligibleWinner(PlayerId),

    #[error("шоудаун ещё не наступил")]
    NotInShowdown,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Action(#[from] ActionError),
}

/// Отложенная правка состава. Копится в очереди и применяется
/// только при старте новой раздачи – никогда посреди раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum RosterChange {
    AddPlayer { name: String, buy_in: Chips },
    UpdateBlinds(Blinds),
    SetSeatOrder(Vec<PlayerId>),
}

/// Сессия одного стола.
pub struct GameSession {
    pub(crate) state: HandState,
    /// Снэпшоты состояния перед каждой мутацией – стек undo.
    /// Чистится при старте новой раздачи (undo между раздачами нет).
    pub(crate) undo_stack: Vec<HandState>,
    /// Выбранные победители: индекс банка → список ID.
    pub(crate) selected_winners: HashMap<usize, Vec<PlayerId>>,
    /// Отложенный переход улицы: действие уже применено и банки собраны,
    /// сам переход коллаборатор подтверждает отдельным вызовом.
    pub(crate) pending_phase: Option<Phase>,
    pub(crate) pending_roster: Vec<RosterChange>,
    pub(crate) show_phase_notifications: bool,
    /// Архив сыгранных раздач.
    pub(crate) hand_archive: Vec<HandRecord>,
    pub(crate) ids: IdGenerator,
}

impl GameSession {
    /// Собрать стол. Кнопка первой раздачи выбирается через `rng`.
    pub fn new<R: RandomSource>(
        names: &[String],
        initial_stack: Chips,
        small_blind: Chips,
        big_blind: Chips,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        if names.len() < MIN_PLAYERS || names.len() > MAX_PLAYERS {
            return Err(SessionError::BadPlayerCount);
        }

        let blinds = Blinds::new(small_blind, big_blind);
        blinds.validate()?;

        let mut ids = IdGenerator::new();
        let state = create_initial_state(names, initial_stack, blinds, &mut ids, rng);

        info!("стол собран: {} игроков, стек {}", names.len(), initial_stack);

        Ok(Self {
            state,
            undo_stack: Vec::new(),
            selected_winners: HashMap::new(),
            pending_phase: None,
            pending_roster: Vec::new(),
            show_phase_notifications: true,
            hand_archive: Vec::new(),
            ids,
        })
    }

    // ------------------------------------------------------------------
    // Жизненный цикл раздачи
    // ------------------------------------------------------------------

    /// Начать новую раздачу: применить отложенные правки, раздать блайнды.
    /// Стек undo чистится – откат в прошлую раздачу невозможен.
    pub fn start_new_hand(&mut self) {
        self.apply_pending_roster();
        start_hand(&mut self.state);

        self.undo_stack.clear();
        self.selected_winners.clear();
        self.pending_phase = None;

        // Блайнды могли посадить всех в all-in – тогда торговать некому
        // и улицы сразу докручиваются до шоудауна.
        if self.state.phase.is_betting()
            && is_betting_round_complete(&self.state.players, self.state.current_bet)
        {
            advance_phase(&mut self.state);
        }
    }

    /// Действие текущего игрока.
    ///
    /// Валидация → снэпшот → применение → проверка конца раунда.
    /// Любой отказ возвращается значением и не трогает состояние.
    pub fn submit_action(&mut self, action: PlayerAction) -> Result<(), ActionError> {
        // Раунд завершён и ждёт подтверждения перехода – новых действий
        // не принимаем, иначе нарушится монотонность конца раунда.
        if !self.state.phase.is_betting() || self.pending_phase.is_some() {
            return Err(ActionError::HandNotInProgress);
        }

        let index = self
            .state
            .current_player_index
            .ok_or(ActionError::NoCurrentPlayer)?;
        // Работаем с копией игрока: движок применяет действие к клону,
        // запись обратно – после успешной валидации.
        let player = self
            .state
            .players
            .get(index)
            .ok_or(ActionError::NoCurrentPlayer)?
            .clone();

        validate_action(
            &action,
            &player,
            self.state.current_bet,
            self.state.min_raise,
            self.state.blinds.big_blind,
        )?;

        self.push_snapshot();

        let bet_before = self.state.current_bet;
        let mut applied = process_action(&player, &action, bet_before);
        applied.player.has_acted_this_round = true;

        let player_id = applied.player.id;
        let is_raise = matches!(action, PlayerAction::Bet(_) | PlayerAction::Raise(_))
            || (matches!(action, PlayerAction::AllIn) && applied.player.current_bet > bet_before);

        let bet_amount = applied.bet_amount;
        let new_current_bet = applied.new_current_bet;
        self.state.players[index] = applied.player;

        // Рейз переоткрывает торговлю: все, кто уже ходил по старой
        // ставке, должны ответить ещё раз.
        if is_raise {
            for (i, p) in self.state.players.iter_mut().enumerate() {
                if i != index {
                    p.has_acted_this_round = false;
                }
            }
        }

        // Минимальный рейз растёт только если повышение крупнее предыдущего.
        if let PlayerAction::Bet(amount) | PlayerAction::Raise(amount) = action {
            let raise_amount = amount.saturating_sub(bet_before);
            if raise_amount > self.state.last_raise_amount {
                self.state.min_raise = raise_amount;
            }
            self.state.last_raise_amount = raise_amount;
        }

        self.state.current_bet = new_current_bet;

        self.state.action_history.push(ActionRecord {
            player_id,
            action,
            amount: if bet_amount.is_zero() {
                None
            } else {
                Some(bet_amount)
            },
            timestamp_ms: now_ms(),
        });

        debug!(
            "игрок {}: {:?}, в банк {}, ставка стола {}",
            player_id, action, bet_amount, new_current_bet
        );

        if is_betting_round_complete(&self.state.players, self.state.current_bet) {
            let mut advanced = self.state.clone();
            advance_phase(&mut advanced);
            let next_phase = advanced.phase;

            // Флоп/тёрн/ривер коллаборатор подтверждает после своей паузы:
            // банки показываем сразу, сам переход откладываем.
            let hold = self.show_phase_notifications
                && matches!(next_phase, Phase::Flop | Phase::Turn | Phase::River);

            if hold {
                self.state.pots = advanced.pots;
                self.pending_phase = Some(next_phase);
            } else {
                self.state = advanced;
            }
        } else {
            match next_player_index(&self.state.players, index) {
                Some(next) => self.state.current_player_index = Some(next),
                // Ходить некому – защитный переход улицы.
                None => advance_phase(&mut self.state),
            }
        }

        Ok(())
    }

    /// Подтвердить отложенный переход улицы.
    ///
    /// Если undo уже откатил состояние, флаг сброшен и вызов ничего не
    /// делает – устаревший переход не перетрёт восстановленный снэпшот.
    pub fn commit_phase_transition(&mut self) {
        if self.pending_phase.take().is_none() {
            return;
        }
        advance_phase(&mut self.state);
    }

    /// Назначить победителей банка (чоп – несколько ID).
    pub fn select_pot_winners(
        &mut self,
        pot_index: usize,
        winner_ids: Vec<PlayerId>,
    ) -> Result<(), SessionError> {
        let pot = self
            .state
            .pots
            .get(pot_index)
            .ok_or(SessionError::UnknownPot(pot_index))?;

        for id in &winner_ids {
            if !pot.eligible_player_ids.contains(id) {
                return Err(SessionError::IneligibleWinner(*id));
            }
        }

        self.selected_winners.insert(pot_index, winner_ids);
        Ok(())
    }

    /// Раздать банки по выбранным победителям.
    pub fn resolve_showdown(&mut self) -> Result<(), SessionError> {
        if self.state.phase != Phase::Showdown {
            return Err(SessionError::NotInShowdown);
        }
        if self.state.is_showdown_resolved {
            return Ok(());
        }

        self.push_snapshot();

        let payout = distribute_pots(&self.state.pots, &self.selected_winners);
        self.state.last_total_pot = total_pot(&self.state.pots);

        for p in self.state.players.iter_mut() {
            if let Some(won) = payout.get(&p.id) {
                p.stack += *won;
            }
        }
        for pot in self.state.pots.iter_mut() {
            pot.amount = Chips::ZERO;
        }
        self.state.is_showdown_resolved = true;

        info!(
            "раздача #{}: банк {} роздан",
            self.state.hand_number, self.state.last_total_pot
        );
        Ok(())
    }

    /// Закрыть раздачу и начать следующую: архив, кнопка дальше, блайнды.
    /// Если платёжеспособных игроков меньше двух – стол уходит в Setup.
    pub fn proceed_to_next_hand(&mut self) {
        self.hand_archive.push(HandRecord {
            hand_number: self.state.hand_number,
            actions: self.state.action_history.clone(),
            final_state: self.state.clone(),
        });

        next_hand(&mut self.state);
        self.selected_winners.clear();

        if self.state.phase == Phase::Setup {
            self.undo_stack.clear();
            self.pending_phase = None;
            return;
        }

        self.start_new_hand();
    }

    // ------------------------------------------------------------------
    // Undo
    // ------------------------------------------------------------------

    /// Откатить последнюю мутацию. Возвращает false, если откатывать нечего.
    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(previous) => {
                self.state = previous;
                // Запланированный переход больше не актуален –
                // его проверка флага теперь не сработает.
                self.pending_phase = None;
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    fn push_snapshot(&mut self) {
        self.undo_stack.push(self.state.clone());
    }

    // ------------------------------------------------------------------
    // Отложенные правки состава
    // ------------------------------------------------------------------

    /// Посадить нового игрока (встанет на свободное место при старте
    /// следующей раздачи).
    pub fn add_player(&mut self, name: impl Into<String>, buy_in: Chips) {
        self.pending_roster.push(RosterChange::AddPlayer {
            name: name.into(),
            buy_in,
        });
    }

    /// Переключить «пропускает раздачи» – вступит в силу со следующей раздачи.
    pub fn toggle_sit_out_next_hand(&mut self, id: PlayerId) -> Result<(), SessionError> {
        let player = self.player_mut(id)?;
        player.sit_out_next_hand = !player.sit_out_next_hand;
        Ok(())
    }

    /// Пометить на удаление – уйдёт из-за стола на границе раздач.
    pub fn toggle_delete_next_hand(&mut self, id: PlayerId) -> Result<(), SessionError> {
        let player = self.player_mut(id)?;
        player.delete_next_hand = !player.delete_next_hand;
        Ok(())
    }

    /// Сменить блайнды со следующей раздачи.
    pub fn update_blinds(&mut self, small_blind: Chips, big_blind: Chips) -> Result<(), SessionError> {
        let blinds = Blinds::new(small_blind, big_blind);
        blinds.validate()?;
        self.pending_roster.push(RosterChange::UpdateBlinds(blinds));
        Ok(())
    }

    /// Пересадить игроков (drag-and-drop во внешнем UI) – со следующей раздачи.
    pub fn set_seat_order(&mut self, order: Vec<PlayerId>) -> Result<(), SessionError> {
        for id in &order {
            if !self.state.players.iter().any(|p| p.id == *id) {
                return Err(SessionError::UnknownPlayer(*id));
            }
        }
        self.pending_roster.push(RosterChange::SetSeatOrder(order));
        Ok(())
    }

    fn apply_pending_roster(&mut self) {
        for change in std::mem::take(&mut self.pending_roster) {
            match change {
                RosterChange::AddPlayer { name, buy_in } => {
                    if self.state.players.len() >= MAX_PLAYERS {
                        warn!("стол полон – {} не добавлен", name);
                        continue;
                    }
                    let seat = self.state.players.len();
                    let id = self.ids.next_player_id();
                    self.state
                        .players
                        .push(Player::new(id, name, seat, buy_in));
                }
                RosterChange::UpdateBlinds(blinds) => {
                    self.state.blinds = blinds;
                }
                RosterChange::SetSeatOrder(order) => self.reorder_seats(&order),
            }
        }
    }

    fn reorder_seats(&mut self, order: &[PlayerId]) {
        let dealer_id = self
            .state
            .players
            .get(self.state.dealer_index)
            .map(|p| p.id);

        let mut rest = std::mem::take(&mut self.state.players);
        let mut reordered = Vec::with_capacity(rest.len());
        for id in order {
            if let Some(pos) = rest.iter().position(|p| p.id == *id) {
                reordered.push(rest.remove(pos));
            }
        }
        // Не упомянутые остаются в конце в прежнем порядке.
        reordered.extend(rest);

        for (i, p) in reordered.iter_mut().enumerate() {
            p.seat_index = i;
        }
        self.state.players = reordered;

        // Кнопка следует за игроком, не за индексом.
        if let Some(id) = dealer_id {
            if let Some(pos) = self.state.players.iter().position(|p| p.id == id) {
                self.state.dealer_index = pos;
            }
        }
    }

    fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, SessionError> {
        self.state
            .players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(SessionError::UnknownPlayer(id))
    }

    // ------------------------------------------------------------------
    // Чтение
    // ------------------------------------------------------------------

    pub fn state(&self) -> &HandState {
        &self.state
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.state.current_player()
    }

    /// Доступные действия текущего игрока. None – сейчас никто не ходит
    /// (нет раздачи, шоудаун или раунд ждёт подтверждения перехода).
    pub fn available_actions_for_current(&self) -> Option<AvailableActions> {
        if !self.state.phase.is_betting() || self.pending_phase.is_some() {
            return None;
        }
        let player = self.current_player()?;
        Some(available_actions(
            player,
            self.state.current_bet,
            self.state.min_raise,
            self.state.blinds.big_blind,
        ))
    }

    pub fn total_pot(&self) -> Chips {
        total_pot(&self.state.pots)
    }

    pub fn active_players(&self) -> Vec<&Player> {
        self.state.active_players()
    }

    pub fn is_current_player_turn(&self, id: PlayerId) -> bool {
        self.current_player().map(|p| p.id) == Some(id)
    }

    pub fn can_player_act(&self, id: PlayerId) -> bool {
        if !self.state.phase.is_betting() || self.pending_phase.is_some() {
            return false;
        }
        match self.current_player() {
            Some(p) => p.id == id && p.can_act(),
            None => false,
        }
    }

    pub fn pending_phase(&self) -> Option<Phase> {
        self.pending_phase
    }

    pub fn toggle_phase_notifications(&mut self) {
        self.show_phase_notifications = !self.show_phase_notifications;
    }

    pub fn show_phase_notifications(&self) -> bool {
        self.show_phase_notifications
    }

    pub fn hand_archive(&self) -> &[HandRecord] {
        &self.hand_archive
    }

    pub fn selected_winners(&self) -> &HashMap<usize, Vec<PlayerId>> {
        &self.selected_winners
    }
}

/// Миллисекунды UNIX-времени для журнала действий.
/// Логика движка от часов не зависит – это только метка для истории.
#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn now_ms() -> u64 {
    // В wasm без хостовых биндингов часов нет – метки нулевые.
    0
}
