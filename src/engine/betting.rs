use serde::{Deserialize, Serialize};

use crate::domain::{Chips, Player};
use crate::engine::actions::PlayerAction;

/// Что игрок может сделать прямо сейчас и в каких пределах.
///
/// Считается заново перед каждым ходом; UI рисует кнопки строго по этим флагам.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AvailableActions {
    /// Фолд доступен всегда.
    pub can_fold: bool,
    pub can_check: bool,
    pub can_call: bool,
    /// Сколько нужно доложить для колла (не больше стека – колл «в долг» не бывает).
    pub call_amount: Chips,
    pub can_bet: bool,
    pub can_raise: bool,
    /// Минимальный бет – большой блайнд.
    pub min_bet: Chips,
    /// Минимальная итоговая ставка при рейзе («рейз до»).
    pub min_raise_to: Chips,
    /// Максимум – весь стек (итоговая ставка при all-in).
    pub max_bet: Chips,
}

/// Посчитать доступные действия игрока при текущем состоянии торговли.
pub fn available_actions(
    player: &Player,
    current_bet: Chips,
    min_raise: Chips,
    big_blind: Chips,
) -> AvailableActions {
    let to_call = current_bet.saturating_sub(player.current_bet);

    // Чек – когда доплачивать нечего.
    let can_check = to_call.is_zero();

    // Колл – когда есть что уравнивать и есть фишки.
    // Стека может не хватить – тогда это колл all-in «на меньшее».
    let can_call = !to_call.is_zero() && !player.stack.is_zero();
    let call_amount = to_call.min(player.stack);

    // Бет – только пока никто не ставил.
    let can_bet = current_bet.is_zero() && !player.stack.is_zero();

    // Рейз – когда ставка есть и стек больше, чем нужно для колла.
    let can_raise = !current_bet.is_zero() && player.stack > to_call;
    let raise_step = min_raise.max(big_blind);

    AvailableActions {
        can_fold: true,
        can_check,
        can_call,
        call_amount,
        can_bet,
        can_raise,
        min_bet: big_blind,
        min_raise_to: current_bet + raise_step,
        max_bet: player.stack + player.current_bet,
    }
}

/// Результат применения действия.
///
/// Чистая трансформация: игрок возвращается обновлённой копией,
/// записать его обратно и сбросить чужие `has_acted_this_round`
/// при рейзе – забота вызывающего.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppliedAction {
    pub player: Player,
    /// Сколько фишек ушло из стека этим действием.
    pub bet_amount: Chips,
    /// Новая целевая ставка стола (меняется при bet/raise/all-in-рейзе).
    pub new_current_bet: Chips,
}

/// Применить действие к игроку.
///
/// Суммы в `Bet`/`Raise` – итоговая ставка игрока, не приращение.
pub fn process_action(player: &Player, action: &PlayerAction, current_bet: Chips) -> AppliedAction {
    let mut updated = player.clone();
    let mut bet_amount = Chips::ZERO;
    let mut new_current_bet = current_bet;

    match *action {
        PlayerAction::Fold => {
            updated.folded = true;
        }

        PlayerAction::Check => {}

        PlayerAction::Call => {
            // Не больше стека: короткий стек коллирует all-in «на меньшее».
            bet_amount = current_bet.saturating_sub(player.current_bet).min(player.stack);
            updated.stack -= bet_amount;
            updated.current_bet += bet_amount;
            updated.total_bet_this_hand += bet_amount;
            if updated.stack.is_zero() {
                updated.all_in = true;
            }
        }

        PlayerAction::Bet(amount) | PlayerAction::Raise(amount) => {
            bet_amount = amount.saturating_sub(player.current_bet);
            updated.stack -= bet_amount;
            updated.current_bet = amount;
            updated.total_bet_this_hand += bet_amount;
            new_current_bet = amount;
            if updated.stack.is_zero() {
                updated.all_in = true;
            }
        }

        PlayerAction::AllIn => {
            bet_amount = player.stack;
            updated.current_bet += bet_amount;
            updated.total_bet_this_hand += bet_amount;
            updated.stack = Chips::ZERO;
            updated.all_in = true;
            // All-in выше текущей ставки – это по сути рейз.
            if updated.current_bet > current_bet {
                new_current_bet = updated.current_bet;
            }
        }
    }

    AppliedAction {
        player: updated,
        bet_amount,
        new_current_bet,
    }
}

/// Завершён ли раунд торговли.
///
/// Проверяется после каждого действия:
/// - остался один несфолдивший – раунд окончен;
/// - все несфолдившие в all-in – окончен;
/// - иначе каждый, кто может ходить, должен был сходить и уравнять ставку.
pub fn is_betting_round_complete(players: &[Player], current_bet: Chips) -> bool {
    let active: Vec<&Player> = players.iter().filter(|p| !p.folded).collect();

    if active.len() <= 1 {
        return true;
    }

    let can_act: Vec<&&Player> = active.iter().filter(|p| !p.all_in).collect();

    if can_act.is_empty() {
        return true;
    }

    if !can_act.iter().all(|p| p.has_acted_this_round) {
        return false;
    }

    can_act.iter().all(|p| p.current_bet == current_bet)
}

/// Следующий игрок, который может ходить (по кругу после current_index).
///
/// None – ходить больше некому; это сигнал конца раунда, не ошибка.
pub fn next_player_index(players: &[Player], current_index: usize) -> Option<usize> {
    let n = players.len();
    if n == 0 {
        return None;
    }

    let mut next = (current_index + 1) % n;
    for _ in 0..n {
        if players[next].can_act() {
            return Some(next);
        }
        next = (next + 1) % n;
    }

    None
}
