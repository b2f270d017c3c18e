use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::domain::{Blinds, Chips, Phase, Player, Pot};
use crate::engine::betting::next_player_index;
use crate::engine::history::ActionRecord;
use crate::engine::positions::{assign_positions, next_eligible_after, next_funded_after};
use crate::engine::side_pots::{calculate_side_pots, total_pot};
use crate::infra::ids::IdGenerator;
use crate::infra::rng::RandomSource;

/// Полное состояние раздачи – единственный агрегат движка.
///
/// Создаётся один раз на сессию стола; новая раздача сбрасывает
/// пораундовые поля, но не стеки, не buy-in и не порядок посадки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HandState {
    pub phase: Phase,
    /// Игроки в порядке посадки.
    pub players: Vec<Player>,
    /// Место кнопки.
    pub dealer_index: usize,
    /// Чей ход. None – ходить некому.
    pub current_player_index: Option<usize>,
    /// Основной банк + сайд-поты.
    pub pots: Vec<Pot>,
    /// Сколько нужно уравнять в текущем раунде.
    pub current_bet: Chips,
    /// Минимальная повышающая часть рейза.
    pub min_raise: Chips,
    /// Размер последнего повышения.
    pub last_raise_amount: Chips,
    /// Сколько общих карт сейчас должно лежать на столе.
    pub community_card_count: u8,
    pub hand_number: u64,
    /// Журнал действий текущей раздачи (append-only).
    pub action_history: Vec<ActionRecord>,
    pub blinds: Blinds,
    /// Шоудаун уже разрешён – фишки разданы.
    pub is_showdown_resolved: bool,
    /// Общий банк на момент входа в шоудаун (для панели результатов).
    pub last_total_pot: Chips,
}

impl HandState {
    pub fn current_player(&self) -> Option<&Player> {
        self.current_player_index.and_then(|i| self.players.get(i))
    }

    /// Несфолдившие игроки.
    pub fn active_players(&self) -> Vec<&Player> {
        self.players.iter().filter(|p| !p.folded).collect()
    }
}

/// Собрать стол: игроки с одинаковым стартовым стеком, случайная кнопка.
pub fn create_initial_state<R: RandomSource>(
    names: &[String],
    initial_stack: Chips,
    blinds: Blinds,
    ids: &mut IdGenerator,
    rng: &mut R,
) -> HandState {
    let mut players: Vec<Player> = names
        .iter()
        .enumerate()
        .map(|(seat, name)| Player::new(ids.next_player_id(), name.clone(), seat, initial_stack))
        .collect();

    let dealer_index = rng.index_below(players.len());
    assign_positions(&mut players, dealer_index);

    let eligible_ids = players.iter().map(|p| p.id).collect();

    HandState {
        phase: Phase::Setup,
        players,
        dealer_index,
        current_player_index: None,
        pots: vec![Pot::empty(eligible_ids)],
        current_bet: Chips::ZERO,
        min_raise: blinds.big_blind,
        last_raise_amount: blinds.big_blind,
        community_card_count: 0,
        hand_number: 0,
        action_history: Vec::new(),
        blinds,
        is_showdown_resolved: false,
        last_total_pot: Chips::ZERO,
    }
}

/// Старт новой раздачи:
/// - применяет отложенные правки состава (sit out / удаление);
/// - сбрасывает пораундовые поля;
/// - постит блайнды, пропуская сидящих в стороне и пустые стеки;
/// - определяет, кто ходит первым.
///
/// Если допущенных игроков меньше двух – раздача не стартует,
/// состояние паркуется в `Paused` до правки состава.
pub fn start_hand(state: &mut HandState) {
    apply_deferred_flags(state);

    let eligible_count = state.players.iter().filter(|p| p.is_eligible()).count();
    if eligible_count < 2 {
        state.phase = Phase::Paused;
        state.current_player_index = None;
        return;
    }

    // Сброс пораундовых полей. Кто не допущен – сразу «сфолдил и сходил»,
    // чтобы торговля его не ждала.
    for p in state.players.iter_mut() {
        let out = !p.is_eligible();
        p.current_bet = Chips::ZERO;
        p.total_bet_this_hand = Chips::ZERO;
        p.folded = out;
        p.all_in = false;
        p.has_acted_this_round = out;
    }

    let (sb_index, bb_index) = blind_seats(state, eligible_count);

    if let Some(index) = sb_index {
        post_blind(&mut state.players[index], state.blinds.small_blind);
    }
    if let Some(index) = bb_index {
        post_blind(&mut state.players[index], state.blinds.big_blind);
    }

    state.phase = Phase::Preflop;
    state.current_bet = state.blinds.big_blind;
    state.min_raise = state.blinds.big_blind;
    state.last_raise_amount = state.blinds.big_blind;
    state.community_card_count = 0;
    state.hand_number += 1;
    state.is_showdown_resolved = false;
    state.last_total_pot = Chips::ZERO;

    // Префлоп: хедз-ап ходит кнопка (она же SB), иначе – сосед BB.
    state.current_player_index = if eligible_count == 2 {
        sb_index
    } else {
        bb_index.and_then(|bb| next_eligible_after(&state.players, bb))
    };

    // Основной банк сразу вбирает блайнды.
    let posted: Chips = state.players.iter().map(|p| p.current_bet).sum();
    let eligible_ids = state
        .players
        .iter()
        .filter(|p| !p.folded)
        .map(|p| p.id)
        .collect();
    state.pots = vec![Pot {
        amount: posted,
        eligible_player_ids: eligible_ids,
    }];
    state.action_history.clear();

    info!(
        "раздача #{}: кнопка на месте {}, блайнды {}/{}",
        state.hand_number, state.dealer_index, state.blinds.small_blind, state.blinds.big_blind
    );
}

/// Места малого и большого блайндов с учётом пропусков.
///
/// Хедз-ап: кнопка сама ставит малый блайнд – но только если кнопка
/// вообще в игре; иначе обычный порядок от кнопки.
fn blind_seats(state: &HandState, eligible_count: usize) -> (Option<usize>, Option<usize>) {
    if eligible_count == 2 && state.players[state.dealer_index].is_eligible() {
        let bb = next_eligible_after(&state.players, state.dealer_index);
        (Some(state.dealer_index), bb)
    } else {
        let sb = next_eligible_after(&state.players, state.dealer_index);
        let bb = sb.and_then(|s| next_eligible_after(&state.players, s));
        (sb, bb)
    }
}

/// Поставить блайнд, не больше стека (короткий стек заходит all-in «на меньшее»).
fn post_blind(player: &mut Player, blind: Chips) {
    let amount = blind.min(player.stack);
    player.stack -= amount;
    player.current_bet = amount;
    player.total_bet_this_hand = amount;
    if player.stack.is_zero() {
        player.all_in = true;
    }
}

/// Применить отложенные правки состава – только на границе раздач.
fn apply_deferred_flags(state: &mut HandState) {
    if state.players.iter().any(|p| p.delete_next_hand) {
        // Кнопку держим за игроком, а не за индексом: если дилер удалён,
        // она достаётся следующему выжившему по кругу.
        let n = state.players.len();
        let mut keeper = None;
        for offset in 0..n {
            let index = (state.dealer_index + offset) % n;
            if !state.players[index].delete_next_hand {
                keeper = Some(state.players[index].id);
                break;
            }
        }

        state.players.retain(|p| !p.delete_next_hand);
        for (i, p) in state.players.iter_mut().enumerate() {
            p.seat_index = i;
        }

        state.dealer_index = keeper
            .and_then(|id| state.players.iter().position(|p| p.id == id))
            .unwrap_or(0);
    }

    for p in state.players.iter_mut() {
        if p.sit_out_next_hand {
            p.is_sitting_out = !p.is_sitting_out;
            p.sit_out_next_hand = false;
        }
    }
}

/// Переход на следующую улицу.
///
/// Сначала все вклады раздачи пересобираются в банки (`calculate_side_pots`).
/// Остался один несфолдивший – сразу шоудаун. Если торговать больше некому
/// (все в all-in), улицы докручиваются рекурсивно до шоудауна без ожидания
/// ввода. Ошибок тут не бывает – любое состояние имеет определённый переход.
pub fn advance_phase(state: &mut HandState) {
    let side_pots = calculate_side_pots(&state.players);
    if !side_pots.is_empty() {
        state.pots = side_pots;
    } else if let Some(main) = state.pots.first_mut() {
        // Некого раскладывать по уровням – просто доливаем ставки в общий банк.
        let bets: Chips = state.players.iter().map(|p| p.current_bet).sum();
        main.amount += bets;
    }

    let active_count = state.players.iter().filter(|p| !p.folded).count();

    // Пораундовый сброс нужен в обоих исходах.
    for p in state.players.iter_mut() {
        p.current_bet = Chips::ZERO;
        p.has_acted_this_round = false;
    }
    state.current_bet = Chips::ZERO;

    // Один несфолдивший – победитель известен, улицы не нужны.
    if active_count <= 1 {
        state.phase = Phase::Showdown;
        state.current_player_index = None;
        state.last_total_pot = total_pot(&state.pots);
        debug!("раздача #{}: все сфолдили, сразу шоудаун", state.hand_number);
        return;
    }

    state.min_raise = state.blinds.big_blind;
    state.last_raise_amount = state.blinds.big_blind;

    state.phase = state.phase.next_street();
    state.community_card_count = state.phase.community_cards();

    if state.phase == Phase::Showdown {
        state.current_player_index = None;
        state.last_total_pot = total_pot(&state.pots);
        return;
    }

    // Постфлоп первым ходит ближайший к кнопке, кто ещё может ходить.
    state.current_player_index = next_player_index(&state.players, state.dealer_index);

    debug!(
        "раздача #{}: улица {:?}, первым ходит {:?}",
        state.hand_number, state.phase, state.current_player_index
    );

    // Торговать некому (все в all-in) – докручиваем до шоудауна.
    let can_act_count = state.players.iter().filter(|p| p.can_act()).count();
    if can_act_count <= 1 {
        advance_phase(state);
    }
}

/// Подготовка к следующей раздаче: кнопка уходит к следующему месту
/// с фишками, позиции пересчитываются. Если платёжеспособных игроков
/// меньше двух – игра окончена, стол возвращается в Setup.
pub fn next_hand(state: &mut HandState) {
    match next_funded_after(&state.players, state.dealer_index) {
        Some(next) => state.dealer_index = next,
        None => {
            state.phase = Phase::Setup;
            state.current_player_index = None;
            return;
        }
    }

    assign_positions(&mut state.players, state.dealer_index);

    let funded_count = state
        .players
        .iter()
        .filter(|p| !p.stack.is_zero())
        .count();
    if funded_count < 2 {
        info!("игра окончена: за столом меньше двух стеков");
        state.phase = Phase::Setup;
        state.current_player_index = None;
    }
}
