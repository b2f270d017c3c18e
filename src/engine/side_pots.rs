use std::collections::HashMap;

use crate::domain::{Chips, Player, PlayerId, Pot};

/// Разложить вклады игроков на банки по уровням all-in.
///
/// Вход: игроки с их суммарными вкладами за раздачу (`total_bet_this_hand`);
/// сфолдившие в раскладке не участвуют. Идём по уровням вкладов снизу вверх:
/// на каждом уровне скидываются все, чей вклад до него дотянулся, и только они
/// могут этот банк выиграть. Банки с одинаковым составом претендентов
/// сливаются в один – один пул победителей, одна выплата.
///
/// Если all-in'ов нет, получается один общий банк.
pub fn calculate_side_pots(players: &[Player]) -> Vec<Pot> {
    let mut bets: Vec<(PlayerId, Chips)> = players
        .iter()
        .filter(|p| !p.folded)
        .map(|p| (p.id, p.total_bet_this_hand))
        .collect();

    if bets.is_empty() {
        return Vec::new();
    }

    // Сортируем по размеру вклада (возрастание) – это и есть уровни.
    bets.sort_by_key(|&(_, bet)| bet);

    let mut pots = Vec::new();
    let mut processed = Chips::ZERO;

    for i in 0..bets.len() {
        let level = bets[i].1;
        // Нулевые вклады и повторы уровня уже покрыты предыдущим слоем.
        if level <= processed {
            continue;
        }
        let level_diff = level - processed;

        let eligible: Vec<PlayerId> = bets
            .iter()
            .filter(|&&(_, bet)| bet >= level)
            .map(|&(id, _)| id)
            .collect();

        pots.push(Pot {
            amount: Chips(level_diff.0 * eligible.len() as u64),
            eligible_player_ids: eligible,
        });

        processed = level;
    }

    merge_same_pots(pots)
}

/// Слить банки с одинаковым составом претендентов.
fn merge_same_pots(pots: Vec<Pot>) -> Vec<Pot> {
    let mut merged: Vec<Pot> = Vec::new();

    for pot in pots {
        match merged.iter_mut().find(|m| m.same_eligibility(&pot)) {
            Some(existing) => existing.amount += pot.amount,
            None => merged.push(pot),
        }
    }

    merged
}

/// Раздать банки выбранным победителям.
///
/// `winners` – индекс банка → список победителей (чоп поддерживается).
/// Банк делится поровну целочисленно; остаток раздаётся по одной фишке,
/// начиная с первого объявленного победителя. Суммы сходятся точно –
/// ни одна фишка не теряется и не появляется из воздуха.
pub fn distribute_pots(
    pots: &[Pot],
    winners: &HashMap<usize, Vec<PlayerId>>,
) -> HashMap<PlayerId, Chips> {
    let mut payout: HashMap<PlayerId, Chips> = HashMap::new();

    for (index, pot) in pots.iter().enumerate() {
        let pot_winners = match winners.get(&index) {
            Some(ids) if !ids.is_empty() => ids,
            _ => continue,
        };

        let share = Chips(pot.amount.0 / pot_winners.len() as u64);
        let remainder = pot.amount.0 % pot_winners.len() as u64;

        for (i, winner_id) in pot_winners.iter().enumerate() {
            let extra = if (i as u64) < remainder {
                Chips(1)
            } else {
                Chips::ZERO
            };
            *payout.entry(*winner_id).or_insert(Chips::ZERO) += share + extra;
        }
    }

    payout
}

/// Сумма всех банков на столе.
pub fn total_pot(pots: &[Pot]) -> Chips {
    pots.iter().map(|p| p.amount).sum()
}

/// Сумма вкладов игроков за раздачу (вторая половина инварианта сохранения фишек).
pub fn total_contributions(players: &[Player]) -> Chips {
    players
        .iter()
        .filter(|p| !p.folded)
        .map(|p| p.total_bet_this_hand)
        .sum()
}
