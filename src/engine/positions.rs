use crate::domain::{Player, Position};

/// Назначить позиции D/SB/BB от кнопки.
///
/// Хедз-ап – особый случай: кнопка сама на малом блайнде,
/// поэтому метки только D и BB.
pub fn assign_positions(players: &mut [Player], dealer_index: usize) {
    let n = players.len();
    if n == 0 {
        return;
    }

    for p in players.iter_mut() {
        p.position = None;
    }

    if n == 2 {
        players[dealer_index % n].position = Some(Position::Dealer);
        players[(dealer_index + 1) % n].position = Some(Position::BigBlind);
    } else {
        players[dealer_index % n].position = Some(Position::Dealer);
        players[(dealer_index + 1) % n].position = Some(Position::SmallBlind);
        players[(dealer_index + 2) % n].position = Some(Position::BigBlind);
    }
}

/// Следующий после `start` игрок, допущенный к раздаче (по кругу).
///
/// Пропускает сидящих в стороне и пустые стеки. Сам `start` проверяется
/// последним – при полном обходе круга.
pub fn next_eligible_after(players: &[Player], start: usize) -> Option<usize> {
    let n = players.len();
    if n == 0 {
        return None;
    }

    for offset in 1..=n {
        let index = (start + offset) % n;
        if players[index].is_eligible() {
            return Some(index);
        }
    }

    None
}

/// Следующее после `start` место с фишками – кандидат на кнопку.
pub fn next_funded_after(players: &[Player], start: usize) -> Option<usize> {
    let n = players.len();
    if n == 0 {
        return None;
    }

    for offset in 1..=n {
        let index = (start + offset) % n;
        if !players[index].stack.is_zero() {
            return Some(index);
        }
    }

    None
}
