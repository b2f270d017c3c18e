//! Тесты сайд-потов и раздачи банков.
//!
//! Проверяем:
//! - разбиение вкладов на банки по уровням all-in (2–9 игроков);
//! - слияние банков с одинаковым составом претендентов;
//! - инвариант сохранения: сумма банков == сумме вкладов несфолдивших;
//! - точную раздачу с остатком (ни одна фишка не теряется).

use std::collections::HashMap;

use chipless_poker::domain::{Chips, Player, PlayerId, Pot};
use chipless_poker::engine::{
    calculate_side_pots, distribute_pots, total_contributions, total_pot,
};

/// Хелпер: несфолдивший игрок с заданным вкладом за раздачу.
fn contributor(id: PlayerId, total_bet: u64) -> Player {
    let mut p = Player::new(id, format!("P{}", id), id as usize - 1, Chips(total_bet));
    p.stack = Chips::ZERO;
    p.total_bet_this_hand = Chips(total_bet);
    p
}

/// Хелпер: то же, но игрок сфолдил.
fn folded_contributor(id: PlayerId, total_bet: u64) -> Player {
    let mut p = contributor(id, total_bet);
    p.folded = true;
    p
}

/// Хелпер: (сумма, отсортированные претенденты) из банка.
fn pot_info(pot: &Pot) -> (u64, Vec<PlayerId>) {
    let mut ids = pot.eligible_player_ids.clone();
    ids.sort_unstable();
    (pot.amount.0, ids)
}

//
// ====================== РАЗБИЕНИЕ НА БАНКИ ======================
//

/// Без all-in – один общий банк со всеми претендентами.
#[test]
fn equal_contributions_make_single_pot() {
    let players = vec![contributor(1, 50), contributor(2, 50), contributor(3, 50)];

    let pots = calculate_side_pots(&players);

    assert_eq!(pots.len(), 1, "должен быть один общий банк");
    assert_eq!(pot_info(&pots[0]), (150, vec![1, 2, 3]));
}

/// Сценарий из жизни: стеки 10/50/50, все трое в all-in.
/// Банк A = 30 на троих, банк B = 80 на двоих больших.
#[test]
fn three_way_all_in_10_50_50() {
    let players = vec![contributor(1, 10), contributor(2, 50), contributor(3, 50)];

    let pots = calculate_side_pots(&players);

    assert_eq!(pots.len(), 2);
    assert_eq!(pot_info(&pots[0]), (30, vec![1, 2, 3]));
    assert_eq!(pot_info(&pots[1]), (80, vec![2, 3]));
}

/// Три разных all-in: 100/200/300 → три слоя.
#[test]
fn three_distinct_all_ins_make_three_pots() {
    let players = vec![
        contributor(1, 100),
        contributor(2, 200),
        contributor(3, 300),
    ];

    let pots = calculate_side_pots(&players);

    assert_eq!(pots.len(), 3, "ожидаем 3 слоя");
    assert_eq!(pot_info(&pots[0]), (300, vec![1, 2, 3]));
    assert_eq!(pot_info(&pots[1]), (200, vec![2, 3]));
    assert_eq!(pot_info(&pots[2]), (100, vec![3]));
}

/// Равные all-in дают один слой, а не по слою на игрока.
#[test]
fn tied_all_ins_collapse_into_one_tier() {
    let players = vec![
        contributor(1, 100),
        contributor(2, 100),
        contributor(3, 300),
        contributor(4, 300),
    ];

    let pots = calculate_side_pots(&players);

    assert_eq!(pots.len(), 2);
    assert_eq!(pot_info(&pots[0]), (400, vec![1, 2, 3, 4]));
    assert_eq!(pot_info(&pots[1]), (400, vec![3, 4]));
}

/// Сфолдившие в раскладке не участвуют: ни в суммах, ни в претендентах.
#[test]
fn folded_players_are_excluded() {
    let players = vec![
        contributor(1, 50),
        contributor(2, 50),
        folded_contributor(3, 20),
    ];

    let pots = calculate_side_pots(&players);

    assert_eq!(pots.len(), 1);
    assert_eq!(pot_info(&pots[0]), (100, vec![1, 2]));
}

/// Нулевые вклады не порождают пустых банков.
#[test]
fn zero_contributions_make_no_pots() {
    let players = vec![contributor(1, 0), contributor(2, 0)];
    assert!(calculate_side_pots(&players).is_empty());

    let mixed = vec![contributor(1, 0), contributor(2, 40), contributor(3, 40)];
    let pots = calculate_side_pots(&mixed);
    assert_eq!(pots.len(), 1);
    assert_eq!(pot_info(&pots[0]), (80, vec![2, 3]));
}

/// Инвариант сохранения на наборе комбинаций 2–9 игроков:
/// сумма банков == сумме вкладов несфолдивших, банки без нулей,
/// претенденты каждого следующего слоя – подмножество предыдущего.
#[test]
fn partition_conserves_chips() {
    let cases: Vec<Vec<u64>> = vec![
        vec![7, 7],
        vec![1, 2],
        vec![10, 50, 50],
        vec![5, 25, 125],
        vec![50, 200, 200, 500],
        vec![3, 3, 3, 9, 27],
        vec![40, 40, 60, 60, 80, 100],
        vec![1, 2, 3, 4, 5, 6, 7],
        vec![13, 13, 21, 21, 34, 34, 55, 55],
        vec![9, 8, 7, 6, 5, 4, 3, 2, 1],
    ];

    for stacks in cases {
        let players: Vec<Player> = stacks
            .iter()
            .enumerate()
            .map(|(i, &bet)| contributor(i as PlayerId + 1, bet))
            .collect();

        let pots = calculate_side_pots(&players);

        let contributed = total_contributions(&players);
        assert_eq!(
            total_pot(&pots),
            contributed,
            "фишки разошлись на вкладах {:?}",
            stacks
        );

        for pot in &pots {
            assert!(!pot.amount.is_zero(), "пустой банк на вкладах {:?}", stacks);
        }

        for pair in pots.windows(2) {
            for id in &pair[1].eligible_player_ids {
                assert!(
                    pair[0].eligible_player_ids.contains(id),
                    "слои должны сужаться: {:?}",
                    stacks
                );
            }
        }
    }
}

//
// ====================== РАЗДАЧА БАНКОВ ======================
//

fn winners(entries: &[(usize, &[PlayerId])]) -> HashMap<usize, Vec<PlayerId>> {
    entries
        .iter()
        .map(|(index, ids)| (*index, ids.to_vec()))
        .collect()
}

#[test]
fn single_winner_takes_whole_pot() {
    let pots = vec![Pot {
        amount: Chips(120),
        eligible_player_ids: vec![1, 2, 3],
    }];

    let payout = distribute_pots(&pots, &winners(&[(0, &[2])]));

    assert_eq!(payout.get(&2), Some(&Chips(120)));
    assert_eq!(payout.len(), 1, "платим только объявленным победителям");
}

/// Чоп с остатком: лишняя фишка уходит первому объявленному.
#[test]
fn chop_remainder_goes_to_first_declared_winner() {
    let pots = vec![Pot {
        amount: Chips(101),
        eligible_player_ids: vec![1, 2],
    }];

    let payout = distribute_pots(&pots, &winners(&[(0, &[2, 1])]));

    assert_eq!(payout.get(&2), Some(&Chips(51)));
    assert_eq!(payout.get(&1), Some(&Chips(50)));
}

/// Остаток больше одной фишки раздаётся по одной с начала списка.
#[test]
fn chop_remainder_is_dealt_one_chip_at_a_time() {
    let pots = vec![Pot {
        amount: Chips(11),
        eligible_player_ids: vec![1, 2, 3],
    }];

    let payout = distribute_pots(&pots, &winners(&[(0, &[3, 1, 2])]));

    assert_eq!(payout.get(&3), Some(&Chips(4)));
    assert_eq!(payout.get(&1), Some(&Chips(4)));
    assert_eq!(payout.get(&2), Some(&Chips(3)));
}

/// Несколько банков: выигрыши одного игрока суммируются.
#[test]
fn winnings_accumulate_across_pots() {
    let pots = vec![
        Pot {
            amount: Chips(30),
            eligible_player_ids: vec![1, 2, 3],
        },
        Pot {
            amount: Chips(80),
            eligible_player_ids: vec![2, 3],
        },
    ];

    let payout = distribute_pots(&pots, &winners(&[(0, &[2]), (1, &[2])]));

    assert_eq!(payout.get(&2), Some(&Chips(110)));
}

/// Банк без объявленных победителей просто пропускается.
#[test]
fn pot_without_winners_is_skipped() {
    let pots = vec![
        Pot {
            amount: Chips(30),
            eligible_player_ids: vec![1, 2],
        },
        Pot {
            amount: Chips(80),
            eligible_player_ids: vec![2, 3],
        },
    ];

    let payout = distribute_pots(&pots, &winners(&[(1, &[3])]));

    assert_eq!(payout.get(&3), Some(&Chips(80)));
    assert_eq!(payout.len(), 1);
}

/// Точность: сумма выплат равна сумме разыгранных банков.
#[test]
fn distribution_is_exact() {
    let pots = vec![
        Pot {
            amount: Chips(97),
            eligible_player_ids: vec![1, 2, 3],
        },
        Pot {
            amount: Chips(44),
            eligible_player_ids: vec![2, 3],
        },
    ];

    let payout = distribute_pots(&pots, &winners(&[(0, &[1, 2, 3]), (1, &[3, 2])]));

    let paid: Chips = payout.values().copied().sum();
    assert_eq!(paid, total_pot(&pots), "остаток не потерян и не выдуман");
}
