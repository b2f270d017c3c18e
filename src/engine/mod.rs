//! Правила раздачи: торговля, переход улиц, сайд-поты, раздача банков.
//!
//! Все функции чистые или работают с явно переданным `HandState`.
//! Основные операции:
//!   - `start_hand` – запустить новую раздачу (блайнды, очередь хода)
//!   - `advance_phase` – собрать банки и перейти на следующую улицу
//!   - `process_action` / `validate_action` – применить и проверить действие
//!   - `calculate_side_pots` / `distribute_pots` – разложить и раздать банки

pub mod actions;
pub mod betting;
pub mod errors;
pub mod game_loop;
pub mod history;
pub mod positions;
pub mod side_pots;
pub mod validation;

pub use actions::PlayerAction;
pub use betting::{
    available_actions, is_betting_round_complete, next_player_index, process_action,
    AppliedAction, AvailableActions,
};
pub use errors::ActionError;
pub use game_loop::{advance_phase, create_initial_state, next_hand, start_hand, HandState};
pub use history::{ActionRecord, HandRecord};
pub use side_pots::{calculate_side_pots, distribute_pots, total_contributions, total_pot};
pub use validation::validate_action;
