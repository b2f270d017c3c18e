use crate::domain::{Chips, Player};
use crate::engine::actions::PlayerAction;
use crate::engine::betting::available_actions;
use crate::engine::errors::ActionError;

/// Проверить, может ли игрок выполнить действие при текущем состоянии торговли.
///
/// Предусловия каждого действия зеркалят `available_actions` –
/// источник правды один. Состояние не трогаем.
pub fn validate_action(
    action: &PlayerAction,
    player: &Player,
    current_bet: Chips,
    min_raise: Chips,
    big_blind: Chips,
) -> Result<(), ActionError> {
    let available = available_actions(player, current_bet, min_raise, big_blind);

    match *action {
        PlayerAction::Fold => Ok(()),

        PlayerAction::Check => {
            if available.can_check {
                Ok(())
            } else {
                Err(ActionError::IllegalCheck)
            }
        }

        PlayerAction::Call => {
            if available.can_call {
                Ok(())
            } else {
                Err(ActionError::NoCallAmount)
            }
        }

        PlayerAction::Bet(amount) => {
            if !available.can_bet {
                return Err(ActionError::BetNotAllowed);
            }
            if amount < available.min_bet {
                return Err(ActionError::BelowMinimumBet {
                    min: available.min_bet,
                });
            }
            if amount > player.stack {
                return Err(ActionError::InsufficientStack);
            }
            Ok(())
        }

        PlayerAction::Raise(amount) => {
            if !available.can_raise {
                return Err(ActionError::RaiseNotAllowed);
            }
            if amount < available.min_raise_to {
                return Err(ActionError::BelowMinimumRaise {
                    min: available.min_raise_to,
                });
            }
            if amount > available.max_bet {
                return Err(ActionError::InsufficientStack);
            }
            Ok(())
        }

        PlayerAction::AllIn => {
            if player.stack.is_zero() {
                Err(ActionError::NoStackToAllIn)
            } else {
                Ok(())
            }
        }
    }
}
