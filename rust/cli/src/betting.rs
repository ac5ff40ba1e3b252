//! Bet decision engine.
//!
//! A decision request picks a multiplier source (hole strategy before any
//! table card is visible, table strategy after), scales the big blind into a
//! bet ceiling, and runs [`decide`] against what we owe and have committed.

use deepgreen_ai::StrategySet;
use deepgreen_engine::player::PlayerAction;
use tracing::debug;

use crate::error::LineError;
use crate::state::{BotOptions, BotState, MatchState};

/// Chooses an action for a bet ceiling of `max_bet`.
///
/// Evaluated in order:
///
/// 1. `max_bet == 0` answers `call 0`, a checking call.
/// 2. Owing more than the ceiling allows folds.
/// 3. A raise that would be smaller than twice the call, or smaller than the
///    big blind, is rounded down to a call.
/// 4. Otherwise raise everything left under the ceiling.
///
/// The comparisons are strict; `round_bets` is not updated here, see [`bet`].
///
/// # Errors
///
/// [`LineError::MissingAmountToCall`] when a non-zero ceiling is evaluated
/// before `amount_to_call` was ever reported.
///
/// # Example
///
/// ```rust
/// use deepgreen_cli::betting::decide;
/// use deepgreen_engine::player::PlayerAction;
///
/// assert_eq!(decide(20, Some(5), 0, 20).unwrap(), PlayerAction::Raise(20));
/// assert_eq!(decide(20, Some(25), 0, 20).unwrap(), PlayerAction::Fold);
/// ```
pub fn decide(
    max_bet: i64,
    amount_to_call: Option<u32>,
    round_bets: u32,
    big_blind: u32,
) -> Result<PlayerAction, LineError> {
    if max_bet == 0 {
        return Ok(PlayerAction::Call);
    }
    let amount_to_call = i64::from(amount_to_call.ok_or(LineError::MissingAmountToCall)?);
    let round_bets = i64::from(round_bets);
    let big_blind = i64::from(big_blind);

    let if_call_total = amount_to_call + round_bets;
    let max_raise = max_bet - round_bets;

    if if_call_total > max_bet {
        return Ok(PlayerAction::Fold);
    }
    if (max_raise - amount_to_call) < amount_to_call * 2 || max_raise < big_blind {
        return Ok(PlayerAction::Call);
    }
    // max_raise >= big_blind >= 0 and max_bet fits in u32 * u32
    let amount = u32::try_from(max_raise).unwrap_or(u32::MAX);
    Ok(PlayerAction::Raise(amount))
}

/// Runs [`decide`] and records a raise into `round_bets`.
pub fn bet(
    match_state: &mut MatchState,
    max_bet: i64,
    big_blind: u32,
) -> Result<PlayerAction, LineError> {
    let action = decide(
        max_bet,
        match_state.amount_to_call,
        match_state.round_bets,
        big_blind,
    )?;
    if let PlayerAction::Raise(amount) = action {
        match_state.round_bets = match_state.round_bets.saturating_add(amount);
    }
    Ok(action)
}

/// Big blind in effect: the reported one, else the configured default.
pub fn effective_big_blind(state: &BotState, options: &BotOptions) -> u32 {
    state
        .match_state
        .big_blind
        .unwrap_or(options.default_big_blind)
}

/// Answers an `Action` line.
///
/// # Errors
///
/// [`LineError::NoHoleCards`] if our hand is unknown, and whatever [`bet`]
/// reports. The caller answers with the fallback action in both cases.
pub fn handle_action(
    state: &mut BotState,
    strategies: &StrategySet,
    options: &BotOptions,
) -> Result<PlayerAction, LineError> {
    let hole = state.hand.hole.ok_or(LineError::NoHoleCards)?;
    let multiplier = if state.hand.table.is_empty() {
        strategies.hole.multiplier(&hole)
    } else {
        let ranking = match state.hand.ranking {
            Some(ranking) => ranking,
            None => {
                let ranking = strategies.ranker.rank(&hole, &state.hand.table);
                state.hand.ranking = Some(ranking);
                ranking
            }
        };
        strategies
            .table
            .multiplier(&hole, &state.hand.table, &ranking)
    };

    let big_blind = effective_big_blind(state, options);
    let max_bet = i64::from(multiplier) * i64::from(big_blind);
    debug!(
        multiplier,
        big_blind,
        max_bet,
        round_bets = state.match_state.round_bets,
        amount_to_call = ?state.match_state.amount_to_call,
        "deciding"
    );
    bet(&mut state.match_state, max_bet, big_blind)
}
