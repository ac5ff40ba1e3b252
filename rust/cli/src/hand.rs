//! Handlers for `<player> <field> <value>` lines: card reveals, blinds
//! posted, stacks, and our own raises.

use std::collections::HashSet;

use deepgreen_ai::StrategySet;
use deepgreen_engine::cards::{Card, format_card_list, parse_card_list};
use tracing::{debug, info};

use crate::error::LineError;
use crate::state::{BotState, parse_amount};

/// Table lengths the game can show: flop, turn, river.
pub const TABLE_LENGTHS: [usize; 3] = [3, 4, 5];

/// Routes a line whose leading token is a known player id.
pub fn apply_player_info(
    state: &mut BotState,
    strategies: &StrategySet,
    player: &str,
    field: &str,
    value: &str,
) -> Result<(), LineError> {
    debug!(player, field, value, "player info");
    let is_self = state.is_self(player);
    match field {
        "hand" if is_self => apply_hole(state, strategies, value),
        "hand" => {
            // opponent cards are only shown at showdown
            let cards = parse_card_list(value)?;
            debug!(player, cards = %format_card_list(&cards), "opponent hand revealed");
            state.player_mut(player).set(field, value);
            Ok(())
        }
        "table" => apply_table(state, strategies, value),
        "raise" if is_self => {
            let amount = parse_amount(field, value)?;
            state.match_state.raise = Some(amount);
            state.player_mut(player).set(field, value);
            Ok(())
        }
        _ => {
            state.player_mut(player).set(field, value);
            Ok(())
        }
    }
}

/// Orders two hole cards by rank value, keeping payload order on ties.
pub fn order_hole(first: Card, second: Card) -> [Card; 2] {
    if first.rank.value() <= second.rank.value() {
        [first, second]
    } else {
        [second, first]
    }
}

/// Our private cards were dealt.
pub fn apply_hole(
    state: &mut BotState,
    strategies: &StrategySet,
    payload: &str,
) -> Result<(), LineError> {
    let cards = parse_card_list(payload)?;
    let [first, second] = cards.as_slice() else {
        return Err(LineError::InvalidPayload(format!(
            "expected 2 hole cards, got {} in {}",
            cards.len(),
            payload
        )));
    };
    if let Some(dup) = repeated_card(cards.iter().chain(&state.hand.table)) {
        return Err(LineError::InvalidPayload(format!(
            "card {} appears twice in hole {} and table {}",
            dup,
            payload,
            format_card_list(&state.hand.table)
        )));
    }
    let hole = order_hole(*first, *second);

    state.match_state.round_bets = 0;
    state.hand.hole = Some(hole);
    let win_percent = strategies.hole.win_percentage(&hole);
    state.hand.win_percent = Some(win_percent);
    // a new deal invalidates whatever was ranked for the old one
    state.hand.ranking = table_ranking(state, strategies);
    info!(
        hole = %format_card_list(&hole),
        "Estimated win percentage: {:.1}",
        win_percent
    );
    Ok(())
}

/// Shared cards were revealed. Payloads are cumulative: the flop line
/// carries 3 cards, the turn 4, the river 5.
pub fn apply_table(
    state: &mut BotState,
    strategies: &StrategySet,
    payload: &str,
) -> Result<(), LineError> {
    let cards = parse_card_list(payload)?;
    if !TABLE_LENGTHS.contains(&cards.len()) {
        return Err(LineError::InvalidPayload(format!(
            "expected 3, 4 or 5 table cards, got {} in {}",
            cards.len(),
            payload
        )));
    }
    let hole = state.hand.hole.iter().flatten();
    if let Some(dup) = repeated_card(cards.iter().chain(hole)) {
        return Err(LineError::InvalidPayload(format!(
            "card {} appears twice in table {} with our hole cards",
            dup, payload
        )));
    }
    let known = state.hand.table.len();
    if cards.len() < known || cards[..known] != state.hand.table[..] {
        return Err(LineError::InvalidPayload(format!(
            "table {} does not extend {}",
            payload,
            format_card_list(&state.hand.table)
        )));
    }

    state.match_state.round_bets = 0;
    state.hand.table.extend_from_slice(&cards[known..]);
    state.hand.ranking = table_ranking(state, strategies);
    debug!(
        table = %format_card_list(&state.hand.table),
        ranking = ?state.hand.ranking,
        "table updated"
    );
    Ok(())
}

/// First card seen a second time, if any. A single deck never repeats one.
fn repeated_card<'a>(cards: impl IntoIterator<Item = &'a Card>) -> Option<Card> {
    let mut seen = HashSet::new();
    cards.into_iter().copied().find(|card| !seen.insert(*card))
}

fn table_ranking(
    state: &BotState,
    strategies: &StrategySet,
) -> Option<deepgreen_engine::hand::HandStrength> {
    let hole = state.hand.hole.as_ref()?;
    if state.hand.table.is_empty() {
        return None;
    }
    Some(strategies.ranker.rank(hole, &state.hand.table))
}
