//! Match-scoped state and the handlers for `Settings` and `Match` lines.
//!
//! All state lives in one [`BotState`] value owned by the dispatch loop and
//! passed by `&mut` into every handler.

use std::collections::{BTreeMap, HashMap};

use deepgreen_engine::cards::Card;
use deepgreen_engine::hand::HandStrength;
use tracing::{debug, info};

use crate::error::LineError;

/// Settings key the match host uses to tell us which player we are.
pub const SELF_PLAYER_SETTING: &str = "your_bot";

/// Options fixed for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct BotOptions {
    pub default_big_blind: u32,
    pub reset_players_on_round: bool,
    pub players: Vec<String>,
}

impl BotOptions {
    pub fn is_known_player(&self, id: &str) -> bool {
        self.players.iter().any(|p| p == id)
    }
}

impl Default for BotOptions {
    fn default() -> Self {
        Self {
            default_big_blind: 20,
            reset_players_on_round: false,
            players: vec!["player1".into(), "player2".into()],
        }
    }
}

/// Key/value pairs from `Settings` lines; later writes overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    values: HashMap<String, String>,
}

impl Settings {
    pub fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchState {
    /// Opaque id of the current round
    pub round: Option<String>,
    pub amount_to_call: Option<u32>,
    pub big_blind: Option<u32>,
    pub small_blind: Option<u32>,
    /// Chips we have committed this betting round
    pub round_bets: u32,
    /// Last raise we reported making
    pub raise: Option<u32>,
    /// Any other `Match <field> <value>` pair, stored raw
    pub extra: HashMap<String, String>,
}

/// Raw per-player info. `post` and `stack` are the fields the protocol
/// reports; anything else the player line carries lands in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerState {
    pub post: Option<String>,
    pub stack: Option<String>,
    pub extra: HashMap<String, String>,
}

impl PlayerState {
    pub fn set(&mut self, field: &str, value: &str) {
        match field {
            "post" => self.post = Some(value.to_string()),
            "stack" => self.stack = Some(value.to_string()),
            other => {
                self.extra.insert(other.to_string(), value.to_string());
            }
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        match field {
            "post" => self.post.as_deref(),
            "stack" => self.stack.as_deref(),
            other => self.extra.get(other).map(String::as_str),
        }
    }
}

/// Cards and derived estimates for the round in progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandState {
    /// Our two private cards, lower rank value first
    pub hole: Option<[Card; 2]>,
    /// Shared cards in reveal order; length is 0, 3, 4 or 5
    pub table: Vec<Card>,
    pub win_percent: Option<f64>,
    pub ranking: Option<HandStrength>,
}

impl HandState {
    pub fn clear(&mut self) {
        *self = HandState::default();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BotState {
    pub settings: Settings,
    pub match_state: MatchState,
    pub players: BTreeMap<String, PlayerState>,
    pub hand: HandState,
    /// Our own player id; `Settings your_bot <id>` can change it
    pub self_player: String,
}

impl BotState {
    pub fn new(self_player: impl Into<String>) -> Self {
        Self {
            settings: Settings::default(),
            match_state: MatchState::default(),
            players: BTreeMap::new(),
            hand: HandState::default(),
            self_player: self_player.into(),
        }
    }

    pub fn is_self(&self, player: &str) -> bool {
        self.self_player == player
    }

    pub fn player_mut(&mut self, player: &str) -> &mut PlayerState {
        self.players.entry(player.to_string()).or_default()
    }
}

/// `Settings <key> <value>`.
pub fn apply_settings(state: &mut BotState, options: &BotOptions, key: &str, value: &str) {
    state.settings.set(key, value);
    if key == SELF_PLAYER_SETTING {
        if options.is_known_player(value) {
            state.self_player = value.to_string();
        } else {
            debug!(player = value, "ignoring unknown player for {}", SELF_PLAYER_SETTING);
        }
    }
    debug!(key, value, settings = state.settings.len(), "settings updated");
}

/// `Match <field> <value>`.
pub fn apply_match(
    state: &mut BotState,
    options: &BotOptions,
    field: &str,
    value: &str,
) -> Result<(), LineError> {
    match field {
        "round" => start_round(state, options, value),
        "amount_to_call" => state.match_state.amount_to_call = Some(parse_amount(field, value)?),
        "big_blind" => state.match_state.big_blind = Some(parse_amount(field, value)?),
        "small_blind" => state.match_state.small_blind = Some(parse_amount(field, value)?),
        other => {
            state
                .match_state
                .extra
                .insert(other.to_string(), value.to_string());
        }
    }
    debug!(field, value, "match updated");
    Ok(())
}

/// Resets round-scoped state. Settings, blinds and (unless configured
/// otherwise) player info carry over.
pub fn start_round(state: &mut BotState, options: &BotOptions, round: &str) {
    state.match_state.round = Some(round.to_string());
    state.match_state.round_bets = 0;
    state.hand.clear();
    if options.reset_players_on_round {
        state.players.clear();
    }
    info!("===============Starting round {}=================", round);
}

pub(crate) fn parse_amount(field: &str, value: &str) -> Result<u32, LineError> {
    value.parse().map_err(|_| LineError::InvalidInteger {
        field: field.to_string(),
        value: value.to_string(),
    })
}
