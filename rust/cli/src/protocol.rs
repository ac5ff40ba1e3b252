//! Protocol dispatcher: reads lines, routes them by leading token, and keeps
//! going no matter what a single line contains.

use std::any::Any;
use std::io::{self, BufRead, Write};
use std::panic::{self, AssertUnwindSafe};

use deepgreen_ai::StrategySet;
use deepgreen_engine::player::PlayerAction;
use tracing::{debug, error, info, warn};

use crate::betting::handle_action;
use crate::error::LineError;
use crate::hand::apply_player_info;
use crate::io_utils::read_stdin_line;
use crate::output::emit;
use crate::state::{BotOptions, BotState, apply_match, apply_settings};

/// Reply used whenever a decision cannot be computed.
pub const FALLBACK_ACTION: PlayerAction = PlayerAction::Check;

/// What happened to one input line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// No tokens
    Blank,
    /// State was updated
    Applied,
    /// Leading token not recognized; nothing changed
    Ignored(LineError),
    /// A decision was written. `fallback` holds the reason when the
    /// fallback action was sent instead of a computed one.
    Responded {
        action: PlayerAction,
        fallback: Option<LineError>,
    },
    /// The handler rejected the line; state is unchanged
    Failed(LineError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub lines: usize,
    pub responses: usize,
    pub fallbacks: usize,
    pub failures: usize,
    pub ignored: usize,
    /// Lines with a token count other than three, whatever their outcome
    pub malformed: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &LineOutcome) {
        self.lines += 1;
        match outcome {
            LineOutcome::Responded { fallback, .. } => {
                self.responses += 1;
                if fallback.is_some() {
                    self.fallbacks += 1;
                }
            }
            LineOutcome::Failed(_) => self.failures += 1,
            LineOutcome::Ignored(_) => self.ignored += 1,
            LineOutcome::Blank | LineOutcome::Applied => {}
        }
    }
}

/// The agent: its state plus the collaborators it consults.
#[derive(Debug)]
pub struct Bot {
    pub state: BotState,
    pub strategies: StrategySet,
    pub options: BotOptions,
}

impl Bot {
    pub fn new(self_player: &str, strategies: StrategySet, options: BotOptions) -> Self {
        Self {
            state: BotState::new(self_player),
            strategies,
            options,
        }
    }

    /// Handles one raw line. Only a failed write to `out` is an error.
    pub fn handle_line(&mut self, raw: &str, out: &mut dyn Write) -> io::Result<LineOutcome> {
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        self.handle_tokens(raw, &tokens, out)
    }

    fn handle_tokens(
        &mut self,
        raw: &str,
        tokens: &[&str],
        out: &mut dyn Write,
    ) -> io::Result<LineOutcome> {
        let Some(&lead) = tokens.first() else {
            return Ok(LineOutcome::Blank);
        };
        if let Some(err) = malformation(tokens) {
            warn!(line = raw, "{}", err);
        }

        if lead == "Action" {
            return self.respond(raw, out);
        }

        let options = &self.options;
        let strategies = &self.strategies;
        let result = match lead {
            "Settings" => token_pair(tokens).map(|(key, value)| {
                apply_settings(&mut self.state, options, key, value);
            }),
            "Match" => token_pair(tokens).and_then(|(field, value)| {
                guarded(&mut self.state, |state| apply_match(state, options, field, value))
            }),
            player if options.is_known_player(player) => {
                token_pair(tokens).and_then(|(field, value)| {
                    guarded(&mut self.state, |state| {
                        apply_player_info(state, strategies, player, field, value)
                    })
                })
            }
            other => {
                let err = LineError::UnrecognizedLeadingToken(other.to_string());
                info!(line = raw, "{}", err);
                return Ok(LineOutcome::Ignored(err));
            }
        };

        Ok(match result {
            Ok(()) => LineOutcome::Applied,
            Err(err) => {
                error!(line = raw, "Failed to handle line: {}", err);
                LineOutcome::Failed(err)
            }
        })
    }

    fn respond(&mut self, raw: &str, out: &mut dyn Write) -> io::Result<LineOutcome> {
        let options = &self.options;
        let strategies = &self.strategies;
        let decision = guarded(&mut self.state, |state| {
            handle_action(state, strategies, options)
        });
        let (action, fallback) = match decision {
            Ok(action) => (action, None),
            Err(err) => {
                error!(line = raw, "{}; answering {}", err, FALLBACK_ACTION);
                (FALLBACK_ACTION, Some(err))
            }
        };
        emit(out, &action)?;
        debug!(reply = %action, "responded");
        Ok(LineOutcome::Responded { action, fallback })
    }

    /// Processes lines until end of input.
    ///
    /// # Errors
    ///
    /// Only when a reply cannot be written; the counterpart is gone.
    pub fn run(&mut self, input: &mut dyn BufRead, out: &mut dyn Write) -> io::Result<RunSummary> {
        let mut summary = RunSummary::default();
        while let Some(line) = read_stdin_line(input) {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if malformation(&tokens).is_some() {
                summary.malformed += 1;
            }
            let outcome = self.handle_tokens(&line, &tokens, out)?;
            summary.record(&outcome);
        }
        debug!(?summary, "input closed");
        Ok(summary)
    }
}

/// `MalformedLine` for a non-blank line whose token count is not three.
pub fn malformation(tokens: &[&str]) -> Option<LineError> {
    match tokens.len() {
        0 | 3 => None,
        n => Some(LineError::MalformedLine { tokens: n }),
    }
}

/// Runs a handler so that a panicking collaborator fails only this line.
/// State is restored to what it was before the handler ran.
fn guarded<T>(
    state: &mut BotState,
    handler: impl FnOnce(&mut BotState) -> Result<T, LineError>,
) -> Result<T, LineError> {
    let snapshot = state.clone();
    match panic::catch_unwind(AssertUnwindSafe(|| handler(&mut *state))) {
        Ok(result) => result,
        Err(payload) => {
            *state = snapshot;
            Err(LineError::Internal(panic_message(payload.as_ref())))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}

fn token_pair<'a>(tokens: &[&'a str]) -> Result<(&'a str, &'a str), LineError> {
    let first = tokens.get(1).copied().ok_or(LineError::MissingToken { index: 1 })?;
    let second = tokens.get(2).copied().ok_or(LineError::MissingToken { index: 2 })?;
    Ok((first, second))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::TestLogSubscriber;
    use deepgreen_ai::{HandRanker, HoleStrategy, create_strategy_set};
    use deepgreen_engine::cards::Card;
    use deepgreen_engine::hand::HandStrength;
    use std::io::Cursor;
    use tracing::Level;

    struct PanickingHole;

    impl HoleStrategy for PanickingHole {
        fn win_percentage(&self, _hole: &[Card; 2]) -> f64 {
            50.0
        }

        fn multiplier(&self, _hole: &[Card; 2]) -> u32 {
            panic!("hole multiplier unavailable")
        }

        fn name(&self) -> &str {
            "PanickingHole"
        }
    }

    struct PanickingRanker;

    impl HandRanker for PanickingRanker {
        fn rank(&self, _hole: &[Card; 2], _table: &[Card]) -> HandStrength {
            panic!("ranker unavailable")
        }
    }

    fn bot_with(hole: Option<Box<dyn HoleStrategy>>, ranker: Option<Box<dyn HandRanker>>) -> Bot {
        let mut strategies = create_strategy_set("baseline").unwrap();
        if let Some(hole) = hole {
            strategies.hole = hole;
        }
        if let Some(ranker) = ranker {
            strategies.ranker = ranker;
        }
        Bot::new("player1", strategies, BotOptions::default())
    }

    fn bot() -> Bot {
        Bot::new(
            "player1",
            create_strategy_set("baseline").unwrap(),
            BotOptions::default(),
        )
    }

    fn feed(bot: &mut Bot, lines: &[&str]) -> (Vec<LineOutcome>, String) {
        let mut out = Vec::new();
        let outcomes = lines
            .iter()
            .map(|l| bot.handle_line(l, &mut out).unwrap())
            .collect();
        (outcomes, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let mut b = bot();
        let (outcomes, out) = feed(&mut b, &["", "   \t "]);
        assert_eq!(outcomes, vec![LineOutcome::Blank, LineOutcome::Blank]);
        assert!(out.is_empty());
    }

    #[test]
    fn test_short_line_then_valid_line() {
        let logs = TestLogSubscriber::new();
        let mut b = bot();
        let (outcomes, _) = logs.capture(|| feed(&mut b, &["Match round", "Match big_blind 40"]));

        assert_eq!(
            outcomes[0],
            LineOutcome::Failed(LineError::MissingToken { index: 2 })
        );
        assert_eq!(outcomes[1], LineOutcome::Applied);
        assert_eq!(b.state.match_state.big_blind, Some(40));
        assert!(
            logs.at_level(Level::WARN)
                .iter()
                .any(|e| e.message.contains("Expected 3 tokens, got 2"))
        );
    }

    #[test]
    fn test_extra_tokens_are_tolerated() {
        let mut b = bot();
        let (outcomes, _) = feed(&mut b, &["Settings timebank 5000 extra"]);
        assert_eq!(outcomes[0], LineOutcome::Applied);
        assert_eq!(b.state.settings.get("timebank"), Some("5000"));
        assert_eq!(
            malformation(&["Settings", "timebank", "5000", "extra"]),
            Some(LineError::MalformedLine { tokens: 4 })
        );
        assert_eq!(malformation(&["Settings", "timebank", "5000"]), None);
        assert_eq!(malformation(&[]), None);
    }

    #[test]
    fn test_run_counts_malformed_lines() {
        let mut b = bot();
        let input = "Settings timebank 5000 extra\n\
                     Match round\n\
                     \n\
                     Match round 1\n\
                     Action\n";
        let mut out = Vec::new();
        let summary = b.run(&mut Cursor::new(input), &mut out).unwrap();
        assert_eq!(summary.malformed, 3);
        assert_eq!(summary.failures, 1);
        assert_eq!(summary.responses, 1);
    }

    #[test]
    fn test_unknown_leading_token_is_ignored() {
        let mut b = bot();
        let before = b.state.clone();
        let (outcomes, out) = feed(&mut b, &["Observer hand [Ah,Kd]"]);
        assert_eq!(
            outcomes[0],
            LineOutcome::Ignored(LineError::UnrecognizedLeadingToken("Observer".into()))
        );
        assert_eq!(b.state, before);
        assert!(out.is_empty());
    }

    #[test]
    fn test_action_before_hole_cards_checks() {
        let logs = TestLogSubscriber::new();
        let mut b = bot();
        let (outcomes, out) = logs.capture(|| feed(&mut b, &["Action player1 10000"]));
        assert_eq!(out, "check 0\n");
        assert_eq!(
            outcomes[0],
            LineOutcome::Responded {
                action: PlayerAction::Check,
                fallback: Some(LineError::NoHoleCards),
            }
        );
        assert_eq!(logs.at_level(Level::ERROR).len(), 1);
    }

    #[test]
    fn test_action_without_amount_to_call_checks() {
        let mut b = bot();
        let (_, out) = feed(&mut b, &["player1 hand [Ah,As]", "Action player1 10000"]);
        assert_eq!(out, "check 0\n");
    }

    #[test]
    fn test_short_action_line_still_answers() {
        let mut b = bot();
        let (outcomes, out) = feed(&mut b, &["Action"]);
        assert_eq!(out, "check 0\n");
        assert!(matches!(outcomes[0], LineOutcome::Responded { .. }));
    }

    #[test]
    fn test_bad_card_leaves_hand_untouched() {
        let mut b = bot();
        let (outcomes, _) = feed(&mut b, &["player1 hand [Ah,As]", "player1 hand [Ah,Xz]"]);
        assert!(matches!(outcomes[1], LineOutcome::Failed(LineError::InvalidCard(_))));
        assert!(b.state.hand.hole.is_some());
    }

    #[test]
    fn test_run_counts_outcomes() {
        let mut b = bot();
        let input = "Settings your_bot player1\n\
                     Match round 1\n\
                     Match big_blind 20\n\
                     Match amount_to_call 5\n\
                     player1 hand [Ah,Kd]\n\
                     bogus\n\
                     Action player1 10000\n";
        let mut out = Vec::new();
        let summary = b.run(&mut Cursor::new(input), &mut out).unwrap();
        assert_eq!(summary.lines, 7);
        assert_eq!(summary.responses, 1);
        assert_eq!(summary.fallbacks, 0);
        assert_eq!(summary.ignored, 1);
        let reply = String::from_utf8(out).unwrap();
        assert_eq!(reply.lines().count(), 1);
        assert!(reply.starts_with("raise "), "{}", reply);
    }

    #[test]
    fn test_panicking_strategy_still_answers_every_action() {
        let mut b = bot_with(Some(Box::new(PanickingHole)), None);
        let input = "Match round 1\n\
                     player1 hand [Ah,As]\n\
                     Match amount_to_call 0\n\
                     Action player1 10000\n\
                     Action player1 10000\n";
        let mut out = Vec::new();
        let summary = b.run(&mut Cursor::new(input), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "check 0\ncheck 0\n");
        assert_eq!(summary.responses, 2);
        assert_eq!(summary.fallbacks, 2);
    }

    #[test]
    fn test_panicking_strategy_reports_internal_failure() {
        let mut b = bot_with(Some(Box::new(PanickingHole)), None);
        let (outcomes, _) = feed(&mut b, &["player1 hand [Ah,As]", "Action player1 1"]);
        assert_eq!(outcomes[0], LineOutcome::Applied);
        assert_eq!(
            outcomes[1],
            LineOutcome::Responded {
                action: PlayerAction::Check,
                fallback: Some(LineError::Internal("hole multiplier unavailable".into())),
            }
        );
    }

    #[test]
    fn test_panicking_ranker_fails_line_and_restores_state() {
        let mut b = bot_with(None, Some(Box::new(PanickingRanker)));
        let (outcomes, _) = feed(
            &mut b,
            &["player1 hand [Ah,As]", "Match amount_to_call 0", "Action player1 1"],
        );
        assert!(matches!(outcomes[2], LineOutcome::Responded { fallback: None, .. }));
        let before = b.state.clone();

        let (outcomes, out) = feed(&mut b, &["player2 table [Kd,7c,2s]", "Match round 2"]);
        assert!(matches!(outcomes[0], LineOutcome::Failed(LineError::Internal(_))));
        assert_eq!(outcomes[1], LineOutcome::Applied);
        assert!(out.is_empty());
        // the failed reveal left nothing behind; the round reset then ran normally
        assert_ne!(before.match_state.round_bets, 0);
        assert!(b.state.hand.table.is_empty());
    }

    #[test]
    fn test_failed_reveal_keeps_round_bets() {
        let mut b = bot_with(None, Some(Box::new(PanickingRanker)));
        feed(
            &mut b,
            &["player1 hand [Ah,As]", "Match amount_to_call 0", "Action player1 1"],
        );
        let before = b.state.clone();
        let (outcomes, _) = feed(&mut b, &["player2 table [Kd,7c,2s]"]);
        assert!(matches!(outcomes[0], LineOutcome::Failed(LineError::Internal(_))));
        assert_eq!(b.state, before);
    }
}
