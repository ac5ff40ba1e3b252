//! # deepgreen-ai: Betting Strategies for the deepgreen Agent
//!
//! Provides the collaborators the agent's bet decision engine consults.
//! Each concern sits behind a trait so the decision loop never depends on a
//! particular estimator.
//!
//! ## Core Components
//!
//! - [`HoleStrategy`] - Win probability and betting multiplier from the two hole cards
//! - [`TableStrategy`] - Betting multiplier once table cards are visible
//! - [`HandRanker`] - Best achievable hand from hole + table cards
//! - [`baseline`] - Rule-based implementations of all three
//! - [`create_strategy_set`] - Factory bundling a matched set by name
//!
//! ## Quick Start
//!
//! ```rust
//! use deepgreen_ai::create_strategy_set;
//! use deepgreen_engine::cards::parse_card_list;
//!
//! let strategies = create_strategy_set("baseline").unwrap();
//! let hole = parse_card_list("[Ah,Ad]").unwrap();
//! let hole = [hole[0], hole[1]];
//!
//! let pct = strategies.hole.win_percentage(&hole);
//! assert!((0.0..=100.0).contains(&pct));
//! assert!(strategies.hole.multiplier(&hole) > 0);
//! ```
//!
//! ## Strategy Sets
//!
//! Currently supported names:
//! - `"baseline"` - Static preflop table, ranking-driven postflop sizing

use deepgreen_engine::cards::Card;
use deepgreen_engine::hand::HandStrength;
use thiserror::Error;

pub mod baseline;

/// Estimates how good two private cards are before any table card is seen.
pub trait HoleStrategy: Send + Sync {
    /// Estimated chance of winning at showdown, in percent (`0.0..=100.0`).
    fn win_percentage(&self, hole: &[Card; 2]) -> f64;

    /// Scale applied to the big blind to obtain the bet ceiling preflop.
    fn multiplier(&self, hole: &[Card; 2]) -> u32;

    fn name(&self) -> &str;
}

/// Sizes bets once table cards are visible.
pub trait TableStrategy: Send + Sync {
    /// Scale applied to the big blind to obtain the bet ceiling postflop.
    ///
    /// `ranking` is the ranker's verdict for exactly these `hole` and `table`
    /// cards.
    fn multiplier(&self, hole: &[Card; 2], table: &[Card], ranking: &HandStrength) -> u32;

    fn name(&self) -> &str;
}

/// Ranks the best hand reachable from hole and table cards.
pub trait HandRanker: Send + Sync {
    fn rank(&self, hole: &[Card; 2], table: &[Card]) -> HandStrength;
}

/// A matched set of collaborators handed to the decision loop.
pub struct StrategySet {
    pub hole: Box<dyn HoleStrategy>,
    pub table: Box<dyn TableStrategy>,
    pub ranker: Box<dyn HandRanker>,
}

impl std::fmt::Debug for StrategySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategySet")
            .field("hole", &self.hole.name())
            .field("table", &self.table.name())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StrategyError {
    #[error("Unknown strategy: {0}")]
    Unknown(String),
}

/// Names accepted by [`create_strategy_set`].
pub const STRATEGY_NAMES: &[&str] = &["baseline"];

/// Factory function to create a strategy set by name.
///
/// # Errors
///
/// Returns [`StrategyError::Unknown`] for names not listed in
/// [`STRATEGY_NAMES`].
///
/// # Example
///
/// ```rust
/// use deepgreen_ai::{create_strategy_set, StrategyError};
///
/// assert!(create_strategy_set("baseline").is_ok());
/// assert_eq!(
///     create_strategy_set("gto").unwrap_err(),
///     StrategyError::Unknown("gto".into())
/// );
/// ```
pub fn create_strategy_set(name: &str) -> Result<StrategySet, StrategyError> {
    match name {
        "baseline" => Ok(StrategySet {
            hole: Box::new(baseline::StaticHoleStrategy::new()),
            table: Box::new(baseline::RankedTableStrategy::new()),
            ranker: Box::new(baseline::EvaluatorRanker),
        }),
        other => Err(StrategyError::Unknown(other.to_string())),
    }
}
