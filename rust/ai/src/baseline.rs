//! Baseline strategies for the deepgreen agent.
//!
//! A static preflop hand chart and a ranking-driven postflop sizer. Both
//! reduce the situation to a strength score on a 0-10 scale and map that
//! score to a betting multiplier, so sizing stays consistent across streets.

use crate::{HandRanker, HoleStrategy, TableStrategy};
use deepgreen_engine::cards::Card;
use deepgreen_engine::hand::{Category, HandStrength, evaluate_hand};

/// Maps a 0-10 strength score to a big-blind multiplier.
///
/// - 9-10: Premium, bet big (8x)
/// - 7-8: Strong (5x)
/// - 5-6: Medium (3x)
/// - 3-4: Marginal (2x)
/// - 0-2: Weak, only a blind's worth (1x)
pub fn multiplier_for_strength(strength: u8) -> u32 {
    match strength {
        9..=10 => 8,
        7..=8 => 5,
        5..=6 => 3,
        3..=4 => 2,
        _ => 1,
    }
}

/// Static preflop strategy driven by a hand chart.
///
/// # Strategy
///
/// - Pairs score by rank, from 4 (22-66) up to 10 (KK, AA)
/// - Ace-x and broadway combinations score by both ranks, +1 when suited
/// - Suited connectors and one-gappers score 4-5
/// - Everything else is weak (2)
///
/// # Example
///
/// ```rust
/// use deepgreen_ai::baseline::StaticHoleStrategy;
/// use deepgreen_ai::HoleStrategy;
/// use deepgreen_engine::cards::{Card, Rank, Suit};
///
/// let strategy = StaticHoleStrategy::new();
/// let aces = [Card::new(Rank::Ace, Suit::Hearts), Card::new(Rank::Ace, Suit::Spades)];
/// assert_eq!(strategy.multiplier(&aces), 8);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticHoleStrategy;

impl StaticHoleStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate preflop hand strength on a scale of 0-10.
    pub fn preflop_strength(hole: &[Card; 2]) -> u8 {
        let r1 = hole[0].rank.value();
        let r2 = hole[1].rank.value();
        let (high, low) = if r1 > r2 { (r1, r2) } else { (r2, r1) };
        let suited = hole[0].suit == hole[1].suit;
        let bonus = u8::from(suited);

        if r1 == r2 {
            return match high {
                13..=14 => 10, // KK, AA
                11..=12 => 9,  // JJ, QQ
                10 => 8,
                9 => 7,
                8 => 6,
                7 => 5,
                _ => 4, // 66-22
            };
        }

        match (high, low) {
            (14, 13) => 8 + 2 * bonus, // AKs is premium
            (14, 12) => 7 + bonus,
            (14, 11) => 6 + bonus,
            (14, 10) => 5 + bonus,
            (14, _) => 4 + bonus,
            (13, 12) => 6 + bonus,
            (13, 11) => 5 + bonus,
            (13, 10) => 4 + bonus,
            (12, 11) => 5 + bonus,
            (12, 10) => 4 + bonus,
            _ if suited && high - low <= 2 => {
                if high >= 9 {
                    5
                } else {
                    4
                }
            }
            _ if high >= 11 && low >= 9 => 4, // Broadway-ish
            _ => 2,
        }
    }
}

impl HoleStrategy for StaticHoleStrategy {
    /// Linear map of the chart score onto heads-up equity, 30% for the
    /// weakest holdings up to 85% for the best pairs.
    fn win_percentage(&self, hole: &[Card; 2]) -> f64 {
        30.0 + 5.5 * f64::from(Self::preflop_strength(hole))
    }

    fn multiplier(&self, hole: &[Card; 2]) -> u32 {
        multiplier_for_strength(Self::preflop_strength(hole))
    }

    fn name(&self) -> &str {
        "StaticHoleStrategy"
    }
}

/// Postflop sizing from the made hand.
#[derive(Debug, Clone, Default)]
pub struct RankedTableStrategy;

impl RankedTableStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Convert a ranking to the 0-10 strength scale.
    ///
    /// Pairs made only from table cards are shared with the opponent, so a
    /// one-pair ranking that uses neither hole card drops to high-card
    /// strength.
    pub fn postflop_strength(hole: &[Card; 2], table: &[Card], ranking: &HandStrength) -> u8 {
        let base_strength: u8 = match ranking.category {
            Category::HighCard => 1,
            Category::OnePair => 3,
            Category::TwoPair => 5,
            Category::ThreeOfAKind => 6,
            Category::Straight => 7,
            Category::Flush => 8,
            Category::FullHouse => 9,
            Category::FourOfAKind => 10,
            Category::StraightFlush => 10,
        };

        if ranking.category == Category::OnePair {
            let pair_rank = ranking.kickers[0];
            let uses_hole = hole.iter().any(|c| c.rank.value() == pair_rank);
            let on_table = table
                .iter()
                .filter(|c| c.rank.value() == pair_rank)
                .count()
                >= 2;
            if on_table && !uses_hole {
                return 1;
            }
        }

        // Adjust for kicker strength within same category
        let kicker_boost = u8::from(ranking.kickers[0] >= 12);
        (base_strength + kicker_boost).min(10)
    }
}

impl TableStrategy for RankedTableStrategy {
    fn multiplier(&self, hole: &[Card; 2], table: &[Card], ranking: &HandStrength) -> u32 {
        multiplier_for_strength(Self::postflop_strength(hole, table, ranking))
    }

    fn name(&self) -> &str {
        "RankedTableStrategy"
    }
}

/// Ranks hands with the engine's evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvaluatorRanker;

impl HandRanker for EvaluatorRanker {
    fn rank(&self, hole: &[Card; 2], table: &[Card]) -> HandStrength {
        let mut cards = Vec::with_capacity(2 + table.len());
        cards.extend_from_slice(hole);
        cards.extend_from_slice(table);
        evaluate_hand(&cards)
    }
}
