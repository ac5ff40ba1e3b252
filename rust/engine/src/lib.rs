//! # deepgreen-engine: Card Model and Hand Evaluation
//!
//! Shared poker primitives for the deepgreen heads-up Texas Hold'em agent.
//! Provides card parsing in the match protocol's notation, best-hand
//! evaluation over the agent's hole and table cards, and the actions the
//! agent can reply with.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and payload parsing
//! - [`hand`] - Poker hand evaluation and strength comparison
//! - [`player`] - Actions the agent answers decision requests with
//! - [`errors`] - Error types for card parsing
//!
//! ## Quick Start
//!
//! ```rust
//! use deepgreen_engine::cards::parse_card_list;
//! use deepgreen_engine::hand::{evaluate_hand, Category};
//!
//! let mut cards = parse_card_list("[Ah,Kh]").unwrap();
//! cards.extend(parse_card_list("[Qh,Jh,Th]").unwrap());
//!
//! let strength = evaluate_hand(&cards);
//! assert_eq!(strength.category, Category::StraightFlush);
//! ```

pub mod cards;
pub mod errors;
pub mod hand;
pub mod player;
