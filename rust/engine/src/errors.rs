use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CardError {
    #[error("Invalid rank character: {0:?}")]
    InvalidRank(char),
    #[error("Invalid suit character: {0:?}")]
    InvalidSuit(char),
    #[error("Invalid card token: {0:?} (expected rank + suit, e.g. \"Ah\")")]
    InvalidToken(String),
    #[error("Empty card in payload: {0:?}")]
    EmptySegment(String),
}
