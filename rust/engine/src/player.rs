use serde::{Deserialize, Serialize};
use std::fmt;

/// An action the agent can answer a decision request with.
///
/// Serializes to the protocol reply `"<action> <amount>"`; only a raise
/// carries a non-zero amount.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Put no chips in (only meaningful when nothing is owed)
    Check,
    /// Match the current bet; `call 0` doubles as a checking call
    Call,
    /// Fold and forfeit the hand
    Fold,
    /// Raise by the given amount
    Raise(u32),
}

impl PlayerAction {
    pub fn name(&self) -> &'static str {
        match self {
            PlayerAction::Check => "check",
            PlayerAction::Call => "call",
            PlayerAction::Fold => "fold",
            PlayerAction::Raise(_) => "raise",
        }
    }

    pub fn amount(&self) -> u32 {
        match self {
            PlayerAction::Raise(amount) => *amount,
            _ => 0,
        }
    }
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.amount())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_rendering() {
        assert_eq!(PlayerAction::Check.to_string(), "check 0");
        assert_eq!(PlayerAction::Call.to_string(), "call 0");
        assert_eq!(PlayerAction::Fold.to_string(), "fold 0");
        assert_eq!(PlayerAction::Raise(40).to_string(), "raise 40");
    }
}
