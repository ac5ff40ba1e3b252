use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CardError;

/// Represents one of the four suits in a standard 52-card deck.
/// Used as a component of [`Card`] to fully define a playing card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit (c)
    Clubs,
    /// Diamonds suit (d)
    Diamonds,
    /// Hearts suit (h)
    Hearts,
    /// Spades suit (s)
    Spades,
}

impl Suit {
    pub fn from_char(c: char) -> Result<Suit, CardError> {
        match c {
            'c' | 'C' => Ok(Suit::Clubs),
            'd' | 'D' => Ok(Suit::Diamonds),
            'h' | 'H' => Ok(Suit::Hearts),
            's' | 'S' => Ok(Suit::Spades),
            other => Err(CardError::InvalidSuit(other)),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }
}

/// Represents the rank (face value) of a playing card from Two through Ace.
/// Numeric values are assigned for comparison and hand evaluation purposes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Rank 2
    Two = 2,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10 (written `T`)
    Ten,
    /// Jack (11)
    Jack,
    /// Queen (12)
    Queen,
    /// King (13)
    King,
    /// Ace (14)
    Ace,
}

impl Rank {
    /// Face value used to order ranks, `2` through `14`.
    ///
    /// ```
    /// use deepgreen_engine::cards::Rank;
    ///
    /// assert_eq!(Rank::Two.value(), 2);
    /// assert_eq!(Rank::Ace.value(), 14);
    /// assert!(Rank::Ten.value() < Rank::Jack.value());
    /// ```
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn from_char(c: char) -> Result<Rank, CardError> {
        match c {
            '2' => Ok(Rank::Two),
            '3' => Ok(Rank::Three),
            '4' => Ok(Rank::Four),
            '5' => Ok(Rank::Five),
            '6' => Ok(Rank::Six),
            '7' => Ok(Rank::Seven),
            '8' => Ok(Rank::Eight),
            '9' => Ok(Rank::Nine),
            'T' | 't' => Ok(Rank::Ten),
            'J' | 'j' => Ok(Rank::Jack),
            'Q' | 'q' => Ok(Rank::Queen),
            'K' | 'k' => Ok(Rank::King),
            'A' | 'a' => Ok(Rank::Ace),
            other => Err(CardError::InvalidRank(other)),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }
}

/// Represents a single playing card with a suit and rank.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    /// The suit of the card (Clubs, Diamonds, Hearts, or Spades)
    pub suit: Suit,
    /// The rank of the card (Two through Ace)
    pub rank: Rank,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.to_char(), self.suit.to_char())
    }
}

impl FromStr for Card {
    type Err = CardError;

    /// Parses protocol notation: one rank character followed by one suit
    /// character, e.g. `"Ah"`, `"Td"`, `"2c"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(su), None) => Ok(Card {
                rank: Rank::from_char(r)?,
                suit: Suit::from_char(su)?,
            }),
            _ => Err(CardError::InvalidToken(s.to_string())),
        }
    }
}

/// Parses a card payload such as `[Ah,Kd,2c]` into cards, in payload order.
///
/// Surrounding brackets are optional. An empty payload (`[]`) yields no cards;
/// an empty segment between commas is rejected.
///
/// # Examples
///
/// ```
/// use deepgreen_engine::cards::{parse_card_list, Card, Rank, Suit};
///
/// let cards = parse_card_list("[Ah,Td]").unwrap();
/// assert_eq!(cards, vec![Card::new(Rank::Ace, Suit::Hearts), Card::new(Rank::Ten, Suit::Diamonds)]);
/// assert!(parse_card_list("[Ah,,Kd]").is_err());
/// ```
pub fn parse_card_list(payload: &str) -> Result<Vec<Card>, CardError> {
    let inner = payload.trim();
    let inner = inner.strip_prefix('[').unwrap_or(inner);
    let inner = inner.strip_suffix(']').unwrap_or(inner);
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }
    inner
        .split(',')
        .map(|segment| {
            let segment = segment.trim();
            if segment.is_empty() {
                Err(CardError::EmptySegment(payload.to_string()))
            } else {
                segment.parse()
            }
        })
        .collect()
}

/// Formats cards back into payload notation, e.g. `[Ah,Kd]`.
pub fn format_card_list(cards: &[Card]) -> String {
    let joined: Vec<String> = cards.iter().map(Card::to_string).collect();
    format!("[{}]", joined.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_round_trips_through_display() {
        let card: Card = "Td".parse().unwrap();
        assert_eq!(card, Card::new(Rank::Ten, Suit::Diamonds));
        assert_eq!(card.to_string(), "Td");
    }

    #[test]
    fn test_card_rejects_long_token() {
        assert_eq!(
            "10h".parse::<Card>(),
            Err(CardError::InvalidToken("10h".to_string()))
        );
    }

    #[test]
    fn test_card_rejects_unknown_suit() {
        assert_eq!("Ax".parse::<Card>(), Err(CardError::InvalidSuit('x')));
    }

    #[test]
    fn test_rank_values_are_strictly_increasing() {
        let ranks = "23456789TJQKA"
            .chars()
            .map(|c| Rank::from_char(c).unwrap().value())
            .collect::<Vec<_>>();
        assert!(ranks.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ranks.first(), Some(&2));
        assert_eq!(ranks.last(), Some(&14));
    }

    #[test]
    fn test_parse_card_list_without_brackets() {
        let cards = parse_card_list("Ah,Kd,2c").unwrap();
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[2], Card::new(Rank::Two, Suit::Clubs));
    }

    #[test]
    fn test_parse_card_list_empty_payload() {
        assert_eq!(parse_card_list("[]").unwrap(), Vec::new());
    }

    #[test]
    fn test_format_card_list() {
        let cards = parse_card_list("[Ah,Kd]").unwrap();
        assert_eq!(format_card_list(&cards), "[Ah,Kd]");
    }
}
