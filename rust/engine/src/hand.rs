use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank, Suit};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::HighCard => "high card",
            Category::OnePair => "one pair",
            Category::TwoPair => "two pair",
            Category::ThreeOfAKind => "three of a kind",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::FullHouse => "full house",
            Category::FourOfAKind => "four of a kind",
            Category::StraightFlush => "straight flush",
        };
        f.write_str(name)
    }
}

/// Best hand found among a set of cards.
///
/// Ordering is by category first, then kickers high to low, so two
/// strengths compare the same way the hands would at showdown.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct HandStrength {
    pub category: Category,
    // kickers: ordered high -> low for tiebreaks
    pub kickers: [u8; 5],
}

/// Evaluates the best five-card hand available in `cards`.
///
/// Intended for the 5 to 7 cards a player sees after the flop; smaller sets
/// still evaluate (missing kickers are zero) but can never make a straight
/// or flush.
///
/// ```
/// use deepgreen_engine::cards::parse_card_list;
/// use deepgreen_engine::hand::{evaluate_hand, Category};
///
/// let cards = parse_card_list("[Ah,Ad,Kc,Qs,2h]").unwrap();
/// assert_eq!(evaluate_hand(&cards).category, Category::OnePair);
/// ```
pub fn evaluate_hand(cards: &[Card]) -> HandStrength {
    // Count ranks and suits
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut suit_counts = [0u8; 4];
    let mut by_suit: [Vec<u8>; 4] = [vec![], vec![], vec![], vec![]];
    for &c in cards {
        let r = rank_val(c.rank);
        rank_counts[r as usize] += 1;
        let s = suit_index(c.suit);
        suit_counts[s] += 1;
        by_suit[s].push(r);
    }

    let flush_suit = suit_counts.iter().position(|&count| count >= 5);

    if let Some(s) = flush_suit {
        by_suit[s].sort_unstable();
        by_suit[s].dedup();
        if let Some(high) = detect_straight_high(&by_suit[s]) {
            return HandStrength {
                category: Category::StraightFlush,
                kickers: [high, 0, 0, 0, 0],
            };
        }
    }

    if let Some((quad, kicker)) = detect_quads(&rank_counts) {
        return HandStrength {
            category: Category::FourOfAKind,
            kickers: [quad, kicker, 0, 0, 0],
        };
    }

    if let Some((trip, pair)) = detect_full_house(&rank_counts) {
        return HandStrength {
            category: Category::FullHouse,
            kickers: [trip, pair, 0, 0, 0],
        };
    }

    if let Some(s) = flush_suit {
        let mut ranks = by_suit[s].clone();
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        return HandStrength {
            category: Category::Flush,
            kickers: top_five(&ranks),
        };
    }

    let uniq: Vec<u8> = (2..=14u8).filter(|&r| rank_counts[r as usize] > 0).collect();
    if let Some(high) = detect_straight_high(&uniq) {
        return HandStrength {
            category: Category::Straight,
            kickers: [high, 0, 0, 0, 0],
        };
    }

    // Three / Two pair / One pair / High card
    let (trip_ranks, pair_ranks, mut singles) = classify_multiples(&rank_counts);
    singles.sort_unstable_by(|a, b| b.cmp(a));

    if let Some(t) = trip_ranks.first().copied() {
        // trips + two highest kickers
        let mut remain: Vec<u8> = pair_ranks.iter().chain(singles.iter()).copied().collect();
        remain.sort_unstable_by(|a, b| b.cmp(a));
        let mut k = [t, 0, 0, 0, 0];
        k[1] = remain.first().copied().unwrap_or(0);
        k[2] = remain.get(1).copied().unwrap_or(0);
        return HandStrength {
            category: Category::ThreeOfAKind,
            kickers: k,
        };
    }
    if pair_ranks.len() >= 2 {
        let high = pair_ranks[0];
        let low = pair_ranks[1];
        // a third pair can still play as the kicker
        let kicker = pair_ranks
            .get(2)
            .copied()
            .into_iter()
            .chain(singles.iter().copied())
            .max()
            .unwrap_or(0);
        return HandStrength {
            category: Category::TwoPair,
            kickers: [high, low, kicker, 0, 0],
        };
    }
    if let Some(p) = pair_ranks.first().copied() {
        let mut k = [p, 0, 0, 0, 0];
        for i in 0..3 {
            k[i + 1] = singles.get(i).copied().unwrap_or(0);
        }
        return HandStrength {
            category: Category::OnePair,
            kickers: k,
        };
    }

    HandStrength {
        category: Category::HighCard,
        kickers: top_five(&singles),
    }
}

pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.kickers.cmp(&b.kickers),
        ord => ord,
    }
}

fn rank_val(r: Rank) -> u8 {
    r.value()
}

fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Clubs => 0,
        Suit::Diamonds => 1,
        Suit::Hearts => 2,
        Suit::Spades => 3,
    }
}

fn top_five(sorted_desc: &[u8]) -> [u8; 5] {
    let mut k = [0u8; 5];
    for (slot, r) in k.iter_mut().zip(sorted_desc) {
        *slot = *r;
    }
    k
}

fn detect_straight_high(sorted_unique_ranks: &[u8]) -> Option<u8> {
    if sorted_unique_ranks.is_empty() {
        return None;
    }
    let mut w = sorted_unique_ranks.to_vec();
    w.sort_unstable();
    // Ace-low straight support: treat Ace as 1 additionally
    if w.binary_search(&14).is_ok() {
        w.insert(0, 1);
    }

    let mut run = 1;
    let mut best_high = 0u8;
    for i in 1..w.len() {
        if w[i] == w[i - 1] + 1 {
            run += 1;
            if run >= 5 {
                best_high = w[i];
            }
        } else if w[i] != w[i - 1] {
            run = 1;
        }
    }
    (best_high != 0).then_some(best_high)
}

fn detect_quads(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let quad = (2..=14u8).rev().find(|&r| rank_counts[r as usize] == 4)?;
    let kicker = (2..=14u8)
        .rev()
        .find(|&r| r != quad && rank_counts[r as usize] > 0)
        .unwrap_or(0);
    Some((quad, kicker))
}

fn detect_full_house(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let mut trips: Vec<u8> = vec![];
    let mut pairs: Vec<u8> = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            _ => {}
        }
    }
    let top = *trips.first()?;
    if let Some(&second) = trips.get(1) {
        return Some((top, second));
    }
    pairs.first().map(|&p| (top, p))
}

/// Splits ranks by multiplicity; each list is ordered high -> low.
fn classify_multiples(rank_counts: &[u8; 15]) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut trips = vec![];
    let mut pairs = vec![];
    let mut singles = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            1 => singles.push(r),
            _ => {}
        }
    }
    (trips, pairs, singles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_card_list;

    fn eval(payload: &str) -> HandStrength {
        evaluate_hand(&parse_card_list(payload).unwrap())
    }

    #[test]
    fn test_wheel_straight_is_five_high() {
        let hs = eval("[Ah,2d,3c,4s,5h]");
        assert_eq!(hs.category, Category::Straight);
        assert_eq!(hs.kickers[0], 5);
    }

    #[test]
    fn test_two_pair_kicker_uses_third_pair() {
        let hs = eval("[Kh,Kd,9c,9s,Qh,Qd,2c]");
        assert_eq!(hs.category, Category::TwoPair);
        assert_eq!(hs.kickers, [13, 12, 9, 0, 0]);
    }

    #[test]
    fn test_derived_order_matches_compare_hands() {
        let a = eval("[Ah,Ad,Kc,Qs,2h]");
        let b = eval("[Ah,Ad,Jc,Ts,2h]");
        assert_eq!(a.cmp(&b), compare_hands(&a, &b));
        assert!(a > b);
    }

    #[test]
    fn test_six_card_flush() {
        let hs = eval("[2h,7h,9h,Jh,Kh,Ah]");
        assert_eq!(hs.category, Category::Flush);
        assert_eq!(hs.kickers, [14, 13, 11, 9, 7]);
    }
}
