use deepgreen_engine::cards::{Card, Rank as R, Suit as S};
use deepgreen_engine::hand::{Category, compare_hands, evaluate_hand};

fn c(s: S, r: R) -> Card {
    Card { suit: s, rank: r }
}

#[test]
fn detects_royal_flush_on_the_river() {
    let cards = [
        c(S::Hearts, R::Ten),
        c(S::Hearts, R::Jack),
        c(S::Hearts, R::Queen),
        c(S::Hearts, R::King),
        c(S::Hearts, R::Ace),
        c(S::Clubs, R::Two),
        c(S::Diamonds, R::Three),
    ];
    let hs = evaluate_hand(&cards);
    assert_eq!(hs.category, Category::StraightFlush);
    assert_eq!(hs.kickers[0], 14);
}

#[test]
fn evaluates_flop_sized_hands() {
    // hole + 3 table cards
    let trips = [
        c(S::Clubs, R::Queen),
        c(S::Hearts, R::Queen),
        c(S::Diamonds, R::Queen),
        c(S::Spades, R::Two),
        c(S::Clubs, R::Nine),
    ];
    let hs = evaluate_hand(&trips);
    assert_eq!(hs.category, Category::ThreeOfAKind);
    assert_eq!(hs.kickers, [12, 9, 2, 0, 0]);
}

#[test]
fn evaluates_turn_sized_hands() {
    // hole + 4 table cards
    let full_house = [
        c(S::Clubs, R::King),
        c(S::Diamonds, R::King),
        c(S::Hearts, R::King),
        c(S::Clubs, R::Four),
        c(S::Diamonds, R::Four),
        c(S::Hearts, R::Two),
    ];
    let hs = evaluate_hand(&full_house);
    assert_eq!(hs.category, Category::FullHouse);
    assert_eq!(hs.kickers[..2], [13, 4]);
}

#[test]
fn category_ordering_is_correct() {
    let quads = [
        c(S::Clubs, R::Ace),
        c(S::Diamonds, R::Ace),
        c(S::Hearts, R::Ace),
        c(S::Spades, R::Ace),
        c(S::Clubs, R::King),
        c(S::Diamonds, R::Queen),
        c(S::Hearts, R::Two),
    ];
    let full_house = [
        c(S::Clubs, R::King),
        c(S::Diamonds, R::King),
        c(S::Hearts, R::King),
        c(S::Clubs, R::Queen),
        c(S::Diamonds, R::Queen),
        c(S::Hearts, R::Two),
        c(S::Spades, R::Three),
    ];
    let a = evaluate_hand(&quads);
    let b = evaluate_hand(&full_house);
    assert_eq!(a.category, Category::FourOfAKind);
    assert!(compare_hands(&a, &b).is_gt());
}

#[test]
fn flush_beats_straight_and_is_detected() {
    let flush = [
        c(S::Hearts, R::Two),
        c(S::Hearts, R::Seven),
        c(S::Hearts, R::Jack),
        c(S::Hearts, R::Queen),
        c(S::Hearts, R::Nine),
        c(S::Clubs, R::Ace),
        c(S::Diamonds, R::King),
    ];
    let straight = [
        c(S::Clubs, R::Five),
        c(S::Hearts, R::Six),
        c(S::Clubs, R::Seven),
        c(S::Hearts, R::Eight),
        c(S::Diamonds, R::Nine),
        c(S::Spades, R::Two),
        c(S::Clubs, R::Three),
    ];
    let a = evaluate_hand(&flush);
    assert_eq!(a.category, Category::Flush);
    let b = evaluate_hand(&straight);
    assert_eq!(b.category, Category::Straight);
    assert!(compare_hands(&a, &b).is_gt());
}

#[test]
fn pair_beats_high_card() {
    let pair = [
        c(S::Clubs, R::Ace),
        c(S::Hearts, R::Ace),
        c(S::Spades, R::Two),
        c(S::Diamonds, R::Nine),
        c(S::Clubs, R::Four),
    ];
    let high = [
        c(S::Clubs, R::Ace),
        c(S::Hearts, R::King),
        c(S::Spades, R::Nine),
        c(S::Diamonds, R::Eight),
        c(S::Clubs, R::Seven),
    ];
    let a = evaluate_hand(&pair);
    let b = evaluate_hand(&high);
    assert_eq!(a.category, Category::OnePair);
    assert_eq!(b.category, Category::HighCard);
    assert!(a > b);
}

#[test]
fn kickers_break_ties_within_category() {
    let better = [
        c(S::Clubs, R::Ten),
        c(S::Hearts, R::Ten),
        c(S::Spades, R::Ace),
        c(S::Diamonds, R::Six),
        c(S::Clubs, R::Three),
    ];
    let worse = [
        c(S::Diamonds, R::Ten),
        c(S::Spades, R::Ten),
        c(S::Hearts, R::King),
        c(S::Diamonds, R::Six),
        c(S::Clubs, R::Three),
    ];
    assert!(compare_hands(&evaluate_hand(&better), &evaluate_hand(&worse)).is_gt());
}
