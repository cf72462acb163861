use crate::domain::card::{Card, Suit};
use crate::domain::hand::{EvaluatedHand, HandCategory};

use super::lookup_tables::{detect_straight, rank_to_bit, RankMask};

/// Главная функция: лучшая 5-карточная рука из hole + board.
pub fn evaluate_best_hand(hole: &[Card], board: &[Card]) -> EvaluatedHand {
    let mut all_cards = Vec::with_capacity(hole.len() + board.len());
    all_cards.extend_from_slice(hole);
    all_cards.extend_from_slice(board);
    evaluate(&all_cards)
}

/// Оценить от 0 до 7 карт.
///
/// Меньше 5 карт – это не покерная рука, а запасной путь для тех, кто ещё не видел флоп:
/// всегда HighCard со всеми рангами по убыванию.
pub fn evaluate(cards: &[Card]) -> EvaluatedHand {
    debug_assert!(cards.len() <= 7, "evaluate ожидает не больше 7 карт");

    if cards.len() < 5 {
        return partial_high_card(cards);
    }

    let mut rank_counts = [0u8; 15]; // используем индексы 2..=14
    let mut suit_counts = [0u8; 4];
    let mut suit_masks: [RankMask; 4] = [0; 4];

    for card in cards {
        rank_counts[card.rank.value() as usize] += 1;
        suit_counts[card.suit.index()] += 1;
        suit_masks[card.suit.index()] |= rank_to_bit(card.rank);
    }

    let all_mask = suit_masks.iter().fold(0, |acc, m| acc | m);
    let flush_mask = Suit::ALL
        .iter()
        .map(|s| s.index())
        .find(|&i| suit_counts[i] >= 5)
        .map(|i| suit_masks[i]);

    // Стрит-флеш ищем только внутри карт флешевой масти.
    if let Some(fm) = flush_mask {
        if let Some(high) = detect_straight(fm) {
            let category = if high == 14 {
                HandCategory::RoyalFlush
            } else {
                HandCategory::StraightFlush
            };
            return EvaluatedHand::new(category, vec![high]);
        }
    }

    let present = ranks_desc(&rank_counts, |c| c >= 1);

    if let Some(&quad) = ranks_desc(&rank_counts, |c| c >= 4).first() {
        let mut tb = vec![quad];
        tb.extend(kickers(&present, &[quad], 1));
        return EvaluatedHand::new(HandCategory::FourOfAKind, tb);
    }

    let trips = ranks_desc(&rank_counts, |c| c >= 3);
    if let Some(&t) = trips.first() {
        // Пара для фулл-хауса может быть и вторым сетом.
        let pair = ranks_desc(&rank_counts, |c| c >= 2)
            .into_iter()
            .find(|&r| r != t);
        if let Some(p) = pair {
            return EvaluatedHand::new(HandCategory::FullHouse, vec![t, p]);
        }
    }

    if let Some(fm) = flush_mask {
        let mut tb = ranks_of_mask_desc(fm);
        tb.truncate(5);
        return EvaluatedHand::new(HandCategory::Flush, tb);
    }

    if let Some(high) = detect_straight(all_mask) {
        return EvaluatedHand::new(HandCategory::Straight, vec![high]);
    }

    if let Some(&t) = trips.first() {
        let mut tb = vec![t];
        tb.extend(kickers(&present, &[t], 2));
        return EvaluatedHand::new(HandCategory::ThreeOfAKind, tb);
    }

    let pairs = ranks_desc(&rank_counts, |c| c >= 2);
    match pairs.as_slice() {
        [p1, p2, ..] => {
            let mut tb = vec![*p1, *p2];
            tb.extend(kickers(&present, &[*p1, *p2], 1));
            EvaluatedHand::new(HandCategory::TwoPair, tb)
        }
        [p] => {
            let mut tb = vec![*p];
            tb.extend(kickers(&present, &[*p], 3));
            EvaluatedHand::new(HandCategory::Pair, tb)
        }
        [] => EvaluatedHand::new(HandCategory::HighCard, kickers(&present, &[], 5)),
    }
}

/// HighCard по всем картам (для 0–4 карт).
fn partial_high_card(cards: &[Card]) -> EvaluatedHand {
    let mut ranks: Vec<u8> = cards.iter().map(|c| c.rank.value()).collect();
    ranks.sort_unstable_by(|a, b| b.cmp(a));
    EvaluatedHand::new(HandCategory::HighCard, ranks)
}

/// Ранги (14..=2), у которых количество карт удовлетворяет условию.
fn ranks_desc(rank_counts: &[u8; 15], pred: impl Fn(u8) -> bool) -> Vec<u8> {
    (2..=14u8)
        .rev()
        .filter(|&r| pred(rank_counts[r as usize]))
        .collect()
}

/// Старшие `n` рангов из `present`, кроме тех, что уже заняты комбинацией.
fn kickers(present: &[u8], used: &[u8], n: usize) -> Vec<u8> {
    present
        .iter()
        .copied()
        .filter(|r| !used.contains(r))
        .take(n)
        .collect()
}

fn ranks_of_mask_desc(mask: RankMask) -> Vec<u8> {
    (2..=14u8)
        .rev()
        .filter(|&r| mask & (1 << (r - 2)) != 0)
        .collect()
}
