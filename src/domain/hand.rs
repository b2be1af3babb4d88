use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;

/// Рука игрока: упорядоченный ряд карт.
///
/// Канонический порядок: по возрастанию значения, при равенстве чёрная раньше белой.
/// Джокеры порядка не имеют и лежат там, куда их положили.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hand {
    pub cards: Vec<Card>,
}

/// Позиция вне диапазона `[0, len]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionOutOfRange {
    pub position: usize,
    pub len: usize,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Стартовая рука: сортировка числовых карт в каноническом порядке.
    pub fn from_initial(mut cards: Vec<Card>) -> Self {
        sort_canonical(&mut cards);
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Куда встала бы числовая карта: сразу после последней
    /// числовой карты, которая сортируется раньше неё.
    /// Для джокера возвращает None.
    pub fn sorted_position(&self, card: &Card) -> Option<usize> {
        if card.is_joker() {
            return None;
        }
        let mut pos = 0;
        for (i, existing) in self.cards.iter().enumerate() {
            if let Some(Ordering::Less) = existing.canonical_cmp(card) {
                pos = i + 1;
            }
        }
        Some(pos)
    }

    /// Вставка с сохранением порядка. Для джокера используется
    /// позиция вызывающего (обрезается до длины руки).
    pub fn sorted_insert(&mut self, card: Card, joker_position: usize) -> usize {
        let pos = self
            .sorted_position(&card)
            .unwrap_or_else(|| joker_position.min(self.cards.len()));
        self.cards.insert(pos, card);
        pos
    }

    /// Вставка в позицию, выбранную игроком. Числовую корректность
    /// места движок не проверяет.
    pub fn place_at(&mut self, card: Card, position: usize) -> Result<usize, PositionOutOfRange> {
        if position > self.cards.len() {
            return Err(PositionOutOfRange {
                position,
                len: self.cards.len(),
            });
        }
        self.cards.insert(position, card);
        Ok(position)
    }

    /// Числовые карты идут в каноническом порядке (джокеры игнорируются).
    pub fn is_canonically_sorted(&self) -> bool {
        let numbered: Vec<&Card> = self.cards.iter().filter(|c| !c.is_joker()).collect();
        numbered
            .windows(2)
            .all(|w| w[0].canonical_cmp(w[1]) != Some(Ordering::Greater))
    }
}

fn sort_canonical(cards: &mut [Card]) {
    // Стартовые руки джокеров не содержат; джокеры на всякий случай уходят в конец.
    cards.sort_by(|a, b| match (a.is_joker(), b.is_joker()) {
        (false, false) => a.canonical_cmp(b).unwrap_or(Ordering::Equal),
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (true, true) => a.color.cmp(&b.color),
    });
}
