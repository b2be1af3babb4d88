use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::{opponent_of, Hand, PlayerIndex};

/// Открытые позиции одной руки.
///
/// Единственный источник правды для маскировки. Размер множества внутри
/// матча только растёт; при вставке карты в руку индексы правее сдвигаются.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RevealSet {
    indices: BTreeSet<usize>,
}

impl RevealSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Открыть позицию. Возвращает false, если она уже была открыта.
    pub fn reveal(&mut self, index: usize) -> bool {
        self.indices.insert(index)
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// В руку вставили карту на `position`: все открытые индексы >= position
    /// сдвигаются на единицу вправо.
    pub fn shift_for_insert(&mut self, position: usize) {
        self.indices = self
            .indices
            .iter()
            .map(|&i| if i >= position { i + 1 } else { i })
            .collect();
    }

    /// Рука открыта целиком.
    pub fn covers(&self, hand_len: usize) -> bool {
        hand_len > 0 && (0..hand_len).all(|i| self.is_revealed(i))
    }

    /// Самая левая закрытая позиция руки.
    pub fn first_hidden(&self, hand_len: usize) -> Option<usize> {
        (0..hand_len).find(|i| !self.is_revealed(*i))
    }
}

/// Проверка конца матча: если чья-то рука открыта полностью,
/// побеждает соперник. Проверяем сначала руку `checked_first`.
pub fn check_winner(
    hands: &[Hand; 2],
    reveals: &[RevealSet; 2],
    checked_first: PlayerIndex,
) -> Option<PlayerIndex> {
    let order = [checked_first, opponent_of(checked_first)];
    order
        .into_iter()
        .find(|&p| reveals[p as usize].covers(hands[p as usize].len()))
        .map(opponent_of)
}
