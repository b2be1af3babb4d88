use serde::{Deserialize, Serialize};

use crate::domain::card::{Color, VALUES_PER_COLOR};
use crate::domain::PlayerIndex;

/// Размер стартовой раскладки: 12 белых + 12 чёрных числовых слотов.
pub const SETUP_SPREAD_SIZE: usize = 2 * VALUES_PER_COLOR;

/// Один слот общей стопки. Значение у слота ещё не определено -
/// оно назначается только в момент взятия карты.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PileSlot {
    pub color: Color,
    pub joker: bool,
    pub drawn: bool,
}

impl PileSlot {
    pub const fn numbered(color: Color) -> Self {
        Self {
            color,
            joker: false,
            drawn: false,
        }
    }

    pub const fn joker(color: Color) -> Self {
        Self {
            color,
            joker: true,
            drawn: false,
        }
    }
}

/// Стартовая раскладка на этапе setup: 24 рубашки, цвет определяется
/// чётностью индекса. Хранит, какой игрок какие слоты выбрал.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SetupSpread {
    /// Выбор каждого игрока (None: ещё не отправлен).
    pub selections: [Option<Vec<usize>>; 2],
}

impl SetupSpread {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self, player: PlayerIndex) -> Option<&[usize]> {
        self.selections[player as usize].as_deref()
    }

    /// Занят ли слот другим игроком.
    pub fn claimed_by_other(&self, player: PlayerIndex, slot: usize) -> bool {
        let other = 1 - player as usize;
        self.selections[other]
            .as_ref()
            .map(|s| s.contains(&slot))
            .unwrap_or(false)
    }

    /// Цвета выбранных слотов игрока.
    pub fn colors_of(&self, player: PlayerIndex) -> Vec<Color> {
        self.selection(player)
            .map(|s| s.iter().map(|&i| Color::from_slot_parity(i)).collect())
            .unwrap_or_default()
    }

    pub fn both_committed(&self) -> bool {
        self.selections.iter().all(|s| s.is_some())
    }

    /// Сколько слотов цвета выбрано обоими игроками вместе.
    pub fn committed_count(&self, color: Color) -> usize {
        (0..2u8)
            .map(|p| self.colors_of(p).into_iter().filter(|c| *c == color).count())
            .sum()
    }
}

/// Общая стопка после раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommunityPile {
    pub slots: Vec<PileSlot>,
}

impl CommunityPile {
    /// Собрать стопку: оставшиеся числовые слоты по цветам + по одному джокеру.
    /// Порядок здесь детерминированный, перемешивание делает engine.
    pub fn from_remaining(black_numbered: usize, white_numbered: usize) -> Self {
        let mut slots = Vec::with_capacity(black_numbered + white_numbered + 2);
        slots.extend((0..white_numbered).map(|_| PileSlot::numbered(Color::White)));
        slots.extend((0..black_numbered).map(|_| PileSlot::numbered(Color::Black)));
        slots.push(PileSlot::joker(Color::White));
        slots.push(PileSlot::joker(Color::Black));
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PileSlot> {
        self.slots.get(index)
    }

    /// Слот, который ещё можно взять.
    pub fn undrawn(&self, index: usize) -> Option<&PileSlot> {
        self.slots.get(index).filter(|s| !s.drawn)
    }

    pub fn mark_drawn(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.drawn = true;
        }
    }

    pub fn remaining(&self) -> usize {
        self.slots.iter().filter(|s| !s.drawn).count()
    }

    /// Все слоты взяты (или стопка пуста).
    pub fn is_exhausted(&self) -> bool {
        self.slots.iter().all(|s| s.drawn)
    }

    /// Сколько невзятых числовых слотов цвета.
    pub fn undrawn_numbered(&self, color: Color) -> usize {
        self.slots
            .iter()
            .filter(|s| !s.drawn && !s.joker && s.color == color)
            .count()
    }
}
