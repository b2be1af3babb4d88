use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::card::{Color, MAX_CARD_VALUE, VALUES_PER_COLOR};

/// Пул ещё не назначенных числовых значений по цветам.
///
/// Инвариант: для каждого цвета `assigned + unassigned == 12`,
/// значение привязывается к одной карте на весь матч.
/// Случайный выбор делает engine (через RandomSource), НЕ здесь.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValuePool {
    black: BTreeSet<u8>,
    white: BTreeSet<u8>,
}

impl Default for ValuePool {
    fn default() -> Self {
        Self::full()
    }
}

impl ValuePool {
    /// Полный пул: 0..=11 для каждого цвета.
    pub fn full() -> Self {
        Self {
            black: (0..=MAX_CARD_VALUE).collect(),
            white: (0..=MAX_CARD_VALUE).collect(),
        }
    }

    fn set(&self, color: Color) -> &BTreeSet<u8> {
        match color {
            Color::Black => &self.black,
            Color::White => &self.white,
        }
    }

    fn set_mut(&mut self, color: Color) -> &mut BTreeSet<u8> {
        match color {
            Color::Black => &mut self.black,
            Color::White => &mut self.white,
        }
    }

    /// Свободные значения цвета в порядке возрастания.
    pub fn available(&self, color: Color) -> Vec<u8> {
        self.set(color).iter().copied().collect()
    }

    pub fn remaining(&self, color: Color) -> usize {
        self.set(color).len()
    }

    pub fn assigned(&self, color: Color) -> usize {
        VALUES_PER_COLOR - self.remaining(color)
    }

    pub fn is_available(&self, color: Color, value: u8) -> bool {
        self.set(color).contains(&value)
    }

    /// Привязать значение к карте. Возвращает false, если оно уже занято.
    pub fn bind(&mut self, color: Color, value: u8) -> bool {
        self.set_mut(color).remove(&value)
    }
}
