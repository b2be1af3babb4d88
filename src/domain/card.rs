use core::fmt;
use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Максимальное числовое значение карты (значения 0..=11).
pub const MAX_CARD_VALUE: u8 = 11;

/// Количество числовых значений одного цвета.
pub const VALUES_PER_COLOR: usize = 12;

/// Цвет карты. Цвет: публичная информация (рубашка видна всем).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    // Порядок вариантов важен: при равных значениях чёрная идёт раньше белой.
    Black,
    White,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::Black, Color::White];

    /// Цвет слота раскладки по его индексу: чётный: белый, нечётный: чёрный.
    pub const fn from_slot_parity(index: usize) -> Self {
        if index % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }
}

/// Значение карты: число 0..=11 или джокер.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CardValue {
    Number(u8),
    Joker,
}

impl CardValue {
    pub fn is_joker(&self) -> bool {
        matches!(self, CardValue::Joker)
    }

    pub fn number(&self) -> Option<u8> {
        match self {
            CardValue::Number(n) => Some(*n),
            CardValue::Joker => None,
        }
    }

    /// Допустимо ли значение для угадывания (числа только 0..=11).
    pub fn is_valid(&self) -> bool {
        match self {
            CardValue::Number(n) => *n <= MAX_CARD_VALUE,
            CardValue::Joker => true,
        }
    }
}

/// Карта в руке игрока. Значение всегда известно движку;
/// статус «открыта» хранится отдельно, в RevealSet.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub color: Color,
    pub value: CardValue,
}

impl Card {
    pub const fn number(color: Color, value: u8) -> Self {
        Self {
            color,
            value: CardValue::Number(value),
        }
    }

    pub const fn joker(color: Color) -> Self {
        Self {
            color,
            value: CardValue::Joker,
        }
    }

    pub fn is_joker(&self) -> bool {
        self.value.is_joker()
    }

    /// Канонический порядок для числовых карт: по значению, затем чёрная раньше белой.
    /// Для джокеров порядка нет: возвращает None.
    pub fn canonical_cmp(&self, other: &Card) -> Option<Ordering> {
        let a = self.value.number()?;
        let b = other.value.number()?;
        Some(a.cmp(&b).then(self.color.cmp(&other.color)))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            Color::Black => 'b',
            Color::White => 'w',
        };
        write!(f, "{ch}")
    }
}

impl fmt::Display for CardValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardValue::Number(n) => write!(f, "{n}"),
            CardValue::Joker => write!(f, "J"),
        }
    }
}

impl fmt::Display for Card {
    /// Формат вида `b7`, `w11`, `wJ`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color, self.value)
    }
}

/// Парсинг строки вида "b7", "w11", "bJ".
impl FromStr for Card {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let color = match chars.next() {
            Some('b') | Some('B') => Color::Black,
            Some('w') | Some('W') => Color::White,
            Some(c) => return Err(format!("Invalid color: {c}")),
            None => return Err("Card string is empty".into()),
        };

        let rest = chars.as_str();
        let value = match rest {
            "J" | "j" => CardValue::Joker,
            _ => {
                let n: u8 = rest
                    .parse()
                    .map_err(|_| format!("Invalid value: {rest}"))?;
                if n > MAX_CARD_VALUE {
                    return Err(format!("Value out of range: {n}"));
                }
                CardValue::Number(n)
            }
        };

        Ok(Card { color, value })
    }
}
