//! Доменная модель игры: карты, пул значений, стопка, руки, ростер, правила.

pub mod card;
pub mod hand;
pub mod pile;
pub mod player;
pub mod rules;
pub mod value_pool;

/// Индекс игрока: 0 или 1.
pub type PlayerIndex = u8;

/// Количество игроков в матче.
pub const PLAYER_COUNT: usize = 2;

/// Соперник игрока.
pub const fn opponent_of(player: PlayerIndex) -> PlayerIndex {
    1 - player
}

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use hand::*;
pub use pile::*;
pub use player::*;
pub use rules::*;
pub use value_pool::*;
