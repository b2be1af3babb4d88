//! Игровой движок: раздача, ходы, догадки, открытие карт.
//!
//! Высокоуровневый объект: `GameSession`
//! Основные операции:
//!   - `initialize_game` / `select_initial_cards` – старт матча и раздача
//!   - `draw_card` / `place_card` / `guess_card` / `end_turn` – ход игрока
//!   - `masked_state` – снапшот для конкретного зрителя

pub mod dealing;
pub mod errors;
pub mod history;
pub mod reveal;
pub mod session;
pub mod snapshot;
pub mod turn;

pub use errors::{EngineError, ErrorKind};
pub use history::{MatchEvent, MatchEventKind, MatchHistory};
pub use reveal::{check_winner, RevealSet};
pub use session::{GameSession, GuessOutcome, SelectionOutcome};
pub use snapshot::{
    CardView, GameSnapshot, HandView, MatchStatus, PileSlotView, PlayerView, TurnView, Viewer,
};
pub use turn::{TurnPhase, TurnState};

/// RNG интерфейс для engine.
/// Реализации: в infra (обёртки над `rand`), в тестах: свои заглушки.
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);

    /// Равномерно случайный индекс в `0..len`. `len` всегда > 0.
    fn pick_index(&mut self, len: usize) -> usize;
}
