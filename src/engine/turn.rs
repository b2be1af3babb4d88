use serde::{Deserialize, Serialize};

use crate::domain::{opponent_of, PlayerIndex};
use crate::engine::errors::EngineError;

/// Фаза внутри хода игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TurnPhase {
    Draw,
    Place,
    Guess,
}

/// Состояние хода: чей ход, какая фаза и что уже сделано за этот ход.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnState {
    pub current_player: PlayerIndex,
    pub phase: TurnPhase,
    /// Индекс карты, выложенной в этом ходу (в руке текущего игрока).
    pub placed_index: Option<usize>,
    /// Сколько верных догадок сделано в этом ходу.
    pub correct_guesses: u32,
}

impl TurnState {
    /// Первый ход матча. Если стопка пуста: сразу фаза угадывания.
    pub fn first(player: PlayerIndex, pile_exhausted: bool) -> Self {
        Self {
            current_player: player,
            phase: opening_phase(pile_exhausted),
            placed_index: None,
            correct_guesses: 0,
        }
    }

    /// Общий guard: ходит именно этот игрок и фаза совпадает.
    pub fn ensure(&self, player: PlayerIndex, phase: TurnPhase) -> Result<(), EngineError> {
        if self.current_player != player {
            return Err(EngineError::NotYourTurn(player));
        }
        if self.phase != phase {
            return Err(EngineError::WrongPhase);
        }
        Ok(())
    }

    /// Draw -> Place.
    pub fn on_drawn(&mut self) {
        self.phase = TurnPhase::Place;
    }

    /// Place -> Guess, запоминаем, куда легла карта.
    pub fn on_placed(&mut self, index: usize) {
        self.placed_index = Some(index);
        self.phase = TurnPhase::Guess;
    }

    /// Верная догадка: фаза остаётся Guess.
    pub fn on_correct_guess(&mut self) {
        self.correct_guesses += 1;
    }

    /// Добровольно закончить ход можно только после хотя бы одной верной догадки.
    pub fn can_end_turn(&self) -> bool {
        self.phase == TurnPhase::Guess && self.correct_guesses > 0
    }

    /// Передать ход сопернику (после неверной догадки или end turn).
    /// Когда стопка исчерпана, Draw/Place пропускаются до конца матча.
    pub fn pass_turn(&mut self, pile_exhausted: bool) {
        *self = Self::first(opponent_of(self.current_player), pile_exhausted);
    }
}

fn opening_phase(pile_exhausted: bool) -> TurnPhase {
    if pile_exhausted {
        TurnPhase::Guess
    } else {
        TurnPhase::Draw
    }
}
