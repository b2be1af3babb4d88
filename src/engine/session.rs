//! Игровая сессия: один матч от лобби до финиша.
//!
//! Все мутирующие операции берут `&mut self`: один писатель, никаких
//! глобальных состояний. Операция либо применяется целиком, либо
//! возвращает ошибку и ничего не меняет.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{
    opponent_of, Card, CardValue, CommunityPile, Hand, PlacementRule, PlayerIndex, Roster,
    GameRules, SeatedPlayer, SetupSpread, ValuePool, PLAYER_COUNT,
};
use crate::engine::dealing::{deal_initial_hands, draw_from_pile, validate_selection};
use crate::engine::errors::EngineError;
use crate::engine::history::{MatchEventKind, MatchHistory};
use crate::engine::reveal::{check_winner, RevealSet};
use crate::engine::snapshot::{
    mask_hand, mask_pile, GameSnapshot, MatchStatus, PlayerView, TurnView, Viewer,
};
use crate::engine::turn::{TurnPhase, TurnState};
use crate::engine::RandomSource;

/// Результат догадки.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GuessOutcome {
    pub correct: bool,
    pub game_over: bool,
    pub winner: Option<PlayerIndex>,
    /// Какая позиция открылась: (владелец, индекс).
    pub revealed: Option<(PlayerIndex, usize)>,
}

/// Результат стартового выбора.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectionOutcome {
    /// Оба игрока выбрали: руки розданы, матч перешёл в Playing.
    pub dealt: bool,
}

/// Состояние одного матча на двух игроков.
pub struct GameSession<R: RandomSource> {
    rules: GameRules,
    rng: R,
    roster: Roster,
    status: MatchStatus,
    /// Номер матча внутри сессии (растёт при каждом старте).
    match_index: u64,
    starting_player: Option<PlayerIndex>,
    spread: SetupSpread,
    pool: ValuePool,
    pile: CommunityPile,
    hands: [Hand; 2],
    reveals: [RevealSet; 2],
    turn: Option<TurnState>,
    /// Взятая карта между draw и place. Не лежит ни в одной руке.
    held: Option<Card>,
    history: MatchHistory,
}

impl<R: RandomSource> GameSession<R> {
    pub fn new(rules: GameRules, rng: R) -> Self {
        Self {
            rules,
            rng,
            roster: Roster::new(),
            status: MatchStatus::Lobby,
            match_index: 0,
            starting_player: None,
            spread: SetupSpread::new(),
            pool: ValuePool::full(),
            pile: CommunityPile::default(),
            hands: Default::default(),
            reveals: Default::default(),
            turn: None,
            held: None,
            history: MatchHistory::new(),
        }
    }

    // ----------------------
    // Чтение состояния
    // ----------------------

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn match_index(&self) -> u64 {
        self.match_index
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn turn(&self) -> Option<&TurnState> {
        self.turn.as_ref()
    }

    pub fn starting_player(&self) -> Option<PlayerIndex> {
        self.starting_player
    }

    pub fn hand(&self, player: PlayerIndex) -> Option<&Hand> {
        self.hands.get(player as usize)
    }

    pub fn reveals(&self, player: PlayerIndex) -> Option<&RevealSet> {
        self.reveals.get(player as usize)
    }

    pub fn pile(&self) -> &CommunityPile {
        &self.pile
    }

    pub fn pool(&self) -> &ValuePool {
        &self.pool
    }

    pub fn held_card(&self) -> Option<Card> {
        self.held
    }

    pub fn history(&self) -> &MatchHistory {
        &self.history
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    // ----------------------
    // Лобби
    // ----------------------

    /// Сесть на свободное место. Без имени берётся "Player N".
    pub fn join(&mut self, name: Option<String>) -> Result<PlayerIndex, EngineError> {
        if self.status != MatchStatus::Lobby {
            return Err(EngineError::WrongPhase);
        }
        let seat = self.roster.free_seat().ok_or(EngineError::LobbyFull)?;
        let name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| self.rules.default_name(seat as usize));

        info!(seat, %name, "player joined");
        self.roster
            .seat(seat, SeatedPlayer::new(name, self.rules.auto_ready_on_join));
        Ok(seat)
    }

    pub fn rename(&mut self, player: PlayerIndex, name: String) -> Result<(), EngineError> {
        let seated = self
            .roster
            .get_mut(player)
            .ok_or(EngineError::UnknownPlayer(player))?;
        seated.name = name;
        Ok(())
    }

    pub fn set_ready(&mut self, player: PlayerIndex, ready: bool) -> Result<(), EngineError> {
        if self.status != MatchStatus::Lobby {
            return Err(EngineError::WrongPhase);
        }
        let seated = self
            .roster
            .get_mut(player)
            .ok_or(EngineError::UnknownPlayer(player))?;
        seated.ready = ready;
        Ok(())
    }

    /// Игрок ушёл: место освобождается, идущий матч сбрасывается в лобби.
    pub fn leave(&mut self, player: PlayerIndex) -> Result<(), EngineError> {
        self.roster
            .unseat(player)
            .ok_or(EngineError::UnknownPlayer(player))?;
        info!(seat = player, "player left");
        if self.status != MatchStatus::Lobby {
            self.reset_game();
        }
        Ok(())
    }

    // ----------------------
    // Жизненный цикл матча
    // ----------------------

    /// Lobby -> Setup. Первый игрок выбирается случайно.
    pub fn initialize_game(&mut self) -> Result<PlayerIndex, EngineError> {
        if self.status != MatchStatus::Lobby {
            return Err(EngineError::WrongPhase);
        }
        if !self.roster.all_ready() {
            return Err(EngineError::NotEnoughPlayers);
        }

        self.clear_match();
        self.match_index += 1;
        let starting = self.rng.pick_index(PLAYER_COUNT) as PlayerIndex;
        self.starting_player = Some(starting);
        self.status = MatchStatus::Setup;

        self.history.push(MatchEventKind::MatchStarted {
            match_index: self.match_index,
            starting_player: starting,
        });
        info!(match_index = self.match_index, starting, "match started, setup phase");
        Ok(starting)
    }

    /// Стартовый выбор слотов. Когда оба игрока выбрали: раздача.
    pub fn select_initial_cards(
        &mut self,
        player: PlayerIndex,
        slots: &[usize],
    ) -> Result<SelectionOutcome, EngineError> {
        if self.status != MatchStatus::Setup {
            return Err(EngineError::WrongPhase);
        }
        self.ensure_seated(player)?;
        validate_selection(&self.spread, player, slots, self.rules.initial_hand_size)?;

        let mut spread = self.spread.clone();
        spread.selections[player as usize] = Some(slots.to_vec());

        if !spread.both_committed() {
            self.commit_selection(spread, player);
            return Ok(SelectionOutcome { dealt: false });
        }

        let (hands, pile, pool) = deal_initial_hands(&spread, &self.pool, &mut self.rng)?;
        self.commit_selection(spread, player);

        self.hands = hands;
        self.pile = pile;
        self.pool = pool;
        self.status = MatchStatus::Playing;

        let starting = self
            .starting_player
            .ok_or(EngineError::Internal("setup without starting player"))?;
        self.turn = Some(TurnState::first(starting, self.pile.is_exhausted()));

        self.history.push(MatchEventKind::HandsDealt {
            pile_size: self.pile.len(),
        });
        info!(
            match_index = self.match_index,
            pile_size = self.pile.len(),
            "hands dealt, match playing"
        );
        Ok(SelectionOutcome { dealt: true })
    }

    /// Draw: взять карту из стопки. Значение видно только взявшему.
    pub fn draw_card(&mut self, player: PlayerIndex, pile_index: usize) -> Result<Card, EngineError> {
        self.playing_turn(player, TurnPhase::Draw)?;

        let card = draw_from_pile(&mut self.pile, &mut self.pool, pile_index, &mut self.rng)?;
        self.held = Some(card);
        if let Some(turn) = self.turn.as_mut() {
            turn.on_drawn();
        }

        self.history.push(MatchEventKind::CardDrawn {
            player,
            pile_index,
            color: card.color,
        });
        debug!(player, pile_index, color = ?card.color, remaining = self.pile.remaining(), "card drawn");
        Ok(card)
    }

    /// Place: выложить взятую карту в свою руку. Возвращает итоговый индекс.
    pub fn place_card(&mut self, player: PlayerIndex, position: usize) -> Result<usize, EngineError> {
        self.playing_turn(player, TurnPhase::Place)?;
        let card = self
            .held
            .ok_or(EngineError::Internal("place phase without a held card"))?;

        let hand = &mut self.hands[player as usize];
        if position > hand.len() {
            return Err(EngineError::InvalidPosition {
                position,
                len: hand.len(),
            });
        }

        let at = match self.rules.placement {
            PlacementRule::Free => hand.place_at(card, position).map_err(|e| {
                EngineError::InvalidPosition {
                    position: e.position,
                    len: e.len,
                }
            })?,
            PlacementRule::Sorted => hand.sorted_insert(card, position),
        };

        self.reveals[player as usize].shift_for_insert(at);
        self.held = None;
        if let Some(turn) = self.turn.as_mut() {
            turn.on_placed(at);
        }

        self.history.push(MatchEventKind::CardPlaced {
            player,
            position: at,
        });
        debug!(player, position = at, "card placed");
        Ok(at)
    }

    /// Guess: угадать значение закрытой карты соперника.
    pub fn guess_card(
        &mut self,
        player: PlayerIndex,
        target_index: usize,
        value: CardValue,
    ) -> Result<GuessOutcome, EngineError> {
        self.playing_turn(player, TurnPhase::Guess)?;
        if !value.is_valid() {
            return Err(EngineError::InvalidGuessValue);
        }

        let opponent = opponent_of(player);
        let target = *self.hands[opponent as usize]
            .get(target_index)
            .ok_or(EngineError::InvalidIndex(target_index))?;
        if self.reveals[opponent as usize].is_revealed(target_index) {
            return Err(EngineError::InvalidIndex(target_index));
        }

        // Числовая догадка никогда не совпадает с джокером.
        let correct = target.value == value;
        self.history.push(MatchEventKind::Guessed {
            player,
            target_index,
            value,
            correct,
        });
        debug!(player, target_index, %value, correct, "guess resolved");

        let revealed = if correct {
            self.reveal(opponent, target_index);
            if let Some(turn) = self.turn.as_mut() {
                turn.on_correct_guess();
            }
            Some((opponent, target_index))
        } else {
            self.penalty_index(player).map(|idx| {
                self.reveal(player, idx);
                (player, idx)
            })
        };

        if let Some(winner) = check_winner(&self.hands, &self.reveals, opponent) {
            self.finish(winner);
            return Ok(GuessOutcome {
                correct,
                game_over: true,
                winner: Some(winner),
                revealed,
            });
        }

        if !correct {
            self.pass_turn();
        }

        Ok(GuessOutcome {
            correct,
            game_over: false,
            winner: None,
            revealed,
        })
    }

    /// Добровольно закончить ход (после хотя бы одной верной догадки).
    pub fn end_turn(&mut self, player: PlayerIndex) -> Result<(), EngineError> {
        let turn = self.playing_turn(player, TurnPhase::Guess)?;
        if !turn.can_end_turn() {
            return Err(EngineError::WrongPhase);
        }
        self.pass_turn();
        Ok(())
    }

    /// Сброс в лобби: все сущности матча очищаются, ростер остаётся.
    pub fn reset_game(&mut self) {
        self.clear_match();
        self.status = MatchStatus::Lobby;
        let ready = self.rules.auto_ready_on_join;
        for p in self.roster.seats.iter_mut().flatten() {
            p.ready = ready;
        }
        info!(match_index = self.match_index, "match reset to lobby");
    }

    // ----------------------
    // Снапшоты
    // ----------------------

    /// Снапшот с маскировкой: чужие закрытые карты показывают только цвет.
    pub fn masked_state(&self, viewer: Viewer) -> GameSnapshot {
        let placed = self.turn.as_ref().and_then(|t| {
            t.placed_index.map(|i| (t.current_player, i))
        });

        let hands = (0..PLAYER_COUNT as PlayerIndex)
            .map(|owner| {
                let placed_here = placed.filter(|(p, _)| *p == owner).map(|(_, i)| i);
                mask_hand(
                    &self.hands[owner as usize],
                    &self.reveals[owner as usize],
                    owner,
                    viewer,
                    placed_here,
                )
            })
            .collect();

        let held_card = match (self.turn.as_ref(), viewer.seat()) {
            (Some(t), Some(seat)) if t.current_player == seat => self.held,
            _ => None,
        };

        let mut claimed_slots: Vec<usize> = self
            .spread
            .selections
            .iter()
            .flatten()
            .flat_map(|s| s.iter().copied())
            .collect();
        claimed_slots.sort_unstable();

        GameSnapshot {
            match_index: self.match_index,
            viewer,
            status: self.status,
            players: self.lobby_state(),
            turn: self.turn.as_ref().map(|t| TurnView {
                current_player: t.current_player,
                phase: t.phase,
                can_end_turn: t.can_end_turn(),
            }),
            hands,
            pile: mask_pile(&self.pile),
            held_card,
            setup_committed: [
                self.spread.selections[0].is_some(),
                self.spread.selections[1].is_some(),
            ],
            claimed_slots,
        }
    }

    /// Ростер для лобби.
    pub fn lobby_state(&self) -> Vec<PlayerView> {
        self.roster
            .seats
            .iter()
            .enumerate()
            .filter_map(|(i, s)| {
                s.as_ref().map(|p| PlayerView {
                    seat: i as PlayerIndex,
                    name: p.name.clone(),
                    ready: p.ready,
                })
            })
            .collect()
    }

    // ----------------------
    // Внутреннее
    // ----------------------

    fn ensure_seated(&self, player: PlayerIndex) -> Result<(), EngineError> {
        self.roster
            .get(player)
            .map(|_| ())
            .ok_or(EngineError::UnknownPlayer(player))
    }

    /// Guard для ходовых операций: матч идёт, ходит этот игрок, фаза совпадает.
    fn playing_turn(&self, player: PlayerIndex, phase: TurnPhase) -> Result<&TurnState, EngineError> {
        if self.status != MatchStatus::Playing {
            return Err(EngineError::WrongPhase);
        }
        self.ensure_seated(player)?;
        let turn = self.turn.as_ref().ok_or(EngineError::WrongPhase)?;
        turn.ensure(player, phase)?;
        Ok(turn)
    }

    fn commit_selection(&mut self, spread: SetupSpread, player: PlayerIndex) {
        self.spread = spread;
        let colors = self.spread.colors_of(player);
        debug!(player, ?colors, "initial selection committed");
        self.history
            .push(MatchEventKind::SelectionCommitted { player, colors });
    }

    /// Какую свою карту открывает ошибившийся игрок: выложенную в этом ходу,
    /// а если ничего не выкладывал (стопка кончилась): самую левую закрытую.
    fn penalty_index(&self, player: PlayerIndex) -> Option<usize> {
        let reveals = &self.reveals[player as usize];
        let hand_len = self.hands[player as usize].len();
        self.turn
            .as_ref()
            .and_then(|t| t.placed_index)
            .filter(|&i| !reveals.is_revealed(i))
            .or_else(|| reveals.first_hidden(hand_len))
    }

    fn reveal(&mut self, owner: PlayerIndex, index: usize) {
        if self.reveals[owner as usize].reveal(index) {
            self.history
                .push(MatchEventKind::CardRevealed { owner, index });
        }
    }

    fn pass_turn(&mut self) {
        let exhausted = self.pile.is_exhausted();
        if let Some(turn) = self.turn.as_mut() {
            turn.pass_turn(exhausted);
            let next = turn.current_player;
            self.history
                .push(MatchEventKind::TurnPassed { next_player: next });
            debug!(next, pile_exhausted = exhausted, "turn passed");
        }
    }

    fn finish(&mut self, winner: PlayerIndex) {
        self.status = MatchStatus::Finished { winner };
        self.turn = None;
        self.history.push(MatchEventKind::MatchFinished { winner });
        info!(match_index = self.match_index, winner, "match finished");
    }

    fn clear_match(&mut self) {
        self.starting_player = None;
        self.spread = SetupSpread::new();
        self.pool = ValuePool::full();
        self.pile = CommunityPile::default();
        self.hands = Default::default();
        self.reveals = Default::default();
        self.turn = None;
        self.held = None;
        self.history.clear();
    }
}
