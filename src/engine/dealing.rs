//! Назначение значений картам: стартовый выбор, раздача, взятие из стопки.
//!
//! Значения назначаются лениво: в момент взятия карты, а не при создании
//! стопки, поэтому по позиции слота значение предсказать нельзя.

use tracing::{debug, error};

use crate::domain::{
    Card, Color, CommunityPile, Hand, PileSlot, PlayerIndex, SetupSpread, ValuePool,
    SETUP_SPREAD_SIZE, VALUES_PER_COLOR,
};
use crate::engine::errors::EngineError;
use crate::engine::RandomSource;

/// Проверка стартового выбора игрока.
pub fn validate_selection(
    spread: &SetupSpread,
    player: PlayerIndex,
    slots: &[usize],
    expected: usize,
) -> Result<(), EngineError> {
    if slots.len() != expected {
        return Err(EngineError::InvalidSelectionSize {
            expected,
            got: slots.len(),
        });
    }

    for (i, &slot) in slots.iter().enumerate() {
        if slot >= SETUP_SPREAD_SIZE {
            return Err(EngineError::InvalidIndex(slot));
        }
        // повтор внутри одного выбора
        if slots[..i].contains(&slot) {
            return Err(EngineError::InvalidIndex(slot));
        }
        if spread.claimed_by_other(player, slot) {
            return Err(EngineError::InvalidIndex(slot));
        }
    }

    Ok(())
}

/// Случайное свободное значение цвета (равномерно среди оставшихся).
pub fn sample_value<R: RandomSource>(
    pool: &ValuePool,
    color: Color,
    rng: &mut R,
) -> Result<u8, EngineError> {
    let available = pool.available(color);
    if available.is_empty() {
        error!(?color, "value pool exhausted: pile and pool are out of sync");
        return Err(EngineError::NoValuesAvailable(color));
    }
    let idx = rng.pick_index(available.len());
    available
        .get(idx)
        .copied()
        .ok_or(EngineError::Internal("RandomSource returned index out of range"))
}

/// Раздача стартовых рук по выбранным цветам и сборка общей стопки.
///
/// Работает на копии пула: при ошибке исходный пул не меняется.
pub fn deal_initial_hands<R: RandomSource>(
    spread: &SetupSpread,
    pool: &ValuePool,
    rng: &mut R,
) -> Result<([Hand; 2], CommunityPile, ValuePool), EngineError> {
    if !spread.both_committed() {
        return Err(EngineError::WrongPhase);
    }

    let mut pool = pool.clone();
    let mut hands: [Hand; 2] = Default::default();

    for player in 0..2u8 {
        let mut cards = Vec::new();
        for color in spread.colors_of(player) {
            let value = sample_value(&pool, color, rng)?;
            pool.bind(color, value);
            cards.push(Card::number(color, value));
        }
        hands[player as usize] = Hand::from_initial(cards);
    }

    let black_left = VALUES_PER_COLOR - spread.committed_count(Color::Black);
    let white_left = VALUES_PER_COLOR - spread.committed_count(Color::White);
    let mut pile = CommunityPile::from_remaining(black_left, white_left);
    rng.shuffle(&mut pile.slots);

    debug!(
        pile_size = pile.len(),
        black_left, white_left, "initial hands dealt"
    );

    Ok((hands, pile, pool))
}

/// Взять карту из стопки: для числового слота назначается значение,
/// для джокерного: получается джокер. При ошибке ничего не меняется.
pub fn draw_from_pile<R: RandomSource>(
    pile: &mut CommunityPile,
    pool: &mut ValuePool,
    index: usize,
    rng: &mut R,
) -> Result<Card, EngineError> {
    let slot: PileSlot = *pile.undrawn(index).ok_or(EngineError::InvalidIndex(index))?;

    let card = if slot.joker {
        Card::joker(slot.color)
    } else {
        let value = sample_value(pool, slot.color, rng)?;
        pool.bind(slot.color, value);
        Card::number(slot.color, value)
    };

    pile.mark_drawn(index);
    Ok(card)
}
