// tests/engine_props.rs
//
// Property-based тесты движка (proptest).
// Случайный seed, случайный стартовый выбор и случайные решения ботов:
//  - значение каждого цвета встречается в руках не больше одного раза
//  - стопка и пул значений согласованы
//  - при канонической выкладке рука отсортирована
//  - количество открытых карт не убывает
//  - матч всегда заканчивается, победитель: соперник полностью открытой руки

use proptest::prelude::*;

use davinci_engine::domain::{CardValue, Color, GameRules, PlayerIndex, MAX_CARD_VALUE};
use davinci_engine::engine::{GameSession, MatchStatus, TurnPhase};
use davinci_engine::infra::DeterministicRng;

/// Верхняя граница шагов: 18 взятий + 18 выкладок + не больше 26 открытий
/// (каждая догадка открывает карту) + end_turn после каждой верной догадки.
const MAX_STEPS: usize = 200;

/// Источник решений бота из вектора, сгенерированного proptest.
struct Choices {
    values: Vec<u8>,
    pos: usize,
}

impl Choices {
    fn next(&mut self, bound: usize) -> usize {
        let v = self.values[self.pos % self.values.len()] as usize;
        self.pos += 1;
        v % bound.max(1)
    }
}

fn selection_strategy() -> impl Strategy<Value = (Vec<usize>, Vec<usize>)> {
    Just((0..24).collect::<Vec<usize>>())
        .prop_shuffle()
        .prop_map(|slots| (slots[..4].to_vec(), slots[4..8].to_vec()))
}

fn started(seed: u64, a: &[usize], b: &[usize]) -> GameSession<DeterministicRng> {
    let mut s = GameSession::new(GameRules::default(), DeterministicRng::from_u64(seed));
    s.join(None).unwrap();
    s.join(None).unwrap();
    s.initialize_game().unwrap();
    s.select_initial_cards(0, a).unwrap();
    s.select_initial_cards(1, b).unwrap();
    s
}

fn assert_values_unique(s: &GameSession<DeterministicRng>) {
    for color in Color::ALL {
        let mut seen = [false; (MAX_CARD_VALUE + 1) as usize];
        let held = s.held_card().into_iter();
        let cards = (0..2u8)
            .flat_map(|p| s.hand(p).unwrap().cards.clone())
            .chain(held)
            .filter(|c| c.color == color);
        for card in cards {
            if let CardValue::Number(n) = card.value {
                assert!(!seen[n as usize], "{color:?} {n} встречается дважды");
                seen[n as usize] = true;
            }
        }
        assert_eq!(
            s.pile().undrawn_numbered(color),
            s.pool().remaining(color),
            "стопка и пул разошлись"
        );
    }
}

/// Один шаг бота. Возвращает false, если матч окончен.
fn bot_step(s: &mut GameSession<DeterministicRng>, choices: &mut Choices) -> bool {
    let Some(turn) = s.turn().cloned() else {
        return false;
    };
    let p = turn.current_player;
    let opponent: PlayerIndex = 1 - p;

    match turn.phase {
        TurnPhase::Draw => {
            let undrawn: Vec<usize> = (0..s.pile().len())
                .filter(|&i| s.pile().undrawn(i).is_some())
                .collect();
            let idx = undrawn[choices.next(undrawn.len())];
            s.draw_card(p, idx).unwrap();
        }
        TurnPhase::Place => {
            let hand = s.hand(p).unwrap();
            let card = s.held_card().unwrap();
            let pos = hand
                .sorted_position(&card)
                .unwrap_or_else(|| choices.next(hand.len() + 1));
            s.place_card(p, pos).unwrap();
        }
        TurnPhase::Guess => {
            if turn.can_end_turn() && choices.next(2) == 0 {
                s.end_turn(p).unwrap();
                return true;
            }
            let hand_len = s.hand(opponent).unwrap().len();
            let hidden: Vec<usize> = (0..hand_len)
                .filter(|&i| !s.reveals(opponent).unwrap().is_revealed(i))
                .collect();
            let target = hidden[choices.next(hidden.len())];
            // 0..=11: число, 12: джокер
            let raw = choices.next(MAX_CARD_VALUE as usize + 2) as u8;
            let value = if raw > MAX_CARD_VALUE {
                CardValue::Joker
            } else {
                CardValue::Number(raw)
            };
            s.guess_card(p, target, value).unwrap();
        }
    }
    true
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn initial_deal_respects_selection_colors(
        seed in any::<u64>(),
        (a, b) in selection_strategy(),
    ) {
        let s = started(seed, &a, &b);
        for (p, sel) in [(0u8, &a), (1u8, &b)] {
            let hand = s.hand(p).unwrap();
            prop_assert_eq!(hand.len(), 4);
            prop_assert!(hand.is_canonically_sorted());
            let whites = sel.iter().filter(|i| *i % 2 == 0).count();
            prop_assert_eq!(hand.iter().filter(|c| c.color == Color::White).count(), whites);
        }
        prop_assert_eq!(s.pile().len(), 18);
        prop_assert_eq!(s.status(), MatchStatus::Playing);
        assert_values_unique(&s);
    }

    #[test]
    fn random_matches_keep_invariants_and_terminate(
        seed in any::<u64>(),
        (a, b) in selection_strategy(),
        decisions in prop::collection::vec(any::<u8>(), 64..256),
    ) {
        let mut s = started(seed, &a, &b);
        let mut choices = Choices { values: decisions, pos: 0 };
        let mut revealed = [0usize; 2];
        let mut finished = false;

        for _ in 0..MAX_STEPS {
            if !bot_step(&mut s, &mut choices) {
                finished = true;
                break;
            }
            assert_values_unique(&s);
            for p in 0..2u8 {
                prop_assert!(s.hand(p).unwrap().is_canonically_sorted());
                let now = s.reveals(p).unwrap().len();
                prop_assert!(now >= revealed[p as usize], "открытые карты не закрываются");
                revealed[p as usize] = now;
            }
        }

        prop_assert!(finished, "матч должен закончиться за {} шагов", MAX_STEPS);
        let MatchStatus::Finished { winner } = s.status() else {
            return Err(TestCaseError::fail("статус не Finished"));
        };
        let loser = 1 - winner;
        let loser_len = s.hand(loser).unwrap().len();
        let winner_len = s.hand(winner).unwrap().len();
        prop_assert!(s.reveals(loser).unwrap().covers(loser_len));
        prop_assert!(!s.reveals(winner).unwrap().covers(winner_len));
    }
}
