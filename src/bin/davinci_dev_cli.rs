// src/bin/davinci_dev_cli.rs
//
// Dev-CLI: играет полный матч двумя простыми ботами на детерминированном RNG
// и печатает снапшоты глазами игроков.
//
// Запуск: davinci_dev_cli [seed] [rules.json]

use std::fs;

use tracing_subscriber::EnvFilter;

use davinci_engine::api::{execute_command, Command, CommandResponse, DrawCardCommand,
    GuessCardCommand, JoinCommand, PlaceCardCommand, SelectInitialCardsCommand};
use davinci_engine::domain::{CardValue, Color, GameRules, PlayerIndex, MAX_CARD_VALUE};
use davinci_engine::engine::{GameSession, GameSnapshot, MatchStatus, TurnPhase, Viewer};
use davinci_engine::infra::{DeterministicRng, RngSeed};

/// Защита от бесконечного цикла, если бот зациклится.
const MAX_STEPS: usize = 500;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let rules = match args.next() {
        Some(path) => match fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|s| GameRules::from_json_str(&s).map_err(|e| e.to_string()))
        {
            Ok(r) => r,
            Err(err) => {
                eprintln!("[CLI] Не удалось загрузить правила из {path}: {err}");
                std::process::exit(2);
            }
        },
        None => GameRules::default(),
    };

    println!("davinci_dev_cli: seed={seed}, rules={rules:?}");

    // Каждый матч получает свой seed, выведенный из базового.
    let rng: DeterministicRng = RngSeed::from_u64(seed).derive(1).to_rng();
    let mut session = GameSession::new(rules, rng);

    run(&mut session, Command::Join(JoinCommand { name: Some("Alice".into()) }));
    run(&mut session, Command::Join(JoinCommand { name: Some("Bob".into()) }));
    run(&mut session, Command::StartGame);

    let hand_size = session.rules().initial_hand_size;
    // Alice берёт чётные слоты (белые), Bob: нечётные (чёрные).
    for player in 0..2u8 {
        let slot_indices = (0..hand_size).map(|i| i * 2 + player as usize).collect();
        run(
            &mut session,
            Command::SelectInitialCards(SelectInitialCardsCommand { player, slot_indices }),
        );
    }

    print_snapshot(&session.masked_state(Viewer::Player(0)));

    for _ in 0..MAX_STEPS {
        if let MatchStatus::Finished { winner } = session.status() {
            println!();
            println!("================ MATCH FINISHED =================");
            println!("Победитель: место {winner}");
            print_snapshot(&session.masked_state(Viewer::Spectator));
            return;
        }

        let Some(turn) = session.turn().cloned() else {
            println!("[CLI] Нет активного хода, статус {:?}", session.status());
            return;
        };
        let player = turn.current_player;

        let command = match turn.phase {
            TurnPhase::Draw => {
                let pile_index = session
                    .pile()
                    .slots
                    .iter()
                    .position(|s| !s.drawn)
                    .unwrap_or(0);
                Command::DrawCard(DrawCardCommand { player, pile_index })
            }
            TurnPhase::Place => {
                let position = choose_position(&session, player);
                Command::PlaceCard(PlaceCardCommand { player, position })
            }
            TurnPhase::Guess if turn.can_end_turn() => Command::EndTurn { player },
            TurnPhase::Guess => {
                let view = session.masked_state(Viewer::Player(player));
                match choose_guess(&view, player) {
                    Some((target_index, value)) => Command::GuessCard(GuessCardCommand {
                        player,
                        target_index,
                        value,
                    }),
                    None => {
                        println!("[CLI] Боту {player} нечего угадывать");
                        return;
                    }
                }
            }
        };

        run(&mut session, command);
    }

    println!("[CLI] Превышен лимит шагов ({MAX_STEPS}).");
}

fn run(session: &mut GameSession<DeterministicRng>, command: Command) {
    let label = format!("{command:?}");
    match execute_command(session, command) {
        Ok(CommandResponse::GuessResult(res)) => println!(
            "[CLI] {label} -> correct={} game_over={} winner={:?}",
            res.correct, res.game_over, res.winner_name
        ),
        Ok(resp) => println!("[CLI] {label} -> {resp:?}"),
        Err(err) => println!("[CLI] {label} -> ОШИБКА {err:?}"),
    }
}

/// Бот кладёт карту в каноническую позицию, джокер: в конец.
fn choose_position(session: &GameSession<DeterministicRng>, player: PlayerIndex) -> usize {
    let (Some(hand), Some(card)) = (session.hand(player), session.held_card()) else {
        return 0;
    };
    hand.sorted_position(&card).unwrap_or(hand.len())
}

/// Бот угадывает самую левую закрытую карту соперника: первое значение её цвета,
/// которого он не видит ни у себя, ни среди открытых. Если таких нет: джокер.
fn choose_guess(view: &GameSnapshot, player: PlayerIndex) -> Option<(usize, CardValue)> {
    let opponent = view.hands.iter().find(|h| h.owner != player)?;
    let (target_index, target) = opponent
        .cards
        .iter()
        .enumerate()
        .find(|(_, c)| !c.revealed)?;

    let seen = |color: Color, n: u8| {
        view.hands.iter().flat_map(|h| h.cards.iter()).any(|c| {
            c.color == color && c.value == Some(CardValue::Number(n))
        })
    };

    let value = (0..=MAX_CARD_VALUE)
        .find(|&n| !seen(target.color, n))
        .map(CardValue::Number)
        .unwrap_or(CardValue::Joker);

    Some((target_index, value))
}

fn print_snapshot(s: &GameSnapshot) {
    println!();
    println!("---- snapshot: match={} viewer={:?} status={:?}", s.match_index, s.viewer, s.status);
    for p in &s.players {
        println!("  seat {}: {} (ready={})", p.seat, p.name, p.ready);
    }
    for h in &s.hands {
        let cards: Vec<String> = h
            .cards
            .iter()
            .map(|c| {
                let value = c.value.map(|v| v.to_string()).unwrap_or_else(|| "?".into());
                let mark = if c.revealed { "!" } else { "" };
                format!("{}{}{}", c.color, value, mark)
            })
            .collect();
        println!("  hand[{}]: {}", h.owner, cards.join(" "));
    }
    let left = s.pile.iter().filter(|p| !p.drawn).count();
    println!("  pile: {left}/{} left", s.pile.len());
}
