//! CLI blackjack table.
//!
//! Set `RUST_LOG=debug` to watch every transition the table dispatches.

#![allow(clippy::missing_docs_in_private_items)]

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use bjtable::{ActionKind, DealerStep, GameOptions, Hand, Phase, RoundState, Table};

const DEALER_PAUSE: Duration = Duration::from_millis(400);

fn main() {
    env_logger::init();
    println!("Blackjack CLI table (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let table = Table::new(GameOptions::default(), seed);

    loop {
        let chips = table.chips();
        if chips == 0 {
            println!("You are out of chips. Game over.");
            break;
        }

        if table.needs_reshuffle() && table.phase() != Phase::Idle {
            println!("Cut card reached; a fresh shoe comes in.");
        }

        let Some(bet) = prompt_u64(&format!("Bet amount (1-{chips}, 0 to quit): ")) else {
            break;
        };
        if bet == 0 {
            println!("Goodbye.");
            break;
        }

        if let Err(err) = table.place_bet(bet) {
            println!("Bet error: {err}");
            continue;
        }
        if let Err(err) = table.deal() {
            println!("Deal error: {err}");
            let _ = table.clear_bet();
            continue;
        }

        if table.is_insurance_offered() {
            print_table(&table.snapshot());
            println!("Dealer shows an Ace. Insurance offered.");
            let result = match prompt_line("Take insurance? (y/n): ").as_str() {
                "y" | "yes" => table.take_insurance().map(|amount| {
                    println!("Insurance bet placed: {amount}");
                }),
                _ => table.decline_insurance(),
            };
            if let Err(err) = result {
                println!("Insurance error: {err}");
            }
        }

        if !play_hands(&table) {
            return;
        }

        while table.phase() == Phase::DealerTurn {
            match table.dealer_step() {
                Ok(DealerStep::Drew(card)) => {
                    println!("Dealer draws {card}.");
                    thread::sleep(DEALER_PAUSE);
                }
                Ok(DealerStep::Settled(settlement)) => {
                    println!("Payout: {} (net {})", settlement.returned, settlement.net);
                }
                Err(err) => {
                    println!("Dealer error: {err}");
                    break;
                }
            }
        }

        let state = table.snapshot();
        print_table(&state);
        println!("{}", state.message);
        println!(
            "Wins {} | Losses {} | Pushes {}",
            state.stats.wins, state.stats.losses, state.stats.pushes
        );

        if let Err(err) = table.new_round() {
            println!("Round error: {err}");
            let _ = table.reset(None);
        }
    }
}

/// Runs the player's decisions. Returns `false` if the player quit.
fn play_hands(table: &Table) -> bool {
    loop {
        let phase = table.phase();
        if !matches!(phase, Phase::PlayerTurn | Phase::Splitting) {
            return true;
        }

        print_table(&table.snapshot());
        println!("{}", format_actions(table));

        let action = prompt_line("Action: ");
        let result = match (phase, action.as_str()) {
            (_, "q" | "quit") => return false,
            (Phase::PlayerTurn, "h" | "hit") => table.hit().map(drop),
            (Phase::PlayerTurn, "s" | "stand") => table.stand(),
            (Phase::PlayerTurn, "d" | "double") => table.double_down().map(drop),
            (Phase::PlayerTurn, "p" | "split") => table.split(),
            (Phase::PlayerTurn, "u" | "surrender") => table.surrender().map(drop),
            (Phase::Splitting, "h" | "hit") => table.split_hit().map(drop),
            (Phase::Splitting, "s" | "stand") => table.split_stand(),
            (Phase::Splitting, "d" | "double") => table.split_double().map(drop),
            _ => {
                println!("Unknown action.");
                continue;
            }
        };

        if let Err(err) = result {
            println!("Action error: {err}");
        }
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn prompt_u64(prompt: &str) -> Option<u64> {
    loop {
        let input = prompt_line(prompt);
        if input.is_empty() || input == "q" || input == "quit" {
            return None;
        }
        match input.parse::<u64>() {
            Ok(value) => return Some(value),
            Err(_) => println!("Please enter a number."),
        }
    }
}

fn print_table(state: &RoundState) {
    println!("\nShoe: {} cards remaining", state.shoe.len());

    let dealer_view = format_dealer(&state.dealer_hand, state.dealer_revealed);
    let dealer_value = state.dealer_hand.visible_total(state.dealer_revealed);
    println!("Dealer: {dealer_view} (value {dealer_value})");

    match &state.split_hands {
        Some(hands) => {
            for (index, hand) in hands.iter().enumerate() {
                let marker = if index == state.active_hand_index && !hand.stood {
                    "*"
                } else {
                    " "
                };
                let result = hand.result.map(|outcome| format!(" | {outcome:?}"));
                println!(
                    "{marker} Hand {}: {} | value {} | bet {}{}",
                    index + 1,
                    format_hand(&hand.cards),
                    hand.value().total,
                    hand.bet,
                    result.unwrap_or_default()
                );
            }
        }
        None => println!(
            "  You: {} | value {} | bet {}",
            format_hand(&state.player_hand),
            state.player_hand.value().total,
            state.bet
        ),
    }
    println!("Chips: {}\n", state.chips);
}

fn format_hand(hand: &Hand) -> String {
    hand.cards()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_dealer(hand: &Hand, revealed: bool) -> String {
    if revealed {
        return format_hand(hand);
    }
    hand.up_card()
        .map_or_else(String::new, |card| format!("{card} ??"))
}

fn format_actions(table: &Table) -> String {
    let available = table.available_actions();
    let (hit, stand, double) = if table.phase() == Phase::Splitting {
        (
            ActionKind::SplitHit,
            ActionKind::SplitStand,
            ActionKind::SplitDouble,
        )
    } else {
        (ActionKind::Hit, ActionKind::Stand, ActionKind::Double)
    };

    let parts = [
        format_action("hit", "h", available.contains(hit)),
        format_action("stand", "s", available.contains(stand)),
        format_action("double", "d", available.contains(double)),
        format_action("split", "p", available.contains(ActionKind::Split)),
        format_action("surrender", "u", available.contains(ActionKind::Surrender)),
    ];
    format!("Actions: {}", parts.join(" "))
}

fn format_action(label: &str, key: &str, allowed: bool) -> String {
    let text = format!("[{key}]{label}");
    if allowed {
        colorize(&text, "32")
    } else {
        colorize(&text, "90")
    }
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}
