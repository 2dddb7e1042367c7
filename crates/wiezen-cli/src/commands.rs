use std::fmt::Write as _;

use anyhow::{Context, Result, anyhow};
use clap::Subcommand;
use wiezen_core::{GameLedger, PersistOnChange, RoundCatalog, RoundResult, Seat, SeatDeltas};

use crate::config::ScorekeeperConfig;
use crate::store::JsonFileStore;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the contracts that can be scored.
    Rounds,
    /// Print standings, dealer and round history.
    Show,
    /// Score a hand.
    Play {
        /// Contract name, e.g. "Troel" or "Abondance 10".
        rule: String,
        /// Attacking seats and tricks won, e.g. `0,2:9` or `north:0`.
        /// Repeat for contracts played simultaneously.
        #[arg(
            short,
            long = "result",
            value_name = "SEATS:TRICKS",
            required = true,
            value_parser = parse_result
        )]
        results: Vec<RoundResult>,
    },
    /// Remove the most recent round.
    Undo,
    /// Start a new game with the same players.
    Reset,
    /// Change a player's name.
    Rename {
        #[arg(value_parser = parse_seat)]
        seat: Seat,
        name: String,
    },
}

/// Opens the saved game and wires it to save itself after every change.
pub fn open_ledger(config: &ScorekeeperConfig) -> Result<GameLedger> {
    let store = JsonFileStore::new(&config.store.path);
    let fresh = match config.players.names() {
        Some(names) => {
            GameLedger::with_names(names).context("configured player names are invalid")?
        }
        None => GameLedger::new(),
    };

    let mut ledger = GameLedger::load_or_else(&store, || fresh);
    tracing::info!(
        path = %store.path().display(),
        rounds = ledger.round_count(),
        "game opened"
    );

    ledger.set_observer(PersistOnChange::new(store));
    Ok(ledger)
}

/// Runs one command against the ledger and returns the text to print.
pub fn execute(
    command: &Command,
    ledger: &mut GameLedger,
    catalog: &RoundCatalog,
) -> Result<String> {
    match command {
        Command::Rounds => Ok(render_catalog(catalog)),
        Command::Show => Ok(render_standings(ledger)),
        Command::Play { rule, results } => {
            let rule = catalog
                .find(rule)
                .ok_or_else(|| anyhow!("unknown round '{rule}'; see `wiezen rounds`"))?;
            let deltas = ledger.add_round(rule, results)?;
            let label = ledger.rounds().last().cloned().unwrap_or_default();
            let mut out = format!("{label}: {}\n", render_deltas(ledger, &deltas));
            out.push_str(&render_standings(ledger));
            Ok(out)
        }
        Command::Undo => match ledger.remove_last_round() {
            Some(label) => Ok(format!("Removed {label}\n{}", render_standings(ledger))),
            None => Ok("No rounds to remove\n".to_string()),
        },
        Command::Reset => {
            ledger.reset();
            Ok(format!("New game started\n{}", render_standings(ledger)))
        }
        Command::Rename { seat, name } => {
            let old = ledger.player(*seat).name().to_string();
            ledger.rename_player(*seat, name.trim())?;
            Ok(format!("{old} is now {}\n", ledger.player(*seat).name()))
        }
    }
}

/// Parses a seat as an index (`0`-`3`) or a name (`north`, `e`, ...).
pub fn parse_seat(raw: &str) -> Result<Seat, String> {
    let value = raw.trim();
    if let Ok(index) = value.parse::<usize>() {
        return Seat::from_index(index).ok_or_else(|| format!("seat index {index} is not 0-3"));
    }
    match value.to_ascii_lowercase().as_str() {
        "n" | "north" => Ok(Seat::North),
        "e" | "east" => Ok(Seat::East),
        "s" | "south" => Ok(Seat::South),
        "w" | "west" => Ok(Seat::West),
        _ => Err(format!("unknown seat '{value}'")),
    }
}

/// Parses `SEATS:TRICKS` where SEATS is a comma-separated seat list.
pub fn parse_result(raw: &str) -> Result<RoundResult, String> {
    let (seats, tricks) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected SEATS:TRICKS, got '{raw}'"))?;

    let attackers = seats
        .split(',')
        .map(parse_seat)
        .collect::<Result<Vec<_>, _>>()?;
    let tricks = tricks
        .trim()
        .parse::<u8>()
        .map_err(|err| format!("invalid trick count '{}': {err}", tricks.trim()))?;

    Ok(RoundResult::new(attackers, tricks))
}

fn render_catalog(catalog: &RoundCatalog) -> String {
    let mut out = String::new();
    for rule in catalog.iter() {
        let _ = writeln!(
            out,
            "{:<14} attackers: {}  target: {:>2}{}",
            rule.name(),
            rule.attackers(),
            rule.tricks_target(),
            if rule.is_simultaneous() {
                "  (simultaneous)"
            } else {
                ""
            }
        );
    }
    out
}

fn render_deltas(ledger: &GameLedger, deltas: &SeatDeltas) -> String {
    Seat::LOOP
        .iter()
        .map(|seat| format!("{} {:+}", ledger.player(*seat).name(), deltas[seat.index()]))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_standings(ledger: &GameLedger) -> String {
    let mut out = String::new();
    let dealer = ledger.dealer();
    let _ = writeln!(out, "Dealer: {} ({dealer})", ledger.player(dealer).name());
    if !ledger.rounds().is_empty() {
        let leader = ledger.player(ledger.leader());
        let _ = writeln!(out, "Leader: {} ({:+})", leader.name(), leader.total());
    }
    for seat in Seat::LOOP {
        let player = ledger.player(seat);
        let _ = writeln!(
            out,
            "{:<6} {:<16} {:>6}",
            seat.to_string(),
            player.name(),
            player.total()
        );
    }
    if !ledger.rounds().is_empty() {
        let _ = writeln!(out, "Rounds:");
        for (index, label) in ledger.rounds().iter().enumerate() {
            let scores: Vec<String> = ledger
                .players()
                .iter()
                .map(|player| format!("{:>5}", player.history()[index]))
                .collect();
            let _ = writeln!(out, "{:>3}. {:<18}{}", index + 1, label, scores.join(""));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_seats_by_index_and_name() {
        assert_eq!(parse_seat("2"), Ok(Seat::South));
        assert_eq!(parse_seat(" West "), Ok(Seat::West));
        assert_eq!(parse_seat("e"), Ok(Seat::East));
        assert!(parse_seat("4").is_err());
        assert!(parse_seat("dealer").is_err());
    }

    #[test]
    fn parses_results() {
        assert_eq!(
            parse_result("0,2:9"),
            Ok(RoundResult::new([Seat::North, Seat::South], 9))
        );
        assert_eq!(parse_result("west:0"), Ok(RoundResult::solo(Seat::West, 0)));
        assert!(parse_result("0,2").is_err());
        assert!(parse_result("0:-1").is_err());
        assert!(parse_result("0:many").is_err());
    }

    #[test]
    fn out_of_range_tricks_reach_the_ledger_validation() {
        let catalog = RoundCatalog::standard();
        let mut ledger = GameLedger::new();
        let command = Command::Play {
            rule: "alleen".to_string(),
            results: vec![parse_result("0:14").unwrap()],
        };
        let err = execute(&command, &mut ledger, &catalog).unwrap_err();
        assert!(err.to_string().contains("outside 0..=13"));
        assert_eq!(ledger.round_count(), 0);
    }

    #[test]
    fn play_reports_deltas_and_standings() {
        let catalog = RoundCatalog::standard();
        let mut ledger = GameLedger::new();
        let command = Command::Play {
            rule: "Alleen".to_string(),
            results: vec![RoundResult::solo(Seat::North, 13)],
        };
        let out = execute(&command, &mut ledger, &catalog).unwrap();
        assert!(out.starts_with("Alleen: Speler 1 +60, Speler 2 -20"));
        assert!(out.contains("Dealer: Speler 2 (East)"));
    }

    #[test]
    fn unknown_rule_is_reported() {
        let catalog = RoundCatalog::standard();
        let mut ledger = GameLedger::new();
        let command = Command::Play {
            rule: "Grand slam".to_string(),
            results: vec![RoundResult::solo(Seat::North, 13)],
        };
        let err = execute(&command, &mut ledger, &catalog).unwrap_err();
        assert!(err.to_string().contains("unknown round 'Grand slam'"));
    }

    #[test]
    fn show_names_the_leader_once_rounds_exist() {
        let catalog = RoundCatalog::standard();
        let mut ledger = GameLedger::new();
        let out = execute(&Command::Show, &mut ledger, &catalog).unwrap();
        assert!(!out.contains("Leader:"));

        ledger
            .add_round(
                catalog.get("Troel").unwrap(),
                &[RoundResult::new([Seat::East, Seat::West], 7)],
            )
            .unwrap();
        let out = execute(&Command::Show, &mut ledger, &catalog).unwrap();
        assert!(out.contains("Leader: Speler 1 (+6)"));
    }

    #[test]
    fn undo_on_empty_game_is_harmless() {
        let catalog = RoundCatalog::standard();
        let mut ledger = GameLedger::new();
        let out = execute(&Command::Undo, &mut ledger, &catalog).unwrap();
        assert_eq!(out, "No rounds to remove\n");
    }

    #[test]
    fn rounds_lists_every_contract() {
        let out = render_catalog(&RoundCatalog::standard());
        assert_eq!(out.lines().count(), 12);
        assert!(out.contains("Open miserie"));
        let simultaneous = out.lines().filter(|line| line.contains("(simultaneous)"));
        assert_eq!(simultaneous.count(), 2);
    }
}
