use std::fs;

use crate::config::AppConfig;
use crate::hours::{availability, resolve_local_datetime, Shop};
use crate::server;
use crate::server::api::ProgressionResponse;
use crate::storage::JsonFileStore;
use crate::tier::TierEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Status,
    Complete,
    Set,
    Cycle,
    Open,
    Serve,
}

const USAGE: &str = "usage: rescuebag <status|complete|set|cycle|open|serve>";

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("status") => Some(Command::Status),
        Some("complete") => Some(Command::Complete),
        Some("set") => Some(Command::Set),
        Some("cycle") => Some(Command::Cycle),
        Some("open") => Some(Command::Open),
        Some("serve") => Some(Command::Serve),
        _ => None,
    }
}

pub fn run_with_args(args: &[String], config: &AppConfig) -> i32 {
    match parse_command(args) {
        Some(Command::Status) => handle_status(config),
        Some(Command::Complete) => handle_complete(config),
        Some(Command::Set) => handle_set(args, config),
        Some(Command::Cycle) => handle_cycle(config),
        Some(Command::Open) => handle_open(args),
        Some(Command::Serve) => handle_serve(config),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

fn load_engine(config: &AppConfig) -> TierEngine<JsonFileStore> {
    let mut engine = TierEngine::load(JsonFileStore::new(&config.store_path));
    // Settle on the stored tier so a mutation in this run can register as an upgrade.
    engine.evaluate();
    engine
}

fn print_json<T: serde::Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize output: {err}");
            1
        }
    }
}

fn handle_status(config: &AppConfig) -> i32 {
    let mut engine = TierEngine::load(JsonFileStore::new(&config.store_path));
    print_json(&ProgressionResponse::from_evaluation(engine.evaluate()))
}

fn handle_complete(config: &AppConfig) -> i32 {
    let mut engine = load_engine(config);
    engine.increment_completed_orders();
    print_json(&ProgressionResponse::from_evaluation(engine.evaluate()))
}

fn handle_set(args: &[String], config: &AppConfig) -> i32 {
    let Some(raw) = args.get(2) else {
        eprintln!("usage: rescuebag set <completed-orders>");
        return 2;
    };
    let Ok(completed_orders) = raw.trim().parse::<u32>() else {
        eprintln!("completed orders must be a non-negative integer, got '{raw}'");
        return 2;
    };

    let mut engine = load_engine(config);
    engine.set_completed_orders(completed_orders);
    print_json(&ProgressionResponse::from_evaluation(engine.evaluate()))
}

fn handle_cycle(config: &AppConfig) -> i32 {
    if !config.debug_tools {
        eprintln!("cycle is a debug tool; set RESCUEBAG_DEBUG_TOOLS=1 to enable it");
        return 2;
    }
    let mut engine = load_engine(config);
    engine.cycle_debug();
    print_json(&ProgressionResponse::from_evaluation(engine.evaluate()))
}

fn handle_open(args: &[String]) -> i32 {
    let Some(path) = args.get(2) else {
        eprintln!("usage: rescuebag open <shop.json> [--at YYYY-MM-DDTHH:MM]");
        return 2;
    };

    let at = flag_value(args, "--at");
    let Some(now) = resolve_local_datetime(at) else {
        eprintln!(
            "invalid --at '{}', expected YYYY-MM-DDTHH:MM",
            at.unwrap_or_default()
        );
        return 2;
    };

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("failed to read {path}: {err}");
            return 1;
        }
    };
    let shop: Shop = match serde_json::from_str(&raw) {
        Ok(shop) => shop,
        Err(err) => {
            eprintln!("invalid shop record in {path}: {err}");
            return 1;
        }
    };

    print_json(&availability(&shop, now))
}

fn handle_serve(config: &AppConfig) -> i32 {
    match server::run_server(config) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|idx| args.get(idx + 1))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_known_commands() {
        assert_eq!(parse_command(&args(&["rescuebag", "cycle"])), Some(Command::Cycle));
        assert_eq!(parse_command(&args(&["rescuebag", "open", "x.json"])), Some(Command::Open));
        assert_eq!(parse_command(&args(&["rescuebag"])), None);
        assert_eq!(parse_command(&args(&["rescuebag", "levelup"])), None);
    }

    #[test]
    fn flag_value_reads_following_argument() {
        let list = args(&["rescuebag", "open", "shop.json", "--at", "2024-06-03T09:00"]);
        assert_eq!(flag_value(&list, "--at"), Some("2024-06-03T09:00"));
        assert_eq!(flag_value(&list, "--tz"), None);
    }
}
