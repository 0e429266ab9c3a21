//! Replays a synthetic order flow through the lifecycle and prints a JSON summary.
//!
//! Config: `LIFECYCLE_CONFIG` (path to a JSON file) or the env variables read by
//! `LifecycleConfig::from_env`. Flow: `SEED` (default 1), `NUM_ORDERS` (default 100).
//! Notifications go to the log; set `RUST_LOG=info` to see them.

use std::process::ExitCode;
use std::sync::Arc;

use order_lifecycle::{
    replay_into_lifecycle_with_clock, FlowConfig, FlowGenerator, LifecycleConfig, LogNotifier,
    OrderLifecycle, PositionEvent, PositionRegistry, RecordingPosition, SimulatedClock,
};

fn main() -> ExitCode {
    let _ = env_logger::try_init();

    let config = match std::env::var("LIFECYCLE_CONFIG") {
        Ok(path) => LifecycleConfig::load(&path),
        Err(_) => LifecycleConfig::from_env(),
    };
    let config = match config {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let seed: u64 = std::env::var("SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1);
    let num_orders: usize = std::env::var("NUM_ORDERS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(100);

    let flow = FlowConfig {
        seed,
        num_orders,
        ..Default::default()
    };
    let registry = PositionRegistry::new();
    let positions: Vec<(String, RecordingPosition)> = flow
        .symbols
        .iter()
        .map(|symbol| {
            let position = RecordingPosition::new();
            registry.register(flow.exchange.clone(), symbol.clone(), Arc::new(position.clone()));
            (symbol.clone(), position)
        })
        .collect();

    let clock = Arc::new(SimulatedClock::new(0));
    let lifecycle = OrderLifecycle::new(config, Arc::new(registry), Arc::new(LogNotifier))
        .with_clock(clock.clone());
    let events = FlowGenerator::new(flow).all_events();

    let (summary, orders) = match replay_into_lifecycle_with_clock(&lifecycle, events, &clock, 1_000) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("replay error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let per_symbol: serde_json::Map<String, serde_json::Value> = positions
        .iter()
        .map(|(symbol, p)| {
            (
                symbol.clone(),
                serde_json::json!({
                    "opened": p.count(PositionEvent::Opened, None),
                    "canceled": p.count(PositionEvent::Canceled, None),
                    "executed": p.count(PositionEvent::Executed, None),
                }),
            )
        })
        .collect();
    let open = orders.iter().filter(|o| !o.is_terminal()).count();
    let out = serde_json::json!({
        "mode": lifecycle.config().mode,
        "summary": summary,
        "still_open": open,
        "positions": per_symbol,
    });
    match serde_json::to_string_pretty(&out) {
        Ok(s) => println!("{}", s),
        Err(e) => {
            eprintln!("output error: {}", e);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
