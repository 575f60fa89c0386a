//! Glide Dispatch - demo binary
//!
//! Replays a short dispatch session against the ledger and prints the
//! structured results. Set `RUST_LOG=debug` to see per-order events.

use glide_dispatch::types::priority::score_to_f64;
use glide_dispatch::{DispatchLedger, Result};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting dispatch demo");

    let mut ledger = DispatchLedger::new();

    for (id, placed_at, value, travel_time) in [(1, 0, 50, 10), (2, 0, 10, 5), (3, 2, 200, 4)] {
        let eta = ledger.create_order(id, placed_at, value, travel_time)?;
        println!("Order {} created - ETA: {}", id, eta);
    }

    println!();
    println!("Priority order (highest first):");
    for id in ledger.priority_order() {
        if let Some(order) = ledger.get(id) {
            println!("  order {} score {:.4}", id, score_to_f64(order.priority));
        }
    }
    println!("Outstanding by ETA:");
    for snapshot in ledger.outstanding() {
        println!("  {:?}", snapshot.as_row());
    }

    println!();
    println!("Due in [0, 12]: {:?}", ledger.orders_due_between(0, 12));
    if let Some(rank) = ledger.rank_by_id(2) {
        println!("Order 2 will be delivered after {} orders", rank);
    }

    if let Some(cancelled) = ledger.cancel_order(1) {
        println!("Cancelled order {}", cancelled.id);
    }
    match ledger.lookup_by_id(1) {
        Some(snapshot) => println!("{:?}", snapshot.as_row()),
        None => println!("Order 1 not found"),
    }

    for delivered in ledger.deliver_through(20) {
        println!("Order {} delivered at time {}", delivered.id, delivered.eta);
    }

    println!();
    println!("State root: {}", ledger.state_root_hex()?);
    tracing::info!(outstanding = ledger.len(), "Dispatch demo finished");
    Ok(())
}
