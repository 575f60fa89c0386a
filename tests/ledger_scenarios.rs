//! Ledger scenario tests.
//!
//! Covers the ETA chaining, range and cancellation walkthroughs, then
//! replays a seeded random session against a brute-force model of the
//! dispatch rules.

use glide_dispatch::types::{PriorityScorer, WeightedScorer};
use glide_dispatch::{DispatchError, DispatchLedger};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn eta_chaining_range_and_cancellation() {
    let mut ledger = DispatchLedger::new();

    // A: highest priority, nothing ahead of it
    assert_eq!(ledger.create_order(1, 0, 50, 10), Ok(10));
    // B: lower priority, queued behind A
    assert_eq!(ledger.create_order(2, 0, 10, 5), Ok(15));

    assert_eq!(ledger.orders_due_between(0, 12), vec![1]);
    assert_eq!(ledger.orders_due_between(20, 30), Vec::<u64>::new());
    assert_eq!(ledger.rank_by_id(1), Some(0));
    assert_eq!(ledger.rank_by_id(2), Some(1));

    let cancelled = ledger.cancel_order(1).expect("order 1 is outstanding");
    assert_eq!(cancelled.eta, 10);
    assert!(ledger.lookup_by_id(1).is_none());
    assert_eq!(ledger.orders_due_between(0, 12), Vec::<u64>::new());

    let b = ledger.lookup_by_id(2).expect("order 2 is still outstanding");
    assert_eq!(b.as_row(), [2, 0, 10, 5, 15]);
    assert_eq!(ledger.rank_by_id(2), Some(0));
    assert!(ledger.is_consistent());
}

#[test]
fn cancelled_id_can_be_reused() {
    let mut ledger = DispatchLedger::new();
    ledger.create_order(1, 0, 50, 10).unwrap();
    assert_eq!(
        ledger.create_order(1, 1, 50, 10),
        Err(DispatchError::DuplicateOrder(1))
    );

    ledger.cancel_order(1);
    assert_eq!(ledger.create_order(1, 1, 50, 10), Ok(11));
}

#[test]
fn identical_rebuilds_share_state_root() {
    let build = || {
        let mut ledger = DispatchLedger::new();
        for i in 0..50u64 {
            ledger.create_order(i, i, (i * 37) % 300, 1 + i % 7).unwrap();
        }
        for i in (0..50u64).step_by(3) {
            ledger.cancel_order(i);
        }
        ledger
    };

    let a = build();
    let b = build();
    assert_eq!(a.state_root().unwrap(), b.state_root().unwrap());
    assert_eq!(a.outstanding(), b.outstanding());
}

// ============================================================================
// RANDOMIZED SESSION vs. MODEL
// ============================================================================

/// Brute-force copy of an outstanding order
#[derive(Debug, Clone)]
struct ModelOrder {
    id: u64,
    score: Decimal,
    eta: u64,
    /// Creation sequence, orders equal ETAs the way the index does
    seq: u64,
}

#[derive(Default)]
struct Model {
    orders: Vec<ModelOrder>,
    next_seq: u64,
}

impl Model {
    fn create(&mut self, id: u64, placed_at: u64, value: u64, travel_time: u64) -> u64 {
        let score = WeightedScorer::default()
            .score(placed_at, value)
            .expect("default weights score every input");
        let ahead = self
            .orders
            .iter()
            .filter(|o| o.score > score)
            .min_by(|a, b| a.score.cmp(&b.score));
        let eta = match ahead {
            Some(order) => order.eta + travel_time,
            None => placed_at + travel_time,
        };
        self.orders.push(ModelOrder {
            id,
            score,
            eta,
            seq: self.next_seq,
        });
        self.next_seq += 1;
        eta
    }

    fn remove(&mut self, id: u64) -> bool {
        let before = self.orders.len();
        self.orders.retain(|o| o.id != id);
        self.orders.len() != before
    }

    fn sorted_by_eta(&self) -> Vec<&ModelOrder> {
        let mut sorted: Vec<&ModelOrder> = self.orders.iter().collect();
        sorted.sort_by_key(|o| (o.eta, o.seq));
        sorted
    }

    fn due_between(&self, t1: u64, t2: u64) -> Vec<u64> {
        self.sorted_by_eta()
            .into_iter()
            .filter(|o| o.eta >= t1 && o.eta <= t2)
            .map(|o| o.id)
            .collect()
    }

    fn rank(&self, id: u64) -> Option<usize> {
        self.sorted_by_eta().iter().position(|o| o.id == id)
    }
}

#[test]
fn random_session_matches_model() {
    for seed in 0..4u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut ledger = DispatchLedger::with_capacity(256);
        let mut model = Model::default();
        let mut next_id = 1u64;

        // Strictly increasing clock with values below 350 keeps every
        // score distinct, so "nearest higher priority" is unambiguous.
        for clock in 0..600u64 {
            match rng.gen_range(0..10) {
                0..=5 => {
                    let value = rng.gen_range(0..350);
                    let travel_time = rng.gen_range(1..30);
                    let eta = ledger
                        .create_order(next_id, clock, value, travel_time)
                        .unwrap();
                    assert_eq!(eta, model.create(next_id, clock, value, travel_time));
                    next_id += 1;
                }
                6..=7 => {
                    let id = rng.gen_range(1..next_id + 3);
                    let removed = ledger.cancel_order(id).is_some();
                    assert_eq!(removed, model.remove(id), "cancel {}", id);
                }
                8 => {
                    let now = rng.gen_range(0..clock + 50);
                    let delivered: Vec<u64> =
                        ledger.deliver_through(now).into_iter().map(|o| o.id).collect();
                    let expected = model.due_between(0, now);
                    for id in &expected {
                        model.remove(*id);
                    }
                    assert_eq!(delivered, expected, "deliver through {}", now);
                }
                _ => {
                    let t1 = rng.gen_range(0..clock + 50);
                    let t2 = t1 + rng.gen_range(0..40);
                    assert_eq!(ledger.orders_due_between(t1, t2), model.due_between(t1, t2));

                    let id = rng.gen_range(1..next_id + 1);
                    assert_eq!(ledger.rank_by_id(id), model.rank(id), "rank {}", id);
                }
            }

            assert_eq!(ledger.len(), model.orders.len());
        }

        assert!(ledger.is_consistent(), "seed {}", seed);
    }
}
