//! Property-based tests for the game table.
//!
//! - Money conservation across adds, rebuys, and cash-outs
//! - The zero-floor stack invariant
//! - Locked-seat immutability
//! - Cash-out selectivity

use chrono::Utc;
use chipbook_shared::types::{Chips, SeatId, SettlementPolicy};
use proptest::prelude::*;

use super::game::GameTable;
use super::types::GameSettings;

/// A randomly generated table operation.
#[derive(Debug, Clone)]
enum Op {
    Add { buy_in: i64 },
    Rebuy { seat: usize, amount: i64 },
    Update { seat: usize, delta: i64 },
    ToggleLock { seat: usize },
    CashOut,
}

/// Strategy for a single operation. Seat references are indices resolved
/// modulo the live seat list at application time.
fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0i64..500).prop_map(|buy_in| Op::Add { buy_in }),
        (any::<usize>(), 1i64..200).prop_map(|(seat, amount)| Op::Rebuy { seat, amount }),
        (any::<usize>(), -500i64..500).prop_map(|(seat, delta)| Op::Update { seat, delta }),
        any::<usize>().prop_map(|seat| Op::ToggleLock { seat }),
        Just(Op::CashOut),
    ]
}

fn ops_strategy(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 1..=max_len)
}

fn pick(seats: &[SeatId], index: usize) -> Option<SeatId> {
    if seats.is_empty() {
        None
    } else {
        Some(seats[index % seats.len()])
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// **Money conservation**
    ///
    /// *For any* operation sequence, `money_on_table` equals the buy-in
    /// contributions from adds and rebuys minus the chips removed by
    /// cash-outs.
    #[test]
    fn prop_money_on_table_conserved(ops in ops_strategy(40)) {
        let mut table = GameTable::open(GameSettings::default(), Utc::now());
        let mut seats = Vec::new();
        let mut contributed = Chips::ZERO;
        let mut removed = Chips::ZERO;

        for op in ops {
            match op {
                Op::Add { buy_in } => {
                    let id = table
                        .add_player("player", None, Chips::new(buy_in), Utc::now())
                        .expect("non-negative buy-in");
                    seats.push(id);
                    contributed += Chips::new(buy_in);
                }
                Op::Rebuy { seat, amount } => {
                    if let Some(id) = pick(&seats, seat) {
                        if table.rebuy(id, Chips::new(amount)).is_ok() {
                            contributed += Chips::new(amount);
                        }
                    }
                }
                Op::Update { seat, delta } => {
                    if let Some(id) = pick(&seats, seat) {
                        let _ = table.update_chips(id, Chips::new(delta));
                    }
                }
                Op::ToggleLock { seat } => {
                    if let Some(id) = pick(&seats, seat) {
                        let _ = table.toggle_lock(id);
                    }
                }
                Op::CashOut => {
                    if let Ok(report) =
                        table.cash_out_locked(SettlementPolicy::Advisory, Utc::now())
                    {
                        removed += report.total_cash_out;
                    }
                }
            }

            prop_assert_eq!(
                table.money_on_table,
                contributed - removed,
                "money on table must equal contributions minus cash-outs"
            );
        }
    }

    /// **Zero floor**
    ///
    /// *For any* delta sequence, a stack never goes below zero.
    #[test]
    fn prop_stack_never_negative(deltas in prop::collection::vec(-10_000i64..10_000, 1..30)) {
        let mut table = GameTable::open(GameSettings::default(), Utc::now());
        let id = table
            .add_player("player", None, Chips::new(10), Utc::now())
            .unwrap();

        for delta in deltas {
            let after = table.update_chips(id, Chips::new(delta)).unwrap();
            prop_assert!(!after.is_negative(), "stack went negative: {}", after);
        }
    }

    /// **Locked-seat immutability**
    ///
    /// *For any* sequence of adjustment and rebuy attempts, a locked seat's
    /// stack and cumulative buy-in are unchanged.
    #[test]
    fn prop_locked_seat_unchanged(
        buy_in in 1i64..500,
        attempts in prop::collection::vec((-300i64..300, 1i64..100), 1..20),
    ) {
        let mut table = GameTable::open(GameSettings::default(), Utc::now());
        let id = table
            .add_player("player", None, Chips::new(buy_in), Utc::now())
            .unwrap();
        table.toggle_lock(id).unwrap();

        for (delta, amount) in attempts {
            prop_assert!(table.update_chips(id, Chips::new(delta)).is_err());
            prop_assert!(table.rebuy(id, Chips::new(amount)).is_err());
        }

        let seat = table.seat(id).unwrap();
        prop_assert_eq!(seat.current_chips, Chips::new(buy_in));
        prop_assert_eq!(seat.buy_in, Chips::new(buy_in));
    }

    /// **Cash-out selectivity**
    ///
    /// *For any* subset of locked seats, the batch cash-out transitions
    /// exactly the seats that were active and locked, and no others.
    #[test]
    fn prop_cash_out_only_locked(locks in prop::collection::vec(any::<bool>(), 1..12)) {
        let mut table = GameTable::open(GameSettings::default(), Utc::now());
        let mut expected = Vec::new();

        for (i, lock) in locks.iter().enumerate() {
            let id = table
                .add_player(format!("p{i}"), None, Chips::new(30), Utc::now())
                .unwrap();
            if *lock {
                table.toggle_lock(id).unwrap();
                expected.push(id);
            }
        }

        let result = table.cash_out_locked(SettlementPolicy::Advisory, Utc::now());
        if expected.is_empty() {
            prop_assert!(result.is_err());
        } else {
            let report = result.unwrap();
            prop_assert_eq!(report.cashed_out.clone(), expected.clone());
            for seat in &table.players {
                let should_be_out = expected.contains(&seat.id);
                prop_assert_eq!(seat.is_cashed_out(), should_be_out);
                prop_assert_eq!(seat.cash_out_time.is_some(), should_be_out);
            }
        }
    }
}
