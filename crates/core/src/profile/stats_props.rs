//! Property-based tests for the statistics fold.
//!
//! - Incremental fold equals from-scratch recompute for any history
//! - Aggregate consistency after every step

use chipbook_shared::types::{Chips, GameId};
use proptest::prelude::*;

use super::types::{PlayerStats, SessionRecord};

/// Strategy for a settlement record with a consistent profit field.
fn session_strategy() -> impl Strategy<Value = SessionRecord> {
    (0i64..1_000, 0i64..1_000, 0i64..600).prop_map(|(buy_in, cash_out, duration_minutes)| {
        SessionRecord {
            game_id: GameId::new(),
            date: None,
            buy_in: Chips::new(buy_in),
            cash_out: Chips::new(cash_out),
            profit: Chips::new(cash_out - buy_in),
            duration_minutes,
        }
    })
}

fn history_strategy(max_len: usize) -> impl Strategy<Value = Vec<SessionRecord>> {
    prop::collection::vec(session_strategy(), 0..=max_len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// **Fold/recompute equivalence**
    ///
    /// *For any* session history, folding one record at a time produces the
    /// same aggregates as recomputing from scratch, at every prefix.
    #[test]
    fn prop_incremental_equals_recompute(history in history_strategy(25)) {
        let mut incremental = PlayerStats::default();

        for (i, session) in history.iter().enumerate() {
            incremental.record(session);
            prop_assert_eq!(
                incremental,
                PlayerStats::recompute(&history[..=i]),
                "drift after {} sessions",
                i + 1
            );
            prop_assert!(incremental.is_consistent_with(&history[..=i]));
        }
    }

    /// **Aggregate identities**
    ///
    /// *For any* history: session count matches, net profit equals
    /// cash-outs minus buy-ins, and the extrema bound every session profit.
    #[test]
    fn prop_aggregate_identities(history in history_strategy(25)) {
        let stats = PlayerStats::recompute(&history);

        prop_assert_eq!(stats.total_sessions as usize, history.len());
        prop_assert_eq!(
            stats.net_profit,
            stats.total_cash_outs - stats.total_buy_ins
        );
        prop_assert!(!stats.biggest_win.is_negative());
        prop_assert!(!stats.biggest_loss.is_positive());
        for session in &history {
            prop_assert!(session.profit <= stats.biggest_win);
            prop_assert!(session.profit >= stats.biggest_loss);
        }
    }
}
