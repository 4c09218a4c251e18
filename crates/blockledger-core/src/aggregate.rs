//! Aggregations over the ledger store: net worth, quest progress, cash flow

use serde::{Deserialize, Serialize};

use crate::models::{Goal, TransactionType};
use crate::store::LedgerStore;

/// Sum of every chest plus every investment
pub fn net_worth(store: &LedgerStore) -> f64 {
    store
        .chests()
        .iter()
        .map(|c| c.amount)
        .chain(store.investments().iter().map(|i| i.amount))
        .sum()
}

/// Progress towards a goal as a percentage in `[0, 100]`
///
/// Overshooting the target clamps to 100. A non-positive target counts as
/// already complete.
pub fn goal_progress(goal: &Goal) -> f64 {
    if goal.target <= 0.0 {
        return 100.0;
    }
    (goal.current / goal.target * 100.0).clamp(0.0, 100.0)
}

/// Number of goals whose saved amount has reached the target
pub fn completed_goals(store: &LedgerStore) -> usize {
    store.goals().iter().filter(|g| g.is_complete()).count()
}

/// Totals of credits and debits across the whole log
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    pub credits: f64,
    pub debits: f64,
}

impl CashFlow {
    pub fn net(&self) -> f64 {
        self.credits - self.debits
    }
}

/// Total credits and debits in the adventure log
pub fn cash_flow(store: &LedgerStore) -> CashFlow {
    store
        .transactions()
        .iter()
        .fold(CashFlow::default(), |mut flow, tx| {
            match tx.kind {
                TransactionType::Credit => flow.credits += tx.amount,
                TransactionType::Debit => flow.debits += tx.amount,
            }
            flow
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(target: f64, current: f64) -> Goal {
        Goal {
            id: "g".to_string(),
            name: "Quest".to_string(),
            target,
            current,
        }
    }

    #[test]
    fn test_net_worth_empty() {
        assert_eq!(net_worth(&LedgerStore::new()), 0.0);
    }

    #[test]
    fn test_net_worth_sums_chests_and_investments() {
        let mut store = LedgerStore::new();
        store.add_chest("Main", 100.25).unwrap();
        store.add_investment("Fund", 900.0, None).unwrap();
        store.add_chest("Wallet", -20.0).unwrap();

        assert!((net_worth(&store) - 980.25).abs() < 1e-9);
    }

    #[test]
    fn test_net_worth_order_independent() {
        let amounts = [12.5, 300.0, 0.1, 7_000.75, 0.2];

        let mut forward = LedgerStore::new();
        for (i, a) in amounts.iter().enumerate() {
            if i % 2 == 0 {
                forward.add_chest("c", *a).unwrap();
            } else {
                forward.add_investment("i", *a, None).unwrap();
            }
        }

        let mut reversed = LedgerStore::new();
        for (i, a) in amounts.iter().enumerate().rev() {
            if i % 2 == 0 {
                reversed.add_chest("c", *a).unwrap();
            } else {
                reversed.add_investment("i", *a, None).unwrap();
            }
        }

        let expected: f64 = amounts.iter().sum();
        assert!((net_worth(&forward) - expected).abs() < 1e-9);
        assert!((net_worth(&reversed) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_goal_progress_basic() {
        assert_eq!(goal_progress(&goal(200.0, 50.0)), 25.0);
        assert_eq!(goal_progress(&goal(1000.0, 1000.0)), 100.0);
    }

    #[test]
    fn test_goal_progress_clamped() {
        assert_eq!(goal_progress(&goal(100.0, 200.0)), 100.0);
        assert_eq!(goal_progress(&goal(100.0, -50.0)), 0.0);
    }

    #[test]
    fn test_goal_progress_zero_target_is_complete() {
        assert_eq!(goal_progress(&goal(0.0, 0.0)), 100.0);
        assert_eq!(goal_progress(&goal(-10.0, 5.0)), 100.0);
    }

    #[test]
    fn test_goal_progress_monotone_in_current() {
        let mut last = 0.0;
        for step in 0..=30 {
            let progress = goal_progress(&goal(250.0, step as f64 * 10.0));
            assert!(progress >= last);
            last = progress;
        }
        assert_eq!(last, 100.0);
    }

    #[test]
    fn test_completed_goals() {
        let mut store = LedgerStore::new();
        store.add_goal("Done", 10.0, Some(10.0)).unwrap();
        store.add_goal("Open", 10.0, Some(3.0)).unwrap();
        store.add_goal("Over", 10.0, Some(30.0)).unwrap();
        assert_eq!(completed_goals(&store), 2);
    }

    #[test]
    fn test_cash_flow() {
        let mut store = LedgerStore::new();
        store
            .add_transaction("Pay", 500.0, TransactionType::Credit, "x", None)
            .unwrap();
        store
            .add_transaction("Rent", 300.0, TransactionType::Debit, "x", None)
            .unwrap();
        store
            .add_transaction("Snacks", -20.0, TransactionType::Debit, "x", None)
            .unwrap();

        let flow = cash_flow(&store);
        assert_eq!(flow.credits, 500.0);
        assert_eq!(flow.debits, 320.0);
        assert_eq!(flow.net(), 180.0);
    }
}
