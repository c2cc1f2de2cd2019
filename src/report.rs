// 📊 Budget Report - Aggregation and recommendation engine
// Pure functions over the current store; everything is recomputed in full on
// each query (bounded, small N - no caching)

use crate::model::{Category, Priority};
use crate::store::BudgetStore;
use std::collections::HashMap;

/// Share of income recommended for needs under the 50/30/20 rule
pub const NEEDS_SHARE: f64 = 0.50;
/// Share of income recommended for wants under the 50/30/20 rule
pub const WANTS_SHARE: f64 = 0.30;
/// Share of income recommended for savings under the 50/30/20 rule
pub const SAVINGS_SHARE: f64 = 0.20;

/// Expense ratio above which spending is flagged as high (percent of income)
pub const HIGH_SPENDING_RATIO: f64 = 80.0;
/// Expense ratio at or below which spending is considered healthy
pub const HEALTHY_SPENDING_RATIO: f64 = 50.0;

// ============================================================================
// TOTALS
// ============================================================================

/// Sum of all income amounts; 0 when no income has been added
pub fn total_income(store: &BudgetStore) -> f64 {
    store.income_sources().iter().map(|e| e.amount).sum()
}

/// Sum of all expense amounts; 0 when no expenses have been added
pub fn total_expenses(store: &BudgetStore) -> f64 {
    store.expenses().iter().map(|e| e.amount).sum()
}

/// Income minus expenses; negative when the budget runs a deficit
pub fn remaining_balance(store: &BudgetStore) -> f64 {
    total_income(store) - total_expenses(store)
}

/// Remaining balance as a percentage of income
///
/// None when total income is zero - the only guard; a deficit yields a
/// negative percentage.
pub fn balance_percent_of_income(store: &BudgetStore) -> Option<f64> {
    let income = total_income(store);
    if income > 0.0 {
        Some(remaining_balance(store) / income * 100.0)
    } else {
        None
    }
}

// ============================================================================
// BREAKDOWNS
// ============================================================================

/// Expense sums grouped by category
///
/// Categories with no expenses are omitted; rows come back in the fixed
/// category order, not sorted by sum.
pub fn category_breakdown(store: &BudgetStore) -> Vec<(Category, f64)> {
    let mut sums: HashMap<Category, f64> = HashMap::new();

    for expense in store.expenses() {
        *sums.entry(expense.category).or_insert(0.0) += expense.amount;
    }

    Category::ALL
        .iter()
        .filter_map(|c| sums.get(c).map(|total| (*c, *total)))
        .collect()
}

/// Expense sums grouped by priority
///
/// Priorities with no expenses are omitted; rows come back most urgent
/// first (Critical, High, Medium, Low) regardless of insertion order.
pub fn priority_breakdown(store: &BudgetStore) -> Vec<(Priority, f64)> {
    let mut sums: HashMap<Priority, f64> = HashMap::new();

    for expense in store.expenses() {
        *sums.entry(expense.priority).or_insert(0.0) += expense.amount;
    }

    Priority::DISPLAY_ORDER
        .iter()
        .filter_map(|p| sums.get(p).map(|total| (*p, *total)))
        .collect()
}

// ============================================================================
// 50/30/20 RULE
// ============================================================================

/// Recommended allocation of income under the 50/30/20 rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetRule {
    /// 50% - essentials like housing, utilities, food, transportation
    pub needs: f64,
    /// 30% - non-essentials like entertainment, dining out, hobbies
    pub wants: f64,
    /// 20% - emergency fund, retirement, debt repayment, investments
    pub savings: f64,
}

/// 50/30/20 targets for the current income
///
/// None when total income is zero; the caller shows "add income first"
/// guidance instead.
pub fn budget_rule(store: &BudgetStore) -> Option<BudgetRule> {
    let income = total_income(store);
    if income > 0.0 {
        Some(BudgetRule {
            needs: income * NEEDS_SHARE,
            wants: income * WANTS_SHARE,
            savings: income * SAVINGS_SHARE,
        })
    } else {
        None
    }
}

// ============================================================================
// HEALTH ASSESSMENT
// ============================================================================

/// Qualitative assessment of the remaining balance
///
/// The three tiers are mutually exclusive and exhaustive whenever income is
/// positive; they are evaluated in order: deficit, low savings, healthy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HealthAssessment {
    /// Expenses exceed income by `shortfall`
    Deficit { shortfall: f64 },
    /// Remaining balance is below the 20% savings target
    LowSavings { remaining: f64, savings_target: f64 },
    /// Remaining balance meets or exceeds the 20% savings target
    Healthy { remaining: f64 },
}

/// Assess the remaining balance against the 20% savings target
///
/// None when total income is zero (no assessment is defined).
pub fn health_assessment(store: &BudgetStore) -> Option<HealthAssessment> {
    let income = total_income(store);
    if income <= 0.0 {
        return None;
    }

    let remaining = remaining_balance(store);
    let savings_target = income * SAVINGS_SHARE;

    let assessment = if remaining < 0.0 {
        HealthAssessment::Deficit {
            shortfall: remaining.abs(),
        }
    } else if remaining < savings_target {
        HealthAssessment::LowSavings {
            remaining,
            savings_target,
        }
    } else {
        HealthAssessment::Healthy { remaining }
    };

    Some(assessment)
}

// ============================================================================
// EXPENSE RATIO
// ============================================================================

/// Total expenses as a percentage of total income
///
/// None when total income is zero.
pub fn expense_ratio(store: &BudgetStore) -> Option<f64> {
    let income = total_income(store);
    if income > 0.0 {
        Some(total_expenses(store) / income * 100.0)
    } else {
        None
    }
}

/// Qualitative note attached to the expense ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpendingNote {
    /// Ratio above 80% of income
    HighSpending,
    /// Ratio at or below 50% of income
    HealthySpending,
}

/// Note for a given expense ratio; None in the unremarkable middle band
pub fn spending_note(ratio: f64) -> Option<SpendingNote> {
    if ratio > HIGH_SPENDING_RATIO {
        Some(SpendingNote::HighSpending)
    } else if ratio <= HEALTHY_SPENDING_RATIO {
        Some(SpendingNote::HealthySpending)
    } else {
        None
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> BudgetStore {
        let mut store = BudgetStore::new();
        store.add_income("Salary", 5000.0).unwrap();
        store
            .add_expense(Category::Housing, "Rent", 1500.0, Priority::Critical)
            .unwrap();
        store
            .add_expense(Category::Food, "Groceries", 400.0, Priority::High)
            .unwrap();
        store
    }

    #[test]
    fn test_totals_on_empty_store() {
        let store = BudgetStore::new();

        assert_eq!(total_income(&store), 0.0);
        assert_eq!(total_expenses(&store), 0.0);
        assert_eq!(remaining_balance(&store), 0.0);
        assert!(category_breakdown(&store).is_empty());
        assert!(priority_breakdown(&store).is_empty());
        assert_eq!(budget_rule(&store), None);
        assert_eq!(health_assessment(&store), None);
        assert_eq!(expense_ratio(&store), None);
        assert_eq!(balance_percent_of_income(&store), None);
    }

    #[test]
    fn test_totals_match_added_amounts() {
        let store = sample_store();

        assert_eq!(total_income(&store), 5000.0);
        assert_eq!(total_expenses(&store), 1900.0);
        assert_eq!(remaining_balance(&store), 3100.0);
    }

    #[test]
    fn test_totals_are_order_independent() {
        let mut a = BudgetStore::new();
        a.add_income("Salary", 3000.0).unwrap();
        a.add_income("Freelance", 700.0).unwrap();

        let mut b = BudgetStore::new();
        b.add_income("Freelance", 700.0).unwrap();
        b.add_income("Salary", 3000.0).unwrap();

        assert_eq!(total_income(&a), total_income(&b));
    }

    #[test]
    fn test_category_breakdown_partitions_total() {
        let mut store = sample_store();
        store
            .add_expense(Category::Food, "Takeout", 150.0, Priority::Low)
            .unwrap();

        let breakdown = category_breakdown(&store);

        // Only the two touched categories appear, in fixed category order
        assert_eq!(
            breakdown,
            vec![(Category::Housing, 1500.0), (Category::Food, 550.0)]
        );

        let sum: f64 = breakdown.iter().map(|(_, total)| total).sum();
        assert_eq!(sum, total_expenses(&store));
    }

    #[test]
    fn test_priority_breakdown_fixed_display_order() {
        let mut store = BudgetStore::new();
        store.add_income("Salary", 1000.0).unwrap();
        // Insert in ascending urgency; rows must still come back descending
        store
            .add_expense(Category::Other, "Coffee", 20.0, Priority::Low)
            .unwrap();
        store
            .add_expense(Category::Food, "Groceries", 400.0, Priority::High)
            .unwrap();
        store
            .add_expense(Category::Housing, "Rent", 500.0, Priority::Critical)
            .unwrap();

        let breakdown = priority_breakdown(&store);

        assert_eq!(
            breakdown,
            vec![
                (Priority::Critical, 500.0),
                (Priority::High, 400.0),
                (Priority::Low, 20.0),
            ]
        );

        let sum: f64 = breakdown.iter().map(|(_, total)| total).sum();
        assert_eq!(sum, total_expenses(&store));
    }

    #[test]
    fn test_budget_rule_splits_income() {
        let store = sample_store();

        let rule = budget_rule(&store).unwrap();
        assert_eq!(rule.needs, 2500.0);
        assert_eq!(rule.wants, 1500.0);
        assert_eq!(rule.savings, 1000.0);
    }

    #[test]
    fn test_health_assessment_healthy() {
        // 3100 remaining is above the 1000 savings target
        let store = sample_store();

        assert_eq!(
            health_assessment(&store),
            Some(HealthAssessment::Healthy { remaining: 3100.0 })
        );
    }

    #[test]
    fn test_health_assessment_deficit() {
        // Income 1000, expenses 1200 -> shortfall 200
        let mut store = BudgetStore::new();
        store.add_income("Salary", 1000.0).unwrap();
        store
            .add_expense(Category::Other, "Misc", 1200.0, Priority::Low)
            .unwrap();

        assert_eq!(remaining_balance(&store), -200.0);
        assert_eq!(
            health_assessment(&store),
            Some(HealthAssessment::Deficit { shortfall: 200.0 })
        );
    }

    #[test]
    fn test_health_assessment_low_savings() {
        let mut store = BudgetStore::new();
        store.add_income("Salary", 1000.0).unwrap();
        store
            .add_expense(Category::Housing, "Rent", 900.0, Priority::Critical)
            .unwrap();

        // 100 remaining, below the 200 savings target
        assert_eq!(
            health_assessment(&store),
            Some(HealthAssessment::LowSavings {
                remaining: 100.0,
                savings_target: 200.0
            })
        );
    }

    #[test]
    fn test_health_tiers_boundaries() {
        // Exactly zero remaining is low savings, not deficit
        let mut store = BudgetStore::new();
        store.add_income("Salary", 1000.0).unwrap();
        store
            .add_expense(Category::Other, "Everything", 1000.0, Priority::Low)
            .unwrap();
        assert!(matches!(
            health_assessment(&store),
            Some(HealthAssessment::LowSavings { .. })
        ));

        // Remaining exactly at the savings target is healthy
        let mut store = BudgetStore::new();
        store.add_income("Salary", 1000.0).unwrap();
        store
            .add_expense(Category::Other, "Most things", 800.0, Priority::Low)
            .unwrap();
        assert!(matches!(
            health_assessment(&store),
            Some(HealthAssessment::Healthy { .. })
        ));
    }

    #[test]
    fn test_expense_ratio_and_percent_of_income() {
        let store = sample_store();

        assert_eq!(expense_ratio(&store), Some(38.0));
        assert_eq!(balance_percent_of_income(&store), Some(62.0));
    }

    #[test]
    fn test_spending_notes() {
        assert_eq!(spending_note(90.0), Some(SpendingNote::HighSpending));
        assert_eq!(spending_note(80.0), None);
        assert_eq!(spending_note(65.0), None);
        assert_eq!(spending_note(50.0), Some(SpendingNote::HealthySpending));
        assert_eq!(spending_note(38.0), Some(SpendingNote::HealthySpending));
    }

    #[test]
    fn test_clear_all_resets_aggregates() {
        let mut store = sample_store();
        store.clear_all();

        assert_eq!(total_income(&store), 0.0);
        assert_eq!(total_expenses(&store), 0.0);
        assert!(category_breakdown(&store).is_empty());
        assert!(priority_breakdown(&store).is_empty());
        assert_eq!(health_assessment(&store), None);
    }
}
