// 🗂️ Record Store - Session-scoped income and expense collections
// Append-only apart from an atomic clear-all; validation happens at the add
// boundary so the store never holds an invalid entry

use crate::model::{Category, ExpenseEntry, IncomeEntry, Priority};

// ============================================================================
// VALIDATION
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Shared name/amount checks for both add operations
fn validate_entry(name: &str, amount: f64) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError {
            field: "name".to_string(),
            message: "Name must not be empty".to_string(),
        });
    }

    if !amount.is_finite() || amount <= 0.0 {
        return Err(ValidationError {
            field: "amount".to_string(),
            message: "Amount must be greater than zero".to_string(),
        });
    }

    Ok(())
}

// ============================================================================
// BUDGET STORE
// ============================================================================

/// The session's record store
///
/// Owns both collections for the lifetime of one dashboard session. Entries
/// are kept in insertion order; order matters for display only, never for
/// aggregation. There is no single-entry edit or delete.
#[derive(Debug, Default)]
pub struct BudgetStore {
    income_sources: Vec<IncomeEntry>,
    expenses: Vec<ExpenseEntry>,
}

impl BudgetStore {
    /// Create an empty store for a new session
    pub fn new() -> Self {
        BudgetStore::default()
    }

    /// Append an income source
    ///
    /// Rejects an empty/blank name or a non-positive amount; nothing is
    /// appended on rejection.
    pub fn add_income(&mut self, name: &str, amount: f64) -> Result<(), ValidationError> {
        validate_entry(name, amount)?;

        self.income_sources.push(IncomeEntry {
            name: name.trim().to_string(),
            amount,
        });

        Ok(())
    }

    /// Append an expense
    ///
    /// Same name/amount validation as income; category and priority are
    /// enum-typed, so there is no rejection path for them.
    pub fn add_expense(
        &mut self,
        category: Category,
        name: &str,
        amount: f64,
        priority: Priority,
    ) -> Result<(), ValidationError> {
        validate_entry(name, amount)?;

        self.expenses.push(ExpenseEntry {
            category,
            name: name.trim().to_string(),
            amount,
            priority,
        });

        Ok(())
    }

    /// Empty both collections in one step
    pub fn clear_all(&mut self) {
        self.income_sources.clear();
        self.expenses.clear();
    }

    /// Income sources in insertion order
    pub fn income_sources(&self) -> &[IncomeEntry] {
        &self.income_sources
    }

    /// Expenses in insertion order
    pub fn expenses(&self) -> &[ExpenseEntry] {
        &self.expenses
    }

    /// True when no entry of either kind has been added yet
    pub fn is_empty(&self) -> bool {
        self.income_sources.is_empty() && self.expenses.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_income_appends_in_order() {
        let mut store = BudgetStore::new();

        store.add_income("Salary", 5000.0).unwrap();
        store.add_income("Freelance", 800.0).unwrap();

        let income = store.income_sources();
        assert_eq!(income.len(), 2);
        assert_eq!(income[0].name, "Salary");
        assert_eq!(income[0].amount, 5000.0);
        assert_eq!(income[1].name, "Freelance");
    }

    #[test]
    fn test_add_income_rejects_empty_name() {
        let mut store = BudgetStore::new();

        let err = store.add_income("", 100.0).unwrap_err();
        assert_eq!(err.field, "name");
        assert!(store.income_sources().is_empty());

        // Whitespace-only counts as empty
        let err = store.add_income("   ", 100.0).unwrap_err();
        assert_eq!(err.field, "name");
        assert!(store.income_sources().is_empty());
    }

    #[test]
    fn test_add_income_rejects_non_positive_amount() {
        let mut store = BudgetStore::new();

        let err = store.add_income("Bonus", 0.0).unwrap_err();
        assert_eq!(err.field, "amount");

        let err = store.add_income("Bonus", -50.0).unwrap_err();
        assert_eq!(err.field, "amount");

        assert!(store.income_sources().is_empty());
    }

    #[test]
    fn test_add_expense_validation() {
        let mut store = BudgetStore::new();

        store
            .add_expense(Category::Housing, "Rent", 1500.0, Priority::Critical)
            .unwrap();
        assert_eq!(store.expenses().len(), 1);
        assert_eq!(store.expenses()[0].category, Category::Housing);
        assert_eq!(store.expenses()[0].priority, Priority::Critical);

        assert!(store
            .add_expense(Category::Other, "", 10.0, Priority::Low)
            .is_err());
        assert!(store
            .add_expense(Category::Other, "Misc", 0.0, Priority::Low)
            .is_err());
        assert_eq!(store.expenses().len(), 1);
    }

    #[test]
    fn test_names_are_trimmed_on_store() {
        let mut store = BudgetStore::new();

        store.add_income("  Salary  ", 5000.0).unwrap();
        assert_eq!(store.income_sources()[0].name, "Salary");
    }

    #[test]
    fn test_clear_all_empties_both_collections() {
        let mut store = BudgetStore::new();

        store.add_income("Salary", 5000.0).unwrap();
        store
            .add_expense(Category::Food, "Groceries", 400.0, Priority::High)
            .unwrap();
        assert!(!store.is_empty());

        store.clear_all();

        assert!(store.is_empty());
        assert!(store.income_sources().is_empty());
        assert!(store.expenses().is_empty());
    }
}
