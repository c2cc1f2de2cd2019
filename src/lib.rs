// Budget Dashboard - Core Library
// Exposes the record store, aggregation engine, and CSV export for the
// dashboard binary and tests

pub mod export;
pub mod model;
pub mod report;
pub mod store;

#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use export::{
    expenses_csv, expenses_filename, export_expenses, export_income, income_csv, income_filename,
};
pub use model::{Category, ExpenseEntry, IncomeEntry, Priority};
pub use report::{
    balance_percent_of_income, budget_rule, category_breakdown, expense_ratio, health_assessment,
    priority_breakdown, remaining_balance, spending_note, total_expenses, total_income, BudgetRule,
    HealthAssessment, SpendingNote,
};
pub use store::{BudgetStore, ValidationError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
