//! Totals and breakdowns computed from a user's transaction list.
//!
//! Nothing here is stored: every page load reads the full list and folds over
//! it again.

use time::{Date, OffsetDateTime, UtcOffset};

use crate::{
    category::{CATEGORIES, Category},
    transaction::{Transaction, TransactionType},
};

/// Per-type totals and the most recent date of each type.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionSummary {
    /// The sum of all income.
    pub entries: f64,
    /// The sum of all expenses.
    pub expenses: f64,
    /// `entries` minus `expenses`.
    pub total: f64,
    /// The date of the latest income, if any.
    pub last_entry: Option<OffsetDateTime>,
    /// The date of the latest expense, if any.
    pub last_expense: Option<OffsetDateTime>,
}

/// Sum income and expenses and find the latest date of each.
pub fn summarize(transactions: &[Transaction]) -> TransactionSummary {
    let sum_of = |transaction_type: TransactionType| -> f64 {
        transactions
            .iter()
            .filter(|transaction| transaction.transaction_type == transaction_type)
            .map(|transaction| transaction.amount)
            .sum()
    };

    let entries = sum_of(TransactionType::Income);
    let expenses = sum_of(TransactionType::Expense);

    TransactionSummary {
        entries,
        expenses,
        total: entries - expenses,
        last_entry: last_transaction_date(transactions, TransactionType::Income),
        last_expense: last_transaction_date(transactions, TransactionType::Expense),
    }
}

/// The date of the most recent transaction of `transaction_type`.
pub fn last_transaction_date(
    transactions: &[Transaction],
    transaction_type: TransactionType,
) -> Option<OffsetDateTime> {
    transactions
        .iter()
        .filter(|transaction| transaction.transaction_type == transaction_type)
        .map(|transaction| transaction.date)
        .max()
}

/// The expenses of one category within a month.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// The category the expenses were filed under.
    pub category: &'static Category,
    /// The sum of the category's expenses.
    pub total: f64,
    /// The category's share of the month's expenses, from 0 to 100.
    pub percent: f64,
}

/// Break down the expenses in the month containing `month` by category.
///
/// Transaction dates are converted to `local_offset` before comparing the
/// month and year. Categories are returned in table order and categories
/// without expenses in the month are left out. Transactions filed under an
/// unknown category count towards the month's total but get no entry.
pub fn expenses_by_category(
    transactions: &[Transaction],
    month: Date,
    local_offset: UtcOffset,
) -> Vec<CategoryTotal> {
    let expenses: Vec<&Transaction> = transactions
        .iter()
        .filter(|transaction| {
            let local_date = transaction.date.to_offset(local_offset).date();

            transaction.transaction_type == TransactionType::Expense
                && local_date.year() == month.year()
                && local_date.month() == month.month()
        })
        .collect();

    let month_total: f64 = expenses.iter().map(|transaction| transaction.amount).sum();

    CATEGORIES
        .iter()
        .filter_map(|category| {
            let total: f64 = expenses
                .iter()
                .filter(|transaction| transaction.category == category.key)
                .map(|transaction| transaction.amount)
                .sum();

            (total > 0.0).then(|| CategoryTotal {
                category,
                total,
                percent: total / month_total * 100.0,
            })
        })
        .collect()
}
