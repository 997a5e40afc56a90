//! Ledger filters and financial aggregates.
//!
//! # Invariants
//! - Only paid invoices count as income.
//! - Expense breakdown follows catalog order and omits zero rows.

use crate::dates::{first_day_of_month, months_before};
use crate::format::{format_kes, format_month_label};
use crate::model::client::ClientRef;
use crate::model::ledger::{expense_category, Expense, Invoice, EXPENSE_CATEGORIES};
use crate::model::Kes;
use crate::query::{ListQuery, Searchable};
use crate::views::dashboard::DateRange;
use chrono::{Datelike, NaiveDate};

impl Searchable for Invoice {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.client_name.as_str(), self.invoice_number.as_str()];
        if let Some(description) = self.description.as_deref() {
            fields.push(description);
        }
        fields
    }
}

impl Searchable for Expense {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.description.as_str(), self.category.as_str()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LedgerFilter {
    pub search: String,
    /// Subcategory, or a parent category covering all its subcategories.
    pub category: Option<String>,
    pub range: Option<DateRange>,
}

impl LedgerFilter {
    fn in_range(&self, date: NaiveDate) -> bool {
        self.range.map_or(true, |range| range.contains(date))
    }

    fn matches_category(&self, expense: &Expense) -> bool {
        let Some(selected) = self.category.as_deref() else {
            return true;
        };
        expense.category == selected
            || expense_category(selected)
                .is_some_and(|parent| parent.subcategories.contains(&expense.category.as_str()))
    }
}

/// Paid income and matching expenses after filtering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LedgerView {
    pub income: Vec<Invoice>,
    pub expenses: Vec<Expense>,
}

pub fn filter_ledger(invoices: &[Invoice], expenses: &[Expense], filter: &LedgerFilter) -> LedgerView {
    let income = ListQuery::new()
        .search(filter.search.clone())
        .filter(|invoice: &Invoice| invoice.is_paid())
        .filter(|invoice: &Invoice| filter.in_range(invoice.date))
        .apply(invoices);
    let expenses = ListQuery::new()
        .search(filter.search.clone())
        .filter(|expense: &Expense| filter.matches_category(expense))
        .filter(|expense: &Expense| filter.in_range(expense.date))
        .apply(expenses);
    LedgerView { income, expenses }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccountingTotals {
    pub income: Kes,
    pub expenses: Kes,
    pub net: Kes,
}

impl AccountingTotals {
    pub fn is_profit(&self) -> bool {
        self.net >= 0
    }

    /// `Ksh 12,000 Profit` or `Ksh 3,500 Loss`.
    pub fn net_label(&self) -> String {
        let outcome = if self.is_profit() { "Profit" } else { "Loss" };
        format!("{} {outcome}", format_kes(self.net.abs()))
    }

    /// Net over income, rounded; `None` without income.
    pub fn margin_percent(&self) -> Option<i64> {
        if self.income <= 0 {
            return None;
        }
        let scaled = self.net * 100;
        Some((scaled + scaled.signum() * self.income / 2) / self.income)
    }
}

pub fn totals(view: &LedgerView) -> AccountingTotals {
    let income = view.income.iter().map(|invoice| invoice.amount).sum();
    let expenses = view.expenses.iter().map(|expense| expense.amount).sum();
    AccountingTotals {
        income,
        expenses,
        net: income - expenses,
    }
}

/// Expense sums per subcategory in catalog order, zero rows omitted.
pub fn expense_breakdown(expenses: &[Expense]) -> Vec<(&'static str, Kes)> {
    EXPENSE_CATEGORIES
        .iter()
        .flat_map(|category| category.subcategories.iter().copied())
        .map(|subcategory| {
            let amount = expenses
                .iter()
                .filter(|expense| expense.category == subcategory)
                .map(|expense| expense.amount)
                .sum::<Kes>();
            (subcategory, amount)
        })
        .filter(|(_, amount)| *amount > 0)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyTrend {
    /// `Mar '24`.
    pub label: String,
    pub income: Kes,
    pub expenses: Kes,
}

/// `months` consecutive months ending with the month of `reference`.
pub fn monthly_trends(view: &LedgerView, reference: NaiveDate, months: u32) -> Vec<MonthlyTrend> {
    let same_month = |a: NaiveDate, b: NaiveDate| a.year() == b.year() && a.month() == b.month();
    (0..months)
        .rev()
        .map(|offset| first_day_of_month(months_before(first_day_of_month(reference), offset)))
        .map(|month| MonthlyTrend {
            label: format_month_label(month),
            income: view
                .income
                .iter()
                .filter(|invoice| same_month(invoice.date, month))
                .map(|invoice| invoice.amount)
                .sum(),
            expenses: view
                .expenses
                .iter()
                .filter(|expense| same_month(expense.date, month))
                .map(|expense| expense.amount)
                .sum(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRevenue {
    pub name: String,
    pub client: Option<ClientRef>,
    pub amount: Kes,
}

/// Paid revenue per client name, highest first, at most `limit` rows.
pub fn top_clients(invoices: &[Invoice], limit: usize) -> Vec<ClientRevenue> {
    let mut rows: Vec<ClientRevenue> = Vec::new();
    for invoice in invoices.iter().filter(|invoice| invoice.is_paid()) {
        let name = invoice.client_display_name();
        if name.trim().is_empty() {
            continue;
        }
        match rows.iter_mut().find(|row| row.name == name) {
            Some(row) => row.amount += invoice.amount,
            None => rows.push(ClientRevenue {
                name: name.to_string(),
                client: invoice.client.clone(),
                amount: invoice.amount,
            }),
        }
    }
    rows.sort_by(|a, b| b.amount.cmp(&a.amount));
    rows.truncate(limit);
    rows
}

/// Everything the accounting overview shows for one filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountingReport {
    pub view: LedgerView,
    pub totals: AccountingTotals,
    pub breakdown: Vec<(&'static str, Kes)>,
    pub trends: Vec<MonthlyTrend>,
    pub top_clients: Vec<ClientRevenue>,
}

pub fn accounting_report(
    invoices: &[Invoice],
    expenses: &[Expense],
    filter: &LedgerFilter,
    reference: NaiveDate,
    trend_months: u32,
    top_client_limit: usize,
) -> AccountingReport {
    let view = filter_ledger(invoices, expenses, filter);
    AccountingReport {
        totals: totals(&view),
        breakdown: expense_breakdown(&view.expenses),
        trends: monthly_trends(&view, reference, trend_months),
        top_clients: top_clients(&view.income, top_client_limit),
        view,
    }
}
