//! Ledger entry recording and invoice composition.
//!
//! # Invariants
//! - Recorded income and expenses carry a positive amount.
//! - Invoice numbers are `INV-###`, one past the highest existing number.

use crate::model::ledger::{
    Expense, ExpenseStatus, Invoice, InvoiceDraft, InvoiceStatus, LineItem, TransactionType,
};
use crate::model::policy::PolicyType;
use crate::model::Kes;
use crate::repo::{LedgerRepository, RepoError};
use crate::service::non_blank;
use chrono::NaiveDate;
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

const INVOICE_ID_PREFIX: &str = "inv";
const EXPENSE_ID_PREFIX: &str = "exp";
const DEFAULT_PAYMENT_METHOD: &str = "Cash";

static INVOICE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^INV-(\d+)$").expect("valid invoice number regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountingServiceError {
    MissingClientName,
    MissingCategory,
    NonPositiveAmount(Kes),
    /// The highest stored invoice number has no successor.
    InvoiceNumbersExhausted,
    Repo(RepoError),
}

impl Display for AccountingServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingClientName => write!(f, "income requires a client name"),
            Self::MissingCategory => write!(f, "expense requires a category"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "amount must be greater than zero, got {amount}")
            }
            Self::InvoiceNumbersExhausted => write!(f, "no invoice number left after the highest"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AccountingServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for AccountingServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// "Record transaction" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionForm {
    pub kind: TransactionType,
    pub amount: Kes,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub client_name: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub payment_method: Option<String>,
    pub reference: Option<String>,
    pub policy_type: PolicyType,
}

impl TransactionForm {
    pub fn income(client_name: impl Into<String>, amount: Kes, date: NaiveDate) -> Self {
        Self {
            kind: TransactionType::Income,
            amount,
            date,
            description: None,
            client_name: Some(client_name.into()),
            category: None,
            subcategory: None,
            payment_method: None,
            reference: None,
            policy_type: PolicyType::Auto,
        }
    }

    pub fn expense(category: impl Into<String>, amount: Kes, date: NaiveDate) -> Self {
        Self {
            kind: TransactionType::Expense,
            category: Some(category.into()),
            client_name: None,
            ..Self::income(String::new(), amount, date)
        }
    }
}

/// The record a transaction form produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEntry {
    Income(Invoice),
    Expense(Expense),
}

/// `INV-###` one past the highest `INV-<n>` number present.
///
/// `None` when the highest number is already `u64::MAX`.
pub fn next_invoice_number(invoices: &[Invoice]) -> Option<String> {
    let highest = invoices
        .iter()
        .filter_map(|invoice| INVOICE_NUMBER_RE.captures(invoice.invoice_number.trim()))
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    let next = highest.checked_add(1)?;
    Some(format!("INV-{next:03}"))
}

pub struct AccountingService<R: LedgerRepository> {
    repo: R,
}

impl<R: LedgerRepository> AccountingService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Records a paid invoice or a paid expense from the form.
    pub fn record_transaction(
        &mut self,
        form: &TransactionForm,
    ) -> Result<LedgerEntry, AccountingServiceError> {
        if form.amount <= 0 {
            return Err(AccountingServiceError::NonPositiveAmount(form.amount));
        }
        let payment_method = non_blank(form.payment_method.as_deref())
            .unwrap_or(DEFAULT_PAYMENT_METHOD)
            .to_string();
        let reference = non_blank(form.reference.as_deref()).map(str::to_string);

        match form.kind {
            TransactionType::Income => {
                let client_name = non_blank(form.client_name.as_deref())
                    .ok_or(AccountingServiceError::MissingClientName)?;
                let invoice_number = self.next_invoice_number()?;
                let invoice = Invoice {
                    id: self.repo.next_id(INVOICE_ID_PREFIX),
                    invoice_number,
                    client_name: client_name.to_string(),
                    client: None,
                    description: non_blank(form.description.as_deref()).map(str::to_string),
                    amount: form.amount,
                    date: form.date,
                    status: InvoiceStatus::Paid,
                    policy_type: form.policy_type,
                    transaction_type: TransactionType::Income,
                    payment_method: Some(payment_method),
                    reference,
                };
                let invoice = self.repo.create_invoice(invoice)?;
                info!(
                    "event=ledger_record module=accounting status=ok kind=income invoice_number={} amount={}",
                    invoice.invoice_number, invoice.amount
                );
                Ok(LedgerEntry::Income(invoice))
            }
            TransactionType::Expense => {
                let category = non_blank(form.category.as_deref())
                    .ok_or(AccountingServiceError::MissingCategory)?;
                let expense = Expense {
                    id: self.repo.next_id(EXPENSE_ID_PREFIX),
                    category: non_blank(form.subcategory.as_deref())
                        .unwrap_or(category)
                        .to_string(),
                    description: non_blank(form.description.as_deref())
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("{category} Expense")),
                    amount: form.amount,
                    date: form.date,
                    status: ExpenseStatus::Paid,
                    payment_method: Some(payment_method),
                    reference,
                };
                let expense = self.repo.create_expense(expense)?;
                info!(
                    "event=ledger_record module=accounting status=ok kind=expense expense_id={} amount={}",
                    expense.id, expense.amount
                );
                Ok(LedgerEntry::Expense(expense))
            }
        }
    }

    /// Draft with the configured VAT rate.
    pub fn draft_invoice(&self, items: Vec<LineItem>) -> InvoiceDraft {
        InvoiceDraft {
            items,
            tax_rate_percent: self.repo.agency_config().vat_percent,
        }
    }

    pub fn next_invoice_number(&self) -> Result<String, AccountingServiceError> {
        next_invoice_number(&self.repo.list_invoices())
            .ok_or(AccountingServiceError::InvoiceNumbersExhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::INVOICE_NUMBER_RE;

    #[test]
    fn invoice_number_pattern() {
        assert!(INVOICE_NUMBER_RE.is_match("INV-001"));
        assert!(INVOICE_NUMBER_RE.is_match("INV-1234"));
        assert!(!INVOICE_NUMBER_RE.is_match("INV-2024-1234"));
    }
}
