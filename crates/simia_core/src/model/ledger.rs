//! Accounting records: invoices (income) and expenses.
//!
//! # Invariants
//! - Only `InvoiceStatus::Paid` invoices count as realized income.
//! - Amounts are whole shillings and never negative.

use crate::dates::deserialize_calendar_date;
use crate::model::client::ClientRef;
use crate::model::policy::PolicyType;
use crate::model::validation::{require_non_negative, require_text, ModelValidationError};
use crate::model::Kes;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type InvoiceId = String;
pub type ExpenseId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Paid,
    Pending,
    Overdue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    Expense,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: InvoiceId,
    pub invoice_number: String,
    pub client_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: Kes,
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub date: NaiveDate,
    pub status: InvoiceStatus,
    #[serde(rename = "type")]
    pub policy_type: PolicyType,
    pub transaction_type: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Invoice {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("invoice.id", &self.id)?;
        require_text("invoice.invoiceNumber", &self.invoice_number)?;
        require_non_negative("invoice.amount", self.amount)
    }

    pub fn is_paid(&self) -> bool {
        self.status == InvoiceStatus::Paid
    }

    /// Client display name, preferring the structured reference.
    pub fn client_display_name(&self) -> &str {
        self.client
            .as_ref()
            .map(|client| client.name.as_str())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(self.client_name.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseStatus {
    Upcoming,
    Paid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    /// Subcategory name from [`EXPENSE_CATEGORIES`], or a free-form category.
    pub category: String,
    pub description: String,
    pub amount: Kes,
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub date: NaiveDate,
    pub status: ExpenseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Expense {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("expense.id", &self.id)?;
        require_text("expense.category", &self.category)?;
        require_non_negative("expense.amount", self.amount)
    }
}

/// Parent expense category and its subcategories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpenseCategory {
    pub name: &'static str,
    pub subcategories: &'static [&'static str],
}

pub const EXPENSE_CATEGORIES: &[ExpenseCategory] = &[
    ExpenseCategory {
        name: "Operations",
        subcategories: &["Rent", "Utilities", "Office Supplies", "Maintenance"],
    },
    ExpenseCategory {
        name: "Personnel",
        subcategories: &["Salaries", "Benefits", "Training", "Recruitment"],
    },
    ExpenseCategory {
        name: "Marketing",
        subcategories: &["Digital Ads", "Print", "Events", "Content Creation"],
    },
    ExpenseCategory {
        name: "Technology",
        subcategories: &["Software", "Hardware", "IT Services", "Subscriptions"],
    },
    ExpenseCategory {
        name: "Professional Services",
        subcategories: &["Legal", "Accounting", "Consulting"],
    },
    ExpenseCategory {
        name: "Travel",
        subcategories: &["Transportation", "Accommodation", "Meals"],
    },
    ExpenseCategory {
        name: "Other",
        subcategories: &["Miscellaneous", "Bank Charges"],
    },
];

/// Looks up a parent category by exact name.
pub fn expense_category(name: &str) -> Option<&'static ExpenseCategory> {
    EXPENSE_CATEGORIES
        .iter()
        .find(|category| category.name == name)
}

/// One billable line on an invoice draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    pub quantity: u32,
    pub unit_price: Kes,
}

impl LineItem {
    pub fn amount(&self) -> Kes {
        Kes::from(self.quantity) * self.unit_price
    }
}

/// Invoice under composition, before it is issued.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InvoiceDraft {
    pub items: Vec<LineItem>,
    pub tax_rate_percent: u32,
}

impl InvoiceDraft {
    pub fn subtotal(&self) -> Kes {
        self.items.iter().map(LineItem::amount).sum()
    }

    /// Tax rounded half away from zero to whole shillings.
    pub fn tax(&self) -> Kes {
        let scaled = self.subtotal() * Kes::from(self.tax_rate_percent);
        (scaled + scaled.signum() * 50) / 100
    }

    pub fn total(&self) -> Kes {
        self.subtotal() + self.tax()
    }
}
