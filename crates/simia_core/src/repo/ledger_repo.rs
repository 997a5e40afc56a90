//! Invoice and expense persistence contract.

use crate::model::ledger::{Expense, Invoice};
use crate::repo::{position_by_id, RepoError, RepoResult, StoreContext};
use crate::store::MemoryStore;

pub trait LedgerRepository: StoreContext {
    fn create_invoice(&mut self, invoice: Invoice) -> RepoResult<Invoice>;
    fn create_expense(&mut self, expense: Expense) -> RepoResult<Expense>;
    fn list_invoices(&self) -> Vec<Invoice>;
    fn list_expenses(&self) -> Vec<Expense>;
}

impl LedgerRepository for MemoryStore {
    fn create_invoice(&mut self, invoice: Invoice) -> RepoResult<Invoice> {
        invoice.validate()?;
        if position_by_id(&self.invoices, &invoice.id, |i| i.id.as_str()).is_some() {
            return Err(RepoError::duplicate("invoice", invoice.id));
        }
        if self
            .invoices
            .iter()
            .any(|existing| existing.invoice_number == invoice.invoice_number)
        {
            return Err(RepoError::duplicate("invoice number", invoice.invoice_number));
        }
        self.invoices.push(invoice.clone());
        Ok(invoice)
    }

    fn create_expense(&mut self, expense: Expense) -> RepoResult<Expense> {
        expense.validate()?;
        if position_by_id(&self.expenses, &expense.id, |e| e.id.as_str()).is_some() {
            return Err(RepoError::duplicate("expense", expense.id));
        }
        self.expenses.push(expense.clone());
        Ok(expense)
    }

    fn list_invoices(&self) -> Vec<Invoice> {
        self.invoices.clone()
    }

    fn list_expenses(&self) -> Vec<Expense> {
        self.expenses.clone()
    }
}

impl<T: LedgerRepository + ?Sized> LedgerRepository for &mut T {
    fn create_invoice(&mut self, invoice: Invoice) -> RepoResult<Invoice> {
        (**self).create_invoice(invoice)
    }

    fn create_expense(&mut self, expense: Expense) -> RepoResult<Expense> {
        (**self).create_expense(expense)
    }

    fn list_invoices(&self) -> Vec<Invoice> {
        (**self).list_invoices()
    }

    fn list_expenses(&self) -> Vec<Expense> {
        (**self).list_expenses()
    }
}
