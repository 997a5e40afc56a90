use chrono::NaiveDate;
use simia_core::model::ledger::{ExpenseStatus, InvoiceStatus, LineItem};
use simia_core::service::accounting_service::{
    next_invoice_number, AccountingService, AccountingServiceError, LedgerEntry, TransactionForm,
};
use simia_core::views::accounting::{accounting_report, filter_ledger, totals, LedgerFilter};
use simia_core::views::dashboard::DateRange;
use simia_core::{demo_snapshot, demo_store, AgencyConfig, MemoryStore};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn income_becomes_a_paid_invoice_with_the_next_number() {
    let mut store = demo_store(AgencyConfig::default()).unwrap();
    let mut service = AccountingService::new(&mut store);
    assert_eq!(service.next_invoice_number().unwrap(), "INV-005");

    let mut form = TransactionForm::income("Kilimani Traders", 50_000, day(2024, 12, 2));
    form.reference = Some("  ".to_string());
    let LedgerEntry::Income(invoice) = service.record_transaction(&form).unwrap() else {
        panic!("income form should produce an invoice");
    };
    assert_eq!(invoice.invoice_number, "INV-005");
    assert_eq!(invoice.status, InvoiceStatus::Paid);
    assert_eq!(invoice.payment_method.as_deref(), Some("Cash"));
    assert!(invoice.reference.is_none());
    assert!(invoice.id.starts_with("inv-"));
    assert_eq!(service.next_invoice_number().unwrap(), "INV-006");
    assert_eq!(store.invoices().len(), 5);
}

#[test]
fn expense_prefers_subcategory_and_defaults_description() {
    let mut store = demo_store(AgencyConfig::default()).unwrap();
    let mut service = AccountingService::new(&mut store);

    let mut form = TransactionForm::expense("Technology", 3_000, day(2024, 12, 3));
    form.subcategory = Some("Software".to_string());
    form.payment_method = Some("M-Pesa".to_string());
    let LedgerEntry::Expense(expense) = service.record_transaction(&form).unwrap() else {
        panic!("expense form should produce an expense");
    };
    assert_eq!(expense.category, "Software");
    assert_eq!(expense.description, "Technology Expense");
    assert_eq!(expense.status, ExpenseStatus::Paid);
    assert_eq!(expense.payment_method.as_deref(), Some("M-Pesa"));
}

#[test]
fn transaction_forms_are_validated() {
    let mut store = demo_store(AgencyConfig::default()).unwrap();
    let mut service = AccountingService::new(&mut store);

    let zero = TransactionForm::income("Acme Corp", 0, day(2024, 12, 1));
    assert_eq!(
        service.record_transaction(&zero).unwrap_err(),
        AccountingServiceError::NonPositiveAmount(0)
    );
    let nameless = TransactionForm::income("   ", 10, day(2024, 12, 1));
    assert_eq!(
        service.record_transaction(&nameless).unwrap_err(),
        AccountingServiceError::MissingClientName
    );
    let mut uncategorized = TransactionForm::expense("Rent", 10, day(2024, 12, 1));
    uncategorized.category = None;
    assert_eq!(
        service.record_transaction(&uncategorized).unwrap_err(),
        AccountingServiceError::MissingCategory
    );
    assert_eq!(store.invoices().len(), 4);
    assert_eq!(store.expenses().len(), 4);
}

#[test]
fn invoice_numbers_follow_the_highest_sequential_number() {
    let mut invoices = demo_snapshot().unwrap().invoices;
    assert_eq!(next_invoice_number(&[]).as_deref(), Some("INV-001"));
    invoices[0].invoice_number = "INV-041".to_string();
    invoices[1].invoice_number = "INV-2024-7".to_string();
    assert_eq!(next_invoice_number(&invoices).as_deref(), Some("INV-042"));
}

#[test]
fn highest_possible_invoice_number_has_no_successor() {
    let mut snapshot = demo_snapshot().unwrap();
    snapshot.invoices[0].invoice_number = format!("INV-{}", u64::MAX);
    assert_eq!(next_invoice_number(&snapshot.invoices), None);

    let mut store = MemoryStore::from_snapshot(AgencyConfig::default(), snapshot);
    let mut service = AccountingService::new(&mut store);
    assert_eq!(
        service.next_invoice_number().unwrap_err(),
        AccountingServiceError::InvoiceNumbersExhausted
    );
    let form = TransactionForm::income("Kilimani Traders", 50_000, day(2024, 12, 2));
    assert_eq!(
        service.record_transaction(&form).unwrap_err(),
        AccountingServiceError::InvoiceNumbersExhausted
    );
    assert_eq!(store.invoices().len(), 4);
}

#[test]
fn invoice_draft_applies_configured_vat() {
    let mut store = demo_store(AgencyConfig::default()).unwrap();
    let service = AccountingService::new(&mut store);
    let draft = service.draft_invoice(vec![
        LineItem {
            description: "Motor cover".to_string(),
            quantity: 2,
            unit_price: 10_000,
        },
        LineItem {
            description: "Stamp duty".to_string(),
            quantity: 1,
            unit_price: 5_500,
        },
    ]);
    assert_eq!(draft.tax_rate_percent, 16);
    assert_eq!(draft.subtotal(), 25_500);
    assert_eq!(draft.tax(), 4_080);
    assert_eq!(draft.total(), 29_580);
}

#[test]
fn report_counts_only_paid_income_and_reports_a_loss() {
    let snapshot = demo_snapshot().unwrap();
    let report = accounting_report(
        &snapshot.invoices,
        &snapshot.expenses,
        &LedgerFilter::default(),
        day(2024, 12, 1),
        6,
        5,
    );

    assert_eq!(report.view.income.len(), 2);
    assert_eq!(report.totals.income, 390_000);
    assert_eq!(report.totals.expenses, 590_500);
    assert_eq!(report.totals.net, -200_500);
    assert!(!report.totals.is_profit());
    assert_eq!(report.totals.net_label(), "Ksh 200,500 Loss");

    assert_eq!(
        report.breakdown,
        vec![
            ("Rent", 150_000),
            ("Utilities", 8_500),
            ("Salaries", 420_000),
            ("Software", 12_000),
        ]
    );

    let labels: Vec<&str> = report.trends.iter().map(|trend| trend.label.as_str()).collect();
    assert_eq!(labels, vec!["Jul '24", "Aug '24", "Sep '24", "Oct '24", "Nov '24", "Dec '24"]);
    assert_eq!(report.trends[3].income, 240_000);
    assert_eq!(report.trends[4].income, 150_000);
    assert_eq!(report.trends[4].expenses, 428_500);
    assert_eq!(report.trends[5].expenses, 162_000);

    let top: Vec<(&str, i64)> = report
        .top_clients
        .iter()
        .map(|row| (row.name.as_str(), row.amount))
        .collect();
    assert_eq!(top, vec![("Acme Corp", 240_000), ("TechSolutions Ltd", 150_000)]);
}

#[test]
fn ledger_filter_by_parent_category_range_and_search() {
    let snapshot = demo_snapshot().unwrap();

    let operations = LedgerFilter {
        category: Some("Operations".to_string()),
        ..LedgerFilter::default()
    };
    let view = filter_ledger(&snapshot.invoices, &snapshot.expenses, &operations);
    let categories: Vec<&str> = view
        .expenses
        .iter()
        .map(|expense| expense.category.as_str())
        .collect();
    assert_eq!(categories, vec!["Rent", "Utilities"]);

    let november = LedgerFilter {
        range: Some(DateRange {
            from: day(2024, 11, 1),
            to: day(2024, 11, 30),
        }),
        ..LedgerFilter::default()
    };
    let view = filter_ledger(&snapshot.invoices, &snapshot.expenses, &november);
    assert_eq!(view.income.len(), 1);
    assert_eq!(view.expenses.len(), 2);
    let sums = totals(&view);
    assert_eq!(sums.income, 150_000);
    assert_eq!(sums.expenses, 428_500);

    let acme = LedgerFilter {
        search: "acme".to_string(),
        ..LedgerFilter::default()
    };
    let view = filter_ledger(&snapshot.invoices, &snapshot.expenses, &acme);
    assert_eq!(view.income.len(), 1);
    assert!(view.expenses.is_empty());
    assert_eq!(totals(&view).net_label(), "Ksh 240,000 Profit");
}
