//! Landing dashboard for the session user.

use crate::dates::{first_day_of_month, last_day_of_month, months_before};
use crate::model::ledger::Invoice;
use crate::model::policy::{Claim, Renewal};
use crate::model::task::Task;
use crate::model::user::User;
use crate::model::Kes;
use chrono::NaiveDate;

const DEFAULT_RANGE_MONTHS: u32 = 6;

/// Inclusive reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// First day of the month six months back through the end of this month.
    pub fn default_for(today: NaiveDate) -> Self {
        Self {
            from: first_day_of_month(months_before(today, DEFAULT_RANGE_MONTHS)),
            to: last_day_of_month(today),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub greeting_name: String,
    /// Sum of paid invoices; `None` when the viewer may not see revenue.
    pub revenue: Option<Kes>,
    pub active_claims: usize,
    pub pending_tasks: usize,
    pub renewals_due: usize,
    pub range: DateRange,
}

pub fn dashboard_summary(
    viewer: &User,
    tasks: &[Task],
    claims: &[Claim],
    renewals: &[Renewal],
    invoices: &[Invoice],
    today: NaiveDate,
) -> DashboardSummary {
    let revenue = viewer.role.can_see_revenue().then(|| {
        invoices
            .iter()
            .filter(|invoice| invoice.is_paid())
            .map(|invoice| invoice.amount)
            .sum()
    });
    DashboardSummary {
        greeting_name: viewer.first_name().to_string(),
        revenue,
        active_claims: claims.iter().filter(|claim| claim.status.is_active()).count(),
        pending_tasks: tasks.iter().filter(|task| !task.is_done()).count(),
        renewals_due: renewals.iter().filter(|renewal| renewal.status.is_due()).count(),
        range: DateRange::default_for(today),
    }
}
