//! Claims table.

use crate::model::policy::{Claim, ClaimStatus, Renewal, RenewalStatus};
use crate::query::{ListQuery, Page, PageRequest, Searchable, SortDirection, SortState};
use std::cmp::Ordering;
use std::str::FromStr;

impl Searchable for Claim {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.policy_number.as_str(),
            self.policy_holder.as_str(),
            self.policy_type.label(),
        ]
    }
}

/// Sortable claim columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimSortKey {
    Date,
    Amount,
    PolicyNumber,
    PolicyHolder,
    Status,
}

impl ClaimSortKey {
    fn compare(self, a: &Claim, b: &Claim) -> Ordering {
        match self {
            Self::Date => a.date.cmp(&b.date),
            Self::Amount => a.amount.cmp(&b.amount),
            Self::PolicyNumber => a.policy_number.cmp(&b.policy_number),
            Self::PolicyHolder => a.policy_holder.cmp(&b.policy_holder),
            Self::Status => a.status.as_str().cmp(b.status.as_str()),
        }
    }
}

impl FromStr for ClaimSortKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "date" => Ok(Self::Date),
            "amount" => Ok(Self::Amount),
            "policyNumber" => Ok(Self::PolicyNumber),
            "policyHolder" => Ok(Self::PolicyHolder),
            "status" => Ok(Self::Status),
            other => Err(format!("unknown claim sort key `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimFilter {
    pub search: String,
    /// `None` shows every status.
    pub status: Option<ClaimStatus>,
    pub sort: SortState<ClaimSortKey>,
}

impl Default for ClaimFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: None,
            sort: SortState::new(ClaimSortKey::Date, SortDirection::Descending),
        }
    }
}

impl ClaimFilter {
    fn query(&self) -> ListQuery<'_, Claim> {
        let sort = self.sort;
        ListQuery::new()
            .search(self.search.clone())
            .filter_if(self.status.is_some(), move |claim: &Claim| {
                Some(claim.status) == self.status
            })
            .sort_by(move |a, b| sort.key.compare(a, b), sort.direction)
    }
}

pub fn filter_claims(claims: &[Claim], filter: &ClaimFilter) -> Vec<Claim> {
    filter.query().apply(claims)
}

pub fn claims_page(claims: &[Claim], filter: &ClaimFilter, request: PageRequest) -> Page<Claim> {
    Page::paginate(filter_claims(claims, filter), request)
}

/// Summary cards above the claims table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimsSummary {
    pub total_claims: usize,
    pub matching_claims: usize,
    pub pending_claims: usize,
    pub upcoming_renewals: usize,
    pub overdue_renewals: usize,
}

pub fn claims_summary(claims: &[Claim], renewals: &[Renewal], filter: &ClaimFilter) -> ClaimsSummary {
    let query = filter.query();
    let count_renewals =
        |status: RenewalStatus| renewals.iter().filter(|r| r.status == status).count();
    ClaimsSummary {
        total_claims: claims.len(),
        matching_claims: claims.iter().filter(|claim| query.matches(claim)).count(),
        pending_claims: claims
            .iter()
            .filter(|claim| claim.status == ClaimStatus::Pending)
            .count(),
        upcoming_renewals: count_renewals(RenewalStatus::Upcoming),
        overdue_renewals: count_renewals(RenewalStatus::Overdue),
    }
}

/// Claim count per status present, in status order.
pub fn claim_status_breakdown(claims: &[Claim]) -> Vec<(ClaimStatus, usize)> {
    ClaimStatus::ALL
        .into_iter()
        .map(|status| {
            let count = claims.iter().filter(|claim| claim.status == status).count();
            (status, count)
        })
        .filter(|(_, count)| *count > 0)
        .collect()
}
