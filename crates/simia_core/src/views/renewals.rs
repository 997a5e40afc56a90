//! Renewals table with status tabs.
//!
//! The status dropdown wins over the tab; the tab only applies while the
//! dropdown is on "all".

use crate::model::policy::{Renewal, RenewalStatus};
use crate::query::{visible_page_numbers, ListQuery, Page, PageRequest, Searchable, SortDirection};
use std::str::FromStr;

const PAGE_WINDOW: usize = 5;

impl Searchable for Renewal {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.policy_number.as_str(),
            self.client_name.as_str(),
            self.policy_type.label(),
        ]
    }
}

/// Parses a dropdown value; `all` yields `None` and `completed` means paid.
pub fn parse_status_choice(value: &str) -> Result<Option<RenewalStatus>, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "all" => Ok(None),
        "completed" => Ok(Some(RenewalStatus::Paid)),
        other => other.parse::<RenewalStatus>().map(Some),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenewalTab {
    #[default]
    All,
    Upcoming,
    Overdue,
    Processing,
    Awaiting,
}

impl RenewalTab {
    pub fn status(self) -> Option<RenewalStatus> {
        match self {
            Self::All => None,
            Self::Upcoming => Some(RenewalStatus::Upcoming),
            Self::Overdue => Some(RenewalStatus::Overdue),
            Self::Processing => Some(RenewalStatus::Processing),
            Self::Awaiting => Some(RenewalStatus::AwaitingPayment),
        }
    }
}

impl FromStr for RenewalTab {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "upcoming" => Ok(Self::Upcoming),
            "overdue" => Ok(Self::Overdue),
            "processing" => Ok(Self::Processing),
            "awaiting" => Ok(Self::Awaiting),
            other => Err(format!("unknown renewal tab `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenewalSort {
    #[default]
    DueDateAsc,
    DueDateDesc,
    PremiumAsc,
    PremiumDesc,
}

impl RenewalSort {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DueDateAsc => "dueDate-asc",
            Self::DueDateDesc => "dueDate-desc",
            Self::PremiumAsc => "premium-asc",
            Self::PremiumDesc => "premium-desc",
        }
    }

    fn direction(self) -> SortDirection {
        match self {
            Self::DueDateAsc | Self::PremiumAsc => SortDirection::Ascending,
            Self::DueDateDesc | Self::PremiumDesc => SortDirection::Descending,
        }
    }
}

impl FromStr for RenewalSort {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "dueDate-asc" => Ok(Self::DueDateAsc),
            "dueDate-desc" => Ok(Self::DueDateDesc),
            "premium-asc" => Ok(Self::PremiumAsc),
            "premium-desc" => Ok(Self::PremiumDesc),
            other => Err(format!("unknown renewal sort `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenewalFilter {
    pub search: String,
    pub status: Option<RenewalStatus>,
    pub tab: RenewalTab,
    pub sort: RenewalSort,
}

impl RenewalFilter {
    pub fn effective_status(&self) -> Option<RenewalStatus> {
        self.status.or_else(|| self.tab.status())
    }

    fn query(&self) -> ListQuery<'_, Renewal> {
        let wanted = self.effective_status();
        let sort = self.sort;
        ListQuery::new()
            .search(self.search.clone())
            .filter_if(wanted.is_some(), move |renewal: &Renewal| {
                Some(renewal.status) == wanted
            })
            .sort_by(
                move |a: &Renewal, b: &Renewal| match sort {
                    RenewalSort::DueDateAsc | RenewalSort::DueDateDesc => a.due_date.cmp(&b.due_date),
                    RenewalSort::PremiumAsc | RenewalSort::PremiumDesc => a.premium.cmp(&b.premium),
                },
                sort.direction(),
            )
    }
}

pub fn filter_renewals(renewals: &[Renewal], filter: &RenewalFilter) -> Vec<Renewal> {
    filter.query().apply(renewals)
}

/// One table page plus the pagination window shown under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenewalsPage {
    pub page: Page<Renewal>,
    pub page_numbers: Vec<usize>,
}

pub fn renewals_page(
    renewals: &[Renewal],
    filter: &RenewalFilter,
    request: PageRequest,
) -> RenewalsPage {
    let page = Page::paginate(filter_renewals(renewals, filter), request);
    let page_numbers = visible_page_numbers(page.page, page.total_pages, PAGE_WINDOW);
    RenewalsPage { page, page_numbers }
}

/// Stat cards, counted over every renewal regardless of filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenewalStats {
    pub total: usize,
    pub upcoming: usize,
    pub overdue: usize,
    pub processing: usize,
    pub awaiting_payment: usize,
    pub completed: usize,
}

pub fn renewal_stats(renewals: &[Renewal]) -> RenewalStats {
    renewals
        .iter()
        .fold(RenewalStats::default(), |mut stats, renewal| {
            stats.total += 1;
            match renewal.status {
                RenewalStatus::Upcoming => stats.upcoming += 1,
                RenewalStatus::Overdue => stats.overdue += 1,
                RenewalStatus::Processing => stats.processing += 1,
                RenewalStatus::AwaitingPayment => stats.awaiting_payment += 1,
                RenewalStatus::Paid => stats.completed += 1,
            }
            stats
        })
}

#[cfg(test)]
mod tests {
    use super::{parse_status_choice, RenewalFilter, RenewalTab};
    use crate::model::policy::RenewalStatus;

    #[test]
    fn dropdown_choice_parsing() {
        assert_eq!(parse_status_choice("ALL").unwrap(), None);
        assert_eq!(
            parse_status_choice("completed").unwrap(),
            Some(RenewalStatus::Paid)
        );
        assert_eq!(
            parse_status_choice("awaiting payment").unwrap(),
            Some(RenewalStatus::AwaitingPayment)
        );
        assert!(parse_status_choice("lapsed").is_err());
    }

    #[test]
    fn dropdown_wins_over_tab() {
        let filter = RenewalFilter {
            status: Some(RenewalStatus::Processing),
            tab: RenewalTab::Overdue,
            ..RenewalFilter::default()
        };
        assert_eq!(filter.effective_status(), Some(RenewalStatus::Processing));

        let tab_only = RenewalFilter {
            tab: RenewalTab::Awaiting,
            ..RenewalFilter::default()
        };
        assert_eq!(
            tab_only.effective_status(),
            Some(RenewalStatus::AwaitingPayment)
        );
    }
}
