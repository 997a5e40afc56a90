use simia_core::model::policy::{ClaimStatus, RenewalStatus};
use simia_core::model::user::Presence;
use simia_core::query::{PageRequest, SortDirection, SortState};
use simia_core::views::claims::{
    claim_status_breakdown, claims_page, claims_summary, filter_claims, ClaimFilter, ClaimSortKey,
};
use simia_core::views::renewals::{
    filter_renewals, parse_status_choice, renewal_stats, renewals_page, RenewalFilter,
    RenewalSort, RenewalTab,
};
use simia_core::views::team::{
    filter_members, members_found_label, team_members, team_page, RoleChoice, TeamFilter,
};
use simia_core::{demo_store, AgencyConfig, MemoryStore};

fn store() -> MemoryStore {
    demo_store(AgencyConfig::default()).unwrap()
}

#[test]
fn claim_status_filter_returns_only_that_status() {
    let store = store();
    let filter = ClaimFilter {
        status: Some(ClaimStatus::Pending),
        ..ClaimFilter::default()
    };
    let claims = filter_claims(store.claims(), &filter);
    assert_eq!(claims.len(), 2);
    assert!(claims.iter().all(|claim| claim.status == ClaimStatus::Pending));
    // Default order is newest first.
    assert_eq!(claims[0].policy_number, "POL-3399");
    assert_eq!(claims[1].policy_number, "POL-9982");
}

#[test]
fn claim_search_is_case_insensitive_over_holder_and_type() {
    let store = store();
    let by_holder = ClaimFilter {
        search: "aCmE".to_string(),
        ..ClaimFilter::default()
    };
    let found = filter_claims(store.claims(), &by_holder);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].policy_holder, "Acme Corp");

    let by_type = ClaimFilter {
        search: "bid bond".to_string(),
        ..ClaimFilter::default()
    };
    assert_eq!(filter_claims(store.claims(), &by_type).len(), 1);

    let nothing = ClaimFilter {
        search: "no such holder".to_string(),
        ..ClaimFilter::default()
    };
    let page = claims_page(store.claims(), &nothing, PageRequest::first(5));
    assert!(page.is_empty());
    assert_eq!(page.range_label(), "0-0 of 0");
}

#[test]
fn claim_pages_never_exceed_page_size_and_last_page_has_remainder() {
    let store = store();
    let filter = ClaimFilter::default();
    let size = store.config().claims_page_size;

    let first = claims_page(store.claims(), &filter, PageRequest::new(1, size));
    assert_eq!(first.items.len(), 5);
    assert_eq!(first.total_items, 7);
    assert_eq!(first.total_pages, 2);
    assert!(first.has_next());
    assert!(!first.has_previous());
    assert_eq!(first.range_label(), "1-5 of 7");

    let last = claims_page(store.claims(), &filter, PageRequest::new(2, size));
    assert_eq!(last.items.len(), 2);
    assert!(!last.has_next());
    assert_eq!(last.range_label(), "6-7 of 7");

    let beyond = claims_page(store.claims(), &filter, PageRequest::new(9, size));
    assert!(beyond.is_empty());
}

#[test]
fn claim_sort_header_toggles_direction() {
    let store = store();
    let mut filter = ClaimFilter {
        sort: SortState::new(ClaimSortKey::Amount, SortDirection::Descending),
        ..ClaimFilter::default()
    };
    filter.sort.request(ClaimSortKey::Amount);
    assert_eq!(filter.sort.direction, SortDirection::Ascending);
    let ascending = filter_claims(store.claims(), &filter);
    assert_eq!(ascending.first().unwrap().amount, 18_000);

    filter.sort.request(ClaimSortKey::Amount);
    assert_eq!(filter.sort.direction, SortDirection::Descending);
    let descending = filter_claims(store.claims(), &filter);
    assert_eq!(descending.first().unwrap().amount, 2_500_000);

    assert_eq!("policyHolder".parse::<ClaimSortKey>(), Ok(ClaimSortKey::PolicyHolder));
    assert!("holder".parse::<ClaimSortKey>().is_err());
}

#[test]
fn claims_summary_counts_pending_and_renewal_states() {
    let store = store();
    let filter = ClaimFilter {
        search: "pol-9".to_string(),
        ..ClaimFilter::default()
    };
    let summary = claims_summary(store.claims(), store.renewals(), &filter);
    assert_eq!(summary.total_claims, 7);
    assert_eq!(summary.matching_claims, 1);
    assert_eq!(summary.pending_claims, 2);
    assert_eq!(summary.upcoming_renewals, 2);
    assert_eq!(summary.overdue_renewals, 1);

    let breakdown = claim_status_breakdown(store.claims());
    assert_eq!(
        breakdown,
        vec![
            (ClaimStatus::Pending, 2),
            (ClaimStatus::Approved, 2),
            (ClaimStatus::Rejected, 1),
            (ClaimStatus::Paid, 2),
        ]
    );
}

#[test]
fn renewal_tab_applies_only_while_dropdown_is_all() {
    let store = store();
    let upcoming_tab = RenewalFilter {
        tab: RenewalTab::Upcoming,
        ..RenewalFilter::default()
    };
    let upcoming = filter_renewals(store.renewals(), &upcoming_tab);
    let ids: Vec<&str> = upcoming.iter().map(|renewal| renewal.id.as_str()).collect();
    assert_eq!(ids, vec!["r1", "r3"]);

    let dropdown_wins = RenewalFilter {
        status: Some(RenewalStatus::Overdue),
        tab: RenewalTab::Upcoming,
        ..RenewalFilter::default()
    };
    let overdue = filter_renewals(store.renewals(), &dropdown_wins);
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].status, RenewalStatus::Overdue);
}

#[test]
fn renewal_completed_choice_means_paid() {
    assert_eq!(parse_status_choice("all"), Ok(None));
    assert_eq!(parse_status_choice("Completed"), Ok(Some(RenewalStatus::Paid)));
    assert_eq!(
        parse_status_choice("awaiting payment"),
        Ok(Some(RenewalStatus::AwaitingPayment))
    );
    assert!(parse_status_choice("cancelled").is_err());

    let store = store();
    let filter = RenewalFilter {
        status: parse_status_choice("completed").unwrap(),
        ..RenewalFilter::default()
    };
    let completed = filter_renewals(store.renewals(), &filter);
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].policy_number, "POL-5543");
}

#[test]
fn renewal_sort_and_page_window() {
    let store = store();
    let filter = RenewalFilter {
        sort: "premium-desc".parse::<RenewalSort>().unwrap(),
        ..RenewalFilter::default()
    };
    let view = renewals_page(store.renewals(), &filter, PageRequest::new(2, 2));
    assert_eq!(view.page.items.len(), 2);
    assert_eq!(view.page.total_pages, 3);
    assert_eq!(view.page_numbers, vec![1, 2, 3]);
    assert_eq!(view.page.items[0].premium, 45_000);

    let stats = renewal_stats(store.renewals());
    assert_eq!(stats.total, 6);
    assert_eq!(stats.upcoming, 2);
    assert_eq!(stats.overdue, 1);
    assert_eq!(stats.processing, 1);
    assert_eq!(stats.awaiting_payment, 1);
    assert_eq!(stats.completed, 1);
}

#[test]
fn team_directory_filters_by_name_role_and_presence() {
    let store = store();
    let members = team_members(store.users(), store.profiles());
    assert_eq!(members.len(), 8);

    let by_name = TeamFilter {
        search: "JESS".to_string(),
        ..TeamFilter::default()
    };
    let found = filter_members(&members, &by_name);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].user.name, "Jessica Claims");
    assert_eq!(found[0].initials(), "JC");

    let agents = TeamFilter {
        role: "agent".parse::<RoleChoice>().unwrap(),
        ..TeamFilter::default()
    };
    let agent_members = filter_members(&members, &agents);
    assert_eq!(agent_members.len(), 6);
    assert!(agent_members.iter().all(|member| member.title() == "Agent"));

    let accountant = TeamFilter {
        role: RoleChoice::Accountant,
        ..TeamFilter::default()
    };
    assert_eq!(filter_members(&members, &accountant).len(), 1);

    let online = TeamFilter {
        presence: Some(Presence::Online),
        ..TeamFilter::default()
    };
    let page = team_page(&members, &online, PageRequest::first(store.config().team_page_size));
    assert_eq!(page.total_items, 4);
    assert_eq!(members_found_label(page.total_items), "4 members found");
    assert_eq!(members_found_label(1), "1 member found");
}
