use chrono::NaiveDate;
use simia_core::model::policy::PolicyType;
use simia_core::service::client_service::{ClientService, ClientServiceError, OnboardingForm};
use simia_core::views::dashboard::{dashboard_summary, DashboardSummary};
use simia_core::{
    demo_store, AgencyConfig, Capabilities, MemoryStore, Role, SessionError, SessionService,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 1).unwrap()
}

fn summary_for(store: &mut MemoryStore, role: Role) -> DashboardSummary {
    let viewer = SessionService::new(&mut *store).login_as_role(role).unwrap();
    dashboard_summary(
        &viewer,
        store.tasks(),
        store.claims(),
        store.renewals(),
        store.invoices(),
        today(),
    )
}

fn form() -> OnboardingForm {
    OnboardingForm {
        first_name: " Grace ".to_string(),
        last_name: "Wanjiku".to_string(),
        kra_pin: "a123456789b".to_string(),
        id_number: "30111222".to_string(),
        phone: "+254 722 555 010".to_string(),
        email: "grace@wanjiku.co.ke".to_string(),
        location: "Nakuru".to_string(),
        policy_type: Some(PolicyType::Health),
    }
}

#[test]
fn login_by_role_sets_session_and_capabilities() {
    let mut store = demo_store(AgencyConfig::default()).unwrap();
    let mut session = SessionService::new(&mut store);
    assert_eq!(session.current_user().unwrap_err(), SessionError::NotLoggedIn);

    let accountant = session.login_as_role(Role::Accountant).unwrap();
    assert_eq!(accountant.id, "8");
    assert_eq!(
        session.capabilities().unwrap(),
        Capabilities {
            see_revenue: true,
            create_tasks: false,
            process_renewals: false,
            invoice_renewals: true,
            own_tasks_only: false,
        }
    );

    let employee = session.login("3").unwrap();
    assert_eq!(employee.role, Role::Employee);
    let caps = session.capabilities().unwrap();
    assert!(caps.own_tasks_only && caps.process_renewals && !caps.see_revenue);

    session.logout().unwrap();
    assert!(session.capabilities().is_err());
    assert_eq!(
        session.login("99").unwrap_err(),
        SessionError::UserNotFound("99".to_string())
    );
}

#[test]
fn login_as_missing_role_fails() {
    let mut store = MemoryStore::new(AgencyConfig::default());
    let err = SessionService::new(&mut store)
        .login_as_role(Role::Boss)
        .unwrap_err();
    assert_eq!(err, SessionError::NoUserWithRole(Role::Boss));
}

#[test]
fn dashboard_hides_revenue_from_employees() {
    let mut store = demo_store(AgencyConfig::default()).unwrap();

    let boss = summary_for(&mut store, Role::Boss);
    assert_eq!(boss.greeting_name, "David");
    assert_eq!(boss.revenue, Some(390_000));
    assert_eq!(boss.active_claims, 4);
    assert_eq!(boss.pending_tasks, 5);
    assert_eq!(boss.renewals_due, 3);
    assert_eq!(boss.range.from, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    assert_eq!(boss.range.to, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());

    let employee = summary_for(&mut store, Role::Employee);
    assert_eq!(employee.greeting_name, "Sarah");
    assert_eq!(employee.revenue, None);
    assert_eq!(employee.active_claims, 4);
}

#[test]
fn onboarding_requires_every_field_and_valid_identifiers() {
    let mut store = demo_store(AgencyConfig::default()).unwrap();
    let mut clients = ClientService::new(&mut store);

    let mut missing = form();
    missing.location = "   ".to_string();
    assert_eq!(
        clients.onboard(&missing).unwrap_err(),
        ClientServiceError::MissingField("location")
    );

    let mut bad_email = form();
    bad_email.email = "grace@".to_string();
    assert_eq!(
        clients.onboard(&bad_email).unwrap_err(),
        ClientServiceError::InvalidEmail("grace@".to_string())
    );

    let mut bad_pin = form();
    bad_pin.kra_pin = "P12345".to_string();
    assert_eq!(
        clients.onboard(&bad_pin).unwrap_err(),
        ClientServiceError::InvalidKraPin("P12345".to_string())
    );
    assert_eq!(store.clients().len(), 1);
}

#[test]
fn onboarding_creates_a_client_with_one_policy() {
    let mut store = demo_store(AgencyConfig::default()).unwrap();
    let mut clients = ClientService::new(&mut store);

    let client = clients.onboard(&form()).unwrap();
    assert_eq!(client.name, "Grace Wanjiku");
    assert_eq!(client.kra_pin.as_deref(), Some("A123456789B"));
    assert!(client.id.starts_with("c-"));
    assert_eq!(client.policies.len(), 1);
    assert!(client.policies[0].starts_with("pol-"));
    assert_eq!(client.policy_count_label(), "1 Policy");

    let found = clients.search("WANJIKU");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, client.id);
    assert_eq!(clients.search("a123456789b").len(), 1);
    assert!(clients.search("nobody").is_empty());
    assert_eq!(store.clients().len(), 2);
}
