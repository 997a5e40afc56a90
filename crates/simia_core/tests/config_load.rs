use simia_core::{AgencyConfig, ConfigError};
use std::io::Write;

#[test]
fn empty_object_yields_defaults() {
    let config = AgencyConfig::from_json("{}").unwrap();
    assert_eq!(config, AgencyConfig::default());
    assert_eq!(config.claims_page_size, 5);
    assert_eq!(config.renewals_page_size, 10);
    assert_eq!(config.team_page_size, 9);
    assert_eq!(config.vat_percent, 16);
    assert_eq!(config.task_due_days, 7);
}

#[test]
fn present_fields_override_defaults() {
    let config =
        AgencyConfig::from_json(r#"{ "claimsPageSize": 25, "vatPercent": 0, "trendMonths": 12 }"#)
            .unwrap();
    assert_eq!(config.claims_page_size, 25);
    assert_eq!(config.vat_percent, 0);
    assert_eq!(config.trend_months, 12);
    assert_eq!(config.team_page_size, 9);
}

#[test]
fn invalid_values_are_rejected() {
    assert_eq!(
        AgencyConfig::from_json(r#"{ "teamPageSize": 0 }"#).unwrap_err(),
        ConfigError::ZeroPageSize("teamPageSize")
    );
    assert_eq!(
        AgencyConfig::from_json(r#"{ "vatPercent": 101 }"#).unwrap_err(),
        ConfigError::VatOutOfRange(101)
    );
    assert_eq!(
        AgencyConfig::from_json(r#"{ "trendMonths": 0 }"#).unwrap_err(),
        ConfigError::ZeroTrendMonths
    );
    assert!(matches!(
        AgencyConfig::from_json(r#"{ "pageSize": 5 }"#),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        AgencyConfig::from_json("not json"),
        Err(ConfigError::Parse(_))
    ));
    assert_eq!(
        ConfigError::ZeroPageSize("inboxPageSize").to_string(),
        "inboxPageSize must be at least 1"
    );
}

#[test]
fn load_reads_a_file_and_reports_missing_paths() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "inboxPageSize": 20, "topClients": 3 }}"#).unwrap();

    let config = AgencyConfig::load(file.path()).unwrap();
    assert_eq!(config.inbox_page_size, 20);
    assert_eq!(config.top_clients, 3);

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("simia.json");
    let err = AgencyConfig::load(&missing).unwrap_err();
    let ConfigError::Io { path, .. } = &err else {
        panic!("expected io error, got {err:?}");
    };
    assert_eq!(path, &missing);
    assert!(err.to_string().contains("simia.json"));
}
