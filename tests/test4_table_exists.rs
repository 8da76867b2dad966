use sql_flavor::prelude::*;
use sql_flavor::test_utils::StubDriver;

#[test]
fn catalog_lookup_with_default_schema() -> Result<(), DatabaseError> {
    let driver = StubDriver::new().with_catalog("public", &[("public", "account")]);
    let mut db = Database::new(driver, Flavor::Postgres, Options::default());
    assert!(db.table_exists("Account")?);
    assert!(!db.table_exists("missing")?);
    Ok(())
}

#[test]
fn catalog_lookup_with_explicit_schema() -> Result<(), DatabaseError> {
    let driver = StubDriver::new().with_catalog("APP", &[("BILLING", "INVOICE")]);
    let mut db = Database::new(driver, Flavor::Oracle, Options::default());
    assert!(db.table_exists_in("invoice", Some("billing"))?);
    assert!(!db.table_exists_in("invoice", None)?);
    Ok(())
}

#[test]
fn quoted_name_keeps_case_regardless_of_flavor() -> Result<(), DatabaseError> {
    for flavor in [Flavor::Oracle, Flavor::Postgres] {
        let driver = StubDriver::new().with_catalog("s", &[("s", "MyTable")]);
        let mut db = Database::new(driver, flavor, Options::default());
        assert_eq!(db.normalize_table_name("\"MyTable\"")?, "MyTable");
        assert!(db.table_exists_in("\"MyTable\"", Some("\"s\""))?);
    }
    Ok(())
}

#[test]
fn probe_query_fallback_without_introspection() -> Result<(), DatabaseError> {
    let mut driver = StubDriver::new();
    driver.push_query_result(ResultSet::default());
    driver.push_query_error(DatabaseError::ObjectMissing("no such table".into()));
    let mut db = Database::new(
        driver,
        Flavor::Postgres,
        Options::default().with_allow_connection_access(true),
    );

    assert!(db.table_exists_in("Account", Some("Billing"))?);
    assert!(!db.table_exists_in("gone", Some("billing"))?);

    let driver = db.underlying_driver()?;
    assert_eq!(
        driver.calls[0].0,
        "select 1 from billing.account where 1 = 0"
    );
    Ok(())
}

#[test]
fn probe_query_fallback_propagates_other_errors() {
    let mut driver = StubDriver::new();
    driver.push_query_error(DatabaseError::Execution("permission denied".into()));
    let mut db = Database::new(driver, Flavor::Postgres, Options::default());
    let err = db.table_exists_in("account", Some("billing")).unwrap_err();
    assert!(matches!(err, DatabaseError::Execution(_)), "{err}");
}

#[test]
fn missing_schema_and_introspection_fails_with_remediation() {
    let mut db = Database::new(StubDriver::new(), Flavor::Postgres, Options::default());
    let err = db.table_exists("account").unwrap_err();
    match err {
        DatabaseError::Capability(msg) => {
            assert!(msg.contains("supply a schema name explicitly"), "{msg}");
            assert!(msg.contains("upgrade"), "{msg}");
            assert!(msg.contains("StubDriver"), "{msg}");
        }
        other => panic!("expected Capability error, got {other}"),
    }
}

#[test]
fn generic_flavor_never_claims_catalog_access() {
    // Even a driver with introspection is ignored for an unknown dialect.
    let driver = StubDriver::new().with_catalog("s", &[("s", "t")]);
    let mut db = Database::new(driver, Flavor::Generic, Options::default());
    assert!(!db.supports(Capability::SchemaIntrospection));
    let err = db.table_exists("t").unwrap_err();
    assert!(matches!(err, DatabaseError::Capability(_)));
}

#[test]
fn probe_outcome_is_cached_per_driver_class() {
    let driver = StubDriver::new().with_class("AcmeDriver-10.2");
    let mut db = Database::new(driver, Flavor::Postgres, Options::default());
    assert!(!db.supports(Capability::SchemaIntrospection));
    assert!(!db.supports(Capability::SchemaIntrospection));
    assert!(db.supports(Capability::Sequences));
}
