use sql_flavor::prelude::*;
use sql_flavor::test_utils::StubDriver;

#[test]
fn dispatch_matrix_from_two_entry_chain() {
    let chain = |active: Flavor| {
        When::for_flavor(active)
            .when(Flavor::Oracle, "x")
            .when(Flavor::Postgres, "y")
            .otherwise("z")
    };
    assert_eq!(chain(Flavor::Postgres), "y");
    assert_eq!(chain(Flavor::Derby), "z");
    assert_eq!(chain(Flavor::Generic), "z");
}

#[test]
fn duplicate_flavor_entries_do_not_shadow_the_first() {
    let sql = When::for_flavor(Flavor::Oracle)
        .when(Flavor::Oracle, "x")
        .when(Flavor::Postgres, "y")
        .when(Flavor::Oracle, "w")
        .otherwise("z");
    assert_eq!(sql, "x");
}

#[test]
fn unterminated_match_defaults_to_empty_string() {
    let fragment = When::for_flavor(Flavor::SqlServer)
        .when(Flavor::Oracle, " from dual")
        .end();
    assert_eq!(fragment, "");
    // Output is always safe to concatenate into SQL text.
    assert_eq!(format!("select 1{fragment}"), "select 1");
}

#[test]
fn session_when_uses_the_active_flavor() {
    let db = Database::new(StubDriver::new(), Flavor::Derby, Options::default());
    let sql = "create sequence s".to_string()
        + &db
            .when(Flavor::Derby, " as bigint start with 1")
            .otherwise(" start with 1");
    assert_eq!(sql, "create sequence s as bigint start with 1");
}
