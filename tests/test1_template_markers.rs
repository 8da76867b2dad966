use sql_flavor::prelude::*;
use sql_flavor::test_utils::StubDriver;

fn session() -> Database<StubDriver> {
    Database::new(
        StubDriver::new(),
        Flavor::Postgres,
        Options::default().with_allow_connection_access(true),
    )
}

#[test]
fn escaped_question_mark_with_named_marker() -> Result<(), DatabaseError> {
    let t = SqlTemplate::compile("select * from t where id = ?? and name = :name")?;
    assert_eq!(t.marker_count(), 1);
    assert_eq!(t.markers()[0].kind(), MarkerKind::Named);
    assert_eq!(t.markers()[0].name(), Some("name"));
    assert_eq!(t.driver_sql(), "select * from t where id = ? and name = ?");

    let mut db = session();
    db.query_template(&t, &Bindings::named([("name", SqlValue::Text("Bob".into()))]))?;
    let driver = db.underlying_driver()?;
    let (sql, params) = driver.calls.last().expect("one call recorded");
    assert_eq!(sql, "select * from t where id = ? and name = ?");
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].value().as_text(), Some("Bob"));
    Ok(())
}

#[test]
fn escapes_never_produce_markers() -> Result<(), DatabaseError> {
    for (source, expected) in [
        ("??", "?"),
        ("::", ":"),
        ("a ?? b :: c", "a ? b : c"),
        ("update t set v = '????'", "update t set v = '??'"),
    ] {
        let t = SqlTemplate::compile(source)?;
        assert_eq!(t.marker_count(), 0, "no markers in {source:?}");
        assert_eq!(t.driver_sql(), expected);
    }
    Ok(())
}

#[test]
fn literal_character_count_drops_one_per_escape() -> Result<(), DatabaseError> {
    let source = "?? :: ?? :x";
    let t = SqlTemplate::compile(source)?;
    let count = |s: &str, c: char| s.chars().filter(|&x| x == c).count();
    // Each escape contributes one literal; the named marker becomes a driver '?'.
    assert_eq!(count(t.driver_sql(), '?'), count(source, '?') / 2 + 1);
    assert_eq!(count(t.driver_sql(), ':'), 1);
    Ok(())
}

#[test]
fn marker_offsets_follow_source_order() -> Result<(), DatabaseError> {
    let t = SqlTemplate::compile("values (?, :a, ?, :b)")?;
    let offsets: Vec<_> = t.markers().iter().map(Marker::offset).collect();
    let mut sorted = offsets.clone();
    sorted.sort_unstable();
    assert_eq!(offsets, sorted);
    assert_eq!(t.marker_count(), 4);
    Ok(())
}

#[test]
fn templates_are_reusable_across_binds() -> Result<(), DatabaseError> {
    let t = SqlTemplate::compile("update t set n = :n")?;
    let mut db = session();
    for n in 0..3 {
        db.execute_template(&t, &Bindings::named([("n", SqlValue::Int(n))]))?;
    }
    let driver = db.underlying_driver()?;
    assert_eq!(driver.calls.len(), 3);
    assert_eq!(driver.calls[2].1[0].value(), &SqlValue::Int(2));
    Ok(())
}
