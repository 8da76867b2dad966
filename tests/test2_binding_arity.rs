use sql_flavor::prelude::*;
use sql_flavor::test_utils::StubDriver;

fn session() -> Database<StubDriver> {
    Database::new(StubDriver::new(), Flavor::Postgres, Options::default())
}

#[test]
fn exact_arity_binds_in_source_order() -> Result<(), DatabaseError> {
    let t = SqlTemplate::compile("insert into t values (?, ?, ?)")?;
    let values = vec![SqlValue::Int(1), SqlValue::Int(2), SqlValue::Int(3)];
    let bound = bind(&t, &Bindings::Positional(values))?;
    assert_eq!(bound.len(), 3);
    for (i, p) in bound.iter().enumerate() {
        assert_eq!(p.value(), &SqlValue::Int(i as i64 + 1));
    }
    Ok(())
}

#[test]
fn off_by_one_value_counts_fail() -> Result<(), DatabaseError> {
    let t = SqlTemplate::compile("insert into t values (?, ?, ?)")?;
    for n in [2usize, 4] {
        let err = bind(&t, &Bindings::Positional(vec![SqlValue::Null; n])).unwrap_err();
        match err {
            DatabaseError::Binding(msg) => {
                assert!(msg.contains('3'), "expected marker count in: {msg}");
            }
            other => panic!("expected Binding error, got {other}"),
        }
    }
    Ok(())
}

#[test]
fn named_map_rejected_for_positional_template() -> Result<(), DatabaseError> {
    let mut db = session();
    let err = db
        .execute(
            "update t set a = :a where id = ?",
            &Bindings::named([("a", SqlValue::Int(1)), ("id", SqlValue::Int(2))]),
        )
        .unwrap_err();
    assert!(matches!(err, DatabaseError::Binding(_)), "{err}");
    Ok(())
}

#[test]
fn missing_named_marker_is_named_in_the_error() -> Result<(), DatabaseError> {
    let mut db = session();
    let err = db
        .execute(
            "update t set a = :a, b = :b",
            &Bindings::named([("a", SqlValue::Int(1))]),
        )
        .unwrap_err();
    match err {
        DatabaseError::Binding(msg) => assert!(msg.contains(":b"), "{msg}"),
        other => panic!("expected Binding error, got {other}"),
    }
    Ok(())
}

#[test]
fn null_values_bind_with_unknown_type_hint() -> Result<(), DatabaseError> {
    let t = SqlTemplate::compile("update t set a = :a")?;
    let bound = bind(&t, &Bindings::named([("a", SqlValue::Null)]))?;
    assert_eq!(bound[0].type_hint(), SqlType::Unknown);
    assert!(bound[0].value().is_null());
    Ok(())
}

#[test]
fn markerless_template_accepts_empty_bindings() -> Result<(), DatabaseError> {
    let mut db = session();
    db.execute("delete from t", &Bindings::none())?;
    Ok(())
}
