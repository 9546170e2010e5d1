use pretty_assertions::assert_eq;
use rowbind::{sql, Flavor, SemanticType, TypeTag, Value};

fn values(command: &rowbind::Command) -> Vec<Value> {
    command.params().iter().map(|p| p.value.clone()).collect()
}

#[test]
fn insert_returning() {
    let x = 5;
    let y = "O'Brien";

    let command = sql!("INSERT INTO t(a,b) VALUES({x},{y}) RETURNING *");

    assert_eq!(command.text(), "INSERT INTO t(a,b) VALUES(?1,?2) RETURNING *");
    assert_eq!(values(&command), [Value::I32(5), Value::String("O'Brien".into())]);
}

#[test]
fn null_argument_is_a_typed_parameter() {
    let note: Option<String> = None;
    let command = sql!("UPDATE Todos SET Note = {note}");

    assert_eq!(command.text(), "UPDATE Todos SET Note = ?1");
    assert_eq!(command.params()[0].value, Value::Null);
    assert_eq!(command.params()[0].ty, TypeTag::nullable(SemanticType::String));
}

#[test]
fn repeated_values_get_distinct_placeholders() {
    let id = 9i64;
    let command = sql!("SELECT {id}, {id}, {0}", id + 1);

    assert_eq!(command.text(), "SELECT ?1, ?2, ?3");
    assert_eq!(values(&command), [Value::I64(9), Value::I64(9), Value::I64(10)]);
}

#[test]
fn arguments_are_evaluated_once() {
    let mut calls = 0;
    let mut next = || {
        calls += 1;
        calls
    };

    let command = sql!("SELECT {n} + {n}", n = next());
    assert_eq!(command.text(), "SELECT ?1 + ?2");
    assert_eq!(values(&command), [Value::I32(1), Value::I32(1)]);
    assert_eq!(calls, 1);
}

#[test]
fn injection_attempt_stays_a_parameter() {
    let title = "x'); DROP TABLE Todos; --";
    let command = sql!("SELECT * FROM Todos WHERE Title = {title}");

    assert_eq!(command.text(), "SELECT * FROM Todos WHERE Title = ?1");
    assert_eq!(values(&command), [Value::String(title.into())]);
}

#[test]
fn escaped_braces() {
    let a = 1u8;
    let command = sql!("SELECT '{{a}}', {a}");
    assert_eq!(command.text(), "SELECT '{a}', ?1");
}

#[test]
fn builder_flavor() {
    let mut builder = rowbind::CommandBuilder::new().with_flavor(Flavor::Postgresql);
    builder.append_literal("SELECT ").append_value(&1i32);
    assert_eq!(builder.build().text(), "SELECT $1");
}
