use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use rowbind::{sql, Command, Execute, FromRow};
use rowbind_driver_sqlite::{Connection, Sqlite};
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, FromRow)]
struct Everything {
    tiny: u8,
    small: i16,
    medium: i32,
    large: i64,
    single: f32,
    double: f64,
    amount: Decimal,
    name: String,
    flag: bool,
    id: Uuid,
    initial: char,
    created_at: NaiveDateTime,

    opt_tiny: Option<u8>,
    opt_small: Option<i16>,
    opt_medium: Option<i32>,
    opt_large: Option<i64>,
    opt_single: Option<f32>,
    opt_double: Option<f64>,
    opt_amount: Option<Decimal>,
    opt_name: Option<String>,
    opt_flag: Option<bool>,
    opt_id: Option<Uuid>,
    opt_initial: Option<char>,
    opt_created_at: Option<NaiveDateTime>,
}

const COLUMNS: &str = "tiny, small, medium, large, single, double, amount, name, flag, id, \
     initial, created_at, opt_tiny, opt_small, opt_medium, opt_large, opt_single, opt_double, \
     opt_amount, opt_name, opt_flag, opt_id, opt_initial, opt_created_at";

async fn setup() -> Connection {
    let mut db = Sqlite::in_memory().connect().await.unwrap();

    // Untyped columns keep every value in the storage class it was bound with.
    db.execute(&Command::new(format!("CREATE TABLE everything ({COLUMNS})")))
        .await
        .unwrap();

    db
}

async fn insert(db: &mut Connection, v: &Everything) {
    let command = sql!(
        "INSERT INTO everything VALUES ({}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, \
         {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {})",
        v.tiny,
        v.small,
        v.medium,
        v.large,
        v.single,
        v.double,
        v.amount,
        v.name,
        v.flag,
        v.id,
        v.initial,
        v.created_at,
        v.opt_tiny,
        v.opt_small,
        v.opt_medium,
        v.opt_large,
        v.opt_single,
        v.opt_double,
        v.opt_amount,
        v.opt_name,
        v.opt_flag,
        v.opt_id,
        v.opt_initial,
        v.opt_created_at,
    );

    assert_eq!(command.params().len(), 24);
    assert_eq!(db.execute(&command).await.unwrap(), 1);
}

fn timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 17)
        .unwrap()
        .and_hms_milli_opt(9, 30, 15, 250)
        .unwrap()
}

fn sample() -> Everything {
    Everything {
        tiny: 200,
        small: -1234,
        medium: 123_456,
        large: 9_000_000_000,
        single: 1.5,
        double: -2.25,
        amount: Decimal::new(1234, 2),
        name: "O'Brien".to_string(),
        flag: true,
        id: Uuid::from_u128(0x6f9619ff_8b86_d011_b42d_00c04fc964ff),
        initial: 'λ',
        created_at: timestamp(),

        opt_tiny: Some(7),
        opt_small: Some(i16::MIN),
        opt_medium: Some(i32::MAX),
        opt_large: Some(-1),
        opt_single: Some(0.25),
        opt_double: Some(1e100),
        opt_amount: Some(Decimal::new(-5, 1)),
        opt_name: Some(String::new()),
        opt_flag: Some(false),
        opt_id: Some(Uuid::nil()),
        opt_initial: Some('x'),
        opt_created_at: Some(timestamp()),
    }
}

#[tokio::test]
async fn every_supported_type() {
    let mut db = setup().await;
    let expected = sample();

    insert(&mut db, &expected).await;

    let actual: Everything = db
        .query_single(&Command::new(format!("SELECT {COLUMNS} FROM everything")))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(actual, expected);
}

#[tokio::test]
async fn nullable_columns_read_back_none() {
    let mut db = setup().await;
    let expected = Everything {
        opt_tiny: None,
        opt_small: None,
        opt_medium: None,
        opt_large: None,
        opt_single: None,
        opt_double: None,
        opt_amount: None,
        opt_name: None,
        opt_flag: None,
        opt_id: None,
        opt_initial: None,
        opt_created_at: None,
        ..sample()
    };

    insert(&mut db, &expected).await;

    let actual: Everything = db
        .query_single(&Command::new(format!("SELECT {COLUMNS} FROM everything")))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(actual, expected);

    let nulls: i64 = db
        .query_scalar(&Command::new(
            "SELECT count(*) FROM everything WHERE opt_name IS NULL AND opt_id IS NULL",
        ))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(nulls, 1);
}

#[tokio::test]
async fn null_in_required_column_is_an_error() {
    let mut db = setup().await;
    let mut row = sample();
    row.opt_name = None;
    insert(&mut db, &row).await;

    // Read `opt_name` into the non-nullable `name` field.
    let columns = COLUMNS.replacen("name", "opt_name AS name", 1);
    let err = db
        .query_single::<Everything>(&Command::new(format!("SELECT {columns} FROM everything")))
        .await
        .unwrap_err();

    assert!(err.is_unexpected_null(), "{err}");
}

#[tokio::test]
async fn out_of_range_integer_is_a_conversion_error() {
    let mut db = setup().await;

    let err = db
        .query_scalar::<u8>(&sql!("SELECT {}", 300i64))
        .await
        .unwrap_err();

    assert!(err.is_type_conversion(), "{err}");
}
