use pretty_assertions::assert_eq;
use rowbind::{
    driver::mem::MemCursor,
    options::NullHandling,
    result::State,
    stmt::{Type, Value},
    Mapper, Mapping, ReadOptions, ResultColumn, SchemaCapture,
};

#[derive(Debug, Default, Clone, PartialEq, rowbind::Record)]
struct Score {
    id: i64,
    name: String,
    score: Option<i64>,
}

fn scores() -> MemCursor {
    MemCursor::new(["Id", "Name", "Score"])
        .row([Value::I64(1), Value::from("x"), Value::Null])
        .row([Value::I64(2), Value::from("y"), Value::I64(5)])
}

fn score(id: i64, name: &str, score: Option<i64>) -> Score {
    Score {
        id,
        name: name.to_string(),
        score,
    }
}

#[test]
fn reads_rows_with_schema() {
    let mapper = Mapper::new();
    let plan = mapper
        .read_plan(&ReadOptions::<Score>::new().capture(SchemaCapture::Columns))
        .unwrap();

    assert!(plan.captures_schema());

    let result = plan.read(scores()).unwrap();

    assert_eq!(
        result.rows,
        vec![score(1, "x", None), score(2, "y", Some(5))]
    );
    assert_eq!(
        result.columns,
        vec![
            ResultColumn {
                ordinal: 0,
                name: "Id".into(),
                is_consumed: true,
                type_name: None,
            },
            ResultColumn {
                ordinal: 1,
                name: "Name".into(),
                is_consumed: true,
                type_name: None,
            },
            ResultColumn {
                ordinal: 2,
                name: "Score".into(),
                is_consumed: true,
                type_name: None,
            },
        ]
    );
    assert_eq!(result.consumed_columns().count(), 3);
}

#[test]
fn schema_capture_off_by_default() {
    let result = Mapper::new().read::<Score, _>(scores()).unwrap();

    assert_eq!(result.len(), 2);
    assert!(result.columns.is_empty());
}

#[test]
fn unmapped_columns_are_not_consumed() {
    let cursor = MemCursor::new(["id", "name", "score", "extra"]).row([
        Value::I64(1),
        Value::from("x"),
        Value::I64(3),
        Value::Bool(true),
    ]);

    let result = Mapper::new()
        .read_plan(&ReadOptions::<Score>::new().capture(SchemaCapture::Columns))
        .unwrap()
        .read(cursor)
        .unwrap();

    let consumed: Vec<_> = result
        .consumed_columns()
        .map(|column| column.name.as_str())
        .collect();

    assert_eq!(consumed, ["id", "name", "score"]);
    assert!(!result.columns[3].is_consumed);
}

#[test]
fn native_types_are_probed_until_known() {
    let result = Mapper::new()
        .read_plan(&ReadOptions::<Score>::new().capture(SchemaCapture::ColumnsWithTypes))
        .unwrap()
        .read(scores())
        .unwrap();

    let types: Vec<_> = result
        .columns
        .iter()
        .map(|column| column.type_name.as_deref())
        .collect();

    // The first row holds null for `Score`; the second row reports it.
    assert_eq!(types, [Some("I64"), Some("String"), Some("I64")]);
}

#[test]
fn identical_options_read_identical_data() {
    let mapper = Mapper::builder().cache_plans(false).build();

    let a = mapper.read_plan(&ReadOptions::<Score>::new()).unwrap();
    let b = mapper.read_plan(&ReadOptions::<Score>::new()).unwrap();

    assert!(!std::sync::Arc::ptr_eq(&a, &b));
    assert_eq!(a.read(scores()).unwrap(), b.read(scores()).unwrap());
}

#[test]
fn absent_nullable_column_yields_default() {
    let cursor = MemCursor::new(["id", "name"]).row([Value::I64(7), Value::from("z")]);

    let rows = Mapper::new().read::<Score, _>(cursor).unwrap().into_rows();
    assert_eq!(rows, vec![score(7, "z", None)]);
}

#[test]
fn absent_required_column_fails_before_first_row() {
    let mut cursor = MemCursor::new(["id", "score"]).row([Value::I64(7), Value::Null]);

    let err = Mapper::new().read::<Score, _>(&mut cursor).unwrap_err();

    assert!(err.is_column_not_found());
    assert_eq!(err.to_string(), "column `name` not found");
    assert_eq!(cursor.advanced(), 0);
}

#[test]
fn null_in_required_member() {
    let cursor = || {
        MemCursor::new(["id", "name", "score"]).row([Value::Null, Value::from("n"), Value::Null])
    };

    let mapper = Mapper::new();
    let err = mapper.read::<Score, _>(cursor()).unwrap_err();
    assert!(err.is_type_conversion());

    let plan = mapper
        .read_plan(&ReadOptions::<Score>::new().always_test_null(true))
        .unwrap();
    assert_eq!(plan.read(cursor()).unwrap().rows, vec![score(0, "n", None)]);

    let plan = mapper
        .read_plan(&ReadOptions::<Score>::new().null_handling("id", NullHandling::Test))
        .unwrap();
    assert_eq!(plan.read(cursor()).unwrap().rows, vec![score(0, "n", None)]);
}

#[test]
fn values_are_converted_to_member_types() {
    #[derive(Debug, Default, PartialEq, rowbind::Record)]
    struct Flags {
        id: u32,
        active: bool,
        ratio: f64,
    }

    let cursor = MemCursor::new(["id", "active", "ratio"]).row([
        Value::I64(3),
        Value::I64(1),
        Value::F32(0.5),
    ]);

    let rows = Mapper::new().read::<Flags, _>(cursor).unwrap().into_rows();
    assert_eq!(
        rows,
        vec![Flags {
            id: 3,
            active: true,
            ratio: 0.5
        }]
    );
}

#[test]
fn column_attribute_and_override() {
    #[derive(Debug, Default, PartialEq, rowbind::Record)]
    struct User {
        #[column("user_id")]
        id: i64,
        name: String,
    }

    let cursor = || {
        MemCursor::new(["user_id", "full_name"]).row([Value::I64(9), Value::from("Ann")])
    };

    let mapper = Mapper::new();
    assert!(mapper.read::<User, _>(cursor()).is_err());

    let plan = mapper
        .read_plan(&ReadOptions::<User>::new().column("name", "full_name"))
        .unwrap();

    let columns: Vec<_> = plan
        .describe()
        .iter()
        .map(|field| field.column.as_str())
        .collect();
    assert_eq!(columns, ["user_id", "full_name"]);

    assert_eq!(
        plan.read(cursor()).unwrap().rows,
        vec![User {
            id: 9,
            name: "Ann".into()
        }]
    );
}

#[test]
fn skipped_fields_keep_their_default() {
    #[derive(Debug, Default, PartialEq, rowbind::Record)]
    struct Cached {
        id: i64,
        #[skip]
        hits: u64,
    }

    let cursor = MemCursor::new(["id", "hits"]).row([Value::I64(1), Value::I64(40)]);
    let rows = Mapper::new().read::<Cached, _>(cursor).unwrap().into_rows();

    assert_eq!(rows, vec![Cached { id: 1, hits: 0 }]);
}

#[test]
fn ignore_override() {
    let cursor = MemCursor::new(["id", "name", "score"]).row([
        Value::I64(1),
        Value::from("x"),
        Value::I64(8),
    ]);

    let result = Mapper::new()
        .read_plan(&ReadOptions::<Score>::new().ignore("score"))
        .unwrap()
        .read(cursor)
        .unwrap();

    assert_eq!(result.rows, vec![score(1, "x", None)]);
}

#[test]
fn custom_mapping_reads_the_raw_column() {
    let shout = Mapping::new(Type::String, |row, ordinal| {
        let value = row.raw_value(ordinal)?;
        Ok(Value::from(value.as_str().unwrap_or_default().to_uppercase()))
    });

    let plan = Mapper::new()
        .read_plan(&ReadOptions::<Score>::new().mapping("name", shout))
        .unwrap();

    assert!(plan.describe()[1].has_custom_mapping());

    let rows = plan.read(scores()).unwrap().into_rows();
    assert_eq!(rows[0].name, "X");
    assert_eq!(rows[1].name, "Y");
}

#[test]
fn member_init_through_default() {
    #[derive(Debug, Default, PartialEq, rowbind::Record)]
    #[record(default)]
    struct Settings {
        key: String,
        value: Option<String>,
        version: i32,
    }

    let cursor = MemCursor::new(["key", "version"]).row([Value::from("theme"), Value::I32(2)]);

    let rows = Mapper::new().read::<Settings, _>(cursor).unwrap().into_rows();
    assert_eq!(
        rows,
        vec![Settings {
            key: "theme".into(),
            value: None,
            version: 2
        }]
    );
}

#[test]
fn widest_constructor_wins() {
    #[derive(Debug, Default, PartialEq, rowbind::Record)]
    #[record(constructor = Point::origin_at(x), constructor = Point::new(x, y))]
    struct Point {
        x: i64,
        y: i64,
        label: String,
    }

    impl Point {
        fn origin_at(x: i64) -> Point {
            Point {
                x,
                y: 0,
                label: "axis".into(),
            }
        }

        fn new(x: i64, y: i64) -> Point {
            Point {
                x,
                y,
                label: "plane".into(),
            }
        }
    }

    let cursor = || MemCursor::new(["x", "y"]).row([Value::I64(1), Value::I64(2)]);
    let mapper = Mapper::new();

    let rows = mapper.read::<Point, _>(cursor()).unwrap().into_rows();
    assert_eq!(rows[0], Point::new(1, 2));

    let plan = mapper
        .read_plan(
            &ReadOptions::<Point>::new()
                .constructor_filter(|constructor| constructor.name == "Point::origin_at"),
        )
        .unwrap();
    assert_eq!(plan.read(cursor()).unwrap().rows[0], Point::origin_at(1));
}

#[test]
fn capacity_hint_does_not_limit_rows() {
    let result = Mapper::new()
        .read_plan(&ReadOptions::<Score>::new().capacity_hint(1))
        .unwrap()
        .read(scores())
        .unwrap();

    assert_eq!(result.len(), 2);
}

#[test]
fn cursor_errors_propagate() {
    let cursor = MemCursor::new(["id", "name", "score"])
        .row([Value::I64(1), Value::from("x"), Value::Null])
        .error(rowbind::Error::from_args(format_args!("connection reset")));

    let err = Mapper::new().read::<Score, _>(cursor).unwrap_err();
    assert_eq!(err.to_string(), "connection reset");
}

#[test]
fn streaming_rows() {
    let plan = Mapper::new()
        .read_plan(&ReadOptions::<Score>::new().capture(SchemaCapture::Columns))
        .unwrap();

    let mut rows = plan.rows(scores());
    assert_eq!(rows.state(), State::NotStarted);
    assert!(rows.columns().is_empty());

    assert_eq!(rows.next().unwrap().unwrap(), score(1, "x", None));
    assert_eq!(rows.state(), State::Reading);
    assert_eq!(rows.columns().len(), 3);

    assert_eq!(rows.next().unwrap().unwrap(), score(2, "y", Some(5)));
    assert!(rows.next().is_none());
    assert_eq!(rows.state(), State::Done);
    assert!(rows.next().is_none());
}

#[test]
fn streaming_empty_cursor() {
    let plan = Mapper::new().read_plan(&ReadOptions::<Score>::new()).unwrap();

    let mut rows = plan.rows(MemCursor::new(["id", "name", "score"]));
    assert!(rows.next().is_none());
    assert_eq!(rows.state(), State::Empty);
}

#[test]
fn streaming_stops_after_an_error() {
    let plan = Mapper::new().read_plan(&ReadOptions::<Score>::new()).unwrap();

    let mut rows = plan.rows(MemCursor::new(["id"]).row([Value::I64(1)]));
    assert!(rows.next().unwrap().unwrap_err().is_column_not_found());
    assert_eq!(rows.state(), State::Done);
    assert!(rows.next().is_none());
}

#[test]
fn scalar() {
    let mapper = Mapper::new();

    let scalar = mapper
        .read_scalar::<i64, _>(MemCursor::new(["count"]).row([Value::I32(12)]))
        .unwrap();
    assert_eq!(scalar.value, Some(12));
    assert_eq!(scalar.column.unwrap().name, "count");

    let scalar = mapper
        .read_scalar::<String, _>(MemCursor::new(["name"]).row([Value::Null]))
        .unwrap();
    assert_eq!(scalar.value, None);

    let scalar = mapper
        .read_scalar::<i64, _>(MemCursor::new(["count"]))
        .unwrap();
    assert_eq!(scalar.into_value(), None);
}
