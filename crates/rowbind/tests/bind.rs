use pretty_assertions::assert_eq;
use rowbind::{
    driver::{
        mem::{MemCursor, ParamList},
        Direction,
    },
    stmt::{Type, Value},
    BindOptions, Mapper, Selector,
};

#[derive(Debug, Default, Clone, PartialEq, rowbind::Record)]
struct Order {
    id: i64,
    customer: String,
    paid: bool,
    total: Option<f64>,
    reference: uuid::Uuid,
}

fn order() -> Order {
    Order {
        id: 41,
        customer: "acme".into(),
        paid: true,
        total: Some(12.5),
        reference: uuid::Uuid::new_v4(),
    }
}

#[test]
fn bind_then_read_round_trips() {
    let mapper = Mapper::new();

    for order in [order(), Order { total: None, ..order() }] {
        let mut params = ParamList::new();
        let bound = mapper.bind(&order, &mut params).unwrap();
        assert_eq!(bound, 5);

        let cursor = MemCursor::new(params.names()).row(params.values().into_iter().cloned());
        let rows = mapper.read::<Order, _>(cursor).unwrap().into_rows();

        assert_eq!(rows, vec![order]);
    }
}

#[test]
fn slots_are_tagged() {
    let mut params = ParamList::new();
    Mapper::new()
        .bind(&Order { total: None, ..order() }, &mut params)
        .unwrap();

    let total = params.get("total").unwrap();
    assert_eq!(total.value, Value::Null);
    assert_eq!(total.ty, Some(Type::F64));
    assert!(total.nullable);
    assert_eq!(total.direction, Direction::Input);

    let id = params.get("id").unwrap();
    assert_eq!(id.ty, Some(Type::I64));
    assert!(!id.nullable);
}

#[test]
fn pairs_follow_bind_order() {
    let plan = Mapper::new().bind_plan(&BindOptions::<Order>::new()).unwrap();
    let order = order();

    let names: Vec<_> = plan
        .pairs(&order)
        .into_iter()
        .map(|(name, _)| name)
        .collect();

    assert_eq!(names, ["id", "customer", "paid", "total", "reference"]);
}

#[test]
fn reduced_collection_binds_one_param_per_element() {
    #[derive(Debug, Default, rowbind::Record)]
    struct Lookup {
        tenant: String,
        #[reduce]
        ids: Vec<i64>,
    }

    let lookup = Lookup {
        tenant: "t".into(),
        ids: vec![4, 5, 6],
    };

    let mut params = ParamList::new();
    let bound = Mapper::new().bind(&lookup, &mut params).unwrap();

    assert_eq!(bound, 4);
    assert_eq!(params.names(), ["tenant", "ids1", "ids2", "ids3"]);
    assert_eq!(
        params.values(),
        [
            &Value::from("t"),
            &Value::I64(4),
            &Value::I64(5),
            &Value::I64(6)
        ]
    );
    assert_eq!(params[1].ty, Some(Type::I64));
}

#[test]
fn unreduced_collection_binds_one_list() {
    #[derive(Debug, Default, rowbind::Record)]
    struct Tags {
        tags: Vec<String>,
    }

    let mut params = ParamList::new();
    Mapper::new()
        .bind(
            &Tags {
                tags: vec!["a".into(), "b".into()],
            },
            &mut params,
        )
        .unwrap();

    assert_eq!(params.names(), ["tags"]);
    assert_eq!(params[0].value.as_list().map(<[Value]>::len), Some(2));
}

#[test]
fn reduce_through_options() {
    #[derive(Debug, Default, rowbind::Record)]
    struct Lookup {
        ids: Vec<u32>,
    }

    let plan = Mapper::new()
        .bind_plan(&BindOptions::<Lookup>::new().reduce("ids").name("ids", "id"))
        .unwrap();

    let mut params = ParamList::new();
    plan.bind(&Lookup { ids: vec![1, 2] }, &mut params).unwrap();

    assert_eq!(params.names(), ["id1", "id2"]);

    // An empty collection binds nothing.
    plan.bind(&Lookup { ids: vec![] }, &mut params).unwrap();
    assert!(params.is_empty());
}

#[test]
fn sink_slots_are_reused_and_trimmed() {
    #[derive(Debug, Default, rowbind::Record)]
    struct Note {
        id: i64,
        #[ignore_if_null]
        body: Option<String>,
        author: String,
    }

    let plan = Mapper::new().bind_plan(&BindOptions::<Note>::new()).unwrap();
    let mut params = ParamList::new();

    let full = Note {
        id: 1,
        body: Some("hello".into()),
        author: "ann".into(),
    };
    assert_eq!(plan.bind(&full, &mut params).unwrap(), 3);
    assert_eq!(params.names(), ["id", "body", "author"]);
    assert_eq!(params.created(), 3);

    let empty = Note {
        id: 2,
        body: None,
        author: "bob".into(),
    };
    assert_eq!(plan.bind(&empty, &mut params).unwrap(), 2);
    assert_eq!(params.names(), ["id", "author"]);
    assert_eq!(params.values(), [&Value::I64(2), &Value::from("bob")]);
    assert_eq!(params.created(), 3);

    assert_eq!(plan.bind(&full, &mut params).unwrap(), 3);
    assert_eq!(params.created(), 4);
}

#[test]
fn stale_slots_are_overwritten() {
    let mut params = ParamList::new();
    for _ in 0..8 {
        rowbind::driver::ParamSink::create_slot(&mut params);
    }

    Mapper::new().bind(&order(), &mut params).unwrap();

    assert_eq!(params.len(), 5);
    assert_eq!(params.created(), 8);
    assert_eq!(params.names(), ["id", "customer", "paid", "total", "reference"]);
}

#[test]
fn failed_bind_leaves_the_sink_untouched() {
    #[derive(Debug, Default, rowbind::Record)]
    struct Triple {
        a: i64,
        b: String,
        c: i64,
    }

    let plan = Mapper::new()
        .bind_plan(&BindOptions::<Triple>::new().selector(
            "b",
            Selector::new(Type::I64, |triple: &Triple| match triple.b.parse::<i64>() {
                Ok(b) => Value::I64(b),
                Err(_) => Value::from(triple.b.clone()),
            }),
        ))
        .unwrap();

    let mut params = ParamList::new();
    let first = Triple {
        a: 1,
        b: "5".into(),
        c: 3,
    };
    assert_eq!(plan.bind(&first, &mut params).unwrap(), 3);

    let second = Triple {
        a: 9,
        b: "y".into(),
        c: 8,
    };
    let err = plan.bind(&second, &mut params).unwrap_err();
    assert!(err.is_type_conversion());

    assert_eq!(params.names(), ["a", "b", "c"]);
    assert_eq!(
        params.values(),
        [&Value::I64(1), &Value::I64(5), &Value::I64(3)]
    );
    assert_eq!(params.created(), 3);
}

#[test]
fn positioned_members_bind_first() {
    #[derive(Debug, Default, rowbind::Record)]
    struct Call {
        note: String,
        #[position(1)]
        b: i64,
        #[position(0)]
        a: i64,
    }

    let mut params = ParamList::new();
    Mapper::new()
        .bind(
            &Call {
                note: "n".into(),
                b: 2,
                a: 1,
            },
            &mut params,
        )
        .unwrap();

    assert_eq!(params.names(), ["a", "b", "note"]);
}

#[test]
fn options_override_names_and_sources() {
    let plan = Mapper::new()
        .bind_plan(
            &BindOptions::<Order>::new()
                .name("customer", "who")
                .ignore("reference")
                .selector(
                    "total",
                    Selector::new(Type::I64, |order: &Order| {
                        Value::from(order.total.map(|total| total.round() as i64))
                    })
                    .nullable(),
                ),
        )
        .unwrap();

    let mut params = ParamList::new();
    plan.bind(&order(), &mut params).unwrap();

    assert_eq!(params.names(), ["id", "who", "paid", "total"]);
    assert_eq!(params.get("total").unwrap().value, Value::I64(13));
}

#[test]
fn ignore_when_null_option() {
    let plan = Mapper::new()
        .bind_plan(&BindOptions::<Order>::new().ignore_when_null("total"))
        .unwrap();

    let mut params = ParamList::new();
    plan.bind(&Order { total: None, ..order() }, &mut params)
        .unwrap();

    assert!(params.get("total").is_none());
    assert_eq!(params.len(), 4);
}
