use rowbind_core::stmt::{Type, Value};

#[test]
fn null_is_a_every_type() {
    for ty in [Type::Bool, Type::String, Type::I64, Type::Uuid, Type::Bytes] {
        assert!(Value::Null.is_a(&ty), "{ty:?}");
    }
}

#[test]
fn everything_is_a_unknown() {
    assert!(Value::I8(1).is_a(&Type::Unknown));
    assert!(Value::from("x").is_a(&Type::Unknown));
}

#[test]
fn integers_are_exact() {
    assert!(Value::I32(1).is_a(&Type::I32));
    assert!(!Value::I32(1).is_a(&Type::I64));
}

#[test]
fn list_checks_elements() {
    let list = Value::List(vec![Value::I64(1), Value::Null, Value::I64(3)]);
    assert!(list.is_a(&Type::list(Type::I64)));
    assert!(!list.is_a(&Type::list(Type::String)));
}

#[test]
fn infer_list_skips_leading_nulls() {
    let list = Value::List(vec![Value::Null, Value::from("a")]);
    assert_eq!(list.infer_ty(), Type::list(Type::String));
    assert_eq!(Value::List(vec![]).infer_ty(), Type::list(Type::Unknown));
}

#[test]
fn option_into_value() {
    assert_eq!(Value::from(None::<i64>), Value::Null);
    assert_eq!(Value::from(Some(4i64)), Value::I64(4));
}
