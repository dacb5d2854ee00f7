use pretty_assertions::assert_eq;
use rowbind::{
    driver::mem::{MemCursor, ParamList},
    schema::{Attrs, Constructor, Member, MemberKind, Shape},
    stmt::{Type, Value},
    BindOptions, Mapper, ReadOptions, Record, Result,
};

/// Exposes its balance both as stored cents and as a computed amount.
#[derive(Debug, Default, PartialEq)]
struct Account {
    balance_cents: i64,
    owner: String,
}

fn set_cents(account: &mut Account, value: Value) -> Result<()> {
    account.balance_cents = value.try_into()?;
    Ok(())
}

fn get_cents(account: &Account) -> Value {
    Value::I64(account.balance_cents)
}

fn set_balance(account: &mut Account, value: Value) -> Result<()> {
    let balance: f64 = value.try_into()?;
    account.balance_cents = (balance * 100.0).round() as i64;
    Ok(())
}

fn get_balance(account: &Account) -> Value {
    Value::F64(account.balance_cents as f64 / 100.0)
}

fn set_owner(account: &mut Account, value: Value) -> Result<()> {
    account.owner = value.try_into()?;
    Ok(())
}

fn get_owner(account: &Account) -> Value {
    Value::from(&account.owner[..])
}

fn get_display(account: &Account) -> Value {
    Value::from(format!("{}: {}", account.owner, account.balance_cents))
}

fn member(
    name: &'static str,
    ty: Type,
    kind: MemberKind,
    set: Option<fn(&mut Account, Value) -> Result<()>>,
    get: Option<fn(&Account) -> Value>,
) -> Member<Account> {
    Member {
        name,
        ty,
        nullable: false,
        kind,
        set,
        get,
        attrs: Attrs::default(),
    }
}

impl Record for Account {
    fn shape() -> Shape<Account> {
        Shape {
            name: "Account",
            constructors: vec![Constructor {
                name: "default",
                params: vec![],
                invoke: |_| Ok(Account::default()),
            }],
            members: vec![
                member(
                    "balance_cents",
                    Type::I64,
                    MemberKind::Field,
                    Some(set_cents),
                    Some(get_cents),
                ),
                member(
                    "balance",
                    Type::F64,
                    MemberKind::Property {
                        backing_field: Some("balance_cents"),
                    },
                    Some(set_balance),
                    Some(get_balance),
                ),
                member(
                    "owner",
                    Type::String,
                    MemberKind::Field,
                    Some(set_owner),
                    Some(get_owner),
                ),
                member(
                    "display",
                    Type::String,
                    MemberKind::Property {
                        backing_field: None,
                    },
                    None,
                    Some(get_display),
                ),
            ],
        }
    }
}

#[test]
fn backed_properties_are_skipped() {
    let mapper = Mapper::new();

    let read = mapper.read_plan(&ReadOptions::<Account>::new()).unwrap();
    let names: Vec<_> = read.describe().iter().map(|field| &field.name[..]).collect();
    assert_eq!(names, ["balance_cents", "owner"]);

    let bind = mapper.bind_plan(&BindOptions::<Account>::new()).unwrap();
    let names: Vec<_> = bind.describe().iter().map(|param| &param.name[..]).collect();
    assert_eq!(names, ["balance_cents", "owner", "display"]);
}

#[test]
fn member_init_sets_each_member() {
    let cursor = MemCursor::new(["owner", "balance_cents", "display"]).row([
        Value::from("kim"),
        Value::I64(1250),
        Value::from("ignored"),
    ]);

    let rows = Mapper::new().read::<Account, _>(cursor).unwrap().into_rows();
    assert_eq!(
        rows,
        vec![Account {
            balance_cents: 1250,
            owner: "kim".into()
        }]
    );
}

#[test]
fn read_only_members_are_bound() {
    let account = Account {
        balance_cents: 5,
        owner: "lee".into(),
    };

    let mut params = ParamList::new();
    Mapper::new().bind(&account, &mut params).unwrap();

    assert_eq!(
        params.get("display").map(|param| &param.value),
        Some(&Value::from("lee: 5"))
    );
}

#[test]
fn shape_without_a_way_in() {
    struct Opaque;

    impl Record for Opaque {
        fn shape() -> Shape<Opaque> {
            Shape {
                name: "Opaque",
                constructors: vec![],
                members: vec![],
            }
        }
    }

    let mapper = Mapper::new();

    let err = mapper.read_plan(&ReadOptions::<Opaque>::new()).unwrap_err();
    assert_eq!(err.diagnostics(), [rowbind::Diagnostic::NoUsableShape]);

    let err = mapper.bind_plan(&BindOptions::<Opaque>::new()).unwrap_err();
    assert_eq!(err.diagnostics(), [rowbind::Diagnostic::NoUsableShape]);
}
