use crate::{
    options::{BindOptions, ConstructorFilter},
    schema::{Constructor, Member, MemberKind, Shape},
};

/// How a read plan creates instances.
pub(crate) enum Resolved<'s, T> {
    /// Through the constructor with the most parameters.
    Construct(&'s Constructor<T>),

    /// Through the instance factory, then member by member. `members`
    /// indexes [`Shape::members`].
    Init {
        factory: &'s Constructor<T>,
        members: Vec<usize>,
    },
}

/// Picks how rows are turned into instances.
///
/// The constructor with the most parameters wins, the earlier one on ties.
/// Without one, the instance factory and every settable member are used.
/// Returns `None` if neither path is available.
pub(crate) fn read<'s, T>(
    shape: &'s Shape<T>,
    filter: Option<&ConstructorFilter<T>>,
) -> Option<Resolved<'s, T>> {
    let allowed = |constructor: &Constructor<T>| filter.map_or(true, |f| f.allows(constructor));

    let mut best: Option<&Constructor<T>> = None;

    for constructor in &shape.constructors {
        if constructor.is_factory()
            || !allowed(constructor)
            || constructor.params.iter().any(|param| param.name.is_empty())
        {
            continue;
        }

        if best.map_or(true, |best| constructor.params.len() > best.params.len()) {
            best = Some(constructor);
        }
    }

    if let Some(constructor) = best {
        return Some(Resolved::Construct(constructor));
    }

    let factory = shape
        .constructors
        .iter()
        .find(|constructor| constructor.is_factory() && allowed(constructor))?;

    let members = discover(shape, Member::is_settable);

    if members.is_empty() {
        return None;
    }

    Some(Resolved::Init { factory, members })
}

/// Members a bind plan reads values from: every readable member, plus any
/// member whose value comes from a selector.
pub(crate) fn bind<T>(shape: &Shape<T>, options: &BindOptions<T>) -> Vec<usize> {
    discover(shape, |member| {
        member.is_readable()
            || options
                .params
                .get(member.name)
                .is_some_and(|param| param.selector.is_some())
    })
}

/// Indices of the usable members. A property backed by a usable field is
/// skipped so the value is only read or written once.
fn discover<T>(shape: &Shape<T>, usable: impl Fn(&Member<T>) -> bool) -> Vec<usize> {
    shape
        .members
        .iter()
        .enumerate()
        .filter(|(_, member)| usable(member))
        .filter(|(_, member)| match member.kind {
            MemberKind::Property {
                backing_field: Some(field),
            } => !shape
                .members
                .iter()
                .any(|other| other.is_field() && other.name == field && usable(other)),
            _ => true,
        })
        .map(|(index, _)| index)
        .collect()
}
