use super::{resolve::Resolved, Compiler, Context};
use crate::{
    options::{BindOptions, NullHandling, ReadOptions},
    plan::{FieldDescriptor, ParamDescriptor, Source, Target},
    schema::{Attrs, Shape},
};

use rowbind_core::{nullability::MemberRef, stmt::Type, Diagnostic};

/// A constructor parameter or member, as far as descriptors care.
struct Slot<'a> {
    name: &'static str,
    ty: &'a Type,
    nullable: bool,
    attrs: &'a Attrs,
}

/// One read descriptor per resolved constructor parameter or member.
pub(crate) fn fields<T>(
    cx: &Context<'_>,
    compiler: &mut Compiler,
    shape: &Shape<T>,
    resolved: &Resolved<'_, T>,
    options: &ReadOptions<T>,
    always_test_null: bool,
) -> Vec<FieldDescriptor> {
    let slots: Vec<(Target, Slot<'_>)> = match resolved {
        Resolved::Construct(constructor) => constructor
            .params
            .iter()
            .enumerate()
            .map(|(index, param)| {
                let slot = Slot {
                    name: param.name,
                    ty: &param.ty,
                    nullable: param.nullable,
                    attrs: &param.attrs,
                };
                (Target::Arg(index), slot)
            })
            .collect(),
        Resolved::Init { members, .. } => members
            .iter()
            .map(|&index| {
                let member = &shape.members[index];
                let slot = Slot {
                    name: member.name,
                    ty: &member.ty,
                    nullable: member.nullable,
                    attrs: &member.attrs,
                };
                (Target::Member(index), slot)
            })
            .collect(),
    };

    let fields = slots
        .into_iter()
        .map(|(target, slot)| {
            let field = options.fields.get(slot.name);
            let nullable = resolve_nullable(cx, shape.name, slot.name, slot.nullable);
            let mapping = field.and_then(|field| field.mapping.clone());

            if let Some(mapping) = &mapping {
                if !slot.ty.is_assignable_from(mapping.ty()) {
                    compiler.report(Diagnostic::MappingNotAssignable {
                        member: slot.name.to_string(),
                        member_ty: slot.ty.clone(),
                        mapping_ty: mapping.ty().clone(),
                    });
                }
            }

            let test_null = match field.and_then(|field| field.null_handling) {
                Some(NullHandling::Test) => true,
                Some(NullHandling::Assume) => false,
                None => nullable || always_test_null,
            };

            FieldDescriptor {
                name: slot.name.to_string(),
                target,
                ty: slot.ty.clone(),
                nullable,
                ignore: field
                    .and_then(|field| field.ignore)
                    .unwrap_or(slot.attrs.ignore),
                test_null,
                mapping,
                column: field
                    .and_then(|field| field.column.clone())
                    .or_else(|| slot.attrs.column.map(str::to_string))
                    .unwrap_or_else(|| slot.name.to_string()),
            }
        })
        .collect();

    for name in options.fields.keys() {
        let known = shape.member(name).is_some()
            || shape
                .constructors
                .iter()
                .any(|constructor| constructor.params.iter().any(|param| param.name == name));

        if !known {
            compiler.report(Diagnostic::UnknownMember { name: name.clone() });
        }
    }

    fields
}

/// One bind descriptor per bound member; ignored members get none.
pub(crate) fn params<T>(
    cx: &Context<'_>,
    compiler: &mut Compiler,
    shape: &Shape<T>,
    members: &[usize],
    options: &BindOptions<T>,
) -> Vec<ParamDescriptor<T>> {
    let mut params = vec![];

    for &index in members {
        let member = &shape.members[index];
        let param = options.params.get(member.name);

        if param
            .and_then(|param| param.ignore)
            .unwrap_or(member.attrs.ignore)
        {
            continue;
        }

        let (source, ty, nullable) = match param.and_then(|param| param.selector.clone()) {
            Some(selector) => {
                let ty = selector.ty().clone();
                let nullable = selector.is_nullable();
                (Source::Selector(selector), ty, nullable)
            }
            None => {
                let Some(get) = member.get else { continue };
                let nullable = resolve_nullable(cx, shape.name, member.name, member.nullable);
                (Source::Member(get), member.ty.clone(), nullable)
            }
        };

        let reduce = param
            .and_then(|param| param.reduce)
            .unwrap_or(member.attrs.reduce)
            && ty.is_list();

        params.push(ParamDescriptor {
            name: param
                .and_then(|param| param.name.clone())
                .or_else(|| member.attrs.column.map(str::to_string))
                .unwrap_or_else(|| member.name.to_string()),
            member: member.name,
            source,
            ty,
            nullable,
            ignore_when_null: param
                .and_then(|param| param.ignore_when_null)
                .unwrap_or(member.attrs.ignore_if_null),
            reduce,
            position: param
                .and_then(|param| param.position)
                .or(member.attrs.position),
        });
    }

    for name in options.params.keys() {
        if shape.member(name).is_none() {
            compiler.report(Diagnostic::UnknownMember { name: name.clone() });
        }
    }

    params
}

fn resolve_nullable(cx: &Context<'_>, record: &str, member: &str, reflected: bool) -> bool {
    cx.nullability
        .is_nullable(&MemberRef { record, member })
        .unwrap_or(reflected)
}
