use super::Compiler;
use crate::{
    options::{BindOptions, Contract},
    plan::{FieldDescriptor, ParamDescriptor},
};

use indexmap::IndexMap;
use rowbind_core::Diagnostic;

pub(crate) fn fields(compiler: &mut Compiler, fields: &[FieldDescriptor], contract: Option<&Contract>) {
    let read = || fields.iter().filter(|field| !field.ignore);

    duplicates(
        compiler,
        read().map(|field| (field.column.as_str(), field.name.as_str())),
    );

    let Some(contract) = contract else { return };
    let mut covered = vec![false; contract.entries().len()];

    for field in read() {
        let Some(index) = lookup(contract, &field.column) else {
            compiler.report(Diagnostic::MissingFromContract {
                name: field.column.clone(),
            });
            continue;
        };

        covered[index] = true;
        let entry = &contract.entries()[index];

        // A custom mapping reads the raw column itself.
        if field.mapping.is_none() && !field.ty.is_assignable_from(&entry.ty) {
            compiler.report(Diagnostic::ContractTypeMismatch {
                name: field.column.clone(),
                expected: entry.ty.clone(),
                actual: field.ty.clone(),
            });
        }

        if entry.nullable && !field.nullable && !field.test_null {
            compiler.report(Diagnostic::ContractNullability {
                name: field.column.clone(),
            });
        }
    }

    not_covered(compiler, contract, &covered);
}

pub(crate) fn params<T>(
    compiler: &mut Compiler,
    params: &[ParamDescriptor<T>],
    options: &BindOptions<T>,
) {
    duplicates(
        compiler,
        params.iter().map(|param| (param.name.as_str(), param.member)),
    );

    for param in params {
        let member = || param.member.to_string();

        if param.ignore_when_null && !param.nullable {
            compiler.report(Diagnostic::IgnoreWhenNullNotNullable { member: member() });
        }

        if param.reduce && (param.position.is_some() || options.positional) {
            compiler.report(Diagnostic::PositionOnReducible { member: member() });
        }

        if param.ignore_when_null && (param.position.is_some() || options.positional) {
            compiler.report(Diagnostic::PositionOnIgnoreWhenNull { member: member() });
        }
    }

    positions(compiler, params);

    if let Some(contract) = &options.contract {
        param_contract(compiler, params, contract);
    }
}

/// Reports every name claimed by more than one descriptor, ignoring ASCII
/// case. Items are `(name, member)`.
fn duplicates<'a>(compiler: &mut Compiler, names: impl Iterator<Item = (&'a str, &'a str)>) {
    let mut seen: IndexMap<String, (&str, Vec<String>)> = IndexMap::new();

    for (name, member) in names {
        seen.entry(name.to_ascii_lowercase())
            .or_insert_with(|| (name, vec![]))
            .1
            .push(member.to_string());
    }

    for (name, members) in seen.into_values() {
        if members.len() > 1 {
            compiler.report(Diagnostic::DuplicateName {
                name: name.to_string(),
                members,
            });
        }
    }
}

/// Explicit positions, in order, must be exactly `0, 1, 2, ...`.
fn positions<T>(compiler: &mut Compiler, params: &[ParamDescriptor<T>]) {
    let mut positioned: Vec<(usize, &str)> = params
        .iter()
        .filter_map(|param| Some((param.position?, param.member)))
        .collect();

    positioned.sort_by_key(|(position, _)| *position);

    let mut expected = 0;

    for group in positioned.chunk_by(|a, b| a.0 == b.0) {
        let (position, member) = group[0];

        if group.len() > 1 {
            compiler.report(Diagnostic::PositionConflict {
                position,
                members: group.iter().map(|(_, member)| member.to_string()).collect(),
            });
        }

        if position != expected {
            compiler.report(Diagnostic::PositionGap {
                member: member.to_string(),
                expected,
                found: position,
            });
        }

        expected = position + 1;
    }
}

/// Values flow from the descriptors into the contract's parameters.
fn param_contract<T>(compiler: &mut Compiler, params: &[ParamDescriptor<T>], contract: &Contract) {
    let mut covered = vec![false; contract.entries().len()];

    for param in params {
        if param.reduce {
            // Arity is only known at bind time; cover every `{name}N` entry.
            let element = param.ty.element().unwrap_or(&param.ty);

            for (index, entry) in contract.entries().iter().enumerate() {
                if !is_reduced_name(&entry.name, &param.name) {
                    continue;
                }

                covered[index] = true;

                if !entry.ty.is_assignable_from(element) {
                    compiler.report(Diagnostic::ContractTypeMismatch {
                        name: entry.name.clone(),
                        expected: entry.ty.clone(),
                        actual: element.clone(),
                    });
                }
            }

            continue;
        }

        let Some(index) = lookup(contract, &param.name) else {
            compiler.report(Diagnostic::MissingFromContract {
                name: param.name.clone(),
            });
            continue;
        };

        covered[index] = true;
        let entry = &contract.entries()[index];

        if !entry.ty.is_assignable_from(&param.ty) {
            compiler.report(Diagnostic::ContractTypeMismatch {
                name: param.name.clone(),
                expected: entry.ty.clone(),
                actual: param.ty.clone(),
            });
        }

        if param.nullable && !param.ignore_when_null && !entry.nullable {
            compiler.report(Diagnostic::ContractNullability {
                name: param.name.clone(),
            });
        }
    }

    not_covered(compiler, contract, &covered);
}

fn lookup(contract: &Contract, name: &str) -> Option<usize> {
    contract
        .entries()
        .iter()
        .position(|entry| entry.name.eq_ignore_ascii_case(name))
}

fn not_covered(compiler: &mut Compiler, contract: &Contract, covered: &[bool]) {
    for (entry, covered) in contract.entries().iter().zip(covered) {
        if !covered {
            compiler.report(Diagnostic::NotCovered {
                name: entry.name.clone(),
            });
        }
    }
}

/// `name` followed by one or more digits, ignoring ASCII case.
fn is_reduced_name(entry: &str, name: &str) -> bool {
    entry.len() > name.len()
        && entry.is_char_boundary(name.len())
        && entry[..name.len()].eq_ignore_ascii_case(name)
        && entry[name.len()..].bytes().all(|b| b.is_ascii_digit())
}
