use super::Contract;

use by_address::ByAddress;
use std::{any::Any, sync::Arc};

/// Fingerprint of an option set.
///
/// Closures are compared by address. The key keeps them alive, so an
/// address is never reused while a plan compiled from it is cached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct OptionsKey {
    parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Part {
    Kind(&'static str),
    Str(Option<String>),
    Flag(Option<bool>),
    Tag(Option<usize>),
    Fn(Option<ByAddress<Arc<dyn Any + Send + Sync>>>),
    Contract(Option<Contract>),
}

impl OptionsKey {
    pub(crate) fn new(kind: &'static str) -> OptionsKey {
        OptionsKey {
            parts: vec![Part::Kind(kind)],
        }
    }

    pub(crate) fn push_str(&mut self, value: &str) {
        self.parts.push(Part::Str(Some(value.to_string())));
    }

    pub(crate) fn push_opt_str(&mut self, value: Option<&str>) {
        self.parts.push(Part::Str(value.map(str::to_string)));
    }

    pub(crate) fn push_opt_flag(&mut self, value: Option<bool>) {
        self.parts.push(Part::Flag(value));
    }

    pub(crate) fn push_opt_tag(&mut self, value: Option<usize>) {
        self.parts.push(Part::Tag(value));
    }

    pub(crate) fn push_opt_fn(&mut self, value: Option<Arc<dyn Any + Send + Sync>>) {
        self.parts.push(Part::Fn(value.map(ByAddress)));
    }

    pub(crate) fn push_contract(&mut self, value: Option<&Contract>) {
        self.parts.push(Part::Contract(value.cloned()));
    }
}
