//! Where the compiler learns whether a member may hold an absent value.

use std::{collections::HashMap, fmt::Debug};

/// Identifies a member or constructor parameter of a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberRef<'a> {
    /// Name of the record type.
    pub record: &'a str,

    /// Name of the member or parameter.
    pub member: &'a str,
}

/// Answers whether a member may be absent.
///
/// `None` defers to the nullability recorded on the shape itself (an
/// `Option<T>` member is nullable, everything else is not).
pub trait NullabilitySource: Debug + Send + Sync {
    fn is_nullable(&self, member: &MemberRef<'_>) -> Option<bool>;
}

/// Defers to the reflected shape for every member.
#[derive(Debug, Default, Clone, Copy)]
pub struct Reflected;

impl NullabilitySource for Reflected {
    fn is_nullable(&self, _member: &MemberRef<'_>) -> Option<bool> {
        None
    }
}

/// Explicit answers for individual members; everything else defers.
#[derive(Debug, Default, Clone)]
pub struct Rules {
    /// Record name to member name to nullability.
    rules: HashMap<String, HashMap<String, bool>>,
}

impl Rules {
    pub fn new() -> Rules {
        Rules::default()
    }

    pub fn nullable(self, record: &str, member: &str) -> Rules {
        self.rule(record, member, true)
    }

    pub fn required(self, record: &str, member: &str) -> Rules {
        self.rule(record, member, false)
    }

    fn rule(mut self, record: &str, member: &str, nullable: bool) -> Rules {
        self.rules
            .entry(record.to_string())
            .or_default()
            .insert(member.to_string(), nullable);
        self
    }
}

impl NullabilitySource for Rules {
    fn is_nullable(&self, member: &MemberRef<'_>) -> Option<bool> {
        self.rules
            .get(member.record)?
            .get(member.member)
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_answer_only_for_listed_members() {
        let rules = Rules::new()
            .nullable("User", "email")
            .required("User", "name");

        let lookup = |member| {
            rules.is_nullable(&MemberRef {
                record: "User",
                member,
            })
        };

        assert_eq!(lookup("email"), Some(true));
        assert_eq!(lookup("name"), Some(false));
        assert_eq!(lookup("id"), None);
        assert_eq!(
            rules.is_nullable(&MemberRef {
                record: "Order",
                member: "email"
            }),
            None
        );
        assert_eq!(
            Reflected.is_nullable(&MemberRef {
                record: "User",
                member: "email"
            }),
            None
        );
    }
}
