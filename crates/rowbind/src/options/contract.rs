use rowbind_core::stmt::Type;

/// An externally known set of columns or parameters a plan must line up
/// with, e.g. the declared parameters of a stored procedure.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Contract {
    entries: Vec<ContractEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContractEntry {
    pub name: String,
    pub ty: Type,
    pub nullable: bool,
}

impl Contract {
    pub fn new() -> Contract {
        Contract::default()
    }

    pub fn entry(mut self, name: impl Into<String>, ty: Type, nullable: bool) -> Contract {
        self.entries.push(ContractEntry {
            name: name.into(),
            ty,
            nullable,
        });
        self
    }

    pub fn entries(&self) -> &[ContractEntry] {
        &self.entries
    }

    /// Looks an entry up by name, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&ContractEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }
}
