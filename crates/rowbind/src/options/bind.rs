use super::{Contract, OptionsKey, Selector};

use indexmap::IndexMap;

/// Overrides for a single bound member.
pub struct ParamOverride<T> {
    /// Parameter name.
    pub name: Option<String>,

    pub ignore: Option<bool>,

    pub ignore_when_null: Option<bool>,

    /// Source of the value in place of the member getter.
    pub selector: Option<Selector<T>>,

    pub reduce: Option<bool>,

    pub position: Option<usize>,
}

impl<T> Default for ParamOverride<T> {
    fn default() -> Self {
        ParamOverride {
            name: None,
            ignore: None,
            ignore_when_null: None,
            selector: None,
            reduce: None,
            position: None,
        }
    }
}

impl<T> Clone for ParamOverride<T> {
    fn clone(&self) -> Self {
        ParamOverride {
            name: self.name.clone(),
            ignore: self.ignore,
            ignore_when_null: self.ignore_when_null,
            selector: self.selector.clone(),
            reduce: self.reduce,
            position: self.position,
        }
    }
}

impl<T> core::fmt::Debug for ParamOverride<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParamOverride")
            .field("name", &self.name)
            .field("ignore", &self.ignore)
            .field("ignore_when_null", &self.ignore_when_null)
            .field("selector", &self.selector)
            .field("reduce", &self.reduce)
            .field("position", &self.position)
            .finish()
    }
}

/// Options for compiling a bind plan for `T`.
pub struct BindOptions<T> {
    pub(crate) params: IndexMap<String, ParamOverride<T>>,
    pub(crate) contract: Option<Contract>,
    pub(crate) positional: bool,
}

impl<T> BindOptions<T> {
    pub fn new() -> BindOptions<T> {
        BindOptions {
            params: IndexMap::new(),
            contract: None,
            positional: false,
        }
    }

    /// Binds `member` as the parameter `name`.
    pub fn name(mut self, member: &str, name: impl Into<String>) -> Self {
        self.param_mut(member).name = Some(name.into());
        self
    }

    pub fn ignore(mut self, member: &str) -> Self {
        self.param_mut(member).ignore = Some(true);
        self
    }

    /// Skips the parameter entirely when the member is null.
    pub fn ignore_when_null(mut self, member: &str) -> Self {
        self.param_mut(member).ignore_when_null = Some(true);
        self
    }

    /// Binds the value `selector` produces under the name of `member`.
    pub fn selector(mut self, member: &str, selector: Selector<T>) -> Self {
        self.param_mut(member).selector = Some(selector);
        self
    }

    /// Binds each element of the collection in `member` as its own
    /// parameter, named `{name}1..{name}N`.
    pub fn reduce(mut self, member: &str) -> Self {
        self.param_mut(member).reduce = Some(true);
        self
    }

    pub fn position(mut self, member: &str, position: usize) -> Self {
        self.param_mut(member).position = Some(position);
        self
    }

    /// Replaces every override of `member`.
    pub fn param(mut self, member: &str, param: ParamOverride<T>) -> Self {
        self.params.insert(member.to_string(), param);
        self
    }

    /// The parameters the statement is known to declare.
    pub fn contract(mut self, contract: Contract) -> Self {
        self.contract = Some(contract);
        self
    }

    /// The sink addresses parameters by position only. Positional sinks
    /// cannot take reduced collections.
    pub fn positional(mut self, positional: bool) -> Self {
        self.positional = positional;
        self
    }

    fn param_mut(&mut self, member: &str) -> &mut ParamOverride<T> {
        self.params.entry(member.to_string()).or_default()
    }
}

impl<T: 'static> BindOptions<T> {
    pub(crate) fn key(&self) -> OptionsKey {
        let mut key = OptionsKey::new("bind");

        for (member, param) in &self.params {
            key.push_str(member);
            key.push_opt_str(param.name.as_deref());
            key.push_opt_flag(param.ignore);
            key.push_opt_flag(param.ignore_when_null);
            key.push_opt_fn(param.selector.as_ref().map(Selector::identity));
            key.push_opt_flag(param.reduce);
            key.push_opt_tag(param.position);
        }

        key.push_contract(self.contract.as_ref());
        key.push_opt_flag(Some(self.positional));
        key
    }
}

impl<T> Default for BindOptions<T> {
    fn default() -> Self {
        BindOptions::new()
    }
}

impl<T> Clone for BindOptions<T> {
    fn clone(&self) -> Self {
        BindOptions {
            params: self.params.clone(),
            contract: self.contract.clone(),
            positional: self.positional,
        }
    }
}

impl<T> core::fmt::Debug for BindOptions<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BindOptions")
            .field("params", &self.params)
            .field("contract", &self.contract)
            .field("positional", &self.positional)
            .finish()
    }
}
