use super::{Mapper, Settings};
use crate::{options::SchemaCapture, toolbox::Toolbox};

use rowbind_core::{
    driver::{convert::Standard, Family},
    nullability::Reflected,
    NullabilitySource,
};

use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Builder {
    family: Option<Arc<dyn Family>>,
    nullability: Option<Arc<dyn NullabilitySource>>,
    settings: Settings,
}

impl Builder {
    /// The driver family whose conversion table plans use. Defaults to the
    /// standard table.
    pub fn family(&mut self, family: impl Family) -> &mut Self {
        self.family = Some(Arc::new(family));
        self
    }

    /// Where member nullability comes from. Defaults to the shape itself.
    pub fn nullability(&mut self, nullability: impl NullabilitySource + 'static) -> &mut Self {
        self.nullability = Some(Arc::new(nullability));
        self
    }

    pub fn settings(&mut self, settings: Settings) -> &mut Self {
        self.settings = settings;
        self
    }

    pub fn always_test_null(&mut self, always_test_null: bool) -> &mut Self {
        self.settings.always_test_null = always_test_null;
        self
    }

    pub fn capture(&mut self, capture: SchemaCapture) -> &mut Self {
        self.settings.capture = capture;
        self
    }

    pub fn cache_plans(&mut self, cache_plans: bool) -> &mut Self {
        self.settings.cache_plans = cache_plans;
        self
    }

    pub fn build(&self) -> Mapper {
        let toolbox = match &self.family {
            Some(family) => Toolbox::for_family(&**family),
            None => Toolbox::for_family(&Standard),
        };

        Mapper {
            toolbox,
            nullability: self
                .nullability
                .clone()
                .unwrap_or_else(|| Arc::new(Reflected)),
            settings: self.settings.clone(),
            plans: Default::default(),
        }
    }
}
