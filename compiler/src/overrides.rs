use std::collections::HashMap;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::{error::GenError, events::Event};

/// Changes to one parameter of an event. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ParamPatch {
    pub param:        String,
    #[serde(default, rename = "type")]
    pub type_:        Option<String>,
    #[serde(default)]
    pub description:  Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl ParamPatch {
    pub fn new(param: impl Into<String>) -> Self {
        ParamPatch {
            param: param.into(),
            ..Default::default()
        }
    }

    pub fn retype(mut self, type_: impl Into<String>) -> Self {
        self.type_ = Some(type_.into());
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn rename(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OverrideRule {
    pub event:   String,
    #[serde(default)]
    pub patches: Vec<ParamPatch>,
}

impl OverrideRule {
    pub fn new(event: impl Into<String>, patches: Vec<ParamPatch>) -> Self {
        OverrideRule {
            event: event.into(),
            patches,
        }
    }

    /// Return `event` with every patch applied.
    pub fn apply(&self, mut event: Event) -> Result<Event, GenError> {
        for patch in &self.patches {
            let param = event.param_mut(&patch.param).ok_or_else(|| GenError::UnknownParameter {
                event: self.event.clone(),
                param: patch.param.clone(),
            })?;
            if let Some(type_) = &patch.type_ {
                param.type_ = type_.clone();
            }
            if let Some(description) = &patch.description {
                param.description = description.clone();
            }
            if let Some(display_name) = &patch.display_name {
                param.override_name = Some(display_name.clone());
            }
        }
        Ok(event)
    }
}

/// Override rules keyed by full event name (`eventSummoningEnd`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideTable {
    rules: HashMap<String, OverrideRule>,
}

impl OverrideTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rules for the events whose LuaHelp types are too coarse.
    pub fn builtin() -> Self {
        Self::empty().with_rules([
            OverrideRule::new(
                "eventSummoningEnd",
                vec![ParamPatch::new("objectDescription").retype("tfm.ShamanObject")],
            ),
            OverrideRule::new(
                "eventContactListener",
                vec![ParamPatch::new("contactInfos").retype("tfm.ContactDef")],
            ),
        ])
    }

    /// Add rules. A rule for an event already in the table replaces it.
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = OverrideRule>) -> Self {
        for rule in rules {
            if self.rules.contains_key(&rule.event) {
                warn!(event = %rule.event, "replacing existing override rule");
            }
            self.rules.insert(rule.event.clone(), rule);
        }
        self
    }

    pub fn get(&self, event: &str) -> Option<&OverrideRule> {
        self.rules.get(event)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply the matching rule, if any.
    pub fn apply(&self, event: Event) -> Result<Event, GenError> {
        match self.rules.get(&event.name) {
            Some(rule) => {
                debug!(event = %event.name, patches = rule.patches.len(), "applying override");
                rule.apply(event)
            }
            None => Ok(event),
        }
    }
}
