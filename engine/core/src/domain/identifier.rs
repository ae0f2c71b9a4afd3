// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of metamodel feature an [`Identifier`] names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    Object,
    Property,
    Collection,
    Action,
    ActionParameter,
}

impl FeatureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Property => "property",
            Self::Collection => "collection",
            Self::Action => "action",
            Self::ActionParameter => "action_parameter",
        }
    }
}

/// Stable name of a feature under interaction, e.g. `Customer#placeOrder[1]`.
///
/// `member_name` is empty for object-level identifiers. `parameter_index` is
/// only set for [`FeatureType::ActionParameter`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    pub logical_type_name: String,
    pub member_name: String,
    pub feature_type: FeatureType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_index: Option<usize>,
}

impl Identifier {
    fn new(logical_type_name: &str, member_name: &str, feature_type: FeatureType) -> Self {
        Self {
            logical_type_name: logical_type_name.to_string(),
            member_name: member_name.to_string(),
            feature_type,
            parameter_index: None,
        }
    }

    pub fn object(logical_type_name: &str) -> Self {
        Self::new(logical_type_name, "", FeatureType::Object)
    }

    pub fn property(logical_type_name: &str, member_name: &str) -> Self {
        Self::new(logical_type_name, member_name, FeatureType::Property)
    }

    pub fn collection(logical_type_name: &str, member_name: &str) -> Self {
        Self::new(logical_type_name, member_name, FeatureType::Collection)
    }

    pub fn action(logical_type_name: &str, member_name: &str) -> Self {
        Self::new(logical_type_name, member_name, FeatureType::Action)
    }

    /// Identifier of the parameter at `index` of the given action.
    pub fn parameter(action: &Identifier, index: usize) -> Self {
        Self {
            logical_type_name: action.logical_type_name.clone(),
            member_name: action.member_name.clone(),
            feature_type: FeatureType::ActionParameter,
            parameter_index: Some(index),
        }
    }

    /// For a parameter identifier, the identifier of its owning action.
    pub fn action_identifier(&self) -> Option<Identifier> {
        match self.feature_type {
            FeatureType::ActionParameter => Some(Self::action(&self.logical_type_name, &self.member_name)),
            _ => None,
        }
    }

    pub fn is_object(&self) -> bool {
        self.feature_type == FeatureType::Object
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.logical_type_name)?;
        if !self.member_name.is_empty() {
            write!(f, "#{}", self.member_name)?;
        }
        if let Some(index) = self.parameter_index {
            write!(f, "[{}]", index)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_display() {
        assert_eq!(Identifier::object("Customer").to_string(), "Customer");
        assert_eq!(Identifier::property("Customer", "email").to_string(), "Customer#email");
        let action = Identifier::action("Customer", "placeOrder");
        assert_eq!(Identifier::parameter(&action, 1).to_string(), "Customer#placeOrder[1]");
    }

    #[test]
    fn test_parameter_resolves_owning_action() {
        let action = Identifier::action("Customer", "placeOrder");
        let param = Identifier::parameter(&action, 0);
        assert_eq!(param.feature_type, FeatureType::ActionParameter);
        assert_eq!(param.action_identifier(), Some(action.clone()));
        assert_eq!(action.action_identifier(), None);
    }
}
