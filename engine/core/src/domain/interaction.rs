// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Interaction Kinds
//!
//! Tags carried by every [`crate::domain::context::InteractionContext`]:
//!
//! | Type | Description |
//! |------|-------------|
//! | `InteractionContextType` | What is being attempted (read a property, invoke an action, ...) |
//! | `InteractionCategory` | Which question is asked: visible, usable, valid, or a pure access/title/parse |
//! | `InteractionInitiatedBy` | Whether an end user or the runtime started the attempt |
//! | `Where` | Where the member is being rendered, for where-scoped rules |

use serde::{Deserialize, Serialize};

use crate::domain::advisor::AdvisorKind;
use crate::domain::identifier::FeatureType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InteractionContextType {
    ObjectVisible,
    ObjectValidate,
    ObjectTitle,
    ParseValue,
    PropertyVisible,
    PropertyUsable,
    PropertyRead,
    PropertyModify,
    CollectionVisible,
    CollectionUsable,
    CollectionRead,
    CollectionAddTo,
    CollectionRemoveFrom,
    ActionVisible,
    ActionUsable,
    ActionInvoke,
    ActionParameterVisible,
    ActionParameterUsable,
    ActionProposedArgument,
}

impl InteractionContextType {
    pub fn category(&self) -> InteractionCategory {
        use InteractionContextType::*;
        match self {
            ObjectVisible | PropertyVisible | CollectionVisible | ActionVisible
            | ActionParameterVisible => InteractionCategory::Visibility,
            PropertyUsable | CollectionUsable | ActionUsable | ActionParameterUsable => {
                InteractionCategory::Usability
            }
            ObjectValidate | PropertyModify | CollectionAddTo | CollectionRemoveFrom
            | ActionInvoke | ActionProposedArgument => InteractionCategory::Validity,
            PropertyRead | CollectionRead => InteractionCategory::Access,
            ObjectTitle => InteractionCategory::Title,
            ParseValue => InteractionCategory::Parse,
        }
    }

    /// The kind of feature this interaction targets; drives facet compatibility.
    pub fn feature_type(&self) -> FeatureType {
        use InteractionContextType::*;
        match self {
            ObjectVisible | ObjectValidate | ObjectTitle | ParseValue => FeatureType::Object,
            PropertyVisible | PropertyUsable | PropertyRead | PropertyModify => FeatureType::Property,
            CollectionVisible | CollectionUsable | CollectionRead | CollectionAddTo
            | CollectionRemoveFrom => FeatureType::Collection,
            ActionVisible | ActionUsable | ActionInvoke => FeatureType::Action,
            ActionParameterVisible | ActionParameterUsable | ActionProposedArgument => {
                FeatureType::ActionParameter
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionCategory {
    Visibility,
    Usability,
    Validity,
    Access,
    Title,
    Parse,
}

impl InteractionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visibility => "visibility",
            Self::Usability => "usability",
            Self::Validity => "validity",
            Self::Access => "access",
            Self::Title => "title",
            Self::Parse => "parse",
        }
    }

    /// The advisor capability consulted for this category, if any.
    pub fn advisor_kind(&self) -> Option<AdvisorKind> {
        match self {
            Self::Visibility => Some(AdvisorKind::Hiding),
            Self::Usability => Some(AdvisorKind::Disabling),
            Self::Validity => Some(AdvisorKind::Validating),
            Self::Access | Self::Title | Self::Parse => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionInitiatedBy {
    User,
    Framework,
    /// Skip rule evaluation altogether.
    PassThrough,
}

impl InteractionInitiatedBy {
    pub fn is_user(&self) -> bool {
        matches!(self, Self::User)
    }

    pub fn is_framework(&self) -> bool {
        matches!(self, Self::Framework)
    }

    pub fn is_pass_through(&self) -> bool {
        matches!(self, Self::PassThrough)
    }
}

/// Where a member is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Where {
    Anywhere,
    ObjectForms,
    ReferencesParent,
    ParentedTables,
    StandaloneTables,
    AllTables,
    EverywhereExceptTables,
    Nowhere,
    #[default]
    NotSpecified,
}

impl Where {
    /// Whether a rule scoped to `self` applies when rendering at `context`.
    pub fn includes(&self, context: Where) -> bool {
        match self {
            Self::Anywhere => true,
            Self::AllTables => matches!(
                context,
                Self::ParentedTables | Self::StandaloneTables | Self::AllTables
            ),
            Self::EverywhereExceptTables => !Self::AllTables.includes(context),
            Self::Nowhere | Self::NotSpecified => false,
            Self::ObjectForms
            | Self::ReferencesParent
            | Self::ParentedTables
            | Self::StandaloneTables => *self == context,
        }
    }

    pub fn friendly_name(&self) -> &'static str {
        match self {
            Self::Anywhere => "anywhere",
            Self::ObjectForms => "object forms",
            Self::ReferencesParent => "references to parent",
            Self::ParentedTables => "parented tables",
            Self::StandaloneTables => "standalone tables",
            Self::AllTables => "tables",
            Self::EverywhereExceptTables => "everywhere except tables",
            Self::Nowhere => "nowhere",
            Self::NotSpecified => "not specified",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_where_includes() {
        assert!(Where::Anywhere.includes(Where::ObjectForms));
        assert!(Where::AllTables.includes(Where::ParentedTables));
        assert!(!Where::AllTables.includes(Where::ObjectForms));
        assert!(Where::EverywhereExceptTables.includes(Where::ObjectForms));
        assert!(!Where::EverywhereExceptTables.includes(Where::StandaloneTables));
        assert!(!Where::Nowhere.includes(Where::Anywhere));
        assert!(Where::ObjectForms.includes(Where::ObjectForms));
        assert!(!Where::ObjectForms.includes(Where::ReferencesParent));
    }

    #[test]
    fn test_categories_map_to_advisor_kinds() {
        assert_eq!(
            InteractionContextType::PropertyVisible.category().advisor_kind(),
            Some(AdvisorKind::Hiding)
        );
        assert_eq!(
            InteractionContextType::ActionParameterUsable.category().advisor_kind(),
            Some(AdvisorKind::Disabling)
        );
        assert_eq!(
            InteractionContextType::ActionProposedArgument.category().advisor_kind(),
            Some(AdvisorKind::Validating)
        );
        assert_eq!(InteractionContextType::PropertyRead.category().advisor_kind(), None);
    }

    #[test]
    fn test_feature_types() {
        assert_eq!(InteractionContextType::CollectionAddTo.feature_type(), FeatureType::Collection);
        assert_eq!(InteractionContextType::ActionInvoke.feature_type(), FeatureType::Action);
        assert_eq!(
            InteractionContextType::ActionProposedArgument.feature_type(),
            FeatureType::ActionParameter
        );
    }
}
