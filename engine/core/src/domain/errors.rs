// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Engine errors.
//!
//! Business vetoes are never errors; they travel inside
//! [`crate::domain::consent::Consent`]. What remains here is either a broken
//! metamodel (fatal, fail fast) or a broken rule (propagated, never turned
//! into a veto).

use thiserror::Error;

use crate::domain::advisor::AdvisorError;
use crate::domain::identifier::Identifier;

#[derive(Debug, Error)]
pub enum InteractionError {
    #[error("Invalid interaction state: {0}")]
    InvalidState(String),

    #[error("Advisor '{advisor}' failed while evaluating {identifier}: {source}")]
    RuleFault {
        advisor: String,
        identifier: Identifier,
        #[source]
        source: AdvisorError,
    },

    #[error("Unknown member: {0}")]
    UnknownMember(Identifier),

    #[error("Unknown specification '{0}'")]
    UnknownSpecification(String),

    #[error("Parameter position {position} out of range for {identifier} ({count} arguments)")]
    ParameterOutOfRange {
        identifier: Identifier,
        position: usize,
        count: usize,
    },

    #[error("{identifier} expects {expected} arguments, got {actual}")]
    ArgumentCountMismatch {
        identifier: Identifier,
        expected: usize,
        actual: usize,
    },

    #[error("Interaction result for {0} is already resolved")]
    ResultAlreadyResolved(Identifier),

    #[error("No mixin resolver configured for {0}")]
    MissingMixinResolver(Identifier),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetamodelError {
    #[error("Specification '{0}' is already registered")]
    DuplicateSpecification(String),

    #[error("Unknown specification '{0}'")]
    UnknownSpecification(String),

    #[error("Member {0} is already registered")]
    DuplicateMember(Identifier),

    #[error("{0} is not an action and cannot declare parameters")]
    ParametersOnNonAction(Identifier),

    #[error("{member} is contributed by '{mixin}', which is not a mixin")]
    NotAMixin { member: Identifier, mixin: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = InteractionError::RuleFault {
            advisor: "disableArchive".to_string(),
            identifier: Identifier::action("Order", "archive"),
            source: AdvisorError::Failed("lookup failed".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("disableArchive"));
        assert!(msg.contains("Order#archive"));
        assert!(msg.contains("lookup failed"));

        let err = MetamodelError::NotAMixin {
            member: Identifier::action("Order", "ship"),
            mixin: "Order".to_string(),
        };
        assert!(err.to_string().contains("not a mixin"));
    }
}
