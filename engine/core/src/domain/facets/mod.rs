// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Built-in rule families.
//!
//! | Facet | Capability | Vetoes when |
//! |-------|------------|-------------|
//! | [`HiddenFacet`] | hiding | rendered where the facet is scoped |
//! | [`DisabledFacet`] | disabling | rendered where the facet is scoped |
//! | [`ImmutableFacet`] | disabling | the attempt is user-initiated |
//! | [`MandatoryFacet`] | validating | the proposed value is missing |
//! | [`MaxLengthFacet`] | validating | a proposed string is too long |
//! | [`RegExFacet`] | validating | a proposed string does not match |
//! | [`RuleFacet`] | any | its closures say so |
//! | [`DomainEventFacet`] | all three | a domain-event subscriber vetoes |

pub mod domain_event;
pub mod rule;
pub mod usability;
pub mod validation;
pub mod visibility;

pub use domain_event::DomainEventFacet;
pub use rule::RuleFacet;
pub use usability::{DisabledFacet, ImmutableFacet};
pub use validation::{MandatoryFacet, MaxLengthFacet, RegExFacet};
pub use visibility::HiddenFacet;
