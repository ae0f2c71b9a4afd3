// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Advisors and Facets
//!
//! A [`Facet`] is one rule attached to one metamodel feature. It takes part in
//! an interaction by exposing zero to three advisor capabilities:
//!
//! | Capability | Method | Context |
//! |------------|--------|---------|
//! | [`HidingInteractionAdvisor`] | `hides` | [`VisibilityContext`] |
//! | [`DisablingInteractionAdvisor`] | `disables` | [`UsabilityContext`] |
//! | [`ValidatingInteractionAdvisor`] | `invalidates` | [`ValidityContext`] |
//!
//! Every method returns an [`Advice`]: `Ok(None)` for no objection,
//! `Ok(Some(reason))` for a veto, `Err(_)` only when the rule itself is broken.
//! Rules must tolerate an unresolved target by returning `Ok(None)`.
//!
//! [`FacetSet`] keeps the facets of one feature in declaration order and an
//! index per capability, built once when the metamodel is assembled.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::context::{UsabilityContext, ValidityContext, VisibilityContext};
use crate::domain::domain_event::SubscriberError;
use crate::domain::identifier::FeatureType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisorKind {
    Hiding,
    Disabling,
    Validating,
}

/// A rule failed to evaluate (as opposed to vetoing).
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("{0}")]
    Failed(String),
    #[error(transparent)]
    Subscriber(#[from] SubscriberError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Advice = Result<Option<String>, AdvisorError>;

pub trait HidingInteractionAdvisor: Send + Sync {
    fn hides(&self, context: &VisibilityContext) -> Advice;
}

pub trait DisablingInteractionAdvisor: Send + Sync {
    fn disables(&self, context: &UsabilityContext) -> Advice;
}

pub trait ValidatingInteractionAdvisor: Send + Sync {
    fn invalidates(&self, context: &ValidityContext) -> Advice;
}

/// Which interaction contexts a facet is structurally compatible with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacetScope {
    Any,
    Only(FeatureType),
}

impl FacetScope {
    pub fn admits(&self, feature_type: FeatureType) -> bool {
        match self {
            Self::Any => true,
            Self::Only(scoped) => *scoped == feature_type,
        }
    }
}

pub trait Facet: Send + Sync {
    /// Stable name for diagnostics; reported as the origin of a veto.
    fn name(&self) -> &str;

    fn scope(&self) -> FacetScope {
        FacetScope::Any
    }

    fn as_hiding(&self) -> Option<&dyn HidingInteractionAdvisor> {
        None
    }

    fn as_disabling(&self) -> Option<&dyn DisablingInteractionAdvisor> {
        None
    }

    fn as_validating(&self) -> Option<&dyn ValidatingInteractionAdvisor> {
        None
    }

    /// True for facets that explicitly decide whether a property is editable.
    fn governs_editing(&self) -> bool {
        false
    }

    fn implements(&self, kind: AdvisorKind) -> bool {
        match kind {
            AdvisorKind::Hiding => self.as_hiding().is_some(),
            AdvisorKind::Disabling => self.as_disabling().is_some(),
            AdvisorKind::Validating => self.as_validating().is_some(),
        }
    }
}

/// Ordered facets of one feature, indexed by capability.
#[derive(Clone, Default)]
pub struct FacetSet {
    facets: Vec<Arc<dyn Facet>>,
    hiding: Vec<usize>,
    disabling: Vec<usize>,
    validating: Vec<usize>,
}

impl FacetSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, facet: Arc<dyn Facet>) {
        let index = self.facets.len();
        if facet.implements(AdvisorKind::Hiding) {
            self.hiding.push(index);
        }
        if facet.implements(AdvisorKind::Disabling) {
            self.disabling.push(index);
        }
        if facet.implements(AdvisorKind::Validating) {
            self.validating.push(index);
        }
        self.facets.push(facet);
    }

    pub fn len(&self) -> usize {
        self.facets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Facet>> + '_ {
        self.facets.iter()
    }

    /// Facets implementing `kind`, in declaration order.
    pub fn advisors(&self, kind: AdvisorKind) -> impl Iterator<Item = &Arc<dyn Facet>> + '_ {
        let indices = match kind {
            AdvisorKind::Hiding => &self.hiding,
            AdvisorKind::Disabling => &self.disabling,
            AdvisorKind::Validating => &self.validating,
        };
        indices.iter().map(move |&i| &self.facets[i])
    }

    pub fn governs_editing(&self) -> bool {
        self.facets.iter().any(|f| f.governs_editing())
    }
}

impl fmt::Debug for FacetSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.facets.iter().map(|facet| facet.name())).finish()
    }
}

/// Anything rules can be attached to: a specification, a member or a parameter.
pub trait FacetHolder {
    fn facets(&self) -> &FacetSet;
}
