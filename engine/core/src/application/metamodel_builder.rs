// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Metamodel Builder
//!
//! Explicit load-time pass that collects specifications, members and their
//! ordered facets, applies configuration-driven facets and freezes the result
//! into an immutable [`Metamodel`]. Evaluation never inspects types at request
//! time; it only reads what was registered here.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::advisor::{Facet, FacetHolder};
use crate::domain::engine_config::{EditingPolicy, MetamodelConfig};
use crate::domain::errors::MetamodelError;
use crate::domain::facets::DisabledFacet;
use crate::domain::identifier::{FeatureType, Identifier};
use crate::domain::member::ObjectMember;
use crate::domain::metamodel::Metamodel;
use crate::domain::object::ObjectSpecification;

pub struct MetamodelBuilder {
    config: MetamodelConfig,
    specifications: HashMap<String, ObjectSpecification>,
    members: Vec<ObjectMember>,
}

impl MetamodelBuilder {
    pub fn new(config: MetamodelConfig) -> Self {
        Self {
            config,
            specifications: HashMap::new(),
            members: Vec::new(),
        }
    }

    pub fn add_specification(&mut self, specification: ObjectSpecification) -> Result<&mut Self, MetamodelError> {
        let name = specification.logical_type_name().to_string();
        if self.specifications.contains_key(&name) {
            return Err(MetamodelError::DuplicateSpecification(name));
        }
        debug!("Registering specification {}", name);
        self.specifications.insert(name, specification);
        Ok(self)
    }

    /// Attaches an object-level facet (object visibility / validity rules).
    pub fn add_object_facet(&mut self, logical_type_name: &str, facet: Arc<dyn Facet>) -> Result<&mut Self, MetamodelError> {
        let specification = self
            .specifications
            .get_mut(logical_type_name)
            .ok_or_else(|| MetamodelError::UnknownSpecification(logical_type_name.to_string()))?;
        specification.facets_mut().add(facet);
        Ok(self)
    }

    pub fn add_member(&mut self, member: ObjectMember) -> Result<&mut Self, MetamodelError> {
        let identifier = member.identifier().clone();

        if !self.specifications.contains_key(&identifier.logical_type_name) {
            return Err(MetamodelError::UnknownSpecification(identifier.logical_type_name.clone()));
        }
        if self.members.iter().any(|m| m.identifier() == &identifier) {
            return Err(MetamodelError::DuplicateMember(identifier));
        }
        if member.feature_type() != FeatureType::Action && member.parameter_count() > 0 {
            return Err(MetamodelError::ParametersOnNonAction(identifier));
        }
        if let Some(mixin) = member.mixin_spec() {
            if !mixin.is_mixin() {
                return Err(MetamodelError::NotAMixin {
                    member: identifier,
                    mixin: mixin.logical_type_name().to_string(),
                });
            }
        }

        debug!("Registering member {} with {} facets", identifier, member.facets().len());
        self.members.push(member);
        Ok(self)
    }

    /// Applies the editing policy and freezes everything into a [`Metamodel`].
    pub fn build(self) -> Metamodel {
        let editing = self.config.property_editing;

        let members: HashMap<Identifier, Arc<ObjectMember>> = self
            .members
            .into_iter()
            .map(|mut member| {
                if editing == EditingPolicy::Disabled
                    && member.feature_type() == FeatureType::Property
                    && !member.facets().governs_editing()
                {
                    member.facets_mut().add(Arc::new(DisabledFacet::for_editing_policy()));
                }
                (member.identifier().clone(), Arc::new(member))
            })
            .collect();

        let specifications: HashMap<String, Arc<ObjectSpecification>> = self
            .specifications
            .into_iter()
            .map(|(name, spec)| (name, Arc::new(spec)))
            .collect();

        info!(
            "Metamodel built: {} specifications, {} members (property editing {:?})",
            specifications.len(),
            members.len(),
            editing
        );

        Metamodel::new(specifications, members)
    }
}

impl Default for MetamodelBuilder {
    fn default() -> Self {
        Self::new(MetamodelConfig::default())
    }
}
