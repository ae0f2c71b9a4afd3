// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Object Members
//!
//! Properties, collections and actions of a domain type, each holding its own
//! ordered [`FacetSet`]. Action parameters are facet holders in their own
//! right. Members are assembled by value and frozen into the
//! [`crate::domain::metamodel::Metamodel`]; after that they are only read.

use std::sync::Arc;

use crate::domain::advisor::{Facet, FacetHolder, FacetSet};
use crate::domain::identifier::{FeatureType, Identifier};
use crate::domain::object::ObjectSpecification;

#[derive(Debug, Clone)]
pub struct ActionParameter {
    name: String,
    identifier: Option<Identifier>,
    facets: FacetSet,
}

impl ActionParameter {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            identifier: None,
            facets: FacetSet::new(),
        }
    }

    pub fn with_facet(mut self, facet: impl Facet + 'static) -> Self {
        self.facets.add(Arc::new(facet));
        self
    }

    pub fn with_shared_facet(mut self, facet: Arc<dyn Facet>) -> Self {
        self.facets.add(facet);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Assigned when the parameter is added to its action.
    pub fn identifier(&self) -> Option<&Identifier> {
        self.identifier.as_ref()
    }

    pub fn position(&self) -> Option<usize> {
        self.identifier.as_ref().and_then(|id| id.parameter_index)
    }
}

impl FacetHolder for ActionParameter {
    fn facets(&self) -> &FacetSet {
        &self.facets
    }
}

#[derive(Debug, Clone)]
pub struct ObjectMember {
    identifier: Identifier,
    facets: FacetSet,
    parameters: Vec<ActionParameter>,
    mixin: Option<Arc<ObjectSpecification>>,
}

impl ObjectMember {
    fn new(identifier: Identifier) -> Self {
        Self {
            identifier,
            facets: FacetSet::new(),
            parameters: Vec::new(),
            mixin: None,
        }
    }

    pub fn property(logical_type_name: &str, name: &str) -> Self {
        Self::new(Identifier::property(logical_type_name, name))
    }

    pub fn collection(logical_type_name: &str, name: &str) -> Self {
        Self::new(Identifier::collection(logical_type_name, name))
    }

    pub fn action(logical_type_name: &str, name: &str) -> Self {
        Self::new(Identifier::action(logical_type_name, name))
    }

    pub fn with_facet(mut self, facet: impl Facet + 'static) -> Self {
        self.facets.add(Arc::new(facet));
        self
    }

    pub fn with_shared_facet(mut self, facet: Arc<dyn Facet>) -> Self {
        self.facets.add(facet);
        self
    }

    pub fn with_parameter(mut self, mut parameter: ActionParameter) -> Self {
        parameter.identifier = Some(Identifier::parameter(&self.identifier, self.parameters.len()));
        self.parameters.push(parameter);
        self
    }

    /// Marks the member as contributed to its type by `mixin`.
    pub fn contributed_by(mut self, mixin: Arc<ObjectSpecification>) -> Self {
        self.mixin = Some(mixin);
        self
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn feature_type(&self) -> FeatureType {
        self.identifier.feature_type
    }

    pub fn parameters(&self) -> &[ActionParameter] {
        &self.parameters
    }

    pub fn parameter(&self, position: usize) -> Option<&ActionParameter> {
        self.parameters.get(position)
    }

    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    pub fn mixin_spec(&self) -> Option<&Arc<ObjectSpecification>> {
        self.mixin.as_ref()
    }

    pub fn is_mixed_in(&self) -> bool {
        self.mixin.is_some()
    }

    pub(crate) fn facets_mut(&mut self) -> &mut FacetSet {
        &mut self.facets
    }
}

impl FacetHolder for ObjectMember {
    fn facets(&self) -> &FacetSet {
        &self.facets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::facets::MandatoryFacet;

    #[test]
    fn test_parameters_get_positional_identifiers() {
        let action = ObjectMember::action("Order", "addLine")
            .with_parameter(ActionParameter::new("product").with_facet(MandatoryFacet::new()))
            .with_parameter(ActionParameter::new("quantity"));

        assert_eq!(action.parameter_count(), 2);
        let quantity = action.parameter(1).unwrap();
        assert_eq!(quantity.position(), Some(1));
        assert_eq!(quantity.identifier().unwrap().to_string(), "Order#addLine[1]");
        assert_eq!(action.parameter(0).unwrap().facets().len(), 1);
    }

    #[test]
    fn test_property_has_no_parameters() {
        let property = ObjectMember::property("Customer", "email");
        assert_eq!(property.feature_type(), FeatureType::Property);
        assert!(property.parameters().is_empty());
        assert!(!property.is_mixed_in());
    }
}
