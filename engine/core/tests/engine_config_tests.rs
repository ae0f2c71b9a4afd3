// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Engine configuration loading and its effect on the metamodel.

use interaction_core::application::{InteractionService, MetamodelBuilder};
use interaction_core::engine_config::{EditingPolicy, EngineConfig, LOG_LEVEL_ENV, PUBLISH_OUTCOMES_ENV};
use interaction_core::facets::ImmutableFacet;
use interaction_core::identifier::Identifier;
use interaction_core::infrastructure::event_bus::{EventBus, EventBusError};
use interaction_core::interaction::{InteractionInitiatedBy, Where};
use interaction_core::member::ObjectMember;
use interaction_core::object::{BeanSort, ManagedObject, ObjectSpecification};
use serde_json::json;
use std::sync::Arc;

const CONFIG_YAML: &str = r#"
evaluation:
  publish_outcomes: false
  event_bus_capacity: 64
metamodel:
  property_editing: disabled
logging:
  level: debug
"#;

#[test]
fn test_load_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("interaction-engine.yaml");
    std::fs::write(&path, CONFIG_YAML).unwrap();

    let config = EngineConfig::load_or_default(Some(path)).unwrap();

    assert!(!config.evaluation.publish_outcomes);
    assert_eq!(config.evaluation.event_bus_capacity, 64);
    assert_eq!(config.metamodel.property_editing, EditingPolicy::Disabled);
    assert!(config.validate().is_ok());
}

#[test]
fn test_zero_capacity_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("interaction-engine.yaml");
    std::fs::write(&path, "evaluation:\n  event_bus_capacity: 0\n").unwrap();

    assert!(EngineConfig::load_or_default(Some(path)).is_err());

    // Settings assembled in code bypass the loader; the bus still refuses them.
    let config = EngineConfig::from_yaml_str("evaluation:\n  event_bus_capacity: 0\n").unwrap();
    assert!(matches!(
        EventBus::from_config(&config.evaluation),
        Err(EventBusError::InvalidCapacity(0))
    ));
}

#[test]
fn test_invalid_yaml_is_rejected() {
    assert!(EngineConfig::from_yaml_str("evaluation: [not, a, map]").is_err());
}

#[test]
fn test_log_level_env_override() {
    std::env::set_var(LOG_LEVEL_ENV, "trace");
    let mut config = EngineConfig::from_yaml_str(CONFIG_YAML).unwrap();
    config.apply_env_overrides();
    std::env::remove_var(LOG_LEVEL_ENV);

    assert_eq!(config.logging.level, "trace");
}

#[test]
fn test_publish_outcomes_env_override() {
    // Only ever set to "false": the explicit-file test expects false as well.
    std::env::set_var(PUBLISH_OUTCOMES_ENV, "false");
    let mut config = EngineConfig::from_yaml_str("evaluation:\n  publish_outcomes: true\n").unwrap();
    config.apply_env_overrides();
    std::env::remove_var(PUBLISH_OUTCOMES_ENV);

    assert!(!config.evaluation.publish_outcomes);
}

#[test]
fn test_disabled_editing_policy_applies_to_user_edits() {
    let config = EngineConfig::from_yaml_str(CONFIG_YAML).unwrap();
    let mut builder = MetamodelBuilder::new(config.metamodel.clone());
    builder
        .add_specification(ObjectSpecification::new("Customer", BeanSort::Entity))
        .unwrap()
        .add_member(ObjectMember::property("Customer", "email"))
        .unwrap()
        .add_member(ObjectMember::property("Customer", "id").with_facet(ImmutableFacet::with_reason("Generated")))
        .unwrap();
    let metamodel = Arc::new(builder.build());
    let owner = ManagedObject::new(
        Arc::clone(metamodel.specification("Customer").unwrap()),
        json!({"id": 1, "email": "ada@example.com"}),
    );
    let service = InteractionService::new(metamodel, EventBus::from_config(&config.evaluation).unwrap(), config);

    let email = service
        .is_member_usable(
            &Identifier::property("Customer", "email"),
            &owner,
            InteractionInitiatedBy::User,
            Where::ObjectForms,
        )
        .unwrap();
    assert_eq!(email.reason(), Some("Disabled"));
    assert_eq!(email.advisor(), Some("EditingPolicyFacet"));

    let id = service
        .is_member_usable(
            &Identifier::property("Customer", "id"),
            &owner,
            InteractionInitiatedBy::User,
            Where::ObjectForms,
        )
        .unwrap();
    assert_eq!(id.reason(), Some("Generated"));

    let framework = service
        .is_member_usable(
            &Identifier::property("Customer", "id"),
            &owner,
            InteractionInitiatedBy::Framework,
            Where::ObjectForms,
        )
        .unwrap();
    assert!(framework.is_allowed());
}
