// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod interaction_utils;
pub mod metamodel_builder;
pub mod interaction_service;

pub use interaction_service::InteractionService;
pub use metamodel_builder::MetamodelBuilder;
