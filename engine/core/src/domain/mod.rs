// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Mod
//!
//! Provides the domain model of the interaction engine.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Pure types; no evaluation happens here except inside facets

pub mod identifier;
pub mod object;
pub mod head;
pub mod interaction;
pub mod context;
pub mod events;
pub mod advisor;
pub mod facets;
pub mod domain_event;
pub mod result;
pub mod consent;
pub mod member;
pub mod metamodel;
pub mod engine_config;
pub mod errors;
