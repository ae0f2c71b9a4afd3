// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Event Bus Implementation - Domain Event Dispatch and Outcome Streaming
//
// Two paths share one bus:
// - Member domain events are dispatched synchronously, in registration order,
//   to every registered DomainEventSubscriber before an evaluation continues.
//   That is how business code vetoes an interaction.
// - Afterwards, the settled member event and every InteractionEvaluated
//   outcome are broadcast over a tokio channel for passive observers.
//
// In-memory only: broadcast events are lost when no receiver is listening.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::domain::domain_event::{DomainEventPoster, DomainEventSubscriber, MemberDomainEvent, SubscriberError};
use crate::domain::engine_config::{EvaluationConfig, MAX_EVENT_BUS_CAPACITY};
use crate::domain::events::InteractionEvaluated;
use crate::domain::identifier::Identifier;

/// Unified event type broadcast on the bus
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    InteractionEvaluated(InteractionEvaluated),
    MemberEvent(MemberDomainEvent),
}

/// Event bus for dispatching member events and streaming outcomes
#[derive(Clone)]
pub struct EventBus {
    sender: Arc<broadcast::Sender<DomainEvent>>,
    subscribers: Arc<RwLock<Vec<Arc<dyn DomainEventSubscriber>>>>,
}

impl EventBus {
    /// Create a new event bus with specified channel capacity
    /// Capacity determines how many events can be buffered before dropping old ones
    ///
    /// Panics if `capacity` is zero; use [`EventBus::from_config`] for
    /// capacities that come from configuration.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
            subscribers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create event bus with default capacity (1000)
    pub fn with_default_capacity() -> Self {
        Self::new(1000)
    }

    /// Create event bus from evaluation settings, rejecting capacities the
    /// broadcast channel cannot hold
    pub fn from_config(config: &EvaluationConfig) -> Result<Self, EventBusError> {
        let capacity = config.event_bus_capacity;
        if capacity == 0 || capacity > MAX_EVENT_BUS_CAPACITY {
            return Err(EventBusError::InvalidCapacity(capacity));
        }
        Ok(Self::new(capacity))
    }

    /// Register a subscriber for synchronous member event dispatch
    pub fn register(&self, subscriber: Arc<dyn DomainEventSubscriber>) {
        debug!("Registering domain event subscriber: {}", subscriber.name());
        self.subscribers.write().push(subscriber);
    }

    /// Publish the outcome of one evaluation
    pub fn publish_outcome(&self, outcome: InteractionEvaluated) {
        self.publish(DomainEvent::InteractionEvaluated(outcome));
    }

    fn publish(&self, event: DomainEvent) {
        debug!("Publishing event: {:?}", event);

        let receiver_count = self.sender.send(event).unwrap_or(0);

        if receiver_count == 0 {
            debug!("No receivers listening to event");
        }
    }

    /// Subscribe to all broadcast events
    pub fn subscribe(&self) -> EventReceiver {
        let receiver = self.sender.subscribe();
        EventReceiver { receiver }
    }

    /// Subscribe to settled member events for one feature
    pub fn subscribe_member(&self, identifier: Identifier) -> MemberEventReceiver {
        let receiver = self.sender.subscribe();
        MemberEventReceiver { receiver, identifier }
    }

    /// Number of active broadcast receivers
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Number of registered synchronous subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl DomainEventPoster for EventBus {
    fn post(&self, event: &mut MemberDomainEvent) -> Result<(), SubscriberError> {
        // Snapshot so a subscriber may register others without deadlocking.
        let subscribers: Vec<Arc<dyn DomainEventSubscriber>> = self.subscribers.read().clone();

        for subscriber in &subscribers {
            debug!("Dispatching {:?} event for {} to {}", event.phase, event.identifier, subscriber.name());
            subscriber.on_event(event)?;
        }

        self.publish(DomainEvent::MemberEvent(event.clone()));
        Ok(())
    }
}

/// Receiver for all broadcast events
pub struct EventReceiver {
    receiver: broadcast::Receiver<DomainEvent>,
}

impl EventReceiver {
    /// Receive the next event (waits until an event is available)
    pub async fn recv(&mut self) -> Result<DomainEvent, EventBusError> {
        self.receiver.recv().await.map_err(map_recv_error)
    }

    /// Try to receive an event without blocking
    pub fn try_recv(&mut self) -> Result<DomainEvent, EventBusError> {
        self.receiver.try_recv().map_err(|e| match e {
            broadcast::error::TryRecvError::Empty => EventBusError::Empty,
            broadcast::error::TryRecvError::Closed => EventBusError::Closed,
            broadcast::error::TryRecvError::Lagged(n) => {
                warn!("Event receiver lagged by {} events", n);
                EventBusError::Lagged(n)
            }
        })
    }
}

/// Receiver for member events of a single feature (filtered)
pub struct MemberEventReceiver {
    receiver: broadcast::Receiver<DomainEvent>,
    identifier: Identifier,
}

impl MemberEventReceiver {
    /// Receive the next member event for the configured identifier
    /// Filters out outcomes and events for other features
    pub async fn recv(&mut self) -> Result<MemberDomainEvent, EventBusError> {
        loop {
            let event = self.receiver.recv().await.map_err(map_recv_error)?;

            if let DomainEvent::MemberEvent(member_event) = event {
                if member_event.identifier == self.identifier {
                    return Ok(member_event);
                }
            }
        }
    }
}

fn map_recv_error(e: broadcast::error::RecvError) -> EventBusError {
    match e {
        broadcast::error::RecvError::Closed => EventBusError::Closed,
        broadcast::error::RecvError::Lagged(n) => {
            warn!("Event receiver lagged by {} events", n);
            EventBusError::Lagged(n)
        }
    }
}

/// Errors that can occur when receiving events
#[derive(Debug, thiserror::Error)]
pub enum EventBusError {
    #[error("Event bus is closed")]
    Closed,

    #[error("No events available")]
    Empty,

    #[error("Receiver lagged by {0} events (events were dropped)")]
    Lagged(u64),

    #[error("Invalid event bus capacity: {0}")]
    InvalidCapacity(usize),
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::domain_event::EventPhase;
    use crate::domain::events::{InteractionEvent, InteractionEventKind};
    use crate::domain::interaction::InteractionCategory;
    use chrono::Utc;
    use parking_lot::Mutex;

    struct Recorder {
        name: String,
        seen: Arc<Mutex<Vec<String>>>,
        veto: Option<String>,
    }

    impl DomainEventSubscriber for Recorder {
        fn name(&self) -> &str {
            &self.name
        }

        fn on_event(&self, event: &mut MemberDomainEvent) -> Result<(), SubscriberError> {
            self.seen.lock().push(self.name.clone());
            if let Some(reason) = &self.veto {
                event.veto(reason);
            }
            Ok(())
        }
    }

    struct Failing;

    impl DomainEventSubscriber for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn on_event(&self, _event: &mut MemberDomainEvent) -> Result<(), SubscriberError> {
            Err(SubscriberError::Failed {
                subscriber: "failing".to_string(),
                message: "boom".to_string(),
            })
        }
    }

    fn disable_event(identifier: Identifier) -> MemberDomainEvent {
        let interaction = InteractionEvent::new(InteractionEventKind::ActionUsability, identifier, None, None);
        MemberDomainEvent::from_interaction(EventPhase::Disable, &interaction)
    }

    fn recorder(name: &str, seen: &Arc<Mutex<Vec<String>>>, veto: Option<&str>) -> Arc<dyn DomainEventSubscriber> {
        Arc::new(Recorder {
            name: name.to_string(),
            seen: Arc::clone(seen),
            veto: veto.map(str::to_string),
        })
    }

    #[test]
    fn test_post_dispatches_in_registration_order() {
        let bus = EventBus::new(10);
        let seen = Arc::new(Mutex::new(Vec::new()));
        bus.register(recorder("first", &seen, None));
        bus.register(recorder("second", &seen, Some("Closed for the day")));
        bus.register(recorder("third", &seen, Some("Too late")));
        assert_eq!(bus.subscriber_count(), 3);

        let mut event = disable_event(Identifier::action("Shop", "buy"));
        bus.post(&mut event).unwrap();

        assert_eq!(*seen.lock(), vec!["first", "second", "third"]);
        assert_eq!(event.disabled_reason(), Some("Closed for the day"));
    }

    #[test]
    fn test_failing_subscriber_stops_dispatch() {
        let bus = EventBus::new(10);
        let seen = Arc::new(Mutex::new(Vec::new()));
        bus.register(Arc::new(Failing));
        bus.register(recorder("after", &seen, None));

        let mut event = disable_event(Identifier::action("Shop", "buy"));
        assert!(bus.post(&mut event).is_err());
        assert!(seen.lock().is_empty());
    }

    #[tokio::test]
    async fn test_outcome_publish_subscribe() {
        let bus = EventBus::new(10);
        let mut receiver = bus.subscribe();

        bus.publish_outcome(InteractionEvaluated {
            identifier: Identifier::property("Customer", "email"),
            category: InteractionCategory::Usability,
            vetoed: true,
            reason: Some("Disabled".to_string()),
            advisor: Some("DisabledFacet".to_string()),
            evaluated_at: Utc::now(),
        });

        match receiver.recv().await.unwrap() {
            DomainEvent::InteractionEvaluated(outcome) => {
                assert!(outcome.vetoed);
                assert_eq!(outcome.reason.as_deref(), Some("Disabled"));
            }
            other => panic!("Wrong event type received: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_member_event_filtering() {
        let bus = EventBus::new(10);
        let wanted = Identifier::action("Shop", "buy");
        let mut receiver = bus.subscribe_member(wanted.clone());

        bus.post(&mut disable_event(Identifier::action("Shop", "sell"))).unwrap();
        bus.post(&mut disable_event(wanted.clone())).unwrap();

        let received = receiver.recv().await.unwrap();
        assert_eq!(received.identifier, wanted);
        assert_eq!(received.phase, EventPhase::Disable);
    }

    #[test]
    fn test_from_config_rejects_invalid_capacity() {
        for capacity in [0, MAX_EVENT_BUS_CAPACITY + 1] {
            let config = EvaluationConfig {
                event_bus_capacity: capacity,
                ..EvaluationConfig::default()
            };
            assert!(matches!(
                EventBus::from_config(&config),
                Err(EventBusError::InvalidCapacity(c)) if c == capacity
            ));
        }
        assert!(EventBus::from_config(&EvaluationConfig::default()).is_ok());
    }

    #[test]
    fn test_try_recv_empty() {
        let bus = EventBus::default();
        let mut receiver = bus.subscribe();
        assert_eq!(bus.receiver_count(), 1);
        assert!(matches!(receiver.try_recv(), Err(EventBusError::Empty)));
    }
}
