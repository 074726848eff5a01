//! # Client Events
//!
//! The core never calls into the host. Anything the host must act on leaves
//! through a bounded crossbeam channel and is drained once per frame.
//!
//! ```text
//! ┌─────────────┐      ┌─────────────┐      ┌─────────────┐
//! │  Registry   │─────>│   Event     │─────>│    Host     │
//! │  Selector   │      │   Channel   │      │  (render,   │
//! └─────────────┘      └─────────────┘      │  network)   │
//!                                           └─────────────┘
//! ```

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use infinite_combat::{AimAngles, EntityId};

/// Effects the host must carry out.
#[derive(Clone, Debug, PartialEq)]
pub enum ClientEvent {
    /// Rebuild all chunk meshes; visibility decisions changed.
    ReloadWorldRenderer,

    /// A feature changed enablement, directly or by cascade.
    FeatureToggled {
        /// Feature id.
        id: String,
        /// New state.
        enabled: bool,
    },

    /// The selector chose a target this tick.
    ///
    /// The host turns the player to `aim` when present, then swings.
    AttackIssued {
        /// Target entity.
        target: EntityId,
        /// Distance from the player's feet to the target when selected.
        distance: f64,
        /// Facing to apply first.
        aim: Option<AimAngles>,
        /// Client tick the attack belongs to.
        tick: u64,
    },
}

/// Bounded channel between the core and the host.
pub struct EventBus {
    sender: Sender<ClientEvent>,
    receiver: Receiver<ClientEvent>,
}

impl EventBus {
    /// Creates a bus holding at most `capacity` undrained events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Creates a sender handle.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Creates a receiver handle.
    #[must_use]
    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.receiver.clone(),
        }
    }

    /// Creates a connected sender and receiver.
    #[must_use]
    pub fn create_pair(capacity: usize) -> (EventSender, EventReceiver) {
        let bus = Self::new(capacity);
        (bus.sender(), bus.receiver())
    }
}

/// Handle for publishing events.
#[derive(Clone)]
pub struct EventSender {
    sender: Sender<ClientEvent>,
}

impl EventSender {
    /// Publishes without blocking.
    ///
    /// Returns `false` when the channel is full or every receiver is gone;
    /// the event is dropped.
    #[inline]
    pub fn send(&self, event: ClientEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_) | TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Handle for consuming events.
#[derive(Clone)]
pub struct EventReceiver {
    receiver: Receiver<ClientEvent>,
}

impl EventReceiver {
    /// Takes every pending event in publish order.
    #[inline]
    pub fn drain(&self) -> Vec<ClientEvent> {
        self.receiver.try_iter().collect()
    }

    /// Takes one event, if any.
    #[inline]
    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.receiver.try_recv().ok()
    }

    /// Number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Whether any event is pending.
    #[inline]
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.receiver.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_arrive_in_order() {
        let (sender, receiver) = EventBus::create_pair(8);
        assert!(sender.send(ClientEvent::ReloadWorldRenderer));
        assert!(sender.send(ClientEvent::FeatureToggled {
            id: "XRay".into(),
            enabled: true,
        }));

        assert_eq!(receiver.pending_count(), 2);
        let events = receiver.drain();
        assert_eq!(events[0], ClientEvent::ReloadWorldRenderer);
        assert!(matches!(&events[1], ClientEvent::FeatureToggled { enabled: true, .. }));
        assert!(!receiver.has_events());
    }

    #[test]
    fn test_full_channel_drops() {
        let (sender, receiver) = EventBus::create_pair(1);
        assert!(sender.send(ClientEvent::ReloadWorldRenderer));
        assert!(!sender.send(ClientEvent::ReloadWorldRenderer));
        assert_eq!(receiver.try_recv(), Some(ClientEvent::ReloadWorldRenderer));
        assert_eq!(receiver.try_recv(), None);
    }

    #[test]
    fn test_send_after_receiver_dropped() {
        let bus = EventBus::new(4);
        let sender = bus.sender();
        drop(bus);
        assert!(!sender.send(ClientEvent::ReloadWorldRenderer));
    }
}
