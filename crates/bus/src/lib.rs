use core_types::{NodeId, SubscriptionId};
use std::sync::mpsc::{self, Receiver, Sender};

/// Structural change to an element tree, as seen by observers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomEvent {
    /// `node` (and its whole subtree) was appended under `parent`.
    Inserted { parent: NodeId, node: NodeId },
    /// `node` was detached from `parent`.
    Removed { parent: NodeId, node: NodeId },
}

impl DomEvent {
    pub fn node(&self) -> NodeId {
        match self {
            DomEvent::Inserted { node, .. } | DomEvent::Removed { node, .. } => *node,
        }
    }
}

/// Fan-out of [`DomEvent`]s to any number of channel subscribers.
///
/// Subscribers whose receiver was dropped are pruned on the next publish.
#[derive(Debug, Default)]
pub struct Observers {
    next_id: SubscriptionId,
    senders: Vec<(SubscriptionId, Sender<DomEvent>)>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> (SubscriptionId, Receiver<DomEvent>) {
        let (tx, rx) = mpsc::channel();
        self.next_id = self.next_id.wrapping_add(1).max(1);
        let id = self.next_id;
        self.senders.push((id, tx));
        (id, rx)
    }

    /// Returns `true` if a subscriber with this id was removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.senders.len();
        self.senders.retain(|(sid, _)| *sid != id);
        self.senders.len() != before
    }

    pub fn publish(&mut self, evt: DomEvent) {
        self.senders.retain(|(_, tx)| tx.send(evt.clone()).is_ok());
    }

    pub fn len(&self) -> usize {
        self.senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }
}
