//! Change notification for store subscribers.
//!
//! Views register a callback on the store they display and re-read the
//! projections they need when a [`StoreChange`] arrives. Every successful
//! mutation emits exactly one change; mutations that turn out to be no-ops
//! (unknown id, unchanged selection) emit nothing.

use shared::{ArticleId, ContactId, EventId, MemberId, MessageId, PhotoId};
use std::fmt;

pub type SubscriptionId = u64;

/// What changed in a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    MemberAdded(MemberId),
    MemberUpdated(MemberId),
    MemberDeleted(MemberId),
    SearchQueryChanged,
    DarkModeToggled(bool),

    EventAdded(EventId),
    EventUpdated(EventId),
    EventDeleted(EventId),

    PhotoAdded(PhotoId),
    PhotoUpdated(PhotoId),
    PhotoDeleted(PhotoId),
    GalleryCategoryChanged,
    LightboxOpened(usize),
    LightboxMoved(usize),
    LightboxClosed,

    ArticleAdded(ArticleId),
    ArticleUpdated(ArticleId),
    ArticleDeleted(ArticleId),
    NewsCategoryChanged,

    ContactAdded(ContactId),
    ContactUpdated(ContactId),
    ContactDeleted(ContactId),
    MessageAppended(MessageId),
}

type Listener = Box<dyn Fn(&StoreChange) + Send + Sync>;

/// Registry of change listeners owned by a store
#[derive(Default)]
pub struct ChangeNotifier {
    next_id: SubscriptionId,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener, returning the handle needed to unsubscribe it
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&StoreChange) + Send + Sync + 'static,
    {
        self.next_id += 1;
        self.listeners.push((self.next_id, Box::new(listener)));
        self.next_id
    }

    /// Returns true if the listener was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Deliver a change to every listener in subscription order
    pub fn notify(&self, change: &StoreChange) {
        for (_, listener) in &self.listeners {
            listener(change);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
