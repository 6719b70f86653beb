//! Family calendar events.

use chrono::{Datelike, Days, Local, NaiveDate};
use log::{info, warn};
use std::sync::Arc;

use shared::{Event, EventId, EventPatch, EventType, EventsStoreState, MemberId, NewEvent};

use super::ids::IdGenerator;
use super::notify::{ChangeNotifier, StoreChange, SubscriptionId};
use super::seed;
use crate::error::StoreError;
use crate::storage::{load_state, save_state, StateStorage, EVENTS_STORE_KEY};

pub struct EventStore {
    events: Vec<Event>,
    ids: IdGenerator,
    storage: Arc<dyn StateStorage>,
    notifier: ChangeNotifier,
}

impl EventStore {
    pub fn open(storage: Arc<dyn StateStorage>) -> Result<Self, StoreError> {
        let state = match load_state::<EventsStoreState>(storage.as_ref(), EVENTS_STORE_KEY) {
            Ok(Some(state)) => state,
            Ok(None) => {
                info!("No persisted events, using seed data");
                seed::events_state()
            }
            Err(StoreError::Serialization(e)) => {
                warn!("Persisted events are unreadable ({}), using seed data", e);
                seed::events_state()
            }
            Err(e) => return Err(e),
        };
        Ok(Self::from_state(state, storage))
    }

    pub fn from_state(state: EventsStoreState, storage: Arc<dyn StateStorage>) -> Self {
        let ids = IdGenerator::for_existing(state.events.iter().map(|e| e.id));
        Self {
            events: state.events,
            ids,
            storage,
            notifier: ChangeNotifier::new(),
        }
    }

    pub fn state(&self) -> EventsStoreState {
        EventsStoreState {
            events: self.events.clone(),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&StoreChange) + Send + Sync + 'static,
    {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    pub fn add(&mut self, new_event: NewEvent) -> Result<EventId, StoreError> {
        let previous = self.state();
        let id = self.ids.next_id();
        info!("Adding event '{}' on {} ({})", new_event.title, new_event.date, id);
        self.events.push(Event {
            id,
            title: new_event.title,
            date: new_event.date,
            event_type: new_event.event_type,
            member_id: new_event.member_id,
            description: new_event.description,
            recurring: new_event.recurring,
        });
        self.commit(previous, StoreChange::EventAdded(id))?;
        Ok(id)
    }

    pub fn update(&mut self, id: EventId, patch: EventPatch) -> Result<bool, StoreError> {
        let previous = self.state();
        let Some(event) = self.events.iter_mut().find(|e| e.id == id) else {
            warn!("Cannot update unknown event {}", id);
            return Ok(false);
        };

        if let Some(title) = patch.title {
            event.title = title;
        }
        if let Some(date) = patch.date {
            event.date = date;
        }
        if let Some(event_type) = patch.event_type {
            event.event_type = event_type;
        }
        if let Some(member_id) = patch.member_id {
            event.member_id = member_id;
        }
        if let Some(description) = patch.description {
            event.description = description;
        }
        if let Some(recurring) = patch.recurring {
            event.recurring = recurring;
        }

        info!("Updated event {}", id);
        self.commit(previous, StoreChange::EventUpdated(id))?;
        Ok(true)
    }

    pub fn delete(&mut self, id: EventId) -> Result<bool, StoreError> {
        let previous = self.state();
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        if self.events.len() == before {
            warn!("Cannot delete unknown event {}", id);
            return Ok(false);
        }

        info!("Deleted event {}", id);
        self.commit(previous, StoreChange::EventDeleted(id))?;
        Ok(true)
    }

    pub fn get_by_id(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Events in the next `window_days` days counted from the local date
    pub fn upcoming(&self, window_days: u32) -> Vec<&Event> {
        self.upcoming_from(Local::now().date_naive(), window_days)
    }

    /// Events dated within `[today, today + window_days]`, earliest first.
    /// Events sharing a date keep their insertion order.
    pub fn upcoming_from(&self, today: NaiveDate, window_days: u32) -> Vec<&Event> {
        let last_day = today
            .checked_add_days(Days::new(window_days.into()))
            .unwrap_or(NaiveDate::MAX);
        let mut upcoming: Vec<&Event> = self
            .events
            .iter()
            .filter(|e| e.date >= today && e.date <= last_day)
            .collect();
        upcoming.sort_by_key(|e| e.date);
        upcoming
    }

    /// Events in `month` (1 to 12) of `year`, in insertion order
    pub fn by_month(&self, year: i32, month: u32) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.date.year() == year && e.date.month() == month)
            .collect()
    }

    pub fn by_member(&self, member_id: MemberId) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.member_id == Some(member_id))
            .collect()
    }

    pub fn by_type(&self, event_type: EventType) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    fn commit(&mut self, previous: EventsStoreState, change: StoreChange) -> Result<(), StoreError> {
        if let Err(e) = save_state(self.storage.as_ref(), EVENTS_STORE_KEY, &self.state()) {
            warn!("Rolling back {:?}: {}", change, e);
            self.events = previous.events;
            return Err(e);
        }
        self.notifier.notify(&change);
        Ok(())
    }
}
