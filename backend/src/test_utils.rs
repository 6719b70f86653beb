//! Helpers shared by the unit tests: stores loaded with seed data over
//! throwaway in-memory storage.

use chrono::NaiveDate;
use std::sync::Arc;

use shared::ContactFormData;

use crate::domain::{seed, ContactStore, EventStore, GalleryStore, MemberStore, NewsStore};
use crate::error::StoreError;
use crate::storage::{MemoryStorage, StateStorage};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn seeded_member_store() -> MemberStore {
    MemberStore::from_state(seed::family_state(), Arc::new(MemoryStorage::new()))
}

pub fn seeded_event_store() -> EventStore {
    EventStore::from_state(seed::events_state(), Arc::new(MemoryStorage::new()))
}

pub fn seeded_gallery_store() -> GalleryStore {
    GalleryStore::from_state(seed::gallery_state(), Arc::new(MemoryStorage::new()))
}

pub fn seeded_news_store() -> NewsStore {
    NewsStore::from_state(seed::news_state(), Arc::new(MemoryStorage::new()))
}

pub fn seeded_contact_store() -> ContactStore {
    ContactStore::from_state(seed::contact_state(), Arc::new(MemoryStorage::new()))
}

/// A complete contact form submission
pub fn sample_form() -> ContactFormData {
    ContactFormData {
        name: "Sophie Dupont".to_string(),
        email: "sophie.dupont@email.com".to_string(),
        phone: "+33 1 23 45 67 92".to_string(),
        subject: "Réunion de printemps".to_string(),
        message: "Qui apporte le dessert cette année ?".to_string(),
    }
}

/// Storage that refuses every write
pub struct FailingStorage;

impl StateStorage for FailingStorage {
    fn load_raw(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn save_raw(&self, _key: &str, _document: &str) -> Result<(), StoreError> {
        Err(StoreError::Storage("read-only".to_string()))
    }

    fn remove(&self, _key: &str) -> Result<bool, StoreError> {
        Ok(false)
    }
}
