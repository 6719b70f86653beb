//! # Family Site
//!
//! Composition root owning every store plus the UI state that spans pages.
//! Pages receive the site (or the store they need) instead of reaching for
//! globals.

use anyhow::{Context, Result};
use log::{info, warn};
use std::sync::Arc;

use shared::{Event, FamilyMember, MemberForm, MemberId, MessageId};

use crate::config::SiteConfig;
use crate::domain::{ContactForm, ContactStore, EventStore, GalleryStore, MemberStore, NewsStore};
use crate::error::{FormError, StoreError};
use crate::state::{ModalKind, ModalState, ModalTarget};
use crate::storage::{JsonFileStorage, MemoryStorage, StateStorage};

pub struct FamilySite {
    pub members: MemberStore,
    pub events: EventStore,
    pub gallery: GalleryStore,
    pub news: NewsStore,
    pub contacts: ContactStore,
    pub modal: ModalState,
    pub contact_form: ContactForm,
    config: SiteConfig,
}

impl FamilySite {
    /// Open the site on the JSON documents in the configured data directory
    pub fn open(config: SiteConfig) -> Result<Self> {
        let storage = JsonFileStorage::new(&config.data_directory).with_context(|| {
            format!("Failed to open data directory {:?}", config.data_directory)
        })?;
        info!("Opening family site from {:?}", storage.base_directory());
        Self::with_storage(config, Arc::new(storage))
    }

    /// Open the site on seed data that is never written to disk
    pub fn in_memory(config: SiteConfig) -> Result<Self> {
        Self::with_storage(config, Arc::new(MemoryStorage::new()))
    }

    pub fn with_storage(config: SiteConfig, storage: Arc<dyn StateStorage>) -> Result<Self> {
        Ok(Self {
            members: MemberStore::open(storage.clone()).context("Failed to load family members")?,
            events: EventStore::open(storage.clone()).context("Failed to load events")?,
            gallery: GalleryStore::open(storage.clone()).context("Failed to load gallery")?,
            news: NewsStore::open(storage.clone()).context("Failed to load news")?,
            contacts: ContactStore::open(storage).context("Failed to load contacts")?,
            modal: ModalState::new(),
            contact_form: ContactForm::new(),
            config,
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Events within the configured window, starting today
    pub fn upcoming_events(&self) -> Vec<&Event> {
        self.events.upcoming(self.config.upcoming_window_days)
    }

    /// Members whose birthday falls within the configured window
    pub fn upcoming_birthdays(&self) -> Vec<&FamilyMember> {
        self.members
            .upcoming_birthdays_today(self.config.birthday_window_days)
    }

    /// Submit the contact form after the configured delay
    pub async fn submit_contact_form(&mut self) -> Result<MessageId, FormError> {
        let delay = self.config.submit_delay();
        self.contact_form.submit(&mut self.contacts, delay).await
    }

    /// Apply the member dialog: add in an `Add` modal, update the targeted
    /// member in an `Edit` modal. The modal closes on success.
    ///
    /// Returns the affected member, `None` when no member dialog is open or
    /// the edited member no longer exists.
    pub fn submit_member_form(&mut self, form: MemberForm) -> Result<Option<MemberId>, StoreError> {
        let affected = match (self.modal.kind(), self.modal.target_member()) {
            (ModalKind::Add, _) => {
                let generation = self.generation_for(&form);
                Some(self.members.add(form.into_new_member(generation))?)
            }
            (ModalKind::Edit, Some(id)) => {
                if self.members.update(id, form.into_patch())? {
                    Some(id)
                } else {
                    None
                }
            }
            (kind, target) => {
                warn!("Ignoring member form in {:?} modal targeting {:?}", kind, target);
                return Ok(None);
            }
        };
        self.modal.close();
        Ok(affected)
    }

    /// Delete the member targeted by an open `Delete` modal
    pub fn confirm_member_delete(&mut self) -> Result<bool, StoreError> {
        let (ModalKind::Delete, Some(ModalTarget::Member(id))) = (self.modal.kind(), self.modal.target()) else {
            warn!("No member deletion awaiting confirmation");
            return Ok(false);
        };
        let deleted = self.members.delete(id)?;
        self.modal.close();
        Ok(deleted)
    }

    /// One below the parent, else the spouse's generation, else the eldest
    fn generation_for(&self, form: &MemberForm) -> u8 {
        let parent = form.parent_id.and_then(|id| self.members.get_by_id(id));
        let spouse = form.spouse_id.and_then(|id| self.members.get_by_id(id));
        match (parent, spouse) {
            (Some(parent), _) => parent.generation.saturating_add(1),
            (None, Some(spouse)) => spouse.generation,
            (None, None) => 1,
        }
    }
}
