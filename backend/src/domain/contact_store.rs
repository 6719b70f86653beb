//! Contact directory and the log of messages sent through the contact form.
//!
//! Messages are append-only: they get an id and a UTC timestamp when
//! recorded and are never edited or removed. A message whose save fails is
//! not kept, so resubmitting the form records it once.

use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use shared::{
    Contact, ContactFormData, ContactId, ContactPatch, ContactStoreState, Message, MessageId,
    NewContact,
};

use super::ids::IdGenerator;
use super::notify::{ChangeNotifier, StoreChange, SubscriptionId};
use super::seed;
use crate::error::StoreError;
use crate::storage::{load_state, save_state, StateStorage, CONTACT_STORE_KEY};

pub struct ContactStore {
    contacts: Vec<Contact>,
    messages: Vec<Message>,
    contact_ids: IdGenerator,
    message_ids: IdGenerator,
    storage: Arc<dyn StateStorage>,
    notifier: ChangeNotifier,
}

impl ContactStore {
    pub fn open(storage: Arc<dyn StateStorage>) -> Result<Self, StoreError> {
        let state = match load_state::<ContactStoreState>(storage.as_ref(), CONTACT_STORE_KEY) {
            Ok(Some(state)) => state,
            Ok(None) => {
                info!("No persisted contacts, using seed data");
                seed::contact_state()
            }
            Err(StoreError::Serialization(e)) => {
                warn!("Persisted contacts are unreadable ({}), using seed data", e);
                seed::contact_state()
            }
            Err(e) => return Err(e),
        };
        Ok(Self::from_state(state, storage))
    }

    pub fn from_state(state: ContactStoreState, storage: Arc<dyn StateStorage>) -> Self {
        Self {
            contact_ids: IdGenerator::for_existing(state.contacts.iter().map(|c| c.id)),
            message_ids: IdGenerator::for_existing(state.messages.iter().map(|m| m.id)),
            contacts: state.contacts,
            messages: state.messages,
            storage,
            notifier: ChangeNotifier::new(),
        }
    }

    pub fn state(&self) -> ContactStoreState {
        ContactStoreState {
            contacts: self.contacts.clone(),
            messages: self.messages.clone(),
        }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
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

    pub fn add(&mut self, new_contact: NewContact) -> Result<ContactId, StoreError> {
        let previous = self.state();
        let id = self.contact_ids.next_id();
        info!("Adding contact {} ({})", new_contact.name, id);
        self.contacts.push(Contact {
            id,
            name: new_contact.name,
            role: new_contact.role,
            phone: new_contact.phone,
            email: new_contact.email,
            address: new_contact.address,
            emergency: new_contact.emergency,
        });
        self.commit(previous, StoreChange::ContactAdded(id))?;
        Ok(id)
    }

    pub fn update(&mut self, id: ContactId, patch: ContactPatch) -> Result<bool, StoreError> {
        let previous = self.state();
        let Some(contact) = self.contacts.iter_mut().find(|c| c.id == id) else {
            warn!("Cannot update unknown contact {}", id);
            return Ok(false);
        };

        if let Some(name) = patch.name {
            contact.name = name;
        }
        if let Some(role) = patch.role {
            contact.role = role;
        }
        if let Some(phone) = patch.phone {
            contact.phone = phone;
        }
        if let Some(email) = patch.email {
            contact.email = email;
        }
        if let Some(address) = patch.address {
            contact.address = address;
        }
        if let Some(emergency) = patch.emergency {
            contact.emergency = emergency;
        }

        info!("Updated contact {}", id);
        self.commit(previous, StoreChange::ContactUpdated(id))?;
        Ok(true)
    }

    pub fn delete(&mut self, id: ContactId) -> Result<bool, StoreError> {
        let previous = self.state();
        let before = self.contacts.len();
        self.contacts.retain(|c| c.id != id);
        if self.contacts.len() == before {
            warn!("Cannot delete unknown contact {}", id);
            return Ok(false);
        }

        info!("Deleted contact {}", id);
        self.commit(previous, StoreChange::ContactDeleted(id))?;
        Ok(true)
    }

    pub fn get_by_id(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    /// Contacts flagged for emergencies, in directory order
    pub fn emergency_contacts(&self) -> Vec<&Contact> {
        self.contacts.iter().filter(|c| c.emergency).collect()
    }

    /// Record a submitted contact form and return the new message id
    pub fn append_message(&mut self, form: ContactFormData) -> Result<MessageId, StoreError> {
        let previous = self.state();
        let id = self.message_ids.next_id();
        info!("Recording message '{}' from {} ({})", form.subject, form.email, id);
        self.messages.push(Message {
            id,
            timestamp: Utc::now(),
            form,
        });
        self.commit(previous, StoreChange::MessageAppended(id))?;
        Ok(id)
    }

    /// Every recorded message, oldest first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    fn commit(&mut self, previous: ContactStoreState, change: StoreChange) -> Result<(), StoreError> {
        if let Err(e) = save_state(self.storage.as_ref(), CONTACT_STORE_KEY, &self.state()) {
            warn!("Rolling back {:?}: {}", change, e);
            self.contacts = previous.contacts;
            self.messages = previous.messages;
            return Err(e);
        }
        self.notifier.notify(&change);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::test_utils::{sample_form, seeded_contact_store, FailingStorage};

    #[test]
    fn test_emergency_contacts_in_order() {
        let store = seeded_contact_store();
        let names: Vec<&str> = store.emergency_contacts().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Jean Dupont", "Marie Dupont"]);
    }

    #[test]
    fn test_contact_crud() {
        let mut store = seeded_contact_store();
        let id = store
            .add(NewContact {
                name: "Dr Moreau".to_string(),
                role: "Médecin de famille".to_string(),
                phone: "+33 1 40 00 00 00".to_string(),
                email: String::new(),
                address: String::new(),
                emergency: true,
            })
            .unwrap();
        assert_eq!(store.emergency_contacts().len(), 3);

        let patch = ContactPatch {
            emergency: Some(false),
            ..ContactPatch::default()
        };
        assert!(store.update(id, patch).unwrap());
        assert_eq!(store.emergency_contacts().len(), 2);
        assert_eq!(store.get_by_id(id).unwrap().role, "Médecin de famille");

        assert!(store.delete(id).unwrap());
        assert!(store.get_by_id(id).is_none());
        assert!(!store.delete(id).unwrap());
    }

    #[test]
    fn test_append_message_stamps_id_and_time() {
        let mut store = seeded_contact_store();
        let before = Utc::now();

        let first = store.append_message(sample_form()).unwrap();
        let second = store.append_message(sample_form()).unwrap();

        assert_ne!(first, second);
        let messages = store.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].id, first);
        assert_eq!(messages[0].form, sample_form());
        assert!(messages[0].timestamp >= before);
        assert!(messages[0].timestamp <= messages[1].timestamp);
    }

    #[test]
    fn test_unsaved_message_is_dropped() {
        let mut store = ContactStore::from_state(ContactStoreState::default(), Arc::new(FailingStorage));

        assert!(store.append_message(sample_form()).is_err());
        assert!(store.append_message(sample_form()).is_err());
        assert!(store.messages().is_empty());
    }

    #[test]
    fn test_failed_contact_edits_roll_back() {
        let seeded = seeded_contact_store().state();
        let mut store = ContactStore::from_state(seeded.clone(), Arc::new(FailingStorage));

        assert!(store.delete(1).is_err());
        let patch = ContactPatch {
            emergency: Some(false),
            ..ContactPatch::default()
        };
        assert!(store.update(2, patch).is_err());

        assert_eq!(store.state(), seeded);
        assert_eq!(store.emergency_contacts().len(), 2);
    }

    #[test]
    fn test_messages_survive_reopen() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = ContactStore::open(storage.clone()).unwrap();
        let id = store.append_message(sample_form()).unwrap();

        let reopened = ContactStore::open(storage).unwrap();
        assert_eq!(reopened.messages().len(), 1);
        assert_eq!(reopened.messages()[0].id, id);
        assert_eq!(reopened.contacts().len(), 4);
    }
}
