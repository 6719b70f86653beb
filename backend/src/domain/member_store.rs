//! Family member store.
//!
//! Holds the family tree as an insertion-ordered list and keeps the
//! relationship edges (`parent_id`, `children_ids`, `spouse_id`) consistent on
//! every mutation:
//!
//! - spouse links are symmetric; marrying A to B releases their previous partners
//! - setting a parent lists the member in that parent's `children_ids`
//!   and removes it from the previous parent's household
//! - listing a child in `children_ids` makes the member its parent, unless the
//!   child already belongs to the member's spouse; unlisting a child clears
//!   its `parent_id` when it pointed at the member
//! - deleting a member clears every reference other members hold to it
//!
//! Edges that point at unknown ids are kept as given and logged, no reverse
//! edge is written for them. A mutation whose save fails is rolled back.

use chrono::{Local, NaiveDate};
use log::{info, warn};
use std::sync::Arc;

use shared::{FamilyMember, FamilyStoreState, MemberId, MemberPatch, NewMember};

use super::birthdays;
use super::ids::IdGenerator;
use super::notify::{ChangeNotifier, StoreChange, SubscriptionId};
use super::seed;
use crate::error::StoreError;
use crate::storage::{load_state, save_state, StateStorage, FAMILY_STORE_KEY};

pub struct MemberStore {
    members: Vec<FamilyMember>,
    dark_mode: bool,
    search_query: String,
    ids: IdGenerator,
    storage: Arc<dyn StateStorage>,
    notifier: ChangeNotifier,
}

impl MemberStore {
    /// Rehydrate from storage, falling back to the seed family
    pub fn open(storage: Arc<dyn StateStorage>) -> Result<Self, StoreError> {
        let state = match load_state::<FamilyStoreState>(storage.as_ref(), FAMILY_STORE_KEY) {
            Ok(Some(state)) => {
                info!("Restored {} family members", state.members.len());
                state
            }
            Ok(None) => {
                info!("No persisted family state, using seed data");
                seed::family_state()
            }
            Err(StoreError::Serialization(e)) => {
                warn!("Persisted family state is unreadable ({}), using seed data", e);
                seed::family_state()
            }
            Err(e) => return Err(e),
        };
        Ok(Self::from_state(state, storage))
    }

    pub fn from_state(state: FamilyStoreState, storage: Arc<dyn StateStorage>) -> Self {
        let ids = IdGenerator::for_existing(state.members.iter().map(|m| m.id));
        Self {
            members: state.members,
            dark_mode: state.dark_mode,
            search_query: String::new(),
            ids,
            storage,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Snapshot of the persisted part of the store
    pub fn state(&self) -> FamilyStoreState {
        FamilyStoreState {
            members: self.members.clone(),
            dark_mode: self.dark_mode,
        }
    }

    pub fn members(&self) -> &[FamilyMember] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
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

    /// Add a member and return its freshly assigned id.
    /// Required fields are not validated here.
    pub fn add(&mut self, new_member: NewMember) -> Result<MemberId, StoreError> {
        let previous = self.state();
        let id = self.ids.next_id();
        let member = FamilyMember {
            id,
            name: new_member.name,
            birth_date: new_member.birth_date,
            death_date: new_member.death_date,
            role: new_member.role,
            generation: new_member.generation,
            parent_id: new_member.parent_id,
            spouse_id: new_member.spouse_id,
            children_ids: distinct_children(id, new_member.children_ids),
            photo: new_member.photo,
            bio: new_member.bio,
            contact: new_member.contact,
        };
        let (parent_id, spouse_id) = (member.parent_id, member.spouse_id);
        let children = member.children_ids.clone();

        info!("Adding family member {} ({})", member.name, id);
        self.members.push(member);
        self.relink_parent(id, None, parent_id);
        self.relink_spouse(id, None, spouse_id);
        self.relink_children(id, &[], &children);

        self.commit(previous, StoreChange::MemberAdded(id))?;
        Ok(id)
    }

    /// Merge `patch` into the member. Returns false if the id is unknown.
    pub fn update(&mut self, id: MemberId, patch: MemberPatch) -> Result<bool, StoreError> {
        let previous = self.state();
        let Some(member) = self.members.iter_mut().find(|m| m.id == id) else {
            warn!("Cannot update unknown family member {}", id);
            return Ok(false);
        };

        let (old_parent, old_spouse) = (member.parent_id, member.spouse_id);
        let old_children = member.children_ids.clone();
        apply_patch(member, patch);
        member.children_ids = distinct_children(id, std::mem::take(&mut member.children_ids));
        let (new_parent, new_spouse) = (member.parent_id, member.spouse_id);
        let new_children = member.children_ids.clone();

        self.relink_parent(id, old_parent, new_parent);
        self.relink_spouse(id, old_spouse, new_spouse);
        self.relink_children(id, &old_children, &new_children);

        info!("Updated family member {}", id);
        self.commit(previous, StoreChange::MemberUpdated(id))?;
        Ok(true)
    }

    /// Remove a member and every reference to it. Returns false if the id is unknown.
    pub fn delete(&mut self, id: MemberId) -> Result<bool, StoreError> {
        let Some(index) = self.members.iter().position(|m| m.id == id) else {
            warn!("Cannot delete unknown family member {}", id);
            return Ok(false);
        };
        let previous = self.state();

        let removed = self.members.remove(index);
        for member in &mut self.members {
            if member.parent_id == Some(id) {
                member.parent_id = None;
            }
            if member.spouse_id == Some(id) {
                member.spouse_id = None;
            }
            member.children_ids.retain(|&child| child != id);
        }

        info!("Deleted family member {} ({})", removed.name, id);
        self.commit(previous, StoreChange::MemberDeleted(id))?;
        Ok(true)
    }

    pub fn get_by_id(&self, id: MemberId) -> Option<&FamilyMember> {
        self.members.iter().find(|m| m.id == id)
    }

    /// Members whose `parent_id` is `parent_id`
    pub fn children_of(&self, parent_id: MemberId) -> Vec<&FamilyMember> {
        self.members
            .iter()
            .filter(|m| m.parent_id == Some(parent_id))
            .collect()
    }

    pub fn spouse_of(&self, id: MemberId) -> Option<&FamilyMember> {
        let spouse_id = self.get_by_id(id)?.spouse_id?;
        self.get_by_id(spouse_id)
    }

    pub fn by_generation(&self, generation: u8) -> Vec<&FamilyMember> {
        self.members
            .iter()
            .filter(|m| m.generation == generation)
            .collect()
    }

    /// Case-insensitive substring search over name, role and bio.
    /// An empty query returns every member.
    pub fn filter(&self, query: &str) -> Vec<&FamilyMember> {
        if query.is_empty() {
            return self.members.iter().collect();
        }

        let needle = query.to_lowercase();
        self.members
            .iter()
            .filter(|m| {
                m.name.to_lowercase().contains(&needle)
                    || m.role.to_lowercase().contains(&needle)
                    || m
                        .bio
                        .as_deref()
                        .is_some_and(|bio| bio.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Remember the directory search query; it is not persisted
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.search_query {
            return;
        }
        self.search_query = query;
        self.notifier.notify(&StoreChange::SearchQueryChanged);
    }

    /// Members matching the remembered search query
    pub fn filtered_members(&self) -> Vec<&FamilyMember> {
        self.filter(&self.search_query)
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn toggle_dark_mode(&mut self) -> Result<bool, StoreError> {
        let previous = self.state();
        self.dark_mode = !self.dark_mode;
        self.commit(previous, StoreChange::DarkModeToggled(self.dark_mode))?;
        Ok(self.dark_mode)
    }

    /// Age in whole years on `today`, or at death for deceased members
    pub fn age_of(&self, id: MemberId, today: NaiveDate) -> Option<i32> {
        let member = self.get_by_id(id)?;
        let until = member.death_date.unwrap_or(today);
        Some(birthdays::age_on(member.birth_date, until))
    }

    /// Whether a living member's next birthday is within `window_days`
    pub fn has_upcoming_birthday(&self, id: MemberId, today: NaiveDate, window_days: u32) -> bool {
        self.get_by_id(id)
            .filter(|m| m.death_date.is_none())
            .is_some_and(|m| birthdays::has_upcoming_birthday(m.birth_date, today, window_days))
    }

    /// Living members whose next birthday is within `window_days`,
    /// soonest first
    pub fn upcoming_birthdays(&self, today: NaiveDate, window_days: u32) -> Vec<&FamilyMember> {
        let mut upcoming: Vec<(i64, &FamilyMember)> = self
            .members
            .iter()
            .filter(|m| m.death_date.is_none())
            .filter_map(|m| {
                birthdays::days_until_birthday(m.birth_date, today)
                    .filter(|&days| days <= i64::from(window_days))
                    .map(|days| (days, m))
            })
            .collect();
        upcoming.sort_by_key(|(days, _)| *days);
        upcoming.into_iter().map(|(_, m)| m).collect()
    }

    /// Upcoming birthdays relative to the local calendar date
    pub fn upcoming_birthdays_today(&self, window_days: u32) -> Vec<&FamilyMember> {
        self.upcoming_birthdays(Local::now().date_naive(), window_days)
    }

    fn find_mut(&mut self, id: MemberId) -> Option<&mut FamilyMember> {
        self.members.iter_mut().find(|m| m.id == id)
    }

    fn relink_parent(&mut self, child: MemberId, old: Option<MemberId>, new: Option<MemberId>) {
        if old == new {
            return;
        }
        if let Some(previous) = old {
            self.detach_child(child, previous);
        }
        if let Some(parent_id) = new {
            match self.find_mut(parent_id) {
                Some(parent) => {
                    if !parent.children_ids.contains(&child) {
                        parent.children_ids.push(child);
                    }
                }
                None => warn!("Member {} references unknown parent {}", child, parent_id),
            }
        }
    }

    /// Follow a change of `parent`'s `children_ids` from `old` to `new`
    fn relink_children(&mut self, parent: MemberId, old: &[MemberId], new: &[MemberId]) {
        let co_parent = self.get_by_id(parent).and_then(|m| m.spouse_id);

        for &child_id in old.iter().filter(|c| !new.contains(c)) {
            let cleared = match self.find_mut(child_id) {
                Some(child) if child.parent_id == Some(parent) => {
                    child.parent_id = None;
                    true
                }
                _ => false,
            };
            if cleared {
                self.detach_child(child_id, parent);
            }
        }

        for &child_id in new.iter().filter(|c| !old.contains(c)) {
            let current = match self.get_by_id(child_id) {
                Some(child) => child.parent_id,
                None => {
                    warn!("Member {} lists unknown child {}", parent, child_id);
                    continue;
                }
            };
            if current == Some(parent) || (current.is_some() && current == co_parent) {
                continue;
            }
            if let Some(previous) = current {
                self.detach_child(child_id, previous);
            }
            if let Some(child) = self.find_mut(child_id) {
                child.parent_id = Some(parent);
            }
        }
    }

    /// Remove `child` from the lists of `parent` and of `parent`'s spouse
    fn detach_child(&mut self, child: MemberId, parent: MemberId) {
        let spouse = self.get_by_id(parent).and_then(|m| m.spouse_id);
        for household in std::iter::once(parent).chain(spouse) {
            if let Some(member) = self.find_mut(household) {
                member.children_ids.retain(|&c| c != child);
            }
        }
    }

    fn relink_spouse(&mut self, member: MemberId, old: Option<MemberId>, new: Option<MemberId>) {
        if old == new {
            return;
        }
        if let Some(previous) = old.and_then(|id| self.find_mut(id)) {
            if previous.spouse_id == Some(member) {
                previous.spouse_id = None;
            }
        }
        let Some(spouse_id) = new else {
            return;
        };
        let abandoned = match self.find_mut(spouse_id) {
            Some(spouse) => spouse.spouse_id.replace(member),
            None => {
                warn!("Member {} references unknown spouse {}", member, spouse_id);
                return;
            }
        };
        if let Some(abandoned_id) = abandoned.filter(|&id| id != member) {
            if let Some(abandoned) = self.find_mut(abandoned_id) {
                if abandoned.spouse_id == Some(spouse_id) {
                    abandoned.spouse_id = None;
                }
            }
        }
    }

    /// Save, then notify. On a failed save the store goes back to `previous`.
    fn commit(&mut self, previous: FamilyStoreState, change: StoreChange) -> Result<(), StoreError> {
        if let Err(e) = save_state(self.storage.as_ref(), FAMILY_STORE_KEY, &self.state()) {
            warn!("Rolling back {:?}: {}", change, e);
            self.members = previous.members;
            self.dark_mode = previous.dark_mode;
            return Err(e);
        }
        self.notifier.notify(&change);
        Ok(())
    }
}

/// Drop repeated ids and the member itself, keeping first-seen order
fn distinct_children(member: MemberId, children: Vec<MemberId>) -> Vec<MemberId> {
    let mut distinct = Vec::with_capacity(children.len());
    for child in children {
        if child != member && !distinct.contains(&child) {
            distinct.push(child);
        }
    }
    distinct
}

fn apply_patch(member: &mut FamilyMember, patch: MemberPatch) {
    if let Some(name) = patch.name {
        member.name = name;
    }
    if let Some(birth_date) = patch.birth_date {
        member.birth_date = birth_date;
    }
    if let Some(death_date) = patch.death_date {
        member.death_date = death_date;
    }
    if let Some(role) = patch.role {
        member.role = role;
    }
    if let Some(generation) = patch.generation {
        member.generation = generation;
    }
    if let Some(parent_id) = patch.parent_id {
        member.parent_id = parent_id;
    }
    if let Some(spouse_id) = patch.spouse_id {
        member.spouse_id = spouse_id;
    }
    if let Some(children_ids) = patch.children_ids {
        member.children_ids = children_ids;
    }
    if let Some(photo) = patch.photo {
        member.photo = photo;
    }
    if let Some(bio) = patch.bio {
        member.bio = bio;
    }
    if let Some(contact) = patch.contact {
        member.contact = contact;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::test_utils::{date, seeded_member_store, FailingStorage};
    use std::sync::Mutex;

    fn new_member(name: &str, role: &str) -> NewMember {
        NewMember::new(name, date(2012, 5, 4), role, 3)
    }

    #[test]
    fn test_add_then_get_by_id() {
        let mut store = seeded_member_store();
        let mut payload = new_member("Hugo Leroy", "Petit-fils");
        payload.bio = Some("Aime le football.".to_string());

        let id = store.add(payload.clone()).unwrap();

        let member = store.get_by_id(id).unwrap();
        assert_eq!(member.id, id);
        assert_eq!(member.name, payload.name);
        assert_eq!(member.birth_date, payload.birth_date);
        assert_eq!(member.role, payload.role);
        assert_eq!(member.bio, payload.bio);
        assert!(member.children_ids.is_empty());
        assert_eq!(store.len(), 10);
        assert_eq!(store.members().last().map(|m| m.id), Some(id));
    }

    #[test]
    fn test_added_ids_are_unique() {
        let mut store = seeded_member_store();
        let first = store.add(new_member("A", "x")).unwrap();
        let second = store.add(new_member("B", "y")).unwrap();
        assert_ne!(first, second);
        assert!(first > 9);
    }

    #[test]
    fn test_update_changes_only_patched_fields() {
        let mut store = seeded_member_store();
        let before = store.get_by_id(1).unwrap().clone();
        assert_eq!(before.name, "Jean Dupont");
        assert_eq!(before.role, "Père");

        let patch = MemberPatch {
            role: Some("Grand-père".to_string()),
            ..MemberPatch::default()
        };
        assert!(store.update(1, patch).unwrap());

        let after = store.get_by_id(1).unwrap();
        assert_eq!(after.role, "Grand-père");
        assert_eq!(
            FamilyMember {
                role: before.role.clone(),
                ..after.clone()
            },
            before
        );
    }

    #[test]
    fn test_update_unknown_member_is_silent() {
        let mut store = seeded_member_store();
        let before = store.state();

        let patch = MemberPatch {
            name: Some("Personne".to_string()),
            ..MemberPatch::default()
        };
        assert!(!store.update(4242, patch).unwrap());
        assert_eq!(store.state(), before);
    }

    #[test]
    fn test_patch_can_clear_optional_fields() {
        let mut store = seeded_member_store();
        let patch = MemberPatch {
            bio: Some(None),
            photo: Some(None),
            ..MemberPatch::default()
        };
        store.update(6, patch).unwrap();

        let lucas = store.get_by_id(6).unwrap();
        assert_eq!(lucas.bio, None);
        assert_eq!(lucas.photo, None);
        assert_eq!(lucas.name, "Lucas Dupont");
    }

    #[test]
    fn test_delete_removes_member_and_references() {
        let mut store = seeded_member_store();

        assert!(store.delete(3).unwrap());

        assert!(store.get_by_id(3).is_none());
        assert!(store.filter("").iter().all(|m| m.id != 3));
        for member in store.members() {
            assert_ne!(member.parent_id, Some(3));
            assert_ne!(member.spouse_id, Some(3));
            assert!(!member.children_ids.contains(&3));
        }
        assert_eq!(store.get_by_id(5).unwrap().spouse_id, None);
        assert_eq!(store.get_by_id(6).unwrap().parent_id, None);
        assert_eq!(store.get_by_id(1).unwrap().children_ids, vec![4]);
    }

    #[test]
    fn test_delete_unknown_member_is_silent() {
        let mut store = seeded_member_store();
        assert!(!store.delete(999).unwrap());
        assert_eq!(store.len(), 9);
    }

    #[test]
    fn test_children_spouse_and_generation_lookups() {
        let store = seeded_member_store();

        let children: Vec<&str> = store.children_of(1).iter().map(|m| m.name.as_str()).collect();
        assert_eq!(children, vec!["Pierre Dupont", "Sophie Dupont"]);

        assert_eq!(store.spouse_of(3).map(|m| m.name.as_str()), Some("Claire Martin"));
        assert!(store.spouse_of(6).is_none());
        assert!(store.spouse_of(404).is_none());

        let grandchildren: Vec<MemberId> = store.by_generation(3).iter().map(|m| m.id).collect();
        assert_eq!(grandchildren, vec![6, 7, 9]);
    }

    #[test]
    fn test_filter_is_case_insensitive_across_fields() {
        let store = seeded_member_store();

        let by_name: Vec<MemberId> = store.filter("DUPONT").iter().map(|m| m.id).collect();
        assert_eq!(by_name, vec![1, 2, 3, 4, 6, 7]);

        let by_role: Vec<MemberId> = store.filter("petite-fille").iter().map(|m| m.id).collect();
        assert_eq!(by_role, vec![7, 9]);

        let by_bio: Vec<MemberId> = store.filter("gastronomie").iter().map(|m| m.id).collect();
        assert_eq!(by_bio, vec![8]);

        assert!(store.filter("introuvable").is_empty());
    }

    #[test]
    fn test_empty_filter_returns_everything_in_order() {
        let store = seeded_member_store();
        let all: Vec<MemberId> = store.filter("").iter().map(|m| m.id).collect();
        assert_eq!(all, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_search_query_drives_filtered_members() {
        let mut store = seeded_member_store();
        store.set_search_query("leroy");
        assert_eq!(store.search_query(), "leroy");
        let ids: Vec<MemberId> = store.filtered_members().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![8, 9]);

        store.set_search_query("");
        assert_eq!(store.filtered_members().len(), 9);
    }

    #[test]
    fn test_adding_child_links_parent() {
        let mut store = seeded_member_store();
        let mut payload = new_member("Nina Leroy", "Petite-fille");
        payload.parent_id = Some(4);

        let id = store.add(payload).unwrap();

        assert_eq!(store.get_by_id(4).unwrap().children_ids, vec![9, id]);
        assert_eq!(store.get_by_id(id).unwrap().parent_id, Some(4));
    }

    #[test]
    fn test_changing_parent_moves_child_between_lists() {
        let mut store = seeded_member_store();
        let patch = MemberPatch {
            parent_id: Some(Some(4)),
            ..MemberPatch::default()
        };
        store.update(7, patch).unwrap();

        assert_eq!(store.get_by_id(3).unwrap().children_ids, vec![6]);
        assert_eq!(store.get_by_id(4).unwrap().children_ids, vec![9, 7]);
    }

    #[test]
    fn test_listing_children_adopts_them() {
        let mut store = seeded_member_store();
        let mut payload = new_member("Nicolas Leroy", "Oncle");
        payload.children_ids = vec![9, 9];

        let id = store.add(payload).unwrap();

        assert_eq!(store.get_by_id(id).unwrap().children_ids, vec![9]);
        assert_eq!(store.get_by_id(9).unwrap().parent_id, Some(id));
        assert!(store.get_by_id(4).unwrap().children_ids.is_empty());
        assert!(store.get_by_id(8).unwrap().children_ids.is_empty());
    }

    #[test]
    fn test_patching_children_moves_them() {
        let mut store = seeded_member_store();
        let patch = MemberPatch {
            children_ids: Some(vec![6, 7, 9]),
            ..MemberPatch::default()
        };
        store.update(5, patch).unwrap();

        // Claire's own children keep Pierre as recorded parent
        assert_eq!(store.get_by_id(6).unwrap().parent_id, Some(3));
        assert_eq!(store.get_by_id(9).unwrap().parent_id, Some(5));
        assert!(store.get_by_id(4).unwrap().children_ids.is_empty());
        assert_eq!(store.get_by_id(5).unwrap().children_ids, vec![6, 7, 9]);
        assert_eq!(store.children_of(5).len(), 1);
    }

    #[test]
    fn test_unlisting_a_child_clears_its_parent() {
        let mut store = seeded_member_store();
        let patch = MemberPatch {
            children_ids: Some(vec![6]),
            ..MemberPatch::default()
        };
        store.update(3, patch).unwrap();

        assert_eq!(store.get_by_id(7).unwrap().parent_id, None);
        assert_eq!(store.get_by_id(3).unwrap().children_ids, vec![6]);
        assert_eq!(store.get_by_id(5).unwrap().children_ids, vec![6]);
        assert_eq!(store.get_by_id(6).unwrap().parent_id, Some(3));
    }

    #[test]
    fn test_failed_save_rolls_back_members() {
        let seeded = seeded_member_store().state();
        let mut store = MemberStore::from_state(seeded.clone(), Arc::new(FailingStorage));

        let mut payload = new_member("Nina Leroy", "Petite-fille");
        payload.parent_id = Some(4);
        assert!(store.add(payload).is_err());

        let patch = MemberPatch {
            spouse_id: Some(Some(6)),
            ..MemberPatch::default()
        };
        assert!(store.update(9, patch).is_err());
        assert!(store.delete(3).is_err());
        assert!(store.toggle_dark_mode().is_err());

        assert_eq!(store.state(), seeded);
        assert_eq!(store.get_by_id(4).unwrap().children_ids, vec![9]);
        assert!(!store.dark_mode());
    }

    #[test]
    fn test_spouse_links_are_symmetric() {
        let mut store = seeded_member_store();
        let id = store.add(new_member("Camille Roux", "Amie")).unwrap();

        let patch = MemberPatch {
            spouse_id: Some(Some(id)),
            ..MemberPatch::default()
        };
        store.update(6, patch).unwrap();
        assert_eq!(store.get_by_id(id).unwrap().spouse_id, Some(6));

        // Remarrying Lucas releases Camille
        let other = store.add(new_member("Inès Blanc", "Amie")).unwrap();
        let patch = MemberPatch {
            spouse_id: Some(Some(other)),
            ..MemberPatch::default()
        };
        store.update(6, patch).unwrap();
        assert_eq!(store.get_by_id(id).unwrap().spouse_id, None);
        assert_eq!(store.get_by_id(other).unwrap().spouse_id, Some(6));
    }

    #[test]
    fn test_marrying_a_married_member_releases_their_partner() {
        let mut store = seeded_member_store();
        let mut payload = new_member("Paul Girard", "Ami");
        payload.spouse_id = Some(5);

        let id = store.add(payload).unwrap();

        assert_eq!(store.get_by_id(5).unwrap().spouse_id, Some(id));
        assert_eq!(store.get_by_id(3).unwrap().spouse_id, None);
    }

    #[test]
    fn test_unknown_references_are_kept_unchecked() {
        let mut store = seeded_member_store();
        let mut payload = new_member("Orphelin", "Cousin");
        payload.parent_id = Some(777);
        payload.spouse_id = Some(778);

        let id = store.add(payload).unwrap();

        let member = store.get_by_id(id).unwrap();
        assert_eq!(member.parent_id, Some(777));
        assert_eq!(member.spouse_id, Some(778));
        assert!(store.spouse_of(id).is_none());
    }

    #[test]
    fn test_dark_mode_toggle() {
        let mut store = seeded_member_store();
        assert!(!store.dark_mode());
        assert!(store.toggle_dark_mode().unwrap());
        assert!(!store.toggle_dark_mode().unwrap());
    }

    #[test]
    fn test_age_and_upcoming_birthdays() {
        let store = seeded_member_store();
        let today = date(2024, 3, 1);

        assert_eq!(store.age_of(1, today), Some(73));
        assert_eq!(store.age_of(404, today), None);

        let names: Vec<&str> = store
            .upcoming_birthdays(today, 30)
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, vec!["Léa Leroy", "Jean Dupont"]);
        assert!(store.has_upcoming_birthday(9, today, 30));
        assert!(!store.has_upcoming_birthday(4, today, 30));
        assert!(!store.has_upcoming_birthday(404, today, 30));
    }

    #[test]
    fn test_deceased_members_age_at_death_and_skip_birthdays() {
        let mut store = seeded_member_store();
        let patch = MemberPatch {
            death_date: Some(Some(date(2020, 1, 1))),
            ..MemberPatch::default()
        };
        store.update(1, patch).unwrap();

        assert_eq!(store.age_of(1, date(2024, 3, 1)), Some(69));
        assert!(store
            .upcoming_birthdays(date(2024, 3, 1), 30)
            .iter()
            .all(|m| m.id != 1));
    }

    #[test]
    fn test_mutations_notify_subscribers() {
        let mut store = seeded_member_store();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |change| sink.lock().unwrap().push(change.clone()));

        let id = store.add(new_member("Zoé", "Cousine")).unwrap();
        store.update(id, MemberPatch::default()).unwrap();
        store.update(404, MemberPatch::default()).unwrap();
        store.delete(id).unwrap();
        store.delete(id).unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                StoreChange::MemberAdded(id),
                StoreChange::MemberUpdated(id),
                StoreChange::MemberDeleted(id),
            ]
        );
    }

    #[test]
    fn test_persists_members_and_dark_mode_only() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = MemberStore::open(storage.clone()).unwrap();
        store.set_search_query("dupont");
        store.toggle_dark_mode().unwrap();
        let id = store.add(new_member("Jules", "Cousin")).unwrap();

        let reopened = MemberStore::open(storage).unwrap();
        assert!(reopened.dark_mode());
        assert!(reopened.get_by_id(id).is_some());
        assert_eq!(reopened.search_query(), "");
    }

    #[test]
    fn test_corrupt_state_falls_back_to_seed() {
        let storage = Arc::new(MemoryStorage::new());
        storage.save_raw(FAMILY_STORE_KEY, "{\"members\": 12}").unwrap();

        let store = MemberStore::open(storage).unwrap();
        assert_eq!(store.len(), 9);
    }
}
