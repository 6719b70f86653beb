//! Photo gallery store.
//!
//! The selected category defines the visible view, and the lightbox cursor
//! always indexes into that view. Anything that can shrink the view keeps the
//! cursor valid: changing the category closes the lightbox, and deleting or
//! recategorising photos keeps the cursor on the photo it was showing (closing
//! it once the view is empty). A mutation whose save fails is rolled back.

use chrono::Local;
use log::{debug, info, warn};
use std::sync::Arc;

use shared::{CategoryCount, CategoryFilter, GalleryStoreState, NewPhoto, Photo, PhotoId, PhotoPatch};

use super::category::count_categories;
use super::ids::IdGenerator;
use super::notify::{ChangeNotifier, StoreChange, SubscriptionId};
use super::seed;
use crate::error::StoreError;
use crate::state::LightboxCursor;
use crate::storage::{load_state, save_state, StateStorage, GALLERY_STORE_KEY};

pub struct GalleryStore {
    photos: Vec<Photo>,
    selected_category: CategoryFilter,
    lightbox: LightboxCursor,
    ids: IdGenerator,
    storage: Arc<dyn StateStorage>,
    notifier: ChangeNotifier,
}

impl GalleryStore {
    pub fn open(storage: Arc<dyn StateStorage>) -> Result<Self, StoreError> {
        let state = match load_state::<GalleryStoreState>(storage.as_ref(), GALLERY_STORE_KEY) {
            Ok(Some(state)) => state,
            Ok(None) => {
                info!("No persisted gallery, using seed data");
                seed::gallery_state()
            }
            Err(StoreError::Serialization(e)) => {
                warn!("Persisted gallery is unreadable ({}), using seed data", e);
                seed::gallery_state()
            }
            Err(e) => return Err(e),
        };
        Ok(Self::from_state(state, storage))
    }

    pub fn from_state(state: GalleryStoreState, storage: Arc<dyn StateStorage>) -> Self {
        let ids = IdGenerator::for_existing(state.photos.iter().map(|p| p.id));
        let lightbox = if state.lightbox_open {
            LightboxCursor::new(true, state.current_photo_index)
        } else {
            LightboxCursor::default()
        };
        let mut store = Self {
            photos: state.photos,
            selected_category: state.selected_category,
            lightbox,
            ids,
            storage,
            notifier: ChangeNotifier::new(),
        };
        store.reconcile_lightbox();
        store
    }

    pub fn state(&self) -> GalleryStoreState {
        GalleryStoreState {
            photos: self.photos.clone(),
            selected_category: self.selected_category.clone(),
            lightbox_open: self.lightbox.is_open(),
            current_photo_index: self.lightbox.index(),
        }
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
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

    /// Add a photo; a missing upload date becomes today's local date
    pub fn add(&mut self, new_photo: NewPhoto) -> Result<PhotoId, StoreError> {
        let previous = self.state();
        let id = self.ids.next_id();
        let upload_date = new_photo
            .upload_date
            .unwrap_or_else(|| Local::now().date_naive());
        info!("Adding photo '{}' to '{}' ({})", new_photo.title, new_photo.category, id);
        self.photos.push(Photo {
            id,
            title: new_photo.title,
            description: new_photo.description,
            image_url: new_photo.image_url,
            thumbnail_url: new_photo.thumbnail_url,
            upload_date,
            uploaded_by: new_photo.uploaded_by,
            tags: new_photo.tags,
            category: new_photo.category,
        });
        self.commit(previous, StoreChange::PhotoAdded(id))?;
        Ok(id)
    }

    pub fn update(&mut self, id: PhotoId, patch: PhotoPatch) -> Result<bool, StoreError> {
        let previous = self.state();
        let was_at = self.visible_position(id);
        let Some(photo) = self.photos.iter_mut().find(|p| p.id == id) else {
            warn!("Cannot update unknown photo {}", id);
            return Ok(false);
        };

        if let Some(title) = patch.title {
            photo.title = title;
        }
        if let Some(description) = patch.description {
            photo.description = description;
        }
        if let Some(image_url) = patch.image_url {
            photo.image_url = image_url;
        }
        if let Some(thumbnail_url) = patch.thumbnail_url {
            photo.thumbnail_url = thumbnail_url;
        }
        if let Some(upload_date) = patch.upload_date {
            photo.upload_date = upload_date;
        }
        if let Some(uploaded_by) = patch.uploaded_by {
            photo.uploaded_by = uploaded_by;
        }
        if let Some(tags) = patch.tags {
            photo.tags = tags;
        }
        if let Some(category) = patch.category {
            photo.category = category;
        }

        let len = self.visible_len();
        match (was_at, self.visible_position(id)) {
            (Some(position), None) => self.lightbox.removed_at(position, len),
            (None, Some(position)) => self.lightbox.inserted_at(position, len),
            _ => self.lightbox.reconcile(len),
        }
        info!("Updated photo {}", id);
        self.commit(previous, StoreChange::PhotoUpdated(id))?;
        Ok(true)
    }

    pub fn delete(&mut self, id: PhotoId) -> Result<bool, StoreError> {
        let Some(index) = self.photos.iter().position(|p| p.id == id) else {
            warn!("Cannot delete unknown photo {}", id);
            return Ok(false);
        };
        let previous = self.state();
        let was_at = self.visible_position(id);

        self.photos.remove(index);
        let len = self.visible_len();
        match was_at {
            Some(position) => self.lightbox.removed_at(position, len),
            None => self.lightbox.reconcile(len),
        }
        info!("Deleted photo {}", id);
        self.commit(previous, StoreChange::PhotoDeleted(id))?;
        Ok(true)
    }

    pub fn get_by_id(&self, id: PhotoId) -> Option<&Photo> {
        self.photos.iter().find(|p| p.id == id)
    }

    pub fn filter_by_category(&self, filter: &CategoryFilter) -> Vec<&Photo> {
        self.photos
            .iter()
            .filter(|p| filter.matches(&p.category))
            .collect()
    }

    pub fn selected_category(&self) -> &CategoryFilter {
        &self.selected_category
    }

    /// Change the visible category. The lightbox closes since its cursor
    /// pointed into the previous view.
    pub fn set_selected_category(&mut self, filter: CategoryFilter) -> Result<(), StoreError> {
        if filter == self.selected_category {
            return Ok(());
        }
        debug!("Gallery category changed to {:?}", filter);
        let previous = self.state();
        self.selected_category = filter;
        self.lightbox.close();
        self.commit(previous, StoreChange::GalleryCategoryChanged)
    }

    /// Photos in the selected category
    pub fn filtered_photos(&self) -> Vec<&Photo> {
        self.filter_by_category(&self.selected_category)
    }

    /// Photo count per category, in order of first appearance
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        count_categories(self.photos.iter().map(|p| p.category.as_str()))
    }

    pub fn is_lightbox_open(&self) -> bool {
        self.lightbox.is_open()
    }

    pub fn current_photo_index(&self) -> usize {
        self.lightbox.index()
    }

    /// Open the lightbox on the `index`-th visible photo.
    /// Out of range indices land on the last photo; an empty view is ignored.
    pub fn open_lightbox(&mut self, index: usize) -> Result<Option<usize>, StoreError> {
        let previous = self.state();
        let len = self.visible_len();
        match self.lightbox.open(index, len) {
            Some(opened) => {
                self.commit(previous, StoreChange::LightboxOpened(opened))?;
                Ok(Some(opened))
            }
            None => {
                debug!("Ignoring lightbox open on an empty view");
                Ok(None)
            }
        }
    }

    pub fn close_lightbox(&mut self) -> Result<(), StoreError> {
        if !self.lightbox.is_open() {
            return Ok(());
        }
        let previous = self.state();
        self.lightbox.close();
        self.commit(previous, StoreChange::LightboxClosed)
    }

    pub fn next_photo(&mut self) -> Result<Option<usize>, StoreError> {
        let previous = self.state();
        let len = self.visible_len();
        match self.lightbox.next(len) {
            Some(index) => {
                self.commit(previous, StoreChange::LightboxMoved(index))?;
                Ok(Some(index))
            }
            None => Ok(None),
        }
    }

    pub fn previous_photo(&mut self) -> Result<Option<usize>, StoreError> {
        let previous = self.state();
        let len = self.visible_len();
        match self.lightbox.previous(len) {
            Some(index) => {
                self.commit(previous, StoreChange::LightboxMoved(index))?;
                Ok(Some(index))
            }
            None => Ok(None),
        }
    }

    /// Photo under the lightbox cursor while the lightbox is open
    pub fn current_photo(&self) -> Option<&Photo> {
        if !self.lightbox.is_open() {
            return None;
        }
        self.filtered_photos().get(self.lightbox.index()).copied()
    }

    fn visible_len(&self) -> usize {
        self.photos
            .iter()
            .filter(|p| self.selected_category.matches(&p.category))
            .count()
    }

    /// Position of photo `id` in the visible view
    fn visible_position(&self, id: PhotoId) -> Option<usize> {
        self.photos
            .iter()
            .filter(|p| self.selected_category.matches(&p.category))
            .position(|p| p.id == id)
    }

    fn reconcile_lightbox(&mut self) {
        let len = self.visible_len();
        self.lightbox.reconcile(len);
    }

    fn commit(&mut self, previous: GalleryStoreState, change: StoreChange) -> Result<(), StoreError> {
        if let Err(e) = save_state(self.storage.as_ref(), GALLERY_STORE_KEY, &self.state()) {
            warn!("Rolling back {:?}: {}", change, e);
            self.photos = previous.photos;
            self.selected_category = previous.selected_category;
            self.lightbox = LightboxCursor::new(previous.lightbox_open, previous.current_photo_index);
            return Err(e);
        }
        self.notifier.notify(&change);
        Ok(())
    }
}
