//! # Domain Module
//!
//! The stores behind each page of the family site and the rules they enforce.
//!
//! ## Stores:
//! - [`MemberStore`]: family tree, directory search, birthdays, dark mode
//! - [`EventStore`]: calendar events, upcoming window, monthly view
//! - [`GalleryStore`]: photos, category filter, lightbox cursor
//! - [`NewsStore`]: articles and their category filter
//! - [`ContactStore`]: contact directory and the message log
//!
//! Every store owns its records, persists its state through a
//! [`StateStorage`](crate::storage::StateStorage) after each mutation and
//! announces the mutation to its subscribers.
//!
//! ## Supporting pieces:
//! - [`ContactForm`]: contact form fields and submission lifecycle
//! - [`ChangeNotifier`]: subscriber registry shared by the stores
//! - [`seed`]: content used until a store has been persisted once

pub mod birthdays;
pub mod category;
pub mod contact_form;
pub mod contact_store;
pub mod event_store;
pub mod gallery_store;
pub mod ids;
pub mod member_store;
pub mod news_store;
pub mod notify;
pub mod seed;

pub use contact_form::ContactForm;
pub use contact_store::ContactStore;
pub use event_store::EventStore;
pub use gallery_store::GalleryStore;
pub use member_store::MemberStore;
pub use news_store::NewsStore;
pub use notify::{ChangeNotifier, StoreChange, SubscriptionId};
