//! UI interaction state that lives beside the stores but is never persisted
//! on its own: the modal dialog and the lightbox cursor.

pub mod lightbox;
pub mod modal_state;

pub use lightbox::LightboxCursor;
pub use modal_state::{ModalKind, ModalState, ModalTarget};
