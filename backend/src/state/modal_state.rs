//! # Modal State Module
//!
//! Tracks the single dialog the site can show at a time: which kind of dialog
//! it is and which record it acts on. Opening a dialog replaces whatever was
//! open before; there is no stacking.

use shared::{ArticleId, ContactId, EventId, MemberId, PhotoId};

/// Which dialog is showing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalKind {
    #[default]
    None,
    Add,
    Edit,
    Delete,
}

/// Record a dialog acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalTarget {
    Member(MemberId),
    Event(EventId),
    Photo(PhotoId),
    Article(ArticleId),
    Contact(ContactId),
}

/// Dialog visibility, never persisted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalState {
    kind: ModalKind,
    target: Option<ModalTarget>,
}

impl ModalState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a dialog, replacing any open one.
    /// Opening with [`ModalKind::None`] is the same as closing.
    pub fn open(&mut self, kind: ModalKind, target: Option<ModalTarget>) {
        if kind == ModalKind::None {
            self.close();
            return;
        }
        self.kind = kind;
        self.target = target;
    }

    pub fn close(&mut self) {
        self.kind = ModalKind::None;
        self.target = None;
    }

    pub fn is_open(&self) -> bool {
        self.kind != ModalKind::None
    }

    pub fn kind(&self) -> ModalKind {
        self.kind
    }

    pub fn target(&self) -> Option<ModalTarget> {
        self.target
    }

    /// Member the dialog acts on, if it targets one
    pub fn target_member(&self) -> Option<MemberId> {
        match self.target {
            Some(ModalTarget::Member(id)) => Some(id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_closed() {
        let modal = ModalState::new();
        assert!(!modal.is_open());
        assert_eq!(modal.kind(), ModalKind::None);
        assert_eq!(modal.target(), None);
    }

    #[test]
    fn test_last_open_wins() {
        let mut modal = ModalState::new();
        modal.open(ModalKind::Edit, Some(ModalTarget::Member(3)));
        modal.open(ModalKind::Delete, Some(ModalTarget::Photo(2)));

        assert_eq!(modal.kind(), ModalKind::Delete);
        assert_eq!(modal.target(), Some(ModalTarget::Photo(2)));
        assert_eq!(modal.target_member(), None);
    }

    #[test]
    fn test_close_clears_target() {
        let mut modal = ModalState::new();
        modal.open(ModalKind::Add, None);
        assert!(modal.is_open());

        modal.close();
        assert_eq!(modal, ModalState::default());
    }

    #[test]
    fn test_opening_none_closes() {
        let mut modal = ModalState::new();
        modal.open(ModalKind::Edit, Some(ModalTarget::Member(1)));
        modal.open(ModalKind::None, Some(ModalTarget::Member(1)));
        assert!(!modal.is_open());
        assert_eq!(modal.target(), None);
    }
}
