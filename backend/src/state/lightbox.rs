/// Cursor of the full-size photo viewer.
///
/// Positions index into whatever list the viewer currently shows; the owner
/// passes the list length to every call and reports entries leaving or
/// joining the list through [`LightboxCursor::removed_at`] and
/// [`LightboxCursor::inserted_at`], so the cursor stays on the same entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LightboxCursor {
    open: bool,
    index: usize,
}

impl LightboxCursor {
    pub fn new(open: bool, index: usize) -> Self {
        Self { open, index }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Open at `index`, clamped to the last position.
    /// Returns the opened position, `None` when there is nothing to show.
    pub fn open(&mut self, index: usize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        self.open = true;
        self.index = index.min(len - 1);
        Some(self.index)
    }

    /// Close and rewind to the first position
    pub fn close(&mut self) {
        self.open = false;
        self.index = 0;
    }

    /// Advance one position, wrapping to the start
    pub fn next(&mut self, len: usize) -> Option<usize> {
        if !self.open || len == 0 {
            return None;
        }
        self.index = (self.index + 1) % len;
        Some(self.index)
    }

    /// Step back one position, wrapping to the end
    pub fn previous(&mut self, len: usize) -> Option<usize> {
        if !self.open || len == 0 {
            return None;
        }
        self.index = if self.index == 0 { len - 1 } else { self.index - 1 };
        Some(self.index)
    }

    /// The entry at `position` left the list, which now holds `len` entries
    pub fn removed_at(&mut self, position: usize, len: usize) {
        if self.open && position < self.index {
            self.index -= 1;
        }
        self.reconcile(len);
    }

    /// An entry joined the list at `position`, which now holds `len` entries
    pub fn inserted_at(&mut self, position: usize, len: usize) {
        if self.open && position <= self.index {
            self.index += 1;
        }
        self.reconcile(len);
    }

    /// Keep the cursor inside a list of `len` entries; closes on an empty list
    pub fn reconcile(&mut self, len: usize) {
        if len == 0 {
            self.close();
        } else if self.index >= len {
            self.index = len - 1;
        }
    }
}
