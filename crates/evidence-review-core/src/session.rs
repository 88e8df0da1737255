use crate::ParseError;
use crate::codec;
use crate::image::{ImageResolver, ImageSlot};
use crate::record::{FlagField, Record, RecordSet};
use crate::summary::ReviewSummary;
use crate::viewport::Viewport;

/// The loaded record sequence and the reviewer's position in it.
///
/// Owns the per-record view state (image slot and viewport) so that both are
/// rebuilt whenever the cursor lands on a different record.
#[derive(Debug, Clone)]
pub struct Session {
    records: RecordSet,
    cursor: usize,
    resolver: ImageResolver,
    image: Option<ImageSlot>,
    viewport: Viewport,
}

impl Session {
    pub fn new(records: RecordSet, resolver: ImageResolver) -> Self {
        let image = records.get(0).map(|r| resolver.slot_for(r));
        Self {
            records,
            cursor: 0,
            resolver,
            image,
            viewport: Viewport::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn current(&self) -> Option<&Record> {
        self.records.get(self.cursor)
    }

    pub fn is_first(&self) -> bool {
        self.cursor == 0
    }

    pub fn is_last(&self) -> bool {
        self.cursor + 1 >= self.records.len()
    }

    /// Move one record back. Returns whether the cursor moved.
    pub fn go_prev(&mut self) -> bool {
        self.move_to(self.cursor.saturating_sub(1))
    }

    /// Move one record forward. Returns whether the cursor moved.
    pub fn go_next(&mut self) -> bool {
        self.move_to(self.cursor + 1)
    }

    /// Jump to `index`, clamped to the valid range.
    pub fn select(&mut self, index: usize) -> bool {
        self.move_to(index)
    }

    fn move_to(&mut self, index: usize) -> bool {
        if self.records.is_empty() {
            return false;
        }
        let target = index.min(self.records.len() - 1);
        if target == self.cursor {
            return false;
        }
        self.cursor = target;
        self.viewport.reset();
        self.image = self.records.get(target).map(|r| self.resolver.slot_for(r));
        true
    }

    /// Flip `field` on the current record. Returns the new value, or `None`
    /// when there is no record.
    pub fn toggle(&mut self, field: FlagField) -> Option<bool> {
        self.records.get_mut(self.cursor).map(|r| r.toggle(field))
    }

    /// Full CSV text of every record, header included.
    pub fn to_csv(&self) -> Result<String, ParseError> {
        codec::to_csv(&self.records)
    }

    pub fn image(&self) -> Option<&ImageSlot> {
        self.image.as_ref()
    }

    /// Report that `url` failed to load for record `index`. Ignored when the
    /// reviewer has since moved on or the slot already shows something else.
    pub fn image_failed(&mut self, index: usize, url: &str) -> bool {
        if index != self.cursor {
            return false;
        }
        match self.image.as_mut() {
            Some(slot) if slot.url() == url => slot.fail(),
            _ => false,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn summary(&self) -> ReviewSummary {
        ReviewSummary::from_records(&self.records.records)
    }
}
