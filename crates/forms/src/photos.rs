use shared_types::{ImageSlot, PhotoAttachment};

use crate::fields::FieldErrors;

/// Photos picked on the device for a record's image slots, not yet
/// uploaded. At most one per slot; attaching again replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoSlots<S: ImageSlot> {
    pending: Vec<(S, PhotoAttachment)>,
}

impl<S: ImageSlot> Default for PhotoSlots<S> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<S: ImageSlot> PhotoSlots<S> {
    pub fn attach(&mut self, slot: S, file_name: impl Into<String>, bytes: Vec<u8>) {
        self.remove(slot);
        self.pending
            .push((slot, PhotoAttachment::new(slot, file_name, bytes)));
    }

    pub fn remove(&mut self, slot: S) {
        self.pending.retain(|(s, _)| *s != slot);
    }

    pub fn is_attached(&self, slot: S) -> bool {
        self.pending.iter().any(|(s, _)| *s == slot)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn attachments(&self) -> Vec<PhotoAttachment> {
        self.pending.iter().map(|(_, p)| p.clone()).collect()
    }

    /// A slot is satisfied by a pending photo or a URL already on the
    /// record.
    pub fn require(&self, errors: &mut FieldErrors, slot: S, persisted: Option<&str>) {
        if !self.is_attached(slot) && persisted.is_none() {
            errors.insert(slot.field_name(), format!("{} photo is required", slot.label()));
        }
    }
}
