//! Route slate and per-route visibility.
//!
//! The slate is a fixed number of slots, replaced wholesale by every applied
//! response. Visibility flags are index-aligned with the slots and never touch
//! route data: hiding a route zeroes its line opacity and collapses its detail
//! card body, and showing it again is instant because the geometry stays
//! loaded.

use crate::details::{detail_rows, DetailCard};
use crate::payload::{BoundingBox, RoutePayload};
use crate::style::route_slot_color;

pub use crate::payload::RouteSlot;

pub const ROUTE_SLOT_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibilityVector {
    hidden: [bool; ROUTE_SLOT_COUNT],
}

impl VisibilityVector {
    pub fn len(&self) -> usize {
        self.hidden.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hidden.is_empty()
    }

    pub fn is_hidden(&self, index: usize) -> bool {
        self.hidden.get(index).copied().unwrap_or(false)
    }

    /// Flip one flag. Returns `false` for an index outside the slate.
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.hidden.get_mut(index) {
            Some(flag) => {
                *flag = !*flag;
                true
            }
            None => false,
        }
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.hidden
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresentationState {
    slots: [RouteSlot; ROUTE_SLOT_COUNT],
    visibility: VisibilityVector,
    bounding_box: Option<BoundingBox>,
}

impl PresentationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slots(&self) -> &[RouteSlot; ROUTE_SLOT_COUNT] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&RouteSlot> {
        self.slots.get(index)
    }

    pub fn visibility(&self) -> &VisibilityVector {
        &self.visibility
    }

    pub fn bounding_box(&self) -> Option<&BoundingBox> {
        self.bounding_box.as_ref()
    }

    /// Replace the whole slate with the payload's slots. Missing trailing
    /// entries become empty slots; entries past the slate are dropped. A
    /// bounding box in the payload replaces the current one; its absence
    /// leaves the current one in place.
    pub fn apply_route_response(&mut self, payload: RoutePayload) {
        let RoutePayload {
            slots,
            bounding_box,
        } = payload;
        if slots.len() > ROUTE_SLOT_COUNT {
            log::warn!(
                "route response has {} entries, keeping the first {}",
                slots.len(),
                ROUTE_SLOT_COUNT
            );
        }
        let mut incoming = slots.into_iter();
        self.slots = std::array::from_fn(|_| incoming.next().unwrap_or_default());
        if let Some(bounding_box) = bounding_box {
            self.apply_bounding_box(bounding_box);
        }
    }

    pub fn apply_bounding_box(&mut self, bounding_box: BoundingBox) {
        self.bounding_box = Some(bounding_box);
    }

    pub fn toggle_visibility(&mut self, index: usize) -> bool {
        self.visibility.toggle(index)
    }

    pub fn is_hidden(&self, index: usize) -> bool {
        self.visibility.is_hidden(index)
    }

    /// Rendered line opacity for a slot: 1 when shown, 0 when hidden.
    pub fn line_opacity(&self, index: usize) -> f32 {
        if self.visibility.is_hidden(index) {
            0.0
        } else {
            1.0
        }
    }

    /// Cards for every slot that carries metadata, in slot order.
    pub fn detail_cards(&self) -> Vec<DetailCard> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                let metadata = slot.metadata()?;
                let hidden = self.visibility.is_hidden(index);
                Some(DetailCard {
                    index,
                    color: route_slot_color(index),
                    hidden,
                    body: (!hidden).then(|| detail_rows(metadata)),
                })
            })
            .collect()
    }
}
