//! Cell types
//!
//! One grid slot of the simulation. Cells live inside chunks and are never
//! allocated on their own.

use serde::{Deserialize, Serialize};

/// Index into the element registry
pub type ElementId = u16;

/// A single slot in the world grid
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Local x coordinate inside the owning chunk
    pub x: u16,
    /// Local y coordinate inside the owning chunk
    pub y: u16,
    element: ElementId,
    /// Behavior-owned payload, moved together with the element
    data: Option<Vec<i32>>,
    /// Parity bit: equal to the world epoch once this material advanced this tick
    epoch: bool,
}

impl Cell {
    pub fn new(x: u16, y: u16, element: ElementId) -> Self {
        Self {
            x,
            y,
            element,
            data: None,
            epoch: false,
        }
    }

    #[inline]
    pub fn element(&self) -> ElementId {
        self.element
    }

    #[inline]
    pub fn data(&self) -> Option<&[i32]> {
        self.data.as_deref()
    }

    #[inline]
    pub fn epoch(&self) -> bool {
        self.epoch
    }

    pub fn local_pos(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    /// Replace the element in place. The previous payload belonged to the old
    /// element and is dropped.
    pub fn set_element(&mut self, element: ElementId) {
        self.element = element;
        self.data = None;
    }

    /// Attach a payload to the current element
    pub fn set_data(&mut self, data: Option<Vec<i32>>) {
        self.data = data;
    }

    pub fn set_epoch(&mut self, epoch: bool) {
        self.epoch = epoch;
    }

    /// Exchange element, payload and epoch between two slots.
    ///
    /// Local coordinates stay with the slot. This is the only way material
    /// moves through the grid, so the three fields always travel together.
    pub fn swap_contents(a: &mut Cell, b: &mut Cell) {
        std::mem::swap(&mut a.element, &mut b.element);
        std::mem::swap(&mut a.data, &mut b.data);
        std::mem::swap(&mut a.epoch, &mut b.epoch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_contents_keeps_coordinates() {
        let mut a = Cell::new(1, 2, 5);
        a.set_data(Some(vec![7, 8]));
        a.set_epoch(true);
        let mut b = Cell::new(3, 4, 9);

        Cell::swap_contents(&mut a, &mut b);

        assert_eq!(a.local_pos(), (1, 2));
        assert_eq!(b.local_pos(), (3, 4));
        assert_eq!(a.element(), 9);
        assert_eq!(b.element(), 5);
        assert_eq!(a.data(), None);
        assert_eq!(b.data(), Some(&[7, 8][..]));
        assert!(!a.epoch());
        assert!(b.epoch());
    }

    #[test]
    fn test_set_element_drops_payload() {
        let mut cell = Cell::new(0, 0, 1);
        cell.set_data(Some(vec![42]));
        cell.set_epoch(true);

        cell.set_element(2);

        assert_eq!(cell.element(), 2);
        assert_eq!(cell.data(), None);
        // Epoch belongs to the slot's update bookkeeping, not the element
        assert!(cell.epoch());
    }
}
