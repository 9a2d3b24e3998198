//! Fixed-capacity entity pool.
//!
//! Slots are preallocated and reused through the `active` flag.  Spawning
//! takes the first inactive slot; when every slot is live the spawn is
//! dropped and the caller carries on.

use crate::entities::Entity;

#[derive(Clone, Debug, PartialEq)]
pub struct Pool {
    slots: Vec<Entity>,
}

impl Pool {
    /// `capacity` inactive slots, all sized `w` × `h`.
    pub fn new(capacity: usize, w: f32, h: f32) -> Self {
        Self {
            slots: vec![Entity::inactive(w, h); capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|e| e.active).count()
    }

    /// Activate the first free slot at `(x, y)`.  Returns its index, or
    /// `None` when the pool is full.
    pub fn spawn(&mut self, x: f32, y: f32) -> Option<usize> {
        let i = self.slots.iter().position(|e| !e.active)?;
        let slot = &mut self.slots[i];
        slot.x = x;
        slot.y = y;
        slot.active = true;
        Some(i)
    }

    pub fn get(&self, i: usize) -> Option<&Entity> {
        self.slots.get(i)
    }

    pub fn deactivate(&mut self, i: usize) {
        if let Some(e) = self.slots.get_mut(i) {
            e.active = false;
        }
    }

    /// Active entities with their slot index, in slot order.
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &Entity)> {
        self.slots.iter().enumerate().filter(|(_, e)| e.active)
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.slots.iter_mut().filter(|e| e.active)
    }
}
