//! Manual ordering of admin-curated collections.
//!
//! Every collection item carries a `display_order`. Values may be sparse or even duplicated
//! after a partially applied write, so every operation here starts from the canonical
//! sequence (ascending `display_order`, ties in input order) and renumbers from 0.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An item of a manually ordered collection.
pub trait Ordered {
    fn id(&self) -> i32;
    fn display_order(&self) -> i32;
    fn set_display_order(&mut self, order: i32);
}

/// A single position write to persist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PositionUpdate {
    #[schema(example = 12)]
    pub id: i32,
    #[schema(example = 0)]
    pub display_order: i32,
}

/// Result of a reorder: the full new sequence and the writes that produce it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reconciliation<T> {
    /// Items in their new order, each carrying its new `display_order`.
    pub sequence: Vec<T>,
    /// One update per item in `sequence`; empty for a no-op gesture.
    pub updates: Vec<PositionUpdate>,
}

impl<T> Reconciliation<T> {
    pub fn is_noop(&self) -> bool {
        self.updates.is_empty()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReorderError {
    #[error("Item {0} is not part of this collection")]
    UnknownItem(i32),
    #[error("Display order overflow")]
    Overflow,
}

/// Sort items ascending by `display_order`. Equal values keep their input order.
pub fn canonical_sequence<T: Ordered + Clone>(items: &[T]) -> Vec<T> {
    let mut sequence = items.to_vec();
    sequence.sort_by_key(|item| item.display_order());
    sequence
}

/// Apply a "drop `dragged` onto `target`" gesture.
///
/// The dragged item takes the target's slot and everything in between shifts by one.
/// The whole collection is then renumbered from 0, so gaps and duplicates left by earlier
/// failures are repaired by any real move. Dropping an item onto itself returns the input
/// unchanged with no updates.
pub fn reconcile_move<T: Ordered + Clone>(
    items: &[T],
    dragged: i32,
    target: i32,
) -> Result<Reconciliation<T>, ReorderError> {
    let mut sequence = canonical_sequence(items);
    let from = position_of(&sequence, dragged)?;
    let to = position_of(&sequence, target)?;

    if dragged == target {
        return Ok(Reconciliation {
            sequence: items.to_vec(),
            updates: Vec::new(),
        });
    }

    let moved = sequence.remove(from);
    sequence.insert(to, moved);

    assign_positions(sequence)
}

/// Renumber a collection contiguously from 0 without moving anything.
///
/// This is the explicit repair pass for collections with gaps or duplicate positions.
pub fn renumber<T: Ordered + Clone>(items: &[T]) -> Result<Reconciliation<T>, ReorderError> {
    assign_positions(canonical_sequence(items))
}

/// Position for an item appended to the end of a collection: one past the current maximum,
/// or 1 for an empty collection.
pub fn next_display_order<I>(orders: I) -> Result<i32, ReorderError>
where
    I: IntoIterator<Item = i32>,
{
    orders
        .into_iter()
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or(ReorderError::Overflow)
}

fn position_of<T: Ordered>(sequence: &[T], id: i32) -> Result<usize, ReorderError> {
    sequence
        .iter()
        .position(|item| item.id() == id)
        .ok_or(ReorderError::UnknownItem(id))
}

fn assign_positions<T: Ordered>(mut sequence: Vec<T>) -> Result<Reconciliation<T>, ReorderError> {
    let mut updates = Vec::with_capacity(sequence.len());
    for (index, item) in sequence.iter_mut().enumerate() {
        let order = i32::try_from(index).map_err(|_| ReorderError::Overflow)?;
        item.set_display_order(order);
        updates.push(PositionUpdate {
            id: item.id(),
            display_order: order,
        });
    }
    Ok(Reconciliation { sequence, updates })
}
