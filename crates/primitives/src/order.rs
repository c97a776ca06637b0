use crate::EventKind;

use alloy_primitives::B256;
use std::collections::HashMap;

/// The position of one decoded event inside its block.
///
/// `position` indexes into the per-kind collection of the owning
/// [`Block`](crate::Block), while the entry's position within the block's
/// order sequence reflects the on-chain log index across all kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderEntry {
    /// The kind of the event.
    pub kind: EventKind,
    /// The index of the event within its per-kind collection.
    pub position: usize,
}

/// A mapping from block hash to the ordered sequence of events observed in
/// that block, in strictly increasing on-chain log-index order, spanning all
/// event kinds together.
pub type Order = HashMap<B256, Vec<OrderEntry>>;
