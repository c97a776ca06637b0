//! Primitive types for the zk-rollup L1 bridge.

pub use block::Block;
mod block;

pub use event::{
    EventKind, ForcedBatch, GlobalExitRoot, RollupEvent, SequencedBatch, SequencedForceBatch,
    VerifiedBatch,
};
mod event;

pub use order::{Order, OrderEntry};
mod order;

pub use sequence::Sequence;
mod sequence;
