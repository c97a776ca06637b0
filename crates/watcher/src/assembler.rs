use crate::{decoder::DecodedEvent, error::ScannerResult, ScannerError};

use zkrollup_primitives::{Block, EventKind, Order, OrderEntry, RollupEvent};

/// Accumulates decoded events into per-block groupings and the cross-kind
/// order map.
///
/// Events must arrive in strictly increasing `(block number, log index)`
/// order, matching the on-chain order of an ascending log query.
#[derive(Debug, Default)]
pub(crate) struct BlockAssembler {
    blocks: Vec<Block>,
    order: Order,
    last_position: Option<(u64, u64)>,
}

impl BlockAssembler {
    /// Appends the event to its block, opening a new block on the first event
    /// for a block number.
    pub(crate) fn push(&mut self, event: DecodedEvent) -> ScannerResult<()> {
        if let Some((last_block, last_index)) = self.last_position {
            if (event.block_number, event.log_index) <= (last_block, last_index) {
                return Err(ScannerError::OutOfOrderLog {
                    block_number: event.block_number,
                    last_seen: last_block,
                });
            }
        }
        self.last_position = Some((event.block_number, event.log_index));

        if self.blocks.last().is_none_or(|block| block.number != event.block_number) {
            self.blocks.push(Block::new(
                event.block_number,
                event.block_hash,
                event.parent_hash,
                event.timestamp,
            ));
        }
        let block = self.blocks.last_mut().expect("at least one block");

        let (kind, position) = match event.event {
            RollupEvent::GlobalExitRoot(ger) => {
                block.global_exit_roots.push(ger);
                (EventKind::GlobalExitRoot, block.global_exit_roots.len() - 1)
            }
            RollupEvent::ForcedBatch(forced) => {
                block.forced_batches.push(forced);
                (EventKind::ForcedBatch, block.forced_batches.len() - 1)
            }
            RollupEvent::SequencedBatches(batches) => {
                block.sequenced_batches.push(batches);
                (EventKind::SequencedBatches, block.sequenced_batches.len() - 1)
            }
            RollupEvent::VerifiedBatch(verified) => {
                block.verified_batches.push(verified);
                (EventKind::VerifiedBatch, block.verified_batches.len() - 1)
            }
            RollupEvent::SequencedForceBatches(batches) => {
                block.sequenced_force_batches.push(batches);
                (EventKind::SequencedForceBatches, block.sequenced_force_batches.len() - 1)
            }
        };
        self.order.entry(block.hash).or_default().push(OrderEntry { kind, position });

        Ok(())
    }

    /// Consumes the assembler, returning the accumulated blocks and the order
    /// map.
    pub(crate) fn finish(self) -> (Vec<Block>, Order) {
        (self.blocks, self.order)
    }
}
