//! Batch mints and the fixed id ranges they reserve.
//!
//! A batch minted at `fixed_id` with `n` tokens occupies the slots
//! `[fixed_id, fixed_id + n)` of its creator, whatever the supply class of each
//! token. Two reservations of the same creator may not share a slot.
use alloy::primitives::Address;
use itertools::Itertools;
use log::{debug, warn};
use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
};

use crate::{
    error::BatchError,
    token_id::{SupplyClass, TokenId, TokenIdScheme, SLOT_BITS},
};

const SLOT_LIMIT: u64 = 1 << SLOT_BITS;

/// Half-open range of slots `[start, start + len)` reserved by a creator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IdRange {
    pub creator: Address,
    pub start: u64,
    pub len: u64,
}

impl IdRange {
    pub fn new(creator: Address, start: u64, len: u64) -> Result<Self, BatchError> {
        match start.checked_add(len) {
            Some(end) if end <= SLOT_LIMIT => Ok(Self {
                creator,
                start,
                len,
            }),
            _ => Err(BatchError::RangeOverflow { start, len }),
        }
    }

    /// Range of a single token minted at `fixed_id`.
    pub fn single(creator: Address, fixed_id: u64) -> Result<Self, BatchError> {
        Self::new(creator, fixed_id, 1)
    }

    /// First slot past the range.
    pub fn end(&self) -> u64 {
        self.start + self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, slot: u64) -> bool {
        (self.start..self.end()).contains(&slot)
    }

    /// Whether both ranges belong to the same creator and share at least one slot.
    pub fn overlaps(&self, other: &IdRange) -> bool {
        self.creator == other.creator
            && !self.is_empty()
            && !other.is_empty()
            && self.start < other.end()
            && other.start < self.end()
    }
}

impl Display for IdRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}..{})", self.creator, self.start, self.end())
    }
}

/// A `mintMultiple` call: the multi-copy tokens come first, in order, followed
/// by `num_nfts` NFTs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintBatch {
    pub creator: Address,
    pub fixed_id: u64,
    pub supplies: Vec<u64>,
    pub num_nfts: u64,
}

impl MintBatch {
    pub fn new(creator: Address, fixed_id: u64) -> Self {
        Self {
            creator,
            fixed_id,
            supplies: vec![],
            num_nfts: 0,
        }
    }

    pub fn with_supplies(mut self, supplies: impl IntoIterator<Item = u64>) -> Self {
        self.supplies.extend(supplies);
        self
    }

    pub fn with_nfts(mut self, num_nfts: u64) -> Self {
        self.num_nfts = num_nfts;
        self
    }

    /// Number of tokens minted by the batch.
    pub fn len(&self) -> u64 {
        self.supplies.len() as u64 + self.num_nfts
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn range(&self) -> Result<IdRange, BatchError> {
        IdRange::new(self.creator, self.fixed_id, self.len())
    }

    /// Ids emitted by the contract's `TransferBatch` event for this batch, in order.
    pub fn token_ids(&self, scheme: TokenIdScheme) -> Result<Vec<TokenId>, BatchError> {
        if let Some((position, supply)) = self.supplies.iter().find_position(|s| **s < 2) {
            return Err(BatchError::InvalidSupply {
                position,
                supply: *supply,
            });
        }
        self.range()?;
        if self.is_empty() {
            warn!("empty batch for creator {}", self.creator);
        }

        let multi = self
            .supplies
            .iter()
            .map(|&supply| SupplyClass::Multi { supply });
        let nfts = (0..self.num_nfts).map(|_| SupplyClass::Single { nft_index: 0 });
        let ids = multi
            .chain(nfts)
            .enumerate()
            .map(|(index, class)| scheme.encode(self.creator, class, self.fixed_id, index as u64))
            .collect::<Result<Vec<_>, _>>()?;
        debug!("batch {:?} yields ids {:?}", self.range()?, ids);
        Ok(ids)
    }
}

/// Book-keeping of the ranges reserved so far, mirroring the uniqueness check
/// the Asset contract performs on mint.
#[derive(Clone, Debug, Default)]
pub struct RangeRegistry {
    ranges: BTreeMap<Address, Vec<IdRange>>,
}

impl RangeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first reserved range `range` overlaps with, if any.
    pub fn conflict(&self, range: &IdRange) -> Option<IdRange> {
        self.ranges
            .get(&range.creator)
            .and_then(|reserved| reserved.iter().find(|r| r.overlaps(range)))
            .copied()
    }

    /// Record `range`, failing if any of its slots is already taken.
    pub fn reserve(&mut self, range: IdRange) -> Result<(), BatchError> {
        if let Some(existing) = self.conflict(&range) {
            return Err(BatchError::Overlap {
                requested: range,
                existing,
            });
        }
        debug!("reserving {range}");
        self.ranges.entry(range.creator).or_default().push(range);
        Ok(())
    }

    /// Reserve the slots of `batch` and return the ids it mints.
    pub fn reserve_batch(
        &mut self,
        batch: &MintBatch,
        scheme: TokenIdScheme,
    ) -> Result<Vec<TokenId>, BatchError> {
        let ids = batch.token_ids(scheme)?;
        self.reserve(batch.range()?)?;
        Ok(ids)
    }

    /// All ranges reserved by `creator`, sorted by start.
    pub fn reserved(&self, creator: &Address) -> Vec<IdRange> {
        self.ranges
            .get(creator)
            .map(|r| r.iter().copied().sorted_by_key(|r| r.start).collect())
            .unwrap_or_default()
    }
}
