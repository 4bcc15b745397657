//! Consensus timing and difficulty limits

use crate::compact::compact_from_target;
use primitive_types::U256;

/// Retarget window length, in blocks of target spacing
pub const TIMESPAN_MULTIPLIER: u32 = 18;

/// Consensus parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsensusParams {
    /// Easiest allowed proof-of-work target
    pub pow_limit: U256,
    /// Easiest allowed proof-of-stake target
    pub pos_limit: U256,
    /// Block spacing in seconds while proof-of-work blocks are accepted
    pub pow_target_spacing: u32,
    /// Block spacing in seconds once past `last_pow_block`, if it differs
    pub pos_target_spacing: Option<u32>,
    /// Last height at which a proof-of-work block is accepted
    pub last_pow_block: u32,
    /// First height at which a proof-of-stake block is accepted
    pub start_pos_block: u32,
}

impl ConsensusParams {
    /// Target block spacing at `height`.
    ///
    /// Depends on the current chain height, so callers evaluate it per query
    /// instead of caching it.
    pub fn target_spacing(&self, height: u32) -> u32 {
        match self.pos_target_spacing {
            Some(spacing) if height > self.last_pow_block => spacing,
            _ => self.pow_target_spacing,
        }
    }

    /// Retarget timespan at `height`
    pub fn target_timespan(&self, height: u32) -> u32 {
        TIMESPAN_MULTIPLIER * self.target_spacing(height)
    }

    /// Check if a proof-of-work block is accepted at `height`
    pub fn is_proof_of_work_height(&self, height: u32) -> bool {
        height <= self.last_pow_block
    }

    /// Check if a proof-of-stake block is accepted at `height`
    pub fn is_proof_of_stake_height(&self, height: u32) -> bool {
        height >= self.start_pos_block
    }

    /// Proof-of-work limit in compact form
    pub fn pow_limit_bits(&self) -> u32 {
        compact_from_target(self.pow_limit)
    }

    /// Proof-of-stake limit in compact form
    pub fn pos_limit_bits(&self) -> u32 {
        compact_from_target(self.pos_limit)
    }
}
