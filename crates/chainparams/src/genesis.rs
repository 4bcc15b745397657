//! Genesis block construction and the chain-identity self-check

use crate::block::{Block, BlockHeader, OutPoint, Script, Transaction, TxIn, TxOut, OP_0};
use crate::hash::Hash256;
use crate::network::NetworkType;
use crate::{Error, Result};

/// Message embedded in every genesis coinbase
pub const GENESIS_MESSAGE: &str = "https://www.rt.com/news/405288-erdogan-eu-turkey-speech";

/// Small integer pushed ahead of the message
pub const GENESIS_TAG: i64 = 42;

/// Genesis timestamp, shared by all networks
pub const GENESIS_TIME: u32 = 1_506_946_020;

/// Fixed inputs from which a genesis block is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisParams {
    /// Block and coinbase version
    pub version: i32,
    /// Block and coinbase timestamp
    pub time: u32,
    /// Compact difficulty target
    pub bits: u32,
    /// Nonce found off-line for `bits`
    pub nonce: u32,
    /// Human-readable bytes carried in the coinbase script
    pub message: &'static str,
    /// Integer pushed before the message
    pub tag: i64,
}

/// Coinbase signature script: `OP_0 <tag> <message>`.
pub fn coinbase_script(message: &str, tag: i64) -> Script {
    Script::new()
        .push_opcode(OP_0)
        .push_number(tag)
        .push_slice(message.as_bytes())
}

/// Build the genesis coinbase: one null input and one empty output.
pub fn genesis_coinbase(params: &GenesisParams) -> Transaction {
    Transaction {
        version: 1,
        time: params.time,
        inputs: vec![TxIn {
            previous_output: OutPoint::NULL,
            script_sig: coinbase_script(params.message, params.tag),
            sequence: u32::MAX,
        }],
        outputs: vec![TxOut::empty()],
        lock_time: 0,
    }
}

/// Assemble the genesis block deterministically from `params`.
pub fn build_genesis_block(params: &GenesisParams) -> Block {
    let coinbase = genesis_coinbase(params);
    let mut block = Block {
        header: BlockHeader {
            version: params.version,
            prev_block_hash: Hash256::ZERO,
            merkle_root: Hash256::ZERO,
            time: params.time,
            bits: params.bits,
            nonce: params.nonce,
        },
        transactions: vec![coinbase],
    };
    block.header.merkle_root = block.compute_merkle_root();
    block
}

/// Compare a genesis block against the hard-coded identity of `network`.
///
/// Returns the verified block hash.
pub fn verify_genesis(
    network: NetworkType,
    block: &Block,
    expected_hash: &Hash256,
    expected_merkle_root: &Hash256,
) -> Result<Hash256> {
    let merkle_root = block.compute_merkle_root();
    if merkle_root != *expected_merkle_root || block.header.merkle_root != merkle_root {
        return Err(Error::ChainIdentityMismatch {
            network,
            field: "merkle root",
            expected: *expected_merkle_root,
            computed: merkle_root,
        });
    }

    let hash = block.hash();
    if hash != *expected_hash {
        return Err(Error::ChainIdentityMismatch {
            network,
            field: "genesis hash",
            expected: *expected_hash,
            computed: hash,
        });
    }

    tracing::debug!("Verified {} genesis block {}", network, hash);
    Ok(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mainnet_params() -> GenesisParams {
        GenesisParams {
            version: 1,
            time: GENESIS_TIME,
            bits: 0x1e0f_ffff,
            nonce: 536_192,
            message: GENESIS_MESSAGE,
            tag: GENESIS_TAG,
        }
    }

    #[test]
    fn test_coinbase_script_layout() {
        let script = coinbase_script(GENESIS_MESSAGE, GENESIS_TAG);
        let bytes = script.as_bytes();
        assert_eq!(&bytes[..4], &[OP_0, 0x01, 0x2a, GENESIS_MESSAGE.len() as u8]);
        assert_eq!(&bytes[4..], GENESIS_MESSAGE.as_bytes());
    }

    #[test]
    fn test_coinbase_shape() {
        let tx = genesis_coinbase(&mainnet_params());
        assert!(tx.is_coinbase());
        assert_eq!(tx.outputs.len(), 1);
        assert!(tx.outputs[0].is_empty());
        assert_eq!(tx.time, GENESIS_TIME);
    }

    #[test]
    fn test_merkle_root_is_coinbase_txid() {
        let block = build_genesis_block(&mainnet_params());
        assert_eq!(block.header.merkle_root, block.transactions[0].txid());
        assert_eq!(
            block.header.merkle_root.to_string(),
            "94c24a215448c39c25d020ceb6ed37fa4cb70bfabf3b45091876a6d027746537"
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let a = build_genesis_block(&mainnet_params());
        let b = build_genesis_block(&mainnet_params());
        assert_eq!(a, b);
        assert_eq!(a.hash(), b.hash());
    }

    #[test]
    fn test_verify_reports_hash_mismatch() {
        let block = build_genesis_block(&mainnet_params());
        let merkle = block.header.merkle_root;
        let err = verify_genesis(NetworkType::Mainnet, &block, &Hash256::ZERO, &merkle)
            .unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(
            err,
            Error::ChainIdentityMismatch { field: "genesis hash", .. }
        ));
    }

    #[test]
    fn test_verify_reports_merkle_mismatch() {
        let block = build_genesis_block(&mainnet_params());
        let hash = block.hash();
        let err = verify_genesis(NetworkType::Mainnet, &block, &hash, &Hash256::ZERO)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::ChainIdentityMismatch { field: "merkle root", .. }
        ));
    }

    #[test]
    fn test_verify_accepts_matching_block() {
        let block = build_genesis_block(&mainnet_params());
        let hash = block.hash();
        let merkle = block.header.merkle_root;
        assert_eq!(
            verify_genesis(NetworkType::Mainnet, &block, &hash, &merkle).unwrap(),
            hash
        );
    }
}
