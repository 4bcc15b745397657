//! Minimal block and transaction model with consensus encoding
//!
//! Covers what the genesis block needs: scripts built from pushes, the
//! timestamped transaction layout used by proof-of-stake chains, the 80-byte
//! block header and Merkle root computation.

use crate::hash::{sha256d, Hash256};

/// Push an empty byte vector (also the number zero)
pub const OP_0: u8 = 0x00;
/// Next byte is a push length
pub const OP_PUSHDATA1: u8 = 0x4c;
/// Next two bytes are a push length
pub const OP_PUSHDATA2: u8 = 0x4d;
/// Next four bytes are a push length
pub const OP_PUSHDATA4: u8 = 0x4e;

/// Append a CompactSize length prefix.
pub fn write_compact_size(out: &mut Vec<u8>, n: u64) {
    match n {
        0..=0xfc => out.push(n as u8),
        0xfd..=0xffff => {
            out.push(0xfd);
            out.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            out.push(0xfe);
            out.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            out.push(0xff);
            out.extend_from_slice(&n.to_le_bytes());
        }
    }
}

/// Minimal signed little-endian encoding of a script number.
fn script_num_bytes(value: i64) -> Vec<u8> {
    if value == 0 {
        return Vec::new();
    }

    let negative = value < 0;
    let mut abs = value.unsigned_abs();
    let mut bytes = Vec::new();
    while abs > 0 {
        bytes.push((abs & 0xff) as u8);
        abs >>= 8;
    }

    // The top bit carries the sign; add a byte if the magnitude already uses it
    let last = bytes.len() - 1;
    if bytes[last] & 0x80 != 0 {
        bytes.push(if negative { 0x80 } else { 0x00 });
    } else if negative {
        bytes[last] |= 0x80;
    }
    bytes
}

/// A script, stored as its serialized bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script(Vec<u8>);

impl Script {
    /// Empty script
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a bare opcode
    pub fn push_opcode(mut self, opcode: u8) -> Self {
        self.0.push(opcode);
        self
    }

    /// Append a number as a data push of its minimal encoding.
    ///
    /// Small values are pushed as data rather than `OP_1..OP_16`, matching
    /// how big-number operands are serialized.
    pub fn push_number(self, value: i64) -> Self {
        let bytes = script_num_bytes(value);
        self.push_slice(&bytes)
    }

    /// Append a data push with the shortest length prefix.
    pub fn push_slice(mut self, data: &[u8]) -> Self {
        let len = data.len();
        if len < OP_PUSHDATA1 as usize {
            self.0.push(len as u8);
        } else if len <= 0xff {
            self.0.push(OP_PUSHDATA1);
            self.0.push(len as u8);
        } else if len <= 0xffff {
            self.0.push(OP_PUSHDATA2);
            self.0.extend_from_slice(&(len as u16).to_le_bytes());
        } else {
            self.0.push(OP_PUSHDATA4);
            self.0.extend_from_slice(&(len as u32).to_le_bytes());
        }
        self.0.extend_from_slice(data);
        self
    }

    /// Serialized script bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Check if the script is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn consensus_encode(&self, out: &mut Vec<u8>) {
        write_compact_size(out, self.0.len() as u64);
        out.extend_from_slice(&self.0);
    }
}

/// Reference to a previous transaction output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutPoint {
    /// Spent transaction id
    pub txid: Hash256,
    /// Output index
    pub vout: u32,
}

impl OutPoint {
    /// The outpoint of a coinbase input, which spends nothing
    pub const NULL: OutPoint = OutPoint {
        txid: Hash256::ZERO,
        vout: u32::MAX,
    };

    /// Check if this is the null outpoint
    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }
}

/// Transaction input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxIn {
    /// Spent output
    pub previous_output: OutPoint,
    /// Unlocking script (arbitrary data for a coinbase)
    pub script_sig: Script,
    /// Sequence number
    pub sequence: u32,
}

/// Transaction output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOut {
    /// Amount in base units
    pub value: i64,
    /// Locking script
    pub script_pubkey: Script,
}

impl TxOut {
    /// An output with no value and no script
    pub fn empty() -> Self {
        Self {
            value: 0,
            script_pubkey: Script::new(),
        }
    }

    /// Check if the output carries neither value nor script
    pub fn is_empty(&self) -> bool {
        self.value == 0 && self.script_pubkey.is_empty()
    }
}

/// Transaction in the timestamped layout (version, time, inputs, outputs,
/// lock time).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction version
    pub version: i32,
    /// Transaction timestamp (Unix seconds)
    pub time: u32,
    /// Inputs
    pub inputs: Vec<TxIn>,
    /// Outputs
    pub outputs: Vec<TxOut>,
    /// Lock time
    pub lock_time: u32,
}

impl Transaction {
    /// Serialize in consensus format
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&self.version.to_le_bytes());
        out.extend_from_slice(&self.time.to_le_bytes());

        write_compact_size(&mut out, self.inputs.len() as u64);
        for input in &self.inputs {
            out.extend_from_slice(input.previous_output.txid.as_bytes());
            out.extend_from_slice(&input.previous_output.vout.to_le_bytes());
            input.script_sig.consensus_encode(&mut out);
            out.extend_from_slice(&input.sequence.to_le_bytes());
        }

        write_compact_size(&mut out, self.outputs.len() as u64);
        for output in &self.outputs {
            out.extend_from_slice(&output.value.to_le_bytes());
            output.script_pubkey.consensus_encode(&mut out);
        }

        out.extend_from_slice(&self.lock_time.to_le_bytes());
        out
    }

    /// Transaction id
    pub fn txid(&self) -> Hash256 {
        sha256d(&self.serialize())
    }

    /// Check if this transaction is a coinbase (single null input)
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].previous_output.is_null()
    }
}

/// Block header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    /// Block version
    pub version: i32,
    /// Hash of the parent block
    pub prev_block_hash: Hash256,
    /// Merkle root of the block's transactions
    pub merkle_root: Hash256,
    /// Block timestamp (Unix seconds)
    pub time: u32,
    /// Compact difficulty target
    pub bits: u32,
    /// Proof-of-work nonce
    pub nonce: u32,
}

impl BlockHeader {
    /// Serialized header length
    pub const SIZE: usize = 80;

    /// Serialize in consensus format
    pub fn serialize(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0..4].copy_from_slice(&self.version.to_le_bytes());
        out[4..36].copy_from_slice(self.prev_block_hash.as_bytes());
        out[36..68].copy_from_slice(self.merkle_root.as_bytes());
        out[68..72].copy_from_slice(&self.time.to_le_bytes());
        out[72..76].copy_from_slice(&self.bits.to_le_bytes());
        out[76..80].copy_from_slice(&self.nonce.to_le_bytes());
        out
    }

    /// Block hash
    pub fn hash(&self) -> Hash256 {
        sha256d(&self.serialize())
    }
}

/// Block: header plus transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Header
    pub header: BlockHeader,
    /// Transactions, coinbase first
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Block hash (hash of the header)
    pub fn hash(&self) -> Hash256 {
        self.header.hash()
    }

    /// Recompute the Merkle root from the transaction list
    pub fn compute_merkle_root(&self) -> Hash256 {
        let txids: Vec<Hash256> = self.transactions.iter().map(Transaction::txid).collect();
        merkle_root(&txids)
    }
}

/// Merkle root over a list of hashes.
///
/// Pairs are concatenated and double-hashed level by level; an odd node is
/// paired with itself. An empty list yields the zero hash and a single
/// element is its own root.
pub fn merkle_root(hashes: &[Hash256]) -> Hash256 {
    if hashes.is_empty() {
        return Hash256::ZERO;
    }

    let mut level = hashes.to_vec();
    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| {
                let left = pair[0];
                let right = pair.get(1).copied().unwrap_or(left);
                let mut buf = [0u8; 64];
                buf[..32].copy_from_slice(left.as_bytes());
                buf[32..].copy_from_slice(right.as_bytes());
                sha256d(&buf)
            })
            .collect();
    }
    level[0]
}
