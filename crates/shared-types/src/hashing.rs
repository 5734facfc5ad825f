//! Hashing utilities for the ledger
//!
//! Provides the canonical block digest used by block production and by
//! chain validation.
//!
//! ## Canonical Encoding
//!
//! A block is encoded as JSON with:
//!
//! | Rule | Example |
//! |------|---------|
//! | object keys sorted by code point | `{"index": 1, "miner": ...}` |
//! | `", "` between items, `": "` after keys | `[1, 2]` |
//! | non-ASCII escaped as `\uXXXX` | `"检"` |
//!
//! This is byte-identical to the digest input of the reference node, so
//! digests agree across implementations. The digest is SHA-256 in lowercase
//! hex.

use crate::entities::{Block, Record};
use sha2::{Digest, Sha256};
use std::fmt::Write;

/// Compute SHA-256 of data as lowercase hex.
#[inline]
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Canonical digest of a block.
///
/// Pure function of the block's content: two blocks with equal fields hash
/// equally regardless of the key order they were decoded from.
pub fn block_hash(block: &Block) -> String {
    sha256_hex(canonical_block(block).as_bytes())
}

/// Canonical encoding of a block, written straight from its typed fields.
///
/// Keys appear in code-point order under their wire names, with `", "`
/// and `": "` separators and non-ASCII characters escaped as `\uXXXX`.
pub fn canonical_block(block: &Block) -> String {
    let mut out = String::with_capacity(256 + 256 * block.records.len());
    out.push_str("{\"index\": ");
    push_u64(&mut out, block.index);
    out.push_str(", \"miner\": ");
    write_string(&mut out, &block.miner);
    out.push_str(", \"previous_hash\": ");
    write_string(&mut out, &block.previous_hash);
    out.push_str(", \"proof\": ");
    push_u64(&mut out, block.proof);
    out.push_str(", \"reports\": [");
    for (i, record) in block.records.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_record(&mut out, record);
    }
    out.push_str("], \"timestamp\": ");
    push_u64(&mut out, block.timestamp);
    out.push('}');
    out
}

fn write_record(out: &mut String, record: &Record) {
    out.push_str("{\"confirm\": [");
    for (i, node) in record.confirmations.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_string(out, node);
    }
    out.push_str("], \"creator\": ");
    write_string(out, &record.creator);
    out.push_str(", \"filePath\": ");
    write_string(out, &record.file_path);
    out.push_str(", \"kind\": ");
    write_string(out, &record.kind);
    out.push_str(", \"name\": ");
    write_string(out, &record.name);
    out.push_str(", \"number\": ");
    write_string(out, &record.number);
    out.push_str(", \"sjCompany\": ");
    write_string(out, &record.requester_company);
    out.push_str(", \"timestamp\": ");
    push_u64(out, record.timestamp);
    out.push_str(", \"wtCompany\": ");
    write_string(out, &record.recipient_company);
    out.push('}');
}

fn push_u64(out: &mut String, n: u64) {
    // Writing into a String never fails.
    let _ = write!(out, "{n}");
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            ' '..='~' => out.push(c),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    // Writing into a String never fails.
                    let _ = write!(out, "\\u{:04x}", unit);
                }
            }
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::Value;

    /// Generic canonical encoder over any JSON value, the reference the typed
    /// block encoder is checked against.
    fn canonical_json(value: &Value) -> String {
        let mut out = String::with_capacity(256);
        write_value(&mut out, value);
        out
    }

    fn write_value(out: &mut String, value: &Value) {
        match value {
            Value::Null => out.push_str("null"),
            Value::Bool(true) => out.push_str("true"),
            Value::Bool(false) => out.push_str("false"),
            Value::Number(n) => out.push_str(&n.to_string()),
            Value::String(s) => write_string(out, s),
            Value::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_value(out, item);
                }
                out.push(']');
            }
            Value::Object(map) => {
                let mut entries: Vec<(&String, &Value)> = map.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                out.push('{');
                for (i, (key, item)) in entries.into_iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_string(out, key);
                    out.push_str(": ");
                    write_value(out, item);
                }
                out.push('}');
            }
        }
    }

    fn genesis() -> Block {
        Block {
            index: 1,
            timestamp: 1_700_000_000_000,
            records: vec![],
            proof: 100,
            previous_hash: "1".into(),
            miner: "node-a".into(),
        }
    }

    fn sealed_with_report() -> Block {
        Block {
            index: 2,
            timestamp: 1_700_000_005_000,
            records: vec![Record {
                number: "R-001".into(),
                name: "检验报告".into(),
                requester_company: "acme".into(),
                recipient_company: "globex".into(),
                kind: "pdf".into(),
                file_path: "1000-r.pdf".into(),
                creator: "node-a".into(),
                timestamp: 1000,
                confirmations: vec!["node-b".into()],
            }],
            proof: 35293,
            previous_hash: "abc".into(),
            miner: "node-a".into(),
        }
    }

    #[test]
    fn test_sha256_hex_known_value() {
        assert_eq!(
            sha256_hex(b"10035293"),
            "0000c415de5ceea33c02daa85a1c218ecca1b1c9e9864ed34d183597844de8e2"
        );
    }

    #[test]
    fn test_canonical_encoding_of_genesis() {
        let value = serde_json::to_value(genesis()).unwrap();
        assert_eq!(
            canonical_json(&value),
            r#"{"index": 1, "miner": "node-a", "previous_hash": "1", "proof": 100, "reports": [], "timestamp": 1700000000000}"#
        );
    }

    #[test]
    fn test_block_hash_matches_reference_node() {
        assert_eq!(
            block_hash(&genesis()),
            "42685b7c24e40296465a4b0c69566c791e263b06027a79c2297d0a675c1dc35c"
        );
        assert_eq!(
            block_hash(&sealed_with_report()),
            "448e6c22720bad8a58e1b3c01a3400035f1faf03036eeeb5b045937173a36deb"
        );
    }

    #[test]
    fn test_typed_encoding_matches_value_encoding() {
        for block in [genesis(), sealed_with_report()] {
            let value = serde_json::to_value(&block).unwrap();
            assert_eq!(canonical_block(&block), canonical_json(&value));
        }
    }

    #[test]
    fn test_non_ascii_is_escaped() {
        let value = serde_json::json!("a\u{7f}😀\n检");
        assert_eq!(canonical_json(&value), r#""a\u007f\ud83d\ude00\n\u68c0""#);
    }

    #[test]
    fn test_hash_ignores_decoding_key_order() {
        let reordered: Block = serde_json::from_str(
            r#"{"timestamp": 1700000000000, "miner": "node-a", "reports": [],
                "previous_hash": "1", "proof": 100, "index": 1}"#,
        )
        .unwrap();
        assert_eq!(block_hash(&reordered), block_hash(&genesis()));
    }

    #[test]
    fn test_hash_changes_with_content() {
        let mut tampered = sealed_with_report();
        tampered.records[0].confirmations.push("node-c".into());
        assert_ne!(block_hash(&tampered), block_hash(&sealed_with_report()));
    }

    proptest! {
        #[test]
        fn prop_hash_is_stable(index in 1u64..1_000_000, proof in any::<u64>(), miner in "\\PC{0,16}") {
            let block = Block { index, proof, miner, ..genesis() };
            let first = block_hash(&block);
            let encoded = serde_json::to_string(&block).unwrap();
            let decoded: Block = serde_json::from_str(&encoded).unwrap();
            prop_assert_eq!(&first, &block_hash(&block));
            prop_assert_eq!(first, block_hash(&decoded));
            let value = serde_json::to_value(&block).unwrap();
            prop_assert_eq!(canonical_block(&block), canonical_json(&value));
        }
    }
}
