//! Single-node flows across the pool, the ledger and the validator.

#[cfg(test)]
mod tests {
    use rc_02_ledger_storage::{LedgerStore, MemoryStore};
    use rc_03_record_pool::{PoolError, RecordPool};
    use rc_04_block_production::{Ledger, MiningConfig, RecordQuery};
    use rc_05_consensus::ChainValidator;
    use shared_types::RecordSubmission;
    use std::sync::Arc;

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    struct Node {
        ledger: Arc<Ledger>,
        pool: Arc<RecordPool>,
        store: Arc<MemoryStore>,
    }

    fn node(quorum: usize) -> Node {
        let store = Arc::new(MemoryStore::new());
        let pool = Arc::new(RecordPool::open(store.clone()).unwrap());
        let config = MiningConfig {
            quorum,
            ..MiningConfig::with_difficulty(2)
        };
        let ledger = Arc::new(Ledger::open(config, "node-a", pool.clone(), store.clone()).unwrap());
        Node {
            ledger,
            pool,
            store,
        }
    }

    fn submission(number: &str, name: &str, timestamp: u64) -> RecordSubmission {
        RecordSubmission {
            number: Some(number.into()),
            name: Some(name.into()),
            requester_company: Some("acme".into()),
            recipient_company: Some("globex".into()),
            kind: Some("pdf".into()),
            file_path: Some(format!("{number}.pdf")),
            creator: Some("node-a".into()),
            timestamp: Some(timestamp),
        }
    }

    // =========================================================================
    // END-TO-END
    // =========================================================================

    #[test]
    fn test_submit_confirm_mine_query() {
        let node = node(1);
        assert_eq!(node.ledger.length(), 1);

        node.pool.submit(submission("R-1", "boiler", 1000)).unwrap();

        // Unconfirmed records stay pending through a mine.
        let empty = node.ledger.mine().unwrap();
        assert_eq!(empty.index, 2);
        assert!(empty.records.is_empty());
        assert_eq!(node.pool.len(), 1);

        node.pool.confirm(1000, "node-b").unwrap();
        let sealed = node.ledger.mine().unwrap();
        assert_eq!(sealed.index, 3);
        assert_eq!(sealed.records.len(), 1);
        assert_eq!(sealed.records[0].confirmations, vec!["node-b".to_string()]);
        assert!(node.pool.is_empty());

        let listed = node.ledger.sealed_records(&RecordQuery {
            number: Some("R-1".into()),
            name: None,
        });
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].block, 3);

        let activity = node.ledger.activity("node-a");
        assert_eq!(activity.mined, 3);
        assert_eq!(activity.created, 1);
        assert_eq!(activity.confirmed, 0);
        // node-b confirmed R-1 but mined nothing, so nothing is credited.
        assert_eq!(node.ledger.activity("node-b").confirmed, 0);

        let validator = ChainValidator::new(*node.ledger.pow());
        assert!(validator.is_valid(&node.ledger.snapshot().chain));

        let stored = node.store.load_chain().unwrap().unwrap();
        assert_eq!(stored, node.ledger.snapshot());
        assert_eq!(node.store.load_pending().unwrap(), Some(vec![]));
    }

    #[test]
    fn test_quorum_gates_sealing() {
        let node = node(2);
        node.pool.submit(submission("R-1", "boiler", 1000)).unwrap();
        node.pool.confirm(1000, "node-b").unwrap();

        assert!(node.ledger.mine().unwrap().records.is_empty());

        // A repeated confirmation does not count twice.
        assert!(!node.pool.confirm(1000, "node-b").unwrap());
        assert!(node.ledger.mine().unwrap().records.is_empty());

        node.pool.confirm(1000, "node-c").unwrap();
        assert_eq!(node.ledger.mine().unwrap().records.len(), 1);
    }

    #[test]
    fn test_failed_chain_save_keeps_records_pending() {
        let node = node(1);
        node.pool.submit(submission("R-1", "boiler", 1000)).unwrap();
        node.pool.confirm(1000, "node-b").unwrap();

        node.store.fail_saves(true);
        assert!(node.ledger.mine().is_err());
        assert_eq!(node.ledger.length(), 1);
        assert_eq!(node.pool.len(), 1);

        node.store.fail_saves(false);
        assert_eq!(node.ledger.mine().unwrap().records.len(), 1);
        assert!(node.pool.is_empty());
    }

    #[test]
    fn test_tampered_chain_is_rejected() {
        let node = node(1);
        node.pool.submit(submission("R-1", "boiler", 1000)).unwrap();
        node.pool.confirm(1000, "node-b").unwrap();
        node.ledger.mine().unwrap();
        node.ledger.mine().unwrap();

        let validator = ChainValidator::new(*node.ledger.pow());
        let mut chain = node.ledger.snapshot().chain;
        assert!(validator.is_valid(&chain));

        chain[1].records[0].name = "crane".into();
        assert!(!validator.is_valid(&chain));
    }

    #[test]
    fn test_confirming_sealed_record_is_not_found() {
        let node = node(1);
        node.pool.submit(submission("R-1", "boiler", 1000)).unwrap();
        node.pool.confirm(1000, "node-b").unwrap();
        node.ledger.mine().unwrap();

        assert!(matches!(
            node.pool.confirm(1000, "node-c"),
            Err(PoolError::NotFound(1000))
        ));
    }
}
