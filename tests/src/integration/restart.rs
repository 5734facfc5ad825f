//! Node state reloaded from its data directory.

#[cfg(test)]
mod tests {
    use node_runtime::{NodeConfig, ReportNode};
    use shared_types::RecordSubmission;
    use std::path::Path;
    use tempfile::TempDir;

    fn config(dir: &Path) -> NodeConfig {
        let mut config = NodeConfig::default();
        config.storage.data_dir = dir.to_path_buf();
        config.mining.difficulty = 2;
        config
    }

    fn submission(timestamp: u64) -> RecordSubmission {
        RecordSubmission {
            number: Some(format!("R-{timestamp}")),
            name: Some("boiler".into()),
            requester_company: Some("acme".into()),
            recipient_company: Some("globex".into()),
            kind: Some("pdf".into()),
            file_path: Some("r.pdf".into()),
            creator: Some("node-b".into()),
            timestamp: Some(timestamp),
        }
    }

    #[test]
    fn test_restart_restores_every_subsystem() {
        let dir = TempDir::new().unwrap();

        let (node_id, chain) = {
            let node = ReportNode::build(config(dir.path())).unwrap();
            let subsystems = node.container();

            subsystems.peers.register("http://10.0.0.2:5000/").unwrap();
            subsystems.pool.submit(submission(1)).unwrap();
            subsystems.pool.submit(submission(2)).unwrap();
            subsystems.pool.confirm(1, "node-c").unwrap();
            subsystems.ledger.mine().unwrap();

            (node.node_id().to_string(), subsystems.ledger.snapshot())
        };

        let node = ReportNode::build(config(dir.path())).unwrap();
        let subsystems = node.container();

        assert_eq!(node.node_id(), node_id);
        assert_eq!(subsystems.ledger.snapshot(), chain);
        assert_eq!(subsystems.ledger.length(), 2);
        assert_eq!(subsystems.peers.peers(), vec!["10.0.0.2:5000".to_string()]);

        let pending = subsystems.pool.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].timestamp, 2);

        // Mining continues on top of the reloaded tip.
        let block = subsystems.ledger.mine().unwrap();
        assert_eq!(block.index, 3);
        assert_eq!(block.previous_hash, chain.chain[1].hash());
    }

    #[test]
    fn test_two_data_dirs_are_two_nodes() {
        let dir = TempDir::new().unwrap();
        let a = ReportNode::build(config(&dir.path().join("a"))).unwrap();
        let b = ReportNode::build(config(&dir.path().join("b"))).unwrap();

        assert_ne!(a.node_id(), b.node_id());
        assert_eq!(a.container().ledger.last_block().miner, a.node_id());
        assert_eq!(b.container().ledger.last_block().miner, b.node_id());
    }
}
