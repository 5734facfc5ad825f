//! Real nodes talking HTTP on loopback.
//!
//! Each node gets its own data directory and an ephemeral port, so the
//! tests can run in parallel.

#[cfg(test)]
mod tests {
    use node_runtime::{NodeConfig, ReportNode};
    use serde_json::{json, Value};
    use std::time::Duration;
    use tempfile::TempDir;
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;
    use tokio::task::JoinHandle;

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    struct RunningNode {
        addr: String,
        node_id: String,
        shutdown: Option<oneshot::Sender<()>>,
        server: JoinHandle<()>,
        _dir: TempDir,
    }

    impl RunningNode {
        async fn start() -> Self {
            let dir = TempDir::new().unwrap();
            let mut config = NodeConfig::default();
            config.storage.data_dir = dir.path().to_path_buf();
            config.mining.difficulty = 2;
            config.network.peer_timeout_secs = 2;

            let node = ReportNode::build(config).unwrap();
            let node_id = node.node_id().to_string();
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap().to_string();

            let (tx, rx) = oneshot::channel::<()>();
            let server = tokio::spawn(async move {
                node.serve_on(listener, async {
                    let _ = rx.await;
                })
                .await
                .unwrap();
            });

            Self {
                addr,
                node_id,
                shutdown: Some(tx),
                server,
                _dir: dir,
            }
        }

        fn url(&self, path: &str) -> String {
            format!("http://{}{}", self.addr, path)
        }

        async fn get(&self, path: &str) -> Value {
            let response = reqwest::get(self.url(path)).await.unwrap();
            assert!(response.status().is_success(), "GET {path}");
            response.json().await.unwrap()
        }

        async fn post(&self, path: &str, body: Value) -> (u16, Value) {
            let response = reqwest::Client::new()
                .post(self.url(path))
                .json(&body)
                .send()
                .await
                .unwrap();
            let status = response.status().as_u16();
            (status, response.json().await.unwrap())
        }

        async fn register(&self, peers: &[&RunningNode]) {
            let nodes: Vec<String> = peers.iter().map(|p| format!("http://{}", p.addr)).collect();
            let (status, _) = self.post("/nodes/register", json!({ "nodes": nodes })).await;
            assert_eq!(status, 201);
        }

        async fn length(&self) -> u64 {
            self.get("/chain").await["length"].as_u64().unwrap()
        }

        async fn stop(mut self) {
            if let Some(tx) = self.shutdown.take() {
                let _ = tx.send(());
            }
            self.server.await.unwrap();
        }
    }

    fn report(number: &str) -> Value {
        json!({
            "number": number,
            "name": "boiler",
            "sjCompany": "acme",
            "wtCompany": "globex",
            "kind": "pdf",
            "filePath": format!("{number}.pdf"),
        })
    }

    async fn wait_for_pending(node: &RunningNode, count: usize) -> Value {
        for _ in 0..50 {
            let pending = node.get("/cms/confirm/query").await;
            if pending["list"].as_array().map_or(0, Vec::len) >= count {
                return pending;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        panic!("{} never saw {count} pending records", node.addr);
    }

    // =========================================================================
    // CONSENSUS
    // =========================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_resolve_adopts_longer_peer_chain() {
        let a = RunningNode::start().await;
        let b = RunningNode::start().await;

        a.get("/mine").await;
        a.get("/mine").await;
        assert_eq!(a.length().await, 3);
        assert_eq!(b.length().await, 1);

        b.register(&[&a]).await;
        let resolved = b.get("/nodes/resolve").await;
        assert_eq!(resolved["message"], "Our chain was replaced");
        assert_eq!(resolved["new_chain"].as_array().unwrap().len(), 3);
        assert_eq!(b.get("/chain").await, a.get("/chain").await);

        let again = b.get("/nodes/resolve").await;
        assert_eq!(again["message"], "Our chain is authoritative");

        // B extends the adopted chain; A catches up the same way.
        let mined = b.get("/mine").await;
        assert_eq!(mined["index"], 4);
        assert_eq!(mined["miner"], b.node_id.as_str());

        a.register(&[&b]).await;
        assert_eq!(a.get("/nodes/resolve").await["message"], "Our chain was replaced");
        assert_eq!(a.length().await, 4);

        a.stop().await;
        b.stop().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_unreachable_peer_does_not_block_resolution() {
        let a = RunningNode::start().await;
        let b = RunningNode::start().await;
        a.get("/mine").await;

        let dead = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap().to_string()
        };
        let (status, _) = b
            .post(
                "/nodes/register",
                json!({ "nodes": [dead, format!("http://{}", a.addr)] }),
            )
            .await;
        assert_eq!(status, 201);

        assert_eq!(b.get("/nodes/resolve").await["message"], "Our chain was replaced");
        assert_eq!(b.length().await, 2);

        a.stop().await;
        b.stop().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_shorter_peer_keeps_local_chain() {
        let a = RunningNode::start().await;
        let b = RunningNode::start().await;
        b.get("/mine").await;

        b.register(&[&a]).await;
        let resolved = b.get("/nodes/resolve").await;
        assert_eq!(resolved["message"], "Our chain is authoritative");
        assert_eq!(resolved["chain"].as_array().unwrap().len(), 2);

        a.stop().await;
        b.stop().await;
    }

    // =========================================================================
    // GOSSIP
    // =========================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_added_report_reaches_peers_and_is_sealed() {
        let a = RunningNode::start().await;
        let b = RunningNode::start().await;
        a.register(&[&b]).await;

        let (status, _) = a.post("/cms/report/add", report("R-1")).await;
        assert_eq!(status, 201);

        let on_a = wait_for_pending(&a, 1).await;
        let on_b = wait_for_pending(&b, 1).await;
        let record = &on_b["list"][0];
        assert_eq!(record["number"], "R-1");
        assert_eq!(record["creator"], a.node_id.as_str());
        assert_eq!(record["timestamp"], on_a["list"][0]["timestamp"]);
        assert_eq!(record["confirm"], json!([]));

        // B endorses its copy and seals it.
        let (status, _) = b
            .post(
                "/cms/confirm/confirm",
                json!({ "timestamp": record["timestamp"], "nodeId": b.node_id }),
            )
            .await;
        assert_eq!(status, 201);
        let mined = b.get("/mine").await;
        assert_eq!(mined["reports"][0]["number"], "R-1");

        let sealed = b.get("/cms/report/query?number=R-1").await;
        assert_eq!(sealed["pagination"]["total"], 1);
        assert_eq!(sealed["list"][0]["block"], 2);

        let stats = b.get("/cms/user/queryInfo").await;
        assert_eq!(stats["mineNum"], 2);
        assert_eq!(stats["confirmNum"], 1);
        assert_eq!(stats["createNum"], 0);

        // A adopts B's chain; its copy of the record stays pending until
        // mined or confirmed locally.
        a.get("/nodes/resolve").await;
        assert_eq!(a.length().await, 2);
        let block = a.get("/cms/user/queryBlock?index=2").await;
        assert_eq!(block["miner"], b.node_id.as_str());

        a.stop().await;
        b.stop().await;
    }
}
