//! Concurrency tests
//!
//! One executor serves many queries at once, and writers may interleave
//! with reads without failing a query.

use std::sync::Arc;

use alldocs::{AllDocsExecutor, AllDocsOptions, MemoryStore, QueryMetrics};
use serde_json::json;

fn seeded_store(count: usize) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    for i in 0..count {
        store
            .put(format!("doc-{:03}", i), "1-a", json!({ "i": i }))
            .unwrap();
    }
    store
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_queries_share_executor() {
    let store = seeded_store(50);
    let metrics = Arc::new(QueryMetrics::new());
    let executor = Arc::new(AllDocsExecutor::new(store.clone()).with_metrics(metrics.clone()));

    let mut handles = Vec::new();
    for skip in 0..8u64 {
        let executor = executor.clone();
        handles.push(tokio::spawn(async move {
            let options = AllDocsOptions::new().with_skip(skip).with_limit(5);
            executor.all_docs(&options).await
        }));
    }

    for (skip, handle) in handles.into_iter().enumerate() {
        let response = handle.await.unwrap().unwrap();
        assert_eq!(response.rows.len(), 5);
        assert_eq!(response.ids()[0], format!("doc-{:03}", skip));
    }

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.queries_executed, 8);
    assert_eq!(snapshot.rows_returned, 40);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_queries_survive_concurrent_writes() {
    let store = seeded_store(20);
    let executor = Arc::new(AllDocsExecutor::new(store.clone()));

    let writer = {
        let store = store.clone();
        tokio::spawn(async move {
            for i in 0..20 {
                let id = format!("doc-{:03}", i);
                if i % 2 == 0 {
                    store.delete(id, "2-b").unwrap();
                } else {
                    store.put(id, "2-b", json!({ "i": i, "v": 2 })).unwrap();
                }
                tokio::task::yield_now().await;
            }
        })
    };

    let mut readers = Vec::new();
    for _ in 0..4 {
        let executor = executor.clone();
        readers.push(tokio::spawn(async move {
            for _ in 0..10 {
                let response = executor.all_docs(&AllDocsOptions::new()).await?;
                assert!(response.rows.len() <= 20);
                tokio::task::yield_now().await;
            }
            Ok::<(), alldocs::QueryError>(())
        }));
    }

    writer.await.unwrap();
    for reader in readers {
        reader.await.unwrap().unwrap();
    }

    let response = executor.all_docs(&AllDocsOptions::new()).await.unwrap();
    assert_eq!(response.rows.len(), 10);
    assert_eq!(response.total_rows, 10);
}
