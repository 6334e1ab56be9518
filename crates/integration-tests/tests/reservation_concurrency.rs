//! Concurrent reservation intake tests.
//!
//! Events within a webhook batch are handled as independent concurrent
//! tasks; appends for the same shop must never lose entries.

use std::collections::HashSet;
use std::sync::Arc;

use otoku_bot::catalog::InMemoryCatalog;
use otoku_bot::engine::ConversationEngine;
use otoku_bot::reservation::{InMemoryLedger, ReservationLedger};
use otoku_core::{ReserveArgumentMode, ShopKey};

use otoku_integration_tests::{RecordingGateway, item, shop, text_event};

#[tokio::test]
async fn test_concurrent_reserves_same_shop_lose_nothing() {
    let gateway = RecordingGateway::new();
    let ledger = Arc::new(InMemoryLedger::new());
    let engine = Arc::new(ConversationEngine::new(
        gateway.clone(),
        Arc::new(InMemoryCatalog::from_shops(vec![shop(
            "A",
            "田中ベーカリー",
            35.6812,
            139.7671,
            vec![item("bread", 100, 200)],
        )])),
        ledger.clone(),
        ReserveArgumentMode::WithItem,
    ));

    let user_count = 16;
    let handles: Vec<_> = (0..user_count)
        .map(|i| {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move {
                engine
                    .handle(&text_event(
                        &format!("U{i}"),
                        &format!("rt-{i}"),
                        "予約 A bread 1",
                    ))
                    .await
                    .expect("handles");
            })
        })
        .collect();

    for handle in handles {
        handle.await.expect("task completes");
    }

    let entries = ledger.list(&ShopKey::new("A")).expect("lists");
    assert_eq!(entries.len(), user_count);

    // Each user appended exactly once
    let users: HashSet<&str> = entries.iter().map(|e| e.user_id.as_str()).collect();
    assert_eq!(users.len(), user_count);

    // Every reservation got its confirmation reply
    assert_eq!(gateway.reply_count(), user_count);
}

#[tokio::test]
async fn test_concurrent_reserves_across_shops_stay_separate() {
    let gateway = RecordingGateway::new();
    let ledger = Arc::new(InMemoryLedger::new());
    let engine = Arc::new(ConversationEngine::new(
        gateway.clone(),
        Arc::new(InMemoryCatalog::from_shops(vec![
            shop("A", "店A", 35.0, 139.0, vec![item("bread", 100, 200)]),
            shop("B", "店B", 35.1, 139.1, vec![item("cake", 300, 500)]),
        ])),
        ledger.clone(),
        ReserveArgumentMode::WithItem,
    ));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let engine = Arc::clone(&engine);
            let command = if i % 2 == 0 {
                "予約 A bread 1"
            } else {
                "予約 B cake 1"
            };
            tokio::spawn(async move {
                engine
                    .handle(&text_event(&format!("U{i}"), &format!("rt-{i}"), command))
                    .await
                    .expect("handles");
            })
        })
        .collect();

    for handle in handles {
        handle.await.expect("task completes");
    }

    assert_eq!(ledger.list(&ShopKey::new("A")).expect("lists").len(), 4);
    assert_eq!(ledger.list(&ShopKey::new("B")).expect("lists").len(), 4);
}
