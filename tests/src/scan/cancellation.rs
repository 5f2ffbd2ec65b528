use std::sync::Arc;
use std::time::Duration;

use cloudrip_common::error::ScanError;
use tokio_util::sync::CancellationToken;

use crate::support::{self, MemoryWordlist, MockResolver};

#[tokio::test]
async fn cancelled_before_start_dispatches_nothing() {
    let resolver = Arc::new(MockResolver::new().with_address("www.example.com", &["203.0.113.1"]));
    let scanner = support::scanner(resolver.clone(), MemoryWordlist::new(&["www", "api", "mail"]));
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = scanner.scan(&cancel, &support::config()).await.unwrap_err();

    assert!(matches!(err, ScanError::Cancelled));
    assert_eq!(resolver.calls(), 0);
    assert_eq!(scanner.metrics().completed_jobs, 0);
}

#[tokio::test]
async fn cancellation_unblocks_hanging_lookups() {
    let words: Vec<String> = (0..100).map(|i| format!("w{i}")).collect();
    let refs: Vec<&str> = words.iter().map(String::as_str).collect();
    let resolver = Arc::new(MockResolver::hanging());
    let scanner = support::scanner(resolver.clone(), MemoryWordlist::new(&refs));
    let cfg = cloudrip_common::config::ScanConfig {
        timeout: Duration::from_secs(60),
        ..support::config()
    };
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let outcome = tokio::time::timeout(Duration::from_secs(2), scanner.scan(&cancel, &cfg))
        .await
        .expect("scan did not wind down after cancellation");

    assert!(matches!(outcome, Err(ScanError::Cancelled)));
    // Only the jobs in flight when the token fired reached the resolver.
    assert!(resolver.calls() <= cfg.threads);
    assert!(scanner.metrics().completed_jobs < words.len());
}
