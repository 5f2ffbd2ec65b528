use std::sync::Arc;

use cloudrip_common::error::{ConfigError, ScanError};
use cloudrip_common::network::record::{RecordType, ResultEntry};
use tokio_util::sync::CancellationToken;

use crate::support::{self, MemoryWordlist, MockResolver};

/// A direct origin next to a provider-fronted name.
fn mixed_resolver() -> MockResolver {
    MockResolver::new()
        .with_address("www.example.com", &["93.184.216.34"])
        .with_address("api.example.com", &["104.16.0.1"])
}

#[tokio::test]
async fn provider_addresses_are_filtered() {
    let resolver = Arc::new(mixed_resolver());
    let scanner = support::scanner(resolver, MemoryWordlist::new(&["www", "api"]));

    let result = scanner
        .scan(&CancellationToken::new(), &support::config())
        .await
        .unwrap();

    assert_eq!(result.total_found, 1);
    assert_eq!(
        result.results["www.example.com"],
        vec![ResultEntry::new("www.example.com", "93.184.216.34", RecordType::A)]
    );
    assert!(!result.results.contains_key("api.example.com"));
}

#[tokio::test]
async fn provider_addresses_are_kept_when_included() {
    let resolver = Arc::new(mixed_resolver());
    let scanner = support::scanner(resolver, MemoryWordlist::new(&["www", "api"]));
    let cfg = cloudrip_common::config::ScanConfig {
        include_cf: true,
        ..support::config()
    };

    let result = scanner.scan(&CancellationToken::new(), &cfg).await.unwrap();

    assert_eq!(result.total_found, 2);
    assert_eq!(
        result.results["api.example.com"],
        vec![ResultEntry::new("api.example.com", "104.16.0.1", RecordType::A)]
    );
    assert_eq!(
        result.results["www.example.com"],
        vec![ResultEntry::new("www.example.com", "93.184.216.34", RecordType::A)]
    );
}

#[tokio::test]
async fn alias_fallback_reports_under_the_alias_name() {
    let resolver = || {
        Arc::new(
            MockResolver::new()
                .with_alias("shop.example.com", "origin.example.net")
                .with_address("origin.example.net", &["203.0.113.5"]),
        )
    };

    let followed = support::scanner(resolver(), MemoryWordlist::new(&["shop"]));
    let cfg = cloudrip_common::config::ScanConfig {
        follow_cname: true,
        ..support::config()
    };
    let result = followed.scan(&CancellationToken::new(), &cfg).await.unwrap();
    assert_eq!(
        result.results["shop.example.com"],
        vec![ResultEntry::new("shop.example.com", "203.0.113.5", RecordType::A)]
    );

    let ignored = support::scanner(resolver(), MemoryWordlist::new(&["shop"]));
    let result = ignored
        .scan(&CancellationToken::new(), &support::config())
        .await
        .unwrap();
    assert_eq!(result.total_found, 0);
    assert!(result.results.is_empty());
}

#[tokio::test]
async fn every_origin_address_is_reported() {
    let resolver = Arc::new(MockResolver::new().with_address(
        "api.example.com",
        &["203.0.113.1", "104.16.0.9", "203.0.113.2", "2001:db8::2"],
    ));
    let scanner = support::scanner(resolver, MemoryWordlist::new(&["api"]));

    let result = scanner
        .scan(&CancellationToken::new(), &support::config())
        .await
        .unwrap();

    let mut found: Vec<(String, RecordType)> = result.results["api.example.com"]
        .iter()
        .map(|e| (e.ip.clone(), e.record_type))
        .collect();
    found.sort();
    assert_eq!(
        found,
        vec![
            ("2001:db8::2".to_string(), RecordType::AAAA),
            ("203.0.113.1".to_string(), RecordType::A),
            ("203.0.113.2".to_string(), RecordType::A),
        ]
    );
    assert_eq!(result.entry_count(), 3);
}

#[tokio::test]
async fn empty_wordlist_finishes_with_nothing() {
    let resolver = Arc::new(MockResolver::new());
    let scanner = support::scanner(resolver.clone(), MemoryWordlist::new(&[]));

    let result = scanner
        .scan(&CancellationToken::new(), &support::config())
        .await
        .unwrap();

    assert_eq!(result.total_found, 0);
    assert!(result.results.is_empty());
    assert_eq!(resolver.calls(), 0);
    assert_eq!(scanner.metrics().completed_jobs, 0);
}

#[tokio::test]
async fn each_entry_is_resolved_exactly_once() {
    let words: Vec<String> = (0..50).map(|i| format!("host{i}")).collect();
    let mut resolver = MockResolver::new();
    for (i, word) in words.iter().enumerate() {
        let ip = format!("198.51.100.{i}");
        resolver = resolver.with_address(&format!("{word}.example.com"), &[ip.as_str()]);
    }
    let resolver = Arc::new(resolver);
    let refs: Vec<&str> = words.iter().map(String::as_str).collect();
    let scanner = support::scanner(resolver.clone(), MemoryWordlist::new(&refs));
    let cfg = cloudrip_common::config::ScanConfig {
        threads: 8,
        ..support::config()
    };

    let result = scanner.scan(&CancellationToken::new(), &cfg).await.unwrap();

    assert_eq!(result.total_found, 50);
    assert_eq!(resolver.calls(), 50);
    for word in &words {
        assert_eq!(result.results[&format!("{word}.example.com")].len(), 1);
    }

    let metrics = scanner.metrics();
    assert_eq!(metrics.total_jobs, 50);
    assert_eq!(metrics.completed_jobs, 50);
    assert_eq!(metrics.success_count, 50);
    assert_eq!(metrics.dns_queries, 50);
    let per_worker: usize = metrics.worker_stats.values().map(|s| s.jobs_done).sum();
    assert_eq!(per_worker, 50);
}

#[tokio::test]
async fn duplicate_entries_collapse() {
    let resolver = Arc::new(MockResolver::new().with_address("mail.example.com", &["203.0.113.7"]));
    let scanner = support::scanner(resolver.clone(), MemoryWordlist::new(&["mail", "mail", "mail"]));

    let result = scanner
        .scan(&CancellationToken::new(), &support::config())
        .await
        .unwrap();

    assert_eq!(resolver.calls(), 3);
    assert_eq!(result.results["mail.example.com"].len(), 1);
}

#[tokio::test]
async fn failed_lookups_are_counted_not_fatal() {
    let resolver = Arc::new(MockResolver::new().with_address("www.example.com", &["203.0.113.3"]));
    let scanner = support::scanner(resolver, MemoryWordlist::new(&["www", "ghost", "void"]));

    let result = scanner
        .scan(&CancellationToken::new(), &support::config())
        .await
        .unwrap();

    assert_eq!(result.total_found, 1);
    let metrics = scanner.metrics();
    assert_eq!(metrics.success_count, 1);
    assert_eq!(metrics.error_count, 2);
    assert!(metrics.end_time.is_some());

    let health = scanner.health_check();
    assert_eq!(health.metrics.completed_jobs, 3);
}

#[tokio::test]
async fn unreadable_wordlist_aborts_before_lookups() {
    let resolver = Arc::new(MockResolver::new());
    let scanner = support::scanner(resolver.clone(), MemoryWordlist::unreadable());

    let err = scanner
        .scan(&CancellationToken::new(), &support::config())
        .await
        .unwrap_err();

    assert!(matches!(err, ScanError::Wordlist(_)));
    assert_eq!(resolver.calls(), 0);
}

#[tokio::test]
async fn invalid_config_aborts_before_lookups() {
    let resolver = Arc::new(MockResolver::new());
    let scanner = support::scanner(resolver.clone(), MemoryWordlist::new(&["www"]));
    let cfg = cloudrip_common::config::ScanConfig {
        threads: 0,
        ..support::config()
    };

    let err = scanner.scan(&CancellationToken::new(), &cfg).await.unwrap_err();

    assert!(matches!(err, ScanError::Config(ConfigError::InvalidThreads)));
    assert_eq!(resolver.calls(), 0);
}
