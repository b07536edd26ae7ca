// Batch driver properties: one result per wallet, input order preserved,
// inter-request delay honored, failures isolated.

use async_trait::async_trait;
use blockchain::{BalanceResolver, RawResponse};
use checker::{export_results, BatchChecker, ReportSummary};
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{Balance, BalanceResult, CheckError, Result, WalletRef};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Resolver with canned outcomes per address, recording call order and times
struct FixtureResolver {
    balances: HashMap<String, u64>,
    calls: Mutex<Vec<(String, Instant)>>,
}

impl FixtureResolver {
    fn new(balances: &[(&str, u64)]) -> Self {
        Self {
            balances: balances
                .iter()
                .map(|(address, micro)| (address.to_string(), *micro))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn called_addresses(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(address, _)| address.clone())
            .collect()
    }
}

#[async_trait]
impl BalanceResolver for FixtureResolver {
    async fn resolve(&self, address: &str, name: Option<&str>) -> BalanceResult {
        self.calls
            .lock()
            .unwrap()
            .push((address.to_string(), Instant::now()));

        let name = name.unwrap_or("Unknown");
        match self.balances.get(address) {
            Some(micro) => {
                BalanceResult::success(name, address, Balance::from_micro(*micro, 0, 0).unwrap())
            }
            None => BalanceResult::failure(
                name,
                address,
                CheckError::Http {
                    status: 404,
                    message: "Wallet address not found or invalid".to_string(),
                },
            ),
        }
    }

    async fn probe(&self, address: &str) -> Result<RawResponse> {
        Ok(RawResponse {
            url: format!("http://fixture/{}", address),
            status: 404,
            body: String::new(),
        })
    }
}

fn wallet(index: usize) -> WalletRef {
    WalletRef::new(format!("Wallet_{}", index + 1), format!("SP{:020}", index))
}

#[tokio::test(start_paused = true)]
async fn test_zero_delay_does_not_pause() {
    let wallets: Vec<WalletRef> = (0..3).map(wallet).collect();
    let checker = BatchChecker::new(FixtureResolver::new(&[]), Duration::ZERO);

    let start = Instant::now();
    let results = checker.check_all(&wallets).await;

    assert_eq!(results.len(), 3);
    assert!(start.elapsed() < Duration::from_millis(1));
}

#[tokio::test(start_paused = true)]
async fn test_delay_between_requests_only() {
    let delay = Duration::from_millis(250);
    let wallets: Vec<WalletRef> = (0..3).map(wallet).collect();
    let checker = BatchChecker::new(FixtureResolver::new(&[]), delay);

    let start = Instant::now();
    checker.check_all(&wallets).await;
    let elapsed = start.elapsed();

    // (n - 1) pauses, none after the last wallet
    assert!(elapsed >= delay * 2);
    assert!(elapsed < delay * 3);

    let calls = checker.resolver().calls.lock().unwrap();
    for pair in calls.windows(2) {
        assert!(pair[1].1.duration_since(pair[0].1) >= delay);
    }
}

#[tokio::test]
async fn test_failure_does_not_abort_batch() {
    let wallets = vec![
        WalletRef::new("Alpha", "SP1ALPHA00000000000001"),
        WalletRef::new("Missing", "SP2MISSING000000000002"),
        WalletRef::new("Gamma", "SP3GAMMA00000000000003"),
    ];
    let resolver = FixtureResolver::new(&[
        ("SP1ALPHA00000000000001", 3_000_000),
        ("SP3GAMMA00000000000003", 7_500_000),
    ]);
    let checker = BatchChecker::new(resolver, Duration::ZERO);

    let results = checker.check_all(&wallets).await;

    assert_eq!(results.len(), 3);
    assert!(results[0].is_success());
    assert!(!results[1].is_success());
    assert!(results[2].is_success());

    let summary = ReportSummary::from_results(&results);
    assert_eq!(summary.successful, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.combined_total, Decimal::from_str("10.5").unwrap());
}

#[tokio::test]
async fn test_export_writes_all_files() {
    let dir = tempfile::tempdir().unwrap();
    let basename = dir.path().join("report");
    let basename = basename.to_str().unwrap();

    let wallets = vec![WalletRef::new("Alpha", "SP1ALPHA00000000000001")];
    let checker = BatchChecker::new(
        FixtureResolver::new(&[("SP1ALPHA00000000000001", 1_500_000)]),
        Duration::ZERO,
    );
    let results = checker.check_all(&wallets).await;

    let paths = export_results(&results, basename).unwrap();

    let json = std::fs::read_to_string(&paths.json).unwrap();
    assert!(json.contains("\"balance_ustx\": 1500000"));

    let csv = std::fs::read_to_string(&paths.csv).unwrap();
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.contains("Alpha,SP1ALPHA00000000000001,1.500000,0.000000,1.500000,0,Success"));

    assert!(paths.xlsx.ends_with("report.xlsx"));
    assert!(std::fs::metadata(&paths.xlsx).unwrap().len() > 0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// For any wallet list, the checker yields one result per wallet in
    /// input order, and calls the resolver exactly once per wallet.
    #[test]
    fn prop_results_match_inputs(
        known in proptest::collection::vec(any::<bool>(), 0..20),
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();

        rt.block_on(async {
            let wallets: Vec<WalletRef> = (0..known.len()).map(wallet).collect();
            let fixtures: Vec<(String, u64)> = wallets
                .iter()
                .zip(&known)
                .filter(|(_, known)| **known)
                .map(|(w, _)| (w.address.clone(), 1_000))
                .collect();
            let fixture_refs: Vec<(&str, u64)> =
                fixtures.iter().map(|(a, m)| (a.as_str(), *m)).collect();

            let checker = BatchChecker::new(FixtureResolver::new(&fixture_refs), Duration::ZERO);
            let results = checker.check_all(&wallets).await;

            prop_assert_eq!(results.len(), wallets.len());
            for ((result, wallet), known) in results.iter().zip(&wallets).zip(&known) {
                prop_assert_eq!(&result.name, &wallet.name);
                prop_assert_eq!(&result.address, &wallet.address);
                prop_assert_eq!(result.is_success(), *known);
            }

            let expected: Vec<String> = wallets.iter().map(|w| w.address.clone()).collect();
            prop_assert_eq!(checker.resolver().called_addresses(), expected);
            Ok(())
        })?;
    }
}
