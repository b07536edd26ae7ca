use blockchain::{BalanceResolver, RawResponse};
use shared::{BalanceResult, Result, WalletRef};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Observer for batch progress. All hooks default to doing nothing.
pub trait ProgressReporter {
    fn on_start(&mut self, _total: usize, _debug: bool) {}

    /// Called before wallet `index` (0-based) is checked
    fn on_check(&mut self, _index: usize, _total: usize, _wallet: &WalletRef) {}

    /// Called in debug mode after a failed check, with a raw probe of the endpoint
    fn on_probe(&mut self, _result: &BalanceResult, _probe: &Result<RawResponse>) {}
}

/// Reporter that only relies on the tracing events emitted by the checker
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {}

/// Checks a list of wallets one at a time, pausing between requests to stay
/// friendly with the upstream rate limits.
pub struct BatchChecker<R> {
    resolver: R,
    delay: Duration,
    debug: bool,
}

impl<R: BalanceResolver> BatchChecker<R> {
    pub fn new(resolver: R, delay: Duration) -> Self {
        Self {
            resolver,
            delay,
            debug: false,
        }
    }

    /// Probe the endpoint after each failure and hand the raw response to
    /// the progress reporter
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub async fn check_all(&self, wallets: &[WalletRef]) -> Vec<BalanceResult> {
        self.check_all_with_progress(wallets, &mut SilentProgress).await
    }

    /// Resolve every wallet in order. Always returns one result per wallet,
    /// in input order; individual failures never abort the run.
    pub async fn check_all_with_progress<P: ProgressReporter + ?Sized>(
        &self,
        wallets: &[WalletRef],
        progress: &mut P,
    ) -> Vec<BalanceResult> {
        let total = wallets.len();
        info!("Checking balances for {} wallets (delay {:?})", total, self.delay);
        progress.on_start(total, self.debug);

        let mut results = Vec::with_capacity(total);

        for (index, wallet) in wallets.iter().enumerate() {
            progress.on_check(index, total, wallet);
            debug!("Checking {}/{}: {}", index + 1, total, wallet.name);

            let result = self
                .resolver
                .resolve(&wallet.address, Some(&wallet.name))
                .await;

            if self.debug {
                if let Some(err) = result.error() {
                    warn!(
                        address = %wallet.address,
                        kind = err.kind(),
                        "Check failed for {}: {}",
                        wallet.name,
                        err
                    );
                    let probe = self.resolver.probe(&wallet.address).await;
                    progress.on_probe(&result, &probe);
                }
            }

            results.push(result);

            // no pause after the last wallet
            if index + 1 < total && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        let successful = results.iter().filter(|r| r.is_success()).count();
        info!(
            "Batch complete: {} succeeded, {} failed",
            successful,
            total - successful
        );

        results
    }
}
