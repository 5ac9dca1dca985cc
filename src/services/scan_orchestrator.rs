use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{interval, sleep, Duration};
use serde_json::Value;
use crate::config::constants::{
    SESSION_KEY_MALWARE, SESSION_KEY_PACKAGES, SESSION_KEY_REPOSITORY_URL,
    SESSION_KEY_SCAN_METADATA, SESSION_KEY_VULNERABILITIES,
};
use crate::enums::scan_state::ScanState;
use crate::errors::{SecureAiError, SecureAiResult};
use crate::logger::progress_logger::ProgressLogger;
use crate::services::issue_normalizer::IssueNormalizer;
use crate::services::scan_client::ScanBackend;
use crate::services::session_store::SessionStateStore;
use crate::structs::config::scanner_config::ScannerConfig;
use crate::structs::scan_metadata::ScanMetadata;
use crate::structs::scan_session::ScanSession;

/// Monotone progress value with a front-loaded deceleration curve.
///
/// On its own the animation only ever approaches the soft ceiling - it
/// cannot reach 100. Once the caller reports that the backend call
/// resolved, the next tick snaps straight to 100.
#[derive(Debug)]
pub struct ProgressAnimation {
    value: f64,
    soft_ceiling: f64,
}

/// Fraction of the remaining headroom consumed per tick. Large increments
/// early, asymptotically smaller ones near the ceiling.
const ADVANCE_RATE: f64 = 0.05;

impl ProgressAnimation {
    pub fn new(soft_ceiling: f64) -> Self {
        Self {
            value: 0.0,
            soft_ceiling: soft_ceiling.clamp(1.0, 99.0),
        }
    }

    /// Advances one tick. The completion flag is the single reconciliation
    /// point between the ticker and the network call.
    pub fn tick(&mut self, scan_complete: bool) -> u8 {
        if scan_complete {
            self.value = 100.0;
        } else {
            let advanced = self.value + (self.soft_ceiling - self.value) * ADVANCE_RATE;
            self.value = advanced.min(self.soft_ceiling);
        }
        self.percent()
    }

    pub fn percent(&self) -> u8 {
        self.value.floor() as u8
    }
}

/// What the scanning step resolved to. `MissingRepositoryUrl` is the
/// recovery path back to the input step; `Failed` keeps the user on the
/// scanning step with an explicit retry hint instead of a silently
/// stalled progress bar.
#[derive(Debug)]
pub enum ScanOutcome {
    Completed(Box<ScanSession>),
    MissingRepositoryUrl,
    Failed {
        repository_url: String,
        error: SecureAiError,
        final_percent: u8,
    },
    Cancelled,
}

/// Drives the scanning step: one backend request per orchestrator
/// lifetime, a progress ticker decoupled from network completion, and the
/// handoff of normalized results into the session store.
pub struct ScanOrchestrator {
    store: SessionStateStore,
    backend: Arc<dyn ScanBackend>,
    scanner: ScannerConfig,
    state: ScanState,
}

impl ScanOrchestrator {
    pub fn new(store: SessionStateStore, backend: Arc<dyn ScanBackend>, scanner: ScannerConfig) -> Self {
        Self {
            store,
            backend,
            scanner,
            state: ScanState::Idle,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    fn transition(&mut self, next: ScanState) {
        log::debug!("Scan state: {} -> {}", self.state.name(), next.name());
        self.state = next;
    }

    pub async fn run(&mut self) -> SecureAiResult<ScanOutcome> {
        let Some(repository_url) = self.store.get::<String>(SESSION_KEY_REPOSITORY_URL) else {
            log::info!("💡 No repository URL in session - returning to the input step");
            return Ok(ScanOutcome::MissingRepositoryUrl);
        };

        let mut metadata = ScanMetadata::new(&repository_url);
        log::info!("🔍 Scanning repository: {} (session {})", repository_url, metadata.session_id);

        self.transition(ScanState::Requesting);

        // Fire-and-forget relative to the animation: the ticker below never
        // blocks on this task, it only observes the completion flag.
        let scan_complete = Arc::new(AtomicBool::new(false));
        let scan_result: Arc<Mutex<Option<SecureAiResult<Value>>>> = Arc::new(Mutex::new(None));

        let task_complete = Arc::clone(&scan_complete);
        let task_result = Arc::clone(&scan_result);
        let task_backend = Arc::clone(&self.backend);
        let task_url = repository_url.clone();

        let network_handle = tokio::spawn(async move {
            let result = task_backend.scan_repository(&task_url).await;
            *task_result.lock().await = Some(result);
            task_complete.store(true, Ordering::SeqCst);
        });

        self.transition(ScanState::Animating);

        let mut animation = ProgressAnimation::new(self.scanner.soft_ceiling);
        let mut progress_logger = ProgressLogger::new();
        let mut ticker = interval(Duration::from_millis(self.scanner.tick_interval_ms));

        let payload = loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // Only the tick handler observes the completion flag;
                    // the network task never drives the transition itself.
                    let complete = scan_complete.load(Ordering::SeqCst);

                    if complete {
                        let result = scan_result.lock().await.take();
                        match result {
                            Some(Ok(payload)) => {
                                let percent = animation.tick(true);
                                progress_logger.render(percent);
                                break payload;
                            }
                            Some(Err(error)) => {
                                let final_percent = animation.percent();
                                progress_logger.error("Scan failed");
                                log::error!("Scan of '{}' failed: {}", repository_url, error);
                                return Ok(ScanOutcome::Failed {
                                    repository_url,
                                    error,
                                    final_percent,
                                });
                            }
                            // Flag raced ahead of the slot; pick it up next tick.
                            None => {
                                let percent = animation.tick(false);
                                progress_logger.render(percent);
                            }
                        }
                    } else {
                        let percent = animation.tick(false);
                        progress_logger.render(percent);
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    network_handle.abort();
                    progress_logger.error("Scan cancelled");
                    log::info!("🛑 Scan cancelled - no results were stored");
                    return Ok(ScanOutcome::Cancelled);
                }
            }
        };

        self.transition(ScanState::Complete);
        sleep(Duration::from_millis(self.scanner.settle_delay_ms)).await;
        progress_logger.finish("Scan complete");

        let report = IssueNormalizer::normalize(&payload);
        metadata.mark_completed();

        self.store.set(SESSION_KEY_VULNERABILITIES, &payload)?;
        self.store.set(SESSION_KEY_PACKAGES, &report.packages)?;
        self.store.set(SESSION_KEY_MALWARE, &report.malware)?;
        self.store.set(SESSION_KEY_SCAN_METADATA, &metadata)?;

        self.transition(ScanState::Transitioning);

        Ok(ScanOutcome::Completed(Box::new(ScanSession::new(metadata, report))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use tempfile::TempDir;

    struct StubBackend {
        response: SecureAiResult<Value>,
        called: Arc<AtomicBool>,
        delay_ms: u64,
    }

    #[async_trait]
    impl ScanBackend for StubBackend {
        async fn scan_repository(&self, _repository_url: &str) -> SecureAiResult<Value> {
            self.called.store(true, Ordering::SeqCst);
            if self.delay_ms > 0 {
                sleep(Duration::from_millis(self.delay_ms)).await;
            }
            self.response.clone()
        }
    }

    fn scanner_config() -> ScannerConfig {
        ScannerConfig {
            tick_interval_ms: 10,
            soft_ceiling: 90.0,
            settle_delay_ms: 1,
        }
    }

    fn orchestrator(
        dir: &TempDir,
        response: SecureAiResult<Value>,
        delay_ms: u64,
    ) -> (ScanOrchestrator, SessionStateStore, Arc<AtomicBool>) {
        let store = SessionStateStore::new(dir.path().join("session"));
        let called = Arc::new(AtomicBool::new(false));
        let backend = Arc::new(StubBackend {
            response,
            called: Arc::clone(&called),
            delay_ms,
        });
        let orchestrator = ScanOrchestrator::new(store.clone(), backend, scanner_config());
        (orchestrator, store, called)
    }

    #[test]
    fn animation_is_monotone_and_capped_below_completion() {
        let mut animation = ProgressAnimation::new(90.0);
        let mut previous = 0u8;

        for _ in 0..10_000 {
            let percent = animation.tick(false);
            assert!(percent >= previous);
            assert!(percent < 100, "animation must never reach 100 on its own");
            previous = percent;
        }

        assert!(previous <= 90);
    }

    #[test]
    fn animation_is_front_loaded() {
        let mut animation = ProgressAnimation::new(90.0);
        let first = animation.tick(false);
        let mut hundredth = 0;
        for _ in 0..99 {
            hundredth = animation.tick(false);
        }
        let late_delta = {
            let before = hundredth;
            animation.tick(false) - before
        };
        assert!(first >= 4, "early increments are large");
        assert!(late_delta <= 1, "late increments shrink toward the ceiling");
    }

    #[test]
    fn completion_flag_snaps_to_100_within_one_tick() {
        let mut animation = ProgressAnimation::new(90.0);
        for _ in 0..5 {
            animation.tick(false);
        }
        assert_eq!(animation.tick(true), 100);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_repository_url_short_circuits_without_network_call() {
        let dir = TempDir::new().unwrap();
        let (mut orchestrator, _store, called) = orchestrator(&dir, Ok(json!({"issues": []})), 0);

        let outcome = orchestrator.run().await.unwrap();

        assert!(matches!(outcome, ScanOutcome::MissingRepositoryUrl));
        assert!(!called.load(Ordering::SeqCst), "no network call may be issued");
        assert_eq!(orchestrator.state(), ScanState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn successful_scan_stores_results_and_transitions() {
        let dir = TempDir::new().unwrap();
        let payload = json!({
            "issues": [{
                "id": 1, "fileName": "a.py", "lineNumber": 3, "issueType": "X",
                "severity": "HIGH", "description": "d", "codeSnippet": "c", "suggestedFix": "f"
            }],
            "malware": []
        });
        let (mut orchestrator, store, _called) = orchestrator(&dir, Ok(payload.clone()), 50);
        store.set(SESSION_KEY_REPOSITORY_URL, &"https://github.com/acme/app").unwrap();

        let outcome = orchestrator.run().await.unwrap();

        let ScanOutcome::Completed(session) = outcome else {
            panic!("expected completed outcome");
        };
        assert!(session.scan_complete);
        assert_eq!(session.report.issues.len(), 1);
        assert_eq!(session.report.issues[0].severity_key(), "high");
        assert!(session.metadata.completed_at.is_some());
        assert_eq!(orchestrator.state(), ScanState::Transitioning);

        // Raw payload and derived buckets were handed off through the store
        let stored: Value = store.get(SESSION_KEY_VULNERABILITIES).unwrap();
        assert_eq!(stored, payload);
        assert!(store.get::<Vec<Value>>(SESSION_KEY_MALWARE).is_some());
        assert!(store.get::<ScanMetadata>(SESSION_KEY_SCAN_METADATA).is_some());
        let report = IssueNormalizer::normalize(&stored);
        assert_eq!(report.issues.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn backend_failure_keeps_progress_below_soft_ceiling() {
        let dir = TempDir::new().unwrap();
        let error = SecureAiError::network_error("vulnerability scan", None, Some(500), "boom");
        let (mut orchestrator, store, _called) = orchestrator(&dir, Err(error), 30);
        store.set(SESSION_KEY_REPOSITORY_URL, &"https://github.com/acme/app").unwrap();

        let outcome = orchestrator.run().await.unwrap();

        let ScanOutcome::Failed { final_percent, error, .. } = outcome else {
            panic!("expected failed outcome");
        };
        assert!(final_percent <= 90, "animation must not advance to completion on failure");
        assert!(matches!(error, SecureAiError::NetworkError { status_code: Some(500), .. }));

        // No results were stored: the results step would redirect to input
        assert!(store.get::<Value>(SESSION_KEY_VULNERABILITIES).is_none());
        assert!(store.get::<ScanMetadata>(SESSION_KEY_SCAN_METADATA).is_none());
    }
}
