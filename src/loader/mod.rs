//! Model-loading and fallback state machine.
//!
//! [`AssetLoadController`] drives one asset request from `Idle` to either
//! `Loaded` or `Degraded`. Failures are classified into a closed
//! [`FailureReason`] set, shown for a fixed window, then degraded to the
//! procedural placeholder. Transitions are monotonic forward; only a request
//! for a different URL resets the machine.
//!
//! The controller never performs IO itself. Arming it yields a [`LoadJob`]
//! that a [`worker::ThreadedLoader`] runs off the frame loop; completions
//! come back as [`worker::LoadEvent`]s and are committed on the UI thread.
//! Every in-flight operation carries the generation tag of the request it
//! belongs to. Completions with a stale tag are discarded, so a slow
//! response for a superseded URL can never overwrite the state of a newer
//! one.

pub mod fetch;
pub mod parse;
pub mod worker;

pub use fetch::{AssetFetcher, HttpFetcher};
pub use parse::{parse_scene, SceneHandle};
pub use worker::{LoadEvent, ThreadedLoader};

use std::time::{Duration, Instant};

use crate::catalog::AssetRequest;

/// How long a classified failure stays visible before the placeholder takes
/// over. Presentation concern, but a real timed transition.
pub const DEGRADE_DELAY: Duration = Duration::from_millis(3000);

/// Classified load failure. Affects user-facing messaging only; every reason
/// degrades identically.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FailureReason {
    #[error("Model not found")]
    NotFound,
    #[error("Access denied")]
    Forbidden,
    #[error("Server error ({0})")]
    ServerError(u16),
    #[error("Request blocked before leaving the client")]
    NetworkBlocked,
    #[error("Cross-origin request blocked")]
    CorsBlocked,
    #[error("Could not read model data: {0}")]
    ParseError(String),
    #[error("Network error: {0}")]
    UnknownNetworkError(String),
}

/// Which step of the download/parse pipeline gave up. Classification into
/// [`FailureReason`] happens in the controller; parse failures always win
/// over anything the probe saw, since they are diagnosed closest to the
/// actual failure point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadFailure {
    Fetch(String),
    Parse(String),
}

/// Map a probe status code. `None` for success codes.
pub fn classify_status(code: u16) -> Option<FailureReason> {
    match code {
        200..=299 => None,
        404 => Some(FailureReason::NotFound),
        403 => Some(FailureReason::Forbidden),
        other => Some(FailureReason::ServerError(other)),
    }
}

/// Map a transport error by message signature. Anything unrecognized still
/// resolves to `UnknownNetworkError`; nothing is swallowed.
pub fn classify_transport(message: &str) -> FailureReason {
    let lowered = message.to_ascii_lowercase();
    if lowered.contains("blocked_by_client") || lowered.contains("blocked by client") {
        FailureReason::NetworkBlocked
    } else if lowered.contains("cors") || lowered.contains("cross-origin") {
        FailureReason::CorsBlocked
    } else {
        FailureReason::UnknownNetworkError(message.to_string())
    }
}

/// One armed download, tagged with the generation it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadJob {
    pub url: String,
    pub generation: u64,
}

#[derive(Debug)]
pub enum LoadState {
    /// Not yet requested, or reset by a fresh request.
    Idle,
    /// Fetch/parse in flight. Progress is monotonically non-decreasing and
    /// may jump straight to `Loaded` without an observed 100 tick.
    Loading { progress: u8 },
    /// Asset ready; the handle is owned here until unmount or supersession.
    Loaded { scene: SceneHandle },
    /// Classified error, pending degrade.
    Failed { reason: FailureReason, since: Instant },
    /// Terminal until the request changes; the placeholder is shown.
    Degraded,
}

impl LoadState {
    pub fn name(&self) -> &'static str {
        match self {
            LoadState::Idle => "idle",
            LoadState::Loading { .. } => "loading",
            LoadState::Loaded { .. } => "loaded",
            LoadState::Failed { .. } => "failed",
            LoadState::Degraded => "degraded",
        }
    }
}

pub struct AssetLoadController {
    request: Option<AssetRequest>,
    state: LoadState,
    generation: u64,
}

impl AssetLoadController {
    pub fn new() -> Self {
        Self {
            request: None,
            state: LoadState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn request(&self) -> Option<&AssetRequest> {
        self.request.as_ref()
    }

    /// Tag for the current request. Every in-flight operation must carry
    /// this and hand it back on completion.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Begin (or supersede) a load. Idempotent per URL: the same URL while a
    /// load is underway or settled is a no-op. A different URL releases any
    /// owned scene handle, invalidates in-flight work and resets to `Idle`.
    /// Returns whether the machine was (re)armed.
    pub fn start(&mut self, request: AssetRequest) -> bool {
        if let Some(current) = &self.request {
            if current.url == request.url {
                return false;
            }
        }
        log::info!(
            "load request: {} ({})",
            request.asset_id,
            request.url
        );
        // Dropping the old state releases a Loaded scene handle and discards
        // a pending degrade timer in one move.
        self.state = LoadState::Idle;
        self.generation += 1;
        self.request = Some(request);
        true
    }

    /// Hand out the armed download, moving `Idle` -> `Loading{0}`. Returns
    /// `None` while a load is already in flight or settled, so each
    /// generation spawns exactly one job.
    pub fn take_job(&mut self) -> Option<LoadJob> {
        if !matches!(self.state, LoadState::Idle) {
            return None;
        }
        let request = self.request.as_ref()?;
        let job = LoadJob {
            url: request.url.clone(),
            generation: self.generation,
        };
        self.state = LoadState::Loading { progress: 0 };
        Some(job)
    }

    /// Commit one delivered event.
    pub fn apply(&mut self, event: LoadEvent, now: Instant) {
        match event {
            LoadEvent::Probe { generation, outcome } => {
                self.complete_probe(generation, outcome, now);
            }
            LoadEvent::Progress {
                generation,
                progress,
            } => self.report_progress(generation, progress),
            LoadEvent::Finished {
                generation,
                outcome,
            } => self.complete_load(generation, outcome, now),
        }
    }

    /// Raise the visible progress. Never decreases; ignored outside
    /// `Loading` or for a stale generation.
    pub fn report_progress(&mut self, generation: u64, progress: u8) {
        if generation != self.generation {
            return;
        }
        if let LoadState::Loading { progress: current } = &mut self.state {
            *current = (*current).max(progress.min(100));
        }
    }

    /// Commit the probe result. Returns whether the load should proceed to
    /// the fetch/parse step. Non-2xx statuses and transport errors settle
    /// into `Failed` with a classified reason.
    pub fn complete_probe(
        &mut self,
        generation: u64,
        outcome: Result<u16, String>,
        now: Instant,
    ) -> bool {
        if generation != self.generation || !matches!(self.state, LoadState::Loading { .. }) {
            log::debug!("discarding stale probe result");
            return false;
        }
        let reason = match outcome {
            Ok(code) => match classify_status(code) {
                None => return true,
                Some(reason) => reason,
            },
            Err(message) => classify_transport(&message),
        };
        self.fail(reason, now);
        false
    }

    /// Commit the end of the fetch/parse pipeline: either a parsed scene or
    /// the step that gave up, classified here.
    pub fn complete_load(
        &mut self,
        generation: u64,
        outcome: Result<SceneHandle, LoadFailure>,
        now: Instant,
    ) {
        if generation != self.generation || !matches!(self.state, LoadState::Loading { .. }) {
            log::debug!("discarding stale load result");
            return;
        }
        match outcome {
            Ok(scene) => {
                log::info!(
                    "loaded {}: {:?}",
                    self.request
                        .as_ref()
                        .map(|request| request.asset_id.as_str())
                        .unwrap_or("?"),
                    scene
                );
                self.state = LoadState::Loaded { scene };
            }
            Err(LoadFailure::Fetch(message)) => self.fail(classify_transport(&message), now),
            Err(LoadFailure::Parse(message)) => {
                self.fail(FailureReason::ParseError(message), now)
            }
        }
    }

    /// Advance the degrade timer. `Failed` becomes `Degraded` once the delay
    /// has fully elapsed, never sooner. Superseding the request replaces the
    /// `Failed` state itself, so a cancelled timer cannot fire.
    pub fn tick(&mut self, now: Instant) {
        if let LoadState::Failed { since, reason } = &self.state {
            if now.saturating_duration_since(*since) >= DEGRADE_DELAY {
                log::info!("degrading to placeholder after {reason}");
                self.state = LoadState::Degraded;
            }
        }
    }

    fn fail(&mut self, reason: FailureReason, now: Instant) {
        log::warn!(
            "load failed for {}: {reason}",
            self.request
                .as_ref()
                .map(|request| request.asset_id.as_str())
                .unwrap_or("?")
        );
        self.state = LoadState::Failed { reason, since: now };
    }
}

impl Default for AssetLoadController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: &str) -> AssetRequest {
        AssetRequest::new(url, "Test Model")
    }

    fn failed_reason(controller: &AssetLoadController) -> &FailureReason {
        match controller.state() {
            LoadState::Failed { reason, .. } => reason,
            other => panic!("expected Failed, got {}", other.name()),
        }
    }

    /// Scripted fetcher for exercising each classification path.
    #[derive(Clone)]
    struct ScriptedFetcher {
        probe: Result<u16, String>,
        body: Result<Vec<u8>, String>,
    }

    impl ScriptedFetcher {
        fn status(code: u16) -> Self {
            Self {
                probe: Ok(code),
                body: Err("unreachable".to_string()),
            }
        }

        fn transport(message: &str) -> Self {
            Self {
                probe: Err(message.to_string()),
                body: Err("unreachable".to_string()),
            }
        }

        fn body(bytes: &[u8]) -> Self {
            Self {
                probe: Ok(200),
                body: Ok(bytes.to_vec()),
            }
        }
    }

    impl AssetFetcher for ScriptedFetcher {
        fn probe(&mut self, _url: &str) -> Result<u16, String> {
            self.probe.clone()
        }

        fn fetch(&mut self, _url: &str) -> Result<Vec<u8>, String> {
            self.body.clone()
        }
    }

    /// Run one armed load end to end through the tagged completions, the way
    /// the worker does, but synchronously and with a fixed clock.
    fn drive(controller: &mut AssetLoadController, fetcher: &mut ScriptedFetcher, now: Instant) {
        if let Some(job) = controller.take_job() {
            let probe = fetcher.probe(&job.url);
            if controller.complete_probe(job.generation, probe, now) {
                controller.report_progress(job.generation, 25);
                let outcome = match fetcher.fetch(&job.url) {
                    Ok(bytes) => {
                        controller.report_progress(job.generation, 75);
                        parse_scene(&bytes).map_err(LoadFailure::Parse)
                    }
                    Err(message) => Err(LoadFailure::Fetch(message)),
                };
                controller.complete_load(job.generation, outcome, now);
            }
        }
        controller.tick(now);
    }

    #[test]
    fn status_classification_is_exhaustive() {
        assert_eq!(classify_status(200), None);
        assert_eq!(classify_status(204), None);
        assert_eq!(classify_status(404), Some(FailureReason::NotFound));
        assert_eq!(classify_status(403), Some(FailureReason::Forbidden));
        assert_eq!(classify_status(500), Some(FailureReason::ServerError(500)));
        assert_eq!(classify_status(301), Some(FailureReason::ServerError(301)));
    }

    #[test]
    fn transport_classification_matches_signatures() {
        assert_eq!(
            classify_transport("net::ERR_BLOCKED_BY_CLIENT"),
            FailureReason::NetworkBlocked
        );
        assert_eq!(
            classify_transport("request blocked by client extension"),
            FailureReason::NetworkBlocked
        );
        assert_eq!(
            classify_transport("CORS policy rejected the request"),
            FailureReason::CorsBlocked
        );
        assert_eq!(
            classify_transport("cross-origin request denied"),
            FailureReason::CorsBlocked
        );
        assert_eq!(
            classify_transport("connection refused"),
            FailureReason::UnknownNetworkError("connection refused".to_string())
        );
    }

    #[test]
    fn not_found_fails_then_degrades_after_exactly_the_delay() {
        let mut controller = AssetLoadController::new();
        let start = Instant::now();
        controller.start(request("/models/earth-layers.glb"));
        drive(&mut controller, &mut ScriptedFetcher::status(404), start);

        assert_eq!(failed_reason(&controller), &FailureReason::NotFound);

        // Never sooner.
        controller.tick(start + Duration::from_millis(2999));
        assert!(matches!(controller.state(), LoadState::Failed { .. }));

        controller.tick(start + DEGRADE_DELAY);
        assert!(matches!(controller.state(), LoadState::Degraded));
    }

    #[test]
    fn forbidden_and_server_errors_classify() {
        let mut controller = AssetLoadController::new();
        controller.start(request("/models/a.glb"));
        drive(&mut controller, &mut ScriptedFetcher::status(403), Instant::now());
        assert_eq!(failed_reason(&controller), &FailureReason::Forbidden);

        let mut controller = AssetLoadController::new();
        controller.start(request("/models/a.glb"));
        drive(&mut controller, &mut ScriptedFetcher::status(503), Instant::now());
        assert_eq!(failed_reason(&controller), &FailureReason::ServerError(503));
    }

    #[test]
    fn transport_failures_reach_a_reason_instead_of_vanishing() {
        let mut controller = AssetLoadController::new();
        controller.start(request("/models/a.glb"));
        drive(
            &mut controller,
            &mut ScriptedFetcher::transport("socket closed unexpectedly"),
            Instant::now(),
        );
        assert_eq!(
            failed_reason(&controller),
            &FailureReason::UnknownNetworkError("socket closed unexpectedly".to_string())
        );
    }

    #[test]
    fn parse_failure_takes_precedence_after_a_clean_probe() {
        let mut controller = AssetLoadController::new();
        controller.start(request("/models/a.glb"));
        drive(
            &mut controller,
            &mut ScriptedFetcher::body(b"corrupted bytes"),
            Instant::now(),
        );
        assert!(matches!(
            failed_reason(&controller),
            FailureReason::ParseError(_)
        ));
    }

    #[test]
    fn valid_bytes_load() {
        let mut controller = AssetLoadController::new();
        controller.start(request("/models/a.glb"));
        drive(
            &mut controller,
            &mut ScriptedFetcher::body(parse::EMPTY_GLTF),
            Instant::now(),
        );
        assert!(matches!(controller.state(), LoadState::Loaded { .. }));
    }

    #[test]
    fn start_is_idempotent_per_url() {
        let mut controller = AssetLoadController::new();
        assert!(controller.start(request("/models/a.glb")));
        let generation = controller.generation();
        assert!(!controller.start(request("/models/a.glb")));
        assert_eq!(controller.generation(), generation);

        assert!(controller.start(request("/models/b.glb")));
        assert_eq!(controller.generation(), generation + 1);
        assert!(matches!(controller.state(), LoadState::Idle));
    }

    #[test]
    fn each_generation_hands_out_exactly_one_job() {
        let mut controller = AssetLoadController::new();
        assert!(controller.take_job().is_none());

        controller.start(request("/models/a.glb"));
        let job = controller.take_job().unwrap();
        assert_eq!(job.url, "/models/a.glb");
        assert_eq!(job.generation, controller.generation());
        assert!(matches!(
            controller.state(),
            LoadState::Loading { progress: 0 }
        ));
        assert!(controller.take_job().is_none());

        controller.start(request("/models/b.glb"));
        let job = controller.take_job().unwrap();
        assert_eq!(job.url, "/models/b.glb");
    }

    #[test]
    fn a_new_url_releases_the_loaded_scene() {
        let mut controller = AssetLoadController::new();
        controller.start(request("/models/a.glb"));
        drive(
            &mut controller,
            &mut ScriptedFetcher::body(parse::EMPTY_GLTF),
            Instant::now(),
        );
        assert!(matches!(controller.state(), LoadState::Loaded { .. }));

        controller.start(request("/models/b.glb"));
        assert!(matches!(controller.state(), LoadState::Idle));
    }

    #[test]
    fn stale_completions_are_discarded() {
        let mut controller = AssetLoadController::new();
        controller.start(request("/models/slow.glb"));
        let stale_job = controller.take_job().unwrap();

        // A newer request supersedes the in-flight one.
        controller.start(request("/models/fresh.glb"));
        let now = Instant::now();

        // Late success for the old URL must not commit.
        assert!(!controller.complete_probe(stale_job.generation, Ok(200), now));
        controller.complete_load(
            stale_job.generation,
            parse_scene(parse::EMPTY_GLTF).map_err(LoadFailure::Parse),
            now,
        );
        assert!(matches!(controller.state(), LoadState::Idle));

        // Late failure for the old URL must not commit either.
        controller.complete_load(
            stale_job.generation,
            Err(LoadFailure::Fetch("timed out".to_string())),
            now,
        );
        assert!(matches!(controller.state(), LoadState::Idle));

        // The fresh request still proceeds normally.
        drive(&mut controller, &mut ScriptedFetcher::status(404), now);
        assert_eq!(failed_reason(&controller), &FailureReason::NotFound);
    }

    #[test]
    fn superseding_a_failed_request_cancels_the_degrade_timer() {
        let mut controller = AssetLoadController::new();
        let start = Instant::now();
        controller.start(request("/models/a.glb"));
        drive(&mut controller, &mut ScriptedFetcher::status(404), start);
        assert!(matches!(controller.state(), LoadState::Failed { .. }));

        controller.start(request("/models/b.glb"));
        // The old timer deadline passes; nothing may fire.
        controller.tick(start + DEGRADE_DELAY * 2);
        assert!(matches!(controller.state(), LoadState::Idle));
    }

    #[test]
    fn progress_is_monotonic_and_capped() {
        let mut controller = AssetLoadController::new();
        controller.start(request("/models/a.glb"));
        let job = controller.take_job().unwrap();

        controller.report_progress(job.generation, 40);
        controller.report_progress(job.generation, 10);
        assert!(matches!(
            controller.state(),
            LoadState::Loading { progress: 40 }
        ));

        controller.report_progress(job.generation, 200);
        assert!(matches!(
            controller.state(),
            LoadState::Loading { progress: 100 }
        ));

        // Stale generation cannot touch progress.
        controller.report_progress(job.generation + 1, 100);
        assert!(matches!(
            controller.state(),
            LoadState::Loading { progress: 100 }
        ));
    }

    #[test]
    fn degraded_is_terminal_until_the_request_changes() {
        let mut controller = AssetLoadController::new();
        let start = Instant::now();
        controller.start(request("/models/a.glb"));
        drive(&mut controller, &mut ScriptedFetcher::status(404), start);
        controller.tick(start + DEGRADE_DELAY);
        assert!(matches!(controller.state(), LoadState::Degraded));

        // Same URL: no restart, no re-fetch.
        assert!(!controller.start(request("/models/a.glb")));
        drive(
            &mut controller,
            &mut ScriptedFetcher::status(200),
            start + DEGRADE_DELAY,
        );
        assert!(matches!(controller.state(), LoadState::Degraded));

        // Different URL leaves the terminal state.
        assert!(controller.start(request("/models/b.glb")));
        assert!(matches!(controller.state(), LoadState::Idle));
    }
}
