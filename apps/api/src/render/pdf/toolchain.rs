//! Lazily loaded PDF toolchain behind the download button.
//!
//! The engine is loaded at most once, on a blocking thread, the first time
//! anyone asks for it (`prepare` or `render`). Concurrent first callers share
//! one load. A failed load leaves the toolchain idle so a later request can
//! try again.
//!
//! `AppState` holds an `Arc<dyn PdfBackend>`.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::render::pdf::{PdfEngine, PdfError, PdfJob, RenderedPdf};

// ────────────────────────────────────────────────────────────────────────────
// State model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolchainState {
    Idle,
    Loading,
    Ready,
}

/// What the download control should offer right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DownloadPhase {
    Prepare,
    Loading,
    Generating,
    Download,
}

impl DownloadPhase {
    pub fn from_state(state: ToolchainState, in_flight: usize) -> Self {
        match state {
            ToolchainState::Idle => DownloadPhase::Prepare,
            ToolchainState::Loading => DownloadPhase::Loading,
            ToolchainState::Ready if in_flight > 0 => DownloadPhase::Generating,
            ToolchainState::Ready => DownloadPhase::Download,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DownloadPhase::Prepare => "Prepare Download",
            DownloadPhase::Loading => "Loading...",
            DownloadPhase::Generating => "Generating PDF...",
            DownloadPhase::Download => "Download PDF",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolchainStatus {
    pub state: ToolchainState,
    pub phase: DownloadPhase,
    pub label: &'static str,
    pub in_flight: usize,
    pub loaded_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait PdfBackend: Send + Sync {
    fn status(&self) -> ToolchainStatus;

    /// Loads the engine if needed and reports the resulting status.
    async fn prepare(&self) -> Result<ToolchainStatus, PdfError>;

    /// Renders one document, loading the engine first if needed.
    async fn render(&self, job: PdfJob) -> Result<RenderedPdf, PdfError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PdfToolchain
// ────────────────────────────────────────────────────────────────────────────

struct LoadedEngine {
    engine: Arc<PdfEngine>,
    loaded_at: DateTime<Utc>,
}

pub struct PdfToolchain {
    dial_code: String,
    engine: OnceCell<LoadedEngine>,
    loading: AtomicBool,
    in_flight: AtomicUsize,
    last_error: Mutex<Option<String>>,
}

/// Counts a render as in flight until dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        InFlight(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl PdfToolchain {
    pub fn new(dial_code: impl Into<String>) -> Self {
        Self {
            dial_code: dial_code.into(),
            engine: OnceCell::new(),
            loading: AtomicBool::new(false),
            in_flight: AtomicUsize::new(0),
            last_error: Mutex::new(None),
        }
    }

    fn state(&self) -> ToolchainState {
        if self.engine.initialized() {
            ToolchainState::Ready
        } else if self.loading.load(Ordering::SeqCst) {
            ToolchainState::Loading
        } else {
            ToolchainState::Idle
        }
    }

    fn set_last_error(&self, error: Option<String>) {
        if let Ok(mut slot) = self.last_error.lock() {
            *slot = error;
        }
    }

    async fn engine(&self) -> Result<Arc<PdfEngine>, PdfError> {
        let loaded = self
            .engine
            .get_or_try_init(|| async {
                self.loading.store(true, Ordering::SeqCst);
                info!("Loading PDF engine");
                let started = Instant::now();

                let dial_code = self.dial_code.clone();
                let result = tokio::task::spawn_blocking(move || PdfEngine::load(&dial_code))
                    .await
                    .map_err(|e| PdfError::Task(format!("spawn_blocking failed in engine load: {e}")))
                    .and_then(|loaded| loaded);

                self.loading.store(false, Ordering::SeqCst);
                match result {
                    Ok(engine) => {
                        info!(
                            "PDF engine ready in {}ms",
                            started.elapsed().as_millis()
                        );
                        self.set_last_error(None);
                        Ok(LoadedEngine {
                            engine: Arc::new(engine),
                            loaded_at: Utc::now(),
                        })
                    }
                    Err(e) => {
                        warn!("PDF engine failed to load: {e}");
                        self.set_last_error(Some(e.to_string()));
                        Err(e)
                    }
                }
            })
            .await?;
        Ok(Arc::clone(&loaded.engine))
    }
}

#[async_trait]
impl PdfBackend for PdfToolchain {
    fn status(&self) -> ToolchainStatus {
        let state = self.state();
        let in_flight = self.in_flight.load(Ordering::SeqCst);
        let phase = DownloadPhase::from_state(state, in_flight);
        ToolchainStatus {
            state,
            phase,
            label: phase.label(),
            in_flight,
            loaded_at: self.engine.get().map(|loaded| loaded.loaded_at),
            last_error: self.last_error.lock().ok().and_then(|slot| slot.clone()),
        }
    }

    async fn prepare(&self) -> Result<ToolchainStatus, PdfError> {
        self.engine().await?;
        Ok(self.status())
    }

    async fn render(&self, job: PdfJob) -> Result<RenderedPdf, PdfError> {
        let _in_flight = InFlight::enter(&self.in_flight);
        let engine = self.engine().await?;

        let render_id = job.render_id;
        let started = Instant::now();
        let rendered = tokio::task::spawn_blocking(move || engine.render(&job))
            .await
            .map_err(|e| PdfError::Task(format!("spawn_blocking failed in render: {e}")))??;

        info!(
            %render_id,
            "Rendered {} with template {} ({} pages, {} bytes) in {}ms",
            rendered.file_name,
            rendered.template,
            rendered.pages,
            rendered.bytes.len(),
            started.elapsed().as_millis()
        );
        Ok(rendered)
    }
}
