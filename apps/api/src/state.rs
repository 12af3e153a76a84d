use std::sync::Arc;

use crate::config::Config;
use crate::render::pdf::PdfBackend;
use crate::templates::TemplateSelection;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Lazily loaded PDF toolchain. Default: `PdfToolchain`.
    pub pdf: Arc<dyn PdfBackend>,
    /// Template and font size used when neither the request nor the document picks one.
    pub defaults: TemplateSelection,
}

impl AppState {
    pub fn new(config: Config, pdf: Arc<dyn PdfBackend>) -> Self {
        let mut defaults = TemplateSelection::default();
        defaults.select_template(config.default_template);
        defaults.select_font_size(config.default_font_size);
        Self {
            config,
            pdf,
            defaults,
        }
    }
}
