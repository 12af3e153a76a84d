use axum::{extract::State, Json};
use serde::Serialize;

use crate::layout::FontSize;
use crate::state::AppState;
use crate::templates::{catalog, TemplateInfo, TemplateSelection};

#[derive(Serialize)]
pub struct TemplateCard {
    #[serde(flatten)]
    pub info: TemplateInfo,
    /// Whether this is the server's default template.
    pub selected: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateCatalogResponse {
    pub templates: Vec<TemplateCard>,
    pub font_sizes: Vec<FontSize>,
    pub defaults: TemplateSelection,
}

/// GET /api/v1/templates
pub async fn handle_list_templates(State(state): State<AppState>) -> Json<TemplateCatalogResponse> {
    let templates = catalog()
        .into_iter()
        .map(|info| TemplateCard {
            selected: state.defaults.is_selected(info.id),
            info,
        })
        .collect();

    Json(TemplateCatalogResponse {
        templates,
        font_sizes: FontSize::ALL.to_vec(),
        defaults: state.defaults,
    })
}
