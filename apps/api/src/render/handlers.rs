use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::Resume;
use crate::render::pdf::ToolchainStatus;
use crate::render::{pdf_job, plan, render_html, RenderOptions, SectionPlan};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub resume: Resume,
    #[serde(flatten)]
    pub options: RenderOptions,
    /// Return only the template markup instead of a full page.
    #[serde(default)]
    pub fragment: bool,
}

fn checked_plan(state: &AppState, req: &RenderRequest) -> Result<SectionPlan, AppError> {
    req.resume.validate()?;
    Ok(plan(&req.resume, &req.options, &state.defaults))
}

/// POST /api/v1/render/sections
pub async fn handle_section_plan(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Result<Json<SectionPlan>, AppError> {
    Ok(Json(checked_plan(&state, &req)?))
}

/// POST /api/v1/render/html
pub async fn handle_render_html(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Result<Html<String>, AppError> {
    let plan = checked_plan(&state, &req)?;
    let render_id = Uuid::new_v4();
    info!(
        %render_id,
        "Rendering HTML preview: template={} sections={}",
        plan.template,
        plan.sections.len()
    );
    Ok(Html(render_html(
        &req.resume,
        &plan,
        &state.config.default_dial_code,
        req.fragment,
    )))
}

/// GET /api/v1/render/pdf/status
pub async fn handle_pdf_status(State(state): State<AppState>) -> Json<ToolchainStatus> {
    Json(state.pdf.status())
}

/// POST /api/v1/render/pdf/prepare
pub async fn handle_pdf_prepare(
    State(state): State<AppState>,
) -> Result<Json<ToolchainStatus>, AppError> {
    Ok(Json(state.pdf.prepare().await?))
}

/// POST /api/v1/render/pdf
pub async fn handle_render_pdf(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Result<Response, AppError> {
    let plan = checked_plan(&state, &req)?;
    let job = pdf_job(req.resume, plan);
    info!(
        render_id = %job.render_id,
        "PDF requested: template={} font_size={}",
        job.template,
        job.font_size
    );

    let rendered = state.pdf.render(job).await?;

    let file_name = rendered.file_name.replace(['"', '\\'], "");
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{file_name}\""))
        .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid download file name: {e}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        rendered.bytes,
    )
        .into_response())
}
