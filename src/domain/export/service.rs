use chrono::Utc;
use tracing::info;

use super::dto::{ExportDocument, ExportFormat};
use super::markdown::render_markdown;
use super::selection::select_examples;
use super::suite::build_test_suite;
use crate::domain::extraction::analysis::Analysis;
use crate::domain::extraction::service::ExtractionService;
use crate::domain::output::service::OutputService;
use crate::domain::project::service::ProjectService;
use crate::domain::scenario::service::ScenarioService;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::text::safe_file_name;

pub struct ExportService;

impl ExportService {
    /// 최신 추출 결과로 테스트 스위트(JSON) 또는 품질 명세(Markdown) 생성
    pub async fn export_project(
        state: &AppState,
        project_id: i64,
        format: ExportFormat,
    ) -> Result<ExportDocument, AppError> {
        let project = ProjectService::find_project(state.db.as_ref(), project_id).await?;

        let extraction = ExtractionService::find_latest(state.db.as_ref(), project_id)
            .await?
            .ok_or_else(|| {
                AppError::ExtractionNotFound(
                    "No extraction found. Please analyze patterns first.".to_string(),
                )
            })?;

        let scenarios = ScenarioService::find_by_project(state.db.as_ref(), project_id).await?;
        if scenarios.is_empty() {
            return Err(AppError::NoScenarios(
                "No scenarios found for this project".to_string(),
            ));
        }

        let rated = OutputService::rated_outputs_for(state.db.as_ref(), &scenarios).await?;
        let examples = select_examples(&rated);
        let analysis = Analysis::from_value(&extraction.criteria);
        let exported_at = Utc::now();
        let base_name = safe_file_name(&project.name);

        let document = match format {
            ExportFormat::Markdown => ExportDocument {
                content_type: "text/markdown",
                file_name: format!("{base_name}_quality_spec.md"),
                body: render_markdown(&project, &analysis, &examples, exported_at),
            },
            ExportFormat::Json => {
                let suite = build_test_suite(&project, &analysis, &examples, exported_at);
                ExportDocument {
                    content_type: "application/json",
                    file_name: format!("{base_name}_test_suite.json"),
                    body: serde_json::to_string_pretty(&suite)
                        .map_err(|e| AppError::InternalError(e.to_string()))?,
                }
            }
        };

        info!(
            project_id = project_id,
            extraction_id = extraction.id,
            format = ?format,
            golden = examples.golden.len(),
            negative = examples.negative.len(),
            "Project exported"
        );

        Ok(document)
    }
}
