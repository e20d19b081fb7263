pub mod config;
pub mod domain;
pub mod global;
pub mod shutdown;
pub mod state;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use state::AppState;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use domain::{export, extraction, health, output, project, rating, scenario};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::handler::health_check,
        project::handler::create_project,
        project::handler::list_projects,
        project::handler::get_project,
        project::handler::update_project,
        scenario::handler::create_scenario,
        scenario::handler::list_scenarios,
        output::handler::generate_outputs,
        output::handler::list_project_outputs,
        output::handler::get_output,
        rating::handler::create_rating,
        rating::handler::list_ratings,
        extraction::handler::run_extraction,
        extraction::handler::list_extractions,
        extraction::handler::get_insights,
        export::handler::export_project,
    ),
    components(
        schemas(
            health::dto::HealthStatus,
            health::dto::HealthState,
            health::dto::HealthChecks,
            health::dto::CheckResult,
            project::dto::ModelConfigDto,
            project::dto::CreateProjectRequest,
            project::dto::UpdateProjectRequest,
            project::dto::ProjectResponse,
            project::dto::ProjectDetailResponse,
            project::dto::SuccessProjectResponse,
            project::dto::SuccessProjectListResponse,
            project::dto::SuccessProjectDetailResponse,
            scenario::dto::CreateScenarioRequest,
            scenario::dto::ScenarioResponse,
            scenario::dto::SuccessScenarioResponse,
            scenario::dto::SuccessScenarioListResponse,
            output::dto::ModelSnapshotDto,
            output::dto::OutputResponse,
            output::dto::GenerationError,
            output::dto::GenerateOutputsResponse,
            output::dto::ScenarioOutputItem,
            output::dto::ProjectOutputsResponse,
            output::dto::OutputDetailResponse,
            output::dto::SuccessGenerateOutputsResponse,
            output::dto::SuccessProjectOutputsResponse,
            output::dto::SuccessOutputDetailResponse,
            rating::dto::CreateRatingRequest,
            rating::dto::RatingResponse,
            rating::dto::SuccessRatingResponse,
            rating::dto::SuccessRatingListResponse,
            extraction::dto::ExtractionResponse,
            extraction::dto::MetricResponse,
            extraction::dto::RunExtractionResponse,
            extraction::dto::ExtractionHistoryItem,
            extraction::dto::InsightsResponse,
            extraction::dto::SuccessRunExtractionResponse,
            extraction::dto::SuccessExtractionHistoryResponse,
            extraction::dto::SuccessInsightsResponse,
            extraction::metrics::Interpretation,
            extraction::metrics::Variant,
            export::dto::ExportFormat,
            utils::response::ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "서버 상태 API"),
        (name = "Project", description = "프로젝트(행동 명세) API"),
        (name = "Scenario", description = "테스트 시나리오 API"),
        (name = "Output", description = "모델 출력 생성/조회 API"),
        (name = "Rating", description = "출력 평가 API"),
        (name = "Extraction", description = "패턴 추출과 지표 API"),
        (name = "Export", description = "테스트 스위트/품질 명세 내보내기 API")
    )
)]
pub struct ApiDoc;

pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/projects",
            post(project::handler::create_project).get(project::handler::list_projects),
        )
        .route(
            "/projects/:id",
            get(project::handler::get_project).patch(project::handler::update_project),
        )
        .route(
            "/projects/:id/scenarios",
            post(scenario::handler::create_scenario).get(scenario::handler::list_scenarios),
        )
        .route(
            "/projects/:id/generate",
            post(output::handler::generate_outputs),
        )
        .route(
            "/projects/:id/outputs",
            get(output::handler::list_project_outputs),
        )
        .route(
            "/projects/:id/extract",
            post(extraction::handler::run_extraction),
        )
        .route(
            "/projects/:id/extractions",
            get(extraction::handler::list_extractions),
        )
        .route(
            "/projects/:id/insights",
            get(extraction::handler::get_insights),
        )
        .route("/projects/:id/export", get(export::handler::export_project))
        .route("/outputs/:output_id", get(output::handler::get_output))
        .route(
            "/outputs/:output_id/ratings",
            post(rating::handler::create_rating).get(rating::handler::list_ratings),
        );

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health::health_check))
        .nest("/api/v1", api)
        .layer(middleware::from_fn(global::middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
