use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::header,
    response::{IntoResponse, Response},
};

use super::dto::ExportQuery;
use super::service::ExportService;
use crate::state::AppState;
use crate::utils::error::AppError;

/// 프로젝트 내보내기 API
///
/// 성공 시 공통 응답 래퍼 없이 파일 본문을 첨부 파일로 반환합니다.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}/export",
    params(
        ("id" = i64, Path, description = "프로젝트 ID"),
        ExportQuery
    ),
    responses(
        (status = 200, description = "테스트 스위트(JSON) 또는 품질 명세(Markdown) 파일",
            content(("application/json" = String), ("text/markdown" = String))),
        (status = 400, description = "추출 결과 또는 시나리오 없음", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 프로젝트", body = ErrorResponse)
    ),
    tag = "Export"
)]
pub async fn export_project(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    query: Result<Query<ExportQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Path(project_id) = path?;
    let Query(query) = query?;

    let document = ExportService::export_project(&state, project_id, query.format).await?;
    let content_disposition = document.content_disposition();

    Ok((
        [
            (header::CONTENT_TYPE, document.content_type.to_string()),
            (header::CONTENT_DISPOSITION, content_disposition),
        ],
        document.body,
    )
        .into_response())
}
