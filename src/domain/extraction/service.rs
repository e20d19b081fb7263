use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde_json::Value;
use tracing::{debug, info};

use super::dto::{ExtractionHistoryItem, InsightsResponse, MetricResponse, RunExtractionResponse};
use super::entity::{extraction, metric};
use super::metrics::{
    confidence_score, criteria_breakdown, interpret_confidence, interpret_success_rate,
    select_window, success_rate,
};
use super::prompt::ExtractionPrompt;
use crate::domain::ai::{with_retry, CompletionRequest};
use crate::domain::output::service::OutputService;
use crate::domain::project::service::ProjectService;
use crate::domain::scenario::service::ScenarioService;
use crate::state::AppState;
use crate::utils::error::AppError;

pub struct ExtractionService;

impl ExtractionService {
    /// 프로젝트의 최신 추출 결과
    pub async fn find_latest<C: ConnectionTrait>(
        db: &C,
        project_id: i64,
    ) -> Result<Option<extraction::Model>, AppError> {
        extraction::Entity::find()
            .filter(extraction::Column::ProjectId.eq(project_id))
            .order_by_desc(extraction::Column::CreatedAt)
            .order_by_desc(extraction::Column::Id)
            .one(db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))
    }

    /// 패턴 추출 실행
    ///
    /// 1. 출력물마다 최신 평가 하나를 대표값으로 사용
    /// 2. `full`이 아니면 직전 추출 이후의 평가만 분석
    /// 3. 모델 응답(JSON)을 그대로 저장하고 지표를 같은 트랜잭션에 기록
    pub async fn run_extraction(
        state: &AppState,
        project_id: i64,
        full: bool,
    ) -> Result<RunExtractionResponse, AppError> {
        ProjectService::find_project(state.db.as_ref(), project_id).await?;
        // 분석 구간의 상한이자 다음 추출의 기준 시각
        let started_at = Utc::now().naive_utc();

        let previous = Self::find_latest(state.db.as_ref(), project_id).await?;
        let since = if full {
            None
        } else {
            previous.as_ref().map(|p| p.created_at)
        };

        let rated = OutputService::load_rated_outputs(state.db.as_ref(), project_id).await?;
        let window = select_window(rated, since, started_at);
        if window.is_empty() {
            return Err(match since {
                None => AppError::NoRatedOutputs(
                    "No rated outputs found. Please rate at least a few outputs before analyzing patterns."
                        .to_string(),
                ),
                Some(_) => AppError::NoNewRatings(
                    "No new ratings since the last extraction".to_string(),
                ),
            });
        }

        debug!(
            project_id = project_id,
            analyzed = window.len(),
            incremental = since.is_some(),
            "Running pattern extraction"
        );

        let request = CompletionRequest {
            model: state.config.extraction_model.clone(),
            temperature: state.config.extraction_temperature,
            system_prompt: Some(ExtractionPrompt::system_prompt().to_string()),
            user_prompt: ExtractionPrompt::user_prompt(&window)?,
            json_response: true,
        };
        let completion = with_retry(|| {
            let client = state.ai_client.clone();
            let request = request.clone();
            async move { client.complete(request).await }
        })
        .await?;

        let analysis = parse_analysis(completion.content.as_deref())?;
        let analyzed = window.len();
        let breakdown = criteria_breakdown(&analysis);

        let txn = state
            .db
            .begin()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let saved_extraction = extraction::ActiveModel {
            project_id: Set(project_id),
            criteria: Set(analysis),
            confidence_score: Set(confidence_score(analyzed)),
            rated_output_count: Set(analyzed as i32),
            created_at: Set(started_at),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

        let saved_metric = metric::ActiveModel {
            project_id: Set(project_id),
            extraction_id: Set(Some(saved_extraction.id)),
            success_rate: Set(success_rate(&window)),
            criteria_breakdown: Set(breakdown),
            snapshot_time: Set(started_at),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        info!(
            project_id = project_id,
            extraction_id = saved_extraction.id,
            analyzed = analyzed,
            success_rate = saved_metric.success_rate,
            confidence = saved_extraction.confidence_score,
            "Pattern extraction saved"
        );

        Ok(RunExtractionResponse {
            extraction: saved_extraction.into(),
            metric: saved_metric.into(),
            analyzed_outputs: analyzed,
        })
    }

    /// 추출 이력 (최신순)
    pub async fn list_extractions(
        state: &AppState,
        project_id: i64,
    ) -> Result<Vec<ExtractionHistoryItem>, AppError> {
        ProjectService::find_project(state.db.as_ref(), project_id).await?;

        let extractions = extraction::Entity::find()
            .filter(extraction::Column::ProjectId.eq(project_id))
            .order_by_desc(extraction::Column::CreatedAt)
            .order_by_desc(extraction::Column::Id)
            .all(state.db.as_ref())
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let metrics = if extractions.is_empty() {
            Vec::new()
        } else {
            metric::Entity::find()
                .filter(
                    metric::Column::ExtractionId
                        .is_in(extractions.iter().map(|e| e.id).collect::<Vec<_>>()),
                )
                .all(state.db.as_ref())
                .await
                .map_err(|e| AppError::InternalError(e.to_string()))?
        };

        let scenario_count = ScenarioService::find_by_project(state.db.as_ref(), project_id)
            .await?
            .len();

        Ok(extractions
            .into_iter()
            .map(|e| {
                let rate = metrics
                    .iter()
                    .find(|m| m.extraction_id == Some(e.id))
                    .map(|m| m.success_rate)
                    .unwrap_or(0.0);

                ExtractionHistoryItem {
                    id: e.id,
                    created_at: e.created_at,
                    confidence_score: e.confidence_score,
                    rated_output_count: e.rated_output_count,
                    success_rate: rate,
                    scenario_count,
                    success_label: interpret_success_rate(rate).label,
                    confidence_label: interpret_confidence(
                        e.confidence_score,
                        e.rated_output_count.max(0) as u64,
                    )
                    .label,
                }
            })
            .collect())
    }

    /// 인사이트 대시보드 데이터
    pub async fn get_insights(
        state: &AppState,
        project_id: i64,
    ) -> Result<InsightsResponse, AppError> {
        ProjectService::find_project(state.db.as_ref(), project_id).await?;

        let latest_extraction = Self::find_latest(state.db.as_ref(), project_id).await?;
        let latest_metric = metric::Entity::find()
            .filter(metric::Column::ProjectId.eq(project_id))
            .order_by_desc(metric::Column::SnapshotTime)
            .order_by_desc(metric::Column::Id)
            .one(state.db.as_ref())
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;
        let rated_output_count = OutputService::load_rated_outputs(state.db.as_ref(), project_id)
            .await?
            .len();

        let (success_interpretation, confidence_interpretation) = match &latest_extraction {
            Some(e) => {
                let rate = latest_metric.as_ref().map(|m| m.success_rate).unwrap_or(0.0);
                (
                    Some(interpret_success_rate(rate)),
                    Some(interpret_confidence(
                        e.confidence_score,
                        rated_output_count as u64,
                    )),
                )
            }
            None => (None, None),
        };

        Ok(InsightsResponse {
            extraction: latest_extraction.map(Into::into),
            metric: latest_metric.map(MetricResponse::from),
            rated_output_count,
            success_interpretation,
            confidence_interpretation,
        })
    }
}

/// 모델 응답 본문을 JSON으로 해석 (비어 있으면 빈 객체)
fn parse_analysis(content: Option<&str>) -> Result<Value, AppError> {
    let raw = content
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or("{}");
    serde_json::from_str(raw).map_err(|e| AppError::AiResponseInvalid(e.to_string()))
}
