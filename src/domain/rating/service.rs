use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use super::dto::{CreateRatingRequest, RatingResponse};
use super::entity::rating::{self, RatingTags};
use crate::domain::output::service::OutputService;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::text::non_empty;

pub struct RatingService;

impl RatingService {
    /// 출력물의 평가 목록 (최신순)
    pub async fn find_by_output<C: ConnectionTrait>(
        db: &C,
        output_id: i64,
    ) -> Result<Vec<rating::Model>, AppError> {
        rating::Entity::find()
            .filter(rating::Column::OutputId.eq(output_id))
            .order_by_desc(rating::Column::CreatedAt)
            .order_by_desc(rating::Column::Id)
            .all(db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))
    }

    /// 평가 등록
    pub async fn create_rating(
        state: &AppState,
        output_id: i64,
        req: CreateRatingRequest,
    ) -> Result<RatingResponse, AppError> {
        OutputService::find_output(state.db.as_ref(), output_id).await?;

        let rating_model = rating::ActiveModel {
            output_id: Set(output_id),
            stars: Set(req.stars),
            feedback_text: Set(non_empty(req.feedback_text)),
            tags: Set(req.tags.map(RatingTags)),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        let created = rating_model
            .insert(state.db.as_ref())
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        info!(
            output_id = output_id,
            rating_id = created.id,
            stars = created.stars,
            "Rating created"
        );

        Ok(created.into())
    }

    /// 평가 목록
    pub async fn list_ratings(
        state: &AppState,
        output_id: i64,
    ) -> Result<Vec<RatingResponse>, AppError> {
        let ratings = Self::find_by_output(state.db.as_ref(), output_id).await?;
        Ok(ratings.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::output::entity::output::{self, ModelSnapshot};
    use crate::test_support::{state_with_db, timestamp};
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn output_model() -> output::Model {
        output::Model {
            id: 10,
            scenario_id: 1,
            output_text: "Please restart the router.".to_string(),
            model_snapshot: ModelSnapshot {
                model: "gpt-4".to_string(),
                temperature: 0.7,
                ..Default::default()
            },
            generated_at: timestamp(0),
        }
    }

    fn rating_model(id: i64, stars: i32) -> rating::Model {
        rating::Model {
            id,
            output_id: 10,
            stars,
            feedback_text: None,
            tags: Some(RatingTags(vec!["concise".to_string()])),
            created_at: timestamp(id),
        }
    }

    #[tokio::test]
    async fn should_create_rating_for_existing_output() {
        // Arrange
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![output_model()]])
            .append_query_results([vec![rating_model(1, 5)]])
            .into_connection();
        let state = state_with_db(db);
        let req = CreateRatingRequest {
            stars: 5,
            feedback_text: Some("   ".to_string()),
            tags: Some(vec!["concise".to_string()]),
        };

        // Act
        let result = RatingService::create_rating(&state, 10, req).await.unwrap();

        // Assert
        assert_eq!(result.id, 1);
        assert_eq!(result.stars, 5);
        assert_eq!(result.feedback_text, None);
        assert_eq!(result.tags, Some(vec!["concise".to_string()]));
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_output() {
        // Arrange
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<output::Model>::new()])
            .into_connection();
        let state = state_with_db(db);
        let req = CreateRatingRequest {
            stars: 3,
            feedback_text: None,
            tags: None,
        };

        // Act
        let result = RatingService::create_rating(&state, 404, req).await;

        // Assert
        assert!(matches!(result, Err(AppError::OutputNotFound(_))));
    }

    #[tokio::test]
    async fn should_list_ratings_in_query_order() {
        // Arrange
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![rating_model(2, 4), rating_model(1, 2)]])
            .into_connection();
        let state = state_with_db(db);

        // Act
        let result = RatingService::list_ratings(&state, 10).await.unwrap();

        // Assert
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id, 2);
    }
}
