//! 추출 지표 계산과 해석
//!
//! 모두 순수 함수이며 서비스 계층에서 조합합니다.

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::domain::output::rated::RatedOutput;

/// 신뢰도가 최대치에 도달하는 평가 수
const CONFIDENCE_SATURATION: f64 = 20.0;
const MAX_CONFIDENCE: f64 = 0.9;
/// 성공으로 간주하는 최소 별점
pub const SUCCESS_STARS: i32 = 4;

/// 분석 구간 `(since, until]`에 평가된 출력물만 남김
///
/// `since`가 없으면 `until` 이전 전체가 분석 대상입니다.
/// `until` 이후의 평가는 다음 실행에서 분석합니다.
pub fn select_window(
    rated: Vec<RatedOutput>,
    since: Option<NaiveDateTime>,
    until: NaiveDateTime,
) -> Vec<RatedOutput> {
    rated
        .into_iter()
        .filter(|r| r.rating.created_at <= until)
        .filter(|r| since.map_or(true, |since| r.rating.created_at > since))
        .collect()
}

/// min(0.9, n / 20)
pub fn confidence_score(analyzed: usize) -> f64 {
    (analyzed as f64 / CONFIDENCE_SATURATION).min(MAX_CONFIDENCE)
}

/// 별점 4 이상 비율 (대상이 없으면 0)
pub fn success_rate(rated: &[RatedOutput]) -> f64 {
    if rated.is_empty() {
        return 0.0;
    }
    let successful = rated.iter().filter(|r| r.stars() >= SUCCESS_STARS).count();
    successful as f64 / rated.len() as f64
}

/// 모델이 반환한 criteria 배열에서 dimension → importance 맵 생성
///
/// 같은 dimension이 여러 번 나오면 마지막 값이 남습니다.
pub fn criteria_breakdown(analysis: &Value) -> Value {
    let mut breakdown = Map::new();
    let criteria = analysis
        .get("criteria")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for criterion in criteria {
        let Some(dimension) = criterion.get("dimension").and_then(Value::as_str) else {
            continue;
        };
        match criterion.get("importance").filter(|v| !v.is_null()) {
            Some(importance) => {
                breakdown.insert(dimension.to_string(), importance.clone());
            }
            None => {
                breakdown.remove(dimension);
            }
        }
    }

    Value::Object(breakdown)
}

/// 배지 스타일
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Default,
    Secondary,
    Outline,
    Destructive,
}

/// 지표 해석 결과
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Interpretation {
    pub label: String,
    pub variant: Variant,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actionable: Option<String>,
}

impl Interpretation {
    fn new(label: &str, variant: Variant, message: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            variant,
            message: message.into(),
            actionable: None,
        }
    }

    fn with_actionable(mut self, actionable: &str) -> Self {
        self.actionable = Some(actionable.to_string());
        self
    }
}

pub fn interpret_success_rate(success_rate: f64) -> Interpretation {
    if success_rate >= 0.8 {
        Interpretation::new("Excellent", Variant::Default, "Your AI is performing well!")
    } else if success_rate >= 0.6 {
        Interpretation::new(
            "Good",
            Variant::Secondary,
            "Good performance with room for improvement.",
        )
        .with_actionable("Review the quality criteria below to identify areas for refinement.")
    } else if success_rate >= 0.4 {
        Interpretation::new(
            "Needs Attention",
            Variant::Outline,
            "Success rate is below target.",
        )
        .with_actionable(
            "Consider refining your system prompt based on the criteria and recommendations below.",
        )
    } else {
        Interpretation::new(
            "Critical",
            Variant::Destructive,
            "Low success rate indicates significant quality issues.",
        )
        .with_actionable(
            "Review your system prompt, model choice, and temperature settings. Use the recommendations below as a guide.",
        )
    }
}

pub fn interpret_confidence(confidence_score: f64, rated_count: u64) -> Interpretation {
    if confidence_score >= 0.8 {
        Interpretation::new(
            "High Confidence",
            Variant::Default,
            format!("Based on {rated_count} ratings, these patterns are reliable."),
        )
    } else if confidence_score >= 0.5 {
        Interpretation::new(
            "Moderate Confidence",
            Variant::Secondary,
            format!("Based on {rated_count} ratings."),
        )
        .with_actionable("Add 5-10 more ratings to increase pattern confidence.")
    } else {
        Interpretation::new(
            "Low Confidence",
            Variant::Outline,
            format!("Only {rated_count} ratings analyzed."),
        )
        .with_actionable("Rate at least 10 outputs for reliable pattern extraction.")
    }
}
