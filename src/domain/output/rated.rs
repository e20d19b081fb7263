//! 평가된 출력물 집계
//!
//! 추출과 내보내기는 출력물마다 가장 최근 평가 하나만 대표값으로 사용합니다.

use std::collections::HashMap;

use super::entity::output;
use crate::domain::rating::entity::rating;
use crate::domain::scenario::entity::scenario;

/// 대표 평가가 붙은 출력물
#[derive(Debug, Clone, PartialEq)]
pub struct RatedOutput {
    pub output_id: i64,
    pub scenario_id: i64,
    pub input: String,
    pub output: String,
    pub rating: rating::Model,
}

impl RatedOutput {
    pub fn stars(&self) -> i32 {
        self.rating.stars
    }
}

/// 가장 최근 평가 (created_at, 동률이면 id가 큰 쪽)
pub fn representative_rating(ratings: &[rating::Model]) -> Option<&rating::Model> {
    ratings.iter().max_by_key(|r| (r.created_at, r.id))
}

/// 시나리오별 최신 출력물 (generated_at, 동률이면 id가 큰 쪽)
pub fn latest_by_scenario(outputs: Vec<output::Model>) -> HashMap<i64, output::Model> {
    let mut latest: HashMap<i64, output::Model> = HashMap::new();
    for candidate in outputs {
        match latest.get(&candidate.scenario_id) {
            Some(current)
                if (current.generated_at, current.id) >= (candidate.generated_at, candidate.id) => {}
            _ => {
                latest.insert(candidate.scenario_id, candidate);
            }
        }
    }
    latest
}

/// 출력물 ID → 평가 목록
pub fn group_ratings(ratings: Vec<rating::Model>) -> HashMap<i64, Vec<rating::Model>> {
    let mut grouped: HashMap<i64, Vec<rating::Model>> = HashMap::new();
    for r in ratings {
        grouped.entry(r.output_id).or_default().push(r);
    }
    grouped
}

/// 평가가 하나 이상 있는 출력물만 대표 평가와 함께 반환
///
/// 결과는 `outputs`의 순서를 유지합니다.
pub fn collect_rated_outputs(
    scenarios: &[scenario::Model],
    outputs: Vec<output::Model>,
    ratings: Vec<rating::Model>,
) -> Vec<RatedOutput> {
    let inputs: HashMap<i64, &str> = scenarios
        .iter()
        .map(|s| (s.id, s.input_text.as_str()))
        .collect();
    let grouped = group_ratings(ratings);

    outputs
        .into_iter()
        .filter_map(|o| {
            let input = inputs.get(&o.scenario_id)?;
            let rating = representative_rating(grouped.get(&o.id)?)?.clone();
            Some(RatedOutput {
                output_id: o.id,
                scenario_id: o.scenario_id,
                input: input.to_string(),
                output: o.output_text,
                rating,
            })
        })
        .collect()
}
