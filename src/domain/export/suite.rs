//! 테스트 스위트 JSON
//!
//! 파일 형식이므로 키는 snake_case를 그대로 사용합니다.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use super::selection::ExampleSet;
use crate::domain::extraction::analysis::Analysis;
use crate::domain::project::entity::project;
use crate::utils::text::truncate_chars;

const TEST_NAME_INPUT_CHARS: usize = 50;
const MIN_QUALITY_SCORE: i32 = 4;

#[derive(Debug, Serialize)]
pub struct TestSuite {
    pub project: SuiteProject,
    pub model_config: SuiteModelConfig,
    pub quality_criteria: Vec<QualityCriterion>,
    pub golden_examples: Vec<GoldenExample>,
    pub negative_examples: Vec<NegativeExample>,
    pub test_cases: Vec<TestCase>,
}

#[derive(Debug, Serialize)]
pub struct SuiteProject {
    pub name: String,
    pub description: Option<String>,
    pub exported_at: String,
}

#[derive(Debug, Serialize)]
pub struct SuiteModelConfig {
    pub model: String,
    pub temperature: Option<f64>,
    pub system_prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QualityCriterion {
    pub dimension: Option<String>,
    pub pattern: Option<String>,
    pub importance: Option<String>,
    pub good_characteristics: Option<String>,
    pub bad_characteristics: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GoldenExample {
    pub input: String,
    pub output: String,
    pub rating: i32,
    pub feedback: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct NegativeExample {
    pub input: String,
    pub output: String,
    pub rating: i32,
    pub why_failed: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TestCase {
    pub name: String,
    pub input: String,
    pub expected_criteria: Vec<String>,
    pub min_quality_score: i32,
}

pub fn build_test_suite(
    project: &project::Model,
    analysis: &Analysis,
    examples: &ExampleSet,
    exported_at: DateTime<Utc>,
) -> TestSuite {
    let config = &project.model_config;
    let dimensions = analysis.dimensions();

    TestSuite {
        project: SuiteProject {
            name: project.name.clone(),
            description: project.description.clone(),
            exported_at: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        },
        model_config: SuiteModelConfig {
            model: config.model.clone(),
            temperature: config.temperature,
            system_prompt: config.system_prompt.clone(),
        },
        quality_criteria: analysis
            .criteria
            .iter()
            .map(|c| QualityCriterion {
                dimension: c.dimension.clone(),
                pattern: c.pattern.clone(),
                importance: c.importance.clone(),
                good_characteristics: c.good_example.clone(),
                bad_characteristics: c.bad_example.clone(),
            })
            .collect(),
        golden_examples: examples
            .golden
            .iter()
            .map(|e| GoldenExample {
                input: e.input.clone(),
                output: e.output.clone(),
                rating: e.stars(),
                feedback: e.rating.feedback_text.clone(),
                tags: e.rating.tags.clone().map(|tags| tags.0),
            })
            .collect(),
        negative_examples: examples
            .negative
            .iter()
            .map(|e| NegativeExample {
                input: e.input.clone(),
                output: e.output.clone(),
                rating: e.stars(),
                why_failed: e.rating.feedback_text.clone(),
            })
            .collect(),
        test_cases: examples
            .golden
            .iter()
            .map(|e| TestCase {
                name: format!(
                    "Test: {}...",
                    truncate_chars(&e.input, TEST_NAME_INPUT_CHARS)
                ),
                input: e.input.clone(),
                expected_criteria: dimensions.clone(),
                min_quality_score: MIN_QUALITY_SCORE,
            })
            .collect(),
    }
}
