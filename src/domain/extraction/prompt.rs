use serde::Serialize;

use crate::domain::output::rated::RatedOutput;
use crate::utils::error::AppError;

/// 분석 요청에 포함되는 평가된 출력물 한 건
#[derive(Debug, Serialize)]
pub struct AnalysisItem<'a> {
    pub input: &'a str,
    pub output: &'a str,
    pub stars: i32,
    pub feedback: Option<&'a str>,
    pub tags: Option<&'a [String]>,
}

impl<'a> From<&'a RatedOutput> for AnalysisItem<'a> {
    fn from(rated: &'a RatedOutput) -> Self {
        Self {
            input: &rated.input,
            output: &rated.output,
            stars: rated.rating.stars,
            feedback: rated.rating.feedback_text.as_deref(),
            tags: rated.rating.tags.as_ref().map(|tags| tags.0.as_slice()),
        }
    }
}

/// 패턴 추출 프롬프트 템플릿
pub struct ExtractionPrompt;

impl ExtractionPrompt {
    /// 품질 패턴 분석가 시스템 프롬프트
    pub fn system_prompt() -> &'static str {
        r#"You are an expert at analyzing AI output quality patterns. You will be given a set of AI outputs with star ratings (1-5), feedback, and tags from a product manager.

Your task is to identify patterns that distinguish good outputs (4-5 stars) from poor outputs (1-3 stars). Focus on:
1. Length patterns (word count, detail level)
2. Tone patterns (formal/casual, empathetic/clinical)
3. Structure patterns (format, organization, use of lists/paragraphs)
4. Content patterns (specificity, examples, actionability)

Provide actionable criteria that can be used to evaluate future outputs.

Return your analysis as a JSON object with this structure:
{
  "summary": "Brief overview of quality patterns identified",
  "criteria": [
    {
      "dimension": "Length/Tone/Structure/Content",
      "pattern": "Description of the pattern",
      "good_example": "Characteristic of high-rated outputs",
      "bad_example": "Characteristic of low-rated outputs",
      "importance": "high/medium/low"
    }
  ],
  "key_insights": [
    "Specific insight about what makes outputs good/bad"
  ],
  "recommendations": [
    "Actionable recommendation for improving outputs"
  ]
}"#
    }

    /// 사용자 프롬프트 생성
    pub fn user_prompt(rated_outputs: &[RatedOutput]) -> Result<String, AppError> {
        let items: Vec<AnalysisItem<'_>> = rated_outputs.iter().map(AnalysisItem::from).collect();
        let payload = serde_json::to_string_pretty(&items)
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        Ok(format!(
            "Analyze these {} rated outputs:\n\n{}",
            rated_outputs.len(),
            payload
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rating::entity::rating::{self, RatingTags};
    use crate::test_support::timestamp;

    fn rated(stars: i32, feedback: Option<&str>, tags: Option<Vec<&str>>) -> RatedOutput {
        RatedOutput {
            output_id: 1,
            scenario_id: 1,
            input: "Where is my package?".to_string(),
            output: "It ships tomorrow.".to_string(),
            rating: rating::Model {
                id: 1,
                output_id: 1,
                stars,
                feedback_text: feedback.map(str::to_string),
                tags: tags.map(|t| RatingTags(t.into_iter().map(str::to_string).collect())),
                created_at: timestamp(0),
            },
        }
    }

    #[test]
    fn system_prompt_should_describe_json_schema() {
        // Act
        let prompt = ExtractionPrompt::system_prompt();

        // Assert
        assert!(prompt.contains("\"criteria\""));
        assert!(prompt.contains("\"key_insights\""));
        assert!(prompt.contains("\"recommendations\""));
        assert!(prompt.contains("Length patterns"));
    }

    #[test]
    fn user_prompt_should_embed_count_and_pretty_json() {
        // Arrange
        let outputs = vec![
            rated(5, Some("Clear and short"), Some(vec!["concise"])),
            rated(1, None, None),
        ];

        // Act
        let prompt = ExtractionPrompt::user_prompt(&outputs).unwrap();

        // Assert
        assert!(prompt.starts_with("Analyze these 2 rated outputs:\n\n[\n  {\n"));
        assert!(prompt.contains("\"input\": \"Where is my package?\""));
        assert!(prompt.contains("\"feedback\": \"Clear and short\""));
        assert!(prompt.contains("\"feedback\": null"));
        assert!(prompt.contains("\"tags\": null"));
    }

    #[test]
    fn analysis_item_should_keep_field_order() {
        let output = rated(4, Some("ok"), Some(vec!["a", "b"]));

        let json = serde_json::to_string(&AnalysisItem::from(&output)).unwrap();

        assert_eq!(
            json,
            r#"{"input":"Where is my package?","output":"It ships tomorrow.","stars":4,"feedback":"ok","tags":["a","b"]}"#
        );
    }
}
