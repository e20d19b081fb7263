//! 저장된 추출 결과(JSON)를 읽기 위한 뷰
//!
//! 모델 응답은 검증 없이 저장되므로 필드가 없거나 타입이 달라도 읽을 수 있어야 합니다.

use serde_json::Value;

/// 품질 기준 한 건
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criterion {
    pub dimension: Option<String>,
    pub pattern: Option<String>,
    pub good_example: Option<String>,
    pub bad_example: Option<String>,
    pub importance: Option<String>,
}

impl Criterion {
    pub fn is_high_importance(&self) -> bool {
        self.importance.as_deref() == Some("high")
    }
}

/// 추출 결과 전체
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analysis {
    pub summary: Option<String>,
    pub criteria: Vec<Criterion>,
    pub recommendations: Vec<String>,
}

impl Analysis {
    pub fn from_value(value: &Value) -> Self {
        Self {
            summary: text(value, "summary").filter(|s| !s.is_empty()),
            criteria: items(value, "criteria")
                .iter()
                .map(|c| Criterion {
                    dimension: text(c, "dimension"),
                    pattern: text(c, "pattern"),
                    good_example: text(c, "good_example"),
                    bad_example: text(c, "bad_example"),
                    importance: text(c, "importance"),
                })
                .collect(),
            recommendations: strings(value, "recommendations"),
        }
    }

    /// 기준에 등장하는 dimension 목록 (순서 유지)
    pub fn dimensions(&self) -> Vec<String> {
        self.criteria
            .iter()
            .filter_map(|c| c.dimension.clone())
            .collect()
    }
}

fn items<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// 문자열이 아닌 스칼라 값은 JSON 표기 그대로 문자열화
fn text(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn strings(value: &Value, key: &str) -> Vec<String> {
    items(value, key)
        .iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_read_full_analysis() {
        // Arrange
        let value = json!({
            "summary": "Short answers win",
            "criteria": [{
                "dimension": "Length",
                "pattern": "Under 80 words",
                "good_example": "Two sentences",
                "bad_example": "Five paragraphs",
                "importance": "high"
            }],
            "key_insights": ["Brevity matters"],
            "recommendations": ["Cap responses at 80 words"]
        });

        // Act
        let analysis = Analysis::from_value(&value);

        // Assert
        assert_eq!(analysis.summary.as_deref(), Some("Short answers win"));
        assert_eq!(analysis.criteria.len(), 1);
        assert!(analysis.criteria[0].is_high_importance());
        assert_eq!(analysis.dimensions(), vec!["Length".to_string()]);
        assert_eq!(analysis.recommendations, vec!["Cap responses at 80 words"]);
    }

    #[test]
    fn should_tolerate_missing_and_mistyped_fields() {
        let value = json!({
            "criteria": [{"dimension": "Tone", "importance": 3}, {"pattern": "x"}],
            "recommendations": "not a list"
        });

        let analysis = Analysis::from_value(&value);

        assert_eq!(analysis.summary, None);
        assert_eq!(analysis.criteria[0].importance.as_deref(), Some("3"));
        assert_eq!(analysis.dimensions(), vec!["Tone".to_string()]);
        assert!(analysis.recommendations.is_empty());
    }

    #[test]
    fn should_read_empty_object() {
        assert_eq!(Analysis::from_value(&json!({})), Analysis::default());
    }
}
