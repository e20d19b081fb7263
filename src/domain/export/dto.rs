use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// 내보내기 형식
///
/// `markdown`이 아닌 값은 모두 JSON으로 취급합니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum ExportFormat {
    /// 테스트 스위트 JSON
    #[default]
    Json,
    /// 품질 명세 Markdown
    Markdown,
}

impl From<String> for ExportFormat {
    fn from(value: String) -> Self {
        match value.as_str() {
            "markdown" => ExportFormat::Markdown,
            _ => ExportFormat::Json,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ExportQuery {
    /// json (기본값) 또는 markdown
    #[serde(default)]
    #[param(inline)]
    pub format: ExportFormat,
}

/// 첨부 파일로 내려줄 문서
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDocument {
    pub content_type: &'static str,
    pub file_name: String,
    pub body: String,
}

impl ExportDocument {
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.file_name)
    }
}
