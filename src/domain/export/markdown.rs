//! 품질 명세 Markdown 렌더링

use chrono::{DateTime, Utc};

use super::selection::ExampleSet;
use crate::domain::extraction::analysis::Analysis;
use crate::domain::project::entity::project;

const GOLDEN_SHOWN: usize = 5;
const NEGATIVE_SHOWN: usize = 3;
const FOOTER: &str = "*Generated by Tellah - Behavioral design tool for AI products*";

/// 품질 명세 문서 생성
///
/// 줄 단위로 조립한 뒤 `\n`으로 이어 붙입니다 (마지막 줄바꿈 없음).
pub fn render_markdown(
    project: &project::Model,
    analysis: &Analysis,
    examples: &ExampleSet,
    exported_at: DateTime<Utc>,
) -> String {
    let config = &project.model_config;
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("# {} - Quality Specification", project.name));
    lines.push(String::new());
    lines.push(format!("**Exported**: {}", exported_at.format("%B %-d, %Y")));
    lines.push(String::new());

    if let Some(description) = project.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push("## Overview".to_string());
        lines.push(String::new());
        lines.push(description.to_string());
        lines.push(String::new());
    }

    lines.push("## Model Configuration".to_string());
    lines.push(String::new());
    lines.push(format!("- **Model**: {}", config.model));
    lines.push(format!(
        "- **Temperature**: {}",
        config
            .temperature
            .map(|t| t.to_string())
            .unwrap_or_else(|| "not set".to_string())
    ));
    lines.push(String::new());
    if let Some(system_prompt) = config.system_prompt.as_deref().filter(|p| !p.is_empty()) {
        lines.push("### System Prompt".to_string());
        lines.push(String::new());
        lines.push("```".to_string());
        lines.push(system_prompt.to_string());
        lines.push("```".to_string());
        lines.push(String::new());
    }

    if let Some(summary) = &analysis.summary {
        lines.push("## Quality Summary".to_string());
        lines.push(String::new());
        lines.push(summary.clone());
        lines.push(String::new());
    }

    if !analysis.criteria.is_empty() {
        lines.push("## Quality Criteria".to_string());
        lines.push(String::new());
        for (index, criterion) in analysis.criteria.iter().enumerate() {
            let star = if criterion.is_high_importance() { "⭐" } else { "" };
            lines.push(format!(
                "### {}. {} {}",
                index + 1,
                criterion.dimension.as_deref().unwrap_or_default(),
                star
            ));
            lines.push(String::new());
            lines.push(format!(
                "**Pattern**: {}",
                criterion.pattern.as_deref().unwrap_or_default()
            ));
            lines.push(String::new());
            lines.push("**Good Outputs**:".to_string());
            lines.push(format!(
                "- {}",
                criterion.good_example.as_deref().unwrap_or_default()
            ));
            lines.push(String::new());
            lines.push("**Poor Outputs**:".to_string());
            lines.push(format!(
                "- {}",
                criterion.bad_example.as_deref().unwrap_or_default()
            ));
            lines.push(String::new());
        }
    }

    if !examples.golden.is_empty() {
        lines.push("## Golden Examples".to_string());
        lines.push(String::new());
        lines.push(
            "These are high-quality outputs (4-5 stars) that exemplify the desired behavior:"
                .to_string(),
        );
        lines.push(String::new());

        for (index, example) in examples.golden.iter().take(GOLDEN_SHOWN).enumerate() {
            lines.push(format!("### Example {} - {} ⭐", index + 1, example.stars()));
            lines.push(String::new());
            push_quoted_input(&mut lines, &example.input);
            lines.push("**Output**:".to_string());
            push_fenced(&mut lines, &example.output);
            if let Some(feedback) = example.rating.feedback_text.as_deref() {
                lines.push(format!("**Why This Works**: {feedback}"));
                lines.push(String::new());
            }
            if let Some(tags) = example.rating.tags.as_ref().filter(|t| !t.0.is_empty()) {
                lines.push(format!("**Tags**: {}", tags.0.join(", ")));
                lines.push(String::new());
            }
        }
    }

    if !examples.negative.is_empty() {
        lines.push("## What to Avoid".to_string());
        lines.push(String::new());
        lines.push(
            "These are low-quality outputs (1-2 stars) that demonstrate undesired behavior:"
                .to_string(),
        );
        lines.push(String::new());

        for (index, example) in examples.negative.iter().take(NEGATIVE_SHOWN).enumerate() {
            lines.push(format!("### Anti-Pattern {}", index + 1));
            lines.push(String::new());
            push_quoted_input(&mut lines, &example.input);
            lines.push("**Poor Output**:".to_string());
            push_fenced(&mut lines, &example.output);
            if let Some(feedback) = example.rating.feedback_text.as_deref() {
                lines.push(format!("**Why This Failed**: {feedback}"));
                lines.push(String::new());
            }
        }
    }

    if !analysis.recommendations.is_empty() {
        lines.push("## Implementation Recommendations".to_string());
        lines.push(String::new());
        for (index, recommendation) in analysis.recommendations.iter().enumerate() {
            lines.push(format!("{}. {}", index + 1, recommendation));
        }
        lines.push(String::new());
    }

    lines.push("---".to_string());
    lines.push(String::new());
    lines.push(FOOTER.to_string());

    lines.join("\n")
}

fn push_quoted_input(lines: &mut Vec<String>, input: &str) {
    lines.push("**Input**:".to_string());
    lines.push(format!("> {input}"));
    lines.push(String::new());
}

fn push_fenced(lines: &mut Vec<String>, body: &str) {
    lines.push("```".to_string());
    lines.push(body.to_string());
    lines.push("```".to_string());
    lines.push(String::new());
}
