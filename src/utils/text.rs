//! 문자열 정규화 헬퍼

/// 공백뿐인 문자열은 None으로 취급
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// 파일명에 안전한 문자열로 변환 (영문자와 숫자 외에는 `_`)
pub fn safe_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// 앞에서부터 최대 `max_chars`글자만 남김
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_should_drop_blank_values() {
        assert_eq!(non_empty(Some("  ".to_string())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("ok".to_string())), Some("ok".to_string()));
    }

    #[test]
    fn safe_file_name_should_replace_non_alphanumerics() {
        assert_eq!(safe_file_name("Support Bot v2.0!"), "Support_Bot_v2_0_");
    }

    #[test]
    fn truncate_chars_should_respect_multibyte_characters() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo");
        assert_eq!(truncate_chars("short", 50), "short");
    }
}
