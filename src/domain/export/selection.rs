//! 내보내기용 예시 선별

use crate::domain::output::rated::RatedOutput;

const GOLDEN_MIN_STARS: i32 = 4;
const NEGATIVE_MAX_STARS: i32 = 2;
const GOLDEN_LIMIT: usize = 10;
const NEGATIVE_LIMIT: usize = 5;

/// 좋은 예시와 나쁜 예시
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExampleSet {
    /// 별점 4 이상, 별점 내림차순 상위 10개
    pub golden: Vec<RatedOutput>,
    /// 별점 2 이하, 별점 오름차순 상위 5개
    pub negative: Vec<RatedOutput>,
}

/// 대표 평가의 별점으로 예시를 고름
///
/// 같은 별점끼리는 입력 순서를 유지합니다 (stable sort).
pub fn select_examples(rated: &[RatedOutput]) -> ExampleSet {
    let mut golden: Vec<RatedOutput> = rated
        .iter()
        .filter(|r| r.stars() >= GOLDEN_MIN_STARS)
        .cloned()
        .collect();
    golden.sort_by(|a, b| b.stars().cmp(&a.stars()));
    golden.truncate(GOLDEN_LIMIT);

    let mut negative: Vec<RatedOutput> = rated
        .iter()
        .filter(|r| r.stars() <= NEGATIVE_MAX_STARS)
        .cloned()
        .collect();
    negative.sort_by_key(RatedOutput::stars);
    negative.truncate(NEGATIVE_LIMIT);

    ExampleSet { golden, negative }
}
