//! 成绩计算
//!
//! 平时成绩（作业 + 小测 + 期中，满分 60）折算为 20 分，加上期末（满分 80）得到百分制总分，
//! 再按固定分段映射为绩点。

use crate::models::marks::entities::MarkScores;

/// 绩点分段（总分下限, 绩点），从高到低匹配
const GPA_BREAKPOINTS: [(f64, f64); 9] = [
    (80.0, 4.00),
    (75.0, 3.75),
    (70.0, 3.50),
    (65.0, 3.25),
    (60.0, 3.00),
    (55.0, 2.75),
    (50.0, 2.50),
    (45.0, 2.25),
    (40.0, 2.00),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeOutcome {
    pub total: f64,
    pub gpa: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn gpa_for_total(total: f64) -> f64 {
    GPA_BREAKPOINTS
        .iter()
        .find(|(min, _)| total >= *min)
        .map(|(_, gpa)| *gpa)
        .unwrap_or(0.0)
}

/// 缺省分数按 0 计算；不做范围裁剪
pub fn compute(scores: MarkScores) -> GradeOutcome {
    let incourse_raw = scores.assignment.unwrap_or(0.0)
        + scores.class_test.unwrap_or(0.0)
        + scores.midterm.unwrap_or(0.0);
    let incourse_scaled = incourse_raw * 20.0 / 60.0;
    let total = round2(incourse_scaled + scores.final_exam.unwrap_or(0.0));

    GradeOutcome {
        total,
        gpa: gpa_for_total(total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(a: f64, c: f64, m: f64, f: f64) -> MarkScores {
        MarkScores {
            assignment: Some(a),
            class_test: Some(c),
            midterm: Some(m),
            final_exam: Some(f),
        }
    }

    #[test]
    fn test_breakpoints_are_inclusive() {
        assert_eq!(compute(scores(0.0, 0.0, 0.0, 80.0)), GradeOutcome { total: 80.0, gpa: 4.0 });
        assert_eq!(compute(scores(0.0, 0.0, 0.0, 79.99)).gpa, 3.75);
        assert_eq!(compute(scores(0.0, 0.0, 0.0, 40.0)).gpa, 2.0);
        assert_eq!(compute(scores(0.0, 0.0, 0.0, 39.99)).gpa, 0.0);
    }

    #[test]
    fn test_every_breakpoint() {
        let expected = [
            (80.0, 4.0),
            (75.0, 3.75),
            (70.0, 3.5),
            (65.0, 3.25),
            (60.0, 3.0),
            (55.0, 2.75),
            (50.0, 2.5),
            (45.0, 2.25),
            (40.0, 2.0),
            (0.0, 0.0),
        ];
        for (total, gpa) in expected {
            assert_eq!(gpa_for_total(total), gpa, "total {total}");
        }
        assert_eq!(gpa_for_total(100.0), 4.0);
    }

    #[test]
    fn test_incourse_is_scaled_to_twenty() {
        let outcome = compute(scores(20.0, 20.0, 20.0, 80.0));
        assert_eq!(outcome.total, 100.0);
        assert_eq!(outcome.gpa, 4.0);

        // 10 + 5 + 15 = 30 -> 10
        let outcome = compute(scores(10.0, 5.0, 15.0, 50.0));
        assert_eq!(outcome.total, 60.0);
        assert_eq!(outcome.gpa, 3.0);
    }

    #[test]
    fn test_missing_scores_count_as_zero() {
        let outcome = compute(MarkScores {
            final_exam: Some(45.0),
            ..Default::default()
        });
        assert_eq!(outcome.total, 45.0);
        assert_eq!(outcome.gpa, 2.25);
        assert_eq!(compute(MarkScores::default()), GradeOutcome { total: 0.0, gpa: 0.0 });
    }

    #[test]
    fn test_total_rounded_to_two_decimals() {
        // 7 * 20 / 60 = 2.3333...
        let outcome = compute(scores(7.0, 0.0, 0.0, 0.0));
        assert_eq!(outcome.total, 2.33);
    }

    #[test]
    fn test_monotonic_in_each_input() {
        let steps = [0.0, 5.0, 12.5, 20.0];
        for &a in &steps {
            for &f in &[0.0, 39.0, 40.0, 79.99, 80.0] {
                let base = compute(scores(a, 10.0, 10.0, f));
                let more_a = compute(scores(a + 1.0, 10.0, 10.0, f));
                let more_f = compute(scores(a, 10.0, 10.0, f + 0.5));
                assert!(more_a.total >= base.total);
                assert!(more_f.total >= base.total);
                assert!(more_a.gpa >= base.gpa);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let s = scores(12.0, 8.0, 17.5, 61.25);
        assert_eq!(compute(s), compute(s));
    }
}
