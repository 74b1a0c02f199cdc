//! 成绩更新状态机
//!
//! 纯函数：给定操作者角色、当前成绩与更新请求，计算更新后的成绩或拒绝原因。
//! 资源归属（教师是否讲授该课程、学生是否本人）由调用方在此之前校验。
//!
//! 状态流转：
//! - 学生：PUBLISHED -> CHALLENGED（请求中只能出现 result_status）
//! - 管理员：CHALLENGED 状态下修改缴费状态
//! - 管理员 / 任课教师：修改分数；CHALLENGED 且未缴费时锁定，已缴费则修改后进入 RESOLVED
//! - 管理员 / 任课教师：在 UNPUBLISHED / PUBLISHED / RESOLVED 之间切换到 UNPUBLISHED / PUBLISHED

use chrono::{DateTime, Utc};

use super::grading;
use crate::errors::{RecordsError, Result};
use crate::models::marks::{
    entities::{Mark, ResultStatus},
    requests::UpdateMarkRequest,
};
use crate::models::users::entities::UserRole;
use crate::utils::validate::validate_scores;

pub const MSG_CHALLENGE_ONLY_WHEN_PUBLISHED: &str =
    "You can only challenge a result once when it is published!";
pub const MSG_STUDENT_STATUS_ONLY: &str =
    "Students can only challenge a published result and cannot change any other field.";
pub const MSG_LOCKED_WHILE_UNPAID: &str =
    "Cannot update marks while result is challenged and payment is pending.";
pub const MSG_PAYMENT_ADMIN_ONLY: &str =
    "Only admins can update the challenge payment status.";
pub const MSG_PAYMENT_REQUIRES_CHALLENGE: &str =
    "Payment status can only be updated while the result is challenged.";
pub const MSG_ONLY_STUDENTS_CHALLENGE: &str = "Only students can challenge a result.";
pub const MSG_CHALLENGED_NEEDS_REGRADE: &str =
    "A challenged result can only leave that state by updating its marks.";
pub const MSG_RESOLVED_NEEDS_REGRADE: &str =
    "A result becomes resolved only by re-grading a challenged mark.";

/// 计算更新后的成绩
pub fn plan_update(
    role: UserRole,
    current: &Mark,
    update: &UpdateMarkRequest,
    now: DateTime<Utc>,
) -> Result<Mark> {
    if update.is_empty() {
        return Err(RecordsError::validation("No fields to update"));
    }

    let mut next = current.clone();
    match role {
        UserRole::Student => apply_student_challenge(&mut next, update, now)?,
        UserRole::SuperAdmin | UserRole::Admin | UserRole::Teacher => {
            apply_staff_update(role, &mut next, update)?
        }
    }
    next.updated_at = now;
    Ok(next)
}

fn apply_student_challenge(
    mark: &mut Mark,
    update: &UpdateMarkRequest,
    now: DateTime<Utc>,
) -> Result<()> {
    if !update.is_status_only() || update.result_status != Some(ResultStatus::Challenged) {
        return Err(RecordsError::forbidden(MSG_STUDENT_STATUS_ONLY));
    }

    if mark.result_status != ResultStatus::Published {
        return Err(RecordsError::conflict(MSG_CHALLENGE_ONLY_WHEN_PUBLISHED));
    }

    mark.result_status = ResultStatus::Challenged;
    mark.result_challenge_payment_status = Some(false);
    mark.challenged_at = Some(now);
    Ok(())
}

fn apply_staff_update(role: UserRole, mark: &mut Mark, update: &UpdateMarkRequest) -> Result<()> {
    // 1. 缴费状态
    if let Some(paid) = update.result_challenge_payment_status {
        if !role.is_admin() {
            return Err(RecordsError::forbidden(MSG_PAYMENT_ADMIN_ONLY));
        }
        if mark.result_status != ResultStatus::Challenged {
            return Err(RecordsError::conflict(MSG_PAYMENT_REQUIRES_CHALLENGE));
        }
        mark.result_challenge_payment_status = Some(paid);
    }

    // 2. 分数
    if update.has_score_changes() {
        if mark.result_status == ResultStatus::Challenged
            && mark.result_challenge_payment_status != Some(true)
        {
            return Err(RecordsError::conflict(MSG_LOCKED_WHILE_UNPAID));
        }

        let scores = update.merged_scores(mark.scores());
        validate_scores(&scores)?;

        let outcome = grading::compute(scores);
        mark.assignment_mark = scores.assignment;
        mark.class_test_mark = scores.class_test;
        mark.midterm_mark = scores.midterm;
        mark.final_exam_mark = scores.final_exam;
        mark.total_mark = outcome.total;
        mark.gpa = outcome.gpa;

        if mark.result_status == ResultStatus::Challenged {
            mark.result_status = ResultStatus::Resolved;
        }
    }

    // 3. 发布状态
    if let Some(status) = update.result_status {
        apply_staff_status(mark, status)?;
    }

    Ok(())
}

fn apply_staff_status(mark: &mut Mark, status: ResultStatus) -> Result<()> {
    if status == ResultStatus::Challenged {
        return Err(RecordsError::forbidden(MSG_ONLY_STUDENTS_CHALLENGE));
    }
    if mark.result_status == ResultStatus::Challenged {
        return Err(RecordsError::conflict(MSG_CHALLENGED_NEEDS_REGRADE));
    }
    if status == ResultStatus::Resolved {
        if mark.result_status != ResultStatus::Resolved {
            return Err(RecordsError::conflict(MSG_RESOLVED_NEEDS_REGRADE));
        }
        return Ok(());
    }

    // 离开 RESOLVED 后清除缴费状态，challenged_at 保留
    if mark.result_status == ResultStatus::Resolved {
        mark.result_challenge_payment_status = None;
    }
    mark.result_status = status;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn now() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_750_000_000, 0).unwrap()
    }

    fn mark(status: ResultStatus, paid: Option<bool>) -> Mark {
        let created = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        Mark {
            id: 1,
            student_id: 1,
            subject_id: 1,
            semester_id: 1,
            assignment_mark: Some(10.0),
            class_test_mark: Some(10.0),
            midterm_mark: Some(10.0),
            final_exam_mark: Some(40.0),
            total_mark: 50.0,
            gpa: 2.5,
            result_status: status,
            result_challenge_payment_status: paid,
            challenged_at: None,
            created_at: created,
            updated_at: created,
        }
    }

    fn challenge() -> UpdateMarkRequest {
        UpdateMarkRequest {
            result_status: Some(ResultStatus::Challenged),
            ..Default::default()
        }
    }

    fn regrade(final_exam: f64) -> UpdateMarkRequest {
        UpdateMarkRequest {
            final_exam_mark: Some(final_exam),
            ..Default::default()
        }
    }

    fn kind(result: Result<Mark>) -> ErrorKind {
        result.expect_err("update should be rejected").kind()
    }

    #[test]
    fn test_student_challenges_published_result() {
        let current = mark(ResultStatus::Published, None);
        let next = plan_update(UserRole::Student, &current, &challenge(), now()).unwrap();
        assert_eq!(next.result_status, ResultStatus::Challenged);
        assert_eq!(next.result_challenge_payment_status, Some(false));
        assert_eq!(next.challenged_at, Some(now()));
        assert_eq!(next.total_mark, current.total_mark);

        // 再次申请复核
        let err = plan_update(UserRole::Student, &next, &challenge(), now()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.message(), MSG_CHALLENGE_ONLY_WHEN_PUBLISHED);
    }

    #[test]
    fn test_student_cannot_challenge_other_states() {
        for status in [
            ResultStatus::Unpublished,
            ResultStatus::Challenged,
            ResultStatus::Resolved,
        ] {
            let current = mark(status, None);
            assert_eq!(
                kind(plan_update(UserRole::Student, &current, &challenge(), now())),
                ErrorKind::Conflict
            );
        }
    }

    #[test]
    fn test_student_cannot_touch_other_fields() {
        let current = mark(ResultStatus::Published, None);

        let mut with_score = challenge();
        with_score.final_exam_mark = Some(80.0);
        assert_eq!(
            kind(plan_update(UserRole::Student, &current, &with_score, now())),
            ErrorKind::Forbidden
        );

        assert_eq!(
            kind(plan_update(UserRole::Student, &current, &regrade(80.0), now())),
            ErrorKind::Forbidden
        );

        let publish = UpdateMarkRequest {
            result_status: Some(ResultStatus::Resolved),
            ..Default::default()
        };
        assert_eq!(
            kind(plan_update(UserRole::Student, &current, &publish, now())),
            ErrorKind::Forbidden
        );

        let pay = UpdateMarkRequest {
            result_challenge_payment_status: Some(true),
            ..Default::default()
        };
        assert_eq!(
            kind(plan_update(UserRole::Student, &current, &pay, now())),
            ErrorKind::Forbidden
        );
    }

    #[test]
    fn test_scores_locked_until_payment_confirmed() {
        let challenged = mark(ResultStatus::Challenged, Some(false));
        let err = plan_update(UserRole::Teacher, &challenged, &regrade(70.0), now()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.message(), MSG_LOCKED_WHILE_UNPAID);

        let pay = UpdateMarkRequest {
            result_challenge_payment_status: Some(true),
            ..Default::default()
        };
        let paid = plan_update(UserRole::Admin, &challenged, &pay, now()).unwrap();
        assert_eq!(paid.result_status, ResultStatus::Challenged);
        assert_eq!(paid.result_challenge_payment_status, Some(true));

        let resolved = plan_update(UserRole::Teacher, &paid, &regrade(70.0), now()).unwrap();
        assert_eq!(resolved.result_status, ResultStatus::Resolved);
        assert_eq!(resolved.final_exam_mark, Some(70.0));
        assert_eq!(resolved.total_mark, 80.0);
        assert_eq!(resolved.gpa, 4.0);
        assert_eq!(resolved.result_challenge_payment_status, Some(true));
    }

    #[test]
    fn test_payment_and_regrade_in_one_request() {
        let challenged = mark(ResultStatus::Challenged, Some(false));
        let mut update = regrade(60.0);
        update.result_challenge_payment_status = Some(true);
        let next = plan_update(UserRole::SuperAdmin, &challenged, &update, now()).unwrap();
        assert_eq!(next.result_status, ResultStatus::Resolved);
        assert_eq!(next.total_mark, 70.0);
    }

    #[test]
    fn test_payment_status_rules() {
        let pay = UpdateMarkRequest {
            result_challenge_payment_status: Some(true),
            ..Default::default()
        };
        let challenged = mark(ResultStatus::Challenged, Some(false));
        assert_eq!(
            kind(plan_update(UserRole::Teacher, &challenged, &pay, now())),
            ErrorKind::Forbidden
        );

        let published = mark(ResultStatus::Published, None);
        assert_eq!(
            kind(plan_update(UserRole::Admin, &published, &pay, now())),
            ErrorKind::Conflict
        );
    }

    #[test]
    fn test_staff_regrade_recomputes_without_state_change() {
        let published = mark(ResultStatus::Published, None);
        let update = UpdateMarkRequest {
            assignment_mark: Some(20.0),
            class_test_mark: Some(20.0),
            midterm_mark: Some(20.0),
            ..Default::default()
        };
        let next = plan_update(UserRole::Teacher, &published, &update, now()).unwrap();
        assert_eq!(next.result_status, ResultStatus::Published);
        assert_eq!(next.total_mark, 60.0);
        assert_eq!(next.gpa, 3.0);
        assert_eq!(next.updated_at, now());
    }

    #[test]
    fn test_staff_regrade_validates_merged_scores() {
        let published = mark(ResultStatus::Published, None);
        // 已有 10 + 10 + 10，再把期中改成 41 后合计 61
        let update = UpdateMarkRequest {
            midterm_mark: Some(41.0),
            ..Default::default()
        };
        assert_eq!(
            kind(plan_update(UserRole::Admin, &published, &update, now())),
            ErrorKind::Validation
        );
        assert_eq!(
            kind(plan_update(UserRole::Admin, &published, &regrade(81.0), now())),
            ErrorKind::Validation
        );
    }

    #[test]
    fn test_staff_status_transitions() {
        let publish = UpdateMarkRequest {
            result_status: Some(ResultStatus::Published),
            ..Default::default()
        };
        let unpublish = UpdateMarkRequest {
            result_status: Some(ResultStatus::Unpublished),
            ..Default::default()
        };
        let resolve = UpdateMarkRequest {
            result_status: Some(ResultStatus::Resolved),
            ..Default::default()
        };

        let unpublished = mark(ResultStatus::Unpublished, None);
        let published = plan_update(UserRole::Teacher, &unpublished, &publish, now()).unwrap();
        assert_eq!(published.result_status, ResultStatus::Published);
        let back = plan_update(UserRole::Admin, &published, &unpublish, now()).unwrap();
        assert_eq!(back.result_status, ResultStatus::Unpublished);

        assert_eq!(
            kind(plan_update(UserRole::Admin, &published, &challenge(), now())),
            ErrorKind::Forbidden
        );
        assert_eq!(
            kind(plan_update(UserRole::Admin, &published, &resolve, now())),
            ErrorKind::Conflict
        );

        let challenged = mark(ResultStatus::Challenged, Some(true));
        assert_eq!(
            kind(plan_update(UserRole::Admin, &challenged, &publish, now())),
            ErrorKind::Conflict
        );
    }

    #[test]
    fn test_republishing_resolved_clears_payment() {
        let mut resolved = mark(ResultStatus::Resolved, Some(true));
        resolved.challenged_at = Some(now());
        let publish = UpdateMarkRequest {
            result_status: Some(ResultStatus::Published),
            ..Default::default()
        };
        let next = plan_update(UserRole::Admin, &resolved, &publish, now()).unwrap();
        assert_eq!(next.result_status, ResultStatus::Published);
        assert_eq!(next.result_challenge_payment_status, None);
        assert_eq!(next.challenged_at, Some(now()));

        // 重新发布后可以再次申请复核
        let again = plan_update(UserRole::Student, &next, &challenge(), now()).unwrap();
        assert_eq!(again.result_status, ResultStatus::Challenged);
    }

    #[test]
    fn test_empty_update_rejected() {
        let current = mark(ResultStatus::Published, None);
        assert_eq!(
            kind(plan_update(
                UserRole::Admin,
                &current,
                &UpdateMarkRequest::default(),
                now()
            )),
            ErrorKind::Validation
        );
    }
}
