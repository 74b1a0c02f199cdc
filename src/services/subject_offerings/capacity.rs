//! 开课容量与唯一性规则
//!
//! 同一 (教师, 院系, 课程) 只能有一条开课记录；同一院系在同一学期（课程所属学期）
//! 的开课数量不能超过上限（默认 7）。

use crate::errors::{RecordsError, Result};

pub const MSG_DUPLICATE_OFFERING: &str =
    "Duplicate offering: this teacher already teaches this subject in the selected department.";

pub fn capacity_message(cap: u64) -> String {
    format!("This department already has {cap} subjects in this semester.")
}

/// `existing_count` 为同院系、同学期已有的开课数（更新时不含自身）
pub fn check_offering_rules(duplicate_exists: bool, existing_count: u64, cap: u64) -> Result<()> {
    if duplicate_exists {
        return Err(RecordsError::conflict(MSG_DUPLICATE_OFFERING));
    }
    if existing_count >= cap {
        return Err(RecordsError::conflict(capacity_message(cap)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_under_cap_is_accepted() {
        assert!(check_offering_rules(false, 0, 7).is_ok());
        assert!(check_offering_rules(false, 6, 7).is_ok());
    }

    #[test]
    fn test_cap_reached_is_conflict() {
        let err = check_offering_rules(false, 7, 7).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(
            err.message(),
            "This department already has 7 subjects in this semester."
        );
    }

    #[test]
    fn test_duplicate_reported_before_capacity() {
        let err = check_offering_rules(true, 7, 7).unwrap_err();
        assert_eq!(err.message(), MSG_DUPLICATE_OFFERING);
    }
}
