use super::entities::Mark;
use serde::Serialize;

/// 按学期分组的成绩
#[derive(Debug, Clone, Serialize)]
pub struct SemesterMarks {
    pub semester_id: i64,
    pub marks: Vec<Mark>,
}

/// 按学期分组，保持学期首次出现的顺序
pub fn group_marks_by_semester(marks: Vec<Mark>) -> Vec<SemesterMarks> {
    let mut groups: Vec<SemesterMarks> = Vec::new();
    for mark in marks {
        match groups.iter_mut().find(|g| g.semester_id == mark.semester_id) {
            Some(group) => group.marks.push(mark),
            None => groups.push(SemesterMarks {
                semester_id: mark.semester_id,
                marks: vec![mark],
            }),
        }
    }
    groups
}
