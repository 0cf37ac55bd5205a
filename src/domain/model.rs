use crate::utils::error::{RecordsError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssignmentId(pub u32);

/// Caller-supplied natural key of a student.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub String);

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StudentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for StudentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl StudentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A grade value, always an integer in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    pub const MIN: i64 = 0;
    pub const MAX: i64 = 100;

    pub fn value(self) -> i64 {
        i64::from(self.0)
    }
}

impl TryFrom<i64> for Score {
    type Error = RecordsError;

    fn try_from(value: i64) -> Result<Self> {
        crate::utils::validation::validate_range("grade", value, Self::MIN, Self::MAX)?;
        // in range, so the narrowing cannot truncate
        Ok(Self(value as u8))
    }
}

impl TryFrom<i32> for Score {
    type Error = RecordsError;

    fn try_from(value: i32) -> Result<Self> {
        Self::try_from(i64::from(value))
    }
}

/// Floats are never grades, even whole-valued ones such as `8.0`.
impl TryFrom<f64> for Score {
    type Error = RecordsError;

    fn try_from(value: f64) -> Result<Self> {
        Err(RecordsError::invalid_argument(
            "grade",
            format!("{:?} is not an integer", value),
        ))
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub course_id: CourseId,
    pub course_name: String,
    /// Assignments in creation order.
    pub assignments: Vec<AssignmentId>,
    /// Enrolled students in enrollment order.
    pub students: Vec<StudentId>,
}

impl Course {
    pub fn new(course_id: CourseId, course_name: String) -> Self {
        Self {
            course_id,
            course_name,
            assignments: Vec::new(),
            students: Vec::new(),
        }
    }

    pub fn has_student(&self, student_id: &StudentId) -> bool {
        self.students.contains(student_id)
    }

    pub fn has_assignment(&self, assignment_id: AssignmentId) -> bool {
        self.assignments.contains(&assignment_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub assignment_id: AssignmentId,
    pub assignment_name: String,
    pub course_id: CourseId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub student_id: StudentId,
    /// Courses in enrollment order. May still list a deleted course.
    pub courses: Vec<CourseId>,
}

impl Student {
    pub fn new(student_id: StudentId) -> Self {
        Self {
            student_id,
            courses: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grade {
    pub course_id: CourseId,
    pub student_id: StudentId,
    pub assignment_id: AssignmentId,
    pub grade: Score,
    pub submitted_at: DateTime<Utc>,
}

impl Grade {
    pub fn matches(
        &self,
        course_id: CourseId,
        student_id: &StudentId,
        assignment_id: AssignmentId,
    ) -> bool {
        self.course_id == course_id
            && self.assignment_id == assignment_id
            && &self.student_id == student_id
    }
}
