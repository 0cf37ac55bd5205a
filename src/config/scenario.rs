use crate::domain::model::{AssignmentId, CourseId, Score, StudentId};
use crate::utils::error::{RecordsError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Built-in scenario replaying the classic course demo.
pub const DEMO_SCENARIO: &str = include_str!("../../scenarios/demo.toml");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_run_name")]
    pub name: String,
    /// Abort on the first rejected or unresolved step.
    #[serde(default)]
    pub stop_on_error: bool,
}

fn default_run_name() -> String {
    "scenario".to_string()
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            name: default_run_name(),
            stop_on_error: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Only report these courses. Empty means every remaining course.
    #[serde(default)]
    pub courses: Vec<u32>,
    #[serde(default = "default_true")]
    pub include_grades: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            courses: Vec::new(),
            include_grades: true,
        }
    }
}

/// A grade as written in a scenario file. Floats are kept so that the
/// service can reject non-integer grades itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawGrade {
    Integer(i64),
    Float(f64),
}

impl TryFrom<RawGrade> for Score {
    type Error = RecordsError;

    fn try_from(value: RawGrade) -> Result<Self> {
        match value {
            RawGrade::Integer(v) => Score::try_from(v),
            RawGrade::Float(v) => Score::try_from(v),
        }
    }
}

impl fmt::Display for RawGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawGrade::Integer(v) => write!(f, "{}", v),
            RawGrade::Float(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    CreateCourse {
        name: Option<String>,
    },
    DeleteCourse {
        course_id: CourseId,
    },
    CreateAssignment {
        course_id: CourseId,
        name: Option<String>,
    },
    EnrollStudent {
        course_id: CourseId,
        student_id: StudentId,
    },
    DropoutStudent {
        course_id: CourseId,
        student_id: StudentId,
    },
    SubmitAssignment {
        course_id: CourseId,
        student_id: StudentId,
        assignment_id: AssignmentId,
        grade: RawGrade,
    },
}

impl Step {
    pub fn op(&self) -> &'static str {
        match self {
            Step::CreateCourse { .. } => "create_course",
            Step::DeleteCourse { .. } => "delete_course",
            Step::CreateAssignment { .. } => "create_assignment",
            Step::EnrollStudent { .. } => "enroll_student",
            Step::DropoutStudent { .. } => "dropout_student",
            Step::SubmitAssignment { .. } => "submit_assignment",
        }
    }
}

impl Scenario {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn demo() -> Result<Self> {
        Self::from_toml_str(DEMO_SCENARIO)
    }

    pub fn validate_config(&self) -> Result<()> {
        if self.steps.is_empty() {
            return Err(RecordsError::config("steps", "A scenario needs at least one step"));
        }
        if self.run.name.trim().is_empty() {
            return Err(RecordsError::config("run.name", "Run name cannot be empty"));
        }
        if let Some(id) = self.report.courses.iter().find(|id| **id == 0) {
            return Err(RecordsError::config(
                "report.courses",
                format!("Course ids start at 1, got {}", id),
            ));
        }
        Ok(())
    }
}

impl Validate for Scenario {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_scenario() {
        let toml_content = r#"
[run]
name = "basic"
stop_on_error = true

[report]
courses = [1]
include_grades = false

[[steps]]
op = "create_course"
name = "Database I"

[[steps]]
op = "enroll_student"
course_id = 1
student_id = "JO01"

[[steps]]
op = "submit_assignment"
course_id = 1
student_id = "JO01"
assignment_id = 1
grade = 8
"#;

        let scenario = Scenario::from_toml_str(toml_content).unwrap();

        assert_eq!(scenario.run.name, "basic");
        assert!(scenario.run.stop_on_error);
        assert_eq!(scenario.report.courses, vec![1]);
        assert!(!scenario.report.include_grades);
        assert_eq!(scenario.steps.len(), 3);
        assert_eq!(scenario.steps[1].op(), "enroll_student");
        match &scenario.steps[2] {
            Step::SubmitAssignment { grade, .. } => assert_eq!(*grade, RawGrade::Integer(8)),
            other => panic!("unexpected step {:?}", other),
        }
        assert!(scenario.validate().is_ok());
    }

    #[test]
    fn test_defaults_and_optional_names() {
        let toml_content = r#"
[[steps]]
op = "create_course"

[[steps]]
op = "submit_assignment"
course_id = 1
student_id = "JO01"
assignment_id = 1
grade = 5.8
"#;

        let scenario = Scenario::from_toml_str(toml_content).unwrap();
        assert_eq!(scenario.run.name, "scenario");
        assert!(!scenario.run.stop_on_error);
        assert!(scenario.report.include_grades);
        assert!(matches!(scenario.steps[0], Step::CreateCourse { name: None }));
        match &scenario.steps[1] {
            Step::SubmitAssignment { grade, .. } => {
                assert_eq!(*grade, RawGrade::Float(5.8));
                assert!(Score::try_from(*grade).is_err());
            }
            other => panic!("unexpected step {:?}", other),
        }
    }

    #[test]
    fn test_unknown_op_is_rejected() {
        let toml_content = r#"
[[steps]]
op = "rename_course"
course_id = 1
"#;
        let err = Scenario::from_toml_str(toml_content).unwrap_err();
        assert!(matches!(err, RecordsError::TomlError(_)));
    }

    #[test]
    fn test_validation() {
        let empty = Scenario::from_toml_str("[run]\nname = \"empty\"\n").unwrap();
        assert!(empty.validate().is_err());

        let toml_content = r#"
[report]
courses = [0]

[[steps]]
op = "create_course"
name = "A"
"#;
        let scenario = Scenario::from_toml_str(toml_content).unwrap();
        assert!(scenario.validate().is_err());
    }

    #[test]
    fn test_scenario_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let toml_content = r#"
[run]
name = "file-test"

[[steps]]
op = "create_course"
name = "Database I"
"#;
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let scenario = Scenario::from_file(temp_file.path()).unwrap();
        assert_eq!(scenario.run.name, "file-test");

        let missing = Scenario::from_file(temp_file.path().with_extension("missing"));
        assert!(matches!(missing, Err(RecordsError::IoError(_))));
    }

    #[test]
    fn test_demo_scenario_is_valid() {
        let scenario = Scenario::demo().unwrap();
        assert!(scenario.validate().is_ok());
        assert_eq!(scenario.steps[0].op(), "create_course");
    }
}
