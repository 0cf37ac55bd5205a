use crate::domain::model::{AssignmentId, CourseId, StudentId};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub run: String,
    pub steps_applied: usize,
    pub failures: Vec<StepFailure>,
    pub courses: Vec<CourseReport>,
    /// Grades of the reported courses in slot order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grades: Option<Vec<GradeLine>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepFailure {
    /// 1-based position in the scenario.
    pub step: usize,
    pub op: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseReport {
    pub course_id: CourseId,
    pub course_name: String,
    pub students: Vec<StudentId>,
    pub assignments: Vec<AssignmentSummary>,
    pub student_averages: Vec<StudentAverage>,
    pub top_five: Vec<StudentId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentSummary {
    pub assignment_id: AssignmentId,
    pub assignment_name: String,
    pub average: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentAverage {
    pub student_id: StudentId,
    pub average: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeLine {
    pub course_id: CourseId,
    pub course_name: String,
    pub assignment_id: AssignmentId,
    pub assignment_name: String,
    pub student_id: StudentId,
    pub grade: i64,
}

impl Report {
    pub fn course(&self, course_id: CourseId) -> Option<&CourseReport> {
        self.courses.iter().find(|c| c.course_id == course_id)
    }

    pub fn to_json(&self) -> crate::utils::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "> {} ({} steps applied)", self.run, self.steps_applied)?;

        writeln!(f, "> courses")?;
        for course in &self.courses {
            writeln!(f, "    {} , {}", course.course_id, course.course_name)?;
        }

        writeln!(f, "> enrollment")?;
        for course in &self.courses {
            write!(f, "    {} :", course.course_name)?;
            for student in &course.students {
                write!(f, "{} ,", student)?;
            }
            writeln!(f)?;
        }

        if let Some(grades) = &self.grades {
            writeln!(f, "> grades")?;
            for g in grades {
                writeln!(
                    f,
                    "    {} , {} , {} , {}",
                    g.course_name, g.assignment_name, g.student_id, g.grade
                )?;
            }
        }

        for course in &self.courses {
            writeln!(f, "> {}", course.course_name)?;
            for a in &course.assignments {
                writeln!(
                    f,
                    "    assignment {} , {} , avg {}",
                    a.assignment_id, a.assignment_name, a.average
                )?;
            }
            for s in &course.student_averages {
                writeln!(f, "    student {} , avg {}", s.student_id, s.average)?;
            }
            writeln!(f, "    top five:")?;
            for student in &course.top_five {
                writeln!(f, "        {}", student)?;
            }
        }

        if !self.failures.is_empty() {
            writeln!(f, "> failed steps")?;
            for failure in &self.failures {
                writeln!(
                    f,
                    "    #{} {} : {}",
                    failure.step, failure.op, failure.message
                )?;
            }
        }
        Ok(())
    }
}
