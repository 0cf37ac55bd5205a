use crate::config::scenario::{Scenario, Step};
use crate::core::report::{
    AssignmentSummary, CourseReport, GradeLine, Report, StepFailure, StudentAverage,
};
use crate::domain::model::{Course, CourseId};
use crate::domain::ports::CourseService;
use crate::utils::error::{RecordsError, Result};

/// Replays a scenario against a records service and reports the outcome.
pub struct ScenarioRunner<S: CourseService> {
    service: S,
}

impl<S: CourseService> ScenarioRunner<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn into_service(self) -> S {
        self.service
    }

    pub fn run(&mut self, scenario: &Scenario) -> Result<Report> {
        tracing::info!(
            "Running scenario '{}' ({} steps)",
            scenario.run.name,
            scenario.steps.len()
        );

        let mut failures = Vec::new();
        let mut applied = 0;

        for (index, step) in scenario.steps.iter().enumerate() {
            let position = index + 1;
            match self.apply(step) {
                Ok(()) => applied += 1,
                Err(e) if scenario.run.stop_on_error => {
                    tracing::error!("Step {} ({}) failed: {}", position, step.op(), e);
                    return Err(RecordsError::ScenarioError {
                        step: position,
                        op: step.op().to_string(),
                        message: e.to_string(),
                    });
                }
                Err(e) => {
                    tracing::warn!("Step {} ({}) skipped: {}", position, step.op(), e);
                    failures.push(StepFailure {
                        step: position,
                        op: step.op().to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            "Scenario '{}' finished: {} applied, {} failed",
            scenario.run.name,
            applied,
            failures.len()
        );

        let courses = self.course_reports(scenario);
        let grades = scenario
            .report
            .include_grades
            .then(|| self.grade_lines(&courses));

        Ok(Report {
            run: scenario.run.name.clone(),
            steps_applied: applied,
            failures,
            courses,
            grades,
        })
    }

    fn apply(&mut self, step: &Step) -> Result<()> {
        tracing::debug!("Applying {:?}", step);
        match step {
            Step::CreateCourse { name } => {
                self.service.create_course(required_name(name)?)?;
            }
            Step::DeleteCourse { course_id } => {
                if !self.service.delete_course(*course_id) {
                    return Err(RecordsError::not_found("course", course_id));
                }
            }
            Step::CreateAssignment { course_id, name } => {
                self.service
                    .create_assignment(*course_id, required_name(name)?)?;
            }
            Step::EnrollStudent {
                course_id,
                student_id,
            } => {
                self.service.enroll_student(*course_id, student_id)?;
            }
            Step::DropoutStudent {
                course_id,
                student_id,
            } => {
                if !self.service.dropout_student(*course_id, student_id) {
                    return Err(RecordsError::not_found(
                        "course or student",
                        format!("{}/{}", course_id, student_id),
                    ));
                }
            }
            Step::SubmitAssignment {
                course_id,
                student_id,
                assignment_id,
                grade,
            } => {
                self.service
                    .submit_assignment(*course_id, student_id, *assignment_id, *grade)?;
            }
        }
        Ok(())
    }

    fn course_reports(&self, scenario: &Scenario) -> Vec<CourseReport> {
        let selected = &scenario.report.courses;
        self.service
            .list_courses()
            .into_iter()
            .filter(|c| selected.is_empty() || selected.contains(&c.course_id.0))
            .map(|c| self.course_report(c))
            .collect()
    }

    fn grade_lines(&self, courses: &[CourseReport]) -> Vec<GradeLine> {
        self.service
            .list_grades()
            .into_iter()
            .filter_map(|g| {
                let course = courses.iter().find(|c| c.course_id == g.course_id)?;
                let assignment_name = self
                    .service
                    .get_assignment(g.assignment_id)
                    .map(|a| a.assignment_name)
                    .unwrap_or_else(|| g.assignment_id.to_string());
                Some(GradeLine {
                    course_id: g.course_id,
                    course_name: course.course_name.clone(),
                    assignment_id: g.assignment_id,
                    assignment_name,
                    student_id: g.student_id,
                    grade: g.grade.value(),
                })
            })
            .collect()
    }

    fn course_report(&self, course: Course) -> CourseReport {
        let course_id: CourseId = course.course_id;

        let assignments: Vec<AssignmentSummary> = course
            .assignments
            .iter()
            .filter_map(|id| self.service.get_assignment(*id))
            .map(|a| AssignmentSummary {
                average: self
                    .service
                    .get_assignment_grade_avg(course_id, a.assignment_id),
                assignment_id: a.assignment_id,
                assignment_name: a.assignment_name,
            })
            .collect();

        let student_averages = course
            .students
            .iter()
            .map(|s| StudentAverage {
                student_id: s.clone(),
                average: self.service.get_student_grade_avg(course_id, s),
            })
            .collect();

        CourseReport {
            course_id,
            course_name: course.course_name,
            top_five: self.service.get_top_five_students(course_id),
            students: course.students,
            assignments,
            student_averages,
        }
    }
}

/// The service validates and normalizes names; a step that omits one fails here.
fn required_name(name: &Option<String>) -> Result<&str> {
    name.as_deref()
        .ok_or_else(|| RecordsError::invalid_argument("name", "Name cannot be absent"))
}
