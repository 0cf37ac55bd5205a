use crate::domain::model::{
    Assignment, AssignmentId, Course, CourseId, Grade, Score, Student, StudentId,
};
use crate::utils::error::{RecordsError, Result};

/// Operations of the academic records service.
///
/// Lookups that miss report "not found" through the return value: `None`,
/// `false`, an empty list, or `RecordsError::NotFound` for operations that
/// already return a `Result`.
///
/// Implementations validate and normalize every name they receive. A name
/// that is missing altogether never reaches the service, so rejecting it is
/// the caller's job.
pub trait CourseService {
    /// All courses in creation order.
    fn list_courses(&self) -> Vec<Course>;

    fn get_course(&self, course_id: CourseId) -> Option<Course>;

    /// `name` is normalized with `validate_name` before it is stored.
    fn create_course(&mut self, name: &str) -> Result<Course>;

    /// Removes the course only. Its assignments, grades and the enrollment
    /// entries held by students are left in place.
    fn delete_course(&mut self, course_id: CourseId) -> bool;

    fn create_assignment(&mut self, course_id: CourseId, name: &str) -> Result<Assignment>;

    /// Idempotent: enrolling twice yields the same student and one membership.
    fn enroll_student(&mut self, course_id: CourseId, student_id: &StudentId) -> Result<Student>;

    /// Removes membership on both sides and every grade of the pair.
    fn dropout_student(&mut self, course_id: CourseId, student_id: &StudentId) -> bool;

    /// Records a grade, replacing any earlier grade for the same
    /// (course, student, assignment) triple.
    fn submit_assignment<G>(
        &mut self,
        course_id: CourseId,
        student_id: &StudentId,
        assignment_id: AssignmentId,
        grade: G,
    ) -> Result<Grade>
    where
        G: TryInto<Score, Error = RecordsError>;

    fn get_assignment_grade_avg(&self, course_id: CourseId, assignment_id: AssignmentId) -> i64;

    fn get_student_grade_avg(&self, course_id: CourseId, student_id: &StudentId) -> i64;

    fn get_top_five_students(&self, course_id: CourseId) -> Vec<StudentId>;

    fn get_student(&self, student_id: &StudentId) -> Option<Student>;

    fn get_assignment(&self, assignment_id: AssignmentId) -> Option<Assignment>;

    /// Every grade in slot order.
    fn list_grades(&self) -> Vec<Grade>;
}
