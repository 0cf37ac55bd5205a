use crate::core::service::InMemoryCourseService;
use crate::domain::model::{
    Assignment, AssignmentId, Course, CourseId, Grade, Score, Student, StudentId,
};
use crate::domain::ports::CourseService;
use crate::utils::error::{RecordsError, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Thread-safe handle to one records store.
///
/// A single mutex guards every collection and both id counters, so each
/// operation runs as one unit. Clones share the same store.
#[derive(Debug, Clone, Default)]
pub struct SharedCourseService {
    inner: Arc<Mutex<InMemoryCourseService>>,
}

impl SharedCourseService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_service(service: InMemoryCourseService) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    /// Runs several operations under one lock acquisition.
    pub fn transaction<T>(&self, f: impl FnOnce(&mut InMemoryCourseService) -> T) -> T {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }
}

impl CourseService for SharedCourseService {
    fn list_courses(&self) -> Vec<Course> {
        self.inner.lock().list_courses()
    }

    fn get_course(&self, course_id: CourseId) -> Option<Course> {
        self.inner.lock().get_course(course_id)
    }

    fn create_course(&mut self, name: &str) -> Result<Course> {
        self.inner.lock().create_course(name)
    }

    fn delete_course(&mut self, course_id: CourseId) -> bool {
        self.inner.lock().delete_course(course_id)
    }

    fn create_assignment(&mut self, course_id: CourseId, name: &str) -> Result<Assignment> {
        self.inner.lock().create_assignment(course_id, name)
    }

    fn enroll_student(&mut self, course_id: CourseId, student_id: &StudentId) -> Result<Student> {
        self.inner.lock().enroll_student(course_id, student_id)
    }

    fn dropout_student(&mut self, course_id: CourseId, student_id: &StudentId) -> bool {
        self.inner.lock().dropout_student(course_id, student_id)
    }

    fn submit_assignment<G>(
        &mut self,
        course_id: CourseId,
        student_id: &StudentId,
        assignment_id: AssignmentId,
        grade: G,
    ) -> Result<Grade>
    where
        G: TryInto<Score, Error = RecordsError>,
    {
        self.inner
            .lock()
            .submit_assignment(course_id, student_id, assignment_id, grade)
    }

    fn get_assignment_grade_avg(&self, course_id: CourseId, assignment_id: AssignmentId) -> i64 {
        self.inner
            .lock()
            .get_assignment_grade_avg(course_id, assignment_id)
    }

    fn get_student_grade_avg(&self, course_id: CourseId, student_id: &StudentId) -> i64 {
        self.inner.lock().get_student_grade_avg(course_id, student_id)
    }

    fn get_top_five_students(&self, course_id: CourseId) -> Vec<StudentId> {
        self.inner.lock().get_top_five_students(course_id)
    }

    fn get_student(&self, student_id: &StudentId) -> Option<Student> {
        self.inner.lock().get_student(student_id)
    }

    fn get_assignment(&self, assignment_id: AssignmentId) -> Option<Assignment> {
        self.inner.lock().get_assignment(assignment_id)
    }

    fn list_grades(&self) -> Vec<Grade> {
        self.inner.lock().list_grades()
    }
}
