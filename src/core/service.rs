use crate::core::stats::{floor_average, rank_top, TOP_STUDENTS_LIMIT};
use crate::domain::model::{
    Assignment, AssignmentId, Course, CourseId, Grade, Score, Student, StudentId,
};
use crate::domain::ports::CourseService;
use crate::utils::error::{RecordsError, Result};
use crate::utils::validation::validate_name;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};

/// Process-lifetime records store.
///
/// Courses and assignments are keyed by their sequential ids, so map order is
/// creation order. Grades live in a slot list: resubmission overwrites the
/// slot of the earlier grade.
#[derive(Debug, Default)]
pub struct InMemoryCourseService {
    courses: BTreeMap<CourseId, Course>,
    assignments: BTreeMap<AssignmentId, Assignment>,
    students: HashMap<StudentId, Student>,
    grades: Vec<Grade>,
    last_course_id: u32,
    last_assignment_id: u32,
}

impl InMemoryCourseService {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_course_id(&mut self) -> Result<CourseId> {
        self.last_course_id = self
            .last_course_id
            .checked_add(1)
            .ok_or_else(|| RecordsError::id_exhausted("course"))?;
        Ok(CourseId(self.last_course_id))
    }

    fn next_assignment_id(&mut self) -> Result<AssignmentId> {
        self.last_assignment_id = self
            .last_assignment_id
            .checked_add(1)
            .ok_or_else(|| RecordsError::id_exhausted("assignment"))?;
        Ok(AssignmentId(self.last_assignment_id))
    }

    fn course(&self, course_id: CourseId) -> Result<&Course> {
        self.courses
            .get(&course_id)
            .ok_or_else(|| RecordsError::not_found("course", course_id))
    }

    fn grades_for<'a>(
        &'a self,
        course_id: CourseId,
        filter: impl Fn(&Grade) -> bool + 'a,
    ) -> impl Iterator<Item = i64> + 'a {
        self.grades
            .iter()
            .filter(move |g| g.course_id == course_id && filter(*g))
            .map(|g| g.grade.value())
    }
}

impl CourseService for InMemoryCourseService {
    fn list_courses(&self) -> Vec<Course> {
        self.courses.values().cloned().collect()
    }

    fn get_course(&self, course_id: CourseId) -> Option<Course> {
        self.courses.get(&course_id).cloned()
    }

    fn create_course(&mut self, name: &str) -> Result<Course> {
        let course_name = validate_name(Some(name)).inspect_err(|e| {
            tracing::warn!("Rejected course name {:?}: {}", name, e);
        })?;

        let course = Course::new(self.next_course_id()?, course_name);
        tracing::debug!("Created course {} ({})", course.course_id, course.course_name);
        self.courses.insert(course.course_id, course.clone());
        Ok(course)
    }

    fn delete_course(&mut self, course_id: CourseId) -> bool {
        match self.courses.remove(&course_id) {
            Some(course) => {
                tracing::debug!("Deleted course {} ({})", course_id, course.course_name);
                true
            }
            None => false,
        }
    }

    fn create_assignment(&mut self, course_id: CourseId, name: &str) -> Result<Assignment> {
        let assignment_name = validate_name(Some(name)).inspect_err(|e| {
            tracing::warn!("Rejected assignment name {:?}: {}", name, e);
        })?;
        self.course(course_id)?;

        let assignment = Assignment {
            assignment_id: self.next_assignment_id()?,
            assignment_name,
            course_id,
        };
        if let Some(course) = self.courses.get_mut(&course_id) {
            course.assignments.push(assignment.assignment_id);
        }
        self.assignments
            .insert(assignment.assignment_id, assignment.clone());

        tracing::debug!(
            "Created assignment {} ({}) in course {}",
            assignment.assignment_id,
            assignment.assignment_name,
            course_id
        );
        Ok(assignment)
    }

    fn enroll_student(&mut self, course_id: CourseId, student_id: &StudentId) -> Result<Student> {
        let course = self
            .courses
            .get_mut(&course_id)
            .ok_or_else(|| RecordsError::not_found("course", course_id))?;

        let student = self
            .students
            .entry(student_id.clone())
            .or_insert_with(|| Student::new(student_id.clone()));

        if !course.has_student(student_id) {
            course.students.push(student_id.clone());
        }
        if !student.courses.contains(&course_id) {
            student.courses.push(course_id);
        }

        tracing::debug!("Enrolled student {} in course {}", student_id, course_id);
        Ok(student.clone())
    }

    fn dropout_student(&mut self, course_id: CourseId, student_id: &StudentId) -> bool {
        let (Some(course), Some(student)) = (
            self.courses.get_mut(&course_id),
            self.students.get_mut(student_id),
        ) else {
            return false;
        };

        course.students.retain(|s| s != student_id);
        student.courses.retain(|c| *c != course_id);

        let before = self.grades.len();
        self.grades
            .retain(|g| !(g.course_id == course_id && &g.student_id == student_id));

        tracing::debug!(
            "Dropped student {} from course {} ({} grades purged)",
            student_id,
            course_id,
            before - self.grades.len()
        );
        true
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
        let score = grade.try_into().inspect_err(|e| {
            tracing::warn!("Rejected grade for {} in course {}: {}", student_id, course_id, e);
        })?;

        let course = self.course(course_id)?;
        if !self.students.contains_key(student_id) {
            return Err(RecordsError::not_found("student", student_id));
        }
        if !self.assignments.contains_key(&assignment_id) {
            return Err(RecordsError::not_found("assignment", assignment_id));
        }
        if !course.has_assignment(assignment_id) {
            return Err(RecordsError::not_found(
                "assignment in course",
                format!("{}/{}", course_id, assignment_id),
            ));
        }
        if !course.has_student(student_id) {
            return Err(RecordsError::not_found(
                "enrollment",
                format!("{}/{}", course_id, student_id),
            ));
        }

        let grade = Grade {
            course_id,
            student_id: student_id.clone(),
            assignment_id,
            grade: score,
            submitted_at: Utc::now(),
        };

        match self
            .grades
            .iter_mut()
            .find(|g| g.matches(course_id, student_id, assignment_id))
        {
            Some(slot) => {
                tracing::debug!(
                    "Replaced grade {} -> {} for {} on assignment {}",
                    slot.grade,
                    score,
                    student_id,
                    assignment_id
                );
                *slot = grade.clone();
            }
            None => {
                tracing::debug!(
                    "Recorded grade {} for {} on assignment {}",
                    score,
                    student_id,
                    assignment_id
                );
                self.grades.push(grade.clone());
            }
        }

        Ok(grade)
    }

    fn get_assignment_grade_avg(&self, course_id: CourseId, assignment_id: AssignmentId) -> i64 {
        floor_average(self.grades_for(course_id, move |g| g.assignment_id == assignment_id))
    }

    fn get_student_grade_avg(&self, course_id: CourseId, student_id: &StudentId) -> i64 {
        floor_average(self.grades_for(course_id, move |g| &g.student_id == student_id))
    }

    fn get_top_five_students(&self, course_id: CourseId) -> Vec<StudentId> {
        let Some(course) = self.courses.get(&course_id) else {
            return Vec::new();
        };

        let averages = course
            .students
            .iter()
            .map(|s| (s.clone(), self.get_student_grade_avg(course_id, s)))
            .collect();

        rank_top(averages, TOP_STUDENTS_LIMIT)
    }

    fn get_student(&self, student_id: &StudentId) -> Option<Student> {
        self.students.get(student_id).cloned()
    }

    fn get_assignment(&self, assignment_id: AssignmentId) -> Option<Assignment> {
        self.assignments.get(&assignment_id).cloned()
    }

    fn list_grades(&self) -> Vec<Grade> {
        self.grades.clone()
    }
}
