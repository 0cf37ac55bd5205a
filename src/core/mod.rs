pub mod report;
pub mod runner;
pub mod service;
pub mod shared;
pub mod stats;

pub use crate::domain::model::{
    Assignment, AssignmentId, Course, CourseId, Grade, Score, Student, StudentId,
};
pub use crate::domain::ports::CourseService;
pub use crate::utils::error::Result;
