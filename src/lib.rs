pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::scenario::Scenario;
pub use crate::core::{
    report::Report, runner::ScenarioRunner, service::InMemoryCourseService,
    shared::SharedCourseService,
};
pub use domain::model::{Assignment, AssignmentId, Course, CourseId, Grade, Score, Student, StudentId};
pub use domain::ports::CourseService;
pub use utils::error::{RecordsError, Result};
