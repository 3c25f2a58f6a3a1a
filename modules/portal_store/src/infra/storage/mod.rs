//! Storage layer - database entities, migrations and the generic repository

pub mod db;
pub mod entity;
pub(crate) mod error;
pub mod migrations;
pub mod repository;

pub use repository::{
    CourseRepository, CourseTestRepository, DepartmentRepository, PortalRepository,
    ReviewRepository, SeaOrmRepository, UserCourseRepository, UserRepository,
    UserTestRepository,
};
