//! SeaORM entities for the portal tables

pub mod course;
pub mod course_test;
pub mod department;
pub mod portal;
pub mod review;
pub mod user;
pub mod user_course;

use sea_orm::ActiveValue::{self, Set};
use uuid::Uuid;

/// Avatar assigned to users that never uploaded one
pub const DEFAULT_AVATAR: &str = "static/avatars/default.png";

/// Give a new row a UUID v4 key unless the caller supplied one
pub(crate) fn assign_id(id: &mut ActiveValue<Uuid>) {
    if id.is_not_set() {
        *id = Set(Uuid::new_v4());
    }
}
