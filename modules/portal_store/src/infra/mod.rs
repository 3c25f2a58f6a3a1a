//! Infrastructure layer - SeaORM persistence

pub mod storage;
