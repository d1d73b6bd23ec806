//! Infrastructure layer - Repository implementations, services and logging

pub mod logging;
pub mod storage;
pub mod user;
