pub mod controller;
pub mod directory;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod model;
pub mod postgres;
pub mod repository;
pub mod router;
pub mod service;
