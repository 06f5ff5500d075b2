//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod job_repo;
pub mod script_repo;
pub mod worker_repo;

pub use job_repo::JobRepo;
pub use script_repo::ScriptRepo;
pub use worker_repo::WorkerRepo;
