//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod catalog_repo;
pub mod education_record_repo;
pub mod member_project_repo;
pub mod membership_repo;
pub mod people_repo;
pub mod role_assignment_repo;
pub mod user_repo;

pub use catalog_repo::CatalogRepo;
pub use education_record_repo::EducationRecordRepo;
pub use member_project_repo::MemberProjectRepo;
pub use membership_repo::MembershipRepo;
pub use people_repo::PeopleRepo;
pub use role_assignment_repo::RoleAssignmentRepo;
pub use user_repo::UserRepo;
