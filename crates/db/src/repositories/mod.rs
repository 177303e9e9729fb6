//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod activity_repo;
pub mod bill_repo;
pub mod category_repo;
pub mod civi_image_repo;
pub mod civi_repo;
pub mod profile_repo;
pub mod thread_repo;

pub use activity_repo::ActivityRepo;
pub use bill_repo::BillRepo;
pub use category_repo::CategoryRepo;
pub use civi_image_repo::CiviImageRepo;
pub use civi_repo::CiviRepo;
pub use profile_repo::ProfileRepo;
pub use thread_repo::ThreadRepo;
