// Profile table repository management

mod profile_repository;

pub use profile_repository::ProfileRepository;

use crate::db::table::CsvTable;

/// Container for all repositories
#[derive(Clone)]
pub struct Repositories {
    pub profile: ProfileRepository,
}

impl Repositories {
    /// Creates a new repositories container over the profiles table
    pub fn new(table: CsvTable) -> Self {
        Repositories {
            profile: ProfileRepository::new(table),
        }
    }
}
