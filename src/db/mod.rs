// Storage module: the CSV profiles table and its repository

pub mod error;
pub mod repositories;
pub mod table;

pub use error::DbError;
pub use repositories::{ProfileRepository, Repositories};
pub use table::CsvTable;

use crate::config::AppConfig;

/// Opens the profiles table named in the configuration, creating it if needed
pub async fn open(config: &AppConfig) -> Result<Repositories, DbError> {
    let repositories = Repositories::new(CsvTable::new(&config.profiles_csv_path));
    repositories.profile.ensure().await?;
    Ok(repositories)
}
