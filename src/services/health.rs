// Health check service implementation

use crate::db::ProfileRepository;

pub struct HealthChecker<'a> {
    profiles: &'a ProfileRepository,
}

impl<'a> HealthChecker<'a> {
    pub fn new(profiles: &'a ProfileRepository) -> Self {
        Self { profiles }
    }

    /// The service is healthy while the profiles table can be read
    pub async fn check(&self) -> bool {
        match self.profiles.all().await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("Health check failed: {}", e);
                false
            }
        }
    }
}
