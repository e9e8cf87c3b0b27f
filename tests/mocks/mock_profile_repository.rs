use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use stockdesk::error::{StoreError, StoreResult};
use stockdesk::models::Profile;
use stockdesk::repositories::ProfileRepository;

/// In-memory profile repository.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockProfileRepository {
    profiles: Arc<Mutex<HashMap<String, Profile>>>,
    fail_writes: Arc<Mutex<bool>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockProfileRepository {
    pub fn new() -> Self {
        Self {
            profiles: Arc::new(Mutex::new(HashMap::new())),
            fail_writes: Arc::new(Mutex::new(false)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn add_profile(&self, id: &str, organization_id: Option<&str>) {
        let profile = Profile {
            id: id.to_string(),
            email: Some(format!("{}@example.com", id)),
            organization_id: organization_id.map(str::to_string),
            ..Default::default()
        };
        self.profiles.lock().unwrap().insert(id.to_string(), profile);
    }

    pub fn profile(&self, id: &str) -> Option<Profile> {
        self.profiles.lock().unwrap().get(id).cloned()
    }

    pub fn fail_writes(&self) {
        *self.fail_writes.lock().unwrap() = true;
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockProfileRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileRepository for MockProfileRepository {
    async fn get(&self, id: &str) -> StoreResult<Profile> {
        self.track_call("get");

        self.profile(id)
            .ok_or_else(|| StoreError::NotFound(format!("Profile {} not found", id)))
    }

    async fn set_organization(&self, profile_id: &str, organization_id: &str) -> StoreResult<()> {
        self.track_call("set_organization");

        if *self.fail_writes.lock().unwrap() {
            return Err(StoreError::ApiError {
                status: 500,
                message: "update failed".to_string(),
            });
        }

        let mut profiles = self.profiles.lock().unwrap();
        let profile = profiles
            .get_mut(profile_id)
            .ok_or_else(|| StoreError::NotFound(format!("Profile {} not found", profile_id)))?;
        profile.organization_id = Some(organization_id.to_string());
        Ok(())
    }
}
