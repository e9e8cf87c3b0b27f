use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use stockdesk::error::{StoreError, StoreResult};
use stockdesk::models::{NewOrganization, Organization};
use stockdesk::repositories::OrganizationRepository;

/// In-memory organization repository that keeps insertion order.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockOrganizationRepository {
    organizations: Arc<Mutex<Vec<Organization>>>,
    next_codes: Arc<Mutex<Vec<String>>>,
    failing: Arc<Mutex<HashSet<String>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockOrganizationRepository {
    pub fn new() -> Self {
        Self {
            organizations: Arc::new(Mutex::new(Vec::new())),
            next_codes: Arc::new(Mutex::new(Vec::new())),
            failing: Arc::new(Mutex::new(HashSet::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn with_codes(codes: &[(&str, &str)]) -> Self {
        let repo = Self::new();
        for (id, code) in codes {
            repo.add_organization(Organization {
                id: id.to_string(),
                name: format!("Company {}", id),
                code: code.to_string(),
                created_by: "seed".to_string(),
                ..Default::default()
            });
        }
        repo
    }

    pub fn add_organization(&self, organization: Organization) {
        self.organizations.lock().unwrap().push(organization);
    }

    pub fn all(&self) -> Vec<Organization> {
        self.organizations.lock().unwrap().clone()
    }

    /// Queue a code for the next `generate_code` call.
    pub fn queue_code(&self, code: &str) {
        self.next_codes.lock().unwrap().push(code.to_string());
    }

    /// Make every call to `method` fail with a server error.
    pub fn fail_on(&self, method: &str) {
        self.failing.lock().unwrap().insert(method.to_string());
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    pub fn reset_call_counts(&self) {
        self.call_counts.lock().unwrap().clear();
    }

    fn track_call(&self, method: &str) -> StoreResult<()> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;

        if self.failing.lock().unwrap().contains(method) {
            return Err(StoreError::ApiError {
                status: 500,
                message: format!("{} failed", method),
            });
        }
        Ok(())
    }
}

impl Default for MockOrganizationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrganizationRepository for MockOrganizationRepository {
    async fn get(&self, id: &str) -> StoreResult<Organization> {
        self.track_call("get")?;

        self.organizations
            .lock()
            .unwrap()
            .iter()
            .find(|org| org.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Organization {} not found", id)))
    }

    async fn list_all(&self) -> StoreResult<Vec<Organization>> {
        self.track_call("list_all")?;
        Ok(self.all())
    }

    async fn create(&self, organization: &NewOrganization) -> StoreResult<Organization> {
        self.track_call("create")?;

        let mut organizations = self.organizations.lock().unwrap();
        let created = Organization {
            id: format!("org-{}", organizations.len() + 1),
            name: organization.name.clone(),
            code: organization.code.clone(),
            created_by: organization.created_by.clone(),
            created_at: Some(chrono::Utc::now()),
        };
        organizations.push(created.clone());
        Ok(created)
    }

    async fn generate_code(&self) -> StoreResult<String> {
        self.track_call("generate_code")?;

        let mut codes = self.next_codes.lock().unwrap();
        if codes.is_empty() {
            let count = self.organizations.lock().unwrap().len();
            Ok(format!("GEN{:03}", count + 1))
        } else {
            Ok(codes.remove(0))
        }
    }
}
