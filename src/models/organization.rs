//! Organization (company) records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An organization as stored in the `companies` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Organization {
    pub id: String,

    pub name: String,

    /// Short join code (API field: company_code)
    #[serde(rename = "company_code", default)]
    pub code: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Profile id of the creator
    #[serde(default)]
    pub created_by: String,
}

/// Insert payload for a new organization.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewOrganization {
    pub name: String,

    #[serde(rename = "company_code")]
    pub code: String,

    pub created_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_store_row() {
        let json = r#"{
            "id": "c1",
            "name": "Acme",
            "company_code": "ABC123",
            "created_at": "2024-03-01T10:00:00+00:00",
            "created_by": "u1"
        }"#;
        let org: Organization = serde_json::from_str(json).unwrap();
        assert_eq!(org.code, "ABC123");
        assert_eq!(org.created_by, "u1");
        assert!(org.created_at.is_some());
    }

    #[test]
    fn test_deserialize_tolerates_missing_code() {
        let org: Organization = serde_json::from_str(r#"{"id": "c2", "name": "NoCode"}"#).unwrap();
        assert_eq!(org.code, "");
    }

    #[test]
    fn test_new_organization_uses_store_column_names() {
        let payload = NewOrganization {
            name: "Acme".to_string(),
            code: "ABC123".to_string(),
            created_by: "u1".to_string(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["company_code"], "ABC123");
        assert_eq!(json["created_by"], "u1");
    }
}
