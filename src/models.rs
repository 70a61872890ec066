//! Apollo wire models and search result types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub total_entries: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Organization {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub estimated_num_employees: Option<u64>,
    #[serde(default)]
    pub estimated_annual_revenue: Option<u64>,
    #[serde(default)]
    pub latest_funding_stage: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub technologies: Vec<Technology>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Technology {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub organization_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_numbers: Vec<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub organization: Option<PersonOrganization>,

    /// Injected during enrichment: which matched organization this person
    /// came from. Absent on direct people-search results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_context: Option<OrganizationContext>,
}

/// Employer summary embedded in people-search responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonOrganization {
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub estimated_num_employees: Option<u64>,
}

/// Originating-organization tag attached to enriched people.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizationContext {
    pub id: Option<String>,
    pub name: Option<String>,
    pub industry: Option<String>,
    pub employees: Option<u64>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrgSearchResponse {
    #[serde(default)]
    pub organizations: Vec<Organization>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeopleSearchResponse {
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Response shape of the contacts fallback endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactsResponse {
    #[serde(default)]
    pub contacts: Vec<Person>,
}

/// GET /auth/health payload. Apollo returns either `healthy`/`is_logged_in`
/// or just `api_key_valid` depending on the key type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub healthy: Option<bool>,
    #[serde(default)]
    pub is_logged_in: Option<bool>,
    #[serde(default)]
    pub api_key_valid: Option<bool>,
}

impl HealthResponse {
    pub fn key_valid(&self) -> bool {
        (self.healthy.unwrap_or(false) && self.is_logged_in.unwrap_or(false))
            || self.api_key_valid.unwrap_or(false)
    }
}

/// Failure record from one API call. Kept as data, never raised, so the rest
/// of the run can proceed with whatever was already fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiFailure {
    #[serde(rename = "error")]
    pub message: String,
    #[serde(rename = "status_code")]
    pub status: Option<u16>,
    #[serde(rename = "response_body")]
    pub body: Option<String>,
}

/// One search call either produced a payload or a recorded failure, never both.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SearchOutcome<T> {
    Success(T),
    Failure(ApiFailure),
}

impl<T> SearchOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, SearchOutcome::Success(_))
    }
}

/// Accumulated multi-page organization search. `complete` is false when a
/// page fetch failed and the already-fetched prefix was kept instead.
#[derive(Debug, Clone, Serialize)]
pub struct OrgSearchResults {
    pub organizations: Vec<Organization>,
    /// Vendor-reported total across all pages, from the first response.
    pub total_entries: Option<u64>,
    pub pages_fetched: u32,
    pub complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_key_valid_either_shape() {
        let master = HealthResponse {
            healthy: Some(true),
            is_logged_in: Some(true),
            api_key_valid: None,
        };
        assert!(master.key_valid());

        let api_only = HealthResponse {
            healthy: None,
            is_logged_in: None,
            api_key_valid: Some(true),
        };
        assert!(api_only.key_valid());

        let healthy_but_logged_out = HealthResponse {
            healthy: Some(true),
            is_logged_in: Some(false),
            api_key_valid: None,
        };
        assert!(!healthy_but_logged_out.key_valid());
    }

    #[test]
    fn test_failure_serializes_wire_keys() {
        let failure = ApiFailure {
            message: "people search returned 422".to_string(),
            status: Some(422),
            body: Some("{}".to_string()),
        };
        let value = serde_json::to_value(&failure).expect("serialize");
        assert_eq!(value["error"], "people search returned 422");
        assert_eq!(value["status_code"], 422);
        assert_eq!(value["response_body"], "{}");
    }

    #[test]
    fn test_outcome_serializes_untagged() {
        let outcome: SearchOutcome<PeopleSearchResponse> = SearchOutcome::Failure(ApiFailure {
            message: "timeout".to_string(),
            status: None,
            body: None,
        });
        let value = serde_json::to_value(&outcome).expect("serialize");
        assert_eq!(value["error"], "timeout");
        assert!(value.get("people").is_none());
    }
}
