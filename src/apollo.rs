//! Apollo.io REST API client.
//!
//! One client instance per run, carrying the credential in a default header
//! map. Per-request failures are converted into result values so the workflow
//! continues with partial data; nothing here retries.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::mapper::{OrgSearchParams, PeopleSearchParams};
use crate::models::{
    ApiFailure, ContactsResponse, HealthResponse, OrgSearchResponse, OrgSearchResults,
    Organization, OrganizationContext, PeopleSearchResponse, Person, SearchOutcome,
};

const APOLLO_API_BASE: &str = "https://api.apollo.io/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Page size for per-organization people lookups.
const PEOPLE_PER_ORG: u32 = 10;

pub struct ApolloClient {
    client: Client,
    base_url: String,
    page_delay: Duration,
    enrich_delay: Duration,
}

impl ApolloClient {
    pub fn new(api_key: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(
            "X-Api-Key",
            api_key.parse().context("Invalid Apollo api key")?,
        );

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()
            .context("Failed to build ApolloClient")?;

        Ok(Self {
            client,
            base_url: APOLLO_API_BASE.to_string(),
            page_delay: Duration::from_millis(1000),
            enrich_delay: Duration::from_millis(500),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the self-throttle delays between paginated calls and between
    /// per-organization lookups.
    pub fn with_delays(mut self, page_delay: Duration, enrich_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self.enrich_delay = enrich_delay;
        self
    }

    #[inline]
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET /auth/health. Returns whether the configured key is usable.
    pub async fn check_health(&self) -> Result<bool> {
        let resp = self
            .client
            .get(self.url("/auth/health"))
            .send()
            .await
            .context("GET /auth/health failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("GET /auth/health {}: {}", status, text));
        }

        let health = resp
            .json::<HealthResponse>()
            .await
            .context("Failed to parse health response")?;
        Ok(health.key_valid())
    }

    /// POST /organizations/search, one page at a time starting from page 1.
    ///
    /// Pagination stops at the vendor-reported total page count or at
    /// `max_pages`, whichever comes first. A failed page aborts pagination and
    /// returns the accumulated prefix with `complete: false` and the failure
    /// recorded - partial results over hard failure.
    pub async fn search_organizations(
        &self,
        params: &OrgSearchParams,
        max_pages: u32,
    ) -> OrgSearchResults {
        let url = self.url("/organizations/search");
        let max_pages = max_pages.max(1);
        let mut request = params.clone();
        let mut results = OrgSearchResults {
            organizations: Vec::new(),
            total_entries: None,
            pages_fetched: 0,
            complete: false,
            error: None,
        };

        for page in 1..=max_pages {
            request.page = page;
            debug!("Fetching organizations page {}", page);

            let resp = match self.client.post(&url).json(&request).send().await {
                Ok(resp) => resp,
                Err(e) => {
                    warn!("Organization search network error on page {}: {}", page, e);
                    results.error = Some(ApiFailure {
                        message: e.to_string(),
                        status: None,
                        body: None,
                    });
                    return results;
                }
            };

            if resp.status() != StatusCode::OK {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                warn!("Organization search page {} returned {}: {}", page, status, body);
                results.error = Some(ApiFailure {
                    message: format!("organization search returned {}", status),
                    status: Some(status.as_u16()),
                    body: Some(body),
                });
                return results;
            }

            let data = match resp.json::<OrgSearchResponse>().await {
                Ok(data) => data,
                Err(e) => {
                    warn!("Failed to parse organizations page {}: {}", page, e);
                    results.error = Some(ApiFailure {
                        message: format!("failed to parse organization response: {}", e),
                        status: Some(200),
                        body: None,
                    });
                    return results;
                }
            };

            info!("Page {}: {} organizations", page, data.organizations.len());
            results.organizations.extend(data.organizations);
            results.pages_fetched = page;

            let pagination = data.pagination.unwrap_or_default();
            if results.total_entries.is_none() {
                results.total_entries = pagination.total_entries;
            }

            if page >= pagination.total_pages.unwrap_or(1) || page >= max_pages {
                break;
            }

            sleep(self.page_delay).await;
        }

        results.complete = true;
        results
    }

    /// POST /people/search. Single page; any failure becomes a recorded
    /// outcome carrying status and body where available.
    pub async fn search_people(
        &self,
        params: &PeopleSearchParams,
    ) -> SearchOutcome<PeopleSearchResponse> {
        let url = self.url("/people/search");

        let resp = match self.client.post(&url).json(params).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!("People search network error: {}", e);
                return SearchOutcome::Failure(ApiFailure {
                    message: e.to_string(),
                    status: None,
                    body: None,
                });
            }
        };

        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            warn!("People search returned {}: {}", status, body);
            return SearchOutcome::Failure(ApiFailure {
                message: format!("people search returned {}", status),
                status: Some(status.as_u16()),
                body: Some(body),
            });
        }

        match resp.json::<PeopleSearchResponse>().await {
            Ok(data) => SearchOutcome::Success(data),
            Err(e) => SearchOutcome::Failure(ApiFailure {
                message: format!("failed to parse people response: {}", e),
                status: Some(status.as_u16()),
                body: None,
            }),
        }
    }

    /// POST /mixed_people/search for one organization. A 403 falls back to
    /// the contacts endpoint exactly once; any other failure yields an empty
    /// list with a warning.
    pub async fn people_for_organization(&self, org_id: &str, titles: &[String]) -> Vec<Person> {
        let url = self.url("/mixed_people/search");
        let params = PeopleByOrgParams {
            organization_ids: vec![org_id.to_string()],
            page: 1,
            per_page: PEOPLE_PER_ORG,
            person_titles: titles.to_vec(),
        };

        let resp = match self.client.post(&url).json(&params).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!("People lookup failed for organization {}: {}", org_id, e);
                return Vec::new();
            }
        };

        match resp.status() {
            StatusCode::OK => match resp.json::<PeopleSearchResponse>().await {
                Ok(data) => data.people,
                Err(e) => {
                    warn!("Failed to parse people for organization {}: {}", org_id, e);
                    Vec::new()
                }
            },
            StatusCode::FORBIDDEN => {
                debug!(
                    "mixed_people denied for organization {}, trying contacts endpoint",
                    org_id
                );
                self.contacts_for_organization(org_id, titles).await
            }
            status => {
                warn!("Could not fetch people for organization {}: {}", org_id, status);
                Vec::new()
            }
        }
    }

    /// Fallback for plans without mixed_people access. Same filters, but the
    /// body key is `titles` and the response key is `contacts`.
    async fn contacts_for_organization(&self, org_id: &str, titles: &[String]) -> Vec<Person> {
        let url = self.url("/contacts/search");
        let params = ContactSearchParams {
            organization_ids: vec![org_id.to_string()],
            page: 1,
            per_page: PEOPLE_PER_ORG,
            titles: titles.to_vec(),
        };

        let resp = match self.client.post(&url).json(&params).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!("Contacts lookup failed for organization {}: {}", org_id, e);
                return Vec::new();
            }
        };

        if resp.status() != StatusCode::OK {
            return Vec::new();
        }

        resp.json::<ContactsResponse>()
            .await
            .map(|data| data.contacts)
            .unwrap_or_default()
    }

    /// Step 2 of the workflow: pull people out of the first `limit` matched
    /// organizations, tagging each person with its originating organization.
    pub async fn enrich_people_from_organizations(
        &self,
        organizations: &[Organization],
        titles: &[String],
        limit: usize,
    ) -> Vec<Person> {
        let mut all_people = Vec::new();

        for (i, org) in organizations.iter().take(limit).enumerate() {
            let Some(org_id) = org.id.as_deref() else {
                warn!("Skipping organization without id: {:?}", org.name);
                continue;
            };
            let org_name = org.name.as_deref().unwrap_or("Unknown");
            info!("{}. Fetching people from: {}", i + 1, org_name);

            let mut people = self.people_for_organization(org_id, titles).await;
            if people.is_empty() {
                info!("  No people found for {}", org_name);
            } else {
                info!("  Found {} people", people.len());
                let context = OrganizationContext {
                    id: org.id.clone(),
                    name: org.name.clone(),
                    industry: org.industry.clone(),
                    employees: org.estimated_num_employees,
                    website: org.website_url.clone(),
                };
                for person in &mut people {
                    person.organization_context = Some(context.clone());
                }
                all_people.append(&mut people);
            }

            sleep(self.enrich_delay).await;
        }

        all_people
    }
}

#[derive(Debug, Clone, Serialize)]
struct PeopleByOrgParams {
    organization_ids: Vec<String>,
    page: u32,
    per_page: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    person_titles: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
struct ContactSearchParams {
    organization_ids: Vec<String>,
    page: u32,
    per_page: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    titles: Vec<String>,
}
