//! Integration tests for the Apollo client against a mocked HTTP server.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use icp_prospector::apollo::ApolloClient;
use icp_prospector::icp::IcpConfig;
use icp_prospector::mapper::{self, OrgSearchParams, Tier};
use icp_prospector::models::{Organization, SearchOutcome};

fn client_for(server: &MockServer) -> ApolloClient {
    ApolloClient::new("test-key")
        .expect("client should build")
        .with_base_url(server.uri())
        .with_delays(Duration::ZERO, Duration::ZERO)
}

fn org_params() -> OrgSearchParams {
    mapper::org_search_params(&IcpConfig::default(), Tier::Premium)
}

fn org_page(names: &[&str], total_entries: u64, total_pages: u32) -> serde_json::Value {
    let organizations: Vec<serde_json::Value> = names
        .iter()
        .enumerate()
        .map(|(i, name)| json!({ "id": format!("org_{}", i), "name": name }))
        .collect();
    json!({
        "organizations": organizations,
        "pagination": {
            "page": 1,
            "per_page": 25,
            "total_entries": total_entries,
            "total_pages": total_pages,
        }
    })
}

#[tokio::test]
async fn health_check_accepts_api_key_only_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/health"))
        .and(header("X-Api-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "api_key_valid": true })))
        .expect(1)
        .mount(&server)
        .await;

    let healthy = client_for(&server)
        .check_health()
        .await
        .expect("health call");
    assert!(healthy);
}

#[tokio::test]
async fn org_search_stops_at_reported_page_count() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/organizations/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(org_page(&["Acme", "Globex"], 2, 1)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let results = client_for(&server)
        .search_organizations(&org_params(), 5)
        .await;

    assert!(results.complete);
    assert!(results.error.is_none());
    assert_eq!(results.pages_fetched, 1);
    assert_eq!(results.organizations.len(), 2);
    assert_eq!(results.total_entries, Some(2));
}

#[tokio::test]
async fn org_search_walks_pages_up_to_the_cap() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/organizations/search"))
        .and(body_partial_json(json!({ "page": 1 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(org_page(&["Acme"], 60, 3)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/organizations/search"))
        .and(body_partial_json(json!({ "page": 2 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(org_page(&["Globex"], 60, 3)))
        .expect(1)
        .mount(&server)
        .await;

    let results = client_for(&server)
        .search_organizations(&org_params(), 2)
        .await;

    assert!(results.complete);
    assert_eq!(results.pages_fetched, 2);
    assert_eq!(results.organizations.len(), 2);
    assert_eq!(results.total_entries, Some(60));
}

#[tokio::test]
async fn org_search_keeps_prefix_when_a_page_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/organizations/search"))
        .and(body_partial_json(json!({ "page": 1 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(org_page(&["Acme"], 60, 3)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/organizations/search"))
        .and(body_partial_json(json!({ "page": 2 })))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&server)
        .await;

    let results = client_for(&server)
        .search_organizations(&org_params(), 3)
        .await;

    assert!(!results.complete);
    assert_eq!(results.pages_fetched, 1);
    assert_eq!(results.organizations.len(), 1);
    let error = results.error.expect("failure should be recorded");
    assert_eq!(error.status, Some(500));
    assert_eq!(error.body.as_deref(), Some("internal error"));
}

#[tokio::test]
async fn people_search_returns_payload_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/people/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "people": [
                { "id": "p1", "name": "Dana", "title": "VP of Data" }
            ],
            "pagination": { "total_entries": 1, "total_pages": 1 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = mapper::people_search_params(&IcpConfig::default());
    let outcome = client_for(&server).search_people(&params).await;

    match outcome {
        SearchOutcome::Success(data) => {
            assert_eq!(data.people.len(), 1);
            assert_eq!(data.people[0].title.as_deref(), Some("VP of Data"));
        }
        SearchOutcome::Failure(failure) => panic!("unexpected failure: {}", failure.message),
    }
}

#[tokio::test]
async fn people_search_records_status_and_body_on_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/people/search"))
        .respond_with(ResponseTemplate::new(422).set_body_string("unprocessable"))
        .expect(1)
        .mount(&server)
        .await;

    let params = mapper::people_search_params(&IcpConfig::default());
    let outcome = client_for(&server).search_people(&params).await;

    match outcome {
        SearchOutcome::Success(_) => panic!("expected a recorded failure"),
        SearchOutcome::Failure(failure) => {
            assert_eq!(failure.status, Some(422));
            assert_eq!(failure.body.as_deref(), Some("unprocessable"));
        }
    }
}

#[tokio::test]
async fn forbidden_org_lookup_falls_back_to_contacts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/mixed_people/search"))
        .respond_with(ResponseTemplate::new(403).set_body_string("upgrade required"))
        .expect(1)
        .mount(&server)
        .await;
    // The fallback endpoint takes `titles`, not `person_titles`.
    Mock::given(method("POST"))
        .and(path("/contacts/search"))
        .and(body_partial_json(json!({
            "organization_ids": ["org_1"],
            "titles": ["CTO"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "contacts": [ { "id": "c1", "name": "Casey", "title": "CTO" } ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let people = client_for(&server)
        .people_for_organization("org_1", &["CTO".to_string()])
        .await;

    assert_eq!(people.len(), 1);
    assert_eq!(people[0].name.as_deref(), Some("Casey"));
}

#[tokio::test]
async fn org_lookup_swallows_non_forbidden_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/mixed_people/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .expect(1)
        .mount(&server)
        .await;

    let people = client_for(&server)
        .people_for_organization("org_1", &[])
        .await;
    assert!(people.is_empty());
}

#[tokio::test]
async fn enrichment_tags_people_and_honors_the_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/mixed_people/search"))
        .and(body_partial_json(json!({ "organization_ids": ["org_1"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "people": [ { "id": "p1", "name": "Dana", "title": "Head of Data" } ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let organizations = vec![
        Organization {
            id: Some("org_1".to_string()),
            name: Some("Acme".to_string()),
            industry: Some("software".to_string()),
            estimated_num_employees: Some(120),
            website_url: Some("https://acme.example".to_string()),
            ..Default::default()
        },
        Organization {
            id: Some("org_2".to_string()),
            name: Some("Globex".to_string()),
            ..Default::default()
        },
    ];

    let people = client_for(&server)
        .enrich_people_from_organizations(&organizations, &["Head of Data".to_string()], 1)
        .await;

    assert_eq!(people.len(), 1);
    let context = people[0]
        .organization_context
        .as_ref()
        .expect("person should carry its originating organization");
    assert_eq!(context.name.as_deref(), Some("Acme"));
    assert_eq!(context.employees, Some(120));
}

#[tokio::test]
async fn enrichment_skips_organizations_without_ids() {
    let server = MockServer::start().await;
    // No mocks mounted: any request would 404 and yield an empty page, but
    // an id-less organization must not produce a request at all.
    let organizations = vec![Organization {
        id: None,
        name: Some("Mystery Co".to_string()),
        ..Default::default()
    }];

    let people = client_for(&server)
        .enrich_people_from_organizations(&organizations, &[], 5)
        .await;
    assert!(people.is_empty());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
