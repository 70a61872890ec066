//! Console presentation and JSON persistence for search results.
//!
//! Console output is bounded to the first 10 records per section; the JSON
//! files on disk carry the full, unbounded payloads.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::icp::IcpConfig;
use crate::mapper::OrgSearchParams;
use crate::models::{OrgSearchResults, PeopleSearchResponse, Person, SearchOutcome};

const DISPLAY_LIMIT: usize = 10;

const SEPARATOR: &str =
    "======================================================================";

pub fn print_icp_summary(config: &IcpConfig) {
    println!("{}", SEPARATOR);
    println!("ICP-BASED APOLLO SEARCH");
    println!("{}", SEPARATOR);
    println!();
    println!("Loaded ICP configuration:");
    match serde_json::to_string_pretty(config) {
        Ok(json) => println!("{}", json),
        Err(_) => println!("{:?}", config),
    }
}

/// Echo the filters being applied plus the exact vendor parameter payload.
pub fn print_org_filters(config: &IcpConfig, params: &OrgSearchParams) {
    let icp = &config.icp;
    let signals = &config.signals;

    println!();
    println!("=== Step 1: Organization Search ===");
    println!("Filters applied:");
    println!("  Geography: {:?}", icp.geography);
    println!(
        "  Employee count: {}+",
        icp.employee_count_min
            .map(|n| n.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    );
    println!("  Industry: {:?}", icp.industry);
    println!("  Keywords: {:?}", icp.keywords);
    println!("  Tech stack: {:?}", signals.tech_stack);
    println!("  Funding: {}", signals.funding);
    if let (Some(min), Some(max)) = (params.revenue_min, params.revenue_max) {
        // Revenue is a display-only criterion; see mapper::OrgSearchParams.
        println!("  Revenue: ${} - ${}", min, max);
    }
    println!();
    println!("Apollo API parameters:");
    match serde_json::to_string_pretty(params) {
        Ok(json) => println!("{}", json),
        Err(_) => println!("{:?}", params),
    }
}

pub fn print_organizations(results: &OrgSearchResults) {
    let total = results
        .total_entries
        .unwrap_or(results.organizations.len() as u64);

    println!();
    println!(
        "=== Organizations Found: {} total | showing {} ===",
        total,
        results.organizations.len().min(DISPLAY_LIMIT)
    );
    if let Some(error) = &results.error {
        println!("  ✗ search ended early: {}", error.message);
    }
    println!();

    for (i, org) in results.organizations.iter().take(DISPLAY_LIMIT).enumerate() {
        println!("{}. {}", i + 1, org.name.as_deref().unwrap_or("N/A"));
        println!("   Industry: {}", org.industry.as_deref().unwrap_or("N/A"));
        println!(
            "   Employees: {}",
            org.estimated_num_employees
                .map(|n| n.to_string())
                .unwrap_or_else(|| "N/A".to_string())
        );
        if let Some(revenue) = org.estimated_annual_revenue {
            println!("   Revenue: ${}", revenue);
        }
        println!(
            "   Location: {}, {}, {}",
            org.city.as_deref().unwrap_or("N/A"),
            org.state.as_deref().unwrap_or("N/A"),
            org.country.as_deref().unwrap_or("N/A")
        );
        println!("   Website: {}", org.website_url.as_deref().unwrap_or("N/A"));
        if !org.technologies.is_empty() {
            let names: Vec<&str> = org
                .technologies
                .iter()
                .take(5)
                .filter_map(|t| t.name.as_deref())
                .collect();
            println!("   Tech stack: {}", names.join(", "));
        }
        if let Some(stage) = &org.latest_funding_stage {
            println!("   Funding stage: {}", stage);
        }
        println!();
    }

    if results.organizations.len() > DISPLAY_LIMIT {
        println!(
            "   ... and {} more (see JSON output)",
            results.organizations.len() - DISPLAY_LIMIT
        );
    }
}

pub fn print_people_search(outcome: &SearchOutcome<PeopleSearchResponse>) {
    println!();
    println!("=== Step 2: People Search ===");

    match outcome {
        SearchOutcome::Failure(failure) => {
            println!("  ✗ People search failed: {}", failure.message);
            if let Some(body) = &failure.body {
                println!("  Response: {}", body);
            }
        }
        SearchOutcome::Success(data) => {
            let total = data
                .pagination
                .as_ref()
                .and_then(|p| p.total_entries)
                .unwrap_or(data.people.len() as u64);
            println!(
                "People found: {} total | showing {}",
                total,
                data.people.len().min(DISPLAY_LIMIT)
            );
            println!();
            for (i, person) in data.people.iter().take(DISPLAY_LIMIT).enumerate() {
                print_person(i + 1, person);
            }
        }
    }
}

pub fn print_people(people: &[Person]) {
    println!();
    println!("=== People From Matched Organizations: {} ===", people.len());
    if people.is_empty() {
        println!("  No people found.");
        return;
    }
    println!();

    for (i, person) in people.iter().take(DISPLAY_LIMIT).enumerate() {
        print_person(i + 1, person);
    }
    if people.len() > DISPLAY_LIMIT {
        println!(
            "   ... and {} more (see JSON output)",
            people.len() - DISPLAY_LIMIT
        );
    }
}

fn print_person(index: usize, person: &Person) {
    println!("{}. {}", index, person.name.as_deref().unwrap_or("N/A"));
    println!("   Title: {}", person.title.as_deref().unwrap_or("N/A"));

    let company = person
        .organization_context
        .as_ref()
        .and_then(|c| c.name.as_deref())
        .or(person.organization_name.as_deref())
        .unwrap_or("N/A");
    println!("   Company: {}", company);

    if let Some(org) = &person.organization {
        if let Some(employees) = org.estimated_num_employees {
            println!("   Company size: {} employees", employees);
        }
        if let Some(industry) = &org.industry {
            println!("   Company industry: {}", industry);
        }
    }
    println!("   Email: {}", person.email.as_deref().unwrap_or("N/A"));
    if let Some(phone) = person.phone_numbers.first() {
        println!("   Phone: {}", phone);
    }
    println!(
        "   LinkedIn: {}",
        person.linkedin_url.as_deref().unwrap_or("N/A")
    );
    println!();
}

pub fn print_run_summary(config: &IcpConfig, orgs: &OrgSearchResults, people_found: usize) {
    let icp = &config.icp;
    let signals = &config.signals;

    println!();
    println!("{}", SEPARATOR);
    println!("SEARCH SUMMARY");
    println!("{}", SEPARATOR);
    println!(
        "Organizations matching the ICP: {}",
        orgs.total_entries.unwrap_or(orgs.organizations.len() as u64)
    );
    println!("Decision makers found: {}", people_found);
    if !orgs.complete {
        println!("  ⚠ organization search ended early; results are partial");
    }
    println!();
    println!("ICP criteria applied:");
    println!(
        "  Revenue: ${} - ${}",
        icp.revenue_min.as_deref().unwrap_or("N/A"),
        icp.revenue_max.as_deref().unwrap_or("N/A")
    );
    println!("  Geography: {}", icp.geography.join(", "));
    println!(
        "  Employee count: {}+",
        icp.employee_count_min
            .map(|n| n.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    );
    println!("  Industries: {}", icp.industry.join(", "));
    println!("  Keywords: {}", icp.keywords.join(", "));
    println!("  Tech stack: {}", signals.tech_stack.join(", "));
    println!("  Funded: {}", signals.funding);
    println!("  Hiring data roles: {}", signals.hiring_data_roles);
    println!();
    println!(
        "Run completed {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("{}", SEPARATOR);
}

/// Persist the full payload as pretty-printed JSON.
pub fn save_json<T: Serialize>(path: &Path, payload: &T) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(file, payload)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Organization;

    #[test]
    fn test_save_json_writes_full_payload() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.json");

        let orgs: Vec<Organization> = (0..25)
            .map(|i| Organization {
                id: Some(format!("org_{}", i)),
                name: Some(format!("Org {}", i)),
                ..Default::default()
            })
            .collect();
        save_json(&path, &orgs).expect("save");

        let raw = std::fs::read_to_string(&path).expect("read back");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("parse");
        assert_eq!(value.as_array().map(|a| a.len()), Some(25));
    }
}
