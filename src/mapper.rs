//! ICP → Apollo query-parameter mapping.
//!
//! Pure functions: a loaded `IcpConfig` goes in, a vendor parameter set comes
//! out. Nothing here touches the network. The same mapping serves both plan
//! tiers; the free tier simply restricts which filters are emitted.

use clap::ValueEnum;
use serde::Serialize;

use crate::icp::{IcpConfig, Signals};

/// Fixed vendor vocabulary for employee-count range filters, ordered by lower bound.
pub const EMPLOYEE_RANGES: [&str; 11] = [
    "1,10", "11,20", "21,50", "51,100", "101,200", "201,500", "501,1000", "1001,2000", "2001,5000",
    "5001,10000", "10001+",
];

/// Funding stages accepted by the organization search filter.
const ORG_FUNDING_STAGES: [&str; 7] = [
    "seed", "series_a", "series_b", "series_c", "series_d", "series_e", "series_f",
];

/// Funding stages accepted by the people search filter (no series_f).
const PEOPLE_FUNDING_STAGES: [&str; 6] = [
    "seed", "series_a", "series_b", "series_c", "series_d", "series_e",
];

/// Data/analytics leadership titles targeted when `hiring_data_roles` is set.
pub const DATA_LEADERSHIP_TITLES: [&str; 8] = [
    "Chief Data Officer",
    "VP of Data",
    "Head of Data",
    "Director of Data",
    "Data Science Manager",
    "VP of Analytics",
    "Head of Analytics",
    "Chief Analytics Officer",
];

/// Broader leadership list used when pulling people out of matched organizations.
pub const ENRICHMENT_TITLES: [&str; 9] = [
    "Chief Data Officer",
    "VP of Data",
    "Head of Data",
    "Director of Data",
    "VP of Analytics",
    "Head of Analytics",
    "Chief Analytics Officer",
    "VP of Engineering",
    "CTO",
];

/// Apollo plan tier. The free tier only honors keyword and location filters,
/// so the mapper drops everything else to avoid paying for ignored parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Tier {
    Premium,
    Free,
}

impl Tier {
    pub fn per_page(self) -> u32 {
        match self {
            Tier::Premium => 25,
            Tier::Free => 10,
        }
    }
}

/// Organization-search parameter set. Serializes to the vendor's POST body;
/// empty filters are omitted entirely.
#[derive(Debug, Clone, Serialize)]
pub struct OrgSearchParams {
    pub page: u32,
    pub per_page: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub organization_locations: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub organization_num_employees_ranges: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub q_organization_keyword_tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub organization_technology_slugs: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub funding_stage_list: Vec<String>,

    /// Parsed revenue bounds. Surfaced in summaries but never sent to the
    /// vendor: not all plans expose a revenue filter, so employee count acts
    /// as the size proxy instead.
    #[serde(skip)]
    pub revenue_min: Option<u64>,
    #[serde(skip)]
    pub revenue_max: Option<u64>,
}

/// People-search parameter set (premium capability).
#[derive(Debug, Clone, Serialize)]
pub struct PeopleSearchParams {
    pub page: u32,
    pub per_page: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub person_locations: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub organization_num_employees_ranges: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q_keywords: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub organization_industry_keyword_tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub organization_technology_slugs: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub person_titles: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub organization_latest_funding_stage_cd: Vec<String>,
}

/// Rewrite "USA"/"US" (case-insensitive) to the vendor's canonical
/// "United States"; every other region passes through unchanged.
pub fn normalize_locations(geography: &[String]) -> Vec<String> {
    geography
        .iter()
        .map(|geo| {
            if geo.eq_ignore_ascii_case("usa") || geo.eq_ignore_ascii_case("us") {
                "United States".to_string()
            } else {
                geo.clone()
            }
        })
        .collect()
}

/// Select the contiguous tail of `EMPLOYEE_RANGES` starting at the first
/// bucket whose lower bound is >= the requested minimum.
pub fn employee_ranges(min: u32) -> Vec<String> {
    let start = match min {
        0..=10 => 0,
        11..=20 => 1,
        21..=50 => 2,
        51..=100 => 3,
        101..=200 => 4,
        201..=500 => 5,
        _ => 6,
    };
    EMPLOYEE_RANGES[start..].iter().map(|s| s.to_string()).collect()
}

/// Parse a human revenue string: commas stripped, case-insensitive K/M/B
/// suffix multipliers, plain numbers passed through. Empty or unparseable
/// input yields `None`.
pub fn parse_revenue(raw: &str) -> Option<u64> {
    let cleaned = raw.trim().replace(',', "").to_ascii_uppercase();
    if cleaned.is_empty() {
        return None;
    }

    let (digits, multiplier) = if let Some(stripped) = cleaned.strip_suffix('B') {
        (stripped, 1_000_000_000f64)
    } else if let Some(stripped) = cleaned.strip_suffix('M') {
        (stripped, 1_000_000f64)
    } else if let Some(stripped) = cleaned.strip_suffix('K') {
        (stripped, 1_000f64)
    } else {
        (cleaned.as_str(), 1f64)
    };

    digits.parse::<f64>().ok().map(|value| (value * multiplier) as u64)
}

/// Map the ICP onto the organization-search body.
pub fn org_search_params(config: &IcpConfig, tier: Tier) -> OrgSearchParams {
    let icp = &config.icp;
    let signals = &config.signals;

    let mut params = OrgSearchParams {
        page: 1,
        per_page: tier.per_page(),
        organization_locations: Vec::new(),
        organization_num_employees_ranges: Vec::new(),
        q_organization_keyword_tags: Vec::new(),
        organization_technology_slugs: Vec::new(),
        funding_stage_list: Vec::new(),
        revenue_min: None,
        revenue_max: None,
    };

    if !icp.geography.is_empty() {
        params.organization_locations = normalize_locations(&icp.geography);
    }

    // Industry and free-form keywords share one tag filter, industry first.
    let mut tags = icp.industry.clone();
    tags.extend(icp.keywords.iter().cloned());
    params.q_organization_keyword_tags = tags;

    if tier == Tier::Free {
        return params;
    }

    if let Some(min) = icp.employee_count_min {
        params.organization_num_employees_ranges = employee_ranges(min);
    }

    if !signals.tech_stack.is_empty() {
        params.organization_technology_slugs = signals.tech_stack.clone();
    }

    if signals.funding {
        params.funding_stage_list = ORG_FUNDING_STAGES.iter().map(|s| s.to_string()).collect();
    }

    if icp.revenue_min.is_some() || icp.revenue_max.is_some() {
        params.revenue_min = parse_revenue(icp.revenue_min.as_deref().unwrap_or("0"));
        params.revenue_max = parse_revenue(icp.revenue_max.as_deref().unwrap_or("10B"));
    }

    params
}

/// Map the ICP onto the people-search body. Geography targets the person's
/// own location here, and keywords collapse into one space-separated query.
pub fn people_search_params(config: &IcpConfig) -> PeopleSearchParams {
    let icp = &config.icp;
    let signals = &config.signals;

    let mut params = PeopleSearchParams {
        page: 1,
        per_page: Tier::Premium.per_page(),
        person_locations: Vec::new(),
        organization_num_employees_ranges: Vec::new(),
        q_keywords: None,
        organization_industry_keyword_tags: Vec::new(),
        organization_technology_slugs: Vec::new(),
        person_titles: Vec::new(),
        organization_latest_funding_stage_cd: Vec::new(),
    };

    if !icp.geography.is_empty() {
        params.person_locations = normalize_locations(&icp.geography);
    }

    if let Some(min) = icp.employee_count_min {
        params.organization_num_employees_ranges = employee_ranges(min);
    }

    if !icp.keywords.is_empty() {
        params.q_keywords = Some(icp.keywords.join(" "));
    }

    if !icp.industry.is_empty() {
        params.organization_industry_keyword_tags = icp.industry.clone();
    }

    if !signals.tech_stack.is_empty() {
        params.organization_technology_slugs = signals.tech_stack.clone();
    }

    if signals.hiring_data_roles {
        params.person_titles = DATA_LEADERSHIP_TITLES.iter().map(|s| s.to_string()).collect();
    }

    if signals.funding {
        params.organization_latest_funding_stage_cd =
            PEOPLE_FUNDING_STAGES.iter().map(|s| s.to_string()).collect();
    }

    params
}

/// Job titles to target during per-organization enrichment.
pub fn enrichment_titles(signals: &Signals) -> Vec<String> {
    if signals.hiring_data_roles {
        ENRICHMENT_TITLES.iter().map(|s| s.to_string()).collect()
    } else {
        Vec::new()
    }
}
