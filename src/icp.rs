//! ICP (Ideal Customer Profile) configuration model.
//!
//! Loaded once per run from a YAML document with top-level `ICP` and `Signals`
//! blocks. Every field is optional; an absent field simply drops the
//! corresponding search filter.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IcpConfig {
    #[serde(rename = "ICP", default)]
    pub icp: IcpProfile,
    #[serde(rename = "Signals", default)]
    pub signals: Signals,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IcpProfile {
    /// Target regions; "USA"/"US" are normalized to "United States" by the mapper.
    #[serde(default)]
    pub geography: Vec<String>,

    /// Minimum company size; expanded into vendor employee-count buckets.
    #[serde(default)]
    pub employee_count_min: Option<u32>,

    #[serde(default)]
    pub industry: Vec<String>,

    #[serde(default)]
    pub keywords: Vec<String>,

    /// Human-readable revenue bounds, e.g. "500K", "10M", "2B".
    #[serde(default)]
    pub revenue_min: Option<String>,
    #[serde(default)]
    pub revenue_max: Option<String>,
}

/// Buying-intent signals layered on top of the firmographic profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Signals {
    #[serde(default)]
    pub tech_stack: Vec<String>,

    /// Restrict to companies with institutional funding (seed through late series).
    #[serde(default)]
    pub funding: bool,

    /// Target data/analytics leadership titles when searching for people.
    #[serde(default)]
    pub hiring_data_roles: bool,
}
