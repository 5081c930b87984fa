//! Per-field failure policy.
//!
//! Each result-record field is fetched independently. When its fetch or parse
//! fails, the field's policy decides whether the failure becomes an empty
//! value (`BestEffort`) or aborts the whole request (`Required`).
//!
//! The default table keeps the storefront homepage fields (brand name, social
//! handles, important links) and the contact page required: if those cannot
//! be read the site is treated as inaccessible.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    BrandName,
    Products,
    HeroProducts,
    PrivacyPolicy,
    ReturnRefundPolicy,
    Faqs,
    SocialHandles,
    ContactDetails,
    About,
    ImportantLinks,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::BrandName,
        Field::Products,
        Field::HeroProducts,
        Field::PrivacyPolicy,
        Field::ReturnRefundPolicy,
        Field::Faqs,
        Field::SocialHandles,
        Field::ContactDetails,
        Field::About,
        Field::ImportantLinks,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Field::BrandName => "brand_name",
            Field::Products => "products",
            Field::HeroProducts => "hero_products",
            Field::PrivacyPolicy => "privacy_policy",
            Field::ReturnRefundPolicy => "return_refund_policy",
            Field::Faqs => "faqs",
            Field::SocialHandles => "social_handles",
            Field::ContactDetails => "contact_details",
            Field::About => "about",
            Field::ImportantLinks => "important_links",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("unknown field \"{s}\""))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Failure yields the field's empty value; the request continues.
    BestEffort,
    /// Failure aborts the whole request.
    Required,
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailurePolicy::BestEffort => write!(f, "best_effort"),
            FailurePolicy::Required => write!(f, "required"),
        }
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "best_effort" => Ok(FailurePolicy::BestEffort),
            "required" => Ok(FailurePolicy::Required),
            other => Err(format!(
                "unknown failure policy \"{other}\" (expected best_effort or required)"
            )),
        }
    }
}

/// Failure policy for every result-record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailurePolicies {
    policies: BTreeMap<Field, FailurePolicy>,
}

impl Default for FailurePolicies {
    fn default() -> Self {
        let policies = Field::ALL
            .into_iter()
            .map(|field| (field, default_policy(field)))
            .collect();
        Self { policies }
    }
}

impl FailurePolicies {
    /// Default table with `overrides` applied on top.
    ///
    /// `overrides` is a comma-separated list of `field=policy` pairs, e.g.
    /// `"social_handles=best_effort,faqs=required"`. Blank input yields the
    /// default table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] (attributed to `var`) for a
    /// malformed pair, an unknown field, or an unknown policy.
    pub fn with_overrides(var: &str, overrides: &str) -> Result<Self, ConfigError> {
        let mut policies = Self::default();
        let invalid = |reason: String| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason,
        };

        for pair in overrides.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (field, policy) = pair
                .split_once('=')
                .ok_or_else(|| invalid(format!("expected field=policy, got \"{pair}\"")))?;
            let field = field.trim().parse::<Field>().map_err(&invalid)?;
            let policy = policy.trim().parse::<FailurePolicy>().map_err(&invalid)?;
            policies.set(field, policy);
        }

        Ok(policies)
    }

    #[must_use]
    pub fn for_field(&self, field: Field) -> FailurePolicy {
        self.policies
            .get(&field)
            .copied()
            .unwrap_or_else(|| default_policy(field))
    }

    pub fn set(&mut self, field: Field, policy: FailurePolicy) {
        self.policies.insert(field, policy);
    }

    /// Iterates fields in declaration order with their effective policy.
    pub fn iter(&self) -> impl Iterator<Item = (Field, FailurePolicy)> + '_ {
        self.policies.iter().map(|(field, policy)| (*field, *policy))
    }
}

fn default_policy(field: Field) -> FailurePolicy {
    match field {
        Field::BrandName
        | Field::SocialHandles
        | Field::ContactDetails
        | Field::ImportantLinks => FailurePolicy::Required,
        Field::Products
        | Field::HeroProducts
        | Field::PrivacyPolicy
        | Field::ReturnRefundPolicy
        | Field::Faqs
        | Field::About => FailurePolicy::BestEffort,
    }
}
