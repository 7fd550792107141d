//! Static subscription plan table — one immutable config per tier, declared in
//! ascending price/capability order. This is config, not data: it is never
//! mutated at runtime and never persisted.

use serde::{Deserialize, Serialize};

use adhub_core::{BillingError, BillingResult};

/// Limit value meaning "no cap". Distinct from 0, which is what an unknown
/// plan resolves to.
pub const UNLIMITED: i64 = -1;

// ---------------------------------------------------------------------------
// Plan identifiers
// ---------------------------------------------------------------------------

/// The four subscription tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanId {
    Starter,
    Growth,
    Scale,
    Enterprise,
}

impl PlanId {
    /// Every tier, in ascending price/capability order. Plan recommendation
    /// walks this list front to back and returns the first fit, so the order
    /// here is load-bearing.
    pub const ALL: &'static [PlanId] = &[
        Self::Starter,
        Self::Growth,
        Self::Scale,
        Self::Enterprise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Starter => "starter",
            Self::Growth => "growth",
            Self::Scale => "scale",
            Self::Enterprise => "enterprise",
        }
    }

    /// Case-sensitive lookup. Any unrecognized string (empty included) is `None`.
    pub fn from_str(s: &str) -> Option<PlanId> {
        match s {
            "starter" => Some(Self::Starter),
            "growth" => Some(Self::Growth),
            "scale" => Some(Self::Scale),
            "enterprise" => Some(Self::Enterprise),
            _ => None,
        }
    }

    /// Strict variant of [`PlanId::from_str`] for callers that want the error
    /// instead of the fee engine's zero fallback.
    pub fn parse(s: &str) -> BillingResult<PlanId> {
        Self::from_str(s).ok_or_else(|| BillingError::UnknownPlan(s.to_string()))
    }

    /// Position in the ascending tier order.
    pub fn tier_index(&self) -> usize {
        Self::ALL.iter().position(|p| p == self).unwrap_or(0)
    }
}

impl std::fmt::Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Plan configuration
// ---------------------------------------------------------------------------

/// Resource limits attached to a plan. `-1` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanLimits {
    pub business_managers: i64,
    pub ad_accounts: i64,
    pub team_members: i64,
    pub monthly_topup_limit: i64,
}

impl PlanLimits {
    /// All-zero limits, returned for unknown plans. Note this is NOT the
    /// unlimited sentinel: 0 means "nothing allowed", -1 means "no cap".
    pub const ZERO: PlanLimits = PlanLimits {
        business_managers: 0,
        ad_accounts: 0,
        team_members: 0,
        monthly_topup_limit: 0,
    };
}

/// Pricing and limits for one subscription tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlanConfig {
    pub id: PlanId,
    /// Full-month subscription price.
    pub monthly_fee: f64,
    /// Commission percentage applied to ad spend (6.0 means 6%).
    pub ad_spend_fee_percent: f64,
    pub limits: PlanLimits,
}

/// The plan table. Order matches [`PlanId::ALL`].
pub const PLANS: &[PlanConfig] = &[
    PlanConfig {
        id: PlanId::Starter,
        monthly_fee: 29.0,
        ad_spend_fee_percent: 6.0,
        limits: PlanLimits {
            business_managers: 1,
            ad_accounts: 3,
            team_members: 2,
            monthly_topup_limit: 5_000,
        },
    },
    PlanConfig {
        id: PlanId::Growth,
        monthly_fee: 149.0,
        ad_spend_fee_percent: 3.0,
        limits: PlanLimits {
            business_managers: 3,
            ad_accounts: 10,
            team_members: 5,
            monthly_topup_limit: 25_000,
        },
    },
    PlanConfig {
        id: PlanId::Scale,
        monthly_fee: 499.0,
        ad_spend_fee_percent: 1.5,
        limits: PlanLimits {
            business_managers: 10,
            ad_accounts: 50,
            team_members: 15,
            monthly_topup_limit: 100_000,
        },
    },
    PlanConfig {
        id: PlanId::Enterprise,
        monthly_fee: 1499.0,
        ad_spend_fee_percent: 1.0,
        limits: PlanLimits {
            business_managers: UNLIMITED,
            ad_accounts: UNLIMITED,
            team_members: UNLIMITED,
            monthly_topup_limit: UNLIMITED,
        },
    },
];

/// Config for a typed plan id. Total: every `PlanId` has exactly one entry.
pub fn plan_config(id: PlanId) -> &'static PlanConfig {
    &PLANS[id.tier_index()]
}

/// Config for a string plan id; `None` for unknown identifiers. This is the
/// lookup every fee function goes through.
pub fn find_plan(plan: &str) -> Option<&'static PlanConfig> {
    PlanId::from_str(plan).map(plan_config)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
