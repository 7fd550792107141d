//! Fee engine — pure, side-effect-free billing arithmetic over the static plan
//! table. No I/O, no stored state; every function is a total function of its
//! arguments.
//!
//! Failure policy: unknown or invalid plan identifiers never error, they
//! degrade to zero-valued results (0 fee, all-zero limits). Existing callers
//! rely on this exact behavior; use [`crate::plans::PlanId::parse`] when an
//! error is wanted instead.

use serde::{Deserialize, Serialize};

use crate::plans::{find_plan, PlanId, PlanLimits, PLANS, UNLIMITED};

/// Every pro-ration divides by a nominal 30-day month, regardless of the
/// actual calendar month length.
const NOMINAL_MONTH_DAYS: f64 = 30.0;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Combined fee figures for one plan over one billing period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub subscription_fee: f64,
    pub ad_spend_fee: f64,
    pub total_fee: f64,
}

/// Per-axis cost difference between two plans over a full month. A positive
/// `total_monthly_savings` means the target plan is cheaper overall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavingsBreakdown {
    pub subscription_difference: f64,
    pub ad_spend_fee_difference: f64,
    pub total_monthly_savings: f64,
}

/// Caller-supplied usage figures for plan recommendation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct UsageProfile {
    pub business_managers: i64,
    pub ad_accounts: i64,
    pub team_members: i64,
    pub monthly_ad_spend: f64,
    pub monthly_topup_amount: f64,
}

/// Result of [`recommend_plan`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRecommendation {
    pub recommended_plan: PlanId,
    pub reason: String,
    pub estimated_monthly_cost: f64,
}

/// One row of [`cost_comparison`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanComparison {
    pub plan: PlanId,
    pub subscription_fee: f64,
    pub ad_spend_fee: f64,
    pub total_fee: f64,
    pub limits: PlanLimits,
}

// ---------------------------------------------------------------------------
// Rounding
// ---------------------------------------------------------------------------

/// Round to 2 decimal places, half away from zero.
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Round to 4 decimal places. Ad-spend fees keep fractional cents so that
/// very small or very large spends don't lose precision before aggregation.
fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

// ---------------------------------------------------------------------------
// Fee calculations
// ---------------------------------------------------------------------------

/// Prorated subscription fee for `days_in_month` days, rounded to cents.
/// Unknown plan → 0. Pro-ration is linear against a 30-day month; 30 days
/// always yields the full `monthly_fee`.
pub fn calculate_subscription_fee(plan: &str, days_in_month: u32) -> f64 {
    match find_plan(plan) {
        Some(cfg) => {
            let daily_rate = cfg.monthly_fee / NOMINAL_MONTH_DAYS;
            round2(daily_rate * days_in_month as f64)
        }
        None => 0.0,
    }
}

/// Commission on ad spend at the plan's percentage, rounded to 4 decimals.
/// Unknown plan or non-positive spend → 0.
pub fn calculate_ad_spend_fee(ad_spend: f64, plan: &str) -> f64 {
    match find_plan(plan) {
        Some(cfg) if ad_spend > 0.0 => round4(ad_spend * cfg.ad_spend_fee_percent / 100.0),
        _ => 0.0,
    }
}

/// Subscription fee + ad-spend fee. The total is the exact sum of the two
/// already-rounded components; it is not rounded again.
pub fn calculate_total_fees(plan: &str, ad_spend: f64, days_in_month: u32) -> FeeBreakdown {
    let subscription_fee = calculate_subscription_fee(plan, days_in_month);
    let ad_spend_fee = calculate_ad_spend_fee(ad_spend, plan);
    FeeBreakdown {
        subscription_fee,
        ad_spend_fee,
        total_fee: subscription_fee + ad_spend_fee,
    }
}

/// Resource limits for a plan. Unknown plan → all zeros, which callers must
/// not confuse with the -1 unlimited sentinel.
pub fn subscription_limits(plan: &str) -> PlanLimits {
    match find_plan(plan) {
        Some(cfg) => cfg.limits,
        None => PlanLimits::ZERO,
    }
}

/// Prorated cost of moving from `current` to `target` for the remainder of
/// the period. Downgrades and no-op moves cost 0 — there is no refund path.
pub fn calculate_upgrade_cost(current: &str, target: &str, remaining_days: u32) -> f64 {
    let delta = calculate_subscription_fee(target, remaining_days)
        - calculate_subscription_fee(current, remaining_days);
    delta.max(0.0)
}

/// Full-month cost difference between two plans at a given spend level.
/// Positive `total_monthly_savings` means `target` is cheaper on net; the
/// individual differences may point in opposite directions.
pub fn calculate_potential_savings(
    current: &str,
    target: &str,
    monthly_ad_spend: f64,
) -> SavingsBreakdown {
    let subscription_difference =
        calculate_subscription_fee(target, 30) - calculate_subscription_fee(current, 30);
    let ad_spend_fee_difference = calculate_ad_spend_fee(monthly_ad_spend, target)
        - calculate_ad_spend_fee(monthly_ad_spend, current);

    SavingsBreakdown {
        subscription_difference,
        ad_spend_fee_difference,
        total_monthly_savings: -(subscription_difference + ad_spend_fee_difference),
    }
}

fn limit_covers(limit: i64, requested: i64) -> bool {
    limit == UNLIMITED || requested <= limit
}

/// Cheapest plan whose limits cover the given usage. Walks the tiers in
/// ascending order and returns the first fit; falls back to enterprise when
/// even the largest finite limits are exceeded. Greedy by table order, which
/// the plans module keeps sorted by capability.
pub fn recommend_plan(usage: &UsageProfile) -> PlanRecommendation {
    for cfg in PLANS {
        let fits = limit_covers(cfg.limits.business_managers, usage.business_managers)
            && limit_covers(cfg.limits.ad_accounts, usage.ad_accounts)
            && limit_covers(cfg.limits.team_members, usage.team_members)
            && (cfg.limits.monthly_topup_limit == UNLIMITED
                || usage.monthly_topup_amount <= cfg.limits.monthly_topup_limit as f64);

        if fits {
            return PlanRecommendation {
                recommended_plan: cfg.id,
                reason: format!("{} is the most affordable plan that covers your usage", cfg.id),
                estimated_monthly_cost: calculate_total_fees(
                    cfg.id.as_str(),
                    usage.monthly_ad_spend,
                    30,
                )
                .total_fee,
            };
        }
    }

    // Unreachable while enterprise stays all-unlimited, but the table should
    // not have to guarantee that.
    PlanRecommendation {
        recommended_plan: PlanId::Enterprise,
        reason: "your usage exceeds all standard plan limits".to_string(),
        estimated_monthly_cost: calculate_total_fees("enterprise", usage.monthly_ad_spend, 30)
            .total_fee,
    }
}

/// Full-month fee breakdown and limits for every tier at the given spend
/// level, in table declaration order. No filtering or sorting.
pub fn cost_comparison(monthly_ad_spend: f64) -> Vec<PlanComparison> {
    PLANS
        .iter()
        .map(|cfg| {
            let fees = calculate_total_fees(cfg.id.as_str(), monthly_ad_spend, 30);
            PlanComparison {
                plan: cfg.id,
                subscription_fee: fees.subscription_fee,
                ad_spend_fee: fees.ad_spend_fee,
                total_fee: fees.total_fee,
                limits: cfg.limits,
            }
        })
        .collect()
}

/// Whether a plan's monthly topup cap allows `proposed_monthly_total`.
/// Unlimited always passes; an unknown plan has a zero cap, so only a
/// non-positive total passes.
pub fn check_topup_limit(plan: &str, proposed_monthly_total: f64) -> bool {
    let limit = subscription_limits(plan).monthly_topup_limit;
    limit == UNLIMITED || proposed_monthly_total <= limit as f64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
