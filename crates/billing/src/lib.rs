//! Billing core for AdHub — subscription fee pro-ration, ad-spend commission,
//! plan limits and recommendation, and statement generation.
//!
//! The fee functions in [`fees`] are pure and total: they never touch I/O and
//! they never error (unknown plans fail to zero). The [`statement`] engine is
//! the stateful layer on top, stored in DashMap (development); swap to
//! Postgres / Stripe for production.

pub mod fees;
pub mod plans;
pub mod statement;

pub use fees::{
    calculate_ad_spend_fee, calculate_potential_savings, calculate_subscription_fee,
    calculate_total_fees, calculate_upgrade_cost, check_topup_limit, cost_comparison,
    recommend_plan, subscription_limits, FeeBreakdown, PlanComparison, PlanRecommendation,
    SavingsBreakdown, UsageProfile,
};
pub use plans::{PlanConfig, PlanId, PlanLimits, PLANS, UNLIMITED};
pub use statement::{BillingStatement, StatementEngine, StatementLineItem};
