//! Billing statement generation — renders an organization's monthly charges
//! (subscription pro-ration plus ad-spend commission) as line-itemed
//! statements. Statements are held in DashMap for development; swap to
//! Postgres for production.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use adhub_core::config::BillingConfig;
use adhub_core::BillingResult;

use crate::fees::calculate_total_fees;
use crate::plans::{plan_config, PlanId};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A single line item on a statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementLineItem {
    pub description: String,
    pub quantity: u64,
    pub unit_price: f64,
    pub amount: f64,
}

/// A monthly billing statement issued to an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingStatement {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub plan: PlanId,
    pub period: String,
    pub amount: f64,
    pub currency: String,
    pub line_items: Vec<StatementLineItem>,
    pub issued_at: DateTime<Utc>,
    pub due_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// In-memory statement store keyed by organization.
pub struct StatementEngine {
    config: BillingConfig,
    statements: Arc<DashMap<Uuid, Vec<BillingStatement>>>,
}

impl StatementEngine {
    pub fn new(config: BillingConfig) -> Self {
        info!(currency = %config.currency, "StatementEngine initialized");
        Self {
            config,
            statements: Arc::new(DashMap::new()),
        }
    }

    /// Generate and store a statement for one organization and period.
    ///
    /// Unlike the fee functions this is strict about the plan identifier: a
    /// persisted statement for a typo'd plan would silently bill zero, so an
    /// unknown plan is an error here.
    pub fn generate_statement(
        &self,
        organization_id: Uuid,
        plan: &str,
        ad_spend: f64,
        days_in_month: u32,
        period: &str,
    ) -> BillingResult<BillingStatement> {
        let plan_id = PlanId::parse(plan)?;
        let cfg = plan_config(plan_id);
        let fees = calculate_total_fees(plan, ad_spend, days_in_month);

        let mut line_items = vec![StatementLineItem {
            description: format!("{} plan subscription ({days_in_month} days)", plan_id),
            quantity: 1,
            unit_price: fees.subscription_fee,
            amount: fees.subscription_fee,
        }];
        if fees.ad_spend_fee > 0.0 {
            line_items.push(StatementLineItem {
                description: format!(
                    "Ad spend commission ({}% of {:.2})",
                    cfg.ad_spend_fee_percent, ad_spend
                ),
                quantity: 1,
                unit_price: fees.ad_spend_fee,
                amount: fees.ad_spend_fee,
            });
        }

        let now = Utc::now();
        let statement = BillingStatement {
            id: Uuid::new_v4(),
            organization_id,
            plan: plan_id,
            period: period.to_string(),
            amount: fees.total_fee,
            currency: self.config.currency.clone(),
            line_items,
            issued_at: now,
            due_at: now + Duration::days(self.config.statement_due_days),
        };

        self.statements
            .entry(organization_id)
            .or_default()
            .push(statement.clone());

        info!(
            org = %organization_id,
            plan = %plan_id,
            period,
            amount = statement.amount,
            "Statement generated"
        );
        Ok(statement)
    }

    /// All statements issued to an organization, oldest first.
    pub fn list_statements(&self, organization_id: Uuid) -> Vec<BillingStatement> {
        self.statements
            .get(&organization_id)
            .map(|s| s.value().clone())
            .unwrap_or_default()
    }
}

impl Default for StatementEngine {
    fn default() -> Self {
        Self::new(BillingConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use adhub_core::BillingError;

    #[test]
    fn test_generate_statement() {
        let engine = StatementEngine::default();
        let org = Uuid::new_v4();

        let statement = engine
            .generate_statement(org, "scale", 10_000.0, 30, "2026-08")
            .unwrap();

        assert_eq!(statement.organization_id, org);
        assert_eq!(statement.plan, PlanId::Scale);
        assert_eq!(statement.currency, "USD");
        // 499 subscription + 1.5% of 10 000.
        assert_eq!(statement.amount, 499.0 + 150.0);
        assert_eq!(statement.line_items.len(), 2);
        assert_eq!(statement.line_items[0].amount, 499.0);
        assert_eq!(statement.line_items[1].amount, 150.0);

        let listed = engine.list_statements(org);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, statement.id);
    }

    #[test]
    fn test_zero_spend_omits_commission_line() {
        let engine = StatementEngine::default();
        let statement = engine
            .generate_statement(Uuid::new_v4(), "starter", 0.0, 30, "2026-08")
            .unwrap();

        assert_eq!(statement.line_items.len(), 1);
        assert_eq!(statement.amount, 29.0);
    }

    #[test]
    fn test_unknown_plan_is_an_error() {
        let engine = StatementEngine::default();
        let err = engine
            .generate_statement(Uuid::new_v4(), "invalid", 100.0, 30, "2026-08")
            .unwrap_err();
        assert!(matches!(err, BillingError::UnknownPlan(_)));
    }

    #[test]
    fn test_statement_serializes_with_snake_case_plan() {
        let engine = StatementEngine::default();
        let statement = engine
            .generate_statement(Uuid::new_v4(), "enterprise", 0.0, 30, "2026-08")
            .unwrap();

        let json = serde_json::to_value(&statement).unwrap();
        assert_eq!(json["plan"], "enterprise");
        assert_eq!(json["currency"], "USD");
        assert_eq!(json["period"], "2026-08");
    }

    #[test]
    fn test_list_is_empty_for_unbilled_org() {
        let engine = StatementEngine::default();
        assert!(engine.list_statements(Uuid::new_v4()).is_empty());
    }
}
