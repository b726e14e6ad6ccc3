//! Wins and alerts generated from current vs previous week brand figures

use serde::Serialize;
use std::collections::HashMap;

use crate::config::Thresholds;
use crate::metrics::{fmt_dollar, fmt_roas, round_half_up, wow_pct};
use crate::weekly::BrandRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Win,
    Alert,
}

/// Rule that produced an insight, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightRule {
    SalesGrowth,
    EfficientAcos,
    HighAcos,
    SalesDecline,
    SpendWithoutSales,
}

impl InsightRule {
    pub fn kind(self) -> InsightKind {
        match self {
            InsightRule::SalesGrowth | InsightRule::EfficientAcos => InsightKind::Win,
            InsightRule::HighAcos | InsightRule::SalesDecline | InsightRule::SpendWithoutSales => {
                InsightKind::Alert
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub brand: String,
    pub rule: InsightRule,
    pub message: String,
}

impl Insight {
    fn new(brand: &str, rule: InsightRule, message: String) -> Self {
        Self {
            brand: brand.to_string(),
            rule,
            message,
        }
    }

    pub fn kind(&self) -> InsightKind {
        self.rule.kind()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Insights {
    pub wins: Vec<Insight>,
    pub alerts: Vec<Insight>,
}

impl Insights {
    pub fn is_empty(&self) -> bool {
        self.wins.is_empty() && self.alerts.is_empty()
    }
}

/// Evaluate every rule for each current brand, in brand order.
///
/// A brand missing from the previous week is compared against zero sales,
/// which leaves its week-over-week change undefined.
pub fn generate_insights(
    current: &[BrandRecord],
    previous: &[BrandRecord],
    thresholds: &Thresholds,
) -> Insights {
    let previous_by_name: HashMap<&str, &BrandRecord> =
        previous.iter().map(|b| (b.brand.as_str(), b)).collect();

    let mut insights = Insights::default();
    for brand in current {
        let prev_sales = previous_by_name
            .get(brand.brand.as_str())
            .map_or(0.0, |b| b.sales);

        for insight in evaluate_brand(brand, prev_sales, thresholds) {
            match insight.kind() {
                InsightKind::Win => insights.wins.push(insight),
                InsightKind::Alert => insights.alerts.push(insight),
            }
        }
    }

    tracing::debug!(
        wins = insights.wins.len(),
        alerts = insights.alerts.len(),
        "generated insights"
    );
    insights
}

fn evaluate_brand(brand: &BrandRecord, prev_sales: f64, t: &Thresholds) -> Vec<Insight> {
    let name = brand.brand.as_str();
    let sales_wow = wow_pct(brand.sales, prev_sales);
    let mut out = Vec::new();

    if let Some(wow) = sales_wow.filter(|w| *w > t.win_sales_growth) {
        out.push(Insight::new(
            name,
            InsightRule::SalesGrowth,
            format!(
                "Sales up {:.0}% WoW ({} → {})",
                round_half_up(wow * 100.0, 0),
                fmt_dollar(prev_sales, 0),
                fmt_dollar(brand.sales, 0)
            ),
        ));
    }

    if let Some(acos) = brand.acos.filter(|a| *a > 0.0 && *a < t.win_acos) {
        out.push(Insight::new(
            name,
            InsightRule::EfficientAcos,
            format!(
                "Efficient ACoS of {:.1}% — ROAS {}",
                round_half_up(acos * 100.0, 1),
                fmt_roas(brand.roas)
            ),
        ));
    }

    if let Some(acos) = brand.acos.filter(|a| *a > t.alert_acos) {
        out.push(Insight::new(
            name,
            InsightRule::HighAcos,
            format!("ACoS at {:.0}% — review bids", round_half_up(acos * 100.0, 0)),
        ));
    }

    if let Some(wow) = sales_wow.filter(|w| *w < t.alert_sales_decline) {
        out.push(Insight::new(
            name,
            InsightRule::SalesDecline,
            format!(
                "Sales down {:.0}% WoW ({} → {}) — investigate",
                round_half_up((wow * 100.0).abs(), 0),
                fmt_dollar(prev_sales, 0),
                fmt_dollar(brand.sales, 0)
            ),
        ));
    }

    if brand.ad_spend > 0.0 && brand.sales == 0.0 {
        out.push(Insight::new(
            name,
            InsightRule::SpendWithoutSales,
            format!(
                "{} ad spend with $0 sales — pause or review campaigns",
                fmt_dollar(brand.ad_spend, 0)
            ),
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brand(name: &str, sales: f64, ad_spend: f64, acos: Option<f64>) -> BrandRecord {
        BrandRecord {
            brand: name.to_string(),
            sales,
            units: 0.0,
            ordered_items: 0.0,
            ad_spend,
            ad_unit_sales: 0.0,
            ad_sales: 0.0,
            acos,
            roas: acos.filter(|a| *a > 0.0).map(|a| 1.0 / a),
            organic_sales: 0.0,
        }
    }

    fn run(current: &[BrandRecord], previous: &[BrandRecord]) -> Insights {
        generate_insights(current, previous, &Thresholds::default())
    }

    #[test]
    fn test_sales_growth_win() {
        let insights = run(
            &[brand("Acme", 130.0, 0.0, None)],
            &[brand("Acme", 100.0, 0.0, None)],
        );

        assert_eq!(insights.wins.len(), 1);
        assert!(insights.alerts.is_empty());
        assert_eq!(insights.wins[0].rule, InsightRule::SalesGrowth);
        assert_eq!(insights.wins[0].message, "Sales up 30% WoW ($100 → $130)");
    }

    #[test]
    fn test_growth_percentage_rounds_half_up() {
        let insights = run(
            &[brand("Acme", 1625.0, 0.0, None)],
            &[brand("Acme", 1000.0, 0.0, None)],
        );

        assert_eq!(insights.wins[0].message, "Sales up 63% WoW ($1,000 → $1,625)");
    }

    #[test]
    fn test_growth_at_threshold_is_not_a_win() {
        let insights = run(
            &[brand("Acme", 120.0, 0.0, None)],
            &[brand("Acme", 100.0, 0.0, None)],
        );
        assert!(insights.is_empty());
    }

    #[test]
    fn test_efficient_acos_win() {
        let insights = run(&[brand("Acme", 100.0, 20.0, Some(0.20))], &[brand("Acme", 100.0, 20.0, None)]);

        assert_eq!(insights.wins.len(), 1);
        assert_eq!(insights.wins[0].rule, InsightRule::EfficientAcos);
        assert_eq!(insights.wins[0].message, "Efficient ACoS of 20.0% — ROAS 5.00x");
    }

    #[test]
    fn test_zero_acos_is_not_a_win() {
        let insights = run(&[brand("Acme", 100.0, 0.0, Some(0.0))], &[brand("Acme", 100.0, 0.0, None)]);
        assert!(insights.is_empty());
    }

    #[test]
    fn test_high_acos_alert() {
        let insights = run(&[brand("Acme", 100.0, 75.0, Some(0.75))], &[brand("Acme", 100.0, 0.0, None)]);

        assert!(insights.wins.is_empty());
        assert_eq!(insights.alerts.len(), 1);
        assert_eq!(insights.alerts[0].message, "ACoS at 75% — review bids");
    }

    #[test]
    fn test_sales_decline_alert() {
        let insights = run(
            &[brand("Acme", 600.0, 0.0, None)],
            &[brand("Acme", 1000.0, 0.0, None)],
        );

        assert_eq!(insights.alerts.len(), 1);
        assert_eq!(
            insights.alerts[0].message,
            "Sales down 40% WoW ($1,000 → $600) — investigate"
        );
    }

    #[test]
    fn test_spend_without_sales_alert() {
        let insights = run(&[brand("Acme", 0.0, 45.0, None)], &[]);

        assert_eq!(insights.alerts.len(), 1);
        assert_eq!(insights.alerts[0].rule, InsightRule::SpendWithoutSales);
        assert_eq!(
            insights.alerts[0].message,
            "$45 ad spend with $0 sales — pause or review campaigns"
        );
    }

    #[test]
    fn test_missing_previous_brand_has_no_wow_rules() {
        let insights = run(&[brand("NewBrand", 5000.0, 0.0, None)], &[brand("Other", 10.0, 0.0, None)]);
        assert!(insights.is_empty());
    }

    #[test]
    fn test_multiple_rules_fire_in_order() {
        let current = [
            brand("Acme", 0.0, 80.0, Some(0.9)),
            brand("Globex", 200.0, 10.0, Some(0.1)),
        ];
        let previous = [brand("Acme", 500.0, 0.0, None), brand("Globex", 100.0, 0.0, None)];

        let insights = run(&current, &previous);

        let alert_rules: Vec<_> = insights.alerts.iter().map(|i| (i.brand.as_str(), i.rule)).collect();
        assert_eq!(
            alert_rules,
            vec![
                ("Acme", InsightRule::HighAcos),
                ("Acme", InsightRule::SalesDecline),
                ("Acme", InsightRule::SpendWithoutSales),
            ]
        );
        let win_rules: Vec<_> = insights.wins.iter().map(|i| (i.brand.as_str(), i.rule)).collect();
        assert_eq!(
            win_rules,
            vec![
                ("Globex", InsightRule::SalesGrowth),
                ("Globex", InsightRule::EfficientAcos),
            ]
        );
    }
}
