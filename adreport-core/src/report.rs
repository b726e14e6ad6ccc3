//! Performance report view model
//!
//! Everything a presentation layer needs: scorecard, week trend, brand
//! breakdown, wins/alerts and SEM totals. Values are kept raw alongside the
//! formatted strings so renderers can choose either.

use serde::Serialize;
use std::collections::HashMap;

use crate::config::Thresholds;
use crate::insights::{Insights, generate_insights};
use crate::metrics::{
    AcosBand, Trend, classify_acos_with, fmt_count, fmt_dollar, fmt_pct, fmt_roas, wow_pct,
};
use crate::sem::SemData;
use crate::weekly::{BrandRecord, WeekRecord, WeeklyData};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceReport {
    pub scorecard: Vec<ScorecardMetric>,
    pub trend: Vec<TrendRow>,
    pub brands: Vec<BrandBreakdownRow>,
    pub insights: Insights,
    pub sem: SemData,
    pub weekly: WeeklyData,
}

/// One scorecard tile: current vs previous week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorecardMetric {
    pub label: &'static str,
    pub current: Option<f64>,
    pub previous: Option<f64>,
    pub current_display: String,
    pub previous_display: String,
    pub trend: Trend,
    /// ACoS band for the ACoS tile, `None` elsewhere
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<AcosBand>,
}

/// One week in the trend table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendRow {
    pub label: String,
    pub is_current: bool,
    pub is_previous: bool,
    pub sales: String,
    pub units: String,
    pub ad_spend: String,
    pub ad_sales: String,
    pub acos: String,
    pub acos_band: AcosBand,
    pub roas: String,
    pub organic_sales: String,
}

/// One brand in the current vs previous week breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandBreakdownRow {
    pub brand: String,
    pub current_sales: f64,
    pub previous_sales: f64,
    pub sales_wow: Option<f64>,
    pub units: f64,
    pub ad_spend: f64,
    pub ad_sales: f64,
    pub acos: Option<f64>,
    pub roas: Option<f64>,
    pub organic_sales: f64,
    pub acos_band: AcosBand,
    /// High ACoS or ad spend without sales
    pub flagged: bool,
}

impl PerformanceReport {
    pub fn build(weekly: WeeklyData, sem: SemData, thresholds: &Thresholds) -> Self {
        let current = weekly.current_week();
        let previous = weekly.previous_week();

        let scorecard = build_scorecard(current, previous, thresholds);
        let trend = weekly
            .weeks()
            .iter()
            .map(|w| trend_row(w, thresholds))
            .collect();
        let brands = build_brand_breakdown(&current.brands, &previous.brands, thresholds);
        let insights = generate_insights(&current.brands, &previous.brands, thresholds);

        Self {
            scorecard,
            trend,
            brands,
            insights,
            sem,
            weekly,
        }
    }
}

fn build_scorecard(
    curr: &WeekRecord,
    prev: &WeekRecord,
    thresholds: &Thresholds,
) -> Vec<ScorecardMetric> {
    let dollars = |label, c: f64, p: f64, inverted: bool| {
        let pct = wow_pct(c, p);
        ScorecardMetric {
            label,
            current: Some(c),
            previous: Some(p),
            current_display: fmt_dollar(c, 0),
            previous_display: fmt_dollar(p, 0),
            trend: if inverted {
                Trend::from_pct_inverted(pct)
            } else {
                Trend::from_pct(pct)
            },
            band: None,
        }
    };
    let count = |label, c: f64, p: f64| ScorecardMetric {
        label,
        current: Some(c),
        previous: Some(p),
        current_display: fmt_count(c),
        previous_display: fmt_count(p),
        trend: Trend::from_pct(wow_pct(c, p)),
        band: None,
    };

    vec![
        dollars("Total Sales", curr.sales, prev.sales, false),
        count("Total Orders", curr.ordered_items, prev.ordered_items),
        count("Units Sold", curr.units, prev.units),
        dollars("Ad Sales", curr.ad_sales, prev.ad_sales, false),
        dollars("Ad Spend", curr.ad_spend, prev.ad_spend, true),
        ScorecardMetric {
            label: "ACoS",
            current: curr.acos,
            previous: prev.acos,
            current_display: fmt_pct(curr.acos, 1),
            previous_display: fmt_pct(prev.acos, 1),
            trend: Trend::for_acos(curr.acos, prev.acos),
            band: Some(classify_acos_with(
                curr.acos,
                thresholds.acos_good,
                thresholds.acos_warning,
            )),
        },
        ScorecardMetric {
            label: "ROAS",
            current: curr.roas,
            previous: prev.roas,
            current_display: fmt_roas(curr.roas),
            previous_display: fmt_roas(prev.roas),
            trend: Trend::from_pct(wow_pct(
                curr.roas.unwrap_or(0.0),
                prev.roas.unwrap_or(0.0),
            )),
            band: None,
        },
        dollars("Organic Sales", curr.organic_sales, prev.organic_sales, false),
    ]
}

fn trend_row(week: &WeekRecord, thresholds: &Thresholds) -> TrendRow {
    TrendRow {
        label: week.label.clone(),
        is_current: week.is_current(),
        is_previous: week.is_previous(),
        sales: fmt_dollar(week.sales, 0),
        units: fmt_count(week.units),
        ad_spend: fmt_dollar(week.ad_spend, 0),
        ad_sales: fmt_dollar(week.ad_sales, 0),
        acos: fmt_pct(week.acos, 1),
        acos_band: classify_acos_with(week.acos, thresholds.acos_good, thresholds.acos_warning),
        roas: fmt_roas(week.roas),
        organic_sales: fmt_dollar(week.organic_sales, 0),
    }
}

/// Union of current and previous brands, sorted by current sales (descending)
fn build_brand_breakdown(
    current: &[BrandRecord],
    previous: &[BrandRecord],
    thresholds: &Thresholds,
) -> Vec<BrandBreakdownRow> {
    let current_by_name: HashMap<&str, &BrandRecord> =
        current.iter().map(|b| (b.brand.as_str(), b)).collect();
    let previous_by_name: HashMap<&str, &BrandRecord> =
        previous.iter().map(|b| (b.brand.as_str(), b)).collect();

    let mut names: Vec<&str> = Vec::new();
    for name in current.iter().chain(previous).map(|b| b.brand.as_str()) {
        if !names.contains(&name) {
            names.push(name);
        }
    }

    let mut rows: Vec<BrandBreakdownRow> = names
        .into_iter()
        .map(|name| {
            let curr = current_by_name.get(name).copied();
            let prev = previous_by_name.get(name).copied();
            let current_sales = curr.map_or(0.0, |b| b.sales);
            let previous_sales = prev.map_or(0.0, |b| b.sales);
            let ad_spend = curr.map_or(0.0, |b| b.ad_spend);
            let acos = curr.and_then(|b| b.acos);

            let high_acos = acos.is_some_and(|a| a > thresholds.alert_acos);
            let spend_without_sales = ad_spend > 0.0 && current_sales == 0.0;

            BrandBreakdownRow {
                brand: name.to_string(),
                current_sales,
                previous_sales,
                sales_wow: wow_pct(current_sales, previous_sales),
                units: curr.map_or(0.0, |b| b.units),
                ad_spend,
                ad_sales: curr.map_or(0.0, |b| b.ad_sales),
                acos,
                roas: curr.and_then(|b| b.roas),
                organic_sales: curr.map_or(0.0, |b| b.organic_sales),
                acos_band: classify_acos_with(acos, thresholds.acos_good, thresholds.acos_warning),
                flagged: high_acos || spend_without_sales,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.current_sales.total_cmp(&a.current_sales));
    rows
}
