//! Output formatters for the performance report

use adreport_core::metrics::{
    AcosBand, Trend, fmt_count, fmt_dollar, fmt_pct, fmt_roas, round_half_up,
};
use adreport_core::report::{BrandBreakdownRow, ScorecardMetric};
use adreport_core::{Insight, Insights, PerformanceReport, SemWeek};
use anyhow::Result;
use colored::*;
use std::path::Path;

/// Print the full report with colors
pub fn print_human(file_path: &Path, report: &PerformanceReport) {
    println!("{}", "Weekly Performance Report".bold());
    println!("{}", format!("Source: {}", file_path.display()).bright_black());
    println!();

    println!("{}", "Scorecard: current vs previous week".bold().underline());
    for metric in &report.scorecard {
        print_metric(metric);
    }
    println!();

    println!("{}", "Weekly trend".bold().underline());
    println!(
        "  {:<20} {:>12} {:>8} {:>10} {:>10} {:>8} {:>7} {:>12}",
        "Week", "Sales", "Units", "Ad Spend", "Ad Sales", "ACoS", "ROAS", "Organic"
    );
    for row in &report.trend {
        let label = if row.is_current {
            format!("▶ {}", row.label).cyan().bold()
        } else if row.is_previous {
            row.label.bold()
        } else {
            row.label.normal()
        };
        println!(
            "  {:<20} {:>12} {:>8} {:>10} {:>10} {:>8} {:>7} {:>12}",
            label,
            row.sales,
            row.units,
            row.ad_spend,
            row.ad_sales,
            color_band(&row.acos, row.acos_band),
            row.roas,
            row.organic_sales
        );
    }
    println!();

    println!("{}", "Brand breakdown".bold().underline());
    println!(
        "  {:<24} {:>10} {:>10} {:>8} {:>6} {:>9} {:>9} {:>7} {:>7} {:>10}",
        "Brand", "Curr", "Prev", "WoW", "Units", "Ad Spend", "Ad Sales", "ACoS", "ROAS", "Organic"
    );
    for row in &report.brands {
        print_brand(row);
    }
    println!();

    print_insights(&report.insights);
    println!();

    println!("{}", "SEM campaigns".bold().underline());
    print_sem_week("Current week", &report.sem.current_week);
    print_sem_week("Previous week", &report.sem.previous_week);
}

fn print_metric(metric: &ScorecardMetric) {
    let value = match metric.band {
        Some(band) => color_band(&metric.current_display, band),
        None => metric.current_display.bold(),
    };
    println!(
        "  {:<14} {:>12}  {}  {}",
        metric.label,
        value,
        color_trend(&metric.trend),
        format!("prev {}", metric.previous_display).bright_black()
    );
}

fn print_brand(row: &BrandBreakdownRow) {
    let name = if row.flagged {
        format!("⚠ {}", row.brand).yellow()
    } else {
        row.brand.normal()
    };
    let wow = match row.sales_wow {
        None => "—".bright_black(),
        Some(p) if p >= 0.0 => format!("↑ {:.0}%", round_half_up(p * 100.0, 0)).green(),
        Some(p) => format!("↓ {:.0}%", round_half_up((p * 100.0).abs(), 0)).red(),
    };
    let ad_sales = if row.ad_sales != 0.0 {
        fmt_dollar(row.ad_sales, 0)
    } else {
        "—".to_string()
    };
    let acos = match row.acos {
        Some(a) if a > 0.0 => fmt_pct(Some(a), 1),
        _ => "—".to_string(),
    };

    println!(
        "  {:<24} {:>10} {:>10} {:>8} {:>6} {:>9} {:>9} {:>7} {:>7} {:>10}",
        name,
        fmt_dollar(row.current_sales, 0),
        fmt_dollar(row.previous_sales, 0).bright_black(),
        wow,
        fmt_count(row.units),
        fmt_dollar(row.ad_spend, 0),
        ad_sales,
        color_band(&acos, row.acos_band),
        fmt_roas(row.roas),
        fmt_dollar(row.organic_sales, 0)
    );
}

/// Print wins and alerts
pub fn print_insights(insights: &Insights) {
    println!("{}", "Wins this week".green().bold());
    if insights.wins.is_empty() {
        println!("  {}", "No wins detected this week.".bright_black());
    }
    for win in &insights.wins {
        print_insight(win, "●".green());
    }

    println!("{}", "Watch / action required".red().bold());
    if insights.alerts.is_empty() {
        println!("  {}", "No alerts detected this week.".bright_black());
    }
    for alert in &insights.alerts {
        print_insight(alert, "●".red());
    }
}

fn print_insight(insight: &Insight, bullet: ColoredString) {
    println!("  {} {} — {}", bullet, insight.brand.bold(), insight.message);
}

fn print_sem_week(title: &str, week: &SemWeek) {
    if week.is_empty() {
        println!("  {}: {}", title.bold(), "no data".bright_black());
        return;
    }
    println!(
        "  {}: spend {}, sales {}, ACoS {}, ROAS {}, impressions {}",
        title.bold(),
        fmt_dollar(week.ad_spend, 0),
        fmt_dollar(week.ad_sales, 0),
        fmt_pct(week.acos, 1),
        fmt_roas(week.roas),
        fmt_count(week.impressions)
    );
    for campaign in &week.campaigns {
        println!(
            "    {:<40} {:>9} {:>9} {:>7}",
            campaign.display_name,
            fmt_dollar(campaign.ad_spend, 0),
            fmt_dollar(campaign.ad_sales, 0),
            fmt_pct(campaign.acos, 1)
        );
    }
}

fn color_band(text: &str, band: AcosBand) -> ColoredString {
    match band {
        AcosBand::Good => text.green(),
        AcosBand::Warning => text.yellow(),
        AcosBand::Critical => text.red(),
        AcosBand::Unknown => text.bright_black(),
    }
}

fn color_trend(trend: &Trend) -> ColoredString {
    let text = format!("{} {} WoW", trend.arrow(), trend.label);
    if trend.pct.is_none() {
        text.bright_black()
    } else if trend.favorable {
        text.green()
    } else {
        text.red()
    }
}

/// Print the report in JSON format
pub fn print_json(file_path: &Path, report: &PerformanceReport, alerts_only: bool) -> Result<()> {
    let output = if alerts_only {
        serde_json::json!({
            "file": file_path.display().to_string(),
            "insights": report.insights,
        })
    } else {
        serde_json::json!({
            "file": file_path.display().to_string(),
            "report": report,
            "summary": {
                "weeks": report.weekly.weeks().len(),
                "brands": report.brands.len(),
                "wins": report.insights.wins.len(),
                "alerts": report.insights.alerts.len(),
            }
        })
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
