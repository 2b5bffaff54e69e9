//! Plain-text renderings for the non-interactive commands

use budgetboard_core::{Gauge, GaugeStatus, Snapshot};
use budgetboard_finance::MonthlySummary;

pub fn summary_table(summary: &MonthlySummary) -> String {
    let mut out = format!(
        "{:<8} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}\n",
        "Month", "Income", "Needs", "Wants", "Other", "Expenses", "Savings"
    );
    for r in summary.rows() {
        out.push_str(&format!(
            "{:<8} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2}\n",
            r.month.to_string(),
            r.income,
            r.needs,
            r.wants,
            r.other,
            r.total_expenses,
            r.savings
        ));
    }
    out
}

pub fn snapshot_text(snap: &Snapshot) -> String {
    let mut out = format!("{}\n", snap.title);
    out.push_str(&format!("Income: ${:.2}\n\n", snap.plan.income));
    for g in snap.gauges() {
        out.push_str(&gauge_line(g));
        out.push('\n');
    }
    out
}

fn gauge_line(g: &Gauge) -> String {
    let flag = match g.status {
        GaugeStatus::Good => "ok",
        GaugeStatus::Warning => "OVER",
    };
    // Savings can go negative; show the raw figure next to the floored one
    let value = if g.value < 0.0 {
        format!("${:.2} (raw ${:.2})", g.display_value, g.value)
    } else {
        format!("${:.2}", g.display_value)
    };
    format!("- {:<22} {} / ${:.2} [{}]", g.title, value, g.limit, flag)
}
