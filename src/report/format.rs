//! Formatted terminal output for a snapshot.
//!
//! We keep formatting code in one place so the pipeline stays free of
//! presentation details and output changes are localized.

use crate::domain::{IndicatorResult, Snapshot};

const RULE_WIDTH: usize = 50;

/// Format the run summary: header, composite risk, one line per indicator.
pub fn format_snapshot_summary(snapshot: &Snapshot) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&heavy);
    out.push('\n');
    out.push_str("한국 경제 위기 지수 - 데이터 수집\n");
    out.push_str(&heavy);
    out.push('\n');
    out.push_str(&format!(
        "실행 시간: {}\n\n",
        snapshot.updated_at.format("%Y-%m-%d %H:%M:%S")
    ));

    out.push_str(&format!(
        "종합 위험도: {} (score {:.2})\n",
        snapshot.overall_risk.text, snapshot.overall_risk.score
    ));
    out.push_str(&light);
    out.push('\n');

    for result in snapshot.indicators.values() {
        out.push_str(&format_indicator_line(result));
        out.push('\n');
    }

    out.push_str(&light);
    out.push('\n');
    out
}

/// `[XX] 환율 (USD/KRW): 1450원 [위험] (수동)`
pub fn format_indicator_line(result: &IndicatorResult) -> String {
    let mode = if result.manual { "(수동)" } else { "(자동)" };
    format!(
        "{} {}: {}{} [{}] {}",
        result.risk_class.marker(),
        result.config.name,
        fmt_value(result.value),
        result.config.unit,
        result.risk_text,
        mode
    )
}

fn fmt_value(v: f64) -> String {
    if v.is_finite() {
        format!("{v}")
    } else {
        "-".to_string()
    }
}
