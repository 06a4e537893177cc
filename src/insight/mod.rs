//! AI insight boundary: the snapshot sent out and the lenient parse of
//! what comes back.
//!
//! The provider is a remote large-language-model call with no retry
//! policy; a failure is surfaced as an error state the user re-triggers by
//! hand. Responses are nominally JSON but arrive with varying amounts of
//! prose and fencing around them, so parsing tries progressively looser
//! extractions and finally falls back to a textual report. It never fails.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::metrics::economics::{BreakevenSummary, UnitEconomics};
use crate::model::value::DocValue;

/// The serialized state handed to the insight provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightSnapshot {
    pub costs: DocValue,
    pub metrics: UnitEconomics,
    pub breakeven: BreakevenSummary,
    pub scenario_name: String,
    pub timestamp: DateTime<Utc>,
}

impl InsightSnapshot {
    pub fn new(
        scenario_name: impl Into<String>,
        costs: DocValue,
        metrics: UnitEconomics,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            costs,
            breakeven: metrics.breakeven,
            metrics,
            scenario_name: scenario_name.into(),
            timestamp,
        }
    }
}

/// The AI analysis collaborator. Returns the model's raw text; parsing is
/// the caller's concern via [`parse_insight_response`].
pub trait InsightProvider {
    fn request_insights(&self, snapshot: &InsightSnapshot) -> Result<String>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub impact: String,
    #[serde(default)]
    pub priority: String,
}

/// Narrative analysis of a scenario.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub summary: String,
}

/// Parse a provider response. Tries a fenced code block, the whole text,
/// then the outermost brace span; if nothing parses as JSON the raw text
/// becomes a textual report, with bullet lines promoted to insights.
pub fn parse_insight_response(raw: &str) -> InsightReport {
    let candidates = [
        fenced_block(raw),
        Some(raw.trim().to_string()),
        brace_span(raw),
    ];
    for candidate in candidates.into_iter().flatten() {
        if let Ok(report) = serde_json::from_str::<InsightReport>(&candidate) {
            return report;
        }
    }
    textual_fallback(raw)
}

fn fenced_block(raw: &str) -> Option<String> {
    let start = raw.find("```")?;
    let after_fence = &raw[start + 3..];
    // skip the language tag line, if any
    let body_start = after_fence.find('\n')? + 1;
    let body = &after_fence[body_start..];
    let end = body.find("```")?;
    Some(body[..end].trim().to_string())
}

fn brace_span(raw: &str) -> Option<String> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| raw[start..=end].to_string())
}

fn textual_fallback(raw: &str) -> InsightReport {
    let insights: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter_map(|line| {
            line.strip_prefix("- ")
                .or_else(|| line.strip_prefix("* "))
                .or_else(|| line.strip_prefix("• "))
        })
        .map(str::to_string)
        .collect();
    InsightReport {
        insights,
        recommendations: Vec::new(),
        summary: raw.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_strict_json() {
        let raw = r#"{"insights": ["Burn is personnel-heavy"], "recommendations": [{"category": "personnel", "action": "Delay the second hire", "impact": "-8000/mo", "priority": "high"}], "summary": "Healthy unit economics."}"#;
        let report = parse_insight_response(raw);
        assert_eq!(report.insights.len(), 1);
        assert_eq!(report.recommendations[0].action, "Delay the second hire");
        assert_eq!(report.summary, "Healthy unit economics.");
    }

    #[test]
    fn parses_fenced_json_with_surrounding_prose() {
        let raw = indoc! {r#"
            Here is the analysis you asked for:

            ```json
            {"insights": ["CAC is trending up"], "summary": "Watch acquisition costs."}
            ```

            Let me know if you need more detail.
        "#};
        let report = parse_insight_response(raw);
        assert_eq!(report.insights, vec!["CAC is trending up".to_string()]);
        assert_eq!(report.summary, "Watch acquisition costs.");
    }

    #[test]
    fn parses_bare_json_embedded_in_text() {
        let raw = r#"Sure! {"summary": "Breakeven in reach", "insights": []} Hope that helps."#;
        let report = parse_insight_response(raw);
        assert_eq!(report.summary, "Breakeven in reach");
    }

    #[test]
    fn falls_back_to_textual_report() {
        let raw = indoc! {"
            The scenario looks sustainable.
            - Marketing spend is efficient
            - Runway is fixed at 18 months
        "};
        let report = parse_insight_response(raw);
        assert_eq!(report.insights.len(), 2);
        assert_eq!(report.insights[0], "Marketing spend is efficient");
        assert!(report.summary.contains("sustainable"));
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let report = parse_insight_response(r#"{"summary": "ok"}"#);
        assert_eq!(report.summary, "ok");
        assert!(report.insights.is_empty());
    }
}
