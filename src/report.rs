//! Analysis Result Model
//!
//! The backend stores each report as a JSON string. The client parses it
//! defensively: a payload that is not a JSON object becomes
//! [`AnalysisResult::Unparseable`], and any individual field that is absent
//! or of an unexpected type is simply not displayed.

use serde::Serialize;
use serde_json::{Map, Value};

/// Outcome of parsing a stored `resultJson` string
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisResult {
    Report(Box<GhostingReport>),
    Unparseable,
}

impl AnalysisResult {
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => AnalysisResult::Report(Box::new(GhostingReport::from_map(map))),
            Ok(_) => {
                tracing::debug!("Result payload is valid JSON but not an object");
                AnalysisResult::Unparseable
            }
            Err(e) => {
                tracing::debug!(error = %e, "Result payload is not valid JSON");
                AnalysisResult::Unparseable
            }
        }
    }

    /// The report to display, if there is one
    pub fn report(&self) -> Option<&GhostingReport> {
        match self {
            AnalysisResult::Report(report) => Some(report),
            AnalysisResult::Unparseable => None,
        }
    }
}

/// A rejection reason ranked by the backend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectionReason {
    pub reason: String,
    /// 0.0 - 1.0
    pub confidence: Option<f64>,
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.confidence {
            Some(c) => write!(f, "{} ({}%)", self.reason, percent(c)),
            None => write!(f, "{}", self.reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fix {
    pub area: String,
    pub action: String,
}

impl std::fmt::Display for Fix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.area, self.action)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewriteSuggestion {
    pub original: String,
    pub improved: String,
}

impl std::fmt::Display for RewriteSuggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.original, self.improved)
    }
}

/// Parsed report fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GhostingReport {
    /// 0.0 - 1.0
    pub ghosting_probability: Option<f64>,
    pub match_score: Option<f64>,
    pub ats_readability_score: Option<f64>,
    pub role_guess: Option<String>,
    pub seniority_guess: Option<String>,
    pub missing_skills: Vec<String>,
    pub top_rejection_reasons: Vec<RejectionReason>,
    pub fixes: Vec<Fix>,
    pub rewrite_suggestions: Vec<RewriteSuggestion>,
    /// The full payload, including fields the client does not model
    #[serde(skip)]
    pub raw: Map<String, Value>,
}

impl GhostingReport {
    fn from_map(map: Map<String, Value>) -> Self {
        Self {
            ghosting_probability: number(&map, "ghosting_probability"),
            match_score: number(&map, "match_score"),
            ats_readability_score: number(&map, "ats_readability_score"),
            role_guess: text(&map, "role_guess"),
            seniority_guess: text(&map, "seniority_guess"),
            missing_skills: list(&map, "missing_skills", |v| v.as_str().map(str::to_string)),
            top_rejection_reasons: list(&map, "top_rejection_reasons", |v| {
                Some(RejectionReason {
                    reason: v.get("reason")?.as_str()?.to_string(),
                    confidence: v.get("confidence").and_then(Value::as_f64),
                })
            }),
            fixes: list(&map, "fixes", |v| {
                Some(Fix {
                    area: v.get("area").and_then(Value::as_str).unwrap_or_default().to_string(),
                    action: v.get("action")?.as_str()?.to_string(),
                })
            }),
            rewrite_suggestions: list(&map, "rewrite_suggestions", |v| {
                Some(RewriteSuggestion {
                    original: v.get("original")?.as_str()?.to_string(),
                    improved: v.get("improved")?.as_str()?.to_string(),
                })
            }),
            raw: map,
        }
    }

    /// Ghosting probability as a rounded percentage
    pub fn ghosting_percent(&self) -> Option<u32> {
        self.ghosting_probability.map(percent)
    }

    /// Any field of the payload by name
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.raw.get(key)
    }
}

/// Render a 0-1 ratio as a whole percentage
pub fn percent(ratio: f64) -> u32 {
    (ratio.clamp(0.0, 1.0) * 100.0).round() as u32
}

/// Render a score without a trailing `.0`
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{}", score as i64)
    } else {
        format!("{:.1}", score)
    }
}

fn number(map: &Map<String, Value>, key: &str) -> Option<f64> {
    map.get(key).and_then(Value::as_f64)
}

fn text(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn list<T>(map: &Map<String, Value>, key: &str, item: impl Fn(&Value) -> Option<T>) -> Vec<T> {
    map.get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(&item).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "ghosting_probability": 0.72,
        "match_score": 64,
        "ats_readability_score": 81,
        "seniority_guess": "MID",
        "role_guess": "Backend Engineer",
        "top_rejection_reasons": [
            {"reason": "Missing Kubernetes experience", "confidence": 0.8},
            {"reason": "No metrics in bullet points"}
        ],
        "missing_skills": ["kubernetes", "kafka"],
        "fixes": [{"area": "Experience", "action": "Quantify impact"}],
        "rewrite_suggestions": [{"original": "Worked on APIs", "improved": "Built 12 REST APIs"}]
    }"#;

    #[test]
    fn test_parse_full_report() {
        let result = AnalysisResult::parse(FULL);
        let report = result.report().unwrap();

        assert_eq!(report.ghosting_percent(), Some(72));
        assert_eq!(report.match_score, Some(64.0));
        assert_eq!(report.ats_readability_score, Some(81.0));
        assert_eq!(report.role_guess.as_deref(), Some("Backend Engineer"));
        assert_eq!(report.seniority_guess.as_deref(), Some("MID"));
        assert_eq!(report.missing_skills, vec!["kubernetes", "kafka"]);
        assert_eq!(
            report.top_rejection_reasons[0].to_string(),
            "Missing Kubernetes experience (80%)"
        );
        assert_eq!(
            report.top_rejection_reasons[1].to_string(),
            "No metrics in bullet points"
        );
        assert_eq!(report.fixes[0].to_string(), "Experience: Quantify impact");
        assert_eq!(
            report.rewrite_suggestions[0].to_string(),
            "Worked on APIs → Built 12 REST APIs"
        );
    }

    #[test]
    fn test_single_field_report() {
        let result = AnalysisResult::parse(r#"{"match_score":80}"#);
        let report = result.report().unwrap();
        assert_eq!(report.match_score, Some(80.0));
        assert_eq!(report.ghosting_probability, None);
        assert!(report.missing_skills.is_empty());
        assert_eq!(report.field("match_score"), Some(&serde_json::json!(80)));
    }

    #[test]
    fn test_malformed_json_is_unparseable() {
        assert_eq!(AnalysisResult::parse("not json"), AnalysisResult::Unparseable);
        assert_eq!(AnalysisResult::parse(""), AnalysisResult::Unparseable);
        assert!(AnalysisResult::parse("{").report().is_none());
    }

    #[test]
    fn test_non_object_json_is_unparseable() {
        assert_eq!(AnalysisResult::parse("null"), AnalysisResult::Unparseable);
        assert_eq!(AnalysisResult::parse("[1,2]"), AnalysisResult::Unparseable);
        assert_eq!(AnalysisResult::parse("42"), AnalysisResult::Unparseable);
    }

    #[test]
    fn test_wrongly_typed_fields_are_absent() {
        let result = AnalysisResult::parse(
            r#"{"match_score":"high","missing_skills":"docker","fixes":[{"area":"CV"}, 3]}"#,
        );
        let report = result.report().unwrap();
        assert_eq!(report.match_score, None);
        assert!(report.missing_skills.is_empty());
        assert!(report.fixes.is_empty());
    }

    #[test]
    fn test_percent_and_score_formatting() {
        assert_eq!(percent(0.556), 56);
        assert_eq!(percent(1.7), 100);
        assert_eq!(percent(-0.2), 0);
        assert_eq!(format_score(80.0), "80");
        assert_eq!(format_score(72.4), "72.4");
    }
}
