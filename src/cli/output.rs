//! Plain-text rendering for terminal output

use chrono::{DateTime, Utc};
use serde::Serialize;

use ghostcheck::report::{format_score, percent};
use ghostcheck::{AnalysisRecord, AnalysisResult, CvSummary, GhostingReport, Locale, Message};

pub fn json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn timestamp(at: Option<DateTime<Utc>>) -> String {
    at.map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// CV list; the selected CV is marked with `*`
pub fn cv_table(cvs: &[CvSummary], selected: Option<&str>) -> String {
    if cvs.is_empty() {
        return "No CVs uploaded yet.\n\nUpload one with:\n  ghostcheck upload cv.pdf".to_string();
    }

    let mut lines = vec![
        format!("  {:<38} {:<30} {}", "ID", "Filename", "Uploaded"),
        "-".repeat(88),
    ];
    for cv in cvs {
        let marker = if selected == Some(cv.cv_id.as_str()) { "*" } else { " " };
        lines.push(format!(
            "{} {:<38} {:<30} {}",
            marker,
            cv.cv_id,
            cv.filename,
            timestamp(cv.created_at)
        ));
    }
    lines.join("\n")
}

/// Analysis history, numbered in the order the backend returned it
pub fn history_table(history: &[AnalysisRecord], locale: Locale) -> String {
    if history.is_empty() {
        return locale.text(Message::NoHistoryYet).to_string();
    }

    let mut lines = vec![
        format!("{:<14} {:<38} {:<18} {}", "#", "Analysis ID", "Created", "Ghosting"),
        "-".repeat(82),
    ];
    for (index, record) in history.iter().enumerate() {
        let ghosting = AnalysisResult::parse(&record.result_json)
            .report()
            .and_then(GhostingReport::ghosting_percent)
            .map(|p| format!("{}%", p))
            .unwrap_or_else(|| "-".to_string());

        lines.push(format!(
            "{:<14} {:<38} {:<18} {}",
            locale.analysis_title(index),
            record.analysis_id,
            timestamp(record.created_at),
            ghosting
        ));
    }
    lines.join("\n")
}

/// The displayed result, or the "nothing yet" line
pub fn result_text(result: Option<&AnalysisResult>, locale: Locale) -> String {
    match result.and_then(AnalysisResult::report) {
        Some(report) => report_text(report, locale),
        None => locale.text(Message::NoAnalysisYet).to_string(),
    }
}

fn report_text(report: &GhostingReport, locale: Locale) -> String {
    let mut lines = Vec::new();

    if let Some(p) = report.ghosting_probability {
        lines.push(format!("{}: {}%", locale.text(Message::GhostingProbability), percent(p)));
    }
    if let Some(score) = report.match_score {
        lines.push(format!("{}: {}", locale.text(Message::MatchScore), format_score(score)));
    }
    if let Some(score) = report.ats_readability_score {
        lines.push(format!("{}: {}", locale.text(Message::AtsReadability), format_score(score)));
    }

    let profile: Vec<String> = [
        (Message::Role, report.role_guess.as_deref()),
        (Message::Seniority, report.seniority_guess.as_deref()),
    ]
    .into_iter()
    .filter_map(|(label, value)| Some(format!("{}: {}", locale.text(label), value?)))
    .collect();
    if !profile.is_empty() {
        lines.push(profile.join(" | "));
    }

    section(&mut lines, locale.text(Message::MissingSkills), &report.missing_skills);
    section(&mut lines, locale.text(Message::RejectionReasons), &report.top_rejection_reasons);
    section(&mut lines, locale.text(Message::SuggestedFixes), &report.fixes);
    section(&mut lines, locale.text(Message::RewriteSuggestions), &report.rewrite_suggestions);

    lines.join("\n")
}

/// Titled bullet list; empty lists render nothing
fn section<T: std::fmt::Display>(lines: &mut Vec<String>, title: &str, items: &[T]) {
    if items.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(format!("{}:", title));
    lines.extend(items.iter().map(|item| format!("  - {}", item)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(raw: &str) -> AnalysisResult {
        AnalysisResult::parse(raw)
    }

    #[test]
    fn test_full_report() {
        let result = parsed(
            r#"{
                "ghosting_probability": 0.72,
                "match_score": 64,
                "ats_readability_score": 81.5,
                "role_guess": "Backend Engineer",
                "seniority_guess": "Mid",
                "missing_skills": ["Kubernetes", "gRPC"],
                "top_rejection_reasons": [{"reason": "No cloud experience", "confidence": 0.8}],
                "fixes": [{"area": "Summary", "action": "Lead with Rust projects"}],
                "rewrite_suggestions": [{"original": "Worked on APIs", "improved": "Built REST APIs serving 2M req/day"}]
            }"#,
        );

        let text = result_text(Some(&result), Locale::En);
        assert!(text.starts_with("Ghosting probability: 72%\nMatch score: 64\nATS readability: 81.5\n"));
        assert!(text.contains("Role: Backend Engineer | Seniority: Mid"));
        assert!(text.contains("Missing skills:\n  - Kubernetes\n  - gRPC"));
        assert!(text.contains("  - No cloud experience (80%)"));
        assert!(text.contains("  - Summary: Lead with Rust projects"));
        assert!(text.contains("  - Worked on APIs → Built REST APIs serving 2M req/day"));
    }

    #[test]
    fn test_absent_fields_are_skipped() {
        let text = result_text(Some(&parsed(r#"{"match_score": 80}"#)), Locale::En);
        assert_eq!(text, "Match score: 80");
    }

    #[test]
    fn test_nothing_to_show() {
        assert_eq!(result_text(None, Locale::En), "No analysis yet");
        assert_eq!(
            result_text(Some(&parsed("not json")), Locale::Tr),
            "Henüz analiz yapılmadı"
        );
    }

    #[test]
    fn test_history_titles_and_ghosting_column() {
        let history: Vec<AnalysisRecord> = serde_json::from_str(
            r#"[
                {"analysisId":"an-1","cvId":"a","resultJson":"{\"ghosting_probability\":0.3}","createdAt":"2024-05-03T09:30:00Z"},
                {"analysisId":"an-2","cvId":"a","resultJson":"oops","createdAt":null}
            ]"#,
        )
        .unwrap();

        let table = history_table(&history, Locale::En);
        let rows: Vec<&str> = table.lines().skip(2).collect();
        assert!(rows[0].starts_with("Analysis #1"));
        assert!(rows[0].contains("2024-05-03 09:30"));
        assert!(rows[0].ends_with("30%"));
        assert!(rows[1].starts_with("Analysis #2"));
        assert!(rows[1].ends_with("-"));

        assert_eq!(history_table(&[], Locale::Tr), "Henüz analiz yok");
    }

    #[test]
    fn test_cv_table_marks_selection() {
        let cvs = vec![
            CvSummary {
                cv_id: "a".into(),
                filename: "a.pdf".into(),
                created_at: None,
            },
            CvSummary {
                cv_id: "b".into(),
                filename: "b.pdf".into(),
                created_at: None,
            },
        ];
        let table = cv_table(&cvs, Some("b"));
        let rows: Vec<&str> = table.lines().skip(2).collect();
        assert!(rows[0].starts_with("  a"));
        assert!(rows[1].starts_with("* b"));
    }
}
