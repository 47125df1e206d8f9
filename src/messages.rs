//! Localized user-facing strings.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// UI language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Tr,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" | "english" => Ok(Locale::En),
            "tr" | "tr-tr" | "turkish" => Ok(Locale::Tr),
            other => Err(format!("Unsupported locale: {}", other)),
        }
    }
}

/// Message keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    TokenNotReceived,
    LoginFailed,
    RegisterFailed,
    CvListFailed,
    UploadFailed,
    AnalyzeFailed,
    NotLoggedIn,
    NoAnalysisYet,
    NoHistoryYet,
    GhostingProbability,
    MatchScore,
    AtsReadability,
    Role,
    Seniority,
    MissingSkills,
    RejectionReasons,
    SuggestedFixes,
    RewriteSuggestions,
    ErrorLabel,
}

impl Locale {
    pub fn text(self, message: Message) -> &'static str {
        use Message::*;

        match self {
            Locale::En => match message {
                TokenNotReceived => "Token not received (unexpected backend response).",
                LoginFailed => "Login failed",
                RegisterFailed => "Register failed",
                CvListFailed => "Could not load the CV list",
                UploadFailed => "CV upload failed",
                AnalyzeFailed => "Analyze failed",
                NotLoggedIn => "Not logged in",
                NoAnalysisYet => "No analysis yet",
                NoHistoryYet => "No analyses yet",
                GhostingProbability => "Ghosting probability",
                MatchScore => "Match score",
                AtsReadability => "ATS readability",
                Role => "Role",
                Seniority => "Seniority",
                MissingSkills => "Missing skills",
                RejectionReasons => "Likely rejection reasons",
                SuggestedFixes => "Suggested fixes",
                RewriteSuggestions => "Rewrite suggestions",
                ErrorLabel => "Error:",
            },
            Locale::Tr => match message {
                TokenNotReceived => "Token alınamadı (backend response farklı).",
                LoginFailed => "Giriş başarısız",
                RegisterFailed => "Kayıt başarısız",
                CvListFailed => "CV listesi alınamadı",
                UploadFailed => "CV yüklenemedi",
                AnalyzeFailed => "Analyze başarısız",
                NotLoggedIn => "Giriş yapılmadı",
                NoAnalysisYet => "Henüz analiz yapılmadı",
                NoHistoryYet => "Henüz analiz yok",
                GhostingProbability => "Ghosting ihtimali",
                MatchScore => "Match score",
                AtsReadability => "ATS okunabilirlik",
                Role => "Rol",
                Seniority => "Seviye",
                MissingSkills => "Eksik skill'ler",
                RejectionReasons => "Muhtemel red nedenleri",
                SuggestedFixes => "Önerilen düzeltmeler",
                RewriteSuggestions => "Rewrite önerileri",
                ErrorLabel => "Hata:",
            },
        }
    }

    /// Title of the n-th (zero-based) history entry
    pub fn analysis_title(self, index: usize) -> String {
        match self {
            Locale::En => format!("Analysis #{}", index + 1),
            Locale::Tr => format!("Analiz #{}", index + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale() {
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!(" tr ".parse::<Locale>().unwrap(), Locale::Tr);
        assert!("de".parse::<Locale>().is_err());
    }

    #[test]
    fn test_history_titles_are_one_based() {
        assert_eq!(Locale::En.analysis_title(0), "Analysis #1");
        assert_eq!(Locale::Tr.analysis_title(2), "Analiz #3");
    }

    #[test]
    fn test_turkish_errors() {
        assert_eq!(Locale::Tr.text(Message::CvListFailed), "CV listesi alınamadı");
        assert_eq!(Locale::En.text(Message::AnalyzeFailed), "Analyze failed");
    }
}
