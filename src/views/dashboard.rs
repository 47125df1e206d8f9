//! Dashboard View
//!
//! Upload a résumé, pick one, paste a job description and run an analysis.
//! Past analyses can be re-displayed without a round trip.
//!
//! Overlapping analyze calls go through a [`LatestSlot`]: the last one
//! issued is the one whose result is shown.

use serde::Serialize;

use super::{ActionOutcome, LatestSlot, StateCell, ViewContext};
use crate::api::{AnalysisRecord, AnalyzeRequest, CvSummary, UploadFile};
use crate::messages::Message;
use crate::report::{AnalysisResult, GhostingReport};
use crate::router::Route;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardState {
    pub cvs: Vec<CvSummary>,
    pub selected_cv: Option<String>,
    pub job_description: String,
    pub company: String,
    pub job_title: String,
    pub country: String,
    /// Currently displayed result
    pub result: Option<AnalysisResult>,
    pub history: Vec<AnalysisRecord>,
    pub loading: bool,
    pub error: Option<String>,
}

impl DashboardState {
    /// Request for the current form, if it is complete enough to send
    pub fn analyze_request(&self) -> Option<AnalyzeRequest> {
        let cv_id = self.selected_cv.as_deref().filter(|id| !id.is_empty())?;
        if self.job_description.trim().is_empty() {
            return None;
        }

        Some(AnalyzeRequest {
            cv_id: cv_id.to_string(),
            job_description: self.job_description.clone(),
            company: optional(&self.company),
            job_title: optional(&self.job_title),
            country: optional(&self.country),
        })
    }

    pub fn can_analyze(&self) -> bool {
        !self.loading && self.analyze_request().is_some()
    }

    /// Report behind the displayed result; `None` for nothing or unparseable
    pub fn displayed_report(&self) -> Option<&GhostingReport> {
        self.result.as_ref().and_then(AnalysisResult::report)
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub struct DashboardView {
    ctx: ViewContext,
    state: StateCell<DashboardState>,
    analyze_slot: LatestSlot,
}

impl DashboardView {
    pub fn new(ctx: ViewContext) -> Self {
        Self {
            ctx,
            state: StateCell::new(DashboardState::default()),
            analyze_slot: LatestSlot::new(),
        }
    }

    pub fn state(&self) -> DashboardState {
        self.state.snapshot()
    }

    /// Listeners receive a snapshot after every change. They must not start
    /// view actions from inside the callback.
    pub fn subscribe(&self, listener: impl Fn(&DashboardState) + Send + Sync + 'static) {
        self.state.subscribe(listener);
    }

    // ============ Loading ============

    /// Initial load: CVs and history in parallel
    pub async fn mount(&self) {
        futures_util::join!(self.load_cvs(), self.load_history());
    }

    /// Refresh the CV list, selecting the first CV if none is selected
    pub async fn load_cvs(&self) -> ActionOutcome {
        match self.ctx.api.list_cvs().await {
            Ok(cvs) => {
                tracing::debug!(count = cvs.len(), "Loaded CV list");
                self.state.update(|s| {
                    if s.selected_cv.is_none() {
                        s.selected_cv = cvs.first().map(|cv| cv.cv_id.clone());
                    }
                    s.cvs = cvs;
                });
                ActionOutcome::Completed
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load CV list");
                let message = self.ctx.text(Message::CvListFailed).to_string();
                self.state.update(|s| s.error = Some(message));
                ActionOutcome::Failed
            }
        }
    }

    /// Refresh history. Failures leave the current list in place.
    pub async fn load_history(&self) -> ActionOutcome {
        match self.ctx.api.list_analyses().await {
            Ok(history) => {
                self.state.update(|s| s.history = history);
                ActionOutcome::Completed
            }
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring history load failure");
                ActionOutcome::Failed
            }
        }
    }

    // ============ Form ============

    pub fn select_cv(&self, cv_id: &str) {
        self.state.update(|s| s.selected_cv = Some(cv_id.to_string()));
    }

    pub fn set_job_description(&self, text: &str) {
        self.state.update(|s| s.job_description = text.to_string());
    }

    pub fn set_company(&self, company: &str) {
        self.state.update(|s| s.company = company.to_string());
    }

    pub fn set_job_title(&self, job_title: &str) {
        self.state.update(|s| s.job_title = job_title.to_string());
    }

    pub fn set_country(&self, country: &str) {
        self.state.update(|s| s.country = country.to_string());
    }

    // ============ Actions ============

    /// Upload a résumé, then reload the CV list whatever the outcome
    pub async fn upload(&self, file: UploadFile) -> ActionOutcome {
        self.state.update(|s| {
            s.loading = true;
            s.error = None;
        });

        let uploaded = self.ctx.api.upload_cv(file).await;
        self.load_cvs().await;

        let outcome = match uploaded {
            Ok(()) => ActionOutcome::Completed,
            Err(e) => {
                tracing::warn!(error = %e, "CV upload failed");
                let message = self.ctx.text(Message::UploadFailed).to_string();
                self.state.update(|s| s.error = Some(message));
                ActionOutcome::Failed
            }
        };

        self.state.update(|s| s.loading = false);
        outcome
    }

    /// Run an analysis for the selected CV and job description.
    ///
    /// A newer call supersedes this one; the superseded call returns
    /// [`ActionOutcome::Superseded`] without touching state.
    pub async fn analyze(&self) -> ActionOutcome {
        let Some(request) = self.state.read(DashboardState::analyze_request) else {
            return ActionOutcome::Skipped;
        };

        self.state.update(|s| {
            s.loading = true;
            s.error = None;
        });

        let failed = self.ctx.text(Message::AnalyzeFailed);
        let applied = self
            .analyze_slot
            .run(self.ctx.api.create_analysis(&request), |response| {
                self.state.update(|s| {
                    s.loading = false;
                    match response {
                        Ok(record) => {
                            tracing::info!(analysis_id = %record.analysis_id, "Analysis completed");
                            s.result = Some(AnalysisResult::parse(&record.result_json));
                            ActionOutcome::Completed
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Analysis failed");
                            s.error = Some(failed.to_string());
                            ActionOutcome::Failed
                        }
                    }
                })
            })
            .await;

        match applied {
            None => ActionOutcome::Superseded,
            Some(ActionOutcome::Completed) => {
                self.load_history().await;
                ActionOutcome::Completed
            }
            Some(outcome) => outcome,
        }
    }

    /// Display a past analysis. Returns false for an unknown id.
    pub fn select_history(&self, analysis_id: &str) -> bool {
        self.state.update(|s| {
            let Some(record) = s.history.iter().find(|r| r.analysis_id == analysis_id) else {
                return false;
            };
            s.result = Some(AnalysisResult::parse(&record.result_json));
            true
        })
    }

    /// Drop the session and go back to the login page
    pub fn logout(&self) {
        if let Err(e) = self.ctx.session().clear() {
            tracing::warn!(error = %e, "Could not clear session");
        }
        self.ctx.navigator.navigate(Route::Login);
    }
}
