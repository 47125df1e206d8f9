//! Subcommand handlers. Each one drives the matching view controller.

use anyhow::{bail, Context, Result};
use std::io::{BufRead, Read, Write};
use std::path::Path;
use std::sync::Arc;

use ghostcheck::config::generate_default_config;
use ghostcheck::{
    ActionOutcome, ApiClient, Config, DashboardState, DashboardView, FileSessionStore, HistoryNavigator, LoginView,
    Message, RegisterView, ReqwestTransport, Route, RouteDecision, RouteGuard, Session,
    UploadFile, ViewContext,
};

use super::output;
use super::{Commands, OutputFormat};

/// Everything a command needs, built once from config
pub struct App {
    config: Config,
    format: OutputFormat,
    session: Session,
    navigator: Arc<HistoryNavigator>,
    ctx: ViewContext,
}

impl App {
    pub fn new(config: Config, format: OutputFormat) -> Result<Self> {
        let session = Session::new(Arc::new(FileSessionStore::new(config.session.token_path())));
        let transport = ReqwestTransport::new(config.api.request_timeout())
            .context("Failed to build HTTP client")?;
        let api = ApiClient::new(&config.api.base_url, Arc::new(transport), session.clone());
        let navigator = Arc::new(HistoryNavigator::new());
        let ctx = ViewContext::new(api, navigator.clone(), config.ui.locale);

        Ok(Self {
            config,
            format,
            session,
            navigator,
            ctx,
        })
    }

    pub async fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Login { email, password } => self.login(&email, password).await,
            Commands::Register {
                email,
                name,
                password,
            } => self.register(&name, &email, password).await,
            Commands::Logout => self.logout(),
            Commands::Status => self.status(),
            Commands::Cvs => self.cvs().await,
            Commands::Upload { path } => self.upload(&path).await,
            Commands::Analyze {
                cv,
                job,
                job_file,
                company,
                job_title,
                country,
            } => {
                let job_description = match (job, job_file) {
                    (Some(text), _) => text,
                    (None, Some(path)) => read_text(&path)?,
                    (None, None) => bail!("Provide a job description with --job or --job-file"),
                };
                let dashboard = self.dashboard().await?;
                if let Some(cv) = cv {
                    dashboard.select_cv(&cv);
                }
                dashboard.set_job_description(&job_description);
                dashboard.set_company(company.as_deref().unwrap_or_default());
                dashboard.set_job_title(job_title.as_deref().unwrap_or_default());
                dashboard.set_country(country.as_deref().unwrap_or_default());
                self.analyze(&dashboard).await
            }
            Commands::History => self.history().await,
            Commands::Show { analysis_id } => self.show(&analysis_id).await,
            Commands::Config { output, show } => self.write_config(output.as_deref(), show),
        }
    }

    fn text(&self, message: Message) -> &'static str {
        self.ctx.text(message)
    }

    async fn login(&self, email: &str, password: Option<String>) -> Result<()> {
        let password = match password {
            Some(p) => p,
            None => prompt_password()?,
        };

        let view = LoginView::new(self.ctx.clone());
        view.set_email(email);
        view.set_password(&password);

        match view.submit().await {
            ActionOutcome::Completed if self.navigator.last() == Some(Route::Dashboard) => {
                println!("Logged in as {}", email.trim());
                Ok(())
            }
            ActionOutcome::Skipped => bail!("Email and password are required"),
            _ => bail!(failure(view.state().error, self.text(Message::LoginFailed))),
        }
    }

    async fn register(&self, name: &str, email: &str, password: Option<String>) -> Result<()> {
        let password = match password {
            Some(p) => p,
            None => prompt_password()?,
        };

        let view = RegisterView::new(self.ctx.clone());
        view.set_name(name);
        view.set_email(email);
        view.set_password(&password);

        match view.submit().await {
            ActionOutcome::Completed => {
                println!("Account created. Log in with:");
                println!("  ghostcheck login --email {}", email.trim());
                Ok(())
            }
            ActionOutcome::Skipped => bail!(
                "Email is required and the password must be at least {} characters",
                ghostcheck::views::MIN_PASSWORD_LEN
            ),
            _ => bail!(failure(view.state().error, self.text(Message::RegisterFailed))),
        }
    }

    fn logout(&self) -> Result<()> {
        self.session.clear().context("Failed to clear session")?;
        println!("Logged out");
        Ok(())
    }

    fn status(&self) -> Result<()> {
        let authenticated = self.session.is_authenticated();
        match self.format {
            OutputFormat::Json => {
                let status = serde_json::json!({
                    "version": env!("CARGO_PKG_VERSION"),
                    "api_url": self.ctx.api.base_url(),
                    "session_file": self.config.session.token_path(),
                    "authenticated": authenticated,
                    "locale": self.config.ui.locale,
                });
                println!("{}", output::json(&status)?);
            }
            OutputFormat::Table => {
                println!("Ghostcheck v{}", env!("CARGO_PKG_VERSION"));
                println!();
                println!("Backend:       {}", self.ctx.api.base_url());
                println!("Session file:  {}", self.config.session.token_path().display());
                println!("Logged in:     {}", if authenticated { "yes" } else { "no" });
                println!("Locale:        {:?}", self.config.ui.locale);
            }
        }
        Ok(())
    }

    /// A dashboard behind the same guard the browser app uses for `/`
    async fn dashboard(&self) -> Result<DashboardView> {
        match RouteGuard::new(self.session.clone()).resolve(Route::Dashboard.path()) {
            RouteDecision::Render(_) => {}
            _ => bail!(
                "{}. Run `ghostcheck login --email <email>` first.",
                self.text(Message::NotLoggedIn)
            ),
        }

        let view = DashboardView::new(self.ctx.clone());
        view.mount().await;
        Ok(view)
    }

    async fn cvs(&self) -> Result<()> {
        let dashboard = self.dashboard().await?;
        let state = dashboard.state();
        if let Some(error) = state.error {
            bail!(error);
        }

        match self.format {
            OutputFormat::Json => println!("{}", output::json(&state.cvs)?),
            OutputFormat::Table => println!("{}", output::cv_table(&state.cvs, state.selected_cv.as_deref())),
        }
        Ok(())
    }

    async fn upload(&self, path: &Path) -> Result<()> {
        let bytes = std::fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .context("Upload path has no file name")?;

        let dashboard = self.dashboard().await?;
        match dashboard.upload(UploadFile::new(filename.clone(), bytes)).await {
            ActionOutcome::Completed => {
                let state = dashboard.state();
                match self.format {
                    OutputFormat::Json => println!("{}", output::json(&state.cvs)?),
                    OutputFormat::Table => {
                        println!("Uploaded {}", filename);
                        println!();
                        println!("{}", output::cv_table(&state.cvs, state.selected_cv.as_deref()));
                    }
                }
                Ok(())
            }
            _ => bail!(failure(dashboard.state().error, self.text(Message::UploadFailed))),
        }
    }

    async fn analyze(&self, dashboard: &DashboardView) -> Result<()> {
        match dashboard.analyze().await {
            ActionOutcome::Completed => {
                let state = dashboard.state();
                match self.format {
                    OutputFormat::Json => println!("{}", output::json(&state.result)?),
                    OutputFormat::Table => {
                        println!("{}", output::result_text(state.result.as_ref(), self.config.ui.locale))
                    }
                }
                Ok(())
            }
            ActionOutcome::Skipped => bail!(skipped_analyze_reason(&dashboard.state())),
            _ => bail!(failure(dashboard.state().error, self.text(Message::AnalyzeFailed))),
        }
    }

    async fn history(&self) -> Result<()> {
        let dashboard = self.dashboard().await?;
        let state = dashboard.state();

        match self.format {
            OutputFormat::Json => println!("{}", output::json(&state.history)?),
            OutputFormat::Table => {
                println!("{}", output::history_table(&state.history, self.config.ui.locale))
            }
        }
        Ok(())
    }

    async fn show(&self, analysis_id: &str) -> Result<()> {
        let dashboard = self.dashboard().await?;
        if !dashboard.select_history(analysis_id) {
            bail!("No analysis with id {}", analysis_id);
        }

        let state = dashboard.state();
        match self.format {
            OutputFormat::Json => println!("{}", output::json(&state.result)?),
            OutputFormat::Table => {
                println!("{}", output::result_text(state.result.as_ref(), self.config.ui.locale))
            }
        }
        Ok(())
    }

    fn write_config(&self, path: Option<&Path>, show: bool) -> Result<()> {
        let content = if show {
            toml::to_string_pretty(&self.config).context("Failed to render config")?
        } else {
            generate_default_config()
        };

        match path {
            Some(path) => {
                // Create parent directory if needed
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, &content)?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", content),
        }
        Ok(())
    }
}

fn failure(error: Option<String>, fallback: &str) -> String {
    error.unwrap_or_else(|| fallback.to_string())
}

/// A CV list that failed to load explains an empty selection better than the generic hint
fn skipped_analyze_reason(state: &DashboardState) -> String {
    failure(
        state.error.clone(),
        "Nothing to analyze: upload a CV first and provide a non-empty job description",
    )
}

/// Read a text file, or stdin for `-`
fn read_text(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read job description from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
}

fn prompt_password() -> Result<String> {
    eprint!("Password: ");
    std::io::stderr().flush()?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skipped_analyze_reports_load_error() {
        let state = DashboardState {
            job_description: "Rust developer".into(),
            error: Some("Could not load the CV list".into()),
            ..Default::default()
        };
        assert_eq!(skipped_analyze_reason(&state), "Could not load the CV list");
    }

    #[test]
    fn test_skipped_analyze_without_error_gives_hint() {
        let reason = skipped_analyze_reason(&DashboardState::default());
        assert!(reason.starts_with("Nothing to analyze"));
    }
}
