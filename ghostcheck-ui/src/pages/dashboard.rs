//! Dashboard Page
//!
//! Upload → paste the job description → analyze → read the result.

use leptos::*;
use std::rc::Rc;
use wasm_bindgen::JsValue;

use ghostcheck::{CvSummary, DashboardView, UploadFile};

use crate::components::theme;
use crate::components::{
    Button, ButtonVariant, Card, Container, ErrorBanner, HistoryList, Input, Label, Page,
    ResultPanel, Textarea, TopBar, TwoCol,
};
use crate::state::{mirror, use_app};

async fn read_file(file: &web_sys::File) -> Result<UploadFile, JsValue> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(UploadFile::new(file.name(), bytes))
}

fn cv_label(cv: &CvSummary) -> String {
    match cv.created_at {
        Some(at) => format!(
            "{} — {}",
            cv.filename,
            at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M")
        ),
        None => cv.filename.clone(),
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let app = use_app();
    let locale = app.locale();
    let controller = Rc::new(DashboardView::new(app.ctx.clone()));
    let state = mirror(controller.state(), |listener| controller.subscribe(listener));

    {
        let controller = Rc::clone(&controller);
        spawn_local(async move { controller.mount().await });
    }

    let on_file = {
        let controller = Rc::clone(&controller);
        move |ev: ev::Event| {
            let input = event_target::<web_sys::HtmlInputElement>(&ev);
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            // Allow picking the same file again
            input.set_value("");

            let controller = Rc::clone(&controller);
            spawn_local(async move {
                match read_file(&file).await {
                    Ok(upload) => {
                        controller.upload(upload).await;
                    }
                    Err(e) => tracing::error!(error = ?e, "Could not read the selected file"),
                }
            });
        }
    };

    let on_select_cv = {
        let controller = Rc::clone(&controller);
        move |ev: ev::Event| controller.select_cv(&event_target_value(&ev))
    };

    let on_job_description = {
        let controller = Rc::clone(&controller);
        move |text: String| controller.set_job_description(&text)
    };
    let on_company = {
        let controller = Rc::clone(&controller);
        move |text: String| controller.set_company(&text)
    };
    let on_job_title = {
        let controller = Rc::clone(&controller);
        move |text: String| controller.set_job_title(&text)
    };
    let on_country = {
        let controller = Rc::clone(&controller);
        move |text: String| controller.set_country(&text)
    };

    let on_analyze = {
        let controller = Rc::clone(&controller);
        move |_: ev::MouseEvent| {
            let controller = Rc::clone(&controller);
            spawn_local(async move {
                controller.analyze().await;
            });
        }
    };

    let on_history = {
        let controller = Rc::clone(&controller);
        move |analysis_id: String| {
            controller.select_history(&analysis_id);
        }
    };

    let on_logout = {
        let controller = Rc::clone(&controller);
        move |_: ev::MouseEvent| controller.logout()
    };

    let loading = Signal::derive(move || state.with(|s| s.loading));

    let left = view! {
        <Card title="1) CV Upload">
            <input
                type="file"
                accept=".pdf,.doc,.docx"
                on:change=on_file
                disabled=move || loading.get()
            />
            <div class="opacity-70 text-xs mt-2">
                {move || format!("{} CVs found", state.with(|s| s.cvs.len()))}
            </div>
        </Card>

        <Card title="2) Analyze">
            <div class="mb-3">
                <Label>"Select CV"</Label>
                <select
                    class=theme::FIELD
                    on:change=on_select_cv
                    prop:value=move || state.with(|s| s.selected_cv.clone().unwrap_or_default())
                >
                    {move || state.with(|s| {
                        s.cvs
                            .iter()
                            .map(|cv| view! { <option value=cv.cv_id.clone()>{cv_label(cv)}</option> })
                            .collect_view()
                    })}
                </select>
            </div>

            <div class="grid grid-cols-1 md:grid-cols-3 gap-3 mb-3">
                <div>
                    <Label>"Company"</Label>
                    <Input
                        value=Signal::derive(move || state.with(|s| s.company.clone()))
                        on_input=on_company
                        placeholder="Optional"
                    />
                </div>
                <div>
                    <Label>"Job title"</Label>
                    <Input
                        value=Signal::derive(move || state.with(|s| s.job_title.clone()))
                        on_input=on_job_title
                        placeholder="Optional"
                    />
                </div>
                <div>
                    <Label>"Country"</Label>
                    <Input
                        value=Signal::derive(move || state.with(|s| s.country.clone()))
                        on_input=on_country
                        placeholder="Optional"
                    />
                </div>
            </div>

            <div>
                <Label>"Job description"</Label>
                <Textarea
                    value=Signal::derive(move || state.with(|s| s.job_description.clone()))
                    on_input=on_job_description
                    placeholder="Paste the job posting here"
                />
                <div class="text-right text-[11px] opacity-60 mt-1">
                    {move || format!("{} characters", state.with(|s| s.job_description.chars().count()))}
                </div>
            </div>

            <div class="mt-3">
                <Button disabled=loading on_click=on_analyze>
                    {move || if loading.get() { "Analyzing..." } else { "Analyze" }}
                </Button>
            </div>
        </Card>
    }
    .into_view();

    let right = view! {
        <ResultPanel
            result=Signal::derive(move || state.with(|s| s.result.clone()))
            locale=locale
        />
    }
    .into_view();

    view! {
        <Page>
            <Container>
                <TopBar
                    title="Ghosting Analyzer"
                    subtitle="Upload CV → paste job description → Analyze → read the result"
                    right=view! {
                        <Button variant=ButtonVariant::Ghost on_click=on_logout>"Logout"</Button>
                    }.into_view()
                />

                <ErrorBanner message=Signal::derive(move || state.with(|s| s.error.clone())) />

                <TwoCol left=left right=right />

                <Card title="History" class="mt-[18px]">
                    <HistoryList
                        history=Signal::derive(move || state.with(|s| s.history.clone()))
                        on_select=on_history
                        locale=locale
                    />
                </Card>
            </Container>
        </Page>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn cv(created_at: Option<chrono::DateTime<Utc>>) -> CvSummary {
        CvSummary {
            cv_id: "a".into(),
            filename: "resume.pdf".into(),
            created_at,
        }
    }

    #[test]
    fn test_cv_label_without_date_is_filename() {
        assert_eq!(cv_label(&cv(None)), "resume.pdf");
    }

    #[test]
    fn test_cv_label_appends_local_time() {
        let label = cv_label(&cv(Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap())));
        assert!(label.starts_with("resume.pdf — "));
        assert!(label.contains("2024-"));
    }
}
