//! Analysis result panel and history list

use leptos::*;

use ghostcheck::report::{format_score, percent};
use ghostcheck::{AnalysisRecord, AnalysisResult, GhostingReport, Locale, Message};

use super::layout::Card;

/// Current result, or the "no analysis yet" hint. Unparseable results show the hint too.
#[component]
pub fn ResultPanel(
    #[prop(into)]
    result: Signal<Option<AnalysisResult>>,
    locale: Locale,
) -> impl IntoView {
    view! {
        <Card title="Result">
            {move || {
                result.with(|r| match r.as_ref().and_then(AnalysisResult::report) {
                    Some(report) => report_view(report, locale),
                    None => view! {
                        <div class="opacity-60">{locale.text(Message::NoAnalysisYet)}</div>
                    }.into_view(),
                })
            }}
        </Card>
    }
}

fn report_view(report: &GhostingReport, locale: Locale) -> View {
    let ghosting = report.ghosting_probability.map(|p| format!("%{}", percent(p)));
    let match_score = report.match_score.map(format_score);
    let ats = report.ats_readability_score.map(format_score);

    let profile: Vec<(&'static str, String)> = [
        (Message::Role, report.role_guess.clone()),
        (Message::Seniority, report.seniority_guess.clone()),
    ]
    .into_iter()
    .filter_map(|(label, value)| Some((locale.text(label), value?)))
    .collect();

    view! {
        <div class="grid grid-cols-3 gap-3 mb-3.5">
            <Metric label=locale.text(Message::GhostingProbability) value=ghosting />
            <Metric label=locale.text(Message::MatchScore) value=match_score />
            <Metric label=locale.text(Message::AtsReadability) value=ats />
        </div>

        {(!profile.is_empty()).then(|| view! {
            <div class="opacity-80 mb-3">
                {profile.into_iter().enumerate().map(|(i, (label, value))| view! {
                    {(i > 0).then_some(" | ")}
                    {label}": "<b>{value}</b>
                }).collect_view()}
            </div>
        })}

        <Section title=locale.text(Message::MissingSkills) items=report.missing_skills.clone() />
        <Section title=locale.text(Message::RejectionReasons) items=strings(&report.top_rejection_reasons) />
        <Section title=locale.text(Message::SuggestedFixes) items=strings(&report.fixes) />
        <Section title=locale.text(Message::RewriteSuggestions) items=strings(&report.rewrite_suggestions) />
    }
    .into_view()
}

fn strings<T: ToString>(items: &[T]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

#[component]
fn Metric(label: &'static str, value: Option<String>) -> impl IntoView {
    view! {
        <div class="border border-[#243046] rounded-xl p-3 bg-[#0c1426]">
            <div class="text-xs opacity-75">{label}</div>
            <div class="text-[28px] font-extrabold">{value.unwrap_or_else(|| "-".to_string())}</div>
        </div>
    }
}

/// Titled bullet list; hidden when empty
#[component]
pub fn Section(title: &'static str, items: Vec<String>) -> impl IntoView {
    (!items.is_empty()).then(|| {
        view! {
            <div class="mb-3">
                <div class="font-bold mb-1.5">{title}</div>
                <ul class="m-0 pl-[18px] list-disc">
                    {items.into_iter().map(|item| view! { <li>{item}</li> }).collect_view()}
                </ul>
            </div>
        }
    })
}

/// Past analyses; clicking one re-displays it without a request
#[component]
pub fn HistoryList(
    #[prop(into)]
    history: Signal<Vec<AnalysisRecord>>,
    #[prop(into)]
    on_select: Callback<String>,
    locale: Locale,
) -> impl IntoView {
    move || {
        let entries = history.get();
        if entries.is_empty() {
            return view! {
                <div class="opacity-60">{locale.text(Message::NoHistoryYet)}</div>
            }
            .into_view();
        }

        entries
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let created = record
                    .created_at
                    .map(|dt| dt.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();
                let id = record.analysis_id;

                view! {
                    <div
                        class="p-3 rounded-xl border border-[#243046] mb-2 cursor-pointer bg-[#0c1426] hover:border-[#8ab4ff]"
                        on:click=move |_| on_select.call(id.clone())
                    >
                        <b>{locale.analysis_title(index)}</b>
                        <div class="opacity-60 text-xs">{created}</div>
                    </div>
                }
            })
            .collect_view()
    }
}
