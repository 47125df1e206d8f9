//! Layout Components
//!
//! Page frame, headers, cards and the two-column grids.

use leptos::*;

use super::theme;

#[component]
pub fn Page(children: Children) -> impl IntoView {
    view! { <div class=theme::PAGE>{children()}</div> }
}

#[component]
pub fn Container(children: Children) -> impl IntoView {
    view! { <div class=theme::CONTAINER>{children()}</div> }
}

/// Title row with optional actions on the right
#[component]
pub fn TopBar(
    #[prop(into)]
    title: String,
    #[prop(optional, into)]
    subtitle: Option<String>,
    #[prop(optional)]
    right: Option<View>,
) -> impl IntoView {
    view! {
        <div class="flex justify-between items-center gap-3 mb-[18px] flex-wrap">
            <div class="flex flex-col gap-1.5 min-w-0">
                <h1 class="m-0 text-4xl tracking-wide">{title}</h1>
                {subtitle.map(|s| view! { <div class="opacity-70 text-[13px]">{s}</div> })}
            </div>
            <div class="flex gap-2.5 items-center flex-wrap">{right}</div>
        </div>
    }
}

#[component]
pub fn Card(
    #[prop(optional, into)]
    title: Option<String>,
    #[prop(optional, into)]
    subtitle: Option<String>,
    #[prop(optional, into)]
    class: String,
    children: Children,
) -> impl IntoView {
    let has_header = title.is_some() || subtitle.is_some();

    view! {
        <div class=format!("{} {}", theme::PANEL, class)>
            {title.map(|t| view! { <h2 class="m-0 text-xl">{t}</h2> })}
            {subtitle.map(|s| view! { <div class="opacity-70 text-xs mt-1.5">{s}</div> })}
            {has_header.then(|| view! { <div class=theme::DIVIDER /> })}
            {children()}
        </div>
    }
}

/// Two columns that collapse to one on narrow screens
#[component]
pub fn TwoCol(left: View, right: View) -> impl IntoView {
    view! {
        <div class="grid grid-cols-1 lg:grid-cols-2 gap-[18px] items-start w-full min-w-0">
            <div class="flex flex-col gap-[18px] min-w-0">{left}</div>
            <div class="flex flex-col gap-[18px] min-w-0">{right}</div>
        </div>
    }
}

/// Frame for the login and register forms
#[component]
pub fn AuthShell(
    #[prop(into)]
    title: String,
    #[prop(into)]
    subtitle: String,
    #[prop(optional)]
    hint: Option<View>,
    children: Children,
) -> impl IntoView {
    view! {
        <Page>
            <Container>
                <TwoCol
                    left=view! {
                        <Card title=title subtitle=subtitle class="min-h-[420px]">
                            {children()}
                        </Card>
                    }.into_view()
                    right=view! {
                        <Card title="Ghosting Analyzer" subtitle="No rejection email, yet you were filtered out. Why?">
                            <div class="opacity-75 leading-relaxed min-w-0">
                                <div class="font-extrabold mb-2">"What it does"</div>
                                <ul class="mt-0 pl-[18px] list-disc">
                                    <li>"CV + job posting → match score"</li>
                                    <li>"ATS readability"</li>
                                    <li>"Likely rejection reasons"</li>
                                    <li>"What to change before the next application"</li>
                                </ul>
                                {hint.map(|h| view! { <div class="mt-3">{h}</div> })}
                            </div>
                        </Card>
                    }.into_view()
                />
            </Container>
        </Page>
    }
}
