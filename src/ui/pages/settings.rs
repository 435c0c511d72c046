use std::time::SystemTime;

use dioxus::prelude::*;
use reqwest::Url;

use crate::{
    app::persist_user_state,
    domain::{ApiConfig, AppState, CacheResource},
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        theme,
    },
    util::version::{check_for_update, version_label, APP_NAME, APP_REPO_URL},
};

#[component]
pub fn SettingsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let api_config = use_context::<Signal<ApiConfig>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let mut base_url_input = use_signal(|| api_config.with(|config| config.base_url.clone()));
    let update_status = use_signal(|| None::<String>);
    let checking = use_signal(|| false);

    let on_save_url = {
        let state = state.clone();
        let mut api_config = api_config.clone();
        let toasts = toasts.clone();
        let base_url_input = base_url_input.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let mut raw = base_url_input().trim().to_string();
            if !raw.ends_with('/') {
                // Relative endpoint joins drop the last path segment otherwise.
                raw.push('/');
            }
            match Url::parse(&raw) {
                Ok(_) => {
                    api_config.set(ApiConfig { base_url: raw });
                    persist_user_state(&state, &api_config);
                    push_toast(toasts.clone(), ToastKind::Success, "API base URL saved.");
                }
                Err(err) => push_toast(
                    toasts.clone(),
                    ToastKind::Error,
                    format!("Not a valid URL: {err}"),
                ),
            }
        }
    };

    let on_clear_cache = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        move |_| {
            state.with_mut(|st| st.cache.clear());
            push_toast(
                toasts.clone(),
                ToastKind::Info,
                "Cache cleared; data reloads on the next page visit.",
            );
        }
    };

    let on_check_update = {
        let mut update_status = update_status.clone();
        let mut checking = checking.clone();
        move |_| {
            checking.set(true);
            spawn(async move {
                let message = match check_for_update().await {
                    Ok(info) => info.to_string(),
                    Err(err) => format!("Update check failed: {err}"),
                };
                update_status.set(Some(message));
                checking.set(false);
            });
        }
    };

    let cache_rows: Vec<(String, String)> = {
        let mut rows: Vec<(String, String)> = state.with(|st| {
            st.cache
                .iter()
                .map(|(resource, fetched_at)| {
                    (resource_label(resource).to_string(), humanize_age(*fetched_at))
                })
                .collect()
        });
        rows.sort();
        rows
    };

    let check_label = if checking() { "Checking..." } else { "Check for updates" };

    rsx! {
        div { class: "max-w-2xl space-y-8",
            section {
                class: "space-y-4 {theme::panel()}",
                h2 { class: "text-lg font-semibold text-slate-200", "Server" }
                form {
                    class: "flex items-end gap-4",
                    onsubmit: on_save_url,
                    div { class: "flex-1",
                        label { class: "{theme::label_class()}", "API base URL" }
                        input {
                            class: "{theme::input_class()}",
                            value: base_url_input(),
                            oninput: move |evt| base_url_input.set(evt.value().to_string()),
                        }
                    }
                    button { class: "{theme::btn_primary()}", r#type: "submit", "Save" }
                }
            }

            section {
                class: "space-y-4 {theme::panel()}",
                div { class: "flex items-center justify-between",
                    h2 { class: "text-lg font-semibold text-slate-200", "Cached data" }
                    button {
                        class: "{theme::btn_danger_link()}",
                        onclick: on_clear_cache,
                        "Clear cache"
                    }
                }
                if cache_rows.is_empty() {
                    p { class: "text-sm text-slate-500", "Nothing fetched yet this session." }
                } else {
                    dl { class: "space-y-1 text-sm",
                        for (label, age) in cache_rows.into_iter() {
                            div { class: "flex justify-between",
                                dt { class: "text-slate-400", "{label}" }
                                dd { class: "text-slate-200", "fetched {age} ago" }
                            }
                        }
                    }
                }
            }

            section {
                class: "space-y-4 {theme::panel()}",
                h2 { class: "text-lg font-semibold text-slate-200", "About" }
                p { class: "text-sm text-slate-400",
                    "{APP_NAME} {version_label()} — "
                    a {
                        class: "{theme::btn_link()}",
                        href: "{APP_REPO_URL}",
                        target: "_blank",
                        "source"
                    }
                }
                div { class: "flex items-center gap-4",
                    button {
                        class: "{theme::btn_secondary()}",
                        disabled: checking(),
                        onclick: on_check_update,
                        "{check_label}"
                    }
                    if let Some(status) = update_status() {
                        span { class: "text-sm text-slate-300", "{status}" }
                    }
                }
            }
        }
    }
}

fn resource_label(resource: &CacheResource) -> &'static str {
    match resource {
        CacheResource::Orders => "Orders",
        CacheResource::Products => "Products",
        CacheResource::Customers => "Customers",
        CacheResource::Payments => "Payments",
        CacheResource::Directory => "Agency directory",
        CacheResource::Stats => "Dashboard stats",
    }
}

fn humanize_age(fetched_at: SystemTime) -> String {
    let secs = fetched_at
        .elapsed()
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0);
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else {
        format!("{}h", secs / 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn ages_read_like_short_durations() {
        let now = SystemTime::now();
        assert_eq!(humanize_age(now), "0s");
        assert_eq!(humanize_age(now - Duration::from_secs(120)), "2m");
        assert_eq!(humanize_age(now - Duration::from_secs(7200)), "2h");
    }
}
