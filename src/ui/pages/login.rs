use dioxus::prelude::*;

use crate::{
    app::{force_fetch, persist_user_state},
    domain::{ApiConfig, AppState, CacheResource},
    infra::api::AicoClient,
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        theme,
    },
    util::version::{version_label, APP_NAME},
};

#[component]
pub fn LoginPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let api_config = use_context::<Signal<ApiConfig>>();
    let last_username = use_context::<Signal<String>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let data_request = use_context::<Signal<Option<CacheResource>>>();

    let mut username = use_signal(|| last_username());
    let mut password = use_signal(String::new);
    let busy = use_signal(|| false);

    let version = version_label();

    let on_submit = {
        let state = state.clone();
        let api_config = api_config.clone();
        let toasts = toasts.clone();
        let data_request = data_request.clone();
        let username = username.clone();
        let password = password.clone();
        let busy = busy.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            if busy() {
                return;
            }

            let user = username().trim().to_string();
            let pass = password();
            if user.is_empty() || pass.is_empty() {
                push_toast(
                    toasts.clone(),
                    ToastKind::Warning,
                    "Enter both username and password.",
                );
                return;
            }

            let mut state = state.clone();
            let api_config = api_config.clone();
            let toasts = toasts.clone();
            let data_request = data_request.clone();
            let mut password = password.clone();
            let mut busy = busy.clone();
            busy.set(true);

            spawn(async move {
                let client = api_config.with(|config| AicoClient::new(config));
                let result = match client {
                    Ok(client) => client.login(&user, &pass).await,
                    Err(err) => Err(err),
                };

                match result {
                    Ok((current_user, token)) => {
                        password.set(String::new());
                        state.with_mut(|st| st.session.sign_in(current_user, token));
                        persist_user_state(&state, &api_config);
                        // Commission rates are needed before the first draft.
                        force_fetch(data_request.clone(), CacheResource::Directory);
                        push_toast(toasts.clone(), ToastKind::Success, "Signed in.");
                    }
                    Err(err) => {
                        push_toast(
                            toasts.clone(),
                            ToastKind::Error,
                            format!("Sign-in failed: {err}"),
                        );
                    }
                }
                busy.set(false);
            });
        }
    };

    let button_label = if busy() { "Signing in..." } else { "Sign in" };

    rsx! {
        div { class: "flex min-h-screen items-center justify-center px-6",
            div { class: "w-full max-w-sm space-y-6",
                div { class: "text-center",
                    h1 { class: "text-2xl font-semibold tracking-tight", "{APP_NAME}" }
                    p { class: "mt-1 text-xs text-slate-500", "Order management · {version}" }
                }
                form {
                    class: "space-y-4 {theme::panel()}",
                    onsubmit: on_submit,
                    div {
                        label { class: "{theme::label_class()}", "Username" }
                        input {
                            class: "{theme::input_class()}",
                            value: username(),
                            oninput: move |evt| username.set(evt.value().to_string()),
                            placeholder: "e.g. ayse.k",
                        }
                    }
                    div {
                        label { class: "{theme::label_class()}", "Password" }
                        input {
                            class: "{theme::input_class()}",
                            r#type: "password",
                            value: password(),
                            oninput: move |evt| password.set(evt.value().to_string()),
                        }
                    }
                    button {
                        class: "w-full {theme::btn_primary()}",
                        r#type: "submit",
                        disabled: busy(),
                        "{button_label}"
                    }
                }
            }
        }
    }
}
