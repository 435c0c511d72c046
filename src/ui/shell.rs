use dioxus::prelude::*;

use crate::app::Route;
use crate::domain::AppState;
use crate::ui::pages::LoginPage;
use crate::util::version::APP_NAME;

#[component]
pub fn Shell(children: Element) -> Element {
    let state = use_context::<Signal<AppState>>();
    let signed_in = state.with(|st| st.session.is_authenticated());

    // Everything sits behind the login gate.
    if !signed_in {
        return rsx! {
            div { class: "min-h-screen bg-slate-950 text-slate-100 font-sans",
                LoginPage {}
            }
        };
    }

    let current_route = use_route::<Route>();
    let nav = use_navigator();

    let display_name = state.with(|st| {
        st.session
            .user
            .as_ref()
            .map(|user| user.display_name.clone())
            .unwrap_or_default()
    });

    let mut state_mut = state;

    rsx! {
        div { class: "min-h-screen bg-slate-950 text-slate-100 font-sans",
            header {
                class: "border-b border-slate-900/60 bg-slate-950/80 backdrop-blur px-6 py-4",
                div { class: "mx-auto flex max-w-6xl items-center justify-between gap-4",
                    div { class: "flex items-center gap-3",
                        h1 { class: "text-xl font-semibold tracking-tight", "{APP_NAME}" }
                        span { class: "text-xs text-slate-500", "{display_name}" }
                    }
                    nav { class: "flex gap-2 text-sm",
                        NavButton { active: matches!(current_route, Route::Dashboard {}), onclick: move |_| { nav.push(Route::Dashboard {}); }, label: "Dashboard" }
                        NavButton { active: matches!(current_route, Route::Orders {}), onclick: move |_| { nav.push(Route::Orders {}); }, label: "Orders" }
                        NavButton { active: matches!(current_route, Route::OrderNew {}), onclick: move |_| { nav.push(Route::OrderNew {}); }, label: "New Order" }
                        NavButton { active: matches!(current_route, Route::Products {}), onclick: move |_| { nav.push(Route::Products {}); }, label: "Products" }
                        NavButton { active: matches!(current_route, Route::Customers {}), onclick: move |_| { nav.push(Route::Customers {}); }, label: "Customers" }
                        NavButton { active: matches!(current_route, Route::Payments {}), onclick: move |_| { nav.push(Route::Payments {}); }, label: "Payments" }
                        NavButton { active: matches!(current_route, Route::Settings {}), onclick: move |_| { nav.push(Route::Settings {}); }, label: "⚙️" }
                        button {
                            class: "rounded-lg border border-transparent px-3 py-2 text-slate-500 transition hover:border-slate-700 hover:text-slate-200",
                            onclick: move |_| {
                                state_mut.with_mut(|st| {
                                    st.session.sign_out();
                                    st.cache.clear();
                                });
                            },
                            "Sign out"
                        }
                    }
                }
            }
            main { class: "mx-auto max-w-6xl px-6 py-10",
                {children}
            }
        }
    }
}

#[component]
fn NavButton(active: bool, onclick: EventHandler<()>, label: &'static str) -> Element {
    let class = if active {
        "rounded-lg border border-indigo-500/60 bg-indigo-500/15 px-3 py-2 font-semibold text-indigo-300"
    } else {
        "rounded-lg border border-transparent px-3 py-2 text-slate-400 transition hover:border-slate-700 hover:bg-slate-900/80 hover:text-slate-200"
    };

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
