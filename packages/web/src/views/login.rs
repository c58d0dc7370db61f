//! Login view: email/password form plus a passwordless magic link sharing
//! the email field.

use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Input};
use ui::{use_auth, use_catalog};

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let catalog = use_catalog();
    let auth = use_auth();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut notice = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // Already signed in: nothing to do here.
    if !auth().loading && auth().user.is_some() {
        nav.replace(Route::Works {});
    }

    let login_catalog = catalog.clone();
    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let catalog = login_catalog.clone();
        spawn(async move {
            error.set(None);
            notice.set(None);

            let e = email().trim().to_string();
            let p = password();

            if e.is_empty() || p.is_empty() {
                error.set(Some("Enter your email and password".to_string()));
                return;
            }

            loading.set(true);
            match catalog.sign_in(&e, &p).await {
                Ok(_) => {
                    nav.replace(Route::Works {});
                }
                Err(err) => {
                    loading.set(false);
                    error.set(Some(err.to_string()));
                }
            }
        });
    };

    let handle_magic_link = move |_| {
        let catalog = catalog.clone();
        spawn(async move {
            error.set(None);
            notice.set(None);

            let e = email().trim().to_string();
            if e.is_empty() {
                error.set(Some("Enter your email first".to_string()));
                return;
            }

            loading.set(true);
            match catalog.request_magic_link(&e, current_url().as_deref()).await {
                Ok(()) => notice.set(Some("Check your email for the sign-in link.".to_string())),
                Err(err) => error.set(Some(err.to_string())),
            }
            loading.set(false);
        });
    };

    rsx! {
        div { class: "auth-view",
            h1 { "Corral" }
            p { class: "auth-view__subtitle", "Sign in to your account" }

            form { class: "auth-form", onsubmit: handle_login,
                if let Some(err) = error() {
                    div { class: "form-error", "{err}" }
                }
                if let Some(msg) = notice() {
                    div { class: "form-notice", "{msg}" }
                }

                Input {
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
                Input {
                    r#type: "password",
                    placeholder: "Password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }
                Button {
                    variant: ButtonVariant::Primary,
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Signing in..." } else { "Sign in" }
                }
            }

            div { class: "auth-form__divider",
                div { class: "auth-form__rule" }
                span { "or" }
                div { class: "auth-form__rule" }
            }

            Button {
                variant: ButtonVariant::Ghost,
                disabled: loading(),
                onclick: handle_magic_link,
                "Email me a sign-in link"
            }

            p { class: "auth-view__footer",
                "Don't have an account? "
                Link { to: Route::Register {}, "Sign up" }
            }
        }
    }
}

/// Where the magic link should land the user: the current page.
fn current_url() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()?.location().href().ok()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}
