//! Registration view with name/email/password form.

use api::RegisterOutcome;
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Input};
use ui::{use_auth, use_catalog};

use crate::Route;

/// Register page component.
#[component]
pub fn Register() -> Element {
    let catalog = use_catalog();
    let auth = use_auth();
    let nav = use_navigator();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut notice = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // Already signed in: nothing to do here.
    if !auth().loading && auth().user.is_some() {
        nav.replace(Route::Works {});
    }

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let catalog = catalog.clone();
        spawn(async move {
            error.set(None);

            let n = name().trim().to_string();
            let e = email().trim().to_string();
            let p = password();

            if n.is_empty() || e.is_empty() || p.is_empty() {
                error.set(Some("Fill in all fields".to_string()));
                return;
            }

            loading.set(true);
            match catalog.register(&e, &p, &n).await {
                Ok(RegisterOutcome::SignedIn(_)) => {
                    nav.replace(Route::Works {});
                }
                Ok(RegisterOutcome::PendingConfirmation) => {
                    loading.set(false);
                    notice.set(Some(
                        "Account created! Check your email to confirm it.".to_string(),
                    ));
                }
                Err(err) => {
                    loading.set(false);
                    error.set(Some(err.to_string()));
                }
            }
        });
    };

    rsx! {
        div { class: "auth-view",
            h1 { "Create account" }
            p { class: "auth-view__subtitle", "Join the catalog as a collaborator" }

            form { class: "auth-form", onsubmit: handle_register,
                if let Some(err) = error() {
                    div { class: "form-error", "{err}" }
                }
                if let Some(msg) = notice() {
                    div { class: "form-notice", "{msg}" }
                }

                Input {
                    placeholder: "Full name",
                    value: name(),
                    oninput: move |evt: FormEvent| name.set(evt.value()),
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
                    if loading() { "Creating account..." } else { "Sign up" }
                }
            }

            p { class: "auth-view__footer",
                "Already have an account? "
                Link { to: Route::Login {}, "Sign in" }
            }
        }
    }
}
