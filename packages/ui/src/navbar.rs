//! Top navigation bar with the signed-in / signed-out panel toggle.

use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::LogoutButton;

/// Two mutually exclusive panels: a sign-in button while signed out, the
/// user's display name plus a sign-out button while signed in.
#[component]
pub fn Navbar(
    /// Navigate to the login view.
    on_login: EventHandler<()>,
    /// Navigate to the catalog root.
    on_home: EventHandler<()>,
) -> Element {
    let auth = use_auth();
    let state = auth();

    let session_panel = match (state.loading, state.label()) {
        (true, _) => rsx! {
            span { class: "navbar__hint", "…" }
        },
        (false, Some(label)) => rsx! {
            span { class: "navbar__user", "{label}" }
            LogoutButton { class: "btn btn--ghost" }
        },
        (false, None) => rsx! {
            button {
                class: "btn btn--primary",
                onclick: move |_| on_login.call(()),
                "Sign in"
            }
        },
    };

    rsx! {
        header { class: "navbar",
            button {
                class: "navbar__brand",
                onclick: move |_| on_home.call(()),
                "Corral"
            }
            div { class: "navbar__session", {session_panel} }
        }
    }
}
