//! Authentication context and hooks for the UI.

use api::{AuthChange, HostedCatalog, User};
use dioxus::prelude::*;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    /// Profile display name, loaded as a side effect of signing in.
    pub display_name: Option<String>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            display_name: None,
            loading: true,
        }
    }
}

impl AuthState {
    /// What the signed-in panel shows: the profile name, or the email when
    /// no profile row exists.
    pub fn label(&self) -> Option<String> {
        let user = self.user.as_ref()?;
        Some(
            self.display_name
                .clone()
                .unwrap_or_else(|| user.email.clone()),
        )
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user signs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// The shared backend client.
pub fn use_catalog() -> HostedCatalog {
    use_context::<HostedCatalog>()
}

/// Provider component that manages authentication state.
/// Wrap the app with this component (inside the catalog context) to enable
/// authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let catalog = use_catalog();
    let mut auth_state = use_signal(AuthState::default);

    // Session bootstrap on mount: a failed check just lands on the
    // signed-out panel.
    let bootstrap_catalog = catalog.clone();
    let _ = use_resource(move || {
        let catalog = bootstrap_catalog.clone();
        async move {
            let user = catalog.check_session().await;
            let display_name = match &user {
                Some(user) => catalog.profile_name(&user.id).await,
                None => None,
            };
            auth_state.set(AuthState {
                user,
                display_name,
                loading: false,
            });
        }
    });

    // One long-lived subscription drives the panel toggle for the life of
    // the page.
    use_effect(move || {
        let catalog = catalog.clone();
        spawn(async move {
            let mut events = catalog.subscribe();
            while let Some(change) = events.next().await {
                match change {
                    AuthChange::SignedIn(user) => {
                        let display_name = catalog.profile_name(&user.id).await;
                        auth_state.set(AuthState {
                            user: Some(user),
                            display_name,
                            loading: false,
                        });
                    }
                    AuthChange::SignedOut => {
                        auth_state.set(AuthState {
                            user: None,
                            display_name: None,
                            loading: false,
                        });
                    }
                }
            }
        });
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Button to sign out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Sign out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let catalog = use_catalog();

    let onclick = move |_| {
        let catalog = catalog.clone();
        async move {
            // The panel flips when the signed-out event lands.
            catalog.sign_out().await;
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
