use api::{BackendConfig, HostedCatalog};
use dioxus::prelude::*;

use ui::{AuthProvider, Navbar};
use views::{Login, Register, WorkDetail, Works};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[route("/works")]
    Works {},
    #[route("/works/:work_id")]
    WorkDetail { work_id: i64 },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // One shared client for the whole page. The hosted project's URL and
    // public key are baked in when the bundle is built.
    let catalog = use_hook(|| {
        let config = BackendConfig::from_env().expect("backend configuration missing");
        HostedCatalog::hosted(config)
    });
    use_context_provider(|| catalog);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            Router::<Route> {}
        }
    }
}

/// App chrome shared by every view.
#[component]
fn Shell() -> Element {
    let nav = use_navigator();

    rsx! {
        Navbar {
            on_home: move |_| { nav.push(Route::Works {}); },
            on_login: move |_| { nav.push(Route::Login {}); },
        }
        main { class: "page",
            Outlet::<Route> {}
        }
    }
}

/// Redirect `/` to the catalog.
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Works {});
    rsx! {}
}
