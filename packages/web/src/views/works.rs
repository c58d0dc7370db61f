//! Catalog listing view.

use dioxus::prelude::*;
use ui::use_catalog;

use crate::Route;

/// The works catalog, ordered by title.
#[component]
pub fn Works() -> Element {
    let catalog = use_catalog();
    let works = use_resource(move || {
        let catalog = catalog.clone();
        async move { catalog.works().await }
    });

    rsx! {
        div { class: "works",
            h1 { "Catalog" }
            {
                match works() {
                    None => rsx! {
                        p { class: "hint", "Loading catalog..." }
                    },
                    Some(list) if list.is_empty() => rsx! {
                        p { class: "hint", "The catalog is empty." }
                    },
                    Some(list) => rsx! {
                        ul { class: "work-list",
                            for work in list {
                                li { key: "{work.id}", class: "work-list__item",
                                    Link { to: Route::WorkDetail { work_id: work.id },
                                        span { class: "work-list__title", "{work.title}" }
                                        if let Some(author) = &work.author {
                                            span { class: "work-list__author", "{author}" }
                                        }
                                    }
                                }
                            }
                        }
                    },
                }
            }
        }
    }
}
