//! Detail view for one cataloged work, with its comment feed.

use dioxus::prelude::*;
use ui::{use_catalog, CommentSection};

/// Work detail page component.
#[component]
pub fn WorkDetail(work_id: i64) -> Element {
    let catalog = use_catalog();
    let work = use_resource(move || {
        let catalog = catalog.clone();
        async move { catalog.work(work_id).await }
    });

    rsx! {
        div { class: "work-detail",
            {
                match work() {
                    None => rsx! {
                        p { class: "hint", "Loading..." }
                    },
                    Some(None) => rsx! {
                        p { class: "hint", "This work is not in the catalog." }
                    },
                    Some(Some(work)) => rsx! {
                        article {
                            h1 { "{work.title}" }
                            dl { class: "work-detail__fields",
                                if let Some(author) = &work.author {
                                    dt { "Author" }
                                    dd { "{author}" }
                                }
                                if let Some(kind) = &work.kind {
                                    dt { "Genre" }
                                    dd { "{kind}" }
                                }
                                if let Some(year) = work.year {
                                    dt { "Year" }
                                    dd { "{year}" }
                                }
                            }
                            if let Some(notes) = &work.notes {
                                p { class: "work-detail__notes", "{notes}" }
                            }
                        }
                    },
                }
            }

            CommentSection { work_id }
        }
    }
}
