//! Comment feed UI for a work's detail view.

use api::Comment;
use chrono::{DateTime, Local, Utc};
use dioxus::prelude::*;

use crate::auth::{use_auth, use_catalog};
use crate::components::{Button, ButtonVariant, TextArea};

/// "12 May 2024, 18:45" in the viewer's timezone.
fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%-d %B %Y, %H:%M")
        .to_string()
}

/// Comment list + submission form for one cataloged work.
///
/// The form only renders for signed-in users; everyone gets the list, which
/// loads after the view is attached and reloads after each submission.
#[component]
pub fn CommentSection(work_id: i64) -> Element {
    let catalog = use_catalog();
    let auth = use_auth();
    let mut body = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut posting = use_signal(|| false);
    let mut reload = use_signal(|| 0u32);

    let feed_catalog = catalog.clone();
    let comments = use_resource(move || {
        let catalog = feed_catalog.clone();
        async move {
            reload(); // re-run after every successful post
            catalog.comments(work_id).await
        }
    });

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let catalog = catalog.clone();
        spawn(async move {
            error.set(None);

            let text = body().trim().to_string();
            if text.is_empty() {
                error.set(Some("Write a comment first.".to_string()));
                return;
            }

            posting.set(true);
            match catalog
                .post_comment(work_id, &text, Comment::DEFAULT_KIND)
                .await
            {
                Ok(_) => {
                    body.set(String::new());
                    let next = reload.peek().wrapping_add(1);
                    reload.set(next);
                }
                Err(err) => {
                    tracing::error!("posting comment on work {work_id}: {err}");
                    error.set(Some(err.to_string()));
                }
            }
            posting.set(false);
        });
    };

    rsx! {
        section { class: "comments",
            h3 { class: "comments__title", "Comments & validations" }

            if auth().user.is_some() {
                form { class: "comment-form", onsubmit: handle_submit,
                    if let Some(err) = error() {
                        div { class: "form-error", "{err}" }
                    }
                    TextArea {
                        placeholder: "Write a comment about this work...",
                        value: body(),
                        oninput: move |evt: FormEvent| body.set(evt.value()),
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        r#type: "submit",
                        disabled: posting(),
                        if posting() { "Sending..." } else { "Post comment" }
                    }
                }
            } else {
                p { class: "comments__hint", "Sign in to leave a comment." }
            }

            {
                match comments() {
                    None => rsx! {
                        p { class: "comments__hint", "Loading comments..." }
                    },
                    Some(list) if list.is_empty() => rsx! {
                        p { class: "comments__hint", "No comments yet." }
                    },
                    Some(list) => rsx! {
                        ul { class: "comment-list",
                            for comment in list {
                                CommentItem { key: "{comment.id}", comment }
                            }
                        }
                    },
                }
            }
        }
    }
}

/// One rendered comment. All user-supplied text goes through text nodes, so
/// markup in names or bodies displays as text instead of becoming structure.
#[component]
fn CommentItem(comment: Comment) -> Element {
    let author = comment.author_name().to_string();
    let date = format_timestamp(comment.created_at);

    rsx! {
        li { class: "comment-item",
            div { class: "comment-item__header",
                strong { "{author}" }
                span { class: "comment-item__date", "{date}" }
            }
            div { class: "comment-item__body", "{comment.body}" }
            span { class: "comment-item__kind", "{comment.kind}" }
        }
    }
}
