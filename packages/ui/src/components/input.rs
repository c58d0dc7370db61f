use dioxus::prelude::*;

/// A styled single-line input.
#[component]
pub fn Input(
    #[props(default = "".to_string())] class: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default = "".to_string())] placeholder: String,
    #[props(default = "".to_string())] value: String,
    oninput: EventHandler<FormEvent>,
) -> Element {
    let type_attr = r#type;
    rsx! {
        input {
            class: "input {class}",
            r#type: "{type_attr}",
            placeholder: "{placeholder}",
            value: "{value}",
            oninput: move |evt| oninput.call(evt),
        }
    }
}

/// A styled multi-line input.
#[component]
pub fn TextArea(
    #[props(default = "".to_string())] class: String,
    #[props(default = "".to_string())] placeholder: String,
    #[props(default = "".to_string())] value: String,
    oninput: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        textarea {
            class: "input input--area {class}",
            placeholder: "{placeholder}",
            value: "{value}",
            oninput: move |evt| oninput.call(evt),
        }
    }
}
