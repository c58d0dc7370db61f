use dioxus::prelude::*;

/// Visual style for [`Button`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Ghost,
}

impl ButtonVariant {
    fn class(self) -> &'static str {
        match self {
            ButtonVariant::Primary => "btn btn--primary",
            ButtonVariant::Ghost => "btn btn--ghost",
        }
    }
}

/// A styled button.
#[component]
pub fn Button(
    #[props(default)] variant: ButtonVariant,
    #[props(default = "".to_string())] class: String,
    #[props(default = "button".to_string())] r#type: String,
    #[props(default = false)] disabled: bool,
    #[props(default)] onclick: EventHandler<MouseEvent>,
    children: Element,
) -> Element {
    let class = format!("{} {class}", variant.class());
    let type_attr = r#type;

    rsx! {
        button {
            class: "{class}",
            r#type: "{type_attr}",
            disabled,
            onclick: move |evt| onclick.call(evt),
            {children}
        }
    }
}
