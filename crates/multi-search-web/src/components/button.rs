use yew::prelude::*;

#[derive(PartialEq)]
pub enum ButtonKind {
    Standard,
    Primary,
    Danger,
}

#[derive(Properties, PartialEq)]
pub struct ButtonProps {
    pub text: AttrValue,
    #[prop_or_default]
    pub title: Option<AttrValue>,
    #[prop_or(ButtonKind::Standard)]
    pub kind: ButtonKind,
    /// Render as `type="submit"` so it submits the surrounding form
    #[prop_or(false)]
    pub submit: bool,
    #[prop_or_default]
    pub onclick: Option<Callback<MouseEvent>>,
}

#[function_component]
pub fn Button(props: &ButtonProps) -> Html {
    let class = classes! {
        "button",
        match props.kind {
            ButtonKind::Standard => None,
            ButtonKind::Primary => Some("primary"),
            ButtonKind::Danger => Some("danger"),
        }
    };
    let kind = if props.submit { "submit" } else { "button" };

    html! {
        <button
            type={ kind }
            { class }
            title={ props.title.clone() }
            aria-label={ props.title.clone() }
            onclick={ props.onclick.clone() }>
            { props.text.clone() }
        </button>
    }
}
