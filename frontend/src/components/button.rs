use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ButtonProps {
    pub id: AttrValue,
    pub title: AttrValue,
    #[prop_or_default]
    pub left_icon: Option<Html>,
    #[prop_or_default]
    pub container_class: Classes,
    #[prop_or_default]
    pub onclick: Option<Callback<MouseEvent>>,
}

#[function_component(Button)]
pub fn button(props: &ButtonProps) -> Html {
    let onclick = props.onclick.clone().unwrap_or_else(|| Callback::from(|_| ()));

    html! {
        <button
            id={props.id.clone()}
            class={classes!("pill-button", props.container_class.clone())}
            {onclick}
        >
            { props.left_icon.clone().unwrap_or_default() }
            <span class="pill-button-title">{ props.title.clone() }</span>
        </button>
    }
}
