use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorPanelProps {
    pub message: String,
}

/// Inline error panel for a failed view load. The shell and the other
/// views stay interactive around it.
#[function_component(ErrorPanel)]
pub fn error_panel(props: &ErrorPanelProps) -> Html {
    html! {
        <div class="alert alert-error">
            <span>{ props.message.clone() }</span>
        </div>
    }
}
