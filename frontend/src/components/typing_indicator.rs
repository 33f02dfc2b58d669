use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TypingIndicatorProps {
    pub active: bool,
}

/// Assistant "thinking" bubble shown while a chat call is in flight.
#[function_component(TypingIndicator)]
pub fn typing_indicator(props: &TypingIndicatorProps) -> Html {
    if !props.active {
        return html! {};
    }

    html! {
        <div class="chat chat-start">
            <div class="chat-bubble bg-base-200 text-base-content">
                <span class="loading loading-dots loading-sm"></span>
            </div>
        </div>
    }
}
