use crate::components::clock::Clock;
use crate::models::app_state::AppState;
use crate::routes::Route;
use yew::prelude::*;
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub current_route: Route,
}

/// Top bar: page title (set synchronously on navigation), live clock and
/// the signed-in user's name.
#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let user = use_selector(|state: &AppState| state.user.clone());

    let user_name = (*user)
        .as_ref()
        .map(|user| user.display_name().to_string())
        .unwrap_or_default();

    html! {
        <header class="navbar bg-base-200 border-b border-base-300 px-6">
            <div class="flex-1">
                <h1 class="text-xl font-semibold">{ props.current_route.title() }</h1>
            </div>
            <div class="flex items-center gap-4">
                <Clock />
                <span class="text-sm text-base-content/80">{ user_name }</span>
            </div>
        </header>
    }
}
