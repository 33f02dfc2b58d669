use crate::components::loading::Loading;
use crate::containers::layout::Layout;
use crate::models::app_state::AppState;
use crate::pages::{
    AiChatPage, DashboardPage, LoginPage, NotFoundPage, OwnersPage, PropertiesPage, UtilityPage,
    WalletPage,
};
use crate::routes::Route;
use crate::session;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

/// Application shell: restores the session marker, then hands control to
/// the router. No content renders before the marker has been checked.
#[function_component(App)]
pub fn app() -> Html {
    let (_state, dispatch) = use_store::<AppState>();
    let restored = use_state(|| false);

    {
        let restored = restored.clone();
        let dispatch = dispatch.clone();
        use_effect_with((), move |_| {
            dispatch.set(AppState {
                user: session::load(),
            });
            restored.set(true);
            || ()
        });
    }

    if !*restored {
        return html! { <Loading /> };
    }

    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn switch(route: Route) -> Html {
    html! { <RouteView {route} /> }
}

#[derive(Properties, PartialEq)]
struct RouteViewProps {
    route: Route,
}

/// Per-navigation gate: unauthenticated sessions are redirected to the
/// login entry point, role-restricted views bounce to the role default,
/// and everything else renders inside the layout.
#[function_component(RouteView)]
fn route_view(props: &RouteViewProps) -> Html {
    let user = use_selector(|state: &AppState| state.user.clone());
    let user = (*user).clone();

    if props.route == Route::Login {
        return match user {
            Some(user) => {
                html! { <Redirect<Route> to={Route::default_for(user.user_type)} /> }
            }
            None => html! { <LoginPage /> },
        };
    }

    let Some(user) = user else {
        return html! { <Redirect<Route> to={Route::Login} /> };
    };

    if !props.route.allowed_for(user.user_type) {
        return html! { <Redirect<Route> to={Route::default_for(user.user_type)} /> };
    }

    let page = match props.route {
        Route::Dashboard => html! { <DashboardPage /> },
        Route::Owners => html! { <OwnersPage /> },
        Route::Properties => html! { <PropertiesPage /> },
        Route::Utility => html! { <UtilityPage /> },
        Route::Wallet => html! { <WalletPage /> },
        Route::AiChat => html! { <AiChatPage /> },
        Route::Login | Route::NotFound => html! { <NotFoundPage /> },
    };

    html! {
        <Layout current_route={props.route}>
            { page }
        </Layout>
    }
}
