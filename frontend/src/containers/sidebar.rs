use crate::api::CourtyardClient;
use crate::models::app_state::AppState;
use crate::routes::Route;
use crate::session;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_icons::{Icon, IconId};
use yew_router::prelude::*;
use yewdux::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
    pub current_route: Route,
}

const fn icon_for(route: Route) -> IconId {
    match route {
        Route::Dashboard => IconId::HeroiconsOutlineChartPie,
        Route::Owners => IconId::HeroiconsOutlineUsers,
        Route::Properties => IconId::HeroiconsOutlineBuildingOffice2,
        Route::Utility => IconId::HeroiconsOutlineBolt,
        Route::Wallet => IconId::HeroiconsOutlineWallet,
        Route::AiChat => IconId::HeroiconsOutlineChatBubbleLeftRight,
        Route::Login | Route::NotFound => IconId::HeroiconsOutlineHome,
    }
}

/// Role-filtered navigation rail plus the logout entry.
#[function_component(Sidebar)]
pub fn sidebar(props: &SidebarProps) -> Html {
    let (state, dispatch) = use_store::<AppState>();

    let Some(user) = state.user.clone() else {
        return html! {};
    };

    let items = Route::visible_for(user.user_type);

    let on_logout = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| {
            // Local sign-out first; the server call is fire-and-forget and
            // never blocks the redirect.
            session::clear();
            spawn_local(async move {
                if let Err(err) = CourtyardClient::shared().logout().await {
                    log::warn!("server-side logout failed: {err}");
                }
            });
            dispatch.reduce_mut(|state| state.user = None);
        })
    };

    html! {
        <aside class="w-60 bg-base-200 border-r border-base-300 flex flex-col">
            <div class="p-4 text-lg font-bold border-b border-base-300">
                {"Courtyard 物业控制台"}
            </div>
            <ul class="menu flex-1 p-2 gap-1">
                { for items.into_iter().map(|route| {
                    let active = route == props.current_route;
                    let class = if active {
                        classes!("active", "font-semibold")
                    } else {
                        classes!()
                    };
                    html! {
                        <li>
                            <Link<Route> to={route} classes={class}>
                                <Icon icon_id={icon_for(route)} class="w-5 h-5" />
                                { route.title() }
                            </Link<Route>>
                        </li>
                    }
                })}
            </ul>
            <button
                class="flex items-center gap-2 p-4 text-left text-base-content/70 hover:text-base-content border-t border-base-300"
                type="button"
                onclick={on_logout}
            >
                <Icon icon_id={IconId::HeroiconsOutlineArrowRightOnRectangle} class="w-5 h-5" />
                {"退出登录"}
            </button>
        </aside>
    }
}
