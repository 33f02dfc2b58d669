use crate::api::{ApiError, CourtyardClient};
use crate::models::app_state::AppState;
use crate::routes::Route;
use crate::session;
use shared::models::LoginRequest;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::hooks::use_navigator;
use yewdux::prelude::use_store;

/// Sign-in form. On success it persists the session marker, seeds the
/// store and enters the shell at the role's default view.
#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let (_state, dispatch) = use_store::<AppState>();
    let user_name = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);
    let navigator = use_navigator();

    let onsubmit = {
        let user_name_handle = user_name.clone();
        let password_handle = password.clone();
        let error_handle = error.clone();
        let loading_handle = loading.clone();
        let dispatch = dispatch.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let user_name_value = (*user_name_handle).clone();
            let password_value = (*password_handle).clone();
            loading_handle.set(true);
            error_handle.set(None);
            let loading_ref = loading_handle.clone();
            let error_ref = error_handle.clone();
            let dispatch = dispatch.clone();
            let navigator_handle = navigator.clone();
            spawn_local(async move {
                let client = CourtyardClient::shared();
                let request = LoginRequest {
                    user_name: user_name_value,
                    password: password_value,
                };
                match client.login(&request).await {
                    Ok(envelope) => match envelope.ok() {
                        Ok(user) => {
                            session::store(&user);
                            let target = Route::default_for(user.user_type);
                            dispatch.reduce_mut(|state| state.user = Some(user));
                            if let Some(ref nav) = navigator_handle {
                                nav.push(&target);
                            }
                        }
                        Err(message) => error_ref.set(Some(message)),
                    },
                    Err(ApiError::Transport(_)) => {
                        error_ref.set(Some("无法连接服务器".to_string()));
                    }
                    Err(err) => error_ref.set(Some(err.to_string())),
                }
                loading_ref.set(false);
            });
        })
    };

    let on_user_name_change = {
        let user_name = user_name.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                user_name.set(input.value());
            }
        })
    };

    let on_password_change = {
        let password = password.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                password.set(input.value());
            }
        })
    };

    let is_busy = *loading;
    let disable_submit = (*user_name).is_empty() || (*password).is_empty() || is_busy;

    html! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="card w-full max-w-md shadow-lg bg-base-100">
                <form class="card-body" onsubmit={onsubmit}>
                    <h2 class="card-title text-2xl">{"Courtyard 物业控制台"}</h2>
                    if let Some(message) = &*error {
                        <div class="alert alert-error">
                            <span>{ message.clone() }</span>
                        </div>
                    }
                    <div class="form-control">
                        <label class="label" for="user-name">
                            <span class="label-text">{"用户名"}</span>
                        </label>
                        <input
                            id="user-name"
                            class="input input-bordered"
                            type="text"
                            required=true
                            value={(*user_name).clone()}
                            oninput={on_user_name_change}
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="password">
                            <span class="label-text">{"密码"}</span>
                        </label>
                        <input
                            id="password"
                            class="input input-bordered"
                            type="password"
                            required=true
                            value={(*password).clone()}
                            oninput={on_password_change}
                        />
                    </div>
                    <div class="form-control mt-6">
                        <button class="btn btn-primary" type="submit" disabled={disable_submit}>
                            { if is_busy { "登录中..." } else { "登录" } }
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
