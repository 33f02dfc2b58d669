use crate::api::CourtyardClient;
use crate::components::dialog;
use crate::components::modal::Modal;
use shared::models::{Property, SaveUserRequest, User, UserType};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// Form state backing the create/edit modal.
#[derive(Clone, PartialEq, Default)]
struct UserForm {
    user_id: Option<i64>,
    user_name: String,
    password: String,
    name: String,
    phone: String,
    gender: String,
    user_type: String,
}

impl UserForm {
    fn for_edit(user: &User) -> Self {
        Self {
            user_id: Some(user.user_id),
            user_name: user.user_name.clone(),
            // Never prefilled; an empty field means "keep the password".
            password: String::new(),
            name: user.name.clone().unwrap_or_default(),
            phone: user.phone.clone().unwrap_or_default(),
            gender: user.gender.clone().unwrap_or_default(),
            user_type: user.user_type.as_wire().to_string(),
        }
    }

    fn is_edit(&self) -> bool {
        self.user_id.is_some()
    }
}

/// Required-field validation, mirroring what the form has always
/// enforced: username, real name and type everywhere, password only on
/// creation, gender only settable at creation.
fn validate_user_form(form: &UserForm) -> Result<SaveUserRequest, String> {
    let user_name = form.user_name.trim();
    if user_name.is_empty() {
        return Err("请输入用户名".to_string());
    }
    let name = form.name.trim();
    if name.is_empty() {
        return Err("请输入真实姓名".to_string());
    }
    if form.user_type.is_empty() {
        return Err("请选择用户类型".to_string());
    }
    let password = form.password.trim();
    if !form.is_edit() && password.is_empty() {
        return Err("请输入密码".to_string());
    }

    Ok(SaveUserRequest {
        user_id: form.user_id,
        user_name: user_name.to_string(),
        password: (!password.is_empty()).then(|| password.to_string()),
        name: name.to_string(),
        phone: form.phone.trim().to_string(),
        user_type: form.user_type.clone(),
        gender: (!form.is_edit()).then(|| form.gender.clone()),
    })
}

fn validate_keyword(keyword: &str) -> Result<(), String> {
    if keyword.chars().count() > 50 {
        Err("搜索关键词过长，请控制在50字以内".to_string())
    } else {
        Ok(())
    }
}

/// Client-side type filter applied on top of whatever the server
/// returned.
fn filter_by_type(users: &[User], filter: &str) -> Vec<User> {
    if filter.is_empty() {
        return users.to_vec();
    }
    users
        .iter()
        .filter(|user| user.user_type.as_wire() == filter)
        .cloned()
        .collect()
}

async fn fetch_users(keyword: Option<String>) -> Result<Vec<User>, String> {
    let client = CourtyardClient::shared();
    let result = match keyword {
        Some(keyword) => client.search_users(&keyword).await,
        None => client.list_users().await,
    };
    match result {
        Ok(envelope) => envelope.ok().map_err(|message| format!("加载失败: {message}")),
        Err(err) => {
            log::error!("user list fetch failed: {err}");
            Err("系统错误".to_string())
        }
    }
}

/// What the detail modal currently shows.
#[derive(Clone, PartialEq)]
enum DetailState {
    Loading,
    Ready {
        user: User,
        holdings: Option<Holdings>,
    },
    Failed(String),
}

/// An owner's property list, or the degraded note when it cannot load.
#[derive(Clone, PartialEq)]
enum Holdings {
    Loaded(Vec<Property>),
    Unavailable,
}

fn bind_input(
    editor: &UseStateHandle<Option<UserForm>>,
    apply: fn(&mut UserForm, String),
) -> Callback<InputEvent> {
    let editor = editor.clone();
    Callback::from(move |event: InputEvent| {
        if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
            if let Some(mut form) = (*editor).clone() {
                apply(&mut form, input.value());
                editor.set(Some(form));
            }
        }
    })
}

fn bind_select(
    editor: &UseStateHandle<Option<UserForm>>,
    apply: fn(&mut UserForm, String),
) -> Callback<Event> {
    let editor = editor.clone();
    Callback::from(move |event: Event| {
        if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
            if let Some(mut form) = (*editor).clone() {
                apply(&mut form, select.value());
                editor.set(Some(form));
            }
        }
    })
}

/// User and owner administration: list, search, type filter, detail
/// modal with holdings, create/edit modal, delete.
#[function_component(OwnersPage)]
pub fn owners_page() -> Html {
    let users = use_state(Vec::<User>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let keyword = use_state(String::new);
    let type_filter = use_state(String::new);
    let detail = use_state(|| None::<DetailState>);
    let editor = use_state(|| None::<UserForm>);
    let saving = use_state(|| false);

    let reload = {
        let users = users.clone();
        let loading = loading.clone();
        let error = error.clone();
        Callback::from(move |keyword: Option<String>| {
            let users = users.clone();
            let loading = loading.clone();
            let error = error.clone();
            loading.set(true);
            error.set(None);
            spawn_local(async move {
                match fetch_users(keyword).await {
                    Ok(list) => users.set(list),
                    Err(message) => error.set(Some(message)),
                }
                loading.set(false);
            });
        })
    };

    {
        let reload = reload.clone();
        use_effect_with((), move |_| {
            reload.emit(None);
            || ()
        });
    }

    let on_keyword_input = {
        let keyword = keyword.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                keyword.set(input.value());
            }
        })
    };

    let on_search = {
        let keyword = keyword.clone();
        let reload = reload.clone();
        Callback::from(move |_: MouseEvent| {
            let trimmed = keyword.trim().to_string();
            if let Err(message) = validate_keyword(&trimmed) {
                dialog::alert(&message);
                return;
            }
            reload.emit(Some(trimmed));
        })
    };

    let on_filter_change = {
        let type_filter = type_filter.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
                type_filter.set(select.value());
            }
        })
    };

    let on_show_detail = {
        let detail = detail.clone();
        Callback::from(move |user_id: i64| {
            let detail = detail.clone();
            detail.set(Some(DetailState::Loading));
            spawn_local(async move {
                let client = CourtyardClient::shared();
                let user = match client.get_user(user_id).await {
                    Ok(envelope) => match envelope.ok() {
                        Ok(user) => user,
                        Err(message) => {
                            detail.set(Some(DetailState::Failed(format!("加载失败：{message}"))));
                            return;
                        }
                    },
                    Err(err) => {
                        log::error!("user detail fetch failed: {err}");
                        detail.set(Some(DetailState::Failed("系统错误，加载失败".to_string())));
                        return;
                    }
                };

                // Holdings are best effort; a failure here must not lose
                // the basic info already fetched.
                let holdings = if user.user_type == UserType::Owner {
                    match client.owner_detail(user_id).await {
                        Ok(envelope) => match envelope.ok() {
                            Ok(detail) => Some(Holdings::Loaded(detail.properties)),
                            Err(_) => Some(Holdings::Unavailable),
                        },
                        Err(_) => Some(Holdings::Unavailable),
                    }
                } else {
                    None
                };

                detail.set(Some(DetailState::Ready { user, holdings }));
            });
        })
    };

    let on_close_detail = {
        let detail = detail.clone();
        Callback::from(move |()| detail.set(None))
    };

    let on_create = {
        let editor = editor.clone();
        Callback::from(move |_: MouseEvent| editor.set(Some(UserForm::default())))
    };

    let on_edit = {
        let editor = editor.clone();
        Callback::from(move |user_id: i64| {
            let editor = editor.clone();
            spawn_local(async move {
                match CourtyardClient::shared().get_user(user_id).await {
                    Ok(envelope) => match envelope.ok() {
                        Ok(user) => editor.set(Some(UserForm::for_edit(&user))),
                        Err(message) => dialog::alert(&format!("获取用户详情失败: {message}")),
                    },
                    Err(err) => {
                        log::error!("user fetch for edit failed: {err}");
                        dialog::alert("系统错误");
                    }
                }
            });
        })
    };

    let on_close_editor = {
        let editor = editor.clone();
        Callback::from(move |()| editor.set(None))
    };

    let on_save = {
        let editor = editor.clone();
        let saving = saving.clone();
        let reload = reload.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(form) = (*editor).clone() else {
                return;
            };
            let request = match validate_user_form(&form) {
                Ok(request) => request,
                Err(message) => {
                    dialog::alert(&message);
                    return;
                }
            };
            if *saving {
                return;
            }
            saving.set(true);
            let editor = editor.clone();
            let saving = saving.clone();
            let reload = reload.clone();
            let is_edit = form.is_edit();
            spawn_local(async move {
                let client = CourtyardClient::shared();
                let outcome = if is_edit {
                    client.update_user(&request).await.map(|env| (env.code, env.message))
                } else {
                    client.create_user(&request).await.map(|env| (env.code, env.message))
                };
                match outcome {
                    Ok((200, _)) => {
                        dialog::alert(if is_edit { "更新成功" } else { "创建成功" });
                        editor.set(None);
                        reload.emit(None);
                    }
                    Ok((_, message)) => {
                        dialog::alert(&format!(
                            "操作失败: {}",
                            message.unwrap_or_else(|| "未知错误".to_string())
                        ));
                    }
                    Err(err) => {
                        log::error!("user save failed: {err}");
                        dialog::alert("系统错误");
                    }
                }
                saving.set(false);
            });
        })
    };

    let on_delete = {
        let reload = reload.clone();
        Callback::from(move |user_id: i64| {
            if !dialog::confirm("确认删除该用户？此操作不可恢复！") {
                return;
            }
            let reload = reload.clone();
            spawn_local(async move {
                match CourtyardClient::shared().delete_user(user_id).await {
                    Ok(envelope) => {
                        if envelope.is_success() {
                            dialog::alert("删除成功");
                            reload.emit(None);
                        } else {
                            dialog::alert(&format!("删除失败: {}", envelope.message_or_default()));
                        }
                    }
                    Err(err) => {
                        log::error!("user delete failed: {err}");
                        dialog::alert("系统错误");
                    }
                }
            });
        })
    };

    let visible = filter_by_type(&users, &type_filter);

    let table_body = if *loading {
        html! { <tr><td colspan="7" class="text-center">{"加载中..."}</td></tr> }
    } else if let Some(message) = &*error {
        html! { <tr><td colspan="7" class="text-center text-error">{ message.clone() }</td></tr> }
    } else if users.is_empty() {
        html! { <tr><td colspan="7" class="text-center">{"暂无数据"}</td></tr> }
    } else if visible.is_empty() {
        html! { <tr><td colspan="7" class="text-center">{"暂无符合条件的数据"}</td></tr> }
    } else {
        html! {
            { for visible.iter().map(|user| {
                let user_id = user.user_id;
                let show_detail = on_show_detail.clone();
                let edit = on_edit.clone();
                let delete = on_delete.clone();
                html! {
                    <tr>
                        <td>{ format!("#{user_id}") }</td>
                        <td class="text-primary">{ user.user_name.clone() }</td>
                        <td>{ user.name.clone().unwrap_or_else(|| "-".to_string()) }</td>
                        <td>{ user.gender.clone().unwrap_or_else(|| "-".to_string()) }</td>
                        <td>{ user.phone.clone().unwrap_or_else(|| "-".to_string()) }</td>
                        <td>{ user.user_type.label() }</td>
                        <td class="space-x-1">
                            <button class="btn btn-xs" onclick={Callback::from(move |_| show_detail.emit(user_id))}>{"详情"}</button>
                            <button class="btn btn-xs" onclick={Callback::from(move |_| edit.emit(user_id))}>{"编辑"}</button>
                            <button class="btn btn-xs btn-error" onclick={Callback::from(move |_| delete.emit(user_id))}>{"删除"}</button>
                        </td>
                    </tr>
                }
            })}
        }
    };

    html! {
        <div class="space-y-4">
            <div class="flex flex-wrap items-center gap-2">
                <input
                    class="input input-bordered input-sm w-64"
                    type="text"
                    placeholder="搜索用户名/姓名/电话"
                    value={(*keyword).clone()}
                    oninput={on_keyword_input}
                />
                <button class="btn btn-sm btn-primary" onclick={on_search}>{"搜索"}</button>
                <select class="select select-bordered select-sm" onchange={on_filter_change}>
                    <option value="" selected={type_filter.is_empty()}>{"全部类型"}</option>
                    <option value="ADMIN" selected={*type_filter == "ADMIN"}>{"管理员"}</option>
                    <option value="OWNER" selected={*type_filter == "OWNER"}>{"业主"}</option>
                </select>
                <div class="flex-1"></div>
                <button class="btn btn-sm btn-secondary" onclick={on_create}>{"新建用户"}</button>
            </div>

            <div class="overflow-x-auto">
                <table class="table table-zebra">
                    <thead>
                        <tr>
                            <th>{"ID"}</th>
                            <th>{"用户名"}</th>
                            <th>{"姓名"}</th>
                            <th>{"性别"}</th>
                            <th>{"电话"}</th>
                            <th>{"类型"}</th>
                            <th>{"操作"}</th>
                        </tr>
                    </thead>
                    <tbody>{ table_body }</tbody>
                </table>
            </div>

            { detail_modal(&detail, &on_close_detail) }
            { editor_modal(&editor, &on_close_editor, &on_save, *saving) }
        </div>
    }
}

fn detail_modal(detail: &UseStateHandle<Option<DetailState>>, on_close: &Callback<()>) -> Html {
    let Some(state) = (**detail).clone() else {
        return html! {};
    };

    let body = match state {
        DetailState::Loading => html! { <p>{"加载中..."}</p> },
        DetailState::Failed(message) => html! { <p class="text-error">{ message }</p> },
        DetailState::Ready { user, holdings } => {
            let holdings_pane = match holdings {
                None => html! {
                    <>
                        <h4 class="font-semibold mb-2">{"权限信息"}</h4>
                        <p>{"该用户为管理员，无房产信息"}</p>
                    </>
                },
                Some(Holdings::Unavailable) => html! {
                    <>
                        <h4 class="font-semibold mb-2">{"名下房产"}</h4>
                        <p class="text-base-content/60">{"无法加载房产信息"}</p>
                    </>
                },
                Some(Holdings::Loaded(properties)) => {
                    let list = if properties.is_empty() {
                        html! { <p class="text-base-content/60">{"暂无房产"}</p> }
                    } else {
                        html! {
                            <ul class="list-disc list-inside space-y-1">
                                { for properties.iter().map(|property| html! {
                                    <li>
                                        { property.location() }
                                        { format!(" ({}㎡) - ", property.area) }
                                        <span class="text-primary">{ property.p_status.label() }</span>
                                    </li>
                                })}
                            </ul>
                        }
                    };
                    html! {
                        <>
                            <h4 class="font-semibold mb-2">{"名下房产"}</h4>
                            { list }
                        </>
                    }
                }
            };

            html! {
                <div class="grid grid-cols-2 gap-4">
                    <div>
                        <h4 class="font-semibold mb-2">{"基本信息"}</h4>
                        <p><strong>{"用户ID: "}</strong>{ user.user_id }</p>
                        <p><strong>{"用户名: "}</strong>{ user.user_name.clone() }</p>
                        <p><strong>{"姓名: "}</strong>{ user.name.clone().unwrap_or_else(|| "-".to_string()) }</p>
                        <p><strong>{"性别: "}</strong>{ user.gender.clone().unwrap_or_else(|| "-".to_string()) }</p>
                        <p><strong>{"电话: "}</strong>{ user.phone.clone().unwrap_or_else(|| "-".to_string()) }</p>
                        <p><strong>{"用户类型: "}</strong>{ user.user_type.label() }</p>
                    </div>
                    <div>{ holdings_pane }</div>
                </div>
            }
        }
    };

    html! {
        <Modal title="用户详情" on_close={on_close.clone()}>
            { body }
        </Modal>
    }
}

fn editor_modal(
    editor: &UseStateHandle<Option<UserForm>>,
    on_close: &Callback<()>,
    on_save: &Callback<MouseEvent>,
    saving: bool,
) -> Html {
    let Some(form) = (**editor).clone() else {
        return html! {};
    };

    let title = if form.is_edit() { "编辑用户" } else { "新建用户" };

    let gender_field = if form.is_edit() {
        html! {
            <div class="form-control">
                <label class="label"><span class="label-text">{"性别（创建后不可修改）"}</span></label>
                <input class="input input-bordered" type="text" readonly=true
                    value={if form.gender.is_empty() { "-".to_string() } else { form.gender.clone() }} />
            </div>
        }
    } else {
        html! {
            <div class="form-control">
                <label class="label"><span class="label-text">{"性别"}</span></label>
                <select class="select select-bordered" onchange={bind_select(editor, |form, value| form.gender = value)}>
                    <option value="" selected={form.gender.is_empty()}>{"请选择"}</option>
                    <option value="男" selected={form.gender == "男"}>{"男"}</option>
                    <option value="女" selected={form.gender == "女"}>{"女"}</option>
                </select>
            </div>
        }
    };

    html! {
        <Modal title={title.to_string()} on_close={on_close.clone()}>
            <div class="grid grid-cols-2 gap-3">
                <div class="form-control">
                    <label class="label"><span class="label-text">{"用户名"}</span></label>
                    <input class="input input-bordered" type="text" value={form.user_name.clone()}
                        oninput={bind_input(editor, |form, value| form.user_name = value)} />
                </div>
                <div class="form-control">
                    <label class="label">
                        <span class="label-text">
                            { if form.is_edit() { "密码（留空保持不变）" } else { "密码" } }
                        </span>
                    </label>
                    <input class="input input-bordered" type="password" value={form.password.clone()}
                        oninput={bind_input(editor, |form, value| form.password = value)} />
                </div>
                <div class="form-control">
                    <label class="label"><span class="label-text">{"姓名"}</span></label>
                    <input class="input input-bordered" type="text" value={form.name.clone()}
                        oninput={bind_input(editor, |form, value| form.name = value)} />
                </div>
                <div class="form-control">
                    <label class="label"><span class="label-text">{"电话"}</span></label>
                    <input class="input input-bordered" type="text" value={form.phone.clone()}
                        oninput={bind_input(editor, |form, value| form.phone = value)} />
                </div>
                { gender_field }
                <div class="form-control">
                    <label class="label"><span class="label-text">{"用户类型"}</span></label>
                    <select class="select select-bordered" onchange={bind_select(editor, |form, value| form.user_type = value)}>
                        <option value="" selected={form.user_type.is_empty()}>{"请选择"}</option>
                        <option value="ADMIN" selected={form.user_type == "ADMIN"}>{"管理员"}</option>
                        <option value="OWNER" selected={form.user_type == "OWNER"}>{"业主"}</option>
                    </select>
                </div>
            </div>
            <div class="modal-action">
                <button class="btn btn-primary" disabled={saving} onclick={on_save.clone()}>
                    { if saving { "保存中..." } else { "保存" } }
                </button>
            </div>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner(user_id: i64, user_name: &str) -> User {
        serde_json::from_str(&format!(
            r#"{{"userId":{user_id},"userName":"{user_name}","name":"Alice","userType":"OWNER"}}"#
        ))
        .unwrap()
    }

    fn filled_create_form() -> UserForm {
        UserForm {
            user_id: None,
            user_name: "bob".into(),
            password: "secret".into(),
            name: "Bob".into(),
            phone: "13800000000".into(),
            gender: "男".into(),
            user_type: "OWNER".into(),
        }
    }

    #[test]
    fn create_requires_every_mandatory_field() {
        let mut form = filled_create_form();
        form.user_name.clear();
        assert_eq!(validate_user_form(&form).unwrap_err(), "请输入用户名");

        let mut form = filled_create_form();
        form.name = "   ".into();
        assert_eq!(validate_user_form(&form).unwrap_err(), "请输入真实姓名");

        let mut form = filled_create_form();
        form.user_type.clear();
        assert_eq!(validate_user_form(&form).unwrap_err(), "请选择用户类型");

        let mut form = filled_create_form();
        form.password.clear();
        assert_eq!(validate_user_form(&form).unwrap_err(), "请输入密码");
    }

    #[test]
    fn valid_create_form_builds_exactly_the_entered_fields() {
        let request = validate_user_form(&filled_create_form()).unwrap();
        assert_eq!(request.user_id, None);
        assert_eq!(request.user_name, "bob");
        assert_eq!(request.password.as_deref(), Some("secret"));
        assert_eq!(request.name, "Bob");
        assert_eq!(request.phone, "13800000000");
        assert_eq!(request.user_type, "OWNER");
        assert_eq!(request.gender.as_deref(), Some("男"));
    }

    #[test]
    fn edit_allows_blank_password_and_drops_gender() {
        let mut form = filled_create_form();
        form.user_id = Some(7);
        form.password.clear();
        let request = validate_user_form(&form).unwrap();
        assert_eq!(request.user_id, Some(7));
        assert_eq!(request.password, None);
        assert_eq!(request.gender, None);
    }

    #[test]
    fn keyword_length_is_capped_at_fifty() {
        assert!(validate_keyword("王").is_ok());
        assert!(validate_keyword(&"字".repeat(50)).is_ok());
        assert!(validate_keyword(&"字".repeat(51)).is_err());
    }

    #[test]
    fn type_filter_narrows_and_empty_filter_passes_all() {
        let admin: User = serde_json::from_str(
            r#"{"userId":9,"userName":"root","userType":"ADMIN"}"#,
        )
        .unwrap();
        let users = vec![owner(1, "alice"), admin];

        assert_eq!(filter_by_type(&users, "").len(), 2);
        let owners = filter_by_type(&users, "OWNER");
        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].user_name, "alice");
        assert!(filter_by_type(&users, "ADMIN").iter().all(|user| {
            user.user_type == UserType::Admin
        }));
    }
}
