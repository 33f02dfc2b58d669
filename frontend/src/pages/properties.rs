use crate::api::CourtyardClient;
use crate::components::dialog;
use crate::components::modal::Modal;
use shared::models::{Property, SavePropertyRequest, User, UserType};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// Form state backing the create/edit modal.
#[derive(Clone, PartialEq, Default)]
struct PropertyForm {
    p_id: Option<i64>,
    building_no: String,
    unit_no: String,
    room_no: String,
    area: String,
    p_status: String,
    /// Selected owner id as the `<select>` value; empty keeps the unit
    /// unsold stock.
    owner_id: String,
    /// Read-only card summary shown in the modal.
    card_info: String,
}

impl PropertyForm {
    fn for_edit(property: &Property, card_info: String) -> Self {
        Self {
            p_id: Some(property.p_id),
            building_no: property.building_no.clone(),
            unit_no: property.unit_no.clone(),
            room_no: property.room_no.clone(),
            area: property.area.to_string(),
            p_status: property.p_status.as_wire().to_string(),
            owner_id: property
                .user_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            card_info,
        }
    }

    fn is_edit(&self) -> bool {
        self.p_id.is_some()
    }
}

/// Required-field validation: building/unit/room, a positive area and a
/// status. Owner stays optional.
fn validate_property_form(form: &PropertyForm) -> Result<SavePropertyRequest, String> {
    let building_no = form.building_no.trim();
    if building_no.is_empty() {
        return Err("请输入楼栋号".to_string());
    }
    let unit_no = form.unit_no.trim();
    if unit_no.is_empty() {
        return Err("请输入单元号".to_string());
    }
    let room_no = form.room_no.trim();
    if room_no.is_empty() {
        return Err("请输入房号".to_string());
    }
    let area: f64 = form.area.trim().parse().unwrap_or(0.0);
    if area <= 0.0 {
        return Err("请输入有效的面积".to_string());
    }
    if form.p_status.is_empty() {
        return Err("请选择房产状态".to_string());
    }

    Ok(SavePropertyRequest {
        p_id: form.p_id,
        building_no: building_no.to_string(),
        unit_no: unit_no.to_string(),
        room_no: room_no.to_string(),
        area,
        p_status: form.p_status.clone(),
        user_id: form.owner_id.trim().parse().ok(),
    })
}

/// `水卡:n` / `电卡:n` summary for the table and modal.
fn card_summary(property: &Property) -> String {
    let mut parts = Vec::new();
    if let Some(id) = property.water_card_id {
        parts.push(format!("水卡:{id}"));
    }
    if let Some(id) = property.electricity_card_id {
        parts.push(format!("电卡:{id}"));
    }
    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(" / ")
    }
}

async fn fetch_properties(search: Option<(String, String, String)>) -> Result<Vec<Property>, String> {
    let client = CourtyardClient::shared();
    let result = match &search {
        Some((building, unit, room)) => client.search_properties(building, unit, room).await,
        None => client.list_properties().await,
    };
    match result {
        Ok(envelope) => envelope
            .ok()
            .map_err(|message| format!("加载房产列表失败: {message}")),
        Err(err) => {
            log::error!("property list fetch failed: {err}");
            Err("系统错误".to_string())
        }
    }
}

fn bind_input(
    editor: &UseStateHandle<Option<PropertyForm>>,
    apply: fn(&mut PropertyForm, String),
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
    editor: &UseStateHandle<Option<PropertyForm>>,
    apply: fn(&mut PropertyForm, String),
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

/// Property administration: list, location search, create/edit with
/// owner assignment, delete.
#[function_component(PropertiesPage)]
pub fn properties_page() -> Html {
    let properties = use_state(Vec::<Property>::new);
    let owners = use_state(Vec::<User>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let search_building = use_state(String::new);
    let search_unit = use_state(String::new);
    let search_room = use_state(String::new);
    let editor = use_state(|| None::<PropertyForm>);
    let saving = use_state(|| false);

    let reload = {
        let properties = properties.clone();
        let loading = loading.clone();
        let error = error.clone();
        Callback::from(move |search: Option<(String, String, String)>| {
            let properties = properties.clone();
            let loading = loading.clone();
            let error = error.clone();
            loading.set(true);
            error.set(None);
            spawn_local(async move {
                match fetch_properties(search).await {
                    Ok(list) => properties.set(list),
                    Err(message) => error.set(Some(message)),
                }
                loading.set(false);
            });
        })
    };

    {
        let reload = reload.clone();
        let owners = owners.clone();
        use_effect_with((), move |_| {
            reload.emit(None);
            // Owner dropdown for the editor; a failure here only leaves
            // the dropdown empty.
            spawn_local(async move {
                match CourtyardClient::shared().list_users().await {
                    Ok(envelope) => {
                        if let Ok(users) = envelope.ok() {
                            owners.set(
                                users
                                    .into_iter()
                                    .filter(|user| user.user_type == UserType::Owner)
                                    .collect(),
                            );
                        }
                    }
                    Err(err) => log::error!("owner list fetch failed: {err}"),
                }
            });
            || ()
        });
    }

    let on_search = {
        let search_building = search_building.clone();
        let search_unit = search_unit.clone();
        let search_room = search_room.clone();
        let reload = reload.clone();
        Callback::from(move |_: MouseEvent| {
            let building = search_building.trim().to_string();
            let unit = search_unit.trim().to_string();
            let room = search_room.trim().to_string();
            if building.is_empty() && unit.is_empty() && room.is_empty() {
                reload.emit(None);
            } else {
                reload.emit(Some((building, unit, room)));
            }
        })
    };

    let on_create = {
        let editor = editor.clone();
        Callback::from(move |_: MouseEvent| {
            editor.set(Some(PropertyForm {
                card_info: "创建后自动生成".to_string(),
                ..PropertyForm::default()
            }));
        })
    };

    let on_edit = {
        let editor = editor.clone();
        let properties = properties.clone();
        Callback::from(move |property_id: i64| {
            let editor = editor.clone();
            // Card ids come from the already-loaded list row; the detail
            // endpoint does not join them.
            let card_info = properties
                .iter()
                .find(|property| property.p_id == property_id)
                .map(card_summary)
                .unwrap_or_else(|| "暂无水电卡".to_string());
            spawn_local(async move {
                match CourtyardClient::shared().get_property(property_id).await {
                    Ok(envelope) => match envelope.ok() {
                        Ok(property) => {
                            editor.set(Some(PropertyForm::for_edit(&property, card_info)))
                        }
                        Err(message) => dialog::alert(&format!("获取房产详情失败: {message}")),
                    },
                    Err(err) => {
                        log::error!("property fetch for edit failed: {err}");
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
            let request = match validate_property_form(&form) {
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
                    client
                        .update_property(&request)
                        .await
                        .map(|env| (env.code, env.message))
                } else {
                    client
                        .create_property(&request)
                        .await
                        .map(|env| (env.code, env.message))
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
                        log::error!("property save failed: {err}");
                        dialog::alert("系统错误");
                    }
                }
                saving.set(false);
            });
        })
    };

    let on_delete = {
        let reload = reload.clone();
        Callback::from(move |property_id: i64| {
            if !dialog::confirm("确定要删除这个房产吗？") {
                return;
            }
            let reload = reload.clone();
            spawn_local(async move {
                match CourtyardClient::shared().delete_property(property_id).await {
                    Ok(envelope) => {
                        if envelope.is_success() {
                            dialog::alert("删除成功");
                            reload.emit(None);
                        } else {
                            dialog::alert(&format!("删除失败: {}", envelope.message_or_default()));
                        }
                    }
                    Err(err) => {
                        log::error!("property delete failed: {err}");
                        dialog::alert("系统错误");
                    }
                }
            });
        })
    };

    let table_body = if *loading {
        html! { <tr><td colspan="9" class="text-center">{"加载中..."}</td></tr> }
    } else if let Some(message) = &*error {
        html! { <tr><td colspan="9" class="text-center text-error">{ message.clone() }</td></tr> }
    } else if properties.is_empty() {
        html! { <tr><td colspan="9" class="text-center">{"暂无数据"}</td></tr> }
    } else {
        html! {
            { for properties.iter().map(|property| {
                let property_id = property.p_id;
                let edit = on_edit.clone();
                let delete = on_delete.clone();
                html! {
                    <tr>
                        <td>{ property_id }</td>
                        <td>{ property.building_no.clone() }</td>
                        <td>{ property.unit_no.clone() }</td>
                        <td>{ property.room_no.clone() }</td>
                        <td>{ property.area }</td>
                        <td><span class="badge badge-outline">{ property.p_status.label() }</span></td>
                        <td>{ property.owner_name.clone().unwrap_or_else(|| "-".to_string()) }</td>
                        <td>{ card_summary(property) }</td>
                        <td class="space-x-1">
                            <button class="btn btn-xs" onclick={Callback::from(move |_| edit.emit(property_id))}>{"编辑"}</button>
                            <button class="btn btn-xs btn-error" onclick={Callback::from(move |_| delete.emit(property_id))}>{"删除"}</button>
                        </td>
                    </tr>
                }
            })}
        }
    };

    let bind_search = |state: &UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                state.set(input.value());
            }
        })
    };

    html! {
        <div class="space-y-4">
            <div class="flex flex-wrap items-center gap-2">
                <input class="input input-bordered input-sm w-28" type="text" placeholder="楼栋"
                    value={(*search_building).clone()} oninput={bind_search(&search_building)} />
                <input class="input input-bordered input-sm w-28" type="text" placeholder="单元"
                    value={(*search_unit).clone()} oninput={bind_search(&search_unit)} />
                <input class="input input-bordered input-sm w-28" type="text" placeholder="房号"
                    value={(*search_room).clone()} oninput={bind_search(&search_room)} />
                <button class="btn btn-sm btn-primary" onclick={on_search}>{"搜索"}</button>
                <div class="flex-1"></div>
                <button class="btn btn-sm btn-secondary" onclick={on_create}>{"新建房产"}</button>
            </div>

            <div class="overflow-x-auto">
                <table class="table table-zebra">
                    <thead>
                        <tr>
                            <th>{"ID"}</th>
                            <th>{"楼栋"}</th>
                            <th>{"单元"}</th>
                            <th>{"房号"}</th>
                            <th>{"面积(㎡)"}</th>
                            <th>{"状态"}</th>
                            <th>{"业主"}</th>
                            <th>{"水电卡"}</th>
                            <th>{"操作"}</th>
                        </tr>
                    </thead>
                    <tbody>{ table_body }</tbody>
                </table>
            </div>

            { editor_modal(&editor, &owners, &on_close_editor, &on_save, *saving) }
        </div>
    }
}

fn editor_modal(
    editor: &UseStateHandle<Option<PropertyForm>>,
    owners: &UseStateHandle<Vec<User>>,
    on_close: &Callback<()>,
    on_save: &Callback<MouseEvent>,
    saving: bool,
) -> Html {
    let Some(form) = (**editor).clone() else {
        return html! {};
    };

    let title = if form.is_edit() { "编辑房产" } else { "新建房产" };

    html! {
        <Modal title={title.to_string()} on_close={on_close.clone()}>
            <div class="grid grid-cols-2 gap-3">
                <div class="form-control">
                    <label class="label"><span class="label-text">{"楼栋号"}</span></label>
                    <input class="input input-bordered" type="text" value={form.building_no.clone()}
                        oninput={bind_input(editor, |form, value| form.building_no = value)} />
                </div>
                <div class="form-control">
                    <label class="label"><span class="label-text">{"单元号"}</span></label>
                    <input class="input input-bordered" type="text" value={form.unit_no.clone()}
                        oninput={bind_input(editor, |form, value| form.unit_no = value)} />
                </div>
                <div class="form-control">
                    <label class="label"><span class="label-text">{"房号"}</span></label>
                    <input class="input input-bordered" type="text" value={form.room_no.clone()}
                        oninput={bind_input(editor, |form, value| form.room_no = value)} />
                </div>
                <div class="form-control">
                    <label class="label"><span class="label-text">{"面积(㎡)"}</span></label>
                    <input class="input input-bordered" type="number" step="0.01" value={form.area.clone()}
                        oninput={bind_input(editor, |form, value| form.area = value)} />
                </div>
                <div class="form-control">
                    <label class="label"><span class="label-text">{"房产状态"}</span></label>
                    <select class="select select-bordered" onchange={bind_select(editor, |form, value| form.p_status = value)}>
                        <option value="" selected={form.p_status.is_empty()}>{"请选择"}</option>
                        <option value="SOLD" selected={form.p_status == "SOLD"}>{"已售"}</option>
                        <option value="UNSOLD" selected={form.p_status == "UNSOLD"}>{"待售"}</option>
                        <option value="RENTED" selected={form.p_status == "RENTED"}>{"出租"}</option>
                    </select>
                </div>
                <div class="form-control">
                    <label class="label"><span class="label-text">{"业主"}</span></label>
                    <select class="select select-bordered" onchange={bind_select(editor, |form, value| form.owner_id = value)}>
                        <option value="" selected={form.owner_id.is_empty()}>{"无业主(待售)"}</option>
                        { for owners.iter().map(|user| {
                            let id = user.user_id.to_string();
                            let chosen = form.owner_id == id;
                            html! {
                                <option value={id.clone()} selected={chosen}>
                                    { format!("{} (ID: {})", user.display_name(), user.user_id) }
                                </option>
                            }
                        })}
                    </select>
                </div>
                <div class="form-control col-span-2">
                    <label class="label"><span class="label-text">{"水电卡"}</span></label>
                    <input class="input input-bordered" type="text" readonly=true value={form.card_info.clone()} />
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

    fn filled_form() -> PropertyForm {
        PropertyForm {
            p_id: None,
            building_no: "3".into(),
            unit_no: "2".into(),
            room_no: "501".into(),
            area: "89.5".into(),
            p_status: "SOLD".into(),
            owner_id: "4".into(),
            card_info: String::new(),
        }
    }

    #[test]
    fn every_location_field_is_required() {
        for (clear, message) in [
            (
                (|form: &mut PropertyForm| form.building_no.clear()) as fn(&mut PropertyForm),
                "请输入楼栋号",
            ),
            (|form| form.unit_no.clear(), "请输入单元号"),
            (|form| form.room_no.clear(), "请输入房号"),
            (|form| form.p_status.clear(), "请选择房产状态"),
        ] {
            let mut form = filled_form();
            clear(&mut form);
            assert_eq!(validate_property_form(&form).unwrap_err(), message);
        }
    }

    #[test]
    fn area_must_be_a_positive_number() {
        for bad in ["", "0", "-5", "abc"] {
            let mut form = filled_form();
            form.area = bad.into();
            assert_eq!(validate_property_form(&form).unwrap_err(), "请输入有效的面积");
        }
    }

    #[test]
    fn valid_form_parses_area_and_owner() {
        let request = validate_property_form(&filled_form()).unwrap();
        assert_eq!(request.area, 89.5);
        assert_eq!(request.user_id, Some(4));
        assert_eq!(request.p_status, "SOLD");
    }

    #[test]
    fn blank_owner_keeps_the_unit_unsold() {
        let mut form = filled_form();
        form.owner_id.clear();
        let request = validate_property_form(&form).unwrap();
        assert_eq!(request.user_id, None);
    }

    #[test]
    fn card_summary_lists_present_cards_only() {
        let full: Property = serde_json::from_str(
            r#"{"pId":1,"buildingNo":"3","unitNo":"2","roomNo":"501","area":89.5,
                "pStatus":"SOLD","waterCardId":11,"electricityCardId":12}"#,
        )
        .unwrap();
        assert_eq!(card_summary(&full), "水卡:11 / 电卡:12");

        let none: Property = serde_json::from_str(
            r#"{"pId":2,"buildingNo":"1","unitNo":"1","roomNo":"101","area":60.0,"pStatus":"UNSOLD"}"#,
        )
        .unwrap();
        assert_eq!(card_summary(&none), "-");
    }
}
