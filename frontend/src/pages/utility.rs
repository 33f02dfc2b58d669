use crate::api::CourtyardClient;
use crate::models::app_state::AppState;
use shared::models::{UserType, UtilityCard};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yewdux::prelude::use_selector;

/// Outcome line under a top-up form.
#[derive(Clone, PartialEq)]
enum TopupNotice {
    Success(String),
    Failure(String),
    /// Arrears rejections get their own alert box instead of the result
    /// line; the message names the unpaid fees blocking the card.
    Arrears(String),
}

/// Owner form: a card must be picked from the selector.
fn validate_card_selection(value: &str) -> Result<i64, String> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| "请选择要充值的卡片".to_string())
}

/// Admin form: a raw card id must be a positive number.
fn validate_card_id(value: &str) -> Result<i64, String> {
    match value.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err("请输入有效的卡号".to_string()),
    }
}

fn validate_amount(value: &str) -> Result<f64, String> {
    match value.trim().parse::<f64>() {
        Ok(amount) if amount > 0.0 => Ok(amount),
        _ => Err("请输入有效的充值金额".to_string()),
    }
}

/// Whether a top-up rejection is the arrears interception rule.
fn is_arrears(message: &str) -> bool {
    message.contains("欠费")
}

async fn run_topup(card_id: i64, amount: f64, success_text: &str) -> TopupNotice {
    match CourtyardClient::shared().topup_card(card_id, amount).await {
        Ok(envelope) => {
            if envelope.is_success() {
                TopupNotice::Success(success_text.to_string())
            } else {
                let message = envelope.message_or_default();
                if is_arrears(&message) {
                    TopupNotice::Arrears(message)
                } else {
                    TopupNotice::Failure(message)
                }
            }
        }
        Err(err) => {
            log::error!("card top-up failed: {err}");
            TopupNotice::Failure("System Error".to_string())
        }
    }
}

fn notice_line(notice: &Option<TopupNotice>) -> Html {
    match notice {
        Some(TopupNotice::Success(text)) => {
            html! { <p class="text-success text-sm">{ format!("✅ {text}") }</p> }
        }
        Some(TopupNotice::Failure(text)) => {
            html! { <p class="text-error text-sm">{ format!("❌ {text}") }</p> }
        }
        _ => html! {},
    }
}

fn arrears_box(notice: &Option<TopupNotice>) -> Html {
    match notice {
        Some(TopupNotice::Arrears(message)) => html! {
            <div class="alert alert-warning">
                <span>{ format!("充值被拦截：{message}") }</span>
            </div>
        },
        _ => html! {},
    }
}

/// Water/electricity services. Owners see their cards and recharge them
/// from the wallet; staff recharge any card by id and look up balances.
#[function_component(UtilityPage)]
pub fn utility_page() -> Html {
    let user = use_selector(|state: &AppState| state.user.clone());

    match (*user).clone() {
        Some(user) if user.user_type == UserType::Owner => html! { <OwnerView /> },
        Some(_) => html! { <AdminView /> },
        None => html! {},
    }
}

#[function_component(OwnerView)]
fn owner_view() -> Html {
    let cards = use_state(Vec::<UtilityCard>::new);
    let loading = use_state(|| true);
    let load_error = use_state(|| None::<String>);
    let selected = use_state(String::new);
    let amount = use_state(String::new);
    let notice = use_state(|| None::<TopupNotice>);

    let reload = {
        let cards = cards.clone();
        let loading = loading.clone();
        let load_error = load_error.clone();
        Callback::from(move |()| {
            let cards = cards.clone();
            let loading = loading.clone();
            let load_error = load_error.clone();
            loading.set(true);
            load_error.set(None);
            spawn_local(async move {
                match CourtyardClient::shared().my_cards().await {
                    Ok(envelope) => match envelope.ok() {
                        Ok(list) => cards.set(list),
                        Err(message) => load_error.set(Some(message)),
                    },
                    Err(err) => {
                        log::error!("card list fetch failed: {err}");
                        load_error.set(Some("加载失败".to_string()));
                    }
                }
                loading.set(false);
            });
        })
    };

    {
        let reload = reload.clone();
        use_effect_with((), move |_| {
            reload.emit(());
            || ()
        });
    }

    let on_pick_card = {
        let selected = selected.clone();
        Callback::from(move |card_id: i64| selected.set(card_id.to_string()))
    };

    let on_select_change = {
        let selected = selected.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
                selected.set(select.value());
            }
        })
    };

    let on_amount_input = {
        let amount = amount.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                amount.set(input.value());
            }
        })
    };

    let on_topup = {
        let selected = selected.clone();
        let amount = amount.clone();
        let notice = notice.clone();
        let reload = reload.clone();
        Callback::from(move |_: MouseEvent| {
            notice.set(None);
            let card_id = match validate_card_selection(&selected) {
                Ok(id) => id,
                Err(message) => {
                    notice.set(Some(TopupNotice::Failure(message)));
                    return;
                }
            };
            let value = match validate_amount(&amount) {
                Ok(value) => value,
                Err(message) => {
                    notice.set(Some(TopupNotice::Failure(message)));
                    return;
                }
            };
            let notice = notice.clone();
            let amount = amount.clone();
            let reload = reload.clone();
            spawn_local(async move {
                let outcome = run_topup(card_id, value, "充值成功! 已从钱包扣款").await;
                let succeeded = matches!(outcome, TopupNotice::Success(_));
                notice.set(Some(outcome));
                if succeeded {
                    amount.set(String::new());
                    reload.emit(());
                }
            });
        })
    };

    let table_body = if *loading {
        html! { <tr><td colspan="5" class="text-center">{"加载中..."}</td></tr> }
    } else if let Some(message) = &*load_error {
        html! { <tr><td colspan="5" class="text-center text-error">{ message.clone() }</td></tr> }
    } else if cards.is_empty() {
        html! { <tr><td colspan="5" class="text-center text-base-content/60">{"暂无水电卡"}</td></tr> }
    } else {
        html! {
            { for cards.iter().map(|card| {
                let card_id = card.card_id;
                let pick = on_pick_card.clone();
                html! {
                    <tr>
                        <td>{ card.location() }</td>
                        <td class="text-primary">{ card.card_type.label() }</td>
                        <td>{ format!("#{card_id}") }</td>
                        <td class="text-secondary">{ format!("¥{}", card.balance_or_zero()) }</td>
                        <td>
                            <button class="btn btn-xs" onclick={Callback::from(move |_| pick.emit(card_id))}>
                                {"充值"}
                            </button>
                        </td>
                    </tr>
                }
            })}
        }
    };

    html! {
        <div class="space-y-6">
            { arrears_box(&notice) }

            <div class="card bg-base-200 shadow p-4">
                <h2 class="font-semibold mb-2">{"我的水电卡"}</h2>
                <table class="table">
                    <thead>
                        <tr>
                            <th>{"位置"}</th>
                            <th>{"类型"}</th>
                            <th>{"卡号"}</th>
                            <th>{"余额"}</th>
                            <th>{"操作"}</th>
                        </tr>
                    </thead>
                    <tbody>{ table_body }</tbody>
                </table>
            </div>

            <div class="card bg-base-200 shadow p-4 space-y-3">
                <h2 class="font-semibold">{"水电卡充值"}</h2>
                <select class="select select-bordered w-full max-w-md" onchange={on_select_change}>
                    <option value="" selected={selected.is_empty()}>{"请选择要充值的卡片..."}</option>
                    { for cards.iter().map(|card| {
                        let id = card.card_id.to_string();
                        let chosen = *selected == id;
                        html! {
                            <option value={id} selected={chosen}>
                                { format!("{} - {} (¥{})", card.location(), card.card_type.label(), card.balance_or_zero()) }
                            </option>
                        }
                    })}
                </select>
                <input
                    class="input input-bordered w-full max-w-md"
                    type="number"
                    min="0"
                    step="0.01"
                    placeholder="充值金额"
                    value={(*amount).clone()}
                    oninput={on_amount_input}
                />
                <div>
                    <button class="btn btn-primary" onclick={on_topup}>{"充值"}</button>
                </div>
                { notice_line(&notice) }
            </div>
        </div>
    }
}

#[function_component(AdminView)]
fn admin_view() -> Html {
    let card_id = use_state(String::new);
    let amount = use_state(String::new);
    let notice = use_state(|| None::<TopupNotice>);
    let lookup_id = use_state(String::new);
    let balance_text = use_state(String::new);

    let bind = |state: &UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                state.set(input.value());
            }
        })
    };

    let on_topup = {
        let card_id = card_id.clone();
        let amount = amount.clone();
        let notice = notice.clone();
        Callback::from(move |_: MouseEvent| {
            notice.set(None);
            let id = match validate_card_id(&card_id) {
                Ok(id) => id,
                Err(message) => {
                    notice.set(Some(TopupNotice::Failure(message)));
                    return;
                }
            };
            let value = match validate_amount(&amount) {
                Ok(value) => value,
                Err(message) => {
                    notice.set(Some(TopupNotice::Failure(message)));
                    return;
                }
            };
            let notice = notice.clone();
            let card_id = card_id.clone();
            let amount = amount.clone();
            spawn_local(async move {
                let outcome = run_topup(id, value, "充值成功! 已从业主钱包扣款").await;
                let succeeded = matches!(outcome, TopupNotice::Success(_));
                notice.set(Some(outcome));
                if succeeded {
                    card_id.set(String::new());
                    amount.set(String::new());
                }
            });
        })
    };

    let on_lookup = {
        let lookup_id = lookup_id.clone();
        let balance_text = balance_text.clone();
        Callback::from(move |_: MouseEvent| {
            let Ok(id) = lookup_id.trim().parse::<i64>() else {
                return;
            };
            let balance_text = balance_text.clone();
            spawn_local(async move {
                match CourtyardClient::shared().card_balance(id).await {
                    Ok(envelope) => match envelope.ok() {
                        Ok(balance) => {
                            balance_text.set(format!("余额 (Balance): ¥{balance}"));
                        }
                        Err(_) => balance_text.set("Card not found".to_string()),
                    },
                    Err(err) => {
                        log::error!("card balance lookup failed: {err}");
                        balance_text.set("Error".to_string());
                    }
                }
            });
        })
    };

    html! {
        <div class="space-y-6">
            { arrears_box(&notice) }

            <div class="card bg-base-200 shadow p-4 space-y-3 max-w-md">
                <h2 class="font-semibold">{"水电卡充值（代业主操作）"}</h2>
                <input class="input input-bordered" type="number" min="1" placeholder="卡号"
                    value={(*card_id).clone()} oninput={bind(&card_id)} />
                <input class="input input-bordered" type="number" min="0" step="0.01" placeholder="充值金额"
                    value={(*amount).clone()} oninput={bind(&amount)} />
                <div>
                    <button class="btn btn-primary" onclick={on_topup}>{"充值"}</button>
                </div>
                { notice_line(&notice) }
            </div>

            <div class="card bg-base-200 shadow p-4 space-y-3 max-w-md">
                <h2 class="font-semibold">{"卡片余额查询"}</h2>
                <input class="input input-bordered" type="number" min="1" placeholder="卡号"
                    value={(*lookup_id).clone()} oninput={bind(&lookup_id)} />
                <div>
                    <button class="btn" onclick={on_lookup}>{"查询"}</button>
                </div>
                if !balance_text.is_empty() {
                    <p class="text-sm">{ (*balance_text).clone() }</p>
                }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_must_pick_a_card() {
        assert_eq!(
            validate_card_selection("").unwrap_err(),
            "请选择要充值的卡片"
        );
        assert_eq!(validate_card_selection("11").unwrap(), 11);
    }

    #[test]
    fn admin_card_id_must_be_positive() {
        assert!(validate_card_id("0").is_err());
        assert!(validate_card_id("-3").is_err());
        assert!(validate_card_id("abc").is_err());
        assert_eq!(validate_card_id(" 42 ").unwrap(), 42);
    }

    #[test]
    fn amount_must_be_positive() {
        assert!(validate_amount("").is_err());
        assert!(validate_amount("0").is_err());
        assert!(validate_amount("-1").is_err());
        assert_eq!(validate_amount("25.5").unwrap(), 25.5);
    }

    #[test]
    fn arrears_rejections_are_detected_by_message() {
        assert!(is_arrears("该房产存在欠费账单，请先缴清"));
        assert!(!is_arrears("钱包余额不足"));
    }
}
