use crate::api::CourtyardClient;
use crate::components::dialog;
use crate::models::app_state::AppState;
use shared::models::WalletTransaction;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yewdux::prelude::use_selector;

/// Pre-flight check on the recharge amount. Runs before any API call.
fn validate_recharge_amount(value: &str) -> Result<f64, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("请输入充值金额".to_string());
    }
    let amount: f64 = trimmed
        .parse()
        .map_err(|_| "请输入有效的充值金额（大于0）".to_string())?;
    if amount <= 0.0 {
        return Err("请输入有效的充值金额（大于0）".to_string());
    }
    if amount > 1_000_000.0 {
        return Err("单次充值金额不能超过100万元".to_string());
    }
    Ok(amount)
}

/// My wallet: balance headline, recharge form and the transaction ledger.
#[function_component(WalletPage)]
pub fn wallet_page() -> Html {
    let user = use_selector(|state: &AppState| state.user.clone());
    match (*user).clone() {
        Some(user) => html! { <WalletView user_id={user.user_id} /> },
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
struct WalletViewProps {
    user_id: i64,
}

#[function_component(WalletView)]
fn wallet_view(props: &WalletViewProps) -> Html {
    let user_id = props.user_id;

    let balance = use_state(|| None::<Result<f64, String>>);
    let amount = use_state(String::new);
    let transactions = use_state(Vec::<WalletTransaction>::new);
    let tx_loading = use_state(|| true);
    let tx_error = use_state(|| None::<String>);

    let reload_balance = {
        let balance = balance.clone();
        Callback::from(move |()| {
            let balance = balance.clone();
            spawn_local(async move {
                match CourtyardClient::shared().wallet_balance(user_id).await {
                    Ok(envelope) => match envelope.ok() {
                        Ok(value) => balance.set(Some(Ok(value))),
                        Err(message) => {
                            log::error!("wallet balance rejected: {message}");
                            balance.set(Some(Err("Error".to_string())));
                        }
                    },
                    Err(err) => {
                        log::error!("wallet balance fetch failed: {err}");
                        balance.set(Some(Err("Error".to_string())));
                    }
                }
            });
        })
    };

    let reload_transactions = {
        let transactions = transactions.clone();
        let tx_loading = tx_loading.clone();
        let tx_error = tx_error.clone();
        Callback::from(move |()| {
            let transactions = transactions.clone();
            let tx_loading = tx_loading.clone();
            let tx_error = tx_error.clone();
            tx_loading.set(true);
            tx_error.set(None);
            spawn_local(async move {
                match CourtyardClient::shared().wallet_transactions(user_id).await {
                    Ok(envelope) => match envelope.ok() {
                        Ok(list) => transactions.set(list),
                        Err(_) => tx_error.set(Some("加载失败".to_string())),
                    },
                    Err(err) => {
                        log::error!("wallet transactions fetch failed: {err}");
                        tx_error.set(Some("系统错误".to_string()));
                    }
                }
                tx_loading.set(false);
            });
        })
    };

    {
        let reload_balance = reload_balance.clone();
        let reload_transactions = reload_transactions.clone();
        use_effect_with((), move |_| {
            reload_balance.emit(());
            reload_transactions.emit(());
            || ()
        });
    }

    let on_amount_input = {
        let amount = amount.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                amount.set(input.value());
            }
        })
    };

    let on_recharge = {
        let amount = amount.clone();
        let reload_balance = reload_balance.clone();
        let reload_transactions = reload_transactions.clone();
        Callback::from(move |_: MouseEvent| {
            let value = match validate_recharge_amount(&amount) {
                Ok(value) => value,
                Err(message) => {
                    dialog::alert(&message);
                    return;
                }
            };
            let amount = amount.clone();
            let reload_balance = reload_balance.clone();
            let reload_transactions = reload_transactions.clone();
            spawn_local(async move {
                match CourtyardClient::shared().recharge_wallet(user_id, value).await {
                    Ok(envelope) => {
                        if envelope.is_success() {
                            dialog::alert("充值成功");
                            reload_balance.emit(());
                            reload_transactions.emit(());
                            amount.set(String::new());
                        } else {
                            dialog::alert(&format!("充值失败: {}", envelope.message_or_default()));
                        }
                    }
                    Err(err) => {
                        log::error!("wallet recharge failed: {err}");
                        dialog::alert("系统错误，请稍后重试");
                    }
                }
            });
        })
    };

    let balance_display = match &*balance {
        None => "...".to_string(),
        Some(Ok(value)) => format!("{value:.2}"),
        Some(Err(text)) => text.clone(),
    };

    let ledger_body = if *tx_loading {
        html! { <tr><td colspan="5" class="text-center">{"加载中..."}</td></tr> }
    } else if let Some(message) = &*tx_error {
        html! { <tr><td colspan="5" class="text-center text-error">{ message.clone() }</td></tr> }
    } else if transactions.is_empty() {
        html! { <tr><td colspan="5" class="text-center">{"暂无记录"}</td></tr> }
    } else {
        html! {
            { for transactions.iter().map(|entry| {
                let amount_class = if entry.is_recharge() { "text-success" } else { "text-error" };
                html! {
                    <tr>
                        <td>{ format!("#{}", entry.trans_id) }</td>
                        <td>{ entry.trans_type.clone() }</td>
                        <td class={amount_class}>{ format!("{}¥{:.2}", entry.sign(), entry.amount) }</td>
                        <td>{ entry.description.clone().unwrap_or_else(|| "-".to_string()) }</td>
                        <td>{ entry.formatted_time() }</td>
                    </tr>
                }
            })}
        }
    };

    html! {
        <div class="space-y-6">
            <div class="flex flex-wrap gap-6 items-end">
                <div class="stat bg-base-200 rounded-lg shadow w-64">
                    <div class="stat-title">{"钱包余额 (¥)"}</div>
                    <div class="stat-value text-primary">{ balance_display }</div>
                </div>
                <div class="card bg-base-200 shadow p-4 space-y-3">
                    <h2 class="font-semibold">{"钱包充值"}</h2>
                    <div class="flex gap-2">
                        <input
                            class="input input-bordered"
                            type="number"
                            min="0"
                            step="0.01"
                            placeholder="充值金额"
                            value={(*amount).clone()}
                            oninput={on_amount_input}
                        />
                        <button class="btn btn-primary" onclick={on_recharge}>{"充值"}</button>
                    </div>
                </div>
            </div>

            <div class="card bg-base-200 shadow p-4">
                <h2 class="font-semibold mb-2">{"交易记录"}</h2>
                <table class="table table-zebra">
                    <thead>
                        <tr>
                            <th>{"流水号"}</th>
                            <th>{"类型"}</th>
                            <th>{"金额"}</th>
                            <th>{"说明"}</th>
                            <th>{"时间"}</th>
                        </tr>
                    </thead>
                    <tbody>{ ledger_body }</tbody>
                </table>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_amount_is_rejected() {
        assert_eq!(validate_recharge_amount("").unwrap_err(), "请输入充值金额");
        assert_eq!(
            validate_recharge_amount("   ").unwrap_err(),
            "请输入充值金额"
        );
    }

    #[test]
    fn zero_and_negative_amounts_are_rejected_before_any_call() {
        assert_eq!(
            validate_recharge_amount("0").unwrap_err(),
            "请输入有效的充值金额（大于0）"
        );
        assert_eq!(
            validate_recharge_amount("-10").unwrap_err(),
            "请输入有效的充值金额（大于0）"
        );
        assert_eq!(
            validate_recharge_amount("abc").unwrap_err(),
            "请输入有效的充值金额（大于0）"
        );
    }

    #[test]
    fn oversized_amounts_hit_the_cap() {
        assert_eq!(
            validate_recharge_amount("1000001").unwrap_err(),
            "单次充值金额不能超过100万元"
        );
        assert!(validate_recharge_amount("1000000").is_ok());
    }

    #[test]
    fn valid_amounts_parse() {
        assert_eq!(validate_recharge_amount(" 88.8 ").unwrap(), 88.8);
    }
}
