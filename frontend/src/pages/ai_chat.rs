use crate::api::CourtyardClient;
use crate::components::markdown;
use crate::components::typing_indicator::TypingIndicator;
use shared::models::ApiResponse;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlInputElement};
use yew::prelude::*;

#[derive(Clone, PartialEq, Eq)]
enum Speaker {
    User,
    Assistant,
}

#[derive(Clone, PartialEq, Eq)]
struct ChatMessage {
    speaker: Speaker,
    text: String,
}

/// Assistant line for a completed call: the reply on success, a tagged
/// error line otherwise.
fn assistant_reply(envelope: ApiResponse<String>) -> String {
    if envelope.is_success() {
        envelope.data.unwrap_or_default()
    } else {
        format!("Error: {}", envelope.message_or_default())
    }
}

fn bubble(message: &ChatMessage) -> Html {
    match message.speaker {
        Speaker::User => html! {
            <div class="chat chat-end">
                <div class="chat-bubble chat-bubble-primary">{ message.text.clone() }</div>
            </div>
        },
        // Assistant replies are markdown, rendered best effort with a
        // literal-text fallback.
        Speaker::Assistant => html! {
            <div class="chat chat-start">
                <div class="chat-bubble bg-base-200 text-base-content">
                    { markdown::render_assistant(&message.text) }
                </div>
            </div>
        },
    }
}

/// AI assistant chat: one question per call, typing indicator while the
/// request is in flight, markdown-rendered answers.
#[function_component(AiChatPage)]
pub fn ai_chat_page() -> Html {
    let messages = use_state(Vec::<ChatMessage>::new);
    let input = use_state(String::new);
    let busy = use_state(|| false);
    let history_ref = use_node_ref();
    let input_ref = use_node_ref();

    {
        let input_ref = input_ref.clone();
        use_effect_with((), move |_| {
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                let _ = input.focus();
            }
            || ()
        });
    }

    // Keep the newest message in view.
    {
        let history_ref = history_ref.clone();
        use_effect_with((messages.len(), *busy), move |_| {
            if let Some(history) = history_ref.cast::<Element>() {
                history.set_scroll_top(history.scroll_height());
            }
            || ()
        });
    }

    let send = {
        let messages = messages.clone();
        let input = input.clone();
        let busy = busy.clone();
        Callback::from(move |()| {
            if *busy {
                return;
            }
            let text = input.trim().to_string();
            if text.is_empty() {
                return;
            }

            let mut next = (*messages).clone();
            next.push(ChatMessage {
                speaker: Speaker::User,
                text: text.clone(),
            });
            messages.set(next.clone());
            input.set(String::new());
            busy.set(true);

            let messages = messages.clone();
            let busy = busy.clone();
            spawn_local(async move {
                let reply = match CourtyardClient::shared().ai_chat(&text).await {
                    Ok(envelope) => assistant_reply(envelope),
                    Err(err) => {
                        log::error!("chat call failed: {err}");
                        "Connection Error".to_string()
                    }
                };
                let mut with_reply = next;
                with_reply.push(ChatMessage {
                    speaker: Speaker::Assistant,
                    text: reply,
                });
                messages.set(with_reply);
                busy.set(false);
            });
        })
    };

    let on_input = {
        let input = input.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(element) = event.target_dyn_into::<HtmlInputElement>() {
                input.set(element.value());
            }
        })
    };

    let on_keydown = {
        let send = send.clone();
        Callback::from(move |event: KeyboardEvent| {
            if event.key() == "Enter" {
                send.emit(());
            }
        })
    };

    let on_click = {
        let send = send.clone();
        Callback::from(move |_: MouseEvent| send.emit(()))
    };

    html! {
        <div class="flex flex-col h-full">
            <div ref={history_ref} class="flex-1 overflow-y-auto space-y-2 p-2">
                { for messages.iter().map(bubble) }
                <TypingIndicator active={*busy} />
            </div>
            <div class="flex gap-2 border-t border-base-300 pt-4">
                <input
                    ref={input_ref}
                    class="input input-bordered flex-1"
                    type="text"
                    placeholder="向 AI 助手提问，例如：本月物业费收缴情况如何？"
                    value={(*input).clone()}
                    oninput={on_input}
                    onkeydown={on_keydown}
                />
                <button class="btn btn-primary" disabled={*busy} onclick={on_click}>
                    {"发送"}
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(json: &str) -> ApiResponse<String> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn successful_reply_passes_through() {
        let reply = assistant_reply(envelope(r#"{"code":200,"data":"**hi**"}"#));
        assert_eq!(reply, "**hi**");
    }

    #[test]
    fn business_error_becomes_an_error_line() {
        let reply = assistant_reply(envelope(r#"{"code":500,"message":"AI 服务未配置"}"#));
        assert_eq!(reply, "Error: AI 服务未配置");
    }

    #[test]
    fn missing_message_still_produces_a_line() {
        let reply = assistant_reply(envelope(r#"{"code":503}"#));
        assert_eq!(reply, "Error: 请求失败 (code 503)");
    }
}
