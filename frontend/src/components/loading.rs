use yew::{Html, function_component, html};

/// Full-region loading placeholder shown while a view or the shell is
/// still fetching.
#[function_component(Loading)]
pub fn loading() -> Html {
    html! {
        <div class="flex flex-col items-center justify-center h-full">
            <div class="bg-base-200 p-6 rounded-lg shadow-md flex flex-col items-center">
                <div class="text-xl font-medium">{"Courtyard"}</div>
                <div class="mt-3 flex items-center gap-2">
                    <span class="loading loading-dots loading-sm"></span>
                    <span>{"加载中"}</span>
                </div>
            </div>
        </div>
    }
}
