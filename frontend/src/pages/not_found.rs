use yew::prelude::*;

/// Landing panel for unknown paths. Navigation stays usable around it.
#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <div class="flex flex-col items-center justify-center h-full gap-2">
            <h2 class="text-3xl font-bold">{"404"}</h2>
            <p class="text-base-content/70">{"页面不存在，请从左侧导航选择功能模块。"}</p>
        </div>
    }
}
