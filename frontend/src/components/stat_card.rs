use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub title: String,
    pub value: String,
    #[prop_or_default]
    pub detail: Option<String>,
}

/// One dashboard headline figure.
#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="stat bg-base-200 rounded-lg shadow">
            <div class="stat-title">{ props.title.clone() }</div>
            <div class="stat-value text-primary">{ props.value.clone() }</div>
            {
                props.detail.clone().map_or_else(
                    || html! {},
                    |detail| html! { <div class="stat-desc">{ detail }</div> },
                )
            }
        </div>
    }
}
