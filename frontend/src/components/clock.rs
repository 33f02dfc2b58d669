use gloo_timers::callback::Interval;
use yew::prelude::*;

fn current_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Live clock, ticking once per second for the lifetime of the page.
/// Pure side process; it never touches view state.
#[function_component(Clock)]
pub fn clock() -> Html {
    let time = use_state(current_time);

    {
        let time = time.clone();
        use_effect_with((), move |_| {
            let interval = Interval::new(1_000, move || time.set(current_time()));
            move || drop(interval)
        });
    }

    html! {
        <span class="font-mono text-sm text-base-content/70">{ (*time).clone() }</span>
    }
}
