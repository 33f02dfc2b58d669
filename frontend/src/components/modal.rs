use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub title: String,
    pub on_close: Callback<()>,
    pub children: Children,
}

/// Centered modal with a backdrop. Mount it conditionally; rendering the
/// component is what opens it.
#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class="modal modal-open">
            <div class="modal-box max-w-2xl">
                <div class="flex items-center justify-between mb-4">
                    <h3 class="font-bold text-lg">{ props.title.clone() }</h3>
                    <button class="btn btn-sm btn-circle btn-ghost" type="button" onclick={on_close}>
                        {"✕"}
                    </button>
                </div>
                { props.children.clone() }
            </div>
        </div>
    }
}
