use crate::containers::header::Header;
use crate::containers::sidebar::Sidebar;
use crate::routes::Route;
use yew::{Children, Html, Properties, function_component, html};

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
    pub current_route: Route,
}

/// Shell chrome around every view: sidebar navigation, header with title
/// and clock, and the scrollable content region.
#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    html! {
        <div class="flex h-screen bg-base-100">
            <Sidebar current_route={props.current_route} />
            <div class="flex-1 flex flex-col overflow-hidden">
                <Header current_route={props.current_route} />
                <main class="flex-1 overflow-y-auto p-6">
                    { props.children.clone() }
                </main>
            </div>
        </div>
    }
}
