use crate::components::icons::SignalSlash;
use crate::network::use_network;
use leptos::prelude::*;

/// 离线提示条
///
/// 固定在视口顶部，仅在断网时可见。
#[component]
pub fn NetworkStatusBanner() -> impl IntoView {
    let online = use_network().online();

    view! {
        <Show when=move || !online.get()>
            <div class="fixed top-0 left-0 right-0 z-50 flex items-center justify-center gap-2 bg-error text-error-content py-2 px-4 text-sm font-medium shadow">
                <SignalSlash attr:class="h-5 w-5" />
                <span>"No Internet Connection"</span>
            </div>
        </Show>
    }
}
