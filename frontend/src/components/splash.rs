use crate::components::icons::Car;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use crate::web::set_timeout;
use leptos::prelude::*;

/// 启动页在品牌画面上停留的时间（毫秒）
const SPLASH_HOLD_MS: u32 = 2000;
/// 过渡动画时长（毫秒）
const SPLASH_TRANSITION_MS: u32 = 500;

#[component]
pub fn SplashPage() -> impl IntoView {
    let router = use_router();
    let (show_transition, set_show_transition) = signal(false);

    // 停留 2 秒后开始过渡，动画结束再进入欢迎页
    set_timeout(SPLASH_HOLD_MS, move || {
        set_show_transition.set(true);

        set_timeout(SPLASH_TRANSITION_MS, move || {
            router.navigate(AppRoute::Welcome.to_path());
        });
    });

    view! {
        <div
            class="flex flex-col items-center justify-center min-h-screen bg-primary text-primary-content transition-opacity duration-500"
            class=("opacity-0", move || show_transition.get())
        >
            <div class="p-4 bg-primary-content/10 rounded-3xl">
                <Car attr:class="h-16 w-16" />
            </div>
            <h1 class="text-4xl font-bold mt-6">"RideLink"</h1>
            <p class="mt-2 text-primary-content/70">"Your ride, on the way"</p>
        </div>
    }
}
