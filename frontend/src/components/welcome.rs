use crate::components::icons::MapPin;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use crate::web::set_timeout;
use leptos::prelude::*;

/// 欢迎页自动进入主页的延迟（毫秒）
const WELCOME_HOLD_MS: u32 = 3000;

#[component]
pub fn WelcomePage() -> impl IntoView {
    let router = use_router();

    set_timeout(WELCOME_HOLD_MS, move || {
        router.navigate(AppRoute::Home.to_path());
    });

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-md">
                    <div class="flex justify-center mb-4 text-primary">
                        <MapPin attr:class="h-12 w-12" />
                    </div>
                    <h1 class="text-3xl font-bold">"Welcome to RideLink"</h1>
                    <p class="py-4 text-base-content/70">
                        "Fast, reliable rides wherever you are going."
                    </p>
                    <span class="loading loading-dots loading-md text-primary"></span>
                </div>
            </div>
        </div>
    }
}
