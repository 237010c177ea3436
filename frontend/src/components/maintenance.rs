use crate::components::icons::{ArrowPath, Wrench};
use crate::gate::adapter::{SignalMaintenanceView, WebGateHost};
use crate::gate::maintenance::MaintenanceGate;
use crate::settings::use_settings;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use ridelink_shared::DEFAULT_MAINTENANCE_MESSAGE;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

#[component]
pub fn MaintenancePage() -> impl IntoView {
    let router = use_router();

    let (message, set_message) = signal(DEFAULT_MAINTENANCE_MESSAGE.to_string());
    let (is_checking, set_checking) = signal(false);

    let gate = Rc::new(MaintenanceGate::new(
        use_settings(),
        WebGateHost,
        SignalMaintenanceView {
            set_message,
            set_checking,
        },
    ));

    // 进入闸门：钉住 History 条目并加载文案
    spawn_local({
        let gate = gate.clone();
        async move {
            gate.enter().await;
        }
    });

    // 订阅导航意图：被路由器拦下的导航转为一次状态检查
    // 首次运行只建立订阅，跳过进入闸门之前遗留的导航记录
    Effect::new({
        let gate = gate.clone();
        move |prev: Option<()>| {
            let attempt = router.navigation_attempt().get();
            if prev.is_none() {
                return;
            }
            if let Some(target) = attempt {
                if target != AppRoute::Maintenance {
                    let gate = gate.clone();
                    spawn_local(async move {
                        gate.on_navigation(target.to_path()).await;
                    });
                }
            }
        }
    });

    // 应用恢复前台时重新钉回闸门位置
    {
        let gate = gate.clone();
        let closure = Closure::<dyn Fn()>::new(move || gate.on_screen_focus());
        if let Some(window) = web_sys::window() {
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    let on_retry = move |_| {
        let gate = gate.clone();
        spawn_local(async move {
            gate.retry().await;
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-md">
                    <div class="flex justify-center mb-4 text-warning">
                        <Wrench attr:class="h-16 w-16" />
                    </div>
                    <h1 class="text-3xl font-bold">"Under Maintenance"</h1>
                    <p class="py-4 text-base-content/70">{move || message.get()}</p>
                    <button class="btn btn-primary" on:click=on_retry disabled=move || is_checking.get()>
                        {move || if is_checking.get() {
                            view! { <span class="loading loading-spinner"></span> "Checking..." }.into_any()
                        } else {
                            view! { <ArrowPath attr:class="h-5 w-5" /> "Try Again" }.into_any()
                        }}
                    </button>
                </div>
            </div>
        </div>
    }
}
