use crate::components::icons::{ArrowDownTray, ArrowPath};
use crate::gate::adapter::{SignalUpdateView, WebGateHost};
use crate::gate::update::ForceUpdateGate;
use crate::settings::use_settings;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use ridelink_shared::is_update_required;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

#[component]
pub fn ForceUpdatePage() -> impl IntoView {
    let router = use_router();

    let (current_version, set_current) = signal("Unknown".to_string());
    let (required_version, set_required) = signal("Unknown".to_string());
    let (is_checking, set_checking) = signal(false);

    let gate = Rc::new(ForceUpdateGate::new(
        use_settings(),
        WebGateHost,
        SignalUpdateView {
            set_current,
            set_required,
            set_checking,
        },
    ));

    // 进入闸门：钉住 History 条目并加载版本信息
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
                if target != AppRoute::ForceUpdate {
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

    let on_update_now = {
        let gate = gate.clone();
        move |_| gate.update_now()
    };

    let on_retry = move |_| {
        let gate = gate.clone();
        spawn_local(async move {
            gate.retry().await;
        });
    };

    // 版本比较只用于展示，不参与放行判断
    let outdated =
        move || is_update_required(&current_version.get(), &required_version.get());

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-md">
                    <div class="flex justify-center mb-4 text-primary">
                        <ArrowDownTray attr:class="h-16 w-16" />
                    </div>
                    <h1 class="text-3xl font-bold">"Update Required"</h1>
                    <p class="py-4 text-base-content/70">
                        "A new version of RideLink is required to continue."
                    </p>

                    <div class="stats bg-base-100 shadow mb-4">
                        <div class="stat">
                            <div class="stat-title">"Your version"</div>
                            <div class="stat-value text-lg">{move || current_version.get()}</div>
                        </div>
                        <div class="stat">
                            <div class="stat-title">"Required"</div>
                            <div class="stat-value text-lg">{move || required_version.get()}</div>
                        </div>
                    </div>

                    <Show when=outdated>
                        <div class="badge badge-warning mb-4">"Your version is out of date"</div>
                    </Show>

                    <div class="flex justify-center gap-2">
                        <button class="btn btn-primary" on:click=on_update_now>
                            "Update Now"
                        </button>
                        <button class="btn btn-ghost" on:click=on_retry disabled=move || is_checking.get()>
                            {move || if is_checking.get() {
                                view! { <span class="loading loading-spinner"></span> "Checking..." }.into_any()
                            } else {
                                view! { <ArrowPath attr:class="h-5 w-5" /> "Check Again" }.into_any()
                            }}
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
