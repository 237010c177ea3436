//! RideLink 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎，注入系统锁定信号实现守卫）
//! - `system`: 系统设置快照与锁定推导
//! - `settings`: 系统设置服务（维护/更新状态源，TTL 记忆化）
//! - `gate`: 维护/强制更新闸门逻辑（适配器模式，可在原生环境下测试）
//! - `components`: UI 组件层

mod api;
mod config;
mod gate;
mod network;
mod settings;
mod system;
mod theme;
mod components {
    pub mod force_update;
    pub mod home;
    mod icons;
    pub mod maintenance;
    pub mod network_status;
    pub mod splash;
    pub mod welcome;
}

use crate::api::RideLinkApi;
use crate::components::force_update::ForceUpdatePage;
use crate::components::home::HomePage;
use crate::components::maintenance::MaintenancePage;
use crate::components::network_status::NetworkStatusBanner;
use crate::components::splash::SplashPage;
use crate::components::welcome::WelcomePage;
use crate::network::NetworkContext;
use crate::settings::{JsClock, SystemSettingsService};
use crate::system::{SystemContext, init_system};

use leptos::prelude::*;
use send_wrapper::SendWrapper;
use std::rc::Rc;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，
// 所有 History/Storage/定时器操作都集中在这里。
pub(crate) mod web {
    pub mod route;
    pub mod router;
    mod storage;
    mod timer;

    pub use storage::LocalStorage;
    pub use timer::set_timeout;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Splash => view! { <SplashPage /> }.into_any(),
        AppRoute::Welcome => view! { <WelcomePage /> }.into_any(),
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Maintenance => view! { <MaintenancePage /> }.into_any(),
        AppRoute::ForceUpdate => view! { <ForceUpdatePage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 应用持久化的主题偏好
    theme::init_theme();

    // 2. 共享 API 客户端与系统设置服务
    let api = RideLinkApi::new(config::api_url());
    provide_context(SendWrapper::new(Rc::new(api.clone())));
    let settings = Rc::new(SystemSettingsService::new(api, JsClock));
    provide_context(SendWrapper::new(settings.clone()));

    // 3. 网络状态监听
    let network = NetworkContext::new();
    network.init_listeners();
    provide_context(network);

    // 4. 系统上下文：启动时拉取一次设置快照（失败放行）
    let system_ctx = SystemContext::new();
    provide_context(system_ctx);
    init_system(&system_ctx, settings);

    // 5. 锁定信号注入路由服务实现守卫（解耦！）
    let lock = system_ctx.lock_signal();

    view! {
        <Router lock=lock>
            <NetworkStatusBanner />
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
