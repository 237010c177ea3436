//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"请求 -> 守卫 -> 处理 -> 加载"的导航流程。
//!
//! 与闸门页面的分工：锁定期间路由器负责把渲染路由钉在闸门页，
//! 但每一次被拦下的导航意图都会通过 `navigation_attempt` 信号对外公布，
//! 由闸门页面决定是否据此发起一次状态检查。

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, SystemLock};

/// 获取当前浏览器路径
pub(crate) fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入系统锁定信号实现与设置系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 最近一次导航意图（含被守卫拦下的导航）
    nav_attempt: ReadSignal<Option<AppRoute>>,
    /// 记录导航意图（写入信号）
    set_nav_attempt: WriteSignal<Option<AppRoute>>,
    /// 系统锁定状态（注入的信号，实现解耦）
    lock: Signal<Option<SystemLock>>,
}

impl RouterService {
    /// 创建新的路由服务
    ///
    /// # Arguments
    /// * `lock` - 系统锁定信号，由外部注入实现解耦
    fn new(lock: Signal<Option<SystemLock>>) -> Self {
        // 初始化当前路由（从 URL 解析）
        let path = current_path();
        let initial_route = AppRoute::from_path(&path);
        let (current_route, set_route) = signal(initial_route);
        let (nav_attempt, set_nav_attempt) = signal(None);

        Self {
            current_route,
            set_route,
            nav_attempt,
            set_nav_attempt,
            lock,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 获取导航意图信号
    ///
    /// 每次 `navigate` 调用（无论是否被守卫拦截）都会更新一次。
    pub fn navigation_attempt(&self) -> ReadSignal<Option<AppRoute>> {
        self.nav_attempt
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 守卫(Lock) -> 处理 -> 加载
    pub fn navigate(&self, path: &str) {
        let target_route = AppRoute::from_path(path);
        self.navigate_to_route(target_route, true);
    }

    /// 导航到指定路由
    ///
    /// # Arguments
    /// * `target_route` - 目标路由
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        // --- Step 0: 公布导航意图 ---
        // 闸门页面监听此信号，对被拦截的导航做状态检查
        self.set_nav_attempt.set(Some(target_route));

        // --- Step 1: 守卫目标路由 ---
        // 锁定期间，非闸门目标一律收拢回闸门页。
        // 注意守卫只负责"钉住"渲染路由，不负责解锁：
        // 解锁唯一的出口是闸门页完成检查后的整页重载。
        if let Some(lock) = self.lock.get_untracked() {
            let gate = lock.gate_route();
            if target_route != gate {
                web_sys::console::log_1(
                    &"[Router] Navigation suppressed by system lock.".into(),
                );
                replace_history_state(gate.to_path());
                self.set_route.set(gate);
                return;
            }
        }

        // --- Step 2: 加载页面 (更新状态) ---
        // 守卫通过，推入 History 并更新 UI
        if use_push {
            push_history_state(target_route.to_path());
        } else {
            replace_history_state(target_route.to_path());
        }
        self.set_route.set(target_route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let set_nav_attempt = self.set_nav_attempt;
        let lock = self.lock;

        let closure = Closure::<dyn Fn()>::new(move || {
            let path = current_path();
            let target_route = AppRoute::from_path(&path);
            set_nav_attempt.set(Some(target_route));

            // popstate 时也执行守卫逻辑：后退不能逃出闸门
            if let Some(lock) = lock.get_untracked() {
                let gate = lock.gate_route();
                if target_route != gate {
                    replace_history_state(gate.to_path());
                    set_route.set(gate);
                    return;
                }
            }
            set_route.set(target_route);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 设置锁定状态变化时的自动重定向
    ///
    /// 锁定出现 -> 收拢到闸门页。
    /// 锁定消失 -> 不做任何事：释放只能由闸门页整页重载完成。
    fn setup_lock_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let lock = self.lock;

        Effect::new(move |_| {
            if let Some(lock) = lock.get() {
                let gate = lock.gate_route();
                if current_route.get_untracked() != gate {
                    replace_history_state(gate.to_path());
                    set_route.set(gate);
                    web_sys::console::log_1(
                        &"[Router] System lock engaged, redirecting to gate.".into(),
                    );
                }
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(lock: Signal<Option<SystemLock>>) -> RouterService {
    let router = RouterService::new(lock);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_lock_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 系统锁定信号
    lock: Signal<Option<SystemLock>>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    // 提供路由服务到 Context
    provide_router(lock);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}
