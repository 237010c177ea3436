//! 网络状态管理
//!
//! 监听浏览器的 online/offline 事件，把连接状态暴露为信号。
//! 原生平台的连接质量/电量启发式不在 Web 构建范围内。

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// 网络上下文
#[derive(Clone, Copy)]
pub struct NetworkContext {
    /// 是否在线（只读）
    online: ReadSignal<bool>,
    set_online: WriteSignal<bool>,
}

impl NetworkContext {
    /// 创建新的网络上下文，初始值取自 `navigator.onLine`
    pub fn new() -> Self {
        let initial = web_sys::window()
            .map(|w| w.navigator().on_line())
            .unwrap_or(true);
        let (online, set_online) = signal(initial);
        Self { online, set_online }
    }

    /// 获取连接状态信号
    pub fn online(&self) -> ReadSignal<bool> {
        self.online
    }

    /// 注册 online/offline 事件监听
    pub fn init_listeners(&self) {
        let set_online = self.set_online;

        if let Some(window) = web_sys::window() {
            let on_online = Closure::<dyn Fn()>::new(move || set_online.set(true));
            let _ = window
                .add_event_listener_with_callback("online", on_online.as_ref().unchecked_ref());
            on_online.forget();

            let on_offline = Closure::<dyn Fn()>::new(move || set_online.set(false));
            let _ = window
                .add_event_listener_with_callback("offline", on_offline.as_ref().unchecked_ref());
            on_offline.forget();
        }
    }
}

impl Default for NetworkContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取网络上下文
pub fn use_network() -> NetworkContext {
    use_context::<NetworkContext>().expect("NetworkContext should be provided")
}
