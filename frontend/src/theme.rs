//! 主题管理
//!
//! 深色/浅色主题：优先使用持久化的用户选择，
//! 没有选择时跟随系统的 `prefers-color-scheme`。

use crate::web::LocalStorage;

const STORAGE_THEME_KEY: &str = "ridelink_theme";

/// 系统是否偏好深色
fn prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok())
        .flatten()
        .map(|m| m.matches())
        .unwrap_or(false)
}

/// 把主题应用到 `<body>`
fn apply(dark: bool) {
    if let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    {
        let _ = body.class_list().toggle_with_force("dark", dark);
    }
}

/// 当前是否为深色主题
pub fn is_dark() -> bool {
    match LocalStorage::get(STORAGE_THEME_KEY) {
        Some(value) => value == "dark",
        None => prefers_dark(),
    }
}

/// 初始化主题（应用启动时调用一次）
pub fn init_theme() {
    apply(is_dark());
}

/// 切换主题并持久化用户选择
pub fn set_theme(dark: bool) {
    apply(dark);
    LocalStorage::set(STORAGE_THEME_KEY, if dark { "dark" } else { "light" });
}
