//! 闸门适配层
//!
//! 闸门逻辑只面向三个抽象协作者：状态源、宿主、视图。
//! 生产实现绑定系统设置服务与浏览器 API；
//! 测试实现在本文件的 `tests` 模块中，全部基于 `RefCell`/`Cell`。

use async_trait::async_trait;
use leptos::prelude::*;
use std::rc::Rc;
use wasm_bindgen::JsValue;

use crate::settings::{Clock, SettingsApi, SystemSettingsServiceTestable};

// =========================================================
// 抽象接口
// =========================================================

/// 抽象状态源接口：维护/更新状态与相关文案
///
/// 读取接口的失败统一表现为 `Err(String)`（状态源不可达），
/// 闸门收到后只记录日志并保持锁定。
#[async_trait(?Send)]
pub trait SettingsSource {
    /// 获取维护文案
    async fn maintenance_message(&self) -> Result<String, String>;
    /// 维护模式是否仍然生效
    async fn maintenance_active(&self) -> Result<bool, String>;
    /// 是否仍要求强制更新
    async fn update_required(&self) -> Result<bool, String>;
    /// 要求的客户端版本号
    async fn required_version(&self) -> Result<Option<String>, String>;
    /// 同步清空缓存，强制下一次读取绕过记忆化
    fn clear_cache(&self);
    /// 应用商店地址
    fn store_url(&self) -> String;
}

#[async_trait(?Send)]
impl<A, C> SettingsSource for SystemSettingsServiceTestable<A, C>
where
    A: SettingsApi,
    C: Clock,
{
    async fn maintenance_message(&self) -> Result<String, String> {
        SystemSettingsServiceTestable::maintenance_message(self).await
    }

    async fn maintenance_active(&self) -> Result<bool, String> {
        SystemSettingsServiceTestable::maintenance_active(self).await
    }

    async fn update_required(&self) -> Result<bool, String> {
        SystemSettingsServiceTestable::update_required(self).await
    }

    async fn required_version(&self) -> Result<Option<String>, String> {
        SystemSettingsServiceTestable::required_version(self).await
    }

    fn clear_cache(&self) {
        SystemSettingsServiceTestable::clear_cache(self)
    }

    fn store_url(&self) -> String {
        SystemSettingsServiceTestable::store_url(self).to_string()
    }
}

// 共享所有权包装也可作为状态源（组件侧持有 Rc）
#[async_trait(?Send)]
impl<T: SettingsSource> SettingsSource for Rc<T> {
    async fn maintenance_message(&self) -> Result<String, String> {
        (**self).maintenance_message().await
    }

    async fn maintenance_active(&self) -> Result<bool, String> {
        (**self).maintenance_active().await
    }

    async fn update_required(&self) -> Result<bool, String> {
        (**self).update_required().await
    }

    async fn required_version(&self) -> Result<Option<String>, String> {
        (**self).required_version().await
    }

    fn clear_cache(&self) {
        (**self).clear_cache()
    }

    fn store_url(&self) -> String {
        (**self).store_url()
    }
}

/// 抽象宿主接口：浏览器位置、整页重载与外链
pub trait GateHost {
    /// 当前浏览器路径
    fn current_path(&self) -> String;
    /// 以替换方式改写当前 History 条目（后退无法逃出闸门）
    fn replace_location(&self, path: &str);
    /// 整页重载宿主应用（硬复位，不是软路由）
    fn reload_app(&self);
    /// 在新窗口打开外部链接
    fn open_url(&self, url: &str);
    /// 当前客户端版本号
    fn app_version(&self) -> Option<String>;
}

/// 浏览器宿主实现
pub struct WebGateHost;

impl GateHost for WebGateHost {
    fn current_path(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_else(|| "/".to_string())
    }

    fn replace_location(&self, path: &str) {
        if let Some(window) = web_sys::window() {
            if let Ok(history) = window.history() {
                let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
            }
        }
    }

    fn reload_app(&self) {
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    }

    fn open_url(&self, url: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.open_with_url_and_target(url, "_blank");
        }
    }

    fn app_version(&self) -> Option<String> {
        Some(env!("CARGO_PKG_VERSION").to_string())
    }
}

// =========================================================
// 视图接口
// =========================================================

/// 维护闸门的渲染出口
pub trait MaintenanceView {
    fn set_message(&self, message: String);
    fn set_checking(&self, checking: bool);
}

/// 以 Leptos 信号驱动界面的维护视图
pub struct SignalMaintenanceView {
    pub set_message: WriteSignal<String>,
    pub set_checking: WriteSignal<bool>,
}

impl MaintenanceView for SignalMaintenanceView {
    fn set_message(&self, message: String) {
        self.set_message.set(message);
    }

    fn set_checking(&self, checking: bool) {
        self.set_checking.set(checking);
    }
}

/// 强制更新闸门的渲染出口
pub trait UpdateView {
    fn set_versions(&self, current: String, required: String);
    fn set_checking(&self, checking: bool);
}

/// 以 Leptos 信号驱动界面的更新视图
pub struct SignalUpdateView {
    pub set_current: WriteSignal<String>,
    pub set_required: WriteSignal<String>,
    pub set_checking: WriteSignal<bool>,
}

impl UpdateView for SignalUpdateView {
    fn set_versions(&self, current: String, required: String) {
        self.set_current.set(current);
        self.set_required.set(required);
    }

    fn set_checking(&self, checking: bool) {
        self.set_checking.set(checking);
    }
}

// =========================================================
// 测试环境实现 (Mock)
// =========================================================
