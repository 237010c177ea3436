//! 强制更新闸门
//!
//! 与维护闸门同构：后台的强制更新开关生效期间锁定在更新页，
//! 导航拦截触发状态复查，开关关闭后整页重载恰好一次。
//! 额外携带版本信息展示与跳转应用商店的入口。
//! 注意：后台开关即锁定，版本比较只用于展示，不参与放行判断。

use super::adapter::{GateHost, SettingsSource, UpdateView};
use super::{CheckSlot, GatePhase};
use crate::web::route::AppRoute;
use std::cell::Cell;

/// 版本未知时的展示文案
const UNKNOWN_VERSION: &str = "Unknown";

/// 可测试的强制更新闸门逻辑
/// S: SettingsSource
/// H: GateHost
/// V: UpdateView
pub struct ForceUpdateGateTestable<S, H, V> {
    source: S,
    host: H,
    view: V,
    slot: CheckSlot,
    phase: Cell<GatePhase>,
}

impl<S, H, V> ForceUpdateGateTestable<S, H, V>
where
    S: SettingsSource,
    H: GateHost,
    V: UpdateView,
{
    pub fn new(source: S, host: H, view: V) -> Self {
        Self {
            source,
            host,
            view,
            slot: CheckSlot::new(),
            phase: Cell::new(GatePhase::Unknown),
        }
    }

    fn gate_path(&self) -> &'static str {
        AppRoute::ForceUpdate.to_path()
    }

    /// 最近一次核验结果
    pub fn phase(&self) -> GatePhase {
        self.phase.get()
    }

    /// 进入闸门页：钉住 History 条目并加载版本信息
    pub async fn enter(&self) {
        self.host.replace_location(self.gate_path());
        self.load_version_info().await;
    }

    /// 加载版本信息
    ///
    /// 当前版本来自宿主（编译期写入），要求版本来自状态源。
    /// 状态源失败时保持已显示的版本信息不变。
    pub async fn load_version_info(&self) {
        let current = self
            .host
            .app_version()
            .unwrap_or_else(|| UNKNOWN_VERSION.to_string());

        match self.source.required_version().await {
            Ok(required) => {
                let required = required.unwrap_or_else(|| UNKNOWN_VERSION.to_string());
                self.view.set_versions(current, required);
            }
            Err(e) => log_error!("[ForceUpdate] Error loading version info: {}", e),
        }
    }

    /// 导航拦截回调：指向别处的导航改为触发状态检查
    pub async fn on_navigation(&self, target_path: &str) {
        if target_path == self.gate_path() {
            return;
        }
        self.check_status().await;
    }

    /// 状态检查，与维护闸门同一套单槽串行化语义
    pub async fn check_status(&self) {
        if !self.slot.try_begin() {
            return;
        }
        self.view.set_checking(true);

        self.source.clear_cache();
        match self.source.update_required().await {
            Ok(false) => {
                if self.phase.get() != GatePhase::Inactive {
                    self.phase.set(GatePhase::Inactive);
                    log_info!("[ForceUpdate] Update no longer required, reloading app...");
                    self.host.reload_app();
                }
            }
            Ok(true) => {
                self.phase.set(GatePhase::Active);
                self.load_version_info().await;
            }
            Err(e) => {
                log_error!("[ForceUpdate] Error checking status: {}", e);
            }
        }

        self.view.set_checking(false);
        self.slot.finish();
    }

    /// 焦点恢复回调：位置漂移时钉回闸门
    pub fn on_screen_focus(&self) {
        if self.host.current_path() != self.gate_path() {
            self.host.replace_location(self.gate_path());
        }
    }

    /// 跳转应用商店
    pub fn update_now(&self) {
        self.host.open_url(&self.source.store_url());
    }

    /// 用户手动重试
    pub async fn retry(&self) {
        self.check_status().await;
    }
}

// =========================================================
// Web 专用类型别名
// =========================================================

/// 浏览器环境下的强制更新闸门
pub type ForceUpdateGate = ForceUpdateGateTestable<
    std::rc::Rc<crate::settings::SystemSettingsService>,
    super::adapter::WebGateHost,
    super::adapter::SignalUpdateView,
>;

// =========================================================
// 测试模块
// =========================================================

#[cfg(test)]
mod tests;
