//! 维护闸门
//!
//! 维护模式生效期间把用户锁在维护页上，并在恰当的时机放行一次。
//! 所有操作都由离散 UI 事件驱动（进入页面、导航拦截、焦点恢复、手动重试），
//! 状态检查由 `CheckSlot` 串行化：同一时刻最多一个在途检查。
//!
//! 失败语义是保守的：状态源的任何失败只记日志、保持现状，
//! 不确定时宁可继续锁定，绝不误放行。

use super::adapter::{GateHost, MaintenanceView, SettingsSource};
use super::{CheckSlot, GatePhase};
use crate::web::route::AppRoute;
use std::cell::Cell;

/// 可测试的维护闸门逻辑
/// S: SettingsSource
/// H: GateHost
/// V: MaintenanceView
pub struct MaintenanceGateTestable<S, H, V> {
    source: S,
    host: H,
    view: V,
    slot: CheckSlot,
    phase: Cell<GatePhase>,
}

impl<S, H, V> MaintenanceGateTestable<S, H, V>
where
    S: SettingsSource,
    H: GateHost,
    V: MaintenanceView,
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

    /// 闸门自身的路径
    fn gate_path(&self) -> &'static str {
        AppRoute::Maintenance.to_path()
    }

    /// 最近一次核验结果
    pub fn phase(&self) -> GatePhase {
        self.phase.get()
    }

    /// 进入闸门页
    ///
    /// 先以替换方式改写当前 History 条目（后退无法逃出闸门），
    /// 再加载维护文案。
    pub async fn enter(&self) {
        self.host.replace_location(self.gate_path());
        self.load_message().await;
    }

    /// 加载维护文案
    ///
    /// 失败时保持上一条已显示的文案不变，只记录日志。
    /// 没有独立的重试策略，下一次检查自然会再拉一次。
    pub async fn load_message(&self) {
        match self.source.maintenance_message().await {
            Ok(message) => self.view.set_message(message),
            Err(e) => log_error!("[Maintenance] Error loading message: {}", e),
        }
    }

    /// 导航拦截回调
    ///
    /// 任何指向非闸门位置的导航都不放行，改为触发一次状态检查。
    pub async fn on_navigation(&self, target_path: &str) {
        if target_path == self.gate_path() {
            return;
        }
        self.check_status().await;
    }

    /// 核心操作：状态检查
    ///
    /// `CheckSlot` 保证同一时刻最多一个在途检查，重叠触发直接返回。
    /// 清缓存强制读到新鲜状态：
    /// - 已解除 -> 整页重载宿主应用（每次状态迁移恰好一次）
    /// - 仍生效 -> 刷新文案并留在闸门
    /// - 失败   -> 记日志，原地不动（保守：宁可多锁，不可误放）
    pub async fn check_status(&self) {
        if !self.slot.try_begin() {
            return;
        }
        self.view.set_checking(true);

        self.source.clear_cache();
        match self.source.maintenance_active().await {
            Ok(false) => {
                if self.phase.get() != GatePhase::Inactive {
                    self.phase.set(GatePhase::Inactive);
                    log_info!("[Maintenance] Maintenance mode disabled, reloading app...");
                    self.host.reload_app();
                }
            }
            Ok(true) => {
                self.phase.set(GatePhase::Active);
                self.load_message().await;
            }
            Err(e) => {
                log_error!("[Maintenance] Error checking status: {}", e);
            }
        }

        self.view.set_checking(false);
        self.slot.finish();
    }

    /// 焦点恢复回调
    ///
    /// 应用恢复前台时，如果浏览器位置已漂移，重新钉回闸门位置。
    pub fn on_screen_focus(&self) {
        if self.host.current_path() != self.gate_path() {
            self.host.replace_location(self.gate_path());
        }
    }

    /// 用户手动重试（"Try Again" 按钮）
    pub async fn retry(&self) {
        self.check_status().await;
    }
}

// =========================================================
// Web 专用类型别名
// =========================================================

/// 浏览器环境下的维护闸门
pub type MaintenanceGate = MaintenanceGateTestable<
    std::rc::Rc<crate::settings::SystemSettingsService>,
    super::adapter::WebGateHost,
    super::adapter::SignalMaintenanceView,
>;

// =========================================================
// 测试模块
// =========================================================

#[cfg(test)]
mod tests;
