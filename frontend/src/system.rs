//! 系统状态管理
//!
//! 管理启动时拉取的系统设置快照，与路由系统解耦：
//! 路由服务通过注入的锁定信号来决定导航是否收拢到闸门页。

use crate::settings::SystemSettingsService;
use crate::web::route::SystemLock;
use leptos::prelude::*;
use leptos::task::spawn_local;
use ridelink_shared::SystemSettings;
use std::rc::Rc;

/// 系统状态
///
/// `settings == None` 表示启动检查尚未返回。
#[derive(Clone, Default)]
pub struct SystemStatus {
    /// 启动时拉取的设置快照（失败放行为默认值）
    pub settings: Option<SystemSettings>,
}

/// 系统上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct SystemContext {
    /// 系统状态（只读）
    pub state: ReadSignal<SystemStatus>,
    /// 设置系统状态（写入）
    pub set_state: WriteSignal<SystemStatus>,
}

impl SystemContext {
    /// 创建新的系统上下文
    pub fn new() -> Self {
        let (state, set_state) = signal(SystemStatus::default());
        Self { state, set_state }
    }

    /// 获取锁定信号（用于路由服务注入）
    ///
    /// 两个开关同时生效时维护优先：维护期间后端多半也服务不了更新流程。
    pub fn lock_signal(&self) -> Signal<Option<SystemLock>> {
        let state = self.state;
        Signal::derive(move || {
            let status = state.get();
            match status.settings {
                Some(ref settings) if settings.maintenance_mode => Some(SystemLock::Maintenance),
                Some(ref settings) if settings.force_update => Some(SystemLock::ForceUpdate),
                _ => None,
            }
        })
    }
}

impl Default for SystemContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 初始化系统状态
///
/// 启动时拉取一次系统设置。启动路径失败放行：
/// 设置接口不可达不会阻塞应用，闸门语义只在锁定确认后才生效。
pub fn init_system(ctx: &SystemContext, service: Rc<SystemSettingsService>) {
    let set_state = ctx.set_state;
    spawn_local(async move {
        let settings = service.settings_or_default().await;
        set_state.update(|state| {
            state.settings = Some(settings);
        });
    });
}
