//! 闸门通用构件
//!
//! 维护闸门与强制更新闸门共享的状态机原语：
//! - `GatePhase`: 三值核验状态，未核验绝不冒充已核验
//! - `CheckSlot`: 单槽在途检查守卫，并发触发折叠为 no-op

use std::cell::Cell;

// =========================================================
// 条件编译日志宏
// =========================================================
#[cfg(target_arch = "wasm32")]
macro_rules! log_info {
    ($($t:tt)*) => (web_sys::console::log_1(&format!($($t)*).into()))
}
#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_info {
    ($($t:tt)*) => (println!($($t)*))
}

#[cfg(target_arch = "wasm32")]
macro_rules! log_error {
    ($($t:tt)*) => (web_sys::console::error_1(&format!($($t)*).into()))
}
#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_error {
    ($($t:tt)*) => (eprintln!($($t)*))
}

pub mod adapter;
pub mod maintenance;
pub mod update;

// =========================================================
// 核验状态
// =========================================================

/// 闸门对系统状态的核验结果
///
/// 进入闸门页时为 `Unknown`：此时只是"被送进来"，尚未向状态源核实过。
/// 只有一次完整的状态检查才能把它迁移到 `Active` / `Inactive`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GatePhase {
    /// 尚未完成任何一次状态检查
    #[default]
    Unknown,
    /// 最近一次检查确认锁定仍然生效
    Active,
    /// 最近一次检查确认锁定已解除（整页重载已触发）
    Inactive,
}

// =========================================================
// 单槽在途检查守卫
// =========================================================

/// 检查槽状态机：{Idle, Checking}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckState {
    Idle,
    Checking,
}

/// 单槽在途检查守卫
///
/// 同一时刻最多允许一个状态检查在途。UI 事件循环是单线程协作式的，
/// `Cell` 上的读-改-写即等价于一次 CAS：`try_begin` 在占用时返回 false，
/// 重叠触发（导航拦截、焦点恢复、手动重试）由调用方折叠为 no-op。
pub struct CheckSlot(Cell<CheckState>);

impl CheckSlot {
    pub fn new() -> Self {
        Self(Cell::new(CheckState::Idle))
    }

    /// 尝试占用检查槽
    ///
    /// 返回 false 表示已有检查在途，本次触发应当放弃。
    pub fn try_begin(&self) -> bool {
        if self.0.get() == CheckState::Checking {
            return false;
        }
        self.0.set(CheckState::Checking);
        true
    }

    /// 释放检查槽
    ///
    /// 检查无论成败都必须走到这里；没有取消路径。
    pub fn finish(&self) {
        self.0.set(CheckState::Idle);
    }

    /// 是否有检查在途
    pub fn is_checking(&self) -> bool {
        self.0.get() == CheckState::Checking
    }
}

impl Default for CheckSlot {
    fn default() -> Self {
        Self::new()
    }
}
