//! 系统设置服务（维护/更新状态源）
//!
//! 以 5 分钟 TTL 记忆化后端的系统设置文档，并按字段提供读取接口。
//! 两种失败策略并存：
//! - 闸门契约接口（`maintenance_*` / `update_required` / `required_version`）
//!   把失败原样上抛，由闸门决定"保持锁定"；
//! - 启动接口 `settings_or_default` 失败放行，设置接口故障不阻塞启动。

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use leptos::prelude::*;

use crate::api::RideLinkApi;
use ridelink_shared::{DEFAULT_MAINTENANCE_MESSAGE, SystemSettings, Timestamp};

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

// =========================================================
// 常量配置
// =========================================================

/// 设置缓存的有效期
const CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// 应用商店地址（Web 构建统一退回 Play 商店链接）
const STORE_URL: &str = "https://play.google.com/store/apps/details?id=io.ridelink.app";

// =========================================================
// 抽象接口 (Adapter)
// =========================================================

/// 抽象传输接口：负责拉取系统设置文档
#[async_trait(?Send)]
pub trait SettingsApi {
    async fn fetch_system_settings(&self) -> Result<SystemSettings, String>;
}

#[async_trait(?Send)]
impl SettingsApi for RideLinkApi {
    async fn fetch_system_settings(&self) -> Result<SystemSettings, String> {
        RideLinkApi::fetch_system_settings(self).await
    }
}

/// 抽象时钟接口：缓存时效判断所需的当前时间
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// 浏览器时钟
pub struct JsClock;

impl Clock for JsClock {
    fn now(&self) -> Timestamp {
        Timestamp::new(js_sys::Date::now() as i64)
    }
}

// =========================================================
// 业务逻辑层 - 可测试版本
// =========================================================

/// 可测试的系统设置服务
/// A: SettingsApi
/// C: Clock
pub struct SystemSettingsServiceTestable<A, C> {
    api: A,
    clock: C,
    cache: RefCell<Option<SystemSettings>>,
    cached_at: Cell<Timestamp>,
}

impl<A, C> SystemSettingsServiceTestable<A, C>
where
    A: SettingsApi,
    C: Clock,
{
    pub fn new(api: A, clock: C) -> Self {
        Self {
            api,
            clock,
            cache: RefCell::new(None),
            cached_at: Cell::new(Timestamp::default()),
        }
    }

    /// 获取系统设置（带 TTL 记忆化）
    pub async fn fetch_system_settings(&self) -> Result<SystemSettings, String> {
        let now = self.clock.now();
        {
            let cache = self.cache.borrow();
            if let Some(cached) = cache.as_ref() {
                if now - self.cached_at.get() < CACHE_TTL {
                    log_info!("[Settings] Using cached system settings");
                    return Ok(cached.clone());
                }
            }
        }

        log_info!("[Settings] Fetching system settings from API...");
        let settings = self.api.fetch_system_settings().await.map_err(|e| {
            log_error!("[Settings] Error fetching system settings: {}", e);
            e
        })?;

        *self.cache.borrow_mut() = Some(settings.clone());
        self.cached_at.set(now);
        Ok(settings)
    }

    /// 维护模式是否开启（闸门契约：失败上抛）
    pub async fn maintenance_active(&self) -> Result<bool, String> {
        Ok(self.fetch_system_settings().await?.maintenance_mode)
    }

    /// 获取维护文案（字段缺省时使用静态兜底；失败上抛）
    pub async fn maintenance_message(&self) -> Result<String, String> {
        let settings = self.fetch_system_settings().await?;
        Ok(settings
            .maintenance_message
            .unwrap_or_else(|| DEFAULT_MAINTENANCE_MESSAGE.to_string()))
    }

    /// 是否要求强制更新（后台开关即锁定，不做版本比较；失败上抛）
    pub async fn update_required(&self) -> Result<bool, String> {
        Ok(self.fetch_system_settings().await?.force_update)
    }

    /// 获取要求的客户端版本号（失败上抛）
    pub async fn required_version(&self) -> Result<Option<String>, String> {
        Ok(self.fetch_system_settings().await?.user_app_version)
    }

    /// 启动路径：拉取设置，失败放行为默认值
    pub async fn settings_or_default(&self) -> SystemSettings {
        match self.fetch_system_settings().await {
            Ok(settings) => settings,
            Err(e) => {
                log_error!("[Settings] Startup fetch failed, failing open: {}", e);
                SystemSettings::default()
            }
        }
    }

    /// 清空缓存，强制下一次读取绕过记忆化
    pub fn clear_cache(&self) {
        *self.cache.borrow_mut() = None;
        self.cached_at.set(Timestamp::default());
    }

    /// 获取当前缓存的设置（同步）
    pub fn current_settings(&self) -> Option<SystemSettings> {
        self.cache.borrow().clone()
    }

    /// 获取应用商店地址
    pub fn store_url(&self) -> &'static str {
        STORE_URL
    }
}

// =========================================================
// Web 专用类型别名
// =========================================================

/// 浏览器环境下的系统设置服务
pub type SystemSettingsService = SystemSettingsServiceTestable<RideLinkApi, JsClock>;

/// 从 Context 获取共享的设置服务
pub fn use_settings() -> Rc<SystemSettingsService> {
    use_context::<send_wrapper::SendWrapper<Rc<SystemSettingsService>>>()
        .expect("SystemSettingsService not found in context. Ensure App provides it.")
        .take()
}

// =========================================================
// 测试模块
// =========================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Mock 传输适配器：按脚本顺序返回结果
    pub struct MockSettingsApi {
        results: RefCell<VecDeque<Result<SystemSettings, String>>>,
        pub calls: Cell<u32>,
    }

    impl MockSettingsApi {
        fn new() -> Self {
            Self {
                results: RefCell::new(VecDeque::new()),
                calls: Cell::new(0),
            }
        }

        fn push_ok(&self, settings: SystemSettings) {
            self.results.borrow_mut().push_back(Ok(settings));
        }

        fn push_err(&self, msg: &str) {
            self.results.borrow_mut().push_back(Err(msg.to_string()));
        }
    }

    #[async_trait(?Send)]
    impl SettingsApi for MockSettingsApi {
        async fn fetch_system_settings(&self) -> Result<SystemSettings, String> {
            self.calls.set(self.calls.get() + 1);
            self.results
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err("no scripted response".to_string()))
        }
    }

    /// Mock 时钟：可手动推进
    pub struct MockClock {
        now_ms: Cell<i64>,
    }

    impl MockClock {
        fn new() -> Self {
            Self { now_ms: Cell::new(0) }
        }

        fn advance(&self, d: Duration) {
            self.now_ms.set(self.now_ms.get() + d.as_millis() as i64);
        }
    }

    impl Clock for Rc<MockClock> {
        fn now(&self) -> Timestamp {
            Timestamp::new(self.now_ms.get())
        }
    }

    fn maintenance_settings(message: &str) -> SystemSettings {
        SystemSettings {
            maintenance_mode: true,
            force_update: false,
            maintenance_message: Some(message.to_string()),
            user_app_version: None,
        }
    }

    fn service(
        api: MockSettingsApi,
        clock: Rc<MockClock>,
    ) -> SystemSettingsServiceTestable<MockSettingsApi, Rc<MockClock>> {
        SystemSettingsServiceTestable::new(api, clock)
    }

    #[tokio::test]
    async fn test_cache_hit_within_ttl() {
        let api = MockSettingsApi::new();
        api.push_ok(maintenance_settings("Back soon!"));
        let clock = Rc::new(MockClock::new());
        let svc = service(api, clock.clone());

        svc.fetch_system_settings().await.unwrap();
        clock.advance(Duration::from_secs(60));
        svc.fetch_system_settings().await.unwrap();

        // 第二次命中缓存，只发起一次请求
        assert_eq!(svc.api.calls.get(), 1);
    }

    #[tokio::test]
    async fn test_cache_expires_after_ttl() {
        let api = MockSettingsApi::new();
        api.push_ok(maintenance_settings("v1"));
        api.push_ok(maintenance_settings("v2"));
        let clock = Rc::new(MockClock::new());
        let svc = service(api, clock.clone());

        svc.fetch_system_settings().await.unwrap();
        clock.advance(Duration::from_secs(5 * 60 + 1));
        let second = svc.fetch_system_settings().await.unwrap();

        assert_eq!(svc.api.calls.get(), 2);
        assert_eq!(second.maintenance_message.as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn test_clear_cache_forces_refetch() {
        let api = MockSettingsApi::new();
        api.push_ok(maintenance_settings("v1"));
        api.push_ok(maintenance_settings("v2"));
        let clock = Rc::new(MockClock::new());
        let svc = service(api, clock.clone());

        svc.fetch_system_settings().await.unwrap();
        // 缓存仍然新鲜，但 clear_cache 必须绕过记忆化
        svc.clear_cache();
        let second = svc.fetch_system_settings().await.unwrap();

        assert_eq!(svc.api.calls.get(), 2);
        assert_eq!(second.maintenance_message.as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn test_maintenance_message_falls_back_when_missing() {
        let api = MockSettingsApi::new();
        api.push_ok(SystemSettings {
            maintenance_mode: true,
            ..SystemSettings::default()
        });
        let svc = service(api, Rc::new(MockClock::new()));

        let message = svc.maintenance_message().await.unwrap();
        assert_eq!(message, DEFAULT_MAINTENANCE_MESSAGE);
    }

    #[tokio::test]
    async fn test_gate_accessors_propagate_errors() {
        let api = MockSettingsApi::new();
        api.push_err("connection refused");
        api.push_err("connection refused");
        let svc = service(api, Rc::new(MockClock::new()));

        assert!(svc.maintenance_active().await.is_err());
        assert!(svc.maintenance_message().await.is_err());
    }

    #[tokio::test]
    async fn test_startup_fetch_fails_open() {
        let api = MockSettingsApi::new();
        api.push_err("connection refused");
        let svc = service(api, Rc::new(MockClock::new()));

        let settings = svc.settings_or_default().await;
        assert!(!settings.maintenance_mode);
        assert!(!settings.force_update);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let api = MockSettingsApi::new();
        api.push_err("connection refused");
        api.push_ok(maintenance_settings("recovered"));
        let svc = service(api, Rc::new(MockClock::new()));

        assert!(svc.fetch_system_settings().await.is_err());
        assert!(svc.current_settings().is_none());

        let second = svc.fetch_system_settings().await.unwrap();
        assert_eq!(second.maintenance_message.as_deref(), Some("recovered"));
        assert_eq!(svc.api.calls.get(), 2);
    }

    #[tokio::test]
    async fn test_field_accessors() {
        let api = MockSettingsApi::new();
        api.push_ok(SystemSettings {
            maintenance_mode: false,
            force_update: true,
            maintenance_message: None,
            user_app_version: Some("2.1.0".to_string()),
        });
        let svc = service(api, Rc::new(MockClock::new()));

        assert!(!svc.maintenance_active().await.unwrap());
        assert!(svc.update_required().await.unwrap());
        assert_eq!(
            svc.required_version().await.unwrap().as_deref(),
            Some("2.1.0")
        );
    }
}
