//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、闸门页面及系统锁定的映射关系。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 启动页 (默认路由)
    #[default]
    Splash,
    /// 欢迎页
    Welcome,
    /// 主页（目的地搜索）
    Home,
    /// 维护闸门页
    Maintenance,
    /// 强制更新闸门页
    ForceUpdate,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" | "/splash" => Self::Splash,
            "/welcome" => Self::Welcome,
            "/home" => Self::Home,
            "/maintenance" => Self::Maintenance,
            "/force-update" => Self::ForceUpdate,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Splash => "/",
            Self::Welcome => "/welcome",
            Self::Home => "/home",
            Self::Maintenance => "/maintenance",
            Self::ForceUpdate => "/force-update",
            Self::NotFound => "/404",
        }
    }

    /// 该路由是否是闸门页面（锁定期间唯一允许停留的页面）
    pub fn is_gate(&self) -> bool {
        matches!(self, Self::Maintenance | Self::ForceUpdate)
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 系统级锁定
///
/// 由系统设置文档推导：任一锁定生效时，路由器把所有导航收拢到对应闸门页。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemLock {
    /// 维护模式
    Maintenance,
    /// 强制更新
    ForceUpdate,
}

impl SystemLock {
    /// **核心守卫逻辑：锁定对应的闸门路由**
    pub fn gate_route(&self) -> AppRoute {
        match self {
            Self::Maintenance => AppRoute::Maintenance,
            Self::ForceUpdate => AppRoute::ForceUpdate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_known_routes() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Splash);
        assert_eq!(AppRoute::from_path("/welcome"), AppRoute::Welcome);
        assert_eq!(AppRoute::from_path("/home"), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/maintenance"), AppRoute::Maintenance);
        assert_eq!(AppRoute::from_path("/force-update"), AppRoute::ForceUpdate);
    }

    #[test]
    fn test_from_path_unknown_is_not_found() {
        assert_eq!(AppRoute::from_path("/payments"), AppRoute::NotFound);
    }

    #[test]
    fn test_path_roundtrip() {
        for route in [
            AppRoute::Welcome,
            AppRoute::Home,
            AppRoute::Maintenance,
            AppRoute::ForceUpdate,
        ] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
    }

    #[test]
    fn test_gate_routes() {
        assert!(AppRoute::Maintenance.is_gate());
        assert!(AppRoute::ForceUpdate.is_gate());
        assert!(!AppRoute::Home.is_gate());
        assert_eq!(SystemLock::Maintenance.gate_route(), AppRoute::Maintenance);
        assert_eq!(SystemLock::ForceUpdate.gate_route(), AppRoute::ForceUpdate);
    }
}
