//! 编译期环境配置
//!
//! 后端地址在构建时通过 `RIDELINK_API_URL` 覆盖，未设置时使用开发默认值。

/// 开发环境默认后端地址
const DEFAULT_API_URL: &str = "http://192.168.1.12:3000";

/// 获取后端 API 基地址
pub fn api_url() -> &'static str {
    option_env!("RIDELINK_API_URL").unwrap_or(DEFAULT_API_URL)
}
