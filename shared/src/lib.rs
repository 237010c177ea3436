pub mod protocol;
pub mod time;
pub mod version;

pub use protocol::{
    ApiEnvelope, AutocompletePayload, GeoPoint, Geometry, PlaceDetails, PlacePrediction,
    StructuredFormatting, SystemSettings,
};
pub use time::Timestamp;
pub use version::{compare_versions, is_update_required};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 系统设置接口路径
pub const PATH_SYSTEM_SETTINGS: &str = "/admin/settings/system";
/// 地点自动补全接口路径
pub const PATH_PLACE_AUTOCOMPLETE: &str = "/api/google-maps/places/autocomplete";
/// 地点详情接口路径
pub const PATH_PLACE_DETAILS: &str = "/api/google-maps/places/details";

/// 维护消息的静态兜底文案（状态源未响应前显示）
pub const DEFAULT_MAINTENANCE_MESSAGE: &str =
    "We are currently performing maintenance. Please check back soon.";

/// 地点搜索的默认偏向半径（米）
pub const DEFAULT_PLACE_RADIUS: u32 = 10_000;
