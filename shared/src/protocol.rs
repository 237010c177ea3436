//! 传输层数据模型
//!
//! 定义客户端与后端之间的 JSON 结构。
//! 设置文档使用 camelCase 字段名，地点相关结构沿用后端代理的 snake_case。

use serde::{Deserialize, Serialize};

// =========================================================
// 系统设置文档
// =========================================================

/// 后端下发的系统设置
///
/// `Default` 即"放行"取值：启动路径在状态源不可达时使用它，
/// 保证设置接口故障不会阻塞应用启动。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SystemSettings {
    /// 维护模式开关
    pub maintenance_mode: bool,
    /// 强制更新开关（后台开启时无条件锁定在更新页）
    pub force_update: bool,
    /// 维护文案，缺省时由客户端使用静态兜底
    pub maintenance_message: Option<String>,
    /// 要求的客户端版本号
    pub user_app_version: Option<String>,
}

// =========================================================
// 通用响应信封
// =========================================================

/// 后端代理的统一响应信封
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// =========================================================
// 地点模型
// =========================================================

/// 经纬度坐标
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// 自动补全结果的结构化展示文本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredFormatting {
    pub main_text: String,
    pub secondary_text: String,
}

/// 单条地点预测
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacePrediction {
    pub place_id: String,
    pub description: String,
    pub structured_formatting: StructuredFormatting,
    #[serde(default)]
    pub types: Vec<String>,
}

/// 自动补全响应的 data 字段
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutocompletePayload {
    pub predictions: Vec<PlacePrediction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub location: GeoPoint,
}

/// 地点详情
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetails {
    pub place_id: String,
    pub formatted_address: String,
    pub name: String,
    pub geometry: Geometry,
}

// =========================================================
// 测试模块
// =========================================================
