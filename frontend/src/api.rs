use gloo_net::http::Request;
use ridelink_shared::{
    ApiEnvelope, AutocompletePayload, GeoPoint, PlaceDetails, PlacePrediction, SystemSettings,
    PATH_PLACE_AUTOCOMPLETE, PATH_PLACE_DETAILS, PATH_SYSTEM_SETTINGS,
};

#[derive(Clone, Debug, PartialEq)]
pub struct RideLinkApi {
    pub base_url: String,
}

impl RideLinkApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 获取系统设置文档
    pub async fn fetch_system_settings(&self) -> Result<SystemSettings, String> {
        let url = self.url(PATH_SYSTEM_SETTINGS);
        let res = Request::get(&url).send().await.map_err(|e| e.to_string())?;

        if !res.ok() {
            return Err(format!("获取系统设置失败: {}", res.status()));
        }

        res.json::<SystemSettings>().await.map_err(|e| e.to_string())
    }

    /// 地点自动补全
    ///
    /// 空白查询直接返回空列表，不发起请求；
    /// 提供定位时附带位置偏向参数以提高相关性。
    pub async fn place_autocomplete(
        &self,
        query: &str,
        location: Option<GeoPoint>,
        radius: u32,
    ) -> Result<Vec<PlacePrediction>, String> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let encoded: String = js_sys::encode_uri_component(query).into();
        let mut url = format!(
            "{}?query={}",
            self.url(PATH_PLACE_AUTOCOMPLETE),
            encoded
        );
        if let Some(loc) = location {
            url.push_str(&format!("&lat={}&lng={}&radius={}", loc.lat, loc.lng, radius));
        }

        let res = Request::get(&url).send().await.map_err(|e| e.to_string())?;

        if !res.ok() {
            return Err(format!("地点搜索失败: {}", res.status()));
        }

        let envelope = res
            .json::<ApiEnvelope<AutocompletePayload>>()
            .await
            .map_err(|e| e.to_string())?;

        // 非成功信封按空结果处理
        if envelope.success {
            if let Some(payload) = envelope.data {
                return Ok(payload.predictions);
            }
        }
        Ok(Vec::new())
    }

    /// 获取地点详情
    pub async fn place_details(&self, place_id: &str) -> Result<Option<PlaceDetails>, String> {
        let encoded: String = js_sys::encode_uri_component(place_id).into();
        let url = format!("{}?place_id={}", self.url(PATH_PLACE_DETAILS), encoded);

        let res = Request::get(&url).send().await.map_err(|e| e.to_string())?;

        if !res.ok() {
            return Err(format!("获取地点详情失败: {}", res.status()));
        }

        let envelope = res
            .json::<ApiEnvelope<PlaceDetails>>()
            .await
            .map_err(|e| e.to_string())?;

        if envelope.success {
            Ok(envelope.data)
        } else {
            Ok(None)
        }
    }
}
