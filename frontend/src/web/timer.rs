//! 定时器封装模块
//!
//! 使用 `web_sys` 的原生 `setTimeout` API。
//! 启动页/欢迎页的导航定时器都是一次性的"发射后不管"场景，
//! 因此闭包在注册后即被泄漏以保持存活（页面随后就会离开）。

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// 注册一次性定时器
///
/// # 参数
/// - `millis`: 延迟时间（毫秒）
/// - `callback`: 到期后执行的回调函数
pub fn set_timeout<F>(millis: u32, callback: F)
where
    F: FnOnce() + 'static,
{
    let closure = Closure::once(callback);

    if let Some(window) = web_sys::window() {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            millis as i32,
        );
    }

    // 泄漏闭包以保持回调存活
    closure.forget();
}
