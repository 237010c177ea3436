use super::*;
use crate::gate::adapter::tests::{MockGateHost, MockSettingsSource, MockUpdateView};

// =========================================================
// 辅助函数
// =========================================================

const GATE: &str = "/force-update";

fn create_gate(
    source: MockSettingsSource,
    host: MockGateHost,
) -> ForceUpdateGateTestable<MockSettingsSource, MockGateHost, MockUpdateView> {
    ForceUpdateGateTestable::new(source, host, MockUpdateView::new())
}

// =========================================================
// enter / 版本信息测试
// =========================================================

#[tokio::test]
async fn test_enter_pins_location_and_shows_versions() {
    let source = MockSettingsSource::new().with_required_version("1.3.0");
    let gate = create_gate(source, MockGateHost::new("/home"));

    gate.enter().await;

    assert_eq!(gate.host.current_path(), GATE);
    assert_eq!(
        *gate.view.versions.borrow(),
        vec![("1.2.0".to_string(), "1.3.0".to_string())]
    );
}

#[tokio::test]
async fn test_missing_versions_display_unknown() {
    let source = MockSettingsSource::new();
    let mut host = MockGateHost::new(GATE);
    host.version = None;
    let gate = create_gate(source, host);

    gate.load_version_info().await;

    assert_eq!(
        *gate.view.versions.borrow(),
        vec![("Unknown".to_string(), "Unknown".to_string())]
    );
}

// =========================================================
// check_status 测试
// =========================================================

#[tokio::test]
async fn test_release_triggers_reload_once() {
    let source = MockSettingsSource::new().with_update(false).with_update(false);
    let gate = create_gate(source, MockGateHost::new(GATE));

    gate.check_status().await;
    gate.retry().await;

    assert_eq!(gate.host.reloads.get(), 1);
    assert_eq!(gate.phase(), GatePhase::Inactive);
}

#[tokio::test]
async fn test_still_required_refreshes_versions() {
    let source = MockSettingsSource::new()
        .with_update(true)
        .with_required_version("2.0.0");
    let gate = create_gate(source, MockGateHost::new(GATE));

    gate.check_status().await;

    assert_eq!(gate.host.reloads.get(), 0);
    assert_eq!(gate.phase(), GatePhase::Active);
    assert_eq!(
        *gate.view.versions.borrow(),
        vec![("1.2.0".to_string(), "2.0.0".to_string())]
    );
    assert_eq!(gate.source.clear_cache_calls.get(), 1);
}

#[tokio::test]
async fn test_check_error_stays_locked() {
    let source = MockSettingsSource::new().with_update_err("connection refused");
    let gate = create_gate(source, MockGateHost::new(GATE));

    gate.check_status().await;

    assert_eq!(gate.host.reloads.get(), 0);
    assert_eq!(gate.phase(), GatePhase::Unknown);
    assert!(!gate.slot.is_checking());
}

#[tokio::test]
async fn test_overlapping_triggers_collapse_to_noop() {
    use std::future::Future;
    use std::task::{Context, Poll};

    let source = MockSettingsSource::new()
        .with_update(true)
        .with_required_version("2.0.0");
    let barrier = source.install_barrier();
    let gate = create_gate(source, MockGateHost::new(GATE));

    let waker = futures::task::noop_waker();
    let mut cx = Context::from_waker(&waker);
    let mut first = Box::pin(gate.check_status());
    assert!(first.as_mut().poll(&mut cx).is_pending());

    gate.retry().await;
    assert_eq!(gate.source.update_calls.get(), 1);
    assert_eq!(gate.source.clear_cache_calls.get(), 1);

    barrier.send(()).unwrap();
    match first.as_mut().poll(&mut cx) {
        Poll::Ready(()) => {}
        Poll::Pending => panic!("released check should complete"),
    }
}

// =========================================================
// 导航拦截 / 商店跳转测试
// =========================================================

#[tokio::test]
async fn test_navigation_elsewhere_triggers_check() {
    let source = MockSettingsSource::new()
        .with_update(true)
        .with_required_version("2.0.0");
    let gate = create_gate(source, MockGateHost::new(GATE));

    gate.on_navigation("/home").await;
    assert_eq!(gate.source.update_calls.get(), 1);

    gate.on_navigation(GATE).await;
    assert_eq!(gate.source.update_calls.get(), 1);
}

#[tokio::test]
async fn test_focus_reasserts_gate_location() {
    let source = MockSettingsSource::new();
    let gate = create_gate(source, MockGateHost::new("/welcome"));

    gate.on_screen_focus();
    assert_eq!(gate.host.current_path(), GATE);
}

#[tokio::test]
async fn test_update_now_opens_store() {
    let source = MockSettingsSource::new();
    let gate = create_gate(source, MockGateHost::new(GATE));

    gate.update_now();

    assert_eq!(
        *gate.host.opened_urls.borrow(),
        vec!["https://store.example/app".to_string()]
    );
}
