use super::*;
use crate::gate::adapter::tests::{MockGateHost, MockMaintenanceView, MockSettingsSource};
use std::future::Future;
use std::task::{Context, Poll};

// =========================================================
// 辅助函数
// =========================================================

const GATE: &str = "/maintenance";

fn create_gate(
    source: MockSettingsSource,
    host: MockGateHost,
) -> MaintenanceGateTestable<MockSettingsSource, MockGateHost, MockMaintenanceView> {
    MaintenanceGateTestable::new(source, host, MockMaintenanceView::new())
}

// =========================================================
// enter 测试
// =========================================================

#[tokio::test]
async fn test_enter_replaces_location_and_loads_message() {
    let source = MockSettingsSource::new().with_message("Back soon!");
    let gate = create_gate(source, MockGateHost::new("/home"));

    gate.enter().await;

    // History 条目被替换为闸门位置
    assert_eq!(*gate.host.replaced.borrow(), vec![GATE.to_string()]);
    assert_eq!(gate.host.current_path(), GATE);
    // 文案来自状态源
    assert_eq!(*gate.view.messages.borrow(), vec!["Back soon!".to_string()]);
}

#[tokio::test]
async fn test_enter_message_failure_keeps_prior_message() {
    let source = MockSettingsSource::new().with_message_err("connection refused");
    let gate = create_gate(source, MockGateHost::new("/home"));

    gate.enter().await;

    // 失败被吞掉：视图从未被写入，已显示的兜底文案保持不变
    assert!(gate.view.messages.borrow().is_empty());
    assert_eq!(gate.phase(), GatePhase::Unknown);
}

// =========================================================
// check_status 测试
// =========================================================

#[tokio::test]
async fn test_release_triggers_reload_once() {
    let source = MockSettingsSource::new().with_active(false);
    let gate = create_gate(source, MockGateHost::new(GATE));

    gate.check_status().await;

    assert_eq!(gate.host.reloads.get(), 1);
    assert_eq!(gate.phase(), GatePhase::Inactive);
    assert_eq!(gate.source.clear_cache_calls.get(), 1);
}

#[tokio::test]
async fn test_repeated_inactive_result_reloads_only_once() {
    let source = MockSettingsSource::new().with_active(false).with_active(false);
    let gate = create_gate(source, MockGateHost::new(GATE));

    gate.check_status().await;
    gate.check_status().await;

    // 每次状态迁移恰好一次重载；重复的"已解除"不再触发
    assert_eq!(gate.host.reloads.get(), 1);
}

#[tokio::test]
async fn test_still_active_refreshes_message_without_reload() {
    let source = MockSettingsSource::new()
        .with_active(true)
        .with_message("Down for upgrades");
    let gate = create_gate(source, MockGateHost::new(GATE));

    gate.check_status().await;

    assert_eq!(gate.host.reloads.get(), 0);
    assert_eq!(gate.phase(), GatePhase::Active);
    assert_eq!(
        *gate.view.messages.borrow(),
        vec!["Down for upgrades".to_string()]
    );
}

#[tokio::test]
async fn test_check_error_leaves_state_unchanged() {
    let source = MockSettingsSource::new().with_active_err("connection refused");
    let gate = create_gate(source, MockGateHost::new(GATE));

    gate.check_status().await;

    // 无重载、无导航、核验状态不变，且检查槽已释放
    assert_eq!(gate.host.reloads.get(), 0);
    assert!(gate.host.replaced.borrow().is_empty());
    assert_eq!(gate.phase(), GatePhase::Unknown);
    assert!(!gate.slot.is_checking());
    assert!(!gate.view.checking.get());
}

#[tokio::test]
async fn test_checking_flag_is_transient() {
    let source = MockSettingsSource::new().with_active(true).with_message("m");
    let gate = create_gate(source, MockGateHost::new(GATE));

    gate.check_status().await;

    assert_eq!(*gate.view.checking_history.borrow(), vec![true, false]);
}

// =========================================================
// 并发折叠测试（单槽在途检查）
// =========================================================

#[tokio::test]
async fn test_overlapping_triggers_collapse_to_noop() {
    let source = MockSettingsSource::new().with_active(true).with_message("m");
    let barrier = source.install_barrier();
    let gate = create_gate(source, MockGateHost::new(GATE));

    // 手动轮询，让第一个检查停在状态源调用边界上
    let waker = futures::task::noop_waker();
    let mut cx = Context::from_waker(&waker);
    let mut first = Box::pin(gate.check_status());
    assert!(first.as_mut().poll(&mut cx).is_pending());
    assert!(gate.view.checking.get());

    // 在途期间的重试必须折叠为 no-op：不重复清缓存、不重复请求
    gate.retry().await;
    assert_eq!(gate.source.active_calls.get(), 1);
    assert_eq!(gate.source.clear_cache_calls.get(), 1);

    // 放行后第一个检查跑完，槽释放
    barrier.send(()).unwrap();
    match first.as_mut().poll(&mut cx) {
        Poll::Ready(()) => {}
        Poll::Pending => panic!("released check should complete"),
    }
    assert!(!gate.view.checking.get());
    assert!(!gate.slot.is_checking());
}

#[tokio::test]
async fn test_slot_is_reusable_after_completed_check() {
    let source = MockSettingsSource::new()
        .with_active(true)
        .with_message("m1")
        .with_active(true)
        .with_message("m2");
    let gate = create_gate(source, MockGateHost::new(GATE));

    gate.check_status().await;
    gate.retry().await;

    assert_eq!(gate.source.active_calls.get(), 2);
    assert_eq!(gate.source.clear_cache_calls.get(), 2);
}

// =========================================================
// 导航拦截 / 焦点恢复测试
// =========================================================

#[tokio::test]
async fn test_navigation_to_gate_itself_is_noop() {
    let source = MockSettingsSource::new();
    let gate = create_gate(source, MockGateHost::new(GATE));

    gate.on_navigation(GATE).await;

    assert_eq!(gate.source.active_calls.get(), 0);
    assert_eq!(gate.source.clear_cache_calls.get(), 0);
}

#[tokio::test]
async fn test_navigation_elsewhere_triggers_check() {
    let source = MockSettingsSource::new().with_active(true).with_message("m");
    let gate = create_gate(source, MockGateHost::new(GATE));

    gate.on_navigation("/home").await;

    assert_eq!(gate.source.active_calls.get(), 1);
    assert_eq!(gate.host.reloads.get(), 0);
}

#[tokio::test]
async fn test_location_never_leaves_gate_while_active() {
    let source = MockSettingsSource::new()
        .with_message("hold")
        .with_active(true)
        .with_message("hold")
        .with_active(true)
        .with_message("hold");
    let gate = create_gate(source, MockGateHost::new("/home"));

    gate.enter().await;
    gate.on_navigation("/home").await;
    gate.on_navigation("/welcome").await;

    // 任意导航序列下，宿主位置始终停留在闸门上
    assert_eq!(gate.host.current_path(), GATE);
    assert!(gate.host.replaced.borrow().iter().all(|p| p == GATE));
    assert_eq!(gate.host.reloads.get(), 0);
}

#[tokio::test]
async fn test_focus_reasserts_gate_location() {
    let source = MockSettingsSource::new();
    let gate = create_gate(source, MockGateHost::new("/home"));

    gate.on_screen_focus();
    assert_eq!(gate.host.current_path(), GATE);

    // 已经在闸门上时不再重复替换
    gate.on_screen_focus();
    assert_eq!(gate.host.replaced.borrow().len(), 1);
}
