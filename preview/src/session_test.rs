use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::orbit::{CameraPose, OrbitState};

// =============================================================
// Mock backend
// =============================================================

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Mount { template: BoxTemplate, texture: Option<String> },
    SetTexture(String),
    Render(CameraPose),
    Snapshot,
    Release,
}

#[derive(Default)]
struct Script {
    calls: Vec<Call>,
    /// Mounts that fail before one succeeds.
    mount_failures: usize,
    fail_render: bool,
    fail_snapshot: bool,
    fail_texture: bool,
    /// Surfaces currently held.
    live: usize,
}

#[derive(Clone, Default)]
struct MockBackend(Rc<RefCell<Script>>);

impl SceneBackend for MockBackend {
    type Error = String;

    fn mount(&mut self, model: &BoxModel, _style: &SceneStyle, texture: Option<&str>) -> Result<(), String> {
        let mut s = self.0.borrow_mut();
        s.calls.push(Call::Mount { template: model.template, texture: texture.map(str::to_owned) });
        if s.mount_failures > 0 {
            s.mount_failures -= 1;
            return Err("webgl unavailable".into());
        }
        s.live += 1;
        Ok(())
    }

    fn set_texture(&mut self, data_url: &str) -> Result<(), String> {
        let mut s = self.0.borrow_mut();
        s.calls.push(Call::SetTexture(data_url.to_owned()));
        if s.fail_texture { Err("bad image".into()) } else { Ok(()) }
    }

    fn render(&mut self, pose: &CameraPose) -> Result<(), String> {
        let mut s = self.0.borrow_mut();
        s.calls.push(Call::Render(*pose));
        if s.fail_render { Err("context lost".into()) } else { Ok(()) }
    }

    fn snapshot(&mut self) -> Result<String, String> {
        let mut s = self.0.borrow_mut();
        s.calls.push(Call::Snapshot);
        if s.fail_snapshot { Err("tainted".into()) } else { Ok("data:image/png;base64,AAAA".into()) }
    }

    fn release(&mut self) {
        let mut s = self.0.borrow_mut();
        s.calls.push(Call::Release);
        s.live = s.live.saturating_sub(1);
    }
}

fn session() -> (PreviewSession<MockBackend>, Rc<RefCell<Script>>) {
    let backend = MockBackend::default();
    let script = Rc::clone(&backend.0);
    (PreviewSession::new(backend, OrbitConfig::default()), script)
}

fn count(script: &Rc<RefCell<Script>>, pred: impl Fn(&Call) -> bool) -> usize {
    script.borrow().calls.iter().filter(|c| pred(c)).count()
}

// =============================================================
// Open / close
// =============================================================

#[test]
fn new_session_is_closed() {
    let (s, script) = session();
    assert_eq!(s.state(), &PreviewState::Closed);
    assert!(!s.is_open());
    assert!(script.borrow().calls.is_empty());
}

#[test]
fn open_mounts_resolved_template() {
    let (mut s, script) = session();
    s.open("天地盖", None).unwrap();
    assert_eq!(s.state(), &PreviewState::Running);
    assert!(s.is_open());
    assert_eq!(script.borrow().calls, vec![Call::Mount { template: BoxTemplate::LidAndBase, texture: None }]);
    assert_eq!(script.borrow().live, 1);
}

#[test]
fn texture_only_reaches_textured_models() {
    let (mut s, script) = session();
    s.open("抽屉盒", Some("data:a".into())).unwrap();
    s.open("unknown", Some("data:a".into())).unwrap();
    let mounts: Vec<_> = script
        .borrow()
        .calls
        .iter()
        .filter_map(|c| match c {
            Call::Mount { texture, .. } => Some(texture.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(mounts, vec![None, Some("data:a".to_owned())]);
}

#[test]
fn reopen_releases_before_mounting() {
    let (mut s, script) = session();
    s.open("drawer", None).unwrap();
    s.open("flip-top", None).unwrap();
    let calls = script.borrow().calls.clone();
    assert_eq!(calls[1], Call::Release);
    assert!(matches!(calls[2], Call::Mount { template: BoxTemplate::FlipTop, .. }));
    assert_eq!(script.borrow().live, 1);
}

#[test]
fn open_resets_camera() {
    let (mut s, _) = session();
    s.open("drawer", None).unwrap();
    s.on_pointer_down(PointerButton::Primary, 0.0, 0.0);
    s.on_pointer_move(200.0, 50.0);
    s.zoom_in();
    s.frame().unwrap();
    s.open("drawer", None).unwrap();
    assert_eq!(s.camera().state(), OrbitState::INITIAL);
    assert_eq!(s.camera().smoothed(), OrbitState::INITIAL);
    assert!(!s.camera().is_dragging());
}

#[test]
fn close_releases_and_is_idempotent() {
    let (mut s, script) = session();
    s.open("drawer", None).unwrap();
    s.close();
    s.close();
    assert_eq!(s.state(), &PreviewState::Closed);
    assert_eq!(count(&script, |c| *c == Call::Release), 1);
    assert_eq!(script.borrow().live, 0);
}

#[test]
fn drop_releases_mounted_scene() {
    let (mut s, script) = session();
    s.open("drawer", None).unwrap();
    drop(s);
    assert_eq!(script.borrow().live, 0);
}

// =============================================================
// Init failure / retry
// =============================================================

#[test]
fn mount_failure_is_retryable() {
    let (mut s, script) = session();
    script.borrow_mut().mount_failures = 1;
    let err = s.open("翻盖盒", Some("data:t".into())).unwrap_err();
    assert!(matches!(err, PreviewError::Init(_)));
    assert_eq!(s.state(), &PreviewState::Failed { message: INIT_FAILED_MESSAGE.into() });
    assert!(!s.is_open());
    assert_eq!(s.frame(), Err(PreviewError::NotRunning));

    s.retry().unwrap();
    assert_eq!(s.state(), &PreviewState::Running);
    assert_eq!(s.info().template, "翻盖盒");
    assert!(s.info().texture_applied);
    assert_eq!(script.borrow().live, 1);
}

#[test]
fn repeated_failures_stay_failed() {
    let (mut s, script) = session();
    script.borrow_mut().mount_failures = 3;
    assert!(s.open("drawer", None).is_err());
    assert!(s.retry().is_err());
    assert!(matches!(s.state(), PreviewState::Failed { .. }));
    assert_eq!(script.borrow().live, 0);
}

#[test]
fn retry_outside_failed_is_noop() {
    let (mut s, script) = session();
    s.retry().unwrap();
    s.open("drawer", None).unwrap();
    s.retry().unwrap();
    assert_eq!(count(&script, |c| matches!(c, Call::Mount { .. })), 1);
}

#[test]
fn close_after_failure_is_closed() {
    let (mut s, script) = session();
    script.borrow_mut().mount_failures = 1;
    assert!(s.open("drawer", None).is_err());
    s.close();
    assert_eq!(s.state(), &PreviewState::Closed);
}

// =============================================================
// Frames
// =============================================================

#[test]
fn frame_renders_smoothed_pose() {
    let (mut s, script) = session();
    s.open("drawer", None).unwrap();
    s.on_wheel(1.0);
    s.frame().unwrap();
    let Some(Call::Render(pose)) = script.borrow().calls.last().cloned() else {
        panic!("expected a render call");
    };
    assert_eq!(pose, s.camera().camera_pose());
    assert!(s.camera().smoothed().zoom > 1.0);
    assert!(s.camera().smoothed().zoom < s.camera().state().zoom);
}

#[test]
fn frame_when_closed_is_rejected() {
    let (mut s, script) = session();
    assert_eq!(s.frame(), Err(PreviewError::NotRunning));
    assert_eq!(s.frame_elapsed(0.016), Err(PreviewError::NotRunning));
    assert!(script.borrow().calls.is_empty());
}

#[test]
fn render_error_stops_loop_but_keeps_scene() {
    let (mut s, script) = session();
    s.open("drawer", None).unwrap();
    script.borrow_mut().fail_render = true;
    assert!(matches!(s.frame(), Err(PreviewError::Render(_))));
    assert_eq!(s.state(), &PreviewState::Stopped);
    assert!(s.is_open());
    assert_eq!(s.frame(), Err(PreviewError::NotRunning));
    assert_eq!(count(&script, |c| matches!(c, Call::Render(_))), 1);
    // Last frame can still be exported.
    assert!(s.export().is_ok());
}

#[test]
fn reopen_after_stop_runs_again() {
    let (mut s, script) = session();
    s.open("drawer", None).unwrap();
    script.borrow_mut().fail_render = true;
    assert!(s.frame().is_err());
    script.borrow_mut().fail_render = false;
    s.open("drawer", None).unwrap();
    assert!(s.frame().is_ok());
}

#[test]
fn frame_elapsed_uses_time_scaled_damping() {
    let (mut a, _) = session();
    let (mut b, _) = session();
    a.open("drawer", None).unwrap();
    b.open("drawer", None).unwrap();
    a.zoom_in();
    b.zoom_in();
    a.frame().unwrap();
    b.frame_elapsed(1.0 / 60.0).unwrap();
    assert!((a.camera().smoothed().zoom - b.camera().smoothed().zoom).abs() < 1e-12);
}

// =============================================================
// Texture
// =============================================================

#[test]
fn texture_pushed_to_open_cube() {
    let (mut s, script) = session();
    s.open("cube", None).unwrap();
    s.set_texture("data:new".into()).unwrap();
    assert_eq!(script.borrow().calls.last(), Some(&Call::SetTexture("data:new".into())));
    assert!(s.info().texture_applied);
}

#[test]
fn texture_not_pushed_to_untextured_model() {
    let (mut s, script) = session();
    s.open("drawer", None).unwrap();
    s.set_texture("data:new".into()).unwrap();
    assert_eq!(count(&script, |c| matches!(c, Call::SetTexture(_))), 0);
}

#[test]
fn texture_set_while_closed_is_used_on_open() {
    let (mut s, script) = session();
    s.set_texture("data:early".into()).unwrap();
    assert!(script.borrow().calls.is_empty());
    let texture = s.info().texture_applied;
    assert!(texture);
    s.open("cube", Some("data:early".into())).unwrap();
    assert_eq!(
        script.borrow().calls[0],
        Call::Mount { template: BoxTemplate::Cube, texture: Some("data:early".into()) }
    );
}

#[test]
fn texture_failure_is_reported_and_remembered() {
    let (mut s, script) = session();
    s.open("cube", None).unwrap();
    script.borrow_mut().fail_texture = true;
    assert!(matches!(s.set_texture("data:x".into()), Err(PreviewError::Texture(_))));
    assert_eq!(s.state(), &PreviewState::Running);
    assert!(s.info().texture_applied);
}

// =============================================================
// Export / info
// =============================================================

#[test]
fn export_names_file_after_template() {
    let (mut s, _) = session();
    s.open("抽屉盒", None).unwrap();
    let export = s.export().unwrap();
    assert_eq!(export.filename, "抽屉盒_3d_preview.png");
    assert_eq!(export.data_url, "data:image/png;base64,AAAA");
}

#[test]
fn export_with_blank_template_uses_slug() {
    let (mut s, _) = session();
    s.open("  ", None).unwrap();
    assert_eq!(s.export().unwrap().filename, "cube_3d_preview.png");
}

#[test]
fn export_requires_open_preview() {
    let (mut s, script) = session();
    assert_eq!(s.export(), Err(PreviewError::NotOpen));
    s.open("drawer", None).unwrap();
    s.close();
    assert_eq!(s.export(), Err(PreviewError::NotOpen));
    assert_eq!(count(&script, |c| *c == Call::Snapshot), 0);
}

#[test]
fn export_failure_is_reported() {
    let (mut s, script) = session();
    s.open("drawer", None).unwrap();
    script.borrow_mut().fail_snapshot = true;
    assert!(matches!(s.export(), Err(PreviewError::Export(_))));
}

#[test]
fn info_reports_template_kind() {
    let (mut s, _) = session();
    s.open("天地盖", None).unwrap();
    let info = s.info();
    assert_eq!(info.template, "天地盖");
    assert_eq!(info.kind, BoxTemplate::LidAndBase);
    assert!(!info.texture_applied);
}

// =============================================================
// Camera input
// =============================================================

#[test]
fn reset_view_restores_initial_pose() {
    let (mut s, _) = session();
    s.open("drawer", None).unwrap();
    s.on_pointer_down(PointerButton::Secondary, 0.0, 0.0);
    s.on_pointer_move(30.0, 30.0);
    s.on_pointer_leave();
    s.zoom_out();
    for _ in 0..5 {
        s.frame().unwrap();
    }
    s.reset_view();
    assert_eq!(s.camera().state(), OrbitState::INITIAL);
    assert_eq!(s.camera().smoothed(), OrbitState::INITIAL);
}

#[test]
fn pointer_leave_ends_drag() {
    let (mut s, _) = session();
    s.on_pointer_down(PointerButton::Primary, 0.0, 0.0);
    assert_eq!(s.cursor(), "grabbing");
    s.on_pointer_leave();
    assert_eq!(s.cursor(), "grab");
    s.on_pointer_move(100.0, 0.0);
    assert_eq!(s.camera().state(), OrbitState::INITIAL);
}
