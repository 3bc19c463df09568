use super::*;

fn img(tag: &[u8]) -> ImagePayload {
    ImagePayload::from_bytes(tag, "image/jpeg")
}

// =========================================================================
// Panel
// =========================================================================

#[test]
fn submit_without_image_is_rejected() {
    let mut panel: Panel<u32> = Panel::default();
    assert_eq!(panel.submit().unwrap_err(), PanelError::NoImage);
    assert_eq!(panel.status(), &PanelStatus::Idle);
}

#[test]
fn submit_moves_to_loading_and_blocks_second_submit() {
    let mut panel: Panel<u32> = Panel::default();
    panel.select_image(img(b"a"));
    let ticket = panel.submit().unwrap();
    assert_eq!(ticket.image, img(b"a"));
    assert!(panel.is_busy());
    assert_eq!(panel.submit().unwrap_err(), PanelError::Busy);
}

#[test]
fn complete_records_result() {
    let mut panel: Panel<u32> = Panel::default();
    panel.select_image(img(b"a"));
    let ticket = panel.submit().unwrap();
    assert!(panel.complete(ticket, Ok(7)));
    assert_eq!(panel.result(), Some(&7));
    assert!(!panel.is_busy());
}

#[test]
fn failure_leaves_no_result() {
    let mut panel: Panel<u32> = Panel::default();
    panel.select_image(img(b"a"));
    let ticket = panel.submit().unwrap();
    assert!(panel.complete(ticket, Err("API Key missing".into())));
    assert_eq!(panel.result(), None);
    assert_eq!(panel.status(), &PanelStatus::Failed("API Key missing".into()));
    // The trigger is enabled again.
    assert!(panel.submit().is_ok());
}

#[test]
fn reset_discards_in_flight_answer() {
    let mut panel: Panel<u32> = Panel::default();
    panel.select_image(img(b"a"));
    let ticket = panel.submit().unwrap();
    panel.reset();
    assert!(!panel.complete(ticket, Ok(1)));
    assert_eq!(panel.status(), &PanelStatus::Idle);
    assert!(panel.image().is_none());
}

#[test]
fn new_image_discards_in_flight_answer_and_clears_result() {
    let mut panel: Panel<u32> = Panel::default();
    panel.select_image(img(b"a"));
    let first = panel.submit().unwrap();
    panel.select_image(img(b"b"));
    assert!(!panel.is_busy());
    assert!(!panel.complete(first, Ok(1)));

    let second = panel.submit().unwrap();
    assert!(panel.complete(second, Ok(2)));
    panel.select_image(img(b"c"));
    assert_eq!(panel.result(), None);
}

#[test]
fn caught_logs_and_stringifies() {
    let out: Result<u32, String> = caught(AnalysisKind::Skin, Err(AnalysisError::NotConfigured));
    assert_eq!(out.unwrap_err(), "API Key missing");
    assert_eq!(caught(AnalysisKind::Skin, Ok::<u32, AnalysisError>(3)), Ok(3));
}

// =========================================================================
// View / Session
// =========================================================================

#[test]
fn view_titles_are_distinct() {
    let mut titles: Vec<&str> = View::ALL.iter().map(|v| v.title()).collect();
    titles.sort_unstable();
    titles.dedup();
    assert_eq!(titles.len(), View::ALL.len());
}

#[test]
fn view_for_kind() {
    assert_eq!(View::for_kind(AnalysisKind::Pregnancy), View::Urine);
    assert_eq!(View::for_kind(AnalysisKind::BloodSlide), View::BloodGroup);
}

#[test]
fn session_starts_home_and_navigates() {
    let mut s = Session::new();
    assert_eq!(s.view(), View::Home);
    s.navigate(View::Compatibility);
    assert_eq!(s.view(), View::Compatibility);
}

#[test]
fn navigating_keeps_panel_state() {
    let mut s = Session::new();
    s.blood.select_image(img(b"slide"));
    s.navigate(View::Emergency);
    s.navigate(View::BloodGroup);
    assert!(s.blood.image().is_some());
}

#[test]
fn switching_urine_mode_resets_panel() {
    let mut s = Session::new();
    s.urine.select_image(img(b"strip"));
    let ticket = s.urine.submit().unwrap();
    s.set_urine_mode(UrineMode::Pregnancy);
    assert_eq!(s.urine_mode(), UrineMode::Pregnancy);
    assert!(s.urine.image().is_none());
    assert!(!s.urine.complete(ticket, Ok(UrineFinding::fallback())));
}
