use super::*;

#[test]
fn push_assigns_increasing_ids() {
    let mut state = NoticeState::default();
    let a = state.push(Notice::warning(PLEASE_LOGIN_MESSAGE));
    let b = state.push(Notice::error("boom"));
    assert!(b > a);
    assert_eq!(state.items.len(), 2);
    assert_eq!(state.items[0].1.level, NoticeLevel::Warning);
}

#[test]
fn push_drops_oldest_beyond_limit() {
    let mut state = NoticeState::default();
    for i in 0..(MAX_VISIBLE_NOTICES + 2) {
        state.push(Notice::info(format!("n{i}")));
    }
    assert_eq!(state.items.len(), MAX_VISIBLE_NOTICES);
    assert_eq!(state.items[0].1.message, "n2");
}

#[test]
fn dismiss_removes_only_matching_id() {
    let mut state = NoticeState::default();
    let a = state.push(Notice::info("a"));
    let b = state.push(Notice::info("b"));
    assert!(state.dismiss(a));
    assert!(!state.dismiss(a));
    assert_eq!(state.items, vec![(b, Notice::info("b"))]);
}
