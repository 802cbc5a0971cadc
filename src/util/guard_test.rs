use super::*;

#[test]
fn full_path_without_search() {
    assert_eq!(full_path("/admin/userManage", ""), "/admin/userManage");
    assert_eq!(full_path("/", "?"), "/");
}

#[test]
fn full_path_accepts_search_with_or_without_question_mark() {
    assert_eq!(full_path("/user/login", "?redirect=/"), "/user/login?redirect=/");
    assert_eq!(full_path("/user/login", "redirect=/"), "/user/login?redirect=/");
}

#[test]
fn full_path_defaults_empty_pathname_to_root() {
    assert_eq!(full_path("", ""), "/");
}
