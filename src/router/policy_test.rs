use super::*;

#[test]
fn admin_prefix_requires_admin() {
    let policy = RoutePolicy::with_admin_prefix("/admin");
    assert_eq!(policy.required_role("/admin/userManage"), Some(UserRole::Admin));
    assert!(!policy.allows(UserRole::None, "/admin/userManage"));
    assert!(!policy.allows(UserRole::User, "/admin/pictureManage"));
    assert!(policy.allows(UserRole::Admin, "/admin/pictureManage"));
}

#[test]
fn unmatched_paths_are_unrestricted() {
    let policy = RoutePolicy::with_admin_prefix("/admin");
    assert_eq!(policy.required_role("/"), None);
    assert!(policy.allows(UserRole::None, "/"));
    assert!(policy.allows(UserRole::None, "/add_picture"));
    assert!(policy.allows(UserRole::User, "/user/login?redirect=/admin"));
}

#[test]
fn prefix_match_is_literal() {
    let policy = RoutePolicy::with_admin_prefix("/admin");
    assert_eq!(policy.required_role("/administrator"), Some(UserRole::Admin));
    assert_eq!(policy.required_role("/user/admin"), None);
}

#[test]
fn first_matching_rule_wins() {
    let policy = RoutePolicy::default()
        .rule("/space/public", UserRole::None)
        .rule("/space", UserRole::User);
    assert!(policy.allows(UserRole::None, "/space/public/1"));
    assert!(!policy.allows(UserRole::None, "/space/2"));
    assert!(policy.allows(UserRole::User, "/space/2"));
}

#[test]
fn empty_policy_allows_everything() {
    let policy = RoutePolicy::default();
    assert!(policy.allows(UserRole::None, "/admin/userManage"));
}
