use super::*;
use serde_json::json;

// =============================================================
// UserRole
// =============================================================

#[test]
fn user_role_decodes_case_insensitively() {
    let admin: UserRole = serde_json::from_value(json!("ADMIN")).unwrap();
    let admin_lower: UserRole = serde_json::from_value(json!("admin")).unwrap();
    assert_eq!(admin, UserRole::Admin);
    assert_eq!(admin_lower, UserRole::Admin);
}

#[test]
fn user_role_unknown_string_is_ordinary_user() {
    let role: UserRole = serde_json::from_value(json!("vip")).unwrap();
    assert_eq!(role, UserRole::User);
}

#[test]
fn user_role_null_is_none() {
    let role: UserRole = serde_json::from_value(json!(null)).unwrap();
    assert_eq!(role, UserRole::None);
}

#[test]
fn user_role_admin_satisfies_everything() {
    assert!(UserRole::Admin.satisfies(UserRole::Admin));
    assert!(UserRole::Admin.satisfies(UserRole::User));
    assert!(UserRole::Admin.satisfies(UserRole::None));
}

#[test]
fn user_role_user_does_not_satisfy_admin() {
    assert!(!UserRole::User.satisfies(UserRole::Admin));
    assert!(!UserRole::None.satisfies(UserRole::Admin));
    assert!(!UserRole::None.satisfies(UserRole::User));
}

// =============================================================
// LoginUser
// =============================================================

#[test]
fn login_user_default_is_anonymous_sentinel() {
    let user = LoginUser::default();
    assert!(user.is_anonymous());
    assert!(!user.is_admin());
    assert_eq!(user.user_name, ANONYMOUS_NAME);
}

#[test]
fn login_user_decodes_backend_payload() {
    let user: LoginUser = serde_json::from_value(json!({
        "id": 1_868_000_123_456_789_012_i64,
        "userAccount": "alice",
        "userName": "Alice",
        "userAvatar": null,
        "userRole": "admin",
        "createTime": "2024-12-01 10:00:00"
    }))
    .unwrap();
    assert_eq!(user.id.as_deref(), Some("1868000123456789012"));
    assert_eq!(user.user_name, "Alice");
    assert_eq!(user.user_account.as_deref(), Some("alice"));
    assert!(user.is_admin());
    assert!(!user.is_anonymous());
}

#[test]
fn login_user_accepts_string_id() {
    let user: LoginUser = serde_json::from_value(json!({ "id": "42", "userRole": "user" })).unwrap();
    assert_eq!(user.id.as_deref(), Some("42"));
    assert_eq!(user.user_role, UserRole::User);
    assert_eq!(user.user_name, ANONYMOUS_NAME);
}

#[test]
fn login_user_rejects_object_id() {
    let result = serde_json::from_value::<LoginUser>(json!({ "id": { "nested": true } }));
    assert!(result.is_err());
}

// =============================================================
// Envelope
// =============================================================

#[test]
fn envelope_without_data_decodes() {
    let env: Envelope<LoginUser> = serde_json::from_value(json!({ "code": 40100, "message": "未登录" })).unwrap();
    assert_eq!(env.code, 40100);
    assert!(env.data.is_none());
    assert!(!env.is_success());
}

#[test]
fn envelope_success_with_data() {
    let env: Envelope<LoginUser> =
        serde_json::from_value(json!({ "code": 0, "data": { "id": 7, "userName": "Bob", "userRole": "user" } }))
            .unwrap();
    assert!(env.is_success());
    assert_eq!(env.data.map(|u| u.user_name), Some("Bob".to_owned()));
}
