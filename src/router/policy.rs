//! Prefix-based route authorization rules.

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;

use crate::net::types::UserRole;

/// A single rule: paths beginning with `prefix` require `required`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteRule {
    pub prefix: String,
    pub required: UserRole,
}

/// Ordered table of route rules. The first matching rule wins; paths with
/// no matching rule are unrestricted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoutePolicy {
    rules: Vec<RouteRule>,
}

impl RoutePolicy {
    /// The application's table: everything under `admin_prefix` needs `Admin`.
    #[must_use]
    pub fn with_admin_prefix(admin_prefix: &str) -> Self {
        Self::default().rule(admin_prefix, UserRole::Admin)
    }

    #[must_use]
    pub fn rule(mut self, prefix: &str, required: UserRole) -> Self {
        self.rules.push(RouteRule { prefix: prefix.to_owned(), required });
        self
    }

    /// Role required to enter `path`, or `None` when unrestricted.
    #[must_use]
    pub fn required_role(&self, path: &str) -> Option<UserRole> {
        self.rules
            .iter()
            .find(|rule| path.starts_with(rule.prefix.as_str()))
            .map(|rule| rule.required)
    }

    #[must_use]
    pub fn allows(&self, role: UserRole, path: &str) -> bool {
        self.required_role(path)
            .map_or(true, |required| role.satisfies(required))
    }
}
