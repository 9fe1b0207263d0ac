use serde::{Deserialize, Serialize};

/// The caller of the documentation UI, as established by the surrounding authentication layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub is_authenticated: bool,
    pub is_superuser: bool,
}

impl Principal {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated() -> Self {
        Self {
            is_authenticated: true,
            is_superuser: false,
        }
    }

    pub fn superuser() -> Self {
        Self {
            is_authenticated: true,
            is_superuser: true,
        }
    }
}

/// Access policy for the documentation UI; every enabled check must pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessPolicy {
    pub require_superuser: bool,
    pub require_authenticated: bool,
}

impl AccessPolicy {
    pub fn has_permission(&self, principal: &Principal) -> bool {
        if self.require_superuser && !principal.is_superuser {
            return false;
        }
        if self.require_authenticated && !principal.is_authenticated {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_policy_allows_anyone() {
        assert!(AccessPolicy::default().has_permission(&Principal::anonymous()));
    }

    #[test]
    fn test_superuser_required() {
        let policy = AccessPolicy {
            require_superuser: true,
            require_authenticated: false,
        };
        assert!(!policy.has_permission(&Principal::authenticated()));
        assert!(policy.has_permission(&Principal::superuser()));
    }

    #[test]
    fn test_both_checks_must_pass() {
        let policy = AccessPolicy {
            require_superuser: true,
            require_authenticated: true,
        };
        // a superuser flag without authentication fails the second check
        let odd = Principal {
            is_authenticated: false,
            is_superuser: true,
        };
        assert!(!policy.has_permission(&odd));
        assert!(!policy.has_permission(&Principal::anonymous()));
        assert!(policy.has_permission(&Principal::superuser()));
    }

    #[test]
    fn test_authentication_required() {
        let policy = AccessPolicy {
            require_superuser: false,
            require_authenticated: true,
        };
        assert!(!policy.has_permission(&Principal::anonymous()));
        assert!(policy.has_permission(&Principal::authenticated()));
    }
}
