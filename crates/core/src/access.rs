//! Route access decisions.
//!
//! [`evaluate`] is a pure function of the request path and the resolved
//! session identity. The HTTP middleware resolves the identity, calls it, and
//! turns a [`GateDecision::Redirect`] into a 307. Rules are checked in order
//! and the first match wins:
//!
//! 1. admin area, anonymous: login, with the original path as `callbackUrl`
//! 2. admin area, not staff: home
//! 3. student with an incomplete profile, anywhere except onboarding, login,
//!    API and asset paths: onboarding
//! 4. onboarding, anonymous: login; onboarding, profile complete: home
//! 5. login, signed in: admin home for staff, home otherwise
//! 6. everything else passes through

use url::form_urlencoded;

use crate::roles::Role;

pub const HOME_PATH: &str = "/";
pub const ADMIN_PATH: &str = "/admin";
pub const LOGIN_PATH: &str = "/login";
pub const ONBOARDING_PATH: &str = "/onboarding";
pub const API_PREFIX: &str = "/api";
pub const HEALTH_PATH: &str = "/health";

/// Query parameter carrying the page to return to after sign-in.
pub const CALLBACK_PARAM: &str = "callbackUrl";

/// What the gate knows about the caller once a session token is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub role: Role,
    pub profile_complete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect(String),
}

pub fn evaluate(path: &str, identity: Option<&Identity>) -> GateDecision {
    if in_area(path, ADMIN_PATH) {
        match identity {
            None => return GateDecision::Redirect(login_with_callback(path)),
            Some(id) if !id.role.is_staff() => {
                return GateDecision::Redirect(HOME_PATH.to_string())
            }
            Some(_) => {}
        }
    }

    if let Some(id) = identity {
        if id.role == Role::Student
            && !id.profile_complete
            && path != ONBOARDING_PATH
            && path != LOGIN_PATH
            && !is_exempt(path)
        {
            return GateDecision::Redirect(ONBOARDING_PATH.to_string());
        }
    }

    if path == ONBOARDING_PATH {
        match identity {
            None => return GateDecision::Redirect(LOGIN_PATH.to_string()),
            Some(id) if id.profile_complete => {
                return GateDecision::Redirect(HOME_PATH.to_string())
            }
            Some(_) => {}
        }
    }

    if path == LOGIN_PATH {
        if let Some(id) = identity {
            let target = if id.role.is_staff() { ADMIN_PATH } else { HOME_PATH };
            return GateDecision::Redirect(target.to_string());
        }
    }

    GateDecision::Allow
}

/// Where a signed-in caller lands after authenticating.
pub fn landing_path(identity: &Identity) -> &'static str {
    if identity.role == Role::Student && !identity.profile_complete {
        ONBOARDING_PATH
    } else if identity.role.is_staff() {
        ADMIN_PATH
    } else {
        HOME_PATH
    }
}

/// `path` equals `area` or lies beneath it (`/admin/users` but not `/administer`).
fn in_area(path: &str, area: &str) -> bool {
    match path.strip_prefix(area) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// API calls, the health probe, and static assets never trigger the
/// onboarding redirect.
fn is_exempt(path: &str) -> bool {
    in_area(path, API_PREFIX) || path == HEALTH_PATH || is_asset(path)
}

fn is_asset(path: &str) -> bool {
    path.rsplit('/').next().is_some_and(|last| last.contains('.'))
}

fn login_with_callback(path: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(CALLBACK_PARAM, path)
        .finish();
    format!("{LOGIN_PATH}?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const STUDENT_NEW: Identity = Identity {
        role: Role::Student,
        profile_complete: false,
    };
    const STUDENT: Identity = Identity {
        role: Role::Student,
        profile_complete: true,
    };
    const ADMIN: Identity = Identity {
        role: Role::Admin,
        profile_complete: true,
    };
    const SUPERADMIN: Identity = Identity {
        role: Role::Superadmin,
        profile_complete: true,
    };

    fn redirect(to: &str) -> GateDecision {
        GateDecision::Redirect(to.to_string())
    }

    #[test]
    fn anonymous_admin_goes_to_login_with_callback() {
        assert_eq!(
            evaluate("/admin/requests", None),
            redirect("/login?callbackUrl=%2Fadmin%2Frequests")
        );
        assert_eq!(evaluate("/admin", None), redirect("/login?callbackUrl=%2Fadmin"));
    }

    #[test]
    fn admin_area_is_segment_aware() {
        assert_eq!(evaluate("/administer", None), GateDecision::Allow);
    }

    #[test]
    fn student_in_admin_area_goes_home() {
        assert_eq!(evaluate("/admin/logs", Some(&STUDENT)), redirect("/"));
        // Rule 2 wins over the onboarding redirect.
        assert_eq!(evaluate("/admin", Some(&STUDENT_NEW)), redirect("/"));
    }

    #[test]
    fn staff_enter_admin_area() {
        assert_eq!(evaluate("/admin/users", Some(&ADMIN)), GateDecision::Allow);
        assert_eq!(evaluate("/admin", Some(&SUPERADMIN)), GateDecision::Allow);
    }

    #[test]
    fn incomplete_student_forced_to_onboarding() {
        for path in ["/", "/alumni/3", "/requests/new"] {
            assert_eq!(evaluate(path, Some(&STUDENT_NEW)), redirect("/onboarding"), "{path}");
        }
    }

    #[test]
    fn incomplete_student_exemptions() {
        for path in [
            "/onboarding",
            "/api/alumni",
            "/api",
            "/health",
            "/assets/app.js",
            "/favicon.ico",
        ] {
            assert_eq!(evaluate(path, Some(&STUDENT_NEW)), GateDecision::Allow, "{path}");
        }
        // The login page is not forced to onboarding; it sends the student home.
        assert_eq!(evaluate("/login", Some(&STUDENT_NEW)), redirect("/"));
    }

    #[test]
    fn completed_student_passes_through() {
        assert_eq!(evaluate("/alumni/3", Some(&STUDENT_NEW)), redirect("/onboarding"));
        assert_eq!(evaluate("/alumni/3", Some(&STUDENT)), GateDecision::Allow);
    }

    #[test]
    fn onboarding_rules() {
        assert_eq!(evaluate("/onboarding", None), redirect("/login"));
        assert_eq!(evaluate("/onboarding", Some(&STUDENT)), redirect("/"));
        assert_eq!(evaluate("/onboarding", Some(&ADMIN)), redirect("/"));
    }

    #[test]
    fn login_redirects_signed_in_callers() {
        assert_eq!(evaluate("/login", None), GateDecision::Allow);
        assert_eq!(evaluate("/login", Some(&ADMIN)), redirect("/admin"));
        assert_eq!(evaluate("/login", Some(&STUDENT)), redirect("/"));
        assert_eq!(evaluate("/login", Some(&STUDENT_NEW)), redirect("/"));
    }

    #[test]
    fn public_pages_allowed_for_anonymous() {
        assert_eq!(evaluate("/", None), GateDecision::Allow);
        assert_eq!(evaluate("/api/requests", None), GateDecision::Allow);
    }

    #[test]
    fn landing_paths() {
        assert_eq!(landing_path(&STUDENT_NEW), "/onboarding");
        assert_eq!(landing_path(&STUDENT), "/");
        assert_eq!(landing_path(&ADMIN), "/admin");
    }
}
