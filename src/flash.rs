//! One-shot notices carried across a redirect.
//!
//! A handler that redirects sets a short cookie holding the notice key; the next
//! rendered page reads it, shows it once, and clears it in the same response.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const FLASH_COOKIE_NAME: &str = "portfolio_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Success,
    Danger,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Success => "success",
            Category::Danger => "danger",
        }
    }
}

/// Every notice the site can show. Cookie values are the stable `key()`s, never free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    MessageSent,
    FormInvalid,
    LoggedIn,
    InvalidCredentials,
    LoggedOut,
    LoginRequired,
    ProjectAdded,
    ProjectUpdated,
    ProjectDeleted,
    ProjectNotFound,
}

impl Notice {
    const ALL: [Notice; 10] = [
        Notice::MessageSent,
        Notice::FormInvalid,
        Notice::LoggedIn,
        Notice::InvalidCredentials,
        Notice::LoggedOut,
        Notice::LoginRequired,
        Notice::ProjectAdded,
        Notice::ProjectUpdated,
        Notice::ProjectDeleted,
        Notice::ProjectNotFound,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Notice::MessageSent => "message_sent",
            Notice::FormInvalid => "form_invalid",
            Notice::LoggedIn => "logged_in",
            Notice::InvalidCredentials => "invalid_credentials",
            Notice::LoggedOut => "logged_out",
            Notice::LoginRequired => "login_required",
            Notice::ProjectAdded => "project_added",
            Notice::ProjectUpdated => "project_updated",
            Notice::ProjectDeleted => "project_deleted",
            Notice::ProjectNotFound => "project_not_found",
        }
    }

    pub fn from_key(key: &str) -> Option<Notice> {
        Self::ALL.into_iter().find(|notice| notice.key() == key)
    }

    pub fn category(self) -> Category {
        match self {
            Notice::FormInvalid
            | Notice::InvalidCredentials
            | Notice::LoginRequired
            | Notice::ProjectNotFound => Category::Danger,
            _ => Category::Success,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Notice::MessageSent => "Message sent successfully!",
            Notice::FormInvalid => "Please fill out the form correctly.",
            Notice::LoggedIn => "Logged in successfully!",
            Notice::InvalidCredentials => "Invalid credentials",
            Notice::LoggedOut => "Logged out successfully!",
            Notice::LoginRequired => "Please login first!",
            Notice::ProjectAdded => "Project added successfully!",
            Notice::ProjectUpdated => "Project updated successfully!",
            Notice::ProjectDeleted => "Project deleted successfully!",
            Notice::ProjectNotFound => "Project not found.",
        }
    }
}

fn flash_cookie(notice: Notice) -> Cookie<'static> {
    Cookie::build((FLASH_COOKIE_NAME, notice.key()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

/// Pops the pending notice. The returned jar carries the removal cookie and must
/// be part of the response.
pub fn take(jar: CookieJar) -> (CookieJar, Option<Notice>) {
    let Some(key) = jar.get(FLASH_COOKIE_NAME).map(|c| c.value().to_owned()) else {
        return (jar, None);
    };
    let jar = jar.remove(Cookie::build((FLASH_COOKIE_NAME, "")).path("/"));
    (jar, Notice::from_key(&key))
}

/// FlashRedirect
///
/// A 303 redirect to `to` that leaves `notice` for the next page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashRedirect {
    pub notice: Notice,
    pub to: &'static str,
}

impl FlashRedirect {
    pub fn new(notice: Notice, to: &'static str) -> Self {
        Self { notice, to }
    }
}

impl IntoResponse for FlashRedirect {
    fn into_response(self) -> Response {
        let jar = CookieJar::new().add(flash_cookie(self.notice));
        (jar, Redirect::to(self.to)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{StatusCode, header};

    #[test]
    fn test_keys_round_trip() {
        for notice in Notice::ALL {
            assert_eq!(Notice::from_key(notice.key()), Some(notice));
        }
        assert_eq!(Notice::from_key("<script>"), None);
    }

    #[test]
    fn test_take_consumes_notice() {
        let jar = CookieJar::new().add(flash_cookie(Notice::LoggedOut));
        let (jar, notice) = take(jar);
        assert_eq!(notice, Some(Notice::LoggedOut));
        assert!(jar.get(FLASH_COOKIE_NAME).is_none());

        let (_, again) = take(jar);
        assert_eq!(again, None);
    }

    #[test]
    fn test_redirect_sets_cookie_and_location() {
        let response = FlashRedirect::new(Notice::LoginRequired, "/admin/login").into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/admin/login");

        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(set_cookie.starts_with("portfolio_flash=login_required"));
    }
}
