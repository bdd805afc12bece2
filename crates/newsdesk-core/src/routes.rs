//! Route table and the access guard.
//!
//! | path          | view              | access                 |
//! |---------------|-------------------|------------------------|
//! | `/`           | home (search)     | everyone               |
//! | `/saved-news` | saved articles    | signed-in users only   |
//! | anything else | redirect to `/`   |                        |
//!
//! A guarded route that turns a visitor away records where they were
//! headed in `from`, so the shell can send them back after signing in.

use tracing::debug;

pub const HOME_PATH: &str = "/";
pub const SAVED_NEWS_PATH: &str = "/saved-news";

/// Where the guard sends visitors it turns away.
pub const FALLBACK_PATH: &str = "/news";

/// Upper bound on redirects followed by [`resolve`].
const MAX_REDIRECTS: usize = 8;

/// A navigation target plus the location that redirected to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub from: Option<Box<Location>>,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: normalize_path(&path.into()),
            from: None,
        }
    }

    #[must_use]
    pub fn with_from(mut self, from: Location) -> Self {
        self.from = Some(Box::new(from));
        self
    }

    /// Where to go once the visitor has signed in, if a guard recorded it.
    pub fn return_target(&self) -> Option<Location> {
        self.from.as_deref().map(|from| Location::new(from.path.clone()))
    }
}

impl Default for Location {
    fn default() -> Self {
        Location::new(HOME_PATH)
    }
}

fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        HOME_PATH.to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Outcome of the access check for one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    Render,
    Redirect(Location),
}

/// Decides whether a guarded route may render.
///
/// - `anonymous == false` (signed-in only) and signed out: redirect to
///   [`FALLBACK_PATH`] remembering the current location.
/// - `anonymous == true` (signed-out only) and signed in: redirect to the
///   recorded `from`, or [`FALLBACK_PATH`].
/// - otherwise render.
pub fn guard(is_logged_in: bool, anonymous: bool, location: &Location) -> Guard {
    match (anonymous, is_logged_in) {
        (true, true) => Guard::Redirect(
            location
                .return_target()
                .unwrap_or_else(|| Location::new(FALLBACK_PATH)),
        ),
        (false, false) => Guard::Redirect(
            Location::new(FALLBACK_PATH).with_from(Location::new(location.path.clone())),
        ),
        _ => Guard::Render,
    }
}

/// Screens the shell can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    SavedNews,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    Open(View),
    Guarded { view: View, anonymous: bool },
    Redirect(&'static str),
}

fn lookup(path: &str) -> Entry {
    match path {
        HOME_PATH => Entry::Open(View::Home),
        SAVED_NEWS_PATH => Entry::Guarded {
            view: View::SavedNews,
            anonymous: false,
        },
        _ => Entry::Redirect(HOME_PATH),
    }
}

/// A renderable view and the location it was reached at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub view: View,
    pub location: Location,
}

/// Follows the route table and guards until a view can render.
///
/// The catch-all redirect replaces the path but keeps `from`, so a visitor
/// bounced by the guard still returns to the original target after signing
/// in.
pub fn resolve(location: Location, is_logged_in: bool) -> Resolved {
    let mut current = location;
    for _ in 0..MAX_REDIRECTS {
        let next = match lookup(&current.path) {
            Entry::Open(view) => {
                return Resolved {
                    view,
                    location: current,
                };
            }
            Entry::Guarded { view, anonymous } => match guard(is_logged_in, anonymous, &current) {
                Guard::Render => {
                    return Resolved {
                        view,
                        location: current,
                    };
                }
                Guard::Redirect(next) => next,
            },
            Entry::Redirect(path) => Location {
                path: path.to_string(),
                from: current.from.take(),
            },
        };
        debug!(from = %current.path, to = %next.path, "route redirect");
        current = next;
    }

    debug!(path = %current.path, "redirect limit reached");
    Resolved {
        view: View::Home,
        location: Location::new(HOME_PATH),
    }
}
