use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Dashboard,
    Logs,
    Reminders,
    Appointments,
    Resources,
    Education,
    Assessment,
    Contacts,
    Admin,
}

impl Page {
    /// Navigation order.
    pub const ALL: [Page; 10] = [
        Page::Home,
        Page::Dashboard,
        Page::Logs,
        Page::Reminders,
        Page::Appointments,
        Page::Resources,
        Page::Education,
        Page::Assessment,
        Page::Contacts,
        Page::Admin,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Dashboard => "/dashboard",
            Page::Logs => "/logs",
            Page::Reminders => "/reminders",
            Page::Appointments => "/appointments",
            Page::Resources => "/resources",
            Page::Education => "/education",
            Page::Assessment => "/assessment",
            Page::Contacts => "/contacts",
            Page::Admin => "/admin",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Dashboard => "Dashboard",
            Page::Logs => "Daily Log",
            Page::Reminders => "Reminders",
            Page::Appointments => "Appointments",
            Page::Resources => "Resources",
            Page::Education => "Health Info",
            Page::Assessment => "Self-Check",
            Page::Contacts => "Contacts",
            Page::Admin => "Admin",
        }
    }

    /// Parses `/logs` or `#/logs`. Anything unknown maps to the home page.
    pub fn from_path(path: &str) -> Self {
        let raw = path.trim().trim_start_matches('#');
        Self::ALL
            .into_iter()
            .find(|p| p.path() == raw)
            .unwrap_or_default()
    }

    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Page::Dashboard
                | Page::Logs
                | Page::Reminders
                | Page::Appointments
                | Page::Assessment
                | Page::Contacts
        )
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|p| p == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.index() + len - 1) % len]
    }

    /// Keys `1`..`9` then `0` select pages in navigation order.
    pub fn from_digit(c: char) -> Option<Self> {
        let n = c.to_digit(10)? as usize;
        let index = if n == 0 { 9 } else { n - 1 };
        Self::ALL.get(index).copied()
    }
}

/// What the current page needs before it can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Render(Page),
    LoginRequired(Page),
    AdminRequired,
}

#[derive(Debug, Default)]
pub struct Router {
    current: Page,
}

impl Router {
    /// Switches to the page named by a path fragment.
    pub fn navigate(&mut self, path: &str) -> Page {
        self.go(Page::from_path(path))
    }

    pub fn current(&self) -> Page {
        self.current
    }

    pub fn go(&mut self, page: Page) -> Page {
        tracing::debug!("Navigating to {}", page.path());
        self.current = page;
        page
    }

    pub fn is_active(&self, page: Page) -> bool {
        self.current == page
    }

    pub fn dispatch(&self, session: &Session) -> Dispatch {
        match self.current {
            Page::Admin if !session.is_admin() => Dispatch::AdminRequired,
            page if page.requires_auth() && !session.is_authenticated() => {
                Dispatch::LoginRequired(page)
            }
            page => Dispatch::Render(page),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_path(page.path()), page);
        }
    }

    #[test]
    fn test_unknown_or_empty_path_falls_back_to_home() {
        assert_eq!(Page::from_path(""), Page::Home);
        assert_eq!(Page::from_path("#"), Page::Home);
        assert_eq!(Page::from_path("/nope"), Page::Home);
        assert_eq!(Page::from_path("#/logs"), Page::Logs);
    }

    #[test]
    fn test_digits_and_cycling() {
        assert_eq!(Page::from_digit('1'), Some(Page::Home));
        assert_eq!(Page::from_digit('0'), Some(Page::Admin));
        assert_eq!(Page::Admin.next(), Page::Home);
        assert_eq!(Page::Home.prev(), Page::Admin);
    }

    #[test]
    fn test_guards() {
        let mut router = Router::default();
        let mut session = Session::default();

        router.navigate("/logs");
        assert_eq!(router.dispatch(&session), Dispatch::LoginRequired(Page::Logs));
        router.navigate("/resources");
        assert_eq!(router.dispatch(&session), Dispatch::Render(Page::Resources));
        router.navigate("/admin");
        assert_eq!(router.dispatch(&session), Dispatch::AdminRequired);

        session.grant_admin();
        assert_eq!(router.dispatch(&session), Dispatch::Render(Page::Admin));
        assert!(router.is_active(Page::Admin));

        router.navigate("/logs");
        assert_eq!(router.dispatch(&session), Dispatch::LoginRequired(Page::Logs));
        session.sign_in("ada@example.com");
        assert_eq!(router.dispatch(&session), Dispatch::Render(Page::Logs));

        assert_eq!(router.navigate("#/nowhere"), Page::Home);
        assert!(router.is_active(Page::Home));
    }
}
