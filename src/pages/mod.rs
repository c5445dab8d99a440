//! One controller per route. Each exposes a `load` that builds the page's
//! view from persisted state, plus the mutations the page performs.

pub mod admin;
pub mod appointments;
pub mod assessment;
pub mod contacts;
pub mod dashboard;
pub mod education;
pub mod home;
pub mod logs;
pub mod reminders;
pub mod resources;

use thiserror::Error;

use crate::config::Config;
use crate::error::Result;
use crate::models::{Appointment, Article, MoodLog, Reminder};
use crate::router::{Dispatch, Page};
use crate::session::Session;
use crate::storage::Storage;

/// Validation failure at the form-submission edge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Invalid date \"{0}\" (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid time \"{0}\" (expected HH:MM)")]
    InvalidTime(String),

    #[error("Invalid date & time \"{0}\" (expected YYYY-MM-DD HH:MM)")]
    InvalidDateTime(String),

    #[error("Mood must be a whole number from 1 to 10, got \"{0}\"")]
    InvalidMood(String),

    #[error("Duration must be a whole number of minutes, got \"{0}\"")]
    InvalidDuration(String),
}

#[derive(Debug, Clone)]
pub enum PageView {
    Home,
    Dashboard(dashboard::DashboardView),
    Logs(Vec<MoodLog>),
    Reminders(Vec<Reminder>),
    Appointments(Vec<Appointment>),
    Resources(Vec<Article>),
    Education,
    Assessment,
    Contacts(contacts::ContactsView),
    Admin(admin::AdminView),
    LoginRequired(Page),
    AdminRequired,
}

impl PageView {
    /// Number of selectable rows, for list navigation.
    pub fn row_count(&self) -> usize {
        match self {
            PageView::Logs(items) => items.len(),
            PageView::Reminders(items) => items.len(),
            PageView::Appointments(items) => items.len(),
            PageView::Resources(items) => items.len(),
            PageView::Admin(view) => view.accounts.len(),
            _ => 0,
        }
    }
}

/// Runs the page's guard, then its controller.
pub async fn render(
    dispatch: Dispatch,
    storage: &Storage,
    session: &Session,
    config: &Config,
) -> Result<PageView> {
    let page = match dispatch {
        Dispatch::Render(page) => page,
        Dispatch::LoginRequired(page) => return Ok(PageView::LoginRequired(page)),
        Dispatch::AdminRequired => return Ok(PageView::AdminRequired),
    };

    let namespace = session.namespace();
    let view = match page {
        Page::Home => PageView::Home,
        Page::Dashboard => {
            PageView::Dashboard(dashboard::load(storage, &namespace, config.trend_points).await?)
        }
        Page::Logs => PageView::Logs(logs::list(storage, &namespace).await?),
        Page::Reminders => PageView::Reminders(reminders::list(storage, &namespace).await?),
        Page::Appointments => {
            PageView::Appointments(appointments::list(storage, &namespace).await?)
        }
        Page::Resources => PageView::Resources(resources::load(storage, &namespace).await?),
        Page::Education => PageView::Education,
        Page::Assessment => PageView::Assessment,
        Page::Contacts => PageView::Contacts(contacts::load(storage, session).await?),
        Page::Admin => PageView::Admin(admin::load(storage).await?),
    };
    Ok(view)
}
