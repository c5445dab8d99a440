use crate::auth::{self, AuthError, SignIn};
use crate::config::Config;
use crate::db::Repository;
use crate::error::Result;
use crate::pages::appointments::AppointmentForm;
use crate::pages::assessment::{self, Guidance};
use crate::pages::logs::{self, LogForm, SaveOutcome};
use crate::pages::reminders::ReminderForm;
use crate::pages::{self, admin, appointments, contacts, reminders, resources, PageView};
use crate::router::{Page, Router};
use crate::session::{Namespace, Session};
use crate::storage::Storage;
use crate::tui::{AppAction, Form, FormKind, InputMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    ClearLogs,
    Logout,
}

impl Confirm {
    pub fn prompt(&self) -> &'static str {
        match self {
            Confirm::ClearLogs => "Clear all logs for this user?",
            Confirm::Logout => "Logout?",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Modal {
    Form(Form),
    Message { title: String, body: String },
    Confirm(Confirm),
}

pub struct App {
    // Data
    pub view: PageView,

    // UI State
    pub router: Router,
    pub selected_index: usize,
    pub modal: Option<Modal>,
    pub show_help: bool,
    pub status: Option<String>,

    // Session
    pub session: Session,
    pub current_user: Option<String>,

    // Services
    pub storage: Storage,
    config: Config,
}

impl App {
    /// Opens storage and renders the page at `initial_path` (home when unknown).
    pub async fn new(config: &Config, initial_path: &str) -> Result<Self> {
        let repository = Repository::new(&config.db_path).await?;
        let storage = Storage::new(repository);

        // First run for the guest namespace gets the default articles.
        resources::seed_if_empty(&storage, &Namespace::guest()).await?;

        let mut router = Router::default();
        router.navigate(initial_path);

        let mut app = Self {
            view: PageView::Home,
            router,
            selected_index: 0,
            modal: None,
            show_help: false,
            status: None,
            session: Session::default(),
            current_user: None,
            storage,
            config: config.clone(),
        };
        app.render().await?;
        Ok(app)
    }

    pub fn input_mode(&self) -> InputMode {
        if self.show_help {
            return InputMode::Help;
        }
        match &self.modal {
            None => InputMode::Normal,
            Some(Modal::Form(_)) => InputMode::Form,
            Some(Modal::Message { .. }) => InputMode::Message,
            Some(Modal::Confirm(_)) => InputMode::Confirm,
        }
    }

    /// Re-runs the router for the current page and rebuilds its view.
    pub async fn render(&mut self) -> Result<()> {
        let dispatch = self.router.dispatch(&self.session);
        self.view = pages::render(dispatch, &self.storage, &self.session, &self.config).await?;

        if self.modal.is_none() {
            let prompt = match self.view {
                PageView::LoginRequired(_) => Some(Form::login()),
                PageView::AdminRequired => Some(Form::admin_login()),
                _ => None,
            };
            if let Some(form) = prompt {
                self.open_form(form);
            }
        }

        let len = self.view.row_count();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }

        self.refresh_current_user().await
    }

    async fn refresh_current_user(&mut self) -> Result<()> {
        self.current_user = match self.session.user_id() {
            Some(id) => Some(
                auth::find_by_email(&self.storage, id)
                    .await
                    .map_err(into_app_error)?
                    .map(|account| account.display())
                    .unwrap_or_else(|| format!("{id} ({id})")),
            ),
            None => None,
        };
        Ok(())
    }

    async fn navigate(&mut self, page: Page) -> Result<()> {
        self.router.go(page);
        self.selected_index = 0;
        self.status = None;
        // Navigation closes any open popup.
        self.modal = None;
        self.render().await
    }

    fn open_form(&mut self, form: Form) {
        self.modal = Some(Modal::Form(form));
    }

    fn show_message(&mut self, title: &str, body: impl Into<String>) {
        self.modal = Some(Modal::Message {
            title: title.to_string(),
            body: body.into(),
        });
    }

    /// Opens the login prompt and returns false when nobody is signed in.
    fn require_auth(&mut self) -> bool {
        if self.session.is_authenticated() {
            return true;
        }
        self.open_form(Form::login());
        false
    }

    fn namespace(&self) -> Namespace {
        self.session.namespace()
    }

    pub async fn handle_action(&mut self, action: AppAction) -> Result<bool> {
        match action {
            AppAction::Quit => return Ok(true),

            AppAction::NextPage => self.navigate(self.router.current().next()).await?,
            AppAction::PrevPage => self.navigate(self.router.current().prev()).await?,
            AppAction::GoTo(page) => self.navigate(page).await?,

            AppAction::MoveUp => {
                if self.selected_index > 0 {
                    self.selected_index -= 1;
                }
            }

            AppAction::MoveDown => {
                let len = self.view.row_count();
                if len > 0 && self.selected_index < len - 1 {
                    self.selected_index += 1;
                }
            }

            AppAction::Select => self.select().await?,
            AppAction::Add => self.add(),
            AppAction::Edit => self.edit().await?,
            AppAction::Delete => self.delete_selected().await?,

            AppAction::ClearLogs => {
                if matches!(self.view, PageView::Logs(_)) {
                    self.modal = Some(Modal::Confirm(Confirm::ClearLogs));
                }
            }

            AppAction::ExportCsv => {
                if matches!(self.view, PageView::Logs(_)) {
                    let path = self.config.export_path();
                    let count = logs::export_csv(&self.storage, &self.namespace(), &path).await?;
                    self.status = Some(format!("Exported {} logs to {}", count, path.display()));
                }
            }

            AppAction::OpenLogin => self.open_form(Form::login()),
            AppAction::OpenRegister => self.open_form(Form::register()),
            AppAction::OpenAdminLogin => self.open_form(Form::admin_login()),

            AppAction::OpenContact => {
                if self.require_auth() {
                    self.open_form(Form::contact());
                }
            }

            AppAction::ToggleUser => {
                if self.session.is_authenticated() {
                    self.modal = Some(Modal::Confirm(Confirm::Logout));
                } else {
                    self.open_form(Form::login());
                }
            }

            AppAction::AdminLogout => {
                if self.session.is_admin() && self.router.is_active(Page::Admin) {
                    auth::admin_logout(&mut self.session);
                    self.render().await?;
                }
            }

            AppAction::ShowHelp => {
                self.show_help = true;
            }

            AppAction::HideHelp => {
                self.show_help = false;
            }

            AppAction::FormChar(c) => self.with_form(|form| form.input_char(c)),
            AppAction::FormBackspace => self.with_form(Form::backspace),
            AppAction::FormNextField => self.with_form(Form::next_field),
            AppAction::FormPrevField => self.with_form(Form::prev_field),
            AppAction::FormChoiceNext => self.with_form(|form| form.cycle_choice(true)),
            AppAction::FormChoicePrev => self.with_form(|form| form.cycle_choice(false)),
            AppAction::FormSubmit => self.submit_form().await?,
            AppAction::FormCancel => {
                self.modal = None;
            }

            AppAction::DismissMessage => {
                self.modal = None;
            }

            AppAction::ConfirmYes => {
                if let Some(Modal::Confirm(confirm)) = self.modal.take() {
                    self.confirm(confirm).await?;
                }
            }

            AppAction::ConfirmNo => {
                self.modal = None;
            }
        }

        Ok(false)
    }

    fn with_form(&mut self, f: impl FnOnce(&mut Form)) {
        if let Some(Modal::Form(form)) = &mut self.modal {
            f(form);
        }
    }

    async fn select(&mut self) -> Result<()> {
        if let PageView::Admin(view) = &self.view {
            let Some(account) = view.accounts.get(self.selected_index).cloned() else {
                return Ok(());
            };
            let json = admin::inspect(&self.storage, &account).await?;
            if let PageView::Admin(view) = &mut self.view {
                view.inspected = Some((account.id, json));
            }
            return Ok(());
        }

        let form = match self.view {
            PageView::Home => return self.navigate(Page::Dashboard).await,
            PageView::Logs(_) => return self.edit().await,
            PageView::Assessment => Form::assessment(),
            PageView::Contacts(_) => Form::contact(),
            PageView::LoginRequired(_) => Form::login(),
            PageView::AdminRequired => Form::admin_login(),
            _ => return Ok(()),
        };
        self.open_form(form);
        Ok(())
    }

    fn add(&mut self) {
        let form = match self.view {
            PageView::Logs(_) => Form::log(&LogForm::default()),
            PageView::Reminders(_) => Form::reminder(&ReminderForm::default()),
            PageView::Appointments(_) => Form::appointment(&AppointmentForm::default()),
            PageView::Assessment => Form::assessment(),
            PageView::Contacts(_) => Form::contact(),
            _ => return,
        };
        self.open_form(form);
    }

    /// Loads the selected log by id into the log form.
    async fn edit(&mut self) -> Result<()> {
        let PageView::Logs(items) = &self.view else {
            return Ok(());
        };
        let Some(id) = items.get(self.selected_index).map(|log| log.id.clone()) else {
            return Ok(());
        };
        if let Some(log) = logs::find(&self.storage, &self.namespace(), &id).await? {
            self.open_form(Form::log(&LogForm::from_log(&log)));
        }
        Ok(())
    }

    async fn delete_selected(&mut self) -> Result<()> {
        let namespace = self.namespace();
        let index = self.selected_index;
        let removed = match &self.view {
            PageView::Logs(items) => match items.get(index) {
                Some(log) => logs::delete(&self.storage, &namespace, &log.id).await?,
                None => false,
            },
            PageView::Reminders(items) => match items.get(index) {
                Some(r) => reminders::delete(&self.storage, &namespace, &r.id).await?,
                None => false,
            },
            PageView::Appointments(items) => match items.get(index) {
                Some(a) => appointments::delete(&self.storage, &namespace, &a.id).await?,
                None => false,
            },
            _ => false,
        };

        if removed {
            self.status = Some("Deleted".to_string());
            self.render().await?;
        }
        Ok(())
    }

    async fn confirm(&mut self, confirm: Confirm) -> Result<()> {
        match confirm {
            Confirm::ClearLogs => {
                logs::clear(&self.storage, &self.namespace()).await?;
                self.status = Some("Logs cleared".to_string());
            }
            Confirm::Logout => auth::logout(&mut self.session),
        }
        self.render().await
    }

    async fn submit_form(&mut self) -> Result<()> {
        let Some(Modal::Form(form)) = self.modal.take() else {
            return Ok(());
        };

        match self.process_form(&form).await? {
            Ok(()) => {}
            Err(message) => {
                // Keep the form open with its input and show what went wrong.
                let mut form = form;
                form.error = Some(message);
                self.modal = Some(Modal::Form(form));
            }
        }
        Ok(())
    }

    /// Outer error aborts the app; inner error is shown on the form.
    async fn process_form(&mut self, form: &Form) -> Result<std::result::Result<(), String>> {
        let namespace = self.namespace();

        match form.kind {
            FormKind::Login => {
                let outcome =
                    auth::sign_in(&self.storage, &mut self.session, &form.value(0), &form.value(1)).await;
                match outcome {
                    Ok(SignIn::User(account)) => {
                        self.render().await?;
                        let name = if account.name.is_empty() { &account.email } else { &account.name };
                        self.show_message("Login", format!("Welcome back, {name}"));
                    }
                    Ok(SignIn::Admin) => {
                        self.navigate(Page::Admin).await?;
                        self.show_message("Login", "Admin signed in");
                    }
                    Err(e) => return auth_failure(e),
                }
            }

            FormKind::Register => {
                let outcome = auth::register(
                    &self.storage,
                    &mut self.session,
                    &form.value(0),
                    &form.value(1),
                    &form.value(2),
                )
                .await;
                match outcome {
                    Ok(account) => {
                        self.render().await?;
                        self.show_message(
                            "Register",
                            format!("Account created — signed in as {}", account.name),
                        );
                    }
                    Err(e) => return auth_failure(e),
                }
            }

            FormKind::AdminLogin => {
                if let Err(e) = auth::admin_login(&mut self.session, &form.value(0), &form.value(1)) {
                    return auth_failure(e);
                }
                self.navigate(Page::Admin).await?;
            }

            FormKind::Contact => {
                if !self.require_auth() {
                    return Ok(Ok(()));
                }
                let message = match form.to_contact_form().validate() {
                    Ok(message) => message,
                    Err(e) => return Ok(Err(e.to_string())),
                };
                contacts::submit(&self.storage, &namespace, message).await?;
                self.render().await?;
                self.show_message("Contact", "Thanks — message saved to your account.");
            }

            FormKind::Log => {
                let entry = match form.to_log_form().validate() {
                    Ok(entry) => entry,
                    Err(e) => return Ok(Err(e.to_string())),
                };
                let outcome = logs::save(&self.storage, &namespace, entry).await?;
                self.status = Some(match outcome {
                    SaveOutcome::Inserted => "Log saved".to_string(),
                    SaveOutcome::Updated => "Log for that date updated".to_string(),
                });
                self.render().await?;
            }

            FormKind::Reminder => {
                let reminder = match form.to_reminder_form().validate() {
                    Ok(reminder) => reminder,
                    Err(e) => return Ok(Err(e.to_string())),
                };
                reminders::add(&self.storage, &namespace, reminder).await?;
                self.status = Some("Reminder saved".to_string());
                self.render().await?;
            }

            FormKind::Appointment => {
                let appointment = match form.to_appointment_form().validate() {
                    Ok(appointment) => appointment,
                    Err(e) => return Ok(Err(e.to_string())),
                };
                appointments::add(&self.storage, &namespace, appointment).await?;
                self.status = Some("Appointment saved".to_string());
                self.render().await?;
            }

            FormKind::Assessment => {
                let score = assessment::score_selection(form.assessment_selection());
                self.show_message("Guidance", Guidance::for_score(score).message());
            }
        }

        Ok(Ok(()))
    }
}

fn into_app_error(e: AuthError) -> crate::error::AppError {
    match e {
        AuthError::Storage(e) => e,
        other => anyhow::anyhow!(other.to_string()).into(),
    }
}

/// Storage failures propagate; everything else becomes a form message.
fn auth_failure(e: AuthError) -> Result<std::result::Result<(), String>> {
    match e {
        AuthError::Storage(e) => Err(e),
        other => Ok(Err(other.to_string())),
    }
}
