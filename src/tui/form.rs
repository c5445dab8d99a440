//! Popup forms: a focused list of text, secret, toggle and choice fields.

use crate::pages::appointments::AppointmentForm;
use crate::pages::assessment::QUESTIONS;
use crate::pages::contacts::ContactForm;
use crate::pages::logs::LogForm;
use crate::pages::reminders::ReminderForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Login,
    Register,
    AdminLogin,
    Contact,
    Log,
    Reminder,
    Appointment,
    Assessment,
}

impl FormKind {
    pub fn title(&self) -> &'static str {
        match self {
            FormKind::Login => "Login",
            FormKind::Register => "Create account",
            FormKind::AdminLogin => "Admin login",
            FormKind::Contact => "Contact us",
            FormKind::Log => "Daily log",
            FormKind::Reminder => "New reminder",
            FormKind::Appointment => "New appointment",
            FormKind::Assessment => "Self-check",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Secret,
    Toggle(bool),
    /// Option labels and the selected index.
    Choice(Vec<&'static str>, usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: String,
}

impl Field {
    fn text(label: &'static str, value: &str) -> Self {
        Self {
            label,
            kind: FieldKind::Text,
            value: value.to_string(),
        }
    }

    fn secret(label: &'static str) -> Self {
        Self {
            label,
            kind: FieldKind::Secret,
            value: String::new(),
        }
    }

    fn toggle(label: &'static str, on: bool) -> Self {
        Self {
            label,
            kind: FieldKind::Toggle(on),
            value: String::new(),
        }
    }

    fn choice(label: &'static str, options: Vec<&'static str>) -> Self {
        Self {
            label,
            kind: FieldKind::Choice(options, 0),
            value: String::new(),
        }
    }

    /// What the field shows in the popup.
    pub fn display(&self) -> String {
        match &self.kind {
            FieldKind::Text => self.value.clone(),
            FieldKind::Secret => "*".repeat(self.value.chars().count()),
            FieldKind::Toggle(on) => if *on { "[x]" } else { "[ ]" }.to_string(),
            FieldKind::Choice(options, selected) => {
                format!("< {} >", options.get(*selected).copied().unwrap_or_default())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub kind: FormKind,
    pub fields: Vec<Field>,
    pub focus: usize,
    /// Last submission failure, shown under the fields.
    pub error: Option<String>,
}

impl Form {
    fn new(kind: FormKind, fields: Vec<Field>) -> Self {
        Self {
            kind,
            fields,
            focus: 0,
            error: None,
        }
    }

    pub fn login() -> Self {
        Self::new(
            FormKind::Login,
            vec![Field::text("Email", ""), Field::secret("Password")],
        )
    }

    pub fn register() -> Self {
        Self::new(
            FormKind::Register,
            vec![
                Field::text("Full name", ""),
                Field::text("Email", ""),
                Field::secret("Password"),
            ],
        )
    }

    pub fn admin_login() -> Self {
        Self::new(
            FormKind::AdminLogin,
            vec![Field::text("Email", ""), Field::secret("Password")],
        )
    }

    pub fn contact() -> Self {
        Self::new(
            FormKind::Contact,
            vec![
                Field::text("Name", ""),
                Field::text("Email", ""),
                Field::text("Message", ""),
            ],
        )
    }

    pub fn log(initial: &LogForm) -> Self {
        Self::new(
            FormKind::Log,
            vec![
                Field::text("Date", &initial.date),
                Field::text("Mood (1-10)", &initial.mood),
                Field::text("Symptoms", &initial.symptoms),
                Field::toggle("Medication taken", initial.med_taken),
                Field::text("Notes", &initial.notes),
            ],
        )
    }

    pub fn reminder(initial: &ReminderForm) -> Self {
        Self::new(
            FormKind::Reminder,
            vec![
                Field::text("Title", &initial.title),
                Field::text("Date & time", &initial.dt),
                Field::text("Note", &initial.note),
            ],
        )
    }

    pub fn appointment(initial: &AppointmentForm) -> Self {
        Self::new(
            FormKind::Appointment,
            vec![
                Field::text("Title", &initial.title),
                Field::text("Date", &initial.date),
                Field::text("Time", &initial.time),
                Field::text("Duration (mins)", &initial.duration),
            ],
        )
    }

    pub fn assessment() -> Self {
        let fields = QUESTIONS
            .iter()
            .map(|q| Field::choice(q.prompt, q.options.iter().map(|(label, _)| *label).collect()))
            .collect();
        Self::new(FormKind::Assessment, fields)
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn input_char(&mut self, c: char) {
        let Some(field) = self.fields.get_mut(self.focus) else {
            return;
        };
        match &mut field.kind {
            FieldKind::Text | FieldKind::Secret => field.value.push(c),
            FieldKind::Toggle(on) if c == ' ' => *on = !*on,
            FieldKind::Toggle(_) | FieldKind::Choice(..) => {}
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }

    /// Cycles a choice field; `forward` picks the next option.
    pub fn cycle_choice(&mut self, forward: bool) {
        let Some(field) = self.fields.get_mut(self.focus) else {
            return;
        };
        match &mut field.kind {
            FieldKind::Choice(options, selected) if !options.is_empty() => {
                let len = options.len();
                *selected = if forward {
                    (*selected + 1) % len
                } else {
                    (*selected + len - 1) % len
                };
            }
            FieldKind::Toggle(on) => *on = !*on,
            _ => {}
        }
    }

    pub fn value(&self, index: usize) -> String {
        self.fields
            .get(index)
            .map(|f| f.value.clone())
            .unwrap_or_default()
    }

    fn checked(&self, index: usize) -> bool {
        matches!(self.fields.get(index).map(|f| &f.kind), Some(FieldKind::Toggle(true)))
    }

    fn selected(&self, index: usize) -> usize {
        match self.fields.get(index).map(|f| &f.kind) {
            Some(FieldKind::Choice(_, selected)) => *selected,
            _ => 0,
        }
    }

    pub fn to_log_form(&self) -> LogForm {
        LogForm {
            date: self.value(0),
            mood: self.value(1),
            symptoms: self.value(2),
            med_taken: self.checked(3),
            notes: self.value(4),
        }
    }

    pub fn to_reminder_form(&self) -> ReminderForm {
        ReminderForm {
            title: self.value(0),
            dt: self.value(1),
            note: self.value(2),
        }
    }

    pub fn to_appointment_form(&self) -> AppointmentForm {
        AppointmentForm {
            title: self.value(0),
            date: self.value(1),
            time: self.value(2),
            duration: self.value(3),
        }
    }

    pub fn to_contact_form(&self) -> ContactForm {
        ContactForm {
            name: self.value(0),
            email: self.value(1),
            msg: self.value(2),
        }
    }

    pub fn assessment_selection(&self) -> [usize; 3] {
        [self.selected(0), self.selected(1), self.selected(2)]
    }
}
