use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::router::Page;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    // Navigation
    NextPage,
    PrevPage,
    GoTo(Page),
    MoveUp,
    MoveDown,
    Select,
    // Page actions
    Add,
    Edit,
    Delete,
    ClearLogs,
    ExportCsv,
    // Account actions
    OpenLogin,
    OpenRegister,
    OpenAdminLogin,
    OpenContact,
    ToggleUser,
    AdminLogout,
    ShowHelp,
    HideHelp,
    // Form input actions
    FormChar(char),
    FormBackspace,
    FormNextField,
    FormPrevField,
    FormChoiceNext,
    FormChoicePrev,
    FormSubmit,
    FormCancel,
    // Dialogs
    DismissMessage,
    ConfirmYes,
    ConfirmNo,
}

/// Which overlay, if any, currently owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Form,
    Message,
    Confirm,
    Help,
}

pub fn handle_key_event(key: KeyEvent, mode: InputMode) -> Option<AppAction> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(AppAction::Quit);
    }

    match mode {
        // If help is showing, any key closes it
        InputMode::Help => Some(AppAction::HideHelp),

        InputMode::Message => Some(AppAction::DismissMessage),

        InputMode::Confirm => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(AppAction::ConfirmYes),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(AppAction::ConfirmNo),
            _ => None,
        },

        InputMode::Form => match key.code {
            KeyCode::Enter => Some(AppAction::FormSubmit),
            KeyCode::Esc => Some(AppAction::FormCancel),
            KeyCode::Backspace => Some(AppAction::FormBackspace),
            KeyCode::Tab | KeyCode::Down => Some(AppAction::FormNextField),
            KeyCode::BackTab | KeyCode::Up => Some(AppAction::FormPrevField),
            KeyCode::Right => Some(AppAction::FormChoiceNext),
            KeyCode::Left => Some(AppAction::FormChoicePrev),
            KeyCode::Char(c) => Some(AppAction::FormChar(c)),
            _ => None,
        },

        InputMode::Normal => match (key.code, key.modifiers) {
            (KeyCode::Char('q'), _) => Some(AppAction::Quit),

            (KeyCode::Tab, _) => Some(AppAction::NextPage),
            (KeyCode::BackTab, _) => Some(AppAction::PrevPage),
            (KeyCode::Char(c), _) if c.is_ascii_digit() => Page::from_digit(c).map(AppAction::GoTo),

            (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Some(AppAction::MoveDown),
            (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Some(AppAction::MoveUp),
            (KeyCode::Enter, _) => Some(AppAction::Select),

            (KeyCode::Char('a'), _) => Some(AppAction::Add),
            (KeyCode::Char('e'), _) => Some(AppAction::Edit),
            (KeyCode::Char('d'), _) => Some(AppAction::Delete),
            (KeyCode::Char('C'), _) => Some(AppAction::ClearLogs),
            (KeyCode::Char('x'), _) => Some(AppAction::ExportCsv),

            (KeyCode::Char('l'), _) => Some(AppAction::OpenLogin),
            (KeyCode::Char('r'), _) => Some(AppAction::OpenRegister),
            (KeyCode::Char('A'), _) => Some(AppAction::OpenAdminLogin),
            (KeyCode::Char('c'), _) => Some(AppAction::OpenContact),
            (KeyCode::Char('u'), _) => Some(AppAction::ToggleUser),
            (KeyCode::Char('O'), _) => Some(AppAction::AdminLogout),

            (KeyCode::Char('?'), _) => Some(AppAction::ShowHelp),

            _ => None,
        },
    }
}
