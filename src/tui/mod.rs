mod form;
mod handler;
mod ui;

pub use form::{Form, FormKind};
pub use handler::{handle_key_event, AppAction, InputMode};
pub use ui::draw;
