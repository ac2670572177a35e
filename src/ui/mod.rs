mod common;
mod confirm_dialog;
mod home;
mod notification;

pub use confirm_dialog::render_confirm_dialog;
pub use home::render_home;
pub use notification::render_notification;
