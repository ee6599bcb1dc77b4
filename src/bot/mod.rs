pub mod format;
pub mod notification;
