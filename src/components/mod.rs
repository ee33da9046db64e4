pub mod confirm_dialog;
pub mod profile_panel;
pub mod status_line;
