// TUI widget modules for each board panel and popup.

pub mod column_panel;
pub mod help_bar;
pub mod profile;
pub mod report_form;
pub mod roster_table;
pub mod status_bar;
