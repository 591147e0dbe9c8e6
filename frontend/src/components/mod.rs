pub mod calendar;
pub mod event_form_modal;
pub mod event_panel;
pub mod search_modal;
pub mod toast;
