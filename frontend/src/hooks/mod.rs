pub mod use_calendar;
