use shared::{CalendarData, EventRecord};
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::date_utils::{step_month, today_string, year_month_of};

/// The visible-month cursor plus fetch generations.
///
/// Every transition is a wholesale reload. The generation counters
/// make that hold even when a transition lands on the coordinates
/// already shown (pressing "today" inside the current month,
/// re-clicking the selected day): the fetch effects key on them, so
/// they re-run although the visible values compare equal.
#[derive(Debug, Clone, PartialEq)]
struct CalendarCursor {
    year: i32,
    month: u32,
    selected_date: Option<String>,
    grid_generation: u32,
    selection_generation: u32,
}

impl CalendarCursor {
    fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            selected_date: None,
            grid_generation: 0,
            selection_generation: 0,
        }
    }

    fn step(&mut self, delta: i32) {
        let (year, month) = step_month(self.year, self.month, delta);
        self.year = year;
        self.month = month;
        self.grid_generation += 1;
    }

    fn go_to_today(&mut self, today: &str) {
        if let Some((year, month)) = year_month_of(today) {
            self.year = year;
            self.month = month;
        }
        self.grid_generation += 1;
        self.select(today.to_string());
    }

    /// Selecting only touches the day list; the grid re-renders from
    /// state it already holds, without a refetch.
    fn select(&mut self, date: String) {
        self.selected_date = Some(date);
        self.selection_generation += 1;
    }

    fn go_to_event(&mut self, event: &EventRecord) {
        if let Some((year, month)) = year_month_of(&event.date) {
            self.year = year;
            self.month = month;
        }
        self.grid_generation += 1;
        self.select(event.date.clone());
    }

    /// Dependency key of the grid fetch effect.
    fn grid_key(&self) -> (i32, u32, u32) {
        (self.year, self.month, self.grid_generation)
    }

    /// Dependency key of the selected-day fetch effect.
    fn selection_key(&self) -> (Option<String>, u32) {
        (self.selected_date.clone(), self.selection_generation)
    }
}

/// Snapshot of the calendar state for one render.
///
/// `selected_date`, when set, is a date rendered by the loaded grid,
/// except during a jump transition where the new grid is still in
/// flight.
#[derive(Clone, PartialEq)]
pub struct CalendarState {
    pub year: i32,
    pub month: u32,
    pub today: String,
    pub selected_date: Option<String>,
    pub calendar: Option<CalendarData>,
    /// Events of the selected date, in server order
    pub selected_events: Vec<EventRecord>,
}

#[derive(Clone, PartialEq)]
pub struct CalendarActions {
    pub prev_month: Callback<MouseEvent>,
    pub next_month: Callback<MouseEvent>,
    pub go_to_today: Callback<MouseEvent>,
    pub select_date: Callback<String>,
    pub go_to_event: Callback<EventRecord>,
    /// Wholesale reload: month grid first, then the selected day's list
    pub refresh: Callback<()>,
}

pub struct UseCalendarResult {
    pub state: CalendarState,
    pub actions: CalendarActions,
}

/// Drives the visible-month state machine and its two fetches.
///
/// Navigation mutates the cursor; the effects below reload the grid
/// and the day list wholesale on every cursor transition, so `change
/// month`, `go to today` and `jump to event` all share one reload
/// path.
#[hook]
pub fn use_calendar(api: &ApiClient) -> UseCalendarResult {
    let today = use_state(today_string);
    let (initial_year, initial_month) = year_month_of(&today).unwrap_or((2025, 1));
    let cursor = use_state(move || CalendarCursor::new(initial_year, initial_month));
    let calendar = use_state(|| Option::<CalendarData>::None);
    let selected_events = use_state(Vec::<EventRecord>::new);

    // Reload the grid on every cursor transition (and once on mount).
    // The payload is replaced wholesale; no diffing.
    use_effect_with(cursor.grid_key(), {
        let api = api.clone();
        let calendar = calendar.clone();
        move |&(year, month, _generation)| {
            spawn_local(async move {
                match api.get_calendar(year, month).await {
                    Ok(data) => calendar.set(Some(data)),
                    Err(e) => gloo::console::error!("failed to load calendar:", e),
                }
            });
            || ()
        }
    });

    // Second phase of date selection: the highlight already moved on
    // the synchronous re-render, the day's list follows here.
    use_effect_with(cursor.selection_key(), {
        let api = api.clone();
        let selected_events = selected_events.clone();
        move |(selected, _generation): &(Option<String>, u32)| {
            if let Some(date) = selected.clone() {
                spawn_local(async move {
                    match api.get_events(&date).await {
                        Ok(events) => selected_events.set(events),
                        Err(e) => gloo::console::error!("failed to load events:", e),
                    }
                });
            }
            || ()
        }
    });

    let prev_month = {
        let cursor = cursor.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*cursor).clone();
            next.step(-1);
            cursor.set(next);
        })
    };

    let next_month = {
        let cursor = cursor.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*cursor).clone();
            next.step(1);
            cursor.set(next);
        })
    };

    let go_to_today = {
        let cursor = cursor.clone();
        let today = today.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*cursor).clone();
            next.go_to_today(&today);
            cursor.set(next);
        })
    };

    let select_date = {
        let cursor = cursor.clone();
        Callback::from(move |date: String| {
            let mut next = (*cursor).clone();
            next.select(date);
            cursor.set(next);
        })
    };

    let go_to_event = {
        let cursor = cursor.clone();
        Callback::from(move |event: EventRecord| {
            let mut next = (*cursor).clone();
            next.go_to_event(&event);
            cursor.set(next);
        })
    };

    let refresh = {
        let api = api.clone();
        let calendar = calendar.clone();
        let selected_events = selected_events.clone();
        let cursor = cursor.clone();
        Callback::from(move |_| {
            let api = api.clone();
            let calendar = calendar.clone();
            let selected_events = selected_events.clone();
            let year = cursor.year;
            let month = cursor.month;
            let selected = cursor.selected_date.clone();
            spawn_local(async move {
                // ordered awaits, never joined
                match api.get_calendar(year, month).await {
                    Ok(data) => calendar.set(Some(data)),
                    Err(e) => gloo::console::error!("failed to reload calendar:", e),
                }
                if let Some(date) = selected {
                    match api.get_events(&date).await {
                        Ok(events) => selected_events.set(events),
                        Err(e) => gloo::console::error!("failed to reload events:", e),
                    }
                }
            });
        })
    };

    let state = CalendarState {
        year: cursor.year,
        month: cursor.month,
        today: (*today).clone(),
        selected_date: cursor.selected_date.clone(),
        calendar: (*calendar).clone(),
        selected_events: (*selected_events).clone(),
    };

    let actions = CalendarActions {
        prev_month,
        next_month,
        go_to_today,
        select_date,
        go_to_event,
        refresh,
    };

    UseCalendarResult { state, actions }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(date: &str) -> EventRecord {
        EventRecord {
            id: 42,
            date: date.to_string(),
            start_time: "10:00".to_string(),
            end_time: None,
            title: "Release planning".to_string(),
            description: None,
        }
    }

    #[test]
    fn month_navigation_wraps_and_starts_a_new_grid_fetch() {
        let mut cursor = CalendarCursor::new(2025, 12);
        let before = cursor.grid_key();

        cursor.step(1);

        assert_eq!((cursor.year, cursor.month), (2026, 1));
        assert_ne!(cursor.grid_key(), before);
    }

    #[test]
    fn go_to_today_inside_the_visible_month_still_reloads() {
        let mut cursor = CalendarCursor::new(2025, 6);
        let grid_before = cursor.grid_key();
        let selection_before = cursor.selection_key();

        cursor.go_to_today("2025-06-15");

        // coordinates are unchanged, the fetch keys are not
        assert_eq!((cursor.year, cursor.month), (2025, 6));
        assert_ne!(cursor.grid_key(), grid_before);
        assert_ne!(cursor.selection_key(), selection_before);
        assert_eq!(cursor.selected_date.as_deref(), Some("2025-06-15"));
    }

    #[test]
    fn reselecting_the_same_date_refetches_only_the_day_list() {
        let mut cursor = CalendarCursor::new(2025, 6);
        cursor.select("2025-06-10".to_string());
        let grid_key = cursor.grid_key();
        let selection_key = cursor.selection_key();

        cursor.select("2025-06-10".to_string());

        assert_ne!(cursor.selection_key(), selection_key);
        assert_eq!(cursor.grid_key(), grid_key);
    }

    #[test]
    fn jump_to_event_lands_on_the_events_month_with_the_date_selected() {
        let mut cursor = CalendarCursor::new(2025, 6);

        cursor.go_to_event(&event("2025-03-14"));

        assert_eq!((cursor.year, cursor.month), (2025, 3));
        assert_eq!(cursor.selected_date.as_deref(), Some("2025-03-14"));
    }

    #[test]
    fn jump_inside_the_visible_month_still_reloads_the_grid() {
        let mut cursor = CalendarCursor::new(2025, 3);
        let before = cursor.grid_key();

        cursor.go_to_event(&event("2025-03-14"));

        assert_ne!(cursor.grid_key(), before);
    }

    #[test]
    fn jump_with_an_unparseable_date_keeps_the_visible_month() {
        let mut cursor = CalendarCursor::new(2025, 6);

        cursor.go_to_event(&event("garbage"));

        assert_eq!((cursor.year, cursor.month), (2025, 6));
        assert_eq!(cursor.selected_date.as_deref(), Some("garbage"));
    }
}
