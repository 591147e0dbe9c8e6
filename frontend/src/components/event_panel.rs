use shared::EventRecord;
use yew::prelude::*;

/// Time span label for an event row: the end time is appended only
/// when it exists and differs from the start.
pub fn time_span(event: &EventRecord) -> String {
    match &event.end_time {
        Some(end) if end != &event.start_time => format!("{} - {}", event.start_time, end),
        _ => event.start_time.clone(),
    }
}

#[derive(Properties, PartialEq)]
pub struct EventPanelProps {
    pub selected_date: Option<String>,
    /// Events for the selected date, kept in server order
    pub events: Vec<EventRecord>,
    /// Opens the add modal, pre-filled with the given date
    pub on_add: Callback<Option<String>>,
    pub on_edit: Callback<i64>,
    pub on_delete: Callback<EventRecord>,
}

#[function_component(EventPanel)]
pub fn event_panel(props: &EventPanelProps) -> Html {
    let Some(selected_date) = props.selected_date.clone() else {
        return html! {
            <div class="no-events">
                <p>{"Select a day to see its events"}</p>
            </div>
        };
    };

    if props.events.is_empty() {
        let on_add_for_day = {
            let on_add = props.on_add.clone();
            Callback::from(move |_: MouseEvent| on_add.emit(Some(selected_date.clone())))
        };
        return html! {
            <div class="no-events">
                <p>{"No events for this day"}</p>
                <button class="btn btn-primary" onclick={on_add_for_day}>
                    {"Add event"}
                </button>
            </div>
        };
    }

    html! {
        <div class="events-list">
            {for props.events.iter().map(|event| render_event(event, props))}
        </div>
    }
}

fn render_event(event: &EventRecord, props: &EventPanelProps) -> Html {
    let on_edit = {
        let on_edit = props.on_edit.clone();
        let id = event.id;
        Callback::from(move |_: MouseEvent| on_edit.emit(id))
    };
    let on_delete = {
        let on_delete = props.on_delete.clone();
        let event = event.clone();
        Callback::from(move |_: MouseEvent| on_delete.emit(event.clone()))
    };

    html! {
        <div class="event-item">
            <div class="event-time">{time_span(event)}</div>
            <div class="event-title">{&event.title}</div>
            {if let Some(description) = &event.description {
                html! { <div class="event-description">{description}</div> }
            } else {
                html! {}
            }}
            <div class="event-actions">
                <button class="event-btn edit" onclick={on_edit}>{"Edit"}</button>
                <button class="event-btn delete" onclick={on_delete}>{"Delete"}</button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(start: &str, end: Option<&str>) -> EventRecord {
        EventRecord {
            id: 1,
            date: "2025-03-14".to_string(),
            start_time: start.to_string(),
            end_time: end.map(str::to_string),
            title: "Meeting".to_string(),
            description: None,
        }
    }

    #[test]
    fn time_span_shows_range_when_end_differs() {
        assert_eq!(time_span(&event("09:00", Some("10:30"))), "09:00 - 10:30");
    }

    #[test]
    fn time_span_collapses_equal_or_missing_end() {
        assert_eq!(time_span(&event("09:00", Some("09:00"))), "09:00");
        assert_eq!(time_span(&event("09:00", None)), "09:00");
    }
}
