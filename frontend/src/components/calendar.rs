use shared::CalendarData;
use yew::prelude::*;

use crate::services::date_utils::iso_date;

/// How many event markers a day cell shows before collapsing the rest
/// into a single overflow marker.
pub const MAX_MARKERS: usize = 3;

/// One truncated event marker inside a day cell.
#[derive(Debug, Clone, PartialEq)]
pub struct EventMarker {
    pub title: String,
    /// Hover text, "{start_time} - {title}"
    pub tooltip: String,
    /// Cycled color class, event-1 through event-5
    pub color_class: String,
}

/// One cell of the month grid, precomputed so the view layer only has
/// to map it to markup.
#[derive(Debug, Clone, PartialEq)]
pub enum DayCell {
    /// Padding cell belonging to an adjacent month; rendered blank,
    /// never clickable, never carries markers.
    Filler,
    Day {
        day: u32,
        date: String,
        is_today: bool,
        is_selected: bool,
        has_events: bool,
        markers: Vec<EventMarker>,
        /// Count of events beyond MAX_MARKERS, if any
        overflow: Option<usize>,
    },
}

/// Flattens the server-provided month grid into renderable cells.
///
/// Day-number 0 marks an out-of-month filler. Event markers keep the
/// server's insertion order; no sorting happens on this side.
pub fn build_month_cells(
    year: i32,
    month: u32,
    data: &CalendarData,
    today: &str,
    selected: Option<&str>,
) -> Vec<DayCell> {
    let mut cells = Vec::new();

    for week in &data.calendar {
        for &day in week {
            if day == 0 {
                cells.push(DayCell::Filler);
                continue;
            }

            let date = iso_date(year, month, day);
            let day_events = data.events.get(&date).map(Vec::as_slice).unwrap_or(&[]);

            let markers = day_events
                .iter()
                .take(MAX_MARKERS)
                .enumerate()
                .map(|(index, event)| EventMarker {
                    title: event.title.clone(),
                    tooltip: format!("{} - {}", event.start_time, event.title),
                    color_class: format!("event-{}", index % 5 + 1),
                })
                .collect();
            let overflow = if day_events.len() > MAX_MARKERS {
                Some(day_events.len() - MAX_MARKERS)
            } else {
                None
            };

            cells.push(DayCell::Day {
                day,
                is_today: date == today,
                is_selected: selected == Some(date.as_str()),
                has_events: !day_events.is_empty(),
                markers,
                overflow,
                date,
            });
        }
    }

    cells
}

#[derive(Properties, PartialEq)]
pub struct CalendarProps {
    pub year: i32,
    pub month: u32,
    pub data: CalendarData,
    pub today: String,
    pub selected_date: Option<String>,
    pub on_select: Callback<String>,
}

#[function_component(Calendar)]
pub fn calendar(props: &CalendarProps) -> Html {
    let cells = build_month_cells(
        props.year,
        props.month,
        &props.data,
        &props.today,
        props.selected_date.as_deref(),
    );

    html! {
        <div class="calendar">
            <div class="calendar-weekdays">
                <div class="weekday">{"Mon"}</div>
                <div class="weekday">{"Tue"}</div>
                <div class="weekday">{"Wed"}</div>
                <div class="weekday">{"Thu"}</div>
                <div class="weekday">{"Fri"}</div>
                <div class="weekday">{"Sat"}</div>
                <div class="weekday">{"Sun"}</div>
            </div>
            <div class="calendar-body">
                {for cells.iter().map(|cell| render_cell(cell, &props.on_select))}
            </div>
        </div>
    }
}

fn render_cell(cell: &DayCell, on_select: &Callback<String>) -> Html {
    let DayCell::Day {
        day,
        date,
        is_today,
        is_selected,
        has_events,
        markers,
        overflow,
    } = cell
    else {
        return html! { <div class="calendar-day other-month"></div> };
    };

    let mut class = classes!("calendar-day");
    if *is_today {
        class.push("today");
    }
    if *is_selected {
        class.push("selected");
    }
    if *has_events {
        class.push("has-events");
    }

    let onclick = {
        let on_select = on_select.clone();
        let date = date.clone();
        Callback::from(move |_: MouseEvent| on_select.emit(date.clone()))
    };

    html! {
        <div {class} {onclick}>
            <div class="day-number">{*day}</div>
            <div class="day-events">
                {for markers.iter().map(|marker| html! {
                    <div class={classes!("event-dot", marker.color_class.clone())}
                         title={marker.tooltip.clone()}>
                        {&marker.title}
                    </div>
                })}
                {if let Some(hidden) = overflow {
                    html! { <div class="event-dot event-more">{format!("+{}", hidden)}</div> }
                } else {
                    html! {}
                }}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::EventRecord;
    use std::collections::BTreeMap;

    fn event(id: i64, date: &str, title: &str) -> EventRecord {
        EventRecord {
            id,
            date: date.to_string(),
            start_time: "09:00".to_string(),
            end_time: None,
            title: title.to_string(),
            description: None,
        }
    }

    fn march_2025(events_on_3rd: Vec<EventRecord>) -> CalendarData {
        let mut events = BTreeMap::new();
        if !events_on_3rd.is_empty() {
            events.insert("2025-03-03".to_string(), events_on_3rd);
        }
        CalendarData {
            // first week of March 2025, Monday-first: Sat 1st, Sun 2nd
            calendar: vec![
                vec![0, 0, 0, 0, 0, 1, 2],
                vec![3, 4, 5, 6, 7, 8, 9],
            ],
            events,
        }
    }

    #[test]
    fn filler_cells_carry_no_date_or_markers() {
        let data = march_2025(vec![event(1, "2025-03-03", "Standup")]);
        let cells = build_month_cells(2025, 3, &data, "2025-03-03", None);

        assert_eq!(cells.len(), 14);
        assert!(cells[..5].iter().all(|cell| *cell == DayCell::Filler));
        assert!(matches!(cells[5], DayCell::Day { day: 1, .. }));
    }

    #[test]
    fn exactly_one_cell_is_selected() {
        let data = march_2025(vec![]);
        let cells = build_month_cells(2025, 3, &data, "2025-03-01", Some("2025-03-04"));

        let selected: Vec<_> = cells
            .iter()
            .filter(|cell| matches!(cell, DayCell::Day { is_selected: true, .. }))
            .collect();
        assert_eq!(selected.len(), 1);
        assert!(matches!(selected[0], DayCell::Day { day: 4, .. }));
    }

    #[test]
    fn today_and_event_flags_are_set() {
        let data = march_2025(vec![event(1, "2025-03-03", "Standup")]);
        let cells = build_month_cells(2025, 3, &data, "2025-03-02", None);

        let DayCell::Day { is_today, .. } = &cells[6] else {
            panic!("expected day cell for the 2nd");
        };
        assert!(*is_today);

        let DayCell::Day { has_events, markers, .. } = &cells[7] else {
            panic!("expected day cell for the 3rd");
        };
        assert!(*has_events);
        assert_eq!(markers[0].tooltip, "09:00 - Standup");
        assert_eq!(markers[0].color_class, "event-1");
    }

    #[test]
    fn more_than_three_events_collapse_into_overflow_marker() {
        let day_events = (1..=5)
            .map(|id| event(id, "2025-03-03", &format!("Event {}", id)))
            .collect();
        let data = march_2025(day_events);
        let cells = build_month_cells(2025, 3, &data, "2025-03-01", None);

        let DayCell::Day { markers, overflow, .. } = &cells[7] else {
            panic!("expected day cell for the 3rd");
        };
        assert_eq!(markers.len(), 3);
        // server insertion order preserved
        assert_eq!(markers[2].title, "Event 3");
        assert_eq!(*overflow, Some(2));
    }

    #[test]
    fn three_or_fewer_events_show_no_overflow() {
        let day_events = (1..=3)
            .map(|id| event(id, "2025-03-03", &format!("Event {}", id)))
            .collect();
        let data = march_2025(day_events);
        let cells = build_month_cells(2025, 3, &data, "2025-03-01", None);

        let DayCell::Day { markers, overflow, .. } = &cells[7] else {
            panic!("expected day cell for the 3rd");
        };
        assert_eq!(markers.len(), 3);
        assert_eq!(*overflow, None);
    }
}
