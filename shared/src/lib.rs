use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single calendar event as the server returns it.
///
/// The server owns these records; the frontend only holds transient
/// copies fetched per date or per search query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: i64,
    /// Event date as a local YYYY-MM-DD string
    pub date: String,
    /// Start time as HH:MM
    pub start_time: String,
    /// Optional end time as HH:MM
    pub end_time: Option<String>,
    /// Event title (non-empty, server-validated)
    pub title: String,
    pub description: Option<String>,
}

/// The month layout as weeks of day-numbers, 0 marking an
/// out-of-month filler cell.
pub type Grid = Vec<Vec<u32>>;

/// Payload of `GET /api/calendar/{year}/{month}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarData {
    pub calendar: Grid,
    /// Events for the month keyed by YYYY-MM-DD, each list already
    /// sorted by start time on the server
    pub events: BTreeMap<String, Vec<EventRecord>>,
}

/// Request body for `POST /api/events` and `PUT /api/events/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPayload {
    pub date: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub title: String,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_record_parses_documented_json() {
        let json = r#"{
            "id": 7,
            "date": "2025-03-14",
            "start_time": "09:30",
            "end_time": null,
            "title": "Dentist",
            "description": null
        }"#;

        let event: EventRecord = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, 7);
        assert_eq!(event.date, "2025-03-14");
        assert_eq!(event.start_time, "09:30");
        assert_eq!(event.end_time, None);
        assert_eq!(event.title, "Dentist");
        assert_eq!(event.description, None);
    }

    #[test]
    fn calendar_data_parses_grid_and_event_map() {
        let json = r#"{
            "calendar": [
                [0, 0, 1, 2, 3, 4, 5],
                [6, 7, 8, 9, 10, 11, 12]
            ],
            "events": {
                "2025-03-03": [
                    {
                        "id": 1,
                        "date": "2025-03-03",
                        "start_time": "12:00",
                        "end_time": "13:00",
                        "title": "Lunch",
                        "description": "With Anna"
                    }
                ]
            }
        }"#;

        let data: CalendarData = serde_json::from_str(json).unwrap();
        assert_eq!(data.calendar.len(), 2);
        assert_eq!(data.calendar[0][2], 1);
        let day = data.events.get("2025-03-03").unwrap();
        assert_eq!(day.len(), 1);
        assert_eq!(day[0].end_time.as_deref(), Some("13:00"));
    }

    #[test]
    fn event_payload_serializes_optional_fields_as_null() {
        let payload = EventPayload {
            date: "2025-03-14".to_string(),
            start_time: "10:00".to_string(),
            end_time: None,
            title: "Standup".to_string(),
            description: None,
        };

        let json: serde_json::Value = serde_json::to_value(&payload).unwrap();
        assert!(json["end_time"].is_null());
        assert!(json["description"].is_null());
        assert_eq!(json["title"], "Standup");
    }
}
