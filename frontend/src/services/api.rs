use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::{CalendarData, EventPayload, EventRecord};
use yew::Callback;

use crate::components::toast::Toast;

/// Fixed user-facing message for any failed request.
const REQUEST_FAILED: &str = "Something went wrong talking to the server";

/// Client for the calendar JSON API.
///
/// Every call raises the global loading overlay before dispatch and
/// lowers it on every exit path, including parse failures. Transport
/// errors and non-2xx responses surface one generic toast, get logged
/// to the console, and propagate to the caller. No retries.
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    loading: Callback<bool>,
    toast: Callback<Toast>,
}

/// Keeps the loading overlay up for as long as it is alive.
struct LoadingGuard {
    loading: Callback<bool>,
}

impl LoadingGuard {
    fn raise(loading: &Callback<bool>) -> Self {
        loading.emit(true);
        Self {
            loading: loading.clone(),
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.loading.emit(false);
    }
}

impl ApiClient {
    /// Create a client talking to the same origin the app was served from.
    pub fn new(loading: Callback<bool>, toast: Callback<Toast>) -> Self {
        Self {
            base_url: String::new(),
            loading,
            toast,
        }
    }

    /// Create a client with a custom base URL, for dev setups where the
    /// API runs on another port.
    pub fn with_base_url(base_url: String, loading: Callback<bool>, toast: Callback<Toast>) -> Self {
        Self {
            base_url,
            loading,
            toast,
        }
    }

    /// Get the month grid plus that month's events keyed by date.
    pub async fn get_calendar(&self, year: i32, month: u32) -> Result<CalendarData, String> {
        let url = format!("{}/api/calendar/{}/{}", self.base_url, year, month);
        let request = Request::get(&url)
            .build()
            .map_err(|e| format!("failed to build request: {}", e))?;
        self.execute(request).await
    }

    /// Get the event list for a single date, in server order.
    pub async fn get_events(&self, date: &str) -> Result<Vec<EventRecord>, String> {
        let url = format!("{}/api/events/{}", self.base_url, date);
        let request = Request::get(&url)
            .build()
            .map_err(|e| format!("failed to build request: {}", e))?;
        self.execute(request).await
    }

    /// Create a new event.
    pub async fn create_event(&self, payload: &EventPayload) -> Result<EventRecord, String> {
        let url = format!("{}/api/events", self.base_url);
        let request = Request::post(&url)
            .json(payload)
            .map_err(|e| format!("failed to serialize request: {}", e))?;
        self.execute(request).await
    }

    /// Update an existing event.
    pub async fn update_event(&self, id: i64, payload: &EventPayload) -> Result<EventRecord, String> {
        let url = format!("{}/api/events/{}", self.base_url, id);
        let request = Request::put(&url)
            .json(payload)
            .map_err(|e| format!("failed to serialize request: {}", e))?;
        self.execute(request).await
    }

    /// Delete an event. The response body carries nothing useful.
    pub async fn delete_event(&self, id: i64) -> Result<(), String> {
        let url = format!("{}/api/events/{}", self.base_url, id);
        let request = Request::delete(&url)
            .build()
            .map_err(|e| format!("failed to build request: {}", e))?;

        let _guard = LoadingGuard::raise(&self.loading);
        self.send_checked(request).await.map(|_| ())
    }

    /// Free-text search across all events.
    pub async fn search_events(&self, query: &str) -> Result<Vec<EventRecord>, String> {
        let encoded = String::from(js_sys::encode_uri_component(query));
        let url = format!("{}/api/search?q={}", self.base_url, encoded);
        let request = Request::get(&url)
            .build()
            .map_err(|e| format!("failed to build request: {}", e))?;
        self.execute(request).await
    }

    /// Round-trips a request and parses its JSON body, holding the
    /// loading overlay up for the whole exchange.
    async fn execute<T: DeserializeOwned>(&self, request: Request) -> Result<T, String> {
        let _guard = LoadingGuard::raise(&self.loading);
        let response = self.send_checked(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| self.fail(format!("failed to parse response: {}", e)))
    }

    async fn send_checked(&self, request: Request) -> Result<Response, String> {
        let response = request
            .send()
            .await
            .map_err(|e| self.fail(format!("network error: {}", e)))?;

        if !response.ok() {
            return Err(self.fail(format!("HTTP error, status {}", response.status())));
        }
        Ok(response)
    }

    /// Logs the diagnostic, emits the one generic error toast, and
    /// hands the detail back for the caller's `Err`.
    fn fail(&self, detail: String) -> String {
        gloo::console::error!("API call failed:", detail.clone());
        self.toast.emit(Toast::error(REQUEST_FAILED));
        detail
    }
}
