use shared::{EventPayload, EventRecord};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::toast::Toast;
use crate::services::api::ApiClient;

/// Which face the add/edit modal is showing. `Add` carries the
/// already-resolved pre-fill date; `Edit` carries the record fetched
/// fresh from the server.
#[derive(Clone, PartialEq)]
pub enum FormMode {
    Closed,
    Add { date: String },
    Edit { event: EventRecord },
}

/// Maps raw form fields to a request body.
///
/// Title is the only client-side validation: blank after trimming
/// blocks submission. Blank end time and description normalize to
/// `None`.
pub fn build_payload(
    date: &str,
    start_time: &str,
    end_time: &str,
    title: &str,
    description: &str,
) -> Result<EventPayload, &'static str> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Event title is required");
    }

    let end_time = end_time.trim();
    let description = description.trim();

    Ok(EventPayload {
        date: date.trim().to_string(),
        start_time: start_time.trim().to_string(),
        end_time: (!end_time.is_empty()).then(|| end_time.to_string()),
        title: title.to_string(),
        description: (!description.is_empty()).then(|| description.to_string()),
    })
}

#[derive(Properties, PartialEq)]
pub struct EventFormModalProps {
    pub mode: FormMode,
    pub api: ApiClient,
    pub toast: Callback<Toast>,
    pub on_close: Callback<()>,
    /// Fired after a successful save so the caller can reload
    pub on_saved: Callback<()>,
}

#[function_component(EventFormModal)]
pub fn event_form_modal(props: &EventFormModalProps) -> Html {
    let date = use_state(String::new);
    let start_time = use_state(String::new);
    let end_time = use_state(String::new);
    let title = use_state(String::new);
    let description = use_state(String::new);
    let is_submitting = use_state(|| false);
    let title_ref = use_node_ref();

    // Re-seed the fields whenever the modal is (re)opened
    use_effect_with(props.mode.clone(), {
        let date = date.clone();
        let start_time = start_time.clone();
        let end_time = end_time.clone();
        let title = title.clone();
        let description = description.clone();
        let is_submitting = is_submitting.clone();
        let title_ref = title_ref.clone();
        move |mode| {
            match mode {
                FormMode::Closed => {
                    date.set(String::new());
                    start_time.set(String::new());
                    end_time.set(String::new());
                    title.set(String::new());
                    description.set(String::new());
                    is_submitting.set(false);
                }
                FormMode::Add { date: target } => {
                    date.set(target.clone());
                    start_time.set(String::new());
                    end_time.set(String::new());
                    title.set(String::new());
                    description.set(String::new());
                    is_submitting.set(false);
                }
                FormMode::Edit { event } => {
                    date.set(event.date.clone());
                    start_time.set(event.start_time.clone());
                    end_time.set(event.end_time.clone().unwrap_or_default());
                    title.set(event.title.clone());
                    description.set(event.description.clone().unwrap_or_default());
                    is_submitting.set(false);
                }
            }
            if !matches!(mode, FormMode::Closed) {
                if let Some(input) = title_ref.cast::<HtmlInputElement>() {
                    let _ = input.focus();
                }
            }
            || ()
        }
    });

    let on_date_change = input_setter(&date);
    let on_start_change = input_setter(&start_time);
    let on_end_change = input_setter(&end_time);
    let on_title_change = input_setter(&title);
    let on_description_change = {
        let description = description.clone();
        Callback::from(move |e: Event| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            description.set(input.value());
        })
    };

    let on_submit = {
        let date = date.clone();
        let start_time = start_time.clone();
        let end_time = end_time.clone();
        let title = title.clone();
        let description = description.clone();
        let is_submitting = is_submitting.clone();
        let mode = props.mode.clone();
        let api = props.api.clone();
        let toast = props.toast.clone();
        let on_close = props.on_close.clone();
        let on_saved = props.on_saved.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let payload = match build_payload(
                date.as_str(),
                start_time.as_str(),
                end_time.as_str(),
                title.as_str(),
                description.as_str(),
            ) {
                Ok(payload) => payload,
                Err(message) => {
                    // Local validation; nothing reaches the network
                    toast.emit(Toast::error(message));
                    return;
                }
            };

            is_submitting.set(true);

            let is_submitting = is_submitting.clone();
            let mode = mode.clone();
            let api = api.clone();
            let toast = toast.clone();
            let on_close = on_close.clone();
            let on_saved = on_saved.clone();

            spawn_local(async move {
                let result = match &mode {
                    FormMode::Edit { event } => api
                        .update_event(event.id, &payload)
                        .await
                        .map(|_| "Event updated"),
                    _ => api.create_event(&payload).await.map(|_| "Event added"),
                };

                is_submitting.set(false);
                match result {
                    Ok(message) => {
                        toast.emit(Toast::success(message));
                        on_close.emit(());
                        on_saved.emit(());
                    }
                    Err(e) => {
                        // ApiClient already surfaced the toast
                        gloo::console::error!("failed to save event:", e);
                    }
                }
            });
        })
    };

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };
    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });
    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    if matches!(props.mode, FormMode::Closed) {
        return html! {};
    }

    let heading = match &props.mode {
        FormMode::Edit { .. } => "Edit event",
        _ => "Add event",
    };

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal event-modal" onclick={on_modal_click}>
                <h3 class="modal-title">{heading}</h3>

                <form class="event-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="event-date">{"Date"}</label>
                        <input
                            id="event-date"
                            type="date"
                            value={(*date).clone()}
                            onchange={on_date_change}
                            disabled={*is_submitting}
                            required=true
                        />
                    </div>

                    <div class="form-group">
                        <label for="event-start">{"Start time"}</label>
                        <input
                            id="event-start"
                            type="time"
                            value={(*start_time).clone()}
                            onchange={on_start_change}
                            disabled={*is_submitting}
                            required=true
                        />
                    </div>

                    <div class="form-group">
                        <label for="event-end">{"End time (optional)"}</label>
                        <input
                            id="event-end"
                            type="time"
                            value={(*end_time).clone()}
                            onchange={on_end_change}
                            disabled={*is_submitting}
                        />
                    </div>

                    <div class="form-group">
                        <label for="event-title">{"Title"}</label>
                        <input
                            id="event-title"
                            type="text"
                            ref={title_ref.clone()}
                            placeholder="What is happening?"
                            value={(*title).clone()}
                            onchange={on_title_change}
                            disabled={*is_submitting}
                        />
                    </div>

                    <div class="form-group">
                        <label for="event-description">{"Description (optional)"}</label>
                        <textarea
                            id="event-description"
                            value={(*description).clone()}
                            onchange={on_description_change}
                            disabled={*is_submitting}
                        />
                    </div>

                    <div class="modal-buttons">
                        <button type="submit" class="btn btn-primary" disabled={*is_submitting}>
                            {if *is_submitting { "Saving..." } else { "Save" }}
                        </button>
                        <button
                            type="button"
                            class="btn btn-secondary"
                            onclick={on_cancel}
                            disabled={*is_submitting}
                        >
                            {"Cancel"}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}

fn input_setter(state: &UseStateHandle<String>) -> Callback<Event> {
    let state = state.clone();
    Callback::from(move |e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        state.set(input.value());
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_title_blocks_the_payload() {
        assert!(build_payload("2025-03-14", "09:00", "", "", "").is_err());
        assert!(build_payload("2025-03-14", "09:00", "", "   ", "notes").is_err());
    }

    #[test]
    fn blank_optionals_normalize_to_none() {
        let payload = build_payload("2025-03-14", "09:00", "", "Standup", "  ").unwrap();
        assert_eq!(payload.end_time, None);
        assert_eq!(payload.description, None);
    }

    #[test]
    fn fields_are_trimmed() {
        let payload =
            build_payload("2025-03-14", "09:00", " 10:00 ", "  Standup  ", " daily ").unwrap();
        assert_eq!(payload.title, "Standup");
        assert_eq!(payload.end_time.as_deref(), Some("10:00"));
        assert_eq!(payload.description.as_deref(), Some("daily"));
        assert_eq!(payload.date, "2025-03-14");
    }
}
