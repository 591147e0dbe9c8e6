mod components;
mod hooks;
mod services;

use gloo::events::EventListener;
use gloo::timers::future::TimeoutFuture;
use shared::EventRecord;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;
use yew::prelude::*;

use components::calendar::Calendar;
use components::event_form_modal::{EventFormModal, FormMode};
use components::event_panel::EventPanel;
use components::search_modal::SearchModal;
use components::toast::{Toast, ToastView};
use hooks::use_calendar::use_calendar;
use services::api::ApiClient;
use services::date_utils::{format_long_date, month_name};

#[function_component(App)]
fn app() -> Html {
    let loading = use_state(|| false);
    let toast = use_state(|| Option::<Toast>::None);
    let form_mode = use_state(|| FormMode::Closed);
    let search_open = use_state(|| false);

    let set_loading = {
        let loading = loading.clone();
        Callback::from(move |visible: bool| loading.set(visible))
    };

    let show_toast = {
        let toast = toast.clone();
        Callback::from(move |next: Toast| {
            toast.set(Some(next));
            let toast = toast.clone();
            spawn_local(async move {
                TimeoutFuture::new(3000).await;
                toast.set(None);
            });
        })
    };

    let api = ApiClient::new(set_loading, show_toast.clone());
    let calendar = use_calendar(&api);

    // Add mode resolves its pre-fill here: explicit target date, else
    // the current selection, else today.
    let open_add_modal = {
        let form_mode = form_mode.clone();
        let selected_date = calendar.state.selected_date.clone();
        let today = calendar.state.today.clone();
        Callback::from(move |target: Option<String>| {
            let date = target
                .or_else(|| selected_date.clone())
                .unwrap_or_else(|| today.clone());
            form_mode.set(FormMode::Add { date });
        })
    };

    // Edit mode refetches the day's list and picks the record out of
    // it; a vanished id aborts with a toast instead of opening.
    let open_edit_modal = {
        let api = api.clone();
        let form_mode = form_mode.clone();
        let show_toast = show_toast.clone();
        let selected_date = calendar.state.selected_date.clone();
        Callback::from(move |id: i64| {
            let Some(date) = selected_date.clone() else {
                return;
            };
            let api = api.clone();
            let form_mode = form_mode.clone();
            let show_toast = show_toast.clone();
            spawn_local(async move {
                match api.get_events(&date).await {
                    Ok(events) => match events.into_iter().find(|event| event.id == id) {
                        Some(event) => form_mode.set(FormMode::Edit { event }),
                        None => show_toast.emit(Toast::error("Event not found")),
                    },
                    Err(e) => gloo::console::error!("failed to load event for editing:", e),
                }
            });
        })
    };

    let delete_event = {
        let api = api.clone();
        let show_toast = show_toast.clone();
        let refresh = calendar.actions.refresh.clone();
        Callback::from(move |event: EventRecord| {
            let prompt = format!("Are you sure you want to delete \"{}\"?", event.title);
            if !gloo::dialogs::confirm(&prompt) {
                return;
            }
            let api = api.clone();
            let show_toast = show_toast.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                match api.delete_event(event.id).await {
                    Ok(()) => {
                        show_toast.emit(Toast::success("Event deleted"));
                        refresh.emit(());
                    }
                    // ApiClient already surfaced the generic toast
                    Err(e) => gloo::console::error!("failed to delete event:", e),
                }
            });
        })
    };

    let close_form = {
        let form_mode = form_mode.clone();
        Callback::from(move |_| form_mode.set(FormMode::Closed))
    };
    let close_search = {
        let search_open = search_open.clone();
        Callback::from(move |_| search_open.set(false))
    };
    let open_search = {
        let search_open = search_open.clone();
        Callback::from(move |_: MouseEvent| search_open.set(true))
    };

    let on_search_pick = {
        let search_open = search_open.clone();
        let go_to_event = calendar.actions.go_to_event.clone();
        Callback::from(move |event: EventRecord| {
            search_open.set(false);
            go_to_event.emit(event);
        })
    };

    // Document-level shortcuts: Escape closes any open modal, Ctrl+N
    // opens the add modal, Ctrl+F opens search. Recreated when the
    // selection changes so Ctrl+N pre-fills the current day.
    use_effect_with(calendar.state.selected_date.clone(), {
        let form_mode = form_mode.clone();
        let search_open = search_open.clone();
        let open_add_modal = open_add_modal.clone();
        move |_| {
            let document = gloo::utils::document();
            let listener = EventListener::new(&document, "keydown", move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                match event.key().as_str() {
                    "Escape" => {
                        form_mode.set(FormMode::Closed);
                        search_open.set(false);
                    }
                    "n" if event.ctrl_key() => {
                        event.prevent_default();
                        open_add_modal.emit(None);
                    }
                    "f" if event.ctrl_key() => {
                        event.prevent_default();
                        search_open.set(true);
                    }
                    _ => {}
                }
            });
            move || drop(listener)
        }
    });

    let open_add_plain = {
        let open_add_modal = open_add_modal.clone();
        Callback::from(move |_: MouseEvent| open_add_modal.emit(None))
    };

    let selected_label = calendar
        .state
        .selected_date
        .as_deref()
        .map(format_long_date)
        .unwrap_or_else(|| "Select a day".to_string());

    html! {
        <>
            <header class="header">
                <div class="container">
                    <h1>{"Calendar"}</h1>
                    <div class="header-actions">
                        <button class="btn btn-secondary" onclick={calendar.actions.go_to_today.clone()}>
                            {"Today"}
                        </button>
                        <button class="btn btn-secondary" onclick={open_search}>
                            {"Search"}
                        </button>
                        <button class="btn btn-primary" onclick={open_add_plain}>
                            {"Add event"}
                        </button>
                    </div>
                </div>
            </header>

            <main class="main">
                <div class="container">
                    <section class="calendar-section">
                        <div class="calendar-header">
                            <button class="calendar-nav-btn" onclick={calendar.actions.prev_month.clone()}>
                                {"‹"}
                            </button>
                            <h2 class="calendar-title">
                                {format!("{} {}", month_name(calendar.state.month), calendar.state.year)}
                            </h2>
                            <button class="calendar-nav-btn" onclick={calendar.actions.next_month.clone()}>
                                {"›"}
                            </button>
                        </div>

                        {if let Some(data) = calendar.state.calendar.as_ref() {
                            html! {
                                <Calendar
                                    year={calendar.state.year}
                                    month={calendar.state.month}
                                    data={data.clone()}
                                    today={calendar.state.today.clone()}
                                    selected_date={calendar.state.selected_date.clone()}
                                    on_select={calendar.actions.select_date.clone()}
                                />
                            }
                        } else {
                            html! { <div class="loading">{"Loading calendar..."}</div> }
                        }}
                    </section>

                    <aside class="events-section">
                        <h2 class="selected-date">{selected_label}</h2>
                        <EventPanel
                            selected_date={calendar.state.selected_date.clone()}
                            events={calendar.state.selected_events.clone()}
                            on_add={open_add_modal.clone()}
                            on_edit={open_edit_modal}
                            on_delete={delete_event}
                        />
                    </aside>
                </div>
            </main>

            <EventFormModal
                mode={(*form_mode).clone()}
                api={api.clone()}
                toast={show_toast.clone()}
                on_close={close_form}
                on_saved={calendar.actions.refresh.clone()}
            />

            <SearchModal
                is_open={*search_open}
                api={api.clone()}
                on_close={close_search}
                on_pick={on_search_pick}
            />

            <ToastView toast={(*toast).clone()} />

            {if *loading {
                html! {
                    <div class="loading-overlay">
                        <div class="spinner"></div>
                    </div>
                }
            } else {
                html! {}
            }}
        </>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
