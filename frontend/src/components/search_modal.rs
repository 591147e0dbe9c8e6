use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use shared::EventRecord;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::date_utils::format_short_date;

/// Quiet period a keystroke burst has to outlast before a search fires.
pub const DEBOUNCE_MS: u32 = 300;
/// Shortest query that is allowed to reach the server.
pub const MIN_QUERY_LEN: usize = 2;

const PROMPT_HINT: &str = "Type a phrase to search events";
const TOO_SHORT_HINT: &str = "Type at least 2 characters";
const NO_MATCHES_HINT: &str = "No events found";

/// Gate applied before scheduling a request: trims the input and
/// rejects anything shorter than `MIN_QUERY_LEN`.
pub fn search_query(input: &str) -> Option<String> {
    let query = input.trim();
    if query.chars().count() < MIN_QUERY_LEN {
        return None;
    }
    Some(query.to_string())
}

/// A single cancellable timer. Scheduling drops any pending timeout,
/// so within a burst only the last schedule ever fires.
#[derive(Clone, Default)]
pub struct Debouncer {
    timer: Rc<RefCell<Option<Timeout>>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule<F: FnOnce() + 'static>(&self, delay_ms: u32, action: F) {
        let timer = self.timer.clone();
        let handle = Timeout::new(delay_ms, move || {
            timer.borrow_mut().take();
            action();
        });
        // dropping the previous handle cancels it
        *self.timer.borrow_mut() = Some(handle);
    }

    pub fn cancel(&self) {
        self.timer.borrow_mut().take();
    }
}

/// What the results pane is currently showing.
#[derive(Clone, PartialEq)]
enum ResultsView {
    Hint(&'static str),
    Rows(Vec<EventRecord>),
}

#[derive(Properties, PartialEq)]
pub struct SearchModalProps {
    pub is_open: bool,
    pub api: ApiClient,
    pub on_close: Callback<()>,
    /// Fired with the picked result; the caller jumps the calendar there
    pub on_pick: Callback<EventRecord>,
}

#[function_component(SearchModal)]
pub fn search_modal(props: &SearchModalProps) -> Html {
    let query = use_state(String::new);
    let results = use_state(|| ResultsView::Hint(PROMPT_HINT));
    let debouncer = use_mut_ref(Debouncer::new);
    let input_ref = use_node_ref();

    // Reset the pane every time the modal opens; a pending timer from
    // a previous session must never fire into a fresh one.
    use_effect_with(props.is_open, {
        let query = query.clone();
        let results = results.clone();
        let debouncer = debouncer.clone();
        let input_ref = input_ref.clone();
        move |is_open| {
            debouncer.borrow().cancel();
            query.set(String::new());
            results.set(ResultsView::Hint(PROMPT_HINT));
            if *is_open {
                if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                    let _ = input.focus();
                }
            }
            || ()
        }
    });

    let on_input = {
        let query = query.clone();
        let results = results.clone();
        let debouncer = debouncer.clone();
        let api = props.api.clone();

        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let value = input.value();
            query.set(value.clone());

            let Some(needle) = search_query(&value) else {
                // short-circuit locally, no request
                debouncer.borrow().cancel();
                results.set(ResultsView::Hint(TOO_SHORT_HINT));
                return;
            };

            let api = api.clone();
            let results = results.clone();
            debouncer.borrow().schedule(DEBOUNCE_MS, move || {
                spawn_local(async move {
                    match api.search_events(&needle).await {
                        Ok(rows) if rows.is_empty() => {
                            results.set(ResultsView::Hint(NO_MATCHES_HINT));
                        }
                        Ok(rows) => results.set(ResultsView::Rows(rows)),
                        Err(e) => gloo::console::error!("search failed:", e),
                    }
                });
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

    if !props.is_open {
        return html! {};
    }

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal search-modal" onclick={on_modal_click}>
                <h3 class="modal-title">{"Search events"}</h3>
                <input
                    type="text"
                    class="search-input"
                    placeholder="Search..."
                    ref={input_ref.clone()}
                    value={(*query).clone()}
                    oninput={on_input}
                />
                <div class="search-results">
                    {match &*results {
                        ResultsView::Hint(hint) => html! {
                            <p class="search-placeholder">{*hint}</p>
                        },
                        ResultsView::Rows(rows) => html! {
                            <>
                                {for rows.iter().map(|event| render_result(event, &props.on_pick))}
                            </>
                        },
                    }}
                </div>
            </div>
        </div>
    }
}

fn render_result(event: &EventRecord, on_pick: &Callback<EventRecord>) -> Html {
    let onclick = {
        let on_pick = on_pick.clone();
        let event = event.clone();
        Callback::from(move |_: MouseEvent| on_pick.emit(event.clone()))
    };

    html! {
        <div class="search-result" {onclick}>
            <div class="search-result-date">
                {format!("{} at {}", format_short_date(&event.date), event.start_time)}
            </div>
            <div class="search-result-title">{&event.title}</div>
            {if let Some(description) = &event.description {
                html! { <div class="search-result-description">{description}</div> }
            } else {
                html! {}
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_queries_never_produce_a_request() {
        assert_eq!(search_query(""), None);
        assert_eq!(search_query("m"), None);
        assert_eq!(search_query("  m  "), None);
    }

    #[test]
    fn queries_are_trimmed_before_the_length_check() {
        assert_eq!(search_query("  me  "), Some("me".to_string()));
        assert_eq!(search_query("meeting"), Some("meeting".to_string()));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use gloo::timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn rapid_schedules_collapse_to_the_last_one() {
        let debouncer = Debouncer::new();
        let fired = Rc::new(RefCell::new(Vec::new()));

        for query in ["m", "me", "mee"] {
            let fired = fired.clone();
            debouncer.schedule(50, move || fired.borrow_mut().push(query));
        }
        TimeoutFuture::new(200).await;

        assert_eq!(*fired.borrow(), vec!["mee"]);
    }

    #[wasm_bindgen_test]
    async fn cancel_suppresses_a_pending_firing() {
        let debouncer = Debouncer::new();
        let fired = Rc::new(RefCell::new(0u32));

        {
            let fired = fired.clone();
            debouncer.schedule(50, move || *fired.borrow_mut() += 1);
        }
        debouncer.cancel();
        TimeoutFuture::new(200).await;

        assert_eq!(*fired.borrow(), 0);
    }
}
