//! Query dispatcher: form -> request -> backend -> rendered markup

mod form;
mod generation;
mod view;

pub use form::{SearchForm, EMPTY_QUERY_MESSAGE};
pub use generation::{RequestGeneration, Ticket};
pub use view::{MemoryNotifier, MemorySink, Notifier, ResultsSink};

use client::SearchBackend;
use config::SearchDefaults;
use render::Format;
use std::sync::{Mutex, MutexGuard};

/// What happened to a single search action
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Input rejected; the user was alerted and nothing was sent.
    Rejected { message: String },
    /// Results (possibly zero) were rendered.
    Rendered { count: usize },
    /// The request failed and the error was rendered.
    Failed { message: String },
    /// A newer search started before this one finished; output discarded.
    Superseded,
}

pub struct Dispatcher<B> {
    backend: B,
    defaults: SearchDefaults,
    format: Format,
    generation: RequestGeneration,
    // Held across "is this ticket current" and the sink write.
    render_lock: Mutex<()>,
}

impl<B: SearchBackend> Dispatcher<B> {
    pub fn new(backend: B, defaults: SearchDefaults) -> Self {
        Self {
            backend,
            defaults,
            format: Format::default(),
            generation: RequestGeneration::new(),
            render_lock: Mutex::new(()),
        }
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    fn lock_render(&self) -> MutexGuard<'_, ()> {
        self.render_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn perform_search(
        &self,
        form: &SearchForm,
        sink: &dyn ResultsSink,
        notifier: &dyn Notifier,
    ) -> SearchOutcome {
        let request = match form.to_request(&self.defaults) {
            Ok(r) => r,
            Err(e) => {
                let message = e.to_string();
                notifier.alert(&message);
                return SearchOutcome::Rejected { message };
            }
        };

        let ticket = {
            let _guard = self.lock_render();
            let ticket = self.generation.begin();
            sink.set_html(render::SEARCHING);
            ticket
        };

        let (html, outcome) = match self.backend.search(&request) {
            Ok(results) => (
                self.format.results(&results),
                SearchOutcome::Rendered {
                    count: results.len(),
                },
            ),
            Err(e) => {
                tracing::error!(error = %e, query = %request.text, "search failed");
                let message = e.to_string();
                (
                    self.format.error(&message),
                    SearchOutcome::Failed { message },
                )
            }
        };

        let _guard = self.lock_render();
        if !self.generation.is_current(ticket) {
            tracing::debug!(ticket = ticket.id(), "discarding stale search response");
            return SearchOutcome::Superseded;
        }

        sink.set_html(&html);
        outcome
    }
}
