//! Query-synced list controller.
//!
//! Keeps a list view's pagination, sort and search state in the navigable URL,
//! loads the matching page from the remote service and debounces search input
//! so the URL (and therefore the fetch) only changes once typing pauses.
//!
//! The only state held outside the URL is the page the user was on before a
//! search started. It lives as long as the controller and is lost on reload.
use std::sync::{Arc, Mutex, MutexGuard};

use crate::debounce::Debouncer;
use crate::domain::query::{
    FIRST_PAGE, ParamsUpdate, QueryField, QueryState, SEARCH_SENTINEL_PAGE, raw_page,
};
use crate::dto::remote::RemoteQueryInput;
use crate::dto::view::{FetchStatus, ParamWriter, ViewModel};
use crate::models::config::{ControllerOptions, EntityConfig, SearchPagePolicy};
use crate::models::event::{ListEvent, ListEventSink};
use crate::navigation::Navigator;
use crate::remote::RemoteQuery;

/// URL-facing half of the controller, shared with the debounce task.
struct QuerySync<N> {
    navigator: Arc<N>,
    config: EntityConfig,
    policy: SearchPagePolicy,
    mount_page: u32,
    remembered_page: Mutex<Option<u32>>,
}

impl<N: Navigator> QuerySync<N> {
    fn read(&self) -> QueryState {
        QueryState::read(&self.config, &self.navigator.location().query)
    }

    fn remembered(&self) -> MutexGuard<'_, Option<u32>> {
        self.remembered_page
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Applies a debounced search term to the URL.
    fn apply_search(&self, term: &str) {
        let term = term.trim();
        let query = self.navigator.location().query;
        let state = QueryState::read(&self.config, &query);

        if !term.is_empty() {
            // Only a page reached outside search mode is worth returning to.
            if !state.is_searching() {
                let mut remembered = self.remembered();
                if remembered.is_none() {
                    let page =
                        raw_page(&self.config.prefix, &query).unwrap_or(i64::from(FIRST_PAGE));
                    *remembered = u32::try_from(page).ok().filter(|page| *page >= FIRST_PAGE);
                }
            }

            let page = match self.policy {
                SearchPagePolicy::ResetToFirst => i64::from(FIRST_PAGE),
                SearchPagePolicy::Sentinel => SEARCH_SENTINEL_PAGE,
            };
            self.update_params(
                ParamsUpdate::new()
                    .set(QueryField::Search, term)
                    .set(QueryField::SearchBy, &state.search_field)
                    .set(QueryField::Page, page),
            );
            return;
        }

        let restored = self.remembered().take();
        if restored.is_none() && !state.is_searching() {
            return;
        }
        let page = restored.unwrap_or(self.mount_page);
        self.update_params(
            ParamsUpdate::new()
                .remove(QueryField::Search)
                .remove(QueryField::SearchBy)
                .set(QueryField::Page, page),
        );
    }
}

impl<N: Navigator> ParamWriter for QuerySync<N> {
    fn update_params(&self, update: ParamsUpdate) {
        if update.is_empty() {
            return;
        }
        let location = self.navigator.location();
        let query = update.apply(&self.config.prefix, &location.query);
        if query == location.query {
            return;
        }
        log::debug!("Replacing query of {}: {query}", location.path);
        self.navigator.replace_query(&query);
    }

    fn go_to_page(&self, page: u32) {
        self.update_params(ParamsUpdate::new().set(QueryField::Page, page));
    }
}

/// Generic list controller, instantiated once per entity.
pub struct ListController<N, R> {
    sync: Arc<QuerySync<N>>,
    remote: R,
    events: Arc<dyn ListEventSink>,
    debouncer: Debouncer,
    search_input: String,
}

impl<N, R> ListController<N, R>
where
    N: Navigator + 'static,
    R: RemoteQuery,
{
    pub fn new(
        config: EntityConfig,
        options: ControllerOptions,
        navigator: Arc<N>,
        remote: R,
        events: Arc<dyn ListEventSink>,
    ) -> Self {
        let mounted = QueryState::read(&config, &navigator.location().query);
        let mount_page = if mounted.is_searching() {
            FIRST_PAGE
        } else {
            mounted.page
        };

        Self {
            sync: Arc::new(QuerySync {
                navigator,
                config,
                policy: options.search_page_policy,
                mount_page,
                remembered_page: Mutex::new(None),
            }),
            remote,
            events,
            debouncer: Debouncer::new(options.debounce),
            search_input: mounted.search_term.unwrap_or_default(),
        }
    }

    pub fn config(&self) -> &EntityConfig {
        &self.sync.config
    }

    /// Current list state as encoded in the URL.
    pub fn read(&self) -> QueryState {
        self.sync.read()
    }

    /// Merges `update` into the URL, replacing the current history entry.
    pub fn update_params(&self, update: ParamsUpdate) {
        self.sync.update_params(update);
    }

    pub fn go_to_page(&self, page: u32) {
        self.sync.go_to_page(page);
    }

    /// Records a change of the search box; the URL follows once input settles.
    pub fn set_search_term(&mut self, term: &str) {
        if term == self.search_input {
            return;
        }
        self.search_input = term.to_string();

        let sync = Arc::clone(&self.sync);
        let term = term.to_string();
        self.debouncer.schedule(move || sync.apply_search(&term));
    }

    /// Latest value typed into the search box, applied or not.
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn has_pending_search(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Page to return to when the active search is cleared.
    pub fn remembered_page(&self) -> Option<u32> {
        *self.sync.remembered()
    }

    /// Loads the page described by `state` from the remote service.
    ///
    /// No request is made while the sort key is unset.
    pub async fn fetch(&self, state: &QueryState) -> FetchStatus<R::Item> {
        let entity = self.sync.config.prefix.as_str();
        if state.sort_by.trim().is_empty() {
            log::debug!("Skipping {entity} fetch without a sort key");
            return FetchStatus::Idle;
        }

        let input = RemoteQueryInput::from(state);
        match self.remote.query(&input).await {
            Ok(page) => {
                self.events.dispatch(ListEvent::ResultsLoaded {
                    entity: entity.to_string(),
                    total: page.total,
                });
                FetchStatus::Loaded(page)
            }
            Err(err) => {
                log::error!("Failed to load {entity} list: {err}");
                FetchStatus::Failed(err)
            }
        }
    }

    /// View model to render while a fetch is in flight.
    pub fn loading_view(&self) -> ViewModel<'_, R::Item> {
        ViewModel::new(self.read(), FetchStatus::Loading, &*self.sync)
    }

    /// Reads the URL, fetches the matching page and wraps both for rendering.
    pub async fn load(&self) -> ViewModel<'_, R::Item> {
        let state = self.read();
        let status = self.fetch(&state).await;
        ViewModel::new(state, status, &*self.sync)
    }

    /// Marks row `id` as the current selection in the shared dashboard state.
    pub fn select(&self, id: i64) {
        self.events.dispatch(ListEvent::Selected {
            entity: self.sync.config.prefix.to_string(),
            id,
        });
    }

    /// Cancels any pending search update. Called when the view goes away;
    /// dropping the controller has the same effect.
    pub fn teardown(&mut self) {
        self.debouncer.cancel();
    }
}
