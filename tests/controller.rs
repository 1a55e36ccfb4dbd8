use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDateTime;
use pushkind_review::domain::application::{Application, ReviewStatus};
use pushkind_review::domain::control::Control;
use pushkind_review::domain::query::{ParamsUpdate, QueryField, decode_pairs};
use pushkind_review::domain::types::ApplicationId;
use pushkind_review::dto::remote::{RemotePage, RemoteQueryInput};
use pushkind_review::models::config::{ControllerOptions, SearchPagePolicy};
use pushkind_review::models::event::{ListEvent, ListEventSink};
use pushkind_review::navigation::{MemoryNavigator, Navigator};
use pushkind_review::remote::{RemoteError, RemoteQuery, RemoteResult};
use pushkind_review::services::{applications, controls};

const SETTLE: Duration = Duration::from_millis(601);

#[derive(Default)]
struct FakeRemote {
    calls: Mutex<Vec<RemoteQueryInput>>,
    total: usize,
    fail: bool,
}

impl FakeRemote {
    fn with_total(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<RemoteQueryInput> {
        self.calls.lock().unwrap().clone()
    }
}

fn application(id: i64) -> Application {
    Application {
        id: ApplicationId::new(id).unwrap(),
        name: format!("Application {id}"),
        company: None,
        email: None,
        status: ReviewStatus::Submitted,
        created_at: NaiveDateTime::default(),
        updated_at: NaiveDateTime::default(),
    }
}

impl RemoteQuery for FakeRemote {
    type Item = Application;

    async fn query(&self, input: &RemoteQueryInput) -> RemoteResult<RemotePage<Application>> {
        self.calls.lock().unwrap().push(input.clone());
        if self.fail {
            return Err(RemoteError::Status {
                status: 502,
                message: "bad gateway".to_string(),
            });
        }
        let items = (1..=input.page_size as i64).map(application).collect();
        Ok(RemotePage::new(self.total, items))
    }
}

struct EmptyControls;

impl RemoteQuery for EmptyControls {
    type Item = Control;

    async fn query(&self, _input: &RemoteQueryInput) -> RemoteResult<RemotePage<Control>> {
        Ok(RemotePage::empty())
    }
}

fn recorder() -> (Arc<Mutex<Vec<ListEvent>>>, Arc<dyn ListEventSink>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let dispatch: Arc<dyn ListEventSink> =
        Arc::new(move |event: ListEvent| sink.lock().unwrap().push(event));
    (events, dispatch)
}

fn options(policy: SearchPagePolicy) -> ControllerOptions {
    ControllerOptions {
        search_page_policy: policy,
        ..ControllerOptions::default()
    }
}

fn param(navigator: &MemoryNavigator, name: &str) -> Option<String> {
    decode_pairs(&navigator.location().query)
        .into_iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value)
}

#[test]
fn read_defaults_malformed_page() {
    let navigator = Arc::new(MemoryNavigator::new("/applications?appPage=abc&appSortBy=name"));
    let (_, events) = recorder();
    let controller = applications::controller(
        ControllerOptions::default(),
        navigator,
        FakeRemote::default(),
        events,
    );

    let state = controller.read();

    assert_eq!(state.page, 1);
    assert_eq!(state.sort_by, "name");
    assert_eq!(state.sort_order.as_str(), "desc");
    assert_eq!(state.page_size, 10);
    assert_eq!(state.search_term, None);
}

#[test]
fn cleared_param_reads_as_default_without_new_history() {
    let navigator = Arc::new(MemoryNavigator::new(
        "/applications?appSortBy=name&appSortOrder=asc&appPageSize=50",
    ));
    let (_, events) = recorder();
    let controller = applications::controller(
        ControllerOptions::default(),
        Arc::clone(&navigator),
        FakeRemote::default(),
        events,
    );

    controller.update_params(
        ParamsUpdate::new()
            .remove(QueryField::SortBy)
            .set_opt::<u32>(QueryField::PageSize, None),
    );
    controller.go_to_page(3);

    let state = controller.read();
    assert_eq!(state.sort_by, "created_at");
    assert_eq!(state.page_size, 10);
    assert_eq!(state.page, 3);
    assert_eq!(navigator.location().query, "appSortOrder=asc&appPage=3");
    assert_eq!(navigator.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn rapid_typing_updates_url_once() {
    let navigator = Arc::new(MemoryNavigator::new("/applications?appPage=2"));
    let (_, events) = recorder();
    let mut controller = applications::controller(
        ControllerOptions::default(),
        Arc::clone(&navigator),
        FakeRemote::default(),
        events,
    );

    for term in ["w", "wi", "wid", "widg"] {
        controller.set_search_term(term);
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert_eq!(navigator.replacements(), 0);
    assert!(controller.has_pending_search());

    tokio::time::sleep(SETTLE).await;

    assert_eq!(navigator.replacements(), 1);
    assert_eq!(param(&navigator, "appSearch").as_deref(), Some("widg"));
    assert_eq!(navigator.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn search_with_sentinel_then_clear_restores_page() {
    let navigator = Arc::new(MemoryNavigator::new("/applications?appPage=4"));
    let remote = Arc::new(FakeRemote::with_total(3));
    let (_, events) = recorder();
    let mut controller = applications::controller(
        options(SearchPagePolicy::Sentinel),
        Arc::clone(&navigator),
        Arc::clone(&remote),
        events,
    );

    controller.set_search_term("widget");
    tokio::time::sleep(SETTLE).await;

    assert_eq!(param(&navigator, "appSearch").as_deref(), Some("widget"));
    assert_eq!(param(&navigator, "appSearchBy").as_deref(), Some("name"));
    assert_eq!(param(&navigator, "appPage").as_deref(), Some("-1"));
    assert_eq!(controller.remembered_page(), Some(4));

    let view = controller.load().await;
    assert_eq!(view.state.page, 1);
    let calls = remote.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].page, 1);
    assert_eq!(calls[0].search.as_deref(), Some("widget"));
    assert_eq!(calls[0].search_by.as_deref(), Some("name"));
    drop(view);

    controller.set_search_term("");
    tokio::time::sleep(SETTLE).await;

    assert_eq!(param(&navigator, "appSearch"), None);
    assert_eq!(param(&navigator, "appSearchBy"), None);
    assert_eq!(param(&navigator, "appPage").as_deref(), Some("4"));
    assert_eq!(controller.remembered_page(), None);
}

#[tokio::test(start_paused = true)]
async fn search_resets_to_first_page_by_default() {
    let navigator = Arc::new(MemoryNavigator::new("/applications?appPage=3"));
    let (_, events) = recorder();
    let mut controller = applications::controller(
        ControllerOptions::default(),
        Arc::clone(&navigator),
        FakeRemote::default(),
        events,
    );

    controller.set_search_term("foo");
    tokio::time::sleep(SETTLE).await;
    assert_eq!(param(&navigator, "appPage").as_deref(), Some("1"));

    // Paging through results and refining the term keeps the original page.
    controller.go_to_page(2);
    controller.set_search_term("food");
    tokio::time::sleep(SETTLE).await;
    assert_eq!(param(&navigator, "appPage").as_deref(), Some("1"));
    assert_eq!(param(&navigator, "appSearch").as_deref(), Some("food"));

    controller.set_search_term("   ");
    tokio::time::sleep(SETTLE).await;

    assert_eq!(param(&navigator, "appPage").as_deref(), Some("3"));
    assert_eq!(param(&navigator, "appSearch"), None);
}

#[tokio::test(start_paused = true)]
async fn clearing_search_after_reload_lands_on_first_page() {
    let navigator = Arc::new(MemoryNavigator::new(
        "/applications?appSearch=foo&appSearchBy=name&appPage=5",
    ));
    let (_, events) = recorder();
    let mut controller = applications::controller(
        ControllerOptions::default(),
        Arc::clone(&navigator),
        FakeRemote::default(),
        events,
    );
    assert_eq!(controller.search_input(), "foo");

    controller.set_search_term("");
    tokio::time::sleep(SETTLE).await;

    assert_eq!(navigator.location().query, "appPage=1");
}

#[tokio::test(start_paused = true)]
async fn refining_search_after_reload_does_not_remember_result_page() {
    let navigator = Arc::new(MemoryNavigator::new(
        "/applications?appSearch=foo&appSearchBy=name&appPage=5",
    ));
    let (_, events) = recorder();
    let mut controller = applications::controller(
        ControllerOptions::default(),
        Arc::clone(&navigator),
        FakeRemote::default(),
        events,
    );

    controller.set_search_term("food");
    tokio::time::sleep(SETTLE).await;
    assert_eq!(param(&navigator, "appSearch").as_deref(), Some("food"));
    assert_eq!(controller.remembered_page(), None);

    controller.set_search_term("");
    tokio::time::sleep(SETTLE).await;

    assert_eq!(navigator.location().query, "appPage=1");
}

#[tokio::test(start_paused = true)]
async fn search_erased_before_settling_keeps_page() {
    let navigator = Arc::new(MemoryNavigator::new("/applications?appPage=4"));
    let (_, events) = recorder();
    let mut controller = applications::controller(
        ControllerOptions::default(),
        Arc::clone(&navigator),
        FakeRemote::default(),
        events,
    );

    controller.set_search_term("a");
    tokio::time::sleep(Duration::from_millis(100)).await;
    controller.set_search_term("");
    tokio::time::sleep(SETTLE).await;

    assert_eq!(navigator.location().query, "appPage=4");
    assert_eq!(navigator.replacements(), 0);
    assert_eq!(controller.read().page, 4);
}

#[tokio::test(start_paused = true)]
async fn teardown_cancels_pending_search() {
    let navigator = Arc::new(MemoryNavigator::new("/applications"));
    let (_, events) = recorder();
    let mut controller = applications::controller(
        ControllerOptions::default(),
        Arc::clone(&navigator),
        FakeRemote::default(),
        events,
    );

    controller.set_search_term("widget");
    tokio::time::sleep(Duration::from_millis(300)).await;
    controller.teardown();
    tokio::time::sleep(SETTLE).await;

    assert_eq!(navigator.replacements(), 0);
    assert_eq!(navigator.location().query, "");
}

#[tokio::test]
async fn load_builds_view_model_and_dispatches() {
    let navigator = Arc::new(MemoryNavigator::new("/applications?appPage=2&appPageSize=5"));
    let (events, sink) = recorder();
    let controller = applications::controller(
        ControllerOptions::default(),
        Arc::clone(&navigator),
        FakeRemote::with_total(23),
        sink,
    );

    let loading = controller.loading_view();
    assert!(loading.is_loading());
    assert!(loading.pagination().is_none());

    let view = controller.load().await;
    assert!(!view.is_loading());
    assert!(!view.is_error());
    let data = view.data().expect("page loaded");
    assert_eq!(data.items.len(), 5);
    let pager = view.pagination().expect("pager available");
    assert_eq!(pager.total_pages, 5);
    assert_eq!(pager.page, 2);

    view.go_to_page(3);
    assert_eq!(navigator.location().query, "appPage=3&appPageSize=5");
    assert_eq!(
        *events.lock().unwrap(),
        vec![ListEvent::ResultsLoaded {
            entity: "app".to_string(),
            total: 23
        }]
    );
}

#[tokio::test]
async fn fetch_failure_is_reported_not_raised() {
    let navigator = Arc::new(MemoryNavigator::new("/applications"));
    let (events, sink) = recorder();
    let remote = Arc::new(FakeRemote::failing());
    let controller = applications::controller(
        ControllerOptions::default(),
        navigator,
        Arc::clone(&remote),
        sink,
    );

    let view = controller.load().await;

    assert!(view.is_error());
    assert!(matches!(
        view.error(),
        Some(RemoteError::Status { status: 502, .. })
    ));
    assert!(view.data().is_none());
    assert_eq!(remote.calls().len(), 1);
    assert!(events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn fetch_is_skipped_without_sort_key() {
    let navigator = Arc::new(MemoryNavigator::new("/applications"));
    let (_, events) = recorder();
    let remote = Arc::new(FakeRemote::default());
    let controller = applications::controller(
        ControllerOptions::default(),
        navigator,
        Arc::clone(&remote),
        events,
    );
    let mut state = controller.read();
    state.sort_by.clear();

    let status = controller.fetch(&state).await;

    assert!(!status.is_loading());
    assert!(status.data().is_none());
    assert!(remote.calls().is_empty());
}

#[test]
fn lists_share_a_url_without_collision() {
    let navigator = Arc::new(MemoryNavigator::new("/review?appPage=2&controlsPage=7"));
    let (_, events) = recorder();
    let apps = applications::controller(
        ControllerOptions::default(),
        Arc::clone(&navigator),
        FakeRemote::default(),
        Arc::clone(&events),
    );
    let checklist = controls::controller(
        ControllerOptions::default(),
        Arc::clone(&navigator),
        EmptyControls,
        events,
    );

    apps.go_to_page(3);
    checklist.update_params(ParamsUpdate::new().set(QueryField::SortBy, "category"));

    assert_eq!(apps.read().page, 3);
    assert_eq!(apps.read().sort_by, "created_at");
    assert_eq!(checklist.read().page, 7);
    assert_eq!(checklist.read().sort_by, "category");
    assert_eq!(
        navigator.location().query,
        "appPage=3&controlsPage=7&controlsSortBy=category"
    );
}
