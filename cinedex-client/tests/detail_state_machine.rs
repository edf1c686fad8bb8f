use std::sync::Arc;
use std::time::Duration;

use cinedex_client::{DetailState, MovieDetailModel};
use cinedex_core::catalog::mock::{CatalogCall, MockCatalog};
use cinedex_core::{CatalogClient, CatalogError};
use cinedex_core::model::MovieId;
use parking_lot::Mutex;
use tokio::time::sleep;

fn detail_model(id: u64) -> (Arc<MockCatalog>, MovieDetailModel) {
    let catalog = Arc::new(MockCatalog::new());
    let model = MovieDetailModel::new(
        MovieId(id),
        Arc::clone(&catalog) as Arc<dyn CatalogClient>,
    );
    (catalog, model)
}

#[tokio::test(start_paused = true)]
async fn starts_idle_without_fetching() {
    let (catalog, model) = detail_model(1);

    assert_eq!(model.state(), DetailState::Idle);
    assert!(catalog.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn first_observation_loads_once() {
    let (catalog, model) = detail_model(1);
    catalog.push_detail(Ok(MockCatalog::detail(1, "Test Movie")));

    let transitions = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&transitions);
    model.subscribe(move |state: &DetailState| sink.lock().push(state.clone()));

    assert!(model.ensure_loaded().await);
    assert!(!model.ensure_loaded().await);

    let expected = DetailState::Loaded(Box::new(MockCatalog::detail(1, "Test Movie")));
    assert_eq!(model.state(), expected);
    assert_eq!(catalog.calls(), vec![CatalogCall::Detail(MovieId(1))]);
    assert_eq!(*transitions.lock(), vec![DetailState::Loading, expected]);
}

#[tokio::test(start_paused = true)]
async fn loaded_detail_formats_for_display() {
    let (catalog, model) = detail_model(42);
    catalog.push_detail(Ok(MockCatalog::detail(42, "Runtime Check")));

    model.ensure_loaded().await;

    let state = model.state();
    let detail = state.detail().expect("detail should be loaded");
    assert_eq!(detail.title(), "Runtime Check");
    assert_eq!(detail.formatted_runtime(), "2h 1m");
    assert_eq!(detail.formatted_release_date(), "January 1, 2023");
    assert_eq!(detail.genres_text(), "No genres");
}

#[tokio::test(start_paused = true)]
async fn failure_reports_user_message() {
    let (catalog, model) = detail_model(7);
    catalog.push_detail(Err(CatalogError::BadStatus(404)));

    model.ensure_loaded().await;

    assert_eq!(
        model.state(),
        DetailState::Failed("Invalid response from the server (status 404)".into())
    );
}

#[tokio::test(start_paused = true)]
async fn ensure_loaded_does_not_retry_after_failure() {
    let (catalog, model) = detail_model(7);
    catalog.push_detail(Err(CatalogError::Transport("offline".into())));

    assert!(model.ensure_loaded().await);
    assert!(!model.ensure_loaded().await);
    assert_eq!(catalog.calls().len(), 1);
    assert!(model.state().error().unwrap().contains("Network"));
}

#[tokio::test(start_paused = true)]
async fn explicit_load_retries_after_failure() {
    let (catalog, model) = detail_model(3);
    catalog.push_detail(Err(CatalogError::Transport("offline".into())));
    catalog.push_detail(Ok(MockCatalog::detail(3, "Second Try")));

    model.ensure_loaded().await;
    assert!(model.state().error().is_some());

    model.load().await;

    assert_eq!(model.state().detail().map(|d| d.title().to_string()), Some("Second Try".into()));
    assert_eq!(
        catalog.calls(),
        vec![CatalogCall::Detail(MovieId(3)), CatalogCall::Detail(MovieId(3))]
    );
}

#[tokio::test(start_paused = true)]
async fn later_load_wins_over_slow_earlier_one() {
    let (catalog, model) = detail_model(5);
    catalog.push_detail_after(
        Duration::from_millis(400),
        Ok(MockCatalog::detail(5, "Old Copy")),
    );
    catalog.push_detail_after(
        Duration::from_millis(10),
        Ok(MockCatalog::detail(5, "New Copy")),
    );

    tokio::join!(model.load(), async {
        sleep(Duration::from_millis(20)).await;
        model.load().await;
    });

    assert_eq!(
        model.state().detail().map(|d| d.title().to_string()),
        Some("New Copy".into())
    );
}

#[tokio::test(start_paused = true)]
async fn close_discards_in_flight_result() {
    let (catalog, model) = detail_model(9);
    catalog.push_detail_after(
        Duration::from_millis(100),
        Ok(MockCatalog::detail(9, "Never Shown")),
    );

    tokio::join!(model.ensure_loaded(), async {
        sleep(Duration::from_millis(10)).await;
        model.close();
    });

    assert_eq!(model.state(), DetailState::Loading);
}

#[tokio::test(start_paused = true)]
async fn closed_session_does_not_fetch() {
    let (catalog, model) = detail_model(11);
    model.close();

    assert!(!model.ensure_loaded().await);
    model.load().await;

    assert!(catalog.calls().is_empty());
    assert_eq!(model.state(), DetailState::Idle);
}
