//! Routing behavior, exercised through the public dispatch entry point
//! without a socket or a live upstream. Handlers here record that they ran,
//! standing in for the provider clients: a route miss must reach none of
//! them.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use http::{Method, StatusCode};

use wxrelay::{Request, Response, Router, respond};

/// A routing table shaped like the relay's, with counting stubs in place of
/// the provider calls.
fn counting_router() -> (Router, [Arc<AtomicUsize>; 4]) {
    let counters = [
        Arc::new(AtomicUsize::new(0)),
        Arc::new(AtomicUsize::new(0)),
        Arc::new(AtomicUsize::new(0)),
        Arc::new(AtomicUsize::new(0)),
    ];

    let stub = |counter: Arc<AtomicUsize>| {
        move |_req: Request| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Response::relay("{}".to_owned())
            }
        }
    };

    let router = Router::new()
        .get("/", stub(Arc::clone(&counters[0])))
        .get("/historic", stub(Arc::clone(&counters[1])))
        .get("/station-data", stub(Arc::clone(&counters[2])))
        .get("/forecast", stub(Arc::clone(&counters[3])));

    (router, counters)
}

#[tokio::test]
async fn station_data_route_reaches_only_its_handler() {
    let (router, counters) = counting_router();

    let response = respond(&router, Method::GET, "/station-data".to_owned()).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let counts: Vec<usize> = counters.iter().map(|c| c.load(Ordering::SeqCst)).collect();
    assert_eq!(counts, [0, 0, 1, 0]);
}

#[tokio::test]
async fn root_route_reaches_current_weather() {
    let (router, counters) = counting_router();

    let response = respond(&router, Method::GET, "/".to_owned()).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(counters[0].load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unknown_path_is_not_found_and_reaches_no_handler() {
    let (router, counters) = counting_router();

    let response = respond(&router, Method::GET, "/unknown".to_owned()).await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert!(response.body().is_empty());
    assert!(counters.iter().all(|c| c.load(Ordering::SeqCst) == 0));
}

#[tokio::test]
async fn post_to_known_path_is_not_found() {
    let (router, counters) = counting_router();

    let response = respond(&router, Method::POST, "/".to_owned()).await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert!(counters.iter().all(|c| c.load(Ordering::SeqCst) == 0));
}
