#![allow(dead_code)]

use switchyard::{Args, Next, RouterBuilder, testing::{Recorder, TestRequest}};

pub type Builder = RouterBuilder<TestRequest, Recorder>;
pub type Continue = Next<TestRequest, Recorder>;

// ============================================================================
// Test Requests
// ============================================================================

pub fn get(path: &str) -> TestRequest {
    TestRequest::get(path)
}

pub fn post(path: &str) -> TestRequest {
    TestRequest::post(path)
}

pub fn accepting(method: &str, path: &str, accept: &str) -> TestRequest {
    TestRequest::new(method, path).with_header("Accept", accept)
}

// ============================================================================
// Test Handlers
// ============================================================================

/// Register a middleware that records `label` and continues.
pub fn pass(builder: &mut Builder, label: &'static str) {
    builder.use_all(move |req, res: Recorder, next: Continue, _args: Args| async move {
        res.record(label);
        next.run(req, res).await
    });
}

/// Register a middleware that records `label` and stops.
pub fn stop(builder: &mut Builder, label: &'static str) {
    builder.use_all(move |_req, res: Recorder, _next, _args| async move {
        res.record(label);
    });
}

/// Dispatch `req` and return what the handlers recorded.
pub async fn run(builder: Builder, req: TestRequest) -> Vec<String> {
    let res = Recorder::new();
    builder
        .build()
        .into_dispatcher()
        .dispatch(req, res.clone())
        .await
        .expect("dispatch failed");
    res.entries()
}
