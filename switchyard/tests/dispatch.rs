mod common;

use common::{Builder, Continue, get, pass, run, stop};
use std::time::Duration;
use switchyard::{
    BoxError, DispatchError, LoggingHandler, RouteEntry, SwitchyardError,
    testing::{CountingHandler, Recorder},
};

#[tokio::test]
async fn test_stop_skips_every_later_entry() {
    let mut builder = Builder::new();
    stop(&mut builder, "one");
    pass(&mut builder, "two");
    pass(&mut builder, "three");

    assert_eq!(run(builder, get("/")).await, vec!["one"]);
}

#[tokio::test]
async fn test_continue_preserves_registration_order() {
    let mut builder = Builder::new();
    pass(&mut builder, "one");
    pass(&mut builder, "two");
    stop(&mut builder, "three");

    assert_eq!(run(builder, get("/")).await, vec!["one", "two", "three"]);
}

#[tokio::test]
async fn test_non_matching_entries_are_skipped() {
    let mut builder = Builder::new();
    pass(&mut builder, "first");
    builder
        .post("/", |_req, res: Recorder, _next, _args| async move {
            res.record("post");
        })
        .unwrap();
    builder
        .get("/", |_req, res: Recorder, _next, _args| async move {
            res.record("get");
        })
        .unwrap();

    assert_eq!(run(builder, get("/")).await, vec!["first", "get"]);
}

#[tokio::test]
async fn test_work_after_next_runs_after_downstream() {
    let mut builder = Builder::new();
    builder.use_all(|req, res: Recorder, next: Continue, _args| async move {
        res.record("before");
        let downstream = res.clone();
        next.run(req, res).await?;
        downstream.record("after");
        Ok::<(), BoxError>(())
    });
    stop(&mut builder, "inner");

    assert_eq!(run(builder, get("/")).await, vec!["before", "inner", "after"]);
}

#[tokio::test]
async fn test_handler_may_suspend_before_continuing() {
    let mut builder = Builder::new();
    builder.use_all(|req, res: Recorder, next: Continue, _args| async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        res.record("slept");
        next.run(req, res).await
    });
    stop(&mut builder, "done");

    assert_eq!(run(builder, get("/")).await, vec!["slept", "done"]);
}

#[tokio::test]
async fn test_error_is_terminal_and_observable() {
    let mut builder = Builder::new();
    pass(&mut builder, "one");
    builder.use_all(|_req, _res, _next, _args| async move {
        Err::<(), BoxError>("boom".into())
    });
    pass(&mut builder, "never");

    let res = Recorder::new();
    let err = builder
        .build()
        .into_dispatcher()
        .dispatch(get("/"), res.clone())
        .await
        .unwrap_err();

    assert_eq!(res.entries(), vec!["one"]);
    let DispatchError::Handler(source) = &err;
    assert_eq!(source.to_string(), "boom");

    let top: SwitchyardError = err.into();
    assert!(matches!(top, SwitchyardError::Dispatch(_)));
}

#[tokio::test]
async fn test_fallback_after_exhaustion() {
    let mut builder = Builder::new();
    pass(&mut builder, "mw");
    let dispatcher = builder.build().into_dispatcher().with_fallback(
        |_req, res: Recorder, _next, _args| async move {
            res.record("not found");
        },
    );

    let res = Recorder::new();
    dispatcher.dispatch(get("/nope"), res.clone()).await.unwrap();
    assert_eq!(res.entries(), vec!["mw", "not found"]);
}

#[tokio::test]
async fn test_struct_handlers() {
    let counter = CountingHandler::new();
    let mut builder = Builder::new();
    builder.add(RouteEntry::new(LoggingHandler));
    builder.add(RouteEntry::new(counter.clone()));
    stop(&mut builder, "end");

    assert_eq!(run(builder, get("/")).await, vec!["end"]);
    assert_eq!(counter.count(), 1);
}

#[tokio::test]
async fn test_router_is_reusable_across_requests() {
    let counter = CountingHandler::new();
    let mut builder = Builder::new();
    builder.add(RouteEntry::new(counter.clone()));
    let dispatcher = builder.build().into_dispatcher();

    for _ in 0..3 {
        dispatcher.dispatch(get("/"), Recorder::new()).await.unwrap();
    }
    assert_eq!(counter.count(), 3);
}
