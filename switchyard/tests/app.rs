mod common;

use common::{Continue, get};
use switchyard::{App, Args, Request, Settings, testing::{Recorder, TestRequest}};

#[tokio::test]
async fn test_app_dispatches_in_registration_order() {
    let mut app = App::<TestRequest, Recorder>::new();
    app.use_all(|req, res: Recorder, next: Continue, _args| async move {
        res.record("log");
        next.run(req, res).await
    });
    app.param("id", |req, res: Recorder, next: Continue, args: Args| async move {
        res.record(format!("query id {}", args[0]));
        next.run(req, res).await
    })
    .unwrap();
    app.route("/user/:id")
        .unwrap()
        .get(|req, res: Recorder, _next, _args| async move {
            res.record(format!("show {}", req.param("id").unwrap_or_default()));
        })
        .put(|_req, res: Recorder, _next, _args| async move {
            res.record("update");
        });

    let (dispatcher, _) = app.into_dispatcher();
    let res = Recorder::new();
    dispatcher
        .dispatch(get("/user/3").with_param("id", "q"), res.clone())
        .await
        .unwrap();
    assert_eq!(res.entries(), vec!["log", "query id q", "show 3"]);
}

#[test]
fn test_settings_from_toml() {
    let settings = Settings::from_toml_str(
        r#"
        jsonp_callback_name = "cb"

        [flags]
        x_powered_by = false
        "#,
    )
    .unwrap();

    let app = App::<TestRequest, ()>::with_settings(settings);
    assert_eq!(app.settings().jsonp_callback_name, "cb");
    assert_eq!(app.settings().view_engine, "slim");
    assert!(app.settings().is_disabled("x_powered_by"));
    assert!(!app.settings().is_enabled("x_powered_by"));
}
