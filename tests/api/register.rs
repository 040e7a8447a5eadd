use std::sync::Arc;

use anyhow::Result;
use poem::http::StatusCode;
use serde_json::json;
use signup::dispatch::Dispatch;
use tokio::task::JoinSet;

use crate::{
    api::helpers::{
        error_locs, expected_echo, get_test_app, read_body, read_json, registration_data,
    },
    dispatch_test,
};

dispatch_test!(register_returns_201_and_echoes_username_and_email, [app] {
    let registration_data = json!({
        "username": "testuser",
        "password": "password123",
        "email": "testuser@example.com"
    });
    let resp = app.post_register(&registration_data).await;
    let (status, body) = read_json(resp).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "username": "testuser",
            "email": "testuser@example.com"
        })
    );
});

dispatch_test!(register_body_lists_username_then_email, [app] {
    let registration_data = json!({
        "username": "testuser",
        "password": "password123",
        "email": "testuser@example.com"
    });
    let (status, body) = read_body(app.post_register(&registration_data).await).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        br#"{"username":"testuser","email":"testuser@example.com"}"#.to_vec(),
        "{}",
        String::from_utf8_lossy(&body)
    );
});

dispatch_test!(register_decodes_bodies_without_content_type_as_json, [app] {
    let resp = app
        .post_register_untyped(r#"{"username":"u","password":"p","email":"e"}"#)
        .await;
    let (status, body) = read_body(resp).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, br#"{"username":"u","email":"e"}"#.to_vec());
});

dispatch_test!(register_output_does_not_depend_on_password, [app] {
    let mut data = registration_data();
    let (_, first) = read_body(app.post_register(&data).await).await?;
    data["password"] = json!("something-else-entirely");
    let (status, second) = read_body(app.post_register(&data).await).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first, second);
});

dispatch_test!(register_never_returns_the_password, [app] {
    let inputs = [
        registration_data(),
        json!({"username": "", "password": "", "email": ""}),
        json!({"username": "password", "password": "password", "email": "password"}),
        json!({"username": "u", "password": "p", "email": "e", "extra": {"password": "p"}}),
    ];
    for data in inputs.iter() {
        let (status, bytes) = read_body(app.post_register(data).await).await?;
        assert_eq!(status, StatusCode::CREATED, "{}", data);
        let expected = format!(
            r#"{{"username":{},"email":{}}}"#,
            data["username"], data["email"]
        );
        assert_eq!(String::from_utf8_lossy(&bytes), expected);
        let body: serde_json::Value = serde_json::from_slice(&bytes)?;
        let object = body.as_object().expect("response body should be an object");
        assert!(!object.contains_key("password"), "{}", body);
        assert_eq!(body, expected_echo(data));
    }
});

dispatch_test!(register_is_a_pure_projection, [app] {
    let data = registration_data();
    let (_, first) = read_body(app.post_register(&data).await).await?;
    let (_, second) = read_body(app.post_register(&data).await).await?;
    assert_eq!(first, second);
});

dispatch_test!(register_keeps_values_verbatim, [app] {
    let data = json!({
        "username": "  Ünïcode User  ",
        "password": "p",
        "email": "NOT AN EMAIL"
    });
    let (status, body) = read_json(app.post_register(&data).await).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, expected_echo(&data));
});

dispatch_test!(register_returns_422_when_email_is_missing, [app] {
    let data = json!({"username": "testuser", "password": "password123"});
    let (status, body) = read_json(app.post_register(&data).await).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        json!({
            "detail": [{
                "loc": ["body", "email"],
                "msg": "Field required",
                "type": "missing"
            }]
        })
    );
});

dispatch_test!(register_reports_every_invalid_field, [app] {
    let data = json!({"password": 123, "email": null});
    let (status, body) = read_json(app.post_register(&data).await).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        error_locs(&body),
        vec![
            (json!(["body", "username"]), json!("missing")),
            (json!(["body", "password"]), json!("string_type")),
            (json!(["body", "email"]), json!("string_type")),
        ]
    );
});

dispatch_test!(register_returns_422_for_non_object_bodies, [app] {
    for data in [json!([]), json!("testuser"), json!(42)] {
        let (status, body) = read_json(app.post_register(&data).await).await?;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", data);
        assert_eq!(error_locs(&body), vec![(json!(["body"]), json!("dict_type"))]);
    }
});

dispatch_test!(register_returns_422_for_malformed_json, [app] {
    for data in ["not-json", "{\"username\": "] {
        let (status, body) = read_json(app.post_register_raw(data).await).await?;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{:?}", data);
        assert_eq!(error_locs(&body), vec![(json!(["body"]), json!("json_invalid"))]);
    }
});

async fn concurrent_requests_do_not_cross_talk(dispatch: Dispatch) -> Result<()> {
    let app = Arc::new(get_test_app(dispatch)?);
    let mut requests = JoinSet::new();
    for _ in 0..100 {
        let app = app.clone();
        requests.spawn(async move {
            let data = registration_data();
            let resp = app.post_register(&data).await;
            read_json(resp).await.map(|res| (data, res))
        });
    }

    let mut seen = 0;
    while let Some(joined) = requests.join_next().await {
        let (data, (status, body)) = joined??;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, expected_echo(&data));
        seen += 1;
    }
    assert_eq!(seen, 100);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_registrations_cooperative() -> Result<()> {
    concurrent_requests_do_not_cross_talk(Dispatch::Cooperative).await
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_registrations_blocking() -> Result<()> {
    concurrent_requests_do_not_cross_talk(Dispatch::Blocking).await
}

#[tokio::test]
async fn dispatch_modes_produce_identical_responses() -> Result<()> {
    let cooperative = get_test_app(Dispatch::Cooperative)?;
    let blocking = get_test_app(Dispatch::Blocking)?;
    let data = registration_data();

    let (_, left) = read_body(cooperative.post_register(&data).await).await?;
    let (_, right) = read_body(blocking.post_register(&data).await).await?;
    assert_eq!(left, right);
    Ok(())
}
