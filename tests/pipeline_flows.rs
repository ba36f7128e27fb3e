//! Pipeline flow behaviour, exercised with in-process plugin doubles.

mod common;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use gatehouse::contract::{
    Category, CategoryProperties, ExecutionMode, Flow, Payload,
};
use gatehouse::pipeline::categories::CategoryPolicies;
use gatehouse::proto::HttpResponse;
use gatehouse::{Error, Pipeline};

use common::{
    continue_response, failing, get_request, instance, pass_through, ScriptedPlugin,
};

/// Double whose script injects one header through `modified_request`,
/// keeping whatever headers the request already carries.
fn header_injector(name: &str, header: &'static str, value: &'static str) -> Arc<ScriptedPlugin> {
    ScriptedPlugin::new(name, &[Flow::Request], move |payload| {
        let mut request = payload.into_request()?;
        request.headers.insert(header.to_string(), value.to_string());
        Ok(Payload::Response(HttpResponse {
            r#continue: true,
            modified_request: Some(request),
            ..Default::default()
        }))
    })
}

#[tokio::test]
async fn s1_pass_through_leaves_the_request_untouched() {
    let pipeline = Pipeline::new();
    let observer = pass_through("observer", &[Flow::Request]);
    let validator = pass_through("validator", &[Flow::Request]);
    pipeline.register(Category::Observability, instance(&observer, false));
    pipeline.register(Category::Validation, instance(&validator, false));

    let verdict = pipeline.run_request(get_request("/x")).await.unwrap();

    assert!(verdict.r#continue);
    assert!(verdict.modified_request.is_none());
    assert_eq!(observer.calls(), 1);
    assert_eq!(validator.calls(), 1);
}

#[tokio::test]
async fn categories_execute_in_fixed_order_for_both_flows() {
    let journal: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
    let pipeline = Pipeline::new();

    // Registered deliberately out of order; only the fixed category order
    // may decide execution order.
    let entries = [
        (Category::Content, "content"),
        (Category::Observability, "observability"),
        (Category::Validation, "validation"),
        (Category::Authentication, "authentication"),
        (Category::RateLimiting, "rate-limiting"),
        (Category::Authorization, "authorization"),
    ];
    for (category, tag) in entries {
        let journal = Arc::clone(&journal);
        let plugin = ScriptedPlugin::new(tag, &[Flow::Request, Flow::Response], move |_| {
            journal.lock().unwrap().push(tag);
            Ok(Payload::Response(continue_response()))
        });
        pipeline.register(category, instance(&plugin, false));
    }

    let expected = [
        "observability",
        "authentication",
        "authorization",
        "rate-limiting",
        "validation",
        "content",
    ];

    pipeline.run_request(get_request("/x")).await.unwrap();
    assert_eq!(*journal.lock().unwrap(), expected);

    journal.lock().unwrap().clear();
    pipeline
        .run_response(continue_response())
        .await
        .unwrap();
    assert_eq!(*journal.lock().unwrap(), expected);
}

#[tokio::test]
async fn plugins_are_never_called_outside_their_declared_flows() {
    let pipeline = Pipeline::new();
    let response_only = pass_through("response-only", &[Flow::Response]);
    pipeline.register(Category::Validation, instance(&response_only, false));

    pipeline.run_request(get_request("/x")).await.unwrap();
    assert_eq!(response_only.calls(), 0);

    pipeline.run_response(continue_response()).await.unwrap();
    assert_eq!(response_only.calls(), 1);
}

#[tokio::test]
async fn s2_short_circuit_halts_current_and_later_categories() {
    let pipeline = Pipeline::new();

    let blocker = ScriptedPlugin::new("blocker", &[Flow::Request], |_| {
        Ok(Payload::Response(HttpResponse {
            r#continue: false,
            status_code: 400,
            body: b"blocked".to_vec(),
            ..Default::default()
        }))
    });
    let later_validator = pass_through("later-validator", &[Flow::Request]);
    let mutator = header_injector("mutator", "X-One", "1");

    pipeline.register(Category::Validation, instance(&blocker, false));
    pipeline.register(Category::Validation, instance(&later_validator, false));
    pipeline.register(Category::Content, instance(&mutator, false));

    let verdict = pipeline.run_request(get_request("/x")).await.unwrap();

    assert!(!verdict.r#continue);
    assert_eq!(verdict.status_code, 400);
    assert_eq!(verdict.body, b"blocked");
    assert_eq!(blocker.calls(), 1);
    assert_eq!(later_validator.calls(), 0);
    assert_eq!(mutator.calls(), 0);
}

#[tokio::test]
async fn s3_content_mutations_chain_and_reach_the_caller() {
    let pipeline = Pipeline::new();
    let first = header_injector("first", "X-One", "1");
    let second = header_injector("second", "X-Two", "2");
    pipeline.register(Category::Content, instance(&first, false));
    pipeline.register(Category::Content, instance(&second, false));

    let verdict = pipeline.run_request(get_request("/x")).await.unwrap();

    // The second plugin observed the first one's substitution.
    let seen = second.seen();
    let Payload::Request(observed) = &seen[0] else {
        panic!("content plugin should observe a request payload");
    };
    assert_eq!(observed.headers.get("X-One").map(String::as_str), Some("1"));

    // And the final verdict carries both headers for the application handler.
    assert!(verdict.r#continue);
    let final_request = verdict.modified_request.expect("substituted request");
    assert_eq!(final_request.headers.get("X-One").map(String::as_str), Some("1"));
    assert_eq!(final_request.headers.get("X-Two").map(String::as_str), Some("2"));
}

#[tokio::test]
async fn s4_required_plugin_failure_fails_the_pipeline() {
    let pipeline = Pipeline::new();
    let noisy_observer = failing("noisy-observer", &[Flow::Request]);
    let limiter = failing("limiter", &[Flow::Request]);
    pipeline.register(Category::Observability, instance(&noisy_observer, false));
    pipeline.register(Category::RateLimiting, instance(&limiter, true));

    let err = pipeline.run_request(get_request("/x")).await.unwrap_err();

    assert!(err.is_required_failure());
    let Error::RequiredPluginFailed { plugin, .. } = err else {
        panic!("expected a required-plugin failure, got {err}");
    };
    assert_eq!(plugin, "limiter");
    // The observability failure was logged only; the plugin still ran.
    assert_eq!(noisy_observer.calls(), 1);
}

#[tokio::test]
async fn s5_parallel_category_tolerates_optional_failures() {
    let pipeline = Pipeline::new();
    let first = pass_through("first", &[Flow::Request]);
    let flaky = failing("flaky", &[Flow::Request]);
    let third = pass_through("third", &[Flow::Request]);
    let validator = pass_through("validator", &[Flow::Request]);
    pipeline.register(Category::Observability, instance(&first, false));
    pipeline.register(Category::Observability, instance(&flaky, false));
    pipeline.register(Category::Observability, instance(&third, false));
    pipeline.register(Category::Validation, instance(&validator, false));

    let verdict = pipeline.run_request(get_request("/x")).await.unwrap();

    assert!(verdict.r#continue);
    assert_eq!(first.calls(), 1);
    assert_eq!(flaky.calls(), 1);
    assert_eq!(third.calls(), 1);
    assert_eq!(validator.calls(), 1);
}

#[tokio::test]
async fn parallel_plugins_observe_the_identical_payload() {
    let pipeline = Pipeline::new();
    let observers: Vec<_> = (0..3)
        .map(|i| pass_through(&format!("observer-{i}"), &[Flow::Request]))
        .collect();
    for observer in &observers {
        pipeline.register(Category::Observability, instance(observer, false));
    }

    let mut request = get_request("/x");
    request
        .headers
        .insert("X-Trace".to_string(), "abc123".to_string());
    pipeline.run_request(request.clone()).await.unwrap();

    for observer in &observers {
        assert_eq!(observer.seen(), vec![Payload::Request(request.clone())]);
    }
}

#[tokio::test]
async fn parallel_with_mutation_is_rejected_before_dispatch() {
    let rows = HashMap::from([(
        Category::Observability,
        CategoryProperties {
            mode: ExecutionMode::Parallel,
            can_reject: false,
            can_modify: true,
        },
    )]);
    let pipeline = Pipeline::with_policies(CategoryPolicies::new(rows));
    let observer = pass_through("observer", &[Flow::Request]);
    pipeline.register(Category::Observability, instance(&observer, false));

    let err = pipeline.run_request(get_request("/x")).await.unwrap_err();

    assert!(matches!(err, Error::Configuration(_)));
    assert!(err.to_string().contains("mutually exclusive"));
    assert_eq!(observer.calls(), 0);
}

#[tokio::test]
async fn required_failure_overrides_a_non_rejecting_category() {
    let pipeline = Pipeline::new();
    let critical = failing("critical-observer", &[Flow::Request]);
    pipeline.register(Category::Observability, instance(&critical, true));

    let err = pipeline.run_request(get_request("/x")).await.unwrap_err();
    assert!(err.is_required_failure());
}

#[tokio::test]
async fn optional_failure_in_a_rejecting_category_aborts() {
    let pipeline = Pipeline::new();
    let broken = failing("broken-validator", &[Flow::Request]);
    pipeline.register(Category::Validation, instance(&broken, false));

    let err = pipeline.run_request(get_request("/x")).await.unwrap_err();
    assert!(matches!(err, Error::PipelineAborted { .. }));
    assert!(!err.is_required_failure());
}

#[tokio::test]
async fn modified_request_is_ignored_in_the_response_flow() {
    let pipeline = Pipeline::new();
    let confused = ScriptedPlugin::new("confused", &[Flow::Response], |payload| {
        let response = payload.into_response()?;
        Ok(Payload::Response(HttpResponse {
            modified_request: Some(get_request("/hijacked")),
            ..response
        }))
    });
    pipeline.register(Category::Content, instance(&confused, false));

    let original = HttpResponse {
        status_code: 200,
        body: b"payload".to_vec(),
        r#continue: true,
        ..Default::default()
    };
    let result = pipeline.run_response(original.clone()).await.unwrap();

    assert_eq!(result.status_code, original.status_code);
    assert_eq!(result.body, original.body);
}

#[tokio::test]
async fn response_flow_can_short_circuit() {
    let pipeline = Pipeline::new();
    let rewriter = ScriptedPlugin::new("rewriter", &[Flow::Response], |_| {
        Ok(Payload::Response(HttpResponse {
            r#continue: false,
            status_code: 418,
            body: b"rewritten".to_vec(),
            ..Default::default()
        }))
    });
    pipeline.register(Category::Validation, instance(&rewriter, false));

    let result = pipeline.run_response(continue_response()).await.unwrap();
    assert!(!result.r#continue);
    assert_eq!(result.status_code, 418);
    assert_eq!(result.body, b"rewritten");
}
