//! Cancellation, deadlines and concurrent dispatch.

use multitool::{
    CallContext, Category, DispatchMode, ErrorCode, NoopObserver, Toolkit, ToolkitConfig,
};
use multitool_testing::{MockTool, request};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn toolkit(config: ToolkitConfig, tools: &[&MockTool]) -> Toolkit {
    Toolkit::builder("t")
        .category(Category::new("p", "d", tools.iter().map(|m| m.tool())))
        .config(config)
        .observer(Arc::new(NoopObserver))
        .build()
}

#[tokio::test]
async fn cancelled_context_fills_every_slot_without_running_handlers() {
    let mock = MockTool::new("m");
    let toolkit = toolkit(ToolkitConfig::default(), &[&mock]);
    let raw = request("t", &[("p", &[("m", json!({})), ("m", json!({}))])]);
    let ctx = CallContext::new();
    ctx.cancel();

    let response = toolkit.handle(&ctx, &raw).await.unwrap();

    let tools = &response.categories[0].tools;
    assert_eq!(tools.len(), 2);
    assert!(
        tools
            .iter()
            .all(|t| t.result.as_failure().unwrap().is(ErrorCode::Cancelled))
    );
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn cancellation_interrupts_in_flight_handler() {
    let slow = MockTool::new("slow").with_delay(Duration::from_secs(30));
    let toolkit = toolkit(ToolkitConfig::default(), &[&slow]);
    let raw = request("t", &[("p", &[("slow", json!({}))])]);
    let ctx = CallContext::new();
    let canceller = ctx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        canceller.cancel();
    });

    let started = Instant::now();
    let response = toolkit.handle(&ctx, &raw).await.unwrap();

    assert!(started.elapsed() < Duration::from_secs(5));
    let failure = response.categories[0].tools[0].result.as_failure().unwrap();
    assert!(failure.is(ErrorCode::Cancelled));
}

#[tokio::test]
async fn deadline_turns_slow_handler_into_timeout() {
    let slow = MockTool::new("slow").with_delay(Duration::from_secs(30));
    let fast = MockTool::new("fast").with_default_response(json!("ok"));
    let config = ToolkitConfig::default().with_tool_timeout(Duration::from_millis(25));
    let toolkit = toolkit(config, &[&slow, &fast]);
    let raw = request("t", &[("p", &[("slow", json!({})), ("fast", json!({}))])]);

    let response = toolkit.handle(&CallContext::new(), &raw).await.unwrap();

    let tools = &response.categories[0].tools;
    let failure = tools[0].result.as_failure().unwrap();
    assert!(failure.is(ErrorCode::HandlerTimeout));
    assert_eq!(tools[1].result.as_success(), Some(&json!("ok")));
}

#[tokio::test]
async fn concurrent_mode_overlaps_handlers_and_keeps_order() {
    let first = MockTool::new("first")
        .with_delay(Duration::from_millis(150))
        .with_default_response(json!(1));
    let second = MockTool::new("second")
        .with_delay(Duration::from_millis(150))
        .with_default_response(json!(2));
    let broken = MockTool::new("broken").with_default_failure("nope");
    let config = ToolkitConfig::default().with_dispatch(DispatchMode::Concurrent);
    let toolkit = toolkit(config, &[&first, &second, &broken]);
    let raw = request(
        "t",
        &[(
            "p",
            &[
                ("first", json!({})),
                ("broken", json!({})),
                ("second", json!({})),
            ],
        )],
    );

    let started = Instant::now();
    let response = toolkit.handle(&CallContext::new(), &raw).await.unwrap();
    let elapsed = started.elapsed();

    let tools = &response.categories[0].tools;
    let names: Vec<_> = tools.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["first", "broken", "second"]);
    assert_eq!(tools[0].result.as_success(), Some(&json!(1)));
    assert!(tools[1].result.as_failure().is_some());
    assert_eq!(tools[2].result.as_success(), Some(&json!(2)));
    assert!(elapsed < Duration::from_millis(290), "took {elapsed:?}");
}
