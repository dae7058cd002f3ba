use std::fmt;
use std::sync::Arc;

use logfake::{Context, EventDispatcher, FakeConfig, LogEntry, LogFake};
use serde_json::json;

fn ctx(pairs: &[(&str, &str)]) -> Context {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), json!(v)))
        .collect()
}

#[test]
fn channel_resolution_is_reference_stable() {
    let log = LogFake::new();

    let first = log.channel("orders");
    let second = log.channel("orders");
    assert_eq!(first, second);

    first.info("written through the first handle");
    second.assert_logged("info").unwrap();
}

#[test]
fn channel_and_driver_are_interchangeable() {
    let log = LogFake::new();

    log.driver("orders").info("expected message");
    log.channel("orders").assert_logged("info").unwrap();
    assert_eq!(log.driver("orders"), log.channel("orders"));
}

#[test]
fn logger_is_the_default_channel() {
    let log = LogFake::new();

    assert_eq!(log.logger(), log.channel("stack"));
}

#[test]
fn get_channels_snapshots_resolution_order() {
    let log = LogFake::new();

    let expected = log.channel("expected-channel");
    assert_eq!(
        log.get_channels(),
        vec![("expected-channel".to_string(), expected)]
    );

    let second = log.channel("second");
    let channels = log.get_channels();
    assert_eq!(channels.len(), 2);
    assert_eq!(channels[0].0, "expected-channel");
    assert_eq!(channels[1], ("second".to_string(), second));
}

#[test]
fn stacks_canonicalize_order_independently() {
    let log = LogFake::new();

    log.stack(&["bugsnag", "sentry"], Some("dev_team"))
        .info("expected message");

    log.assert_not_logged("info").unwrap();
    log.stack(&["sentry", "bugsnag"], Some("dev_team"))
        .assert_logged("info")
        .unwrap();
}

#[test]
fn named_and_unnamed_stacks_are_distinct() {
    let log = LogFake::new();

    log.stack(&["bugsnag", "sentry"], Some("dev_team"))
        .info("expected message");
    log.stack(&["bugsnag", "sentry"], None).alert("expected message");

    log.stack(&["sentry", "bugsnag"], Some("dev_team"))
        .assert_not_logged("alert")
        .unwrap();
    log.stack(&["sentry", "bugsnag"], None)
        .assert_not_logged("info")
        .unwrap();
}

#[test]
fn stacks_never_collide_with_channels_of_the_same_joined_name() {
    let log = LogFake::new();

    log.stack(&["bugsnag", "sentry"], None).info("expected message");
    log.channel("bugsnag.sentry").alert("expected message");

    log.stack(&["bugsnag", "sentry"], None)
        .assert_not_logged("alert")
        .unwrap();
    log.channel("bugsnag.sentry").assert_not_logged("info").unwrap();

    log.stack(&["bugsnag", "sentry"], Some("name")).info("expected message");
    log.channel("name.bugsnag.sentry").alert("expected message");

    log.stack(&["name", "bugsnag", "sentry"], None)
        .assert_not_logged("alert")
        .unwrap();
    log.channel("name.bugsnag.sentry").assert_not_logged("info").unwrap();
}

#[test]
fn stack_entries_carry_the_sorted_canonical_name() {
    let log = LogFake::new();

    log.stack(&["c", "b", "a"], Some("name")).info("expected message");

    assert_eq!(log.all_logs()[0].channel, "Stack:name.a.b.c");
    assert_eq!(log.stack(&["a", "b", "c"], Some("name")).name(), "Stack:name.a.b.c");
}

#[test]
fn stack_members_are_deduplicated() {
    let log = LogFake::new();

    log.stack(&["a", "b", "a"], None).info("expected message");

    log.stack(&["a", "b"], None).assert_logged("info").unwrap();
    assert_eq!(log.all_logs()[0].channel, "a.b");
}

#[test]
fn stack_context_is_cleared_on_every_resolution() {
    let log = LogFake::new();

    log.stack(&["a", "b"], None).with_context(ctx(&[("key", "value")]));
    assert!(log.stack(&["a", "b"], None).current_context().is_empty());

    // Plain channels keep their context across resolutions.
    log.channel("orders").with_context(ctx(&[("key", "value")]));
    assert_eq!(log.channel("orders").current_context(), ctx(&[("key", "value")]));
}

#[test]
fn context_merge_is_biased_by_recency() {
    let log = LogFake::new();

    let channel = log.channel("orders");
    channel
        .with_context(ctx(&[("a", "first")]))
        .with_context(ctx(&[("a", "second"), ("b", "kept")]))
        .info("expected message");

    assert_eq!(
        channel.logged("info")[0].context,
        ctx(&[("a", "second"), ("b", "kept")])
    );
}

#[test]
fn call_site_context_wins_over_the_store() {
    let log = LogFake::new();

    log.with_context(ctx(&[("foo", "xxxx")]))
        .with_context(ctx(&[("bar", "xxxx")]))
        .log("info", "expected message", ctx(&[("baz", "xxxx")]));

    assert_eq!(
        log.logged("info")[0].context,
        ctx(&[("foo", "xxxx"), ("bar", "xxxx"), ("baz", "xxxx")])
    );
}

#[test]
fn without_context_clears_prior_merges() {
    let log = LogFake::new();

    log.with_context(ctx(&[("foo", "xxxx")]))
        .without_context()
        .log("info", "expected message", ctx(&[("baz", "xxxx")]));

    assert_eq!(log.logged("info")[0].context, ctx(&[("baz", "xxxx")]));
}

#[test]
fn forgetting_stamps_later_entries_without_clearing_history() {
    let log = LogFake::new();

    log.channel("x").info("a");
    log.forget_channel("x");
    log.channel("x").info("b");

    let entries = log.channel("x").logged("info");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].message, "a");
    assert_eq!(entries[0].times_forgotten, 0);
    assert_eq!(entries[1].message, "b");
    assert_eq!(entries[1].times_forgotten, 1);
    assert_eq!(log.channel("x").times_forgotten(), 1);
}

#[test]
fn forgetting_an_unresolved_channel_creates_it() {
    let log = LogFake::new();

    log.forget_channel("never-logged-to");

    log.channel("never-logged-to").assert_forgotten().unwrap();
    log.channel("never-logged-to").assert_nothing_logged().unwrap();
}

#[test]
fn all_logs_concatenates_in_resolution_then_append_order() {
    let log = LogFake::new();

    log.info("expected log 1");
    log.channel("channel").info("expected log 3");
    log.debug("expected log 2");
    log.channel("channel").debug("expected log 4");

    let all_logs = log.all_logs();
    let messages: Vec<&str> = all_logs.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(
        messages,
        ["expected log 1", "expected log 2", "expected log 3", "expected log 4"]
    );
}

#[test]
fn set_default_driver_writes_the_consulted_setting() {
    let log = LogFake::new();

    log.set_default_driver("expected-driver");

    assert_eq!(log.config().default_channel().as_deref(), Some("expected-driver"));
    log.info("expected message");
    log.channel("expected-driver").assert_logged("info").unwrap();
}

#[test]
fn absent_default_falls_back_to_the_null_channel() {
    let config = FakeConfig::new(None::<String>);
    let log = LogFake::with_config(config.clone());

    log.info("xxxx");
    log.channel("null").assert_logged("info").unwrap();

    config.set_default_channel(Some("stack"));
    log.info("routed");
    log.channel("stack").assert_logged("info").unwrap();
}

#[test]
fn on_demand_channels_share_one_fixed_identity() {
    let log = LogFake::new();

    log.build(json!({"driver": "single", "path": "/dev/null"}))
        .info("expected message");

    log.channel("ondemand")
        .assert_logged_message("info", "expected message")
        .unwrap();
    assert_eq!(log.build(json!({})), log.channel("ondemand"));
}

#[test]
fn stringable_messages_are_coerced_at_write_time() {
    struct OrderRef(u32);

    impl fmt::Display for OrderRef {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "order #{}", self.0)
        }
    }

    let log = LogFake::new();
    log.info(OrderRef(7));

    assert_eq!(log.logged("info")[0].message, "order #7");
}

#[test]
fn collaborator_stubs_accept_and_ignore() {
    struct NullDispatcher;

    impl EventDispatcher for NullDispatcher {
        fn dispatch(&self, _entry: &LogEntry) {}
    }

    let log = LogFake::new();

    log.listen(|_entry| {});
    log.extend("misc", |_config| {});

    assert!(log.get_event_dispatcher().is_none());
    let dispatcher: Arc<dyn EventDispatcher> = Arc::new(NullDispatcher);
    log.set_event_dispatcher(Arc::clone(&dispatcher));
    let returned = log.get_event_dispatcher().unwrap();
    assert!(Arc::ptr_eq(&returned, &dispatcher));

    // None of the stubs produce observable behavior.
    log.info("still captured");
    log.assert_logged_times("info", 1).unwrap();
}

#[test]
fn binding_installs_and_tears_down_the_process_wide_fake() {
    assert_eq!(logfake::facade::current(), None);

    let (fake, guard) = logfake::facade::bind();
    assert_eq!(logfake::facade::current(), Some(fake.clone()));

    logfake::facade::current().unwrap().info("through the facade");
    fake.assert_logged("info").unwrap();

    drop(guard);
    assert_eq!(logfake::facade::current(), None);
}
