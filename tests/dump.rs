use std::sync::{Arc, Mutex};

use logfake::{Context, Level, LogEntry, LogFake};
use serde_json::json;

fn capture_dumps(log: &LogFake) -> Arc<Mutex<Vec<Vec<LogEntry>>>> {
    let dumps = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&dumps);
    log.set_dump_handler(move |entries| {
        sink.lock().expect("lock").push(entries.to_vec());
    });
    dumps
}

#[test]
fn dump_exports_the_default_channel_through_the_handler() {
    let log = LogFake::new();
    let dumps = capture_dumps(&log);

    log.info("expected log 1");
    log.debug("expected log 2");
    log.channel("channel").info("missing channel log");
    let handle = log.dump(None);

    handle.assert_logged("info").unwrap();

    let dumps = dumps.lock().expect("lock");
    assert_eq!(dumps.len(), 1);
    let messages: Vec<&str> = dumps[0].iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, ["expected log 1", "expected log 2"]);
    assert!(dumps[0].iter().all(|e| e.channel == "stack"));
}

#[test]
fn dump_payload_uses_the_exported_field_names() {
    let log = LogFake::new();
    let dumps = capture_dumps(&log);

    log.info("expected log 1");
    log.dump(None);

    let dumps = dumps.lock().expect("lock");
    let exported = serde_json::to_value(&dumps[0]).expect("serialize");
    assert_eq!(
        exported,
        json!([
            {
                "level": "info",
                "message": "expected log 1",
                "context": {},
                "times_channel_has_been_forgotten_at_time_of_writing_log": 0,
                "channel": "stack",
            }
        ])
    );
}

#[test]
fn dump_filters_by_level() {
    let log = LogFake::new();
    let dumps = capture_dumps(&log);

    log.info("expected log");
    log.debug("missing log");
    log.channel("channel").info("missing channel log");
    log.dump(Some(Level::Info));

    let dumps = dumps.lock().expect("lock");
    assert_eq!(dumps.len(), 1);
    assert_eq!(dumps[0].len(), 1);
    assert_eq!(dumps[0][0].message, "expected log");
    assert_eq!(dumps[0][0].level, Level::Info);
}

#[test]
fn dump_on_a_channel_exports_only_that_channel() {
    let log = LogFake::new();
    let dumps = capture_dumps(&log);

    log.info("missing log");
    log.channel("unknown").info("missing log");
    log.channel("known").info("expected log 1");
    log.channel("known").debug("expected log 2");
    log.channel("known").dump(None).assert_logged("info").unwrap();

    let dumps = dumps.lock().expect("lock");
    assert_eq!(dumps.len(), 1);
    let messages: Vec<&str> = dumps[0].iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, ["expected log 1", "expected log 2"]);
    assert!(dumps[0].iter().all(|e| e.channel == "known"));
}

#[test]
fn dump_all_exports_every_channel_in_all_logs_order() {
    let log = LogFake::new();
    let dumps = capture_dumps(&log);

    log.info("expected log 1");
    log.debug("expected log 2");
    log.channel("channel").info("expected log 3");
    log.channel("channel").debug("expected log 4");
    log.dump_all(None).assert_logged("info").unwrap();

    let dumps = dumps.lock().expect("lock");
    assert_eq!(dumps.len(), 1);
    let messages: Vec<&str> = dumps[0].iter().map(|e| e.message.as_str()).collect();
    assert_eq!(
        messages,
        ["expected log 1", "expected log 2", "expected log 3", "expected log 4"]
    );
}

#[test]
fn dump_all_filters_by_level_across_channels() {
    let log = LogFake::new();
    let dumps = capture_dumps(&log);

    log.info("expected log 1");
    log.debug("missing log");
    log.channel("channel").info("expected log 2");
    log.channel("channel").debug("missing log");
    log.dump_all(Some(Level::Info));

    let dumps = dumps.lock().expect("lock");
    assert_eq!(dumps.len(), 1);
    let channels: Vec<(&str, &str)> = dumps[0]
        .iter()
        .map(|e| (e.message.as_str(), e.channel.as_str()))
        .collect();
    assert_eq!(
        channels,
        [("expected log 1", "stack"), ("expected log 2", "channel")]
    );
}

#[test]
fn dumping_does_not_disturb_later_appends_or_assertions() {
    let log = LogFake::new();
    let _dumps = capture_dumps(&log);

    log.info("before");
    log.dump(None);
    log.info("after");

    log.assert_logged_times("info", 2).unwrap();
}

#[test]
fn dumped_context_round_trips() {
    let log = LogFake::new();
    let dumps = capture_dumps(&log);

    let context: Context = [("key".to_string(), json!("value"))].into_iter().collect();
    log.log("info", "expected", context.clone());
    log.dump(None);

    let dumps = dumps.lock().expect("lock");
    assert_eq!(dumps[0][0].context, context);
}

#[test]
#[should_panic(expected = "LogFake::dump_all() should not be called from a channel.")]
fn dump_all_from_a_channel_is_misuse() {
    let log = LogFake::new();

    log.channel("channel").dump_all(None);
}

#[test]
#[should_panic(expected = "`dd()` should not be called from a channel.")]
fn dd_from_a_channel_is_misuse() {
    let log = LogFake::new();

    log.channel("channel").dd(None);
}

#[test]
#[should_panic(expected = "`dd_all()` should not be called from a channel.")]
fn dd_all_from_a_channel_is_misuse() {
    let log = LogFake::new();

    log.channel("channel").dd_all(None);
}

#[test]
#[should_panic(expected = "LogFake::dump_all() should not be called from a channel.")]
fn dump_all_from_a_stack_is_misuse() {
    let log = LogFake::new();

    log.stack(&["bugsnag", "sentry"], None).dump_all(None);
}
