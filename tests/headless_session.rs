use std::sync::mpsc;
use std::time::{Duration, SystemTime};

use keydrill::drill::{Drill, FieldEffect};
use keydrill::runtime::{DrillEvent, InputEvent, Runner, TestEventSource};

// Headless integration using the internal runtime + Drill without a TTY.
// Drives a full session the way main.rs does: chars grow the field, the
// delimiter event scores the word, ticks only read live metrics.
#[test]
fn headless_typing_flow_completes() {
    let mut drill = Drill::new("the cat".to_string());
    let mut field = String::new();

    let (tx, rx) = mpsc::channel();
    let es = TestEventSource::new(rx);
    let runner = Runner::new(es, Duration::from_millis(5));

    for c in "the cat".chars() {
        let input = if c == ' ' {
            InputEvent::Delimiter
        } else {
            InputEvent::Char(c)
        };
        tx.send(DrillEvent::Input(input)).unwrap();
    }

    // Drive a tiny event loop until finished (or bounded steps)
    for _ in 0..100u32 {
        let now = SystemTime::now();
        match runner.step() {
            DrillEvent::Tick => {
                // Ticks are read-only: live metrics must never mutate state
                let raw_before = drill.raw_typed_chars;
                let _ = drill.live_metrics(now);
                assert_eq!(drill.raw_typed_chars, raw_before);
            }
            DrillEvent::Resize => {}
            DrillEvent::Input(input) => {
                let (c, is_delimiter) = match input {
                    InputEvent::Char(c) => (c, false),
                    InputEvent::Delimiter => (' ', true),
                    _ => continue,
                };
                drill.begin(now);
                field.push(c);
                if drill.on_field_change(&field, is_delimiter, now) == FieldEffect::Clear {
                    field.clear();
                }
                if drill.has_finished() {
                    break;
                }
            }
        }
    }

    assert!(drill.has_finished(), "drill should have finished typing");

    let summary = drill.summary.expect("finished drill must carry a summary");
    assert_eq!(summary.accuracy, 100.0);
    assert!(summary.raw_wpm >= summary.wpm);

    // One history sample per completed word boundary
    assert_eq!(drill.history.len(), 1);
}

#[test]
fn headless_session_with_mistakes() {
    let mut drill = Drill::new("ab cd".to_string());
    drill.started_at = Some(SystemTime::now() - Duration::from_secs(30));

    let now = SystemTime::now();
    let mut field = String::new();

    // First word typed wrong, boundary taken anyway
    for c in "xx".chars() {
        field.push(c);
        drill.on_field_change(&field, false, now);
    }
    field.push(' ');
    assert_eq!(drill.on_field_change(&field, true, now), FieldEffect::Clear);
    field.clear();

    // Second word typed right; completion fires on its last char
    for c in "cd".chars() {
        field.push(c);
        drill.on_field_change(&field, false, now);
    }

    assert!(drill.has_finished());
    let summary = drill.summary.unwrap();
    assert_eq!(summary.accuracy, 50.0);
    assert!(summary.wpm < summary.raw_wpm);
}
