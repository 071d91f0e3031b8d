//! Crate-level ordering and BDD tests.

use std::sync::{Arc, Mutex};

use rstest::rstest;

use crate::{Chain, call};


/// Expected result and call log for a chain of fixed opinions.
fn model(before: &[Option<i32>], after: &[Option<i32>], target: i32) -> (i32, Vec<String>) {
    let mut log = Vec::new();
    for (index, opinion) in before.iter().enumerate() {
        log.push(format!("before{index}"));
        if let Some(value) = opinion {
            return (*value, log);
        }
    }
    log.push("target".to_owned());
    for (index, opinion) in after.iter().enumerate() {
        log.push(format!("after{index}"));
        if let Some(value) = opinion {
            return (*value, log);
        }
    }
    (target, log)
}

fn recording_chain(
    before: &[Option<i32>],
    after: &[Option<i32>],
    log: &Arc<Mutex<Vec<String>>>,
) -> Chain<i32, i32> {
    let mut chain = Chain::new();
    for (index, opinion) in before.iter().copied().enumerate() {
        let sink = Arc::clone(log);
        chain.push_before(move |_: &mut i32, _: &mut ()| {
            record(&sink, format!("before{index}"));
            opinion
        });
    }
    for (index, opinion) in after.iter().copied().enumerate() {
        let sink = Arc::clone(log);
        chain.push_after(move |_: &mut i32, _: &mut ()| {
            record(&sink, format!("after{index}"));
            opinion
        });
    }
    chain
}

fn record(log: &Mutex<Vec<String>>, entry: String) {
    log.lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .push(entry);
}

#[rstest]
#[case(&[], &[])]
#[case(&[None], &[])]
#[case(&[Some(1)], &[])]
#[case(&[None, None], &[None])]
#[case(&[None, Some(2), Some(3)], &[Some(4)])]
#[case(&[], &[Some(4)])]
#[case(&[None], &[None, Some(5), Some(6)])]
#[case(&[None, None], &[None, None])]
#[case(&[Some(7), None], &[Some(8)])]
fn dispatch_follows_first_opinion_order(
    #[case] before: &[Option<i32>],
    #[case] after: &[Option<i32>],
) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let chain = recording_chain(before, after, &log);
    let sink = Arc::clone(&log);

    let result = call(0, &chain, move |_: &mut i32| {
        record(&sink, "target".to_owned());
        100
    });

    let (expected, expected_log) = model(before, after, 100);
    assert_eq!(result, expected);
    let actual_log = log
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .clone();
    assert_eq!(actual_log, expected_log);
}
