//! Process-wide bootstrap behavior. Kept in its own test binary because the
//! slot can only be filled once per process.

use fanlog_facade::{
    ErrorCode, ErrorKind, HandlerFactory, Level, LogHandler, bootstrap, handler_factory, info,
    is_bootstrapped, new_logger,
};
use fanlog_testkit::CapturingHandler;
use std::error::Error;
use std::sync::{Arc, Barrier};
use std::thread;

fn capturing_factory(capturing: &Arc<CapturingHandler>) -> HandlerFactory {
    let shared = Arc::clone(capturing);
    handler_factory(move |_label: &str| {
        let handler: Arc<dyn LogHandler> = shared.clone();
        handler
    })
}

#[test]
fn first_bootstrap_wins_and_later_loggers_use_it() -> Result<(), Box<dyn Error>> {
    let early = new_logger("early");
    assert!(!is_bootstrapped());
    assert_eq!(early.log_level(), Level::Info);

    let contenders: Vec<Arc<CapturingHandler>> = (0..6)
        .map(|_| Arc::new(CapturingHandler::new(Level::Trace)))
        .collect();
    let barrier = Arc::new(Barrier::new(contenders.len()));
    let handles: Vec<_> = contenders
        .iter()
        .map(|capturing| {
            let factory = capturing_factory(capturing);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                bootstrap(factory).is_ok()
            })
        })
        .collect();
    let mut outcomes = Vec::new();
    for handle in handles {
        outcomes.push(handle.join().map_err(|_| "bootstrap thread panicked")?);
    }

    assert_eq!(outcomes.iter().filter(|won| **won).count(), 1);
    assert!(is_bootstrapped());

    let logger = new_logger("late");
    info!(logger, "after bootstrap");
    let winners: Vec<&Arc<CapturingHandler>> = contenders
        .iter()
        .filter(|capturing| !capturing.is_empty())
        .collect();
    assert_eq!(winners.len(), 1);
    assert_eq!(
        winners.first().map(|capturing| capturing.lines()),
        Some(vec!["info: after bootstrap".to_string()])
    );

    let retry = bootstrap(capturing_factory(&Arc::new(CapturingHandler::default())));
    let error = retry.err().ok_or("second bootstrap should fail")?;
    assert_eq!(error.code, ErrorCode::already_bootstrapped());
    assert_eq!(error.kind, ErrorKind::Invariant);

    assert_eq!(early.log_level(), Level::Info);
    Ok(())
}
