#![cfg(feature = "tracing")]

use core::fmt;
use std::sync::{Arc, Mutex};

use pareto_rank::pareto::{pareto_front, pareto_front_2d, pareto_front_nd};
use pareto_rank::{Direction, Trial};
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Metadata, Subscriber};

/// Collects the `algorithm` field of every event.
#[derive(Clone, Default)]
struct AlgorithmLog(Arc<Mutex<Vec<String>>>);

struct AlgorithmVisitor<'a>(&'a mut Option<String>);

impl Visit for AlgorithmVisitor<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "algorithm" {
            *self.0 = Some(value.to_owned());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "algorithm" {
            *self.0 = Some(format!("{value:?}").trim_matches('"').to_owned());
        }
    }
}

impl Subscriber for AlgorithmLog {
    fn enabled(&self, _: &Metadata<'_>) -> bool {
        true
    }

    fn new_span(&self, _: &Attributes<'_>) -> Id {
        Id::from_u64(1)
    }

    fn record(&self, _: &Id, _: &Record<'_>) {}

    fn record_follows_from(&self, _: &Id, _: &Id) {}

    fn event(&self, event: &Event<'_>) {
        let mut algorithm = None;
        event.record(&mut AlgorithmVisitor(&mut algorithm));
        if let Some(a) = algorithm {
            self.0.lock().unwrap().push(a);
        }
    }

    fn enter(&self, _: &Id) {}

    fn exit(&self, _: &Id) {}
}

fn algorithms_logged(f: impl FnOnce()) -> Vec<String> {
    let log = AlgorithmLog::default();
    tracing::subscriber::with_default(log.clone(), f);
    log.0.lock().unwrap().clone()
}

fn trials() -> Vec<Trial> {
    vec![Trial::complete(0, [1.0, 2.0]), Trial::complete(1, [2.0, 1.0])]
}

#[test]
fn dispatcher_logs_the_algorithm_it_picks() {
    let two = [Direction::Minimize, Direction::Minimize];
    let logged = algorithms_logged(|| {
        pareto_front(&trials(), &two).unwrap();
    });
    assert_eq!(logged, vec!["sweep_2d"]);

    let three = [Direction::Minimize; 3];
    let wide = vec![Trial::complete(0, [1.0, 2.0, 3.0])];
    let logged = algorithms_logged(|| {
        pareto_front(&wide, &three).unwrap();
    });
    assert_eq!(logged, vec!["scan_nd"]);
}

#[test]
fn direct_calls_are_logged() {
    let dirs = [Direction::Minimize, Direction::Minimize];
    let logged = algorithms_logged(|| {
        pareto_front_2d(&trials(), &dirs).unwrap();
        pareto_front_nd(&trials(), &dirs).unwrap();
    });
    assert_eq!(logged, vec!["sweep_2d", "scan_nd"]);
}
