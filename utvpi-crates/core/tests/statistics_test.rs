#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;

use utvpi_core::convert_case::Case;
use utvpi_core::statistics::configure_statistic_logging;
use utvpi_core::statistics::should_log_statistics;
use utvpi_core::ConstraintGraph;
use utvpi_core::UtvpiConstraint;
use utvpi_core::UtvpiSolver;

/// A writer whose output can still be read after it has been handed to the statistic sink.
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .expect("no test panics while holding the lock")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

// The statistic sink is global, so this is the only test in this binary.
#[test]
fn statistics_are_written_once_configured() {
    let mut graph = ConstraintGraph::<i32, &str>::new();
    let x = graph.new_variable();
    graph
        .add_constraint(UtvpiConstraint::upper_bound(x, 0), "x <= 0")
        .expect("registered");

    let mut solver = UtvpiSolver::default();
    let _ = solver.satisfiable(&graph);
    graph
        .add_constraint(
            UtvpiConstraint::lower_bound(x, 1).expect("no overflow"),
            "x >= 1",
        )
        .expect("registered");
    let _ = solver.satisfiable(&graph);

    let buffer = SharedBuffer::default();

    // Nothing is written before statistic logging is configured.
    assert!(!should_log_statistics());
    solver.log_statistics();
    assert!(buffer.0.lock().expect("not poisoned").is_empty());

    configure_statistic_logging("%%", Some(Case::Camel), Some(Box::new(buffer.clone())));
    assert!(should_log_statistics());
    solver.log_statistics();

    let output = String::from_utf8(buffer.0.lock().expect("not poisoned").clone())
        .expect("statistics are valid UTF-8");
    let lines = output.lines().collect::<Vec<_>>();

    assert!(lines.contains(&"%% utvpiNumCalls=2"), "{output}");
    assert!(lines.contains(&"%% utvpiNumSatisfiable=1"), "{output}");
    assert!(lines.contains(&"%% utvpiNumNegativeCycleConflicts=1"), "{output}");
    assert!(lines.contains(&"%% utvpiNumTighteningConflicts=0"), "{output}");
    assert!(lines.contains(&"%% utvpiNumReasonsReported=2"), "{output}");
    assert_eq!(8, lines.len(), "{output}");
}
