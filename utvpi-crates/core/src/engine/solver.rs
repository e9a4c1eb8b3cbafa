use log::debug;
use log::trace;

use super::components::StronglyConnectedComponents;
use super::path_reconstruction::cycle_in_predecessors;
use super::shortest_paths::bellman_ford;
use super::shortest_paths::ShortestPathOutcome;
use super::tight_subgraph::InducedSubgraph;
use super::tightening::find_violations;
use super::tightening::TighteningViolation;
use super::ExplanationSelection;
use super::SatisfiabilityOptions;
use crate::basic_types::Conflict;
use crate::basic_types::ConflictKind;
use crate::basic_types::Satisfiability;
use crate::basic_types::Weight;
use crate::checking::check_cycle;
use crate::create_statistics_struct;
use crate::graph::ConstraintGraph;
use crate::statistics::should_log_statistics;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;
use crate::utvpi_asserts::print_utvpi_assert_warning_message;
use crate::utvpi_asserts::utvpi_assert_moderate;
use crate::utvpi_asserts::utvpi_assert_simple;

create_statistics_struct!(
    /// Counters accumulated over all calls of a [`UtvpiSolver`].
    SolverStatistics {
        /// The number of satisfiability queries
        num_calls: u64,
        /// The number of queries answered with satisfiable
        num_satisfiable: u64,
        /// The number of conflicts that were negative cycles
        num_negative_cycle_conflicts: u64,
        /// The number of conflicts only found by the tightening check
        num_tightening_conflicts: u64,
        /// The number of times the tight subgraph had no cycle of length two or more
        num_singleton_partitions: u64,
        /// The total number of Bellman-Ford rounds, detection rounds excluded
        num_relaxation_rounds: usize,
        /// The total number of tight edges found
        num_tight_edges: usize,
        /// The total number of reasons handed out in conflicts
        num_reasons_reported: usize,
});

/// Decides integer satisfiability of the UTVPI constraints in a [`ConstraintGraph`].
///
/// The solver holds nothing but its options and statistics; every call starts from scratch and
/// only reads the graph.
///
/// # Example
/// ```rust
/// # use utvpi_core::ConstraintGraph;
/// # use utvpi_core::UtvpiConstraint;
/// # use utvpi_core::UtvpiSolver;
/// let mut graph = ConstraintGraph::<i32, &str>::new();
/// let x = graph.new_named_variable("x");
///
/// graph.add_constraint(UtvpiConstraint::upper_bound(x, 0), "x <= 0")?;
/// graph.add_constraint(UtvpiConstraint::lower_bound(x, 1)?, "x >= 1")?;
///
/// let mut solver = UtvpiSolver::default();
/// let (is_satisfiable, reasons) = solver.satisfiable(&graph).into_parts();
///
/// assert!(!is_satisfiable);
/// assert_eq!(vec!["x <= 0", "x >= 1"], reasons);
/// # Ok::<(), utvpi_core::GraphError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct UtvpiSolver {
    options: SatisfiabilityOptions,
    statistics: SolverStatistics,
}

impl Default for UtvpiSolver {
    fn default() -> Self {
        UtvpiSolver::with_options(SatisfiabilityOptions::default())
    }
}

impl UtvpiSolver {
    pub fn with_options(options: SatisfiabilityOptions) -> Self {
        print_utvpi_assert_warning_message!();

        UtvpiSolver {
            options,
            statistics: SolverStatistics::default(),
        }
    }

    pub fn options(&self) -> SatisfiabilityOptions {
        self.options
    }

    /// Decide whether the constraints in `graph` have an integer solution.
    ///
    /// An unsatisfiable answer carries a [`Conflict`] whose reasons are the edge reasons along a
    /// cycle that is negative, or that becomes negative once `2x <= odd` is rounded down.
    pub fn satisfiable<W: Weight, R: Clone>(
        &mut self,
        graph: &ConstraintGraph<W, R>,
    ) -> Satisfiability<R> {
        self.statistics.num_calls += 1;

        let answer = self.decide(graph);

        match &answer {
            Satisfiability::Satisfiable => self.statistics.num_satisfiable += 1,
            Satisfiability::Unsatisfiable(conflict) => {
                utvpi_assert_simple!(
                    !conflict.reasons().is_empty(),
                    "a conflict was found but it has no reasons"
                );
                utvpi_assert_moderate!(
                    check_cycle(graph, conflict).is_ok(),
                    "the reported cycle does not prove unsatisfiability"
                );

                self.statistics.num_reasons_reported += conflict.reasons().len();
                match conflict.kind() {
                    ConflictKind::NegativeCycle => {
                        self.statistics.num_negative_cycle_conflicts += 1
                    }
                    ConflictKind::Tightening { .. } => {
                        self.statistics.num_tightening_conflicts += 1
                    }
                }
            }
        }

        answer
    }

    fn decide<W: Weight, R: Clone>(&mut self, graph: &ConstraintGraph<W, R>) -> Satisfiability<R> {
        let paths = match bellman_ford(
            graph,
            self.options.relaxation,
            &mut self.statistics.num_relaxation_rounds,
        ) {
            ShortestPathOutcome::Distances(paths) => paths,
            ShortestPathOutcome::NegativeCycle {
                paths,
                last_relaxed,
            } => {
                let cycle = cycle_in_predecessors(&paths, last_relaxed, graph.num_vertices());
                let reasons = graph.reason_map().along_path(&cycle);
                let conflict = Conflict::new(ConflictKind::NegativeCycle, cycle, reasons);

                debug!("Found {}", conflict.display(graph));
                return Satisfiability::Unsatisfiable(conflict);
            }
        };

        let subgraph = InducedSubgraph::build(graph, &paths);
        self.statistics.num_tight_edges += subgraph.num_edges();

        let components = StronglyConnectedComponents::compute(&subgraph);
        trace!(
            "{} strongly connected components over {} tight vertices",
            components.num_components(),
            subgraph.num_vertices()
        );

        if components.is_singleton_partition() {
            debug!("The tight subgraph has no cycles, the graph is satisfiable");
            self.statistics.num_singleton_partitions += 1;
            return Satisfiability::Satisfiable;
        }

        let explain = |violation: TighteningViolation| {
            let induced_cycle = violation.cycle(&subgraph);
            let reasons = subgraph.reasons().along_path(&induced_cycle);
            let cycle = induced_cycle
                .iter()
                .map(|&vertex| subgraph.original(vertex))
                .collect();

            Conflict::new(
                ConflictKind::Tightening {
                    variable: violation.variable,
                },
                cycle,
                reasons,
            )
        };

        let mut violations = find_violations(graph, &paths, &subgraph, &components);
        let conflict = match self.options.explanation {
            ExplanationSelection::FirstViolation => violations.next().map(explain),
            ExplanationSelection::Smallest => violations
                .map(explain)
                .min_by_key(|conflict| conflict.reasons().len()),
        };

        match conflict {
            Some(conflict) => {
                debug!("Found {}", conflict.display(graph));
                Satisfiability::Unsatisfiable(conflict)
            }
            None => {
                debug!("No variable violates the tightening condition, the graph is satisfiable");
                Satisfiability::Satisfiable
            }
        }
    }

    /// Write the accumulated counters, if statistic logging has been configured.
    pub fn log_statistics(&self) {
        if !should_log_statistics() {
            return;
        }

        self.statistics.log(StatisticLogger::new("utvpi"));
    }
}

impl<W: Weight, R: Clone> ConstraintGraph<W, R> {
    /// Decide satisfiability with the default options; returns whether the graph is satisfiable,
    /// and if not, the reasons along the conflicting cycle.
    pub fn satisfiable(&self) -> (bool, Vec<R>) {
        UtvpiSolver::default().satisfiable(self).into_parts()
    }
}
