//! Dependency graph analysis using petgraph.
//!
//! This module builds a per-batch dependency graph and derives:
//! - The set of task IDs involved in dependency cycles
//! - A normalized "influence" factor per task (how many others depend on it)
//!
//! # Edge Direction
//!
//! Edges point from **dependent -> dependency** (source depends on target),
//! so incoming edges to a node come from the tasks it unblocks.
//!
//! Tasks with a missing or blank ID are left out of the graph entirely, and
//! dependency references to IDs outside the batch are dropped while building.

use crate::domain::{Task, TaskId};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Directed "depends on" graph for a single batch of tasks
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Nodes hold task IDs; edge direction is dependent -> dependency.
    graph: DiGraph<TaskId, ()>,

    /// Mapping from TaskId to graph NodeIndex.
    node_map: HashMap<TaskId, NodeIndex>,

    /// Tasks listing each node as a dependency, indexed by `NodeIndex`.
    /// Counted per input task, so tasks sharing an ID each contribute.
    dependents: Vec<usize>,
}

impl DependencyGraph {
    /// Build the graph for a batch of tasks.
    ///
    /// Every task with a usable ID becomes a node, in input order, even if
    /// it has no dependencies. Repeated IDs share one node and contribute
    /// the union of their dependency lists. Dependents are counted per
    /// task, including tasks without an ID of their own.
    pub fn build(tasks: &[Task]) -> Self {
        let mut graph = DiGraph::new();
        let mut node_map = HashMap::new();

        for id in tasks.iter().filter_map(Task::graph_id) {
            node_map
                .entry(id.clone())
                .or_insert_with(|| graph.add_node(id.clone()));
        }

        let mut dependents = vec![0usize; graph.node_count()];
        let mut ignored = 0usize;
        for task in tasks {
            let from = task.graph_id().and_then(|id| node_map.get(id)).copied();

            let mut listed = HashSet::new();
            for dep in &task.dependencies {
                let Some(&to) = node_map.get(dep) else {
                    ignored += 1;
                    continue;
                };
                if Some(to) != from && listed.insert(to) {
                    dependents[to.index()] += 1;
                }
                if let Some(from) = from {
                    // update_edge keeps a single edge per pair and preserves first-insertion order
                    graph.update_edge(from, to, ());
                }
            }
        }

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            ignored_references = ignored,
            "Built dependency graph"
        );

        Self {
            graph,
            node_map,
            dependents,
        }
    }

    /// Number of tasks in the graph
    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Whether the graph has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Whether the ID belongs to a task in this batch
    #[must_use]
    pub fn contains(&self, id: &TaskId) -> bool {
        self.node_map.contains_key(id)
    }

    /// Direct dependencies of a node, in the order they were first listed.
    fn dependencies_of(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<_> = self
            .graph
            .edges(node)
            .map(|edge| (edge.id(), edge.target()))
            .collect();
        edges.sort_by_key(|(edge_id, _)| *edge_id);
        edges.into_iter().map(|(_, target)| target).collect()
    }

    /// Find task IDs involved in dependency cycles.
    ///
    /// Depth-first traversal from every unvisited node in input order. When
    /// a dependency leads back to a node on the active path, **every** node
    /// currently on that path is flagged, not just the members of the cycle
    /// proper. Tasks that merely lead into a cycle can therefore be flagged
    /// too; the result is meant for warnings, not for exact cycle extraction.
    ///
    /// The traversal keeps an explicit stack so that long dependency chains
    /// cannot overflow the call stack.
    #[must_use]
    pub fn find_cycles(&self) -> BTreeSet<TaskId> {
        let node_count = self.graph.node_count();
        let mut visited = vec![false; node_count];
        let mut on_path = vec![false; node_count];
        let mut flagged = vec![false; node_count];

        // Each frame is (node, its dependencies, index of the next one to follow).
        let mut stack: Vec<(NodeIndex, Vec<NodeIndex>, usize)> = Vec::new();

        for root in self.graph.node_indices() {
            if visited[root.index()] {
                continue;
            }
            visited[root.index()] = true;
            on_path[root.index()] = true;
            stack.push((root, self.dependencies_of(root), 0));

            while let Some((node, deps, next)) = stack.last_mut() {
                let Some(&dep) = deps.get(*next) else {
                    on_path[node.index()] = false;
                    stack.pop();
                    continue;
                };
                *next += 1;

                if on_path[dep.index()] {
                    tracing::debug!(
                        back_edge_to = %self.graph[dep],
                        path_len = stack.len(),
                        "Found dependency cycle"
                    );
                    for (path_node, _, _) in &stack {
                        flagged[path_node.index()] = true;
                    }
                } else if !visited[dep.index()] {
                    visited[dep.index()] = true;
                    on_path[dep.index()] = true;
                    let dep_deps = self.dependencies_of(dep);
                    stack.push((dep, dep_deps, 0));
                }
            }
        }

        self.graph
            .node_indices()
            .filter(|node| flagged[node.index()])
            .map(|node| self.graph[node].clone())
            .collect()
    }

    /// Number of other tasks that list this node as a dependency.
    fn dependents_of(&self, node: NodeIndex) -> usize {
        self.dependents.get(node.index()).copied().unwrap_or(0)
    }

    /// Number of other tasks in the batch that depend on the given task.
    ///
    /// Returns 0 for IDs outside the batch.
    #[must_use]
    pub fn dependents_count(&self, id: &TaskId) -> usize {
        self.node_map
            .get(id)
            .map_or(0, |&node| self.dependents_of(node))
    }

    /// Influence factor per task: dependents count divided by the batch maximum.
    ///
    /// Every node gets an entry. When no task has dependents, all factors are 0.
    #[must_use]
    pub fn influence_factors(&self) -> HashMap<TaskId, f64> {
        let counts: Vec<(NodeIndex, usize)> = self
            .graph
            .node_indices()
            .map(|node| (node, self.dependents_of(node)))
            .collect();

        let max = counts.iter().map(|(_, count)| *count).max().unwrap_or(0);

        counts
            .into_iter()
            .map(|(node, count)| {
                let factor = if max == 0 {
                    0.0
                } else {
                    count as f64 / max as f64
                };
                (self.graph[node].clone(), factor)
            })
            .collect()
    }

    /// Run both analyses for the batch.
    #[must_use]
    pub fn analyze(&self) -> GraphAnalysis {
        GraphAnalysis {
            in_cycle: self.find_cycles(),
            influence: self.influence_factors(),
        }
    }
}

/// Results of analyzing a batch's dependency graph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphAnalysis {
    /// IDs flagged as involved in a dependency cycle, sorted
    pub in_cycle: BTreeSet<TaskId>,

    /// Influence factor in `[0, 1]` per task ID
    pub influence: HashMap<TaskId, f64>,
}

impl GraphAnalysis {
    /// Analyze a batch of tasks
    pub fn of(tasks: &[Task]) -> Self {
        DependencyGraph::build(tasks).analyze()
    }

    /// Influence factor for a task, 0.0 for missing or unknown IDs
    #[must_use]
    pub fn influence_of(&self, id: Option<&TaskId>) -> f64 {
        id.and_then(|id| self.influence.get(id))
            .copied()
            .unwrap_or(0.0)
    }

    /// Whether a task was flagged as part of a cycle
    #[must_use]
    pub fn is_in_cycle(&self, id: Option<&TaskId>) -> bool {
        id.is_some_and(|id| self.in_cycle.contains(id))
    }
}

/// Return the IDs of tasks involved in any circular dependency, sorted.
pub fn detect_circular_dependencies(tasks: &[Task]) -> BTreeSet<TaskId> {
    DependencyGraph::build(tasks).find_cycles()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, deps: &[&str]) -> Task {
        Task::new(format!("Task {id}"))
            .with_id(id)
            .with_dependencies(deps.iter().copied())
    }

    fn ids(items: &[&str]) -> BTreeSet<TaskId> {
        items.iter().map(|s| TaskId::new(*s)).collect()
    }

    // ========== Cycle Detection Tests ==========

    #[test]
    fn test_no_cycle_in_chain() {
        let tasks = vec![task("a", &["b"]), task("b", &["c"]), task("c", &[])];
        assert!(detect_circular_dependencies(&tasks).is_empty());
    }

    #[test]
    fn test_mutual_dependency_is_cycle() {
        let tasks = vec![task("a", &["b"]), task("b", &["a"])];
        assert_eq!(detect_circular_dependencies(&tasks), ids(&["a", "b"]));
    }

    #[test]
    fn test_self_dependency_is_cycle() {
        let tasks = vec![task("a", &["a"]), task("b", &[])];
        assert_eq!(detect_circular_dependencies(&tasks), ids(&["a"]));
    }

    #[test]
    fn test_three_node_cycle() {
        let tasks = vec![task("a", &["b"]), task("b", &["c"]), task("c", &["a"])];
        assert_eq!(detect_circular_dependencies(&tasks), ids(&["a", "b", "c"]));
    }

    #[test]
    fn test_path_leading_into_cycle_is_flagged() {
        // "entry" is not part of the b <-> c cycle, but it is on the active
        // path when the back edge is found.
        let tasks = vec![task("entry", &["b"]), task("b", &["c"]), task("c", &["b"])];
        assert_eq!(
            detect_circular_dependencies(&tasks),
            ids(&["entry", "b", "c"])
        );
    }

    #[test]
    fn test_task_reaching_cycle_after_it_was_explored_is_not_flagged() {
        // The cycle is fully explored from "b" first; "late" only reaches
        // already-visited nodes, which are not re-expanded.
        let tasks = vec![task("b", &["c"]), task("c", &["b"]), task("late", &["b"])];
        assert_eq!(detect_circular_dependencies(&tasks), ids(&["b", "c"]));
    }

    #[test]
    fn test_disconnected_components_are_all_covered() {
        let tasks = vec![
            task("a", &[]),
            task("x", &["y"]),
            task("y", &["x"]),
            task("p", &["q"]),
            task("q", &[]),
        ];
        assert_eq!(detect_circular_dependencies(&tasks), ids(&["x", "y"]));
    }

    #[test]
    fn test_unknown_dependencies_are_ignored() {
        let tasks = vec![task("a", &["ghost"]), task("b", &["a", "missing"])];
        let graph = DependencyGraph::build(&tasks);
        assert_eq!(graph.len(), 2);
        assert!(!graph.contains(&TaskId::new("ghost")));
        assert!(graph.find_cycles().is_empty());
    }

    #[test]
    fn test_blank_ids_are_excluded() {
        let tasks = vec![
            task("", &["a"]),
            task("  ", &["a"]),
            Task::new("no id").with_dependencies(["a"]),
            task("a", &[""]),
        ];
        let graph = DependencyGraph::build(&tasks);
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.dependents_count(&TaskId::new("a")), 3);
        assert!(graph.find_cycles().is_empty());
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        let n = 20_000;
        let mut tasks: Vec<Task> = (0..n)
            .map(|i| task(&i.to_string(), &[(i + 1).to_string().as_str()]))
            .collect();
        tasks.push(task(&n.to_string(), &["0"]));

        let in_cycle = detect_circular_dependencies(&tasks);
        assert_eq!(in_cycle.len(), n + 1);
    }

    // ========== Influence Tests ==========

    #[test]
    fn test_influence_normalized_by_max() {
        let tasks = vec![
            task("a", &[]),
            task("b", &["a"]),
            task("c", &["a", "b"]),
            task("d", &[]),
        ];
        let influence = DependencyGraph::build(&tasks).influence_factors();

        assert_eq!(influence[&TaskId::new("a")], 1.0);
        assert_eq!(influence[&TaskId::new("b")], 0.5);
        assert_eq!(influence[&TaskId::new("c")], 0.0);
        assert_eq!(influence[&TaskId::new("d")], 0.0);
    }

    #[test]
    fn test_influence_all_zero_without_dependents() {
        let tasks = vec![task("a", &[]), task("b", &["unknown"])];
        let influence = DependencyGraph::build(&tasks).influence_factors();

        assert_eq!(influence.len(), 2);
        assert!(influence.values().all(|f| *f == 0.0));
    }

    #[test]
    fn test_self_reference_does_not_count_as_dependent() {
        let tasks = vec![task("a", &["a"]), task("b", &["c"]), task("c", &[])];
        let graph = DependencyGraph::build(&tasks);

        assert_eq!(graph.dependents_count(&TaskId::new("a")), 0);
        assert_eq!(graph.dependents_count(&TaskId::new("c")), 1);
        assert_eq!(graph.influence_factors()[&TaskId::new("a")], 0.0);
    }

    #[test]
    fn test_repeated_reference_counts_once_per_task() {
        let tasks = vec![task("a", &[]), task("b", &["a", "a"]), task("c", &["a"])];
        let graph = DependencyGraph::build(&tasks);
        assert_eq!(graph.dependents_count(&TaskId::new("a")), 2);
    }

    #[test]
    fn test_tasks_sharing_an_id_each_count_as_dependents() {
        let tasks = vec![
            task("x", &[]),
            task("y", &[]),
            task("d", &["x"]),
            task("d", &["x", "x"]),
            task("z", &["y"]),
        ];
        let graph = DependencyGraph::build(&tasks);

        assert_eq!(graph.len(), 4);
        assert_eq!(graph.dependents_count(&TaskId::new("x")), 2);
        assert_eq!(graph.dependents_count(&TaskId::new("y")), 1);

        let influence = graph.influence_factors();
        assert_eq!(influence[&TaskId::new("x")], 1.0);
        assert_eq!(influence[&TaskId::new("y")], 0.5);
    }

    #[test]
    fn test_analysis_lookups_handle_missing_ids() {
        let tasks = vec![task("a", &["b"]), task("b", &["a"])];
        let analysis = GraphAnalysis::of(&tasks);

        assert_eq!(analysis.influence_of(None), 0.0);
        assert_eq!(analysis.influence_of(Some(&TaskId::new("zzz"))), 0.0);
        assert_eq!(analysis.influence_of(Some(&TaskId::new("a"))), 1.0);
        assert!(analysis.is_in_cycle(Some(&TaskId::new("a"))));
        assert!(!analysis.is_in_cycle(None));
    }
}
