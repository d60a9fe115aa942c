//! Dependency graph construction and cycle analysis.
//!
//! The graph is rebuilt from scratch for every scoring invocation: nodes
//! are the batch's task identifiers, with a directed edge from each
//! prerequisite to every task that lists it as a dependency. Identifiers
//! referencing tasks outside the batch are retained as external nodes --
//! they accumulate blocking weight but cannot themselves be scored, and
//! since they carry no dependencies of their own they can never sit on a
//! cycle.
//!
//! Two detection modes are provided:
//! - [`DependencyGraph::has_cycle`]: topological elimination (Kahn),
//!   answers existence in O(V+E).
//! - [`DependencyGraph::cycle_members`]: three-color depth-first
//!   traversal returning the exact set of identifiers on at least one
//!   cycle. A self-dependency is a cycle of size one.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use crate::task::Task;

/// Directed dependency graph over a single task batch.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// Batch task ids in input order
    nodes: Vec<String>,
    /// Ids referenced as dependencies but absent from the batch
    externals: Vec<String>,
    /// prerequisite -> tasks that depend on it
    dependents: HashMap<String, Vec<String>>,
    /// task id -> its dependencies, duplicates collapsed
    dependencies: HashMap<String, Vec<String>>,
    /// How many tasks list a given id as a dependency
    blocking: HashMap<String, usize>,
}

impl DependencyGraph {
    /// Build the graph for a batch. Pure function of the input: no side
    /// effects, duplicate dependency entries collapse to one edge.
    pub fn build(tasks: &[Task]) -> Self {
        let known: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();

        let mut nodes = Vec::with_capacity(tasks.len());
        let mut externals = Vec::new();
        let mut external_seen: HashSet<String> = HashSet::new();
        let mut dependents: HashMap<String, Vec<String>> = HashMap::new();
        let mut dependencies: HashMap<String, Vec<String>> = HashMap::new();
        let mut blocking: HashMap<String, usize> = HashMap::new();

        for task in tasks {
            nodes.push(task.id.clone());

            let mut seen: HashSet<&str> = HashSet::new();
            let mut deps = Vec::new();
            for dep in &task.dependencies {
                if !seen.insert(dep.as_str()) {
                    continue;
                }
                deps.push(dep.clone());
                dependents
                    .entry(dep.clone())
                    .or_default()
                    .push(task.id.clone());
                *blocking.entry(dep.clone()).or_insert(0) += 1;

                if !known.contains(dep.as_str()) && !external_seen.contains(dep.as_str()) {
                    external_seen.insert(dep.clone());
                    externals.push(dep.clone());
                }
            }
            dependencies.insert(task.id.clone(), deps);
        }

        Self {
            nodes,
            externals,
            dependents,
            dependencies,
            blocking,
        }
    }

    /// Number of tasks in the batch that declare `id` as a dependency,
    /// i.e. how many tasks completing `id` would unblock.
    pub fn blocking_count(&self, id: &str) -> usize {
        self.blocking.get(id).copied().unwrap_or(0)
    }

    /// The task's dependency list with duplicates collapsed, in input
    /// order. Empty for ids not in the batch.
    pub fn dependencies(&self, id: &str) -> &[String] {
        self.dependencies.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the graph contains at least one cycle.
    ///
    /// Kahn-style in-degree elimination: if every node can be removed in
    /// topological order the graph is acyclic. External nodes have no
    /// incoming edges and always eliminate.
    pub fn has_cycle(&self) -> bool {
        let mut in_degree: HashMap<&str, usize> = HashMap::new();
        for id in self.nodes.iter().chain(self.externals.iter()) {
            in_degree.insert(id.as_str(), 0);
        }
        for (_, dependents) in &self.dependents {
            for dependent in dependents {
                *in_degree.entry(dependent.as_str()).or_insert(0) += 1;
            }
        }

        let mut queue: VecDeque<&str> = in_degree
            .iter()
            .filter(|(_, deg)| **deg == 0)
            .map(|(id, _)| *id)
            .collect();

        let total = in_degree.len();
        let mut eliminated = 0;
        while let Some(id) = queue.pop_front() {
            eliminated += 1;
            if let Some(dependents) = self.dependents.get(id) {
                for dependent in dependents {
                    if let Some(deg) = in_degree.get_mut(dependent.as_str()) {
                        *deg -= 1;
                        if *deg == 0 {
                            queue.push_back(dependent.as_str());
                        }
                    }
                }
            }
        }

        eliminated != total
    }

    /// The exact set of identifiers participating in at least one cycle.
    ///
    /// Three-color depth-first traversal with an explicit stack: when an
    /// edge reaches a node still in progress, every node on the current
    /// path from that node to the top of the stack is a cycle member.
    pub fn cycle_members(&self) -> BTreeSet<String> {
        #[derive(Clone, Copy, PartialEq)]
        enum Color {
            White,
            Gray,
            Black,
        }

        let mut color: HashMap<&str, Color> = HashMap::new();
        for id in self.nodes.iter().chain(self.externals.iter()) {
            color.insert(id.as_str(), Color::White);
        }

        let mut members = BTreeSet::new();

        for root in &self.nodes {
            if color[root.as_str()] != Color::White {
                continue;
            }

            // (node, index of the next dependency edge to follow)
            let mut stack: Vec<(&str, usize)> = vec![(root.as_str(), 0)];
            let mut path: Vec<&str> = vec![root.as_str()];
            color.insert(root.as_str(), Color::Gray);

            while let Some((node, next)) = stack.last_mut() {
                let deps = self
                    .dependencies
                    .get(*node)
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);

                if *next < deps.len() {
                    let dep = deps[*next].as_str();
                    *next += 1;
                    match color.get(dep).copied() {
                        Some(Color::White) => {
                            color.insert(dep, Color::Gray);
                            stack.push((dep, 0));
                            path.push(dep);
                        }
                        Some(Color::Gray) => {
                            // Back edge: everything from the reached node
                            // to the top of the path lies on the cycle.
                            if let Some(pos) = path.iter().position(|n| *n == dep) {
                                for member in &path[pos..] {
                                    members.insert((*member).to_string());
                                }
                            }
                        }
                        _ => {}
                    }
                } else {
                    color.insert(*node, Color::Black);
                    stack.pop();
                    path.pop();
                }
            }
        }

        members
    }

    /// Batch node count (externals excluded).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
