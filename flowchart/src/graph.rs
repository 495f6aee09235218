//! Directed graph over parsed nodes and the breadth-first level assignment
//! that drives layout.

use std::collections::{HashMap, VecDeque};

use petgraph::Direction::{Incoming, Outgoing};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use super::ast::{EdgeRecord, NodeRecord};

/// Node ids connected by edge indices into the source edge list.
pub struct FlowGraph {
    graph: DiGraph<String, usize>,
    index: HashMap<String, NodeIndex>,
}

impl FlowGraph {
    /// Build the graph. Edges naming an id missing from `nodes` are dropped.
    #[must_use]
    pub fn new(nodes: &[NodeRecord], edges: &[EdgeRecord]) -> Self {
        let mut graph = DiGraph::with_capacity(nodes.len(), edges.len());
        let mut index = HashMap::with_capacity(nodes.len());
        for node in nodes {
            if !index.contains_key(&node.id) {
                let ix = graph.add_node(node.id.clone());
                index.insert(node.id.clone(), ix);
            }
        }
        for (i, edge) in edges.iter().enumerate() {
            match (index.get(&edge.from), index.get(&edge.to)) {
                (Some(&a), Some(&b)) => {
                    graph.add_edge(a, b, i);
                }
                _ => tracing::debug!(from = %edge.from, to = %edge.to, "dropping edge with unknown endpoint"),
            }
        }
        Self { graph, index }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Nodes without incoming edges, in node order.
    #[must_use]
    pub fn roots(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .filter(|&ix| self.graph.edges_directed(ix, Incoming).next().is_none())
            .map(|ix| self.graph[ix].as_str())
            .collect()
    }

    /// Direct successors of `id` in edge insertion order.
    #[must_use]
    pub fn children(&self, id: &str) -> Vec<&str> {
        match self.index.get(id) {
            Some(&ix) => self.successors(ix).into_iter().map(|c| self.graph[c].as_str()).collect(),
            None => Vec::new(),
        }
    }

    fn successors(&self, ix: NodeIndex) -> Vec<NodeIndex> {
        let mut out: Vec<(usize, NodeIndex)> =
            self.graph.edges_directed(ix, Outgoing).map(|e| (*e.weight(), e.target())).collect();
        out.sort_by_key(|&(order, _)| order);
        out.into_iter().map(|(_, target)| target).collect()
    }

    /// Assign a level to every node.
    ///
    /// Roots start at level 0. A node is expanded only the first time it is
    /// dequeued; its level may still be raised afterwards by a longer path, but
    /// its children are not revisited. Nodes no root reaches get level 0.
    #[must_use]
    pub fn levels(&self) -> LevelMap {
        let n = self.graph.node_count();
        let mut level: Vec<Option<usize>> = vec![None; n];
        let mut visited = vec![false; n];
        let mut order = Vec::with_capacity(n);
        let mut queue = VecDeque::new();

        for ix in self.graph.node_indices() {
            if self.graph.edges_directed(ix, Incoming).next().is_none() {
                level[ix.index()] = Some(0);
                order.push(ix);
                queue.push_back((ix, 0));
            }
        }

        while let Some((ix, depth)) = queue.pop_front() {
            if visited[ix.index()] {
                continue;
            }
            visited[ix.index()] = true;

            for child in self.successors(ix) {
                let next = depth + 1;
                let slot = &mut level[child.index()];
                if next > slot.unwrap_or(0) {
                    if slot.is_none() {
                        order.push(child);
                    }
                    *slot = Some(next);
                    queue.push_back((child, next));
                }
            }
        }

        for ix in self.graph.node_indices() {
            if level[ix.index()].is_none() {
                tracing::trace!(id = %self.graph[ix], "node unreachable from any root");
                level[ix.index()] = Some(0);
                order.push(ix);
            }
        }

        let levels = order
            .iter()
            .map(|&ix| (self.graph[ix].clone(), level[ix.index()].unwrap_or(0)))
            .collect::<HashMap<_, _>>();
        let order = order.into_iter().map(|ix| self.graph[ix].clone()).collect();
        LevelMap { levels, order }
    }
}

/// Level per node id plus the order in which ids were first leveled.
#[derive(Debug, Clone, Default)]
pub struct LevelMap {
    levels: HashMap<String, usize>,
    order: Vec<String>,
}

impl LevelMap {
    #[must_use]
    pub fn get(&self, id: &str) -> Option<usize> {
        self.levels.get(id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ids grouped by level (ascending), each group in first-leveled order.
    #[must_use]
    pub fn groups(&self) -> Vec<Vec<&str>> {
        let depth = self.levels.values().copied().max().map_or(0, |m| m + 1);
        let mut groups = vec![Vec::new(); depth];
        for id in &self.order {
            if let Some(&lvl) = self.levels.get(id) {
                groups[lvl].push(id.as_str());
            }
        }
        groups
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod graph_test;
