//! Pure algorithms over a frozen `DependencyGraph` value: traversal, cycle
//! detection, strongly connected components, path queries, depth and
//! critical-path analysis. No algorithm here mutates the graph it is given.

use super::builder::DependencyGraph;
use crate::error::{Error, Result};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// Kahn's algorithm. Returns a node order consistent with edge direction.
/// If the graph has a cycle the returned order omits the nodes on (or only
/// reachable through) that cycle, so `order.len() < graph.node_count()`.
pub fn topological_sort(graph: &DependencyGraph) -> Vec<String> {
    let nodes = graph.get_all_nodes();
    let mut in_degree: FxHashMap<&str, usize> =
        nodes.iter().map(|n| (n.as_str(), 0usize)).collect();
    for node in &nodes {
        for dep in graph.get_dependencies(node) {
            *in_degree.entry(leak_or_find(&nodes, &dep)).or_insert(0) += 1;
        }
    }

    let mut queue: VecDeque<&str> = nodes
        .iter()
        .filter(|n| in_degree.get(n.as_str()).copied().unwrap_or(0) == 0)
        .map(|n| n.as_str())
        .collect();

    let mut order = Vec::with_capacity(nodes.len());
    let mut degree = in_degree.clone();
    while let Some(node) = queue.pop_front() {
        order.push(node.to_string());
        for dep in graph.get_dependencies(node) {
            if let Some(d) = degree.get_mut(dep.as_str()) {
                *d -= 1;
                if *d == 0 {
                    queue.push_back(leak_or_find(&nodes, &dep));
                }
            }
        }
    }
    order
}

/// Helper to get a `&str` with the lifetime of `nodes` for a value we
/// already know is present in it (keeps the queue borrow-checker-friendly
/// without cloning every element).
fn leak_or_find<'a>(nodes: &'a [String], needle: &str) -> &'a str {
    nodes
        .iter()
        .find(|n| n.as_str() == needle)
        .map(|s| s.as_str())
        .unwrap_or("")
}

/// Topological sort that fails with `AnalysisError` on a cycle.
pub fn topological_sort_checked(graph: &DependencyGraph) -> Result<Vec<String>> {
    let order = topological_sort(graph);
    if order.len() < graph.node_count() {
        return Err(Error::analysis_error("CIRCULAR_DEPENDENCY"));
    }
    Ok(order)
}

/// Whether the graph contains any cycle (including self-loops).
pub fn has_cycle(graph: &DependencyGraph) -> bool {
    !find_cycles(graph).is_empty()
}

/// Whether the graph is a DAG (no cycles).
pub fn is_dag(graph: &DependencyGraph) -> bool {
    !has_cycle(graph)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    White,
    Gray,
    Black,
}

/// DFS with a recursion stack. Each simple cycle is emitted once, as
/// `[v1, v2, ..., vk, v1]`, in discovery order.
pub fn find_cycles(graph: &DependencyGraph) -> Vec<Vec<String>> {
    let nodes = graph.get_all_nodes();
    let mut mark: FxHashMap<&str, Mark> = nodes.iter().map(|n| (n.as_str(), Mark::White)).collect();
    let mut stack: Vec<String> = Vec::new();
    let mut cycles = Vec::new();

    fn visit<'a>(
        node: &'a str,
        graph: &DependencyGraph,
        mark: &mut FxHashMap<&'a str, Mark>,
        stack: &mut Vec<String>,
        cycles: &mut Vec<Vec<String>>,
        nodes: &'a [String],
    ) {
        mark.insert(node, Mark::Gray);
        stack.push(node.to_string());

        for dep in graph.get_dependencies(node) {
            let dep_key = leak_or_find(nodes, &dep);
            match mark.get(dep_key).copied().unwrap_or(Mark::White) {
                Mark::White => visit(dep_key, graph, mark, stack, cycles, nodes),
                Mark::Gray => {
                    if let Some(pos) = stack.iter().position(|n| n == dep_key) {
                        let mut cycle: Vec<String> = stack[pos..].to_vec();
                        cycle.push(dep_key.to_string());
                        cycles.push(cycle);
                    }
                }
                Mark::Black => {}
            }
        }

        stack.pop();
        mark.insert(node, Mark::Black);
    }

    for node in &nodes {
        if mark.get(node.as_str()).copied() == Some(Mark::White) {
            visit(node.as_str(), graph, &mut mark, &mut stack, &mut cycles, &nodes);
        }
    }
    cycles
}

/// Tarjan's algorithm. Returns only components of size >= 2 (singletons
/// without self-loops are not reported).
pub fn strongly_connected_components(graph: &DependencyGraph) -> Vec<Vec<String>> {
    struct State<'a> {
        index_counter: usize,
        index: FxHashMap<&'a str, usize>,
        lowlink: FxHashMap<&'a str, usize>,
        on_stack: FxHashSet<&'a str>,
        stack: Vec<&'a str>,
        result: Vec<Vec<String>>,
    }

    fn strongconnect<'a>(
        v: &'a str,
        graph: &DependencyGraph,
        nodes: &'a [String],
        state: &mut State<'a>,
    ) {
        state.index.insert(v, state.index_counter);
        state.lowlink.insert(v, state.index_counter);
        state.index_counter += 1;
        state.stack.push(v);
        state.on_stack.insert(v);

        for w in graph.get_dependencies(v) {
            let w = leak_or_find(nodes, &w);
            if !state.index.contains_key(w) {
                strongconnect(w, graph, nodes, state);
                let w_low = state.lowlink[w];
                let v_low = state.lowlink[v];
                state.lowlink.insert(v, v_low.min(w_low));
            } else if state.on_stack.contains(w) {
                let w_idx = state.index[w];
                let v_low = state.lowlink[v];
                state.lowlink.insert(v, v_low.min(w_idx));
            }
        }

        if state.lowlink[v] == state.index[v] {
            let mut component = Vec::new();
            loop {
                let w = state.stack.pop().unwrap();
                state.on_stack.remove(w);
                component.push(w.to_string());
                if w == v {
                    break;
                }
            }
            let has_self_loop = component.len() == 1 && graph.has_edge(&component[0], &component[0]);
            if component.len() >= 2 || has_self_loop {
                state.result.push(component);
            }
        }
    }

    let nodes = graph.get_all_nodes();
    let mut state = State {
        index_counter: 0,
        index: FxHashMap::default(),
        lowlink: FxHashMap::default(),
        on_stack: FxHashSet::default(),
        stack: Vec::new(),
        result: Vec::new(),
    };

    for node in &nodes {
        if !state.index.contains_key(node.as_str()) {
            strongconnect(node.as_str(), graph, &nodes, &mut state);
        }
    }
    state.result
}

/// Shortest edge path from `start` to `end` by BFS, or empty if unreachable.
pub fn find_path(graph: &DependencyGraph, start: &str, end: &str) -> Vec<String> {
    if !graph.has_node(start) || !graph.has_node(end) {
        return Vec::new();
    }
    if start == end {
        return vec![start.to_string()];
    }

    let mut visited: FxHashSet<String> = FxHashSet::default();
    let mut parent: FxHashMap<String, String> = FxHashMap::default();
    let mut queue = VecDeque::new();
    queue.push_back(start.to_string());
    visited.insert(start.to_string());

    while let Some(node) = queue.pop_front() {
        for dep in graph.get_dependencies(&node) {
            if visited.insert(dep.clone()) {
                parent.insert(dep.clone(), node.clone());
                if dep == end {
                    let mut path = vec![dep.clone()];
                    let mut cur = dep;
                    while let Some(p) = parent.get(&cur) {
                        path.push(p.clone());
                        cur = p.clone();
                    }
                    path.reverse();
                    return path;
                }
                queue.push_back(dep);
            }
        }
    }
    Vec::new()
}

/// Longest acyclic path in the graph by DP over the topological order.
/// Returns empty if the graph is cyclic.
pub fn find_longest_path(graph: &DependencyGraph) -> Vec<String> {
    let order = topological_sort(graph);
    if order.len() < graph.node_count() {
        return Vec::new();
    }

    let mut dist: FxHashMap<&str, usize> = FxHashMap::default();
    let mut parent: FxHashMap<&str, &str> = FxHashMap::default();
    for node in order.iter().rev() {
        let mut best = 0usize;
        let mut best_child: Option<&str> = None;
        for dep in graph.get_dependencies(node) {
            let dep_key = leak_or_find(&order, &dep);
            let candidate = 1 + dist.get(dep_key).copied().unwrap_or(0);
            if candidate > best {
                best = candidate;
                best_child = Some(dep_key);
            }
        }
        dist.insert(node.as_str(), best);
        if let Some(child) = best_child {
            parent.insert(node.as_str(), child);
        }
    }

    let start = order
        .iter()
        .max_by_key(|n| dist.get(n.as_str()).copied().unwrap_or(0));
    let Some(start) = start else {
        return Vec::new();
    };

    let mut path = vec![start.as_str()];
    let mut cur = start.as_str();
    while let Some(next) = parent.get(cur) {
        path.push(next);
        cur = next;
    }
    path.into_iter().map(|s| s.to_string()).collect()
}

/// Longest outgoing chain length from `node` (leaves have depth 0),
/// computed by memoized DFS. Cycles are broken by the memoization guard and
/// yield a bounded, unspecified result rather than infinite recursion.
pub fn calculate_depth(graph: &DependencyGraph, node: &str) -> i64 {
    calculate_all_depths(graph)
        .get(node)
        .copied()
        .unwrap_or(0)
}

/// Maximum depth over all nodes.
pub fn calculate_max_depth(graph: &DependencyGraph) -> i64 {
    calculate_all_depths(graph)
        .values()
        .copied()
        .max()
        .unwrap_or(0)
}

/// Depths for all nodes, memoized DFS tolerant of cycles (a node on the
/// active recursion stack contributes depth 0 to its caller rather than
/// recursing forever).
pub fn calculate_all_depths(graph: &DependencyGraph) -> FxHashMap<String, i64> {
    let nodes = graph.get_all_nodes();
    let mut memo: FxHashMap<String, i64> = FxHashMap::default();
    let mut in_progress: FxHashSet<String> = FxHashSet::default();

    fn visit(
        node: &str,
        graph: &DependencyGraph,
        memo: &mut FxHashMap<String, i64>,
        in_progress: &mut FxHashSet<String>,
    ) -> i64 {
        if let Some(&d) = memo.get(node) {
            return d;
        }
        if in_progress.contains(node) {
            return 0;
        }
        in_progress.insert(node.to_string());

        let mut best = 0i64;
        for dep in graph.get_dependencies(node) {
            let d = 1 + visit(&dep, graph, memo, in_progress);
            best = best.max(d);
        }

        in_progress.remove(node);
        memo.insert(node.to_string(), best);
        best
    }

    for node in &nodes {
        visit(node, graph, &mut memo, &mut in_progress);
    }
    memo
}

/// Nodes with no incoming edges.
pub fn get_root_nodes(graph: &DependencyGraph) -> Vec<String> {
    graph
        .get_all_nodes()
        .into_iter()
        .filter(|n| graph.get_reverse_dependencies(n).is_empty())
        .collect()
}

/// Nodes with no outgoing edges.
pub fn get_leaf_nodes(graph: &DependencyGraph) -> Vec<String> {
    graph
        .get_all_nodes()
        .into_iter()
        .filter(|n| graph.get_dependencies(n).is_empty())
        .collect()
}

/// Outgoing edge count per node.
pub fn calculate_fanout(graph: &DependencyGraph) -> FxHashMap<String, usize> {
    graph
        .get_all_nodes()
        .into_iter()
        .map(|n| {
            let count = graph.get_dependencies(&n).len();
            (n, count)
        })
        .collect()
}

/// Incoming edge count per node.
pub fn calculate_fanin(graph: &DependencyGraph) -> FxHashMap<String, usize> {
    graph
        .get_all_nodes()
        .into_iter()
        .map(|n| {
            let count = graph.get_reverse_dependencies(&n).len();
            (n, count)
        })
        .collect()
}

/// All nodes reachable (directly or indirectly) from `node`, excluding
/// `node` itself.
pub fn get_transitive_dependencies(graph: &DependencyGraph, node: &str) -> Vec<String> {
    let mut visited = FxHashSet::default();
    let mut out = Vec::new();
    dfs_collect(graph, node, &mut visited, &mut out, true);
    out
}

/// All nodes that transitively depend on `node`, excluding `node` itself.
pub fn get_transitive_dependents(graph: &DependencyGraph, node: &str) -> Vec<String> {
    let reversed = reverse_graph(graph);
    get_transitive_dependencies(&reversed, node)
}

fn dfs_collect(
    graph: &DependencyGraph,
    node: &str,
    visited: &mut FxHashSet<String>,
    out: &mut Vec<String>,
    skip_self: bool,
) {
    for dep in graph.get_dependencies(node) {
        if visited.insert(dep.clone()) {
            out.push(dep.clone());
            dfs_collect(graph, &dep, visited, out, skip_self);
        }
    }
}

/// DFS from `node`, invoking `callback` once per newly-visited node.
pub fn dfs(graph: &DependencyGraph, node: &str, visited: &mut FxHashSet<String>, callback: &mut dyn FnMut(&str)) {
    if !visited.insert(node.to_string()) {
        return;
    }
    callback(node);
    for dep in graph.get_dependencies(node) {
        dfs(graph, &dep, visited, callback);
    }
}

/// BFS from `start`, invoking `callback(node, level)` once per node, with
/// `start` at level 0.
pub fn bfs(graph: &DependencyGraph, start: &str, mut callback: impl FnMut(&str, usize)) {
    if !graph.has_node(start) {
        return;
    }
    let mut visited = FxHashSet::default();
    let mut queue = VecDeque::new();
    queue.push_back((start.to_string(), 0usize));
    visited.insert(start.to_string());

    while let Some((node, level)) = queue.pop_front() {
        callback(&node, level);
        for dep in graph.get_dependencies(&node) {
            if visited.insert(dep.clone()) {
                queue.push_back((dep, level + 1));
            }
        }
    }
}

/// A new graph with every edge's direction flipped.
pub fn reverse_graph(graph: &DependencyGraph) -> DependencyGraph {
    let mut reversed = DependencyGraph::new();
    for node in graph.get_all_nodes() {
        reversed.add_node(&node);
        for edge in graph.get_edges(&node) {
            reversed.add_edge(&edge.target, &node, edge.edge_type, edge.weight);
        }
    }
    reversed
}

/// Subgraph retaining only the given nodes and edges between them.
pub fn subgraph(graph: &DependencyGraph, nodes: &[String]) -> DependencyGraph {
    let keep: FxHashSet<&str> = nodes.iter().map(|s| s.as_str()).collect();
    let mut sub = DependencyGraph::new();
    for node in nodes {
        sub.add_node(node);
    }
    for node in nodes {
        for edge in graph.get_edges(node) {
            if keep.contains(edge.target.as_str()) {
                sub.add_edge(node, &edge.target, edge.edge_type, edge.weight);
            }
        }
    }
    sub
}

/// Heaviest dependency chain: `dist[v] = weight(v) + max(dist[pred])` over
/// the topological order. Missing weights default to 0. Ties break toward
/// the first node encountered in topological order.
pub fn find_critical_path(graph: &DependencyGraph, weights: &FxHashMap<String, f64>) -> Vec<String> {
    let order = topological_sort(graph);
    if order.len() < graph.node_count() {
        return Vec::new();
    }

    let mut dist: FxHashMap<&str, f64> = FxHashMap::default();
    let mut parent: FxHashMap<&str, &str> = FxHashMap::default();

    for node in &order {
        let w = weights.get(node).copied().unwrap_or(0.0);
        dist.insert(node.as_str(), w);
    }

    for node in &order {
        for dep in graph.get_dependencies(node) {
            let dep_key = leak_or_find(&order, &dep);
            let candidate = dist[node.as_str()] + weights.get(dep_key).copied().unwrap_or(0.0);
            if candidate > dist[dep_key] {
                dist.insert(dep_key, candidate);
                parent.insert(dep_key, node.as_str());
            }
        }
    }

    let mut end: Option<&str> = None;
    let mut end_dist = f64::NEG_INFINITY;
    for node in &order {
        let d = dist[node.as_str()];
        if d > end_dist {
            end_dist = d;
            end = Some(node.as_str());
        }
    }
    let Some(end) = end else {
        return Vec::new();
    };

    let mut path = vec![end];
    let mut cur = end;
    while let Some(&p) = parent.get(cur) {
        path.push(p);
        cur = p;
    }
    path.reverse();
    path.into_iter().map(|s| s.to_string()).collect()
}

/// Number of distinct paths from `start` to `end`, memoized DP over DFS.
pub fn count_paths(graph: &DependencyGraph, start: &str, end: &str) -> i64 {
    if !graph.has_node(start) || !graph.has_node(end) {
        return 0;
    }
    let mut memo: FxHashMap<String, i64> = FxHashMap::default();
    let mut in_progress: FxHashSet<String> = FxHashSet::default();

    fn visit(
        node: &str,
        end: &str,
        graph: &DependencyGraph,
        memo: &mut FxHashMap<String, i64>,
        in_progress: &mut FxHashSet<String>,
    ) -> i64 {
        if node == end {
            return 1;
        }
        if let Some(&v) = memo.get(node) {
            return v;
        }
        if in_progress.contains(node) {
            return 0;
        }
        in_progress.insert(node.to_string());
        let mut total = 0i64;
        for dep in graph.get_dependencies(node) {
            total += visit(&dep, end, graph, memo, in_progress);
        }
        in_progress.remove(node);
        memo.insert(node.to_string(), total);
        total
    }

    visit(start, end, graph, &mut memo, &mut in_progress)
}
