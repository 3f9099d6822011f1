use graph_paths_core::{astar, bellman_ford, build_adjacency, dijkstra, EdgeRecord, Node, Positions};
use std::time::Instant;

/// Bellman-Ford is O(V·E); above this size it is skipped unless forced.
const BELLMAN_FORD_LIMIT: u64 = 20_000;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count = parse_node_count(args.get(2).map(|s| s.as_str()));
    let force_bf = args.iter().any(|a| a == "--force-bf");

    if mode == "help" || mode == "--help" {
        println!("Usage: graph-paths-bench [mode] [node_count] [--force-bf]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  grid        Square lattice with jittered weights (long paths)");
        println!("  random      Random geometric graph (local edges in the plane)");
        println!("  smallworld  Ring lattice + long-range shortcuts");
        println!("  barbell     Two dense clusters joined by a thin bridge");
        println!();
        println!("Default node_count: 100000");
        println!("Bellman-Ford runs only up to {} nodes unless --force-bf", BELLMAN_FORD_LIMIT);
        return;
    }

    println!("graph-paths-bench");
    println!("=================");
    println!();

    let generators: Vec<(&str, fn(u64) -> Workload)> = match mode {
        "grid" => vec![("Grid lattice", gen_grid)],
        "random" => vec![("Random geometric", gen_random)],
        "smallworld" => vec![("Small-world ring", gen_small_world)],
        "barbell" => vec![("Barbell (cluster-bridge-cluster)", gen_barbell)],
        "all" => vec![
            ("Grid lattice", gen_grid as fn(u64) -> Workload),
            ("Random geometric", gen_random),
            ("Small-world ring", gen_small_world),
            ("Barbell (cluster-bridge-cluster)", gen_barbell),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, node_count, force_bf);
    }
}

/// Generators need a source and a distinct goal, so at least two nodes.
fn parse_node_count(arg: Option<&str>) -> u64 {
    arg.and_then(|s| s.parse().ok()).unwrap_or(100_000).max(2)
}

/// A generated graph: caller-side collections plus orientation.
struct Workload {
    nodes: Vec<Node>,
    edges: Vec<EdgeRecord>,
    directed: bool,
}

fn run_benchmark(name: &str, generator: fn(u64) -> Workload, node_count: u64, force_bf: bool) {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let work = generator(node_count);
    println!(
        "Generated in {:.2}s: {} nodes, {} edges, {}",
        t.elapsed().as_secs_f64(),
        work.nodes.len(),
        work.edges.len(),
        if work.directed { "directed" } else { "undirected" }
    );

    let t = Instant::now();
    let adj = build_adjacency(&work.nodes, &work.edges, work.directed);
    println!("Adjacency built in {:.1}ms", t.elapsed().as_secs_f64() * 1000.0);

    let source = work.nodes[0].id.as_str();
    let goal = work.nodes[work.nodes.len() - 1].id.as_str();
    let positions = Positions::from_nodes(&work.nodes);

    println!();
    println!("{:>14} {:>14} {:>12} {:>10}", "solver", "distance", "work", "time");
    println!("{:->14} {:->14} {:->12} {:->10}", "", "", "", "");

    let t = Instant::now();
    match dijkstra(&adj, source) {
        Ok(tree) => {
            let elapsed = t.elapsed();
            let reached = tree.distances().filter(|(_, d)| d.is_finite()).count();
            print_row("dijkstra", tree.distance(goal), reached, "reached", elapsed);
        }
        Err(e) => println!("{:>14} error: {}", "dijkstra", e),
    }

    let t = Instant::now();
    match astar(&adj, source, goal, &positions) {
        Ok(out) => {
            let elapsed = t.elapsed();
            let cost = out.cost().unwrap_or(f64::INFINITY);
            print_row("astar", cost, out.expanded, "expanded", elapsed);
        }
        Err(e) => println!("{:>14} error: {}", "astar", e),
    }

    if force_bf || node_count <= BELLMAN_FORD_LIMIT {
        let t = Instant::now();
        match bellman_ford(&adj, work.nodes.iter().map(|n| n.id.as_str()), source) {
            Ok(out) => {
                let elapsed = t.elapsed();
                print_row("bellman-ford", out.distance(goal), out.passes, "passes", elapsed);
                if out.has_negative_cycle {
                    println!("{:>14} negative cycle reported", "");
                }
            }
            Err(e) => println!("{:>14} error: {}", "bellman-ford", e),
        }
    } else {
        println!("{:>14} skipped (> {} nodes, use --force-bf)", "bellman-ford", BELLMAN_FORD_LIMIT);
    }
    println!();
}

fn print_row(solver: &str, distance: f64, work: usize, unit: &str, elapsed: std::time::Duration) {
    let dist = if distance.is_finite() {
        format!("{:.2}", distance)
    } else {
        "unreachable".to_string()
    };
    println!(
        "{:>14} {:>14} {:>12} {:>8.1}ms  ({})",
        solver,
        dist,
        work,
        elapsed.as_secs_f64() * 1000.0,
        unit
    );
}

// ---------------------------------------------------------------------------
// Generators: O(n + edges), single-threaded and seeded.
// Weights never undercut the straight-line distance, so A* stays admissible.
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn node_at(i: u64, x: f64, y: f64) -> Node {
    Node::new(format!("n{}", i), format!("n{}", i)).at(x, y)
}

/// Edge weight: straight-line length times a random stretch in [1, 1.5).
fn weighted_edge(rng: &mut FastRng, id: usize, a: &Node, b: &Node) -> EdgeRecord {
    let len = a.position().distance(&b.position());
    EdgeRecord::new(
        format!("e{}", id),
        a.id.clone(),
        b.id.clone(),
        len * (1.0 + rng.next_f64() * 0.5),
    )
}

/// Square lattice: each node links right and down. Longest shortest paths
/// for a given size; A* gains the most here.
fn gen_grid(node_count: u64) -> Workload {
    let side = (node_count as f64).sqrt().ceil().max(2.0) as u64;
    let mut rng = FastRng::new(42);

    let nodes: Vec<Node> = (0..side * side)
        .map(|i| node_at(i, (i % side) as f64, (i / side) as f64))
        .collect();

    let mut edges = Vec::with_capacity(nodes.len() * 2);
    for i in 0..side * side {
        let (x, y) = (i % side, i / side);
        if x + 1 < side {
            let id = edges.len();
            edges.push(weighted_edge(&mut rng, id, &nodes[i as usize], &nodes[(i + 1) as usize]));
        }
        if y + 1 < side {
            let id = edges.len();
            edges.push(weighted_edge(&mut rng, id, &nodes[i as usize], &nodes[(i + side) as usize]));
        }
    }

    Workload {
        nodes,
        edges,
        directed: false,
    }
}

/// Random geometric graph: nodes scattered in a square, each linked to a few
/// nearby nodes found by bucketing into cells.
fn gen_random(node_count: u64) -> Workload {
    let mut rng = FastRng::new(54321);
    let side = (node_count as f64).sqrt().max(1.0);
    let cells = side.ceil() as usize;

    let nodes: Vec<Node> = (0..node_count)
        .map(|i| node_at(i, rng.next_f64() * side, rng.next_f64() * side))
        .collect();

    let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); cells * cells];
    for (i, n) in nodes.iter().enumerate() {
        let p = n.position();
        let cx = (p.x as usize).min(cells - 1);
        let cy = (p.y as usize).min(cells - 1);
        buckets[cy * cells + cx].push(i);
    }

    let mut edges = Vec::with_capacity(nodes.len() * 4);
    for (i, n) in nodes.iter().enumerate() {
        let p = n.position();
        let cx = (p.x as usize).min(cells - 1);
        let cy = (p.y as usize).min(cells - 1);
        for _ in 0..4 {
            // Pick a neighbouring cell, then a random node in it
            let nx = (cx + rng.next(3) as usize).saturating_sub(1).min(cells - 1);
            let ny = (cy + rng.next(3) as usize).saturating_sub(1).min(cells - 1);
            let bucket = &buckets[ny * cells + nx];
            if bucket.is_empty() {
                continue;
            }
            let j = bucket[rng.next(bucket.len() as u64) as usize];
            if j != i {
                let id = edges.len();
                edges.push(weighted_edge(&mut rng, id, n, &nodes[j]));
            }
        }
    }

    Workload {
        nodes,
        edges,
        directed: true,
    }
}

/// Small-world: nodes on a circle, each linked to K neighbours ahead, with a
/// small share of edges rewired to random far nodes.
fn gen_small_world(node_count: u64) -> Workload {
    let k = 4u64;
    let p = 0.05f64;
    let mut rng = FastRng::new(67890);
    let radius = node_count as f64 / std::f64::consts::TAU;

    let nodes: Vec<Node> = (0..node_count)
        .map(|i| {
            let angle = i as f64 / node_count as f64 * std::f64::consts::TAU;
            node_at(i, radius * angle.cos(), radius * angle.sin())
        })
        .collect();

    let mut edges = Vec::with_capacity((node_count * k) as usize);
    for i in 0..node_count {
        for j in 1..=k {
            let target = if rng.next_f64() < p {
                rng.next(node_count)
            } else {
                (i + j) % node_count
            };
            if target != i {
                let id = edges.len();
                edges.push(weighted_edge(&mut rng, id, &nodes[i as usize], &nodes[target as usize]));
            }
        }
    }

    Workload {
        nodes,
        edges,
        directed: false,
    }
}

/// Barbell: two dense clusters joined by a chain of bridge nodes. The goal
/// sits in the far cluster, so every route crosses the bottleneck.
fn gen_barbell(node_count: u64) -> Workload {
    let bridge_len = 10u64;
    let cluster = (node_count.max(bridge_len + 4) - bridge_len) / 2;
    let mut rng = FastRng::new(99999);
    let spread = (cluster as f64).sqrt();

    let mut nodes = Vec::with_capacity((cluster * 2 + bridge_len) as usize);
    for i in 0..cluster {
        nodes.push(node_at(i, rng.next_f64() * spread, rng.next_f64() * spread));
    }
    for i in 0..bridge_len {
        nodes.push(node_at(cluster + i, spread + 1.0 + i as f64, spread / 2.0));
    }
    let b_start = cluster + bridge_len;
    let offset = spread + bridge_len as f64 + 2.0;
    for i in 0..cluster {
        nodes.push(node_at(
            b_start + i,
            offset + rng.next_f64() * spread,
            rng.next_f64() * spread,
        ));
    }

    let mut edges = Vec::new();
    for base in [0, b_start] {
        for i in 0..cluster {
            for _ in 0..8u64.min(cluster - 1) {
                let t = rng.next(cluster);
                if t != i {
                    let id = edges.len();
                    let (a, b) = ((base + i) as usize, (base + t) as usize);
                    edges.push(weighted_edge(&mut rng, id, &nodes[a], &nodes[b]));
                }
            }
        }
    }

    // Chain: last node of cluster A -> bridge -> first node of cluster B
    for i in 0..=bridge_len {
        let (a, b) = ((cluster - 1 + i) as usize, (cluster + i) as usize);
        let id = edges.len();
        edges.push(weighted_edge(&mut rng, id, &nodes[a], &nodes[b]));
    }

    Workload {
        nodes,
        edges,
        directed: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_count_clamped() {
        assert_eq!(parse_node_count(None), 100_000);
        assert_eq!(parse_node_count(Some("500")), 500);
        assert_eq!(parse_node_count(Some("0")), 2);
        assert_eq!(parse_node_count(Some("1")), 2);
        assert_eq!(parse_node_count(Some("lots")), 100_000);
    }

    #[test]
    fn test_generators_at_minimum_size() {
        for generator in [gen_grid as fn(u64) -> Workload, gen_random, gen_small_world, gen_barbell] {
            let work = generator(parse_node_count(Some("0")));
            assert!(work.nodes.len() >= 2);
            let adj = build_adjacency(&work.nodes, &work.edges, work.directed);
            assert!(dijkstra(&adj, &work.nodes[0].id).is_ok());
        }
    }
}
