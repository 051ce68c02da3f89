use super::*;

fn degrees(g: &Graph) -> Vec<usize> {
    let mut d: Vec<usize> = g.iter().map(<[usize]>::len).collect();
    d.sort_unstable();
    d
}

fn is_connected(g: &Graph) -> bool {
    if g.is_empty() {
        return true;
    }
    let mut seen = vec![false; g.size()];
    let mut stack = vec![0];
    seen[0] = true;
    while let Some(v) = stack.pop() {
        for &w in g.neighbors(v) {
            if !seen[w] {
                seen[w] = true;
                stack.push(w);
            }
        }
    }
    seen.into_iter().all(|s| s)
}

#[test]
fn tree_reference_edges() {
    let mut rng = Xoshiro256pp::new(0);
    let g = Tree::new(6).unwrap().generate(&mut rng);
    assert_eq!(g.to_string(), "0 1\n1 2\n1 3\n2 4\n4 5");
    assert_eq!(
        g.edges(),
        vec![(0, 1), (1, 2), (1, 3), (2, 4), (4, 5)]
    );
}

#[test]
fn tree_range_limits_parents() {
    let mut rng = Xoshiro256pp::new(0);
    let g = Tree::with_range(6, 2).unwrap().generate(&mut rng);
    assert_eq!(g.edges(), vec![(0, 1), (1, 2), (1, 3), (2, 4), (3, 5)]);

    let mut rng = Xoshiro256pp::new(0);
    let path = Tree::with_range(6, 1).unwrap().generate(&mut rng);
    assert_eq!(path.to_string(), "0 1\n1 2\n2 3\n3 4\n4 5");
}

#[test]
fn trees_are_connected_and_acyclic() {
    let mut rng = Xoshiro256pp::new(3);
    for n in [1, 2, 10, 57] {
        let g = Tree::new(n).unwrap().generate(&mut rng);
        assert_eq!(g.size(), n);
        assert_eq!(g.edges().len(), n - 1);
        assert!(is_connected(&g));
    }
}

#[test]
fn tree_draws_once_per_vertex() {
    let mut rng = Xoshiro256pp::new(0);
    Tree::new(6).unwrap().generate(&mut rng);
    let mut expected = Xoshiro256pp::new(0);
    for _ in 0..5 {
        expected.next_u64();
    }
    assert_eq!(rng, expected);
}

#[test]
fn schema_sizes_are_checked() {
    assert!(matches!(
        Tree::new(0),
        Err(TestgenError::InvalidParameter { what: "tree size", .. })
    ));
    assert!(Tree::with_range(5, 0).is_err());
    assert!(Path::new(0).is_err());
    assert!(Clique::new(0).is_err());
    assert!(Star::new(0).is_err());
    assert!(matches!(
        Cycle::new(2),
        Err(TestgenError::InvalidParameter {
            what: "cycle size",
            value: 2
        })
    ));
    assert!(Cycle::new(3).is_ok());
}

#[test]
fn static_shapes() {
    assert_eq!(Path::new(4).unwrap().build().to_string(), "0 1\n1 2\n2 3");
    assert_eq!(Cycle::new(4).unwrap().build().edges().len(), 4);
    assert_eq!(Star::new(4).unwrap().build().to_string(), "0 1\n0 2\n0 3");
    let k5 = Clique::new(5).unwrap().build();
    assert_eq!(k5.edges().len(), 10);
    assert_eq!(degrees(&k5), vec![4; 5]);
    assert!(Path::new(1).unwrap().build().edges().is_empty());
}

#[test]
fn generated_static_shapes_are_permuted() {
    let mut rng = Xoshiro256pp::new(0);
    let g = Path::new(4).unwrap().generate(&mut rng);
    // permutation 3 2 1 0 of the path
    assert_eq!(g.neighbors(0), &[1]);
    assert_eq!(&g[1], &[0, 2]);
    assert_eq!(&g[2], &[1, 3]);

    let mut rng = Xoshiro256pp::new(5);
    let star = Star::new(9).unwrap().generate(&mut rng);
    assert_eq!(degrees(&star), [vec![1; 8], vec![8]].concat());
    let cycle = Cycle::new(7).unwrap().generate(&mut rng);
    assert_eq!(degrees(&cycle), vec![2; 7]);
    assert!(is_connected(&cycle));
}

#[test]
fn permute_keeps_shape() {
    let mut g = Graph::new(5);
    g.add_edge(0, 1);
    g.add_edge(0, 2);
    g.add_edge(3, 3);
    g.add_edge(1, 2);
    let before = degrees(&g);
    let mut rng = Xoshiro256pp::new(1);
    g.permute(&mut rng);
    assert_eq!(degrees(&g), before);
    assert_eq!(g.edges().len(), 4);
}

#[test]
fn loops_are_stored_once() {
    let mut g = Graph::new(2);
    g.add_edge(1, 1);
    g.add_edge(0, 1);
    assert_eq!(g.neighbors(1), &[1, 0]);
    assert_eq!(g.edges(), vec![(0, 1), (1, 1)]);
}

#[test]
fn make_simple_drops_loops_and_duplicates() {
    let mut g = Graph::new(3);
    g.add_edge(0, 1);
    g.add_edge(1, 0);
    g.add_edge(2, 2);
    g.add_edge(1, 2);
    g.make_simple();
    assert_eq!(g.to_string(), "0 1\n1 2");
}

#[test]
fn contract_moves_edges() {
    let mut g = Path::new(4).unwrap().build();
    assert_eq!(g.contract(1, 3), 1);
    assert!(g.neighbors(3).is_empty());
    assert_eq!(g.edges(), vec![(0, 1), (1, 2), (1, 2)]);
    assert_eq!(g.contract(2, 2), 2);
}

#[test]
fn remove_isolated_renumbers() {
    let mut g = Graph::new(5);
    g.add_edge(1, 3);
    g.add_edge(3, 4);
    g.remove_isolated();
    assert_eq!(g.size(), 3);
    assert_eq!(g.to_string(), "0 1\n1 2");
}

#[test]
fn merge_shifts_the_second_graph() {
    let a = Path::new(2).unwrap().build();
    let b = Path::new(3).unwrap().build();
    let m = merge(&a, &b, &[(1, 0)]);
    assert_eq!(m.size(), 5);
    assert_eq!(m.edges(), vec![(0, 1), (1, 2), (2, 3), (3, 4)]);
}

#[test]
fn identify_glues_on_shared_vertices() {
    let a = Path::new(3).unwrap().build();
    let b = Path::new(2).unwrap().build();
    let g = identify(&a, &b, &[(2, 0)]);
    assert_eq!(g.size(), 4);
    assert_eq!(g.to_string(), "0 1\n1 2\n2 3");

    let tri = identify(&a, &b, &[(0, 0), (2, 1)]);
    assert_eq!(tri.to_string(), "0 1\n0 2\n1 2");
}

#[test]
fn empty_graph_prints_nothing() {
    assert_eq!(Graph::new(0).to_string(), "");
    assert_eq!(Graph::new(3).to_string(), "");
    assert!(Graph::new(0).is_empty());
}
