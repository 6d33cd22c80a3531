// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

use torus_topology::shape::TorusShape;

const SMALL_SHAPES: [(usize, usize); 9] = [
    (1, 1),
    (1, 3),
    (2, 1),
    (2, 3),
    (3, 2),
    (4, 1),
    (4, 2),
    (5, 3),
    (8, 2),
];

#[test]
fn ring_closure() {
    for (k, n) in SMALL_SHAPES {
        let shape = TorusShape::new(k, n);
        for node in 0..shape.num_nodes() {
            for dim in 0..n {
                let next = shape.next_node(node, dim);
                let prev = shape.prev_node(node, dim);
                assert!(next < shape.num_nodes());
                assert!(prev < shape.num_nodes());
                assert_eq!(shape.prev_node(next, dim), node, "{shape} node {node}");
                assert_eq!(shape.next_node(prev, dim), node, "{shape} node {node}");
            }
        }
    }
}

#[test]
fn ring_cycle_length() {
    for (k, n) in SMALL_SHAPES {
        let shape = TorusShape::new(k, n);
        for node in 0..shape.num_nodes() {
            for dim in 0..n {
                let mut current = shape.next_node(node, dim);
                let mut steps = 1;
                while current != node {
                    current = shape.next_node(current, dim);
                    steps += 1;
                    assert!(steps <= k, "{shape} ring from {node} too long");
                }
                assert_eq!(steps, k);
            }
        }
    }
}

#[test]
fn only_one_coordinate_changes() {
    let shape = TorusShape::new(3, 3);
    for node in 0..shape.num_nodes() {
        for dim in 0..3 {
            let before = shape.coordinates(node);
            let after = shape.coordinates(shape.next_node(node, dim));
            for d in 0..3 {
                if d == dim {
                    assert_eq!(after[d], (before[d] + 1) % 3);
                } else {
                    assert_eq!(after[d], before[d]);
                }
            }
        }
    }
}

#[test]
fn four_ary_two_cube() {
    let shape = TorusShape::new(4, 2);
    assert_eq!(shape.num_nodes(), 16);
    assert_eq!(shape.num_channels(), 32);

    assert_eq!(shape.next_node(0, 0), 1);
    assert_eq!(shape.prev_node(0, 0), 3);
    assert_eq!(shape.next_node(3, 0), 0);
    assert_eq!(shape.prev_node(3, 0), 2);
    assert_eq!(shape.next_node(12, 1), 0);
    assert_eq!(shape.prev_node(12, 1), 8);
}

#[test]
fn coordinates_round_trip() {
    let shape = TorusShape::new(5, 3);
    for node in 0..shape.num_nodes() {
        assert_eq!(shape.node_at(&shape.coordinates(node)), node);
    }
    assert_eq!(shape.coordinates(7), vec![2, 1, 0]);
    assert_eq!(shape.node_at(&[4, 4, 4]), 124);
}

#[test]
fn single_node_rings() {
    let shape = TorusShape::new(1, 3);
    assert_eq!(shape.num_nodes(), 1);
    for dim in 0..3 {
        assert_eq!(shape.next_node(0, dim), 0);
        assert_eq!(shape.prev_node(0, dim), 0);
    }
}

#[test]
#[should_panic(expected = "Torus radix k must be at least 1")]
fn zero_radix() {
    let _shape = TorusShape::new(0, 2);
}
