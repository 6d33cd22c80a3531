// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

//! Mixed-radix coordinates of a k-ary n-cube.
//!
//! A node is a linear index in `[0, k^n)`. Its coordinate in dimension `dim`
//! is the digit `(node / k^dim) % k`, so dimension 0 is the least significant
//! digit. Each dimension forms a ring of `k` nodes which is only traversed in
//! the increasing (clockwise) direction.
//!
//! ```rust
//! use torus_topology::shape::TorusShape;
//!
//! let shape = TorusShape::new(4, 2);
//! assert_eq!(shape.num_nodes(), 16);
//! assert_eq!(shape.next_node(3, 0), 0);
//! assert_eq!(shape.prev_node(0, 0), 3);
//! assert_eq!(shape.coordinates(9), vec![1, 2]);
//! ```

use std::fmt;

use itertools::Itertools;

/// The immutable shape of a unidirectional torus.
///
/// This is the value handed to anything that needs to know how the network
/// is laid out (traffic generators, routing functions) rather than reading
/// global state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TorusShape {
    /// Number of nodes in each ring.
    k: usize,

    /// Number of dimensions.
    n: usize,

    /// Total number of nodes, `k^n`.
    size: usize,

    /// `k^dim` for each dimension.
    radix_powers: Vec<usize>,
}

impl TorusShape {
    /// Create the shape of a `k`-ary `n`-cube.
    ///
    /// # Panics
    ///
    /// Panics if `k` or `n` is zero, or if `k^n` channels cannot be indexed
    /// with a `usize`.
    #[must_use]
    pub fn new(k: usize, n: usize) -> Self {
        assert!(k >= 1, "Torus radix k must be at least 1 (got {k})");
        assert!(n >= 1, "Torus dimension n must be at least 1 (got {n})");

        let mut radix_powers = Vec::with_capacity(n);
        let mut power: usize = 1;
        for _ in 0..n {
            radix_powers.push(power);
            power = power
                .checked_mul(k)
                .unwrap_or_else(|| panic!("Torus of {k}^{n} nodes is too large"));
        }
        let size = power;
        assert!(
            size.checked_mul(n).is_some(),
            "Torus of {k}^{n} nodes has too many channels"
        );

        Self {
            k,
            n,
            size,
            radix_powers,
        }
    }

    /// Number of nodes in each ring.
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of dimensions.
    #[must_use]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Total number of nodes (and routers).
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.size
    }

    /// Total number of router-to-router channels.
    ///
    /// Only one channel leaves a node per dimension.
    #[must_use]
    pub fn num_channels(&self) -> usize {
        self.n * self.size
    }

    /// `k^dim`, the distance in node index between neighbours in `dim`.
    #[must_use]
    pub fn radix_power(&self, dim: usize) -> usize {
        self.radix_powers[dim]
    }

    /// Digit of `node` in dimension `dim`, i.e. `(node / k^dim) % k`.
    #[must_use]
    pub fn coordinate(&self, node: usize, dim: usize) -> usize {
        (node / self.radix_powers[dim]) % self.k
    }

    /// All digits of `node`, dimension 0 first.
    #[must_use]
    pub fn coordinates(&self, node: usize) -> Vec<usize> {
        (0..self.n).map(|dim| self.coordinate(node, dim)).collect()
    }

    /// The node at the given coordinates (dimension 0 first).
    ///
    /// # Panics
    ///
    /// Panics if the wrong number of coordinates is given or if any digit is
    /// not less than `k`.
    #[must_use]
    pub fn node_at(&self, coordinates: &[usize]) -> usize {
        assert_eq!(
            coordinates.len(),
            self.n,
            "Expected {} coordinates, got {coordinates:?}",
            self.n
        );
        coordinates
            .iter()
            .zip(self.radix_powers.iter())
            .map(|(&digit, &power)| {
                assert!(digit < self.k, "Coordinate {digit} out of range 0..{}", self.k);
                digit * power
            })
            .sum()
    }

    /// The next node clockwise around the ring of dimension `dim`.
    #[must_use]
    pub fn next_node(&self, node: usize, dim: usize) -> usize {
        let k_to_dim = self.radix_powers[dim];
        if self.coordinate(node, dim) == self.k - 1 {
            // Wrap around to the start of the ring
            node - (self.k - 1) * k_to_dim
        } else {
            node + k_to_dim
        }
    }

    /// The previous node clockwise around the ring of dimension `dim`, i.e.
    /// the node whose output channel in `dim` feeds `node`.
    #[must_use]
    pub fn prev_node(&self, node: usize, dim: usize) -> usize {
        let k_to_dim = self.radix_powers[dim];
        if self.coordinate(node, dim) == 0 {
            // Wrap around to the end of the ring
            node + (self.k - 1) * k_to_dim
        } else {
            node - k_to_dim
        }
    }

    /// Deterministic router name built from the coordinates of `node`.
    ///
    /// The most significant dimension comes first, so node 6 of a 4-ary
    /// 2-cube is `router_1_2`. With `k == 1` there is only one node and it is
    /// named `router`.
    #[must_use]
    pub fn router_name(&self, node: usize) -> String {
        if self.k > 1 {
            let digits = (0..self.n)
                .rev()
                .map(|dim| self.coordinate(node, dim))
                .join("_");
            format!("router_{digits}")
        } else {
            "router".to_string()
        }
    }
}

impl fmt::Display for TorusShape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-ary {}-cube", self.k, self.n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes() {
        let shape = TorusShape::new(4, 2);
        assert_eq!(shape.num_nodes(), 16);
        assert_eq!(shape.num_channels(), 32);

        let shape = TorusShape::new(3, 3);
        assert_eq!(shape.num_nodes(), 27);
        assert_eq!(shape.num_channels(), 81);
        assert_eq!(shape.radix_power(2), 9);
    }

    #[test]
    fn router_names() {
        let shape = TorusShape::new(4, 2);
        assert_eq!(shape.router_name(0), "router_0_0");
        assert_eq!(shape.router_name(6), "router_1_2");
        assert_eq!(shape.router_name(15), "router_3_3");

        let shape = TorusShape::new(1, 3);
        assert_eq!(shape.router_name(0), "router");
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", TorusShape::new(8, 3)), "8-ary 3-cube");
    }

    #[test]
    #[should_panic(expected = "Torus radix k must be at least 1")]
    fn zero_radix() {
        let _ = TorusShape::new(0, 2);
    }

    #[test]
    #[should_panic(expected = "Torus dimension n must be at least 1")]
    fn zero_dimensions() {
        let _ = TorusShape::new(4, 0);
    }

    #[test]
    #[should_panic(expected = "is too large")]
    fn overflow() {
        let _ = TorusShape::new(1 << 20, 8);
    }
}
