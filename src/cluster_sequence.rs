use std::cmp::Ordering;

use log::{debug, trace};

use crate::jets::{JetAlgorithm, JetDefinition};
use crate::momentum::FourMomentum;

/// One entry in the clustering history
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClusterNode {
    momentum: FourMomentum,
    children: Option<(usize, usize)>,
    distance: f64,
}

impl ClusterNode {
    fn input(momentum: FourMomentum) -> Self {
        Self {
            momentum,
            children: None,
            distance: 0.,
        }
    }

    pub fn momentum(&self) -> &FourMomentum {
        &self.momentum
    }

    /// Indices of the two merged nodes, lower index first
    ///
    /// `None` for input particles.
    pub fn children(&self) -> Option<(usize, usize)> {
        self.children
    }

    /// Angular distance ΔR between the children at the time of merging
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn is_input(&self) -> bool {
        self.children.is_none()
    }
}

/// Complete pairwise clustering history of one event
///
/// The first `n_inputs()` nodes are the inputs in their original
/// order, every further node is the result of merging two earlier
/// nodes. The sequence never changes after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterSequence {
    nodes: Vec<ClusterNode>,
    n_inputs: usize,
    final_nodes: Vec<usize>,
    definition: JetDefinition,
}

// Candidate pair for merging, ordered by distance and then by the
// node indices
#[derive(Copy, Clone, Debug)]
struct PairKey {
    dist2: f64,
    lo: usize,
    hi: usize,
}

impl PairKey {
    fn new(dist2: f64, i: usize, j: usize) -> Self {
        Self {
            dist2,
            lo: i.min(j),
            hi: i.max(j),
        }
    }

    fn involves(&self, i: usize) -> bool {
        self.lo == i || self.hi == i
    }
}

impl PartialEq for PairKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PairKey {}

impl PartialOrd for PairKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PairKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist2
            .total_cmp(&other.dist2)
            .then(self.lo.cmp(&other.lo))
            .then(self.hi.cmp(&other.hi))
    }
}

impl ClusterSequence {
    /// Cluster the given inputs
    ///
    /// The Cambridge/Aachen algorithm merges the pair with the smallest
    /// angular distance ΔR as long as that distance is below the jet
    /// radius. All nodes left over at that point are final jets.
    pub fn new(inputs: Vec<FourMomentum>, definition: JetDefinition) -> Self {
        let n_inputs = inputs.len();
        let mut nodes = Vec::with_capacity(2 * n_inputs);
        nodes.extend(inputs.into_iter().map(ClusterNode::input));
        let mut seq = Self {
            nodes,
            n_inputs,
            final_nodes: Vec::new(),
            definition,
        };
        match definition.algorithm {
            JetAlgorithm::CambridgeAachen => seq.cluster_cambridge_aachen(),
        }
        debug!(
            "Clustered {} inputs into {} final jets with {} merges",
            seq.n_inputs,
            seq.final_nodes.len(),
            seq.nodes.len() - seq.n_inputs
        );
        seq
    }

    fn cluster_cambridge_aachen(&mut self) {
        let r2 = self.definition.radius * self.definition.radius;
        let mut coords: Vec<[f64; 2]> =
            self.nodes.iter().map(|n| eta_phi(&n.momentum)).collect();
        let mut active: Vec<usize> = (0..self.n_inputs).collect();
        let mut nearest: Vec<Option<PairKey>> = active
            .iter()
            .map(|&i| nearest_neighbour(i, &active, &coords))
            .collect();

        while let Some(best) =
            active.iter().filter_map(|&i| nearest[i]).min()
        {
            if best.dist2 >= r2 {
                break;
            }
            let PairKey { dist2, lo, hi } = best;
            let merged = self.nodes[lo].momentum + self.nodes[hi].momentum;
            let new = self.nodes.len();
            trace!(
                "Merging nodes {lo} and {hi} at ΔR = {} into node {new}",
                dist2.sqrt()
            );
            self.nodes.push(ClusterNode {
                momentum: merged,
                children: Some((lo, hi)),
                distance: dist2.sqrt(),
            });
            coords.push(eta_phi(&merged));
            nearest.push(None);
            active.retain(|&i| i != lo && i != hi);
            active.push(new);

            for &i in &active[..active.len() - 1] {
                let stale = nearest[i].map_or(true, |k| k.involves(lo) || k.involves(hi));
                if stale {
                    nearest[i] = nearest_neighbour(i, &active, &coords);
                } else {
                    let key = PairKey::new(dist2_between(&coords[i], &coords[new]), i, new);
                    if nearest[i].map_or(true, |cur| key < cur) {
                        nearest[i] = Some(key);
                    }
                }
            }
            nearest[new] = nearest_neighbour(new, &active, &coords);
        }
        // no pair is closer than the radius any more, so nothing else
        // can merge
        self.final_nodes = active;
    }

    pub fn nodes(&self) -> &[ClusterNode] {
        &self.nodes
    }

    pub fn node(&self, idx: usize) -> Option<&ClusterNode> {
        self.nodes.get(idx)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn n_inputs(&self) -> usize {
        self.n_inputs
    }

    pub fn definition(&self) -> &JetDefinition {
        &self.definition
    }

    /// Nodes that were not merged further, in ascending index order
    pub fn final_nodes(&self) -> &[usize] {
        &self.final_nodes
    }

    pub fn children(&self, idx: usize) -> Option<(usize, usize)> {
        self.nodes.get(idx).and_then(|n| n.children)
    }

    /// Indices of the inputs clustered into the given node, in ascending order
    pub fn constituents(&self, idx: usize) -> Vec<usize> {
        let mut res = Vec::new();
        let mut todo = vec![idx];
        while let Some(idx) = todo.pop() {
            match self.children(idx) {
                Some((c1, c2)) => todo.extend([c1, c2]),
                None if idx < self.n_inputs => res.push(idx),
                None => {}
            }
        }
        res.sort_unstable();
        res
    }

    /// Final nodes with transverse momentum of at least `pt_min`,
    /// ordered by decreasing transverse momentum
    pub fn inclusive_jets(&self, pt_min: f64) -> Vec<usize> {
        let mut jets = Vec::from_iter(
            self.final_nodes
                .iter()
                .copied()
                .filter(|&i| self.nodes[i].momentum.pt() >= pt_min),
        );
        jets.sort_by(|&i, &j| {
            let pt_i = self.nodes[i].momentum.pt2();
            let pt_j = self.nodes[j].momentum.pt2();
            pt_j.total_cmp(&pt_i)
        });
        jets
    }
}

fn eta_phi(p: &FourMomentum) -> [f64; 2] {
    [p.eta(), p.phi()]
}

fn dist2_between(a: &[f64; 2], b: &[f64; 2]) -> f64 {
    use std::f64::consts::PI;
    let deta = a[0] - b[0];
    let mut dphi = (a[1] - b[1]).abs();
    if dphi > PI {
        dphi = 2. * PI - dphi;
    }
    deta * deta + dphi * dphi
}

fn nearest_neighbour(
    i: usize,
    active: &[usize],
    coords: &[[f64; 2]],
) -> Option<PairKey> {
    active
        .iter()
        .filter(|&&j| j != i)
        .map(|&j| PairKey::new(dist2_between(&coords[i], &coords[j]), i, j))
        .min()
}
