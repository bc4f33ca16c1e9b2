//! Read-only inspection of a multi-splay forest: the structural validator
//! used by tests and the debug printer.

use std::cmp::{Ordering, Reverse};

use crate::util::{first, last, next};

use super::types::MultisplayNode;

#[path = "util/print.rs"]
mod print_impl;

pub use print_impl::print;

/// Walks every node reachable from `root`, checking parent links, and
/// returns the preorder together with each node's absolute reference depth
/// (indexed by arena slot).
fn physical_preorder<K, V>(
    arena: &[MultisplayNode<K, V>],
    root: u32,
) -> Result<(Vec<u32>, Vec<i32>), String> {
    let mut depth = vec![0; arena.len()];
    let mut seen = vec![false; arena.len()];
    let mut order = Vec::with_capacity(arena.len());
    let mut stack = vec![(root, arena[root as usize].delta_ref_depth)];
    while let Some((idx, d)) = stack.pop() {
        if std::mem::replace(&mut seen[idx as usize], true) {
            return Err(format!("Node {idx} is reachable twice"));
        }
        depth[idx as usize] = d;
        order.push(idx);
        let node = &arena[idx as usize];
        for c in [node.r, node.l].into_iter().flatten() {
            if c as usize >= arena.len() {
                return Err(format!("Node {idx} links to missing slot {c}"));
            }
            if arena[c as usize].p != Some(idx) {
                return Err(format!("Broken parent link between {idx} and {c}"));
            }
            stack.push((c, d + arena[c as usize].delta_ref_depth));
        }
    }
    if order.len() != arena.len() {
        return Err(format!(
            "Only {} of {} nodes are reachable from the root",
            order.len(),
            arena.len()
        ));
    }
    Ok((order, depth))
}

/// Reference tree rebuilt from in-order positions and absolute depths.
/// All indices are in-order positions.
struct Reference {
    root: usize,
    parent: Vec<Option<usize>>,
    left: Vec<Option<usize>>,
    right: Vec<Option<usize>>,
    /// Half-open range of positions covered by each node's subtree.
    range: Vec<(usize, usize)>,
}

fn rebuild_reference(depths: &[i32]) -> Result<Reference, String> {
    let n = depths.len();
    let mut tree = Reference {
        root: 0,
        parent: vec![None; n],
        left: vec![None; n],
        right: vec![None; n],
        range: vec![(0, 0); n],
    };
    let mut work = vec![(0, n, None, false)];
    while let Some((lo, hi, parent, is_right)) = work.pop() {
        if lo == hi {
            continue;
        }
        let mut top = lo;
        let mut ties = 0;
        for pos in lo..hi {
            match depths[pos].cmp(&depths[top]) {
                Ordering::Less => {
                    top = pos;
                    ties = 0;
                }
                Ordering::Equal if pos != top => ties += 1,
                _ => {}
            }
        }
        if ties > 0 {
            return Err(format!(
                "Positions {lo}..{hi} have no unique shallowest node"
            ));
        }
        let expected = parent.map_or(1, |p: usize| depths[p] + 1);
        if depths[top] != expected {
            return Err(format!(
                "Position {top} has depth {}, expected {expected}",
                depths[top]
            ));
        }
        tree.parent[top] = parent;
        tree.range[top] = (lo, hi);
        match parent {
            Some(p) if is_right => tree.right[p] = Some(top),
            Some(p) => tree.left[p] = Some(top),
            None => tree.root = top,
        }
        work.push((lo, top, Some(top), false));
        work.push((top + 1, hi, Some(top), true));
    }
    Ok(tree)
}

/// Checks every structural invariant of a multi-splay forest without
/// touching it:
///
/// - the physical tree is a binary search tree with consistent links and a
///   root that starts an auxiliary tree;
/// - every `delta_min_depth` matches its recomputation;
/// - the absolute depths describe a valid reference tree which satisfies
///   the red-black rules;
/// - every auxiliary tree is one downward reference path whose physical
///   subtree spans exactly the reference subtree of the path's top.
pub fn assert_multisplay_tree<K, V, C>(
    arena: &[MultisplayNode<K, V>],
    root: Option<u32>,
    comparator: &C,
) -> Result<(), String>
where
    C: Fn(&K, &K) -> Ordering,
{
    let Some(root) = root else {
        return if arena.is_empty() {
            Ok(())
        } else {
            Err(format!("Empty root with {} nodes in the arena", arena.len()))
        };
    };
    if root as usize >= arena.len() {
        return Err(format!("Root {root} is outside the arena"));
    }
    if arena[root as usize].p.is_some() {
        return Err("Root has parent".to_string());
    }
    if !arena[root as usize].splay_root {
        return Err("Root is not a splay root".to_string());
    }

    let (preorder, abs_depth) = physical_preorder(arena, root)?;

    let mut inorder = Vec::with_capacity(arena.len());
    let mut curr = first(arena, Some(root));
    while let Some(idx) = curr {
        inorder.push(idx);
        curr = next(arena, idx);
    }
    for pair in inorder.windows(2) {
        let (a, b) = (&arena[pair[0] as usize], &arena[pair[1] as usize]);
        if comparator(&a.k, &b.k) != Ordering::Less {
            return Err(format!("Keys of {} and {} are out of order", pair[0], pair[1]));
        }
    }
    let mut pos_of = vec![0; arena.len()];
    for (pos, &idx) in inorder.iter().enumerate() {
        pos_of[idx as usize] = pos;
    }

    let mut min_depth = vec![0; arena.len()];
    for &idx in preorder.iter().rev() {
        let node = &arena[idx as usize];
        let mut min = 0;
        for c in [node.l, node.r].into_iter().flatten() {
            let child = &arena[c as usize];
            if !child.splay_root {
                min = min.min(child.delta_ref_depth + min_depth[c as usize]);
            }
        }
        if node.delta_min_depth != min {
            return Err(format!(
                "Node {idx} stores min depth {}, expected {min}",
                node.delta_min_depth
            ));
        }
        min_depth[idx as usize] = min;
    }

    let depths: Vec<i32> = inorder.iter().map(|&i| abs_depth[i as usize]).collect();
    let reference = rebuild_reference(&depths)?;
    let black = |pos: usize| arena[inorder[pos] as usize].b;

    if !black(reference.root) {
        return Err("Reference root is not black".to_string());
    }
    let mut by_depth: Vec<usize> = (0..inorder.len()).collect();
    by_depth.sort_by_key(|&pos| Reverse(depths[pos]));
    let mut black_height = vec![0usize; inorder.len()];
    for &pos in &by_depth {
        let l = reference.left[pos];
        let r = reference.right[pos];
        if !black(pos) && [l, r].into_iter().flatten().any(|c| !black(c)) {
            return Err(format!("Red node {} has a red child", inorder[pos]));
        }
        let lh = l.map_or(0, |c| black_height[c]);
        let rh = r.map_or(0, |c| black_height[c]);
        if lh != rh {
            return Err(format!("Black height mismatch under node {}", inorder[pos]));
        }
        black_height[pos] = lh + usize::from(black(pos));
    }

    // Auxiliary tree of every node, named by its physical root.
    let mut aux = vec![0u32; arena.len()];
    for &idx in &preorder {
        let node = &arena[idx as usize];
        aux[idx as usize] = match node.p {
            Some(p) if !node.splay_root => aux[p as usize],
            _ => idx,
        };
    }
    let mut preferred = vec![0u8; inorder.len()];
    let mut top_of: Vec<Option<usize>> = vec![None; arena.len()];
    for (pos, &idx) in inorder.iter().enumerate() {
        let group = aux[idx as usize];
        match reference.parent[pos] {
            Some(parent) if aux[inorder[parent] as usize] == group => {
                preferred[parent] += 1;
                if preferred[parent] > 1 {
                    return Err(format!(
                        "Node {} has two preferred children",
                        inorder[parent]
                    ));
                }
            }
            _ => {
                if top_of[group as usize].replace(pos).is_some() {
                    return Err(format!("Auxiliary tree {group} is not a single path"));
                }
            }
        }
    }
    for &idx in &preorder {
        if aux[idx as usize] != idx {
            continue;
        }
        let Some(top) = top_of[idx as usize] else {
            return Err(format!("Auxiliary tree {idx} has no top"));
        };
        let (Some(lo), Some(hi)) = (first(arena, Some(idx)), last(arena, Some(idx))) else {
            unreachable!("assert_multisplay_tree: subtree of {idx} is empty");
        };
        let physical = (pos_of[lo as usize], pos_of[hi as usize] + 1);
        if physical != reference.range[top] {
            return Err(format!(
                "Auxiliary tree {idx} spans {physical:?}, its path top spans {:?}",
                reference.range[top]
            ));
        }
    }
    Ok(())
}

/// Number of levels of the reference tree: the deepest absolute depth.
pub fn reference_height<K, V>(arena: &[MultisplayNode<K, V>], root: Option<u32>) -> usize {
    let Some(root) = root else {
        return 0;
    };
    let mut height = 0;
    let mut stack = vec![(root, arena[root as usize].delta_ref_depth)];
    while let Some((idx, d)) = stack.pop() {
        height = height.max(d);
        let node = &arena[idx as usize];
        for c in [node.l, node.r].into_iter().flatten() {
            stack.push((c, d + arena[c as usize].delta_ref_depth));
        }
    }
    usize::try_from(height).unwrap_or(0)
}
