use std::fmt::Debug;

use crate::types::KvNode;

use super::super::types::MultisplayNode;

/// Debug printer for multi-splay forests.
///
/// Shows the physical tree. `d` is `delta_ref_depth`, `m` is
/// `delta_min_depth` and `*` marks the root of an auxiliary tree.
pub fn print<K, V>(arena: &[MultisplayNode<K, V>], node: Option<u32>, tab: &str) -> String
where
    K: Debug,
    V: Debug,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let color = if n.is_black() { "black" } else { "red" };
            let marker = if n.splay_root { "*" } else { "" };
            let left = print(arena, n.l, &format!("{tab}  "));
            let right = print(arena, n.r, &format!("{tab}  "));
            format!(
                "Node[{i}]{marker} {color} d={} m={} {{ {:?} = {:?} }}\n{tab}L={left}\n{tab}R={right}",
                n.delta_ref_depth,
                n.delta_min_depth,
                n.key(),
                n.value()
            )
        }
    }
}
