use multisplay_tree::{first, last, next, prev, size, MultisplayNode};

/// Hand-built arena:
///
/// ```text
///       1
///      / \
///     0   3
///        /
///       2
/// ```
fn arena() -> Vec<MultisplayNode<u8, ()>> {
    let mut arena: Vec<_> = (0..4).map(|k| MultisplayNode::new(k, ())).collect();
    arena[1].l = Some(0);
    arena[1].r = Some(3);
    arena[0].p = Some(1);
    arena[3].p = Some(1);
    arena[3].l = Some(2);
    arena[2].p = Some(3);
    arena
}

#[test]
fn util_first_last_matrix() {
    let arena = arena();
    assert_eq!(first(&arena, Some(1)), Some(0));
    assert_eq!(last(&arena, Some(1)), Some(3));
    assert_eq!(first(&arena, Some(3)), Some(2));
    assert_eq!(first::<MultisplayNode<u8, ()>>(&arena, None), None);
    assert_eq!(last::<MultisplayNode<u8, ()>>(&arena, None), None);
}

#[test]
fn util_next_prev_matrix() {
    let arena = arena();
    let mut forward = Vec::new();
    let mut curr = first(&arena, Some(1));
    while let Some(i) = curr {
        forward.push(i);
        curr = next(&arena, i);
    }
    assert_eq!(forward, vec![0, 1, 2, 3]);

    let mut backward = Vec::new();
    let mut curr = last(&arena, Some(1));
    while let Some(i) = curr {
        backward.push(i);
        curr = prev(&arena, i);
    }
    assert_eq!(backward, vec![3, 2, 1, 0]);
}

#[test]
fn util_size_matrix() {
    let arena = arena();
    assert_eq!(size(&arena, Some(1)), 4);
    assert_eq!(size(&arena, Some(3)), 2);
    assert_eq!(size(&arena, None), 0);
}
