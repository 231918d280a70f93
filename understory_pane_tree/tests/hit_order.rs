// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for tree-order hit testing and transform composition.

use kurbo::{Point, Size};
use proptest::prelude::*;
use understory_pane_tree::{HitTestOptions, LocalPane, PaneTransform, PaneTree};

fn square(x: f64, y: f64, side: f64) -> LocalPane {
    LocalPane {
        transform: PaneTransform::from_translate(x, y),
        size: Size::new(side, side),
        ..LocalPane::default()
    }
}

proptest! {
    #[test]
    fn overlapping_siblings_resolve_to_the_earlier_one(
        ax in -50.0..50.0_f64,
        ay in -50.0..50.0_f64,
        dx in -5.0..5.0_f64,
        dy in -5.0..5.0_f64,
    ) {
        let mut tree = PaneTree::new();
        let root = tree.insert(None, LocalPane::default());
        let first = tree.insert(Some(root), square(ax, ay, 20.0));
        let second = tree.insert(Some(root), square(ax + dx, ay + dy, 20.0));

        // The midpoint of both centers is inside both squares.
        let p = Point::new(ax + dx / 2.0, ay + dy / 2.0);
        let hit = tree.hit_test_children(root, p, HitTestOptions::default());
        prop_assert_eq!(hit, Some(first));
        prop_assert_ne!(hit, Some(second));
    }

    #[test]
    fn translation_chain_adds_up(steps in prop::collection::vec((-100.0..100.0_f64, -100.0..100.0_f64), 1..8)) {
        let mut tree = PaneTree::new();
        let mut parent = None;
        let (mut sx, mut sy) = (0.0, 0.0);
        let mut last = None;
        for (x, y) in &steps {
            sx += x;
            sy += y;
            let id = tree.insert(parent, square(*x, *y, 1.0));
            parent = Some(id);
            last = Some(id);
        }
        let origin = tree.world_transform(last.unwrap()).unwrap() * Point::ZERO;
        prop_assert!((origin.x - sx).abs() < 1e-9);
        prop_assert!((origin.y - sy).abs() < 1e-9);
    }
}
