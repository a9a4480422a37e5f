//! Tests for the greedy exclusive assignment engine

#[cfg(test)]
mod tests {
    use crate::fixtures::{distinct_records, distinct_store, record, record_from_rows};
    use greedymosaic::MosaicError;
    use greedymosaic::algorithm::assignment::{GreedyAssignment, find_best_candidate};
    use greedymosaic::algorithm::order::{OrderPolicy, VisitationOrder};
    use greedymosaic::algorithm::similarity::best_rotation;
    use greedymosaic::algorithm::validation::{all_tiles_consumed, mosaic_completeness};
    use greedymosaic::spatial::{GridShape, MosaicLayout, Position, Rotation, Tile, TileStore};

    fn two_by_one() -> GridShape {
        GridShape::new(2, 1, 2)
    }

    // Base: a bright-corner tile at (0,0) and a flat tile at (1,0)
    fn contested_base() -> TileStore {
        TileStore::from_records(
            two_by_one(),
            vec![
                record_from_rows(1, &[&[9, 1], &[1, 1]]),
                record_from_rows(2, &[&[5, 5], &[5, 5]]),
            ],
        )
        .unwrap()
    }

    // Target: both cells match the bright-corner tile best, in different rotations
    fn contested_target() -> TileStore {
        TileStore::from_records(
            two_by_one(),
            vec![
                record_from_rows(1, &[&[9, 1], &[1, 1]]),
                record_from_rows(2, &[&[1, 1], &[1, 9]]),
            ],
        )
        .unwrap()
    }

    fn run(base: TileStore, target: TileStore, policy: OrderPolicy) -> MosaicLayout {
        let order = VisitationOrder::new(base.shape(), policy, 0);
        let mut engine = GreedyAssignment::new(base, target, order).unwrap();
        engine.run().unwrap();
        engine.into_parts().2
    }

    // Tests the cell visited first takes the contested tile, so the two orders diverge
    // Verified by making the scan ignore lock state
    #[test]
    fn test_visitation_order_changes_assignment() {
        let ascending = run(contested_base(), contested_target(), OrderPolicy::Ascending);
        let descending = run(contested_base(), contested_target(), OrderPolicy::Descending);

        assert_eq!(
            ascending.get([0, 0]),
            Some(&Position::new(Rotation::Deg0, [0, 0]))
        );
        assert_eq!(
            ascending.get([1, 0]),
            Some(&Position::new(Rotation::Deg0, [1, 0]))
        );

        assert_eq!(
            descending.get([1, 0]),
            Some(&Position::new(Rotation::Deg180, [0, 0]))
        );
        assert_eq!(
            descending.get([0, 0]),
            Some(&Position::new(Rotation::Deg0, [1, 0]))
        );

        assert_ne!(ascending, descending);
    }

    // Tests a full run consumes both stores and references every tile once
    // Verified by skipping the target lock in commit
    #[test]
    fn test_full_run_consumes_everything() {
        let shape = GridShape::new(4, 4, 3);
        let base = distinct_store(shape);
        let target = TileStore::from_records(
            shape,
            distinct_records(shape).into_iter().rev().collect::<Vec<_>>(),
        )
        .unwrap();
        let order = VisitationOrder::new(shape, OrderPolicy::Shuffled, 3);

        let mut engine = GreedyAssignment::new(base, target, order).unwrap();
        let report = engine.run().unwrap();
        let (base, target, layout) = engine.into_parts();

        assert_eq!(report.assigned, 16);
        assert!(all_tiles_consumed(&base));
        assert!(all_tiles_consumed(&target));
        assert!(mosaic_completeness(&layout, &base));
        assert!(report.min_similarity.is_some_and(|min| min > 0.0));
    }

    // Tests identical base and target reassemble to the identity layout
    // Verified by starting the scan from the last base cell
    #[test]
    fn test_identical_stores_yield_identity() {
        let shape = GridShape::new(3, 3, 4);
        let layout = run(distinct_store(shape), distinct_store(shape), OrderPolicy::Ascending);

        assert_eq!(layout, MosaicLayout::scaffold(&distinct_store(shape)));
    }

    // Tests equal scores resolve to the earliest base cell and rotation
    // Verified by replacing the strict comparison with >=
    #[test]
    fn test_ties_go_to_first_candidate() {
        let shape = GridShape::new(1, 3, 2);
        let flat = |no| record(no, 2, |_, _| 4);
        let base = TileStore::from_records(shape, vec![flat(1), flat(2), flat(3)]).unwrap();
        let target = Tile::from_record(record(9, 2, |r, c| (r * 2 + c + 1) as u8));

        let candidate = find_best_candidate(&target, &base).unwrap();

        assert_eq!(candidate.tile, [0, 0]);
        assert_eq!(candidate.rotation, Rotation::Deg0);
    }

    // Tests the store scan picks each tile's best rotation and keeps its score
    // Verified by scoring every tile at rotation 0 only
    #[test]
    fn test_scan_uses_best_rotation_per_tile() {
        let shape = GridShape::new(1, 2, 2);
        let base = TileStore::from_records(
            shape,
            vec![
                record(1, 2, |_, _| 5),
                record_from_rows(2, &[&[1, 9], &[1, 1]]),
            ],
        )
        .unwrap();
        let target = Tile::from_record(record_from_rows(7, &[&[9, 1], &[1, 1]]));

        let candidate = find_best_candidate(&target, &base).unwrap();
        let (rotation, score) = best_rotation(&target, base.tile([0, 1]).unwrap());

        assert_eq!(candidate.tile, [0, 1]);
        assert_eq!(candidate.rotation, Rotation::Deg90);
        assert_eq!(candidate.rotation, rotation);
        assert!((candidate.score - score).abs() < f64::EPSILON);

        let mut base = base;
        if let Some(tile) = base.tile_mut([0, 1]) {
            tile.lock();
        }
        let fallback = find_best_candidate(&target, &base).unwrap();
        assert_eq!(fallback.tile, [0, 0]);
        assert_eq!(fallback.rotation, Rotation::Deg0);
    }

    // Tests locked base tiles are skipped by the scan
    // Verified by removing the lock check
    #[test]
    fn test_scan_skips_locked_tiles() {
        let mut base = contested_base();
        if let Some(tile) = base.tile_mut([0, 0]) {
            tile.lock();
        }
        let target = Tile::from_record(record_from_rows(1, &[&[9, 1], &[1, 1]]));

        let candidate = find_best_candidate(&target, &base).unwrap();
        assert_eq!(candidate.tile, [1, 0]);

        if let Some(tile) = base.tile_mut([1, 0]) {
            tile.lock();
        }
        assert!(find_best_candidate(&target, &base).is_none());
    }

    // Tests revisiting a target cell fails loudly instead of reassigning
    // Verified by ignoring the target lock state
    #[test]
    fn test_revisited_target_is_an_error() {
        let shape = two_by_one();
        let order = VisitationOrder::from_coordinates(shape, vec![[0, 0], [0, 0]]).unwrap();
        let mut engine = GreedyAssignment::new(contested_base(), contested_target(), order).unwrap();

        assert!(engine.execute_step().unwrap());
        let err = engine.execute_step().unwrap_err();

        assert!(matches!(
            err,
            MosaicError::TargetAlreadyLocked {
                coordinate: [0, 0],
                step: 1
            }
        ));
        assert_eq!(engine.progress(), (1, 2));
    }

    // Tests reusing an already consumed base store exhausts the pool
    // Verified by resetting locks when constructing the engine
    #[test]
    fn test_reused_base_is_exhausted() {
        let shape = two_by_one();
        let order = VisitationOrder::new(shape, OrderPolicy::Ascending, 0);
        let mut engine = GreedyAssignment::new(contested_base(), contested_target(), order.clone())
            .unwrap();
        engine.run().unwrap();
        let (used_base, _, _) = engine.into_parts();

        let mut again = GreedyAssignment::new(used_base, contested_target(), order).unwrap();
        let err = again.execute_step().unwrap_err();

        assert!(matches!(
            err,
            MosaicError::BaseExhausted { coordinate: [0, 0] }
        ));
    }

    // Tests stores of different shapes are refused before any work happens
    // Verified by removing the shape comparison
    #[test]
    fn test_shape_mismatch_is_rejected() {
        let base = distinct_store(GridShape::new(2, 2, 2));
        let target = distinct_store(GridShape::new(2, 2, 3));
        let order = VisitationOrder::new(base.shape(), OrderPolicy::Ascending, 0);

        let result = GreedyAssignment::new(base, target, order);

        assert!(matches!(result, Err(MosaicError::ShapeMismatch { .. })));
    }

    // Tests stepping reports progress and stops when the order is consumed
    // Verified by returning true after the last step
    #[test]
    fn test_step_progress() {
        let order = VisitationOrder::new(two_by_one(), OrderPolicy::Ascending, 0);
        let mut engine = GreedyAssignment::new(contested_base(), contested_target(), order).unwrap();

        assert_eq!(engine.progress(), (0, 2));
        assert!(engine.execute_step().unwrap());
        assert_eq!(engine.base().locked_count(), 1);
        assert_eq!(engine.target().locked_count(), 1);
        assert!(engine.execute_step().unwrap());
        assert!(!engine.execute_step().unwrap());
        assert_eq!(engine.progress(), (2, 2));
        assert_eq!(engine.report().assigned, 2);
        assert!(engine.report().mean_similarity().is_some());
        assert_eq!(engine.layout().shape(), two_by_one());
    }
}
