//! Tests for mosaic layout editing and rendering

#[cfg(test)]
mod tests {
    use crate::fixtures::{distinct_store, record_from_rows};
    use greedymosaic::MosaicError;
    use greedymosaic::spatial::{GridShape, MosaicLayout, Position, Rotation, TileStore};
    use ndarray::array;

    fn tiny_store() -> TileStore {
        TileStore::from_records(
            GridShape::new(1, 2, 2),
            vec![
                record_from_rows(1, &[&[1, 2], &[3, 4]]),
                record_from_rows(2, &[&[5, 6], &[7, 8]]),
            ],
        )
        .unwrap()
    }

    // Tests the scaffold references each base cell unrotated
    // Verified by transposing scaffold coordinates
    #[test]
    fn test_scaffold_is_identity() {
        let store = distinct_store(GridShape::new(2, 3, 2));
        let layout = MosaicLayout::scaffold(&store);

        for (coordinate, position) in layout.iter() {
            assert_eq!(*position, Position::new(Rotation::Deg0, coordinate));
        }
        assert_eq!(layout.shape(), store.shape());
    }

    // Tests rendering places tiles side by side at their rotations
    // Verified by ignoring the cell rotation
    #[test]
    fn test_render_with_rotation() {
        let store = tiny_store();
        let mut layout = MosaicLayout::scaffold(&store);

        assert_eq!(
            layout.render(&store).unwrap(),
            array![[1u8, 2, 5, 6], [3, 4, 7, 8]]
        );

        layout.rotate_cell([0, 1], Rotation::Deg90).unwrap();
        assert_eq!(
            layout.render(&store).unwrap(),
            array![[1u8, 2, 6, 8], [3, 4, 5, 7]]
        );
    }

    // Tests swap and set edit cells in place
    // Verified by making swap a no-op
    #[test]
    fn test_manual_edits() {
        let store = tiny_store();
        let mut layout = MosaicLayout::scaffold(&store);

        layout.swap([0, 0], [0, 1]).unwrap();
        assert_eq!(layout.get([0, 0]), Some(&Position::new(Rotation::Deg0, [0, 1])));
        assert_eq!(layout.get([0, 1]), Some(&Position::new(Rotation::Deg0, [0, 0])));

        layout
            .set([0, 0], Position::new(Rotation::Deg270, [0, 0]))
            .unwrap();
        assert_eq!(
            layout.get([0, 0]).map(|p| p.rotation),
            Some(Rotation::Deg270)
        );
    }

    // Tests edits and renders outside the grid or store fail
    // Verified by clamping coordinates
    #[test]
    fn test_out_of_bounds_edits() {
        let store = tiny_store();
        let mut layout = MosaicLayout::scaffold(&store);

        assert!(matches!(
            layout.swap([0, 0], [1, 0]),
            Err(MosaicError::InvalidTileIndex { .. })
        ));
        assert_eq!(layout.get([0, 0]), Some(&Position::new(Rotation::Deg0, [0, 0])));

        layout
            .set([0, 1], Position::new(Rotation::Deg0, [3, 3]))
            .unwrap();
        assert!(matches!(
            layout.render(&store),
            Err(MosaicError::InvalidTileIndex { .. })
        ));
    }

    // Tests layouts built from too few positions are rejected
    // Verified by padding with default positions
    #[test]
    fn test_from_positions_truncated() {
        let shape = GridShape::new(2, 2, 1);
        let result = MosaicLayout::from_positions(shape, vec![Position::default(); 3]);

        assert!(matches!(result, Err(MosaicError::Truncated { .. })));
    }
}
