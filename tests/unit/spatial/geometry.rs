//! Tests for grid shape validation and the rotation type

#[cfg(test)]
mod tests {
    use greedymosaic::MosaicError;
    use greedymosaic::io::configuration::{MAX_GRID_CELLS, MAX_GRID_DIMENSION, MAX_GRID_SAMPLES};
    use greedymosaic::spatial::{GridShape, Rotation};

    // Tests derived sizes of the default 20x20 grid of 10x10 tiles
    // Verified by swapping rows and cols in pixel_width
    #[test]
    fn test_shape_dimensions() {
        let shape = GridShape::new(20, 25, 10);

        assert_eq!(shape.cell_count(), 500);
        assert_eq!(shape.samples_per_tile(), 100);
        assert_eq!(shape.pixel_width(), 250);
        assert_eq!(shape.pixel_height(), 200);
        assert!(shape.contains([19, 24]));
        assert!(!shape.contains([20, 0]));
        assert_eq!(shape.to_string(), "20x25 tiles of 10x10");
    }

    // Tests zero and oversized dimensions are rejected
    // Verified by removing the zero check
    #[test]
    fn test_shape_validation() {
        assert!(GridShape::new(2, 2, 2).validate().is_ok());
        assert!(matches!(
            GridShape::new(0, 2, 2).validate(),
            Err(MosaicError::InvalidParameter {
                parameter: "rows",
                ..
            })
        ));
        assert!(matches!(
            GridShape::new(2, 2, MAX_GRID_DIMENSION + 1).validate(),
            Err(MosaicError::InvalidParameter {
                parameter: "tile_size",
                ..
            })
        ));
    }

    // Tests grids within per-dimension limits are still refused when their total size is too large
    // Verified by checking only individual dimensions
    #[test]
    fn test_shape_total_size_limits() {
        let widest = GridShape::new(MAX_GRID_DIMENSION, MAX_GRID_DIMENSION, 1);
        assert!(widest.cell_count() > MAX_GRID_CELLS);
        assert!(matches!(
            widest.validate(),
            Err(MosaicError::InvalidParameter {
                parameter: "cols",
                ..
            })
        ));

        let deep = GridShape::new(1000, 1000, 10);
        assert!(deep.cell_count() <= MAX_GRID_CELLS);
        assert!(matches!(
            deep.validate(),
            Err(MosaicError::InvalidParameter {
                parameter: "tile_size",
                ..
            })
        ));

        assert!(GridShape::new(1, 1, MAX_GRID_DIMENSION).validate().is_err());
        assert!(GridShape::new(1000, 1000, 4).validate().is_ok());
        assert_eq!(MAX_GRID_SAMPLES, 16_777_216);
    }

    // Tests coordinates are produced row-major and reversible
    // Verified by iterating columns first
    #[test]
    fn test_coordinates_order() {
        let shape = GridShape::new(2, 2, 1);

        let forward: Vec<_> = shape.coordinates().collect();
        let backward: Vec<_> = shape.coordinates().rev().collect();

        assert_eq!(forward, vec![[0, 0], [0, 1], [1, 0], [1, 1]]);
        assert_eq!(backward.first(), Some(&[1, 1]));
    }

    // Tests rotation indices round-trip and wrap after four steps
    // Verified by mapping index 3 to Deg180
    #[test]
    fn test_rotation_indices() {
        for (index, rotation) in Rotation::ALL.into_iter().enumerate() {
            assert_eq!(rotation.index(), index);
            assert_eq!(Rotation::from_index(index), Some(rotation));
            assert_eq!(rotation.to_string(), index.to_string());
        }
        assert_eq!(Rotation::from_index(4), None);
        assert_eq!(Rotation::Deg270.next(), Rotation::Deg0);
        assert_eq!(
            Rotation::Deg0.next().next().next().next(),
            Rotation::Deg0
        );
    }
}
