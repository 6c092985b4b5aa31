use approx::assert_relative_eq;
use rand::{rngs::StdRng, Rng, SeedableRng};
use strided_grid::{
    copy_into, copy_oriented, for_each_oriented, min_max, traverse, Extent2D, Grid, GridError,
    GridView, GridViewMut, Index2D, IndexMapping, Orientation, Size2D,
};

fn make_grid(rows: usize, cols: usize) -> Grid<f64> {
    Grid::from_fn(Size2D::new(rows, cols), |idx| (idx.row * cols + idx.column) as f64)
}

fn random_grid(rng: &mut StdRng, rows: usize, cols: usize) -> Grid<f64> {
    Grid::from_fn(Size2D::new(rows, cols), |_| rng.gen::<f64>())
}

#[test]
fn test_mapping_round_trip_random_shapes() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let shape = Size2D::new(rng.gen_range(1..20), rng.gen_range(1..20));
        for orientation in Orientation::ALL {
            let mapping = IndexMapping::new(shape, orientation);
            let dest = mapping.destination_shape();
            for i in 0..dest.rows {
                for j in 0..dest.columns {
                    let idx = Index2D::new(i, j);
                    assert_eq!(mapping.to_destination(mapping.to_source(idx)), idx);
                }
            }
            for i in 0..shape.rows {
                for j in 0..shape.columns {
                    let idx = Index2D::new(i, j);
                    assert_eq!(mapping.to_source(mapping.to_destination(idx)), idx);
                }
            }
        }
    }
}

#[test]
fn test_inverse_orientation_undoes_copy() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let (rows, cols) = (rng.gen_range(1..9), rng.gen_range(1..9));
        let src = random_grid(&mut rng, rows, cols);
        for orientation in Orientation::ALL {
            let there = copy_oriented(&src.view(), orientation);
            let back = copy_oriented(&there.view(), orientation.invert());
            assert_eq!(back.shape(), src.shape());
            for (a, b) in back.as_slice().iter().zip(src.as_slice()) {
                assert_relative_eq!(*a, *b);
            }
        }
    }
}

#[test]
fn test_rotation_composes_like_copies() {
    let src = make_grid(3, 5);
    for turns in -5..=5 {
        let direct = copy_oriented(&src.view(), Orientation::Rows.rotate(turns));
        let mut stepped = src.clone();
        for _ in 0..turns.rem_euclid(4) {
            stepped = copy_oriented(&stepped.view(), Orientation::Rows.rotate(1));
        }
        assert_eq!(direct, stepped, "turns = {turns}");
    }
}

#[test]
fn test_transpose_copy_matches_index_swap() {
    let src = make_grid(4, 7);
    let t = copy_oriented(&src.view(), Orientation::Columns);
    assert_eq!(t.shape(), Size2D::new(7, 4));
    for i in 0..7 {
        for j in 0..4 {
            assert_relative_eq!(t[(i, j)], src[(j, i)], epsilon = 1e-12);
        }
    }
}

#[test]
fn test_orientation_algebra_exhaustive() {
    for o in Orientation::ALL {
        assert_eq!(o.transpose().transpose(), o);
        assert_eq!(o.invert().invert(), o);
        for a in -8..8 {
            for b in -8..8 {
                assert_eq!(o.rotate(a).rotate(b), o.rotate((a + b).rem_euclid(4)));
            }
        }
    }
}

#[test]
fn test_traverse_matches_for_each() {
    let src = make_grid(3, 4);
    for orientation in Orientation::ALL {
        let from_indices: Vec<f64> = traverse(src.shape(), orientation)
            .map(|idx| src[idx])
            .collect();
        let mut visited = Vec::new();
        for_each_oriented(&src.view(), orientation, |&v| visited.push(v));
        assert_eq!(from_indices, visited, "{orientation}");
    }
}

#[test]
fn test_copy_into_random_sub_views() {
    let mut rng = StdRng::seed_from_u64(1234);
    let src = random_grid(&mut rng, 12, 10);
    for _ in 0..40 {
        let origin = Index2D::new(rng.gen_range(0..12), rng.gen_range(0..10));
        let size = Size2D::new(rng.gen_range(0..8), rng.gen_range(0..8));
        let window = src.sub_view(Extent2D::new(origin, size));
        let orientation = Orientation::from_code(rng.gen_range(0..8));

        let expected = copy_oriented(&window, orientation);

        let mut target = Grid::<f64>::new(Size2D::new(20, 20));
        let mut dest = target.sub_view_mut(Extent2D::new(Index2D::new(3, 5), expected.shape()));
        assert_eq!(dest.shape(), expected.shape());
        copy_into(&mut dest, &window, orientation).unwrap();

        let placed = target.sub_view(Extent2D::new(Index2D::new(3, 5), expected.shape()));
        assert_eq!(placed, expected.view());
    }
}

#[test]
fn test_resize_preserves_overlap() {
    let mut g = Grid::from_vec((1..=9).collect::<Vec<i32>>(), Size2D::new(3, 3)).unwrap();
    g.resize(Size2D::new(5, 3));
    assert_eq!(g.row(0), &[1, 2, 3]);
    assert_eq!(g.row(1), &[4, 5, 6]);
    assert_eq!(g.row(2), &[7, 8, 9]);
    assert_eq!(g.row(3), &[0, 0, 0]);
    assert_eq!(g.row(4), &[0, 0, 0]);

    let mut g = Grid::from_vec((1..=9).collect::<Vec<i32>>(), Size2D::new(3, 3)).unwrap();
    g.resize(Size2D::new(3, 2));
    assert_eq!(g.as_slice(), &[1, 2, 4, 5, 7, 8]);
}

#[test]
fn test_resize_random_shapes() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..30 {
        let (r0, c0) = (rng.gen_range(0..7), rng.gen_range(0..7));
        let (r1, c1) = (rng.gen_range(0..7), rng.gen_range(0..7));
        let before = Grid::from_fn(Size2D::new(r0, c0), |idx| (idx.row * 100 + idx.column + 1) as i64);
        let mut g = before.clone();
        g.resize(Size2D::new(r1, c1));
        assert_eq!(g.shape(), Size2D::new(r1, c1));
        assert_eq!(g.len(), r1 * c1);
        for i in 0..r1 {
            for j in 0..c1 {
                let want = before.get(i, j).copied().unwrap_or(0);
                assert_eq!(g[(i, j)], want, "({i}, {j}) {r0}x{c0} -> {r1}x{c1}");
            }
        }
    }
}

#[test]
fn test_contiguity_invariant() {
    let data = vec![0.0f64; 64];
    for rows in 0..5 {
        for row_gap in 0..4 {
            let view = GridView::with_row_gap(&data, Size2D::new(rows, 3), row_gap);
            let contiguous = row_gap == 0 || rows <= 1;
            assert_eq!(view.contiguous(), contiguous);
            match view.as_flat() {
                Ok(flat) => {
                    assert!(contiguous);
                    assert_eq!(flat.len(), rows * 3);
                }
                Err(GridError::NonContiguousView { rows: r, row_gap: g }) => {
                    assert!(!contiguous);
                    assert_eq!((r, g), (rows, row_gap));
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
    }
}

#[test]
fn test_sub_view_aliasing() {
    let mut grid = Grid::<i32>::new(Size2D::new(4, 4));
    let mut sub = grid.sub_view_mut(Extent2D::new(Index2D::new(2, 2), Size2D::new(2, 2)));
    sub[(1, 1)] = 7;
    assert_eq!(grid[(3, 3)], 7);
}

#[test]
fn test_traversal_copy_example() {
    let src = Grid::from_slice(&[1, 2, 3, 4, 5, 6], Size2D::new(2, 3)).unwrap();
    let mut dest = Grid::<i32>::new(Size2D::new(3, 2));
    copy_into(
        &mut dest.view_mut(),
        &src.view(),
        Orientation::ReversedColumnsReversedOrder,
    )
    .unwrap();
    assert_eq!(dest.as_slice(), &[6, 3, 5, 2, 4, 1]);
}

#[test]
fn test_equality_with_gaps() {
    let packed = make_grid(3, 4);
    let mut padded = Grid::<f64>::new(Size2D::new(5, 6));
    let region = Extent2D::new(Index2D::new(1, 1), Size2D::new(3, 4));
    copy_into(&mut padded.sub_view_mut(region), &packed.view(), Orientation::Rows).unwrap();

    assert_eq!(padded.sub_view(region), packed.view());
    assert!(!padded.sub_view(region).contiguous());

    padded[(2, 3)] += 0.5;
    assert_ne!(padded.sub_view(region), packed.view());
}

#[test]
fn test_min_max_float_grid() {
    let mut rng = StdRng::seed_from_u64(5);
    let g = random_grid(&mut rng, 9, 11);
    let window = g.sub_view(Extent2D::new(Index2D::new(2, 3), Size2D::new(4, 5)));
    let (lo, hi) = min_max(&window).unwrap();

    let values: Vec<f64> = window.iter().copied().collect();
    let want_lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let want_hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    assert_relative_eq!(*lo, want_lo);
    assert_relative_eq!(*hi, want_hi);
}

#[test]
fn test_views_over_foreign_memory() {
    let mut raw = [1u8, 2, 3, 0, 4, 5, 6, 0];
    let mut view = GridViewMut::with_row_gap(&mut raw, Size2D::new(2, 3), 1);
    for row in view.rows_mut() {
        row.reverse();
    }
    assert_eq!(view.to_grid().as_slice(), &[3, 2, 1, 6, 5, 4]);
    assert_eq!(raw, [3, 2, 1, 0, 6, 5, 4, 0]);
}
