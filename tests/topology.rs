use hexworld::topology::{AdjacencyTable, Direction, canonicalize, neighbors};
use hexworld::{TileIndex, Wrap};

fn all_tiles(w: usize, h: usize) -> impl Iterator<Item = TileIndex> {
    (0..h as i32).flat_map(move |y| (0..w as i32).map(move |x| TileIndex::new(x, y)))
}

#[test]
fn adjacency_is_symmetric_for_every_mode() {
    for (w, h) in [(7, 6), (7, 5), (6, 6), (5, 3), (4, 4), (8, 7)] {
        for wrap in Wrap::ALL {
            for a in all_tiles(w, h) {
                for b in neighbors(a, w, h, wrap).into_iter().flatten() {
                    assert!(
                        neighbors(b, w, h, wrap).contains(&Some(a)),
                        "{wrap} {w}x{h}: {a:?} -> {b:?} is one-way"
                    );
                }
            }
        }
    }
}

#[test]
fn canonicalize_is_idempotent() {
    for wrap in Wrap::ALL {
        for y in -9..15 {
            for x in -15..22 {
                if let Some(c) = canonicalize(TileIndex::new(x, y), 7, 6, wrap) {
                    assert!((0..7).contains(&c.x) && (0..6).contains(&c.y));
                    assert_eq!(canonicalize(c, 7, 6, wrap), Some(c), "{wrap} ({x}, {y})");
                }
            }
        }
    }
}

#[test]
fn corner_of_a_flat_grid() {
    let n = neighbors(TileIndex::new(0, 0), 4, 4, Wrap::Flat);
    assert_eq!(
        n,
        [
            None,
            None,
            None,
            Some(TileIndex::new(1, 0)),
            None,
            Some(TileIndex::new(0, 1)),
        ]
    );
}

#[test]
fn odd_rows_lean_right() {
    let n = neighbors(TileIndex::new(2, 1), 5, 5, Wrap::Flat);
    let expected = [(2, 0), (3, 0), (1, 1), (3, 1), (2, 2), (3, 2)];
    for (dir, (slot, (x, y))) in Direction::ALL.iter().zip(n.iter().zip(expected)) {
        assert_eq!(*slot, Some(TileIndex::new(x, y)), "{dir:?}");
    }
}

#[test]
fn aligned_torus_is_fully_connected() {
    let (w, h) = (8, 6);
    for a in all_tiles(w, h) {
        let n = neighbors(a, w, h, Wrap::Torus);
        assert!(n.iter().all(Option::is_some), "{a:?}");
    }
}

#[test]
fn cylinder_links_across_the_east_west_seam() {
    let n = neighbors(TileIndex::new(0, 2), 6, 5, Wrap::Cylinder);
    assert_eq!(n[2], Some(TileIndex::new(5, 2)));
    assert_eq!(n[0], Some(TileIndex::new(5, 1)));
}

#[test]
fn table_agrees_with_symmetry() {
    for wrap in Wrap::ALL {
        let table = AdjacencyTable::new(7, 5, wrap);
        assert_eq!(table.len(), 35);
        for i in 0..table.len() {
            for j in table.of(i) {
                assert!(table.of(j).any(|k| k == i), "{wrap}: {i} -> {j}");
            }
        }
    }
}
