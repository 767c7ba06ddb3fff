use hexworld::geometry::{HEX_WIDTH, index_to_origin, tile_centroid};
use hexworld::viewport::DEFAULT_SCALE;
use hexworld::{Board, Error, Grid, Params, Terrain, TileIndex, Viewport, Wrap};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::json;

fn board(wrap: Wrap) -> Board {
    Board::new(Grid::new(30, 21, wrap).unwrap(), 800.0, 600.0)
}

#[test]
fn picks_the_tile_under_the_cursor() {
    let b = board(Wrap::Flat);
    let view = b.viewport();
    for index in [TileIndex::new(3, 2), TileIndex::new(0, 0), TileIndex::new(4, 3)] {
        let (px, py) = view.internal_to_window(tile_centroid(index));
        assert_eq!(b.tile_at(px, py), Some(index));
    }
    // Above the upper-left edge of (0, 0) there is nothing on a flat grid.
    assert_eq!(b.tile_at(1.0, 1.0), None);
}

#[test]
fn picking_far_off_a_flat_map_finds_nothing() {
    let mut b = board(Wrap::Flat);
    let v = b.set_view(Viewport::new(HEX_WIDTH * 4_294_967_296.0, 0.0, DEFAULT_SCALE));
    assert_eq!(v.left_x, HEX_WIDTH * 4_294_967_296.0);
    assert_eq!(b.tile_at(100.0, 50.0), None);
    assert!(b.visible_tiles().is_empty());
}

#[test]
fn picking_wraps_across_the_seam() {
    let mut b = board(Wrap::Cylinder);
    let (grid_width, _) = b.grid().internal_size();
    // Put the seam in the middle of the window.
    let v = b.set_view(Viewport::new(grid_width - 3.0, 0.0, 100.0));
    let beyond = index_to_origin(TileIndex::new(31, 2));
    let (px, py) = v.internal_to_window(tile_centroid(TileIndex::new(31, 2)));
    assert!(beyond.x > grid_width);
    assert_eq!(b.tile_at(px, py), Some(TileIndex::new(1, 2)));
}

#[test]
fn saves_and_loads_through_the_board() {
    let mut b = board(Wrap::KleinBottle);
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    let report = b.regenerate(&Params::default(), &mut rng).unwrap();
    assert_eq!(report.land, b.grid().land_count());
    b.paint(TileIndex::new(10, 10), Terrain::Volcano, 1);
    b.tiles_mut()[0].extra.insert("owner".into(), json!(2));

    let text = b.save().unwrap();
    let mut other = board(Wrap::Flat);
    other.load(&text).unwrap();
    assert_eq!(other.grid(), b.grid());
    assert_eq!(other.grid().wrap(), Wrap::KleinBottle);
    assert_eq!(other.grid().tiles()[0].extra["owner"], json!(2));
}

#[test]
fn bad_saves_leave_the_board_alone() {
    let mut b = board(Wrap::Torus);
    b.paint(TileIndex::new(5, 5), Terrain::Desert, 2);
    let before = b.grid().clone();

    let bad = [
        "not json",
        "{}",
        "[]",
        r#"[{"width": 2, "height": 1, "wrap": "FLAT"}]"#,
        r#"[{"width": 2, "height": 1, "wrap": "SPHERE"}, [["terrain", "OCEAN"], [{"0": "1"}, {"0": "1"}]]]"#,
        r#"[{"width": 0, "height": 1, "wrap": "FLAT"}, [[], []]]"#,
        r#"[{"width": 2, "height": 2, "wrap": "FLAT"}, [["terrain", "OCEAN"], [{"0": "1"}, {"0": "1"}]]]"#,
        r#"[{"width": 2, "height": 1, "wrap": "FLAT"}, [["terrain", "OCEAN"], [{"0": "1"}, {"0": "5"}]]]"#,
        r#"[{"width": 2, "height": 1, "wrap": "FLAT"}, [["terrain", "LAVA"], [{"0": "1"}, {"0": "1"}]]]"#,
        r#"[{"width": 2, "height": 1, "wrap": "FLAT"}, [["terrain", 4], [{"0": "1"}, {"0": "1"}]]]"#,
    ];
    for text in bad {
        assert!(b.load(text).is_err(), "{text}");
        assert_eq!(b.grid(), &before);
    }

    let good = r#"[{"width": 2, "height": 1, "wrap": "FLAT"}, [["terrain", "OCEAN"], [{"0": "1"}, {"0": "1"}]]]"#;
    b.load(good).unwrap();
    assert_eq!(b.grid().len(), 2);
    assert_eq!(b.grid().count(Terrain::Ocean), 2);
}

#[test]
fn load_errors_name_the_broken_rule() {
    let mut b = board(Wrap::Flat);
    let err = b
        .load(r#"[{"width": 3, "height": 1, "wrap": "FLAT"}, [["terrain", "OCEAN"], [{"0": "1"}]]]"#)
        .unwrap_err();
    assert!(matches!(err, Error::TileCount { expected: 3, actual: 1, .. }));
    assert!(err.to_string().contains("3"));

    let err = b
        .load(r#"[{"width": 1, "height": 1, "wrap": "TWISTED"}, [[], []]]"#)
        .unwrap_err();
    assert!(matches!(err, Error::UnknownWrap(ref tag) if tag == "TWISTED"));
}

#[test]
fn failed_generation_keeps_the_old_map() {
    let mut b = board(Wrap::Flat);
    b.paint(TileIndex::new(2, 2), Terrain::Tundra, 1);
    let before = b.grid().clone();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let bad = Params {
        land_fraction: 2.0,
        ..Params::default()
    };
    assert!(matches!(b.regenerate(&bad, &mut rng), Err(Error::InvalidLandFraction(_))));
    assert_eq!(b.grid(), &before);
}

#[test]
fn renderer_sees_the_whole_window() {
    let mut b = board(Wrap::Cylinder);
    b.resize(2400.0, 600.0);
    b.zoom_out_fully();
    let visible = b.visible_tiles();
    // A window wider than the map shows every tile at least once.
    let mut seen = vec![false; b.grid().len()];
    for (_, tile) in &visible {
        seen[tile.y as usize * 30 + tile.x as usize] = true;
    }
    assert!(seen.iter().all(|&s| s));
}
