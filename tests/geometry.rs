use hexworld::geometry::{
    HEX_WIDTH, PlanarPoint, index_to_origin, internal_size, point_to_index, tile_centroid,
};
use hexworld::TileIndex;

#[test]
fn centroids_map_back_to_their_tile() {
    for y in -12..12 {
        for x in -12..12 {
            let index = TileIndex::new(x, y);
            assert_eq!(point_to_index(tile_centroid(index)), index, "({x}, {y})");
        }
    }
}

#[test]
fn points_well_inside_a_hex_resolve_to_it() {
    for (x, y) in [(0, 0), (3, 1), (-2, -3), (7, 4), (-5, 5)] {
        let index = TileIndex::new(x, y);
        let c = tile_centroid(index);
        for (dx, dy) in [(0.4, 0.2), (-0.4, 0.2), (0.4, -0.2), (-0.4, -0.2), (0.0, 0.45), (0.0, -0.45)] {
            let p = PlanarPoint::new(c.x + dx, c.y + dy);
            assert_eq!(point_to_index(p), index, "({x}, {y}) offset ({dx}, {dy})");
        }
    }
}

#[test]
fn odd_rows_are_shifted_half_a_hex() {
    let even = index_to_origin(TileIndex::new(2, 4));
    let odd = index_to_origin(TileIndex::new(2, 5));
    assert!((odd.x - even.x - HEX_WIDTH / 2.0).abs() < 1e-12);
    assert!((odd.y - even.y - 0.75).abs() < 1e-12);
}

#[test]
fn slanted_edges_split_between_rows() {
    // Just below the top vertex of (0, 0) is inside it; the left notch above
    // its upper-left edge belongs to the odd row above.
    assert_eq!(point_to_index(PlanarPoint::new(HEX_WIDTH / 2.0, 0.02)), TileIndex::new(0, 0));
    assert_eq!(point_to_index(PlanarPoint::new(0.05, 0.05)), TileIndex::new(-1, -1));
}

#[test]
fn internal_extent() {
    let (w, h) = internal_size(10, 5);
    assert!((w - 10.0 * HEX_WIDTH).abs() < 1e-12);
    assert_eq!(h, 4.0);
}

#[test]
fn far_points_saturate_instead_of_wrapping() {
    let left = point_to_index(PlanarPoint::new(-1e300, 0.8));
    assert_eq!(left.x, i32::MIN);
    let right = point_to_index(PlanarPoint::new(1e300, -1e300));
    assert_eq!((right.x, right.y), (i32::MAX, i32::MIN));

    // 2^32 tiles to the right would truncate to column 0 without saturation.
    let far = point_to_index(PlanarPoint::new(HEX_WIDTH * 4_294_967_296.0 + 0.5, 0.5));
    assert_eq!(far.x, i32::MAX);
    assert_eq!(far.y, 0);
}
