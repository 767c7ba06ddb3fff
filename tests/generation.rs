use hexworld::config::{Params, Strategy};
use hexworld::{Error, Grid, Terrain, Wrap, generate};

const STRATEGIES: [Strategy; 2] = [Strategy::Archipelago, Strategy::Continents];

fn params(strategy: Strategy, land_fraction: f64) -> Params {
    Params {
        land_fraction,
        ..Params::for_strategy(strategy)
    }
}

#[test]
fn reaches_the_requested_land_share() {
    for strategy in STRATEGIES {
        for seed in 1..=3 {
            let (grid, report) = generate(seed, 50, 50, Wrap::Flat, &params(strategy, 0.25)).unwrap();
            let land = grid.count(Terrain::Grassland);
            assert_eq!(land, report.land);
            assert!((625..=750).contains(&land), "{strategy} seed {seed}: {land} land tiles");
        }
    }
}

#[test]
fn expansion_never_loses_land() {
    for strategy in STRATEGIES {
        let (_, report) = generate(11, 50, 50, Wrap::Cylinder, &params(strategy, 0.25)).unwrap();
        assert!(!report.expansions.is_empty());
        for history in &report.expansions {
            assert!(!history.is_empty());
            assert!(history.windows(2).all(|w| w[0] <= w[1]), "{strategy}: {history:?}");
        }
    }
}

#[test]
fn continents_expand_twice() {
    let (_, report) = generate(5, 40, 30, Wrap::Flat, &params(Strategy::Continents, 0.25)).unwrap();
    assert_eq!(report.expansions.len(), 2);
    let (_, report) = generate(5, 40, 30, Wrap::Flat, &params(Strategy::Archipelago, 0.2)).unwrap();
    assert_eq!(report.expansions.len(), 1);
}

#[test]
fn same_seed_same_map() {
    let p = Params::default();
    let (a, _) = generate(99, 30, 20, Wrap::Torus, &p).unwrap();
    let (b, _) = generate(99, 30, 20, Wrap::Torus, &p).unwrap();
    let (c, _) = generate(100, 30, 20, Wrap::Torus, &p).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn every_wrap_mode_generates() {
    for wrap in Wrap::ALL {
        let (grid, report) = generate(3, 40, 30, wrap, &params(Strategy::Continents, 0.25)).unwrap();
        assert_eq!(grid.wrap(), wrap);
        assert!(report.land as f64 >= 0.25 * 1200.0, "{wrap}");
    }
}

#[test]
fn only_finished_terrain_is_left() {
    let (grid, _) = generate(8, 30, 30, Wrap::Flat, &Params::default()).unwrap();
    for (index, tile) in grid.iter() {
        assert!(
            matches!(
                tile.terrain,
                Terrain::Grassland | Terrain::Coast | Terrain::Sea | Terrain::Ocean
            ),
            "{index:?} is {}",
            tile.terrain
        );
    }
    // Coast touches land, sea touches coast.
    for (index, tile) in grid.iter() {
        let around: Vec<Terrain> = grid
            .neighbors(index)
            .into_iter()
            .flatten()
            .filter_map(|n| grid.terrain(n))
            .collect();
        match tile.terrain {
            Terrain::Coast => assert!(around.contains(&Terrain::Grassland)),
            Terrain::Sea => {
                assert!(around.contains(&Terrain::Coast));
                assert!(!around.contains(&Terrain::Grassland));
            }
            Terrain::Ocean => {
                assert!(!around.contains(&Terrain::Coast));
                assert!(!around.contains(&Terrain::Grassland));
            }
            _ => {}
        }
    }
}

#[test]
fn bad_configuration_is_rejected_up_front() {
    assert!(matches!(
        generate(1, 0, 10, Wrap::Flat, &Params::default()),
        Err(Error::InvalidDimensions { .. })
    ));
    assert!(matches!(
        generate(1, 10, 10, Wrap::Flat, &params(Strategy::Continents, 1.0)),
        Err(Error::InvalidLandFraction(_))
    ));

    let mut grid = Grid::new(10, 10, Wrap::Flat).unwrap();
    grid.set_terrain(hexworld::TileIndex::new(4, 4), Terrain::Desert);
    let before = grid.clone();
    let bad = Params {
        neighbor_land_chance: 1.5,
        ..Params::default()
    };
    let mut rng = hexworld::rng::stage_rng(1, hexworld::rng::SALT_MAPGEN);
    assert!(hexworld::mapgen::run(&mut grid, &bad, &mut rng).is_err());
    assert_eq!(grid, before);
}

#[test]
fn zero_land_fraction_still_finishes() {
    let (grid, report) = generate(4, 20, 20, Wrap::Flat, &params(Strategy::Continents, 0.0)).unwrap();
    assert!(report.expansions.iter().all(|h| h.len() == 1));
    assert_eq!(grid.count(Terrain::Water), 0);
}
