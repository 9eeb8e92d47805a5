//! End-to-end scenarios from spec.md §8, run against whichever engine(s)
//! each scenario calls out.

use lifecore::{LifeUniverse, Variant};

const ENGINES: [Variant; 2] = [Variant::HashLife, Variant::QuickLife];

#[test]
fn blinker_period_is_two() {
    for variant in ENGINES {
        let mut universe = LifeUniverse::new(variant);
        for (x, y) in [(0, 0), (1, 0), (2, 0)] {
            universe.set(x, y, true);
        }
        universe.step();
        for (x, y) in [(1, -1), (1, 0), (1, 1)] {
            assert!(universe.get(x, y), "{variant:?} step 1: missing ({x},{y})");
        }
        assert_eq!(universe.population(), 3);
        universe.step();
        for (x, y) in [(0, 0), (1, 0), (2, 0)] {
            assert!(universe.get(x, y), "{variant:?} step 2: missing ({x},{y})");
        }
        assert_eq!(universe.population(), 3);
    }
}

#[test]
fn glider_translates_by_one_minus_one_after_four_steps() {
    for variant in ENGINES {
        let mut universe = LifeUniverse::new(variant);
        for (x, y) in [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)] {
            universe.set(x, y, true);
        }
        for _ in 0..4 {
            universe.step();
        }
        for (x, y) in [(2, -1), (3, 0), (1, 1), (2, 1), (3, 1)] {
            assert!(universe.get(x, y), "{variant:?}: missing ({x},{y})");
        }
        assert_eq!(universe.population(), 5);
    }
}

#[test]
fn acorn_census_matches_known_population_at_generation_5206() {
    let mut universe = LifeUniverse::new(Variant::HashLife);
    for (dx, dy) in [(1, 0), (3, 1), (0, 2), (1, 2), (4, 2), (5, 2), (6, 2)] {
        universe.set(dx, dy, true);
    }
    // HashLife advances by whole powers of two; walk up in large strides
    // and finish with single steps to land exactly on generation 5206.
    while universe.generation() + (1u128 << 8) <= 5206 {
        universe.step_speed(8);
    }
    while universe.generation() < 5206 {
        universe.step();
    }
    assert_eq!(universe.generation(), 5206);
    assert_eq!(universe.population(), 633);
}

#[test]
fn block_is_a_still_life_and_goes_stable_in_quicklife() {
    for variant in ENGINES {
        let mut universe = LifeUniverse::new(variant);
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            universe.set(x, y, true);
        }
        for _ in 0..10 {
            universe.step();
            for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                assert!(universe.get(x, y));
            }
            assert_eq!(universe.population(), 4);
        }
    }

    let mut universe = LifeUniverse::new(Variant::QuickLife);
    for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        universe.set(x, y, true);
    }
    universe.step();
    universe.step();
    assert_eq!(universe.stats().stable_blocks, Some(1));
}

#[test]
fn empty_universe_reclaims_dead_blocks_after_128_steps() {
    let mut universe = LifeUniverse::new(Variant::QuickLife);
    universe.set(0, 0, true);
    universe.set(0, 0, false);
    for _ in 0..128 {
        universe.step();
    }
    let stats = universe.stats();
    assert_eq!(stats.dead_blocks, Some(0));
    assert_eq!(stats.population, 0);
}

/// The classic 36-cell Gosper glider gun, period 30, bounding box 36x9.
const GOSPER_GLIDER_GUN: &[(i64, i64)] = &[
    (0, 4), (0, 5), (1, 4), (1, 5),
    (10, 4), (10, 5), (10, 6),
    (11, 3), (11, 7),
    (12, 2), (12, 8),
    (13, 2), (13, 8),
    (14, 5),
    (15, 3), (15, 7),
    (16, 4), (16, 5), (16, 6),
    (17, 5),
    (20, 2), (20, 3), (20, 4),
    (21, 2), (21, 3), (21, 4),
    (22, 1), (22, 5),
    (24, 0), (24, 1), (24, 5), (24, 6),
    (34, 2), (34, 3),
    (35, 2), (35, 3),
];

#[test]
fn glider_gun_eventually_emits_gliders_beyond_its_own_bounding_box() {
    for variant in ENGINES {
        let mut universe = LifeUniverse::new(variant);
        for &(x, y) in GOSPER_GLIDER_GUN {
            universe.set(x, y, true);
        }
        // One full firing period plus slack for the first glider to clear
        // the gun's own 36x9 footprint and travel well beyond it.
        for _ in 0..200 {
            universe.step();
        }

        let mut beyond_gun = 0u64;
        universe.draw(-300, -300, 300, 300, &mut |x, y| {
            if !(-5..=40).contains(&x) || !(-5..=13).contains(&y) {
                beyond_gun += 1;
            }
        });
        assert!(beyond_gun > 0, "{variant:?}: expected at least one cell to have escaped the gun's footprint by generation 200");
    }
}
