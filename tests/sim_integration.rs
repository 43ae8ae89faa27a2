//! Engine integration tests: determinism, branching, food accounting and
//! the surround rule, driven through the public API only.

use ant_war::brain::{parse_brain, Brain};
use ant_war::core::types::{AntId, Color};
use ant_war::sim::{Sim, CORPSE_FOOD};
use ant_war::world::{parse_world, World, WorldPos};
use proptest::prelude::{prop_assert_eq, proptest, ProptestConfig};

const WORLD: &str = include_str!("../data/worlds/tiny.world");
const FORAGER: &str = include_str!("../data/brains/forager.ant");
const DRIFTER: &str = include_str!("../data/brains/drifter.ant");

fn world() -> World {
    parse_world(WORLD).unwrap()
}

fn brain(src: &str) -> Brain {
    parse_brain(src).unwrap()
}

fn sim(seed: u64) -> Sim {
    Sim::new(&world(), brain(FORAGER), brain(DRIFTER), seed).unwrap()
}

/// Food can only appear through kills: 3 per dead ant
fn assert_food_conserved(sim: &Sim, initial_food: u64) {
    let dead: usize = Color::ALL
        .iter()
        .map(|&c| sim.initial_ants(c) - sim.living_ants(c))
        .sum();
    assert_eq!(sim.food().total(), initial_food + dead as u64 * u64::from(CORPSE_FOOD));
}

#[test]
fn test_identical_engines_agree_every_round() {
    let mut a = sim(12345);
    let mut b = sim(12345);
    for _ in 0..500 {
        assert_eq!(a.dump_lines(), b.dump_lines());
        a.step();
        b.step();
    }
    assert_eq!(a.dump_lines(), b.dump_lines());
    assert_eq!(a.round(), 500);
}

#[test]
fn test_different_seeds_diverge() {
    let mut a = sim(1);
    let mut b = sim(2);
    a.run(2000);
    b.run(2000);
    assert_ne!(a.dump_lines(), b.dump_lines());
}

#[test]
fn test_clone_is_independent() {
    let mut original = sim(777);
    original.run(300);
    let at_fork = original.dump_lines();

    let mut branch = original.clone();
    branch.run(200);
    assert_eq!(original.dump_lines(), at_fork);
    assert_eq!(original.round(), 300);

    original.run(200);
    assert_eq!(original.dump_lines(), branch.dump_lines());
    assert_eq!(original.snapshot(), branch.snapshot());
}

#[test]
fn test_food_conserved_over_long_run() {
    let mut sim = sim(12345);
    let initial = sim.food().total();
    assert_eq!(initial, world().total_food());
    for _ in 0..20 {
        sim.run(250);
        assert_food_conserved(&sim, initial);
    }
}

#[test]
fn test_live_ants_match_their_cells() {
    let mut sim = sim(99);
    sim.run(1500);
    for (i, ant) in sim.ants().iter().enumerate() {
        if ant.alive {
            assert_eq!(sim.cells()[ant.cell_idx].occupant, Some(AntId(i)));
        }
    }
    let occupied = sim.cells().iter().filter(|c| c.occupant.is_some()).count();
    assert_eq!(occupied, sim.living_ants(Color::Red) + sim.living_ants(Color::Black));
}

#[test]
fn test_surround_kill_releases_food() {
    // A black ant with red neighbours on five sides; the red ant to its SW
    // steps into the remaining gap on the first round.
    let world = parse_world(
        "5\n5\n# # # # #\n # + + # #\n# + - + #\n # + . # #\n# # # # #\n",
    )
    .unwrap();
    let mut sim = Sim::new(&world, brain("move 0 0"), brain("turn left 0"), 1).unwrap();
    let black = AntId(3);
    assert_eq!(sim.ant(black).unwrap().color, Color::Black);
    let before = sim.food().total();

    sim.step();

    assert!(!sim.ant(black).unwrap().alive);
    let cell = sim.cell_at(WorldPos::new(2, 2)).unwrap();
    assert_eq!(cell.occupant, None);
    assert_eq!(cell.food, 3);
    assert_eq!(sim.food().hill_food(Color::Black), 3);
    assert_eq!(sim.food().total(), before + 3);
    assert!(sim
        .dump_lines()
        .contains(&"cell (2, 2): 3 food; black hill; ".to_string()));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_food_conserved_for_any_seed(seed in 1u64..1_000_000, rounds in 0u64..1500) {
        let mut sim = sim(seed);
        let initial = sim.food().total();
        sim.run(rounds);
        let dead: usize = Color::ALL
            .iter()
            .map(|&c| sim.initial_ants(c) - sim.living_ants(c))
            .sum();
        prop_assert_eq!(sim.food().total(), initial + dead as u64 * u64::from(CORPSE_FOOD));
    }
}
