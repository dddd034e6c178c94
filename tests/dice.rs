use approx::assert_abs_diff_eq;
use probdie::{Dice, Distribution};

const EPS: f64 = 1e-12;

fn hits(dice: usize, sides: i32, target: i32) -> Dice {
    let check = Distribution::uniform(sides).higher_or_equal(&target);
    check.fold(dice, |a, b| a + b).unwrap_or_else(|_| Distribution::constant(0))
}

#[test]
fn counts_hits_on_three_sided_dice() {
    let result = hits(2, 3, 2);

    assert_abs_diff_eq!(result.probability_of(&0), 1.0 / 9.0, epsilon = EPS);
    assert_abs_diff_eq!(result.probability_of(&1), 4.0 / 9.0, epsilon = EPS);
    assert_abs_diff_eq!(result.probability_of(&2), 4.0 / 9.0, epsilon = EPS);
}

#[test]
fn attack_hits_turn_into_damage() {
    let attack = hits(2, 2, 2);

    assert_abs_diff_eq!(attack.probability_of(&0), 1.0 / 4.0, epsilon = EPS);
    assert_abs_diff_eq!(attack.probability_of(&1), 2.0 / 4.0, epsilon = EPS);
    assert_abs_diff_eq!(attack.probability_of(&2), 1.0 / 4.0, epsilon = EPS);

    let damage = attack.map_to(|&n| {
        if n == 0 {
            Distribution::from_pairs([(0, 1.0)])
        } else {
            hits(n as usize, 2, 2)
        }
    });

    assert_abs_diff_eq!(damage.probability_of(&0), (4.0 + 2.0 + 2.0 + 1.0) / 16.0, epsilon = EPS);
    assert_abs_diff_eq!(damage.probability_of(&1), (2.0 + 2.0 + 2.0) / 16.0, epsilon = EPS);
    assert_abs_diff_eq!(damage.probability_of(&2), 1.0 / 16.0, epsilon = EPS);
    assert_abs_diff_eq!(damage.total_probability(), 1.0, epsilon = EPS);
}

#[test]
fn number_of_dice_can_come_from_a_roll() {
    // roll a d4 to decide how many d6 to add up
    let total = Distribution::uniform(4).map_to(|&n| {
        Distribution::uniform(6)
            .fold(n as usize, |a, b| a + b)
            .unwrap_or_else(|_| Distribution::constant(0))
    });

    assert_abs_diff_eq!(total.total_probability(), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(total.probability_of(&1), 1.0 / 24.0, epsilon = EPS);
    assert_abs_diff_eq!(total.probability_of(&24), 1.0 / (4.0 * 6f64.powi(4)), epsilon = EPS);
    assert_eq!(total.probability_of(&25), 0.0);
    assert_abs_diff_eq!(total.mean(), 2.5 * 3.5, epsilon = 1e-9);
}

#[test]
fn structured_outcomes_are_coalesced() {
    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    enum Attack {
        Miss,
        Hit { damage: i32 },
    }

    let d20 = Distribution::uniform(20);
    let attack = d20.combine(&Distribution::uniform(4), |roll, dmg| {
        if *roll >= 11 {
            Attack::Hit { damage: *dmg }
        } else {
            Attack::Miss
        }
    });

    assert_eq!(attack.len(), 5);
    assert_abs_diff_eq!(attack.probability_of(&Attack::Miss), 0.5, epsilon = EPS);
    assert_abs_diff_eq!(
        attack.probability_of(&Attack::Hit { damage: 3 }),
        0.125,
        epsilon = EPS
    );

    let report = attack.simplify_default().to_string();
    assert_eq!(report.lines().count(), 5);
    assert!(report.starts_with("Miss with 50.00%"));
    assert!(report.contains("Hit { damage: 1 } with 12.50%"));
}

#[test]
fn pairs_expose_every_outcome() {
    let die = Distribution::from_pairs([(true, 0.25), (false, 0.75)]);

    assert_eq!(die.pairs(), vec![(true, 0.25), (false, 0.75)]);
    let collected: Distribution<bool> = die.pairs().into_iter().collect();
    assert_eq!(collected.pairs(), die.pairs());
}
