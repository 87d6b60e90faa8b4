//! Matrix-driven generation through the facade.

use kase::prelude::*;
use kase_test_utils::fixtures::Fruit;
use kase_test_utils::MockTestRunner;

const FRUIT: KaseMatrixKey<Fruit> = KaseMatrixKey::new("fruit");
const WEIGHT: KaseMatrixKey<u32> = KaseMatrixKey::new("grams");
const RIPE: KaseMatrixKey<bool> = KaseMatrixKey::new("ripe");

fn pantry() -> KaseMatrix {
    let mut matrix = KaseMatrix::new();
    matrix
        .extend(FRUIT, Fruit::ALL)
        .insert_labeled(WEIGHT, "light", 80)
        .insert_labeled(WEIGHT, "heavy", 200);
    matrix
}

#[test]
fn matrix_kases_follow_key_order() {
    let matrix = pantry();
    let all = matrix.kases((WEIGHT, FRUIT)).unwrap();
    assert_eq!(all.len(), 6);
    assert_eq!(all[0].display_name(), "light: 80 | fruit: apple");
    assert_eq!(all[2].display_name(), "light: 80 | fruit: plum");
    assert_eq!(all[3].display_name(), "heavy: 200 | fruit: apple");
}

#[test]
fn missing_bucket_fails_before_generating() -> Result<(), MatrixError> {
    let matrix = pantry();
    let err = matrix.kases((FRUIT, RIPE)).unwrap_err();
    assert!(matches!(err, MatrixError::MissingKey { name: "ripe", .. }));
    assert_eq!(matrix.get(FRUIT)?.len(), 3);
    Ok(())
}

#[test]
fn matrix_and_times_compose() -> Result<(), MatrixError> {
    let mut matrix = pantry();
    matrix.extend(RIPE, [true, false]);
    let fruits = matrix.kases((FRUIT,))?;
    let conditions = matrix.kases((RIPE, WEIGHT))?;
    let all = fruits.times(conditions);
    assert_eq!(all.len(), 3 * 2 * 2);

    let mut runner = MockTestRunner::new();
    runner.run(all, |k| {
        let (_, ripe, grams) = k.values();
        *ripe || *grams < 1000
    });
    assert_eq!(runner.names()[0], "fruit: apple | ripe: true | light: 80");
    assert!(runner.failures().is_empty());
    Ok(())
}

#[test]
fn matrix_factory_sees_elements() -> Result<(), MatrixError> {
    let matrix = pantry();
    let all = matrix.kases_with((FRUIT, WEIGHT), |k| {
        let (fruit, grams) = k.values();
        format!("{}g of {fruit} ({})", grams, k.label(1).unwrap_or_default())
    })?;
    assert_eq!(all[1].display_name(), "200g of apple (heavy)");
    Ok(())
}

#[test]
fn lazy_matrix_sequence_is_restartable() -> Result<(), MatrixError> {
    let matrix = pantry();
    let seq = matrix.kase_seq((FRUIT, WEIGHT))?;
    let first: Vec<String> = seq.iter().map(|k| k.to_string()).collect();
    let second: Vec<String> = seq.iter().map(|k| k.to_string()).collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 6);
    Ok(())
}
