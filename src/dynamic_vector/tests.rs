use super::*;
use pretty_assertions::assert_eq;
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

#[test]
fn creation() {
    let dbv = DynamicBitVector::new();
    assert_eq!(dbv.len(), 0);
    assert!(dbv.is_empty());
}

#[test]
fn insert_then_access() {
    let mut dbv = DynamicBitVector::new();
    dbv.insert(0, true).unwrap();
    dbv.insert(1, false).unwrap();
    dbv.insert(1, true).unwrap();
    assert_eq!(dbv.access(0).unwrap(), true);
    assert_eq!(dbv.access(1).unwrap(), true);
    assert_eq!(dbv.access(2).unwrap(), false);
}

#[test]
fn insert_out_of_bounds_errs() {
    let mut dbv = DynamicBitVector::new();
    assert!(dbv.insert(1, true).is_err());
}

#[test]
fn access_out_of_bounds_errs() {
    let dbv = DynamicBitVector::new();
    assert!(dbv.access(0).is_err());
}

#[test]
fn delete_removes_bit() {
    let mut dbv = DynamicBitVector::from_bits(&[true, false, true]);
    let removed = dbv.delete(1).is_ok();
    assert!(removed);
    assert_eq!(dbv.len(), 2);
    assert_eq!(dbv.access(0).unwrap(), true);
    assert_eq!(dbv.access(1).unwrap(), true);
}

#[test]
fn flip_toggles_bit() {
    let mut dbv = DynamicBitVector::from_bits(&[true, false]);
    assert_eq!(dbv.flip(0).unwrap(), true);
    assert_eq!(dbv.access(0).unwrap(), false);
}

#[test]
fn rank_and_select_roundtrip() {
    let bits = [true, false, true, true, false, true];
    let mut dbv = DynamicBitVector::from_bits(&bits);
    assert_eq!(dbv.rank(true, 4).unwrap(), 2);
    assert_eq!(dbv.select(true, 3).unwrap(), 3);
}

#[test]
fn rank_past_length_is_error() {
    let mut dbv = DynamicBitVector::from_bits(&[true, false]);
    assert!(dbv.rank(true, 3).is_err());
}

#[test]
fn select_zero_j_is_error() {
    let mut dbv = DynamicBitVector::from_bits(&[true, false]);
    assert!(dbv.select(true, 0).is_err());
}

#[test]
fn select_past_count_is_error() {
    let mut dbv = DynamicBitVector::from_bits(&[true, false]);
    assert!(dbv.select(true, 5).is_err());
}

#[test]
fn crosses_leaf_boundary_after_many_inserts() {
    let mut dbv = DynamicBitVector::new();
    for i in 0..20_000 {
        dbv.insert(i, i % 2 == 0).unwrap();
    }
    assert_eq!(dbv.len(), 20_000);
    for i in 0..20_000 {
        assert_eq!(dbv.access(i).unwrap(), i % 2 == 0);
    }
}

#[test]
fn bulk_construction_matches_sequential_inserts() {
    let bits: Vec<bool> = (0..5000).map(|i| i % 3 == 0).collect();
    let bulk = DynamicBitVector::from_bits(&bits);
    let mut sequential = DynamicBitVector::new();
    for (i, &bit) in bits.iter().enumerate() {
        sequential.insert(i, bit).unwrap();
    }
    assert_eq!(bulk.len(), sequential.len());
    for i in 0..bits.len() {
        assert_eq!(bulk.access(i).unwrap(), sequential.access(i).unwrap());
    }
}

#[quickcheck]
fn insert_access_agrees_with_vec(ops: Vec<(usize, bool)>) -> TestResult {
    let mut dbv = DynamicBitVector::new();
    let mut reference: Vec<bool> = Vec::new();
    for (index_seed, bit) in ops {
        let index = if reference.is_empty() {
            0
        } else {
            index_seed % (reference.len() + 1)
        };
        dbv.insert(index, bit).unwrap();
        reference.insert(index, bit);
    }
    for (i, &bit) in reference.iter().enumerate() {
        if dbv.access(i).unwrap() != bit {
            return TestResult::failed();
        }
    }
    TestResult::passed()
}

#[quickcheck]
fn delete_then_length_shrinks(bits: Vec<bool>, index_seed: usize) -> TestResult {
    if bits.is_empty() {
        return TestResult::discard();
    }
    let mut dbv = DynamicBitVector::from_bits(&bits);
    let index = index_seed % bits.len();
    let before = dbv.len();
    dbv.delete(index).unwrap();
    TestResult::from_bool(dbv.len() == before - 1)
}
