use proptest::prelude::*;
use shamir_p257::{
    recover, split, FieldElement, ParameterViolation, Polynomial, Share, SharingError,
    SECRET_BYTES,
};

/// All k-element index subsets of 0..n.
fn subsets(n: usize, k: usize) -> Vec<Vec<usize>> {
    fn walk(start: usize, n: usize, k: usize, current: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if current.len() == k {
            out.push(current.clone());
            return;
        }
        for i in start..n {
            current.push(i);
            walk(i + 1, n, k, current, out);
            current.pop();
        }
    }
    let mut out = Vec::new();
    walk(0, n, k, &mut Vec::new(), &mut out);
    out
}

fn pick(shares: &[Share], indices: &[usize]) -> Vec<Share> {
    indices.iter().map(|i| shares[*i].clone()).collect()
}

fn params() -> impl Strategy<Value = (usize, usize)> {
    (2usize..=5).prop_flat_map(|t| (Just(t), t.max(3)..=7))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn every_threshold_subset_recovers(secret in any::<[u8; SECRET_BYTES]>(), (t, n) in params()) {
        let shares = split(&secret, t, n).unwrap();
        prop_assert_eq!(shares.len(), n);
        for subset in subsets(n, t) {
            let recovered = recover(&pick(&shares, &subset)).unwrap();
            prop_assert_eq!(recovered.as_bytes(), &secret);
        }
    }

    #[test]
    fn one_share_short_does_not_recover(secret in any::<[u8; SECRET_BYTES]>(), (t, n) in params()) {
        prop_assume!(t >= 3);
        let shares = split(&secret, t, n).unwrap();
        for subset in subsets(n, t - 1) {
            match recover(&pick(&shares, &subset)) {
                Ok(wrong) => prop_assert_ne!(wrong.as_bytes(), &secret),
                Err(err) => prop_assert!(matches!(err, SharingError::SecretOverflow(_))),
            }
        }
    }

    #[test]
    fn indices_are_one_through_n(secret in any::<[u8; SECRET_BYTES]>(), (t, n) in params()) {
        let shares = split(&secret, t, n).unwrap();
        let indices: Vec<u32> = shares.iter().map(|s| s.index).collect();
        let expected: Vec<u32> = (1..=n as u32).collect();
        prop_assert_eq!(indices, expected);
    }

    #[test]
    fn evaluation_is_deterministic(coefficients in prop::collection::vec(any::<u64>(), 1..6), x in 1u64..1000) {
        let poly = Polynomial::from_coefficients(coefficients.into_iter().map(FieldElement::from).collect());
        let x = FieldElement::from(x);
        prop_assert_eq!(poly.evaluate(&x), poly.evaluate(&x));
    }

    #[test]
    fn extra_shares_still_recover(secret in any::<[u8; SECRET_BYTES]>(), (t, n) in params()) {
        let shares = split(&secret, t, n).unwrap();
        let recovered = recover(&shares).unwrap();
        prop_assert_eq!(recovered.as_bytes(), &secret);
    }
}

#[test]
fn secret_one_two_of_three() {
    let mut secret = [0u8; SECRET_BYTES];
    secret[SECRET_BYTES - 1] = 1;

    let shares = split(&secret, 2, 3).unwrap();
    assert_eq!(shares.len(), 3);

    let by_index = |x: u32| shares.iter().find(|s| s.index == x).unwrap().clone();
    let recovered = recover(&[by_index(1), by_index(2)]).unwrap();
    assert_eq!(recovered.as_bytes(), &secret);

    assert!(matches!(
        recover(&[by_index(1)]),
        Err(SharingError::InsufficientShares(1))
    ));
}

#[test]
fn boundary_rejection() {
    let secret = [7u8; SECRET_BYTES];
    assert!(matches!(
        split(&secret, 1, 5),
        Err(SharingError::InvalidParameters(ParameterViolation::ThresholdTooSmall { threshold: 1 }))
    ));
    assert!(matches!(
        split(&secret, 5, 3),
        Err(SharingError::InvalidParameters(
            ParameterViolation::ThresholdExceedsShares { threshold: 5, share_count: 3 }
        ))
    ));
}

#[test]
fn duplicate_index_rejection() {
    let shares = split(&[7u8; SECRET_BYTES], 3, 5).unwrap();
    let input = vec![shares[0].clone(), shares[3].clone(), shares[0].clone()];
    assert!(matches!(
        recover(&input),
        Err(SharingError::DuplicateShareIndex(1))
    ));
}

#[test]
fn shares_from_different_splits_do_not_recover() {
    let secret = [0x5au8; SECRET_BYTES];
    let a = split(&secret, 2, 3).unwrap();
    let b = split(&secret, 2, 3).unwrap();
    match recover(&[a[0].clone(), b[1].clone()]) {
        Ok(wrong) => assert_ne!(wrong.as_bytes(), &secret),
        Err(err) => assert!(matches!(err, SharingError::SecretOverflow(_))),
    }
}

#[test]
fn splits_of_the_same_secret_differ() {
    let secret = [0x11u8; SECRET_BYTES];
    let a = split(&secret, 3, 4).unwrap();
    let b = split(&secret, 3, 4).unwrap();
    assert_ne!(a, b);
}
