use super::*;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::hash::Hasher;

/// Folds every key into a handful of hash values so chains get long.
#[derive(Default)]
struct CoarseHasher(u64);

impl Hasher for CoarseHasher {
    fn finish(&self) -> u64 {
        self.0 % 3
    }
    fn write(&mut self, bytes: &[u8]) {
        for b in bytes {
            self.0 = self.0.wrapping_add(*b as u64);
        }
    }
}

fn validate_store<V, S>(s: &FixedCapacityHashStore<V, S>) {
    let stats = s.chain_stats();
    assert_eq!(
        stats.occupied_slots + stats.overflow_nodes,
        s.len(),
        "every entry is either a root or an overflow node"
    );
    assert_eq!(s.iter().count(), s.len(), "iteration must reach every entry");

    let mut seen = std::collections::HashSet::new();
    for (k, _) in s.iter() {
        assert!(seen.insert(k.to_string()), "duplicate key in store: {k:?}");
    }
}

#[derive(Clone, Debug)]
enum Op {
    Put(String, u64),
    Get(String),
}

fn key_strategy() -> impl Strategy<Value = String> + Clone {
    "[a-d]{0,6}"
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        60 => (key.clone(), any::<u64>()).prop_map(|(k, v)| Op::Put(k, v)),
        40 => key.prop_map(Op::Get),
    ];
    prop::collection::vec(op, 0..=500)
}

fn check_against_model<S: BuildHasher>(
    mut s: FixedCapacityHashStore<u64, S>,
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut m: HashMap<String, u64> = HashMap::new();

    for op in ops {
        match op {
            Op::Put(key, value) => {
                let inserted_s = s.put(&key, value);
                let inserted_m = !m.contains_key(&key);
                m.entry(key).or_insert(value);
                prop_assert_eq!(inserted_s, inserted_m);
            }
            Op::Get(key) => {
                let got_s = s.get(&key).ok().copied();
                let got_m = m.get(&key).copied();
                prop_assert_eq!(got_s, got_m);
            }
        }
        prop_assert_eq!(s.len(), m.len());
    }

    validate_store(&s);
    for (k, v) in &m {
        prop_assert_eq!(s.get(k), Ok(v));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_default_hasher(ops in ops_strategy(), capacity in 1usize..64) {
        let s = FixedCapacityHashStore::new(NonZeroUsize::new(capacity).unwrap());
        check_against_model(s, ops)?;
    }

    #[test]
    fn prop_equivalence_coarse_hasher(ops in ops_strategy(), capacity in 1usize..8) {
        let s = FixedCapacityHashStore::with_hasher(
            NonZeroUsize::new(capacity).unwrap(),
            BuildHasherDefault::<CoarseHasher>::default(),
        );
        check_against_model(s, ops)?;
    }

    #[test]
    fn prop_put_then_get(key in ".{0,64}", value in any::<f64>().prop_filter("NaN never equals itself", |v| !v.is_nan())) {
        let mut s: FixedCapacityHashStore<f64> = FixedCapacityHashStore::new(NonZeroUsize::new(31).unwrap());
        prop_assert!(s.put(&key, value));
        prop_assert_eq!(s.get(&key), Ok(&value));
    }

    #[test]
    fn prop_first_value_wins(key in ".{0,64}", v1 in 0.0f64..90.0, v2 in 0.0f64..90.0) {
        prop_assume!(v1 != v2);
        let mut s: FixedCapacityHashStore<f64> = FixedCapacityHashStore::new(NonZeroUsize::new(1).unwrap());
        s.put(&key, v1);
        s.put(&key, v2);
        prop_assert_eq!(s.get(&key), Ok(&v1));
    }
}

#[test]
fn random_long_keys_single_bucket() {
    let mut rng = StdRng::seed_from_u64(7);
    let keys: Vec<String> = (0..200)
        .map(|_| (0..255).map(|_| rng.gen_range(b'a'..=b'z') as char).collect())
        .collect();

    let mut s: FixedCapacityHashStore<usize> =
        FixedCapacityHashStore::new(NonZeroUsize::new(1).unwrap());
    for (i, k) in keys.iter().enumerate() {
        assert!(s.put(k, i));
    }
    validate_store(&s);
    for (i, k) in keys.iter().enumerate() {
        assert_eq!(s.get(k), Ok(&i));
    }
    assert_eq!(s.chain_stats().longest_chain, 200);
}
