//! Reconciliation of an encoded vector against a model's feature schema.
//!
//! The encoder's column set depends on which categories it enumerates; the
//! schema a model expects is fixed at training time. The two are reconciled
//! per call: expected-but-absent names fill with zero, extraneous names
//! drop, and the result takes the schema's order exactly.

use crate::vector::FeatureVector;

/// Align `v` to `expected`. An empty schema means the model declares no
/// feature names and the vector passes through unchanged.
pub fn align(v: &FeatureVector, expected: &[String]) -> FeatureVector {
    if expected.is_empty() {
        return v.clone();
    }
    let mut aligned = FeatureVector::with_capacity(expected.len());
    for name in expected {
        aligned.insert(name, v.get(name).unwrap_or(0.0));
    }
    aligned
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn vector(pairs: &[(&str, f64)]) -> FeatureVector {
        pairs
            .iter()
            .map(|(n, x)| (n.to_string(), *x))
            .collect()
    }

    fn schema(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn fills_missing_drops_extra_and_reorders() {
        let v = vector(&[("b", 2.0), ("z", 9.0), ("a", 1.0)]);
        let aligned = align(&v, &schema(&["a", "b", "c"]));
        assert_eq!(aligned.names(), &["a", "b", "c"]);
        assert_eq!(aligned.values(), &[1.0, 2.0, 0.0]);
    }

    #[test]
    fn empty_schema_passes_through() {
        let v = vector(&[("b", 2.0), ("a", 1.0)]);
        assert_eq!(align(&v, &[]), v);
    }

    #[test]
    fn aligning_an_aligned_vector_is_identity() {
        let expected = schema(&["a", "b", "c"]);
        let once = align(&vector(&[("c", 3.0), ("a", 1.0)]), &expected);
        let twice = align(&once, &expected);
        assert_eq!(once, twice);
    }

    proptest! {
        // The aligned key set equals the schema exactly, whatever the input
        // vector held.
        #[test]
        fn key_set_equals_schema(
            input in proptest::collection::vec(("[a-f]{1,3}", -10.0f64..10.0), 0..12),
            expected in proptest::collection::hash_set("[a-h]{1,3}", 1..10),
        ) {
            let v: FeatureVector = input.into_iter().collect();
            let expected: Vec<String> = expected.into_iter().collect();
            let aligned = align(&v, &expected);
            prop_assert_eq!(aligned.names(), expected.as_slice());
            for (name, value) in aligned.iter() {
                prop_assert_eq!(value, v.get(name).unwrap_or(0.0));
            }
        }
    }
}
