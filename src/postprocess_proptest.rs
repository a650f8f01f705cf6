//! Property-based tests for compiled-output post-processing.
//!
//! These tests use proptest to generate pinned requirement files and verify
//! that the exclusive-variant rewrite keeps its guarantees for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::config::ExclusivePair;
    use crate::phases::postprocess::remove_exclusive;
    use crate::requirements::normalize_name;
    use proptest::prelude::*;

    const GUI: &str = "opencv-python==4.9.0.80\n";
    const HEADLESS: &str = "opencv-python-headless==4.9.0.80\n";

    fn pairs() -> Vec<ExclusivePair> {
        vec![ExclusivePair {
            keep: "opencv-python-headless".to_string(),
            drop: "opencv-python".to_string(),
        }]
    }

    /// A pinned line or a resolver comment, never an opencv requirement.
    fn other_line() -> impl Strategy<Value = String> {
        prop_oneof![
            ("[a-z][a-z0-9]{0,8}", "[0-9]{1,2}\\.[0-9]{1,2}")
                .prop_map(|(name, ver)| format!("{}=={}\n", name, ver)),
            "[a-z ]{0,20}".prop_map(|text| format!("    # via {}\n", text)),
            Just("\n".to_string()),
        ]
    }

    /// Other lines with the given markers inserted at arbitrary positions.
    fn compiled_with(markers: Vec<&'static str>) -> impl Strategy<Value = String> {
        (
            prop::collection::vec(other_line(), 0..20),
            prop::collection::vec(any::<prop::sample::Index>(), markers.len()),
        )
            .prop_map(move |(mut lines, positions)| {
                for (marker, pos) in markers.iter().zip(positions) {
                    let at = pos.index(lines.len() + 1);
                    lines.insert(at, marker.to_string());
                }
                lines.concat()
            })
    }

    proptest! {
        /// Property: with at most one variant present the output is byte-identical
        #[test]
        fn single_variant_is_noop(
            input in prop_oneof![
                compiled_with(vec![]),
                compiled_with(vec![GUI]),
                compiled_with(vec![HEADLESS]),
                compiled_with(vec![GUI, GUI]),
            ]
        ) {
            let (out, removed) = remove_exclusive(&input, &pairs()).unwrap();
            prop_assert!(removed.is_empty());
            prop_assert_eq!(out, input);
        }

        /// Property: with both variants present only the GUI lines are removed
        #[test]
        fn both_variants_drop_gui_only(input in compiled_with(vec![GUI, HEADLESS])) {
            let (out, removed) = remove_exclusive(&input, &pairs()).unwrap();

            let expected: String = input
                .split_inclusive('\n')
                .filter(|line| *line != GUI)
                .collect();
            prop_assert_eq!(&out, &expected);
            prop_assert_eq!(removed, vec!["opencv-python==4.9.0.80".to_string()]);
            prop_assert!(out.contains(HEADLESS));
        }

        /// Property: post-processing is idempotent
        #[test]
        fn postprocess_is_idempotent(
            input in prop_oneof![
                compiled_with(vec![GUI, HEADLESS]),
                compiled_with(vec![HEADLESS, GUI, GUI]),
                compiled_with(vec![GUI]),
            ]
        ) {
            let (once, _) = remove_exclusive(&input, &pairs()).unwrap();
            let (twice, removed) = remove_exclusive(&once, &pairs()).unwrap();
            prop_assert!(removed.is_empty());
            prop_assert_eq!(once, twice);
        }

        /// Property: normalize_name is idempotent
        #[test]
        fn normalize_name_is_idempotent(name in "[A-Za-z0-9._-]{0,30}") {
            let once = normalize_name(&name);
            prop_assert_eq!(normalize_name(&once), once);
        }
    }
}
