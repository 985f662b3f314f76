//! Properties of the content buffer

use proptest::prelude::*;
use treefs::error::BufferError;
use treefs::rope::ContentBuffer;

fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 \n]{0,300}"
}

proptest! {
    #[test]
    fn prop_build_roundtrips(s in text()) {
        let buffer = ContentBuffer::from_text(&s);
        prop_assert_eq!(buffer.to_string(), s.clone());
        prop_assert_eq!(buffer.len(), s.len());
        prop_assert!(buffer.is_well_formed());
    }

    #[test]
    fn prop_insert_splices(s in text(), t in "[a-z]{1,40}", frac in 0.0f64..=1.0) {
        let pos = ((s.len() as f64) * frac) as usize;
        let mut buffer = ContentBuffer::from_text(&s);
        buffer.insert(pos, &t).unwrap();

        let mut expected = s.clone();
        expected.insert_str(pos, &t);
        prop_assert_eq!(buffer.to_string(), expected);
        prop_assert_eq!(buffer.len(), s.len() + t.len());
        prop_assert!(buffer.is_well_formed());
    }

    #[test]
    fn prop_insert_out_of_range_is_rejected(s in text(), extra in 1usize..50) {
        let mut buffer = ContentBuffer::from_text(&s);
        let pos = s.len() + extra;
        prop_assert_eq!(
            buffer.insert(pos, "x"),
            Err(BufferError::InvalidPosition { pos, len: s.len() })
        );
        prop_assert_eq!(buffer.to_string(), s);
    }

    #[test]
    fn prop_append_concatenates(s1 in text(), s2 in "[a-z]{1,200}") {
        let mut buffer = ContentBuffer::from_text(&s1);
        buffer.append(&s2).unwrap();
        prop_assert_eq!(buffer.to_string(), format!("{}{}", s1, s2));
        prop_assert!(buffer.is_well_formed());
    }

    #[test]
    fn prop_delete_removes_one_occurrence(prefix in "[a-m]{0,100}", suffix in "[a-m]{0,100}") {
        // The needle uses letters the surroundings never contain, so it occurs once.
        let needle = "XYZ";
        let s = format!("{}{}{}", prefix, needle, suffix);
        let mut buffer = ContentBuffer::from_text(&s);

        prop_assert_eq!(buffer.delete_substring(needle).unwrap(), prefix.len());
        prop_assert_eq!(buffer.to_string(), format!("{}{}", prefix, suffix));
        prop_assert_eq!(buffer.len(), s.len() - needle.len());
        prop_assert!(buffer.is_well_formed());

        prop_assert!(buffer.delete_substring(needle).is_err());
        prop_assert_eq!(buffer.to_string(), format!("{}{}", prefix, suffix));
    }

    #[test]
    fn prop_split_then_concat_restores(s in text(), frac in 0.0f64..=1.0) {
        let pos = ((s.len() as f64) * frac) as usize;
        let buffer = ContentBuffer::from_text(&s);
        let (left, right) = buffer.split(pos);

        prop_assert_eq!(left.len(), pos);
        prop_assert!(left.is_well_formed() && right.is_well_formed());
        prop_assert_eq!(buffer.to_string(), s.clone());

        let joined = ContentBuffer::concat(left, right);
        prop_assert_eq!(joined.to_string(), s);
        prop_assert!(joined.is_well_formed());
    }
}

/// Random edit sequences keep the rope in step with a plain String
#[test]
fn test_edit_sequence_matches_string_model() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &proptest::collection::vec((0usize..1000, "[a-z]{1,12}", any::<bool>()), 1..60),
            |edits| {
                let mut buffer = ContentBuffer::new();
                let mut model = String::new();
                for (at, chunk, append) in edits {
                    if append {
                        buffer.append(&chunk).unwrap();
                        model.push_str(&chunk);
                    } else {
                        let pos = at % (model.len() + 1);
                        buffer.insert(pos, &chunk).unwrap();
                        model.insert_str(pos, &chunk);
                    }
                }
                prop_assert_eq!(buffer.to_string(), model);
                prop_assert!(buffer.is_well_formed());
                Ok(())
            },
        )
        .unwrap();
}
