//! Integration tests for the rope-backed content buffer

use treefs::error::BufferError;
use treefs::rope::{ContentBuffer, MAX_LEAF_LEN};

/// Insert then delete restores the original text
#[test]
fn test_hello_beautiful_world() {
    let mut buffer = ContentBuffer::from_text("Hello World");
    buffer.insert(5, " Beautiful").unwrap();
    assert_eq!(buffer.to_string(), "Hello Beautiful World");

    assert_eq!(buffer.delete_substring(" Beautiful").unwrap(), 5);
    assert_eq!(buffer.to_string(), "Hello World");
    assert!(buffer.is_well_formed());
}

/// Failed edits report an error and leave the content untouched
#[test]
fn test_failed_edits_are_noops() {
    let mut buffer = ContentBuffer::from_text("abc");

    assert_eq!(
        buffer.insert(4, "x"),
        Err(BufferError::InvalidPosition { pos: 4, len: 3 })
    );
    assert_eq!(buffer.insert(1, ""), Err(BufferError::EmptyText));
    assert_eq!(buffer.append(""), Err(BufferError::EmptyText));
    assert!(matches!(
        buffer.delete_substring("zzz"),
        Err(BufferError::NotFound(_))
    ));
    assert_eq!(buffer.to_string(), "abc");
}

/// Insert at both ends of the buffer
#[test]
fn test_insert_at_boundaries() {
    let mut buffer = ContentBuffer::from_text("middle");
    buffer.insert(0, "<").unwrap();
    buffer.insert(buffer.len(), ">").unwrap();
    assert_eq!(buffer.to_string(), "<middle>");

    let mut empty = ContentBuffer::new();
    empty.insert(0, "first").unwrap();
    assert_eq!(empty.to_string(), "first");
}

/// Split leaves the source buffer intact and concat restores it
#[test]
fn test_split_is_non_destructive() {
    let text = "the quick brown fox jumps over the lazy dog";
    let buffer = ContentBuffer::from_text(text);

    let (left, right) = buffer.split(10);
    assert_eq!(left.to_string(), &text[..10]);
    assert_eq!(right.to_string(), &text[10..]);
    assert_eq!(buffer.to_string(), text);

    let joined = ContentBuffer::concat(left, right);
    assert_eq!(joined.to_string(), text);
    assert!(joined.is_well_formed());
}

/// Many appends keep the rope balanced
#[test]
fn test_repeated_append_stays_balanced() {
    let mut buffer = ContentBuffer::new();
    let mut expected = String::new();
    for i in 0..2000 {
        let chunk = format!("line {}\n", i);
        buffer.append(&chunk).unwrap();
        expected.push_str(&chunk);
    }

    assert_eq!(buffer.len(), expected.len());
    assert_eq!(buffer.to_string(), expected);
    assert!(buffer.is_well_formed());

    let leaves = expected.len().div_ceil(MAX_LEAF_LEN) as f64;
    assert!((buffer.height() as f64) <= 1.44 * (leaves + 2.0).log2() + 2.0);
}

/// find reports the first occurrence by byte offset
#[test]
fn test_find_first_occurrence() {
    let buffer = ContentBuffer::from_text("abcabcabc");
    assert_eq!(buffer.find("cab"), Some(2));
    assert_eq!(buffer.find("abcd"), None);
    assert_eq!(buffer.byte_at(4), Some(b'b'));
    assert_eq!(buffer.byte_at(9), None);
}
