use syllabus::common::{Direction, Value};
use syllabus::encoding::{decode_value, encode_value, ValueDecoder, ValueEncoder};
use syllabus_int_test::test_util::total_order_fixture;

#[ctor::ctor]
fn init() {
    colog::init();
}

#[test]
fn test_fixture_is_in_value_order() {
    let fixture = total_order_fixture();
    for pair in fixture.windows(2) {
        assert!(pair[0] <= pair[1], "{} <= {}", pair[0], pair[1]);
    }

    let mut shuffled = fixture.clone();
    shuffled.reverse();
    shuffled.sort();
    assert_eq!(shuffled, fixture);
}

#[test]
fn test_ascending_encodings_strictly_increase() {
    let encoded: Vec<_> = total_order_fixture()
        .iter()
        .map(|v| encode_value(v, Direction::Ascending))
        .collect();
    for (i, pair) in encoded.windows(2).enumerate() {
        assert!(pair[0] < pair[1], "entry {}: {} < {}", i, pair[0], pair[1]);
    }
}

#[test]
fn test_descending_encodings_of_reversed_fixture_strictly_increase() {
    let mut fixture = total_order_fixture();
    fixture.reverse();
    let encoded: Vec<_> = fixture
        .iter()
        .map(|v| encode_value(v, Direction::Descending))
        .collect();
    for (i, pair) in encoded.windows(2).enumerate() {
        assert!(pair[0] < pair[1], "entry {}: {} < {}", i, pair[0], pair[1]);
    }
}

#[test]
fn test_every_fixture_round_trips() {
    for value in total_order_fixture() {
        for direction in [Direction::Ascending, Direction::Descending] {
            let bytes = encode_value(&value, direction);
            let decoded = decode_value(&bytes, direction).unwrap();
            assert_eq!(decoded, value, "{} {}", value, direction);
            // zeros compare equal, so check the sign survives too
            if let (Some(a), Some(b)) = (decoded.as_number(), value.as_number()) {
                assert_eq!(a.is_sign_negative(), b.is_sign_negative());
            }
        }
    }
}

#[test]
fn test_equality_is_total_order_equality() {
    let fixture = total_order_fixture();
    for a in &fixture {
        for b in &fixture {
            assert_eq!(a == b, a.cmp(b) == std::cmp::Ordering::Equal, "{} vs {}", a, b);
        }
    }
    assert_eq!(Value::from(0.0), Value::from(-0.0));
    assert_eq!(Value::NAN, Value::number(f64::from_bits(0x7FF8_0000_0000_0001)));
}

#[test]
fn test_supplementary_plane_strings_sort_by_codepoint() {
    let halfwidth = Value::from("\u{FF61}");
    let linear_b = Value::from("\u{10002}");
    assert!(halfwidth < linear_b);
    assert!(Value::from("z") < halfwidth);
    assert!(
        encode_value(&halfwidth, Direction::Ascending)
            < encode_value(&linear_b, Direction::Ascending)
    );
}

#[test]
fn test_mixed_direction_composite_order() {
    // (asc string, desc number): ties on the string are broken by the number in reverse
    let key = |s: &str, n: f64| {
        let mut encoder = ValueEncoder::new();
        encoder.asc().write_value(&Value::from(s));
        encoder.desc().write_value(&Value::from(n));
        encoder.into_byte_array()
    };
    let mut keys = vec![key("b", 1.0), key("a", 1.0), key("a", 2.0), key("b", 3.0)];
    keys.sort();
    assert_eq!(
        keys,
        vec![key("a", 2.0), key("a", 1.0), key("b", 3.0), key("b", 1.0)]
    );

    let mut decoder = ValueDecoder::new(&keys[0]);
    assert_eq!(decoder.asc().read_value().unwrap(), Value::from("a"));
    assert_eq!(decoder.desc().read_value().unwrap(), Value::from(2.0));
    assert!(decoder.is_exhausted());
}
