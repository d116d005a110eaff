//! Property-based testing for the value codec
//!
//! Uses proptest to check round-trip, selection and code-shape properties
//! over randomly generated inputs.

use huffwire::codec::{symbol_body_bits, Decoder, Encoder, Value, ValueKind};
use huffwire::entropy::WeightedAlphabet;
use huffwire::{decode_values, encode_values};
use proptest::prelude::*;
use std::io::Cursor;

// =============================================================================
// GENERATORS
// =============================================================================

fn ascii_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..128, 0..200)
}

fn zero_free_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(1u8..=255, 0..200)
}

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        ascii_bytes().prop_map(Value::Ascii),
        prop::collection::vec(any::<u8>(), 0..200).prop_map(Value::Utf8),
        zero_free_bytes().prop_map(Value::Raw),
        any::<u32>().prop_map(Value::Symbol),
    ]
}

fn decode_one(data: Vec<u8>) -> Value {
    Decoder::new(Cursor::new(data)).read_value().unwrap()
}

// =============================================================================
// ROUND-TRIP PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_ascii_round_trip_drops_high_bytes(text in prop::collection::vec(any::<u8>(), 0..300)) {
        let mut encoder = Encoder::new(Vec::new());
        encoder.write_ascii(&text).unwrap();
        let expected: Vec<u8> = text.iter().copied().filter(|&b| b < 128).collect();
        prop_assert_eq!(decode_one(encoder.finish().unwrap()), Value::Ascii(expected));
    }

    #[test]
    fn prop_utf8_round_trip(text in prop::collection::vec(any::<u8>(), 0..300)) {
        let mut encoder = Encoder::new(Vec::new());
        encoder.write_utf8(&text).unwrap();
        prop_assert_eq!(decode_one(encoder.finish().unwrap()), Value::Utf8(text));
    }

    #[test]
    fn prop_raw_round_trip_drops_zeros(text in prop::collection::vec(any::<u8>(), 0..300)) {
        let mut encoder = Encoder::new(Vec::new());
        encoder.write_raw(&text).unwrap();
        let expected: Vec<u8> = text.iter().copied().filter(|&b| b != 0).collect();
        prop_assert_eq!(decode_one(encoder.finish().unwrap()), Value::Raw(expected));
    }

    #[test]
    fn prop_encoded_is_lossless(text in prop::collection::vec(any::<u8>(), 0..300)) {
        let mut encoder = Encoder::new(Vec::new());
        let kind = encoder.write_encoded(&text).unwrap();

        let has_high = text.iter().any(|&b| b >= 128);
        let has_zero = text.contains(&0);
        let expected_kind = match (has_high, has_zero) {
            (false, _) => ValueKind::Ascii,
            (true, false) => ValueKind::Raw,
            (true, true) => ValueKind::Utf8,
        };
        prop_assert_eq!(kind, expected_kind);

        let value = decode_one(encoder.finish().unwrap());
        prop_assert_eq!(value.kind(), expected_kind);
        prop_assert_eq!(value.into_bytes().unwrap(), text);
    }

    #[test]
    fn prop_symbol_round_trip_and_width(value in any::<u32>()) {
        let mut encoder = Encoder::new(Vec::new());
        encoder.write_symbol(value).unwrap();
        // symbol tag is three bits
        let expected_bits = 3 + symbol_body_bits(value) as u64;
        prop_assert_eq!(encoder.bits_written(), expected_bits);

        let mut decoder = Decoder::new(Cursor::new(encoder.finish().unwrap()));
        prop_assert_eq!(decoder.read_u32().unwrap(), value);
        prop_assert_eq!(decoder.bits_read(), expected_bits);
    }

    #[test]
    fn prop_mixed_stream_round_trip(values in prop::collection::vec(value_strategy(), 0..30)) {
        let data = encode_values(&values).unwrap();
        prop_assert_eq!(decode_values(&data, values.len()).unwrap(), values);
    }
}

// =============================================================================
// PREFIX-CODE PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_codes_are_prefix_free(weights in prop::collection::vec(0u64..10_000, 1..300)) {
        let mut alphabet = WeightedAlphabet::new(weights.len());
        for (symbol, &w) in weights.iter().enumerate() {
            alphabet.bump(symbol, w).unwrap();
        }
        let table = alphabet.seal().unwrap();
        let codes = table.codes();

        let mut sorted: Vec<_> = codes.to_vec();
        sorted.sort_by_key(|c| c.len);
        for (i, a) in sorted.iter().enumerate() {
            for b in &sorted[i + 1..] {
                prop_assert!(!a.is_prefix_of(b), "{} is a prefix of {}", a, b);
            }
        }
    }

    #[test]
    fn prop_sealing_is_deterministic(weights in prop::collection::vec(0u64..50, 1..100)) {
        let build = || {
            let mut alphabet = WeightedAlphabet::new(weights.len());
            for (symbol, &w) in weights.iter().enumerate() {
                alphabet.bump(symbol, w).unwrap();
            }
            alphabet.seal().unwrap()
        };
        let (first, second) = (build(), build());
        prop_assert_eq!(first.codes(), second.codes());
    }

    #[test]
    fn prop_table_round_trip(
        weights in prop::collection::vec(0u64..1000, 2..64),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..100),
    ) {
        let mut alphabet = WeightedAlphabet::new(weights.len());
        for (symbol, &w) in weights.iter().enumerate() {
            alphabet.bump(symbol, w).unwrap();
        }
        let table = alphabet.seal().unwrap();
        let symbols: Vec<usize> = picks.iter().map(|i| i.index(weights.len())).collect();

        let mut writer = huffwire::BitWriter::new(Vec::new());
        for &s in &symbols {
            table.encode(&mut writer, s).unwrap();
        }
        let data = writer.finish().unwrap();

        let mut reader = huffwire::BitReader::new(Cursor::new(data));
        for &s in &symbols {
            prop_assert_eq!(table.decode(&mut reader).unwrap(), s);
        }
    }
}
