//! Property-based tests using proptest
//!
//! These tests check that every component reports a size equal to the bits it
//! moves, and that decoding into a fresh prototype clone restores the value.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use message_components::component::range::bits_for_span;
use message_components::component::{
    ArrayComponent, BitFieldComponent, Component, FloatComponent, GroupComponent,
    HashDigestComponent, RangeComponent, S16Component, S32Component, StringComponent,
    U32Component, U8Component, V3Fixed, V3FixedComponent, WireComponent,
};
use message_components::core::bitfield::BitField;
use message_components::core::bitstream::{BitBuffer, BitStream};
use proptest::prelude::*;

/// Write `component`, check the bit count against `size()`, then decode into a
/// clone of `prototype` and return it.
fn transfer<C: WireComponent + Clone>(component: &C, prototype: &C) -> C {
    let mut stream = BitStream::new();
    let written = component.write(&mut stream).expect("write should not fail");
    assert_eq!(written, component.size());
    assert_eq!(stream.bits_written(), written);

    let mut decoded = prototype.clone();
    let read = decoded.read(&mut stream).expect("read should not fail");
    assert_eq!(read, written);
    assert_eq!(stream.bits_remaining(), 0);
    decoded
}

// Property: Bits written at any alignment come back unchanged
proptest! {
    #[test]
    fn prop_bitstream_roundtrip(fields in prop::collection::vec((any::<u32>(), 0usize..=32), 0..64)) {
        let mut stream = BitStream::new();
        for &(value, bits) in &fields {
            stream.write_bits(value, bits).expect("write");
        }
        prop_assert_eq!(stream.bits_written(), fields.iter().map(|&(_, b)| b).sum::<usize>());

        for &(value, bits) in &fields {
            let mask = if bits == 32 { u32::MAX } else { (1u32 << bits) - 1 };
            prop_assert_eq!(stream.read_bits(bits).expect("read"), value & mask);
        }
    }
}

// Property: Range values inside their bounds survive the trip
proptest! {
    #[test]
    fn prop_range_roundtrip(a in any::<i32>(), b in any::<i32>(), pick in any::<u64>()) {
        let (lower, upper) = if a <= b { (a, b) } else { (b, a) };
        let span = (i64::from(upper) - i64::from(lower)) as u64;
        let value = (i64::from(lower) + (pick % (span + 1)) as i64) as i32;

        let prototype = RangeComponent::with_bounds(lower, upper).unwrap();
        let range = RangeComponent::new(value, lower, upper).unwrap();
        prop_assert_eq!(range.size(), bits_for_span(lower, upper));

        let decoded = transfer(&range, &prototype);
        prop_assert_eq!(decoded.get(), value);
    }
}

// Property: bits_for_span is the smallest width that holds the span
proptest! {
    #[test]
    fn prop_bits_for_span_minimal(a in any::<i32>(), b in any::<i32>()) {
        let (lower, upper) = if a <= b { (a, b) } else { (b, a) };
        let span = (i64::from(upper) - i64::from(lower)) as u64;
        let bits = bits_for_span(lower, upper);

        prop_assert!(bits <= 32);
        prop_assert!(span < (1u64 << bits));
        if bits > 0 {
            prop_assert!(span >= (1u64 << (bits - 1)));
        }
    }
}

// Property: Integral components are lossless for their own type
proptest! {
    #[test]
    fn prop_integrals_roundtrip(a in any::<u8>(), b in any::<i16>(), c in any::<u32>(), d in any::<i32>()) {
        prop_assert_eq!(transfer(&U8Component::new(a), &U8Component::default()).get(), a);
        prop_assert_eq!(transfer(&S16Component::new(b), &S16Component::default()).get(), b);
        prop_assert_eq!(transfer(&U32Component::new(c), &U32Component::default()).get(), c);
        prop_assert_eq!(transfer(&S32Component::new(d), &S32Component::default()).get(), d);
    }
}

// Property: Floats keep their exact bit pattern
proptest! {
    #[test]
    fn prop_float_bit_exact(bits in any::<u32>()) {
        let value = f32::from_bits(bits);
        let decoded = transfer(&FloatComponent::new(value), &FloatComponent::default());
        prop_assert_eq!(decoded.get().to_bits(), bits);
    }
}

// Property: Strings without NUL bytes roundtrip and cost 8 * (len + 1) bits
proptest! {
    #[test]
    fn prop_string_roundtrip(text in r"[^\x00]{0,64}") {
        let component = StringComponent::new(text.clone());
        prop_assert_eq!(component.size(), 8 * (text.len() + 1));

        let decoded = transfer(&component, &StringComponent::default());
        prop_assert_eq!(decoded.get(), text.as_str());
    }
}

// Property: Fixed-point vectors and digests are lossless
proptest! {
    #[test]
    fn prop_vector_and_digest(x in any::<i32>(), y in any::<i32>(), z in any::<i32>(), digest in any::<[u8; 16]>()) {
        let vector = V3FixedComponent::new(V3Fixed::new(x, y, z));
        prop_assert_eq!(transfer(&vector, &V3FixedComponent::default()).get(), V3Fixed::new(x, y, z));

        let component = HashDigestComponent::from_bytes(digest);
        let decoded = transfer(&component, &HashDigestComponent::default());
        prop_assert_eq!(decoded.bytes(), &digest);
        prop_assert_eq!(decoded.get(), hex::encode(digest));
    }
}

// Property: Bit fields of any width roundtrip
proptest! {
    #[test]
    fn prop_bitfield_roundtrip(flags in prop::collection::vec(any::<bool>(), 0..200)) {
        let field: BitField = flags.iter().copied().collect();
        let component = BitFieldComponent::from(field);
        prop_assert_eq!(component.size(), flags.len());

        let decoded = transfer(&component, &BitFieldComponent::new(flags.len()));
        prop_assert_eq!(decoded.get().iter().collect::<Vec<_>>(), flags);
    }
}

// Property: Arrays carry any permitted number of elements
proptest! {
    #[test]
    fn prop_array_roundtrip(values in prop::collection::vec(any::<u16>(), 0..=40)) {
        let prototype = ArrayComponent::new(RangeComponent::with_bounds(0, 65535).unwrap(), 0, 40).unwrap();
        let mut array = prototype.clone();
        for &v in &values {
            array.push_component(RangeComponent::new(i32::from(v), 0, 65535).unwrap()).unwrap();
        }
        prop_assert_eq!(array.size(), 6 + 16 * values.len());

        let decoded = transfer(&array, &prototype);
        let got: Vec<i32> = decoded
            .iter()
            .map(|c| c.downcast::<RangeComponent>().unwrap().get())
            .collect();
        prop_assert_eq!(got, values.iter().map(|&v| i32::from(v)).collect::<Vec<_>>());
    }
}

// Property: Group size counts the indicator plus present optional fields only
proptest! {
    #[test]
    fn prop_group_presence(present in prop::collection::vec(any::<bool>(), 1..12), id in any::<u8>()) {
        let mut prototype = GroupComponent::new()
            .with_required(Component::named("id", U8Component::default()))
            .unwrap();
        for i in 0..present.len() {
            prototype
                .add_field(Component::named(format!("opt{i}"), U32Component::default()), true)
                .unwrap();
        }

        let mut group = prototype.clone();
        group.get_mut::<U8Component>("id").unwrap().set(id);
        for (i, &on) in present.iter().enumerate() {
            if on {
                group.enable::<U32Component>(&format!("opt{i}")).unwrap().set(i as u32);
            }
        }

        let enabled = present.iter().filter(|&&p| p).count();
        prop_assert_eq!(group.size(), 8 + present.len() + 32 * enabled);

        let decoded = transfer(&group, &prototype);
        prop_assert_eq!(decoded.get::<U8Component>("id").unwrap().get(), id);
        for (i, &on) in present.iter().enumerate() {
            let name = format!("opt{i}");
            prop_assert_eq!(decoded.is_present(&name).unwrap(), on);
            let expected = if on { i as u32 } else { 0 };
            prop_assert_eq!(decoded.get::<U32Component>(&name).unwrap().get(), expected);
        }
    }
}

// Property: Decoding arbitrary bytes never panics
proptest! {
    #[test]
    fn prop_decode_garbage_no_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let mut prototype = GroupComponent::new()
            .with_required(Component::named("tic", U8Component::default()))
            .unwrap()
            .with_optional(Component::named("name", StringComponent::default()))
            .unwrap();
        prototype
            .add_field(
                Component::named("items", ArrayComponent::new(HashDigestComponent::default(), 0, 3).unwrap()),
                false,
            )
            .unwrap();

        let mut stream = BitStream::from_bytes(&bytes);
        let mut decoded = prototype.clone();
        let _ = decoded.read(&mut stream);
    }
}
