#![no_main]

use libfuzzer_sys::fuzz_target;
use message_components::component::{
    ArrayComponent, BitFieldComponent, Component, FloatComponent, GroupComponent,
    HashDigestComponent, RangeComponent, StringComponent, U8Component, V2FixedComponent,
    WireComponent,
};
use message_components::core::bitstream::BitStream;

fn prototype() -> Option<GroupComponent> {
    let inner = GroupComponent::new()
        .with_required(Component::named("name", StringComponent::default()))
        .ok()?
        .with_optional(Component::named("md5", HashDigestComponent::default()))
        .ok()?;

    GroupComponent::new()
        .with_required(Component::named("tic", U8Component::default()))
        .ok()?
        .with_required(Component::named("angle", RangeComponent::with_bounds(-180, 180).ok()?))
        .ok()?
        .with_optional(Component::named("pos", V2FixedComponent::default()))
        .ok()?
        .with_optional(Component::named("flags", BitFieldComponent::new(12)))
        .ok()?
        .with_optional(Component::named("speed", FloatComponent::default()))
        .ok()?
        .with_required(Component::named("files", ArrayComponent::new(inner, 0, 16).ok()?))
        .ok()
}

fuzz_target!(|data: &[u8]| {
    // Decoding untrusted bytes must fail cleanly, and a successful decode must
    // re-encode to exactly the number of bits it consumed
    let Some(prototype) = prototype() else {
        return;
    };
    let mut stream = BitStream::from_bytes(data);
    let mut decoded = prototype.clone();
    if let Ok(bits) = decoded.read(&mut stream) {
        assert_eq!(decoded.size(), bits);
        let mut out = BitStream::new();
        if let Ok(written) = decoded.write(&mut out) {
            assert_eq!(written, bits);
        }
    }
});
