#![allow(clippy::unwrap_used)]

use message_components::component::{
    ArrayComponent, Component, GroupComponent, RangeComponent, StringComponent, U16Component,
    V3Fixed, V3FixedComponent, WireComponent,
};
use message_components::config::StreamConfig;
use message_components::core::bitstream::BitStream;
use message_components::protocol::message::{Message, MessageType};

fn actor_prototype() -> GroupComponent {
    GroupComponent::new()
        .with_required(Component::named("netid", U16Component::default()))
        .unwrap()
        .with_required(Component::named("pos", V3FixedComponent::default()))
        .unwrap()
        .with_optional(Component::named("health", RangeComponent::with_bounds(0, 200).unwrap()))
        .unwrap()
}

#[test]
fn stress_replication_encode_decode_large_series() {
    // Many snapshots of growing size through one reused stream
    let mut prototype = Message::new(MessageType::Replication);
    prototype
        .add_field(
            Component::named(
                "actors",
                ArrayComponent::new(actor_prototype(), 0, 512).unwrap(),
            ),
            false,
        )
        .unwrap();

    let mut stream = BitStream::with_config(&StreamConfig {
        max_buffer_bytes: 64 * 1024,
        max_string_length: 1024,
    });

    for actors in [0usize, 1, 16, 128, 512] {
        for round in 0..200 {
            let mut snapshot = prototype.clone();
            let list = snapshot.get_mut::<ArrayComponent>("actors").unwrap();
            for i in 0..actors {
                let actor = list.push::<GroupComponent>().unwrap();
                actor.get_mut::<U16Component>("netid").unwrap().set(i as u16);
                actor
                    .get_mut::<V3FixedComponent>("pos")
                    .unwrap()
                    .set(V3Fixed::new(i as i32, round, -(i as i32)));
                if i % 3 == 0 {
                    actor.enable::<RangeComponent>("health").unwrap().set(100);
                }
            }

            let written = snapshot.write(&mut stream).unwrap();
            assert_eq!(written, snapshot.size());

            let mut decoded = prototype.clone();
            assert_eq!(decoded.read(&mut stream).unwrap(), written);
            assert_eq!(decoded.get::<ArrayComponent>("actors").unwrap().len(), actors);
            stream.clear();
        }
    }
}

#[test]
fn stress_long_strings_until_capacity() {
    let mut stream = BitStream::new();
    let text = StringComponent::new("x".repeat(255));
    let mut written = 0;
    while text.write(&mut stream).is_ok() {
        written += 1;
    }
    // each string takes 256 bytes of the default 8 KiB buffer
    assert_eq!(written, 32);

    let mut decoded = StringComponent::default();
    for _ in 0..written {
        decoded.read(&mut stream).unwrap();
        assert_eq!(decoded.get().len(), 255);
    }
}
