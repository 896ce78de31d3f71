//! Example: Building and Decoding a Chat Message
//!
//! This example builds a chat message prototype, fills in a copy, encodes it,
//! and decodes the bytes into a second copy of the same prototype.
//!
//! Run with: `cargo run --example chat_message`

#![allow(clippy::uninlined_format_args)]

use message_components::component::{
    Component, GroupComponent, RangeComponent, StringComponent, U8Component, WireComponent,
};
use message_components::config::CodecConfig;
use message_components::core::bitstream::BitStream;
use message_components::protocol::message::{Message, MessageType};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Chat Message Demo ===\n");

    let config = CodecConfig::from_env()?;
    config.validate_strict()?;

    // 1. Prototype: sender slot, text, and an optional team channel
    let prototype = Message::with_payload(
        MessageType::Chat,
        GroupComponent::new()
            .with_required(Component::named("player", U8Component::default()))?
            .with_required(Component::named("text", StringComponent::default()))?
            .with_optional(Component::named("team", RangeComponent::with_bounds(0, 3)?))?,
    );
    println!("Prototype size: {} bits", prototype.size());

    // 2. Fill a copy
    let mut outgoing = prototype.clone();
    outgoing.get_mut::<U8Component>("player")?.set(3);
    outgoing
        .get_mut::<StringComponent>("text")?
        .set("rocket jump incoming");
    outgoing.payload_mut().enable::<RangeComponent>("team")?.set(2);

    // 3. Encode
    let mut stream = BitStream::with_config(&config.stream);
    let bits = outgoing.write(&mut stream)?;
    let bytes = stream.freeze();
    println!(
        "Encoded {} as {} bits ({} bytes)",
        outgoing.message_type().name(),
        bits,
        bytes.len()
    );
    println!("   - Hex: {}", hex::encode(&bytes));

    // 4. Decode into a fresh copy
    let mut incoming = prototype.clone();
    let mut reader = BitStream::from_bytes(&bytes);
    incoming.read(&mut reader)?;
    println!(
        "Decoded: player {} says {:?} on team {}",
        incoming.get::<U8Component>("player")?.get(),
        incoming.get::<StringComponent>("text")?.get(),
        incoming.get::<RangeComponent>("team")?.get()
    );

    // 5. Without the optional field the message shrinks to one presence bit
    let mut quiet = incoming.clone();
    quiet.payload_mut().set_present("team", false)?;
    println!(
        "Without team: {} bits (was {})",
        quiet.size(),
        incoming.size()
    );

    Ok(())
}
