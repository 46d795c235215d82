//! Basic example: retention classes and the default-value fallback
//!
//! This example demonstrates:
//! - Building a store from two in-memory mediums
//! - Binding retained values with different retention policies
//! - Reading defaults before anything was saved
//! - What a power cycle does to each retention class

use embedded_prefs::prelude::*;

fn main() {
    println!("=== Basic Preferences Example ===\n");

    // Flash-like persistent store and RTC-like session store. On a target
    // these would wrap the real drivers.
    let mut store = PrefStoreBuilder::new()
        .persistent(MemMedium::<128>::new())
        .session(GuardedMedium::new(MemMedium::<64>::new()))
        .build();

    // One value per retention class
    let mut brightness = Retained::new(0x4C49_5401, Retention::AlwaysPersist, 128u8);
    let mut boot_count = Retained::new(0x424F_4F54, Retention::SessionPersist, 0u32);
    let mut debug_mode = Retained::new(0x4442_4701, Retention::Ephemeral, false);

    brightness.bind(&mut store);
    boot_count.bind(&mut store);
    debug_mode.bind(&mut store);

    println!("Fresh store, everything reads as its default:");
    println!("  brightness = {}", brightness.get(&store));
    println!("  boot_count = {}", boot_count.get(&store));
    println!("  debug_mode = {}\n", debug_mode.get(&store));

    // Save new state
    brightness.save(&mut store, &200).unwrap();
    boot_count.save(&mut store, &3).unwrap();
    debug_mode.save(&mut store, &true).unwrap(); // no-op, never stored

    println!("After saving 200 / 3 / true:");
    println!("  brightness = {}", brightness.get(&store));
    println!("  boot_count = {}", boot_count.get(&store));
    println!("  debug_mode = {} (ephemeral, default wins)\n", debug_mode.get(&store));

    // Saving an unchanged value issues no physical write; this call is
    // free with respect to flash wear.
    brightness.save(&mut store, &200).unwrap();

    // Power loss clears the session medium. The persistent medium keeps
    // its contents.
    store.session_mut().inner_mut().power_cycle();

    println!("After power loss:");
    println!("  brightness = {} (survived)", brightness.get(&store));
    println!("  boot_count = {} (back to default)", boot_count.get(&store));
    println!("  debug_mode = {}", debug_mode.get(&store));
}
