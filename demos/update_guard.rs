//! Update guard example: write prevention during a firmware update
//!
//! This example demonstrates:
//! - A static shared store accessed from two "contexts"
//! - The reserved low window of the session medium being masked while an
//!   update is in flight
//! - Components observing suppressed writes and retrying afterwards

use embedded_prefs::prelude::*;

// The session medium guards its first 32 words; that range holds the
// bootloader's own bookkeeping on real hardware.
static PREFS: SharedPrefStore<MemMedium<128>, GuardedMedium<MemMedium<64>>> = SharedPrefStore::new(
    PrefStore::new(MemMedium::new(), GuardedMedium::new(MemMedium::new())),
);

fn main() {
    println!("=== Update Guard Example ===\n");

    // Setup phase: the first session allocation lands inside the guarded
    // window, exactly like early-registered components do on real hardware.
    let mut last_state = Retained::new(0x4C53_5401, Retention::SessionPersist, 0u16);
    PREFS.with(|store| last_state.bind(store));

    PREFS.with(|store| last_state.save(store, &7)).unwrap();
    println!("Normal operation: saved 7, reads {}", PREFS.with(|store| last_state.get(store)));

    // An updater task opens the prevention window before rewriting
    // firmware.
    PREFS.with(|store| store.set_write_prevention(true));
    println!("\nUpdate window open.");

    let result = PREFS.with(|store| last_state.save(store, &8));
    println!("Component save while updating: {:?}", result);
    println!(
        "Stored value untouched: reads {}",
        PREFS.with(|store| last_state.get(store))
    );

    // Update done; the window closes and the retry lands.
    PREFS.with(|store| store.set_write_prevention(false));
    PREFS.with(|store| last_state.save(store, &8)).unwrap();
    println!("\nUpdate window closed. Retry saved, reads {}", PREFS.with(|store| last_state.get(store)));
}
