//! A `no_std`, no-alloc persistent preference layer for embedded systems.
//!
//! This crate lets components "remember" typed state across reboots and
//! power loss: a region allocator carves fixed-size word regions out of a
//! small non-volatile backing store, every record is guarded by a checksum
//! that bakes in the region's offset and type tag, and a typed wrapper binds
//! a retention policy to a value so redundant writes never reach
//! endurance-limited media.
//!
//! # Features
//!
//! - **Zero heap allocation** - Bounded buffers only, no `alloc`
//! - **Retention policies** - Survive power loss, survive reboot only, or never persist
//! - **Checksummed records** - Offset and type tag are part of the checksum
//!   domain, so stale records from an older firmware image fail validation
//!   instead of loading as garbage
//! - **Write dedup** - Saving an unchanged value performs no physical write
//! - **Update-safe** - An optional write-prevention window masks writes to
//!   reserved low addresses while a firmware update is in flight
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐  get / save   ┌────────────┐  words + crc  ┌─────────────┐
//! │ Retained<T> │ ─────────────▶│  PrefSlot  │ ─────────────▶│  PrefStore  │
//! │  (policy,   │ encode, dedup │ (region,   │ pack, verify  │ (allocator, │
//! │   default)  │               │  type tag) │               │   mediums)  │
//! └─────────────┘               └────────────┘               └──────┬──────┘
//!                                                                   │
//!                                                 ┌─────────────────┴─────┐
//!                                                 ▼                       ▼
//!                                         persistent medium       session medium
//!                                         (survives power       (survives reboot,
//!                                          loss, flash-like)     lost on power-off)
//! ```
//!
//! - **`Retained<T>`** hands components a default value until storage has
//!   something better, and skips writes whose value is already stored
//! - **`PrefSlot`** owns one region and the save/load record protocol
//! - **`PrefStore`** owns the mediums, allocates non-overlapping regions in
//!   deterministic order, and fans out the write-prevention switch
//!
//! # Example
//!
//! ```rust
//! use embedded_prefs::prelude::*;
//!
//! // Two in-memory mediums standing in for flash and RTC memory.
//! let mut store = PrefStoreBuilder::new()
//!     .persistent(MemMedium::<128>::new())
//!     .session(GuardedMedium::new(MemMedium::<64>::new()))
//!     .build();
//!
//! // A brightness setting that must survive power loss.
//! let mut brightness = Retained::new(0x4C49_5401, Retention::AlwaysPersist, 128u8);
//! brightness.bind(&mut store);
//!
//! assert_eq!(brightness.get(&store), 128); // nothing stored yet, default
//! brightness.save(&mut store, &200).unwrap();
//! assert_eq!(brightness.get(&store), 200);
//! ```
//!
//! The crate does not ship a flash driver; integrators implement
//! [`BackingMedium`](prefs::BackingMedium) over their HAL and the rest of
//! the layer is driver-agnostic.

#![deny(unsafe_code)]
#![no_std]

pub mod prefs;

pub mod prelude {
    pub use crate::prefs::prelude::*;
}
