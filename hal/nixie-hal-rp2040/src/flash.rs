//! Settings store in the RP2040 boot flash
//!
//! The clock keeps two kinds of record: the postcard-encoded
//! `ClockConfig` and one 3-byte color per task slot. Both live in a
//! sequential-storage map over the last sectors of the flash chip,
//! which `memory.x` keeps out of the program image.

use core::ops::Range;

use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

pub use nixie_hal::flash::{FlashError, StorageKey};

/// Size of the flash chip on the clock board
pub const FLASH_CAPACITY: usize = 2 * 1024 * 1024;

/// Erase sectors reserved for the settings store
pub const STORE_SECTORS: usize = 16;

/// Offset of the settings store from the start of flash
pub const STORE_OFFSET: usize = FLASH_CAPACITY - STORE_SECTORS * ERASE_SIZE;

/// Record buffer; the encoded config is the largest record
const RECORD_BUF_LEN: usize = 128;

const _: () = assert!(STORE_SECTORS >= 2, "map needs a spare sector");
const _: () = assert!(STORE_OFFSET % ERASE_SIZE == 0);

fn store_range() -> Range<u32> {
    (STORE_OFFSET as u32)..(FLASH_CAPACITY as u32)
}

fn storage_error<E>(e: sequential_storage::Error<E>) -> FlashError {
    match e {
        sequential_storage::Error::FullStorage => FlashError::Full,
        sequential_storage::Error::Corrupted { .. } => FlashError::Corrupted,
        sequential_storage::Error::Storage { .. } => FlashError::Flash,
        _ => FlashError::Storage,
    }
}

/// Key-value settings store on the RP2040 flash
pub struct Rp2040FlashStorage<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_CAPACITY>,
}

impl<'d> Rp2040FlashStorage<'d> {
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
        }
    }
}

impl<'d> nixie_hal::FlashStorage for Rp2040FlashStorage<'d> {
    async fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
        let mut record = [0u8; RECORD_BUF_LEN];
        let value = map::fetch_item::<StorageKey, &[u8], _>(
            &mut self.flash,
            store_range(),
            &mut NoCache::new(),
            &mut record,
            &key,
        )
        .await
        .map_err(storage_error)?
        .ok_or(FlashError::NotFound)?;

        let out = buffer
            .get_mut(..value.len())
            .ok_or(FlashError::BufferTooSmall)?;
        out.copy_from_slice(value);
        Ok(value.len())
    }

    async fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
        if data.len() >= RECORD_BUF_LEN {
            return Err(FlashError::BufferTooSmall);
        }
        let mut record = [0u8; RECORD_BUF_LEN];
        map::store_item(
            &mut self.flash,
            store_range(),
            &mut NoCache::new(),
            &mut record,
            &key,
            &data,
        )
        .await
        .map_err(storage_error)
    }
}

/// Storage type used by the firmware
pub type FlashStorage<'d> = Rp2040FlashStorage<'d>;
