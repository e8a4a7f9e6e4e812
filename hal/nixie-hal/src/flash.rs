//! Flash storage abstractions
//!
//! Provides traits for persistent key-value storage that can be implemented
//! by chip-specific HALs using their flash memory.

/// Highest per-task color slot that has a storage key
pub const MAX_COLOR_SLOT: u8 = 0x0F;

const TASK_COLOR_BASE: u8 = 0x10;

/// Storage keys for persisted clock data
///
/// The actual storage implementation handles wear leveling and
/// data integrity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageKey {
    /// Runtime clock configuration (binary postcard format)
    ClockConfig,
    /// RGB backlight color of a display task, by slot
    TaskColor(u8),
}

impl StorageKey {
    /// Key for a task color slot; slots past [`MAX_COLOR_SLOT`] have none
    pub fn task_color(slot: u8) -> Option<Self> {
        (slot <= MAX_COLOR_SLOT).then_some(StorageKey::TaskColor(slot))
    }

    /// Get the key as a byte value, `None` for an out-of-range color slot
    pub fn as_u8(self) -> Option<u8> {
        match self {
            StorageKey::ClockConfig => Some(0),
            StorageKey::TaskColor(slot) if slot <= MAX_COLOR_SLOT => Some(TASK_COLOR_BASE + slot),
            StorageKey::TaskColor(_) => None,
        }
    }

    /// Create a key from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(StorageKey::ClockConfig),
            v if (TASK_COLOR_BASE..=TASK_COLOR_BASE + MAX_COLOR_SLOT).contains(&v) => {
                Some(StorageKey::TaskColor(v - TASK_COLOR_BASE))
            }
            _ => None,
        }
    }
}

/// Errors from flash storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// Flash operation failed
    Flash,
    /// Storage operation failed
    Storage,
    /// Key not found
    NotFound,
    /// Buffer too small for the data
    BufferTooSmall,
    /// Data corrupted or invalid
    Corrupted,
    /// Storage is full
    Full,
    /// Key has no byte encoding
    InvalidKey,
}

/// Flash storage trait
///
/// Provides wear-leveled key-value storage for small settings records.
pub trait FlashStorage {
    /// Read a value by key into the provided buffer
    ///
    /// Returns the number of bytes read.
    fn read(
        &mut self,
        key: StorageKey,
        buffer: &mut [u8],
    ) -> impl core::future::Future<Output = Result<usize, FlashError>>;

    /// Write a value by key
    fn write(
        &mut self,
        key: StorageKey,
        data: &[u8],
    ) -> impl core::future::Future<Output = Result<(), FlashError>>;
}

// Implement the sequential-storage Key trait when the feature is enabled
#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for StorageKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        if buffer.is_empty() {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        buffer[0] = self
            .as_u8()
            .ok_or(sequential_storage::map::SerializationError::InvalidFormat)?;
        Ok(1)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        if buffer.is_empty() {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        match StorageKey::from_u8(buffer[0]) {
            Some(key) => Ok((key, 1)),
            None => Err(sequential_storage::map::SerializationError::InvalidFormat),
        }
    }
}
