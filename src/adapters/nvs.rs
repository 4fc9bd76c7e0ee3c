//! NVS (Non-Volatile Storage) adapter.
//!
//! Implements [`RecordStore`] as a small EEPROM-style byte image.
//!
//! - **`target_os = "espidf"`** — the image is one NVS blob; every write
//!   is read-modify-write followed by `nvs_commit()`, which is atomic.
//! - **`not(target_os = "espidf")`** — an in-memory image for host tests.
//!
//! A never-written image reads as `0xFF`, like erased EEPROM.

use log::info;
#[cfg(target_os = "espidf")]
use log::warn;

use crate::app::ports::RecordStore;
use crate::error::StorageError;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

/// Size of the emulated EEPROM image.
pub const IMAGE_LEN: usize = 64;

#[cfg(target_os = "espidf")]
const NAMESPACE: &[u8] = b"irrigator\0";
#[cfg(target_os = "espidf")]
const IMAGE_KEY: &[u8] = b"eeprom\0";

pub struct NvsRecordStore {
    #[cfg(not(target_os = "espidf"))]
    image: [u8; IMAGE_LEN],
    #[cfg(not(target_os = "espidf"))]
    fail_io: bool,
}

fn checked_range(offset: usize, len: usize) -> Result<core::ops::Range<usize>, StorageError> {
    let end = offset.checked_add(len).ok_or(StorageError::OutOfBounds)?;
    if end > IMAGE_LEN {
        return Err(StorageError::OutOfBounds);
    }
    Ok(offset..end)
}

impl NvsRecordStore {
    /// Initialise NVS flash and open the store.
    ///
    /// On first boot or after a version mismatch the NVS partition is
    /// erased and re-initialised automatically.
    #[cfg(target_os = "espidf")]
    pub fn new() -> Result<Self, StorageError> {
        // SAFETY: nvs_flash_init / nvs_flash_erase are called from the
        // single main-task context before any concurrent NVS access.
        let ret = unsafe { nvs_flash_init() };
        if ret == ESP_ERR_NVS_NO_FREE_PAGES as i32 || ret == ESP_ERR_NVS_NEW_VERSION_FOUND as i32 {
            warn!("NVS: erasing and re-initialising flash partition");
            if unsafe { nvs_flash_erase() } != ESP_OK as i32 {
                return Err(StorageError::IoError);
            }
            if unsafe { nvs_flash_init() } != ESP_OK as i32 {
                return Err(StorageError::IoError);
            }
        } else if ret != ESP_OK as i32 {
            return Err(StorageError::IoError);
        }
        info!("NvsRecordStore: ESP-IDF NVS initialised");
        Ok(Self {})
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Result<Self, StorageError> {
        info!("NvsRecordStore: simulation backend");
        Ok(Self {
            image: [0xFF; IMAGE_LEN],
            fail_io: false,
        })
    }

    /// Make every subsequent read and write fail (host fault injection).
    #[cfg(not(target_os = "espidf"))]
    pub fn set_fail_io(&mut self, fail: bool) {
        self.fail_io = fail;
    }

    /// Raw view of the simulated image.
    #[cfg(not(target_os = "espidf"))]
    pub fn image(&self) -> &[u8; IMAGE_LEN] {
        &self.image
    }

    /// Open the namespace, run `f` with the handle, then close.
    #[cfg(target_os = "espidf")]
    fn with_nvs_handle<F, T>(write: bool, f: F) -> Result<T, i32>
    where
        F: FnOnce(nvs_handle_t) -> Result<T, i32>,
    {
        let mut handle: nvs_handle_t = 0;
        let mode = if write {
            nvs_open_mode_t_NVS_READWRITE
        } else {
            nvs_open_mode_t_NVS_READONLY
        };

        let ret = unsafe { nvs_open(NAMESPACE.as_ptr() as *const _, mode, &mut handle) };
        if ret != ESP_OK as i32 {
            return Err(ret);
        }

        let result = f(handle);
        unsafe {
            nvs_close(handle);
        }
        result
    }

    /// Current image; erased if the blob has never been written.
    #[cfg(target_os = "espidf")]
    fn load_image(&self) -> Result<[u8; IMAGE_LEN], StorageError> {
        let mut image = [0xFFu8; IMAGE_LEN];
        let result = Self::with_nvs_handle(false, |handle| {
            let mut size = IMAGE_LEN;
            let ret = unsafe {
                nvs_get_blob(
                    handle,
                    IMAGE_KEY.as_ptr() as *const _,
                    image.as_mut_ptr() as *mut _,
                    &mut size,
                )
            };
            if ret != ESP_OK as i32 {
                return Err(ret);
            }
            Ok(())
        });
        match result {
            Ok(()) => Ok(image),
            // A missing namespace or key is an erased image.
            Err(e) if e == ESP_ERR_NVS_NOT_FOUND as i32 => Ok([0xFF; IMAGE_LEN]),
            Err(e) => {
                warn!("NvsRecordStore: NVS read error {}", e);
                Err(StorageError::IoError)
            }
        }
    }
}

#[cfg(target_os = "espidf")]
impl RecordStore for NvsRecordStore {
    fn read_bytes(&self, offset: usize, buf: &mut [u8]) -> Result<(), StorageError> {
        let range = checked_range(offset, buf.len())?;
        let image = self.load_image()?;
        buf.copy_from_slice(&image[range]);
        Ok(())
    }

    fn write_bytes(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError> {
        let range = checked_range(offset, data.len())?;
        let mut image = self.load_image()?;
        image[range].copy_from_slice(data);

        let result = Self::with_nvs_handle(true, |handle| {
            let ret = unsafe {
                nvs_set_blob(
                    handle,
                    IMAGE_KEY.as_ptr() as *const _,
                    image.as_ptr() as *const _,
                    image.len(),
                )
            };
            if ret != ESP_OK as i32 {
                return Err(ret);
            }
            let ret = unsafe { nvs_commit(handle) };
            if ret != ESP_OK as i32 {
                return Err(ret);
            }
            Ok(())
        });
        match result {
            Ok(()) => {
                info!("NvsRecordStore: wrote {} bytes at {}", data.len(), offset);
                Ok(())
            }
            Err(e) => {
                warn!("NvsRecordStore: NVS write error {}", e);
                Err(StorageError::IoError)
            }
        }
    }
}

#[cfg(not(target_os = "espidf"))]
impl RecordStore for NvsRecordStore {
    fn read_bytes(&self, offset: usize, buf: &mut [u8]) -> Result<(), StorageError> {
        if self.fail_io {
            return Err(StorageError::IoError);
        }
        let range = checked_range(offset, buf.len())?;
        buf.copy_from_slice(&self.image[range]);
        Ok(())
    }

    fn write_bytes(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError> {
        if self.fail_io {
            return Err(StorageError::IoError);
        }
        let range = checked_range(offset, data.len())?;
        self.image[range].copy_from_slice(data);
        info!("NvsRecordStore: wrote {} bytes at {} (simulation)", data.len(), offset);
        Ok(())
    }
}
