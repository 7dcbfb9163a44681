//! Windows autostart registration via the HKCU Run registry key.
//!
//! Values live under
//! `HKEY_CURRENT_USER\Software\Microsoft\Windows\CurrentVersion\Run`
//! and are executed on user logon. No elevation is required since HKCU
//! is per-user.

use autolaunch_core::{AutostartError, AutostartStore};

/// Autostart entries stored in the current user's Run key.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegistryStore;

#[cfg(windows)]
impl AutostartStore for RegistryStore {
    fn register(&self, name: &str, command: &str) -> Result<(), AutostartError> {
        let key = imp::open_run_key(imp::KEY_SET_VALUE)?;
        let result = imp::set_string_value(key, name, command);
        imp::close_key(key);
        result
    }

    fn unregister(&self, name: &str) -> Result<(), AutostartError> {
        let key = imp::open_run_key(imp::KEY_SET_VALUE)?;
        let result = imp::delete_value(key, name);
        imp::close_key(key);
        result
    }

    fn query(&self, name: &str) -> Result<Option<String>, AutostartError> {
        let key = imp::open_run_key(imp::KEY_QUERY_VALUE)?;
        let result = imp::query_string_value(key, name);
        imp::close_key(key);
        result
    }
}

#[cfg(not(windows))]
impl AutostartStore for RegistryStore {
    fn register(&self, _name: &str, _command: &str) -> Result<(), AutostartError> {
        Err(AutostartError::Unsupported)
    }

    fn unregister(&self, _name: &str) -> Result<(), AutostartError> {
        Err(AutostartError::Unsupported)
    }

    fn query(&self, _name: &str) -> Result<Option<String>, AutostartError> {
        Err(AutostartError::Unsupported)
    }
}

#[cfg(windows)]
mod imp {
    use autolaunch_core::AutostartError;
    use windows::Win32::Foundation::ERROR_FILE_NOT_FOUND;
    use windows::Win32::System::Registry::{
        HKEY, HKEY_CURRENT_USER, REG_SAM_FLAGS, REG_SZ, REG_VALUE_TYPE, RegCloseKey,
        RegDeleteValueW, RegOpenKeyExW, RegQueryValueExW, RegSetValueExW,
    };
    use windows::core::PCWSTR;

    pub use windows::Win32::System::Registry::{KEY_QUERY_VALUE, KEY_SET_VALUE};

    const RUN_KEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Run";

    fn wide(s: &str) -> Vec<u16> {
        s.encode_utf16().chain(std::iter::once(0)).collect()
    }

    /// Opens the HKCU Run key with the given access rights.
    pub fn open_run_key(access: REG_SAM_FLAGS) -> Result<HKEY, AutostartError> {
        let wide_key = wide(RUN_KEY);
        let mut key = HKEY::default();
        // SAFETY: RegOpenKeyExW is a standard Win32 registry API. We pass valid
        // pointers and close the key after use.
        let status = unsafe {
            RegOpenKeyExW(
                HKEY_CURRENT_USER,
                PCWSTR(wide_key.as_ptr()),
                None,
                access,
                &mut key,
            )
        };
        if status.is_err() {
            return Err(AutostartError::Registry(format!(
                "could not open registry key: {status:?}"
            )));
        }
        Ok(key)
    }

    /// Writes a REG_SZ value under the opened key.
    pub fn set_string_value(key: HKEY, name: &str, value: &str) -> Result<(), AutostartError> {
        let wide_name = wide(name);
        let wide_value = wide(value);
        // SAFETY: reinterpreting a &[u16] as &[u8] is safe; the layout is
        // contiguous and we compute the correct byte length.
        let bytes: &[u8] =
            unsafe { std::slice::from_raw_parts(wide_value.as_ptr().cast(), wide_value.len() * 2) };
        // SAFETY: RegSetValueExW is a standard Win32 registry API. We pass the
        // correct byte length for the wide-string value.
        let status =
            unsafe { RegSetValueExW(key, PCWSTR(wide_name.as_ptr()), None, REG_SZ, Some(bytes)) };
        if status.is_err() {
            return Err(AutostartError::Registry(format!(
                "could not write registry value: {status:?}"
            )));
        }
        Ok(())
    }

    /// Deletes a value from the opened key.
    pub fn delete_value(key: HKEY, name: &str) -> Result<(), AutostartError> {
        let wide_name = wide(name);
        // SAFETY: RegDeleteValueW is a standard Win32 registry API.
        let status = unsafe { RegDeleteValueW(key, PCWSTR(wide_name.as_ptr())) };
        if status == ERROR_FILE_NOT_FOUND {
            return Err(AutostartError::NotRegistered(name.into()));
        }
        if status.is_err() {
            return Err(AutostartError::Registry(format!(
                "could not delete registry value: {status:?}"
            )));
        }
        Ok(())
    }

    /// Reads a string value, or `None` if it does not exist.
    pub fn query_string_value(key: HKEY, name: &str) -> Result<Option<String>, AutostartError> {
        let wide_name = wide(name);
        let mut kind = REG_VALUE_TYPE::default();
        let mut size = 0u32;
        // SAFETY: a null data buffer asks only for the type and byte size.
        let status = unsafe {
            RegQueryValueExW(
                key,
                PCWSTR(wide_name.as_ptr()),
                None,
                Some(&mut kind as *mut REG_VALUE_TYPE),
                None,
                Some(&mut size as *mut u32),
            )
        };
        if status == ERROR_FILE_NOT_FOUND {
            return Ok(None);
        }
        if status.is_err() {
            return Err(AutostartError::Registry(format!(
                "could not query registry value: {status:?}"
            )));
        }
        if kind != REG_SZ {
            return Err(AutostartError::Registry(format!(
                "registry value '{name}' is not a string"
            )));
        }

        let mut buffer = vec![0u16; (size as usize).div_ceil(2)];
        // SAFETY: the buffer holds at least `size` bytes, as reported above.
        let status = unsafe {
            RegQueryValueExW(
                key,
                PCWSTR(wide_name.as_ptr()),
                None,
                None,
                Some(buffer.as_mut_ptr().cast()),
                Some(&mut size as *mut u32),
            )
        };
        if status.is_err() {
            return Err(AutostartError::Registry(format!(
                "could not read registry value: {status:?}"
            )));
        }
        let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
        Ok(Some(String::from_utf16_lossy(&buffer[..len])))
    }

    /// Closes an open registry key handle.
    pub fn close_key(key: HKEY) {
        // SAFETY: RegCloseKey is safe to call on any valid HKEY.
        let _ = unsafe { RegCloseKey(key) };
    }
}
