//! Register netspeed to start with the user session.
//!
//! - Windows: `HKCU\Software\Microsoft\Windows\CurrentVersion\Run\NetSpeedMonitor`
//! - Linux/BSD: XDG autostart entry `<config dir>/autostart/netspeed.desktop`

use std::io;
use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutostartError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("registry error: {0}")]
    Registry(String),

    #[error("could not determine the user config directory")]
    NoConfigDir,

    #[error("autostart is not supported on this platform")]
    Unsupported,
}

/// Register `exe` to run at login. Returns where the entry was written.
pub fn install(exe: &Path) -> Result<String, AutostartError> {
    platform::install(exe)
}

/// Remove the login entry. Returns false when there was none.
pub fn remove() -> Result<bool, AutostartError> {
    platform::remove()
}

#[cfg(windows)]
mod platform {
    use std::os::windows::ffi::OsStrExt;
    use std::path::Path;

    use windows::core::HSTRING;
    use windows::Win32::Foundation::{ERROR_FILE_NOT_FOUND, ERROR_SUCCESS, WIN32_ERROR};
    use windows::Win32::System::Registry::{
        RegCloseKey, RegDeleteValueW, RegOpenKeyExW, RegSetValueExW, HKEY, HKEY_CURRENT_USER,
        KEY_SET_VALUE, REG_SZ,
    };

    use super::AutostartError;

    /// Name of the registry value
    const ENTRY_NAME: &str = "NetSpeedMonitor";
    const RUN_KEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Run";

    fn check(status: WIN32_ERROR, call: &str) -> Result<(), AutostartError> {
        if status == ERROR_SUCCESS {
            Ok(())
        } else {
            Err(AutostartError::Registry(format!("{} failed with code {}", call, status.0)))
        }
    }

    fn open_run_key() -> Result<HKEY, AutostartError> {
        let mut key = HKEY::default();
        let status = unsafe {
            RegOpenKeyExW(HKEY_CURRENT_USER, &HSTRING::from(RUN_KEY), 0, KEY_SET_VALUE, &mut key)
        };
        check(status, "RegOpenKeyExW")?;
        Ok(key)
    }

    pub fn install(exe: &Path) -> Result<String, AutostartError> {
        // REG_SZ data: NUL-terminated UTF-16LE
        let data: Vec<u8> = exe
            .as_os_str()
            .encode_wide()
            .chain(std::iter::once(0))
            .flat_map(|unit| unit.to_le_bytes())
            .collect();

        let key = open_run_key()?;
        let status = unsafe { RegSetValueExW(key, &HSTRING::from(ENTRY_NAME), 0, REG_SZ, Some(&data)) };
        unsafe {
            let _ = RegCloseKey(key);
        }
        check(status, "RegSetValueExW")?;
        Ok(format!(r"HKCU\{}\{}", RUN_KEY, ENTRY_NAME))
    }

    pub fn remove() -> Result<bool, AutostartError> {
        let key = open_run_key()?;
        let status = unsafe { RegDeleteValueW(key, &HSTRING::from(ENTRY_NAME)) };
        unsafe {
            let _ = RegCloseKey(key);
        }
        if status == ERROR_FILE_NOT_FOUND {
            return Ok(false);
        }
        check(status, "RegDeleteValueW")?;
        Ok(true)
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
mod platform {
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    use super::AutostartError;

    const DESKTOP_FILE: &str = "netspeed.desktop";

    /// XDG desktop entry launching the meter in a terminal
    pub fn desktop_entry(exe: &Path) -> String {
        format!(
            "[Desktop Entry]\n\
             Type=Application\n\
             Name=netspeed\n\
             Comment=Network speed meter\n\
             Exec=\"{}\"\n\
             Terminal=true\n\
             X-GNOME-Autostart-enabled=true\n",
            exe.display()
        )
    }

    fn autostart_dir() -> Result<PathBuf, AutostartError> {
        dirs::config_dir()
            .map(|dir| dir.join("autostart"))
            .ok_or(AutostartError::NoConfigDir)
    }

    pub fn install_in(dir: &Path, exe: &Path) -> Result<PathBuf, AutostartError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(DESKTOP_FILE);
        fs::write(&path, desktop_entry(exe))?;
        Ok(path)
    }

    pub fn remove_in(dir: &Path) -> Result<bool, AutostartError> {
        match fs::remove_file(dir.join(DESKTOP_FILE)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    pub fn install(exe: &Path) -> Result<String, AutostartError> {
        let path = install_in(&autostart_dir()?, exe)?;
        Ok(path.display().to_string())
    }

    pub fn remove() -> Result<bool, AutostartError> {
        remove_in(&autostart_dir()?)
    }

}

#[cfg(not(any(windows, all(unix, not(target_os = "macos")))))]
mod platform {
    use std::path::Path;

    use super::AutostartError;

    pub fn install(_exe: &Path) -> Result<String, AutostartError> {
        Err(AutostartError::Unsupported)
    }

    pub fn remove() -> Result<bool, AutostartError> {
        Err(AutostartError::Unsupported)
    }
}
