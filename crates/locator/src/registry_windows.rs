use std::io;

use winreg::RegKey;
use winreg::enums::{HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_READ};

use crate::LocateError;
use crate::registry::{Hive, RegistryBackend, RegistryKey};

/// The host Windows registry, opened read-only.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsRegistry;

impl RegistryBackend for WindowsRegistry {
    type Key = RegKey;

    fn open_subkey(&self, hive: Hive, subkey: &str) -> Result<Option<RegKey>, LocateError> {
        let root = match hive {
            Hive::LocalMachine => RegKey::predef(HKEY_LOCAL_MACHINE),
            Hive::CurrentUser => RegKey::predef(HKEY_CURRENT_USER),
        };

        match root.open_subkey_with_flags(subkey, KEY_READ) {
            Ok(key) => Ok(Some(key)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LocateError::Registry {
                key: format!(r"{hive}\{subkey}"),
                message: e.to_string(),
            }),
        }
    }
}

impl RegistryKey for RegKey {
    fn string_value(&self, name: &str) -> Option<String> {
        self.get_value::<String, _>(name).ok()
    }
}
