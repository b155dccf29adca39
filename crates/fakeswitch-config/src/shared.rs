//! Handle to a configuration shared by several sessions

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::switch::SwitchConfiguration;

/// Cloneable handle to one [`SwitchConfiguration`]
///
/// Sessions lock it once per processed command, so every command sees and
/// leaves a consistent model.
#[derive(Debug, Clone)]
pub struct SharedConfiguration(Arc<Mutex<SwitchConfiguration>>);

impl SharedConfiguration {
    pub fn new(config: SwitchConfiguration) -> Self {
        Self(Arc::new(Mutex::new(config)))
    }

    /// Lock the configuration until the guard is dropped
    pub fn lock(&self) -> MutexGuard<'_, SwitchConfiguration> {
        self.0.lock()
    }

    /// Run `f` with the configuration locked
    pub fn with<R>(&self, f: impl FnOnce(&mut SwitchConfiguration) -> R) -> R {
        let mut guard = self.0.lock();
        f(&mut guard)
    }
}

impl From<SwitchConfiguration> for SharedConfiguration {
    fn from(config: SwitchConfiguration) -> Self {
        Self::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vrf;

    #[test]
    fn test_clones_share_state() {
        let shared = SharedConfiguration::new(SwitchConfiguration::new("127.0.0.1", "sw"));
        let other = shared.clone();

        other.with(|config| config.add_vrf(Vrf::new("CUST")));

        assert!(shared.lock().get_vrf("CUST").is_some());
    }
}
