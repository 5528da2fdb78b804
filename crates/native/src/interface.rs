//! Native interface kinds and the per-manager interface cache.

use std::fmt;
use std::sync::{PoisonError, RwLock};

use crate::api::SteamCore;
use crate::types::InterfacePtr;

/// A Steamworks interface reachable through a versioned flat accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interface {
    Utils,
    User,
    Friends,
    UserStats,
    Apps,
    Ugc,
    Input,
    Screenshots,
    NetworkingSockets,
    NetworkingUtils,
}

impl Interface {
    pub fn all() -> &'static [Interface] {
        &[
            Interface::Utils,
            Interface::User,
            Interface::Friends,
            Interface::UserStats,
            Interface::Apps,
            Interface::Ugc,
            Interface::Input,
            Interface::Screenshots,
            Interface::NetworkingSockets,
            Interface::NetworkingUtils,
        ]
    }

    /// Exported accessor returning the interface pointer.
    pub fn accessor(self) -> &'static str {
        match self {
            Interface::Utils => "SteamAPI_SteamUtils_v010",
            Interface::User => "SteamAPI_SteamUser_v023",
            Interface::Friends => "SteamAPI_SteamFriends_v017",
            Interface::UserStats => "SteamAPI_SteamUserStats_v013",
            Interface::Apps => "SteamAPI_SteamApps_v008",
            Interface::Ugc => "SteamAPI_SteamUGC_v020",
            Interface::Input => "SteamAPI_SteamInput_v006",
            Interface::Screenshots => "SteamAPI_SteamScreenshots_v003",
            Interface::NetworkingSockets => "SteamAPI_SteamNetworkingSockets_SteamAPI_v012",
            Interface::NetworkingUtils => "SteamAPI_SteamNetworkingUtils_SteamAPI_v004",
        }
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Interface::Utils => "ISteamUtils",
            Interface::User => "ISteamUser",
            Interface::Friends => "ISteamFriends",
            Interface::UserStats => "ISteamUserStats",
            Interface::Apps => "ISteamApps",
            Interface::Ugc => "ISteamUGC",
            Interface::Input => "ISteamInput",
            Interface::Screenshots => "ISteamScreenshots",
            Interface::NetworkingSockets => "ISteamNetworkingSockets",
            Interface::NetworkingUtils => "ISteamNetworkingUtils",
        };
        f.write_str(name)
    }
}

/// Lazily fetched interface pointer.
///
/// The first successful fetch is cached and reused; a failed fetch is not
/// cached so a later call can try again. Pointers belong to one SDK
/// session and must be [`reset`](Self::reset) when the SDK shuts down.
#[derive(Debug)]
pub struct InterfaceSlot {
    kind: Interface,
    cached: RwLock<Option<InterfacePtr>>,
}

impl InterfaceSlot {
    pub const fn new(kind: Interface) -> Self {
        Self {
            kind,
            cached: RwLock::new(None),
        }
    }

    pub fn kind(&self) -> Interface {
        self.kind
    }

    pub fn get_or_fetch<N: SteamCore + ?Sized>(&self, native: &N) -> Option<InterfacePtr> {
        if let Some(ptr) = *self.cached.read().unwrap_or_else(PoisonError::into_inner) {
            return Some(ptr);
        }
        let mut cached = self.cached.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(ptr) = *cached {
            return Some(ptr);
        }
        let ptr = native.interface(self.kind)?;
        *cached = Some(ptr);
        Some(ptr)
    }

    pub fn is_cached(&self) -> bool {
        self.cached
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Drops the cached pointer; the next call fetches it again.
    pub fn reset(&self) {
        *self.cached.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::NativeError;
    use crate::types::AppId;

    struct CountingCore {
        fetches: AtomicUsize,
        available: bool,
    }

    impl SteamCore for CountingCore {
        fn init(&self, _app_id: Option<AppId>) -> Result<(), NativeError> {
            Ok(())
        }
        fn shutdown(&self) {}
        fn run_callbacks(&self) {}
        fn is_steam_running(&self) -> bool {
            true
        }
        fn restart_app_if_necessary(&self, _app_id: AppId) -> Result<bool, NativeError> {
            Ok(false)
        }
        fn interface(&self, kind: Interface) -> Option<InterfacePtr> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.available {
                InterfacePtr::from_addr(0x100 + kind as usize)
            } else {
                None
            }
        }
    }

    #[test]
    fn accessor_names_are_unique() {
        let names: HashSet<_> = Interface::all().iter().map(|i| i.accessor()).collect();
        assert_eq!(names.len(), Interface::all().len());
        assert!(names.iter().all(|n| n.starts_with("SteamAPI_Steam")));
    }

    #[test]
    fn slot_fetches_once() {
        let core = CountingCore {
            fetches: AtomicUsize::new(0),
            available: true,
        };
        let slot = InterfaceSlot::new(Interface::Apps);
        let first = slot.get_or_fetch(&core).unwrap();
        let second = slot.get_or_fetch(&core).unwrap();
        assert_eq!(first, second);
        assert_eq!(core.fetches.load(Ordering::SeqCst), 1);
        assert!(slot.is_cached());
    }

    #[test]
    fn slot_retries_after_failed_fetch() {
        let core = CountingCore {
            fetches: AtomicUsize::new(0),
            available: false,
        };
        let slot = InterfaceSlot::new(Interface::Ugc);
        assert!(slot.get_or_fetch(&core).is_none());
        assert!(slot.get_or_fetch(&core).is_none());
        assert_eq!(core.fetches.load(Ordering::SeqCst), 2);
        assert!(!slot.is_cached());
    }

    #[test]
    fn reset_forces_a_fresh_fetch() {
        let core = CountingCore {
            fetches: AtomicUsize::new(0),
            available: true,
        };
        let slot = InterfaceSlot::new(Interface::User);
        slot.get_or_fetch(&core).unwrap();
        slot.reset();
        assert!(!slot.is_cached());
        slot.get_or_fetch(&core).unwrap();
        assert_eq!(core.fetches.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn display_uses_native_names() {
        assert_eq!(Interface::Ugc.to_string(), "ISteamUGC");
        assert_eq!(Interface::UserStats.to_string(), "ISteamUserStats");
    }
}
