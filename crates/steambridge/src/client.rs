//! SDK lifecycle and manager access.

use std::path::PathBuf;
use std::sync::Arc;

use steambridge_callbacks::PollOptions;
use steambridge_native::{AppId, NativeApi, NativeError, SteamLibrary};

use crate::apps::Apps;
use crate::friends::Friends;
use crate::input::Input;
use crate::leaderboards::Leaderboards;
use crate::networking::Networking;
use crate::overlay::Overlay;
use crate::rich_presence::RichPresence;
use crate::screenshots::Screenshots;
use crate::shared::Shared;
use crate::stats::Stats;
use crate::user::User;
use crate::utils::Utils;
use crate::workshop::Workshop;

/// How the client loads and talks to the library.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Overrides the platform default library name.
    pub library_path: Option<PathBuf>,
    /// Passed to init; `None` lets Steam read `steam_appid.txt` or the
    /// launch environment.
    pub app_id: Option<AppId>,
    /// Budget for asynchronous call results.
    pub poll: PollOptions,
}

/// Entry point to every manager.
pub struct Client<N: NativeApi = SteamLibrary> {
    shared: Arc<Shared<N>>,
    app_id: Option<AppId>,
    apps: Apps<N>,
    friends: Friends<N>,
    input: Input<N>,
    leaderboards: Leaderboards<N>,
    networking: Networking<N>,
    overlay: Overlay<N>,
    rich_presence: RichPresence<N>,
    screenshots: Screenshots<N>,
    stats: Stats<N>,
    user: User<N>,
    utils: Utils<N>,
    workshop: Workshop<N>,
}

impl Client<SteamLibrary> {
    /// Loads the Steam library. The SDK is not initialised yet.
    pub fn load(options: ClientOptions) -> Result<Self, NativeError> {
        let library = match &options.library_path {
            Some(path) => SteamLibrary::load(path)?,
            None => SteamLibrary::load_default()?,
        };
        Ok(Self::with_native(Arc::new(library), options))
    }
}

impl<N: NativeApi> Client<N> {
    /// Builds a client over an already loaded native layer.
    pub fn with_native(native: Arc<N>, options: ClientOptions) -> Self {
        let shared = Arc::new(Shared::new(native, options.poll));
        Self {
            apps: Apps::new(Arc::clone(&shared)),
            friends: Friends::new(Arc::clone(&shared)),
            input: Input::new(Arc::clone(&shared)),
            leaderboards: Leaderboards::new(Arc::clone(&shared)),
            networking: Networking::new(Arc::clone(&shared)),
            overlay: Overlay::new(Arc::clone(&shared)),
            rich_presence: RichPresence::new(Arc::clone(&shared)),
            screenshots: Screenshots::new(Arc::clone(&shared)),
            stats: Stats::new(Arc::clone(&shared)),
            user: User::new(Arc::clone(&shared)),
            utils: Utils::new(Arc::clone(&shared)),
            workshop: Workshop::new(Arc::clone(&shared)),
            app_id: options.app_id,
            shared,
        }
    }

    /// Initialises the SDK. Calling it again while initialised is a no-op.
    pub fn init(&self) -> Result<(), NativeError> {
        if self.shared.is_initialized() {
            return Ok(());
        }
        self.shared.native.init(self.app_id)?;
        self.shared.set_initialized(true);
        tracing::info!(app_id = ?self.app_id, "steam API initialized");
        Ok(())
    }

    /// Tears down the networking status slot and the SDK.
    pub fn shutdown(&self) {
        if !self.shared.is_initialized() {
            return;
        }
        self.networking.unregister_status_events();
        self.input.clear_handles();
        self.leaderboards.clear_handles();
        self.reset_interfaces();
        self.shared.native.shutdown();
        self.shared.set_initialized(false);
        tracing::info!("steam API shut down");
    }

    pub fn is_initialized(&self) -> bool {
        self.shared.is_initialized()
    }

    // Interface pointers do not survive an SDK session.
    fn reset_interfaces(&self) {
        self.shared.poller.reset();
        self.apps.reset_interfaces();
        self.friends.reset_interfaces();
        self.input.reset_interfaces();
        self.leaderboards.reset_interfaces();
        self.networking.reset_interfaces();
        self.overlay.reset_interfaces();
        self.rich_presence.reset_interfaces();
        self.screenshots.reset_interfaces();
        self.stats.reset_interfaces();
        self.user.reset_interfaces();
        self.utils.reset_interfaces();
        self.workshop.reset_interfaces();
    }

    /// Pumps the native callback queue once. Does nothing while another
    /// pump is running.
    pub fn run_callbacks(&self) {
        if self.shared.is_initialized() {
            self.shared.poller.pump();
        }
    }

    /// Asks Steam whether the process must be relaunched through the
    /// client. Works before init; `false` when the check cannot run.
    pub fn restart_app_if_necessary(&self, app_id: AppId) -> bool {
        match self.shared.native.restart_app_if_necessary(app_id) {
            Ok(restart) => restart,
            Err(e) => {
                tracing::error!(app_id, "restart check failed: {e}");
                false
            }
        }
    }

    pub fn native(&self) -> &Arc<N> {
        &self.shared.native
    }

    pub fn apps(&self) -> &Apps<N> {
        &self.apps
    }

    pub fn friends(&self) -> &Friends<N> {
        &self.friends
    }

    pub fn input(&self) -> &Input<N> {
        &self.input
    }

    pub fn leaderboards(&self) -> &Leaderboards<N> {
        &self.leaderboards
    }

    pub fn networking(&self) -> &Networking<N> {
        &self.networking
    }

    pub fn overlay(&self) -> &Overlay<N> {
        &self.overlay
    }

    pub fn rich_presence(&self) -> &RichPresence<N> {
        &self.rich_presence
    }

    pub fn screenshots(&self) -> &Screenshots<N> {
        &self.screenshots
    }

    pub fn stats(&self) -> &Stats<N> {
        &self.stats
    }

    pub fn user(&self) -> &User<N> {
        &self.user
    }

    pub fn utils(&self) -> &Utils<N> {
        &self.utils
    }

    pub fn workshop(&self) -> &Workshop<N> {
        &self.workshop
    }
}

impl<N: NativeApi> Drop for Client<N> {
    fn drop(&mut self) {
        self.networking.unregister_status_events();
    }
}
