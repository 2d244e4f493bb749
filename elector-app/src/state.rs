use std::{marker::PhantomData, sync::Arc, time::Duration};

use elector_feed::FeedResult;
use elector_logic::{LocatorSession, StateUpdateSender, tysons_catalog};
use log::{error, warn};
use serde::{Deserialize, Serialize};
use tauri::AppHandle;
use tauri_specta::Event;
use tokio::sync::RwLock;

use crate::{
    Result,
    location::TauriLocation,
    store::{self, StoredFlags},
};

/// The locator screen's state has changed, call `get_locator_state`
#[derive(Serialize, Deserialize, Clone, Default, Debug, specta::Type, tauri_specta::Event)]
pub struct LocatorStateUpdate;

pub struct TauriStateUpdateSender<E: Clone + Default + Event + Serialize>(
    AppHandle,
    PhantomData<E>,
);

impl<E: Serialize + Clone + Default + Event> TauriStateUpdateSender<E> {
    fn new(app: &AppHandle) -> Self {
        Self(app.clone(), PhantomData)
    }
}

impl<E: Serialize + Clone + Default + Event> StateUpdateSender for TauriStateUpdateSender<E> {
    fn send_update(&self) {
        if let Err(why) = E::default().emit(&self.0) {
            error!("Error sending locator update to UI: {why:?}");
        }
    }
}

pub type Locator = LocatorSession<TauriLocation, TauriStateUpdateSender<LocatorStateUpdate>>;

/// Everything alive while the user is logged in: who they are, the running
/// polling-place locator, and the last loaded news feed.
pub struct Session {
    pub email: String,
    pub locator: Arc<Locator>,
    pub feed: RwLock<Option<FeedResult>>,
}

pub enum AppState {
    Splash,
    Onboarding,
    Login,
    Home(Arc<Session>),
}

#[derive(Serialize, Deserialize, specta::Type, Debug, Clone, Eq, PartialEq)]
pub enum AppScreen {
    Splash,
    Onboarding,
    Login,
    Home,
}

pub type AppStateHandle = RwLock<AppState>;

const LOCATION_POLL_RATE: Duration = Duration::from_secs(2);

/// The app is changing screens, contains the screen it's switching to
#[derive(Serialize, Deserialize, Clone, Debug, specta::Type, tauri_specta::Event)]
pub struct ChangeScreen(AppScreen);

/// Screen a finished splash should land on, given the persisted flags.
/// Onboarding always comes before login, and `Home` means a session starts.
fn route_from_flags(flags: &StoredFlags) -> AppScreen {
    if !flags.is_onboarded {
        AppScreen::Onboarding
    } else if !flags.is_logged_in {
        AppScreen::Login
    } else {
        AppScreen::Home
    }
}

impl AppState {
    pub fn screen(&self) -> AppScreen {
        match self {
            AppState::Splash => AppScreen::Splash,
            AppState::Onboarding => AppScreen::Onboarding,
            AppState::Login => AppScreen::Login,
            AppState::Home(_) => AppScreen::Home,
        }
    }

    pub fn get_session(&self) -> Result<Arc<Session>> {
        if let AppState::Home(session) = self {
            Ok(session.clone())
        } else {
            Err("Not on home screen".to_string())
        }
    }

    fn emit_screen_change(app: &AppHandle, screen: AppScreen) {
        if let Err(why) = ChangeScreen(screen).emit(app) {
            warn!("Error emitting screen change: {why:?}");
        }
    }

    fn locator_loop(locator: Arc<Locator>) {
        tokio::spawn(async move {
            if let Err(why) = locator.main_loop().await {
                error!("Locator error: {why:?}");
            }
        });
    }

    fn start_session(&mut self, app: &AppHandle, email: String) {
        let location = TauriLocation::new(app.clone());
        let state_updates = TauriStateUpdateSender::new(app);
        let locator = Arc::new(Locator::new(
            LOCATION_POLL_RATE,
            tysons_catalog(),
            location,
            state_updates,
        ));
        Self::locator_loop(locator.clone());

        *self = AppState::Home(Arc::new(Session {
            email,
            locator,
            feed: RwLock::new(None),
        }));
        Self::emit_screen_change(app, AppScreen::Home);
    }

    /// Splash is done, route to wherever the persisted flags say the user
    /// left off.
    pub fn finish_splash(&mut self, app: &AppHandle) -> Result {
        if let AppState::Splash = self {
            let flags = store::read_flags(app).map_err(|err| err.to_string())?;
            match route_from_flags(&flags) {
                AppScreen::Onboarding => {
                    *self = AppState::Onboarding;
                    Self::emit_screen_change(app, AppScreen::Onboarding);
                }
                AppScreen::Login => {
                    *self = AppState::Login;
                    Self::emit_screen_change(app, AppScreen::Login);
                }
                _ => self.start_session(app, flags.email),
            }
            Ok(())
        } else {
            Err("Must be on the Splash screen".to_string())
        }
    }

    pub fn complete_onboarding(&mut self, app: &AppHandle) -> Result {
        if let AppState::Onboarding = self {
            store::write_onboarded(app, true).map_err(|err| err.to_string())?;
            *self = AppState::Login;
            Self::emit_screen_change(app, AppScreen::Login);
            Ok(())
        } else {
            Err("Must be on the Onboarding screen".to_string())
        }
    }

    pub fn login(&mut self, app: &AppHandle, email: &str) -> Result {
        if let AppState::Login = self {
            let email = email.trim();
            if email.is_empty() {
                return Err("Email is required".to_string());
            }
            store::write_login(app, Some(email)).map_err(|err| err.to_string())?;
            self.start_session(app, email.to_string());
            Ok(())
        } else {
            Err("Must be on the Login screen".to_string())
        }
    }

    pub fn logout(&mut self, app: &AppHandle) -> Result {
        if let AppState::Home(session) = self {
            session.locator.quit();
            store::write_login(app, None).map_err(|err| err.to_string())?;
            *self = AppState::Login;
            Self::emit_screen_change(app, AppScreen::Login);
            Ok(())
        } else {
            Err("Not on home screen".to_string())
        }
    }
}
