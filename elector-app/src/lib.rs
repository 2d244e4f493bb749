mod location;
mod state;
mod store;

use elector_feed::FeedResult;
use elector_logic::{
    DemographicStat, InfoCard, LocatorUiState, NotificationPrefs, OnboardingPage, ResourceLink,
    SearchRadius, TownHallEvent, VoterStory,
};
use log::LevelFilter;
use tauri::{AppHandle, State};
use tauri_specta::{ErrorHandlingMode, collect_commands, collect_events};
use tokio::sync::RwLock;

use std::result::Result as StdResult;

use crate::state::{AppScreen, AppState, AppStateHandle, ChangeScreen, LocatorStateUpdate};

type Result<T = (), E = String> = StdResult<T, E>;

// == GENERAL / FLOW COMMANDS ==

#[tauri::command]
#[specta::specta]
/// Get the screen the app should currently be on, returns [AppScreen]
async fn get_current_screen(state: State<'_, AppStateHandle>) -> Result<AppScreen> {
    Ok(state.read().await.screen())
}

#[tauri::command]
#[specta::specta]
/// (Screen: Splash) The splash animation finished, route to onboarding,
/// login, or home depending on the persisted flags
async fn finish_splash(app: AppHandle, state: State<'_, AppStateHandle>) -> Result {
    state.write().await.finish_splash(&app)
}

#[tauri::command]
#[specta::specta]
/// (Screen: Onboarding) The user finished the intro pages, persist the flag
/// and go to the login screen
async fn complete_onboarding(app: AppHandle, state: State<'_, AppStateHandle>) -> Result {
    state.write().await.complete_onboarding(&app)
}

#[tauri::command]
#[specta::specta]
/// (Screen: Login) Log in with an email address and go to the home screen.
/// There is no account backend, the email is only stored locally.
async fn login(email: String, app: AppHandle, state: State<'_, AppStateHandle>) -> Result {
    state.write().await.login(&app, &email)
}

#[tauri::command]
#[specta::specta]
/// (Screen: Home) Log out, clearing the persisted login flag and stopping
/// the locator
async fn logout(app: AppHandle, state: State<'_, AppStateHandle>) -> Result {
    state.write().await.logout(&app)
}

#[tauri::command]
#[specta::specta]
/// (Screen: Home) Get the logged-in user's email
async fn get_user_email(state: State<'_, AppStateHandle>) -> Result<String> {
    Ok(state.read().await.get_session()?.email.clone())
}

// == LOCATOR COMMANDS ==

#[tauri::command]
#[specta::specta]
/// (Screen: Home) Get the locator screen's current state, call after
/// receiving a [LocatorStateUpdate] event
async fn get_locator_state(state: State<'_, AppStateHandle>) -> Result<LocatorUiState> {
    let session = state.read().await.get_session()?;
    Ok(session.locator.get_ui_state().await)
}

#[tauri::command]
#[specta::specta]
/// (Screen: Home) Change the search radius preset and re-filter the results
async fn set_search_radius(radius: SearchRadius, state: State<'_, AppStateHandle>) -> Result {
    let session = state.read().await.get_session()?;
    session.locator.set_radius(radius).await;
    Ok(())
}

#[tauri::command]
#[specta::specta]
/// (Screen: Home) Re-run the polling place search from the freshest
/// location fix
async fn refresh_places(state: State<'_, AppStateHandle>) -> Result {
    let session = state.read().await.get_session()?;
    session.locator.refresh().await;
    Ok(())
}

#[tauri::command]
#[specta::specta]
/// (Screen: Home) Select a polling place by id to show its detail sheet.
/// Ignored if the place isn't in the current results.
async fn select_place(id: String, state: State<'_, AppStateHandle>) -> Result {
    let session = state.read().await.get_session()?;
    session.locator.select_place(&id).await;
    Ok(())
}

#[tauri::command]
#[specta::specta]
/// (Screen: Home) Dismiss the polling place detail sheet
async fn clear_selection(state: State<'_, AppStateHandle>) -> Result {
    let session = state.read().await.get_session()?;
    session.locator.clear_selection().await;
    Ok(())
}

// == NEWS FEED COMMANDS ==

#[tauri::command]
#[specta::specta]
/// (Screen: Home) Get the news feed, fetching it on first call. Falls back
/// to the bundled articles when the remote feed is unreachable.
async fn get_news_feed(state: State<'_, AppStateHandle>) -> Result<FeedResult> {
    let session = state.read().await.get_session()?;

    let mut feed = session.feed.write().await;
    if let Some(cached) = feed.as_ref() {
        return Ok(cached.clone());
    }

    let result = elector_feed::fetch_with_fallback().await;
    *feed = Some(result.clone());
    Ok(result)
}

#[tauri::command]
#[specta::specta]
/// (Screen: Home) Refetch the news feed, replacing the cached copy
async fn refresh_news_feed(state: State<'_, AppStateHandle>) -> Result<FeedResult> {
    let session = state.read().await.get_session()?;

    let result = elector_feed::fetch_with_fallback().await;
    *session.feed.write().await = Some(result.clone());
    Ok(result)
}

// == STATIC CONTENT COMMANDS ==

#[tauri::command]
#[specta::specta]
/// (Screen: Onboarding) Get the intro pages
fn get_onboarding_pages() -> Vec<OnboardingPage> {
    elector_logic::onboarding_pages()
}

#[tauri::command]
#[specta::specta]
/// (Screen: Home) Get the voting information cards
fn get_voting_info_cards() -> Vec<InfoCard> {
    elector_logic::voting_info_cards()
}

#[tauri::command]
#[specta::specta]
/// (Screen: Home) Get the official election resource links
fn get_voting_resources() -> Vec<ResourceLink> {
    elector_logic::voting_resources()
}

#[tauri::command]
#[specta::specta]
/// (Screen: Home) Get the "voice matters" personal stories
fn get_voice_matters_stories() -> Vec<VoterStory> {
    elector_logic::voice_matters_stories()
}

#[tauri::command]
#[specta::specta]
/// (Screen: Home) Get the turnout-by-demographic stats
fn get_voting_demographics() -> Vec<DemographicStat> {
    elector_logic::voting_demographics()
}

#[tauri::command]
#[specta::specta]
/// (Screen: Home) Get the upcoming town hall events
fn get_town_hall_events() -> Vec<TownHallEvent> {
    elector_logic::town_hall_events()
}

// == SETTINGS COMMANDS ==

#[tauri::command]
#[specta::specta]
/// (Screen: Home) Get the persisted notification toggles
fn get_notification_prefs(app: AppHandle) -> Result<NotificationPrefs> {
    store::read_notification_prefs(&app).map_err(|err| err.to_string())
}

#[tauri::command]
#[specta::specta]
/// (Screen: Home) Persist new notification toggles
fn set_notification_prefs(prefs: NotificationPrefs, app: AppHandle) -> Result {
    store::write_notification_prefs(&app, prefs).map_err(|err| err.to_string())
}

pub fn mk_specta() -> tauri_specta::Builder {
    tauri_specta::Builder::<tauri::Wry>::new()
        .error_handling(ErrorHandlingMode::Throw)
        .commands(collect_commands![
            get_current_screen,
            finish_splash,
            complete_onboarding,
            login,
            logout,
            get_user_email,
            get_locator_state,
            set_search_radius,
            refresh_places,
            select_place,
            clear_selection,
            get_news_feed,
            refresh_news_feed,
            get_onboarding_pages,
            get_voting_info_cards,
            get_voting_resources,
            get_voice_matters_stories,
            get_voting_demographics,
            get_town_hall_events,
            get_notification_prefs,
            set_notification_prefs,
        ])
        .events(collect_events![ChangeScreen, LocatorStateUpdate])
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let state = RwLock::new(AppState::Splash);

    let builder = mk_specta();

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_notification::init())
        .plugin(
            tauri_plugin_log::Builder::new()
                .level(LevelFilter::Debug)
                .build(),
        )
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_geolocation::init())
        .plugin(tauri_plugin_store::Builder::default().build())
        .invoke_handler(builder.invoke_handler())
        .manage(state)
        .setup(move |app| {
            builder.mount_events(app);
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
