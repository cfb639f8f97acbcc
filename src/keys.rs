use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;
    let mut request = None;

    if guard.state.search.active {
        match (key_event.code, key_event.modifiers) {
            (Char('c'), KeyModifiers::CONTROL) => quit(),
            (KeyCode::Esc, _) => guard.clear_search(),
            (KeyCode::Enter, _) => guard.finish_search(),
            (KeyCode::Backspace, _) => guard.search_pop(),
            (Char(c), _) => guard.search_push(c),
            _ => {}
        }
        return;
    }

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => quit(),

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Nearby),
        (_, Char('2'), _) => {
            guard.update_tab(MenuItem::Favourites);
            if !guard.state.favourites.loaded {
                let (token, ids) = guard.request_favourites();
                request = Some(NetworkRequest::LoadFavourites { token, ids });
            }
        }
        (_, Char('3'), _) => guard.update_tab(MenuItem::Details),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Club lists
        (MenuItem::Nearby | MenuItem::Favourites, Char('j') | KeyCode::Down, _) => {
            guard.select_down()
        }
        (MenuItem::Nearby | MenuItem::Favourites, Char('k') | KeyCode::Up, _) => {
            guard.select_up()
        }
        (MenuItem::Nearby | MenuItem::Favourites, Char('/'), _) => guard.start_search(),
        (MenuItem::Nearby | MenuItem::Favourites, KeyCode::Esc, _) => guard.clear_search(),
        (MenuItem::Nearby | MenuItem::Favourites, KeyCode::Enter, _) => {
            if let Some((token, team_id)) = guard.open_details() {
                request = Some(NetworkRequest::ResolveFixtures { token, team_id });
            }
        }
        (MenuItem::Nearby, Char('r'), _) => {
            let token = guard.request_clubs();
            request = Some(NetworkRequest::LocateClubs { token });
        }
        (MenuItem::Favourites, Char('r'), _) => {
            let (token, ids) = guard.request_favourites();
            request = Some(NetworkRequest::LoadFavourites { token, ids });
        }

        // Details
        (MenuItem::Details, Char('j') | KeyCode::Down, _) => guard.scroll_details_down(),
        (MenuItem::Details, Char('k') | KeyCode::Up, _) => guard.scroll_details_up(),
        (MenuItem::Details, KeyCode::Esc, _) => guard.update_tab(MenuItem::Nearby),
        (MenuItem::Details, Char('r'), _) => {
            if let Some((token, team_id)) = guard.reload_details() {
                request = Some(NetworkRequest::ResolveFixtures { token, team_id });
            }
        }

        // Global
        (MenuItem::Nearby | MenuItem::Favourites | MenuItem::Details, Char('s'), _) => {
            if let Some((token, ids)) = guard.toggle_favourite() {
                request = Some(NetworkRequest::LoadFavourites { token, ids });
            }
        }
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }

    drop(guard);
    if let Some(request) = request {
        let _ = network_requests.send(request).await;
    }
}

fn quit() -> ! {
    crate::cleanup_terminal();
    std::process::exit(0);
}
