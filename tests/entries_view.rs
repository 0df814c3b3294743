//! End-to-end behaviour of the entries screen and the app around it

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use screentime::app::{App, AppState, EntriesScreen, InputEvent, LoadState};
use screentime::config::AppConfig;
use screentime::data::{DataProvider, JsonFileProvider, StaticProvider};
use screentime::error::user_friendly_message;
use screentime::models::{DeviceUsage, WeekEntry};
use screentime::{Result, ScreenTimeError};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn weeks() -> Vec<WeekEntry> {
    vec![
        WeekEntry::new("2024-01-01", "2024-01-07", 15.0)
            .with_devices(vec![DeviceUsage::new("Phone", 10.0), DeviceUsage::new("Laptop", 5.0)]),
        WeekEntry::new("2024-01-08148", "2024-01-14", 5.0)
            .with_devices(vec![DeviceUsage::new("Tablet", 5.0)]),
    ]
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_event(InputEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)));
}

async fn wait_for_load(app: &mut App) {
    for _ in 0..400 {
        app.poll_loader();
        if !app.is_loading() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("load did not finish");
}

struct FailingProvider;

impl DataProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    fn fetch(&self) -> Result<Vec<WeekEntry>> {
        Err(ScreenTimeError::DataFormatError("bad rows".into()))
    }
}

#[test]
fn test_selecting_a_row_updates_header_and_devices() {
    let mut screen = EntriesScreen::new('-');
    screen.set_entries(weeks());

    let first = weeks()[0].clone();
    screen.select_row(first.clone());
    assert_eq!(screen.selected(), Some(&first));
    assert_eq!(screen.header_text(), "2024 01 01 - 2024 01 07");
    assert_eq!(screen.selected().unwrap().devices.len(), 2);
}

#[test]
fn test_empty_list_does_not_panic() {
    let mut screen = EntriesScreen::new('-');
    screen.set_entries(Vec::new());
    assert!(screen.selected().is_none());
    assert_eq!(*screen.load_state(), LoadState::Ready);
    assert!(!screen.select_highlighted());
    screen.highlight_next();
    screen.highlight_previous();
    assert_eq!(screen.highlighted_index(), None);
}

#[test]
fn test_search_confirm_only_with_query() {
    let mut app = App::new(AppConfig::default(), Arc::new(StaticProvider::default()));
    app.screen_mut().set_entries(weeks());

    app.confirm_search();
    assert!(app.notice().is_none());
    assert_eq!(*app.state(), AppState::Browse);

    app.screen_mut().set_query("abc");
    app.confirm_search();
    let notice = app.notice().expect("notice shown");
    assert_eq!(notice.query, "abc");
    assert_eq!(notice.message, "The searched query was: abc");
}

#[tokio::test]
async fn test_app_loads_from_json_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("weeks.json");
    JsonFileProvider::write(&path, weeks()).unwrap();

    let config = AppConfig::default().with_data_file(path);
    let provider = config.provider();
    let mut app = App::new(config, provider);
    app.activate();
    wait_for_load(&mut app).await;

    assert_eq!(app.screen().entries(), weeks().as_slice());
    assert_eq!(app.screen().selected(), weeks().last());

    press(&mut app, KeyCode::Char('/'));
    press(&mut app, KeyCode::Char('1'));
    press(&mut app, KeyCode::Char('5'));
    assert_eq!(app.screen().filtered(), &weeks()[..1]);

    press(&mut app, KeyCode::Backspace);
    press(&mut app, KeyCode::Backspace);
    assert_eq!(app.screen().filtered(), weeks().as_slice());
}

#[tokio::test]
async fn test_failed_load_shows_error_state() {
    let mut app = App::new(AppConfig::default(), Arc::new(FailingProvider));
    app.activate();
    wait_for_load(&mut app).await;

    let expected = user_friendly_message(&ScreenTimeError::DataFormatError("bad rows".into()));
    assert_eq!(*app.screen().load_state(), LoadState::Failed(expected));
    assert!(app.screen().selected().is_none());
    assert_eq!(app.screen().header_text(), "Screen time unavailable");
}

#[tokio::test]
async fn test_seeded_sample_source_is_stable_across_reloads() {
    let config = AppConfig::default().with_sample(6, Some(3));
    let provider = config.provider();
    let mut app = App::new(config, provider);

    app.activate();
    wait_for_load(&mut app).await;
    let first = app.screen().entries().to_vec();
    assert_eq!(first.len(), 6);
    assert_eq!(app.screen().selected(), first.last());

    press(&mut app, KeyCode::Char('r'));
    wait_for_load(&mut app).await;
    assert_eq!(app.screen().entries(), first.as_slice());
}
