//! Full TUI turns: key presses in, rendered screen out.

mod common;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};

use common::*;
use roundtable::ui::{self, RegionCache, CURSOR_GLYPH, MULTI_AGENT_THINKING};
use roundtable::{App, ChatMode, Region};

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn ctrl(app: &mut App, c: char) {
    app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn draw(app: &mut App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| ui::render(f, app)).unwrap();
    let cells = terminal.backend().buffer().content().to_vec();
    cells
        .chunks(width as usize)
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[tokio::test]
async fn test_enter_streams_reply_onto_screen() {
    let mock = MockBackend::new()
        .with_text_chunks(&["He", "llo, ", "world!"])
        .build();
    let mut app = app_for(&mock);

    type_text(&mut app, "Hello");
    press(&mut app, KeyCode::Enter);
    assert!(app.is_streaming());
    assert!(draw(&mut app, 80, 20).contains("Thinking..."));

    run_app_turn(&mut app).await;

    assert!(!app.is_streaming());
    let screen = draw(&mut app, 80, 20);
    assert!(screen.contains("Hello, world!"));
    assert!(!screen.contains(CURSOR_GLYPH));
    assert!(!screen.contains("Thinking..."));
}

#[tokio::test]
async fn test_ctrl_t_renders_agent_panels() {
    let mock = MockBackend::new()
        .with_agent_lines(&[
            r#"{"agent":"CriticalAnalyst","content":"Too costly"}"#,
            r#"{"agent":"PositiveAdvocate","content":"Worth it"}"#,
            r#"{"type":"synthesis_start"}"#,
            r#"{"agent":"Synthesizer","content":"Try a pilot"}"#,
        ])
        .build();
    let mut app = app_for(&mock);

    type_text(&mut app, "Should we?");
    ctrl(&mut app, 't');
    assert!(draw(&mut app, 100, 30).contains(MULTI_AGENT_THINKING));

    run_app_turn(&mut app).await;

    let screen = draw(&mut app, 100, 30);
    assert!(screen.contains("Critical Analyst"));
    assert!(screen.contains("Positive Advocate"));
    assert!(screen.contains("Synthesis"));
    assert!(screen.contains("Too costly"));
    assert!(screen.contains("Worth it"));
    assert!(screen.contains("Try a pilot"));
    assert!(screen.contains("[multi-agent analysis] Should we?"));
}

#[tokio::test]
async fn test_synthesis_hidden_until_revealed() {
    let mock = MockBackend::new()
        .with_agent_lines(&[r#"{"agent":"CriticalAnalyst","content":"Only me"}"#])
        .build();
    let mut app = app_for(&mock);

    type_text(&mut app, "q");
    ctrl(&mut app, 't');
    run_app_turn(&mut app).await;

    let reply = app.session.messages().last().unwrap();
    assert!(!reply.synthesis_visible());
    let screen = draw(&mut app, 100, 30);
    assert!(screen.contains("Only me"));
    assert!(!screen.contains("🎯"));
}

#[tokio::test]
async fn test_error_reply_is_shown_and_input_reenabled() {
    let mock = MockBackend::new().with_status(500).build();
    let mut app = app_for(&mock);

    type_text(&mut app, "Hello");
    press(&mut app, KeyCode::Enter);
    run_app_turn(&mut app).await;

    let screen = draw(&mut app, 80, 20);
    assert!(screen.contains("Error: HTTP error! status: 500"));
    assert!(!app.is_streaming());

    type_text(&mut app, "again");
    assert_eq!(app.input.content(), "again");
}

#[tokio::test]
async fn test_clear_returns_to_welcome() {
    let mock = MockBackend::new()
        .with_text_chunks(&["reply"])
        .with_clear_status(200)
        .build();
    let mut app = app_for(&mock);

    type_text(&mut app, "Hello");
    press(&mut app, KeyCode::Enter);
    run_app_turn(&mut app).await;
    draw(&mut app, 80, 20);
    assert!(!app.region_cache.is_empty());

    ctrl(&mut app, 'l');
    assert!(draw(&mut app, 80, 20).contains("Clear the conversation? (y/n)"));
    press(&mut app, KeyCode::Char('y'));

    assert!(app.session.messages().is_empty());
    assert!(app.region_cache.is_empty());
    assert!(draw(&mut app, 80, 20).contains("Welcome to roundtable"));

    // The server clear is fire-and-forget on its own task
    for _ in 0..50 {
        if mock.get_requests().iter().any(|r| r.url == clear_url()) {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert!(mock.get_requests().iter().any(|r| r.url == clear_url()));
}

#[test]
fn test_streaming_cursor_is_not_cached() {
    let mut session = roundtable::Session::new("s");
    session.begin_turn("q", ChatMode::Normal).unwrap();
    session.apply_event(&roundtable::StreamEvent::TextDelta("partial".into()));

    let mut cache = RegionCache::new();
    let index = session.active_index().unwrap();
    let message = session.active_message().unwrap();

    let streaming = ui::render_message(index, message, 60, 0, &mut cache);
    let text: Vec<String> = streaming.iter().map(line_text).collect();
    assert!(text.iter().any(|l| l.ends_with(CURSOR_GLYPH)));
    assert_eq!(message.region_text(Region::Content), "partial");

    session.finish_turn();
    let message = session.messages().get(index).unwrap();
    let finished = ui::render_message(index, message, 60, 0, &mut cache);
    let text: Vec<String> = finished.iter().map(line_text).collect();
    assert!(text.iter().all(|l| !l.contains(CURSOR_GLYPH)));
}
