//! Integration tests for the anime-bot runner ([`AnimeBot`], handle_core_message).
//!
//! One mockito server plays Telegram (getFile, file download, sendMessage), trace.moe (`/search`)
//! and Jikan (`/v4/anime/{id}/characters`). The chain runs through the real TelegramBotAdapter and
//! lookup clients; only the network is fake.

use std::sync::Once;

use anime_bot::{AnimeBot, BotConfig, LookupConfig};
use chrono::Utc;
use dbot_core::{Chat, HandlerResponse, Message, PhotoAttachment, User};
use dbot_telegram::TelegramConfig;
use mockito::Matcher;
use tracing_subscriber::{fmt, EnvFilter};

/// Teloxide request path format is `/bot<token>/<Method>` (PascalCase method names).
const TEST_BOT_TOKEN: &str = "123456:test_bot_token";

static TRACING_INIT: Once = Once::new();

fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("debug,anime_handlers=debug"));
        let _ = fmt().with_env_filter(env_filter).with_test_writer().try_init();
    });
}

fn test_config(server: &mockito::ServerGuard, log_dir: &tempfile::TempDir) -> BotConfig {
    BotConfig {
        telegram: TelegramConfig {
            bot_token: TEST_BOT_TOKEN.to_string(),
            telegram_api_url: Some(server.url()),
            log_file: log_dir.path().join("anime-bot.log").display().to_string(),
        },
        lookup: LookupConfig {
            trace_moe_api_url: server.url(),
            jikan_api_url: format!("{}/v4", server.url()),
            ..LookupConfig::default()
        },
    }
}

fn core_message(id: &str, content: &str, photo: Option<PhotoAttachment>) -> Message {
    let message_type = if photo.is_some() { "photo" } else { "text" };
    Message {
        id: id.to_string(),
        user: User {
            id: 123,
            username: Some("otaku".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 123,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        message_type: message_type.to_string(),
        photo,
        created_at: Utc::now(),
    }
}

fn screenshot() -> PhotoAttachment {
    PhotoAttachment {
        file_id: "AgACAgQAAxkBAAIBZ2".to_string(),
        width: 1280,
        height: 720,
        file_size: Some(9),
    }
}

/// Telegram answers every SendMessage with a minimal valid Message.
fn send_message_mock(server: &mut mockito::ServerGuard, text_pattern: &str) -> mockito::Mock {
    server
        .mock("POST", format!("/bot{}/SendMessage", TEST_BOT_TOKEN).as_str())
        .match_body(Matcher::Regex(text_pattern.to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
            "ok": true,
            "result": {
                "message_id": 2,
                "date": 1706529600,
                "chat": {"id": 123, "type": "private"},
                "from": {"id": 123456, "is_bot": true, "first_name": "AnimeBot", "username": "animebot"},
                "text": "ok"
            }
        }"#,
        )
}

async fn photo_download_mocks(server: &mut mockito::ServerGuard) -> (mockito::Mock, mockito::Mock) {
    let get_file = server
        .mock("POST", format!("/bot{}/GetFile", TEST_BOT_TOKEN).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"ok": true, "result": {"file_id": "AgACAgQAAxkBAAIBZ2", "file_unique_id": "AQADZ2", "file_size": 9, "file_path": "photos/file_7.jpg"}}"#,
        )
        .create_async()
        .await;
    let file = server
        .mock(
            "GET",
            Matcher::Regex(r"^/file/bot[^/]+/photos(/|%2F)file_7\.jpg$".to_string()),
        )
        .with_status(200)
        .with_body("fake-jpeg")
        .create_async()
        .await;
    (get_file, file)
}

/// **Test: /name then a screenshot → Telegram receives the character list.**
///
/// **Expected:** getFile and download are called once, trace.moe and Jikan once each, and the
/// final sendMessage carries the title and every character.
#[tokio::test]
async fn test_name_then_photo_full_flow() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    let log_dir = tempfile::tempdir().unwrap();

    let prompt = send_message_mock(&mut server, "Send me an anime image")
        .create_async()
        .await;
    let (get_file, file) = photo_download_mocks(&mut server).await;
    let search = server
        .mock("POST", Matcher::Regex(r"^/search\?anilistInfo$".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"frameCount": 1, "error": "", "result": [{
                "anilist": {"id": 30, "idMal": 30, "title": {"romaji": "Shin Seiki Evangelion", "english": "Neon Genesis Evangelion"}},
                "episode": 1, "similarity": 0.97
            }]}"#,
        )
        .expect(1)
        .create_async()
        .await;
    let characters = server
        .mock("GET", "/v4/anime/30/characters")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"data": [
                {"character": {"mal_id": 89, "name": "Ikari, Shinji"}, "role": "Main"},
                {"character": {"mal_id": 86, "name": "Ayanami, Rei"}, "role": "Main"}
            ]}"#,
        )
        .expect(1)
        .create_async()
        .await;
    let result = send_message_mock(
        &mut server,
        r"Anime detected: Shin Seiki Evangelion.*Name: Ikari, Shinji, Role: Main.*Name: Ayanami, Rei, Role: Main",
    )
    .expect(1)
    .create_async()
    .await;

    let bot = AnimeBot::new(test_config(&server, &log_dir)).unwrap();

    let name_response = bot.handle_core_message(&core_message("1", "/name", None)).await;
    assert!(matches!(name_response, HandlerResponse::Reply(_)));
    assert!(bot.components.sessions.is_awaiting(123).await);

    let photo_response = bot
        .handle_core_message(&core_message("2", "", Some(screenshot())))
        .await;

    let HandlerResponse::Reply(text) = photo_response else {
        panic!("expected a reply, got {:?}", photo_response);
    };
    assert!(text.contains("Anime detected: Shin Seiki Evangelion"));
    assert!(!bot.components.sessions.is_awaiting(123).await);

    prompt.assert_async().await;
    get_file.assert_async().await;
    file.assert_async().await;
    search.assert_async().await;
    characters.assert_async().await;
    result.assert_async().await;
}

/// **Test: trace.moe failure → "couldn't identify" is sent; Jikan is never called.**
#[tokio::test]
async fn test_search_failure_sends_not_identified() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    let log_dir = tempfile::tempdir().unwrap();

    let _prompt = send_message_mock(&mut server, "Send me an anime image")
        .create_async()
        .await;
    let (_get_file, _file) = photo_download_mocks(&mut server).await;
    let _search = server
        .mock("POST", Matcher::Regex(r"^/search".to_string()))
        .with_status(503)
        .with_body("upstream unavailable")
        .create_async()
        .await;
    let characters = server
        .mock("GET", Matcher::Regex(r"^/v4/anime/".to_string()))
        .expect(0)
        .create_async()
        .await;
    let not_identified = send_message_mock(&mut server, "couldn't identify the anime")
        .expect(1)
        .create_async()
        .await;

    let bot = AnimeBot::new(test_config(&server, &log_dir)).unwrap();
    bot.handle_core_message(&core_message("1", "/name", None)).await;
    bot.handle_core_message(&core_message("2", "", Some(screenshot())))
        .await;

    assert!(!bot.components.sessions.is_awaiting(123).await);
    characters.assert_async().await;
    not_identified.assert_async().await;
}

/// **Test: A screenshot without /name is answered without touching any lookup endpoint.**
#[tokio::test]
async fn test_photo_without_name_skips_lookups() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    let log_dir = tempfile::tempdir().unwrap();

    let get_file = server
        .mock("POST", format!("/bot{}/GetFile", TEST_BOT_TOKEN).as_str())
        .expect(0)
        .create_async()
        .await;
    let use_name_first = send_message_mock(&mut server, "Please use the /name command first")
        .expect(1)
        .create_async()
        .await;

    let bot = AnimeBot::new(test_config(&server, &log_dir)).unwrap();
    bot.handle_core_message(&core_message("1", "", Some(screenshot())))
        .await;

    get_file.assert_async().await;
    use_name_first.assert_async().await;
}

/// **Test: Invalid config is rejected before any component is built.**
#[tokio::test]
async fn test_invalid_config_rejected() {
    let server = mockito::Server::new_async().await;
    let log_dir = tempfile::tempdir().unwrap();
    let mut config = test_config(&server, &log_dir);
    config.lookup.jikan_api_url = "not a url".to_string();

    assert!(AnimeBot::new(config).is_err());
}

/// **Test: Commands run before the screenshot lookup.**
#[tokio::test]
async fn test_handler_chain_order() {
    let server = mockito::Server::new_async().await;
    let log_dir = tempfile::tempdir().unwrap();

    let bot = AnimeBot::new(test_config(&server, &log_dir)).unwrap();
    let names = bot.handler_chain.handler_names();

    assert_eq!(names.len(), 2);
    assert!(names[0].ends_with("CommandHandler"), "got {}", names[0]);
    assert!(names[1].ends_with("ImageLookupHandler"), "got {}", names[1]);
}
