//! User-facing reply texts and character list formatting.

use jikan_client::CharacterRecord;

pub const MSG_WELCOME: &str = "👋 Welcome to the Anime Character Name Provider Bot!\n\
Use the /name command and send me an anime image to know the names of the characters!";

pub const MSG_HELP: &str = "To use this bot:\n\
1. Type /name.\n\
2. Send an anime image (a screenshot or photo).\n\
I'll identify the anime and provide the character names!";

pub const MSG_NAME_PROMPT: &str =
    "Send me an anime image, and I'll identify the anime and provide the character names!";

pub const MSG_UNKNOWN: &str =
    "Sorry, I didn't understand that command. Use /name followed by an anime image!";

pub const MSG_USE_NAME_FIRST: &str = "Please use the /name command first before sending an image.";

pub const MSG_NOT_IDENTIFIED: &str =
    "I couldn't identify the anime from the image. Please try another image.";

/// Telegram rejects text messages longer than this many UTF-16 code units.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// `Anime detected: {title}\nCharacters:\n` then one `Name: {name}, Role: {role}` line per character.
pub fn format_character_reply(title: &str, characters: &[CharacterRecord]) -> String {
    let mut text = format!("Anime detected: {}\nCharacters:\n", title);
    for c in characters {
        text.push_str(&format!("Name: {}, Role: {}\n", c.name, c.role));
    }
    text
}

pub fn format_no_characters(title: &str) -> String {
    format!(
        "Anime detected: {}, but no character information was found.",
        title
    )
}

/// Length of `text` as Telegram counts it (UTF-16 code units).
pub fn telegram_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Splits `text` into chunks of at most `limit` UTF-16 code units, breaking on line ends. A single
/// line longer than `limit` is cut mid-line, never inside a character.
pub fn split_for_telegram(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split_inclusive('\n') {
        let line_len = telegram_len(line);
        if current_len + line_len > limit && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if line_len > limit {
            for c in line.chars() {
                let c_len = c.len_utf16();
                if current_len + c_len > limit && !current.is_empty() {
                    chunks.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                current.push(c);
                current_len += c_len;
            }
            continue;
        }

        current.push_str(line);
        current_len += line_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
