use crate::model::Channel;
use crate::utils::{CONSTANTS, EXTINF_PREFIX, EXTM3U};
use std::fmt::Write;

/// Channel metadata waiting for its stream url.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingChannel {
    name: String,
    logo: String,
    genre: String,
}

impl PendingChannel {
    fn complete(self, url: &str) -> Channel {
        Channel {
            name: self.name,
            logo: self.logo,
            genre: self.genre,
            url: url.to_string(),
        }
    }
}

#[derive(Debug, Default)]
enum ParseState {
    #[default]
    AwaitingMetadata,
    AwaitingUrl(PendingChannel),
}

fn process_header(line: &str) -> Option<PendingChannel> {
    let caps = CONSTANTS.re_extinf.captures(line)?;
    let name = caps.get(3).map_or("", |m| m.as_str()).trim();
    if name.is_empty() {
        return None;
    }
    Some(PendingChannel {
        name: name.to_string(),
        logo: caps.get(1).map_or_else(String::new, |m| m.as_str().to_string()),
        genre: caps.get(2).map_or("", |m| m.as_str()).trim().to_string(),
    })
}

#[inline]
fn is_stream_url(line: &str) -> bool {
    line.starts_with("http")
}

pub fn consume_m3u<F: FnMut(Channel)>(content: &str, mut visit: F) {
    let mut state = ParseState::AwaitingMetadata;
    for line in content.lines() {
        if line.starts_with(EXTINF_PREFIX) {
            // malformed headers keep whatever is pending
            if let Some(pending) = process_header(line) {
                state = ParseState::AwaitingUrl(pending);
            }
            continue;
        }
        let candidate = line.trim();
        if is_stream_url(candidate) {
            if let ParseState::AwaitingUrl(pending) = std::mem::take(&mut state) {
                visit(pending.complete(candidate));
            }
        }
    }
}

pub fn parse_m3u(content: &str) -> Vec<Channel> {
    let mut channels = Vec::new();
    consume_m3u(content, |channel| channels.push(channel));
    channels
}

/// Writes channels in the format [`parse_m3u`] reads.
pub fn write_m3u(channels: &[Channel]) -> String {
    let mut result = String::with_capacity(64 + channels.len() * 128);
    result.push_str(EXTM3U);
    result.push('\n');
    for channel in channels {
        let _ = writeln!(result, "{EXTINF_PREFIX}-1 tvg-logo=\"{}\" group-title=\"{}\",{}", channel.logo, channel.genre, channel.name);
        result.push_str(&channel.url);
        result.push('\n');
    }
    result
}

#[cfg(test)]
mod test {
    use super::{parse_m3u, process_header, write_m3u};
    use crate::model::Channel;

    const PLAYLIST: &str = r#"#EXTM3U
#EXTINF:-1 tvg-id="a" tvg-logo="http://x/a.png" group-title="News",Channel A
http://stream/a
#EXTINF:-1 tvg-logo="http://x/b.png" group-title="Sports",Channel B
http://stream/b
#EXTINF:-1 tvg-logo="" group-title="",Channel C
http://stream/c
"#;

    #[test]
    fn test_process_header() {
        let pending = process_header(r#"#EXTINF:-1 tvg-logo="http://x/a.png" group-title="News",Channel A"#).unwrap();
        assert_eq!(pending.name, "Channel A");
        assert_eq!(pending.logo, "http://x/a.png");
        assert_eq!(pending.genre, "News");
    }

    #[test]
    fn test_process_header_name_after_last_comma() {
        let pending = process_header(r#"#EXTINF:-1 tvg-name="x, y" tvg-logo="l" group-title=" Movies ",Title, Part 2 "#).unwrap();
        assert_eq!(pending.name, "Part 2");
        assert_eq!(pending.genre, "Movies");
    }

    #[test]
    fn test_process_header_malformed() {
        assert!(process_header("#EXTINF:-1,No attributes").is_none());
        assert!(process_header(r#"#EXTINF:-1 group-title="News" tvg-logo="x",Wrong order"#).is_none());
        assert!(process_header(r#"#EXTINF:-1 tvg-logo="x" group-title="News",   "#).is_none());
    }

    #[test]
    fn test_parse_example() {
        let channels = parse_m3u("#EXTINF:-1 tvg-logo=\"http://x/a.png\" group-title=\"News\",Channel A\nhttp://stream/a\n");
        assert_eq!(channels, vec![Channel {
            name: "Channel A".to_string(),
            logo: "http://x/a.png".to_string(),
            genre: "News".to_string(),
            url: "http://stream/a".to_string(),
        }]);
    }

    #[test]
    fn test_parse_keeps_order() {
        let channels = parse_m3u(PLAYLIST);
        let names: Vec<&str> = channels.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Channel A", "Channel B", "Channel C"]);
        assert_eq!(channels[2].genre, "");
        assert_eq!(channels[2].logo, "");
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_m3u("").is_empty());
        assert!(parse_m3u("#EXTM3U\n").is_empty());
    }

    #[test]
    fn test_header_without_url_is_dropped() {
        let content = "#EXTINF:-1 tvg-logo=\"\" group-title=\"G\",Lost\n#EXTINF:-1 tvg-logo=\"\" group-title=\"G\",Kept\nhttp://stream/kept\n";
        let channels = parse_m3u(content);
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].name, "Kept");
        assert_eq!(channels[0].url, "http://stream/kept");

        assert!(parse_m3u("#EXTINF:-1 tvg-logo=\"\" group-title=\"G\",Trailing\n").is_empty());
    }

    #[test]
    fn test_orphan_url_is_dropped() {
        let content = "http://stream/orphan\n#EXTINF:-1 tvg-logo=\"\" group-title=\"G\",A\nhttp://stream/a\nhttp://stream/second\n";
        let channels = parse_m3u(content);
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].url, "http://stream/a");
    }

    #[test]
    fn test_malformed_header_keeps_pending() {
        let content = "#EXTINF:-1 tvg-logo=\"l\" group-title=\"G\",Good\n#EXTINF:-1,broken\nhttp://stream/good\n";
        let channels = parse_m3u(content);
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].name, "Good");
    }

    #[test]
    fn test_other_lines_are_ignored() {
        let content = "#EXTM3U\n#EXTINF:-1 tvg-logo=\"l\" group-title=\"G\",A\n#EXTVLCOPT:http-user-agent=VLC\n\n  rtmp://not-http\nhttp://stream/a\n";
        let channels = parse_m3u(content);
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].url, "http://stream/a");
    }

    #[test]
    fn test_crlf_and_padded_url() {
        let content = "#EXTM3U\r\n#EXTINF:-1 tvg-logo=\"l\" group-title=\"G\",A\r\n   https://stream/a  \r\n";
        let channels = parse_m3u(content);
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].name, "A");
        assert_eq!(channels[0].url, "https://stream/a");
    }

    #[test]
    fn test_parse_is_deterministic() {
        assert_eq!(parse_m3u(PLAYLIST), parse_m3u(PLAYLIST));
    }

    #[test]
    fn test_write_then_parse() {
        let channels = parse_m3u(PLAYLIST);
        let written = write_m3u(&channels);
        assert!(written.starts_with("#EXTM3U\n"));
        assert_eq!(parse_m3u(&written), channels);
    }
}
