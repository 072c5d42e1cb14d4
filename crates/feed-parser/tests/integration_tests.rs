//! End-to-end parsing of realistic feeds

use castcheck_feed_parser::{CategoryScheme, FeedError, FeedParser, ITUNES_NAMESPACE};
use std::fs;
use tempfile::TempDir;

const PODCAST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
  <channel>
    <title>Night Shift Radio</title>
    <description>Late night conversations with people who work while the city sleeps</description>
    <link>https://nightshift.example.org</link>
    <language>en-us</language>
    <category>Society</category>
    <itunes:category text="Society &amp; Culture">
      <itunes:category text="Documentary"/>
    </itunes:category>

    <item>
      <title>Episode 1: The Bakery</title>
      <description>Bread rises at 3 a.m.</description>
      <link>https://nightshift.example.org/001</link>
      <guid>https://nightshift.example.org/001</guid>
      <pubDate>Mon, 01 Jan 2024 12:00:00 GMT</pubDate>
      <enclosure url="https://cdn.example.org/ns/001.mp3" type="audio/mpeg" length="48213004"/>
      <itunes:duration>1:02:03</itunes:duration>
    </item>

    <item>
      <title>Episode 2: The Tow Truck</title>
      <pubDate>2024-01-02T12:00:00Z</pubDate>
      <enclosure url="https://cdn.example.org/ns/002.mp4" type="video/mp4"/>
    </item>
  </channel>
</rss>"#;

#[test]
fn test_parse_full_podcast_feed() {
    let doc = FeedParser::parse(PODCAST).expect("Should parse podcast feed");
    assert_eq!(doc.root, "rss");
    assert!(doc.declares_namespace(ITUNES_NAMESPACE));

    let channel = doc.channel.expect("Should have channel");
    assert_eq!(
        channel.title.as_deref(),
        Some("Night Shift Radio")
    );
    assert_eq!(channel.link.as_deref(), Some("https://nightshift.example.org"));
    assert_eq!(channel.language.as_deref(), Some("en-us"));
    assert_eq!(channel.episode_count(), 2);

    // Plain RSS categories are kept alongside the iTunes ones
    assert_eq!(channel.categories.len(), 3);
    assert_eq!(channel.itunes_categories().count(), 2);
    assert_eq!(channel.categories[0].scheme, CategoryScheme::Rss);

    let first = &channel.episodes[0];
    assert_eq!(first.guid.as_deref(), Some("https://nightshift.example.org/001"));
    assert_eq!(first.duration_seconds(), Some(3723));

    let enclosure = first.enclosure.as_ref().expect("Should have enclosure");
    assert_eq!(enclosure.url, "https://cdn.example.org/ns/001.mp3");
    assert_eq!(enclosure.mime_type.as_deref(), Some("audio/mpeg"));
    assert_eq!(enclosure.length, Some(48213004));

    // RFC 3339 dates are accepted as a fallback
    let second = &channel.episodes[1];
    assert!(second.published.is_some());
    assert!(second.enclosure.as_ref().is_some_and(|e| e.is_video()));
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("feed.rss");
    fs::write(&path, PODCAST).expect("Failed to write feed");

    let doc = FeedParser::load(&path).expect("Should load feed");
    assert_eq!(doc.channel.map(|c| c.episode_count()), Some(2));
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let err = FeedParser::load(dir.path().join("absent.rss")).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_read_source_rejects_non_utf8() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("latin1.rss");
    fs::write(&path, [0x3c, 0x72, 0x73, 0x73, 0xff, 0xfe, 0x3e]).expect("Failed to write");

    let err = FeedParser::read_source(&path).unwrap_err();
    assert!(matches!(err, FeedError::InvalidMarkup(_)));
}

#[test]
fn test_load_declared_windows_1252_feed() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("cp1252.rss");
    let latin = PODCAST
        .replace(r#"encoding="UTF-8""#, r#"encoding="windows-1252""#)
        .replace("Night Shift Radio", "Night Shift Radio \u{2013} Caf\u{e9} Edition");
    // U+2013 is 0x96 and U+00E9 is 0xE9 in windows-1252
    let bytes: Vec<u8> = latin
        .chars()
        .map(|c| match c {
            '\u{2013}' => 0x96,
            '\u{e9}' => 0xe9,
            c => c as u8,
        })
        .collect();
    fs::write(&path, bytes).expect("Failed to write");

    let doc = FeedParser::load(&path).expect("Should load");
    let channel = doc.channel.expect("Should have channel");
    assert_eq!(
        channel.title.as_deref(),
        Some("Night Shift Radio \u{2013} Caf\u{e9} Edition")
    );
}

#[test]
fn test_empty_channel() {
    let rss = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Coming Soon</title>
    <description>First episode next week</description>
  </channel>
</rss>"#;

    let channel = FeedParser::parse(rss)
        .expect("Should parse empty feed")
        .channel
        .expect("Should have channel");
    assert!(channel.is_empty());
    assert_eq!(channel.episode_count(), 0);
}

#[test]
fn test_malformed_xml() {
    assert!(matches!(
        FeedParser::parse("<rss><channel><title>Unclosed"),
        Err(FeedError::InvalidMarkup(_))
    ));
}

#[test]
fn test_other_roots_still_parse() {
    // Judging the root is the validator's job, not the parser's
    let doc = FeedParser::parse("<html><body>Not a feed</body></html>").expect("Should parse");
    assert_eq!(doc.root, "html");
    assert!(!doc.has_channel());
}

#[test]
fn test_entities_are_decoded() {
    let rss = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Q&amp;A &lt;Live&gt;</title>
    <item>
      <title>Listener "Mailbag" &amp; More</title>
    </item>
  </channel>
</rss>"#;

    let channel = FeedParser::parse(rss)
        .expect("Should decode entities")
        .channel
        .expect("Should have channel");
    assert_eq!(
        channel.title.as_deref(),
        Some("Q&A <Live>")
    );
    assert_eq!(
        channel.episodes[0].title.as_deref(),
        Some("Listener \"Mailbag\" & More")
    );
}

#[test]
fn test_long_running_show() {
    let mut rss = String::from(
        r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Daily Briefing</title>"#,
    );

    for i in 0..1000 {
        rss.push_str(&format!(
            r#"
    <item>
      <title>Briefing #{}</title>
      <enclosure url="https://cdn.example.org/daily/{}.mp3" type="audio/mpeg"/>
    </item>"#,
            i, i
        ));
    }

    rss.push_str(
        r#"
  </channel>
</rss>"#,
    );

    let channel = FeedParser::parse(&rss)
        .expect("Should parse long feed")
        .channel
        .expect("Should have channel");
    assert_eq!(channel.episode_count(), 1000);
    assert!(channel.episodes.iter().all(|e| e.has_media()));
}
