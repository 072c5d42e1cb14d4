// crates/feed-parser/examples/inspect_feed.rs
//! Prints what the parser sees in a feed file, or in a built-in sample
//!
//! cargo run -p castcheck-feed-parser --example inspect_feed -- path/to/feed.rss

use castcheck_feed_parser::{Document, FeedParser};

const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
  <channel>
    <title>Classic Audiobooks</title>
    <description>Public domain audiobooks read by volunteers</description>
    <link>https://example.com/audiobooks</link>
    <language>en</language>
    <itunes:image href="https://example.com/art.jpg"/>
    <itunes:category text="Arts">
      <itunes:category text="Books"/>
    </itunes:category>
    <itunes:explicit>false</itunes:explicit>

    <item>
      <title>Pride and Prejudice - Chapter 1</title>
      <guid>pride-ch1</guid>
      <pubDate>Mon, 01 Jan 2024 12:00:00 GMT</pubDate>
      <enclosure url="https://example.com/audio/pride-ch1.mp3"
                 type="audio/mpeg"
                 length="15000000"/>
      <itunes:duration>24:10</itunes:duration>
    </item>

    <item>
      <title>Moby Dick - Chapter 1: Loomings</title>
      <description>Call me Ishmael...</description>
    </item>
  </channel>
</rss>"#;

fn main() {
    let result = match std::env::args().nth(1) {
        Some(path) => {
            println!("=== {} ===\n", path);
            FeedParser::load(&path)
        }
        None => {
            println!("=== Built-in sample ===\n");
            FeedParser::parse(SAMPLE)
        }
    };

    match result {
        Ok(doc) => print_document(&doc),
        Err(e) => eprintln!("Error parsing feed: {}", e),
    }
}

fn print_document(doc: &Document) {
    println!(
        "Root: <{}> version {}",
        doc.root,
        doc.version.as_deref().unwrap_or("(none)")
    );
    for ns in &doc.namespaces {
        println!(
            "Namespace: {} = {}",
            ns.prefix.as_deref().unwrap_or("(default)"),
            ns.uri
        );
    }
    println!("iTunes namespace: {}", doc.declares_itunes_namespace());

    let Some(channel) = &doc.channel else {
        println!("\nNo channel found");
        return;
    };

    println!("\nTitle: {}", channel.title.as_deref().unwrap_or("-"));
    println!("Language: {}", channel.language.as_deref().unwrap_or("-"));
    println!("Artwork: {}", channel.artwork.as_deref().unwrap_or("-"));
    println!("Explicit: {:?}", channel.explicit_flag());
    for category in &channel.categories {
        println!("Category ({:?}): {}", category.scheme, category.key());
    }

    println!("\nEpisodes: {}", channel.episode_count());
    println!("{}", "-".repeat(60));

    for (i, episode) in channel.episodes.iter().enumerate() {
        println!("\n{}. {}", i + 1, episode.title.as_deref().unwrap_or("(untitled)"));

        if let Some(published) = &episode.published {
            println!("   Published: {}", published.format("%Y-%m-%d"));
        }

        if let Some(seconds) = episode.duration_seconds() {
            println!("   Duration: {}m{:02}s", seconds / 60, seconds % 60);
        }

        match &episode.enclosure {
            Some(enclosure) => {
                println!("   Media: {}", enclosure.url);
                if let Some(size) = enclosure.length {
                    println!("   Size: {:.1} MB", size as f64 / 1_000_000.0);
                }
            }
            None => println!("   Media: none"),
        }
    }
}
