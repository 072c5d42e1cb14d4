// crates/feed-parser/src/parser.rs
//! Feed parsing logic

use crate::error::{FeedError, FeedResult};
use crate::feed::{
    Category, CategoryScheme, Channel, Document, Enclosure, Episode, NamespaceDecl, Owner,
    ITUNES_NAMESPACES,
};
use chrono::{DateTime, Utc};
use quick_xml::encoding::{decode, detect_encoding};
use quick_xml::escape::{resolve_predefined_entity, unescape_with};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::{NsReader, Reader};
use std::collections::HashMap;
use std::fs;
use std::mem;
use std::path::Path;

/// Feed parser
pub struct FeedParser;

impl FeedParser {
    /// Reads and parses the feed stored at `path`
    pub fn load(path: impl AsRef<Path>) -> FeedResult<Document> {
        let content = Self::read_source(path)?;
        Self::parse(&content)
    }

    /// Reads the raw feed text stored at `path`
    ///
    /// Fails with [`FeedError::NotFound`] when the file is missing and with
    /// [`FeedError::InvalidMarkup`] when its bytes cannot be decoded.
    pub fn read_source(path: impl AsRef<Path>) -> FeedResult<String> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| FeedError::from_io(path.to_path_buf(), e))?;
        Self::decode(&bytes)
    }

    /// Decodes raw feed bytes into text
    ///
    /// A byte order mark decides the encoding. Without one, the `encoding`
    /// of the XML declaration is used, and UTF-8 when there is none.
    pub fn decode(bytes: &[u8]) -> FeedResult<String> {
        let (encoding, bom_len) = match detect_encoding(bytes) {
            Some((encoding, bom_len)) if bom_len > 0 => (encoding, bom_len),
            _ => {
                // The reader settles on an encoding once it has seen the declaration
                let mut reader = Reader::from_reader(bytes);
                if let Err(e) = reader.read_event() {
                    log::debug!("No readable XML declaration: {}", e);
                }
                (reader.decoder().encoding(), 0)
            }
        };

        let text = decode(&bytes[bom_len..], encoding).map_err(|_| {
            FeedError::InvalidMarkup(format!("feed is not valid {}", encoding.name()))
        })?;
        log::debug!("Decoded {} bytes as {}", bytes.len(), encoding.name());
        Ok(text.into_owned())
    }

    /// Parses feed text into a [`Document`]
    ///
    /// Only well-formedness is enforced here. Whether the document is RSS,
    /// declares the iTunes namespace or has a channel is left to the caller.
    pub fn parse(content: &str) -> FeedResult<Document> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut reader = NsReader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut builder = DocumentBuilder::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_resolved_event_into(&mut buf)? {
                (ns, Event::Start(e)) => builder.open(Scope::of(&ns, &e), &e, false)?,
                (ns, Event::Empty(e)) => builder.open(Scope::of(&ns, &e), &e, true)?,
                (_, Event::Text(e)) => {
                    let text = e.unescape_with(|name| builder.entity(name))?;
                    builder.text(&text)?
                }
                (_, Event::CData(e)) => builder.text(&String::from_utf8_lossy(&e.into_inner()))?,
                (_, Event::End(_)) => builder.close()?,
                (_, Event::DocType(e)) => builder.declare_entities(&String::from_utf8_lossy(&e)),
                (_, Event::Eof) => break,
                _ => {}
            }
            buf.clear();
        }

        let document = builder.finish()?;
        log::debug!(
            "Parsed document: root <{}>, {} namespace declaration(s), channel: {}",
            document.root,
            document.namespaces.len(),
            document.has_channel()
        );
        Ok(document)
    }
}

/// Which vocabulary an element belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    /// Unprefixed RSS element
    Plain,
    /// Element in the iTunes namespace
    Itunes,
    /// Any other extension (atom, content, googleplay...)
    Foreign,
}

impl Scope {
    fn of(ns: &ResolveResult<'_>, element: &BytesStart<'_>) -> Self {
        let prefix = element.name().prefix();
        match ns {
            ResolveResult::Unbound => Scope::Plain,
            ResolveResult::Bound(Namespace(uri)) => {
                // A non-canonical URI still counts when bound to the conventional prefix
                let itunes = ITUNES_NAMESPACES.iter().any(|known| known.as_bytes() == *uri)
                    || prefix.as_ref().is_some_and(|p| p.as_ref() == b"itunes");
                if itunes {
                    Scope::Itunes
                } else if prefix.is_none() {
                    Scope::Plain
                } else {
                    Scope::Foreign
                }
            }
            ResolveResult::Unknown(_) => Scope::Foreign,
        }
    }
}

/// Open element on the builder's stack
#[derive(Debug)]
enum Node {
    Root,
    Channel,
    Item,
    Owner,
    /// `<itunes:category>` carrying its `text` attribute
    ItunesCategory(String),
    Element { scope: Scope, name: String },
}

#[derive(Debug)]
struct Root {
    name: String,
    version: Option<String>,
}

/// Accumulates parser events into a [`Document`]
#[derive(Debug, Default)]
struct DocumentBuilder {
    root: Option<Root>,
    namespaces: Vec<NamespaceDecl>,
    stack: Vec<Node>,
    channel: Option<Channel>,
    episode: Option<Episode>,
    owner: Option<Owner>,
    text: String,
    /// General entities declared in the internal DTD subset
    entities: HashMap<String, String>,
}

impl DocumentBuilder {
    fn open(&mut self, scope: Scope, element: &BytesStart<'_>, empty: bool) -> FeedResult<()> {
        self.text.clear();
        self.collect_namespaces(element)?;

        let node = if self.stack.is_empty() {
            self.open_root(element)?
        } else {
            self.open_child(scope, element)?
        };

        if empty {
            self.close_node(node);
        } else {
            self.stack.push(node);
        }
        Ok(())
    }

    fn open_root(&mut self, element: &BytesStart<'_>) -> FeedResult<Node> {
        if self.root.is_some() {
            return Err(FeedError::InvalidMarkup(
                "document has more than one root element".to_string(),
            ));
        }

        self.root = Some(Root {
            name: String::from_utf8_lossy(element.local_name().as_ref()).into_owned(),
            version: self.raw_attribute(element, b"version")?,
        });
        Ok(Node::Root)
    }

    fn open_child(&mut self, scope: Scope, element: &BytesStart<'_>) -> FeedResult<Node> {
        let local = String::from_utf8_lossy(element.local_name().as_ref()).into_owned();

        let node = match (self.stack.last(), scope, local.as_str()) {
            (Some(Node::Root), Scope::Plain, "channel") if self.channel.is_none() => {
                self.channel = Some(Channel::default());
                Node::Channel
            }
            (Some(Node::Channel), Scope::Plain, "item") => {
                self.episode = Some(Episode::default());
                Node::Item
            }
            (Some(Node::Channel), Scope::Itunes, "owner") => {
                self.owner = Some(Owner::default());
                Node::Owner
            }
            (Some(Node::Channel), Scope::Itunes, "image") => {
                let href = self.attribute(element, b"href")?.and_then(non_empty);
                if let Some(channel) = self.channel.as_mut() {
                    fill(&mut channel.artwork, href);
                }
                Node::Element { scope, name: local }
            }
            (Some(Node::Channel), Scope::Itunes, "category") => {
                let name = self.attribute(element, b"text")?.unwrap_or_default();
                if let Some(channel) = self.channel.as_mut() {
                    channel
                        .categories
                        .push(Category::new(CategoryScheme::Itunes, name.clone()));
                }
                Node::ItunesCategory(name)
            }
            (Some(Node::ItunesCategory(parent)), Scope::Itunes, "category") => {
                let name = self.attribute(element, b"text")?.unwrap_or_default();
                if let Some(channel) = self.channel.as_mut() {
                    channel.categories.push(Category::nested(
                        CategoryScheme::Itunes,
                        parent.clone(),
                        name.clone(),
                    ));
                }
                Node::ItunesCategory(name)
            }
            (Some(Node::Item), Scope::Itunes, "image") => {
                let href = self.attribute(element, b"href")?.and_then(non_empty);
                if let Some(episode) = self.episode.as_mut() {
                    fill(&mut episode.artwork, href);
                }
                Node::Element { scope, name: local }
            }
            (Some(Node::Item), Scope::Plain, "enclosure") => {
                let enclosure = self.read_enclosure(element)?;
                if let Some(episode) = self.episode.as_mut() {
                    if episode.enclosure.is_none() {
                        episode.enclosure = enclosure;
                    }
                }
                Node::Element { scope, name: local }
            }
            _ => Node::Element { scope, name: local },
        };

        Ok(node)
    }

    fn collect_namespaces(&mut self, element: &BytesStart<'_>) -> FeedResult<()> {
        for attr in element.attributes() {
            let attr = attr?;
            let prefix = match attr.key.as_ref().strip_prefix(b"xmlns") {
                Some(rest) if rest.is_empty() => None,
                Some(rest) if rest.starts_with(b":") => {
                    Some(String::from_utf8_lossy(&rest[1..]).into_owned())
                }
                _ => continue,
            };
            let uri = self.unescape(&attr.value)?.trim().to_string();
            self.namespaces.push(NamespaceDecl { prefix, uri });
        }
        Ok(())
    }

    /// Records the `<!ENTITY name "value">` declarations of a DOCTYPE
    fn declare_entities(&mut self, doctype: &str) {
        for (name, value) in entity_declarations(doctype) {
            // Character references in the value are expanded once, here
            let value = unescape_with(value, |name| self.entity(name))
                .map(|expanded| expanded.into_owned())
                .unwrap_or_else(|_| value.to_string());
            log::debug!("Declared entity &{};", name);
            self.entities.entry(name.to_string()).or_insert(value);
        }
    }

    fn entity(&self, name: &str) -> Option<&str> {
        resolve_predefined_entity(name).or_else(|| self.entities.get(name).map(String::as_str))
    }

    fn unescape(&self, raw: &[u8]) -> FeedResult<String> {
        let raw = std::str::from_utf8(raw).map_err(quick_xml::Error::from)?;
        let value = unescape_with(raw, |name| self.entity(name)).map_err(quick_xml::Error::from)?;
        Ok(value.into_owned())
    }

    /// Returns the unescaped value of an unprefixed attribute, as written
    fn raw_attribute(&self, element: &BytesStart<'_>, key: &[u8]) -> FeedResult<Option<String>> {
        for attr in element.attributes() {
            let attr = attr?;
            if attr.key.as_ref() == key {
                return self.unescape(&attr.value).map(Some);
            }
        }
        Ok(None)
    }

    /// Like [`raw_attribute`](Self::raw_attribute) with surrounding whitespace removed
    fn attribute(&self, element: &BytesStart<'_>, key: &[u8]) -> FeedResult<Option<String>> {
        Ok(self
            .raw_attribute(element, key)?
            .map(|value| value.trim().to_string()))
    }

    fn read_enclosure(&self, element: &BytesStart<'_>) -> FeedResult<Option<Enclosure>> {
        let Some(url) = self.attribute(element, b"url")?.and_then(non_empty) else {
            return Ok(None);
        };

        Ok(Some(Enclosure {
            url,
            mime_type: self.attribute(element, b"type")?.and_then(non_empty),
            length: self
                .attribute(element, b"length")?
                .and_then(|l| l.parse().ok()),
        }))
    }

    fn text(&mut self, text: &str) -> FeedResult<()> {
        if self.stack.is_empty() {
            if text.trim().is_empty() {
                return Ok(());
            }
            return Err(FeedError::InvalidMarkup(
                "text outside the root element".to_string(),
            ));
        }
        self.text.push_str(text);
        Ok(())
    }

    fn close(&mut self) -> FeedResult<()> {
        let node = self
            .stack
            .pop()
            .ok_or_else(|| FeedError::InvalidMarkup("unmatched closing tag".to_string()))?;
        self.close_node(node);
        Ok(())
    }

    fn close_node(&mut self, node: Node) {
        let value = non_empty(mem::take(&mut self.text));

        match node {
            Node::Root | Node::Channel | Node::ItunesCategory(_) => {}
            Node::Item => {
                if let (Some(episode), Some(channel)) = (self.episode.take(), self.channel.as_mut())
                {
                    channel.episodes.push(episode);
                }
            }
            Node::Owner => {
                if let Some(channel) = self.channel.as_mut() {
                    channel.owner = self.owner.take();
                }
            }
            Node::Element { scope, name } => self.assign(scope, &name, value),
        }
    }

    /// Stores the text of a closed leaf element on its parent
    fn assign(&mut self, scope: Scope, name: &str, value: Option<String>) {
        match (self.stack.last(), scope) {
            (Some(Node::Channel), Scope::Plain) => {
                let Some(channel) = self.channel.as_mut() else {
                    return;
                };
                match name {
                    "title" => fill(&mut channel.title, value),
                    "description" => fill(&mut channel.description, value),
                    "language" => fill(&mut channel.language, value),
                    "link" => fill(&mut channel.link, value),
                    "category" => {
                        if let Some(value) = value {
                            channel
                                .categories
                                .push(Category::new(CategoryScheme::Rss, value));
                        }
                    }
                    _ => {}
                }
            }
            (Some(Node::Channel), Scope::Itunes) => {
                let Some(channel) = self.channel.as_mut() else {
                    return;
                };
                match name {
                    "explicit" => fill(&mut channel.explicit, value),
                    "author" => fill(&mut channel.author, value),
                    _ => {}
                }
            }
            (Some(Node::Item), Scope::Plain) => {
                let Some(episode) = self.episode.as_mut() else {
                    return;
                };
                match name {
                    "title" => fill(&mut episode.title, value),
                    "description" => fill(&mut episode.description, value),
                    "link" => fill(&mut episode.link, value),
                    "guid" => fill(&mut episode.guid, value),
                    "pubDate" => {
                        if episode.published.is_none() {
                            episode.published = value.as_deref().and_then(parse_date);
                        }
                    }
                    _ => {}
                }
            }
            (Some(Node::Item), Scope::Itunes) => {
                let Some(episode) = self.episode.as_mut() else {
                    return;
                };
                match name {
                    "explicit" => fill(&mut episode.explicit, value),
                    "duration" => fill(&mut episode.duration, value),
                    _ => {}
                }
            }
            (Some(Node::Owner), Scope::Itunes) => {
                let Some(owner) = self.owner.as_mut() else {
                    return;
                };
                match name {
                    "name" => fill(&mut owner.name, value),
                    "email" => fill(&mut owner.email, value),
                    _ => {}
                }
            }
            _ => {}
        }
    }

    fn finish(self) -> FeedResult<Document> {
        if !self.stack.is_empty() {
            return Err(FeedError::InvalidMarkup(format!(
                "unexpected end of document with {} element(s) still open",
                self.stack.len()
            )));
        }

        let root = self
            .root
            .ok_or_else(|| FeedError::InvalidMarkup("document has no root element".to_string()))?;

        Ok(Document {
            root: root.name,
            version: root.version,
            namespaces: self.namespaces,
            channel: self.channel,
        })
    }
}

/// Yields `(name, value)` for each general entity declared with a literal value
///
/// Parameter entities and external entities are skipped.
fn entity_declarations(doctype: &str) -> impl Iterator<Item = (&str, &str)> {
    doctype.split("<!ENTITY").skip(1).filter_map(|decl| {
        let decl = decl.trim_start();
        if decl.starts_with('%') {
            return None;
        }
        let (name, rest) = decl.split_once(char::is_whitespace)?;
        let rest = rest.trim_start();
        let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
        let (value, _) = rest[1..].split_once(quote)?;
        Some((name, value))
    })
}

fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| log::debug!("Ignoring unparseable pubDate '{}': {}", value, e))
        .ok()
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}

/// Keeps the first non-empty value seen for a field
fn fill(slot: &mut Option<String>, value: Option<String>) {
    if slot.is_none() {
        *slot = value;
    }
}
