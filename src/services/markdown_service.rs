use std::collections::HashSet;
use pulldown_cmark::{html, CowStr, Event, HeadingLevel, LinkType, Options, Parser, Tag, TagEnd};
use crate::utils::escape_attr;

/// Markdown to HTML adapter around pulldown-cmark.
///
/// Headings get slug ids unless they carry an explicit `{#id}`, and links
/// open in a new tab.
pub struct MarkdownService {
    options: Options,
}

impl MarkdownService {
    /// Create a new markdown service
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        Self { options }
    }

    /// Render markdown to an HTML fragment
    pub fn render(&self, content: &str) -> String {
        let mut events: Vec<Event> = Parser::new_ext(content, self.options).collect();
        assign_heading_ids(&mut events);

        let events = events.into_iter().map(|ev| match ev {
            Event::Start(Tag::Link { link_type, dest_url, title, .. }) => {
                Event::Html(CowStr::from(open_link(link_type, &dest_url, &title)))
            }
            other => other,
        });

        let mut out = String::with_capacity(content.len() * 3 / 2);
        html::push_html(&mut out, events);
        out
    }
}

impl Default for MarkdownService {
    fn default() -> Self {
        Self::new()
    }
}

fn open_link(link_type: LinkType, dest: &str, title: &str) -> String {
    let scheme = if link_type == LinkType::Email { "mailto:" } else { "" };
    let mut tag = format!("<a href=\"{}{}\"", scheme, escape_attr(dest));
    if !title.is_empty() {
        tag.push_str(&format!(" title=\"{}\"", escape_attr(title)));
    }
    tag.push_str(" target=\"_blank\">");
    tag
}

/// Fill in missing heading ids from the heading text.
///
/// Explicit ids are reserved up front; generated ids never repeat one
/// already in use and take the first free `-N` suffix.
fn assign_heading_ids(events: &mut [Event]) {
    let mut used: HashSet<String> = events
        .iter()
        .filter_map(|ev| match ev {
            Event::Start(Tag::Heading { id: Some(id), .. }) => Some(id.to_string()),
            _ => None,
        })
        .collect();
    let mut open: Option<(usize, String)> = None;

    for i in 0..events.len() {
        if matches!(events[i], Event::End(TagEnd::Heading(_))) {
            let Some((start, text)) = open.take() else { continue };
            if let Event::Start(Tag::Heading { level, id: id @ None, .. }) = &mut events[start] {
                let mut base = slugify(&text);
                if base.is_empty() {
                    base = format!("h{}", heading_level_to_u32(*level));
                }
                let mut candidate = base.clone();
                let mut n = 1;
                while used.contains(&candidate) {
                    candidate = format!("{}-{}", base, n);
                    n += 1;
                }
                used.insert(candidate.clone());
                *id = Some(CowStr::from(candidate));
            }
            continue;
        }

        match &events[i] {
            Event::Start(Tag::Heading { .. }) => open = Some((i, String::new())),
            Event::Text(t) | Event::Code(t) => {
                if let Some((_, buf)) = open.as_mut() {
                    buf.push_str(t);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some((_, buf)) = open.as_mut() {
                    buf.push(' ');
                }
            }
            _ => {}
        }
    }
}

/// Convert heading level to u32
fn heading_level_to_u32(level: HeadingLevel) -> u32 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Anchor slug: lower-cased letters and digits, any other run becomes one `-`
fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}
