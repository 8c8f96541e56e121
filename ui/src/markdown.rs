//! Markdown answers rendered to styled HTML. Raw HTML embedded in the source passes through.

use dioxus::prelude::*;
use pulldown_cmark::{html, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

#[component]
pub fn MarkdownView(text: String) -> Element {
    let rendered = render_markdown(&text);
    rsx! {
        div { class: "markdown", dangerous_inner_html: "{rendered}" }
    }
}

pub fn render_markdown(text: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(text, options).map(style_event);

    let mut output = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

fn style_event(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Start(Tag::Heading {
            level,
            id,
            mut classes,
            attrs,
        }) => {
            if let Some(class) = heading_class(level) {
                classes.push(CowStr::Borrowed(class));
            }
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            })
        }
        Event::Start(Tag::Paragraph) => Event::Html("<p class=\"markdown__p\">".into()),
        Event::End(TagEnd::Paragraph) => Event::Html("</p>\n".into()),
        Event::Start(Tag::Item) => Event::Html("<li class=\"markdown__li\">".into()),
        Event::End(TagEnd::Item) => Event::Html("</li>\n".into()),
        Event::Start(Tag::Strong) => Event::InlineHtml("<strong class=\"markdown__strong\">".into()),
        Event::End(TagEnd::Strong) => Event::InlineHtml("</strong>".into()),
        other => other,
    }
}

fn heading_class(level: HeadingLevel) -> Option<&'static str> {
    match level {
        HeadingLevel::H1 => Some("markdown__h1"),
        HeadingLevel::H2 => Some("markdown__h2"),
        HeadingLevel::H3 => Some("markdown__h3"),
        _ => None,
    }
}
