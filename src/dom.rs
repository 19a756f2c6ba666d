//! Defensive element lookups over parsed documents.
//!
//! Providers navigate hostile, half-documented markup: any element they
//! reach for may be missing, renamed, or restructured. Every lookup here
//! returns `Option`/`Vec` instead of failing, so extraction code can chain
//! steps and let absence propagate. Selector strings are built from plain
//! tag/class/attribute names handed in by the provider; the utility knows
//! nothing about any particular site.

use scraper::{ElementRef, Html, Selector};

/// First descendant of `scope` with the given tag name.
pub fn first_by_tag<'a>(scope: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(tag).ok()?;
    scope.select(&selector).next()
}

/// First descendant of `scope` carrying the given class token.
pub fn first_by_class<'a>(scope: ElementRef<'a>, class: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(&format!(".{class}")).ok()?;
    scope.select(&selector).next()
}

/// First descendant of `scope` on which the attribute is present at all.
pub fn first_by_attr<'a>(scope: ElementRef<'a>, attr: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(&format!("[{attr}]")).ok()?;
    scope.select(&selector).next()
}

/// First descendant of `scope` whose attribute value contains `needle`.
pub fn first_by_attr_containing<'a>(
    scope: ElementRef<'a>,
    attr: &str,
    needle: &str,
) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(&format!(r#"[{attr}*="{needle}"]"#)).ok()?;
    scope.select(&selector).next()
}

/// All descendants of `scope` with the given tag name, in document order.
pub fn elements_by_tag<'a>(scope: ElementRef<'a>, tag: &str) -> Vec<ElementRef<'a>> {
    let Ok(selector) = Selector::parse(tag) else {
        return Vec::new();
    };
    scope.select(&selector).collect()
}

/// All descendants of `scope` carrying the class token, in document order.
pub fn elements_by_class<'a>(scope: ElementRef<'a>, class: &str) -> Vec<ElementRef<'a>> {
    let Ok(selector) = Selector::parse(&format!(".{class}")) else {
        return Vec::new();
    };
    scope.select(&selector).collect()
}

/// Content of a `<meta property=...>` tag, e.g. OpenGraph metadata.
pub fn meta_content(doc: &Html, property: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"meta[property="{property}"]"#)).ok()?;
    doc.select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(str::to_string)
}

/// Concatenated text of all text nodes under `el`.
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}
