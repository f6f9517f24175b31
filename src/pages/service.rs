use super::layout::{render_document, tel_href, SERVICE_PHONE};
use super::{escape_html, PageContext, PageMeta};
use crate::services::{slugify, Service};
use regex::Regex;
use std::collections::HashMap;
use std::fmt::Write;
use std::sync::OnceLock;

static PARAGRAPH_BREAK: OnceLock<Regex> = OnceLock::new();

/// Split a description on blank lines into `(anchor id, text)` pairs.
///
/// Ids are slugs of the paragraph text; a repeated paragraph gets `-1`,
/// `-2`, ... appended.
fn paragraphs(description: &str) -> Vec<(String, String)> {
    let re = PARAGRAPH_BREAK.get_or_init(|| Regex::new(r"\n\s*\n").unwrap());
    let mut seen: HashMap<String, usize> = HashMap::new();

    re.split(description)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|text| {
            let key = text.to_lowercase();
            let occurrence = seen.entry(key.clone()).or_insert(0);
            let base = slugify(&key);
            let base = if base.is_empty() {
                "paragraph".to_string()
            } else {
                base
            };
            let id = if *occurrence > 0 {
                format!("{}-{}", base, occurrence)
            } else {
                base
            };
            *occurrence += 1;
            (id, text.to_string())
        })
        .collect()
}

pub fn render_service(ctx: &PageContext, service: &Service) -> String {
    let meta = PageMeta {
        title: ctx
            .t
            .format("meta.service.title", &[("service", &service.title)]),
        description: if service.subtitle.is_empty() {
            service.description.clone()
        } else {
            service.subtitle.clone()
        },
    };

    let mut main = format!(
        "<section class=\"service-detail\">\n<a class=\"back\" href=\"{}\">{}</a>\n\
         <span class=\"badge\">{}</span>\n<h1>{}</h1>\n",
        escape_html(&ctx.href("/#services")),
        ctx.text("servicePage.back"),
        ctx.text("servicePage.badge"),
        escape_html(&service.title),
    );
    if !service.subtitle.is_empty() {
        let _ = writeln!(main, "<p class=\"subtitle\">{}</p>", escape_html(&service.subtitle));
    }

    let _ = write!(
        main,
        "<article class=\"card\">\n<h2>{}</h2>\n<p class=\"price\">{}</p>\n",
        ctx.text("servicePage.priceTitle"),
        escape_html(&service.price),
    );
    let entries = paragraphs(&service.description);
    if entries.is_empty() {
        let _ = writeln!(main, "<p>{}</p>", escape_html(&service.description));
    }
    for (id, text) in entries {
        let _ = writeln!(main, "<p id=\"{}\">{}</p>", escape_html(&id), escape_html(&text));
    }
    let _ = write!(
        main,
        "</article>\n<a class=\"button\" href=\"{}\">{}</a>\n\
         <a class=\"button secondary\" href=\"{}\">{}</a>\n</section>\n",
        tel_href(SERVICE_PHONE),
        ctx.text("servicePage.book"),
        escape_html(&ctx.href("/#contact")),
        ctx.text("servicePage.contact"),
    );

    render_document(ctx, &meta, &main)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;
    use crate::pages::test_support::{assert_no_missing_keys, context};

    fn service(description: &str) -> Service {
        Service {
            title: "Výměna oleje".to_string(),
            subtitle: "Rychle & levně".to_string(),
            description: description.to_string(),
            price: "od 990 Kč".to_string(),
            slug: "vymena-oleje".to_string(),
        }
    }

    #[test]
    fn test_paragraphs_split_on_blank_lines() {
        let entries = paragraphs("První odstavec.\n\nDruhý odstavec.\n  \n\nTřetí.");
        let ids: Vec<_> = entries.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["prvni-odstavec", "druhy-odstavec", "treti"]);
    }

    #[test]
    fn test_repeated_paragraphs_get_suffixes() {
        let entries = paragraphs("Same.\n\nsame.\n\nSAME.");
        let ids: Vec<_> = entries.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["same", "same-1", "same-2"]);
    }

    #[test]
    fn test_unsluggable_paragraph_id() {
        let entries = paragraphs("Замена масла");
        assert_eq!(entries[0].0, "paragraph");
    }

    #[test]
    fn test_service_page_title_and_escaping() {
        let ctx = context(Locale::CS, "/services/vymena-oleje", "");
        let html = render_service(&ctx, &service("Olej.\n\nFiltr."));
        assert!(html.contains("<title>Výměna oleje | EURO MOTORS</title>"));
        assert!(html.contains("Rychle &amp; levně"));
        assert!(html.contains("<p id=\"filtr\">Filtr.</p>"));
        assert_no_missing_keys(&html);
    }

    #[test]
    fn test_service_page_back_link_is_localized() {
        let ctx = context(Locale::DE, "/services/vymena-oleje", "lang=de");
        let html = render_service(&ctx, &service("Öl."));
        assert!(html.contains("href=\"/?lang=de#services\""));
    }
}
