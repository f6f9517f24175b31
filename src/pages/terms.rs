use super::layout::{render_document, tel_href, EMAIL, SERVICE_PHONE};
use super::{escape_html, PageContext, PageMeta};
use regex::Regex;
use std::fmt::Write;
use std::sync::OnceLock;

const SECTIONS: &[&str] = &[
    "introduction",
    "contract",
    "pricing",
    "defects",
    "privacy",
    "conclusion",
];

static PARAGRAPH_BREAK: OnceLock<Regex> = OnceLock::new();
static BULLET: OnceLock<Regex> = OnceLock::new();

fn split_paragraphs(body: &str) -> Vec<&str> {
    let re = PARAGRAPH_BREAK.get_or_init(|| Regex::new(r"\n\n+").unwrap());
    re.split(body).map(str::trim).filter(|p| !p.is_empty()).collect()
}

/// One entry per line, leading `-` or `•` bullets removed.
fn split_list(list: &str) -> Vec<String> {
    let re = BULLET.get_or_init(|| Regex::new(r"^[-•]\s*").unwrap());
    list.lines()
        .map(|line| re.replace(line.trim(), "").into_owned())
        .filter(|line| !line.is_empty())
        .collect()
}

pub fn render_terms(ctx: &PageContext) -> String {
    let mut main = format!(
        "<section class=\"hero\">\n<span class=\"badge\">{}</span>\n<h1>{}</h1>\n<p>{}</p>\n\
         <p class=\"effective\">{}</p>\n</section>\n<section class=\"terms\">\n",
        ctx.text("termsPage.hero.badge"),
        ctx.text("termsPage.hero.title"),
        ctx.text("termsPage.hero.description"),
        ctx.text("termsPage.meta.effectiveDate"),
    );

    for key in SECTIONS {
        let prefix = format!("termsPage.sections.{}", key);
        let _ = write!(
            main,
            "<article id=\"{}\">\n<h2>{}</h2>\n",
            key,
            ctx.text(&format!("{}.title", prefix))
        );

        if let Some(body) = ctx.t.lookup(&format!("{}.body", prefix)) {
            for paragraph in split_paragraphs(body) {
                let _ = writeln!(main, "<p>{}</p>", escape_html(paragraph));
            }
        }

        // Lists and their headings are optional per section.
        let items = ctx
            .t
            .lookup(&format!("{}.list", prefix))
            .map(split_list)
            .unwrap_or_default();
        if !items.is_empty() {
            if let Some(heading) = ctx.t.lookup(&format!("{}.listTitle", prefix)) {
                let _ = writeln!(main, "<h3>{}</h3>", escape_html(heading));
            }
            main.push_str("<ul>\n");
            for item in items {
                let _ = writeln!(main, "<li>{}</li>", escape_html(&item));
            }
            main.push_str("</ul>\n");
        }

        main.push_str("</article>\n");
    }
    main.push_str("</section>\n");

    let _ = write!(
        main,
        "<section class=\"cta\">\n<h2>{}</h2>\n<p>{}</p>\n<dl>\n\
         <dt>{}</dt><dd><a href=\"{}\">{}</a></dd>\n\
         <dt>{}</dt><dd><a href=\"mailto:{}\">{}</a></dd>\n\
         <dt>{}</dt><dd>{}</dd>\n</dl>\n<p class=\"note\">{}</p>\n</section>\n",
        ctx.text("termsPage.cta.title"),
        ctx.text("termsPage.cta.description"),
        ctx.text("termsPage.cta.phoneLabel"),
        tel_href(SERVICE_PHONE),
        SERVICE_PHONE,
        ctx.text("termsPage.cta.emailLabel"),
        EMAIL,
        EMAIL,
        ctx.text("termsPage.cta.addressLabel"),
        ctx.text("termsPage.cta.addressValue"),
        ctx.text("termsPage.cta.note"),
    );

    render_document(ctx, &PageMeta::from_dictionary(ctx, "terms"), &main)
}
