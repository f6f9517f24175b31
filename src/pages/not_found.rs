use super::layout::render_document;
use super::{escape_html, PageContext, PageMeta};
use std::fmt::Write;

const SUGGESTIONS: &[(&str, &str)] = &[
    ("services", "/#services"),
    ("pricing", "/pricing"),
    ("contact", "/contact"),
];

pub fn render_not_found(ctx: &PageContext) -> String {
    let mut main = format!(
        "<section class=\"not-found\">\n<span class=\"badge\">{}</span>\n<h1>{}</h1>\n<p>{}</p>\n\
         <a class=\"button\" href=\"{}\">{}</a>\n\
         <a class=\"button secondary\" href=\"javascript:history.back()\">{}</a>\n\
         <h2>{}</h2>\n<div class=\"grid\">\n",
        ctx.text("notFoundPage.badge"),
        ctx.text("notFoundPage.title"),
        ctx.text("notFoundPage.description"),
        escape_html(&ctx.href("/")),
        ctx.text("notFoundPage.homeButton"),
        ctx.text("notFoundPage.backButton"),
        ctx.text("notFoundPage.suggestions.title"),
    );

    for (key, target) in SUGGESTIONS {
        let prefix = format!("notFoundPage.suggestions.{}", key);
        let _ = writeln!(
            main,
            "<article class=\"card\">\n<h3>{}</h3>\n<p>{}</p>\n<a href=\"{}\">{}</a>\n</article>",
            ctx.text(&format!("{}.title", prefix)),
            ctx.text(&format!("{}.description", prefix)),
            escape_html(&ctx.href(target)),
            ctx.text(&format!("{}.button", prefix)),
        );
    }
    main.push_str("</div>\n</section>\n");

    render_document(ctx, &PageMeta::from_dictionary(ctx, "notFound"), &main)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;
    use crate::pages::test_support::{assert_no_missing_keys, context};

    #[test]
    fn test_not_found_renders_in_every_locale() {
        for locale in Locale::all() {
            assert_no_missing_keys(&render_not_found(&context(locale, "/missing", "")));
        }
    }

    #[test]
    fn test_not_found_suggestions_keep_locale() {
        let html = render_not_found(&context(Locale::RU, "/missing", "lang=ru"));
        assert!(html.contains("href=\"/pricing?lang=ru\""));
        assert!(html.contains("href=\"/?lang=ru#services\""));
    }
}
