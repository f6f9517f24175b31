//! Document shell shared by every page: head metadata, announcement bar,
//! header with navigation and language switcher, availability badge, footer
//! and the cookie banner.

use super::PageContext;
use crate::i18n::{build_locale_href, Locale};
use std::fmt::Write;

pub const SERVICE_PHONE: &str = "+420 775 230 403";
pub const BODYSHOP_PHONE: &str = "+420 775 328 223";
pub const EMAIL: &str = "euromotorsofficial@gmail.com";
pub const ADDRESS: &str = "Edisonova 8, Praha 10";
pub const MAPS_URL: &str = "https://maps.app.goo.gl/aTiG5vhJLaQgaCVJA";
pub const FACEBOOK_URL: &str = "https://www.facebook.com/euromotorsofficial";
pub const INSTAGRAM_URL: &str = "https://www.instagram.com/euromotorscz/";

const NAV_LINKS: &[(&str, &str)] = &[
    ("services", "/#services"),
    ("about", "/about"),
    ("pricing", "/pricing"),
    ("blog", "/blog"),
    ("faq", "/#faq"),
    ("contact", "/contact"),
];

/// Title and description of a page.
pub struct PageMeta {
    pub title: String,
    pub description: String,
}

impl PageMeta {
    /// Read from `meta.<page>.title` and `meta.<page>.description`.
    pub fn from_dictionary(ctx: &PageContext, page: &str) -> Self {
        Self {
            title: ctx.t.translate(&format!("meta.{}.title", page)),
            description: ctx.t.translate(&format!("meta.{}.description", page)),
        }
    }
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 8);

    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }

    result
}

/// `tel:` link target for a formatted phone number.
pub fn tel_href(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    format!("tel:{}", digits)
}

/// Wrap page content into a complete HTML document.
pub fn render_document(ctx: &PageContext, meta: &PageMeta, main: &str) -> String {
    let mut html = String::with_capacity(main.len() + 8 * 1024);

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<meta name=\"description\" content=\"{}\">\n",
        ctx.locale.html_lang(),
        escape_html(&meta.title),
        escape_html(&meta.description),
    );
    html.push_str(&render_alternates(ctx));
    let _ = write!(
        html,
        "<meta property=\"og:title\" content=\"{}\">\n\
         <meta property=\"og:description\" content=\"{}\">\n\
         <meta property=\"og:locale\" content=\"{}\">\n\
         <meta property=\"og:type\" content=\"website\">\n\
         <link rel=\"stylesheet\" href=\"/static/site.css\">\n</head>\n<body>\n",
        escape_html(&meta.title),
        escape_html(&meta.description),
        ctx.locale.config().og_locale,
    );

    html.push_str(&render_header(ctx));
    let _ = write!(html, "<main>\n{}\n</main>\n", main);
    html.push_str(&render_footer(ctx));
    if ctx.consent.show_banner {
        html.push_str(&render_cookie_banner(ctx));
    }
    html.push_str("<script src=\"/static/consent.js\" defer></script>\n</body>\n</html>\n");

    html
}

fn absolute(ctx: &PageContext, locale: Locale) -> String {
    format!(
        "{}{}",
        ctx.site_url,
        build_locale_href(&ctx.pathname, &ctx.params, locale)
    )
}

/// Canonical link plus one `hreflang` alternate per locale and `x-default`.
fn render_alternates(ctx: &PageContext) -> String {
    let mut html = format!(
        "<link rel=\"canonical\" href=\"{}\">\n",
        escape_html(&absolute(ctx, ctx.locale))
    );

    for locale in Locale::all() {
        let _ = writeln!(
            html,
            "<link rel=\"alternate\" hreflang=\"{}\" href=\"{}\">",
            locale.html_lang(),
            escape_html(&absolute(ctx, locale))
        );
    }

    let _ = writeln!(
        html,
        "<link rel=\"alternate\" hreflang=\"x-default\" href=\"{}\">",
        escape_html(&absolute(ctx, Locale::default_locale()))
    );

    html
}

fn render_header(ctx: &PageContext) -> String {
    let mut html = String::new();

    // Announcement bar
    let _ = write!(
        html,
        "<div class=\"announcement\">\n<span>{}</span>\n<span>{}</span>\n\
         <a href=\"{}\">{}</a>\n</div>\n",
        ctx.text("chrome.announcement.certified"),
        ctx.text("chrome.announcement.hours"),
        tel_href(SERVICE_PHONE),
        SERVICE_PHONE,
    );

    let _ = write!(
        html,
        "<header class=\"site-header\">\n<a class=\"brand\" href=\"{}\">\
         <img src=\"/static/logo.svg\" alt=\"EURO MOTORS logo\" width=\"44\" height=\"44\">\
         <span>EURO MOTORS</span><small>{}</small></a>\n<nav>\n",
        escape_html(&ctx.href("/")),
        ctx.text("chrome.header.tagline"),
    );
    for (key, target) in NAV_LINKS {
        let _ = writeln!(
            html,
            "<a href=\"{}\">{}</a>",
            escape_html(&ctx.href(target)),
            ctx.text(&format!("chrome.header.nav.{}", key))
        );
    }
    html.push_str("</nav>\n");

    html.push_str(&render_language_switcher(ctx));
    html.push_str(&render_availability_badge(ctx));

    let _ = write!(
        html,
        "<span class=\"badge\">{}</span>\n<a class=\"button\" href=\"{}\">{}</a>\n</header>\n",
        ctx.text("chrome.header.badge"),
        tel_href(SERVICE_PHONE),
        ctx.text("chrome.header.cta"),
    );

    html
}

/// One link per locale, pointing at the current page with its query intact.
fn render_language_switcher(ctx: &PageContext) -> String {
    let mut html = format!(
        "<nav class=\"language-switcher\" aria-label=\"{}\">\n",
        ctx.text("chrome.languageSwitcher.label")
    );

    for locale in Locale::all() {
        let href = build_locale_href(&ctx.pathname, &ctx.params, locale);
        let current = if locale == ctx.locale {
            " aria-current=\"true\""
        } else {
            ""
        };
        let _ = writeln!(
            html,
            "<a href=\"{}\" hreflang=\"{}\" lang=\"{}\"{}>{}</a>",
            escape_html(&href),
            locale.html_lang(),
            locale.html_lang(),
            current,
            escape_html(locale.native_name())
        );
    }

    html.push_str("</nav>\n");
    html
}

fn render_availability_badge(ctx: &PageContext) -> String {
    format!(
        "<div class=\"availability\" data-open=\"{}\" data-endpoint=\"/api/availability?lang={}\">\
         <strong>{}</strong> <span>{}</span></div>\n",
        ctx.availability.is_open,
        ctx.locale.code(),
        escape_html(&ctx.availability.label),
        escape_html(&ctx.availability.detail),
    )
}

fn render_footer(ctx: &PageContext) -> String {
    let year = ctx.year.to_string();
    format!(
        "<footer class=\"site-footer\">\n<div>\n<strong>EURO MOTORS</strong>\n<span>{}</span>\n\
         <a href=\"{}\">{}</a>\n</div>\n<div>\n<span>{}</span>\n\
         <span>{} <a href=\"https://www.digitale.dev\">DigiTale s.r.o.</a></span>\n\
         <button type=\"button\" data-cookie-settings>{}</button>\n</div>\n</footer>\n",
        escape_html(&ctx.t.format("chrome.footer.copyright", &[("year", &year)])),
        escape_html(&ctx.href("/vseobecne-obchodni-podminky")),
        ctx.text("chrome.footer.terms"),
        ctx.text("chrome.footer.waitingArea"),
        ctx.text("chrome.footer.madeBy"),
        ctx.text("cookieConsent.settingsButton"),
    )
}

fn render_cookie_banner(ctx: &PageContext) -> String {
    let mut html = format!(
        "<section class=\"cookie-banner\" role=\"dialog\" aria-labelledby=\"cookie-title\">\n\
         <h2 id=\"cookie-title\">{}</h2>\n<p>{}</p>\n\
         <button type=\"button\" data-consent=\"accept_all\">{}</button>\n\
         <button type=\"button\" data-consent=\"reject_all\">{}</button>\n\
         <details>\n<summary>{}</summary>\n<h3>{}</h3>\n<p>{}</p>\n",
        ctx.text("cookieConsent.banner.title"),
        ctx.text("cookieConsent.banner.description"),
        ctx.text("cookieConsent.banner.acceptAll"),
        ctx.text("cookieConsent.banner.reject"),
        ctx.text("cookieConsent.banner.settings"),
        ctx.text("cookieConsent.modal.title"),
        ctx.text("cookieConsent.modal.description"),
    );

    let _ = write!(
        html,
        "<fieldset>\n<legend>{}</legend>\n<p>{}</p>\n<span>{}</span>\n</fieldset>\n",
        ctx.text("cookieConsent.modal.sections.necessary.title"),
        ctx.text("cookieConsent.modal.sections.necessary.description"),
        ctx.text("cookieConsent.modal.sections.necessary.alwaysOn"),
    );

    for key in ["analytics", "marketing"] {
        let checked = match key {
            "analytics" => ctx.consent.preferences.analytics,
            _ => ctx.consent.preferences.marketing,
        };
        let _ = write!(
            html,
            "<fieldset>\n<legend>{}</legend>\n<p>{}</p>\n\
             <label><input type=\"checkbox\" name=\"{}\"{}> {}</label>\n</fieldset>\n",
            ctx.text(&format!("cookieConsent.modal.sections.{}.title", key)),
            ctx.text(&format!("cookieConsent.modal.sections.{}.description", key)),
            key,
            if checked { " checked" } else { "" },
            ctx.text("cookieConsent.modal.toggle.on"),
        );
    }

    let _ = write!(
        html,
        "<button type=\"button\" data-consent=\"save\">{}</button>\n</details>\n</section>\n",
        ctx.text("cookieConsent.modal.save"),
    );

    html
}
