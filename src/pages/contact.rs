use super::layout::{
    render_document, tel_href, ADDRESS, BODYSHOP_PHONE, EMAIL, FACEBOOK_URL, INSTAGRAM_URL,
    MAPS_URL, SERVICE_PHONE,
};
use super::{escape_html, PageContext, PageMeta};
use std::fmt::Write;

const HOURS: &[&str] = &["weekdays", "weekend"];
const COMPANY: &[&str] = &["name", "seat", "ico", "dic"];
const BANK: &[&str] = &["bank", "account", "iban"];

pub fn render_contact(ctx: &PageContext) -> String {
    let mut main = format!(
        "<section class=\"hero\">\n<span class=\"badge\">{}</span>\n<h1>{}</h1>\n<p>{}</p>\n</section>\n",
        ctx.text("contactPage.hero.badge"),
        ctx.text("contactPage.hero.title"),
        ctx.text("contactPage.hero.intro"),
    );

    // Phones
    let _ = write!(
        main,
        "<section class=\"phones\">\n<h2>{}</h2>\n<p>{}</p>\n",
        ctx.text("contactPage.sections.phones.title"),
        ctx.text("contactPage.sections.phones.description"),
    );
    for (key, phone) in [("service", SERVICE_PHONE), ("bodyshop", BODYSHOP_PHONE)] {
        let prefix = format!("contactPage.sections.phones.items.{}", key);
        let _ = writeln!(
            main,
            "<article class=\"card\">\n<h3>{}</h3>\n<p>{}</p>\n<a href=\"{}\">{}</a>\n\
             <a class=\"button\" href=\"{}\">{}</a>\n</article>",
            ctx.text(&format!("{}.title", prefix)),
            ctx.text(&format!("{}.description", prefix)),
            tel_href(phone),
            phone,
            tel_href(phone),
            ctx.text(&format!("{}.action", prefix)),
        );
    }
    main.push_str("</section>\n");

    // Channels
    let _ = write!(
        main,
        "<section class=\"details\">\n<h2>{}</h2>\n<p>{}</p>\n<ul>\n",
        ctx.text("contactPage.sections.details.title"),
        ctx.text("contactPage.sections.details.description"),
    );
    let email_href = format!("mailto:{}", EMAIL);
    let channels = [
        ("address", MAPS_URL, ADDRESS),
        ("email", email_href.as_str(), EMAIL),
        ("facebook", FACEBOOK_URL, "facebook.com/euromotorsofficial"),
        ("instagram", INSTAGRAM_URL, "@euromotorscz"),
    ];
    for (key, href, value) in channels {
        let _ = writeln!(
            main,
            "<li><strong>{}</strong> <span>{}</span> <a href=\"{}\">{}</a></li>",
            ctx.text(&format!("contactPage.sections.details.items.{}.label", key)),
            escape_html(value),
            escape_html(href),
            ctx.text(&format!("contactPage.sections.details.items.{}.cta", key)),
        );
    }
    main.push_str("</ul>\n</section>\n");

    // Opening hours
    let _ = write!(
        main,
        "<section class=\"hours\">\n<h2>{}</h2>\n<p>{}</p>\n<dl>\n",
        ctx.text("contactPage.sections.hours.title"),
        ctx.text("contactPage.sections.hours.description"),
    );
    for key in HOURS {
        let prefix = format!("contactPage.sections.hours.items.{}", key);
        let _ = writeln!(
            main,
            "<dt>{}</dt><dd>{} <small>{}</small></dd>",
            ctx.text(&format!("{}.label", prefix)),
            ctx.text(&format!("{}.value", prefix)),
            ctx.text(&format!("{}.note", prefix)),
        );
    }
    let _ = write!(
        main,
        "</dl>\n<p class=\"availability-now\"><strong>{}</strong> {}</p>\n</section>\n",
        escape_html(&ctx.availability.label),
        escape_html(&ctx.availability.detail),
    );

    // Company and bank details
    for (section, keys) in [("company", COMPANY), ("bank", BANK)] {
        let _ = write!(
            main,
            "<section class=\"{}\">\n<h2>{}</h2>\n<p>{}</p>\n<dl>\n",
            section,
            ctx.text(&format!("contactPage.sections.{}.title", section)),
            ctx.text(&format!("contactPage.sections.{}.description", section)),
        );
        for key in keys {
            let prefix = format!("contactPage.sections.{}.items.{}", section, key);
            let _ = writeln!(
                main,
                "<dt>{}</dt><dd>{}</dd>",
                ctx.text(&format!("{}.label", prefix)),
                ctx.text(&format!("{}.value", prefix)),
            );
        }
        main.push_str("</dl>\n</section>\n");
    }

    render_document(ctx, &PageMeta::from_dictionary(ctx, "contact"), &main)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;
    use crate::pages::test_support::{assert_no_missing_keys, context};

    #[test]
    fn test_contact_renders_in_every_locale() {
        for locale in Locale::all() {
            assert_no_missing_keys(&render_contact(&context(locale, "/contact", "")));
        }
    }

    #[test]
    fn test_contact_lists_channels_and_phones() {
        let html = render_contact(&context(Locale::CS, "/contact", ""));
        assert!(html.contains("href=\"mailto:euromotorsofficial@gmail.com\""));
        assert!(html.contains("href=\"tel:+420775328223\""));
        assert!(html.contains(MAPS_URL));
    }

    #[test]
    fn test_contact_shows_live_availability() {
        let html = render_contact(&context(Locale::EN, "/contact", "lang=en"));
        assert!(html.contains("<strong>Open now</strong> closes today at 19:00"));
    }
}
