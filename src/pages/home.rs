use super::layout::{render_document, tel_href, ADDRESS, BODYSHOP_PHONE, SERVICE_PHONE};
use super::{escape_html, PageContext, PageMeta};
use crate::services::Service;
use std::fmt::Write;

const BRANDS: &[&str] = &[
    "Audi",
    "BMW",
    "Mercedes-Benz",
    "Škoda",
    "Volkswagen",
    "Porsche",
    "Jaguar",
    "Toyota",
    "Ford",
    "Kia",
];

const STATS: &[&str] = &["experience", "services", "rating"];
const BOOKING_STEPS: &[&str] = &["contact", "diagnostics", "handOver"];
const FAQ_ITEMS: &[&str] = &["afterHours", "estimate", "replacementCar", "ownParts"];

pub fn render_home(ctx: &PageContext, services: &[Service]) -> String {
    let mut main = String::new();

    // Hero
    let _ = write!(
        main,
        "<section class=\"hero\">\n<span class=\"badge\">{}</span>\n<h1>{}</h1>\n<p>{}</p>\n\
         <a class=\"button\" href=\"{}\">{}</a>\n<a class=\"button secondary\" href=\"{}\">{}</a>\n\
         <ul class=\"highlights\">\n\
         <li><strong>{}</strong> {}</li>\n<li><strong>{}</strong> {}</li>\n<li><strong>{}</strong> {}</li>\n\
         </ul>\n</section>\n",
        ctx.text("home.hero.badge"),
        ctx.text("home.hero.title"),
        ctx.text("home.hero.description"),
        tel_href(SERVICE_PHONE),
        ctx.text("home.hero.primaryCta"),
        escape_html(&ctx.href("/pricing")),
        ctx.text("home.hero.secondaryCta"),
        ctx.text("chrome.announcement.hours"),
        ctx.text("home.hero.highlights.hours"),
        ADDRESS,
        ctx.text("home.hero.highlights.address"),
        SERVICE_PHONE,
        ctx.text("home.hero.highlights.phone"),
    );

    // Stats
    main.push_str("<section class=\"stats\">\n");
    for key in STATS {
        let _ = writeln!(
            main,
            "<div><strong>{}</strong> <span>{}</span></div>",
            ctx.text(&format!("home.stats.{}.figure", key)),
            ctx.text(&format!("home.stats.{}.label", key)),
        );
    }
    main.push_str("</section>\n");

    main.push_str(&render_services(ctx, services));

    // Brands
    let _ = write!(
        main,
        "<section class=\"brands\">\n<h2>{}</h2>\n<ul>\n",
        ctx.text("home.brands.title")
    );
    for brand in BRANDS {
        let _ = writeln!(main, "<li>{}</li>", escape_html(brand));
    }
    main.push_str("</ul>\n</section>\n");

    // About & booking
    let _ = write!(
        main,
        "<section id=\"about\" class=\"about\">\n<h2>{}</h2>\n<p>{}</p>\n\
         <a href=\"{}\">{}</a>\n<h3>{}</h3>\n<ol>\n",
        ctx.text("home.about.title"),
        ctx.text("home.about.description"),
        escape_html(&ctx.href("/about")),
        ctx.text("home.about.cta"),
        ctx.text("home.booking.title"),
    );
    for key in BOOKING_STEPS {
        let _ = writeln!(
            main,
            "<li>{}</li>",
            ctx.text(&format!("home.booking.steps.{}", key))
        );
    }
    main.push_str("</ol>\n</section>\n");

    // FAQ
    let _ = write!(
        main,
        "<section id=\"faq\" class=\"faq\">\n<h2>{}</h2>\n",
        ctx.text("home.faq.title")
    );
    for key in FAQ_ITEMS {
        let _ = writeln!(
            main,
            "<details>\n<summary>{}</summary>\n<p>{}</p>\n</details>",
            ctx.text(&format!("home.faq.items.{}.question", key)),
            ctx.text(&format!("home.faq.items.{}.answer", key)),
        );
    }
    main.push_str("</section>\n");

    // Contact
    let _ = write!(
        main,
        "<section id=\"contact\" class=\"contact\">\n<h2>{}</h2>\n<p>{}</p>\n<address>{}</address>\n",
        ctx.text("home.contact.title"),
        ctx.text("home.contact.description"),
        ADDRESS,
    );
    for (key, phone) in [("service", SERVICE_PHONE), ("bodyshop", BODYSHOP_PHONE)] {
        let _ = writeln!(
            main,
            "<div class=\"card\">\n<h3>{}</h3>\n<a href=\"{}\">{}</a>\n<a class=\"button\" href=\"{}\">{}</a>\n</div>",
            ctx.text(&format!("home.contact.cards.{}.title", key)),
            tel_href(phone),
            phone,
            tel_href(phone),
            ctx.text(&format!("home.contact.cards.{}.action", key)),
        );
    }
    main.push_str("</section>\n");

    render_document(ctx, &PageMeta::from_dictionary(ctx, "home"), &main)
}

fn render_services(ctx: &PageContext, services: &[Service]) -> String {
    let mut html = format!(
        "<section id=\"services\" class=\"services\">\n<span class=\"badge\">{}</span>\n\
         <h2>{}</h2>\n<p>{}</p>\n",
        ctx.text("services.badge"),
        ctx.text("services.headline"),
        ctx.text("services.description"),
    );

    if services.is_empty() {
        let _ = write!(
            html,
            "<div class=\"empty\">\n<h3>{}</h3>\n<p>{} <a href=\"{}\">{}</a> {}</p>\n</div>\n</section>\n",
            ctx.text("services.empty.title"),
            ctx.text("services.empty.subtitlePrefix"),
            tel_href(SERVICE_PHONE),
            SERVICE_PHONE,
            ctx.text("services.empty.subtitleSuffix"),
        );
        return html;
    }

    html.push_str("<div class=\"grid\">\n");
    for service in services {
        let _ = write!(
            html,
            "<article class=\"card\">\n<h3>{}</h3>\n",
            escape_html(&service.title)
        );
        if !service.subtitle.is_empty() {
            let _ = writeln!(html, "<p class=\"subtitle\">{}</p>", escape_html(&service.subtitle));
        }
        let _ = write!(
            html,
            "<p class=\"price\">{}</p>\n<a href=\"{}\">{}</a>\n</article>\n",
            escape_html(&service.price),
            escape_html(&ctx.href(&format!("/services/{}", service.slug))),
            ctx.text("services.detailCta"),
        );
    }
    let _ = write!(
        html,
        "</div>\n<p class=\"helper\">{}</p>\n<a class=\"button\" href=\"{}\">{}</a>\n</section>\n",
        ctx.text("services.helper"),
        tel_href(SERVICE_PHONE),
        ctx.text("services.cta"),
    );

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{DictionaryStore, Locale};
    use crate::pages::test_support::{assert_no_missing_keys, context};
    use crate::services::services_from_dictionary;

    fn services(locale: Locale) -> Vec<Service> {
        let dictionary = DictionaryStore::embedded().dictionary(locale).unwrap();
        services_from_dictionary(&dictionary)
    }

    #[test]
    fn test_home_lists_services_with_localized_links() {
        let ctx = context(Locale::EN, "/", "lang=en");
        let services = services(Locale::EN);
        let html = render_home(&ctx, &services);

        let first = &services[0];
        assert!(html.contains(&escape_html(&first.title)));
        assert!(html.contains(&format!("href=\"/services/{}?lang=en\"", first.slug)));
    }

    #[test]
    fn test_home_has_anchor_targets() {
        let ctx = context(Locale::CS, "/", "");
        let html = render_home(&ctx, &services(Locale::CS));
        for id in ["services", "about", "faq", "contact"] {
            assert!(html.contains(&format!("id=\"{}\"", id)), "missing #{}", id);
        }
    }

    #[test]
    fn test_home_without_services_shows_empty_state() {
        let ctx = context(Locale::CS, "/", "");
        let html = render_home(&ctx, &[]);
        assert!(html.contains("class=\"empty\""));
        assert_no_missing_keys(&html);
    }

    #[test]
    fn test_home_renders_in_every_locale() {
        for locale in Locale::all() {
            let ctx = context(locale, "/", "");
            assert_no_missing_keys(&render_home(&ctx, &services(locale)));
        }
    }
}
