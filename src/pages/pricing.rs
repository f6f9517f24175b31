use super::layout::{render_document, tel_href, BODYSHOP_PHONE, SERVICE_PHONE};
use super::{escape_html, PageContext, PageMeta};
use std::fmt::Write;

const LABOR_GROUPS: &[(&str, &[&str])] = &[
    ("mechanical", &["passenger", "suv", "vans"]),
    ("electrical", &["hourly"]),
    ("airConditioning", &["leakTest", "refill"]),
];

const SERVICE_ITEMS: &[&str] = &[
    "inspection",
    "computerDiagnostics",
    "geometry",
    "brakePads",
    "oilChange",
    "timing",
    "clutch",
];

const TYRE_GROUPS: &[&str] = &["fullChange", "swapOnly"];
const TYRE_VARIANTS: &[(&str, &[&str])] = &[("alu", &["15_16", "17_18"]), ("steel", &["15_16"])];

const TYRE_EXTRAS: &[&str] = &["geometry", "puncture"];
const OTHER_SERVICES: &[&str] = &["technicalInspection", "insuranceClaim"];

/// A `<dl>` of `label`/`value` pairs found under `prefix.<key>`.
fn write_price_rows(html: &mut String, ctx: &PageContext, prefix: &str, keys: &[&str]) {
    html.push_str("<dl class=\"prices\">\n");
    for key in keys {
        let _ = writeln!(
            html,
            "<dt>{}</dt><dd>{}</dd>",
            ctx.text(&format!("{}.{}.label", prefix, key)),
            ctx.text(&format!("{}.{}.value", prefix, key)),
        );
    }
    html.push_str("</dl>\n");
}

fn write_section_heading(html: &mut String, ctx: &PageContext, section: &str) {
    let _ = write!(
        html,
        "<section class=\"{}\">\n<h2>{}</h2>\n<p>{}</p>\n",
        section,
        ctx.text(&format!("pricingPage.sections.{}.title", section)),
        ctx.text(&format!("pricingPage.sections.{}.description", section)),
    );
}

pub fn render_pricing(ctx: &PageContext) -> String {
    let mut main = format!(
        "<section class=\"hero\">\n<span class=\"badge\">{}</span>\n<h1>{}</h1>\n<p>{}</p>\n\
         <aside>\n<strong>{}</strong>\n<p>{}</p>\n<p>{}</p>\n</aside>\n</section>\n",
        ctx.text("pricingPage.hero.badge"),
        ctx.text("pricingPage.hero.title"),
        ctx.text("pricingPage.hero.description"),
        ctx.text("pricingPage.hero.disclaimerHeading"),
        ctx.text("pricingPage.hero.notePrimary"),
        ctx.text("pricingPage.hero.noteSecondary"),
    );

    write_section_heading(&mut main, ctx, "labor");
    for (group, items) in LABOR_GROUPS {
        let prefix = format!("pricingPage.sections.labor.groups.{}", group);
        let _ = write!(
            main,
            "<article class=\"card\">\n<h3>{}</h3>\n<p>{}</p>\n",
            ctx.text(&format!("{}.title", prefix)),
            ctx.text(&format!("{}.note", prefix)),
        );
        write_price_rows(&mut main, ctx, &format!("{}.items", prefix), items);
        main.push_str("</article>\n");
    }
    main.push_str("</section>\n");

    write_section_heading(&mut main, ctx, "services");
    let _ = write!(
        main,
        "<article class=\"card\">\n<h3>{}</h3>\n<p>{}</p>\n",
        ctx.text("pricingPage.sections.services.cardTitle"),
        ctx.text("pricingPage.sections.services.note"),
    );
    write_price_rows(&mut main, ctx, "pricingPage.sections.services.items", SERVICE_ITEMS);
    main.push_str("</article>\n</section>\n");

    write_section_heading(&mut main, ctx, "tyres");
    for group in TYRE_GROUPS {
        let prefix = format!("pricingPage.sections.tyres.groups.{}", group);
        let _ = write!(
            main,
            "<article class=\"card\">\n<h3>{}</h3>\n<p>{}</p>\n",
            ctx.text(&format!("{}.title", prefix)),
            ctx.text(&format!("{}.note", prefix)),
        );
        for (variant, sizes) in TYRE_VARIANTS {
            let variant_prefix = format!("{}.variants.{}", prefix, variant);
            let _ = writeln!(
                main,
                "<h4>{}</h4>",
                ctx.text(&format!("{}.title", variant_prefix))
            );
            write_price_rows(&mut main, ctx, &format!("{}.items", variant_prefix), sizes);
        }
        main.push_str("</article>\n");
    }
    main.push_str("</section>\n");

    for (section, items) in [("tyreExtras", TYRE_EXTRAS), ("otherServices", OTHER_SERVICES)] {
        write_section_heading(&mut main, ctx, section);
        write_price_rows(
            &mut main,
            ctx,
            &format!("pricingPage.sections.{}.items", section),
            items,
        );
        main.push_str("</section>\n");
    }

    let _ = write!(
        main,
        "<section class=\"cta\">\n<h2>{}</h2>\n<p>{}</p>\n\
         <a class=\"button\" href=\"{}\">{}</a>\n<a class=\"button secondary\" href=\"{}\">{}</a>\n",
        ctx.text("pricingPage.cta.title"),
        ctx.text("pricingPage.cta.description"),
        tel_href(SERVICE_PHONE),
        ctx.text("pricingPage.cta.primary"),
        escape_html(&ctx.href("/contact")),
        ctx.text("pricingPage.cta.secondary"),
    );
    for (key, phone) in [("service", SERVICE_PHONE), ("bodyshop", BODYSHOP_PHONE)] {
        let _ = writeln!(
            main,
            "<div class=\"phone\"><strong>{}</strong> <a href=\"{}\">{}</a></div>",
            ctx.text(&format!("contactPage.sections.phones.items.{}.title", key)),
            tel_href(phone),
            phone,
        );
    }
    main.push_str("</section>\n");

    render_document(ctx, &PageMeta::from_dictionary(ctx, "pricing"), &main)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;
    use crate::pages::test_support::{assert_no_missing_keys, context};

    #[test]
    fn test_pricing_renders_in_every_locale() {
        for locale in Locale::all() {
            assert_no_missing_keys(&render_pricing(&context(locale, "/pricing", "")));
        }
    }

    #[test]
    fn test_pricing_shows_passenger_labor_rate() {
        let ctx = context(Locale::EN, "/pricing", "lang=en");
        let html = render_pricing(&ctx);
        let label = ctx.text("pricingPage.sections.labor.groups.mechanical.items.passenger.label");
        assert!(html.contains(&format!("<dt>{}</dt>", label)));
    }

    #[test]
    fn test_pricing_row_count() {
        let html = render_pricing(&context(Locale::CS, "/pricing", ""));
        let labor: usize = LABOR_GROUPS.iter().map(|(_, items)| items.len()).sum();
        let tyres: usize = TYRE_GROUPS.len()
            * TYRE_VARIANTS.iter().map(|(_, sizes)| sizes.len()).sum::<usize>();
        let expected =
            labor + SERVICE_ITEMS.len() + tyres + TYRE_EXTRAS.len() + OTHER_SERVICES.len();
        assert_eq!(html.matches("<dt>").count(), expected);
    }
}
