use super::layout::{render_document, tel_href, BODYSHOP_PHONE, EMAIL, SERVICE_PHONE};
use super::{escape_html, PageContext, PageMeta};
use std::fmt::Write;

const INTRO_PARAGRAPHS: &[&str] = &["mission", "approach", "team"];
const VALUES: &[&str] = &["partnership", "craftsmanship", "transparency"];
const CARE: &[&str] = &["replacementCar", "pickup", "detailing"];
const COMMITMENTS: &[&str] = &["communication", "documentation", "deadlines"];

const JOBS: &[&str] = &["mechanic", "painter", "receptionist"];

/// Write `<h3>title</h3><p>description</p>` for each item under `prefix`.
fn write_items(html: &mut String, ctx: &PageContext, prefix: &str, keys: &[&str]) {
    for key in keys {
        let _ = writeln!(
            html,
            "<div class=\"item\">\n<h3>{}</h3>\n<p>{}</p>\n</div>",
            ctx.text(&format!("{}.{}.title", prefix, key)),
            ctx.text(&format!("{}.{}.description", prefix, key)),
        );
    }
}

pub fn render_about(ctx: &PageContext) -> String {
    let mut main = format!(
        "<section class=\"hero\">\n<span class=\"badge\">{}</span>\n<h1>{}</h1>\n<p>{}</p>\n</section>\n\
         <section class=\"introduction\">\n<h2>{}</h2>\n<p class=\"subtitle\">{}</p>\n",
        ctx.text("aboutPage.hero.badge"),
        ctx.text("aboutPage.hero.title"),
        ctx.text("aboutPage.hero.description"),
        ctx.text("aboutPage.sections.introduction.title"),
        ctx.text("aboutPage.sections.introduction.subtitle"),
    );
    for key in INTRO_PARAGRAPHS {
        let _ = writeln!(
            main,
            "<p>{}</p>",
            ctx.text(&format!("aboutPage.sections.introduction.paragraphs.{}", key))
        );
    }
    main.push_str("</section>\n");

    for (section, keys) in [("values", VALUES), ("care", CARE), ("commitments", COMMITMENTS)] {
        let _ = write!(
            main,
            "<section class=\"{}\">\n<h2>{}</h2>\n<p>{}</p>\n",
            section,
            ctx.text(&format!("aboutPage.sections.{}.title", section)),
            ctx.text(&format!("aboutPage.sections.{}.description", section)),
        );
        write_items(
            &mut main,
            ctx,
            &format!("aboutPage.sections.{}.items", section),
            keys,
        );
        main.push_str("</section>\n");
    }

    let _ = write!(
        main,
        "<section class=\"cta\">\n<h2>{}</h2>\n<p>{}</p>\n",
        ctx.text("aboutPage.cta.title"),
        ctx.text("aboutPage.cta.description"),
    );
    for (key, phone) in [("service", SERVICE_PHONE), ("bodyshop", BODYSHOP_PHONE)] {
        let _ = writeln!(
            main,
            "<div class=\"phone\">\n<strong>{}</strong>\n<span>{}</span>\n<a href=\"{}\">{}</a>\n</div>",
            ctx.text(&format!("contactPage.sections.phones.items.{}.title", key)),
            ctx.text(&format!("contactPage.sections.phones.items.{}.description", key)),
            tel_href(phone),
            phone,
        );
    }
    let _ = write!(
        main,
        "<a class=\"button\" href=\"{}\">{}</a>\n<a class=\"button secondary\" href=\"{}\">{}</a>\n\
         <a href=\"{}\">{}</a>\n</section>\n",
        tel_href(SERVICE_PHONE),
        ctx.text("aboutPage.cta.primary"),
        escape_html(&ctx.href("/contact")),
        ctx.text("aboutPage.cta.secondary"),
        escape_html(&ctx.href("/about/kariera")),
        ctx.text("aboutPage.cta.careers"),
    );

    render_document(ctx, &PageMeta::from_dictionary(ctx, "about"), &main)
}

pub fn render_careers(ctx: &PageContext) -> String {
    let mut main = format!(
        "<section class=\"hero\">\n<span class=\"badge\">{}</span>\n<h1>{}</h1>\n<p>{}</p>\n</section>\n\
         <section class=\"positions\">\n<h2>{}</h2>\n<p>{}</p>\n",
        ctx.text("careerPage.hero.badge"),
        ctx.text("careerPage.hero.title"),
        ctx.text("careerPage.hero.description"),
        ctx.text("careerPage.sections.openPositions.title"),
        ctx.text("careerPage.sections.openPositions.description"),
    );

    for key in JOBS {
        let prefix = format!("careerPage.sections.openPositions.items.{}", key);
        let _ = write!(
            main,
            "<article class=\"card\">\n<h3>{}</h3>\n<p>{}</p>\n",
            ctx.text(&format!("{}.title", prefix)),
            ctx.text(&format!("{}.summary", prefix)),
        );

        // Salary is listed only for some positions.
        if let Some(salary) = ctx.t.lookup(&format!("{}.salary", prefix)) {
            let _ = writeln!(main, "<p class=\"salary\">{}</p>", escape_html(salary));
        }

        for list in ["requirements", "offers"] {
            let _ = write!(
                main,
                "<h4>{}</h4>\n<ul>\n",
                ctx.text(&format!("careerPage.sections.openPositions.{}Title", list))
            );
            for line in ctx.t.translate(&format!("{}.{}", prefix, list)).lines() {
                let line = line.trim();
                if !line.is_empty() {
                    let _ = writeln!(main, "<li>{}</li>", escape_html(line));
                }
            }
            main.push_str("</ul>\n");
        }

        main.push_str("</article>\n");
    }
    main.push_str("</section>\n");

    let _ = write!(
        main,
        "<section class=\"cta\">\n<h2>{}</h2>\n<p>{}</p>\n\
         <div><strong>{}</strong> <a href=\"{}\">{}</a></div>\n\
         <div><strong>{}</strong> <a href=\"mailto:{}\">{}</a></div>\n</section>\n",
        ctx.text("careerPage.cta.title"),
        ctx.text("careerPage.cta.description"),
        ctx.text("careerPage.cta.callTitle"),
        tel_href(SERVICE_PHONE),
        SERVICE_PHONE,
        ctx.text("careerPage.cta.emailTitle"),
        EMAIL,
        EMAIL,
    );

    render_document(ctx, &PageMeta::from_dictionary(ctx, "careers"), &main)
}
