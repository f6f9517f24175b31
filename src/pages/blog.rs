use super::layout::{render_document, INSTAGRAM_URL};
use super::{escape_html, PageContext, PageMeta};
use crate::instagram::{InstagramPost, InstagramPostsResult};
use chrono::{DateTime, Datelike};
use std::fmt::Write;

/// Localized post date, or the raw timestamp when it does not parse.
fn post_date(ctx: &PageContext, timestamp: &str) -> String {
    let parsed = DateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%z")
        .or_else(|_| DateTime::parse_from_rfc3339(timestamp));

    match parsed {
        Ok(date) => {
            let month = ctx
                .t
                .translate(&format!("blogPage.months.m{}", date.month()));
            ctx.t.format(
                "blogPage.date",
                &[
                    ("day", &date.day().to_string()),
                    ("month", &month),
                    ("year", &date.year().to_string()),
                ],
            )
        }
        Err(_) => timestamp.to_string(),
    }
}

fn render_post(ctx: &PageContext, post: &InstagramPost) -> String {
    let alt = post
        .alt
        .clone()
        .unwrap_or_else(|| ctx.t.translate("blogPage.defaultAlt"));
    let caption = post
        .caption
        .clone()
        .unwrap_or_else(|| ctx.t.translate("blogPage.noCaption"));

    format!(
        "<article class=\"card post\">\n\
         <a href=\"{permalink}\" target=\"_blank\" rel=\"noopener noreferrer\">\
         <img src=\"{media}\" alt=\"{alt}\" loading=\"lazy\"><span>Instagram</span></a>\n\
         <h3>{preview}</h3>\n<time datetime=\"{timestamp}\">{date}</time>\n<p>{caption}</p>\n\
         <a class=\"button secondary\" href=\"{permalink}\" target=\"_blank\" rel=\"noopener noreferrer\">{view}</a>\n\
         </article>\n",
        permalink = escape_html(&post.permalink),
        media = escape_html(&post.media_url),
        alt = escape_html(&alt),
        preview = escape_html(&post.caption_preview),
        timestamp = escape_html(&post.timestamp),
        date = escape_html(&post_date(ctx, &post.timestamp)),
        caption = escape_html(&caption),
        view = ctx.text("blogPage.viewPost"),
    )
}

pub fn render_blog(ctx: &PageContext, feed: &InstagramPostsResult) -> String {
    let mut main = format!(
        "<section class=\"hero\">\n<span class=\"badge\">{}</span>\n<h1>{}</h1>\n<p>{}</p>\n\
         <p class=\"feed-info\"><strong>{}</strong> <span>{}</span></p>\n</section>\n\
         <section class=\"feed\">\n",
        ctx.text("blogPage.hero.badge"),
        ctx.text("blogPage.hero.title"),
        ctx.text("blogPage.hero.description"),
        ctx.text("blogPage.hero.feedLabel"),
        ctx.text("blogPage.hero.cadence"),
    );

    if feed.posts.is_empty() {
        let _ = writeln!(main, "<div class=\"empty\">\n<p>{}</p>", ctx.text("blogPage.empty.title"));
        match &feed.error {
            Some(error) => {
                let _ = write!(
                    main,
                    "<p>{}</p>\n<p>{} <span class=\"error\">{}</span></p>\n",
                    ctx.text("blogPage.empty.configure"),
                    ctx.text("blogPage.empty.technicalDetail"),
                    escape_html(error),
                );
            }
            None => {
                let _ = writeln!(
                    main,
                    "<p>{} <a href=\"{}\">@euromotorscz</a></p>",
                    ctx.text("blogPage.empty.follow"),
                    INSTAGRAM_URL,
                );
            }
        }
        let _ = write!(
            main,
            "<a class=\"button\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>\n</div>\n",
            INSTAGRAM_URL,
            ctx.text("blogPage.empty.cta"),
        );
    } else {
        main.push_str("<div class=\"grid\">\n");
        for post in &feed.posts {
            main.push_str(&render_post(ctx, post));
        }
        main.push_str("</div>\n");
    }
    main.push_str("</section>\n");

    render_document(ctx, &PageMeta::from_dictionary(ctx, "blog"), &main)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;
    use crate::pages::test_support::{assert_no_missing_keys, context};

    fn post(caption: Option<&str>) -> InstagramPost {
        InstagramPost {
            id: "1".to_string(),
            caption: caption.map(str::to_string),
            caption_preview: caption.unwrap_or("Instagram příspěvek").to_string(),
            media_url: "https://cdn.example.com/1.jpg".to_string(),
            permalink: "https://instagram.com/p/1".to_string(),
            timestamp: "2024-05-01T10:00:00+0000".to_string(),
            alt: caption.map(str::to_string),
            username: None,
        }
    }

    #[test]
    fn test_post_date_is_localized() {
        let ctx = context(Locale::EN, "/blog", "lang=en");
        assert_eq!(post_date(&ctx, "2024-05-01T10:00:00+0000"), "May 1, 2024");
        assert_eq!(post_date(&ctx, "yesterday"), "yesterday");
    }

    #[test]
    fn test_blog_lists_posts() {
        let ctx = context(Locale::CS, "/blog", "");
        let feed = InstagramPostsResult {
            posts: vec![post(Some("Nové <pneu>")), post(None)],
            error: None,
        };
        let html = render_blog(&ctx, &feed);
        assert_eq!(html.matches("class=\"card post\"").count(), 2);
        assert!(html.contains("Nové &lt;pneu&gt;"));
        assert!(html.contains("1. května 2024"));
        assert_no_missing_keys(&html);
    }

    #[test]
    fn test_blog_shows_error_detail() {
        let ctx = context(Locale::EN, "/blog", "lang=en");
        let feed = InstagramPostsResult {
            posts: Vec::new(),
            error: Some("INSTAGRAM_ACCESS_TOKEN is not set.".to_string()),
        };
        let html = render_blog(&ctx, &feed);
        assert!(html.contains("<span class=\"error\">INSTAGRAM_ACCESS_TOKEN is not set.</span>"));
    }

    #[test]
    fn test_blog_empty_feed_in_every_locale() {
        for locale in Locale::all() {
            let html = render_blog(&context(locale, "/blog", ""), &InstagramPostsResult::default());
            assert_no_missing_keys(&html);
            assert!(html.contains("@euromotorscz"));
        }
    }
}
