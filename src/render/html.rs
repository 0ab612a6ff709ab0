use std::fmt::Display;
use std::fmt::Write as _;

use super::page::{comment_url, model_last, tag_size, GroupDisplay, TablesPage};

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// A link in the page header.
pub struct NavItem {
    pub filename: String,
    pub title: String,
}

const STYLE: &str = "body{font-family:sans-serif;margin:0 auto;max-width:60em;padding:1em}\
nav a{margin-right:1em}\
table{border-collapse:collapse;width:100%;margin-bottom:2em}\
th,td{border-bottom:1px solid #ddd;padding:.3em .5em;text-align:left}\
h2 small{color:#777;font-weight:normal}";

fn push_nav(out: &mut String, nav: &[NavItem], current: &str) {
    out.push_str("<nav>");
    for item in nav {
        if item.filename == current {
            let _ = write!(out, "<strong>{}</strong>", escape_html(&item.title));
        } else {
            let _ = write!(
                out,
                r#"<a href="{}">{}</a>"#,
                escape_html(&item.filename),
                escape_html(&item.title)
            );
        }
    }
    out.push_str("</nav>\n");
}

fn push_dropdown(out: &mut String, groups: &[GroupDisplay<'_>]) {
    out.push_str(
        r#"<select onchange="if (this.value) location.hash = this.value"><option value="">Jump to…</option>"#,
    );
    for group in groups {
        let _ = write!(
            out,
            r#"<option value="{}">{} ({})</option>"#,
            escape_html(&group.anchor),
            escape_html(&group.name),
            group.count
        );
    }
    out.push_str("</select>\n");
}

fn push_table(out: &mut String, group: &GroupDisplay<'_>) {
    let _ = write!(
        out,
        r#"<h2 id="{}">{} <small>{}</small></h2>"#,
        escape_html(&group.anchor),
        escape_html(&group.name),
        group.count
    );
    out.push_str(
        "\n<table><thead><tr><th>Model/Last</th><th>Brannock</th><th>Size</th><th>Convention</th><th>Text</th></tr></thead><tbody>\n",
    );
    for record in group.records {
        let convention = record.convention.map(|c| c.as_str()).unwrap_or("");
        let _ = writeln!(
            out,
            r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><a href="{}">{}</a></td></tr>"#,
            escape_html(&model_last(&record.label)),
            escape_html(&record.reference_size.to_string()),
            escape_html(&tag_size(record)),
            convention,
            escape_html(&comment_url(record)),
            escape_html(&record.sizing_text)
        );
    }
    out.push_str("</tbody></table>\n");
}

pub fn render_page<K: Display>(page: &TablesPage<K>, nav: &[NavItem]) -> String {
    let groups = page.group_displays();
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape_html(&page.title));
    let _ = writeln!(out, "<style>{}</style>\n</head>\n<body>", STYLE);

    push_nav(&mut out, nav, &page.filename());
    let _ = writeln!(out, "<h1>{}</h1>", escape_html(&page.title));
    if let Some(subtitle) = &page.subtitle {
        let _ = writeln!(out, "<p>{}</p>", escape_html(subtitle));
    }
    push_dropdown(&mut out, &groups);
    for group in &groups {
        push_table(&mut out, group);
    }

    out.push_str("</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MODELS_PAGE;
    use crate::denormalize::SizeRecord;
    use crate::parser::matcher::Convention;
    use crate::reference_size::ReferenceSize;

    fn record(label: &str, sizing_text: &str) -> SizeRecord {
        SizeRecord {
            label: label.into(),
            size: 43.0,
            width: None,
            convention: Some(Convention::Eu),
            sizing_text: sizing_text.into(),
            id: "c1".into(),
            parent_id: "p".into(),
            reference_size: ReferenceSize::new(10.0, "D"),
            thread_id: "t".into(),
            thread_url: "https://example.com/thread/".into(),
        }
    }

    fn nav() -> Vec<NavItem> {
        vec![
            NavItem {
                filename: "sizes.html".into(),
                title: "Brannock Sizes".into(),
            },
            NavItem {
                filename: "models.html".into(),
                title: "Models & Lasts".into(),
            },
        ]
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn renders_groups_as_tables() {
        let groups = vec![(
            "Crockett & Jones 348".to_string(),
            vec![record("Crockett & Jones 348", "<b>EU 43</b>")],
        )];
        let page = TablesPage::new(&MODELS_PAGE, groups);
        let html = render_page(&page, &nav());

        assert!(html.contains("<title>Models &amp; Lasts</title>"));
        assert!(html.contains(r#"<a href="sizes.html">Brannock Sizes</a>"#));
        assert!(html.contains("<strong>Models &amp; Lasts</strong>"));
        assert!(html.contains(r#"<option value="Crockett-%26-Jones-348">"#));
        assert!(html.contains(r#"<h2 id="Crockett-%26-Jones-348">"#));
        assert!(html.contains("<td>43</td><td>EU</td>"));
        assert!(html.contains(r#"<a href="https://example.com/thread/c1">&lt;b&gt;EU 43&lt;/b&gt;</a>"#));
        assert!(!html.contains("<b>"));
    }
}
