/// Escape text for interpolation into HTML markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const RESPONSIVE_SIZE: &str = r#"width="100%" height="100%" style="min-height:400px;""#;

/// Replace the first fixed `width="N" height="N"` pair of an embed with a
/// fluid size. Markup without such a pair is returned unchanged.
pub fn to_responsive_embed(html: &str) -> String {
    let lower = html.to_ascii_lowercase();
    let mut search_from = 0;
    while let Some(rel) = lower[search_from..].find("width=\"") {
        let start = search_from + rel;
        if let Some(end) = match_size_pair(&lower, start) {
            return format!("{}{}{}", &html[..start], RESPONSIVE_SIZE, &html[end..]);
        }
        search_from = start + 1;
    }
    html.to_string()
}

/// Matches `width="\d+"\s+height="\d+"` at `start`, returning the end offset.
fn match_size_pair(lower: &str, start: usize) -> Option<usize> {
    let mut pos = match_quoted_number(lower, start, "width=\"")?;
    let ws = lower[pos..].len() - lower[pos..].trim_start().len();
    if ws == 0 {
        return None;
    }
    pos += ws;
    match_quoted_number(lower, pos, "height=\"")
}

fn match_quoted_number(s: &str, start: usize, prefix: &str) -> Option<usize> {
    let rest = s.get(start..)?.strip_prefix(prefix)?;
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || rest.as_bytes().get(digits) != Some(&b'"') {
        return None;
    }
    Some(start + prefix.len() + digits + 1)
}

/// Minimal markdown rendering for planner output: headings, bullet lists,
/// bold spans and paragraphs. Input is escaped first.
pub fn render_markdown(text: &str) -> String {
    let mut html = String::new();
    let mut in_list = false;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        let bullet = line.strip_prefix("- ").or_else(|| line.strip_prefix("* "));

        if in_list && bullet.is_none() {
            html.push_str("</ul>");
            in_list = false;
        }

        if line.is_empty() {
            continue;
        }

        if let Some(item) = bullet {
            if !in_list {
                html.push_str("<ul>");
                in_list = true;
            }
            html.push_str(&format!("<li>{}</li>", inline_markdown(item)));
            continue;
        }

        let level = line.bytes().take_while(|b| *b == b'#').count();
        if (1..=6).contains(&level) && line.as_bytes().get(level) == Some(&b' ') {
            html.push_str(&format!(
                "<h{level}>{}</h{level}>",
                inline_markdown(line[level + 1..].trim())
            ));
        } else if line == "---" {
            html.push_str("<hr>");
        } else {
            html.push_str(&format!("<p>{}</p>", inline_markdown(line)));
        }
    }

    if in_list {
        html.push_str("</ul>");
    }
    html
}

fn inline_markdown(text: &str) -> String {
    let escaped = escape_html(text);
    let mut out = String::with_capacity(escaped.len());
    let mut parts = escaped.split("**");
    let mut bold = false;
    if let Some(first) = parts.next() {
        out.push_str(first);
    }
    for part in parts {
        out.push_str(if bold { "</strong>" } else { "<strong>" });
        out.push_str(part);
        bold = !bold;
    }
    if bold {
        out.push_str("</strong>");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn responsive_embed_rewrites_first_size_pair() {
        let html = r#"<iframe src="x" width="600" height="450" style="border:0;"></iframe>"#;
        assert_eq!(
            to_responsive_embed(html),
            r#"<iframe src="x" width="100%" height="100%" style="min-height:400px;" style="border:0;"></iframe>"#
        );
    }

    #[test]
    fn responsive_embed_is_case_insensitive_and_tolerant() {
        let html = r#"<IFRAME WIDTH="560"  HEIGHT="315" src="y">"#;
        assert!(to_responsive_embed(html).contains(r#"width="100%" height="100%""#));
        let untouched = r#"<iframe width="100%" height="450">"#;
        assert_eq!(to_responsive_embed(untouched), untouched);
    }

    #[test]
    fn markdown_headings_lists_and_bold() {
        let md = "# Trip\n\n- **Day 1**: Rumtek\n- Day 2\nEnjoy <3";
        assert_eq!(
            render_markdown(md),
            "<h1>Trip</h1><ul><li><strong>Day 1</strong>: Rumtek</li><li>Day 2</li></ul><p>Enjoy &lt;3</p>"
        );
    }
}
