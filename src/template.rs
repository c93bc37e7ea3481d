// src/template.rs
//
// Fixed document preamble injected in front of every converted export.
//
// - Dark theme stylesheet; nested `<dl>` lists get an indented left rule.
// - A DOMContentLoaded script replaces every `dt > h3` folder heading with
//   `h2`..`h6` according to how many `<dl>` lists enclose it.
// - Ends with the opening `<body>` and the page heading line.

/// Page heading text used by [`TEMPLATE`].
pub const DEFAULT_TITLE: &str = "Bookmarks";

/// The preamble, verbatim, with [`DEFAULT_TITLE`] as the page heading.
pub const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta http-equiv="Content-Type" content="text/html; charset=UTF-8">
  <style>
    .main-title { font-size: 3em; text-align: center; margin: 1rem 0 2rem 0; color: #ce9178; }
    body { background-color: #1e1e1e; color: #d4d4d4; font-family: 'Segoe UI', system-ui, sans-serif;
           line-height: 1.6; margin: 0; padding: 2rem; }
    dl { margin-left: 2rem; border-left: 1px solid #404040; padding-left: 1rem; }
    body > dl { margin-left: 0; border-left: none; padding-left: 0; }
    dt { margin: 0.8rem 0; }
    a { color: #569cd6; text-decoration: none; transition: color 0.2s; }
    a:hover { color: #9cdcfe; text-decoration: underline; }
    h1, h2, h3, h4, h5, h6 { color: #ce9178; margin: 0.5rem 0; font-weight: 600; }
    h1 { font-size: 2.5em; } h2 { font-size: 2.2em; } h3 { font-size: 1.9em; }
    h4 { font-size: 1.6em; } h5 { font-size: 1.3em; } h6 { font-size: 1.1em; }
  </style>
  <script>
    document.addEventListener('DOMContentLoaded', function(){
      document.querySelectorAll('dt > h3').forEach(function(h){
        let lvl = 1, el = h.parentElement;
        while (el = el.parentElement) {
          if (el.tagName.toLowerCase() === 'dl') lvl++;
        }
        const tag = 'h' + Math.min(lvl+1, 6);
        const nh = document.createElement(tag);
        Array.from(h.attributes).forEach(a => nh.setAttribute(a.name, a.value));
        nh.innerHTML = h.innerHTML;
        h.parentNode.replaceChild(nh, h);
      });
    });
  </script>
</head>
<body>
  <h1 class="main-title">Bookmarks</h1>
"#;

const HEADING_OPEN: &str = r#"  <h1 class="main-title">"#;

/// The preamble handed to the structural finisher.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Template {
    title: Option<String>,
}

impl Template {
    /// Same preamble with a different page heading. The text is HTML-escaped.
    pub fn with_title(title: impl Into<String>) -> Self {
        Template {
            title: Some(title.into()),
        }
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    /// Full preamble text, ending with a line break.
    pub fn render(&self) -> String {
        let Some(title) = &self.title else {
            return TEMPLATE.to_string();
        };
        // The heading is the last line of the constant.
        let head_len = TEMPLATE.len() - heading_line(DEFAULT_TITLE).len();
        let mut out = String::with_capacity(TEMPLATE.len() + title.len());
        out.push_str(&TEMPLATE[..head_len]);
        out.push_str(&heading_line(&escape_text(title)));
        out
    }
}

fn heading_line(text: &str) -> String {
    format!("{HEADING_OPEN}{text}</h1>\n")
}

fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}
