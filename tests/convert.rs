use bookmark_beautifier::template::TEMPLATE;
use bookmark_beautifier::{beautify, convert, ConvertError, LineRange, Options};
use std::fs;
use tempfile::TempDir;

const SAMPLE: &str = r#"<!DOCTYPE NETSCAPE-Bookmark-file-1>
<!-- This is an automatically generated file.
     It will be read and overwritten.
     DO NOT EDIT! -->
<META HTTP-EQUIV="Content-Type" CONTENT="text/html; charset=UTF-8">
<TITLE>Bookmarks</TITLE>
<H1>Bookmarks</H1>
<DL><p>
    <DT><H3 ADD_DATE="1664625840" LAST_MODIFIED="1748005646">Test Folder</H3>
    <DL><p>
        <DT><A HREF="https://example.com">Example Link</A>
    </DL><p>
</DL><p>"#;

#[test]
fn converts_sample_export() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("test_input.html");
    let output = dir.path().join("test_output.html");
    fs::write(&input, SAMPLE).unwrap();

    convert(&input, &output).unwrap();

    let content = fs::read_to_string(&output).unwrap();
    let lower = content.to_lowercase();
    for needle in ["<!doctype html>", "<html>", "<head>", "<body>", "</html>"] {
        assert!(lower.contains(needle), "missing {needle}");
    }
    assert!(!lower.contains("netscape-bookmark-file"));
    assert!(!lower.contains("do not edit"));
    assert!(content.contains(r#"<dt><a HREF="https://example.com">Example Link</a>"#));
    assert!(content.contains(
        r#"<dt><h3 ADD_DATE="1664625840" LAST_MODIFIED="1748005646">Test Folder</h3>"#
    ));
    assert!(content.starts_with(TEMPLATE));
    assert!(content.ends_with("</dl><p>\n</body>\n</html>"));
}

#[test]
fn sample_body_is_exact() {
    let out = beautify(SAMPLE, &Options::default());
    let body = out.strip_prefix(TEMPLATE).unwrap();
    assert_eq!(
        body,
        "<meta HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=UTF-8\">\n\
         <title>Bookmarks</title>\n\
         <dl><p>\n\
         \x20   <dt><h3 ADD_DATE=\"1664625840\" LAST_MODIFIED=\"1748005646\">Test Folder</h3>\n\
         \x20   <dl><p>\n\
         \x20       <dt><a HREF=\"https://example.com\">Example Link</a>\n\
         \x20   </dl><p>\n\
         </dl><p>\n\
         </body>\n\
         </html>"
    );
}

#[test]
fn overwrites_existing_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.html");
    let output = dir.path().join("out.html");
    fs::write(&input, SAMPLE).unwrap();
    fs::write(&output, "stale content that is much longer than nothing").unwrap();

    convert(&input, &output).unwrap();

    let content = fs::read_to_string(&output).unwrap();
    assert!(!content.contains("stale content"));
}

#[test]
fn missing_input_is_reported_and_output_untouched() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("does_not_exist.html");
    let output = dir.path().join("out.html");

    let err = convert(&input, &output).unwrap_err();

    assert!(matches!(err, ConvertError::FileNotAccessible { .. }));
    assert_eq!(err.path(), input.as_path());
    assert!(!output.exists());
}

#[test]
fn unwritable_output_is_reported() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.html");
    fs::write(&input, SAMPLE).unwrap();
    let output = dir.path().join("no_such_dir").join("out.html");

    let err = convert(&input, &output).unwrap_err();

    assert!(matches!(err, ConvertError::WriteFailure { .. }));
    assert!(err.to_string().contains("out.html"));
}

#[test]
fn second_conversion_keeps_bookmark_content() {
    let once = beautify(SAMPLE, &Options::default());
    let twice = beautify(&once, &Options::default());

    let content_of = |doc: &str| -> Vec<String> {
        doc.lines()
            .filter(|l| {
                let t = l.trim();
                l.contains("<dt>") || t == "<dl><p>" || t == "</dl><p>"
            })
            .map(str::to_owned)
            .collect()
    };
    assert_eq!(content_of(&once), content_of(&twice));
    // The earlier separator is now part of the last content line, so a new one is added.
    assert!(twice.ends_with("</dl><p>\n\n</body>\n</html>"));
    assert_eq!(twice.matches("</body>").count(), 1);
}

#[test]
fn line_range_option_limits_lowercasing() {
    let options = Options {
        range: LineRange::new(1, Some(1)),
        ..Options::default()
    };
    let out = beautify("<DL><p>\n<DT><A HREF=\"x\">X</A>\n</DL><p>\n", &options);
    let body = out.strip_prefix(TEMPLATE).unwrap();
    assert!(body.starts_with("<dl><p>\n<DT><A HREF=\"x\">X</A>\n</DL><p>\n"));
}
