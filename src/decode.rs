use scraper::Html;

/// Expand HTML character references (`&amp;`, `&#39;`, `&eacute;`, ...) into
/// literal characters.
///
/// The text is run through the html5ever tokenizer that `scraper` wraps, so
/// named references follow the HTML rules, including the legacy forms without
/// a trailing semicolon. `<` is escaped first: only references are expanded,
/// markup is never interpreted. NUL and CR are passed through untouched,
/// whether or not the text contains references.
pub fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }

    // The tokenizer drops NUL and folds CR into LF, so decode the runs
    // between them and copy the characters themselves verbatim.
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find(|c| c == '\0' || c == '\r') {
        out.push_str(&decode_run(&rest[..pos]));
        out.push_str(&rest[pos..pos + 1]);
        rest = &rest[pos + 1..];
    }
    out.push_str(&decode_run(rest));
    out
}

fn decode_run(run: &str) -> String {
    if !run.contains('&') {
        return run.to_string();
    }

    let escaped = run.replace('<', "&lt;");
    let fragment = Html::parse_fragment(&escaped);
    fragment.root_element().text().collect()
}
