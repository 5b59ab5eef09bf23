//! JavaScript snippets evaluated in the page.

/// Quote a CSS selector as a JS string literal.
fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "''".to_string())
}

/// Scroll down by a fraction of the current document height.
pub fn scroll_by_fraction(divisor: u32) -> String {
    format!(
        "window.scrollBy(0, document.body.scrollHeight / {});",
        divisor.max(1)
    )
}

/// Evaluates to `true` when the first match of `selector` is rendered with a
/// non-empty box and is not hidden by style.
pub fn visibility_probe(selector: &str) -> String {
    let selector = js_string(selector);
    format!(
        r#"
        (() => {{
            const el = document.querySelector({selector});
            if (!el) {{
                return false;
            }}
            const style = window.getComputedStyle(el);
            if (style.visibility === 'hidden' || style.display === 'none') {{
                return false;
            }}
            const rect = el.getBoundingClientRect();
            return rect.width > 0 && rect.height > 0;
        }})()
        "#
    )
}

/// Evaluates to `true` once `selector` matches anything in the document.
pub fn presence_probe(selector: &str) -> String {
    format!("document.querySelector({}) !== null", js_string(selector))
}
