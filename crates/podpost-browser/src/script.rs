//! In-page JavaScript used for readiness checks.

use crate::Result;
use podpost_core::{ElementState, Locator};

/// Expression evaluating to the first element matching `locator`, or null
pub fn resolve(locator: &Locator) -> Result<String> {
    let selector = serde_json::to_string(locator.selector())?;
    Ok(match locator {
        Locator::Css(_) => format!("document.querySelector({})", selector),
        Locator::XPath(_) => format!(
            "document.evaluate({}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue",
            selector
        ),
    })
}

/// Expression evaluating to true once the element is in `state`
pub fn state_check(locator: &Locator, state: ElementState) -> Result<String> {
    let outcome = match state {
        ElementState::Attached => "true",
        ElementState::Visible => "visible",
        ElementState::Hidden => "!visible",
    };
    let when_absent = state == ElementState::Hidden;

    Ok(format!(
        r#"(() => {{
    const el = {element};
    if (!el) return {when_absent};
    const style = window.getComputedStyle(el);
    const rect = el.getBoundingClientRect();
    const visible = style.visibility !== 'hidden' && style.display !== 'none' && rect.width > 0 && rect.height > 0;
    return {outcome};
}})()"#,
        element = resolve(locator)?,
        when_absent = when_absent,
        outcome = outcome,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_css_quotes_selector() {
        let expr = resolve(&Locator::css(r#"div[role="textbox"]"#)).unwrap();
        assert_eq!(expr, r#"document.querySelector("div[role=\"textbox\"]")"#);
    }

    #[test]
    fn test_resolve_xpath_uses_document_evaluate() {
        let expr = resolve(&Locator::xpath("//button")).unwrap();
        assert!(expr.starts_with(r#"document.evaluate("//button""#));
        assert!(expr.ends_with(".singleNodeValue"));
    }

    #[test]
    fn test_hidden_state_accepts_absent_element() {
        let expr = state_check(&Locator::css("#x"), ElementState::Hidden).unwrap();
        assert!(expr.contains("if (!el) return true;"));
        assert!(expr.contains("return !visible;"));

        let expr = state_check(&Locator::css("#x"), ElementState::Visible).unwrap();
        assert!(expr.contains("if (!el) return false;"));
    }
}
