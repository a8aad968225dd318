#![cfg(feature = "config_serde")]

use anyhow::Result;
use svelte_lexer::{Language, TokenKind, config::LexOptions, tokenize};

#[test]
fn options_from_toml() -> Result<()> {
    let options: LexOptions = toml::from_str("whitespaceText = false\nmaxDepth = 8\n")?;
    assert!(!options.whitespace_text);
    assert_eq!(options.max_depth.map(|max| max.get()), Some(8));

    let tokens = tokenize("<ul>\n  <li>a</li>\n</ul>", Language::Html, &options)?;
    let text = tokens
        .iter()
        .filter(|token| token.kind == TokenKind::Text)
        .map(|token| (token.start, token.end))
        .collect::<Vec<_>>();
    assert_eq!(text, [(11, 12)]);
    Ok(())
}

#[test]
fn missing_keys_use_defaults() -> Result<()> {
    let options: LexOptions = toml::from_str("")?;
    assert!(options.whitespace_text);
    assert!(options.max_depth.is_none());
    Ok(())
}
