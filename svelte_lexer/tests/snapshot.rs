use insta::{Settings, assert_snapshot, glob};
use svelte_lexer::{detect_language, render_tokens, tokenize};
use std::{fs, path::Path};

#[test]
fn tokens_snapshot() {
    glob!("tokens/*.{html,svelte}", |path| {
        let input = fs::read_to_string(path).unwrap();
        let language = detect_language(path).unwrap();

        let tokens = tokenize(&input, language, &Default::default())
            .map_err(|err| format!("failed to tokenize '{}': {err}", path.display()))
            .unwrap();
        let output = render_tokens(&input, &tokens);

        build_settings(path).bind(|| {
            let name = path.file_stem().unwrap().to_str().unwrap();
            assert_snapshot!(name, output);
        });
    });
}

fn build_settings(path: &Path) -> Settings {
    let mut settings = Settings::clone_current();
    settings.set_snapshot_path(path.parent().unwrap());
    settings.remove_snapshot_suffix();
    settings.set_prepend_module_to_snapshot(false);
    settings.remove_input_file();
    settings.set_omit_expression(true);
    settings.remove_info();
    settings
}
