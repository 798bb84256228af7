//! Block YAML serialisation of configuration models.
//!
//! The output keeps constructor keys and writes references in their tagged
//! string form, so [`crate::load_config_file`] reads it back into an equal
//! model.

use crate::model::dotted;
use crate::{ConfigModel, ConfigValue, ConfigueError, ConfigueResult};

const INDENT: usize = 2;

/// Serialise `model` as block YAML.
///
/// ```
/// use configue_cli::{ConfigModel, dump};
///
/// let config = ConfigModel::from_dotlist(["server.port=8080", "tags=[a]"])?;
/// assert_eq!(dump(&config)?, "server:\n  port: 8080\ntags:\n  - \"a\"\n");
/// # Ok::<_, std::sync::Arc<configue_cli::ConfigueError>>(())
/// ```
///
/// # Errors
///
/// [`ConfigueError::MissingMandatoryValue`] when a leaf is still missing.
pub fn dump(model: &ConfigModel) -> ConfigueResult<String> {
    if model.is_empty() {
        return Ok("{}\n".to_owned());
    }
    let mut out = String::new();
    write_map(&mut out, model, 0, "")?;
    Ok(out)
}

fn write_map(out: &mut String, model: &ConfigModel, indent: usize, path: &str) -> ConfigueResult<()> {
    for (key, value) in model.iter() {
        let key_path = dotted(path, key);
        let pad = " ".repeat(indent);
        let key_text = format_key(key);
        match value {
            ConfigValue::Map(child) if !child.is_empty() => {
                push_line(out, &format!("{pad}{key_text}:"));
                write_map(out, child, indent + INDENT, &key_path)?;
            }
            ConfigValue::List(items) if !items.is_empty() => {
                push_line(out, &format!("{pad}{key_text}:"));
                write_list(out, items, indent + INDENT, &key_path)?;
            }
            scalar => {
                let text = scalar_text(scalar, &key_path)?;
                push_line(out, &format!("{pad}{key_text}: {text}"));
            }
        }
    }
    Ok(())
}

fn write_list(out: &mut String, items: &[ConfigValue], indent: usize, path: &str) -> ConfigueResult<()> {
    let pad = " ".repeat(indent);
    for (index, item) in items.iter().enumerate() {
        let item_path = dotted(path, &index.to_string());
        match item {
            ConfigValue::Map(child) if !child.is_empty() => {
                push_line(out, &format!("{pad}-"));
                write_map(out, child, indent + INDENT, &item_path)?;
            }
            ConfigValue::List(nested) if !nested.is_empty() => {
                push_line(out, &format!("{pad}-"));
                write_list(out, nested, indent + INDENT, &item_path)?;
            }
            scalar => {
                let text = scalar_text(scalar, &item_path)?;
                push_line(out, &format!("{pad}- {text}"));
            }
        }
    }
    Ok(())
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn quote(text: &str) -> String {
    serde_json::Value::String(text.to_owned()).to_string()
}

/// Plain scalars that YAML 1.1 or 1.2 loaders read as booleans or null, in
/// any letter case.
const RESERVED_PLAIN_SCALARS: &[&str] = &[
    "true", "false", "null", "yes", "no", "on", "off", "y", "n",
];

fn format_key(key: &str) -> String {
    let mut chars = key.chars();
    let simple = chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
        && !RESERVED_PLAIN_SCALARS
            .iter()
            .any(|reserved| key.eq_ignore_ascii_case(reserved));
    if simple { key.to_owned() } else { quote(key) }
}

fn scalar_text(value: &ConfigValue, path: &str) -> ConfigueResult<String> {
    Ok(match value {
        ConfigValue::Missing => return Err(ConfigueError::missing_value(path)),
        ConfigValue::Null => "null".to_owned(),
        ConfigValue::Bool(flag) => flag.to_string(),
        ConfigValue::Integer(number) => number.to_string(),
        ConfigValue::Unsigned(number) => number.to_string(),
        ConfigValue::Float(number) if number.is_nan() => ".nan".to_owned(),
        ConfigValue::Float(number) if number.is_infinite() => {
            if number.is_sign_positive() { ".inf" } else { "-.inf" }.to_owned()
        }
        ConfigValue::Float(number) => format!("{number:?}"),
        ConfigValue::String(text) => quote(text),
        ConfigValue::Reference(reference) => quote(&reference.to_string()),
        ConfigValue::List(_) => "[]".to_owned(),
        ConfigValue::Map(_) => "{}".to_owned(),
    })
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests panic with context on unexpected results")]
mod tests {
    use super::*;
    use crate::{CONSTRUCTOR_KEY, Reference};
    use rstest::rstest;

    #[rstest]
    fn writes_nested_structures() -> anyhow::Result<()> {
        let mut handler = ConfigModel::new();
        handler.insert(CONSTRUCTOR_KEY, "app::Handler");
        handler.insert("target", Reference::Extern("sys.stdout".into()));
        let mut model = ConfigModel::new();
        model.insert("handlers", ConfigValue::List(vec![ConfigValue::Map(handler)]));
        model.insert("empty", ConfigModel::new());
        model.insert("ratio", 0.5);
        model.insert("on", true);

        let text = dump(&model).map_err(|e| anyhow::anyhow!("{e}"))?;
        anyhow::ensure!(
            text == concat!(
                "handlers:\n",
                "  -\n",
                "    \"()\": \"app::Handler\"\n",
                "    target: \"!ext sys.stdout\"\n",
                "empty: {}\n",
                "ratio: 0.5\n",
                "\"on\": true\n",
            ),
            "unexpected dump:\n{text}"
        );
        Ok(())
    }

    #[rstest]
    #[case::title_true("True")]
    #[case::upper_true("TRUE")]
    #[case::title_false("False")]
    #[case::title_null("Null")]
    #[case::upper_null("NULL")]
    #[case::tilde("~")]
    #[case::yes("Yes")]
    #[case::on("ON")]
    fn quotes_keys_loaders_would_reinterpret(#[case] key: &str) {
        assert_eq!(format_key(key), format!("\"{key}\""));
    }

    #[rstest]
    fn reserved_looking_keys_survive_a_reload() -> anyhow::Result<()> {
        let mut model = ConfigModel::new();
        for (key, value) in [("True", 4), ("NULL", 4), ("~", 1), ("Yes", 3), ("plain", 5)] {
            model.insert(key, value);
        }
        let text = dump(&model).map_err(|e| anyhow::anyhow!("{e}"))?;
        anyhow::ensure!(text.contains("\"True\": 4\n"), "unexpected dump:\n{text}");
        anyhow::ensure!(text.contains("\"NULL\": 4\n"), "unexpected dump:\n{text}");
        anyhow::ensure!(text.contains("plain: 5\n"), "unexpected dump:\n{text}");

        let dir = tempfile::TempDir::new()?;
        let file = camino::Utf8PathBuf::from_path_buf(dir.path().join("dump.yaml"))
            .map_err(|_| anyhow::anyhow!("non UTF-8 path"))?;
        std::fs::write(&file, &text)?;
        let reloaded = crate::load_config_file(&file).map_err(|e| anyhow::anyhow!("{e}"))?;
        anyhow::ensure!(reloaded == model, "{reloaded:?} != {model:?}");
        Ok(())
    }

    #[rstest]
    #[case::nan(f64::NAN, ".nan")]
    #[case::inf(f64::INFINITY, ".inf")]
    #[case::neg_inf(f64::NEG_INFINITY, "-.inf")]
    #[case::whole(1.0, "1.0")]
    fn formats_floats(#[case] number: f64, #[case] expected: &str) -> anyhow::Result<()> {
        let text = scalar_text(&ConfigValue::Float(number), "x").map_err(|e| anyhow::anyhow!("{e}"))?;
        anyhow::ensure!(text == expected);
        Ok(())
    }

    #[rstest]
    fn refuses_missing_leaves() {
        let mut inner = ConfigModel::new();
        inner.insert("b", ConfigValue::Missing);
        let mut model = ConfigModel::new();
        model.insert("a", inner);
        let err = dump(&model).expect_err("missing leaf");
        assert_eq!(err.to_string(), "Missing mandatory value: a.b");
    }
}
