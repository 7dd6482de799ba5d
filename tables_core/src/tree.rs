//! Read-only view over a parsed key/value configuration document

use crate::config::keys::SEPARATOR;

/// Navigation over a nested configuration tree
///
/// Paths are keys joined by `.`. Implementations must keep the source's
/// key order; the builder relies on it for entry order.
pub trait ConfigTree {
    /// Scalar at `path` rendered as a string. Sections yield `None`.
    fn get_string(&self, path: &str) -> Option<String>;

    /// Integer at `path`. Integer-looking strings are accepted, floats are
    /// truncated and values outside `i32` saturate.
    fn get_int(&self, path: &str) -> Option<i32>;

    /// Keys of this section. With `recursive`, every nested path is listed
    /// depth first, sections included, parents before their children.
    fn get_keys(&self, recursive: bool) -> Vec<String>;

    /// Nested section at `path`
    fn section(&self, path: &str) -> Option<&Self>;

    fn contains(&self, path: &str) -> bool {
        self.get_string(path).is_some() || self.section(path).is_some()
    }
}

fn saturate(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

fn parse_int(raw: &str) -> Option<i32> {
    raw.trim().parse::<i64>().ok().map(saturate)
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}{}{}", prefix, SEPARATOR, key)
    }
}

mod toml_tree {
    use super::{join, parse_int, saturate, ConfigTree, SEPARATOR};
    use toml::{Table, Value};

    fn lookup<'a>(table: &'a Table, path: &str) -> Option<&'a Value> {
        let mut segments = path.split(SEPARATOR);
        let mut value = table.get(segments.next()?)?;
        for segment in segments {
            value = value.as_table()?.get(segment)?;
        }
        Some(value)
    }

    fn collect_keys(table: &Table, prefix: &str, recursive: bool, out: &mut Vec<String>) {
        for (key, value) in table {
            let path = join(prefix, key);
            out.push(path.clone());
            if recursive {
                if let Value::Table(child) = value {
                    collect_keys(child, &path, recursive, out);
                }
            }
        }
    }

    impl ConfigTree for Table {
        fn get_string(&self, path: &str) -> Option<String> {
            match lookup(self, path)? {
                Value::String(s) => Some(s.clone()),
                Value::Integer(i) => Some(i.to_string()),
                Value::Float(f) => Some(f.to_string()),
                Value::Boolean(b) => Some(b.to_string()),
                _ => None,
            }
        }

        fn get_int(&self, path: &str) -> Option<i32> {
            match lookup(self, path)? {
                Value::Integer(i) => Some(saturate(*i)),
                Value::Float(f) => Some(*f as i32),
                Value::String(s) => parse_int(s),
                _ => None,
            }
        }

        fn get_keys(&self, recursive: bool) -> Vec<String> {
            let mut out = Vec::new();
            collect_keys(self, "", recursive, &mut out);
            out
        }

        fn section(&self, path: &str) -> Option<&Self> {
            lookup(self, path)?.as_table()
        }
    }
}

mod json_tree {
    use super::{join, parse_int, saturate, ConfigTree, SEPARATOR};
    use serde_json::{Map, Value};

    fn lookup<'a>(map: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
        let mut segments = path.split(SEPARATOR);
        let mut value = map.get(segments.next()?)?;
        for segment in segments {
            value = value.as_object()?.get(segment)?;
        }
        Some(value)
    }

    fn collect_keys(
        map: &Map<String, Value>,
        prefix: &str,
        recursive: bool,
        out: &mut Vec<String>,
    ) {
        for (key, value) in map {
            let path = join(prefix, key);
            out.push(path.clone());
            if recursive {
                if let Value::Object(child) = value {
                    collect_keys(child, &path, recursive, out);
                }
            }
        }
    }

    impl ConfigTree for Map<String, Value> {
        fn get_string(&self, path: &str) -> Option<String> {
            match lookup(self, path)? {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            }
        }

        fn get_int(&self, path: &str) -> Option<i32> {
            match lookup(self, path)? {
                Value::Number(n) => match n.as_i64() {
                    Some(i) => Some(saturate(i)),
                    None => n.as_f64().map(|f| f as i32),
                },
                Value::String(s) => parse_int(s),
                _ => None,
            }
        }

        fn get_keys(&self, recursive: bool) -> Vec<String> {
            let mut out = Vec::new();
            collect_keys(self, "", recursive, &mut out);
            out
        }

        fn section(&self, path: &str) -> Option<&Self> {
            lookup(self, path)?.as_object()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn toml_doc() -> toml::Table {
        toml::from_str(
            r#"
draw = 3

[sword]
material = "IRON_SWORD"
amount = "[2;4]"
luck = 10.7

[sword.enchant]
type = "SHARPNESS"
level = 2
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_toml_scalars() {
        let doc = toml_doc();
        assert_eq!(doc.get_int("draw"), Some(3));
        assert_eq!(doc.get_string("draw").as_deref(), Some("3"));
        assert_eq!(doc.get_string("sword.amount").as_deref(), Some("[2;4]"));
        assert_eq!(doc.get_int("sword.amount"), None);
        assert_eq!(doc.get_int("sword.luck"), Some(10));
        assert_eq!(doc.get_string("sword.enchant.type").as_deref(), Some("SHARPNESS"));
        assert_eq!(doc.get_string("sword"), None);
        assert_eq!(doc.get_string("missing.path"), None);
    }

    #[test]
    fn test_int_outside_i32_saturates() {
        let doc: toml::Table = toml::from_str(
            "big = 5000000000
small = -5000000000
quoted = \"5000000000\"",
        )
        .unwrap();
        assert_eq!(doc.get_int("big"), Some(i32::MAX));
        assert_eq!(doc.get_int("small"), Some(i32::MIN));
        assert_eq!(doc.get_int("quoted"), Some(i32::MAX));

        let value = serde_json::json!({ "big": 5000000000i64, "small": -5000000000i64 });
        let doc = value.as_object().unwrap();
        assert_eq!(doc.get_int("big"), Some(i32::MAX));
        assert_eq!(doc.get_int("small"), Some(i32::MIN));
    }

    #[test]
    fn test_toml_keys_keep_source_order() {
        let doc = toml_doc();
        assert_eq!(doc.get_keys(false), vec!["draw", "sword"]);

        let enchant = doc.section("sword.enchant").unwrap();
        assert_eq!(enchant.get_keys(true), vec!["type", "level"]);

        let sword = doc.section("sword").unwrap();
        assert_eq!(
            sword.get_keys(true),
            vec![
                "material",
                "amount",
                "luck",
                "enchant",
                "enchant.type",
                "enchant.level"
            ]
        );
    }

    #[test]
    fn test_toml_section_on_scalar_is_none() {
        let doc = toml_doc();
        assert!(doc.section("draw").is_none());
        assert!(doc.section("sword.enchant.type").is_none());
        assert!(doc.contains("sword.enchant"));
        assert!(doc.contains("sword.material"));
        assert!(!doc.contains("sword.potion"));
    }

    #[test]
    fn test_json_tree() {
        let value = json!({
            "draw": 2,
            "apple": {
                "material": "APPLE",
                "amount": "5",
                "potion": {
                    "speed": { "type": "SPEED", "amplifier": 1, "duration": 200 }
                }
            }
        });
        let doc = value.as_object().unwrap();

        assert_eq!(doc.get_int("draw"), Some(2));
        assert_eq!(doc.get_int("apple.amount"), Some(5));
        assert_eq!(doc.get_string("apple.potion.speed.amplifier").as_deref(), Some("1"));
        assert_eq!(doc.get_keys(false), vec!["draw", "apple"]);

        let potion = doc.section("apple.potion").unwrap();
        assert_eq!(
            potion.get_keys(true),
            vec!["speed", "speed.type", "speed.amplifier", "speed.duration"]
        );
    }
}
