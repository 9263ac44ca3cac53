use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Layout of the dump. Map keys are always printed in sorted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Spaces per nesting level.
    pub indent: usize,
    /// Containers nested deeper than this are elided. `None` means no limit.
    pub max_depth: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent: 2,
            max_depth: Some(4),
        }
    }
}

/// Renders `value` as an indented, key-sorted dump.
pub fn dump<T: Serialize + ?Sized>(value: &T, config: &Config) -> Result<String, serde_json::Error> {
    let value = serde_json::to_value(value)?;
    Ok(Dump {
        value: &value,
        config,
        depth: 0,
    }
    .to_string())
}

struct Dump<'a> {
    value: &'a Value,
    config: &'a Config,
    depth: usize,
}

impl Dump<'_> {
    fn child<'a>(&'a self, value: &'a Value) -> Dump<'a> {
        Dump {
            value,
            config: self.config,
            depth: self.depth + 1,
        }
    }

    fn pad(&self, f: &mut fmt::Formatter, depth: usize) -> fmt::Result {
        write!(f, "{:width$}", "", width = depth * self.config.indent)
    }

    fn too_deep(&self) -> bool {
        self.config.max_depth.is_some_and(|max| self.depth >= max)
    }
}

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.value {
            Value::Array(items) if items.is_empty() => f.write_str("[]"),
            Value::Object(map) if map.is_empty() => f.write_str("{}"),
            Value::Array(_) | Value::Object(_) if self.too_deep() => {
                f.write_str("<max depth reached>")
            }
            Value::Array(items) => {
                f.write_str("[\n")?;
                for item in items {
                    self.pad(f, self.depth + 1)?;
                    writeln!(f, "{},", self.child(item))?;
                }
                self.pad(f, self.depth)?;
                f.write_str("]")
            }
            // serde_json::Map keeps its keys sorted
            Value::Object(map) => {
                f.write_str("{\n")?;
                for (key, item) in map {
                    self.pad(f, self.depth + 1)?;
                    writeln!(f, "{key}: {},", self.child(item))?;
                }
                self.pad(f, self.depth)?;
                f.write_str("}")
            }
            // strings come out quoted and escaped
            scalar => write!(f, "{scalar}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn keys_are_sorted() {
        let value = json!({"zmm": 1, "bnd": "a\"b", "k": null, "r8": true});
        let out = dump(&value, &Config::default()).unwrap();
        assert_eq!(
            out,
            "{\n  bnd: \"a\\\"b\",\n  k: null,\n  r8: true,\n  zmm: 1,\n}"
        );
    }

    #[test]
    fn nested_containers_are_indented() {
        let value = json!({"names": ["al", "cl"], "any": {}, "empty": []});
        let config = Config {
            indent: 4,
            max_depth: None,
        };
        assert_eq!(
            dump(&value, &config).unwrap(),
            "{\n    any: {},\n    empty: [],\n    names: [\n        \"al\",\n        \"cl\",\n    ],\n}"
        );
    }

    #[test]
    fn deep_containers_are_elided() {
        let value = json!([[["deep"]], "flat"]);
        let config = Config {
            indent: 1,
            max_depth: Some(1),
        };
        assert_eq!(
            dump(&value, &config).unwrap(),
            "[\n <max depth reached>,\n \"flat\",\n]"
        );
    }

    #[test]
    fn scalars_print_bare() {
        assert_eq!(dump("mov", &Config::default()).unwrap(), "\"mov\"");
        assert_eq!(dump(&7u8, &Config::default()).unwrap(), "7");
    }
}
