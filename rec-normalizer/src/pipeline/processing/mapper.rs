use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Named conversion applied to a mapped value.
///
/// Unrecognized transform names deserialize to `Passthrough` so a stale
/// provider config degrades to the untransformed value instead of failing
/// the whole load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Uppercase,
    Lowercase,
    Trim,
    ParseFloat,
    ParseInt,
    Passthrough,
    Custom(fn(&Value) -> Value),
}

impl Transform {
    pub fn from_name(name: &str) -> Self {
        match name {
            "uppercase" => Transform::Uppercase,
            "lowercase" => Transform::Lowercase,
            "trim" => Transform::Trim,
            "parseFloat" => Transform::ParseFloat,
            "parseInt" => Transform::ParseInt,
            other => {
                debug!("Unrecognized transform '{}', passing value through", other);
                Transform::Passthrough
            }
        }
    }

    pub fn apply(&self, value: Value) -> Value {
        match self {
            Transform::Uppercase => match value {
                Value::String(s) => Value::String(s.to_uppercase()),
                other => other,
            },
            Transform::Lowercase => match value {
                Value::String(s) => Value::String(s.to_lowercase()),
                other => other,
            },
            Transform::Trim => match value {
                Value::String(s) => Value::String(s.trim().to_string()),
                other => other,
            },
            Transform::ParseFloat => match &value {
                Value::String(s) => match s.trim().parse::<f64>() {
                    Ok(f) => serde_json::Number::from_f64(f)
                        .map(Value::Number)
                        .unwrap_or(Value::Null),
                    Err(_) => Value::Null,
                },
                Value::Number(_) => value,
                _ => Value::Null,
            },
            Transform::ParseInt => match &value {
                Value::String(s) => match s.trim().parse::<i64>() {
                    Ok(i) => Value::Number(i.into()),
                    Err(_) => Value::Null,
                },
                Value::Number(_) => value,
                _ => Value::Null,
            },
            Transform::Passthrough => value,
            Transform::Custom(f) => f(&value),
        }
    }
}

impl<'de> Deserialize<'de> for Transform {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Transform::from_name(&name))
    }
}

/// Declarative rule extracting one canonical field from a raw record:
/// either a bare dot-separated path, or a path plus a named transform.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldMapping {
    Path(String),
    WithTransform { path: String, transform: Transform },
}

impl FieldMapping {
    pub fn path(&self) -> &str {
        match self {
            FieldMapping::Path(p) => p,
            FieldMapping::WithTransform { path, .. } => path,
        }
    }
}

// Config form is either "a.b.c" or {"path": "a.b.c", "transform": "trim"}.
impl<'de> Deserialize<'de> for FieldMapping {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MappingVisitor;

        impl<'de> Visitor<'de> for MappingVisitor {
            type Value = FieldMapping;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a path string or a {path, transform} object")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<FieldMapping, E> {
                Ok(FieldMapping::Path(v.to_string()))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<FieldMapping, A::Error> {
                let mut path: Option<String> = None;
                let mut transform: Option<Transform> = None;
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "path" => path = Some(map.next_value()?),
                        "transform" => transform = Some(map.next_value()?),
                        _ => {
                            let _: de::IgnoredAny = map.next_value()?;
                        }
                    }
                }
                let path = path.ok_or_else(|| de::Error::missing_field("path"))?;
                Ok(match transform {
                    Some(transform) => FieldMapping::WithTransform { path, transform },
                    None => FieldMapping::Path(path),
                })
            }
        }

        deserializer.deserialize_any(MappingVisitor)
    }
}

/// Per-provider mapping of canonical field name -> extraction rule.
pub type FieldMappingConfig = HashMap<String, FieldMapping>;

/// Resolve a field mapping against a raw record.
///
/// Walks the dot-separated path through nested objects (and arrays, when a
/// segment is a numeric index), returning `None` the moment a segment is
/// absent or the container is not traversable. Never panics on malformed
/// input.
pub fn map_field(raw: &Value, mapping: &FieldMapping) -> Option<Value> {
    let resolved = walk_path(raw, mapping.path())?;
    if resolved.is_null() {
        return None;
    }
    let value = match mapping {
        FieldMapping::Path(_) => resolved.clone(),
        FieldMapping::WithTransform { transform, .. } => transform.apply(resolved.clone()),
    };
    if value.is_null() {
        None
    } else {
        Some(value)
    }
}

fn walk_path<'a>(raw: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = raw;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => {
                let index: usize = segment.parse().ok()?;
                items.get(index)?
            }
            _ => return None,
        };
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_field_simple_path() {
        let raw = json!({"name": "Swim Lessons"});
        let mapping = FieldMapping::Path("name".to_string());
        assert_eq!(map_field(&raw, &mapping), Some(json!("Swim Lessons")));
    }

    #[test]
    fn test_map_field_nested_path() {
        let raw = json!({"schedule": {"start": {"date": "2024-09-15"}}});
        let mapping = FieldMapping::Path("schedule.start.date".to_string());
        assert_eq!(map_field(&raw, &mapping), Some(json!("2024-09-15")));
    }

    #[test]
    fn test_map_field_array_index() {
        let raw = json!({"sessions": [{"time": "9:00 am"}, {"time": "1:00 pm"}]});
        let mapping = FieldMapping::Path("sessions.1.time".to_string());
        assert_eq!(map_field(&raw, &mapping), Some(json!("1:00 pm")));
    }

    #[test]
    fn test_map_field_missing_segment_returns_none() {
        let raw = json!({"schedule": {"start": "2024-09-15"}});
        let mapping = FieldMapping::Path("schedule.end.date".to_string());
        assert_eq!(map_field(&raw, &mapping), None);
    }

    #[test]
    fn test_map_field_non_traversable_returns_none() {
        let raw = json!({"name": "Swim"});
        let mapping = FieldMapping::Path("name.first".to_string());
        assert_eq!(map_field(&raw, &mapping), None);
    }

    #[test]
    fn test_transforms_apply() {
        let raw = json!({"code": "  ab-12  ", "cost": "75.5", "spots": "8"});
        let trim = FieldMapping::WithTransform {
            path: "code".to_string(),
            transform: Transform::Trim,
        };
        assert_eq!(map_field(&raw, &trim), Some(json!("ab-12")));

        let upper = FieldMapping::WithTransform {
            path: "code".to_string(),
            transform: Transform::Uppercase,
        };
        assert_eq!(map_field(&raw, &upper), Some(json!("  AB-12  ")));

        let float = FieldMapping::WithTransform {
            path: "cost".to_string(),
            transform: Transform::ParseFloat,
        };
        assert_eq!(map_field(&raw, &float), Some(json!(75.5)));

        let int = FieldMapping::WithTransform {
            path: "spots".to_string(),
            transform: Transform::ParseInt,
        };
        assert_eq!(map_field(&raw, &int), Some(json!(8)));
    }

    #[test]
    fn test_unparseable_numeric_transform_yields_none() {
        let raw = json!({"cost": "call for pricing"});
        let mapping = FieldMapping::WithTransform {
            path: "cost".to_string(),
            transform: Transform::ParseFloat,
        };
        assert_eq!(map_field(&raw, &mapping), None);
    }

    #[test]
    fn test_custom_transform() {
        let raw = json!({"name": "swim"});
        let mapping = FieldMapping::WithTransform {
            path: "name".to_string(),
            transform: Transform::Custom(|v| {
                Value::String(format!("{}!", v.as_str().unwrap_or_default()))
            }),
        };
        assert_eq!(map_field(&raw, &mapping), Some(json!("swim!")));
    }

    #[test]
    fn test_deserialize_both_config_forms() {
        let config: FieldMappingConfig = serde_json::from_value(json!({
            "name": "activity_name",
            "cost": {"path": "pricing.amount", "transform": "parseFloat"},
            "category": {"path": "cat", "transform": "no-such-transform"}
        }))
        .unwrap();

        assert_eq!(
            config.get("name"),
            Some(&FieldMapping::Path("activity_name".to_string()))
        );
        assert_eq!(
            config.get("cost"),
            Some(&FieldMapping::WithTransform {
                path: "pricing.amount".to_string(),
                transform: Transform::ParseFloat,
            })
        );
        // Unknown transform names degrade to passthrough, never an error.
        assert_eq!(
            config.get("category"),
            Some(&FieldMapping::WithTransform {
                path: "cat".to_string(),
                transform: Transform::Passthrough,
            })
        );
    }
}
