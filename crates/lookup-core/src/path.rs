//! Dotted field paths into JSON payloads.
//!
//! `data.image` names a nested field; `posts[].thumbnail_url` fans out over
//! every item of the `posts` array.

use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Each(String),
}

/// A located field inside a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    pub fn parse(path: &str) -> Self {
        let segments = path
            .split('.')
            .map(|part| match part.strip_suffix("[]") {
                Some(key) => Segment::Each(key.to_string()),
                None => Segment::Key(part.to_string()),
            })
            .collect();
        Self { segments }
    }

    /// Resolve a path made of plain keys. Fan-out segments never match.
    pub fn get<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(value, |current, segment| match segment {
                Segment::Key(key) => current.get(key.as_str()),
                Segment::Each(_) => None,
            })
    }

    /// Every slot the path reaches, in document order.
    pub fn slots_mut<'a>(&self, value: &'a mut Value) -> Vec<&'a mut Value> {
        let mut out = Vec::new();
        collect_slots(&self.segments, value, &mut out);
        out
    }

    /// Remove every field the path reaches.
    pub fn remove(&self, value: &mut Value) {
        let Some((last, parents)) = self.segments.split_last() else {
            return;
        };

        let mut containers = Vec::new();
        collect_slots(parents, value, &mut containers);

        let (Segment::Key(key) | Segment::Each(key)) = last;
        for container in containers {
            if let Some(object) = container.as_object_mut() {
                object.remove(key);
            }
        }
    }
}

fn collect_slots<'a>(segments: &[Segment], value: &'a mut Value, out: &mut Vec<&'a mut Value>) {
    let Some((head, rest)) = segments.split_first() else {
        out.push(value);
        return;
    };

    match head {
        Segment::Key(key) => {
            if let Some(child) = value.get_mut(key.as_str()) {
                collect_slots(rest, child, out);
            }
        }
        Segment::Each(key) => {
            if let Some(Value::Array(items)) = value.get_mut(key.as_str()) {
                for item in items.iter_mut() {
                    collect_slots(rest, item, out);
                }
            }
        }
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match segment {
                Segment::Key(key) => f.write_str(key)?,
                Segment::Each(key) => write!(f, "{}[]", key)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_nested() {
        let value = json!({"data": {"image": "http://x/a.jpg"}});
        assert_eq!(
            FieldPath::parse("data.image").get(&value),
            Some(&json!("http://x/a.jpg"))
        );
        assert_eq!(FieldPath::parse("data.name").get(&value), None);
        assert_eq!(FieldPath::parse("message").get(&json!("text")), None);
    }

    #[test]
    fn test_slots_fan_out_in_order() {
        let mut value = json!({
            "posts": [
                {"thumbnail_url": "a"},
                {"caption": "no thumbnail"},
                {"thumbnail_url": "c"}
            ]
        });
        let path = FieldPath::parse("posts[].thumbnail_url");
        let slots = path.slots_mut(&mut value);
        let seen: Vec<_> = slots.iter().map(|v| v.as_str().unwrap().to_string()).collect();
        assert_eq!(seen, vec!["a", "c"]);
    }

    #[test]
    fn test_slots_when_list_missing() {
        let mut value = json!({"posts": null});
        assert!(FieldPath::parse("posts[].thumbnail_url")
            .slots_mut(&mut value)
            .is_empty());
    }

    #[test]
    fn test_remove_leaves_siblings() {
        let mut value = json!({"name": "A", "credit": "x", "developer": "y"});
        FieldPath::parse("credit").remove(&mut value);
        FieldPath::parse("developer").remove(&mut value);
        assert_eq!(value, json!({"name": "A"}));
    }

    #[test]
    fn test_display_round_trips_text() {
        assert_eq!(
            FieldPath::parse("posts[].thumbnail_url").to_string(),
            "posts[].thumbnail_url"
        );
    }
}
