//! The JSON body of an action request.

use std::collections::BTreeSet;

use serde::Serialize;
use wt_core::{Event, ProjectContext};

/// Action request body.
///
/// Optional fields are left out of the JSON entirely when absent or false,
/// never sent as `null` or an empty list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionPayload {
    pub time: f64,
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endtime: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_write: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
}

impl ActionPayload {
    pub fn new(event: &Event, context: &ProjectContext) -> Self {
        Self {
            time: event.timestamp,
            file: event.target_file.to_string_lossy().into_owned(),
            endtime: event.endtime.clone().filter(|end| !end.is_empty()),
            is_write: event.is_write,
            project: context.name.clone().filter(|name| !name.is_empty()),
            tags: context.tags.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> Event {
        Event::new("/home/user/tracker/src/main.rs").at(1_700_000_000.5)
    }

    #[test]
    fn test_minimal_payload_has_only_time_and_file() {
        let payload = ActionPayload::new(&event(), &ProjectContext::empty());
        let value = serde_json::to_value(&payload).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["file", "time"]);
    }

    #[test]
    fn test_empty_values_are_omitted_not_null() {
        let mut event = event();
        event.endtime = Some(String::new());
        let context = ProjectContext::empty().with_name("");

        let json = serde_json::to_string(&ActionPayload::new(&event, &context)).unwrap();

        assert!(!json.contains("endtime"));
        assert!(!json.contains("project"));
        assert!(!json.contains("is_write"));
        assert!(!json.contains("tags"));
        assert!(!json.contains("null"));
    }

    #[test]
    fn test_duplicate_tags_are_sent_once() {
        let context = ["branch:main", "branch:main", "foo"]
            .into_iter()
            .fold(ProjectContext::empty(), ProjectContext::with_tag);

        let value = serde_json::to_value(ActionPayload::new(&event(), &context)).unwrap();

        assert_eq!(value["tags"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_full_payload_serialization() {
        let mut event = event();
        event.endtime = Some("1700000100".to_string());
        event.is_write = true;
        let context = ProjectContext::empty()
            .with_name("tracker")
            .with_tag("foo")
            .with_tag("branch:main");

        let json = serde_json::to_string_pretty(&ActionPayload::new(&event, &context)).unwrap();

        insta::assert_snapshot!(json, @r#"
        {
          "time": 1700000000.5,
          "file": "/home/user/tracker/src/main.rs",
          "endtime": "1700000100",
          "is_write": true,
          "project": "tracker",
          "tags": [
            "branch:main",
            "foo"
          ]
        }
        "#);
    }
}
