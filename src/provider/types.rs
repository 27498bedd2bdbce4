use serde::Deserialize;

/// Standard Azure DevOps list envelope: `{ "count": n, "value": [...] }`
#[derive(Debug, Deserialize)]
pub(crate) struct ListEnvelope<T> {
    #[allow(dead_code)]
    #[serde(default)]
    pub count: Option<u64>,
    pub value: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectRef {
    pub id: String,
    pub name: String,
}

impl ProjectRef {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub web_url: String,
    #[serde(default)]
    pub is_disabled: bool,
}

impl RepositoryRef {
    pub fn new(id: &str, name: &str, web_url: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            web_url: web_url.to_string(),
            is_disabled: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GitObjectType {
    Blob,
    Tree,
    /// Submodule pointer
    Commit,
    Tag,
    #[default]
    #[serde(other)]
    Unknown,
}

/// One entry of a recursive item listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemEntry {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub git_object_type: GitObjectType,
}

impl ItemEntry {
    pub fn blob(path: &str, size: u64) -> Self {
        Self {
            path: path.to_string(),
            size,
            git_object_type: GitObjectType::Blob,
        }
    }

    pub fn tree(path: &str) -> Self {
        Self {
            path: path.to_string(),
            size: 0,
            git_object_type: GitObjectType::Tree,
        }
    }

    /// Files are blobs; folders and submodules are not.
    #[inline]
    pub fn is_blob(&self) -> bool {
        self.git_object_type == GitObjectType::Blob
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_repositories_envelope() {
        let json = r#"{
            "count": 2,
            "value": [
                {"id": "r1", "name": "web", "webUrl": "https://dev.azure.com/org/Apps/_git/web"},
                {"id": "r2", "name": "old", "isDisabled": true}
            ]
        }"#;
        let envelope: ListEnvelope<RepositoryRef> = serde_json::from_str(json).unwrap();

        assert_eq!(envelope.value.len(), 2);
        assert_eq!(envelope.value[0].web_url, "https://dev.azure.com/org/Apps/_git/web");
        assert!(!envelope.value[0].is_disabled);
        assert_eq!(envelope.value[1].web_url, "");
        assert!(envelope.value[1].is_disabled);
    }

    #[test]
    fn test_decode_items() {
        let json = r#"{
            "count": 4,
            "value": [
                {"objectId": "a", "gitObjectType": "tree", "path": "/", "isFolder": true},
                {"objectId": "b", "gitObjectType": "blob", "path": "/video.mp4", "size": 157286400},
                {"objectId": "c", "gitObjectType": "commit", "path": "/vendor/lib"},
                {"objectId": "d", "gitObjectType": "blob", "path": "/empty.txt"}
            ]
        }"#;
        let envelope: ListEnvelope<ItemEntry> = serde_json::from_str(json).unwrap();
        let items = envelope.value;

        assert!(!items[0].is_blob());
        assert!(items[1].is_blob());
        assert_eq!(items[1].size, 157286400);
        assert_eq!(items[2].git_object_type, GitObjectType::Commit);
        assert_eq!(items[3].size, 0);
    }

    #[test]
    fn test_unknown_object_type() {
        let item: ItemEntry =
            serde_json::from_str(r#"{"path": "/x", "gitObjectType": "weird"}"#).unwrap();
        assert_eq!(item.git_object_type, GitObjectType::Unknown);
        assert!(!item.is_blob());
    }
}
