//! Route labels for spans and metrics.

use uuid::Uuid;

/// Path with identifiers and free-text segments collapsed, so every
/// product or category shares one label.
pub(super) fn route_label(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut label = String::from("/");
    let mut previous = "";

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            label.push('/');
        }

        if Uuid::parse_str(segment).is_ok() {
            label.push_str("{uuid}");
        } else if previous == "keyword" {
            label.push_str("{keyword}");
        } else {
            label.push_str(segment);
        }

        previous = segment;
    }

    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuids_are_collapsed() {
        let uuid = Uuid::now_v7();

        assert_eq!(
            route_label(&format!("/api/public/categories/{uuid}/products")),
            "/api/public/categories/{uuid}/products"
        );
    }

    #[test]
    fn search_keywords_are_collapsed() {
        assert_eq!(
            route_label("/api/public/products/keyword/phone"),
            "/api/public/products/keyword/{keyword}"
        );
    }

    #[test]
    fn static_paths_are_unchanged() {
        assert_eq!(route_label("/"), "/");
        assert_eq!(route_label("/healthcheck"), "/healthcheck");
    }
}
