#[cfg(test)]
mod tests {
    use crate::api::{DataSource, WidgetSize, WidgetType};
    use crate::io::loaders::{LayoutLoader, LayoutSourceType, SnapshotLoader};
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;

    /// Helper to create a temp JSON file
    fn create_temp_json_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_snapshot_from_file() {
        let file = create_temp_json_file(
            r#"{
                "productionOrders": [
                    { "id": 1, "status": "released" },
                    { "id": 2, "status": "closed" }
                ],
                "metrics": { "oee": 78.2 }
            }"#,
        );

        let data = SnapshotLoader::load_from_file(file.path()).unwrap();
        assert_eq!(data.collection(&DataSource::ProductionOrders).unwrap().len(), 2);
        assert_eq!(data.metrics.unwrap()["oee"], 78.2);
    }

    #[test]
    fn test_snapshot_error_names_the_field() {
        let err = SnapshotLoader::load_from_str(r#"{ "operations": { "not": "an array" } }"#)
            .unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("operations"), "{}", message);
    }

    #[test]
    fn test_missing_snapshot_file() {
        let err = SnapshotLoader::load_from_file(Path::new("/nonexistent/snapshot.json"))
            .unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read"));
    }

    #[test]
    fn test_load_universal_layout() {
        let file = create_temp_json_file(
            r#"[
                { "id": "a", "type": "kpi", "title": "Orders", "dataSource": "productionOrders" },
                { "id": "b", "type": "chart", "title": "Ops", "dataSource": "operations", "groupBy": "status" }
            ]"#,
        );

        let result = LayoutLoader::load_from_file(file.path()).unwrap();
        assert_eq!(result.source_type, LayoutSourceType::Universal);
        assert_eq!(result.widgets.len(), 2);
        assert_eq!(result.widgets[1].group_by.as_deref(), Some("status"));
    }

    #[test]
    fn test_load_wrapped_layout() {
        let result = LayoutLoader::load_from_str(
            r#"{ "widgets": [ { "id": "a", "type": "text", "dataSource": "users" } ] }"#,
        )
        .unwrap();
        assert_eq!(result.widgets[0].widget_type, WidgetType::Text);
        assert_eq!(result.widgets[0].title, "");
    }

    #[test]
    fn test_load_cockpit_layout() {
        let result = LayoutLoader::load_from_str(
            r#"[
                {
                    "id": 7,
                    "layout_id": 2,
                    "type": "alerts",
                    "title": "Alerts",
                    "position": { "x": 0, "y": 1 },
                    "configuration": { "dataSource": "alerts", "limit": 5 },
                    "is_visible": true
                }
            ]"#,
        )
        .unwrap();

        assert_eq!(result.source_type, LayoutSourceType::Cockpit);
        let widget = &result.widgets[0];
        assert_eq!(widget.id, "7");
        assert_eq!(widget.widget_type, WidgetType::Alert);
        assert_eq!(widget.data_source, DataSource::Alerts);
        assert_eq!(widget.limit, Some(5));
        assert_eq!(widget.size, Some(WidgetSize::new(400, 300)));
    }

    #[test]
    fn test_load_canvas_layout() {
        let result = LayoutLoader::load_from_str(
            r#"[
                {
                    "id": 3,
                    "title": "Gauge",
                    "type": "gauge",
                    "config": { "dataSource": "resources", "groupBy": "utilization" },
                    "position": { "x": 10, "y": 20 },
                    "size": { "width": 250, "height": 250 },
                    "isVisible": true,
                    "createdByMax": false
                }
            ]"#,
        )
        .unwrap();

        assert_eq!(result.source_type, LayoutSourceType::Canvas);
        assert_eq!(result.widgets[0].size, Some(WidgetSize::new(250, 250)));
        assert_eq!(result.widgets[0].widget_type, WidgetType::Gauge);
    }

    #[test]
    fn test_layout_must_be_array_or_object() {
        assert!(LayoutLoader::load_from_str("42").is_err());
        assert!(LayoutLoader::load_from_str(r#"{ "tiles": [] }"#).is_err());
    }

    #[test]
    fn test_empty_layout() {
        let result = LayoutLoader::load_from_str("[]").unwrap();
        assert!(result.widgets.is_empty());
        assert_eq!(result.source_type, LayoutSourceType::Universal);
    }
}
