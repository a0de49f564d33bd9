use multitool_core::{Category, Toolkit, ToolkitConfig};

pub const EXAMPLE_TOOLKIT_NAME: &str = "example_toolkit";

/// The example toolkit with default configuration.
pub fn example_toolkit() -> Toolkit {
    example_toolkit_with(ToolkitConfig::default())
}

/// The example toolkit with `config` applied.
///
/// Categories whose feature is disabled are skipped.
pub fn example_toolkit_with(config: ToolkitConfig) -> Toolkit {
    Toolkit::builder(EXAMPLE_TOOLKIT_NAME)
        .maybe_category(operations())
        .maybe_category(search())
        .maybe_category(response())
        .config(config)
        .build()
}

fn operations() -> Option<Category> {
    #[cfg(feature = "io")]
    {
        Some(Category::new(
            "operations",
            "Handles file system tasks like reading and editing files.",
            crate::standard::operation_tools(),
        ))
    }
    #[cfg(not(feature = "io"))]
    {
        None
    }
}

fn search() -> Option<Category> {
    #[cfg(feature = "search")]
    {
        Some(Category::new(
            "search",
            "Handles web searches and fetching content from URLs.",
            crate::standard::search_tools(),
        ))
    }
    #[cfg(not(feature = "search"))]
    {
        None
    }
}

fn response() -> Option<Category> {
    #[cfg(feature = "response")]
    {
        Some(Category::new(
            "response",
            "Handles showing the model thinking and final responses.",
            crate::standard::response_tools(),
        ))
    }
    #[cfg(not(feature = "response"))]
    {
        None
    }
}

#[cfg(all(test, feature = "io", feature = "search", feature = "response"))]
mod tests {
    use super::*;
    use multitool_core::{CallContext, ErrorCode};
    use serde_json::json;

    #[test]
    fn example_toolkit_registers_all_categories() {
        let toolkit = example_toolkit();

        assert_eq!(toolkit.name(), "example_toolkit");
        assert_eq!(
            toolkit.category_names(),
            vec!["operations", "response", "search"]
        );
        assert_eq!(
            toolkit.category("operations").unwrap().tool_names(),
            vec!["edit_file", "read_file"]
        );
        assert_eq!(
            toolkit.category("search").unwrap().tool_names(),
            vec!["fetch_url_content", "search_web"]
        );
    }

    #[test]
    fn manifest_mentions_every_tool() {
        let manifest = example_toolkit().manifest();

        for tool in [
            "edit_file",
            "read_file",
            "search_web",
            "fetch_url_content",
            "model_thinking",
            "model_response",
        ] {
            assert!(manifest.contains(&format!(r#"<child name="{}""#, tool)));
        }
    }

    #[tokio::test]
    async fn mixed_request_is_dispatched_per_slot() {
        let raw = serde_json::to_vec(&json!({
            "name": "example_toolkit",
            "parents": [
                {"name": "search", "childs": [
                    {"name": "search_web", "args": {"query": "rust"}},
                    {"name": "search_web", "args": {"query": ""}}
                ]},
                {"name": "response", "childs": [
                    {"name": "model_response", "args": {"response": "done"}}
                ]},
                {"name": "weather", "childs": []}
            ]
        }))
        .unwrap();

        let response = example_toolkit()
            .handle(&CallContext::new(), &raw)
            .await
            .unwrap();

        let search = &response.categories[0];
        assert!(search.tools[0].result.is_success());
        assert_eq!(
            search.tools[1].result.as_failure().unwrap().message,
            "query_required"
        );
        assert_eq!(
            response.categories[1].tools[0].result.as_success(),
            Some(&json!({"Success": true}))
        );
        let weather = &response.categories[2];
        assert!(
            weather.tools[0]
                .result
                .as_failure()
                .unwrap()
                .is(ErrorCode::ParentNotFound)
        );
    }
}
