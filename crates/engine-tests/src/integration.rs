#[cfg(test)]
mod tests {
    use crate::utils::{RecordingStore, edge_ids, movie_graph, node_ids, write_movie_graph};
    use condition::Condition;
    use engine_config::settings::SettingsLoader;
    use engine_core::{
        error::EngineError,
        executor::NodeExecutor,
        service::{ExecutionMode, FilterOptions, FilterRequest, FilterService},
        store::memory::MemoryStore,
    };
    use model::{
        core::value::Value,
        graph::{EdgeDescriptor, NodeDescriptor, QueryResult},
    };
    use planner::query::IdentifierStrategy;
    use serde_json::json;
    use std::{io::Write, sync::Arc};
    use tracing_test::traced_test;

    fn memory_service() -> FilterService {
        FilterService::new(
            Arc::new(MemoryStore::new(movie_graph())),
            FilterOptions::default(),
        )
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    // Scenario: directors and films as nodes, DIRECTED as edges.
    // Expected Outcome: every DIRECTED edge survives because both endpoints matched.
    #[traced_test]
    #[tokio::test]
    async fn directors_and_their_films() {
        let request = FilterRequest {
            nodes: Some(json!({"rule": "any", "filters": [
                {"rule": "of-type", "type": "Director"},
                {"rule": "of-type", "type": "Movie"}
            ]})),
            edges: Some(json!({"rule": "of-type", "type": "DIRECTED"})),
            include_subsidiary: None,
        };

        let result = memory_service().filter_graph(&request).await.unwrap();

        assert_eq!(node_ids(&result.nodes), vec![1, 6, 3, 4, 7]);
        assert_eq!(edge_ids(&result.edges), vec![100, 101, 104]);
        assert!(logs_contain("Filtered graph: 5 node(s), 3 edge(s)"));
    }

    // Scenario: one actor as nodes, her roles as edges, subsidiary nodes requested.
    // Expected Outcome: the films she acted in appear as subsidiary stubs.
    #[traced_test]
    #[tokio::test]
    async fn roles_with_subsidiary_films() {
        let request = FilterRequest {
            nodes: Some(json!({"rule": "match-property", "property": "name", "value": "Sigourney Weaver"})),
            edges: Some(json!({"rule": "all", "filters": [
                {"rule": "of-type", "type": "ACTED_IN"},
                {"rule": "match-property", "property": "role", "value": "Ripley"}
            ]})),
            include_subsidiary: Some(true),
        };

        let result = memory_service().filter_graph(&request).await.unwrap();

        assert_eq!(
            result.nodes,
            vec![
                NodeDescriptor::new(2),
                NodeDescriptor::subsidiary(3),
                NodeDescriptor::subsidiary(7),
            ]
        );
        assert_eq!(
            result.edges,
            vec![EdgeDescriptor::new(102, 2, 3), EdgeDescriptor::new(105, 2, 7)]
        );
    }

    // Same request without subsidiary nodes: the roles dangle and are dropped.
    #[traced_test]
    #[tokio::test]
    async fn roles_without_subsidiary_films() {
        let request = FilterRequest {
            nodes: Some(json!({"rule": "match-property", "property": "name", "value": "Sigourney Weaver"})),
            edges: Some(json!({"rule": "of-type", "type": "ACTED_IN"})),
            include_subsidiary: None,
        };

        let result = memory_service().filter_graph(&request).await.unwrap();

        assert_eq!(node_ids(&result.nodes), vec![2]);
        assert!(result.edges.is_empty());
    }

    #[traced_test]
    #[tokio::test]
    async fn numeric_values_compare_across_representations() {
        let nodes = memory_service()
            .filter_nodes(&json!({"rule": "match-property", "property": "released", "value": 1979.0}))
            .await
            .unwrap();
        assert_eq!(node_ids(&nodes), vec![3]);
    }

    #[test]
    fn conjunction_never_grows() {
        let graph = movie_graph();
        let executor = NodeExecutor::new();
        let filters = vec![
            Condition::of_type("Person"),
            Condition::match_property("born", 1949),
            Condition::any([
                Condition::of_type("Director"),
                Condition::match_property("name", "Sigourney Weaver"),
            ]),
        ];

        for n in 1..=filters.len() {
            let prefix = &filters[..n];
            let combined = executor.execute(&graph.nodes, &Condition::all(prefix.to_vec()));
            let smallest = prefix
                .iter()
                .map(|f| executor.execute(&graph.nodes, f).len())
                .min()
                .unwrap();
            assert!(combined.len() <= smallest, "prefix of {n} filter(s)");
        }
    }

    #[test]
    fn disjunction_is_union_by_id() {
        let graph = movie_graph();
        let result = NodeExecutor::new().execute(
            &graph.nodes,
            &Condition::any([
                Condition::of_type("Director"),
                Condition::match_property("born", 1937),
            ]),
        );
        assert_eq!(node_ids(&result), vec![1, 6]);
    }

    // Scenario: the store supports pushdown and returns duplicates and dangling edges.
    // Expected Outcome: the store sees parameterized queries; the caller sees a
    // consolidated result.
    #[traced_test]
    #[tokio::test]
    async fn pushdown_queries_are_parameterized() {
        let store = Arc::new(RecordingStore::new(
            vec![NodeDescriptor::new(3), NodeDescriptor::new(3), NodeDescriptor::new(7)],
            vec![
                EdgeDescriptor::new(102, 2, 3),
                EdgeDescriptor::new(105, 2, 7),
                EdgeDescriptor::new(102, 2, 3),
            ],
        ));
        let service = FilterService::new(store.clone(), FilterOptions::default());

        let request = FilterRequest {
            nodes: Some(json!({"rule": "all", "filters": [
                {"rule": "of-type", "type": "Movie"},
                {"rule": "match-property", "property": "title", "value": "Alien"}
            ]})),
            edges: Some(json!({"rule": "of-type", "type": "ACTED_IN"})),
            include_subsidiary: None,
        };

        let result = service.filter_graph(&request).await.unwrap();
        assert_eq!(node_ids(&result.nodes), vec![3, 7]);
        assert!(result.edges.is_empty());

        let queries = store.queries();
        assert_eq!(queries.len(), 2);

        let node_query = &queries[0];
        assert_eq!(
            node_query.text,
            "MATCH (n) WHERE ($type IN labels(n) AND n[$title] = $title_value) RETURN n"
        );
        assert!(!node_query.text.contains("Alien"));
        assert!(!node_query.text.contains("Movie"));
        assert_eq!(node_query.parameters.get("type"), Some(&Value::from("Movie")));
        assert_eq!(node_query.parameters.get("title"), Some(&Value::from("title")));
        assert_eq!(
            node_query.parameters.get("title_value"),
            Some(&Value::from("Alien"))
        );

        assert_eq!(
            queries[1].text,
            "MATCH ()-[n]->() WHERE type(n) = $type RETURN n"
        );
        assert!(logs_contain("Recording store received node query"));
        assert!(logs_contain("Recording store received edge query"));
    }

    #[traced_test]
    #[tokio::test]
    async fn pushdown_result_closed_with_subsidiary_nodes() {
        let store = Arc::new(RecordingStore::new(
            vec![NodeDescriptor::new(3), NodeDescriptor::new(7)],
            vec![EdgeDescriptor::new(102, 2, 3), EdgeDescriptor::new(105, 2, 7)],
        ));
        let service = FilterService::new(store, FilterOptions::default());

        let request = FilterRequest {
            include_subsidiary: Some(true),
            ..FilterRequest::default()
        };
        let result = service.filter_graph(&request).await.unwrap();

        assert_eq!(
            result.nodes,
            vec![
                NodeDescriptor::new(3),
                NodeDescriptor::new(7),
                NodeDescriptor::subsidiary(2),
            ]
        );
        assert_eq!(edge_ids(&result.edges), vec![102, 105]);
    }

    // Scenario: settings file selects the inline strategy and a custom variable.
    // Expected Outcome: property names are quoted into the query, only values are bound.
    #[traced_test]
    #[tokio::test]
    async fn settings_drive_compilation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "entity_variable = \"e\"\nidentifier_strategy = \"inline\"\nexecution_mode = \"pushdown\""
        )
        .unwrap();
        let settings = SettingsLoader::new()
            .with_file(file.path())
            .with_env(no_env)
            .load()
            .unwrap();
        assert_eq!(settings.identifier_strategy, IdentifierStrategy::Inline);
        assert_eq!(settings.execution_mode, ExecutionMode::Pushdown);

        let store = Arc::new(RecordingStore::default());
        let service = FilterService::new(store.clone(), settings.filter_options());

        service
            .filter_nodes(&json!({"rule": "match-property", "property": "title", "value": "Alien"}))
            .await
            .unwrap();

        let queries = store.queries();
        assert_eq!(queries[0].text, "MATCH (e) WHERE e.`title` = $title_value RETURN e");
        assert_eq!(queries[0].parameters.len(), 1);
        assert!(logs_contain("Inline identifier strategy"));
    }

    #[traced_test]
    #[tokio::test]
    async fn unsafe_inline_identifier_never_reaches_store() {
        let store = Arc::new(RecordingStore::default());
        let options = FilterOptions {
            strategy: IdentifierStrategy::Inline,
            ..FilterOptions::default()
        };
        let service = FilterService::new(store.clone(), options);

        let err = service
            .filter_nodes(&json!({
                "rule": "match-property",
                "property": "title` = '' DETACH DELETE n //",
                "value": 1
            }))
            .await
            .unwrap_err();

        assert!(err.is_client_error());
        assert!(store.queries().is_empty());
    }

    #[traced_test]
    #[tokio::test]
    async fn invalid_nested_condition_reports_path() {
        let request = FilterRequest {
            nodes: Some(json!({"rule": "all", "filters": [
                {"rule": "of-type", "type": "Person"},
                {"rule": "match-property", "property": 5, "value": 1}
            ]})),
            ..FilterRequest::default()
        };

        let err = memory_service().filter_graph(&request).await.unwrap_err();

        match err {
            EngineError::Condition(err) => {
                assert_eq!(err.path().map(|p| p.as_str()), Some("$.filters[1]"));
                assert_eq!(err.field(), Some("property"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[traced_test]
    #[tokio::test]
    async fn shortest_path_forwards_compiled_filter() {
        let path = QueryResult::new(
            vec![NodeDescriptor::new(1), NodeDescriptor::new(3)],
            vec![EdgeDescriptor::new(100, 1, 3)],
        );
        let store = Arc::new(RecordingStore::default().with_path(path.clone()));
        let service = FilterService::new(store.clone(), FilterOptions::default());

        let result = service
            .shortest_path(1, 3, Some(4), Some(&json!({"rule": "of-type", "type": "Person"})))
            .await
            .unwrap();

        assert_eq!(result, path);
        assert!(logs_contain("Recording store received path 1 -> 3"));

        let requests = store.path_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!((requests[0].from, requests[0].to), (1, 3));
        assert_eq!(requests[0].max_hops, Some(4));
        assert_eq!(
            requests[0].node_predicate.fragment.as_deref(),
            Some("$type IN labels(n)")
        );
    }

    #[traced_test]
    #[tokio::test]
    async fn empty_disjunction_matches_everything() {
        let nodes = memory_service()
            .filter_nodes(&json!({"rule": "any", "filters": []}))
            .await
            .unwrap();

        assert_eq!(nodes.len(), 7);
        assert!(logs_contain("Empty 'any' condition matches every node"));
    }

    #[traced_test]
    #[tokio::test]
    async fn graph_loaded_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_movie_graph(dir.path());

        let store = MemoryStore::load(&path).await.unwrap();
        let service = FilterService::new(
            Arc::new(store),
            FilterOptions {
                mode: ExecutionMode::InMemory,
                ..FilterOptions::default()
            },
        );

        let nodes = service
            .filter_nodes(&json!({"rule": "match-property", "property": "rating", "value": 8.4}))
            .await
            .unwrap();
        assert_eq!(node_ids(&nodes), vec![7]);
    }
}
