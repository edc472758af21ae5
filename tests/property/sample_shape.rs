//! Property-based tests for sample shape and token numbering

use agentql_zap::query::{parse_query, FieldNode, ObjectNode, QueryNode};
use agentql_zap::sample::{generate_sample, SampleMap, SampleValue, LIST_SAMPLE_SIZE};
use proptest::prelude::*;

/// Query shape before names are made unique within each block
#[derive(Debug, Clone)]
enum Shape {
    Leaf { prefix: String, list: bool },
    Block { prefix: String, list: bool, children: Vec<Shape> },
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    let leaf = ("[a-z][a-z_]{0,5}", any::<bool>())
        .prop_map(|(prefix, list)| Shape::Leaf { prefix, list });
    leaf.prop_recursive(4, 48, 5, |inner| {
        ("[a-z][a-z_]{0,5}", any::<bool>(), prop::collection::vec(inner, 1..5)).prop_map(
            |(prefix, list, children)| Shape::Block {
                prefix,
                list,
                children,
            },
        )
    })
}

fn root_strategy() -> impl Strategy<Value = ObjectNode> {
    prop::collection::vec(shape_strategy(), 1..6).prop_map(|shapes| ObjectNode::root(build(&shapes)))
}

fn build(shapes: &[Shape]) -> Vec<QueryNode> {
    shapes
        .iter()
        .enumerate()
        .map(|(i, shape)| match shape {
            Shape::Leaf { prefix, list } => {
                let field = FieldNode::new(format!("{}{}", prefix, i));
                if *list {
                    QueryNode::FieldList(field)
                } else {
                    QueryNode::Field(field)
                }
            }
            Shape::Block {
                prefix,
                list,
                children,
            } => {
                let object = ObjectNode::new(format!("{}{}", prefix, i), build(children));
                if *list {
                    QueryNode::ObjectList(object)
                } else {
                    QueryNode::Object(object)
                }
            }
        })
        .collect()
}

/// Render a tree back into query text
fn render(node: &ObjectNode) -> String {
    let body: Vec<String> = node.children.iter().map(render_field).collect();
    format!("{{ {} }}", body.join(" "))
}

fn render_field(node: &QueryNode) -> String {
    match node {
        QueryNode::Field(f) => f.name.clone(),
        QueryNode::FieldList(f) => format!("{}[]", f.name),
        QueryNode::Object(o) => format!("{} {}", o.name, render(o)),
        QueryNode::ObjectList(o) => format!("{}[] {}", o.name, render(o)),
    }
}

fn expected_token_count(node: &ObjectNode) -> usize {
    node.children
        .iter()
        .map(|child| match child {
            QueryNode::Field(_) => 1,
            QueryNode::FieldList(_) => LIST_SAMPLE_SIZE,
            QueryNode::Object(o) => expected_token_count(o),
            QueryNode::ObjectList(o) => LIST_SAMPLE_SIZE * expected_token_count(o),
        })
        .sum()
}

/// Keys follow children order, lists hold LIST_SAMPLE_SIZE items, objects nest
fn assert_mirrors(node: &ObjectNode, map: &SampleMap) {
    let names: Vec<&str> = node.children.iter().map(|c| c.name()).collect();
    let keys: Vec<&str> = map.keys().collect();
    assert_eq!(keys, names);

    for child in &node.children {
        let value = map.get(child.name()).unwrap();
        match child {
            QueryNode::Field(_) => assert!(value.as_token().is_some()),
            QueryNode::FieldList(_) => {
                let items = value.as_list().unwrap();
                assert_eq!(items.len(), LIST_SAMPLE_SIZE);
                assert!(items.iter().all(|i| i.as_token().is_some()));
            }
            QueryNode::Object(o) => assert_mirrors(o, value.as_object().unwrap()),
            QueryNode::ObjectList(o) => {
                let items = value.as_list().unwrap();
                assert_eq!(items.len(), LIST_SAMPLE_SIZE);
                for item in items {
                    assert_mirrors(o, item.as_object().unwrap());
                }
            }
        }
    }
}

#[test]
fn test_sample_mirrors_query_shape() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&root_strategy(), |root| {
            assert_mirrors(&root, &generate_sample(&root));
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_counters_follow_traversal_order() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&root_strategy(), |root| {
            let value = SampleValue::Object(generate_sample(&root));
            let tokens = value.tokens();
            prop_assert_eq!(tokens.len(), expected_token_count(&root));

            // Counter values run 0, 1, 2, ... in depth-first order, so every token is unique
            for (i, token) in tokens.iter().enumerate() {
                let (name, counter) = token.rsplit_once('_').unwrap();
                prop_assert!(!name.is_empty());
                prop_assert_eq!(counter.parse::<usize>().unwrap(), i);
            }
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_generation_is_repeatable() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&root_strategy(), |root| {
            prop_assert_eq!(generate_sample(&root), generate_sample(&root));
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_rendered_query_parses_back() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&root_strategy(), |root| {
            let parsed = parse_query(&render(&root)).unwrap();
            prop_assert_eq!(parsed, root);
            Ok(())
        })
        .unwrap();
}
