//! Sample generation over parsed queries

use agentql_zap::query::parse_query;
use agentql_zap::sample::{generate_sample, SampleGenerator, SampleValue, LIST_SAMPLE_SIZE};
use std::collections::HashSet;

use crate::integration::test_utils::{fixture_path, token, token_counter};

#[test]
fn test_simple_fields() {
    let root = parse_query(
        r#"
    {
      search_btn
      search_text
    }
    "#,
    )
    .unwrap();
    let result = generate_sample(&root);

    assert_eq!(token(result.get("search_btn").unwrap()), "search_btn_0");
    assert_eq!(token(result.get("search_text").unwrap()), "search_text_1");
}

#[test]
fn test_context_description_on_list() {
    let root = parse_query("{ id_list(context)[] }").unwrap();
    let result = generate_sample(&root);

    let list = result.get("id_list").unwrap().as_list().unwrap();
    assert_eq!(list.len(), LIST_SAMPLE_SIZE);
    for item in list {
        token_counter(token(item), "id_list");
    }
}

#[test]
fn test_container_list_counters_strictly_increase() {
    let root = parse_query(
        r#"
    {
      container_list[] {
        child_id_1
        child_id_2
      }
    }
    "#,
    )
    .unwrap();
    let result = generate_sample(&root);

    let containers = result.get("container_list").unwrap().as_list().unwrap();
    assert_eq!(containers.len(), 3);

    let mut last = None;
    for container in containers {
        let container = container.as_object().unwrap();
        let first = token_counter(token(container.get("child_id_1").unwrap()), "child_id_1");
        let second = token_counter(token(container.get("child_id_2").unwrap()), "child_id_2");
        assert_eq!(second, first + 1);
        if let Some(previous) = last {
            assert!(first > previous);
        }
        last = Some(second);
    }
}

#[test]
fn test_nested_lists_from_fixture() {
    let source = std::fs::read_to_string(fixture_path("drinks.agentql")).unwrap();
    let root = parse_query(&source).unwrap();
    let result = generate_sample(&root);

    let categories = result.get("drink_category").unwrap().as_list().unwrap();
    assert_eq!(categories.len(), 3);
    for category in categories {
        let category = category.as_object().unwrap();
        token_counter(token(category.get("category_name").unwrap()), "category_name");
        let drinks = category.get("drink").unwrap().as_list().unwrap();
        assert_eq!(drinks.len(), 3);
        for drink in drinks {
            let drink = drink.as_object().unwrap();
            token_counter(token(drink.get("drink_name").unwrap()), "drink_name");
            token_counter(token(drink.get("price").unwrap()), "price");
        }
    }

    // 3 categories x (1 name + 3 drinks x 2 fields)
    let all = SampleValue::Object(result).tokens().len();
    assert_eq!(all, 3 * (1 + 3 * 2));
}

#[test]
fn test_tokens_unique_across_one_run() {
    let root = parse_query("{ items[] { id name } nested { tags[] } id }").unwrap();
    let value = SampleValue::Object(generate_sample(&root));
    let tokens = value.tokens();
    let unique: HashSet<_> = tokens.iter().collect();
    assert_eq!(unique.len(), tokens.len());
    assert_eq!(tokens.last().copied(), Some("id_9"));
}

#[test]
fn test_shared_generator_continues_across_queries() {
    let first = parse_query("{ a b }").unwrap();
    let second = parse_query("{ c[] }").unwrap();
    let mut generator = SampleGenerator::new();

    generator.generate(&first);
    let result = generator.generate(&second);
    let tokens: Vec<_> = result
        .get("c")
        .unwrap()
        .as_list()
        .unwrap()
        .iter()
        .map(|t| token(t).to_string())
        .collect();
    assert_eq!(tokens, vec!["c_2", "c_3", "c_4"]);
}

#[test]
fn test_sample_serializes_in_query_order() {
    let root = parse_query("{ zulu yankee[] { x } alpha }").unwrap();
    let json = serde_json::to_string(&generate_sample(&root)).unwrap();
    assert_eq!(
        json,
        r#"{"zulu":"zulu_0","yankee":[{"x":"x_1"},{"x":"x_2"},{"x":"x_3"}],"alpha":"alpha_4"}"#
    );
}
