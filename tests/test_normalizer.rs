use mockito::Server;
use recipe_harvest::providers::{LlmProvider, OpenAIProvider};
use recipe_harvest::{
    Field, FieldValue, InferenceError, IngredientNormalizer, NormalizeError, RecipeFields,
    RecipeStore,
};
use std::cell::Cell;
use std::collections::HashMap;

/// Replies from a fixed table and counts how often it was asked
struct ScriptedProvider {
    replies: HashMap<&'static str, &'static str>,
    calls: Cell<usize>,
}

impl ScriptedProvider {
    fn new(replies: &[(&'static str, &'static str)]) -> Self {
        ScriptedProvider {
            replies: replies.iter().copied().collect(),
            calls: Cell::new(0),
        }
    }
}

impl LlmProvider for ScriptedProvider {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn categorize(&self, ingredient: &str) -> Result<String, InferenceError> {
        self.calls.set(self.calls.get() + 1);
        self.replies
            .get(ingredient)
            .map(|reply| reply.to_string())
            .ok_or_else(|| InferenceError::Api(format!("no reply for {ingredient}")))
    }
}

fn store_with(ingredients: &[&str]) -> (RecipeStore, i64) {
    let mut fields = RecipeFields::new();
    fields.insert(Field::Title, FieldValue::Text("Pancakes".into()));
    fields.insert(
        Field::Ingredients,
        FieldValue::List(ingredients.iter().map(|s| s.to_string()).collect()),
    );
    let mut store = RecipeStore::open_in_memory().unwrap();
    let id = store.save_recipe(&fields).unwrap();
    (store, id)
}

#[test]
fn test_second_run_is_a_no_op() {
    let provider = ScriptedProvider::new(&[
        (
            "1 cup flour",
            r#"{"ingredients": [{"quantity": 125.0, "ingredient": "flour"}]}"#,
        ),
        (
            "salt and pepper to taste",
            r#"{"ingredients": [
                {"quantity": null, "ingredient": "salt"},
                {"quantity": null, "ingredient": "pepper"}
            ]}"#,
        ),
    ]);
    let (mut store, recipe_id) = store_with(&["1 cup flour", "salt and pepper to taste"]);

    let first = IngredientNormalizer::new(&provider, &mut store).run().unwrap();
    assert_eq!(first.entries, 2);
    assert_eq!(first.clean_rows, 3);
    assert_eq!(provider.calls.get(), 2);

    let second = IngredientNormalizer::new(&provider, &mut store).run().unwrap();
    assert_eq!(second.entries, 0);
    assert_eq!(second.clean_rows, 0);
    assert_eq!(provider.calls.get(), 2);

    let rows = store.clean_ingredients_for(recipe_id).unwrap();
    let names: Vec<&str> = rows.iter().map(|row| row.ingredient.as_str()).collect();
    assert_eq!(names, vec!["flour", "salt", "pepper"]);
    assert_eq!(rows[0].quantity, Some(125.0));
    assert_eq!(rows[1].quantity, None);
    assert_eq!(store.count("ingredients_clean").unwrap(), 3);
}

#[test]
fn test_bad_reply_aborts_and_keeps_earlier_entries() {
    let provider = ScriptedProvider::new(&[
        (
            "2 eggs",
            r#"{"ingredients": [{"quantity": 100.0, "ingredient": "eggs"}]}"#,
        ),
        ("1 pinch of magic", "I'm not sure what that is."),
    ]);
    let (mut store, _) = store_with(&["2 eggs", "1 pinch of magic", "1 cup milk"]);

    let result = IngredientNormalizer::new(&provider, &mut store).run();
    assert!(matches!(
        result,
        Err(NormalizeError::InferenceParseError { .. })
    ));
    // The third entry is never attempted
    assert_eq!(provider.calls.get(), 2);

    let pending: Vec<String> = store
        .unprocessed_entries()
        .unwrap()
        .into_iter()
        .map(|entry| entry.ingredient)
        .collect();
    assert_eq!(pending, vec!["1 pinch of magic", "1 cup milk"]);
    assert_eq!(store.count("ingredients_clean").unwrap(), 1);
}

#[test]
fn test_provider_failure_leaves_entry_unprocessed() {
    let provider = ScriptedProvider::new(&[]);
    let (mut store, _) = store_with(&["1 cup sugar"]);

    let result = IngredientNormalizer::new(&provider, &mut store).run();
    assert!(matches!(
        result,
        Err(NormalizeError::Inference {
            source: InferenceError::Api(_),
            ..
        })
    ));
    assert_eq!(store.unprocessed_entries().unwrap().len(), 1);
    assert_eq!(store.count("ingredients_clean").unwrap(), 0);
}

#[test]
fn test_normalize_through_openai_endpoint() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"choices": [{"message": {"role": "assistant",
                "content": "{\"ingredients\": [{\"quantity\": 240.0, \"ingredient\": \"milk\"}]}"}}]}"#,
        )
        .expect(1)
        .create();

    let provider = OpenAIProvider::with_base_url(
        "test-key".to_string(),
        server.url(),
        "gpt-4o-mini".to_string(),
    );
    let (mut store, recipe_id) = store_with(&["1 cup milk"]);

    let summary = IngredientNormalizer::new(&provider, &mut store).run().unwrap();
    mock.assert();
    assert_eq!(summary.entries, 1);

    let rows = store.clean_ingredients_for(recipe_id).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].ingredient, "milk");
    assert_eq!(rows[0].quantity, Some(240.0));
    assert!(store.unprocessed_entries().unwrap().is_empty());
}
