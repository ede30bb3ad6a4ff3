/// The system prompt sent with every ingredient line.
///
/// It asks for a JSON object of the form
/// `{"ingredients": [{"quantity": <grams or null>, "ingredient": "<name>"}]}`.
/// Loaded from `prompt.txt` at compile time.
pub const INGREDIENT_NORMALIZER_PROMPT: &str = include_str!("prompt.txt");
