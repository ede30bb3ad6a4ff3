use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A recipe field that can be requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    Ingredients,
    Details,
    Reviews,
    Rating,
    Nutrition,
    Published,
    Category,
    Link,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Title,
        Field::Ingredients,
        Field::Details,
        Field::Reviews,
        Field::Rating,
        Field::Nutrition,
        Field::Published,
        Field::Category,
        Field::Link,
    ];

    /// Capitalized name used in the report file
    pub fn label(&self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Ingredients => "Ingredients",
            Field::Details => "Details",
            Field::Reviews => "Reviews",
            Field::Rating => "Rating",
            Field::Nutrition => "Nutrition",
            Field::Published => "Published",
            Field::Category => "Category",
            Field::Link => "Link",
        }
    }
}

/// The set of fields a run should scrape
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSelection(BTreeSet<Field>);

impl FieldSelection {
    pub fn all() -> Self {
        FieldSelection(Field::ALL.into_iter().collect())
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Selected fields in report order
    pub fn iter(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Field> for FieldSelection {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        FieldSelection(iter.into_iter().collect())
    }
}

/// A value from the recipe details grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailValue {
    /// Any "... Time" entry, converted to minutes
    Minutes(u32),
    /// A fully numeric "Servings" entry
    Count(u32),
    Text(String),
}

impl fmt::Display for DetailValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailValue::Minutes(m) => write!(f, "{m}"),
            DetailValue::Count(c) => write!(f, "{c}"),
            DetailValue::Text(t) => f.write_str(t),
        }
    }
}

/// Review count, or the marker for a recipe nobody has reviewed yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reviews {
    Count(i64),
    NoReviews,
}

impl fmt::Display for Reviews {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reviews::Count(n) => write!(f, "{n}"),
            Reviews::NoReviews => f.write_str("no reviews"),
        }
    }
}

/// The typed value of one extracted field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    /// Label and value pairs in page order
    Details(Vec<(String, DetailValue)>),
    Reviews(Reviews),
    /// `None` when the page has no rating at all
    Rating(Option<f64>),
    Nutrition(BTreeMap<String, i64>),
}

fn write_map<'a, V: fmt::Display + 'a>(
    f: &mut fmt::Formatter<'_>,
    pairs: impl IntoIterator<Item = (&'a String, &'a V)>,
) -> fmt::Result {
    f.write_str("{")?;
    for (i, (key, value)) in pairs.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{key}: {value}")?;
    }
    f.write_str("}")
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::List(items) => write!(f, "[{}]", items.join(", ")),
            FieldValue::Details(details) => write_map(f, details.iter().map(|(k, v)| (k, v))),
            FieldValue::Reviews(reviews) => write!(f, "{reviews}"),
            FieldValue::Rating(Some(rating)) => write!(f, "{rating}"),
            FieldValue::Rating(None) => f.write_str("no rating"),
            FieldValue::Nutrition(facts) => write_map(f, facts),
        }
    }
}

/// Field mapping assembled for one recipe page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeFields {
    values: BTreeMap<Field, FieldValue>,
}

impl RecipeFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, value: FieldValue) {
        self.values.insert(field, value);
    }

    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    /// Populated fields in report order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldValue)> {
        self.values.iter().map(|(field, value)| (*field, value))
    }

    fn text(&self, field: Field) -> Option<&str> {
        match self.get(field) {
            Some(FieldValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    fn list(&self, field: Field) -> &[String] {
        match self.get(field) {
            Some(FieldValue::List(items)) => items,
            _ => &[],
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.text(Field::Title)
    }

    pub fn link(&self) -> Option<&str> {
        self.text(Field::Link)
    }

    pub fn published(&self) -> Option<&str> {
        self.text(Field::Published)
    }

    pub fn ingredients(&self) -> &[String] {
        self.list(Field::Ingredients)
    }

    pub fn categories(&self) -> &[String] {
        self.list(Field::Category)
    }

    pub fn details(&self) -> Option<&[(String, DetailValue)]> {
        match self.get(Field::Details) {
            Some(FieldValue::Details(details)) => Some(details),
            _ => None,
        }
    }

    pub fn nutrition(&self) -> Option<&BTreeMap<String, i64>> {
        match self.get(Field::Nutrition) {
            Some(FieldValue::Nutrition(facts)) => Some(facts),
            _ => None,
        }
    }

    pub fn reviews(&self) -> Option<Reviews> {
        match self.get(Field::Reviews) {
            Some(FieldValue::Reviews(reviews)) => Some(*reviews),
            _ => None,
        }
    }

    /// `None` when the rating was not requested, `Some(None)` when the page had none
    pub fn rating(&self) -> Option<Option<f64>> {
        match self.get(Field::Rating) {
            Some(FieldValue::Rating(rating)) => Some(*rating),
            _ => None,
        }
    }
}

/// A row of the `recipes` table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeRecord {
    pub id: i64,
    pub link: Option<String>,
    pub title: Option<String>,
    pub num_reviews: Option<i64>,
    pub rating: Option<f64>,
    pub date_published: Option<String>,
}

/// A raw ingredient line waiting for normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientEntry {
    pub id: i64,
    pub recipe_id: i64,
    pub ingredient: String,
}

/// A normalized ingredient with its quantity in grams
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanIngredient {
    pub recipe_id: i64,
    pub ingredient: String,
    pub quantity: Option<f64>,
}
