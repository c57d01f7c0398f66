// src/vocabulary.rs

//! Fixed vocabulary of meals, ingredients, and measures
//!
//! Every term has a stable 1-based id given by its declaration position
//! within its category. The set is closed: nothing here is extended at
//! runtime, and the store seeds its lookup tables from this registry.
//!
//! # Specificity
//!
//! The ingredient line parser builds regex alternations from these terms.
//! Alternation is leftmost-first, so [`Vocabulary::by_specificity`] hands
//! terms out longest first (ties keep declaration order). A short measure
//! such as `l` therefore never wins over a longer term that starts with the
//! same letters.

use crate::error::{Error, Result};
use std::sync::LazyLock;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Vocabulary category, one per lookup table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Meal,
    Ingredient,
    Measure,
}

impl Category {
    /// Table holding this category's terms
    pub fn table(&self) -> &'static str {
        match self {
            Category::Meal => "meals",
            Category::Ingredient => "ingredients",
            Category::Measure => "measures",
        }
    }

    /// Primary key column of the category table
    pub fn id_column(&self) -> &'static str {
        match self {
            Category::Meal => "meal_id",
            Category::Ingredient => "ingredient_id",
            Category::Measure => "measure_id",
        }
    }

    /// Name column of the category table
    pub fn name_column(&self) -> &'static str {
        match self {
            Category::Meal => "meal_name",
            Category::Ingredient => "ingredient_name",
            Category::Measure => "measure_name",
        }
    }
}

/// Meal times a recipe can be served at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Meal {
    Breakfast,
    Brunch,
    Lunch,
    Supper,
}

/// Ingredients a recipe line may name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Ingredient {
    Milk,
    Cacao,
    Strawberry,
    Blue,
    Black,
    Sugar,
}

/// Units of measure; `Unitless` is the empty measure used by lines like `3 sugar`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Measure {
    Ml,
    G,
    L,
    Cup,
    Tbsp,
    Tsp,
    Dsp,
    #[strum(serialize = "")]
    Unitless,
}

/// A vocabulary enum whose declaration order defines term ids
pub trait Term: IntoEnumIterator + Into<&'static str> + Copy + PartialEq {
    const CATEGORY: Category;

    /// 1-based id of this term
    fn id(self) -> i64 {
        Self::iter().take_while(|term| *term != self).count() as i64 + 1
    }

    /// Name of this term as stored and parsed
    fn name(self) -> &'static str {
        self.into()
    }
}

impl Term for Meal {
    const CATEGORY: Category = Category::Meal;
}

impl Term for Ingredient {
    const CATEGORY: Category = Category::Ingredient;
}

impl Term for Measure {
    const CATEGORY: Category = Category::Measure;
}

/// Ordered term lists for every category
#[derive(Debug)]
pub struct Vocabulary {
    meals: Vec<&'static str>,
    ingredients: Vec<&'static str>,
    measures: Vec<&'static str>,
}

static REGISTRY: LazyLock<Vocabulary> = LazyLock::new(Vocabulary::build);

/// The process-wide vocabulary registry
pub fn registry() -> &'static Vocabulary {
    &REGISTRY
}

impl Vocabulary {
    fn build() -> Self {
        Self {
            meals: names::<Meal>(),
            ingredients: names::<Ingredient>(),
            measures: names::<Measure>(),
        }
    }

    /// All terms of a category in id order
    pub fn terms(&self, category: Category) -> &[&'static str] {
        match category {
            Category::Meal => &self.meals,
            Category::Ingredient => &self.ingredients,
            Category::Measure => &self.measures,
        }
    }

    /// `(id, name)` pairs of a category in id order
    pub fn entries(&self, category: Category) -> impl Iterator<Item = (i64, &'static str)> + '_ {
        self.terms(category)
            .iter()
            .enumerate()
            .map(|(pos, name)| (pos as i64 + 1, *name))
    }

    /// Look up the id of a name
    pub fn id_of(&self, category: Category, name: &str) -> Result<i64> {
        self.terms(category)
            .iter()
            .position(|term| *term == name)
            .map(|pos| pos as i64 + 1)
            .ok_or_else(|| Error::UnknownTerm {
                category,
                name: name.to_string(),
            })
    }

    /// Look up the name behind an id
    pub fn name_of(&self, category: Category, id: i64) -> Result<&'static str> {
        id.checked_sub(1)
            .and_then(|pos| usize::try_from(pos).ok())
            .and_then(|pos| self.terms(category).get(pos))
            .copied()
            .ok_or(Error::InvalidId { category, id })
    }

    /// Whether a token is exactly one of the category's terms
    ///
    /// Plain membership test for callers that do not need the id; use
    /// [`Vocabulary::id_of`] when the id is wanted, since it reports
    /// `UnknownTerm` itself.
    pub fn contains(&self, category: Category, token: &str) -> bool {
        self.terms(category).contains(&token)
    }

    /// Terms ordered longest first; equal lengths keep declaration order
    pub fn by_specificity(&self, category: Category) -> Vec<&'static str> {
        longest_first(self.terms(category))
    }

    /// Resolve a list of names to distinct ids, failing on the first unknown name
    pub fn resolve_all<S: AsRef<str>>(&self, category: Category, names: &[S]) -> Result<Vec<i64>> {
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            let id = self.id_of(category, name.as_ref())?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Ok(ids)
    }
}

/// Copy of `terms` sorted by descending length, stable for equal lengths
pub fn longest_first<'a>(terms: &[&'a str]) -> Vec<&'a str> {
    let mut ordered = terms.to_vec();
    ordered.sort_by_key(|term| std::cmp::Reverse(term.len()));
    ordered
}

fn names<T: Term>() -> Vec<&'static str> {
    T::iter().map(T::name).collect()
}
